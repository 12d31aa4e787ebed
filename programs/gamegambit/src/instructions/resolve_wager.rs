use anchor_lang::prelude::*;

use crate::custody;
use crate::errors::GambitError;
use crate::events::WagerResolved;
use crate::state::{Platform, WagerAccount};

#[derive(Accounts)]
#[instruction(winner: Pubkey)]
pub struct ResolveWager<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [WagerAccount::SEED, wager.player_a.as_ref(), wager.match_id.to_le_bytes().as_ref()],
        bump = wager.bump,
    )]
    pub wager: Account<'info, WagerAccount>,

    /// CHECK: Payout destination; must be the ruled winner.
    #[account(
        mut,
        constraint = winner_account.key() == winner @ GambitError::InvalidWinner,
    )]
    pub winner_account: UncheckedAccount<'info>,

    /// A participant (agreement) or the moderator (dispute).
    pub authorizer: Signer<'info>,
}

pub fn handler(ctx: Context<ResolveWager>, winner: Pubkey) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let arbiters = ctx.accounts.platform.arbiters();
    let authorizer = ctx.accounts.authorizer.key();

    let (path, total_payout) = ctx
        .accounts
        .wager
        .resolve(authorizer, winner, &arbiters, now)?;

    custody::release_lamports(
        &ctx.accounts.wager.to_account_info(),
        &ctx.accounts.winner_account.to_account_info(),
        total_payout,
    )?;

    emit!(WagerResolved {
        wager: ctx.accounts.wager.key(),
        winner,
        path,
        total_payout,
    });

    Ok(())
}
