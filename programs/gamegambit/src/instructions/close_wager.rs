use anchor_lang::prelude::*;

use crate::custody;
use crate::errors::GambitError;
use crate::events::WagerClosed;
use crate::state::{check_refund_wallet, Platform, WagerAccount};

#[derive(Accounts)]
pub struct CloseWager<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
        has_one = authority @ GambitError::Unauthorized,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [WagerAccount::SEED, wager.player_a.as_ref(), wager.match_id.to_le_bytes().as_ref()],
        bump = wager.bump,
        close = authority,
    )]
    pub wager: Account<'info, WagerAccount>,

    /// CHECK: Creator's wallet, refunded if their stake is still held.
    #[account(mut, address = wager.player_a)]
    pub player_a: UncheckedAccount<'info>,

    /// CHECK: Opponent's wallet; required only once the wager was joined.
    #[account(mut)]
    pub player_b: Option<UncheckedAccount<'info>>,

    /// Platform authority; receives the reclaimed rent.
    #[account(mut)]
    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<CloseWager>) -> Result<()> {
    let wager_key = ctx.accounts.wager.key();
    let player_b = ctx.accounts.wager.player_b;
    let refunds = ctx.accounts.wager.cancel();
    let wager_info = ctx.accounts.wager.to_account_info();

    custody::release_lamports(
        &wager_info,
        &ctx.accounts.player_a.to_account_info(),
        refunds.player_a,
    )?;

    if refunds.player_b > 0 {
        let supplied = ctx.accounts.player_b.as_ref();
        check_refund_wallet(player_b, supplied.map(|account| account.key()))?;
        let account = supplied.ok_or(GambitError::MissingRefundAccount)?;
        custody::release_lamports(&wager_info, &account.to_account_info(), refunds.player_b)?;
    }

    msg!(
        "Wager {} closed: refunded {} / {} lamports, rent reclaimed by authority",
        ctx.accounts.wager.match_id,
        refunds.player_a,
        refunds.player_b
    );

    emit!(WagerClosed {
        wager: wager_key,
        refund_player_a: refunds.player_a,
        refund_player_b: refunds.player_b,
    });

    Ok(())
}
