use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::custody;
use crate::errors::GambitError;
use crate::events::EscrowResolved;
use crate::state::{treasury_share, EscrowAccount, Platform};

#[derive(Accounts)]
#[instruction(winner: Pubkey)]
pub struct ResolveEscrow<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [
            EscrowAccount::SEED,
            escrow.player_a.as_ref(),
            escrow.player_b.as_ref(),
            escrow.match_id.to_le_bytes().as_ref(),
        ],
        bump = escrow.bump,
        close = authorizer,
    )]
    pub escrow: Account<'info, EscrowAccount>,

    #[account(mut, address = escrow.vault)]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = winner_token_account.owner == winner @ GambitError::InvalidWinner,
        constraint = winner_token_account.mint == escrow.mint @ GambitError::InvalidTokenAccount,
    )]
    pub winner_token_account: Account<'info, TokenAccount>,

    /// Fee destination, owned by the platform treasury.
    #[account(
        mut,
        constraint = treasury_token_account.owner == platform.treasury @ GambitError::InvalidTokenAccount,
        constraint = treasury_token_account.mint == escrow.mint @ GambitError::InvalidTokenAccount,
    )]
    pub treasury_token_account: Account<'info, TokenAccount>,

    /// A participant (agreement) or the moderator (dispute). Receives the
    /// reclaimed rent.
    #[account(mut)]
    pub authorizer: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<ResolveEscrow>, winner: Pubkey) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let arbiters = ctx.accounts.platform.arbiters();
    let authorizer = ctx.accounts.authorizer.key();

    let held = ctx.accounts.escrow.custody_balance()?;
    let payout = ctx
        .accounts
        .escrow
        .resolve(authorizer, winner, &arbiters, now)?;

    // Fee plus any stray vault tokens, so the vault closes at zero.
    let treasury_amount =
        treasury_share(ctx.accounts.vault.amount, held, payout.winner_amount)?;

    let escrow = &ctx.accounts.escrow;
    let match_id_bytes = escrow.match_id.to_le_bytes();
    let bump_bytes = [escrow.bump];
    let signer_seeds: &[&[&[u8]]] = &[&[
        EscrowAccount::SEED,
        escrow.player_a.as_ref(),
        escrow.player_b.as_ref(),
        &match_id_bytes,
        &bump_bytes,
    ]];

    let token_program = ctx.accounts.token_program.to_account_info();
    let vault = ctx.accounts.vault.to_account_info();
    let escrow_info = escrow.to_account_info();

    custody::release_tokens(
        token_program.clone(),
        vault.clone(),
        ctx.accounts.winner_token_account.to_account_info(),
        escrow_info.clone(),
        signer_seeds,
        payout.winner_amount,
    )?;
    custody::release_tokens(
        token_program.clone(),
        vault.clone(),
        ctx.accounts.treasury_token_account.to_account_info(),
        escrow_info.clone(),
        signer_seeds,
        treasury_amount,
    )?;
    custody::close_vault(
        token_program,
        vault,
        ctx.accounts.authorizer.to_account_info(),
        escrow_info,
        signer_seeds,
    )?;

    emit!(EscrowResolved {
        escrow: escrow.key(),
        winner,
        path: payout.path,
        payout: payout.winner_amount,
        fee: treasury_amount,
    });

    Ok(())
}
