use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::custody;
use crate::errors::GambitError;
use crate::events::EscrowJoined;
use crate::state::EscrowAccount;

#[derive(Accounts)]
pub struct JoinEscrow<'info> {
    #[account(
        mut,
        seeds = [
            EscrowAccount::SEED,
            escrow.player_a.as_ref(),
            escrow.player_b.as_ref(),
            escrow.match_id.to_le_bytes().as_ref(),
        ],
        bump = escrow.bump,
    )]
    pub escrow: Account<'info, EscrowAccount>,

    #[account(mut, address = escrow.vault)]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = player_b_token_account.owner == player_b.key() @ GambitError::InvalidTokenAccount,
        constraint = player_b_token_account.mint == escrow.mint @ GambitError::InvalidTokenAccount,
    )]
    pub player_b_token_account: Account<'info, TokenAccount>,

    /// The opponent named at creation.
    pub player_b: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<JoinEscrow>, amount: u64) -> Result<()> {
    let player_b = ctx.accounts.player_b.key();
    ctx.accounts.escrow.join(player_b, amount)?;

    custody::deposit_tokens(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.player_b_token_account.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.player_b.to_account_info(),
        amount,
    )?;

    emit!(EscrowJoined {
        escrow: ctx.accounts.escrow.key(),
        player_b,
        amount,
    });

    Ok(())
}
