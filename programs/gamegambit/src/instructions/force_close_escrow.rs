use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::custody;
use crate::errors::GambitError;
use crate::events::EscrowForceClosed;
use crate::state::{check_refund_token_account, treasury_share, EscrowAccount, Platform};

#[derive(Accounts)]
pub struct ForceCloseEscrow<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
        has_one = authority @ GambitError::Unauthorized,
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
        close = authority,
    )]
    pub escrow: Account<'info, EscrowAccount>,

    #[account(mut, address = escrow.vault)]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = player_a_token_account.owner == escrow.player_a @ GambitError::InvalidTokenAccount,
        constraint = player_a_token_account.mint == escrow.mint @ GambitError::InvalidTokenAccount,
    )]
    pub player_a_token_account: Account<'info, TokenAccount>,

    /// Required only once the opponent has deposited.
    #[account(mut)]
    pub player_b_token_account: Option<Account<'info, TokenAccount>>,

    /// Receives tokens sent to the vault outside the protocol.
    #[account(
        mut,
        constraint = treasury_token_account.owner == platform.treasury @ GambitError::InvalidTokenAccount,
        constraint = treasury_token_account.mint == escrow.mint @ GambitError::InvalidTokenAccount,
    )]
    pub treasury_token_account: Account<'info, TokenAccount>,

    /// Platform authority; receives the reclaimed rent.
    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<ForceCloseEscrow>) -> Result<()> {
    let held = ctx.accounts.escrow.custody_balance()?;
    let refunds = ctx.accounts.escrow.force_close()?;
    let surplus = treasury_share(ctx.accounts.vault.amount, held, refunds.total()?)?;

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
        ctx.accounts.player_a_token_account.to_account_info(),
        escrow_info.clone(),
        signer_seeds,
        refunds.player_a,
    )?;

    if refunds.player_b > 0 {
        let supplied = ctx.accounts.player_b_token_account.as_ref();
        check_refund_token_account(
            escrow.player_b,
            escrow.mint,
            supplied.map(|account| (account.owner, account.mint)),
        )?;
        let player_b_token_account = supplied.ok_or(GambitError::MissingRefundAccount)?;
        custody::release_tokens(
            token_program.clone(),
            vault.clone(),
            player_b_token_account.to_account_info(),
            escrow_info.clone(),
            signer_seeds,
            refunds.player_b,
        )?;
    }

    // The vault only closes empty.
    custody::release_tokens(
        token_program.clone(),
        vault.clone(),
        ctx.accounts.treasury_token_account.to_account_info(),
        escrow_info.clone(),
        signer_seeds,
        surplus,
    )?;

    custody::close_vault(
        token_program,
        vault,
        ctx.accounts.authority.to_account_info(),
        escrow_info,
        signer_seeds,
    )?;

    msg!(
        "Escrow {} force-closed: refunded {} / {}",
        escrow.match_id,
        refunds.player_a,
        refunds.player_b
    );

    emit!(EscrowForceClosed {
        escrow: escrow.key(),
        refund_player_a: refunds.player_a,
        refund_player_b: refunds.player_b,
    });

    Ok(())
}
