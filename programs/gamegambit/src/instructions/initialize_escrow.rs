use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::custody;
use crate::errors::GambitError;
use crate::events::EscrowInitialized;
use crate::state::{EscrowAccount, PlayerProfile};

#[derive(Accounts)]
#[instruction(amount: u64, external_game_id: String, match_id: u64)]
pub struct InitializeEscrow<'info> {
    #[account(
        init,
        payer = player_a,
        space = 8 + EscrowAccount::INIT_SPACE,
        seeds = [
            EscrowAccount::SEED,
            player_a.key().as_ref(),
            player_b.key().as_ref(),
            match_id.to_le_bytes().as_ref(),
        ],
        bump,
    )]
    pub escrow: Account<'info, EscrowAccount>,

    /// Vault token account owned by the escrow PDA. May already exist;
    /// any balance it holds is swept to the treasury on settlement.
    #[account(
        init_if_needed,
        payer = player_a,
        associated_token::mint = mint,
        associated_token::authority = escrow,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Stake token mint.
    pub mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = player_a_token_account.owner == player_a.key() @ GambitError::InvalidTokenAccount,
        constraint = player_a_token_account.mint == mint.key() @ GambitError::InvalidTokenAccount,
    )]
    pub player_a_token_account: Account<'info, TokenAccount>,

    #[account(
        seeds = [PlayerProfile::SEED, player_a.key().as_ref()],
        bump = player_a_profile.bump,
    )]
    pub player_a_profile: Account<'info, PlayerProfile>,

    /// Creator; pays rent and the first stake.
    #[account(mut)]
    pub player_a: Signer<'info>,

    /// CHECK: Opponent wallet address.
    pub player_b: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

pub fn handler(
    ctx: Context<InitializeEscrow>,
    amount: u64,
    external_game_id: String,
    match_id: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let player_a = ctx.accounts.player_a.key();
    let player_b = ctx.accounts.player_b.key();
    let mint = ctx.accounts.mint.key();

    let escrow = &mut ctx.accounts.escrow;
    escrow.open(
        player_a,
        player_b,
        mint,
        ctx.accounts.vault.key(),
        amount,
        external_game_id,
        match_id,
        &ctx.accounts.player_a_profile,
        now,
        ctx.bumps.escrow,
    )?;

    custody::deposit_tokens(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.player_a_token_account.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.player_a.to_account_info(),
        amount,
    )?;

    emit!(EscrowInitialized {
        escrow: ctx.accounts.escrow.key(),
        player_a,
        player_b,
        mint,
        match_id,
        amount,
    });

    Ok(())
}
