use anchor_lang::prelude::*;

use crate::custody;
use crate::events::WagerCreated;
use crate::state::{PlayerProfile, WagerAccount};

#[derive(Accounts)]
#[instruction(match_id: u64)]
pub struct CreateWager<'info> {
    #[account(
        init,
        payer = player_a,
        space = 8 + WagerAccount::INIT_SPACE,
        seeds = [WagerAccount::SEED, player_a.key().as_ref(), match_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub wager: Account<'info, WagerAccount>,

    #[account(
        seeds = [PlayerProfile::SEED, player_a.key().as_ref()],
        bump = player_a_profile.bump,
    )]
    pub player_a_profile: Account<'info, PlayerProfile>,

    /// Creator; pays rent and the first stake.
    #[account(mut)]
    pub player_a: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<CreateWager>,
    match_id: u64,
    stake_lamports: u64,
    external_game_id: String,
    requires_moderator: bool,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let player_a = ctx.accounts.player_a.key();

    let wager = &mut ctx.accounts.wager;
    wager.open(
        player_a,
        match_id,
        stake_lamports,
        external_game_id,
        requires_moderator,
        &ctx.accounts.player_a_profile,
        now,
        ctx.bumps.wager,
    )?;

    custody::deposit_lamports(
        ctx.accounts.system_program.to_account_info(),
        ctx.accounts.player_a.to_account_info(),
        ctx.accounts.wager.to_account_info(),
        stake_lamports,
    )?;

    let wager = &ctx.accounts.wager;
    emit!(WagerCreated {
        wager: wager.key(),
        player_a,
        match_id,
        stake_lamports,
        external_game_id: wager.external_game_id.clone(),
        requires_moderator,
    });

    Ok(())
}
