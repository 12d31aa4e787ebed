use anchor_lang::prelude::*;

use crate::events::PlayerInitialized;
use crate::state::PlayerProfile;

#[derive(Accounts)]
pub struct InitializePlayer<'info> {
    #[account(
        init_if_needed,
        payer = player,
        space = 8 + PlayerProfile::INIT_SPACE,
        seeds = [PlayerProfile::SEED, player.key().as_ref()],
        bump,
    )]
    pub player_profile: Account<'info, PlayerProfile>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializePlayer>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let profile = &mut ctx.accounts.player_profile;

    // Re-running only refreshes activity; ban state survives.
    if profile.player == Pubkey::default() {
        profile.player = ctx.accounts.player.key();
        profile.is_banned = false;
        profile.ban_expires_at = 0;
        profile.bump = ctx.bumps.player_profile;
    }
    profile.last_active = now;

    emit!(PlayerInitialized {
        player: profile.player,
        timestamp: now,
    });

    Ok(())
}
