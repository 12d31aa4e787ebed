use anchor_lang::prelude::*;

use crate::errors::GambitError;
use crate::events::PlayerBanStatusChanged;
use crate::state::{Platform, PlayerProfile};

#[derive(Accounts)]
pub struct BanPlayer<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
        has_one = authority @ GambitError::Unauthorized,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [PlayerProfile::SEED, player_profile.player.as_ref()],
        bump = player_profile.bump,
    )]
    pub player_profile: Account<'info, PlayerProfile>,

    /// Platform authority.
    pub authority: Signer<'info>,
}

/// `duration_seconds = 0` lifts the ban.
pub fn handler(ctx: Context<BanPlayer>, duration_seconds: i64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let profile = &mut ctx.accounts.player_profile;
    profile.apply_ban(duration_seconds, now)?;

    emit!(PlayerBanStatusChanged {
        player: profile.player,
        is_banned: profile.is_banned,
        ban_expires_at: profile.ban_expires_at,
    });

    Ok(())
}
