use anchor_lang::prelude::*;

use crate::errors::GambitError;

#[account]
#[derive(InitSpace)]
pub struct PlayerProfile {
    /// Wallet that owns this profile.
    pub player: Pubkey,
    /// Set by the authority; only meaningful while `ban_expires_at` is in
    /// the future.
    pub is_banned: bool,
    /// Unix timestamp the ban lifts at (0 if never banned or unbanned).
    pub ban_expires_at: i64,
    /// Unix timestamp of the last `initialize_player` call.
    pub last_active: i64,
    /// PDA bump seed.
    pub bump: u8,
}

impl PlayerProfile {
    pub const SEED: &'static [u8] = b"player";

    pub fn address(player: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::SEED, player.as_ref()], &crate::ID)
    }

    /// An expired ban never blocks, even if the flag was never cleared.
    pub fn is_ban_active(&self, now: i64) -> bool {
        self.is_banned && now < self.ban_expires_at
    }

    /// Ban for `duration_seconds` from `now`; zero lifts any ban.
    pub fn apply_ban(&mut self, duration_seconds: i64, now: i64) -> Result<()> {
        require!(duration_seconds >= 0, GambitError::InvalidBanDuration);

        if duration_seconds == 0 {
            self.is_banned = false;
            self.ban_expires_at = 0;
        } else {
            self.ban_expires_at = now
                .checked_add(duration_seconds)
                .ok_or(GambitError::MathOverflow)?;
            self.is_banned = true;
        }
        Ok(())
    }
}
