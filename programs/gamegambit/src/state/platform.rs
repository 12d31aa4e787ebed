use anchor_lang::prelude::*;

use crate::constants::{DEFAULT_RETRACT_WINDOW_SECONDS, MAX_RETRACT_WINDOW_SECONDS};
use crate::errors::GambitError;
use crate::state::Arbiters;

#[account]
#[derive(InitSpace)]
pub struct Platform {
    /// Admin who bans players and closes records.
    pub authority: Pubkey,
    /// Rules on disputed wagers and escrows.
    pub moderator: Pubkey,
    /// Wallet owning the token accounts that receive escrow fees.
    pub treasury: Pubkey,
    /// Grace period after both votes agree.
    pub retract_window_seconds: i64,
    /// PDA bump seed.
    pub bump: u8,
}

impl Platform {
    pub const SEED: &'static [u8] = b"platform";

    pub fn address() -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::SEED], &crate::ID)
    }

    pub fn configure(
        &mut self,
        authority: Pubkey,
        moderator: Pubkey,
        treasury: Pubkey,
        retract_window_seconds: Option<i64>,
        bump: u8,
    ) -> Result<()> {
        let window = retract_window_seconds.unwrap_or(DEFAULT_RETRACT_WINDOW_SECONDS);
        require!(
            (1..=MAX_RETRACT_WINDOW_SECONDS).contains(&window),
            GambitError::InvalidRetractWindow
        );

        self.authority = authority;
        self.moderator = moderator;
        self.treasury = treasury;
        self.retract_window_seconds = window;
        self.bump = bump;
        Ok(())
    }

    pub fn arbiters(&self) -> Arbiters {
        Arbiters {
            authority: self.authority,
            moderator: self.moderator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::assert_gambit_err;

    fn blank() -> Platform {
        Platform {
            authority: Pubkey::default(),
            moderator: Pubkey::default(),
            treasury: Pubkey::default(),
            retract_window_seconds: 0,
            bump: 0,
        }
    }

    #[test]
    fn defaults_retract_window() {
        let mut platform = blank();
        let (authority, moderator, treasury) =
            (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());

        platform
            .configure(authority, moderator, treasury, None, 254)
            .unwrap();

        assert_eq!(platform.retract_window_seconds, DEFAULT_RETRACT_WINDOW_SECONDS);
        assert_eq!(platform.arbiters().moderator, moderator);
        assert_eq!(platform.arbiters().authority, authority);
    }

    #[test]
    fn rejects_out_of_range_window() {
        for window in [0, -5, MAX_RETRACT_WINDOW_SECONDS + 1] {
            let mut platform = blank();
            assert_gambit_err(
                platform.configure(
                    Pubkey::new_unique(),
                    Pubkey::new_unique(),
                    Pubkey::new_unique(),
                    Some(window),
                    1,
                ),
                GambitError::InvalidRetractWindow,
            );
        }
    }
}
