use anchor_lang::prelude::*;

use crate::constants::ESCROW_FEE_BPS;
use crate::errors::GambitError;
use crate::state::{
    authorize_resolution, pot_of, split_pot, validate_new_match, Arbiters, MatchStatus,
    PlayerProfile, Refunds, ResolutionPath, Seat,
};

/// Token-denominated wager. Stakes sit in `vault`, an associated token
/// account owned by this PDA.
#[account]
#[derive(InitSpace)]
pub struct EscrowAccount {
    /// Caller-chosen match identifier.
    pub match_id: u64,
    /// Creator's wallet.
    pub player_a: Pubkey,
    /// Opponent's wallet, fixed at creation.
    pub player_b: Pubkey,
    /// Stake token mint.
    pub mint: Pubkey,
    /// Vault token account holding the stakes.
    pub vault: Pubkey,
    /// Stake per player in token base units.
    pub amount: u64,
    /// Game id on the external platform.
    #[max_len(20)]
    pub external_game_id: String,
    /// Current lifecycle status.
    pub status: MatchStatus,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of settlement (0 if not yet).
    pub resolved_at: i64,
    /// PDA bump seed.
    pub bump: u8,
}

/// Token movements for a settled escrow.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EscrowPayout {
    pub path: ResolutionPath,
    pub winner: Pubkey,
    pub winner_amount: u64,
    pub fee: u64,
}

impl EscrowAccount {
    pub const SEED: &'static [u8] = b"escrow";

    pub fn address(player_a: &Pubkey, player_b: &Pubkey, match_id: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                Self::SEED,
                player_a.as_ref(),
                player_b.as_ref(),
                &match_id.to_le_bytes(),
            ],
            &crate::ID,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn open(
        &mut self,
        player_a: Pubkey,
        player_b: Pubkey,
        mint: Pubkey,
        vault: Pubkey,
        amount: u64,
        external_game_id: String,
        match_id: u64,
        creator_profile: &PlayerProfile,
        now: i64,
        bump: u8,
    ) -> Result<()> {
        require_keys_eq!(creator_profile.player, player_a, GambitError::Unauthorized);
        require_keys_neq!(player_a, player_b, GambitError::Unauthorized);
        validate_new_match(match_id, amount, &external_game_id, creator_profile, now)?;

        self.match_id = match_id;
        self.player_a = player_a;
        self.player_b = player_b;
        self.mint = mint;
        self.vault = vault;
        self.amount = amount;
        self.external_game_id = external_game_id;
        self.status = MatchStatus::Created;
        self.created_at = now;
        self.resolved_at = 0;
        self.bump = bump;
        Ok(())
    }

    pub fn join(&mut self, player_b: Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(player_b, self.player_b, GambitError::Unauthorized);
        require!(
            self.status == MatchStatus::Created,
            GambitError::InvalidState
        );
        require!(amount == self.amount, GambitError::InvalidAmount);

        self.status = MatchStatus::Joined;
        Ok(())
    }

    pub fn seat_of(&self, key: &Pubkey) -> Option<Seat> {
        if *key == self.player_a {
            Some(Seat::A)
        } else if *key == self.player_b {
            Some(Seat::B)
        } else {
            None
        }
    }

    pub fn submit_vote(
        &mut self,
        voter: Pubkey,
        declared_winner: Pubkey,
        now: i64,
        retract_window_seconds: i64,
    ) -> Result<()> {
        let seat = self.seat_of(&voter).ok_or(GambitError::Unauthorized)?;
        self.status
            .record_vote(seat, declared_winner, now, retract_window_seconds)
    }

    pub fn retract_vote(&mut self, voter: Pubkey, now: i64) -> Result<()> {
        let seat = self.seat_of(&voter).ok_or(GambitError::Unauthorized)?;
        self.status.retract_vote(seat, now)
    }

    /// Settle in favour of `winner`. Disputes always need the moderator.
    pub fn resolve(
        &mut self,
        caller: Pubkey,
        winner: Pubkey,
        arbiters: &Arbiters,
        now: i64,
    ) -> Result<EscrowPayout> {
        let path = authorize_resolution(
            &self.status,
            caller,
            self.seat_of(&caller),
            winner,
            arbiters,
            false,
            now,
        )?;
        let (winner_amount, fee) = split_pot(self.pot()?, ESCROW_FEE_BPS)?;

        self.status = MatchStatus::Settled { winner };
        self.resolved_at = now;
        Ok(EscrowPayout {
            path,
            winner,
            winner_amount,
            fee,
        })
    }

    /// Operator cancellation: every depositor gets their stake back, no
    /// fee.
    pub fn force_close(&mut self) -> Result<Refunds> {
        require!(!self.status.is_terminal(), GambitError::InvalidState);

        let refunds = Refunds::owed(&self.status, self.amount);
        self.status = MatchStatus::Cancelled;
        Ok(refunds)
    }

    pub fn pot(&self) -> Result<u64> {
        pot_of(self.amount)
    }

    /// Tokens the vault should hold for the current status.
    pub fn custody_balance(&self) -> Result<u64> {
        Refunds::owed(&self.status, self.amount).total()
    }
}
