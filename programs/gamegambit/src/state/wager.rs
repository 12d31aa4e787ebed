use anchor_lang::prelude::*;

use crate::constants::MAX_EXTERNAL_GAME_ID_LEN;
use crate::errors::GambitError;
use crate::state::{
    authorize_resolution, pot_of, Arbiters, MatchStatus, PlayerProfile, Refunds, ResolutionPath,
    Seat,
};

/// Native-SOL wager. The account itself holds both stakes on top of its
/// rent.
#[account]
#[derive(InitSpace)]
pub struct WagerAccount {
    /// Caller-chosen match identifier, unique per creator.
    pub match_id: u64,
    /// Creator's wallet.
    pub player_a: Pubkey,
    /// Opponent's wallet (None until joined).
    pub player_b: Option<Pubkey>,
    /// Stake per player in lamports.
    pub stake_lamports: u64,
    /// Game id on the external platform (e.g. Lichess).
    #[max_len(20)]
    pub external_game_id: String,
    /// Wager created expecting moderator arbitration of disputes.
    pub requires_moderator: bool,
    /// Current lifecycle status.
    pub status: MatchStatus,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of settlement (0 if not yet).
    pub resolved_at: i64,
    /// PDA bump seed.
    pub bump: u8,
}

/// Shared validation for wager and escrow creation.
pub fn validate_new_match(
    match_id: u64,
    stake: u64,
    external_game_id: &str,
    creator_profile: &PlayerProfile,
    now: i64,
) -> Result<()> {
    require!(stake > 0, GambitError::InvalidAmount);
    require!(match_id > 0, GambitError::InvalidMatchId);
    require!(
        external_game_id.len() <= MAX_EXTERNAL_GAME_ID_LEN,
        GambitError::GameIdTooLong
    );
    require!(
        !creator_profile.is_ban_active(now),
        GambitError::PlayerBanned
    );
    Ok(())
}

impl WagerAccount {
    pub const SEED: &'static [u8] = b"wager";

    pub fn address(player_a: &Pubkey, match_id: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[Self::SEED, player_a.as_ref(), &match_id.to_le_bytes()],
            &crate::ID,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn open(
        &mut self,
        player_a: Pubkey,
        match_id: u64,
        stake_lamports: u64,
        external_game_id: String,
        requires_moderator: bool,
        creator_profile: &PlayerProfile,
        now: i64,
        bump: u8,
    ) -> Result<()> {
        require_keys_eq!(creator_profile.player, player_a, GambitError::Unauthorized);
        validate_new_match(match_id, stake_lamports, &external_game_id, creator_profile, now)?;

        self.match_id = match_id;
        self.player_a = player_a;
        self.player_b = None;
        self.stake_lamports = stake_lamports;
        self.external_game_id = external_game_id;
        self.requires_moderator = requires_moderator;
        self.status = MatchStatus::Created;
        self.created_at = now;
        self.resolved_at = 0;
        self.bump = bump;
        Ok(())
    }

    pub fn join(&mut self, player_b: Pubkey, stake_lamports: u64) -> Result<()> {
        require!(
            self.status == MatchStatus::Created,
            GambitError::InvalidState
        );
        require!(
            stake_lamports == self.stake_lamports,
            GambitError::InvalidAmount
        );
        require_keys_neq!(player_b, self.player_a, GambitError::Unauthorized);

        self.player_b = Some(player_b);
        self.status = MatchStatus::Joined;
        Ok(())
    }

    pub fn seat_of(&self, key: &Pubkey) -> Option<Seat> {
        if *key == self.player_a {
            Some(Seat::A)
        } else if self.player_b == Some(*key) {
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

    /// Settle in favour of `winner`, returning the lamports owed to them.
    pub fn resolve(
        &mut self,
        caller: Pubkey,
        winner: Pubkey,
        arbiters: &Arbiters,
        now: i64,
    ) -> Result<(ResolutionPath, u64)> {
        let path = authorize_resolution(
            &self.status,
            caller,
            self.seat_of(&caller),
            winner,
            arbiters,
            !self.requires_moderator,
            now,
        )?;
        let pot = self.pot()?;

        self.status = MatchStatus::Settled { winner };
        self.resolved_at = now;
        Ok((path, pot))
    }

    /// Cancel whatever is still in custody and report who gets it back.
    /// A settled wager owes nothing and keeps its status.
    pub fn cancel(&mut self) -> Refunds {
        let refunds = Refunds::owed(&self.status, self.stake_lamports);
        if !self.status.is_terminal() {
            self.status = MatchStatus::Cancelled;
        }
        refunds
    }

    pub fn pot(&self) -> Result<u64> {
        pot_of(self.stake_lamports)
    }

    pub fn retract_deadline(&self) -> Option<i64> {
        self.status.retract_deadline()
    }
}
