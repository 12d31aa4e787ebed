use anchor_lang::prelude::*;

use crate::state::ResolutionPath;

#[event]
pub struct PlatformInitialized {
    pub authority: Pubkey,
    pub moderator: Pubkey,
    pub treasury: Pubkey,
    pub retract_window_seconds: i64,
}

#[event]
pub struct ModeratorUpdated {
    pub previous: Pubkey,
    pub moderator: Pubkey,
}

#[event]
pub struct PlayerInitialized {
    pub player: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PlayerBanStatusChanged {
    pub player: Pubkey,
    pub is_banned: bool,
    pub ban_expires_at: i64,
}

#[event]
pub struct WagerCreated {
    pub wager: Pubkey,
    pub player_a: Pubkey,
    pub match_id: u64,
    pub stake_lamports: u64,
    pub external_game_id: String,
    pub requires_moderator: bool,
}

#[event]
pub struct WagerJoined {
    pub wager: Pubkey,
    pub player_b: Pubkey,
    pub stake_lamports: u64,
}

/// Shared by wagers and escrows; `record` is the voted-on account.
#[event]
pub struct VoteSubmitted {
    pub record: Pubkey,
    pub player: Pubkey,
    pub voted_winner: Pubkey,
    pub retract_deadline: Option<i64>,
    pub disputed: bool,
}

#[event]
pub struct VoteRetracted {
    pub record: Pubkey,
    pub player: Pubkey,
}

#[event]
pub struct WagerResolved {
    pub wager: Pubkey,
    pub winner: Pubkey,
    pub path: ResolutionPath,
    pub total_payout: u64,
}

#[event]
pub struct WagerClosed {
    pub wager: Pubkey,
    pub refund_player_a: u64,
    pub refund_player_b: u64,
}

#[event]
pub struct EscrowInitialized {
    pub escrow: Pubkey,
    pub player_a: Pubkey,
    pub player_b: Pubkey,
    pub mint: Pubkey,
    pub match_id: u64,
    pub amount: u64,
}

#[event]
pub struct EscrowJoined {
    pub escrow: Pubkey,
    pub player_b: Pubkey,
    pub amount: u64,
}

#[event]
pub struct EscrowResolved {
    pub escrow: Pubkey,
    pub winner: Pubkey,
    pub path: ResolutionPath,
    pub payout: u64,
    pub fee: u64,
}

#[event]
pub struct EscrowForceClosed {
    pub escrow: Pubkey,
    pub refund_player_a: u64,
    pub refund_player_b: u64,
}
