use anchor_lang::prelude::*;

#[error_code]
pub enum GambitError {
    #[msg("Stake amount must be greater than zero and match the wager's stake.")]
    InvalidAmount,
    #[msg("Match id must be greater than zero.")]
    InvalidMatchId,
    #[msg("External game id exceeds maximum length of 20 bytes.")]
    GameIdTooLong,
    #[msg("Player is currently banned.")]
    PlayerBanned,
    #[msg("Operation is not allowed in the record's current status.")]
    InvalidState,
    #[msg("Signer is not allowed to perform this action.")]
    Unauthorized,
    #[msg("Winner does not match the agreed vote.")]
    InvalidWinner,
    #[msg("Ban duration cannot be negative.")]
    InvalidBanDuration,
    #[msg("Retract window must be between 1 second and 24 hours.")]
    InvalidRetractWindow,
    #[msg("Token account owner or mint does not match the escrow.")]
    InvalidTokenAccount,
    #[msg("A depositor's account is required to refund their stake.")]
    MissingRefundAccount,
    #[msg("Arithmetic overflow.")]
    MathOverflow,
}
