use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::errors::GambitError;
use crate::state::{MatchStatus, Seat};

/// Identities allowed to rule on a record, read from the platform config.
#[derive(Clone, Copy, Debug)]
pub struct Arbiters {
    pub authority: Pubkey,
    pub moderator: Pubkey,
}

/// How a settlement was authorized.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ResolutionPath {
    /// Players agreed and the retract window has closed.
    Agreement,
    /// Moderator (or authority, when allowed) ruled on a dispute.
    Arbitration,
}

/// Check that `caller` may settle a record in `status` in favour of
/// `winner` at `now`.
///
/// `caller_seat` is the caller's side of the record, if any.
/// `authority_may_arbitrate` lets the platform authority rule on disputes
/// alongside the moderator.
pub fn authorize_resolution(
    status: &MatchStatus,
    caller: Pubkey,
    caller_seat: Option<Seat>,
    winner: Pubkey,
    arbiters: &Arbiters,
    authority_may_arbitrate: bool,
    now: i64,
) -> Result<ResolutionPath> {
    match *status {
        MatchStatus::Retractable {
            winner: agreed,
            retract_deadline,
        } => {
            require!(now >= retract_deadline, GambitError::InvalidState);
            require!(caller_seat.is_some(), GambitError::Unauthorized);
            require_keys_eq!(winner, agreed, GambitError::InvalidWinner);
            Ok(ResolutionPath::Agreement)
        }
        MatchStatus::Disputed { .. } => {
            let is_arbiter = caller == arbiters.moderator
                || (authority_may_arbitrate && caller == arbiters.authority);
            require!(is_arbiter, GambitError::Unauthorized);
            Ok(ResolutionPath::Arbitration)
        }
        _ => err!(GambitError::InvalidState),
    }
}

/// Both stakes together.
pub fn pot_of(stake: u64) -> Result<u64> {
    Ok(stake.checked_mul(2).ok_or(GambitError::MathOverflow)?)
}

/// Split `pot` into `(winner_amount, fee)` at `fee_bps`, rounding the fee
/// down. The product is taken in u128 so any representable pot splits.
pub fn split_pot(pot: u64, fee_bps: u16) -> Result<(u64, u64)> {
    let fee = (pot as u128)
        .checked_mul(fee_bps as u128)
        .ok_or(GambitError::MathOverflow)?
        .checked_div(BPS_DENOMINATOR as u128)
        .ok_or(GambitError::MathOverflow)?;
    let fee = u64::try_from(fee).map_err(|_| GambitError::MathOverflow)?;
    let winner_amount = pot.checked_sub(fee).ok_or(GambitError::MathOverflow)?;
    Ok((winner_amount, fee))
}

/// Tokens the treasury takes when a vault holding `vault_amount` is
/// emptied: whatever custody `held` but did not pay out, plus anything
/// sent to the vault outside the protocol.
///
/// Fails if the vault holds less than custody or custody pays out more
/// than it holds.
pub fn treasury_share(vault_amount: u64, held: u64, paid_out: u64) -> Result<u64> {
    require!(vault_amount >= held, GambitError::InvalidState);
    require!(held >= paid_out, GambitError::InvalidState);
    Ok(vault_amount
        .checked_sub(paid_out)
        .ok_or(GambitError::MathOverflow)?)
}

/// A depositor's refund wallet must be supplied and be the recorded one.
pub fn check_refund_wallet(depositor: Option<Pubkey>, supplied: Option<Pubkey>) -> Result<()> {
    let supplied = supplied.ok_or(GambitError::MissingRefundAccount)?;
    require!(depositor == Some(supplied), GambitError::MissingRefundAccount);
    Ok(())
}

/// A depositor's refund token account, given as `(owner, mint)`, must be
/// supplied, owned by the depositor and hold the escrow mint.
pub fn check_refund_token_account(
    depositor: Pubkey,
    mint: Pubkey,
    supplied: Option<(Pubkey, Pubkey)>,
) -> Result<()> {
    let (owner, account_mint) = supplied.ok_or(GambitError::MissingRefundAccount)?;
    require_keys_eq!(owner, depositor, GambitError::InvalidTokenAccount);
    require_keys_eq!(account_mint, mint, GambitError::InvalidTokenAccount);
    Ok(())
}

/// Stakes still held in custody for each side.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Refunds {
    pub player_a: u64,
    pub player_b: u64,
}

impl Refunds {
    /// What custody owes each depositor of `stake` while in `status`.
    pub fn owed(status: &MatchStatus, stake: u64) -> Self {
        match status {
            MatchStatus::Created => Refunds {
                player_a: stake,
                player_b: 0,
            },
            s if s.holds_both_stakes() => Refunds {
                player_a: stake,
                player_b: stake,
            },
            _ => Refunds::default(),
        }
    }

    pub fn total(&self) -> Result<u64> {
        Ok(self
            .player_a
            .checked_add(self.player_b)
            .ok_or(GambitError::MathOverflow)?)
    }
}
