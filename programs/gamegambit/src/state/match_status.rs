use anchor_lang::prelude::*;

use crate::errors::GambitError;

/// Lifecycle of a wager or escrow.
///
/// Votes and the retract deadline live inside the variants that use them,
/// so a record can never carry a stale vote outside the voting phase.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum MatchStatus {
    /// Creator has deposited, waiting for an opponent.
    Created,
    /// Both stakes are in custody, no votes yet.
    Joined,
    /// At least one vote cast, results not yet compared.
    Voting {
        vote_a: Option<Pubkey>,
        vote_b: Option<Pubkey>,
    },
    /// Both players named the same winner; either may still retract
    /// until `retract_deadline`.
    Retractable { winner: Pubkey, retract_deadline: i64 },
    /// Players named different winners; only the moderator can settle.
    Disputed { vote_a: Pubkey, vote_b: Pubkey },
    /// Pot paid out to `winner`.
    Settled { winner: Pubkey },
    /// Stakes refunded by the authority.
    Cancelled,
}

/// Which side of a record a signer occupies.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Seat {
    A,
    B,
}

impl MatchStatus {
    /// Record `seat`'s vote. The second vote decides between agreement and
    /// dispute.
    pub fn record_vote(
        &mut self,
        seat: Seat,
        declared_winner: Pubkey,
        now: i64,
        retract_window_seconds: i64,
    ) -> Result<()> {
        let (mut vote_a, mut vote_b) = match *self {
            MatchStatus::Joined => (None, None),
            MatchStatus::Voting { vote_a, vote_b } => (vote_a, vote_b),
            _ => return err!(GambitError::InvalidState),
        };

        match seat {
            Seat::A => vote_a = Some(declared_winner),
            Seat::B => vote_b = Some(declared_winner),
        }

        *self = match (vote_a, vote_b) {
            (Some(a), Some(b)) if a == b => MatchStatus::Retractable {
                winner: a,
                retract_deadline: now
                    .checked_add(retract_window_seconds)
                    .ok_or(GambitError::MathOverflow)?,
            },
            (Some(a), Some(b)) => MatchStatus::Disputed {
                vote_a: a,
                vote_b: b,
            },
            _ => MatchStatus::Voting { vote_a, vote_b },
        };

        Ok(())
    }

    /// Withdraw `seat`'s vote during the grace window. The other player's
    /// vote stands.
    pub fn retract_vote(&mut self, seat: Seat, now: i64) -> Result<()> {
        let MatchStatus::Retractable {
            winner,
            retract_deadline,
        } = *self
        else {
            return err!(GambitError::InvalidState);
        };
        require!(now < retract_deadline, GambitError::InvalidState);

        *self = match seat {
            Seat::A => MatchStatus::Voting {
                vote_a: None,
                vote_b: Some(winner),
            },
            Seat::B => MatchStatus::Voting {
                vote_a: Some(winner),
                vote_b: None,
            },
        };
        Ok(())
    }

    pub fn vote_a(&self) -> Option<Pubkey> {
        match *self {
            MatchStatus::Voting { vote_a, .. } => vote_a,
            MatchStatus::Retractable { winner, .. } => Some(winner),
            MatchStatus::Disputed { vote_a, .. } => Some(vote_a),
            _ => None,
        }
    }

    pub fn vote_b(&self) -> Option<Pubkey> {
        match *self {
            MatchStatus::Voting { vote_b, .. } => vote_b,
            MatchStatus::Retractable { winner, .. } => Some(winner),
            MatchStatus::Disputed { vote_b, .. } => Some(vote_b),
            _ => None,
        }
    }

    pub fn retract_deadline(&self) -> Option<i64> {
        match *self {
            MatchStatus::Retractable {
                retract_deadline, ..
            } => Some(retract_deadline),
            _ => None,
        }
    }

    /// True once both stakes are in custody and neither payout nor refund
    /// has happened.
    pub fn holds_both_stakes(&self) -> bool {
        matches!(
            self,
            MatchStatus::Joined
                | MatchStatus::Voting { .. }
                | MatchStatus::Retractable { .. }
                | MatchStatus::Disputed { .. }
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, MatchStatus::Settled { .. } | MatchStatus::Cancelled)
    }
}
