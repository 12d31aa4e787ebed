use anchor_lang::prelude::*;

pub mod constants;
pub mod custody;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("E5Qs1igj3krVngrzUhyjKCLAHkjmpyTL1Nnz2GV9NHAu");

#[program]
pub mod gamegambit {
    use super::*;

    /// One-time platform setup. The signer becomes the authority.
    pub fn initialize_platform(
        ctx: Context<InitializePlatform>,
        moderator: Pubkey,
        retract_window_seconds: Option<i64>,
    ) -> Result<()> {
        instructions::initialize_platform::handler(ctx, moderator, retract_window_seconds)
    }

    /// Authority rotates the dispute moderator.
    pub fn set_moderator(ctx: Context<SetModerator>, moderator: Pubkey) -> Result<()> {
        instructions::set_moderator::handler(ctx, moderator)
    }

    /// Create (or refresh) the caller's player profile.
    pub fn initialize_player(ctx: Context<InitializePlayer>) -> Result<()> {
        instructions::initialize_player::handler(ctx)
    }

    /// Authority bans a player for `duration_seconds`; 0 lifts the ban.
    pub fn ban_player(ctx: Context<BanPlayer>, duration_seconds: i64) -> Result<()> {
        instructions::ban_player::handler(ctx, duration_seconds)
    }

    /// Creator opens a SOL wager and deposits their stake.
    pub fn create_wager(
        ctx: Context<CreateWager>,
        match_id: u64,
        stake_lamports: u64,
        external_game_id: String,
        requires_moderator: bool,
    ) -> Result<()> {
        instructions::create_wager::handler(
            ctx,
            match_id,
            stake_lamports,
            external_game_id,
            requires_moderator,
        )
    }

    /// Opponent matches the stake exactly.
    pub fn join_wager(ctx: Context<JoinWager>, stake_lamports: u64) -> Result<()> {
        instructions::join_wager::handler(ctx, stake_lamports)
    }

    /// Participant declares who won.
    pub fn submit_vote(ctx: Context<SubmitVote>, declared_winner: Pubkey) -> Result<()> {
        instructions::submit_vote::handler(ctx, declared_winner)
    }

    /// Participant withdraws their vote inside the retract window.
    pub fn retract_vote(ctx: Context<RetractVote>) -> Result<()> {
        instructions::retract_vote::handler(ctx)
    }

    /// Pay the full pot to `winner`, by agreement or moderator ruling.
    pub fn resolve_wager(ctx: Context<ResolveWager>, winner: Pubkey) -> Result<()> {
        instructions::resolve_wager::handler(ctx, winner)
    }

    /// Authority refunds anything still held and closes the wager.
    pub fn close_wager(ctx: Context<CloseWager>) -> Result<()> {
        instructions::close_wager::handler(ctx)
    }

    /// Creator opens a token escrow against a named opponent.
    pub fn initialize_escrow(
        ctx: Context<InitializeEscrow>,
        amount: u64,
        external_game_id: String,
        match_id: u64,
    ) -> Result<()> {
        instructions::initialize_escrow::handler(ctx, amount, external_game_id, match_id)
    }

    /// Named opponent deposits the matching amount.
    pub fn join_escrow(ctx: Context<JoinEscrow>, amount: u64) -> Result<()> {
        instructions::join_escrow::handler(ctx, amount)
    }

    /// Participant declares the escrow winner.
    pub fn submit_escrow_vote(
        ctx: Context<SubmitEscrowVote>,
        declared_winner: Pubkey,
    ) -> Result<()> {
        instructions::submit_escrow_vote::handler(ctx, declared_winner)
    }

    /// Participant withdraws their escrow vote inside the retract window.
    pub fn retract_escrow_vote(ctx: Context<RetractEscrowVote>) -> Result<()> {
        instructions::retract_escrow_vote::handler(ctx)
    }

    /// Settle the escrow: platform fee to the treasury, the rest to
    /// `winner`, then close the vault and the record.
    pub fn resolve_escrow(ctx: Context<ResolveEscrow>, winner: Pubkey) -> Result<()> {
        instructions::resolve_escrow::handler(ctx, winner)
    }

    /// Authority cancels an unsettled escrow and refunds both depositors.
    pub fn force_close_escrow(ctx: Context<ForceCloseEscrow>) -> Result<()> {
        instructions::force_close_escrow::handler(ctx)
    }
}

#[cfg(test)]
mod tests;
