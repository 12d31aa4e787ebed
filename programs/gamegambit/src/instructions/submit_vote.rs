use anchor_lang::prelude::*;

use crate::events::VoteSubmitted;
use crate::state::{MatchStatus, Platform, WagerAccount};

#[derive(Accounts)]
pub struct SubmitVote<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [WagerAccount::SEED, wager.player_a.as_ref(), wager.match_id.to_le_bytes().as_ref()],
        bump = wager.bump,
    )]
    pub wager: Account<'info, WagerAccount>,

    /// Either participant; checked against the wager.
    pub player: Signer<'info>,
}

pub fn handler(ctx: Context<SubmitVote>, declared_winner: Pubkey) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let player = ctx.accounts.player.key();
    let window = ctx.accounts.platform.retract_window_seconds;

    let wager = &mut ctx.accounts.wager;
    wager.submit_vote(player, declared_winner, now, window)?;

    emit!(VoteSubmitted {
        record: wager.key(),
        player,
        voted_winner: declared_winner,
        retract_deadline: wager.retract_deadline(),
        disputed: matches!(wager.status, MatchStatus::Disputed { .. }),
    });

    Ok(())
}
