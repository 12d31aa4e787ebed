use anchor_lang::prelude::*;

use crate::events::VoteSubmitted;
use crate::state::{EscrowAccount, MatchStatus, Platform};

#[derive(Accounts)]
pub struct SubmitEscrowVote<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [
            EscrowAccount::SEED,
            escrow.player_a.as_ref(),
            escrow.player_b.as_ref(),
            escrow.match_id.to_le_bytes().as_ref(),
        ],
        bump = escrow.bump,
    )]
    pub escrow: Account<'info, EscrowAccount>,

    pub player: Signer<'info>,
}

pub fn handler(ctx: Context<SubmitEscrowVote>, declared_winner: Pubkey) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let player = ctx.accounts.player.key();
    let window = ctx.accounts.platform.retract_window_seconds;

    let escrow = &mut ctx.accounts.escrow;
    escrow.submit_vote(player, declared_winner, now, window)?;

    emit!(VoteSubmitted {
        record: escrow.key(),
        player,
        voted_winner: declared_winner,
        retract_deadline: escrow.status.retract_deadline(),
        disputed: matches!(escrow.status, MatchStatus::Disputed { .. }),
    });

    Ok(())
}
