use anchor_lang::prelude::*;

use crate::events::VoteRetracted;
use crate::state::WagerAccount;

#[derive(Accounts)]
pub struct RetractVote<'info> {
    #[account(
        mut,
        seeds = [WagerAccount::SEED, wager.player_a.as_ref(), wager.match_id.to_le_bytes().as_ref()],
        bump = wager.bump,
    )]
    pub wager: Account<'info, WagerAccount>,

    /// Participant withdrawing their own vote.
    pub player: Signer<'info>,
}

pub fn handler(ctx: Context<RetractVote>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let player = ctx.accounts.player.key();

    let wager = &mut ctx.accounts.wager;
    wager.retract_vote(player, now)?;

    emit!(VoteRetracted {
        record: wager.key(),
        player,
    });

    Ok(())
}
