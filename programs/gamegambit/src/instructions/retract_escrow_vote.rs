use anchor_lang::prelude::*;

use crate::events::VoteRetracted;
use crate::state::EscrowAccount;

#[derive(Accounts)]
pub struct RetractEscrowVote<'info> {
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

pub fn handler(ctx: Context<RetractEscrowVote>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let player = ctx.accounts.player.key();

    let escrow = &mut ctx.accounts.escrow;
    escrow.retract_vote(player, now)?;

    emit!(VoteRetracted {
        record: escrow.key(),
        player,
    });

    Ok(())
}
