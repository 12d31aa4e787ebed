use anchor_lang::prelude::*;

use crate::custody;
use crate::events::WagerJoined;
use crate::state::WagerAccount;

#[derive(Accounts)]
pub struct JoinWager<'info> {
    #[account(
        mut,
        seeds = [WagerAccount::SEED, wager.player_a.as_ref(), wager.match_id.to_le_bytes().as_ref()],
        bump = wager.bump,
    )]
    pub wager: Account<'info, WagerAccount>,

    /// Opponent; pays the matching stake.
    #[account(mut)]
    pub player_b: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<JoinWager>, stake_lamports: u64) -> Result<()> {
    let player_b = ctx.accounts.player_b.key();
    ctx.accounts.wager.join(player_b, stake_lamports)?;

    custody::deposit_lamports(
        ctx.accounts.system_program.to_account_info(),
        ctx.accounts.player_b.to_account_info(),
        ctx.accounts.wager.to_account_info(),
        stake_lamports,
    )?;

    emit!(WagerJoined {
        wager: ctx.accounts.wager.key(),
        player_b,
        stake_lamports,
    });

    Ok(())
}
