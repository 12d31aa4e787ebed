//! Full wager and escrow lifecycles against an in-memory ledger that moves
//! value the way the instruction handlers do.

use std::collections::HashMap;
use std::fmt::Debug;

use anchor_lang::error::Error;
use anchor_lang::prelude::*;

use crate::constants::DEFAULT_RETRACT_WINDOW_SECONDS;
use crate::errors::GambitError;
use crate::state::{
    check_refund_token_account, check_refund_wallet, treasury_share, Arbiters, EscrowAccount,
    EscrowPayout, MatchStatus, PlayerProfile, Refunds, ResolutionPath, WagerAccount,
};

pub(crate) const STAKE: u64 = 10;
pub(crate) const WINDOW: i64 = DEFAULT_RETRACT_WINDOW_SECONDS;

pub(crate) fn assert_gambit_err<T: Debug>(result: Result<T>, expected: GambitError) {
    match result {
        Err(Error::AnchorError(e)) => assert_eq!(
            e.error_code_number,
            u32::from(expected),
            "expected {expected:?}, got {}",
            e.error_name
        ),
        other => panic!("expected {expected:?}, got {other:?}"),
    }
}

pub(crate) fn profile(player: Pubkey) -> PlayerProfile {
    PlayerProfile {
        player,
        is_banned: false,
        ban_expires_at: 0,
        last_active: 0,
        bump: 255,
    }
}

pub(crate) fn arbiters() -> Arbiters {
    Arbiters {
        authority: Pubkey::new_unique(),
        moderator: Pubkey::new_unique(),
    }
}

pub(crate) fn blank_wager() -> WagerAccount {
    WagerAccount {
        match_id: 0,
        player_a: Pubkey::default(),
        player_b: None,
        stake_lamports: 0,
        external_game_id: String::new(),
        requires_moderator: false,
        status: MatchStatus::Created,
        created_at: 0,
        resolved_at: 0,
        bump: 0,
    }
}

pub(crate) fn blank_escrow() -> EscrowAccount {
    EscrowAccount {
        match_id: 0,
        player_a: Pubkey::default(),
        player_b: Pubkey::default(),
        mint: Pubkey::default(),
        vault: Pubkey::default(),
        amount: 0,
        external_game_id: String::new(),
        status: MatchStatus::Created,
        created_at: 0,
        resolved_at: 0,
        bump: 0,
    }
}

/// Balances keyed by owner, with custody tracked under the record address.
#[derive(Default)]
struct Ledger {
    balances: HashMap<Pubkey, u64>,
}

impl Ledger {
    fn fund(&mut self, who: Pubkey, amount: u64) {
        *self.balances.entry(who).or_default() += amount;
    }

    fn balance(&self, who: &Pubkey) -> u64 {
        self.balances.get(who).copied().unwrap_or_default()
    }

    fn transfer(&mut self, from: Pubkey, to: Pubkey, amount: u64) {
        let from_balance = self.balances.entry(from).or_default();
        *from_balance = from_balance.checked_sub(amount).expect("insufficient funds");
        self.fund(to, amount);
    }
}

struct Table {
    ledger: Ledger,
    arbiters: Arbiters,
    a: Pubkey,
    b: Pubkey,
    now: i64,
}

impl Table {
    fn new() -> Self {
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut ledger = Ledger::default();
        ledger.fund(a, 1_000);
        ledger.fund(b, 1_000);
        Self {
            ledger,
            arbiters: arbiters(),
            a,
            b,
            now: 1_700_000_000,
        }
    }

    fn create_wager(
        &mut self,
        match_id: u64,
        game_id: &str,
        requires_moderator: bool,
    ) -> (Pubkey, WagerAccount) {
        let (address, bump) = WagerAccount::address(&self.a, match_id);
        let mut wager = blank_wager();
        wager
            .open(
                self.a,
                match_id,
                STAKE,
                game_id.into(),
                requires_moderator,
                &profile(self.a),
                self.now,
                bump,
            )
            .unwrap();
        self.ledger.transfer(self.a, address, STAKE);
        (address, wager)
    }

    fn join_wager(&mut self, address: Pubkey, wager: &mut WagerAccount) {
        wager.join(self.b, STAKE).unwrap();
        self.ledger.transfer(self.b, address, STAKE);
    }

    fn resolve_wager(
        &mut self,
        address: Pubkey,
        wager: &mut WagerAccount,
        caller: Pubkey,
        winner: Pubkey,
    ) -> Result<ResolutionPath> {
        let (path, pot) = wager.resolve(caller, winner, &self.arbiters, self.now)?;
        self.ledger.transfer(address, winner, pot);
        Ok(path)
    }

    fn close_wager(
        &mut self,
        address: Pubkey,
        wager: &mut WagerAccount,
        player_b: Option<Pubkey>,
    ) -> Result<()> {
        let refunds = wager.cancel();
        if refunds.player_b > 0 {
            check_refund_wallet(wager.player_b, player_b)?;
        }
        self.ledger.transfer(address, wager.player_a, refunds.player_a);
        self.ledger.transfer(address, self.b, refunds.player_b);
        Ok(())
    }

    /// Open and join a token escrow for `amount` a side.
    fn joined_escrow(&mut self, match_id: u64, amount: u64) -> (Pubkey, EscrowAccount) {
        let (a, b) = (self.a, self.b);
        let (address, bump) = EscrowAccount::address(&a, &b, match_id);
        let mut escrow = blank_escrow();
        escrow
            .open(
                a,
                b,
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                amount,
                "g".into(),
                match_id,
                &profile(a),
                self.now,
                bump,
            )
            .unwrap();
        self.ledger.transfer(a, address, amount);
        escrow.join(b, amount).unwrap();
        self.ledger.transfer(b, address, amount);
        (address, escrow)
    }

    /// Pay the winner, sweep the rest of the vault to `treasury`.
    fn resolve_escrow(
        &mut self,
        vault: Pubkey,
        escrow: &mut EscrowAccount,
        caller: Pubkey,
        winner: Pubkey,
        treasury: Pubkey,
    ) -> Result<EscrowPayout> {
        let held = escrow.custody_balance()?;
        let payout = escrow.resolve(caller, winner, &self.arbiters, self.now)?;
        let treasury_amount =
            treasury_share(self.ledger.balance(&vault), held, payout.winner_amount)?;
        self.ledger.transfer(vault, winner, payout.winner_amount);
        self.ledger.transfer(vault, treasury, treasury_amount);
        Ok(payout)
    }

    fn force_close_escrow(
        &mut self,
        vault: Pubkey,
        escrow: &mut EscrowAccount,
        player_b_account: Option<(Pubkey, Pubkey)>,
        treasury: Pubkey,
    ) -> Result<Refunds> {
        let held = escrow.custody_balance()?;
        let refunds = escrow.force_close()?;
        let surplus = treasury_share(self.ledger.balance(&vault), held, refunds.total()?)?;
        if refunds.player_b > 0 {
            check_refund_token_account(escrow.player_b, escrow.mint, player_b_account)?;
        }
        self.ledger.transfer(vault, escrow.player_a, refunds.player_a);
        self.ledger.transfer(vault, escrow.player_b, refunds.player_b);
        self.ledger.transfer(vault, treasury, surplus);
        Ok(refunds)
    }
}

#[test]
fn agreed_wager_pays_full_pot_after_window() {
    let mut t = Table::new();
    let (address, mut wager) = t.create_wager(1, "g1", false);

    assert_eq!(t.ledger.balance(&address), STAKE);
    assert_eq!(wager.status, MatchStatus::Created);

    t.join_wager(address, &mut wager);
    assert_eq!(t.ledger.balance(&address), 2 * STAKE);
    assert_eq!(wager.status, MatchStatus::Joined);

    let (a, b) = (t.a, t.b);
    wager.submit_vote(a, a, t.now, WINDOW).unwrap();
    assert!(matches!(wager.status, MatchStatus::Voting { .. }));
    wager.submit_vote(b, a, t.now, WINDOW).unwrap();

    assert!(matches!(wager.status, MatchStatus::Retractable { .. }));
    let deadline = wager.retract_deadline().unwrap();
    assert!(deadline > t.now);

    // Still inside the grace window.
    assert_gambit_err(
        t.resolve_wager(address, &mut wager, a, a),
        GambitError::InvalidState,
    );

    t.now = deadline;
    let before = t.ledger.balance(&a);
    let path = t.resolve_wager(address, &mut wager, a, a).unwrap();

    assert_eq!(path, ResolutionPath::Agreement);
    assert_eq!(t.ledger.balance(&a), before + 2 * STAKE);
    assert_eq!(t.ledger.balance(&address), 0);
    assert_eq!(wager.status, MatchStatus::Settled { winner: a });
    assert_eq!(wager.resolved_at, deadline);

    // Payout happens exactly once.
    assert_gambit_err(
        t.resolve_wager(address, &mut wager, a, a),
        GambitError::InvalidState,
    );

    t.close_wager(address, &mut wager, None).unwrap();
    assert_eq!(t.ledger.balance(&a), before + 2 * STAKE);
    assert_eq!(t.ledger.balance(&b), 1_000 - STAKE);
}

#[test]
fn disputed_wager_is_settled_by_moderator_only() {
    let mut t = Table::new();
    let (address, mut wager) = t.create_wager(2, "dispute", true);
    t.join_wager(address, &mut wager);

    let (a, b) = (t.a, t.b);
    wager.submit_vote(a, a, t.now, WINDOW).unwrap();
    wager.submit_vote(b, b, t.now, WINDOW).unwrap();
    assert_eq!(wager.status, MatchStatus::Disputed { vote_a: a, vote_b: b });
    assert_eq!(wager.retract_deadline(), None);

    assert_gambit_err(
        t.resolve_wager(address, &mut wager, a, b),
        GambitError::Unauthorized,
    );
    assert_gambit_err(
        t.resolve_wager(address, &mut wager, b, b),
        GambitError::Unauthorized,
    );
    assert_eq!(t.ledger.balance(&address), 2 * STAKE);

    let before = t.ledger.balance(&b);
    let moderator = t.arbiters.moderator;
    let path = t.resolve_wager(address, &mut wager, moderator, b).unwrap();

    assert_eq!(path, ResolutionPath::Arbitration);
    assert_eq!(t.ledger.balance(&b), before + 2 * STAKE);
    assert_eq!(t.ledger.balance(&address), 0);
}

#[test]
fn retraction_reopens_voting() {
    let mut t = Table::new();
    let (address, mut wager) = t.create_wager(3, "retract", false);
    t.join_wager(address, &mut wager);

    let (a, b) = (t.a, t.b);
    wager.submit_vote(a, a, t.now, WINDOW).unwrap();
    wager.submit_vote(b, a, t.now, WINDOW).unwrap();

    t.now += 1;
    wager.retract_vote(a, t.now).unwrap();
    assert_eq!(wager.status, MatchStatus::Voting { vote_a: None, vote_b: Some(a) });
    assert_eq!(wager.status.vote_a(), None);
    assert_eq!(wager.retract_deadline(), None);

    // Opponent may retract symmetrically once agreement is reached again.
    wager.submit_vote(a, a, t.now, WINDOW).unwrap();
    wager.retract_vote(b, t.now).unwrap();
    assert_eq!(wager.status.vote_b(), None);
    assert_eq!(wager.status.vote_a(), Some(a));

    wager.submit_vote(b, a, t.now, WINDOW).unwrap();
    t.now = wager.retract_deadline().unwrap();
    assert_gambit_err(wager.retract_vote(a, t.now), GambitError::InvalidState);

    // Either participant may collect once the window has closed.
    t.resolve_wager(address, &mut wager, b, a).unwrap();
    assert_eq!(t.ledger.balance(&a), 1_000 + STAKE);
}

#[test]
fn closing_unjoined_wager_refunds_creator() {
    let mut t = Table::new();
    let (address, mut wager) = t.create_wager(4, "lonely", false);

    t.close_wager(address, &mut wager, None).unwrap();

    assert_eq!(wager.status, MatchStatus::Cancelled);
    assert_eq!(t.ledger.balance(&t.a), 1_000);
    assert_eq!(t.ledger.balance(&address), 0);
}

#[test]
fn closing_disputed_wager_refunds_both() {
    let mut t = Table::new();
    let (address, mut wager) = t.create_wager(5, "stuck", false);
    t.join_wager(address, &mut wager);

    let (a, b) = (t.a, t.b);
    wager.submit_vote(a, a, t.now, WINDOW).unwrap();
    wager.submit_vote(b, b, t.now, WINDOW).unwrap();
    t.close_wager(address, &mut wager, Some(b)).unwrap();

    assert_eq!(t.ledger.balance(&a), 1_000);
    assert_eq!(t.ledger.balance(&b), 1_000);
    assert_eq!(t.ledger.balance(&address), 0);
}

#[test]
fn mismatched_join_leaves_wager_open() {
    let mut t = Table::new();
    let (address, mut wager) = t.create_wager(6, "g", false);

    assert_gambit_err(wager.join(t.b, STAKE * 2), GambitError::InvalidAmount);

    assert_eq!(wager.status, MatchStatus::Created);
    assert_eq!(t.ledger.balance(&address), STAKE);
    assert_eq!(t.ledger.balance(&t.b), 1_000);
}

#[test]
fn ban_round_trip_gates_creation() {
    let t = Table::new();
    let mut p = profile(t.a);
    p.apply_ban(3_600, t.now).unwrap();

    let mut wager = blank_wager();
    assert_gambit_err(
        wager.open(t.a, 7, STAKE, "g".into(), false, &p, t.now + 1, 1),
        GambitError::PlayerBanned,
    );

    p.apply_ban(0, t.now + 2).unwrap();
    wager
        .open(t.a, 7, STAKE, "g".into(), false, &p, t.now + 2, 1)
        .unwrap();
    assert_eq!(wager.status, MatchStatus::Created);
}

#[test]
fn closing_joined_wager_needs_opponent_wallet() {
    let mut t = Table::new();
    let (address, mut wager) = t.create_wager(8, "g", false);
    t.join_wager(address, &mut wager);

    let mut missing = wager.clone();
    assert_gambit_err(
        t.close_wager(address, &mut missing, None),
        GambitError::MissingRefundAccount,
    );

    let mut wrong = wager.clone();
    assert_gambit_err(
        t.close_wager(address, &mut wrong, Some(Pubkey::new_unique())),
        GambitError::MissingRefundAccount,
    );
}

#[test]
fn escrow_settlement_splits_fee_and_empties_vault() {
    let mut t = Table::new();
    let (a, b) = (t.a, t.b);
    let treasury = Pubkey::new_unique();
    let amount = 100_000_000;
    t.ledger.fund(a, amount);
    t.ledger.fund(b, amount);

    let (vault, mut escrow) = t.joined_escrow(11, amount);
    escrow.submit_vote(a, a, t.now, WINDOW).unwrap();
    escrow.submit_vote(b, a, t.now, WINDOW).unwrap();
    t.now += WINDOW;

    let a_before = t.ledger.balance(&a);
    let payout = t.resolve_escrow(vault, &mut escrow, a, a, treasury).unwrap();

    assert_eq!(payout.winner_amount, 170_000_000);
    assert_eq!(t.ledger.balance(&a) - a_before, 170_000_000);
    assert_eq!(t.ledger.balance(&treasury), 30_000_000);
    assert_eq!(t.ledger.balance(&vault), 0);
    assert_gambit_err(escrow.force_close(), GambitError::InvalidState);
}

#[test]
fn escrow_settlement_sweeps_stray_tokens_to_treasury() {
    let mut t = Table::new();
    let (a, b) = (t.a, t.b);
    let treasury = Pubkey::new_unique();
    let (vault, mut escrow) = t.joined_escrow(13, 100);
    t.ledger.fund(vault, 9);

    escrow.submit_vote(a, b, t.now, WINDOW).unwrap();
    escrow.submit_vote(b, a, t.now, WINDOW).unwrap();
    let moderator = t.arbiters.moderator;
    t.resolve_escrow(vault, &mut escrow, moderator, b, treasury)
        .unwrap();

    // Winner gets exactly pot minus fee; the stray tokens go with the fee.
    assert_eq!(t.ledger.balance(&b), 1_000 - 100 + 170);
    assert_eq!(t.ledger.balance(&treasury), 30 + 9);
    assert_eq!(t.ledger.balance(&vault), 0);
}

#[test]
fn escrow_with_huge_stakes_still_settles() {
    let mut t = Table::new();
    let (a, b) = (t.a, t.b);
    let treasury = Pubkey::new_unique();
    let amount = 10_000_000_000_000_000;
    t.ledger.fund(a, amount);
    t.ledger.fund(b, amount);

    let (vault, mut escrow) = t.joined_escrow(14, amount);
    escrow.submit_vote(a, a, t.now, WINDOW).unwrap();
    escrow.submit_vote(b, a, t.now, WINDOW).unwrap();
    t.now += WINDOW;

    let payout = t.resolve_escrow(vault, &mut escrow, b, a, treasury).unwrap();
    assert_eq!(payout.fee, 3_000_000_000_000_000);
    assert_eq!(t.ledger.balance(&treasury), payout.fee);
    assert_eq!(t.ledger.balance(&vault), 0);
}

#[test]
fn escrow_force_close_refunds_everyone() {
    let mut t = Table::new();
    let (a, b) = (t.a, t.b);
    let treasury = Pubkey::new_unique();
    let (vault, mut escrow) = t.joined_escrow(12, 250);
    escrow.submit_vote(b, b, t.now, WINDOW).unwrap();
    t.ledger.fund(vault, 4);

    let mint = escrow.mint;
    let refunds = t
        .force_close_escrow(vault, &mut escrow, Some((b, mint)), treasury)
        .unwrap();

    assert_eq!(refunds.total().unwrap(), 500);
    assert_eq!(t.ledger.balance(&a), 1_000);
    assert_eq!(t.ledger.balance(&b), 1_000);
    assert_eq!(t.ledger.balance(&treasury), 4);
    assert_eq!(t.ledger.balance(&vault), 0);
}

#[test]
fn escrow_force_close_checks_opponent_refund_account() {
    let mut t = Table::new();
    let b = t.b;
    let treasury = Pubkey::new_unique();
    let (vault, escrow) = t.joined_escrow(15, 250);
    let mint = escrow.mint;

    assert_gambit_err(
        t.force_close_escrow(vault, &mut escrow.clone(), None, treasury),
        GambitError::MissingRefundAccount,
    );
    assert_gambit_err(
        t.force_close_escrow(
            vault,
            &mut escrow.clone(),
            Some((b, Pubkey::new_unique())),
            treasury,
        ),
        GambitError::InvalidTokenAccount,
    );
    assert_gambit_err(
        t.force_close_escrow(
            vault,
            &mut escrow.clone(),
            Some((Pubkey::new_unique(), mint)),
            treasury,
        ),
        GambitError::InvalidTokenAccount,
    );
}

#[test]
fn escrow_vault_funded_before_opening_still_closes_clean() {
    let mut t = Table::new();
    let (a, b) = (t.a, t.b);
    let treasury = Pubkey::new_unique();
    let (vault, _) = EscrowAccount::address(&a, &b, 16);
    t.ledger.fund(vault, 1);

    let (vault, mut escrow) = t.joined_escrow(16, 300);
    escrow.submit_vote(a, a, t.now, WINDOW).unwrap();
    escrow.submit_vote(b, a, t.now, WINDOW).unwrap();
    t.now += WINDOW;

    let payout = t.resolve_escrow(vault, &mut escrow, a, a, treasury).unwrap();

    assert_eq!(payout.winner_amount, 510);
    assert_eq!(t.ledger.balance(&a), 1_000 - 300 + 510);
    assert_eq!(t.ledger.balance(&treasury), 90 + 1);
    assert_eq!(t.ledger.balance(&vault), 0);
}
