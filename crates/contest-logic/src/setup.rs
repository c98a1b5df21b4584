//! Round setup
//!
//! Runs once per round, after every participant has joined and before any
//! decision is collected.

use crate::model::{Round, Session};
use crate::random::RandomSource;

/// Sample `paid` distinct round numbers from `1..=rounds`, sorted
///
/// Floyd's algorithm: each `paid`-subset is equally likely and only `paid`
/// draws are needed. `paid` is clamped to `rounds`.
pub fn select_paid_rounds<R>(rounds: u32, paid: u32, rng: &mut R) -> Vec<u32>
where
    R: RandomSource + ?Sized,
{
    let m = paid.min(rounds);
    let mut result: Vec<u32> = Vec::with_capacity(m as usize);

    for j in (rounds - m)..rounds {
        let j = j + 1;
        let t = rng.next_range(j as u64) as u32 + 1; // uniform in [1, j]
        if result.contains(&t) {
            result.push(j);
        } else {
            result.push(t);
        }
    }

    result.sort_unstable();
    result
}

/// Initialise a round's records from the session
///
/// - first call of the session (normally round 1): pick the paid rounds
/// - every round: paid flag and CSF snapshot
/// - every group: prize
/// - every player: endowment and ticket cost, with decision and outcome cleared
pub fn setup_round<R>(session: &mut Session, round: &mut Round, rng: &mut R)
where
    R: RandomSource + ?Sized,
{
    if session.paid_rounds.is_none() {
        let count = session.config.paid_round_count(&session.constants);
        let paid = select_paid_rounds(session.num_rounds(), count, rng);
        log::info!(
            "selected paid rounds {:?} of {} (at round {})",
            paid,
            session.num_rounds(),
            round.round_number
        );
        session.paid_rounds = Some(paid);
    }

    round.paid = session.is_paid_round(round.round_number);
    round.csf = session.config.csf;

    let endowment = session.config.endowment(&session.constants);
    let cost_per_ticket = session.constants.cost_per_ticket;

    for group in &mut round.groups {
        group.prize = session.constants.prize;
        for player in &mut group.players {
            player.endowment = endowment;
            player.cost_per_ticket = cost_per_ticket;
            player.tickets_purchased = None;
            player.prize_share = None;
            player.earnings = None;
            player.payoff = None;
        }
    }

    log::debug!(
        "round {} set up: {} groups, csf={}, paid={}",
        round.round_number,
        round.groups.len(),
        round.csf,
        round.paid
    );
}
