//! Outcome computation
//!
//! Runs once per round, after every player has submitted a ticket count.

use serde::{Deserialize, Serialize};

use crate::csf::{prize_shares, Csf};
use crate::currency::Currency;
use crate::earnings;
use crate::model::{Group, Round};
use crate::payoff::round_payoff;
use crate::random::RandomSource;

/// Per-player result row for the results page
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerOutcome {
    pub participant: u32,
    pub id_in_group: u32,
    pub tickets_purchased: u32,
    pub prize_share: f64,
    pub earnings: Currency,
    pub payoff: Option<Currency>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupOutcome {
    pub group_id: u32,
    pub prize: Currency,
    pub total_tickets: u64,
    pub players: Vec<PlayerOutcome>,
}

/// Result of a complete round
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub round_number: u32,
    pub csf: Csf,
    pub paid: bool,
    pub groups: Vec<GroupOutcome>,
}

/// Compute shares, earnings and payoffs for every group of the round
///
/// Writes `prize_share`, `earnings` and (in paid rounds) `payoff` on each
/// player and returns the same figures as a summary. Deterministic for
/// `share` and `allpay`; `lottery` consumes draws from `rng`.
pub fn compute_outcome<R>(round: &mut Round, rng: &mut R) -> RoundOutcome
where
    R: RandomSource + ?Sized,
{
    let csf = round.csf;
    let paid = round.paid;

    let groups = round
        .groups
        .iter_mut()
        .map(|group| compute_group_outcome(group, csf, paid, &mut *rng))
        .collect();

    log::info!(
        "round {} outcome computed: csf={}, paid={}",
        round.round_number,
        csf,
        paid
    );

    RoundOutcome {
        round_number: round.round_number,
        csf,
        paid,
        groups,
    }
}

/// Compute the outcome of a single group
pub fn compute_group_outcome<R>(group: &mut Group, csf: Csf, paid: bool, rng: &mut R) -> GroupOutcome
where
    R: RandomSource + ?Sized,
{
    if group.players.iter().any(|p| p.tickets_purchased.is_none()) {
        log::warn!(
            "round {} group {}: missing ticket decisions treated as zero",
            group.round_number,
            group.id_in_subsession
        );
    }

    let tickets = group.tickets();
    let shares = prize_shares(csf, &tickets, rng);
    log::debug!(
        "round {} group {}: csf={} tickets={:?} shares={:?}",
        group.round_number,
        group.id_in_subsession,
        csf,
        tickets,
        shares
    );

    let prize = group.prize;
    let players = group
        .players
        .iter_mut()
        .zip(tickets.iter().zip(shares))
        .map(|(player, (bought, share))| {
            let earned = earnings(player.endowment, player.cost_per_ticket, *bought, prize, share);
            player.prize_share = Some(share);
            player.earnings = Some(earned);
            player.payoff = round_payoff(paid, earned);

            PlayerOutcome {
                participant: player.participant,
                id_in_group: player.id_in_group,
                tickets_purchased: *bought,
                prize_share: share,
                earnings: earned,
                payoff: player.payoff,
            }
        })
        .collect();

    GroupOutcome {
        group_id: group.id_in_subsession,
        prize,
        total_tickets: tickets.iter().map(|t| *t as u64).sum(),
        players,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRng;

    fn round(csf: Csf, paid: bool, tickets: &[&[u32]]) -> Round {
        let mut members: Vec<Vec<u32>> = Vec::new();
        let mut next_id = 1u32;
        for g in tickets {
            let size = g.len() as u32;
            members.push((next_id..next_id + size).collect());
            next_id += size;
        }

        let mut round = Round::from_members(1, &members);
        round.csf = csf;
        round.paid = paid;
        for (group, group_tickets) in round.groups.iter_mut().zip(tickets) {
            group.prize = Currency::new(10.0);
            for (player, t) in group.players.iter_mut().zip(group_tickets.iter()) {
                player.endowment = Currency::new(10.0);
                player.cost_per_ticket = Currency::new(0.5);
                player.tickets_purchased = Some(*t);
            }
        }
        round
    }

    fn approx(a: Currency, b: f64) -> bool {
        (a.amount() - b).abs() < 1e-9
    }

    #[test]
    fn test_share_outcome_earnings() {
        let mut r = round(Csf::Share, true, &[&[4, 12]]);
        let outcome = compute_outcome(&mut r, &mut SeededRng::from_u64(1));

        let players = &outcome.groups[0].players;
        assert_eq!(players[0].prize_share, 0.25);
        assert_eq!(players[1].prize_share, 0.75);
        // 10 - 4*0.5 + 10*0.25
        assert!(approx(players[0].earnings, 10.5));
        // 10 - 12*0.5 + 10*0.75
        assert!(approx(players[1].earnings, 11.5));
        assert_eq!(outcome.groups[0].total_tickets, 16);
    }

    #[test]
    fn test_outcome_written_to_players() {
        let mut r = round(Csf::Allpay, true, &[&[3, 5]]);
        compute_outcome(&mut r, &mut SeededRng::from_u64(1));

        let loser = &r.groups[0].players[0];
        let winner = &r.groups[0].players[1];
        assert_eq!(loser.prize_share, Some(0.0));
        assert_eq!(winner.prize_share, Some(1.0));
        assert!(approx(loser.earnings.unwrap(), 8.5));
        assert!(approx(winner.earnings.unwrap(), 17.5));
        assert_eq!(winner.payoff, winner.earnings);
    }

    #[test]
    fn test_unpaid_round_leaves_payoff_unset() {
        let mut r = round(Csf::Share, false, &[&[2, 2]]);
        let outcome = compute_outcome(&mut r, &mut SeededRng::from_u64(1));

        for p in r.players() {
            assert!(p.earnings.is_some());
            assert_eq!(p.payoff, None);
        }
        assert!(outcome.groups[0].players.iter().all(|p| p.payoff.is_none()));
    }

    #[test]
    fn test_groups_are_independent() {
        let mut r = round(Csf::Share, true, &[&[1, 1], &[0, 6, 2]]);
        let outcome = compute_outcome(&mut r, &mut SeededRng::from_u64(1));

        assert_eq!(outcome.groups.len(), 2);
        let second: Vec<f64> = outcome.groups[1].players.iter().map(|p| p.prize_share).collect();
        assert_eq!(second, vec![0.0, 0.75, 0.25]);
        let first: Vec<f64> = outcome.groups[0].players.iter().map(|p| p.prize_share).collect();
        assert_eq!(first, vec![0.5, 0.5]);
    }

    #[test]
    fn test_zero_investment_share_group() {
        let mut r = round(Csf::Share, true, &[&[0, 0, 0, 0]]);
        let outcome = compute_outcome(&mut r, &mut SeededRng::from_u64(1));
        for p in &outcome.groups[0].players {
            assert_eq!(p.prize_share, 0.25);
            assert!(approx(p.earnings, 12.5));
        }
    }

    #[test]
    fn test_idempotent_deterministic_variants() {
        for csf in [Csf::Share, Csf::Allpay] {
            let mut r = round(csf, true, &[&[3, 7, 7, 0]]);
            let first = compute_outcome(&mut r, &mut SeededRng::from_u64(1));
            let second = compute_outcome(&mut r, &mut SeededRng::from_u64(2));
            assert_eq!(first, second, "{csf} outcome changed between calls");
        }
    }

    #[test]
    fn test_idempotent_lottery_with_same_seed() {
        let mut r = round(Csf::Lottery, true, &[&[3, 7, 1], &[0, 0]]);
        let rng = SeededRng::from_u64(77);
        let first = compute_outcome(&mut r, &mut rng.clone());
        let second = compute_outcome(&mut r, &mut rng.clone());
        assert_eq!(first, second);
    }

    #[test]
    fn test_lottery_one_winner_per_group() {
        let mut r = round(Csf::Lottery, true, &[&[3, 7, 1], &[0, 0], &[5]]);
        let outcome = compute_outcome(&mut r, &mut SeededRng::from_u64(4));
        for g in &outcome.groups {
            let winners = g.players.iter().filter(|p| p.prize_share == 1.0).count();
            assert_eq!(winners, 1);
        }
    }

    #[test]
    fn test_missing_decision_counts_as_zero() {
        let mut r = round(Csf::Share, true, &[&[4, 0]]);
        r.groups[0].players[1].tickets_purchased = None;
        let outcome = compute_outcome(&mut r, &mut SeededRng::from_u64(1));
        assert_eq!(outcome.groups[0].players[0].prize_share, 1.0);
        assert_eq!(outcome.groups[0].players[1].tickets_purchased, 0);
    }

    #[test]
    fn test_outcome_serializes() {
        let mut r = round(Csf::Allpay, false, &[&[1, 2]]);
        let outcome = compute_outcome(&mut r, &mut SeededRng::from_u64(1));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["csf"], "allpay");
        assert_eq!(json["groups"][0]["players"][1]["prize_share"], 1.0);
        assert!(json["groups"][0]["players"][0]["payoff"].is_null());
    }
}
