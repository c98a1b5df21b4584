//! Contest success functions
//!
//! A CSF maps the tickets bought by each member of a group to that member's
//! fraction of the group prize. Each variant is one pure function over the
//! group's ticket vector; `prize_shares` dispatches on the enum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ContestError;
use crate::random::RandomSource;

/// Contest success function selected for a session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Csf {
    /// Prize split in proportion to tickets bought.
    #[default]
    Share,
    /// Highest bidders split the prize; everyone pays their tickets.
    Allpay,
    /// One winner drawn with probability proportional to tickets.
    Lottery,
}

impl Csf {
    pub const ALL: [Csf; 3] = [Csf::Share, Csf::Allpay, Csf::Lottery];

    pub fn as_str(self) -> &'static str {
        match self {
            Csf::Share => "share",
            Csf::Allpay => "allpay",
            Csf::Lottery => "lottery",
        }
    }

    /// Human-readable description of the rule, for the instructions page
    pub fn describe(self) -> &'static str {
        match self {
            Csf::Share => {
                "You receive a share of the prize equal to your tickets divided by the \
                 total tickets in your group. If nobody buys tickets the prize is split equally."
            }
            Csf::Allpay => {
                "The player with the most tickets wins the prize. Ties split the prize \
                 equally. Everyone pays for the tickets they bought."
            }
            Csf::Lottery => {
                "One ticket is drawn at random and its owner wins the whole prize. If \
                 nobody buys tickets the winner is drawn uniformly."
            }
        }
    }
}

impl fmt::Display for Csf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Csf {
    type Err = ContestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "share" => Ok(Csf::Share),
            "allpay" => Ok(Csf::Allpay),
            "lottery" => Ok(Csf::Lottery),
            _ => Err(ContestError::UnknownCsf(s.to_string())),
        }
    }
}

/// Prize shares for one group, in the same order as `tickets`
///
/// Shares are non-negative and sum to 1 for a non-empty group. An empty group
/// yields an empty vector.
pub fn prize_shares<R>(csf: Csf, tickets: &[u32], rng: &mut R) -> Vec<f64>
where
    R: RandomSource + ?Sized,
{
    match csf {
        Csf::Share => share_proportional(tickets),
        Csf::Allpay => share_allpay(tickets),
        Csf::Lottery => share_lottery(tickets, rng),
    }
}

/// Proportional rule: `tickets[i] / total`, equal split when nobody bought
pub fn share_proportional(tickets: &[u32]) -> Vec<f64> {
    let total: u64 = tickets.iter().map(|t| *t as u64).sum();
    if total == 0 {
        if !tickets.is_empty() {
            log::debug!("share: no tickets bought in group of {}, splitting equally", tickets.len());
        }
        return equal_split(tickets.len());
    }

    tickets
        .iter()
        .map(|t| *t as f64 / total as f64)
        .collect()
}

/// Winner-take-all among the highest bidders; ties split evenly
pub fn share_allpay(tickets: &[u32]) -> Vec<f64> {
    let Some(max) = tickets.iter().copied().max() else {
        return Vec::new();
    };
    let tied = tickets.iter().filter(|t| **t == max).count();

    tickets
        .iter()
        .map(|t| if *t == max { 1.0 / tied as f64 } else { 0.0 })
        .collect()
}

/// Single weighted draw: the winner takes the whole prize
pub fn share_lottery<R>(tickets: &[u32], rng: &mut R) -> Vec<f64>
where
    R: RandomSource + ?Sized,
{
    let mut shares = vec![0.0; tickets.len()];
    if let Some(winner) = draw_winner(tickets, rng) {
        shares[winner] = 1.0;
    }
    shares
}

/// Index of the lottery winner, or `None` for an empty group
///
/// Each player wins with probability `tickets[i] / total`. With no tickets in
/// the group every player is equally likely.
pub fn draw_winner<R>(tickets: &[u32], rng: &mut R) -> Option<usize>
where
    R: RandomSource + ?Sized,
{
    if tickets.is_empty() {
        return None;
    }

    let total: u64 = tickets.iter().map(|t| *t as u64).sum();
    if total == 0 {
        log::debug!("lottery: no tickets bought in group of {}, drawing uniformly", tickets.len());
        return Some(rng.next_range(tickets.len() as u64) as usize);
    }

    let mut roll = rng.next_range(total);
    for (i, weight) in tickets.iter().map(|t| *t as u64).enumerate() {
        if roll < weight {
            return Some(i);
        }
        roll -= weight;
    }

    // roll < total, so the loop has already returned
    tickets.iter().rposition(|t| *t > 0)
}

fn equal_split(n: usize) -> Vec<f64> {
    vec![1.0 / n as f64; n]
}
