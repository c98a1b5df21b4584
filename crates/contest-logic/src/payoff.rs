//! Payoff aggregation
//!
//! Earnings are computed every round for feedback. Only rounds selected for
//! payment turn earnings into payoff.

use crate::currency::Currency;
use crate::model::Round;

/// Payoff for one round: the earnings if the round is paid
pub fn round_payoff(paid: bool, earnings: Currency) -> Option<Currency> {
    paid.then_some(earnings)
}

/// Total payoff of a participant across the given rounds
pub fn participant_payoff(rounds: &[Round], participant: u32) -> Currency {
    rounds
        .iter()
        .filter(|round| round.paid)
        .filter_map(|round| round.player_for(participant))
        .filter_map(|player| player.payoff)
        .sum()
}
