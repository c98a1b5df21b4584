//! Contest Logic
//!
//! Round logic for a multiplayer ticket-contest experiment. Participants
//! spend their endowment on tickets; a contest success function turns the
//! group's tickets into prize shares.
//!
//! The experiment runtime calls two entry points per round:
//! - `setup_round` once everyone has joined
//! - `compute_outcome` once everyone has submitted
//!
//! This crate is compiled to:
//! - Native (for the experiment server)
//! - WASM (for the browser front end)

mod config;
mod csf;
mod currency;
mod error;
mod grouping;
mod model;
mod outcome;
mod payoff;
mod random;
mod setup;
mod validation;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::{
    ContestConstants, SessionConfig, COST_PER_TICKET, ENDOWMENT, NUM_PAID_ROUNDS, NUM_ROUNDS, PRIZE,
};
pub use csf::{draw_winner, prize_shares, share_allpay, share_lottery, share_proportional, Csf};
pub use currency::Currency;
pub use error::ContestError;
pub use grouping::{form_groups, shuffle};
pub use model::{Group, Player, Round, Session};
pub use outcome::{compute_group_outcome, compute_outcome, GroupOutcome, PlayerOutcome, RoundOutcome};
pub use payoff::{participant_payoff, round_payoff};
pub use random::{RandomSource, SeededRng};
pub use setup::{select_paid_rounds, setup_round};
pub use validation::validate_tickets;

/// Earnings for one round, identical for every CSF
///
/// `endowment - tickets * cost_per_ticket + prize * prize_share`
pub fn earnings(
    endowment: Currency,
    cost_per_ticket: Currency,
    tickets: u32,
    prize: Currency,
    prize_share: f64,
) -> Currency {
    endowment - cost_per_ticket * tickets + prize * prize_share
}
