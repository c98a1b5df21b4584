//! Error types for configuration and input validation
//!
//! The outcome engine itself never fails. Errors only come from parsing the
//! session configuration and from checking a player's ticket decision before
//! it reaches the engine.

use thiserror::Error;

use crate::currency::Currency;

#[derive(Debug, Error)]
pub enum ContestError {
    #[error("unknown contest success function: {0:?} (expected share, allpay or lottery)")]
    UnknownCsf(String),

    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("experiment must have at least one round")]
    NoRounds,

    #[error("cannot pay {paid} rounds out of {rounds}")]
    TooManyPaidRounds { paid: u32, rounds: u32 },

    #[error("players_per_group must be at least 1")]
    EmptyGroupSize,

    #[error("round {round} is outside 1..={rounds}")]
    RoundOutOfRange { round: u32, rounds: u32 },

    #[error("invalid session config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("you cannot buy a negative amount of tickets")]
    NegativeTickets,

    #[error(
        "Buying {tickets} tickets would cost {cost} which is more than your endowment {endowment}"
    )]
    OverBudget {
        tickets: u32,
        cost: Currency,
        endowment: Currency,
    },
}
