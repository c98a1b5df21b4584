//! Session configuration and experiment constants

use serde::{Deserialize, Serialize};

use crate::csf::Csf;
use crate::currency::Currency;
use crate::error::ContestError;

/// Rounds played per session
pub const NUM_ROUNDS: u32 = 2;
/// Rounds whose earnings are paid out
pub const NUM_PAID_ROUNDS: u32 = 1;
/// Default endowment when the session does not override it
pub const ENDOWMENT: Currency = Currency::new(10.0);
pub const COST_PER_TICKET: Currency = Currency::new(0.50);
pub const PRIZE: Currency = Currency::new(10.0);

/// Fixed parameters of the experiment design
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContestConstants {
    pub num_rounds: u32,
    /// `None` puts every participant in a single group
    pub players_per_group: Option<usize>,
    pub endowment: Currency,
    pub cost_per_ticket: Currency,
    pub prize: Currency,
    pub num_paid_rounds: u32,
}

impl Default for ContestConstants {
    fn default() -> Self {
        Self {
            num_rounds: NUM_ROUNDS,
            players_per_group: None,
            endowment: ENDOWMENT,
            cost_per_ticket: COST_PER_TICKET,
            prize: PRIZE,
            num_paid_rounds: NUM_PAID_ROUNDS,
        }
    }
}

impl ContestConstants {
    pub fn validate(&self) -> Result<(), ContestError> {
        if self.num_rounds == 0 {
            return Err(ContestError::NoRounds);
        }
        if self.num_paid_rounds > self.num_rounds {
            return Err(ContestError::TooManyPaidRounds {
                paid: self.num_paid_rounds,
                rounds: self.num_rounds,
            });
        }
        if self.players_per_group == Some(0) {
            return Err(ContestError::EmptyGroupSize);
        }
        positive("endowment", self.endowment)?;
        positive("cost_per_ticket", self.cost_per_ticket)?;
        positive("prize", self.prize)?;
        Ok(())
    }
}

/// Per-session settings chosen by the experimenter
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub csf: Csf,
    /// Overrides `ContestConstants::endowment`
    pub endowment: Option<Currency>,
    pub group_randomly: bool,
    /// Overrides `ContestConstants::num_paid_rounds`
    pub num_paid_rounds: Option<u32>,
}

/// Session config as the experiment runtime writes it
#[derive(Deserialize)]
struct RawSessionConfig {
    #[serde(alias = "csf")]
    contest_csf: String,
    #[serde(default, alias = "endowment")]
    contest_endowment: Option<f64>,
    #[serde(default)]
    group_randomly: bool,
    #[serde(default)]
    num_paid_rounds: Option<u32>,
}

impl SessionConfig {
    pub fn new(csf: Csf) -> Self {
        Self {
            csf,
            ..Self::default()
        }
    }

    /// Parse the runtime's JSON session config
    ///
    /// Accepts `contest_csf` (or `csf`), optional `contest_endowment` (or
    /// `endowment`), `group_randomly` and `num_paid_rounds`.
    pub fn from_json(json: &str) -> Result<Self, ContestError> {
        let raw: RawSessionConfig = serde_json::from_str(json)?;
        Ok(Self {
            csf: raw.contest_csf.parse()?,
            endowment: raw.contest_endowment.map(Currency::new),
            group_randomly: raw.group_randomly,
            num_paid_rounds: raw.num_paid_rounds,
        })
    }

    pub fn endowment(&self, constants: &ContestConstants) -> Currency {
        self.endowment.unwrap_or(constants.endowment)
    }

    pub fn paid_round_count(&self, constants: &ContestConstants) -> u32 {
        self.num_paid_rounds.unwrap_or(constants.num_paid_rounds)
    }

    /// Check this config against the experiment design
    pub fn validate(&self, constants: &ContestConstants) -> Result<(), ContestError> {
        constants.validate()?;
        if let Some(endowment) = self.endowment {
            positive("endowment", endowment)?;
        }
        let paid = self.paid_round_count(constants);
        if paid > constants.num_rounds {
            return Err(ContestError::TooManyPaidRounds {
                paid,
                rounds: constants.num_rounds,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: Currency) -> Result<(), ContestError> {
    if value.amount() > 0.0 {
        Ok(())
    } else {
        Err(ContestError::NonPositive {
            field,
            value: value.amount(),
        })
    }
}
