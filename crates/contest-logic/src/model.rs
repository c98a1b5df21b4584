//! Session, round, group and player records
//!
//! The records form a tree owned top-down: a `Round` owns its groups and a
//! `Group` owns its players. Children carry their parent's identifiers
//! (`round_number`, `group_id`) instead of references back up the tree.

use serde::{Deserialize, Serialize};

use crate::config::{ContestConstants, SessionConfig};
use crate::csf::Csf;
use crate::currency::Currency;
use crate::error::ContestError;
use crate::grouping::form_groups;
use crate::random::RandomSource;

/// A running experiment session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub config: SessionConfig,
    pub constants: ContestConstants,
    /// Round numbers selected for payment, sorted; `None` until round 1 setup
    pub paid_rounds: Option<Vec<u32>>,
}

impl Session {
    /// Create a session, rejecting configs that contradict the constants
    pub fn new(config: SessionConfig, constants: ContestConstants) -> Result<Self, ContestError> {
        config.validate(&constants)?;
        Ok(Self {
            config,
            constants,
            paid_rounds: None,
        })
    }

    pub fn num_rounds(&self) -> u32 {
        self.constants.num_rounds
    }

    pub fn is_paid_round(&self, round_number: u32) -> bool {
        self.paid_rounds
            .as_ref()
            .is_some_and(|paid| paid.binary_search(&round_number).is_ok())
    }

    /// Build the records for one round from the participants present
    ///
    /// Groups are formed in participant order, or shuffled first when the
    /// session sets `group_randomly`.
    pub fn create_round<R>(
        &self,
        round_number: u32,
        participants: &[u32],
        rng: &mut R,
    ) -> Result<Round, ContestError>
    where
        R: RandomSource + ?Sized,
    {
        if round_number == 0 || round_number > self.num_rounds() {
            return Err(ContestError::RoundOutOfRange {
                round: round_number,
                rounds: self.num_rounds(),
            });
        }
        let members = form_groups(
            participants,
            self.constants.players_per_group,
            self.config.group_randomly,
            rng,
        );
        Ok(Round::from_members(round_number, &members))
    }
}

/// One round of the session (a subsession)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round_number: u32,
    pub paid: bool,
    pub csf: Csf,
    pub groups: Vec<Group>,
}

impl Round {
    /// Round with one group per entry of `members` (participant ids)
    pub fn from_members(round_number: u32, members: &[Vec<u32>]) -> Self {
        let groups = members
            .iter()
            .enumerate()
            .map(|(i, ids)| Group::new(round_number, i as u32 + 1, ids))
            .collect();
        Self {
            round_number,
            paid: false,
            csf: Csf::default(),
            groups,
        }
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.groups.iter().flat_map(|g| g.players.iter())
    }

    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.groups.iter_mut().flat_map(|g| g.players.iter_mut())
    }

    pub fn player_for(&self, participant: u32) -> Option<&Player> {
        self.players().find(|p| p.participant == participant)
    }

    pub fn player_for_mut(&mut self, participant: u32) -> Option<&mut Player> {
        self.players_mut().find(|p| p.participant == participant)
    }

    /// True once every player has a ticket decision on record
    pub fn all_submitted(&self) -> bool {
        self.players().all(|p| p.tickets_purchased.is_some())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub round_number: u32,
    /// 1-based position within the round
    pub id_in_subsession: u32,
    pub prize: Currency,
    pub players: Vec<Player>,
}

impl Group {
    pub fn new(round_number: u32, id_in_subsession: u32, participants: &[u32]) -> Self {
        let players = participants
            .iter()
            .enumerate()
            .map(|(i, participant)| Player::new(*participant, round_number, id_in_subsession, i as u32 + 1))
            .collect();
        Self {
            round_number,
            id_in_subsession,
            prize: Currency::ZERO,
            players,
        }
    }

    pub fn player_by_id(&self, id_in_group: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.id_in_group == id_in_group)
    }

    /// The other member of a two-player group
    pub fn coplayer(&self, id_in_group: u32) -> Option<&Player> {
        if self.players.len() != 2 || !(1..=2).contains(&id_in_group) {
            return None;
        }
        self.player_by_id(3 - id_in_group)
    }

    /// Ticket counts in player order; missing decisions count as zero
    pub fn tickets(&self) -> Vec<u32> {
        self.players
            .iter()
            .map(|p| p.tickets_purchased.unwrap_or(0))
            .collect()
    }

    pub fn total_tickets(&self) -> u64 {
        self.tickets().iter().map(|t| *t as u64).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Participant id, stable across rounds
    pub participant: u32,
    pub round_number: u32,
    pub group_id: u32,
    /// 1-based position within the group
    pub id_in_group: u32,
    pub endowment: Currency,
    pub cost_per_ticket: Currency,
    pub tickets_purchased: Option<u32>,
    pub prize_share: Option<f64>,
    pub earnings: Option<Currency>,
    /// Only set in paid rounds
    pub payoff: Option<Currency>,
}

impl Player {
    pub fn new(participant: u32, round_number: u32, group_id: u32, id_in_group: u32) -> Self {
        Self {
            participant,
            round_number,
            group_id,
            id_in_group,
            endowment: Currency::ZERO,
            cost_per_ticket: Currency::ZERO,
            tickets_purchased: None,
            prize_share: None,
            earnings: None,
            payoff: None,
        }
    }

    /// Largest ticket purchase the endowment covers
    pub fn max_tickets_affordable(&self) -> u32 {
        self.endowment.units_affordable(self.cost_per_ticket)
    }
}
