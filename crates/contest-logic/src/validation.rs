//! Ticket decision validation
//!
//! The outcome engine assumes `0 <= tickets <= max_tickets_affordable`. The
//! runtime runs submissions through here before recording them.

use crate::error::ContestError;
use crate::model::Player;

/// Accept `value` as a ticket purchase for `player`, or explain why not
pub fn validate_tickets(player: &Player, value: i64) -> Result<u32, ContestError> {
    if value < 0 {
        return Err(ContestError::NegativeTickets);
    }
    let max = player.max_tickets_affordable();
    match u32::try_from(value) {
        Ok(tickets) if tickets <= max => Ok(tickets),
        _ => {
            let tickets = u32::try_from(value).unwrap_or(u32::MAX);
            Err(ContestError::OverBudget {
                tickets,
                cost: player.cost_per_ticket * tickets,
                endowment: player.endowment,
            })
        }
    }
}

impl Player {
    /// Validate and record this round's ticket decision
    pub fn submit_tickets(&mut self, value: i64) -> Result<u32, ContestError> {
        let tickets = validate_tickets(self, value)?;
        self.tickets_purchased = Some(tickets);
        Ok(tickets)
    }
}
