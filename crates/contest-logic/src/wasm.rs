//! WASM bindings for the browser front end

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::{
    compute_group_outcome, select_paid_rounds, Csf, Currency, Group, SeededRng, SessionConfig,
};

fn parse_seed(seed: &[u8]) -> Result<[u8; 32], JsError> {
    seed.try_into()
        .map_err(|_| JsError::new("Seed must be exactly 32 bytes"))
}

fn parse_csf(csf: &str) -> Result<Csf, JsError> {
    csf.parse::<Csf>()
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Compute a single group's outcome, e.g. to preview results
///
/// # Arguments
/// * `csf` - "share", "allpay" or "lottery"
/// * `tickets` - Tickets bought by each group member
/// * `endowment` - Per-player endowment
/// * `cost_per_ticket` - Price of one ticket
/// * `prize` - Group prize
/// * `seed` - 32-byte seed for the lottery draw
/// * `round_number` - Round index, used to derive the draw stream
///
/// # Returns
/// Serialized GroupOutcome
#[wasm_bindgen]
pub fn preview_group_outcome(
    csf: &str,
    tickets: &[u32],
    endowment: f64,
    cost_per_ticket: f64,
    prize: f64,
    seed: &[u8],
    round_number: u32,
) -> Result<JsValue, JsError> {
    let csf = parse_csf(csf)?;
    let seed_arr = parse_seed(seed)?;

    let participants: Vec<u32> = (1..=tickets.len() as u32).collect();
    let mut group = Group::new(round_number, 1, &participants);
    group.prize = Currency::new(prize);
    for (player, t) in group.players.iter_mut().zip(tickets) {
        player.endowment = Currency::new(endowment);
        player.cost_per_ticket = Currency::new(cost_per_ticket);
        player.tickets_purchased = Some(*t);
    }

    let mut rng = SeededRng::new(&seed_arr, 0).for_round(round_number);
    let outcome = compute_group_outcome(&mut group, csf, false, &mut rng);

    serde_wasm_bindgen::to_value(&outcome)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Upper bound on `num_rounds` accepted from the front end
const MAX_PREVIEW_ROUNDS: u32 = 1_000;

/// Get the paid rounds a session seed selects
#[wasm_bindgen]
pub fn get_paid_rounds(num_rounds: u32, num_paid_rounds: u32, seed: &[u8]) -> Result<Vec<u32>, JsError> {
    if num_rounds > MAX_PREVIEW_ROUNDS {
        return Err(JsError::new(&format!(
            "num_rounds must be at most {} (got {})",
            MAX_PREVIEW_ROUNDS, num_rounds
        )));
    }
    let seed_arr = parse_seed(seed)?;
    let mut rng = SeededRng::new(&seed_arr, 0);
    Ok(select_paid_rounds(num_rounds, num_paid_rounds, &mut rng))
}

/// Get human-readable description of a CSF
#[wasm_bindgen]
pub fn get_csf_description(csf: &str) -> Result<String, JsError> {
    Ok(parse_csf(csf)?.describe().to_string())
}

#[derive(serde::Serialize)]
struct CsfInfo {
    id: &'static str,
    description: &'static str,
}

/// Get all available contest success functions
#[wasm_bindgen]
pub fn get_csf_types() -> Result<JsValue, JsError> {
    let types: Vec<CsfInfo> = Csf::ALL
        .iter()
        .map(|csf| CsfInfo {
            id: csf.as_str(),
            description: csf.describe(),
        })
        .collect();

    serde_wasm_bindgen::to_value(&types)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Largest ticket purchase an endowment covers
#[wasm_bindgen]
pub fn get_max_tickets_affordable(endowment: f64, cost_per_ticket: f64) -> u32 {
    Currency::new(endowment).units_affordable(Currency::new(cost_per_ticket))
}

#[derive(serde::Serialize)]
struct ValidationResult {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Validate a session config JSON string
///
/// Returns `{valid: true}` or `{valid: false, error: "..."}`.
/// Never throws; validation errors are returned as structured data.
#[wasm_bindgen]
pub fn validate_session_config(json: &str) -> JsValue {
    let checked = SessionConfig::from_json(json)
        .and_then(|config| config.validate(&crate::ContestConstants::default()));
    let result = match checked {
        Ok(()) => ValidationResult { valid: true, error: None },
        Err(e) => ValidationResult { valid: false, error: Some(e.to_string()) },
    };
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}
