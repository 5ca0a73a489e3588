//! Independent checks over a finished round.
use std::collections::BTreeMap;

use crate::pick::DraftPick;

/// Messages describing every way a round breaks the lottery invariants.
///
/// Empty when the round holds each pick number `1..=team_count` exactly once
/// and no team moved further than the cap.
#[must_use]
pub fn validate_round(picks: &[DraftPick], team_count: u32, max_movement: u32) -> Vec<String> {
    let mut messages = Vec::new();

    for pick in picks {
        if pick.distance() > u64::from(max_movement) {
            messages.push(format!(
                "{} moved {} positions (limit {max_movement})",
                pick.team_id,
                pick.distance()
            ));
        }
    }

    let mut seen: BTreeMap<u32, usize> = BTreeMap::new();
    for pick in picks {
        *seen.entry(pick.pick_number).or_default() += 1;
    }
    for (&pick_number, &count) in &seen {
        if pick_number == 0 || pick_number > team_count {
            messages.push(format!(
                "pick number {pick_number} is outside 1..={team_count}"
            ));
        }
        if count > 1 {
            messages.push(format!("pick number {pick_number} assigned {count} times"));
        }
    }
    for pick_number in 1..=team_count {
        if !seen.contains_key(&pick_number) {
            messages.push(format!("pick number {pick_number} was never assigned"));
        }
    }

    messages
}
