//! Single-round assignment with randomized retries.
//!
//! Each attempt shuffles the processing order, then lets every team draw a
//! final position from whatever is still open inside its window. An attempt
//! that strands a team (or hits a missing odds entry) is thrown away whole and
//! the round starts over. After `max_attempts` failures the round resolves to
//! the identity order, which always satisfies the movement cap.
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::DraftConfig;
use crate::pick::DraftPick;
use crate::selection::{SelectionError, weighted_random_selection};

/// Outcome of resolving one round, including how hard it was to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResolution {
    pub round: u32,
    /// Picks sorted by pick number.
    pub picks: Vec<DraftPick>,
    /// Attempts consumed, including the successful one.
    pub attempts: u32,
    /// True when every attempt failed and the identity order was used.
    pub fell_back: bool,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
enum AttemptFailure {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("original position {original_position} landed on {pick_number}, beyond the cap")]
    Displacement {
        original_position: u32,
        pick_number: u32,
    },
}

#[derive(Debug, Clone)]
struct RoundTeam {
    original_position: u32,
    team_id: String,
}

/// Assign every team in `initial_order` a final position for `round`.
///
/// Never fails: exhausting the attempt ceiling yields the identity order.
pub fn run_lottery_round<R>(
    config: &DraftConfig,
    round: u32,
    initial_order: &[u32],
    rng: &mut R,
) -> Vec<DraftPick>
where
    R: Rng + ?Sized,
{
    run_lottery_round_resolved(config, round, initial_order, rng).picks
}

/// Same as [`run_lottery_round`], keeping attempt and fallback details.
pub fn run_lottery_round_resolved<R>(
    config: &DraftConfig,
    round: u32,
    initial_order: &[u32],
    rng: &mut R,
) -> RoundResolution
where
    R: Rng + ?Sized,
{
    let teams = round_teams(config, initial_order);
    let ceiling = config.settings.max_attempts;

    for attempt in 1..=ceiling {
        match attempt_round(config, round, &teams, rng) {
            Ok(picks) => {
                log::debug!("round {round} resolved after {attempt} attempt(s)");
                return RoundResolution {
                    round,
                    picks,
                    attempts: attempt,
                    fell_back: false,
                };
            }
            Err(failure) => {
                log::trace!("round {round} attempt {attempt} discarded: {failure}");
            }
        }
    }

    log::warn!(
        "round {round} exhausted {ceiling} attempts; using original order (check the odds table)"
    );
    RoundResolution {
        round,
        picks: identity_picks(round, &teams),
        attempts: ceiling,
        fell_back: true,
    }
}

fn round_teams(config: &DraftConfig, initial_order: &[u32]) -> Vec<RoundTeam> {
    initial_order
        .iter()
        .map(|&original_position| RoundTeam {
            original_position,
            team_id: config.team_label(original_position),
        })
        .collect()
}

fn attempt_round<R>(
    config: &DraftConfig,
    round: u32,
    teams: &[RoundTeam],
    rng: &mut R,
) -> Result<Vec<DraftPick>, AttemptFailure>
where
    R: Rng + ?Sized,
{
    let max_movement = config.settings.max_movement;
    let mut processing: Vec<&RoundTeam> = teams.iter().collect();
    processing.shuffle(rng);

    let mut available: Vec<u32> = (1..=config.team_count).collect();
    let mut picks = Vec::with_capacity(teams.len());
    for team in processing {
        let pick_number = weighted_random_selection(
            &available,
            &config.team_odds,
            team.original_position,
            config.team_count,
            max_movement,
            rng,
        )?;
        available.retain(|&position| position != pick_number);
        picks.push(DraftPick::new(
            round,
            pick_number,
            team.team_id.clone(),
            team.original_position,
        ));
    }

    if let Some(stray) = picks
        .iter()
        .find(|pick| pick.distance() > u64::from(max_movement))
    {
        return Err(AttemptFailure::Displacement {
            original_position: stray.original_position,
            pick_number: stray.pick_number,
        });
    }

    picks.sort_by_key(|pick| pick.pick_number);
    Ok(picks)
}

fn identity_picks(round: u32, teams: &[RoundTeam]) -> Vec<DraftPick> {
    let mut picks: Vec<DraftPick> = teams
        .iter()
        .map(|team| {
            DraftPick::new(
                round,
                team.original_position,
                team.team_id.clone(),
                team.original_position,
            )
        })
        .collect();
    picks.sort_by_key(|pick| pick.pick_number);
    picks
}
