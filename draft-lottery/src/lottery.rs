//! Multi-round orchestration.
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::DraftConfig;
use crate::pick::DraftPick;
use crate::rng::round_stream;
use crate::round::{RoundResolution, run_lottery_round_resolved};
use crate::validation::validate_round;

/// Errors surfaced by a complete lottery run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LotteryError {
    #[error("initial order has {actual} entries but number of teams is {expected}")]
    InitialOrderLength { expected: u32, actual: usize },
    #[error("round {round} failed validation: {}", .messages.join("; "))]
    RoundValidation { round: u32, messages: Vec<String> },
}

/// Per-round bookkeeping for a seeded draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    pub attempts: u32,
    pub fell_back: bool,
    /// Random draws consumed from the round's stream.
    pub draws: u64,
}

/// Reproducible lottery result: the same seed and inputs give the same picks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryDraw {
    pub seed: u64,
    pub picks: Vec<DraftPick>,
    pub rounds: Vec<RoundSummary>,
}

impl LotteryDraw {
    pub fn picks_for_round(&self, round: u32) -> impl Iterator<Item = &DraftPick> + '_ {
        self.picks.iter().filter(move |pick| pick.round == round)
    }

    /// Rounds that exhausted their attempts and kept the original order.
    #[must_use]
    pub fn fallback_rounds(&self) -> Vec<u32> {
        self.rounds
            .iter()
            .filter(|summary| summary.fell_back)
            .map(|summary| summary.round)
            .collect()
    }
}

/// Run every configured round against `initial_order`.
///
/// # Errors
///
/// Returns [`LotteryError::InitialOrderLength`] when the order does not hold
/// exactly one entry per team, and [`LotteryError::RoundValidation`] if a
/// resolved round ever breaks the movement cap.
pub fn run_complete_lottery<R>(
    config: &DraftConfig,
    initial_order: &[u32],
    rng: &mut R,
) -> Result<Vec<DraftPick>, LotteryError>
where
    R: Rng + ?Sized,
{
    let resolutions = run_rounds(config, initial_order, |round| {
        run_lottery_round_resolved(config, round, initial_order, &mut *rng)
    })?;
    Ok(flatten(resolutions))
}

/// Run a complete lottery with one independent stream per round derived from `seed`.
///
/// # Errors
///
/// Same as [`run_complete_lottery`].
pub fn run_seeded_lottery(
    config: &DraftConfig,
    initial_order: &[u32],
    seed: u64,
) -> Result<LotteryDraw, LotteryError> {
    let mut draws = Vec::new();
    let resolutions = run_rounds(config, initial_order, |round| {
        let mut stream = round_stream(seed, round);
        let resolution = run_lottery_round_resolved(config, round, initial_order, &mut stream);
        draws.push(stream.draws());
        resolution
    })?;

    let rounds = resolutions
        .iter()
        .zip(draws)
        .map(|(resolution, draws)| RoundSummary {
            round: resolution.round,
            attempts: resolution.attempts,
            fell_back: resolution.fell_back,
            draws,
        })
        .collect();
    Ok(LotteryDraw {
        seed,
        picks: flatten(resolutions),
        rounds,
    })
}

fn run_rounds<F>(
    config: &DraftConfig,
    initial_order: &[u32],
    mut resolve: F,
) -> Result<Vec<RoundResolution>, LotteryError>
where
    F: FnMut(u32) -> RoundResolution,
{
    if u32::try_from(initial_order.len()).ok() != Some(config.team_count) {
        return Err(LotteryError::InitialOrderLength {
            expected: config.team_count,
            actual: initial_order.len(),
        });
    }

    let mut resolutions = Vec::new();
    for round in 1..=config.round_count {
        let resolution = resolve(round);
        let messages = validate_round(
            &resolution.picks,
            config.team_count,
            config.settings.max_movement,
        );
        if !messages.is_empty() {
            log::error!("round {round} failed validation: {}", messages.join("; "));
            return Err(LotteryError::RoundValidation { round, messages });
        }
        resolutions.push(resolution);
    }
    Ok(resolutions)
}

fn flatten(resolutions: Vec<RoundResolution>) -> Vec<DraftPick> {
    resolutions
        .into_iter()
        .flat_map(|resolution| resolution.picks)
        .collect()
}
