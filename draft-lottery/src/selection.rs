//! Weighted choice of a final position for one team.
//!
//! Each admissible, still-unassigned position starts from the team's base
//! percentage and is scaled by how far it moves the team: every slot moved
//! toward position 1 adds [`MOVEMENT_WEIGHT_STEP`] to the multiplier, every
//! slot moved toward position N removes it.
use rand::Rng;
use serde::Serialize;
use smallvec::SmallVec;
use thiserror::Error;

use crate::config::OddsTable;
use crate::constants::MOVEMENT_WEIGHT_STEP;
use crate::range::valid_position_range;

/// Recoverable failures while choosing a position.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no available position within reach of original position {original_position}")]
    NoAdmissiblePosition { original_position: u32 },
    #[error("no odds entry for original position {original_position}")]
    MissingOdds { original_position: u32 },
}

/// Candidate positions in enumeration order. Windows rarely exceed five slots.
pub type Candidates = SmallVec<[u32; 8]>;

/// Candidate weight telemetry captured during selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightedCandidate {
    pub position: u32,
    pub base_weight: f64,
    pub movement_factor: f64,
    pub final_weight: f64,
    /// Share of the total weight; all candidates of one draw sum to 1.
    pub probability: f64,
}

/// Positions from `available` that lie inside the team's window, in the order given.
#[must_use]
pub fn admissible_positions(
    available: &[u32],
    original_position: u32,
    total_teams: u32,
    max_movement: u32,
) -> Candidates {
    let range = valid_position_range(original_position, total_teams, max_movement);
    available
        .iter()
        .copied()
        .filter(|&position| range.contains(position))
        .collect()
}

/// Weight multiplier for landing on `candidate` from `original_position`.
#[must_use]
pub fn movement_factor(original_position: u32, candidate: u32) -> f64 {
    if candidate < original_position {
        1.0 + MOVEMENT_WEIGHT_STEP * f64::from(original_position - candidate)
    } else {
        (1.0 - MOVEMENT_WEIGHT_STEP * f64::from(candidate - original_position)).max(0.0)
    }
}

/// Normalized distribution over `candidates`.
///
/// When every weight is zero or non-finite (a 0% odds entry, say) the
/// distribution is uniform instead of dividing by a zero total. A plain
/// normalization would leave every probability NaN, so the walk in
/// [`pick_from_distribution`] would never reach the roll and would always
/// settle on the first candidate.
#[must_use]
pub fn weighted_candidates(
    candidates: &[u32],
    base_percentage: f64,
    original_position: u32,
) -> Vec<WeightedCandidate> {
    let mut weighted: Vec<WeightedCandidate> = candidates
        .iter()
        .map(|&position| {
            let factor = movement_factor(original_position, position);
            let raw = base_percentage * factor;
            WeightedCandidate {
                position,
                base_weight: base_percentage,
                movement_factor: factor,
                final_weight: if raw.is_finite() { raw.max(0.0) } else { 0.0 },
                probability: 0.0,
            }
        })
        .collect();

    let total: f64 = weighted.iter().map(|c| c.final_weight).sum();
    if total > 0.0 && total.is_finite() {
        for candidate in &mut weighted {
            candidate.probability = candidate.final_weight / total;
        }
    } else if !weighted.is_empty() {
        let share = 1.0 / f64::from(u32::try_from(weighted.len()).unwrap_or(u32::MAX));
        for candidate in &mut weighted {
            candidate.probability = share;
        }
    }
    weighted
}

/// Walk the distribution and return the first candidate whose cumulative
/// probability reaches `roll`.
///
/// Falls back to the first candidate when rounding leaves the roll unmet.
#[must_use]
pub fn pick_from_distribution(distribution: &[WeightedCandidate], roll: f64) -> Option<u32> {
    let mut cumulative = 0.0;
    for candidate in distribution {
        cumulative += candidate.probability;
        if cumulative >= roll {
            return Some(candidate.position);
        }
    }
    distribution.first().map(|candidate| candidate.position)
}

/// Choose a final position for the team at `original_position`.
///
/// # Errors
///
/// Returns [`SelectionError::NoAdmissiblePosition`] when no available
/// position lies inside the team's window, and
/// [`SelectionError::MissingOdds`] when more than one does but the odds
/// table has no entry for the team.
pub fn weighted_random_selection<R>(
    available: &[u32],
    odds: &OddsTable,
    original_position: u32,
    total_teams: u32,
    max_movement: u32,
    rng: &mut R,
) -> Result<u32, SelectionError>
where
    R: Rng + ?Sized,
{
    let candidates = admissible_positions(available, original_position, total_teams, max_movement);
    match candidates.as_slice() {
        [] => return Err(SelectionError::NoAdmissiblePosition { original_position }),
        [only] => return Ok(*only),
        _ => {}
    }

    let base = odds
        .percentage(original_position)
        .ok_or(SelectionError::MissingOdds { original_position })?;
    let distribution = weighted_candidates(&candidates, base, original_position);
    let roll = rng.r#gen::<f64>();
    pick_from_distribution(&distribution, roll)
        .ok_or(SelectionError::NoAdmissiblePosition { original_position })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DraftConfig;
    use crate::rng::CountingRng;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn odds() -> OddsTable {
        DraftConfig::default_config().team_odds
    }

    #[test]
    fn singleton_candidate_is_returned_without_drawing() {
        let mut rng = CountingRng::wrap(SmallRng::seed_from_u64(1));
        let picked = weighted_random_selection(&[4, 9], &odds(), 5, 10, 2, &mut rng);
        assert_eq!(picked, Ok(4));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn singleton_candidate_skips_odds_lookup() {
        let mut rng = SmallRng::seed_from_u64(2);
        let empty = OddsTable::new();
        assert_eq!(
            weighted_random_selection(&[7], &empty, 7, 10, 2, &mut rng),
            Ok(7)
        );
    }

    #[test]
    fn unreachable_positions_are_rejected() {
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(
            weighted_random_selection(&[1, 2], &odds(), 5, 10, 2, &mut rng),
            Err(SelectionError::NoAdmissiblePosition {
                original_position: 5
            })
        );
    }

    #[test]
    fn missing_odds_entry_is_reported() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut table = odds();
        table.remove(5);
        assert_eq!(
            weighted_random_selection(&[3, 4, 5, 6, 7], &table, 5, 10, 2, &mut rng),
            Err(SelectionError::MissingOdds {
                original_position: 5
            })
        );
    }

    #[test]
    fn admissible_positions_preserve_enumeration_order() {
        let candidates = admissible_positions(&[7, 1, 5, 3, 9, 4], 5, 10, 2);
        assert_eq!(candidates.as_slice(), &[7, 5, 3, 4]);
    }

    #[test]
    fn upward_moves_gain_weight_and_downward_moves_lose_it() {
        assert!((movement_factor(5, 3) - 1.4).abs() < 1e-12);
        assert!((movement_factor(5, 4) - 1.2).abs() < 1e-12);
        assert!((movement_factor(5, 5) - 1.0).abs() < 1e-12);
        assert!((movement_factor(5, 6) - 0.8).abs() < 1e-12);
        assert!((movement_factor(5, 7) - 0.6).abs() < 1e-12);
        assert!(movement_factor(1, 8).abs() < f64::EPSILON);
    }

    #[test]
    fn distribution_is_normalized() {
        let distribution = weighted_candidates(&[3, 4, 5, 6, 7], 10.0, 5);
        let expected = [0.28, 0.24, 0.20, 0.16, 0.12];
        for (candidate, want) in distribution.iter().zip(expected) {
            assert!(
                (candidate.probability - want).abs() < 1e-12,
                "position {} had {}",
                candidate.position,
                candidate.probability
            );
        }
        let total: f64 = distribution.iter().map(|c| c.probability).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_weights_produce_uniform_distribution() {
        let distribution = weighted_candidates(&[1, 2, 3, 4], 0.0, 2);
        assert!(
            distribution
                .iter()
                .all(|c| (c.probability - 0.25).abs() < 1e-12)
        );
        // A 0% team still reaches every candidate, not just the first.
        assert_eq!(pick_from_distribution(&distribution, 0.9), Some(4));
        assert_eq!(pick_from_distribution(&distribution, 0.3), Some(2));
    }

    #[test]
    fn walk_returns_first_candidate_reaching_roll() {
        let distribution = weighted_candidates(&[3, 4, 5, 6, 7], 10.0, 5);
        assert_eq!(pick_from_distribution(&distribution, 0.0), Some(3));
        assert_eq!(pick_from_distribution(&distribution, 0.27), Some(3));
        assert_eq!(pick_from_distribution(&distribution, 0.30), Some(4));
        assert_eq!(pick_from_distribution(&distribution, 0.99), Some(7));
    }

    #[test]
    fn unmet_roll_falls_back_to_first_candidate() {
        let mut distribution = weighted_candidates(&[6, 7], 10.0, 6);
        for candidate in &mut distribution {
            candidate.probability = 0.25;
        }
        assert_eq!(pick_from_distribution(&distribution, 0.75), Some(6));
        assert_eq!(pick_from_distribution(&[], 0.5), None);
    }

    #[test]
    fn selections_stay_inside_window_and_track_weights() {
        const SAMPLES: u32 = 20_000;
        const TOLERANCE: f64 = 0.02;
        let mut rng = SmallRng::seed_from_u64(0xD1CE);
        let available: Vec<u32> = (1..=10).collect();
        let mut counts = [0u32; 11];
        for _ in 0..SAMPLES {
            let picked = weighted_random_selection(&available, &odds(), 5, 10, 2, &mut rng)
                .expect("window is available");
            assert!((3..=7).contains(&picked));
            counts[picked as usize] += 1;
        }
        let expected = [(3, 0.28), (4, 0.24), (5, 0.20), (6, 0.16), (7, 0.12)];
        for (position, share) in expected {
            let observed = f64::from(counts[position]) / f64::from(SAMPLES);
            assert!(
                (observed - share).abs() <= TOLERANCE,
                "position {position} drifted: observed {observed:.4}"
            );
        }
    }
}
