//! Admissible final-position windows.
use serde::{Deserialize, Serialize};

/// Closed interval of final positions a team may land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRange {
    pub min: u32,
    pub max: u32,
}

impl PositionRange {
    #[must_use]
    pub const fn contains(&self, position: u32) -> bool {
        position >= self.min && position <= self.max
    }

    pub fn positions(&self) -> impl Iterator<Item = u32> {
        self.min..=self.max
    }
}

/// Window `[max(1, p - M), min(N, p + M)]` for original position `p`.
#[must_use]
pub fn valid_position_range(
    original_position: u32,
    total_teams: u32,
    max_movement: u32,
) -> PositionRange {
    PositionRange {
        min: original_position.saturating_sub(max_movement).max(1),
        max: original_position
            .saturating_add(max_movement)
            .min(total_teams),
    }
}
