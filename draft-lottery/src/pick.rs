//! Individual pick representation.
use serde::{Deserialize, Serialize};
use std::fmt;

/// One team's slot in one round of the draft.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftPick {
    pub round: u32,
    /// Final position assigned by the lottery; 1 picks first.
    pub pick_number: u32,
    pub team_id: String,
    pub original_position: u32,
    /// `pick_number - original_position`: negative moved up, positive moved down.
    pub movement: i64,
}

impl DraftPick {
    #[must_use]
    pub fn new(round: u32, pick_number: u32, team_id: String, original_position: u32) -> Self {
        Self {
            round,
            pick_number,
            team_id,
            original_position,
            movement: movement_between(original_position, pick_number),
        }
    }

    /// Absolute displacement from the original slot.
    #[must_use]
    pub const fn distance(&self) -> u64 {
        self.movement.unsigned_abs()
    }
}

impl fmt::Display for DraftPick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R{} #{} {} (from {}, {:+})",
            self.round, self.pick_number, self.team_id, self.original_position, self.movement
        )
    }
}

/// Signed movement from `original_position` to `pick_number`.
#[must_use]
pub fn movement_between(original_position: u32, pick_number: u32) -> i64 {
    i64::from(pick_number) - i64::from(original_position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_sign_follows_direction() {
        let up = DraftPick::new(1, 3, "Team 5".to_string(), 5);
        assert_eq!(up.movement, -2);
        assert_eq!(up.distance(), 2);

        let down = DraftPick::new(1, 6, "Team 5".to_string(), 5);
        assert_eq!(down.movement, 1);

        let stay = DraftPick::new(2, 5, "Team 5".to_string(), 5);
        assert_eq!(stay.movement, 0);
    }

    #[test]
    fn display_shows_signed_movement() {
        let pick = DraftPick::new(2, 3, "Gators".to_string(), 5);
        assert_eq!(pick.to_string(), "R2 #3 Gators (from 5, -2)");
        let pick = DraftPick::new(1, 4, "Gators".to_string(), 4);
        assert_eq!(pick.to_string(), "R1 #4 Gators (from 4, +0)");
    }
}
