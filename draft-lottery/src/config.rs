//! Draft configuration: league shape, team identifiers, and weighted odds.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::constants::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_MOVEMENT, DEFAULT_ODDS_PERCENTAGES, DEFAULT_REVEAL_DELAY_MS,
    DEFAULT_ROUND_COUNT, DEFAULT_TEAM_COUNT, ODDS_TOTAL_TARGET, ODDS_TOTAL_TOLERANCE,
};

/// Errors raised when a draft configuration or initial order is malformed.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("team count must be at least 1")]
    NoTeams,
    #[error("round count must be at least 1")]
    NoRounds,
    #[error("attempt ceiling must be at least 1")]
    ZeroAttempts,
    #[error("expected {expected} team identifiers (got {actual})")]
    TeamListLength { expected: u32, actual: usize },
    #[error("no odds entry for position {position}")]
    MissingOdds { position: u32 },
    #[error("odds entry for position {position} is outside 1..={team_count}")]
    UnexpectedOdds { position: u32, team_count: u32 },
    #[error("duplicate odds entry for position {position}")]
    DuplicateOdds { position: u32 },
    #[error("odds percentage for position {position} must be finite and non-negative (got {value})")]
    InvalidPercentage { position: u32, value: f64 },
    #[error("initial order has {actual} entries but team count is {expected}")]
    OrderLength { expected: u32, actual: usize },
    #[error("initial order entry {position} is out of range or repeated")]
    OrderNotPermutation { position: u32 },
}

/// Weight assigned to a single original position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamOdds {
    pub position: u32,
    pub percentage: f64,
}

/// Percentage weights keyed by original position.
///
/// Serialized as a list of [`TeamOdds`] entries; a list naming the same
/// position twice is rejected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<TeamOdds>", into = "Vec<TeamOdds>")]
pub struct OddsTable {
    entries: BTreeMap<u32, f64>,
}

impl OddsTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from entries, rejecting duplicate positions.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateOdds`] when a position appears twice.
    pub fn from_entries<I>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = TeamOdds>,
    {
        let mut table = Self::new();
        for entry in entries {
            if table.insert(entry.position, entry.percentage).is_some() {
                return Err(ConfigError::DuplicateOdds {
                    position: entry.position,
                });
            }
        }
        Ok(table)
    }

    /// Insert or replace the weight for a position, returning the previous weight.
    pub fn insert(&mut self, position: u32, percentage: f64) -> Option<f64> {
        self.entries.insert(position, percentage)
    }

    pub fn remove(&mut self, position: u32) -> Option<f64> {
        self.entries.remove(&position)
    }

    #[must_use]
    pub fn percentage(&self, position: u32) -> Option<f64> {
        self.entries.get(&position).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TeamOdds> + '_ {
        self.entries
            .iter()
            .map(|(&position, &percentage)| TeamOdds {
                position,
                percentage,
            })
    }

    #[must_use]
    pub fn total_percentage(&self) -> f64 {
        self.entries.values().sum()
    }
}

impl TryFrom<Vec<TeamOdds>> for OddsTable {
    type Error = ConfigError;

    fn try_from(entries: Vec<TeamOdds>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<OddsTable> for Vec<TeamOdds> {
    fn from(table: OddsTable) -> Self {
        table.iter().collect()
    }
}

/// Movement cap and retry ceiling for the assignment loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotterySettings {
    #[serde(default = "LotterySettings::default_max_movement")]
    pub max_movement: u32,
    #[serde(default = "LotterySettings::default_max_attempts")]
    pub max_attempts: u32,
}

impl LotterySettings {
    const fn default_max_movement() -> u32 {
        DEFAULT_MAX_MOVEMENT
    }

    const fn default_max_attempts() -> u32 {
        DEFAULT_MAX_ATTEMPTS
    }
}

impl Default for LotterySettings {
    fn default() -> Self {
        Self {
            max_movement: Self::default_max_movement(),
            max_attempts: Self::default_max_attempts(),
        }
    }
}

/// Complete description of a league's lottery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftConfig {
    pub team_count: u32,
    pub round_count: u32,
    /// Team identifiers by original position; position `p` is `teams[p - 1]`.
    pub teams: Vec<String>,
    pub team_odds: OddsTable,
    /// Pause between pick reveals for presentation layers. Not used by the lottery.
    #[serde(default = "DraftConfig::default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,
    #[serde(default)]
    pub settings: LotterySettings,
}

impl DraftConfig {
    const fn default_reveal_delay_ms() -> u64 {
        DEFAULT_REVEAL_DELAY_MS
    }

    /// Ten-team, five-round league with the stock odds table.
    #[must_use]
    pub fn default_config() -> Self {
        let team_odds = (1..=DEFAULT_TEAM_COUNT)
            .zip(DEFAULT_ODDS_PERCENTAGES)
            .fold(OddsTable::new(), |mut table, (position, percentage)| {
                table.insert(position, percentage);
                table
            });
        Self {
            team_count: DEFAULT_TEAM_COUNT,
            round_count: DEFAULT_ROUND_COUNT,
            teams: (1..=DEFAULT_TEAM_COUNT)
                .map(|position| format!("Team {position}"))
                .collect(),
            team_odds,
            reveal_delay_ms: Self::default_reveal_delay_ms(),
            settings: LotterySettings::default(),
        }
    }

    /// Parse a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or repeats an odds position.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Identifier of the team holding `position` before the lottery.
    #[must_use]
    pub fn team_id(&self, position: u32) -> Option<&str> {
        let index = usize::try_from(position.checked_sub(1)?).ok()?;
        self.teams.get(index).map(String::as_str)
    }

    /// Identifier for `position`, or a generated label when the team list is short.
    #[must_use]
    pub fn team_label(&self, position: u32) -> String {
        self.team_id(position)
            .map_or_else(|| format!("Team {position}"), str::to_string)
    }

    /// The initial order `1..=team_count`.
    #[must_use]
    pub fn identity_order(&self) -> Vec<u32> {
        (1..=self.team_count).collect()
    }

    /// Check the configuration before running a lottery.
    ///
    /// The lottery itself tolerates a malformed odds table by retrying and
    /// falling back to the identity order; this catches such tables up front.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.team_count == 0 {
            return Err(ConfigError::NoTeams);
        }
        if self.round_count == 0 {
            return Err(ConfigError::NoRounds);
        }
        if self.settings.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        if u32::try_from(self.teams.len()).ok() != Some(self.team_count) {
            return Err(ConfigError::TeamListLength {
                expected: self.team_count,
                actual: self.teams.len(),
            });
        }
        for entry in self.team_odds.iter() {
            if entry.position == 0 || entry.position > self.team_count {
                return Err(ConfigError::UnexpectedOdds {
                    position: entry.position,
                    team_count: self.team_count,
                });
            }
            if !entry.percentage.is_finite() || entry.percentage < 0.0 {
                return Err(ConfigError::InvalidPercentage {
                    position: entry.position,
                    value: entry.percentage,
                });
            }
        }
        if let Some(position) =
            (1..=self.team_count).find(|&position| self.team_odds.percentage(position).is_none())
        {
            return Err(ConfigError::MissingOdds { position });
        }

        let total = self.team_odds.total_percentage();
        if (total - ODDS_TOTAL_TARGET).abs() > ODDS_TOTAL_TOLERANCE {
            log::warn!("odds table sums to {total:.2}%, expected {ODDS_TOTAL_TARGET:.0}%");
        }
        Ok(())
    }
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

/// Check that `order` is a permutation of `1..=team_count`.
///
/// # Errors
///
/// Returns [`ConfigError::OrderLength`] or [`ConfigError::OrderNotPermutation`].
pub fn validate_initial_order(order: &[u32], team_count: u32) -> Result<(), ConfigError> {
    if u32::try_from(order.len()).ok() != Some(team_count) {
        return Err(ConfigError::OrderLength {
            expected: team_count,
            actual: order.len(),
        });
    }
    let mut seen = BTreeSet::new();
    for &position in order {
        if position == 0 || position > team_count || !seen.insert(position) {
            return Err(ConfigError::OrderNotPermutation { position });
        }
    }
    Ok(())
}
