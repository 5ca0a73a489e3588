//! Draft Lottery Engine
//!
//! Platform-agnostic core for a constrained draft-order lottery. Given a
//! league configuration and an initial order, every round produces a
//! randomized final order in which no team moves more than a fixed number of
//! slots, biased by a per-position weighted odds table.
//! This crate performs no I/O of its own; storage is supplied by the caller.

pub mod config;
pub mod constants;
pub mod lottery;
pub mod pick;
pub mod range;
pub mod rng;
pub mod round;
pub mod selection;
pub mod validation;

use anyhow::Context;

// Re-export commonly used types
pub use config::{
    ConfigError, DraftConfig, LotterySettings, OddsTable, TeamOdds, validate_initial_order,
};
pub use lottery::{
    LotteryDraw, LotteryError, RoundSummary, run_complete_lottery, run_seeded_lottery,
};
pub use pick::{DraftPick, movement_between};
pub use range::{PositionRange, valid_position_range};
pub use rng::{CountingRng, derive_stream_seed, round_stream};
pub use round::{RoundResolution, run_lottery_round, run_lottery_round_resolved};
pub use selection::{
    SelectionError, WeightedCandidate, pick_from_distribution, weighted_candidates,
    weighted_random_selection,
};
pub use validation::validate_round;

/// Trait for abstracting configuration loading.
/// Platform-specific implementations should provide this
pub trait ConfigSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the league configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config(&self) -> Result<DraftConfig, Self::Error>;

    /// Load a stored initial order, if the user has arranged one.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored order exists but cannot be read.
    fn load_initial_order(&self) -> Result<Option<Vec<u32>>, Self::Error>;
}

/// Trait for abstracting pick-list persistence.
pub trait PickStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save the pick list of a finished lottery.
    ///
    /// # Errors
    ///
    /// Returns an error if the picks cannot be saved.
    fn save_picks(&self, picks: &[DraftPick]) -> Result<(), Self::Error>;

    /// Load the most recently saved pick list.
    ///
    /// # Errors
    ///
    /// Returns an error if stored picks exist but cannot be read.
    fn load_picks(&self) -> Result<Option<Vec<DraftPick>>, Self::Error>;

    /// Remove any saved pick list.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored picks cannot be removed.
    fn clear_picks(&self) -> Result<(), Self::Error>;
}

/// Ties a configuration source and a pick store to the lottery.
pub struct LotteryEngine<C, S>
where
    C: ConfigSource,
    S: PickStore,
{
    source: C,
    store: S,
}

impl<C, S> LotteryEngine<C, S>
where
    C: ConfigSource,
    S: PickStore,
{
    pub const fn new(source: C, store: S) -> Self {
        Self { source, store }
    }

    /// Load configuration and order, run a seeded lottery, and store the picks.
    ///
    /// Falls back to the identity order when no initial order is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if loading, the lottery itself, or saving fails.
    pub fn run_draw(&self, seed: u64) -> anyhow::Result<LotteryDraw> {
        let config = self
            .source
            .load_config()
            .context("failed to load draft configuration")?;
        let order = self
            .source
            .load_initial_order()
            .context("failed to load initial order")?
            .unwrap_or_else(|| config.identity_order());
        let draw = run_seeded_lottery(&config, &order, seed)?;
        self.store
            .save_picks(&draw.picks)
            .context("failed to save picks")?;
        Ok(draw)
    }

    /// Picks saved by the last draw.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn saved_picks(&self) -> Result<Option<Vec<DraftPick>>, S::Error> {
        self.store.load_picks()
    }

    /// Discard saved picks.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared.
    pub fn reset(&self) -> Result<(), S::Error> {
        self.store.clear_picks()
    }
}
