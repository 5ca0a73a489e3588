//! Repeated seeded draws summarized per original position.
use anyhow::{Context, Result};
use colored::Colorize;
use draft_lottery::{DraftConfig, DraftPick, LotteryDraw, run_seeded_lottery};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use crate::util::csv_field;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionAudit {
    pub position: u32,
    pub team: String,
    pub samples: u64,
    pub moved_up: u64,
    pub stayed: u64,
    pub moved_down: u64,
    pub mean_movement: f64,
    pub std_movement: f64,
    /// Signed movement to number of occurrences.
    pub histogram: BTreeMap<i64, u64>,
}

impl PositionAudit {
    #[allow(clippy::cast_precision_loss)]
    fn rate(&self, count: u64) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            count as f64 / self.samples as f64
        }
    }

    pub fn up_rate(&self) -> f64 {
        self.rate(self.moved_up)
    }

    pub fn stay_rate(&self) -> f64 {
        self.rate(self.stayed)
    }

    pub fn down_rate(&self) -> f64 {
        self.rate(self.moved_down)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditSummary {
    pub base_seed: u64,
    pub iterations: usize,
    pub rounds_run: u64,
    pub fallback_rounds: u64,
    pub max_attempts_seen: u32,
    pub positions: Vec<PositionAudit>,
}

/// Run `iterations` seeded draws starting at `base_seed` and tally movement
/// per original position.
///
/// # Errors
///
/// Returns an error if any draw fails.
pub fn run_audit(
    config: &DraftConfig,
    initial_order: &[u32],
    base_seed: u64,
    iterations: usize,
) -> Result<AuditSummary> {
    let mut builders: BTreeMap<u32, AuditBuilder> = initial_order
        .iter()
        .map(|&position| (position, AuditBuilder::new(position, config)))
        .collect();
    let mut rounds_run = 0u64;
    let mut fallback_rounds = 0u64;
    let mut max_attempts_seen = 0u32;

    for offset in 0..iterations {
        let seed = base_seed.wrapping_add(offset as u64);
        let draw = run_seeded_lottery(config, initial_order, seed)
            .with_context(|| format!("audit draw with seed {seed} failed"))?;
        ingest_draw(&draw, &mut builders);
        for summary in &draw.rounds {
            rounds_run += 1;
            if summary.fell_back {
                fallback_rounds += 1;
            }
            max_attempts_seen = max_attempts_seen.max(summary.attempts);
        }
    }

    if fallback_rounds > 0 {
        log::warn!("{fallback_rounds} of {rounds_run} audited rounds fell back to the original order");
    }

    Ok(AuditSummary {
        base_seed,
        iterations,
        rounds_run,
        fallback_rounds,
        max_attempts_seen,
        positions: builders.into_values().map(AuditBuilder::finish).collect(),
    })
}

fn ingest_draw(draw: &LotteryDraw, builders: &mut BTreeMap<u32, AuditBuilder>) {
    for pick in &draw.picks {
        if let Some(builder) = builders.get_mut(&pick.original_position) {
            builder.ingest(pick);
        }
    }
}

struct AuditBuilder {
    position: u32,
    team: String,
    moved_up: u64,
    stayed: u64,
    moved_down: u64,
    stats: RunningStats,
    histogram: BTreeMap<i64, u64>,
}

impl AuditBuilder {
    fn new(position: u32, config: &DraftConfig) -> Self {
        Self {
            position,
            team: config.team_label(position),
            moved_up: 0,
            stayed: 0,
            moved_down: 0,
            stats: RunningStats::default(),
            histogram: BTreeMap::new(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn ingest(&mut self, pick: &DraftPick) {
        match pick.movement {
            m if m < 0 => self.moved_up += 1,
            0 => self.stayed += 1,
            _ => self.moved_down += 1,
        }
        self.stats.add(pick.movement as f64);
        *self.histogram.entry(pick.movement).or_insert(0) += 1;
    }

    fn finish(self) -> PositionAudit {
        PositionAudit {
            position: self.position,
            team: self.team,
            samples: self.stats.count,
            moved_up: self.moved_up,
            stayed: self.stayed,
            moved_down: self.moved_down,
            mean_movement: self.stats.mean(),
            std_movement: self.stats.std_dev(),
            histogram: self.histogram,
        }
    }
}

#[derive(Debug, Default, Clone)]
struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    #[allow(clippy::cast_precision_loss)]
    fn add(&mut self, value: f64) {
        self.count += 1;
        let count = self.count as f64;
        let delta = value - self.mean;
        self.mean += delta / count;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    const fn mean(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.mean }
    }

    #[allow(clippy::cast_precision_loss)]
    fn variance(&self) -> f64 {
        if self.count > 1 {
            self.m2 / (self.count - 1) as f64
        } else {
            0.0
        }
    }

    fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

fn histogram_label(histogram: &BTreeMap<i64, u64>) -> String {
    histogram
        .iter()
        .map(|(movement, count)| format!("{movement:+}:{count}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn generate_console_report(out: &mut dyn Write, summary: &AuditSummary) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Draft Lottery Audit".bright_cyan().bold())?;
    writeln!(out, "{}", "======================".cyan())?;
    writeln!(
        out,
        "Draws: {} from seed {}  Rounds: {}",
        summary.iterations, summary.base_seed, summary.rounds_run
    )?;
    let fallback = if summary.fallback_rounds == 0 {
        summary.fallback_rounds.to_string().green()
    } else {
        summary.fallback_rounds.to_string().red()
    };
    writeln!(out, "Fallback rounds: {fallback}")?;
    writeln!(out, "Most attempts in one round: {}", summary.max_attempts_seen)?;
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!(
            "{:>4} {:<20} {:>7} {:>7} {:>7} {:>7}  histogram",
            "pos", "team", "up", "stay", "down", "mean"
        )
        .bold()
    )?;
    for audit in &summary.positions {
        writeln!(
            out,
            "{:>4} {:<20} {:>6.1}% {:>6.1}% {:>6.1}% {:>+7.3}  {}",
            audit.position,
            audit.team,
            audit.up_rate() * 100.0,
            audit.stay_rate() * 100.0,
            audit.down_rate() * 100.0,
            audit.mean_movement,
            histogram_label(&audit.histogram).dimmed()
        )?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, summary: &AuditSummary) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, summary: &AuditSummary) -> Result<()> {
    writeln!(out, "# Draft Lottery Audit\n")?;
    writeln!(out, "- **Base seed**: {}", summary.base_seed)?;
    writeln!(out, "- **Draws**: {}", summary.iterations)?;
    writeln!(out, "- **Rounds**: {}", summary.rounds_run)?;
    writeln!(out, "- **Fallback rounds**: {}", summary.fallback_rounds)?;
    writeln!(
        out,
        "- **Most attempts in one round**: {}\n",
        summary.max_attempts_seen
    )?;
    writeln!(
        out,
        "| Position | Team | Up | Stayed | Down | Mean movement | Std dev |"
    )?;
    writeln!(
        out,
        "|---------:|------|---:|-------:|-----:|--------------:|--------:|"
    )?;
    for audit in &summary.positions {
        writeln!(
            out,
            "| {} | {} | {:.1}% | {:.1}% | {:.1}% | {:+.3} | {:.3} |",
            audit.position,
            audit.team,
            audit.up_rate() * 100.0,
            audit.stay_rate() * 100.0,
            audit.down_rate() * 100.0,
            audit.mean_movement,
            audit.std_movement
        )?;
    }
    Ok(())
}

pub fn generate_csv_report(out: &mut dyn Write, summary: &AuditSummary) -> Result<()> {
    writeln!(
        out,
        "position,team,samples,moved_up,stayed,moved_down,mean_movement,std_movement"
    )?;
    for audit in &summary.positions {
        writeln!(
            out,
            "{},{},{},{},{},{},{:.4},{:.4}",
            audit.position,
            csv_field(&audit.team),
            audit.samples,
            audit.moved_up,
            audit.stayed,
            audit.moved_down,
            audit.mean_movement,
            audit.std_movement
        )?;
    }
    Ok(())
}
