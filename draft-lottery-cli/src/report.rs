use anyhow::Result;
use colored::Colorize;
use draft_lottery::{DraftConfig, DraftPick, LotteryDraw};
use std::io::Write;

use crate::util::csv_field;

fn movement_label(pick: &DraftPick) -> String {
    match pick.movement {
        m if m < 0 => format!("▲{}", m.unsigned_abs()).green().to_string(),
        m if m > 0 => format!("▼{m}").red().to_string(),
        _ => "•".dimmed().to_string(),
    }
}

pub fn generate_console_report(
    out: &mut dyn Write,
    config: &DraftConfig,
    draw: &LotteryDraw,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📋 Draft Lottery Results".bright_cyan().bold())?;
    writeln!(out, "{}", "========================".cyan())?;
    writeln!(out, "Seed: {}", draw.seed)?;
    writeln!(
        out,
        "Teams: {}  Rounds: {}  Movement cap: {}",
        config.team_count, config.round_count, config.settings.max_movement
    )?;

    for summary in &draw.rounds {
        writeln!(out)?;
        let header = format!("Round {}", summary.round);
        writeln!(
            out,
            "{} {}",
            header.bold(),
            format!("({} attempt(s))", summary.attempts).dimmed()
        )?;
        if summary.fell_back {
            writeln!(
                out,
                "   {}",
                "⚠️  attempts exhausted; original order kept - check the odds table".yellow()
            )?;
        }
        for pick in draw.picks_for_round(summary.round) {
            writeln!(
                out,
                "  #{:<3} {:<24} from {:<3} {}",
                pick.pick_number,
                pick.team_id,
                pick.original_position,
                movement_label(pick)
            )?;
        }
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, draw: &LotteryDraw) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, draw)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, draw: &LotteryDraw) -> Result<()> {
    writeln!(out, "# Draft Lottery Results\n")?;
    writeln!(out, "- **Seed**: {}", draw.seed)?;
    writeln!(out, "- **Rounds**: {}", draw.rounds.len())?;
    let fallbacks = draw.fallback_rounds();
    if !fallbacks.is_empty() {
        let listed: Vec<String> = fallbacks.iter().map(u32::to_string).collect();
        writeln!(out, "- **Fallback rounds**: {}", listed.join(", "))?;
    }
    writeln!(out)?;

    for summary in &draw.rounds {
        writeln!(out, "## Round {}\n", summary.round)?;
        writeln!(out, "| Pick | Team | Original | Movement |")?;
        writeln!(out, "|-----:|------|---------:|---------:|")?;
        for pick in draw.picks_for_round(summary.round) {
            writeln!(
                out,
                "| {} | {} | {} | {:+} |",
                pick.pick_number, pick.team_id, pick.original_position, pick.movement
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_csv_report(out: &mut dyn Write, draw: &LotteryDraw) -> Result<()> {
    writeln!(out, "round,pick,team,original_position,movement")?;
    for pick in &draw.picks {
        writeln!(
            out,
            "{},{},{},{},{}",
            pick.round,
            pick.pick_number,
            csv_field(&pick.team_id),
            pick.original_position,
            pick.movement
        )?;
    }
    Ok(())
}
