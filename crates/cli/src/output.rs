//! Table and JSON rendering for command results.

use anyhow::{Context, Result};
use lp_nexus_domain::ValuationResult;
use lp_nexus_domain::metrics::PositionIl;
use lp_nexus_optimization::OptimizationResult;
use lp_nexus_simulation::SimulationResult;
use lp_nexus_simulation::statistics::{HISTOGRAM_BUCKETS, percentile_of_sorted, sort_samples};
use prettytable::{Table, row};
use serde::Serialize;

/// Pretty-printed JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}

pub fn valuation_table(symbol0: &str, symbol1: &str, valuation: &ValuationResult) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Token", "Amount", "Value (USD)"]);
    table.add_row(row![
        symbol0,
        format!("{:.6}", valuation.amount0),
        format!("{:.2}", valuation.value0_usd)
    ]);
    table.add_row(row![
        symbol1,
        format!("{:.6}", valuation.amount1),
        format!("{:.2}", valuation.value1_usd)
    ]);
    table.add_row(row!["Total", "", format!("{:.2}", valuation.total_usd)]);
    table
}

pub fn il_table(il: &PositionIl) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Impermanent loss (%)", format!("{:.4}", il.il_percent)]);
    table.add_row(row!["Impermanent loss (USD)", format!("{:.2}", il.il_usd)]);
    table
}

/// Two-column table of labelled figures.
pub fn figures_table(figures: &[(&str, String)]) -> Table {
    let mut table = Table::new();
    for (label, value) in figures {
        table.add_row(row![label, value]);
    }
    table
}

pub fn simulation_table(result: &SimulationResult) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Trials", result.simulations]);
    table.add_row(row!["Initial value", format!("${:.2}", result.initial_value)]);
    table.add_row(row!["Expected PNL", format!("${:.2}", result.expected_pnl)]);
    table.add_row(row!["PNL vs HODL", format!("{:.2}%", result.pnl_vs_hodl)]);
    table.add_row(row!["5th percentile", format!("${:.2}", result.percentile5)]);
    table.add_row(row!["Median", format!("${:.2}", result.median_pnl)]);
    table.add_row(row!["95th percentile", format!("${:.2}", result.percentile95)]);
    table.add_row(row![
        "P(PNL > 0)",
        format!("{:.1}%", result.prob_beat_hodl * 100.0)
    ]);
    table.add_row(row![
        "Suggested range",
        format!(
            "[{}, {}] ~{:.1}% APR",
            result.optimal_range.lower, result.optimal_range.upper, result.optimal_range.expected_apr
        )
    ]);
    table
}

/// One row per bucket with a proportional bar.
pub fn histogram_table(result: &SimulationResult) -> Table {
    let counts = result.histogram.counts();
    let peak = counts.iter().copied().max().unwrap_or(0).max(1);
    let width = (result.max_pnl - result.min_pnl) / HISTOGRAM_BUCKETS as f64;

    let mut table = Table::new();
    table.add_row(row!["From (USD)", "Count", ""]);
    for (i, &count) in counts.iter().enumerate() {
        let bar = "#".repeat((count * 40 / peak) as usize);
        table.add_row(row![
            format!("{:.2}", result.min_pnl + width * i as f64),
            count,
            bar
        ]);
    }
    table
}

pub fn optimization_table(outcome: &OptimizationResult) -> Table {
    let mut table = Table::new();
    table.add_row(row![
        "Rank",
        "Ticks",
        "Prices",
        "Score",
        "Expected PNL",
        "P(PNL > 0)"
    ]);
    for (rank, candidate) in outcome.ranked.iter().enumerate() {
        table.add_row(row![
            rank + 1,
            format!("[{}, {}]", candidate.tick_lower, candidate.tick_upper),
            format!("{:.4} - {:.4}", candidate.price_lower, candidate.price_upper),
            format!("{:.4}", candidate.score),
            format!("${:.2}", candidate.result.expected_pnl),
            format!("{:.1}%", candidate.result.prob_beat_hodl * 100.0)
        ]);
    }
    table
}

/// Day-by-day percentile bands across a fan of paths.
pub fn paths_table(fan: &[Vec<f64>]) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Day", "P5", "Median", "P95"]);
    let days = fan.first().map_or(0, Vec::len);
    for day in 0..days {
        let mut prices: Vec<f64> = fan.iter().filter_map(|path| path.get(day).copied()).collect();
        sort_samples(&mut prices);
        let pick = |q: f64| format!("{:.4}", percentile_of_sorted(&prices, q).unwrap_or(0.0));
        table.add_row(row![day, pick(0.05), pick(0.5), pick(0.95)]);
    }
    table
}
