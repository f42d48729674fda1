//! Command Line Interface for the LP Nexus quantitative engine.
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use lp_nexus_domain::LiquidityPosition;
use lp_nexus_domain::metrics::PositionIl;
use lp_nexus_domain::metrics::impermanent_loss::{
    calculate_il, calculate_position_il, estimate_time_in_range,
};
use lp_nexus_domain::metrics::performance::{
    RangeMultipliers, calculate_fee_capture_efficiency, calculate_volatility_adjusted_roi,
    estimate_optimal_range_multipliers,
};
use lp_nexus_optimization::{
    MaximizeExpectedPnl, MaximizeProbBeatHodl, MaximizeRiskAdjusted, ObjectiveFunction,
    RangeOptimizer,
};
use lp_nexus_simulation::params::DEFAULT_LIQUIDITY_SCALE;
use lp_nexus_simulation::price_path::price_fan;
use lp_nexus_simulation::{MonteCarloRunner, SimulationParams};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod output;

#[derive(Parser, Debug)]
#[command(name = "lp-nexus")]
#[command(about = "Valuation, impermanent loss and Monte-Carlo analysis for concentrated-liquidity positions", long_about = None)]
struct Cli {
    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Value a position at a pool price
    Value {
        /// Position JSON file
        #[arg(short, long)]
        position: PathBuf,

        /// Pool sqrt price (sqrt of token1 per token0)
        #[arg(long, conflicts_with = "price")]
        sqrt_price: Option<f64>,

        /// Pool price (token1 per token0); defaults to the tokens' USD ratio
        #[arg(long)]
        price: Option<f64>,
    },
    /// Impermanent loss between two sqrt prices
    Il {
        /// Sqrt price at entry
        #[arg(long)]
        entry_sqrt_price: f64,

        /// Current sqrt price
        #[arg(long)]
        current_sqrt_price: f64,

        /// Position JSON file, to size the loss in USD
        #[arg(short, long)]
        position: Option<PathBuf>,
    },
    /// Time-in-range, fee capture and risk-adjusted ROI figures
    Metrics {
        #[arg(long, allow_hyphen_values = true)]
        tick_lower: i32,

        #[arg(long, allow_hyphen_values = true)]
        tick_upper: i32,

        #[arg(long, allow_hyphen_values = true)]
        current_tick: i32,

        /// Annualized volatility in percent
        #[arg(long, default_value_t = 45.0)]
        volatility: f64,

        /// Position ROI in percent
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        roi: f64,

        /// Impermanent loss in percent
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        il_percent: f64,

        /// Confidence level for the suggested range width
        #[arg(long, default_value_t = 0.95)]
        confidence: f64,
    },
    /// Monte-Carlo projection of a position against HODL
    Simulate {
        /// Position JSON file
        #[arg(short, long)]
        position: PathBuf,

        #[command(flatten)]
        simulation: SimulationArgs,

        /// Also print the PNL histogram
        #[arg(long)]
        histogram: bool,
    },
    /// Rank candidate ranges around the position's range
    Optimize {
        /// Position JSON file
        #[arg(short, long)]
        position: PathBuf,

        /// Candidate range widths in ticks
        #[arg(long, value_delimiter = ',', default_value = "1000,2000,4000,8000")]
        widths: Vec<u32>,

        /// Pool tick spacing
        #[arg(long, default_value_t = 60)]
        tick_spacing: i32,

        #[arg(long, value_enum, default_value_t = Objective::Pnl)]
        objective: Objective,

        /// Tail penalty for the risk objective
        #[arg(long, default_value_t = 0.5)]
        lambda: f64,

        #[command(flatten)]
        simulation: SimulationArgs,
    },
    /// Sample GBM price paths
    Paths {
        /// Starting price
        #[arg(long)]
        price: f64,

        /// Annualized volatility in percent
        #[arg(long, env = "LP_NEXUS_VOLATILITY", default_value_t = 45.0)]
        volatility: f64,

        /// Days to simulate
        #[arg(long, default_value_t = 30)]
        days: u32,

        /// Number of paths
        #[arg(long, default_value_t = 100)]
        paths: usize,

        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Monte-Carlo knobs shared by `simulate` and `optimize`.
#[derive(Args, Debug, Clone)]
struct SimulationArgs {
    /// Annualized volatility in percent
    #[arg(long, env = "LP_NEXUS_VOLATILITY", default_value_t = 45.0)]
    volatility: f64,

    /// Horizon in days
    #[arg(long, env = "LP_NEXUS_DAYS", default_value_t = 30.0)]
    days: f64,

    /// Number of trials
    #[arg(long, env = "LP_NEXUS_SIMULATIONS", default_value_t = 10_000)]
    simulations: usize,

    /// Correlation between the two assets
    #[arg(
        long,
        env = "LP_NEXUS_CORRELATION",
        default_value_t = 0.65,
        allow_hyphen_values = true
    )]
    correlation: f64,

    /// Divisor applied to raw liquidity
    #[arg(long, env = "LP_NEXUS_LIQUIDITY_SCALE", default_value_t = DEFAULT_LIQUIDITY_SCALE)]
    liquidity_scale: f64,

    /// Fee tier in percent; defaults to the position's tier or 0.3
    #[arg(long)]
    fee_tier_pct: Option<f64>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

impl SimulationArgs {
    fn params_for(&self, position: &LiquidityPosition) -> SimulationParams {
        let mut params = SimulationParams::from_position(position)
            .with_volatility(self.volatility)
            .with_time_days(self.days)
            .with_simulations(self.simulations)
            .with_correlation(self.correlation)
            .with_liquidity_scale(self.liquidity_scale);
        if let Some(fee_tier_pct) = self.fee_tier_pct {
            params = params.with_fee_tier_pct(fee_tier_pct);
        }
        if let Some(seed) = self.seed {
            params = params.with_seed(seed);
        }
        params
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Objective {
    /// Highest expected PNL
    Pnl,
    /// Highest probability of a positive PNL
    Win,
    /// Expected PNL minus a tail penalty
    Risk,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetricsReport {
    time_in_range_pct: f64,
    fee_capture_efficiency: f64,
    volatility_adjusted_roi: f64,
    range_multipliers: RangeMultipliers,
}

fn load_position(path: &Path) -> Result<LiquidityPosition> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read position file {}", path.display()))?;
    let position: LiquidityPosition = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse position file {}", path.display()))?;
    position
        .validate()
        .with_context(|| format!("Invalid position in {}", path.display()))?;
    Ok(position)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Value {
            position,
            sqrt_price,
            price,
        } => {
            let position = load_position(&position)?;
            let sqrt_price = sqrt_price
                .or_else(|| price.map(f64::sqrt))
                .unwrap_or_else(|| position.spot_sqrt_price());
            let valuation = position
                .value_at(sqrt_price)
                .context("Failed to value position")?;

            if cli.json {
                output::print_json(&valuation)?;
            } else {
                output::valuation_table(&position.token0.symbol, &position.token1.symbol, &valuation)
                    .printstd();
            }
        }
        Commands::Il {
            entry_sqrt_price,
            current_sqrt_price,
            position,
        } => {
            let il = match position {
                Some(path) => {
                    let position = load_position(&path)?;
                    calculate_position_il(
                        position.liquidity,
                        entry_sqrt_price,
                        current_sqrt_price,
                        position.token1.price_usd,
                    )
                }
                None => PositionIl {
                    il_usd: 0.0,
                    il_percent: calculate_il(entry_sqrt_price, current_sqrt_price) * 100.0,
                },
            };

            if cli.json {
                output::print_json(&il)?;
            } else {
                output::il_table(&il).printstd();
            }
        }
        Commands::Metrics {
            tick_lower,
            tick_upper,
            current_tick,
            volatility,
            roi,
            il_percent,
            confidence,
        } => {
            let time_in_range_pct = estimate_time_in_range(tick_lower, tick_upper, current_tick);
            let report = MetricsReport {
                time_in_range_pct,
                fee_capture_efficiency: calculate_fee_capture_efficiency(
                    time_in_range_pct,
                    volatility,
                ),
                volatility_adjusted_roi: calculate_volatility_adjusted_roi(
                    roi, il_percent, volatility,
                ),
                range_multipliers: estimate_optimal_range_multipliers(
                    volatility / 100.0,
                    confidence,
                ),
            };

            if cli.json {
                output::print_json(&report)?;
            } else {
                output::figures_table(&[
                    ("Time in range", format!("{:.0}%", report.time_in_range_pct)),
                    (
                        "Fee capture efficiency",
                        format!("{:.0}%", report.fee_capture_efficiency),
                    ),
                    (
                        "Volatility-adjusted ROI",
                        format!("{:.2}%", report.volatility_adjusted_roi),
                    ),
                    (
                        "Range multipliers",
                        format!(
                            "{:.4} / {:.4}",
                            report.range_multipliers.lower, report.range_multipliers.upper
                        ),
                    ),
                ])
                .printstd();
            }
        }
        Commands::Simulate {
            position,
            simulation,
            histogram,
        } => {
            let position = load_position(&position)?;
            let params = simulation.params_for(&position);
            info!(
                token0 = %position.token0.symbol,
                token1 = %position.token1.symbol,
                simulations = params.simulations,
                "Running Monte-Carlo simulation"
            );
            let result = MonteCarloRunner::new(params)
                .run()
                .context("Monte-Carlo simulation failed")?;

            if cli.json {
                output::print_json(&result)?;
            } else {
                output::simulation_table(&result).printstd();
                if histogram {
                    output::histogram_table(&result).printstd();
                }
            }
        }
        Commands::Optimize {
            position,
            widths,
            tick_spacing,
            objective,
            lambda,
            simulation,
        } => {
            let position = load_position(&position)?;
            let params = simulation.params_for(&position);
            let candidates = RangeOptimizer::candidates_around(
                position.tick_lower,
                position.tick_upper,
                &widths,
                tick_spacing,
            );
            let risk_adjusted = MaximizeRiskAdjusted { lambda };
            let objective: &dyn ObjectiveFunction = match objective {
                Objective::Pnl => &MaximizeExpectedPnl,
                Objective::Win => &MaximizeProbBeatHodl,
                Objective::Risk => &risk_adjusted,
            };
            info!(
                candidates = candidates.len(),
                objective = objective.name(),
                "Ranking candidate ranges"
            );
            let outcome = RangeOptimizer::optimize(&params, &candidates, objective)
                .context("Range optimization failed")?;

            if cli.json {
                output::print_json(&outcome)?;
            } else {
                output::optimization_table(&outcome).printstd();
            }
        }
        Commands::Paths {
            price,
            volatility,
            days,
            paths,
            seed,
        } => {
            let fan = price_fan(price, volatility, days, paths, seed);

            if cli.json {
                output::print_json(&fan)?;
            } else {
                output::paths_table(&fan).printstd();
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_simulate() {
        let cli = Cli::try_parse_from([
            "lp-nexus",
            "simulate",
            "--position",
            "pos.json",
            "--volatility",
            "80",
            "--correlation",
            "-0.2",
            "--seed",
            "7",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Simulate { simulation, .. } => {
                assert_eq!(simulation.volatility, 80.0);
                assert_eq!(simulation.correlation, -0.2);
                assert_eq!(simulation.seed, Some(7));
                assert_eq!(simulation.liquidity_scale, 1e18);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_optimize_widths() {
        let cli = Cli::try_parse_from([
            "lp-nexus",
            "optimize",
            "-p",
            "pos.json",
            "--widths",
            "500,1500",
            "--objective",
            "risk",
        ])
        .unwrap();
        match cli.command {
            Commands::Optimize {
                widths, objective, ..
            } => {
                assert_eq!(widths, vec![500, 1_500]);
                assert_eq!(objective, Objective::Risk);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_metrics_negative_ticks() {
        let cli = Cli::try_parse_from([
            "lp-nexus",
            "metrics",
            "--tick-lower",
            "-1000",
            "--tick-upper",
            "1000",
            "--current-tick",
            "-250",
        ])
        .unwrap();
        match cli.command {
            Commands::Metrics {
                tick_lower,
                current_tick,
                volatility,
                ..
            } => {
                assert_eq!(tick_lower, -1_000);
                assert_eq!(current_tick, -250);
                assert_eq!(volatility, 45.0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_value_price_flags_conflict() {
        let err = Cli::try_parse_from([
            "lp-nexus",
            "value",
            "--position",
            "pos.json",
            "--sqrt-price",
            "1.5",
            "--price",
            "2.25",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_params_from_position() {
        let position = LiquidityPosition::new(
            1_000_000_000_000_000_000_000u128,
            78_000,
            84_000,
            lp_nexus_domain::TokenInfo::new("WETH", 18, 3_420.0),
            lp_nexus_domain::TokenInfo::new("USDC", 6, 1.0),
        );
        let args = SimulationArgs {
            volatility: 60.0,
            days: 14.0,
            simulations: 2_000,
            correlation: 0.5,
            liquidity_scale: 1e18,
            fee_tier_pct: Some(0.05),
            seed: Some(3),
        };
        let params = args.params_for(&position);
        assert_eq!(params.volatility_pct, 60.0);
        assert_eq!(params.time_days, 14.0);
        assert_eq!(params.fee_tier_pct, 0.05);
        assert_eq!(params.seed, Some(3));
        assert!(params.validate().is_ok());
        let result = MonteCarloRunner::new(params).run().unwrap();
        assert_eq!(result.simulations, 2_000);
    }

    #[test]
    fn test_load_position_reports_missing_file() {
        let err = load_position(Path::new("/nonexistent/position.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read position file"));
    }
}
