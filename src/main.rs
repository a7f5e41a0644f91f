//! BOTTOM GAUGE: composite market-bottom score
//!
//! Entry point. Loads configuration, initialises structured logging,
//! builds the data resolver (with an optional live fetcher), and runs the
//! requested subcommand.
//!
//! # Score a date (defaults to today)
//! bottom-gauge score --date 2020-03-23
//!
//! # Override indicators and re-score
//! bottom-gauge score --date 2022-10-13 --vix 45 --rsi 25
//!
//! # List historical bottoms / tier guide
//! bottom-gauge history
//! bottom-gauge tiers
//!
//! # Run the JSON API
//! bottom-gauge serve --port 8080

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;

use bottom_gauge::config::AppConfig;
use bottom_gauge::data::{historical, parse_date, DataResolver, LiveFetcher};
use bottom_gauge::llm;
use bottom_gauge::scoring::{self, status::tier_guide};
use bottom_gauge::server::{self, ServerState};
use bottom_gauge::types::{Assessment, MarketData};

#[derive(Parser)]
#[command(name = "bottom-gauge")]
#[command(about = "Composite market-bottom score from sentiment and volatility indicators")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve indicators for a date and print the score
    Score {
        /// Date to assess (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        #[command(flatten)]
        overrides: Overrides,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Score every known historical bottom
    History {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the status tier guide
    Tiers,

    /// Run the JSON API server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Manual indicator overrides, applied after resolution.
#[derive(clap::Args)]
struct Overrides {
    /// Fear & Greed Index (0-100)
    #[arg(long)]
    fear_greed: Option<f64>,

    /// VIX level
    #[arg(long)]
    vix: Option<f64>,

    /// Daily RSI
    #[arg(long)]
    rsi_daily: Option<f64>,

    /// Weekly RSI
    #[arg(long)]
    rsi_weekly: Option<f64>,

    /// Sets both daily and weekly RSI
    #[arg(long, conflicts_with_all = ["rsi_daily", "rsi_weekly"])]
    rsi: Option<f64>,

    /// Equity put/call ratio
    #[arg(long)]
    put_call: Option<f64>,
}

impl Overrides {
    fn is_empty(&self) -> bool {
        self.fear_greed.is_none()
            && self.vix.is_none()
            && self.rsi_daily.is_none()
            && self.rsi_weekly.is_none()
            && self.rsi.is_none()
            && self.put_call.is_none()
    }

    fn apply(&self, mut data: MarketData) -> MarketData {
        if let Some(v) = self.fear_greed {
            data.fear_greed = v;
        }
        if let Some(v) = self.vix {
            data.vix = v;
        }
        if let Some(v) = self.rsi {
            data = data.with_rsi(v);
        }
        if let Some(v) = self.rsi_daily {
            data.rsi_daily = v;
        }
        if let Some(v) = self.rsi_weekly {
            data.rsi_weekly = v;
        }
        if let Some(v) = self.put_call {
            data.put_call_ratio = v;
        }
        data
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    init_logging();

    let cfg = AppConfig::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Score {
            date,
            overrides,
            json,
        } => {
            let resolver = build_resolver(&cfg)?;
            let date = match date {
                Some(s) => parse_date(&s)?,
                None => resolver.today(),
            };

            let mut assessment = resolver.assess(date).await?;
            if !overrides.is_empty() {
                let data = overrides.apply(assessment.data);
                info!(before = %assessment.data, after = %data, "Applying manual overrides");
                assessment.rescore(data);
            }

            if !assessment.data.is_finite() {
                anyhow::bail!("Indicator values must be finite numbers");
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                print_assessment(&assessment);
            }
        }
        Commands::History { json } => {
            let history = historical::history();
            if json {
                println!("{}", serde_json::to_string_pretty(&history)?);
            } else {
                print_history(&history);
            }
        }
        Commands::Tiers => print_tiers(),
        Commands::Serve { port } => {
            let port = port.unwrap_or(cfg.server.port);
            let resolver = build_resolver(&cfg)?;
            info!(
                name = %cfg.app.name,
                port,
                live = resolver.has_live(),
                "BOTTOM GAUGE API starting up"
            );
            server::serve(Arc::new(ServerState::new(resolver)), port).await?;
        }
    }

    Ok(())
}

/// Build the resolver, attaching a live fetcher when an LLM is configured.
fn build_resolver(cfg: &AppConfig) -> Result<DataResolver> {
    let live = llm::build_client(&cfg.llm)?.map(LiveFetcher::new);
    Ok(DataResolver::from_config(cfg, live)?)
}

fn print_assessment(a: &Assessment) {
    let r = &a.result;
    println!("Date:    {} ({} data)", a.date, a.source);
    println!("Score:   {:.1} / {:.0}", r.total_score, scoring::MAX_TOTAL_SCORE);
    println!("Status:  {} [tier {}, {}]", r.status, r.tier(), r.status_color);
    println!();
    println!("  {:<24} {:>8} {:>8}", "Indicator", "Value", "Points");
    println!("  {:<24} {:>8.0} {:>8.2}", "Fear & Greed Index", a.data.fear_greed, r.fear_greed_score);
    println!("  {:<24} {:>8.1} {:>8.2}", "VIX", a.data.vix, r.vix_score);
    println!(
        "  {:<24} {:>8.1} {:>8.2}",
        "RSI (daily/weekly avg)",
        a.data.avg_rsi(),
        r.rsi_score
    );
    println!("  {:<24} {:>8.2} {:>8.2}", "Put/Call Ratio", a.data.put_call_ratio, r.put_call_score);
}

fn print_history(history: &[Assessment]) {
    println!("  {:<12} {:>7}  {}", "Date", "Score", "Status");
    for a in history {
        println!("  {:<12} {:>7.2}  {}", a.date.to_string(), a.result.total_score, a.result.status);
    }
}

fn print_tiers() {
    for t in tier_guide() {
        let range = match t.min_score {
            Some(min) => format!("{min:.0}+"),
            None => "<60".to_string(),
        };
        println!("{:>4}  {:<40} {}", range, t.status.label(), t.description);
    }
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bottom_gauge=info"));

    let json_logging = std::env::var("BOTTOM_GAUGE_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
