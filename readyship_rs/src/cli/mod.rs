//! `readyship` preview CLI.
//!
//! Plays the landing-page components in the terminal so timings and copy
//! can be checked without a browser:
//!
//! ```bash
//! readyship counter --seconds 30             # live counter, real time
//! readyship counter --instant --seed 7       # same, on the fake clock
//! readyship carousel alerts --seconds 20
//! readyship carousel shipper --click 2@4000  # pin feature 2 at 4s
//! readyship check                            # validate .readyship/config.toml
//! ```

pub mod play;
pub mod record;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::carousel::{CarouselView, CyclingCarousel};
use crate::config::LandingConfig;
use crate::counter::{CounterView, ShipmentCounter};
use crate::display::DisplayItem;
use crate::machine::{Choreography, Snapshot};
use crate::rolls::RollSource;
use crate::selector::{FeatureSelector, SelectorView};

use play::{ClickAt, OnClick, Play, drive, no_clicks, simulate};
use record::{Emitter, Record};

#[derive(Parser, Debug)]
#[command(name = "readyship")]
#[command(about = "Preview the ReadyShip landing-page animations in the terminal")]
#[command(version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Config file (default: .readyship/config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Run on a simulated clock instead of waiting in real time
    #[arg(long, global = true)]
    pub instant: bool,

    /// Emit JSON lines instead of styled text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the live shipment counter
    Counter {
        /// How long to run
        #[arg(long, default_value_t = 10)]
        seconds: u64,
        /// Seed for the event rolls (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Mount instant as RFC 3339 (default: now)
        #[arg(long)]
        now: Option<String>,
    },
    /// Run one of the cycling sections
    Carousel {
        #[arg(value_enum)]
        section: Section,
        #[arg(long, default_value_t = 10)]
        seconds: u64,
        /// Seed for randomized delays
        #[arg(long)]
        seed: Option<u64>,
        /// Click a feature, as INDEX@MS (shipper and returns only)
        #[arg(long = "click", value_name = "INDEX@MS")]
        clicks: Vec<ClickAt>,
    },
    /// Validate the config file and print the effective timings
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    Alerts,
    Analytics,
    Hero,
    Shipper,
    Returns,
}

impl Section {
    fn is_selector(self) -> bool {
        matches!(self, Section::Shipper | Section::Returns)
    }
}

/// Execute a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let emitter = Emitter { json: cli.json };

    match cli.command {
        Command::Counter { seconds, seed, now } => {
            run_counter(&config, seconds, seed, now.as_deref(), cli.instant, emitter).await
        }
        Command::Carousel {
            section,
            seconds,
            seed,
            clicks,
        } => {
            if !clicks.is_empty() && !section.is_selector() {
                anyhow::bail!("--click only applies to the shipper and returns sections");
            }
            let horizon_ms = seconds.saturating_mul(1_000);
            if section.is_selector() {
                let selector = match section {
                    Section::Returns => config.returns_selector(),
                    _ => config.shipper_selector(),
                }
                .context("failed to build feature selector")?;
                run_selector(selector, horizon_ms, clicks, cli.instant, emitter).await
            } else {
                let rolls = Box::new(rng(seed));
                let carousel = match section {
                    Section::Alerts => config.alerts_carousel(rolls),
                    Section::Analytics => config.analytics_carousel(rolls),
                    _ => config.hero_carousel(rolls),
                }
                .context("failed to build carousel")?;
                run_carousel(carousel, horizon_ms, cli.instant, emitter).await
            }
        }
        Command::Check => check(&config),
    }
}

fn load_config(path: Option<&Path>) -> Result<LandingConfig> {
    let config = match path {
        Some(path) => LandingConfig::try_load_from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => {
            let cwd = std::env::current_dir().context("failed to resolve current directory")?;
            LandingConfig::load(&cwd)
        }
    };
    config.validate().context("invalid landing config")?;
    Ok(config)
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

async fn play_component<C, F>(
    component: C,
    play: Play<C>,
    instant: bool,
    observe: F,
) -> Result<C>
where
    C: Choreography + Snapshot + Send + 'static,
    C::Event: Send,
    F: FnMut(u64, &C::View, &C::View) -> Result<()>,
{
    if instant {
        simulate(component, play, observe)
    } else {
        drive(component, play, observe).await
    }
}

async fn run_counter(
    config: &LandingConfig,
    seconds: u64,
    seed: Option<u64>,
    now: Option<&str>,
    instant: bool,
    emitter: Emitter,
) -> Result<()> {
    let mounted_at = match now {
        Some(now) => DateTime::parse_from_rfc3339(now)
            .with_context(|| format!("invalid --now `{now}`"))?
            .timestamp_millis(),
        None => Utc::now().timestamp_millis(),
    };
    let baseline = config.counter_baseline()?;
    let counter = ShipmentCounter::new(baseline, mounted_at, rng(seed));
    info!(value = counter.value(), "counter mounted");

    let play = Play::new(seconds.saturating_mul(1_000), no_clicks);
    let counter = play_component(
        counter,
        play,
        instant,
        |at_ms, prev: &CounterView, view: &CounterView| {
            if view.value != prev.value {
                emitter.emit(&Record::Count {
                    at_ms,
                    value: view.value,
                    added: view.value - prev.value,
                })?;
            }
            Ok(())
        },
    )
    .await?;

    let tally = counter.tally();
    info!(events = tally.total_events(), added = tally.added, "counter stopped");
    emitter.emit(&Record::Tally {
        events: tally.events.clone(),
        added: tally.added,
        value: counter.value(),
    })
}

async fn run_carousel(
    carousel: CyclingCarousel<DisplayItem>,
    horizon_ms: u64,
    instant: bool,
    emitter: Emitter,
) -> Result<()> {
    let name = carousel.name().to_string();
    let items = carousel.items().clone();
    let mut changes = 0;

    let carousel = play_component(
        carousel,
        Play::new(horizon_ms, no_clicks),
        instant,
        |at_ms, prev: &CarouselView, view: &CarouselView| {
            if (prev.active_index, prev.phase) != (view.active_index, view.phase) {
                changes += 1;
                emitter.emit(&Record::Phase {
                    at_ms,
                    carousel: name.clone(),
                    index: view.active_index,
                    title: items.get(view.active_index).title.clone(),
                    phase: view.phase,
                })?;
            }
            if view.revealed && !prev.revealed {
                emitter.emit(&Record::Reveal {
                    at_ms,
                    carousel: name.clone(),
                    index: view.active_index,
                })?;
            }
            Ok(())
        },
    )
    .await?;

    emitter.emit(&Record::Done {
        name: carousel.name().to_string(),
        index: carousel.active_index(),
        changes,
    })
}

async fn run_selector(
    selector: FeatureSelector<DisplayItem>,
    horizon_ms: u64,
    clicks: Vec<ClickAt>,
    instant: bool,
    emitter: Emitter,
) -> Result<()> {
    let name = selector.name().to_string();
    let items = selector.items().clone();
    let mut changes = 0;

    let on_click: OnClick<FeatureSelector<DisplayItem>> = |s, index, ctx| {
        s.click(index, ctx);
    };
    let play = Play::new(horizon_ms, on_click).with_clicks(clicks);

    let selector = play_component(
        selector,
        play,
        instant,
        |at_ms, prev: &SelectorView, view: &SelectorView| {
            if (prev.active_index, prev.auto_cycle) != (view.active_index, view.auto_cycle) {
                changes += 1;
                emitter.emit(&Record::Selected {
                    at_ms,
                    selector: name.clone(),
                    index: view.active_index,
                    title: items.get(view.active_index).title.clone(),
                    auto_cycle: view.auto_cycle,
                })?;
            }
            Ok(())
        },
    )
    .await?;

    emitter.emit(&Record::Done {
        name: selector.name().to_string(),
        index: selector.active_index(),
        changes,
    })
}

fn check(config: &LandingConfig) -> Result<()> {
    // Fixed rolls: only the shape of the timings is reported here.
    let rolls = || -> Box<dyn RollSource + Send> { Box::new(crate::rolls::ScriptedRolls::new([0.5])) };
    let alerts = config.alerts_carousel(rolls())?;
    let analytics = config.analytics_carousel(rolls())?;
    let hero = config.hero_carousel(rolls())?;
    let shipper = config.shipper_selector()?;
    let returns = config.returns_selector()?;
    let baseline = config.counter_baseline()?;

    for carousel in [&alerts, &analytics, &hero] {
        println!(
            "{:<10} {} items, hold {}, fade {}",
            carousel.name(),
            carousel.items().len(),
            carousel.hold(),
            carousel.fade()
        );
    }
    for selector in [&shipper, &returns] {
        println!(
            "{:<10} {} items, every {}ms",
            selector.name(),
            selector.items().len(),
            selector.hold_ms()
        );
    }
    println!(
        "{:<10} {}/month since {}",
        "counter",
        crate::counter::format_grouped(baseline.monthly_rate),
        DateTime::<Utc>::from_timestamp_millis(baseline.epoch_ms)
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| baseline.epoch_ms.to_string())
    );
    println!("{} config ok", console::style("✓").green().bold());
    Ok(())
}
