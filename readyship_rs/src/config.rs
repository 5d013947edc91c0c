//! Configuration file support for readyship.
//!
//! Loads optional `.readyship/config.toml` from the site root. Every key is
//! optional; anything left out falls back to the production timings and
//! copy in [`crate::catalog`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::carousel::CyclingCarousel;
use crate::catalog;
use crate::counter::{Baseline, EPOCH_RFC3339, MONTHLY_RATE};
use crate::display::{DisplayItem, Sequence};
use crate::error::{Error, Result};
use crate::phase::{Delay, PhaseTimer};
use crate::rolls::RollSource;
use crate::selector::FeatureSelector;

/// Root configuration structure
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    pub alerts: CarouselSection,
    pub analytics: CarouselSection,
    /// Cycling phrase in the hero headline.
    pub hero: CarouselSection,
    pub shipper: SelectorSection,
    pub returns: SelectorSection,
    pub counter: CounterSection,
}

/// A fading carousel. Delays are either a number of milliseconds or a
/// `{ min, max }` range drawn on every cycle.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselSection {
    pub hold_ms: Option<Delay>,
    pub fade_ms: Option<Delay>,
    /// Delay before the reveal animation of items marked `reveal`.
    pub reveal_ms: Option<u64>,
    /// Replaces the built-in copy. An empty list is an error.
    pub items: Option<Vec<DisplayItem>>,
}

/// A click-to-pin feature list.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorSection {
    pub interval_ms: Option<u64>,
    pub items: Option<Vec<DisplayItem>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterSection {
    pub monthly_rate: Option<u64>,
    /// RFC 3339 instant the counter starts from.
    pub epoch: Option<String>,
}

impl CarouselSection {
    fn hold(&self, default_ms: u64) -> Delay {
        self.hold_ms.unwrap_or(Delay::Fixed(default_ms))
    }

    fn fade(&self, default_ms: u64) -> Delay {
        self.fade_ms.unwrap_or(Delay::Fixed(default_ms))
    }

    fn check(&self, section: &'static str) -> Result<()> {
        if let Some(hold) = self.hold_ms {
            check_delay(section, "hold_ms", hold, false)?;
        }
        if let Some(fade) = self.fade_ms {
            check_delay(section, "fade_ms", fade, true)?;
        }
        Ok(())
    }

    fn build(
        &self,
        section: &'static str,
        defaults: (u64, u64),
        fallback: fn() -> Sequence<DisplayItem>,
        rolls: Box<dyn RollSource + Send>,
    ) -> Result<CyclingCarousel<DisplayItem>> {
        self.check(section)?;
        let items = items_or(section, self.items.as_ref(), fallback)?;
        let timer = PhaseTimer::new(self.hold(defaults.0), self.fade(defaults.1), rolls);
        Ok(CyclingCarousel::with_timer(section, items, timer))
    }
}

impl SelectorSection {
    fn check(&self, section: &'static str) -> Result<()> {
        if self.interval_ms == Some(0) {
            return Err(Error::InvalidTiming {
                section,
                reason: "interval_ms must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    fn build(
        &self,
        section: &'static str,
        fallback: fn() -> Sequence<DisplayItem>,
    ) -> Result<FeatureSelector<DisplayItem>> {
        self.check(section)?;
        let items = items_or(section, self.items.as_ref(), fallback)?;
        let interval = self.interval_ms.unwrap_or(catalog::FEATURE_INTERVAL_MS);
        Ok(FeatureSelector::new(section, items, interval))
    }
}

fn check_delay(section: &'static str, key: &str, delay: Delay, zero_ok: bool) -> Result<()> {
    if let Delay::Between { min, max } = delay {
        if min > max {
            return Err(Error::InvalidTiming {
                section,
                reason: format!("{key} range {min}..{max} is empty"),
            });
        }
    }
    if !zero_ok && delay.lower_bound() == 0 {
        return Err(Error::InvalidTiming {
            section,
            reason: format!("{key} must be greater than zero"),
        });
    }
    Ok(())
}

fn items_or(
    section: &str,
    configured: Option<&Vec<DisplayItem>>,
    fallback: fn() -> Sequence<DisplayItem>,
) -> Result<Sequence<DisplayItem>> {
    match configured {
        Some(items) => Sequence::new(section, items.clone()),
        None => Ok(fallback()),
    }
}

impl LandingConfig {
    /// Load config from `.readyship/config.toml` in the given root directory.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(".readyship").join("config.toml");
        Self::load_from_path(&config_path)
    }

    /// Load config from a specific path, falling back to defaults.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::try_load_from_path(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "using default landing config");
                Self::default()
            }
        }
    }

    /// Load config from a specific path, surfacing read and parse errors.
    pub fn try_load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject durations that would stall or spin a component and epochs that
    /// do not parse.
    pub fn validate(&self) -> Result<()> {
        self.alerts.check("alerts")?;
        self.analytics.check("analytics")?;
        self.hero.check("hero")?;
        self.shipper.check("shipper")?;
        self.returns.check("returns")?;
        self.counter_baseline()?;
        Ok(())
    }

    pub fn alerts_carousel(
        &self,
        rolls: Box<dyn RollSource + Send>,
    ) -> Result<CyclingCarousel<DisplayItem>> {
        self.alerts.build(
            "alerts",
            (catalog::ALERTS_HOLD_MS, catalog::ALERTS_FADE_MS),
            catalog::alerts,
            rolls,
        )
    }

    /// The analytics carousel; items marked `reveal` grow their bars shortly
    /// after they become visible.
    pub fn analytics_carousel(
        &self,
        rolls: Box<dyn RollSource + Send>,
    ) -> Result<CyclingCarousel<DisplayItem>> {
        let reveal = self.analytics.reveal_ms.unwrap_or(catalog::ANALYTICS_REVEAL_MS);
        Ok(self
            .analytics
            .build(
                "analytics",
                (catalog::ANALYTICS_HOLD_MS, catalog::ANALYTICS_FADE_MS),
                catalog::analytics,
                rolls,
            )?
            .with_reveal(reveal, |item| item.reveal))
    }

    /// Hero phrases swap instantly unless a fade is configured.
    pub fn hero_carousel(
        &self,
        rolls: Box<dyn RollSource + Send>,
    ) -> Result<CyclingCarousel<DisplayItem>> {
        self.hero.build(
            "hero",
            (catalog::HERO_TEXT_INTERVAL_MS, 0),
            catalog::hero_phrases,
            rolls,
        )
    }

    pub fn shipper_selector(&self) -> Result<FeatureSelector<DisplayItem>> {
        self.shipper.build("shipper", catalog::shipper_features)
    }

    pub fn returns_selector(&self) -> Result<FeatureSelector<DisplayItem>> {
        self.returns.build("returns", catalog::returns_features)
    }

    pub fn counter_baseline(&self) -> Result<Baseline> {
        Baseline::from_rfc3339(
            self.counter.epoch.as_deref().unwrap_or(EPOCH_RFC3339),
            self.counter.monthly_rate.unwrap_or(MONTHLY_RATE),
        )
    }
}
