//! # readyship
//!
//! **Timed visualization state machines** for the ReadyShip landing page:
//! fading carousels, click-to-pin feature selectors, the live shipment
//! counter and its odometer digits.
//!
//! Every component is a pure [`machine::Choreography`]: it only changes
//! state on its own timers or on explicit input, and it only reaches the
//! world through a [`machine::Ctx`]. That keeps the same code running in
//! three places:
//!
//! - a fake-clock [`machine::Stage`] in tests and `readyship --instant`,
//! - the tokio [`driver`] behind the preview CLI,
//! - the Leptos landing page, which re-arms a browser timeout at
//!   [`machine::Stage::next_deadline`].
//!
//! ## Quick Start
//!
//! ```rust
//! use readyship::carousel::CyclingCarousel;
//! use readyship::catalog;
//! use readyship::machine::Stage;
//! use readyship::phase::Phase;
//!
//! let alerts = CyclingCarousel::new("alerts", catalog::alerts(), 3_000, 500);
//! let mut stage = Stage::mount(alerts, 0);
//!
//! stage.advance_to(3_000);
//! assert_eq!(stage.component().phase(), Phase::FadingOut);
//! stage.advance_to(3_500);
//! assert_eq!(stage.component().active_index(), 1);
//!
//! stage.teardown();
//! stage.advance_to(60_000);
//! assert_eq!(stage.component().active_index(), 1);
//! ```
//!
//! ## Features
//!
//! - `runtime` (default): tokio driver, preview CLI and OS-seeded rolls.
//!   Disable it for `wasm32` builds.

// ============================================================================
// Core
// ============================================================================

/// Pending timer set with bulk cancellation.
pub mod timer;

/// Component trait, timer context and the fake-clock stage.
pub mod machine;

/// Injectable uniform random source.
pub mod rolls;

/// Visible / fading-out / advancing cycle shared by every carousel.
pub mod phase;

// ============================================================================
// Components
// ============================================================================

pub mod carousel;
pub mod counter;
pub mod digit;
pub mod selector;

// ============================================================================
// Content & Configuration
// ============================================================================

pub mod catalog;
pub mod config;
pub mod display;
pub mod error;

// ============================================================================
// Runtime
// ============================================================================

#[cfg(feature = "runtime")]
pub mod cli;
#[cfg(feature = "runtime")]
pub mod driver;

pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
