// Landing page sections
// Developed by The ReadyShip Team (c)2025

/// Version string used across the landing page (single source of truth)
pub const VERSION: &str = readyship::VERSION;

mod alerts;
mod analytics;
mod counter;
mod feature_selector;
mod footer;
mod hero;
mod nav;
mod returns;
mod shipper;

pub use alerts::Alerts;
pub use analytics::Analytics;
pub use counter::LiveCounter;
pub use footer::Footer;
pub use hero::Hero;
pub use nav::Nav;
pub use returns::ReadyReturns;
pub use shipper::ReadyShipper;
