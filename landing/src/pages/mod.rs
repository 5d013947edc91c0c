// Landing page routes
// Developed by The ReadyShip Team (c)2025

mod home;
mod pricing;

pub use home::HomePage;
pub use pricing::PricingPage;
