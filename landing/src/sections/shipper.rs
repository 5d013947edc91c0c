use leptos::prelude::*;
use readyship::config::LandingConfig;

use super::feature_selector::FeaturePanel;
use crate::timing::or_log;

#[component]
pub fn ReadyShipper() -> impl IntoView {
    let config = use_context::<LandingConfig>().unwrap_or_default();
    or_log("shipper", config.shipper_selector()).map(|selector| {
        view! {
            <FeaturePanel
                id="readyshipper"
                title="ReadyShipper"
                tagline="Ship smarter across every carrier, automatically. Cut costs, print faster, and keep customers informed without lifting a finger."
                selector
            />
        }
    })
}
