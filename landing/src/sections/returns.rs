use leptos::prelude::*;
use readyship::config::LandingConfig;

use super::feature_selector::FeaturePanel;
use crate::timing::or_log;

#[component]
pub fn ReadyReturns() -> impl IntoView {
    let config = use_context::<LandingConfig>().unwrap_or_default();
    or_log("returns", config.returns_selector()).map(|selector| {
        view! {
            <FeaturePanel
                id="readyreturns"
                title="ReadyReturns"
                tagline="Turn returns into repeat customers with a branded self-service portal and smart exchange offers."
                selector
            />
        }
    })
}
