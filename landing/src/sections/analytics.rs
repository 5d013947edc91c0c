use leptos::prelude::*;
use readyship::config::LandingConfig;
use readyship::phase::Phase;

use super::alerts::Dots;
use crate::timing::{BrowserRolls, mount, or_log};

const CARRIERS: [(&str, u32); 4] = [("UPS", 96), ("DHL", 95), ("FedEx", 93), ("USPS", 91)];

/// KPI dashboard cycling through three views. The carriers view grows its
/// bars once the reveal timer fires.
#[component]
pub fn Analytics() -> impl IntoView {
    let config = use_context::<LandingConfig>().unwrap_or_default();
    let Some(carousel) = or_log("analytics", config.analytics_carousel(Box::new(BrowserRolls)))
    else {
        return ().into_any();
    };
    let views = StoredValue::new(carousel.items().clone());
    let dashboard = mount(carousel);
    let index = Memo::new(move |_| dashboard.view().get().active_index);
    let revealed = Memo::new(move |_| dashboard.view().get().revealed);

    view! {
        <div class="panel">
            <div
                class="panel-header"
                style:background-color=move || views.with_value(|v| v.get(index.get()).color.clone())
            >
                "ANALYTICS"
            </div>
            <div
                class="panel-body alert-card"
                class:fading=move || dashboard.view().get().phase != Phase::Visible
            >
                {move || {
                    let kpi = views.with_value(|v| v.get(index.get()).clone());
                    let bars = kpi.reveal.then(|| {
                        let color = kpi.color.clone();
                        CARRIERS
                            .iter()
                            .map(|&(name, pct)| {
                                let color = color.clone();
                                view! {
                                    <div class="carrier">
                                        <span>{name}</span>
                                        <div class="bar">
                                            <div
                                                class="bar-fill"
                                                style:background-color=color
                                                style:width=move || {
                                                    if revealed.get() { format!("{pct}%") } else { "0%".to_string() }
                                                }
                                            ></div>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()
                    });
                    view! {
                        <span class="badge" style:color=kpi.color.clone()>{kpi.badge.clone()}</span>
                        <strong class="kpi" style:color=kpi.color.clone()>{kpi.title.clone()}</strong>
                        <small>{kpi.caption.clone()}</small>
                        <p>{kpi.body.clone()}</p>
                        {bars}
                    }
                }}
                {move || {
                    let color = views.with_value(|v| v.get(index.get()).color.clone());
                    view! { <Dots dots={dashboard.view().get().dots} color /> }
                }}
            </div>
        </div>
    }
    .into_any()
}
