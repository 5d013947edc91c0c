use leptos::prelude::*;
use readyship::catalog::GOLD;
use readyship::config::LandingConfig;
use readyship::carousel::Dot;
use readyship::display::DisplayItem;
use readyship::phase::Phase;

use crate::timing::{BrowserRolls, mount, or_log};

/// Notification stack: the active alert fades out and the next slides in,
/// with the two previous alerts dimmed underneath.
#[component]
pub fn Alerts() -> impl IntoView {
    let config = use_context::<LandingConfig>().unwrap_or_default();
    let Some(carousel) = or_log("alerts", config.alerts_carousel(Box::new(BrowserRolls))) else {
        return ().into_any();
    };
    let alerts = StoredValue::new(carousel.items().clone());
    let stack = mount(carousel);

    let active = move || {
        let index = stack.view().get().active_index;
        alerts.with_value(|a| a.get(index).clone())
    };
    let color = move || active().color;

    view! {
        <div class="panel">
            <div class="panel-header" style:background-color=GOLD>"ACTION ALERTS"</div>
            <div class="panel-body">
                // the card stays mounted so the opacity transition can run
                <div
                    class="alert-card"
                    class:fading=move || stack.view().get().phase != Phase::Visible
                    style:border-color=color
                >
                    {move || {
                        let alert = active();
                        let tint = format!("{}18", alert.color);
                        view! {
                            <span class="badge" style:background-color=tint style:color=alert.color.clone()>
                                {alert.badge.clone()}
                            </span>
                            <strong>{alert.title.clone()}</strong>
                            <small>{alert.caption.clone()}</small>
                            <p>{alert.body.clone()}</p>
                            <div class="alert-footer">
                                <span>{alert.channel.map(|c| format!("via {c}"))}</span>
                                <button style:background-color=alert.color.clone()>
                                    {alert.action.map(|a| format!("{a} →"))}
                                </button>
                            </div>
                        }
                    }}
                </div>
                {move || {
                    stack
                        .view()
                        .get()
                        .older
                        .into_iter()
                        .map(|row| {
                            let alert = alerts.with_value(|a| a.get(row.index).clone());
                            view! { <AlertRow alert opacity={row.opacity} /> }
                        })
                        .collect_view()
                }}
                {move || view! { <Dots dots={stack.view().get().dots} color={color()} /> }}
            </div>
        </div>
    }
    .into_any()
}

#[component]
fn AlertRow(alert: DisplayItem, opacity: f32) -> impl IntoView {
    view! {
        <div class="alert-row" style:border-color=alert.color.clone() style:opacity=opacity.to_string()>
            <span class="badge" style:color=alert.color.clone()>{alert.badge}</span>
            " "
            {alert.title}
        </div>
    }
}

/// One dot per item; the active dot is wide and tinted with `color`.
#[component]
pub(crate) fn Dots(dots: Vec<Dot>, color: String) -> impl IntoView {
    let dots = dots
        .into_iter()
        .map(|dot| {
            let fill = if dot.active { color.clone() } else { "#d1d5db".to_string() };
            view! { <span class="dot" class:active=dot.active style:background-color=fill></span> }
        })
        .collect_view();
    view! { <div class="dots">{dots}</div> }
}
