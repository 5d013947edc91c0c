use leptos::prelude::*;
use readyship::catalog::{TRACKING_ACTIVE_STEP, TRACKING_STEPS};
use readyship::display::DisplayItem;
use readyship::selector::{FeatureSelector, StepState, pipeline};

use crate::timing::mount;

/// Feature list beside a panel. The list auto-advances with a filling
/// progress bar; clicking pins a feature, clicking it again resumes.
#[component]
pub fn FeaturePanel(
    id: &'static str,
    title: &'static str,
    tagline: &'static str,
    selector: FeatureSelector<DisplayItem>,
) -> impl IntoView {
    let features = StoredValue::new(selector.items().clone());
    let color = selector.active().color.clone();
    let panel = mount(selector);
    let active = Memo::new(move |_| panel.view().get().active_index);
    let active_feature = move || features.with_value(|f| f.get(active.get()).clone());

    let list = (0..features.with_value(|f| f.len()))
        .map(|index| {
            let feature = features.with_value(|f| f.get(index).clone());
            let fill = feature.color.clone();
            let is_active = move || active.get() == index;
            view! {
                <div
                    class="feature"
                    class:active=is_active
                    style:color=feature.color.clone()
                    on:click=move |_| {
                        panel.interact(|s, ctx| s.click(index, ctx));
                    }
                >
                    <strong>{feature.title.clone()}</strong>
                    <p>{feature.body.clone()}</p>
                    // re-rendered on every reset, which restarts the fill
                    {move || {
                        let state = panel.view().get();
                        is_active().then(|| {
                            view! {
                                <div class="progress">
                                    <div
                                        class="progress-fill"
                                        style:background-color=fill.clone()
                                        style:animation-duration=format!("{}ms", state.hold_ms)
                                    ></div>
                                </div>
                            }
                        })
                    }}
                </div>
            }
        })
        .collect_view();

    view! {
        <section id=id>
            <div class="container">
                <h2 style:color=color>{title}</h2>
                <p>{tagline}</p>
                <div class="features">
                    <div class="panel">
                        <div
                            class="panel-header"
                            style:background-color=move || active_feature().color
                        >
                            {move || active_feature().label}
                        </div>
                        <div class="panel-body">
                            {move || {
                                let feature = active_feature();
                                let steps = (feature.id == "tracking").then(|| {
                                    view! { <Pipeline color=feature.color.clone() /> }
                                });
                                view! {
                                    <strong>{feature.title.clone()}</strong>
                                    <p>{feature.body.clone()}</p>
                                    {steps}
                                }
                            }}
                        </div>
                    </div>
                    <div class="feature-list">{list}</div>
                </div>
            </div>
        </section>
    }
}

#[component]
fn Pipeline(color: String) -> impl IntoView {
    let steps = pipeline(TRACKING_STEPS.len(), TRACKING_ACTIVE_STEP)
        .into_iter()
        .zip(TRACKING_STEPS)
        .map(|(state, label)| {
            let done = state != StepState::Pending;
            let fill = if done { color.clone() } else { "#9ca3af".to_string() };
            view! {
                <span class="step" class:pending=!done class:current=state == StepState::Current style:color=fill>
                    {label}
                </span>
            }
        })
        .collect_view();
    view! { <div class="pipeline">{steps}</div> }
}
