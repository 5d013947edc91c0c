use leptos::prelude::*;
use readyship::config::LandingConfig;
use readyship::counter::ShipmentCounter;
use readyship::digit::{CellFrame, DigitRow, RowFrame};

use crate::timing::{BrowserRolls, mount, or_log, wall_clock_ms};

/// Live shipment counter with odometer digits.
#[component]
pub fn LiveCounter() -> impl IntoView {
    let config = use_context::<LandingConfig>().unwrap_or_default();
    let Some(baseline) = or_log("counter", config.counter_baseline()) else {
        return ().into_any();
    };
    let counter = mount(ShipmentCounter::new(baseline, wall_clock_ms(), BrowserRolls));
    let row = RwSignal::new(DigitRow::new(&counter.view().get_untracked().grouped));

    Effect::new(move |_| {
        let grouped = counter.view().get().grouped;
        row.update(|r| {
            r.set(&grouped, wall_clock_ms() as u64);
        });
    });

    // Cells are keyed by position and flip count: an unchanged digit keeps its
    // node, a flipped one gets a fresh node so its animation starts over.
    let cells = move || {
        let now = wall_clock_ms() as u64;
        row.with(|r| r.frame(now).into_iter().enumerate().collect::<Vec<_>>())
    };

    view! {
        <section id="counter">
            <div class="container">
                <div class="live">
                    <span class="live-dot"></span>
                    "LIVE COUNTER"
                </div>
                <div class="counter">
                    <For
                        each=cells
                        key=|(position, frame)| match frame {
                            RowFrame::Digit(cell) => (*position, cell.flip, false),
                            RowFrame::Separator { .. } => (*position, 0, true),
                        }
                        children=|(_, frame)| match frame {
                            RowFrame::Digit(cell) => view! { <Digit cell /> }.into_any(),
                            RowFrame::Separator { ch } => {
                                view! { <span class="separator">{ch.to_string()}</span> }.into_any()
                            }
                        }
                    />
                </div>
            </div>
        </section>
    }
    .into_any()
}

#[component]
fn Digit(cell: CellFrame) -> impl IntoView {
    view! {
        <div class="digit">
            {cell.outgoing.map(|out| view! { <span class="out">{out.ch.to_string()}</span> })}
            <span class="in" class:flip=cell.animated>{cell.incoming.ch.to_string()}</span>
        </div>
    }
}
