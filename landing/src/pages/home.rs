// Home page - hero, live visualizations, product sections
use crate::sections::{Alerts, Analytics, Hero, LiveCounter, ReadyReturns, ReadyShipper};
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Hero />
        <section id="overview">
            <div class="container features">
                <Alerts />
                <Analytics />
            </div>
        </section>
        <ReadyShipper />
        <ReadyReturns />
        <LiveCounter />
    }
}
