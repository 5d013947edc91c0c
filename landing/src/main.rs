// ReadyShip Landing Page — Leptos 0.8 Edition
// Developed by The ReadyShip Team (c)2025

mod pages;
mod sections;
mod timing;

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use readyship::config::LandingConfig;

use pages::{HomePage, PricingPage};
use sections::{Footer, Nav};

fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(|| view! { <App/> });
}

#[component]
fn App() -> impl IntoView {
    // Production timings and copy; the browser build has no config file.
    provide_context(LandingConfig::default());

    view! {
        <Router>
            <Nav />
            <main>
                <Routes fallback=|| view! { <p class="container">"Page not found."</p> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/pricing") view=PricingPage />
                </Routes>
            </main>
            <Footer />
        </Router>
    }
}
