use leptos::prelude::*;
use super::VERSION;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <div class="container">
                <span class="footer-title">"ReadyShip"</span>
                <span class="footer-version">{format!("v{VERSION}")}</span>
                <p class="footer-copyright">"Developed by The ReadyShip Team (c)2025"</p>
            </div>
        </footer>
    }
}
