use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn Nav() -> impl IntoView {
    let (menu_open, set_menu_open) = signal(false);

    view! {
        <nav class="nav">
            <A href="/">"ReadyShip"</A>
            <div class="nav-links" class:open=move || menu_open.get()>
                <a href="/#readyshipper">"ReadyShipper"</a>
                <a href="/#readyreturns">"ReadyReturns"</a>
                <A href="/pricing">"Pricing"</A>
            </div>
            <button class="nav-toggle" on:click=move |_| set_menu_open.update(|o| *o = !*o)>
                {move || if menu_open.get() { "Close" } else { "Menu" }}
            </button>
        </nav>
    }
}
