use leptos::prelude::*;
use readyship::config::LandingConfig;

use crate::timing::{BrowserRolls, mount, or_log};

#[component]
pub fn Hero() -> impl IntoView {
    let config = use_context::<LandingConfig>().unwrap_or_default();
    let carousel = or_log("hero", config.hero_carousel(Box::new(BrowserRolls)));

    view! {
        <section class="hero">
            <div class="container">
                <h1 class="hero-title">
                    "The platform for "
                    {carousel.map(|carousel| {
                        let phrases = carousel.items().clone();
                        let hero = mount(carousel);
                        move || {
                            let index = hero.view().get().active_index;
                            let phrase = phrases.get(index).clone();
                            view! {
                                <span
                                    class="hero-phrase"
                                    style:color=phrase.color.clone()
                                    style:border-color=phrase.color.clone()
                                >
                                    {phrase.title}
                                </span>
                            }
                        }
                    })}
                </h1>
                <p class="hero-description">
                    "Ship, track and return from one place. Every carrier, every channel."
                </p>
            </div>
        </section>
    }
}
