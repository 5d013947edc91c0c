// Pricing page - static plan cards
use leptos::prelude::*;
use readyship::catalog::{BLUE, GREEN, RED};

struct Plan {
    name: &'static str,
    price: &'static str,
    color: &'static str,
    popular: bool,
    features: &'static [&'static str],
}

const PLANS: [Plan; 3] = [
    Plan {
        name: "READYCLOUD CRM",
        price: "$24",
        color: BLUE,
        popular: false,
        features: &[
            "All Standard Integrations Included",
            "Action Alerts + Email Marketing",
            "Customer Plans & Target Segments",
            "Customer Profiles",
            "Reporting",
        ],
    },
    Plan {
        name: "+ ADD SHIPPING",
        price: "$39",
        color: GREEN,
        popular: true,
        features: &[
            "Multi-Carrier Support",
            "Easy International Shipping",
            "Discounted USPS Rates",
            "CSV/XLSX Support",
            "Automation Rules",
            "Integrated Labels",
        ],
    },
    Plan {
        name: "+ ADD RETURNS",
        price: "$129",
        color: RED,
        popular: false,
        features: &[
            "Easy Setup - No Coding Required!",
            "Includes Return Interface",
            "Customizable Rules for Returns",
            "Charge Customers for Returns",
            "Returns Activity/Sales Reports",
        ],
    },
];

#[component]
pub fn PricingPage() -> impl IntoView {
    let plans = PLANS
        .iter()
        .map(|plan| {
            view! {
                <article class="plan" style:border-color=plan.color>
                    {plan.popular.then(|| view! { <span class="badge">"MOST POPULAR"</span> })}
                    <h3 style:color=plan.color>{plan.name}</h3>
                    <p class="price">{plan.price}<small>"/mo"</small></p>
                    <ul>
                        {plan.features.iter().map(|f| view! { <li>{*f}</li> }).collect_view()}
                    </ul>
                </article>
            }
        })
        .collect_view();

    view! {
        <section id="pricing">
            <div class="container">
                <h1>"Pricing"</h1>
                <div class="pricing">{plans}</div>
            </div>
        </section>
    }
}
