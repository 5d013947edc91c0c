//! Built-in display copy and timings for the production landing page.
//!
//! All numbers here are fabricated for visual effect.

use crate::display::{DisplayItem, Sequence};

pub const GOLD: &str = "#fdb82b";
pub const GREEN: &str = "#18c98d";
pub const RED: &str = "#dc2d39";
pub const BLUE: &str = "#383afe";

pub const ALERTS_HOLD_MS: u64 = 3_200;
pub const ALERTS_FADE_MS: u64 = 500;
pub const ANALYTICS_HOLD_MS: u64 = 3_800;
pub const ANALYTICS_FADE_MS: u64 = 480;
/// Delay before the carrier bars start growing once their view is visible.
pub const ANALYTICS_REVEAL_MS: u64 = 80;
pub const HERO_TEXT_INTERVAL_MS: u64 = 2_000;
pub const FEATURE_INTERVAL_MS: u64 = 3_000;

/// Action alerts: the notification stack on the overview page.
pub fn alerts() -> Sequence<DisplayItem> {
    Sequence::of(
        DisplayItem::new("vip", "63 VIP Customers Ready", GOLD)
            .icon("star")
            .badge("HIGH VALUE")
            .body("63 customers hit 5+ orders this month. Prime window to push a loyalty tier upgrade.")
            .action("LAUNCH OFFER")
            .caption("Just now")
            .channel("Email + SMS"),
        [
            DisplayItem::new("deliveries", "318 Deliveries Today", GREEN)
                .icon("package")
                .badge("UPSELL")
                .body("318 packages confirmed delivered in the last hour. Optimal moment for a post-delivery upsell sequence.")
                .action("START SEQUENCE")
                .caption("4m ago")
                .channel("In-App"),
            DisplayItem::new("return-spike", "Return Spike Detected", RED)
                .icon("rotate-ccw")
                .badge("RETENTION")
                .body("Returns up 34% vs. last week. Automated recovery coupons are ready to send to affected segments.")
                .action("SEND RECOVERY")
                .caption("11m ago")
                .channel("Email"),
            DisplayItem::new("lapsed", "1,240 Lapsed Customers", BLUE)
                .icon("trending-up")
                .badge("RE-ENGAGE")
                .body("1,240 customers are 45+ days without an order. Your highest-converting re-engagement window.")
                .action("START CAMPAIGN")
                .caption("18m ago")
                .channel("Email + SMS"),
            DisplayItem::new("pattern", "Purchase Pattern Match", GREEN)
                .icon("zap")
                .badge("CROSS-SELL")
                .body("Customers who bought this SKU convert at 41% on accessories within 7 days of delivery.")
                .action("SUGGEST ITEMS")
                .caption("26m ago")
                .channel("SMS"),
        ],
    )
}

/// KPI dashboard views. The carriers view grows its bars after a short
/// delay, so it is flagged for reveal.
pub fn analytics() -> Sequence<DisplayItem> {
    Sequence::of(
        DisplayItem::new("volume", "2,847", BLUE)
            .icon("package")
            .badge("SHIPMENTS")
            .caption("today")
            .body("+12% vs yesterday"),
        [
            DisplayItem::new("carriers", "94.3%", GREEN)
                .icon("truck")
                .badge("ON-TIME DELIVERY")
                .caption("this month")
                .body("+1.2 pts vs last month")
                .revealed_on_entry(),
            DisplayItem::new("returns", "4.2%", RED)
                .icon("rotate-ccw")
                .badge("RETURN RATE")
                .caption("last 30 days")
                .body("-0.8 pts vs prior period"),
        ],
    )
}

pub fn shipper_features() -> Sequence<DisplayItem> {
    Sequence::of(
        DisplayItem::new("multi-carrier", "Multi-Carrier Integration", GREEN)
            .body("Connect all your carriers in one platform")
            .label("CARRIER INTEGRATION"),
        [
            DisplayItem::new("rate-shopping", "Smart Rate Shopping", GREEN)
                .body("Find the best rates automatically")
                .label("RATE COMPARISON"),
            DisplayItem::new("batch-labels", "Batch Label Printing", GREEN)
                .body("Print hundreds of labels instantly")
                .label("BATCH PRINTING"),
            DisplayItem::new("tracking", "Real-Time Tracking", GREEN)
                .body("Keep customers updated automatically")
                .label("TRACKING UPDATES"),
        ],
    )
}

pub fn returns_features() -> Sequence<DisplayItem> {
    Sequence::of(
        DisplayItem::new("portal", "Self-Service Portal", RED)
            .body("Customers handle returns 24/7")
            .label("CUSTOMER PORTAL"),
        [
            DisplayItem::new("exchanges", "Exchange Incentives", RED)
                .body("Retain revenue with smart offers")
                .label("EXCHANGE OFFERS"),
            DisplayItem::new("rma", "Automated RMA", RED)
                .body("Generate labels instantly")
                .label("RMA PROCESSING"),
            DisplayItem::new("returns-analytics", "Returns Analytics", RED)
                .body("Track patterns and improve products")
                .label("RETURNS ANALYTICS"),
        ],
    )
}

/// Rotating phrase in the low-fidelity hero headline.
pub fn hero_phrases() -> Sequence<DisplayItem> {
    Sequence::of(
        DisplayItem::new("fulfillment", "quick order fulfillment", BLUE),
        [
            DisplayItem::new("returns", "customer friendly returns", RED),
            DisplayItem::new("comms", "great communications", GOLD),
        ],
    )
}

/// Tracking pipeline steps shown in the real-time tracking panel.
pub const TRACKING_STEPS: [&str; 4] = ["PICKED UP", "IN TRANSIT", "OUT FOR DEL.", "DELIVERED"];
/// The sample shipment in the tracking panel sits in transit.
pub const TRACKING_ACTIVE_STEP: usize = 1;
