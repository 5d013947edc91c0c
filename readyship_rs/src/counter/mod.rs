//! Live shipment counter.
//!
//! Starts at the epoch baseline and then grows forever on randomized
//! events drawn by [`burst::next_event`]. Burst chunks are ordinary timers
//! owned by the stage, so teardown cancels them together with the next
//! top-level event.

pub mod baseline;
pub mod burst;

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::machine::{Choreography, Ctx, Snapshot};
use crate::rolls::RollSource;

pub use baseline::{Baseline, EPOCH_MS, EPOCH_RFC3339, MONTHLY_RATE, MS_PER_MONTH, epoch_baseline};
pub use burst::{BurstEvent, Chunk, EventClass, IncrementPlan, first_delay, next_event};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterEvent {
    /// Draw and apply the next top-level event.
    Next,
    /// Apply one burst chunk.
    Credit(u64),
}

/// Running totals per event class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub events: BTreeMap<&'static str, u64>,
    pub added: u64,
}

impl Tally {
    fn record(&mut self, class: EventClass) {
        *self.events.entry(class.label()).or_default() += 1;
    }

    pub fn count(&self, class: EventClass) -> u64 {
        self.events.get(class.label()).copied().unwrap_or(0)
    }

    pub fn total_events(&self) -> u64 {
        self.events.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterView {
    pub value: u64,
    pub grouped: String,
}

pub struct ShipmentCounter<R> {
    baseline: Baseline,
    mounted_at_unix_ms: i64,
    value: u64,
    rolls: R,
    tally: Tally,
}

impl<R: RollSource> ShipmentCounter<R> {
    /// A counter that will show `baseline.at(mounted_at_unix_ms)` when
    /// mounted.
    pub fn new(baseline: Baseline, mounted_at_unix_ms: i64, rolls: R) -> Self {
        Self {
            baseline,
            mounted_at_unix_ms,
            value: baseline.at(mounted_at_unix_ms),
            rolls,
            tally: Tally::default(),
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    fn credit(&mut self, amount: u64) {
        self.value = self.value.saturating_add(amount);
        self.tally.added = self.tally.added.saturating_add(amount);
    }
}

impl<R: RollSource> Choreography for ShipmentCounter<R> {
    type Event = CounterEvent;

    fn start(&mut self, ctx: &mut Ctx<'_, CounterEvent>) {
        self.value = self.baseline.at(self.mounted_at_unix_ms);
        let delay = first_delay(&mut self.rolls);
        debug!(value = self.value, first_delay_ms = delay, "shipment counter mounted");
        ctx.schedule(delay, CounterEvent::Next);
    }

    fn on_timer(&mut self, event: CounterEvent, ctx: &mut Ctx<'_, CounterEvent>) {
        match event {
            CounterEvent::Credit(amount) => self.credit(amount),
            CounterEvent::Next => {
                let drawn = next_event(&mut self.rolls);
                self.tally.record(drawn.class);
                match &drawn.plan {
                    IncrementPlan::None => {}
                    IncrementPlan::Single { amount } => self.credit(*amount),
                    IncrementPlan::Chunks { chunks, .. } => {
                        for chunk in chunks {
                            ctx.schedule(chunk.at_ms, CounterEvent::Credit(chunk.amount));
                        }
                    }
                }
                debug!(
                    class = drawn.class.label(),
                    added = drawn.plan.total(),
                    next_delay_ms = drawn.next_delay_ms,
                    value = self.value,
                    "counter event"
                );
                ctx.schedule(drawn.next_delay_ms, CounterEvent::Next);
            }
        }
    }
}

impl<R: RollSource> Snapshot for ShipmentCounter<R> {
    type View = CounterView;

    fn view(&self, _now: u64) -> CounterView {
        CounterView {
            value: self.value,
            grouped: format_grouped(self.value),
        }
    }
}

/// `2105156` -> `"2,105,156"`.
pub fn format_grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Stage;
    use crate::rolls::ScriptedRolls;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    fn seeded(seed: u64, mounted_at: i64) -> Stage<ShipmentCounter<StdRng>> {
        Stage::mount(
            ShipmentCounter::new(Baseline::default(), mounted_at, StdRng::seed_from_u64(seed)),
            0,
        )
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1_000), "1,000");
        assert_eq!(format_grouped(2_105_156), "2,105,156");
        assert_eq!(format_grouped(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn mounts_at_epoch_baseline() {
        let stage = seeded(7, EPOCH_MS + 30 * DAY_MS);
        assert_eq!(stage.component().value(), 2_105_156);
        assert_eq!(stage.component().view(0).grouped, "2,105,156");
        assert_eq!(stage.pending(), 1);
    }

    #[test]
    fn nothing_changes_before_first_event() {
        // first delay 200 + floor(0.5 * 800) = 600
        let counter = ShipmentCounter::new(Baseline::default(), EPOCH_MS, ScriptedRolls::new([0.5]));
        let mut stage = Stage::mount(counter, 0);
        assert_eq!(stage.next_deadline(), Some(600));
        stage.advance_to(599);
        assert_eq!(stage.fired(), 0);
    }

    #[test]
    fn burst_chunks_land_before_the_next_event() {
        // first delay, then a burst drawing zeros throughout
        let rolls = ScriptedRolls::new([0.0; 10]);
        let mut stage = Stage::mount(ShipmentCounter::new(Baseline::default(), EPOCH_MS, rolls), 0);
        stage.advance_to(200);
        assert_eq!(stage.component().value(), 0);
        assert_eq!(stage.component().tally().count(EventClass::Burst), 1);
        // three chunks plus the next event
        assert_eq!(stage.pending(), 4);

        stage.advance_to(240);
        assert_eq!(stage.component().value(), 12);
        stage.advance_to(280);
        assert_eq!(stage.component().value(), 22);
        stage.advance_to(320);
        assert_eq!(stage.component().value(), 80);
        assert_eq!(stage.next_deadline(), Some(200 + 120 + 3_000));
    }

    #[test]
    fn teardown_drops_pending_chunks() {
        let rolls = ScriptedRolls::new([0.0; 10]);
        let mut stage = Stage::mount(ShipmentCounter::new(Baseline::default(), EPOCH_MS, rolls), 0);
        stage.advance_to(250);
        let before = stage.component().value();
        assert_eq!(stage.teardown(), 3);
        stage.advance_to(1_000_000);
        assert_eq!(stage.component().value(), before);
        assert_eq!(stage.teardown(), 0);
    }

    #[test]
    fn remount_uses_fresh_baseline() {
        let mut first = seeded(1, EPOCH_MS + DAY_MS);
        first.advance_to(60_000);
        first.teardown();

        let second = seeded(1, EPOCH_MS + 2 * DAY_MS);
        assert_eq!(second.component().value(), epoch_baseline(EPOCH_MS + 2 * DAY_MS));
        assert!(second.component().value() >= first.component().baseline().at(EPOCH_MS + DAY_MS));
    }

    #[test]
    fn tally_accounts_for_every_increment() {
        let mut stage = seeded(42, EPOCH_MS + DAY_MS);
        let start = stage.component().value();
        stage.advance_to(10 * 60 * 1_000);
        let counter = stage.component();
        assert!(counter.tally().total_events() > 0);
        assert_eq!(counter.value(), start + counter.tally().added);
    }

    proptest! {
        #[test]
        fn value_never_decreases(seed in any::<u64>(), steps in prop::collection::vec(1u64..5_000, 1..40)) {
            let mut stage = seeded(seed, EPOCH_MS + 90 * DAY_MS);
            let mut prev = stage.component().value();
            for step in steps {
                let at = stage.now() + step;
                stage.advance_to(at);
                let now = stage.component().value();
                prop_assert!(now >= prev);
                prev = now;
            }
        }
    }
}
