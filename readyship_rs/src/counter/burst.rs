//! Randomized event plans for the shipment counter.
//!
//! Every function here is pure given its [`RollSource`]. The counter
//! component only turns a [`BurstEvent`] into timers.

use serde::Serialize;

use crate::rolls::RollSource;

/// Delay before the very first event after mount.
pub const FIRST_DELAY_MS: (u64, u64) = (200, 999);

const BURST_BELOW: f64 = 0.04;
const MEDIUM_BELOW: f64 = 0.18;
const NORMAL_BELOW: f64 = 0.45;

const BURST_TOTAL: (u64, u64) = (80, 449);
const BURST_CHUNKS: (u64, u64) = (3, 6);
const CHUNK_GAP_MS: (u64, u64) = (40, 169);
const BURST_COOLDOWN_MS: (u64, u64) = (3_000, 11_999);
const MEDIUM_AMOUNT: (u64, u64) = (4, 25);
const MEDIUM_DELAY_MS: (u64, u64) = (600, 2_799);
const NORMAL_AMOUNT: (u64, u64) = (1, 3);
const NORMAL_DELAY_MS: (u64, u64) = (150, 1_049);
const QUIET_DELAY_MS: (u64, u64) = (400, 1_999);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventClass {
    Burst,
    Medium,
    Normal,
    Quiet,
}

impl EventClass {
    pub fn classify(roll: f64) -> Self {
        if roll < BURST_BELOW {
            EventClass::Burst
        } else if roll < MEDIUM_BELOW {
            EventClass::Medium
        } else if roll < NORMAL_BELOW {
            EventClass::Normal
        } else {
            EventClass::Quiet
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EventClass::Burst => "burst",
            EventClass::Medium => "medium",
            EventClass::Normal => "normal",
            EventClass::Quiet => "quiet",
        }
    }
}

/// One slice of a burst, applied `at_ms` after the event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub at_ms: u64,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IncrementPlan {
    None,
    Single { amount: u64 },
    Chunks { total: u64, chunks: Vec<Chunk> },
}

impl IncrementPlan {
    /// Sum of everything this plan adds.
    pub fn total(&self) -> u64 {
        match self {
            IncrementPlan::None => 0,
            IncrementPlan::Single { amount } => *amount,
            IncrementPlan::Chunks { chunks, .. } => chunks.iter().map(|c| c.amount).sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BurstEvent {
    pub class: EventClass,
    pub plan: IncrementPlan,
    /// Delay until the next event, counted from this one. For bursts this
    /// includes the offset of the final chunk.
    pub next_delay_ms: u64,
}

pub fn first_delay(rolls: &mut dyn RollSource) -> u64 {
    rolls.between(FIRST_DELAY_MS.0, FIRST_DELAY_MS.1)
}

/// Draw one event: classify a roll, then draw its increments and the delay
/// until the next event.
pub fn next_event(rolls: &mut dyn RollSource) -> BurstEvent {
    let class = EventClass::classify(rolls.roll());
    let (plan, next_delay_ms) = match class {
        EventClass::Burst => burst(rolls),
        EventClass::Medium => {
            let amount = rolls.between(MEDIUM_AMOUNT.0, MEDIUM_AMOUNT.1);
            let delay = rolls.between(MEDIUM_DELAY_MS.0, MEDIUM_DELAY_MS.1);
            (IncrementPlan::Single { amount }, delay)
        }
        EventClass::Normal => {
            let amount = rolls.between(NORMAL_AMOUNT.0, NORMAL_AMOUNT.1);
            let delay = rolls.between(NORMAL_DELAY_MS.0, NORMAL_DELAY_MS.1);
            (IncrementPlan::Single { amount }, delay)
        }
        EventClass::Quiet => (
            IncrementPlan::None,
            rolls.between(QUIET_DELAY_MS.0, QUIET_DELAY_MS.1),
        ),
    };
    BurstEvent {
        class,
        plan,
        next_delay_ms,
    }
}

fn burst(rolls: &mut dyn RollSource) -> (IncrementPlan, u64) {
    let total = rolls.between(BURST_TOTAL.0, BURST_TOTAL.1);
    let count = rolls.between(BURST_CHUNKS.0, BURST_CHUNKS.1);

    let mut chunks = Vec::with_capacity(count as usize);
    let mut at_ms = 0;
    let mut remaining = total;
    for i in 0..count {
        at_ms += rolls.between(CHUNK_GAP_MS.0, CHUNK_GAP_MS.1);
        // earlier chunks take 15-60% of what is left, the last takes the rest
        let amount = if i + 1 == count {
            remaining
        } else {
            let share = rolls.roll() * 0.45 + 0.15;
            ((remaining as f64 * share).floor() as u64).min(remaining)
        };
        remaining -= amount;
        chunks.push(Chunk { at_ms, amount });
    }

    let cooldown = rolls.between(BURST_COOLDOWN_MS.0, BURST_COOLDOWN_MS.1);
    (IncrementPlan::Chunks { total, chunks }, at_ms + cooldown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rolls::ScriptedRolls;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn classification_thresholds() {
        assert_eq!(EventClass::classify(0.0), EventClass::Burst);
        assert_eq!(EventClass::classify(0.039), EventClass::Burst);
        assert_eq!(EventClass::classify(0.04), EventClass::Medium);
        assert_eq!(EventClass::classify(0.179), EventClass::Medium);
        assert_eq!(EventClass::classify(0.18), EventClass::Normal);
        assert_eq!(EventClass::classify(0.449), EventClass::Normal);
        assert_eq!(EventClass::classify(0.45), EventClass::Quiet);
        assert_eq!(EventClass::classify(0.999), EventClass::Quiet);
    }

    #[test]
    fn medium_event_exact_draws() {
        // class, amount, delay
        let mut rolls = ScriptedRolls::new([0.10, 0.5, 0.5]);
        let event = next_event(&mut rolls);
        assert_eq!(event.class, EventClass::Medium);
        assert_eq!(event.plan, IncrementPlan::Single { amount: 15 });
        assert_eq!(event.next_delay_ms, 1_700);
        assert_eq!(rolls.consumed(), 3);
    }

    #[test]
    fn normal_event_exact_draws() {
        let mut rolls = ScriptedRolls::new([0.30, 0.0, 0.0]);
        let event = next_event(&mut rolls);
        assert_eq!(event.class, EventClass::Normal);
        assert_eq!(event.plan, IncrementPlan::Single { amount: 1 });
        assert_eq!(event.next_delay_ms, 150);
    }

    #[test]
    fn quiet_event_adds_nothing() {
        let mut rolls = ScriptedRolls::new([0.9, 0.999_999]);
        let event = next_event(&mut rolls);
        assert_eq!(event.class, EventClass::Quiet);
        assert_eq!(event.plan, IncrementPlan::None);
        assert_eq!(event.next_delay_ms, 1_999);
        assert_eq!(rolls.consumed(), 2);
    }

    #[test]
    fn burst_exact_draws() {
        // class, total=80, chunks=3, then (gap, share) x2, gap, cooldown
        let mut rolls = ScriptedRolls::new([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let event = next_event(&mut rolls);
        assert_eq!(event.class, EventClass::Burst);
        let IncrementPlan::Chunks { total, chunks } = &event.plan else {
            panic!("expected chunks, got {:?}", event.plan);
        };
        assert_eq!(*total, 80);
        assert_eq!(
            chunks,
            &vec![
                Chunk { at_ms: 40, amount: 12 },
                Chunk { at_ms: 80, amount: 10 },
                Chunk { at_ms: 120, amount: 58 },
            ]
        );
        assert_eq!(event.next_delay_ms, 120 + 3_000);
        assert_eq!(rolls.consumed(), 9);
    }

    #[test]
    fn first_delay_range() {
        assert_eq!(first_delay(&mut ScriptedRolls::new([0.0])), 200);
        assert_eq!(first_delay(&mut ScriptedRolls::new([0.999_999])), 999);
    }

    proptest! {
        #[test]
        fn burst_chunks_conserve_total(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let (plan, delay) = burst(&mut rng);
            let IncrementPlan::Chunks { total, chunks } = &plan else {
                panic!("burst always yields chunks");
            };
            prop_assert!((80..=449).contains(total));
            prop_assert!((3..=6).contains(&chunks.len()));
            prop_assert_eq!(plan.total(), *total);

            let mut prev_at = 0;
            for chunk in chunks {
                prop_assert!(chunk.at_ms >= prev_at + 40 && chunk.at_ms <= prev_at + 169);
                prev_at = chunk.at_ms;
            }
            prop_assert!(delay >= prev_at + 3_000 && delay <= prev_at + 11_999);
        }

        #[test]
        fn events_stay_in_range(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..64 {
                let event = next_event(&mut rng);
                let added = event.plan.total();
                match event.class {
                    EventClass::Burst => prop_assert!((80..=449).contains(&added)),
                    EventClass::Medium => {
                        prop_assert!((4..=25).contains(&added));
                        prop_assert!((600..=2_799).contains(&event.next_delay_ms));
                    }
                    EventClass::Normal => {
                        prop_assert!((1..=3).contains(&added));
                        prop_assert!((150..=1_049).contains(&event.next_delay_ms));
                    }
                    EventClass::Quiet => {
                        prop_assert_eq!(added, 0);
                        prop_assert!((400..=1_999).contains(&event.next_delay_ms));
                    }
                }
            }
        }
    }
}
