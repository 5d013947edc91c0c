//! Phase timer: the leaf of every fading carousel.
//!
//! One cycle is `Visible --hold--> FadingOut --fade--> Advancing -> Visible`.
//! `Advancing` is momentary: the owner bumps its index while the timer sits
//! there and then calls [`PhaseTimer::settle`], so it is never the resting
//! phase between two timer callbacks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::machine::Ctx;
use crate::rolls::RollSource;
use crate::timer::TimerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Visible,
    FadingOut,
    Advancing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Visible => "visible",
            Phase::FadingOut => "fading-out",
            Phase::Advancing => "advancing",
        };
        f.write_str(label)
    }
}

/// A fixed or uniformly randomized delay in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Delay {
    Fixed(u64),
    Between { min: u64, max: u64 },
}

impl Delay {
    pub fn sample(&self, rolls: &mut dyn RollSource) -> u64 {
        match *self {
            Delay::Fixed(ms) => ms,
            Delay::Between { min, max } => rolls.between(min, max),
        }
    }

    /// Shortest delay this can produce.
    pub fn lower_bound(&self) -> u64 {
        match *self {
            Delay::Fixed(ms) => ms,
            Delay::Between { min, max } => min.min(max),
        }
    }

    /// The same delay with every draw raised to at least `floor_ms`.
    pub fn at_least(self, floor_ms: u64) -> Delay {
        match self {
            Delay::Fixed(ms) => Delay::Fixed(ms.max(floor_ms)),
            Delay::Between { min, max } => Delay::Between {
                min: min.max(floor_ms),
                max: max.max(floor_ms),
            },
        }
    }
}

impl fmt::Display for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Delay::Fixed(ms) => write!(f, "{ms}ms"),
            Delay::Between { min, max } => write!(f, "{min}-{max}ms"),
        }
    }
}

impl From<u64> for Delay {
    fn from(ms: u64) -> Self {
        Delay::Fixed(ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    HoldElapsed,
    FadeElapsed,
}

/// What the owner must do after [`PhaseTimer::fire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStep {
    /// The hold ran out; the active item starts fading.
    FadeOut,
    /// The fade finished; advance the index, then call `settle`.
    Advance,
}

/// Shortest hold a [`PhaseTimer`] accepts.
pub const MIN_HOLD_MS: u64 = 1;

pub struct PhaseTimer {
    hold: Delay,
    fade: Delay,
    phase: Phase,
    pending: Option<TimerId>,
    rolls: Box<dyn RollSource + Send>,
}

impl fmt::Debug for PhaseTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseTimer")
            .field("hold", &self.hold)
            .field("fade", &self.fade)
            .field("phase", &self.phase)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl PhaseTimer {
    /// Randomized delays draw from `rolls`; fixed ones never touch it.
    ///
    /// The hold is raised to at least [`MIN_HOLD_MS`] so every cycle moves
    /// the clock forward; the fade may be zero.
    pub fn new(hold: Delay, fade: Delay, rolls: Box<dyn RollSource + Send>) -> Self {
        Self {
            hold: hold.at_least(MIN_HOLD_MS),
            fade,
            phase: Phase::Visible,
            pending: None,
            rolls,
        }
    }

    pub fn fixed(hold_ms: u64, fade_ms: u64) -> Self {
        Self::new(
            Delay::Fixed(hold_ms),
            Delay::Fixed(fade_ms),
            Box::new(crate::rolls::ScriptedRolls::new([0.0])),
        )
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hold(&self) -> Delay {
        self.hold
    }

    pub fn fade(&self) -> Delay {
        self.fade
    }

    /// Enter `Visible` and schedule the hold timer.
    pub fn start<E>(&mut self, ctx: &mut Ctx<'_, E>, into: fn(PhaseEvent) -> E) {
        self.stop(ctx);
        self.phase = Phase::Visible;
        self.arm(PhaseEvent::HoldElapsed, ctx, into);
    }

    /// React to one of our own timers. Stale events (which cannot occur while
    /// a single timer is outstanding) are ignored and yield `None`.
    pub fn fire<E>(
        &mut self,
        event: PhaseEvent,
        ctx: &mut Ctx<'_, E>,
        into: fn(PhaseEvent) -> E,
    ) -> Option<PhaseStep> {
        match (self.phase, event) {
            (Phase::Visible, PhaseEvent::HoldElapsed) => {
                self.pending = None;
                self.phase = Phase::FadingOut;
                self.arm(PhaseEvent::FadeElapsed, ctx, into);
                Some(PhaseStep::FadeOut)
            }
            (Phase::FadingOut, PhaseEvent::FadeElapsed) => {
                self.pending = None;
                self.phase = Phase::Advancing;
                Some(PhaseStep::Advance)
            }
            _ => None,
        }
    }

    /// Leave `Advancing` and start holding the next item.
    pub fn settle<E>(&mut self, ctx: &mut Ctx<'_, E>, into: fn(PhaseEvent) -> E) {
        debug_assert_eq!(self.phase, Phase::Advancing);
        self.phase = Phase::Visible;
        self.arm(PhaseEvent::HoldElapsed, ctx, into);
    }

    /// Cancel the outstanding timer, if any.
    pub fn stop<E>(&mut self, ctx: &mut Ctx<'_, E>) {
        if let Some(id) = self.pending.take() {
            ctx.cancel(id);
        }
    }

    fn arm<E>(&mut self, event: PhaseEvent, ctx: &mut Ctx<'_, E>, into: fn(PhaseEvent) -> E) {
        let delay = match event {
            PhaseEvent::HoldElapsed => self.hold.sample(&mut *self.rolls),
            PhaseEvent::FadeElapsed => self.fade.sample(&mut *self.rolls),
        };
        self.pending = Some(ctx.schedule(delay, into(event)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rolls::ScriptedRolls;
    use crate::timer::PendingTimers;

    fn id(event: PhaseEvent) -> PhaseEvent {
        event
    }

    #[test]
    fn full_cycle_passes_through_every_phase() {
        let mut timers = PendingTimers::new();
        let mut timer = PhaseTimer::fixed(3_000, 500);
        timer.start(&mut Ctx::new(0, &mut timers), id);
        assert_eq!(timer.phase(), Phase::Visible);

        let (at, _, event) = timers.pop_due(u64::MAX).expect("hold timer");
        assert_eq!(at, 3_000);
        let step = timer.fire(event, &mut Ctx::new(at, &mut timers), id);
        assert_eq!(step, Some(PhaseStep::FadeOut));
        assert_eq!(timer.phase(), Phase::FadingOut);

        let (at, _, event) = timers.pop_due(u64::MAX).expect("fade timer");
        assert_eq!(at, 3_500);
        let step = timer.fire(event, &mut Ctx::new(at, &mut timers), id);
        assert_eq!(step, Some(PhaseStep::Advance));
        assert_eq!(timer.phase(), Phase::Advancing);
        assert!(timers.is_empty());

        timer.settle(&mut Ctx::new(at, &mut timers), id);
        assert_eq!(timer.phase(), Phase::Visible);
        assert_eq!(timers.next_deadline(), Some(6_500));
    }

    #[test]
    fn stale_event_is_ignored() {
        let mut timers = PendingTimers::new();
        let mut timer = PhaseTimer::fixed(100, 100);
        timer.start(&mut Ctx::new(0, &mut timers), id);
        let step = timer.fire(PhaseEvent::FadeElapsed, &mut Ctx::new(0, &mut timers), id);
        assert_eq!(step, None);
        assert_eq!(timer.phase(), Phase::Visible);

        // the hold timer is still ours to cancel
        timer.stop(&mut Ctx::new(0, &mut timers));
        assert!(timers.is_empty());
    }

    #[test]
    fn zero_hold_is_raised_to_the_minimum() {
        let mut timers = PendingTimers::new();
        let mut timer = PhaseTimer::fixed(0, 0);
        assert_eq!(timer.hold(), Delay::Fixed(MIN_HOLD_MS));
        timer.start(&mut Ctx::new(0, &mut timers), id);
        assert_eq!(timers.next_deadline(), Some(MIN_HOLD_MS));

        let ranged = PhaseTimer::new(
            Delay::Between { min: 0, max: 40 },
            Delay::Fixed(0),
            Box::new(ScriptedRolls::new([0.0])),
        );
        assert_eq!(ranged.hold(), Delay::Between { min: 1, max: 40 });
        assert_eq!(ranged.hold().lower_bound(), 1);
    }

    #[test]
    fn randomized_delays_stay_in_range() {
        let mut timers = PendingTimers::new();
        let mut timer = PhaseTimer::new(
            Delay::Between { min: 1_000, max: 1_999 },
            Delay::Fixed(0),
            Box::new(ScriptedRolls::new([0.5])),
        );
        timer.start(&mut Ctx::new(0, &mut timers), id);
        assert_eq!(timers.next_deadline(), Some(1_500));
    }

    #[test]
    fn delay_parses_from_toml_shapes() {
        #[derive(serde::Deserialize)]
        struct Holder {
            fixed: Delay,
            range: Delay,
        }
        let parsed: Holder = toml::from_str("fixed = 250\nrange = { min = 1, max = 9 }\n")
            .expect("valid delays");
        assert_eq!(parsed.fixed, Delay::Fixed(250));
        assert_eq!(parsed.range, Delay::Between { min: 1, max: 9 });
        assert_eq!(parsed.range.lower_bound(), 1);
    }
}
