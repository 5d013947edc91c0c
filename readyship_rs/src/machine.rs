//! Timed state machines and the fake-clock stage that drives them.
//!
//! A component implements [`Choreography`]: pure transition logic that only
//! touches the world through a [`Ctx`] (read the clock, schedule or cancel
//! its own timers). A [`Stage`] owns one mounted component plus its pending
//! timers and fires them as time is advanced. The tokio driver and the
//! Leptos adapter are both thin loops around a `Stage`.

use tracing::{debug, trace};

use crate::timer::{PendingTimers, TimerId};

/// Timer context handed to a component while it reacts to an event.
pub struct Ctx<'a, E> {
    now: u64,
    timers: &'a mut PendingTimers<E>,
}

impl<'a, E> Ctx<'a, E> {
    pub fn new(now: u64, timers: &'a mut PendingTimers<E>) -> Self {
        Self { now, timers }
    }

    /// Milliseconds on the stage clock.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn schedule(&mut self, delay_ms: u64, event: E) -> TimerId {
        let id = self.timers.schedule(self.now, delay_ms, event);
        trace!(now = self.now, delay_ms, ?id, "timer scheduled");
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.cancel(id)
    }

    pub fn cancel_all(&mut self) -> usize {
        self.timers.cancel_all()
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }
}

/// A component whose state only changes on its own timers or on explicit
/// input routed through a [`Stage`].
pub trait Choreography {
    type Event;

    /// Called once on mount. Schedule the first timers here.
    fn start(&mut self, ctx: &mut Ctx<'_, Self::Event>);

    /// Called for every timer that fires, in deadline order.
    fn on_timer(&mut self, event: Self::Event, ctx: &mut Ctx<'_, Self::Event>);
}

/// Render-facing view of a component at a given instant.
///
/// Views are plain data derived from component state, so the same state
/// always yields the same view.
pub trait Snapshot {
    type View: Clone + Send + Sync + 'static;

    fn view(&self, now: u64) -> Self::View;
}

/// One mounted component plus the timers it owns.
pub struct Stage<C: Choreography> {
    component: C,
    timers: PendingTimers<C::Event>,
    now: u64,
    mounted: bool,
    fired: u64,
}

impl<C: Choreography> Stage<C> {
    /// Mount `component` at stage time `now` and let it schedule its first
    /// timers.
    pub fn mount(mut component: C, now: u64) -> Self {
        let mut timers = PendingTimers::new();
        component.start(&mut Ctx::new(now, &mut timers));
        debug!(now, pending = timers.len(), "component mounted");
        Self {
            component,
            timers,
            now,
            mounted: true,
            fired: 0,
        }
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Total number of timers fired since mount.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn next_deadline(&self) -> Option<u64> {
        if self.mounted {
            self.timers.next_deadline()
        } else {
            None
        }
    }

    /// Advance the stage clock to `now`, firing every timer due on the way.
    ///
    /// Each callback observes its own deadline as the current time, and
    /// timers scheduled by a callback fire in the same call if they fall due
    /// before `now`. Moving the clock backwards or advancing a torn-down
    /// stage does nothing. Returns the number of timers fired.
    pub fn advance_to(&mut self, now: u64) -> usize {
        if !self.mounted || now < self.now {
            return 0;
        }
        let mut fired = 0;
        while let Some((deadline, id, event)) = self.timers.pop_due(now) {
            self.now = deadline;
            trace!(deadline, ?id, "timer fired");
            let mut ctx = Ctx::new(deadline, &mut self.timers);
            self.component.on_timer(event, &mut ctx);
            fired += 1;
        }
        self.now = now;
        self.fired += fired as u64;
        fired
    }

    /// Route user input (a click) to the component at the current stage
    /// time. Returns `None` once the stage is torn down.
    pub fn interact<R>(
        &mut self,
        input: impl FnOnce(&mut C, &mut Ctx<'_, C::Event>) -> R,
    ) -> Option<R> {
        if !self.mounted {
            return None;
        }
        let mut ctx = Ctx::new(self.now, &mut self.timers);
        Some(input(&mut self.component, &mut ctx))
    }

    /// Cancel every pending timer and freeze the component. Idempotent;
    /// returns how many timers were cancelled by this call.
    pub fn teardown(&mut self) -> usize {
        if !self.mounted {
            return 0;
        }
        self.mounted = false;
        let cancelled = self.timers.cancel_all();
        debug!(now = self.now, cancelled, "component torn down");
        cancelled
    }

    pub fn into_component(self) -> C {
        self.component
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ticks every `period` ms and counts.
    struct Metronome {
        period: u64,
        beats: u32,
        seen_at: Vec<u64>,
    }

    impl Choreography for Metronome {
        type Event = ();

        fn start(&mut self, ctx: &mut Ctx<'_, ()>) {
            ctx.schedule(self.period, ());
        }

        fn on_timer(&mut self, _: (), ctx: &mut Ctx<'_, ()>) {
            self.beats += 1;
            self.seen_at.push(ctx.now());
            ctx.schedule(self.period, ());
        }
    }

    fn metronome(period: u64) -> Metronome {
        Metronome {
            period,
            beats: 0,
            seen_at: Vec::new(),
        }
    }

    #[test]
    fn callbacks_see_their_own_deadline() {
        let mut stage = Stage::mount(metronome(100), 0);
        assert_eq!(stage.advance_to(350), 3);
        assert_eq!(stage.component().seen_at, vec![100, 200, 300]);
        assert_eq!(stage.now(), 350);
        assert_eq!(stage.next_deadline(), Some(400));
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut stage = Stage::mount(metronome(100), 0);
        stage.advance_to(250);
        assert_eq!(stage.advance_to(120), 0);
        assert_eq!(stage.now(), 250);
        assert_eq!(stage.component().beats, 2);
    }

    #[test]
    fn teardown_stops_all_mutation() {
        let mut stage = Stage::mount(metronome(100), 0);
        stage.advance_to(200);
        assert_eq!(stage.teardown(), 1);
        assert_eq!(stage.teardown(), 0);

        assert_eq!(stage.advance_to(10_000), 0);
        assert_eq!(stage.component().beats, 2);
        assert_eq!(stage.next_deadline(), None);
        assert!(stage.interact(|m, _| m.beats += 1).is_none());
        assert_eq!(stage.component().beats, 2);
    }

    #[test]
    fn interact_schedules_on_stage_clock() {
        let mut stage = Stage::mount(metronome(1_000), 0);
        stage.advance_to(400);
        stage.interact(|_, ctx| ctx.schedule(50, ()));
        assert_eq!(stage.next_deadline(), Some(450));
    }
}
