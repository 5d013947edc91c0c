//! Cycling carousel: one display item at a time, advanced on a hold/fade
//! schedule.
//!
//! Used by the action alerts stack, the analytics dashboard and the hero
//! phrase rotator. Secondary visuals (dimmed older rows, progress dots) are
//! derived from `active_index` on demand and never stored.

use std::collections::VecDeque;

use serde::Serialize;
use tracing::debug;

use crate::display::Sequence;
use crate::machine::{Choreography, Ctx, Snapshot};
use crate::phase::{Delay, Phase, PhaseEvent, PhaseStep, PhaseTimer};
use crate::timer::TimerId;

const LOG_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    Phase(PhaseEvent),
    Reveal,
}

/// A recorded phase change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub at: u64,
    /// Active index after the change.
    pub index: usize,
    pub from: Phase,
    pub to: Phase,
}

/// Ring buffer of the most recent phase changes.
#[derive(Debug, Clone)]
pub struct TransitionLog {
    entries: VecDeque<Transition>,
    total: u64,
}

impl Default for TransitionLog {
    fn default() -> Self {
        Self {
            entries: VecDeque::with_capacity(LOG_CAPACITY),
            total: 0,
        }
    }
}

impl TransitionLog {
    fn record(&mut self, transition: Transition) {
        if self.entries.len() == LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(transition);
        self.total += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&Transition> {
        self.entries.back()
    }

    /// Changes recorded since mount, including ones evicted from the buffer.
    pub fn total(&self) -> u64 {
        self.total
    }
}

/// Older rows carried in [`CarouselView`].
pub const VIEW_DEPTH: usize = 2;

/// A dimmed row for an item shown before the active one.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentRow<'a, T> {
    pub index: usize,
    pub item: &'a T,
    pub opacity: f32,
}

/// A dimmed row as published in [`CarouselView`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OlderRow {
    pub index: usize,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dot {
    pub index: usize,
    pub active: bool,
}

/// Render-facing state of a carousel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselView {
    pub active_index: usize,
    pub phase: Phase,
    pub revealed: bool,
    /// The two previous items, most recent first.
    pub older: Vec<OlderRow>,
    pub dots: Vec<Dot>,
}

pub struct CyclingCarousel<T> {
    name: String,
    items: Sequence<T>,
    active: usize,
    timer: PhaseTimer,
    reveal_delay_ms: Option<u64>,
    reveal_when: fn(&T) -> bool,
    revealed: bool,
    reveal_pending: Option<TimerId>,
    log: TransitionLog,
}

impl<T: std::fmt::Debug> std::fmt::Debug for CyclingCarousel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CyclingCarousel")
            .field("name", &self.name)
            .field("active", &self.active)
            .field("timer", &self.timer)
            .field("revealed", &self.revealed)
            .finish_non_exhaustive()
    }
}

impl<T> CyclingCarousel<T> {
    /// Carousel with fixed hold and fade durations.
    pub fn new(name: impl Into<String>, items: Sequence<T>, hold_ms: u64, fade_ms: u64) -> Self {
        Self::with_timer(name, items, PhaseTimer::fixed(hold_ms, fade_ms))
    }

    pub fn with_timer(name: impl Into<String>, items: Sequence<T>, timer: PhaseTimer) -> Self {
        Self {
            name: name.into(),
            items,
            active: 0,
            timer,
            reveal_delay_ms: None,
            reveal_when: |_| false,
            revealed: false,
            reveal_pending: None,
            log: TransitionLog::default(),
        }
    }

    /// Turn on [`revealed`](Self::revealed) `delay_ms` after an item matching
    /// `when` becomes visible.
    pub fn with_reveal(mut self, delay_ms: u64, when: fn(&T) -> bool) -> Self {
        self.reveal_delay_ms = Some(delay_ms);
        self.reveal_when = when;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hold(&self) -> Delay {
        self.timer.hold()
    }

    pub fn fade(&self) -> Delay {
        self.timer.fade()
    }

    pub fn items(&self) -> &Sequence<T> {
        &self.items
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &T {
        self.items.get(self.active)
    }

    pub fn phase(&self) -> Phase {
        self.timer.phase()
    }

    pub fn is_visible(&self) -> bool {
        self.timer.phase() == Phase::Visible
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub fn log(&self) -> &TransitionLog {
        &self.log
    }

    /// Force one advance cycle without touching timers.
    pub fn advance(&mut self) {
        self.active = self.items.next(self.active);
        self.revealed = false;
    }

    /// Up to `depth` previous items, most recent first, fading out.
    pub fn recent(&self, depth: usize) -> Vec<RecentRow<'_, T>> {
        let depth = depth.min(self.items.len() - 1);
        (1..=depth)
            .map(|k| {
                let index = self.items.back(self.active, k);
                RecentRow {
                    index,
                    item: self.items.get(index),
                    opacity: 0.4 / k as f32,
                }
            })
            .collect()
    }

    pub fn dots(&self) -> Vec<Dot> {
        (0..self.items.len())
            .map(|index| Dot {
                index,
                active: index == self.active,
            })
            .collect()
    }

    fn record(&mut self, at: u64, from: Phase, to: Phase) {
        self.log.record(Transition {
            at,
            index: self.active,
            from,
            to,
        });
    }

    fn arm_reveal(&mut self, ctx: &mut Ctx<'_, CarouselEvent>) {
        let Some(delay) = self.reveal_delay_ms else {
            return;
        };
        if (self.reveal_when)(self.items.get(self.active)) {
            self.reveal_pending = Some(ctx.schedule(delay, CarouselEvent::Reveal));
        }
    }

    fn cancel_reveal(&mut self, ctx: &mut Ctx<'_, CarouselEvent>) {
        if let Some(id) = self.reveal_pending.take() {
            ctx.cancel(id);
        }
    }
}

impl<T> Choreography for CyclingCarousel<T> {
    type Event = CarouselEvent;

    fn start(&mut self, ctx: &mut Ctx<'_, CarouselEvent>) {
        self.active = 0;
        self.revealed = false;
        self.timer.start(ctx, CarouselEvent::Phase);
        self.arm_reveal(ctx);
    }

    fn on_timer(&mut self, event: CarouselEvent, ctx: &mut Ctx<'_, CarouselEvent>) {
        let at = ctx.now();
        match event {
            CarouselEvent::Phase(phase_event) => {
                match self.timer.fire(phase_event, ctx, CarouselEvent::Phase) {
                    Some(PhaseStep::FadeOut) => {
                        self.cancel_reveal(ctx);
                        self.record(at, Phase::Visible, Phase::FadingOut);
                    }
                    Some(PhaseStep::Advance) => {
                        self.record(at, Phase::FadingOut, Phase::Advancing);
                        self.advance();
                        self.timer.settle(ctx, CarouselEvent::Phase);
                        self.record(at, Phase::Advancing, Phase::Visible);
                        self.arm_reveal(ctx);
                        debug!(carousel = %self.name, at, index = self.active, "advanced");
                    }
                    None => {}
                }
            }
            CarouselEvent::Reveal => {
                self.reveal_pending = None;
                if self.is_visible() {
                    self.revealed = true;
                }
            }
        }
    }
}

impl<T> Snapshot for CyclingCarousel<T> {
    type View = CarouselView;

    fn view(&self, _now: u64) -> CarouselView {
        CarouselView {
            active_index: self.active,
            phase: self.phase(),
            revealed: self.revealed,
            older: self
                .recent(VIEW_DEPTH)
                .iter()
                .map(|row| OlderRow {
                    index: row.index,
                    opacity: row.opacity,
                })
                .collect(),
            dots: self.dots(),
        }
    }
}
