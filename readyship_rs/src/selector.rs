//! Feature selector: a carousel the visitor can take over.
//!
//! The ReadyShipper and ReadyReturns sections list four features next to a
//! panel. The panel auto-advances on a fixed interval while a progress bar
//! fills under the active feature. Clicking a feature pins it and stops the
//! rotation; clicking the pinned feature again resumes it.

use serde::Serialize;
use tracing::{debug, warn};

use crate::display::Sequence;
use crate::machine::{Choreography, Ctx, Snapshot};
use crate::phase::MIN_HOLD_MS;
use crate::timer::TimerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorEvent {
    Advance,
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Click {
    /// Auto-cycle stopped and `index` is now active.
    Pinned { index: usize },
    /// Auto-cycle resumed on the already active item.
    Resumed { index: usize },
    /// Index out of range.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectorView {
    pub active_index: usize,
    pub auto_cycle: bool,
    /// Fill of the progress bar in `[0, 1]`.
    pub progress: f32,
    /// Bumped on every progress reset so a render surface can restart its
    /// fill animation.
    pub progress_epoch: u64,
    pub hold_ms: u64,
}

#[derive(Debug)]
pub struct FeatureSelector<T> {
    name: String,
    items: Sequence<T>,
    active: usize,
    auto_cycle: bool,
    hold_ms: u64,
    progress_from: u64,
    progress_epoch: u64,
    pending: Option<TimerId>,
}

impl<T> FeatureSelector<T> {
    /// `hold_ms` below [`MIN_HOLD_MS`] is raised to it.
    pub fn new(name: impl Into<String>, items: Sequence<T>, hold_ms: u64) -> Self {
        let hold_ms = hold_ms.max(MIN_HOLD_MS);
        Self {
            name: name.into(),
            items,
            active: 0,
            auto_cycle: true,
            hold_ms,
            progress_from: 0,
            progress_epoch: 0,
            pending: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
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

    pub fn auto_cycle(&self) -> bool {
        self.auto_cycle
    }

    pub fn hold_ms(&self) -> u64 {
        self.hold_ms
    }

    /// Progress bar fill at `now`: linear from the last reset, reaching 1.0
    /// exactly when the next automatic advance is due, then holding there.
    pub fn progress(&self, now: u64) -> f32 {
        let elapsed = now.saturating_sub(self.progress_from);
        (elapsed as f64 / self.hold_ms as f64).min(1.0) as f32
    }

    /// Handle a click on feature `index`.
    pub fn click(&mut self, index: usize, ctx: &mut Ctx<'_, SelectorEvent>) -> Click {
        if index >= self.items.len() {
            warn!(selector = %self.name, index, len = self.items.len(), "click outside feature list");
            return Click::Ignored;
        }

        if index == self.active && !self.auto_cycle {
            self.auto_cycle = true;
            self.reset_progress(ctx.now());
            self.arm(ctx);
            debug!(selector = %self.name, index, "auto-cycle resumed");
            return Click::Resumed { index };
        }

        if let Some(id) = self.pending.take() {
            ctx.cancel(id);
        }
        self.active = index;
        self.auto_cycle = false;
        self.reset_progress(ctx.now());
        debug!(selector = %self.name, index, "feature pinned");
        Click::Pinned { index }
    }

    fn reset_progress(&mut self, now: u64) {
        self.progress_from = now;
        self.progress_epoch += 1;
    }

    fn arm(&mut self, ctx: &mut Ctx<'_, SelectorEvent>) {
        if let Some(id) = self.pending.take() {
            ctx.cancel(id);
        }
        self.pending = Some(ctx.schedule(self.hold_ms, SelectorEvent::Advance));
    }
}

impl<T> Choreography for FeatureSelector<T> {
    type Event = SelectorEvent;

    fn start(&mut self, ctx: &mut Ctx<'_, SelectorEvent>) {
        self.active = 0;
        self.auto_cycle = true;
        self.reset_progress(ctx.now());
        self.arm(ctx);
    }

    fn on_timer(&mut self, event: SelectorEvent, ctx: &mut Ctx<'_, SelectorEvent>) {
        match event {
            SelectorEvent::Advance => {
                self.pending = None;
                if !self.auto_cycle {
                    return;
                }
                self.active = self.items.next(self.active);
                self.reset_progress(ctx.now());
                self.arm(ctx);
            }
        }
    }
}

impl<T> Snapshot for FeatureSelector<T> {
    type View = SelectorView;

    fn view(&self, now: u64) -> SelectorView {
        SelectorView {
            active_index: self.active,
            auto_cycle: self.auto_cycle,
            progress: self.progress(now),
            progress_epoch: self.progress_epoch,
            hold_ms: self.hold_ms,
        }
    }
}

/// State of one step in a shipment pipeline graphic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Done,
    Current,
    Pending,
}

pub fn pipeline(len: usize, active: usize) -> Vec<StepState> {
    (0..len)
        .map(|i| match i.cmp(&active) {
            std::cmp::Ordering::Less => StepState::Done,
            std::cmp::Ordering::Equal => StepState::Current,
            std::cmp::Ordering::Greater => StepState::Pending,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Stage;

    fn selector() -> Stage<FeatureSelector<&'static str>> {
        Stage::mount(
            FeatureSelector::new("shipper", Sequence::of("a", ["b", "c", "d"]), 3_000),
            0,
        )
    }

    #[test]
    fn auto_cycles_on_interval() {
        let mut stage = selector();
        stage.advance_to(2_999);
        assert_eq!(stage.component().active_index(), 0);
        stage.advance_to(3_000);
        assert_eq!(stage.component().active_index(), 1);
        stage.advance_to(12_000);
        assert_eq!(stage.component().active_index(), 0);
    }

    #[test]
    fn clicking_another_item_pins_it() {
        let mut stage = selector();
        stage.advance_to(1_000);
        let click = stage.interact(|s, ctx| s.click(2, ctx));
        assert_eq!(click, Some(Click::Pinned { index: 2 }));
        assert_eq!(stage.component().active_index(), 2);
        assert!(!stage.component().auto_cycle());
        assert_eq!(stage.pending(), 0);

        stage.advance_to(60_000);
        assert_eq!(stage.component().active_index(), 2);
    }

    #[test]
    fn clicking_pinned_item_resumes() {
        let mut stage = selector();
        stage.interact(|s, ctx| s.click(3, ctx));
        stage.advance_to(5_000);

        let click = stage.interact(|s, ctx| s.click(3, ctx));
        assert_eq!(click, Some(Click::Resumed { index: 3 }));
        assert!(stage.component().auto_cycle());
        assert_eq!(stage.component().active_index(), 3);
        assert_eq!(stage.component().progress(5_000), 0.0);

        // the interval restarts from the resume click
        stage.advance_to(7_999);
        assert_eq!(stage.component().active_index(), 3);
        stage.advance_to(8_000);
        assert_eq!(stage.component().active_index(), 0);
    }

    #[test]
    fn clicking_active_item_while_cycling_pins_it() {
        let mut stage = selector();
        stage.advance_to(500);
        let click = stage.interact(|s, ctx| s.click(0, ctx));
        assert_eq!(click, Some(Click::Pinned { index: 0 }));
        assert!(!stage.component().auto_cycle());
        stage.advance_to(10_000);
        assert_eq!(stage.component().active_index(), 0);
    }

    #[test]
    fn out_of_range_click_is_ignored() {
        let mut stage = selector();
        let click = stage.interact(|s, ctx| s.click(9, ctx));
        assert_eq!(click, Some(Click::Ignored));
        assert!(stage.component().auto_cycle());
        assert_eq!(stage.pending(), 1);
    }

    #[test]
    fn progress_fills_linearly_and_resets_on_advance() {
        let mut stage = selector();
        let s = stage.component();
        assert_eq!(s.progress(0), 0.0);
        assert!((s.progress(1_500) - 0.5).abs() < 1e-6);
        assert_eq!(s.progress(3_000), 1.0);

        stage.advance_to(3_000);
        let view = stage.component().view(3_000);
        assert_eq!(view.active_index, 1);
        assert_eq!(view.progress, 0.0);
        assert_eq!(view.progress_epoch, 2);
    }

    #[test]
    fn progress_is_full_before_every_auto_advance() {
        let mut stage = selector();
        for _ in 0..8 {
            let due = stage.next_deadline().expect("auto-cycle armed");
            assert_eq!(stage.component().progress(due), 1.0);
            stage.advance_to(due);
        }
    }

    #[test]
    fn pinned_progress_stays_full() {
        let mut stage = selector();
        stage.interact(|s, ctx| s.click(1, ctx));
        stage.advance_to(9_000);
        assert_eq!(stage.component().progress(9_000), 1.0);
    }

    #[test]
    fn zero_interval_still_moves_the_clock() {
        let mut stage = Stage::mount(FeatureSelector::new("z", Sequence::of(1, [2]), 0), 0);
        assert_eq!(stage.component().hold_ms(), MIN_HOLD_MS);
        assert_eq!(stage.advance_to(10), 10);
        assert_eq!(stage.component().active_index(), 0);
    }

    #[test]
    fn teardown_cancels_interval() {
        let mut stage = selector();
        stage.advance_to(100);
        assert_eq!(stage.teardown(), 1);
        stage.advance_to(100_000);
        assert_eq!(stage.component().active_index(), 0);
        assert!(stage.interact(|s, ctx| s.click(1, ctx)).is_none());
    }

    #[test]
    fn pipeline_marks_done_current_pending() {
        assert_eq!(
            pipeline(4, 1),
            vec![
                StepState::Done,
                StepState::Current,
                StepState::Pending,
                StepState::Pending
            ]
        );
        assert_eq!(pipeline(2, 5), vec![StepState::Done, StepState::Done]);
    }
}
