// Browser timer adapter for readyship components
// Developed by The ReadyShip Team (c)2025

use std::time::Duration;

use leptos::prelude::*;
use readyship::machine::{Choreography, Ctx, Snapshot, Stage};
use readyship::rolls::RollSource;

/// `Math.random()` as a roll source.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserRolls;

impl RollSource for BrowserRolls {
    fn roll(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

pub fn wall_clock_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// Log configuration failures to the browser console and drop the section.
pub fn or_log<T>(section: &str, result: readyship::Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            web_sys::console::error_1(&format!("[readyship] {section}: {e}").into());
            None
        }
    }
}

/// A component mounted into the current reactive owner.
///
/// One browser timeout is armed at the stage's next deadline; when it fires
/// the stage catches up to the wall clock, publishes its view and re-arms.
/// Disposing the owner clears the timeout and tears the stage down.
pub struct Mounted<C: Choreography + Snapshot + 'static> {
    stage: StoredValue<Stage<C>, LocalStorage>,
    timeout: StoredValue<Option<TimeoutHandle>>,
    view: RwSignal<C::View>,
    origin_ms: f64,
}

impl<C: Choreography + Snapshot + 'static> Clone for Mounted<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: Choreography + Snapshot + 'static> Copy for Mounted<C> {}

pub fn mount<C: Choreography + Snapshot + 'static>(component: C) -> Mounted<C> {
    let stage = Stage::mount(component, 0);
    let mounted = Mounted {
        view: RwSignal::new(stage.component().view(0)),
        stage: StoredValue::new_local(stage),
        timeout: StoredValue::new(None),
        origin_ms: js_sys::Date::now(),
    };
    mounted.arm();
    on_cleanup(move || mounted.unmount());
    mounted
}

impl<C: Choreography + Snapshot + 'static> Mounted<C> {
    pub fn view(&self) -> ReadSignal<C::View> {
        self.view.read_only()
    }

    /// Route a click to the component, then re-arm for whatever it scheduled.
    pub fn interact<R>(self, input: impl FnOnce(&mut C, &mut Ctx<'_, C::Event>) -> R) -> Option<R> {
        let now = self.elapsed();
        let (out, view) = self.stage.try_update_value(|stage| {
            stage.advance_to(now);
            let out = stage.interact(input);
            (out, stage.component().view(stage.now()))
        })?;
        self.view.try_set(view);
        self.arm();
        out
    }

    fn elapsed(&self) -> u64 {
        (js_sys::Date::now() - self.origin_ms).max(0.0) as u64
    }

    fn arm(self) {
        self.clear_timeout();
        let Some(deadline) = self.stage.try_with_value(|s| s.next_deadline()).flatten() else {
            return;
        };
        let wait = deadline.saturating_sub(self.elapsed());
        match set_timeout_with_handle(move || self.tick(), Duration::from_millis(wait)) {
            Ok(handle) => {
                self.timeout.try_set_value(Some(handle));
            }
            Err(_) => web_sys::console::warn_1(&"[readyship] failed to arm timer".into()),
        }
    }

    fn tick(self) {
        let now = self.elapsed();
        let Some(view) = self.stage.try_update_value(|stage| {
            stage.advance_to(now);
            stage.component().view(stage.now())
        }) else {
            // owner already disposed
            return;
        };
        self.view.try_set(view);
        self.arm();
    }

    fn clear_timeout(self) {
        if let Some(Some(handle)) = self.timeout.try_update_value(Option::take) {
            handle.clear();
        }
    }

    fn unmount(self) {
        self.clear_timeout();
        self.stage.try_update_value(|stage| {
            stage.teardown();
        });
    }
}
