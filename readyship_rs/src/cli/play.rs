//! Running a component for a fixed horizon, either on the fake clock
//! (`--instant`) or in real time through the tokio driver.

use std::str::FromStr;
use std::time::Duration;

use tokio::time::Instant;

use crate::driver;
use crate::machine::{Choreography, Ctx, Snapshot, Stage};

/// A click on feature `index` at `at_ms`, written `INDEX@MS` on the
/// command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickAt {
    pub index: usize,
    pub at_ms: u64,
}

impl FromStr for ClickAt {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (index, at_ms) = s
            .split_once('@')
            .ok_or_else(|| format!("expected INDEX@MS, got `{s}`"))?;
        Ok(Self {
            index: index
                .trim()
                .parse()
                .map_err(|e| format!("bad index `{index}`: {e}"))?,
            at_ms: at_ms
                .trim()
                .parse()
                .map_err(|e| format!("bad time `{at_ms}`: {e}"))?,
        })
    }
}

pub type OnClick<C> = fn(&mut C, usize, &mut Ctx<'_, <C as Choreography>::Event>);

/// What to run and how long for.
pub struct Play<C: Choreography> {
    pub horizon_ms: u64,
    pub clicks: Vec<ClickAt>,
    pub on_click: OnClick<C>,
}

impl<C: Choreography> Play<C> {
    pub fn new(horizon_ms: u64, on_click: OnClick<C>) -> Self {
        Self {
            horizon_ms,
            clicks: Vec::new(),
            on_click,
        }
    }

    pub fn with_clicks(mut self, mut clicks: Vec<ClickAt>) -> Self {
        clicks.sort_by_key(|c| c.at_ms);
        self.clicks = clicks;
        self
    }
}

/// Component types that ignore clicks.
pub fn no_clicks<C: Choreography>(_: &mut C, _: usize, _: &mut Ctx<'_, C::Event>) {}

/// Step the fake clock from deadline to deadline up to the horizon, calling
/// `observe` after every step with the previous and current view.
pub fn simulate<C, F>(component: C, play: Play<C>, mut observe: F) -> anyhow::Result<C>
where
    C: Choreography + Snapshot,
    F: FnMut(u64, &C::View, &C::View) -> anyhow::Result<()>,
{
    let mut stage = Stage::mount(component, 0);
    let mut prev = stage.component().view(0);
    let mut clicks = play.clicks.iter().peekable();

    loop {
        let timer = stage.next_deadline().filter(|at| *at <= play.horizon_ms);
        let click = clicks.peek().filter(|c| c.at_ms <= play.horizon_ms).copied();
        match (timer, click) {
            (None, None) => break,
            (timer, Some(click)) if timer.is_none_or(|at| click.at_ms < at) => {
                clicks.next();
                stage.advance_to(click.at_ms);
                stage.interact(|c, ctx| (play.on_click)(c, click.index, ctx));
            }
            (Some(at), _) => {
                stage.advance_to(at);
            }
            (None, Some(_)) => break,
        }
        let view = stage.component().view(stage.now());
        observe(stage.now(), &prev, &view)?;
        prev = view;
    }

    stage.advance_to(play.horizon_ms);
    stage.teardown();
    Ok(stage.into_component())
}

/// Run the component in real time for the horizon and tear it down.
pub async fn drive<C, F>(component: C, play: Play<C>, mut observe: F) -> anyhow::Result<C>
where
    C: Choreography + Snapshot + Send + 'static,
    C::Event: Send,
    F: FnMut(u64, &C::View, &C::View) -> anyhow::Result<()>,
{
    let handle = driver::spawn(component);
    let mut frames = handle.subscribe();
    let mut prev = frames.borrow_and_update().view.clone();

    let started = Instant::now();
    let end = started + Duration::from_millis(play.horizon_ms);
    let on_click = play.on_click;
    let mut clicks = play
        .clicks
        .into_iter()
        .filter(|c| c.at_ms <= play.horizon_ms)
        .peekable();

    loop {
        let next_click = clicks
            .peek()
            .map(|c| started + Duration::from_millis(c.at_ms));
        tokio::select! {
            _ = tokio::time::sleep_until(end) => break,
            _ = tokio::time::sleep_until(next_click.unwrap_or(end)), if next_click.is_some() => {
                if let Some(click) = clicks.next() {
                    handle.interact(move |c, ctx| on_click(c, click.index, ctx));
                }
            }
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }
                let frame = frames.borrow_and_update().clone();
                observe(frame.at_ms, &prev, &frame.view)?;
                prev = frame.view;
            }
        }
    }

    let report = handle.teardown().await?;
    Ok(report.component)
}
