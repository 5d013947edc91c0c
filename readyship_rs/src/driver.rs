//! Real-time driver: runs a [`Stage`] against tokio's clock.
//!
//! The task sleeps until the stage's next deadline, fires everything due and
//! publishes a fresh [`Frame`] on a watch channel. Interactions (clicks) are
//! queued to the task so the component is only ever touched from one place.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::error::Result;
use crate::machine::{Choreography, Ctx, Snapshot, Stage};

/// Idle wake-up when nothing is scheduled.
const IDLE_WAKE: Duration = Duration::from_secs(3_600);

/// A published view of the component.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<V> {
    /// Stage time of the view in milliseconds since spawn.
    pub at_ms: u64,
    /// Timers fired so far.
    pub fired: u64,
    pub view: V,
}

/// What the driver hands back after teardown.
#[derive(Debug)]
pub struct DriverReport<C> {
    pub component: C,
    pub fired: u64,
    /// Timers that were still pending and got cancelled.
    pub cancelled: usize,
    pub elapsed_ms: u64,
}

type Input<C> = Box<dyn FnOnce(&mut C, &mut Ctx<'_, <C as Choreography>::Event>) + Send>;

/// Handle for a spawned driver.
pub struct DriverHandle<C: Choreography + Snapshot> {
    shutdown: CancellationToken,
    frames: watch::Receiver<Frame<C::View>>,
    inputs: mpsc::UnboundedSender<Input<C>>,
    join_handle: JoinHandle<DriverReport<C>>,
}

impl<C> DriverHandle<C>
where
    C: Choreography + Snapshot + Send + 'static,
    C::Event: Send,
{
    pub fn subscribe(&self) -> watch::Receiver<Frame<C::View>> {
        self.frames.clone()
    }

    pub fn latest(&self) -> Frame<C::View> {
        self.frames.borrow().clone()
    }

    /// Queue an interaction. Returns false once the driver has stopped.
    pub fn interact<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut C, &mut Ctx<'_, C::Event>) + Send + 'static,
    {
        self.inputs.send(Box::new(f)).is_ok()
    }

    /// Stop the driver, cancel every pending timer and wait for the task.
    pub async fn teardown(self) -> Result<DriverReport<C>> {
        self.shutdown.cancel();
        Ok(self.join_handle.await?)
    }
}

/// Mount `component` now and drive it on a background task.
pub fn spawn<C>(component: C) -> DriverHandle<C>
where
    C: Choreography + Snapshot + Send + 'static,
    C::Event: Send,
{
    let started = Instant::now();
    let stage = Stage::mount(component, 0);
    let (frames_tx, frames_rx) = watch::channel(frame(&stage));
    let (inputs_tx, inputs_rx) = mpsc::unbounded_channel();
    let shutdown = CancellationToken::new();

    let join_handle = tokio::spawn(run(stage, started, frames_tx, inputs_rx, shutdown.clone()));

    DriverHandle {
        shutdown,
        frames: frames_rx,
        inputs: inputs_tx,
        join_handle,
    }
}

fn frame<C: Choreography + Snapshot>(stage: &Stage<C>) -> Frame<C::View> {
    Frame {
        at_ms: stage.now(),
        fired: stage.fired(),
        view: stage.component().view(stage.now()),
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

async fn run<C>(
    mut stage: Stage<C>,
    started: Instant,
    frames: watch::Sender<Frame<C::View>>,
    mut inputs: mpsc::UnboundedReceiver<Input<C>>,
    shutdown: CancellationToken,
) -> DriverReport<C>
where
    C: Choreography + Snapshot + Send + 'static,
    C::Event: Send,
{
    loop {
        let wake = match stage.next_deadline() {
            Some(deadline) => started + Duration::from_millis(deadline),
            None => Instant::now() + IDLE_WAKE,
        };

        tokio::select! {
            _ = shutdown.cancelled() => break,
            Some(input) = inputs.recv() => {
                stage.advance_to(elapsed_ms(started));
                stage.interact(input);
                frames.send_replace(frame(&stage));
            }
            _ = tokio::time::sleep_until(wake) => {
                let fired = stage.advance_to(elapsed_ms(started));
                if fired > 0 {
                    trace!(fired, now = stage.now(), "driver tick");
                    frames.send_replace(frame(&stage));
                }
            }
        }
    }

    let elapsed_ms = elapsed_ms(started);
    let cancelled = stage.teardown();
    debug!(elapsed_ms, cancelled, fired = stage.fired(), "driver stopped");
    DriverReport {
        fired: stage.fired(),
        cancelled,
        elapsed_ms,
        component: stage.into_component(),
    }
}
