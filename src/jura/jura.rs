use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, Weak};

use futures::stream::BoxStream;
use serde::Serialize;
use stream_cancel::{StreamExt as _, Trigger, Tripwire};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::BroadcastStream;

use crate::jura::{JuraDriver, JuraError};
use crate::prelude::*;
use crate::protocol::{expect_ack, Command, CommandValue, ControlPoint, CupCounters};

/// Default delay before the first scheduled status poll.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(5);
/// Default fixed delay between the end of one scheduled poll and the start
/// of the next.
pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_secs(60);

/// Timing of the scheduled status poll.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PollSchedule {
    pub initial_delay: Duration,
    pub period: Duration,
}

impl Default for PollSchedule {
    fn default() -> Self {
        PollSchedule {
            initial_delay: DEFAULT_INITIAL_DELAY,
            period: DEFAULT_POLL_PERIOD,
        }
    }
}

/// What the adapter currently believes about the machine's availability.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum JuraStatus {
    /// Nothing has been heard yet, or the last host command failed.
    Unknown {
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
    /// The last scheduled poll succeeded.
    Online,
    /// The last scheduled poll failed to get counters out of the machine.
    Offline { reason: String },
}

/// Availability plus the counters from the most recent successful poll.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct JuraState {
    #[serde(flatten)]
    pub status: JuraStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counters: Option<CupCounters>,
}

impl Default for JuraState {
    fn default() -> Self {
        JuraState {
            status: JuraStatus::Unknown { detail: None },
            counters: None,
        }
    }
}

/// One update pushed to the host environment.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum JuraEvent {
    /// Fresh counters from a successful poll.
    Counters(CupCounters),
    /// The machine's availability changed.
    Status(JuraStatus),
}

/// Handle for one machine. Cheap to clone; the scheduled poll runs as long
/// as any clone is alive and [`Jura::shutdown`] has not been called.
#[derive(Clone)]
pub struct Jura {
    inner: Arc<JuraInner>,
}

struct JuraInner {
    driver: Box<dyn JuraDriver>,
    state: Mutex<JuraState>,
    state_tx: watch::Sender<JuraState>,
    // Held so the watch always carries the latest value even with no
    // outside subscribers.
    state_rx: watch::Receiver<JuraState>,
    events_tx: broadcast::Sender<JuraEvent>,
    poll_task: Mutex<Option<JoinHandle<()>>>,
    stop: Mutex<Option<Trigger>>,
    tripwire: Tripwire,
    alive: AtomicBool,
}

impl Jura {
    /// Creates the adapter on top of `driver` and starts the scheduled
    /// status poll with the default timing.
    pub fn new(driver: Box<dyn JuraDriver>) -> Jura {
        Jura::with_schedule(driver, PollSchedule::default())
    }

    /// Creates the adapter with explicit poll timing.
    pub fn with_schedule(driver: Box<dyn JuraDriver>, schedule: PollSchedule) -> Jura {
        let (state_tx, state_rx) = watch::channel(JuraState::default());
        let (events_tx, _) = broadcast::channel(16);
        let (stop, tripwire) = Tripwire::new();

        let inner = Arc::new(JuraInner {
            driver,
            state: Mutex::new(JuraState::default()),
            state_tx,
            state_rx,
            events_tx,
            poll_task: Mutex::new(None),
            stop: Mutex::new(Some(stop)),
            tripwire,
            alive: AtomicBool::new(true),
        });

        // The loop holds the inner only while a cycle is running, so
        // dropping the last handle is enough to wind it down.
        let task = tokio::spawn(poll_loop(Arc::downgrade(&inner), schedule));
        *inner.poll_task.lock().expect("Failed to lock poll task") = Some(task);

        Jura { inner }
    }

    /// The current availability and counters.
    pub fn state(&self) -> JuraState {
        self.inner.state.lock().expect("Failed to lock state").clone()
    }

    /// The current availability.
    pub fn status(&self) -> JuraStatus {
        self.state().status
    }

    /// The counters from the most recent successful poll, if there was one.
    pub fn counters(&self) -> Option<CupCounters> {
        self.state().counters
    }

    /// A watch on [`JuraState`]; the receiver always holds the latest value.
    pub fn subscribe_state(&self) -> watch::Receiver<JuraState> {
        self.inner.state_rx.clone()
    }

    /// The stream of host-facing updates. Ends when the adapter shuts down.
    pub fn updates(&self) -> BoxStream<'static, JuraEvent> {
        let events = BroadcastStream::new(self.inner.events_tx.subscribe())
            .filter_map(|event| event.ok())
            .take_until_if(self.inner.tripwire.clone());
        Box::pin(events)
    }

    /// Runs one status poll right now, outside the schedule, and publishes
    /// the outcome exactly as a scheduled poll would.
    pub async fn refresh(&self) -> Result<CupCounters, JuraError> {
        self.inner.poll_cycle().await
    }

    /// Sends the activation command for a control point. A failure is
    /// reported to the host as unknown availability, carrying the message.
    pub async fn actuate(&self, point: ControlPoint) -> Result<(), JuraError> {
        match self.inner.exchange(point.activate_command()).await {
            Ok(_) => Ok(()),
            Err(error) => {
                log::warn!("actuating '{}' failed: {}", point.id(), error);
                self.inner.transition(JuraStatus::Unknown {
                    detail: Some(error.to_string()),
                });
                Err(error)
            }
        }
    }

    /// Entry point for commands delivered by the host environment. Refresh
    /// requests poll immediately whatever channel they name; `On` values
    /// actuate the named control point; everything else is ignored. Errors
    /// stop here, already folded into the published availability.
    pub async fn handle_command(&self, channel: &str, value: CommandValue) {
        if value == CommandValue::Refresh {
            let _ = self.refresh().await;
        }
        log::debug!("handle {:?} for channel '{}'", value, channel);
        if let (Some(point), CommandValue::On) = (ControlPoint::from_id(channel), value) {
            let _ = self.actuate(point).await;
        }
    }

    /// Sends a raw payload without acknowledgement validation. For protocol
    /// exploration.
    pub async fn send_raw(&self, payload: &str) -> Result<String, JuraError> {
        self.inner.driver.exchange(payload).await
    }

    /// False once the adapter has shut down.
    pub fn is_alive(&self) -> bool {
        self.inner.alive.load(Ordering::Relaxed)
    }

    /// Stops the scheduled poll, interrupting a cycle in flight, and ends
    /// every update stream. Safe to call more than once.
    pub fn shutdown(&self) {
        self.inner.teardown();
    }
}

async fn poll_loop(inner: Weak<JuraInner>, schedule: PollSchedule) {
    tokio::time::sleep(schedule.initial_delay).await;
    loop {
        match inner.upgrade() {
            Some(inner) => {
                let _ = inner.poll_cycle().await;
            }
            None => return,
        }
        tokio::time::sleep(schedule.period).await;
    }
}

impl JuraInner {
    /// One full status poll: exchange, validate, decode, publish.
    async fn poll_cycle(&self) -> Result<CupCounters, JuraError> {
        match self.fetch_counters().await {
            Ok(counters) => {
                self.publish_counters(counters);
                self.transition(JuraStatus::Online);
                Ok(counters)
            }
            Err(error) => {
                log::warn!("status poll failed: {}", error);
                self.transition(JuraStatus::Offline {
                    reason: error.to_string(),
                });
                Err(error)
            }
        }
    }

    async fn fetch_counters(&self) -> Result<CupCounters, JuraError> {
        let payload = self.exchange(Command::ReadCounters).await?;
        CupCounters::parse(&payload)
    }

    /// Sends a command and returns its payload with the ack stripped.
    async fn exchange(&self, command: Command) -> Result<String, JuraError> {
        let response = self.driver.exchange(command.payload()).await?;
        let payload = expect_ack(&response, command.ack_prefix())?;
        Ok(payload.to_owned())
    }

    // Both publishers send while holding the state lock. The sends never
    // block, and this keeps the watch and the event feed in the order the
    // changes took effect.
    fn publish_counters(&self, counters: CupCounters) {
        let mut state = self.state.lock().expect("Failed to lock state");
        state.counters = Some(counters);
        let _ = self.state_tx.send(state.clone());
        let _ = self.events_tx.send(JuraEvent::Counters(counters));
    }

    /// Publishes an availability change. Consecutive identical statuses
    /// collapse into one update, matching how host frameworks treat them.
    fn transition(&self, status: JuraStatus) {
        let mut state = self.state.lock().expect("Failed to lock state");
        if state.status == status {
            return;
        }
        state.status = status.clone();
        log::debug!("availability is now {:?}", status);
        let _ = self.state_tx.send(state.clone());
        let _ = self.events_tx.send(JuraEvent::Status(status));
    }

    fn teardown(&self) {
        self.alive.store(false, Ordering::Relaxed);
        if let Some(task) = self
            .poll_task
            .lock()
            .expect("Failed to lock poll task")
            .take()
        {
            task.abort();
        }
        // Dropping the trigger trips the wire and ends the update streams.
        drop(self.stop.lock().expect("Failed to lock stop trigger").take());
    }
}

impl Drop for JuraInner {
    fn drop(&mut self) {
        self.teardown();
    }
}
