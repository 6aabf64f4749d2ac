//! Executes [`FlowMachine`] effects against the backend and the URL.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::hash::generate_hash;
use crate::machine::{Effect, FlowMachine, ShellEvent};
use crate::navigator::Navigator;
use crate::service::HashService;

/// What happened to a minted hash on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Registered,
    /// Stored, but a newer mint had already been issued by the time it landed.
    Superseded,
    /// The backend refused or could not be reached. Logged, never raised.
    Failed,
}

/// Result of the background work for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowOutcome {
    pub seq: u64,
    pub hash: String,
    /// Whether the inbound hash check succeeded; `None` when there was none.
    pub checked: Option<bool>,
    pub registration: Registration,
}

/// Drives the attribution flow for one shell.
///
/// Each mint rewrites the URL fragment immediately and registers the hash in
/// a spawned task, so navigation never waits on the backend. The rewrite
/// happens while the mint is the latest one issued, so a later navigation's
/// hash always ends up in the URL.
pub struct AttributionFlow<H, N> {
    service: Arc<H>,
    navigator: N,
    machine: FlowMachine,
    latest: Arc<AtomicU64>,
}

impl<H, N> AttributionFlow<H, N>
where
    H: HashService + 'static,
    N: Navigator,
{
    pub fn new(service: Arc<H>, navigator: N) -> Self {
        Self::with_machine(service, navigator, FlowMachine::default())
    }

    pub fn with_machine(service: Arc<H>, navigator: N, machine: FlowMachine) -> Self {
        Self { service, navigator, machine, latest: Arc::new(AtomicU64::new(0)) }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn machine(&self) -> &FlowMachine {
        &self.machine
    }

    /// Mount on whatever the navigator currently shows.
    pub fn mount(&mut self) -> Option<JoinHandle<FlowOutcome>> {
        let location = self.navigator.location();
        self.handle(ShellEvent::Mount(location))
    }

    /// Feed one shell event. Returns the handle of the background check and
    /// registration, or `None` when the event needs no work.
    ///
    /// Must be called within a Tokio runtime.
    pub fn handle(&mut self, event: ShellEvent) -> Option<JoinHandle<FlowOutcome>> {
        let mut inbound = None;
        let mut task = None;
        for effect in self.machine.transition(event) {
            match effect {
                Effect::CheckHash(hash) => inbound = Some(hash),
                Effect::Mint { seq, sid } => {
                    let hash = generate_hash();
                    self.latest.store(seq, Ordering::SeqCst);
                    self.navigator.replace(self.navigator.location().with_fragment(&hash));
                    debug!(seq, %hash, sid = ?sid, "attribution hash minted");

                    let service = Arc::clone(&self.service);
                    let latest = Arc::clone(&self.latest);
                    let check = inbound.take();
                    task = Some(tokio::spawn(register(service, latest, seq, hash, sid, check)));
                }
            }
        }
        task
    }
}

/// Check the inbound hash (if any), then register the new one, in that order.
async fn register<H: HashService>(
    service: Arc<H>,
    latest: Arc<AtomicU64>,
    seq: u64,
    hash: String,
    sid: Option<String>,
    inbound: Option<String>,
) -> FlowOutcome {
    let mut checked = None;
    if let Some(inbound) = inbound {
        // TODO: let a successful check decide whether a new hash is minted at all.
        match service.check_hash(&inbound).await {
            Ok(record) => {
                info!(hash = %inbound, story = ?record.story_id(), "inbound attribution hash checked");
                checked = Some(true);
            }
            Err(e) => {
                warn!(hash = %inbound, error = %e, "attribution hash check failed");
                checked = Some(false);
            }
        }
    }

    let registration = match service.create_hash(&hash, sid.as_deref()).await {
        Err(e) => {
            warn!(seq, %hash, error = %e, "attribution hash registration failed");
            Registration::Failed
        }
        Ok(_) if latest.load(Ordering::SeqCst) != seq => {
            debug!(seq, %hash, "attribution hash registered after a newer mint");
            Registration::Superseded
        }
        Ok(_) => Registration::Registered,
    };

    FlowOutcome { seq, hash, checked, registration }
}
