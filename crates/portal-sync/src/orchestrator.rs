//! The sync orchestrator.
//!
//! Callers enqueue [`SyncKind`]s from any thread. The first request of an
//! idle orchestrator starts a drain cycle on a dedicated worker thread,
//! which runs the queued pipelines one at a time in FIFO order. Each
//! pipeline is async, and the worker blocks on it through the runtime
//! [`Handle`] it was given, so steps stay strictly sequential.
//!
//! A cycle ends when the queue is empty or a pipeline fails. A failure
//! publishes [`SyncEvent::Failed`] and discards the rest of the queue.
//! Either way the cycle then publishes exactly one [`SyncEvent::Completed`].
//! Only a cycle without failures advances the "last updated" timestamp.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use chrono::Utc;
use tokio::runtime::{Handle, RuntimeFlavor};

use portal_config::GatewayConfig;
use portal_core::SyncKind;
use portal_db::PortalStore;
use portal_gateway::Gateway;

use crate::error::SyncError;
use crate::notify::{NotificationBus, Subscription, SyncEvent};
use crate::pipeline::{PipelineContext, run_pipeline};

const WORKER_NAME: &str = "portal-sync";

/// Owned handle to the single sync worker. Cheap to clone; every clone
/// shares the same queue, flag and bus.
pub struct SyncOrchestrator<G: Gateway> {
    inner: Arc<Inner<G>>,
}

impl<G: Gateway> Clone for SyncOrchestrator<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<G> {
    gateway: G,
    store: Arc<PortalStore>,
    config: GatewayConfig,
    runtime: Handle,
    bus: NotificationBus,
    queue: Mutex<VecDeque<SyncKind>>,
    /// True from the first enqueue of a cycle until its queue runs dry.
    /// Only written while `queue` is locked.
    active: AtomicBool,
    /// Held by a worker for its whole cycle, so a new cycle cannot start
    /// its pipelines before the previous one published its completion.
    cycle: Mutex<()>,
}

impl<G: Gateway> SyncOrchestrator<G> {
    /// Build an orchestrator that drives its pipelines on `runtime`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NoRuntime`] if `runtime` is a current-thread
    /// runtime, which cannot make progress from the worker thread.
    pub fn new(
        gateway: G,
        store: Arc<PortalStore>,
        config: GatewayConfig,
        runtime: Handle,
    ) -> Result<Self, SyncError> {
        if runtime.runtime_flavor() == RuntimeFlavor::CurrentThread {
            return Err(SyncError::NoRuntime);
        }
        Ok(Self {
            inner: Arc::new(Inner {
                gateway,
                store,
                config,
                runtime,
                bus: NotificationBus::new(),
                queue: Mutex::new(VecDeque::new()),
                active: AtomicBool::new(false),
                cycle: Mutex::new(()),
            }),
        })
    }

    /// Build an orchestrator on the runtime the caller is running in.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NoRuntime`] outside a multi-thread tokio runtime.
    pub fn with_current_runtime(
        gateway: G,
        store: Arc<PortalStore>,
        config: GatewayConfig,
    ) -> Result<Self, SyncError> {
        let runtime = Handle::try_current().map_err(|_| SyncError::NoRuntime)?;
        Self::new(gateway, store, config, runtime)
    }

    /// Queue one sync. Starts a drain cycle if none is running.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Spawn`] if a new worker thread was needed and
    /// could not be started. The queue is emptied in that case.
    pub fn request_sync(&self, kind: SyncKind) -> Result<(), SyncError> {
        self.request_many(&[kind])
    }

    /// Queue several syncs at once, in order. They all join the same drain
    /// cycle, either the running one or a new one.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Spawn`] if a new worker thread was needed and
    /// could not be started. The queue is emptied in that case.
    pub fn request_many(&self, kinds: &[SyncKind]) -> Result<(), SyncError> {
        if kinds.is_empty() {
            return Ok(());
        }
        let start = {
            let mut queue = self.inner.lock_queue();
            queue.extend(kinds.iter().copied());
            !self.inner.active.swap(true, Ordering::SeqCst)
        };
        tracing::debug!(?kinds, start, "sync requested");
        if start {
            self.spawn_worker()?;
        }
        Ok(())
    }

    /// Queue a full refresh, unless a cycle is already running.
    ///
    /// Returns whether anything was queued.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Spawn`] if the worker thread could not be started.
    pub fn request_all(&self) -> Result<bool, SyncError> {
        {
            let mut queue = self.inner.lock_queue();
            if self.inner.active.load(Ordering::SeqCst) {
                tracing::debug!("full refresh skipped; a sync is already running");
                return Ok(false);
            }
            queue.extend(SyncKind::FULL_REFRESH);
            self.inner.active.store(true, Ordering::SeqCst);
        }
        tracing::debug!("full refresh requested");
        self.spawn_worker()?;
        Ok(true)
    }

    /// Whether a drain cycle is in progress right now.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// Subscribe to [`SyncEvent`]s. Drop the subscription to unsubscribe.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        self.inner.bus.subscribe()
    }

    /// Wait on `events` until a cycle completes and no other cycle has
    /// started. Returns whether any pipeline failed meanwhile, or `None` if
    /// the bus closed first.
    ///
    /// Subscribe before enqueueing, or the events may already be gone.
    pub async fn wait_idle(&self, events: &mut Subscription) -> Option<bool> {
        let mut failed = false;
        loop {
            match events.next().await? {
                SyncEvent::Failed => failed = true,
                SyncEvent::Completed if !self.is_active() => return Some(failed),
                SyncEvent::Completed => {}
            }
        }
    }

    #[must_use]
    pub fn bus(&self) -> &NotificationBus {
        &self.inner.bus
    }

    #[must_use]
    pub fn store(&self) -> &PortalStore {
        &self.inner.store
    }

    fn spawn_worker(&self) -> Result<(), SyncError> {
        let inner = Arc::clone(&self.inner);
        let spawned = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || inner.drain());
        if let Err(e) = spawned {
            self.inner.abandon_queue();
            return Err(SyncError::Spawn(e));
        }
        Ok(())
    }
}

impl<G: Gateway> Inner<G> {
    fn lock_queue(&self) -> MutexGuard<'_, VecDeque<SyncKind>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop every pending request and go idle. Returns how many were dropped.
    fn abandon_queue(&self) -> usize {
        let mut queue = self.lock_queue();
        let dropped = queue.len();
        queue.clear();
        self.active.store(false, Ordering::SeqCst);
        dropped
    }

    /// Next request, or `None` after marking the orchestrator idle.
    fn next_request(&self) -> Option<SyncKind> {
        let mut queue = self.lock_queue();
        let next = queue.pop_front();
        if next.is_none() {
            self.active.store(false, Ordering::SeqCst);
        }
        next
    }

    fn drain(&self) {
        let _cycle = self.cycle.lock().unwrap_or_else(PoisonError::into_inner);
        let _span = tracing::info_span!("sync_cycle").entered();
        tracing::info!("sync cycle started");

        let ctx = PipelineContext {
            gateway: &self.gateway,
            store: &self.store,
            config: &self.config,
        };

        let mut failed = false;
        while let Some(kind) = self.next_request() {
            let _pipeline = tracing::info_span!("pipeline", %kind).entered();
            if let Err(e) = self.runtime.block_on(run_pipeline(ctx, kind)) {
                tracing::error!(error = %e, "pipeline failed");
                self.bus.publish(SyncEvent::Failed);
                let dropped = self.abandon_queue();
                tracing::warn!(dropped, "discarded remaining sync requests");
                failed = true;
                break;
            }
        }

        if !failed {
            let now = Utc::now();
            if let Err(e) = self.runtime.block_on(self.store.record_last_updated(now)) {
                tracing::warn!(error = %e, "failed to record last updated time");
            }
        }
        tracing::info!(failed, "sync cycle finished");
        self.bus.publish(SyncEvent::Completed);
    }
}
