//! Shared fixtures: a scripted gateway and store/config builders.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Semaphore;

use portal_config::GatewayConfig;
use portal_core::SyncKind;
use portal_db::PortalStore;
use portal_gateway::{Gateway, GatewayError};

pub const BASE_URL: &str = "https://portal.test/api";

pub fn config() -> GatewayConfig {
    GatewayConfig {
        base_url: BASE_URL.into(),
        ..Default::default()
    }
}

pub fn url(kind: SyncKind) -> String {
    config().endpoint_url(kind).unwrap()
}

pub fn term_url(kind: SyncKind, term: &str) -> String {
    format!("{}{term}", url(kind))
}

pub async fn memory_store() -> PortalStore {
    PortalStore::open_local(":memory:").await.unwrap()
}

#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Status(u16),
}

/// Gateway that answers from a URL → reply table and records every call.
///
/// With a gate installed, each fetch waits for one permit, which lets a test
/// hold the worker inside a pipeline.
#[derive(Default)]
pub struct ScriptedGateway {
    replies: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    gate: Option<Arc<Semaphore>>,
    delay: Option<Duration>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn reply(&self, url: impl Into<String>, body: impl Into<String>) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .insert(url.into(), Reply::Body(body.into()));
        self
    }

    pub fn fail(&self, url: impl Into<String>, status: u16) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .insert(url.into(), Reply::Status(status));
        self
    }

    /// Answer every full-refresh endpoint with an empty but valid payload.
    pub fn empty_everything(&self) -> &Self {
        self.reply(url(SyncKind::Terms), "[]")
            .reply(url(SyncKind::Exam), "[]")
            .reply(url(SyncKind::Schedule), "[]")
            .reply(url(SyncKind::Finance), r#"{"Status":[]}"#)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Gateway for ScriptedGateway {
    async fn fetch(&self, url: &str) -> Result<String, GatewayError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.lock().unwrap().push(url.to_string());

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.replies.lock().unwrap().get(url).cloned();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Status(status)) => Err(GatewayError::Api {
                status,
                message: String::new(),
            }),
            None => Err(GatewayError::Api {
                status: 404,
                message: format!("no scripted reply for {url}"),
            }),
        }
    }
}
