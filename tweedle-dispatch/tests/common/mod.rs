#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tweedle_dispatch::{ClientFactory, Credentials, SharedClient, StatusClient, StatusUpdate};

/// Every `post_status` call, as `"<client>:<text>"`, in call order.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub struct MockClient {
    name: String,
    fail_with: Option<String>,
    identity_ok: bool,
    calls: CallLog,
}

impl MockClient {
    pub fn ok(name: &str, calls: &CallLog) -> SharedClient {
        Arc::new(Self {
            name: name.to_string(),
            fail_with: None,
            identity_ok: true,
            calls: calls.clone(),
        })
    }

    pub fn failing(name: &str, cause: &str, calls: &CallLog) -> SharedClient {
        Arc::new(Self {
            name: name.to_string(),
            fail_with: Some(cause.to_string()),
            identity_ok: true,
            calls: calls.clone(),
        })
    }

    /// A client whose credentials are rejected when it is asked who it is.
    pub fn anonymous(calls: &CallLog) -> SharedClient {
        Arc::new(Self {
            name: String::new(),
            fail_with: None,
            identity_ok: false,
            calls: calls.clone(),
        })
    }
}

#[async_trait]
impl StatusClient for MockClient {
    async fn identity_name(&self) -> anyhow::Result<String> {
        if self.identity_ok {
            Ok(self.name.clone())
        } else {
            anyhow::bail!("could not verify credentials")
        }
    }

    async fn post_status(&self, update: &StatusUpdate) -> anyhow::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.name, update.text));
        match &self.fail_with {
            Some(cause) => Err(anyhow::anyhow!(cause.clone())),
            None => Ok(()),
        }
    }
}

/// Builds succeeding mock clients named after the access token.
#[derive(Default)]
pub struct MockFactory {
    pub built: AtomicUsize,
    pub calls: CallLog,
}

impl MockFactory {
    pub fn built(&self) -> usize {
        self.built.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClientFactory for MockFactory {
    async fn make_client(&self, credentials: Credentials) -> anyhow::Result<SharedClient> {
        self.built.fetch_add(1, Ordering::SeqCst);
        Ok(MockClient::ok(credentials.access_token(), &self.calls))
    }
}

/// In-memory sink for a test-scoped `tracing` subscriber.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Event lines at `level` ("DEBUG", "ERROR", ...).
    pub fn events_at(&self, level: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.trim_start().starts_with(level))
            .map(str::to_owned)
            .collect()
    }
}

/// Route this thread's events into a fresh buffer until the guard drops.
pub fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buf = LogBuffer::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buf, guard)
}
