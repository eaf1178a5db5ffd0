//! Shared utilities for integration testing the push middleware.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use h2_push::{PushError, PushHandle, PushRequest, Pusher};

/// A pusher that records every successful push and can be programmed to
/// fail every attempt after a number of successful ones, simulating an
/// exhausted concurrent-push-stream limit.
#[derive(Default)]
pub struct RecordingPusher {
    pushes: Mutex<Vec<PushRequest>>,
    fail_after: Option<usize>,
    attempts: AtomicUsize,
}

impl RecordingPusher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Succeed the first `n` pushes, fail every one after that.
    #[allow(dead_code)]
    pub fn failing_after(n: usize) -> Arc<Self> {
        Arc::new(Self {
            fail_after: Some(n),
            ..Self::default()
        })
    }

    /// Handle to attach to a request's extensions.
    pub fn handle(self: &Arc<Self>) -> PushHandle {
        PushHandle::new(self.clone())
    }

    /// Successfully pushed requests, in order.
    pub fn pushes(&self) -> Vec<PushRequest> {
        self.pushes.lock().unwrap().clone()
    }

    /// Successfully pushed paths, in order.
    pub fn pushed_paths(&self) -> Vec<String> {
        self.pushes().into_iter().map(|p| p.path).collect()
    }

    /// Total push attempts, failed ones included.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Pusher for RecordingPusher {
    fn push(&self, req: PushRequest) -> Result<(), PushError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.fail_after {
            if attempt >= limit {
                return Err(PushError::StreamLimit);
            }
        }
        self.pushes.lock().unwrap().push(req);
        Ok(())
    }
}
