use log::debug;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::Notify;

/// Hands frames from the capture side to a single processing loop.
///
/// Holds at most one pending frame. A frame submitted while another is still
/// pending replaces it, so a slow consumer only ever sees the newest frame and
/// never builds a backlog.
#[derive(Debug, Default)]
pub struct FrameGate<T> {
    pending: Mutex<Option<T>>,
    notify: Notify,
    closed: AtomicBool,
    dropped: AtomicU64,
}

impl<T> FrameGate<T> {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(None),
            notify: Notify::new(),
            closed: AtomicBool::new(false),
            dropped: AtomicU64::new(0),
        }
    }

    /// Queues `frame`, returning true if it replaced a frame nobody picked up.
    pub fn submit(&self, frame: T) -> bool {
        let replaced = self.pending.lock().replace(frame).is_some();
        if replaced {
            let dropped = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
            debug!("Processing busy, dropped a pending frame ({dropped} so far)");
        }
        self.notify.notify_one();
        replaced
    }

    /// No more frames will be submitted. Pending frames are still delivered.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }

    /// Waits for the next frame. Returns None once the gate is closed and drained.
    pub async fn next(&self) -> Option<T> {
        loop {
            let closed = self.closed.load(Ordering::SeqCst);
            if let Some(frame) = self.pending.lock().take() {
                return Some(frame);
            }
            if closed {
                return None;
            }
            self.notify.notified().await;
        }
    }

    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
