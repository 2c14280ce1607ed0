use crate::{CameraSource, Frame};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tracing::warn;

/// Pause after a failed capture so a wedged device does not spin the loop.
const CAPTURE_ERROR_BACKOFF: Duration = Duration::from_millis(5);

/// Runs a `CameraSource` on its own thread and keeps only the most recent
/// frame. The slot is a single mailbox: the capture thread overwrites it at
/// device pace, readers clone it at their own pace. A reader may see the
/// same frame twice or miss frames entirely; `seq` lets it tell which.
pub struct ThreadedStream {
    latest: Arc<Mutex<Option<Frame>>>,
    seq: Arc<AtomicU64>,
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ThreadedStream {
    /// Take ownership of `source` and start capturing in the background.
    pub fn spawn<S>(source: S) -> Self
    where
        S: CameraSource + Send + 'static,
    {
        let latest = Arc::new(Mutex::new(None::<Frame>));
        let seq = Arc::new(AtomicU64::new(0));
        let running = Arc::new(AtomicBool::new(true));

        let latest_ref = latest.clone();
        let seq_ref = seq.clone();
        let running_ref = running.clone();
        let handle = thread::spawn(move || {
            capture_loop(source, &latest_ref, &seq_ref, &running_ref);
        });

        Self {
            latest,
            seq,
            running,
            handle: Some(handle),
        }
    }

    /// Latest captured frame, or `None` before the first successful
    /// capture. Non-blocking; returns an owned clone.
    pub fn read(&self) -> Option<Frame> {
        self.latest.lock().ok().and_then(|slot| slot.clone())
    }

    /// Frames captured so far. Increments once per successful capture, so
    /// two `read`s returning the same `seq` saw the same frame.
    pub fn seq(&self) -> u64 {
        self.seq.load(Ordering::Acquire)
    }

    /// Signal the capture loop to stop and wait for it to exit. The loop
    /// checks the flag once per capture, so this returns within one
    /// refresh cycle. Idempotent.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("capture thread panicked during shutdown");
            }
        }
    }
}

impl Drop for ThreadedStream {
    fn drop(&mut self) {
        self.stop();
    }
}

fn capture_loop<S: CameraSource>(
    mut source: S,
    latest: &Mutex<Option<Frame>>,
    seq: &AtomicU64,
    running: &AtomicBool,
) {
    while running.load(Ordering::Acquire) {
        match source.read() {
            Ok(frame) => {
                if let Ok(mut slot) = latest.lock() {
                    *slot = Some(frame);
                }
                seq.fetch_add(1, Ordering::Release);
            }
            Err(e) => {
                // Transient failures are tolerated; the device owns pacing
                warn!("capture failed: {e}");
                thread::sleep(CAPTURE_ERROR_BACKOFF);
            }
        }
    }
}
