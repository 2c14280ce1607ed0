use crate::{Frame, Result};

/// A blocking camera device. `ThreadedStream` moves one of these onto a
/// capture thread; callers that want the latest-frame semantics never
/// touch the source directly after that.
pub trait CameraSource {
    /// Open a camera by device index or path string.
    fn open(spec: &str) -> Result<Self>
    where
        Self: Sized;

    /// Capture a single frame, blocking until the device produces one.
    fn read(&mut self) -> Result<Frame>;

    /// Native capture resolution, when the backend knows it.
    fn resolution(&self) -> Option<(u32, u32)> {
        None
    }
}
