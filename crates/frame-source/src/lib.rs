//! frame-source: camera abstraction, threaded latest-frame capture, and
//! an optional OpenCV backend

mod types;
pub use types::{Frame, PixelFormat};

mod error;
pub use error::{Error, Result};

mod traits;
pub use traits::CameraSource;

mod stream;
pub use stream::ThreadedStream;

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::MockCamera;

#[cfg(feature = "opencv")]
mod opencv_backend;
#[cfg(feature = "opencv")]
pub use opencv_backend::OpenCvCamera;
