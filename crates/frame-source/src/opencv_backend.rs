use crate::{CameraSource, Error, Frame, PixelFormat, Result};
use opencv::prelude::*;
use opencv::{core, videoio};
use time::OffsetDateTime;

/// Webcam capture via OpenCV's VideoCapture. Frames stay in the device's
/// native BGR layout.
pub struct OpenCvCamera {
    cap: videoio::VideoCapture,
}

impl CameraSource for OpenCvCamera {
    fn open(spec: &str) -> Result<Self> {
        // Numeric spec is a device index, anything else a file/URL path
        let cap = if let Ok(idx) = spec.parse::<i32>() {
            videoio::VideoCapture::new(idx, videoio::CAP_ANY)
                .map_err(|e| Error::Backend(e.to_string()))?
        } else {
            videoio::VideoCapture::from_file(spec, videoio::CAP_ANY)
                .map_err(|e| Error::Backend(e.to_string()))?
        };
        let opened =
            videoio::VideoCapture::is_opened(&cap).map_err(|e| Error::Backend(e.to_string()))?;
        if !opened {
            return Err(Error::DeviceUnavailable(spec.to_string()));
        }
        Ok(Self { cap })
    }

    fn read(&mut self) -> Result<Frame> {
        let mut mat = core::Mat::default();
        self.cap
            .read(&mut mat)
            .map_err(|e| Error::Backend(e.to_string()))?;
        if mat.empty() {
            return Err(Error::CaptureFailed("empty frame from device".into()));
        }

        let width = mat.cols() as u32;
        let height = mat.rows() as u32;
        let data = mat
            .data_bytes()
            .map_err(|e| Error::Backend(e.to_string()))?
            .to_vec();
        Ok(Frame {
            width,
            height,
            pixel_format: PixelFormat::Bgr8,
            data,
            ts: Some(OffsetDateTime::now_utc()),
        })
    }

    fn resolution(&self) -> Option<(u32, u32)> {
        let w = self.cap.get(videoio::CAP_PROP_FRAME_WIDTH).ok()?;
        let h = self.cap.get(videoio::CAP_PROP_FRAME_HEIGHT).ok()?;
        if w <= 0.0 || h <= 0.0 {
            return None;
        }
        Some((w as u32, h as u32))
    }
}
