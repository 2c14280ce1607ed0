use crate::{CameraSource, Frame, PixelFormat, Result};
use time::OffsetDateTime;

/// Synthetic camera for portable runs and tests. The spec string is either
/// a device index (ignored) or `WIDTHxHEIGHT`.
pub struct MockCamera {
    width: u32,
    height: u32,
    counter: u64,
}

impl CameraSource for MockCamera {
    fn open(spec: &str) -> Result<Self> {
        let (width, height) = parse_size(spec).unwrap_or((320, 240));
        Ok(Self {
            width,
            height,
            counter: 0,
        })
    }

    fn read(&mut self) -> Result<Frame> {
        self.counter += 1;
        // Gray ramp that shifts each frame so consecutive frames differ
        let mut data = vec![0u8; self.width as usize * self.height as usize];
        for y in 0..self.height as usize {
            for x in 0..self.width as usize {
                let idx = y * self.width as usize + x;
                data[idx] = ((x as u64 + y as u64 + self.counter) % 256) as u8;
            }
        }
        Ok(Frame {
            width: self.width,
            height: self.height,
            pixel_format: PixelFormat::Gray8,
            data,
            ts: Some(OffsetDateTime::now_utc()),
        })
    }

    fn resolution(&self) -> Option<(u32, u32)> {
        Some((self.width, self.height))
    }
}

/// Largest accepted dimension; captures bigger than this are not webcams.
const MAX_DIM: u32 = 8192;

fn parse_size(spec: &str) -> Option<(u32, u32)> {
    let (w, h) = spec.split_once('x')?;
    let w = w.trim().parse::<u32>().ok()?;
    let h = h.trim().parse::<u32>().ok()?;
    if w == 0 || h == 0 || w > MAX_DIM || h > MAX_DIM {
        return None;
    }
    Some((w, h))
}
