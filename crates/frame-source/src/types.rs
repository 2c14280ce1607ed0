use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PixelFormat {
    Bgr8,
    Rgb8,
    Gray8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Bgr8 | PixelFormat::Rgb8 => 3,
            PixelFormat::Gray8 => 1,
        }
    }
}

/// An owned pixel snapshot. Readers always get a clone; nothing hands out
/// references into a capture thread's buffer.
#[derive(Clone, Debug)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixel_format: PixelFormat,
    pub data: Vec<u8>,
    pub ts: Option<OffsetDateTime>,
}

impl Frame {
    /// Expected length of `data` for the declared dimensions and format.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.pixel_format.bytes_per_pixel()
    }

    /// Downscale to at most `max_width` pixels wide, preserving aspect
    /// ratio. Nearest-neighbour; returns the frame unchanged when it is
    /// already narrow enough, has zero width, or its buffer is shorter
    /// than the declared dimensions.
    pub fn resize_to_width(&self, max_width: u32) -> Frame {
        if self.width <= max_width
            || self.width == 0
            || max_width == 0
            || self.data.len() < self.expected_len()
        {
            return self.clone();
        }
        let new_width = max_width;
        let new_height =
            ((self.height as u64 * new_width as u64) / self.width as u64).max(1) as u32;
        let bpp = self.pixel_format.bytes_per_pixel();
        let mut data = Vec::with_capacity(new_width as usize * new_height as usize * bpp);
        for y in 0..new_height {
            let src_y = (y as u64 * self.height as u64 / new_height as u64) as usize;
            for x in 0..new_width {
                let src_x = (x as u64 * self.width as u64 / new_width as u64) as usize;
                let idx = (src_y * self.width as usize + src_x) * bpp;
                data.extend_from_slice(&self.data[idx..idx + bpp]);
            }
        }
        Frame {
            width: new_width,
            height: new_height,
            pixel_format: self.pixel_format,
            data,
            ts: self.ts,
        }
    }
}
