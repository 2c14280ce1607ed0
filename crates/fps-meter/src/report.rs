use serde::Serialize;

/// Final benchmark reading, shaped for JSON output.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct FpsReport {
    pub frames: u64,
    pub elapsed_secs: f64,
    pub fps: f64,
}
