use anyhow::Result;
use clap::{ArgAction, Parser};
use fps_meter::{FpsCounter, FpsReport};
use frame_source::{CameraSource, Frame, ThreadedStream};
use std::thread;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "fps-bench", version, about = "Webcam frame throughput benchmark")]
struct Cli {
    /// Number of frames to sample before stopping
    #[arg(short = 'n', long, default_value_t = 100)]
    num_frames: u64,

    /// Render frames to a window when > 0 (requires the opencv feature)
    #[arg(short = 'd', long, default_value_t = -1)]
    display: i64,

    /// Device spec: index like 0, a path, or WIDTHxHEIGHT for the mock
    #[arg(long, default_value = "0")]
    device: String,

    /// Resize sampled frames to at most this width
    #[arg(long, default_value_t = 400)]
    width: u32,

    /// Capture with the OpenCV backend instead of the mock
    #[arg(long, action = ArgAction::SetTrue)]
    opencv: bool,

    /// Print the report as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();
    info!(
        "sampling {} frames from device {}",
        cli.num_frames, cli.device
    );

    let report = if cli.opencv {
        run_opencv(&cli)?
    } else {
        let source = frame_source::MockCamera::open(&cli.device)
            .map_err(|e| anyhow::anyhow!("mock open failed: {e}"))?;
        run_bench(source, cli.num_frames, cli.display, cli.width)?
    };

    println!("{}", render_report(&report, cli.json)?);
    Ok(())
}

fn render_report(report: &FpsReport, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(report)?)
    } else {
        Ok(format!(
            "elapsed time: {:.2}\napprox. FPS: {:.2}",
            report.elapsed_secs, report.fps
        ))
    }
}

fn setup_tracing() {
    // Best-effort; avoid panics if already set
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[cfg(feature = "opencv")]
fn run_opencv(cli: &Cli) -> Result<FpsReport> {
    let source = frame_source::OpenCvCamera::open(&cli.device)
        .map_err(|e| anyhow::anyhow!("camera open failed: {e}"))?;
    run_bench(source, cli.num_frames, cli.display, cli.width)
}

#[cfg(not(feature = "opencv"))]
fn run_opencv(_cli: &Cli) -> Result<FpsReport> {
    anyhow::bail!("OpenCV backend not enabled at compile time")
}

/// Pull the latest frame, resize, optionally display, and count, until
/// `num_frames` frames have been processed.
fn run_bench<S>(source: S, num_frames: u64, display: i64, width: u32) -> Result<FpsReport>
where
    S: CameraSource + Send + 'static,
{
    if let Some((w, h)) = source.resolution() {
        info!("capture resolution: {w}x{h}");
    }
    let mut stream = ThreadedStream::spawn(source);
    let mut window = DisplayWindow::open(display > 0)?;

    let mut counter = FpsCounter::new();
    counter.start();
    while counter.frames() < num_frames {
        let Some(frame) = stream.read() else {
            // Capture thread has not produced its first frame yet
            thread::sleep(Duration::from_millis(1));
            continue;
        };
        let frame = frame.resize_to_width(width);
        window.show(&frame)?;
        counter.update();
    }
    counter.stop();
    stream.stop();
    window.close();
    Ok(counter.report())
}

#[cfg(feature = "opencv")]
struct DisplayWindow {
    enabled: bool,
}

#[cfg(feature = "opencv")]
impl DisplayWindow {
    const NAME: &'static str = "fps-bench";

    fn open(enabled: bool) -> Result<Self> {
        Ok(Self { enabled })
    }

    fn show(&mut self, frame: &Frame) -> Result<()> {
        use opencv::{highgui, prelude::*};
        if !self.enabled {
            return Ok(());
        }
        // highgui expects BGR; gray and BGR frames render correctly, RGB
        // shows channel-swapped
        let channels = frame.pixel_format.bytes_per_pixel() as i32;
        let mat = Mat::from_slice(&frame.data)?;
        let mat = mat.reshape(channels, frame.height as i32)?;
        highgui::imshow(Self::NAME, &mat)?;
        let _ = highgui::wait_key(1)?;
        Ok(())
    }

    fn close(&mut self) {
        use opencv::highgui;
        if self.enabled {
            let _ = highgui::destroy_all_windows();
        }
    }
}

#[cfg(not(feature = "opencv"))]
struct DisplayWindow;

#[cfg(not(feature = "opencv"))]
impl DisplayWindow {
    fn open(enabled: bool) -> Result<Self> {
        if enabled {
            tracing::warn!("display requested but the opencv feature is not enabled");
        }
        Ok(Self)
    }

    fn show(&mut self, _frame: &Frame) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use frame_source::MockCamera;

    #[test]
    fn test_bench_counts_exactly_n_frames() {
        for n in [1u64, 3, 10] {
            let source = MockCamera::open("32x24").unwrap();
            let report = run_bench(source, n, -1, 400).unwrap();
            assert_eq!(report.frames, n);
        }
    }

    #[test]
    fn test_bench_report_is_consistent() {
        let source = MockCamera::open("32x24").unwrap();
        let report = run_bench(source, 10, 0, 400).unwrap();
        assert!(report.elapsed_secs > 0.0);
        assert!((report.fps - report.frames as f64 / report.elapsed_secs).abs() < 1e-9);
    }

    #[test]
    fn test_render_report_human_mode() {
        let source = MockCamera::open("32x24").unwrap();
        let report = run_bench(source, 10, -1, 400).unwrap();
        let text = render_report(&report, false).unwrap();
        let expected = format!(
            "elapsed time: {:.2}\napprox. FPS: {:.2}",
            report.elapsed_secs, report.fps
        );
        assert_eq!(text, expected);
        assert!(text.starts_with("elapsed time: "));
    }

    #[test]
    fn test_render_report_json_mode() {
        let source = MockCamera::open("32x24").unwrap();
        let report = run_bench(source, 10, -1, 400).unwrap();
        let text = render_report(&report, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["frames"], 10);
        assert!(value["elapsed_secs"].as_f64().unwrap() > 0.0);
        assert!(value["fps"].as_f64().is_some());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["fps-bench"]);
        assert_eq!(cli.num_frames, 100);
        assert_eq!(cli.display, -1);
        assert_eq!(cli.device, "0");
        assert_eq!(cli.width, 400);
        assert!(!cli.opencv);
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["fps-bench", "-n", "10", "-d", "1"]);
        assert_eq!(cli.num_frames, 10);
        assert_eq!(cli.display, 1);
    }
}
