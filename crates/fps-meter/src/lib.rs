//! fps-meter: wall-clock frame throughput counter

mod counter;
pub use counter::FpsCounter;

mod report;
pub use report::FpsReport;
