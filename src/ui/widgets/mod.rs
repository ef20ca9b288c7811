//! Reusable widgets for the Skycast UI

mod sparkline;

pub use sparkline::TempSparkline;
