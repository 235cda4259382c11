pub mod chart;
pub mod dataset;
pub mod error;
pub mod output;
pub mod report;
pub mod stats;

pub use error::AnalysisError;
