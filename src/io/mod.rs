//! External interfaces: instance sources and report sinks.
//!
//! - [`InstanceSource`] / [`TextInstanceReader`]: load a [`ProblemInstance`](crate::models::ProblemInstance)
//! - [`ReportSink`] / [`TextReportSink`] / [`MemoryReportSink`]: receive progress and the final plan

mod reader;
mod report;

pub use reader::{parse_instance, InstanceSource, TextInstanceReader};
pub use report::{GenerationRecord, MemoryReportSink, ReportSink, TextReportSink};
