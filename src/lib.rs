pub mod analyzers;
pub mod error;
pub mod output;
pub mod parser;
pub mod times;

pub use analyzers::build_report;
pub use analyzers::types::{AggregatedRow, ReportRow, ReportTable, Threshold, ThresholdSet};
pub use error::{RankingError, Result};
pub use parser::{NormalizeOptions, NormalizedResult, RawRow};
