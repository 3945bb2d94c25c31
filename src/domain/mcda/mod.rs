//! Multi-criteria ranking of cooperative branches.
//!
//! Pure domain logic with no I/O:
//!
//! - `criteria` - Criteria, directions and the validated weight configuration
//! - `branch` / `metric` - Input records and total numeric coercion
//! - `topsis` - The TOPSIS scoring pipeline
//! - `ranking` - Ordering and performance categories
//! - `recommendations` - Rule-based recommendation text
//! - `result` - The analysis outcome returned to callers

mod branch;
mod criteria;
mod errors;
mod metric;
mod ranking;
mod recommendations;
mod result;
mod topsis;

pub use branch::BranchRecord;
pub use criteria::{
    CriteriaConfig, CriteriaConfiguration, Criterion, CriterionSpec, CriterionWeights, Direction,
    WeightUpdate, WEIGHT_SUM_TOLERANCE,
};
pub use errors::McdaError;
pub use metric::{to_finite_float, MetricValue};
pub use ranking::{rank_branches, Category, RankedBranch, EXCELLENT_THRESHOLD, GOOD_THRESHOLD};
pub use recommendations::{
    BranchRecommendation, PerformanceOutlook, Priority, RecommendationGenerator, Recommendations,
    MEMBERSHIP_FLOOR,
};
pub use result::{AnalysisMetadata, AnalysisResult, RecommendationSource};
pub use topsis::{analyze, IdealSolutions, Row, TopsisAnalyzer, CRITERIA_COUNT};
