//! OSI (Onychomycosis Severity Index) 评分计算.
//!
//! 依赖顺序 (自底向上): 掩膜几何 -> 覆盖率/近端度分析 -> 评分分类
//! -> 单甲流水线与叠加渲染.

mod analyze;
mod error;
mod pipeline;
mod score;
pub mod visualize;

pub use analyze::{analyze_masks, GridAnalysis};
pub use error::GradeError;
pub use pipeline::{grade_nail, GradingResult};
pub use score::{get_osi_score, OsiScore, Severity};

/// 评分流水线的运行时结果.
pub type GradeResult<T> = Result<T, GradeError>;
