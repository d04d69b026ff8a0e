//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::{Idx2d, Point2d};

pub use crate::mask::{normalize_mask, ImgWriteRaw, ImgWriteVis, MaskSlice};

#[cfg(feature = "plot")]
pub use crate::mask_plot::ImgDisplay;

pub use crate::grid::{BoundingBox, CornerBox, GridCell, OsiGrid};

pub use crate::osi::{
    analyze_masks, get_osi_score, grade_nail, GradeError, GradeResult, GradingResult,
    GridAnalysis, OsiScore, Severity,
};

pub use crate::consts::{GRID_COLS, GRID_ROWS};
