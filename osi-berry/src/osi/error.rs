//! 运行时错误.
//!
//! 评分核心被设计为对几乎一切输入都给出有效评分: 退化几何回退到
//! 健康默认值, 越界数值被钳制. 因此这里只保留一种错误 —
//! 调用方传入的栅格本身不合法. 它与 "检测到零病变" 的临床结果
//! 严格区分, 下游 UI 可以据此分别展示.

use crate::Idx2d;
use std::fmt;

/// 评分无法运行的输入校验错误.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum GradeError {
    /// 掩膜分辨率与指甲照片不符.
    ///
    /// 第一个参数为照片的 (高, 宽), 第二个参数为实际收到的掩膜分辨率.
    MaskShapeMismatch(Idx2d, Idx2d),
}

impl fmt::Display for GradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaskShapeMismatch(expected, actual) => write!(
                f,
                "mask shape {actual:?} does not match image shape {expected:?}"
            ),
        }
    }
}

impl std::error::Error for GradeError {}
