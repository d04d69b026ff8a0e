//! OSI 评分分类器: 把 `(面积百分比, 近端度等级)` 确定性地映射为
//! 临床评分与严重程度档位.
//!
//! 分类器是无状态的自由函数. 入口处无条件地钳制输入
//! ("永不拒绝评分" 策略): 任何畸形数值都会得到有效评分而不是错误.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 严重程度档位, 由总分唯一确定.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Severity {
    /// 总分 0: 临床治愈 / 无受累.
    #[cfg_attr(feature = "serde", serde(rename = "Clinically Cured / No involvement"))]
    ClinicallyCured,

    /// 总分 1 ~ 5.
    #[cfg_attr(feature = "serde", serde(rename = "Mild"))]
    Mild,

    /// 总分 6 ~ 15.
    #[cfg_attr(feature = "serde", serde(rename = "Moderate"))]
    Moderate,

    /// 总分 16 ~ 25.
    #[cfg_attr(feature = "serde", serde(rename = "Severe"))]
    Severe,
}

impl Severity {
    /// 由总分确定档位. `total` 必须不超过 25.
    pub fn from_total(total: u8) -> Self {
        debug_assert!(total <= 25);
        match total {
            0 => Self::ClinicallyCured,
            1..=5 => Self::Mild,
            6..=15 => Self::Moderate,
            _ => Self::Severe,
        }
    }

    /// 持久化与 UI 展示使用的临床标签.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClinicallyCured => "Clinically Cured / No involvement",
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }

    /// 是否为临床治愈档?
    #[inline]
    pub fn is_cured(&self) -> bool {
        matches!(self, Self::ClinicallyCured)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一次完整的 OSI 评分记录. 字段名与历史持久化格式保持一致.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OsiScore {
    /// 面积分 A, 范围 `[0, 5]`.
    pub area_score: u8,

    /// 近端分 P, 范围 `[1, 5]`. 等于钳制后的近端度等级.
    pub proximity_score: u8,

    /// 总分 `A x P`, 范围 `[0, 25]`.
    pub total_osi_score: u8,

    /// 严重程度档位.
    pub severity: Severity,

    /// 钳制后的面积百分比.
    pub area_percent: f64,

    /// 钳制后的近端度等级.
    pub proximity_level: u8,
}

/// 面积分 A: 面积百分比的单调阶梯函数.
///
/// `0` -> 0; `(0, 10]` -> 1; `(10, 25]` -> 2; `(25, 50]` -> 3;
/// `(50, 75]` -> 4; `(75, 100]` -> 5.
fn area_score_of(area_percent: f64) -> u8 {
    debug_assert!((0.0..=100.0).contains(&area_percent));
    if area_percent == 0.0 {
        0
    } else if area_percent <= 10.0 {
        1
    } else if area_percent <= 25.0 {
        2
    } else if area_percent <= 50.0 {
        3
    } else if area_percent <= 75.0 {
        4
    } else {
        5
    }
}

/// 计算 OSI 评分.
///
/// 入口处的钳制是无条件的: `area_percent` 被钳制到 `[0, 100]`
/// (NaN 按 0 处理), `proximity_level` 被钳制到 `[1, 5]`.
/// 该函数对钳制后的定义域是全函数, 没有错误路径.
pub fn get_osi_score(area_percent: f64, proximity_level: i32) -> OsiScore {
    let area_percent = if area_percent.is_nan() {
        0.0
    } else {
        area_percent.clamp(0.0, 100.0)
    };
    let proximity_level = proximity_level.clamp(1, 5) as u8;

    let area_score = area_score_of(area_percent);
    let proximity_score = proximity_level;
    let total_osi_score = area_score * proximity_score;

    OsiScore {
        area_score,
        proximity_score,
        total_osi_score,
        severity: Severity::from_total(total_osi_score),
        area_percent,
        proximity_level,
    }
}
