//! 覆盖率与近端度分析: 把两张像素掩膜转换为分类器需要的两个标量,
//! 并附带原始像素面积以供审计.

use crate::consts::PROXIMITY_THRESHOLDS;
use crate::MaskSlice;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 单张甲板的覆盖率/近端度分析结果. 每次调用重新计算, 无隐藏状态.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridAnalysis {
    /// 患处面积占甲板面积的百分比, 范围 `[0, 100]`.
    pub area_percent: f64,

    /// 近端度等级, 范围 `[1, 5]`. 1 = 仅远端, 5 = 甲母质受累.
    pub proximity_level: u8,

    /// 甲板前景像素总数 (未钳制的原始值).
    pub total_nail_area_px: usize,

    /// 患处前景像素总数 (未钳制的原始值).
    pub affected_area_px: usize,
}

/// 由最顶部患处行的相对位置求近端度等级.
///
/// 掩膜以自上而下为近端 -> 远端方向, 因此比值越小代表病变越靠近
/// 甲母质. `height` 非正时退化为等级 1.
fn proximity_level_of(topmost_row: usize, height: usize) -> u8 {
    if height == 0 {
        return 1;
    }
    let ratio = topmost_row as f64 / height as f64;
    let [t1, t2, t3, t4] = PROXIMITY_THRESHOLDS;
    if ratio > t1 {
        1 // 远端四分区
    } else if ratio > t2 {
        2 // 第二四分区
    } else if ratio > t3 {
        3 // 第三四分区
    } else if ratio > t4 {
        4 // 近端四分区
    } else {
        5 // 甲母质受累
    }
}

/// 分析甲板掩膜与患处掩膜, 得到面积百分比与近端度等级.
///
/// 该操作从不失败: 任何退化输入都降级为 "健康, 仅远端" 的默认值.
///
/// # 边界情况
///
/// 1. 甲板前景像素为 0 (未检测到甲板) 时, 面积百分比定义为 0,
///   即宽松地视作健康, 保证每张甲板总能得到可用评分.
/// 2. 患处掩膜全零 (未检测到病变) 时, 近端度为 1.
/// 3. 面积百分比总是钳制到 `[0, 100]` 以吸收浮点漂移;
///   近端度总是钳制到 `[1, 5]`.
pub fn analyze_masks(nail: &MaskSlice, affected: &MaskSlice) -> GridAnalysis {
    let total_nail_area_px = nail.foreground_count();
    let affected_area_px = affected.foreground_count();

    let area_percent = if total_nail_area_px > 0 {
        let percent = affected_area_px as f64 / total_nail_area_px as f64 * 100.0;
        percent.clamp(0.0, 100.0)
    } else {
        // 未检测到甲板, 视作健康.
        0.0
    };

    let proximity_level = match affected.topmost_foreground_row() {
        None => 1,
        Some(top) => proximity_level_of(top, affected.height()),
    }
    .clamp(1, 5);

    GridAnalysis {
        area_percent,
        proximity_level,
        total_nail_area_px,
        affected_area_px,
    }
}
