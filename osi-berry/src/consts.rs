//! 通用常量. 其中的阈值与混合权重均为临床标定值, 不应重新推导.

/// 单通道掩膜颜色.
pub mod gray {
    /// 掩膜中的背景像素值.
    pub const MASK_BACKGROUND: u8 = 0;

    /// 掩膜归一化后的前景像素值.
    pub const MASK_FOREGROUND: u8 = 255;

    /// 叠加渲染时的二值化阈值: 像素值严格大于该值才视作高亮区域.
    ///
    /// 注意面积统计使用更宽松的 `> 0` 规则, 两者有意不同.
    pub const VIS_THRESHOLD: u8 = 127;

    /// 像素是否参与面积统计?
    #[inline]
    pub const fn is_foreground(p: u8) -> bool {
        p > MASK_BACKGROUND
    }

    /// 像素是否参与叠加高亮?
    #[inline]
    pub const fn is_highlight(p: u8) -> bool {
        p > VIS_THRESHOLD
    }
}

/// 三通道 (RGB) 叠加渲染颜色.
pub mod rgb {
    /// 网格线颜色 (绿色).
    pub const GRID_ACCENT: [u8; 3] = [0, 255, 0];

    /// 患处高亮颜色 (红色).
    pub const AFFECTED_HIGHLIGHT: [u8; 3] = [255, 0, 0];

    /// 甲板高亮颜色 (白色).
    pub const NAIL_HIGHLIGHT: [u8; 3] = [255, 255, 255];

    /// 仅患处视图的高亮颜色 (黄色).
    pub const AFFECTED_ONLY_HIGHLIGHT: [u8; 3] = [255, 255, 0];
}

/// 临床网格的列数 (甲板横向分区).
pub const GRID_COLS: u32 = 4;

/// 临床网格的行数 (甲板纵向分区).
pub const GRID_ROWS: u32 = 5;

/// 网格线宽度 (像素).
pub const GRID_THICKNESS: u32 = 3;

/// 近端度比值阈值, 从远端到近端依次对应等级 1 ~ 5.
///
/// `ratio > 0.8` 为等级 1, `ratio <= 0.2` 为等级 5 (甲母质受累).
pub const PROXIMITY_THRESHOLDS: [f64; 4] = [0.8, 0.6, 0.4, 0.2];

/// 网格叠加图中原图的混合权重.
pub const GRID_BLEND_SRC: f32 = 0.85;

/// 网格叠加图中患处高亮层的混合权重.
///
/// 权重之和大于 1, 高亮区域会轻微过亮. 这是有意保留的标定值.
pub const GRID_BLEND_OVERLAY: f32 = 0.25;

/// 甲板分割叠加图中原图的混合权重.
pub const NAIL_BLEND_SRC: f32 = 0.7;

/// 甲板分割叠加图中高亮层的混合权重.
pub const NAIL_BLEND_OVERLAY: f32 = 0.3;

/// 仅患处视图中原图的混合权重.
pub const AFFECTED_ONLY_BLEND_SRC: f32 = 1.0;

/// 仅患处视图中高亮层的混合权重.
pub const AFFECTED_ONLY_BLEND_OVERLAY: f32 = 0.60;
