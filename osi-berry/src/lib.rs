#![warn(missing_docs)] // <= 合适时移除它.

//! 核心库. 提供甲真菌病 (onychomycosis, 俗称灰指甲) 严重程度评分
//! (Onychomycosis Severity Index, OSI) 的完整计算流程.
//!
//! 输入为外部分割模型产出的两张二值掩膜 (甲板掩膜 + 患处掩膜)
//! 以及裁剪后的指甲照片; 输出为 OSI 评分记录与两张叠加可视化图像.
//! 相机采集, 模型推理, 持久化与 UI 均为外部协作方, 不在本 crate 范围内.
//!
//! # 注意
//!
//! 1. 评分流程被设计为 "永不拒绝评分": 退化的几何输入 (无轮廓, 全零掩膜)
//!   会回退到文档中约定的健康默认值, 越界数值会被钳制而不是报错.
//!   唯一的错误路径是掩膜分辨率与照片不符 ([`GradeError::MaskShapeMismatch`]).
//! 2. 每次调用独立且无共享状态. 并发调用方只需保证各自持有独立的缓冲区.
//!
//! # 流程
//!
//! ### 掩膜几何 ✅
//!
//! 归一化, 前景统计, 最大 8-连通区域外接矩形.
//!
//! 实现位于 `osi-berry/src/mask.rs`.
//!
//! ### 临床网格 ✅
//!
//! 在甲板外接矩形上划分 4 列 x 5 行共 20 个单元格.
//! 单元格只用于可视化与结果记录, 不参与评分公式.
//!
//! 实现位于 `osi-berry/src/grid.rs`.
//!
//! ### 覆盖率与近端度分析 ✅
//!
//! 患处面积百分比与近端度等级 (proximity level, 1 = 远端游离缘,
//! 5 = 甲母质受累).
//!
//! 实现位于 `osi-berry/src/osi/analyze.rs`.
//!
//! ### OSI 分类 ✅
//!
//! `总分 = 面积分 x 近端分`, 映射到四档严重程度.
//!
//! 实现位于 `osi-berry/src/osi/score.rs`.
//!
//! ### 叠加渲染与单甲流水线 ✅
//!
//! 网格叠加图, 甲板分割叠加图, 以及把上述步骤组合为单次调用的
//! [`grade_nail`].
//!
//! 实现位于 `osi-berry/src/osi/{visualize, pipeline}.rs`.

/// 二维索引 (高, 宽), 同时也可一定程度上用作非负整数向量.
pub type Idx2d = (usize, usize);

/// 像素坐标系中的点 `(x, y)`. 注意与 [`Idx2d`] 的分量顺序相反.
pub type Point2d = (u32, u32);

type Area2d = Vec<Idx2d>;
type Areas2d = Vec<Area2d>;

pub mod consts;

mod mask;

pub use mask::{normalize_mask, ImgWriteRaw, ImgWriteVis, MaskSlice};

#[cfg(feature = "plot")]
mod mask_plot;

#[cfg(feature = "plot")]
pub use mask_plot::ImgDisplay;

mod grid;

pub use grid::{BoundingBox, CornerBox, GridCell, OsiGrid};

pub mod osi;

pub use osi::{
    analyze_masks, get_osi_score, grade_nail, GradeError, GradeResult, GradingResult,
    GridAnalysis, OsiScore, Severity,
};

pub mod prelude;
