//! 单甲评分流水线: 把掩膜几何, 覆盖率/近端度分析, OSI
//! 分类与叠加渲染组合为每张甲板一次的调用.
//!
//! 流水线本身无状态, 执行过程中没有挂起点, 每次调用在返回前完整结束.

use super::visualize::{render_grid_overlay, render_nail_overlay};
use super::{analyze_masks, get_osi_score, GradeError, GradeResult, GridAnalysis, OsiScore};
use crate::{normalize_mask, BoundingBox, CornerBox, MaskSlice, OsiGrid};
use image::RgbImage;
use ndarray::{Array2, ArrayView2};

/// 一次完整的单甲评分产物, 交给外部持久化/UI 协作方的单元.
#[derive(Clone, Debug)]
pub struct GradingResult {
    /// OSI 评分记录.
    pub osi_score: OsiScore,

    /// 覆盖率/近端度分析结果.
    pub grid_analysis: GridAnalysis,

    /// 网格叠加可视化, 分辨率与输入照片一致.
    pub grid_visualization: RgbImage,

    /// 甲板分割叠加可视化, 分辨率与输入照片一致.
    pub nail_segmentation_visualization: RgbImage,

    /// 20 个单元格的网格定义, 行优先.
    pub grid_coordinates: OsiGrid,

    /// 解析得到的甲板外接矩形 `(x, y, 宽, 高)`.
    pub nail_bbox: BoundingBox,
}

/// 校验掩膜分辨率与照片一致.
fn check_shape(image: &RgbImage, mask: &ArrayView2<u8>) -> GradeResult<()> {
    let expected = (image.height() as usize, image.width() as usize);
    let actual = mask.dim();
    if expected == actual {
        Ok(())
    } else {
        Err(GradeError::MaskShapeMismatch(expected, actual))
    }
}

/// 对一张裁剪后的指甲照片运行完整评分流程.
///
/// # 参数
///
/// - `image`: 裁剪后的指甲彩色照片.
/// - `nail_mask`: 甲板二值掩膜, 0/1 或 0/255 编码.
/// - `affected_mask`: 患处二值掩膜. `None` 是一等公民的 "健康"
///   输入 (未检测到病变), 会得到完整的零分记录而不是错误.
/// - `detector_bbox`: 上游检测器给出的角点形式包围盒. 检测器的框
///   通常比掩膜轮廓更准, 提供时优先使用; 否则取甲板掩膜最大连通
///   区域的外接矩形; 两者都不可用时回退到整幅画面.
///
/// # 错误
///
/// 仅当掩膜分辨率与照片不符时返回
/// [`GradeError::MaskShapeMismatch`]. 其余一切退化输入
/// (全零掩膜, 无轮廓) 都按文档约定降级, 不会失败.
pub fn grade_nail(
    image: &RgbImage,
    nail_mask: ArrayView2<u8>,
    affected_mask: Option<ArrayView2<u8>>,
    detector_bbox: Option<CornerBox>,
) -> GradeResult<GradingResult> {
    check_shape(image, &nail_mask)?;
    if let Some(ref affected) = affected_mask {
        check_shape(image, affected)?;
    }

    let nail_norm = normalize_mask(nail_mask);
    let nail = MaskSlice::new(nail_norm.view());

    let affected_norm = affected_mask.map(normalize_mask);
    let blank;
    let affected = match affected_norm.as_ref() {
        Some(a) => MaskSlice::new(a.view()),
        None => {
            blank = Array2::<u8>::zeros((image.height() as usize, image.width() as usize));
            MaskSlice::new(blank.view())
        }
    };

    // 包围盒优先级: 检测器 -> 掩膜最大连通区域 -> 整幅画面.
    let nail_bbox = detector_bbox
        .map(BoundingBox::from_corners)
        .or_else(|| nail.nail_bbox())
        .unwrap_or_else(|| BoundingBox::full_frame(image.width(), image.height()));

    let grid = OsiGrid::clinical(&nail_bbox);

    let grid_analysis = analyze_masks(&nail, &affected);
    let osi_score = get_osi_score(
        grid_analysis.area_percent,
        grid_analysis.proximity_level as i32,
    );

    let affected_for_vis = affected_norm.as_ref().map(|a| MaskSlice::new(a.view()));
    let grid_visualization = render_grid_overlay(image, &grid, affected_for_vis.as_ref());
    let nail_segmentation_visualization = render_nail_overlay(image, &nail);

    Ok(GradingResult {
        osi_score,
        grid_analysis,
        grid_visualization,
        nail_segmentation_visualization,
        grid_coordinates: grid,
        nail_bbox,
    })
}

#[cfg(test)]
mod tests {
    use super::grade_nail;
    use crate::{BoundingBox, GradeError, Severity};
    use image::{Rgb, RgbImage};
    use ndarray::Array2;

    fn flat_image(size: u32) -> RgbImage {
        RgbImage::from_pixel(size, size, Rgb([100, 100, 100]))
    }

    fn full_mask(size: usize) -> Array2<u8> {
        Array2::<u8>::from_elem((size, size), 255)
    }

    fn strip_mask(size: usize, rows: std::ops::Range<usize>) -> Array2<u8> {
        let mut m = Array2::<u8>::zeros((size, size));
        for h in rows {
            m.row_mut(h).fill(255);
        }
        m
    }

    /// 掩膜分辨率不符是唯一的错误路径.
    #[test]
    fn test_shape_mismatch_is_rejected() {
        let img = flat_image(100);
        let bad = Array2::<u8>::zeros((50, 100));

        let err = grade_nail(&img, bad.view(), None, None).unwrap_err();
        assert_eq!(err, GradeError::MaskShapeMismatch((100, 100), (50, 100)));

        let nail = full_mask(100);
        let err = grade_nail(&img, nail.view(), Some(bad.view()), None).unwrap_err();
        assert_eq!(err, GradeError::MaskShapeMismatch((100, 100), (50, 100)));
    }

    /// 健康路径: 患处掩膜缺失 -> 完整的零分记录.
    #[test]
    fn test_healthy_without_affected_mask() {
        let img = flat_image(100);
        let nail = full_mask(100);

        let r = grade_nail(&img, nail.view(), None, None).unwrap();
        assert_eq!(r.osi_score.total_osi_score, 0);
        assert_eq!(r.osi_score.severity, Severity::ClinicallyCured);
        assert_eq!(r.grid_analysis.proximity_level, 1);
        assert_eq!(r.grid_analysis.total_nail_area_px, 10000);
        assert_eq!(r.grid_analysis.affected_area_px, 0);
        assert_eq!(r.grid_coordinates.cells().len(), 20);
        assert_eq!(r.grid_visualization.dimensions(), (100, 100));
        assert_eq!(r.nail_segmentation_visualization.dimensions(), (100, 100));
    }

    /// 顶部 10 行患处: 10% + 近端度 5 -> 总分 5, Mild.
    #[test]
    fn test_proximal_strip_scenario() {
        let img = flat_image(100);
        let nail = full_mask(100);
        let affected = strip_mask(100, 0..10);

        let r = grade_nail(&img, nail.view(), Some(affected.view()), None).unwrap();
        assert_eq!(r.grid_analysis.total_nail_area_px, 10000);
        assert_eq!(r.grid_analysis.affected_area_px, 1000);
        assert_eq!(r.osi_score.area_score, 1);
        assert_eq!(r.osi_score.proximity_score, 5);
        assert_eq!(r.osi_score.total_osi_score, 5);
        assert_eq!(r.osi_score.severity, Severity::Mild);
    }

    /// 底部 15 行患处: 15% + 近端度 1 -> 总分 2, Mild.
    #[test]
    fn test_distal_strip_scenario() {
        let img = flat_image(100);
        let nail = full_mask(100);
        let affected = strip_mask(100, 85..100);

        let r = grade_nail(&img, nail.view(), Some(affected.view()), None).unwrap();
        assert_eq!(r.osi_score.area_score, 2);
        assert_eq!(r.osi_score.proximity_score, 1);
        assert_eq!(r.osi_score.total_osi_score, 2);
        assert_eq!(r.osi_score.severity, Severity::Mild);
    }

    /// 包围盒优先级: 检测器的框优先于掩膜轮廓.
    #[test]
    fn test_detector_bbox_takes_precedence() {
        let img = flat_image(100);
        let nail = strip_mask(100, 40..60); // 掩膜轮廓会给出另一个框

        let r = grade_nail(&img, nail.view(), None, Some((10, 20, 90, 95))).unwrap();
        assert_eq!(r.nail_bbox, BoundingBox::from_corners((10, 20, 90, 95)));
    }

    /// 无检测器框时, 从掩膜最大连通区域解析.
    #[test]
    fn test_contour_bbox_fallback() {
        let img = flat_image(100);
        let mut nail = Array2::<u8>::zeros((100, 100));
        // 大区域 30x40, 以及一个应被忽略的孤立小块
        for h in 10..50 {
            for w in 20..50 {
                nail[(h, w)] = 255;
            }
        }
        nail[(90, 90)] = 255;

        let r = grade_nail(&img, nail.view(), None, None).unwrap();
        assert_eq!(r.nail_bbox, BoundingBox::new(20, 10, 30, 40));
    }

    /// 甲板掩膜全零: 回退到整幅画面, 且按健康记分.
    #[test]
    fn test_full_frame_fallback() {
        let img = flat_image(64);
        let nail = Array2::<u8>::zeros((64, 64));
        let affected = strip_mask(64, 0..32);

        let r = grade_nail(&img, nail.view(), Some(affected.view()), None).unwrap();
        assert_eq!(r.nail_bbox, BoundingBox::full_frame(64, 64));
        // 健康宽松规则: 无甲板 -> 面积百分比 0
        assert_eq!(r.grid_analysis.total_nail_area_px, 0);
        assert_eq!(r.osi_score.area_score, 0);
        assert_eq!(r.osi_score.severity, Severity::ClinicallyCured);
    }

    /// 0/1 编码掩膜与 0/255 编码掩膜给出相同评分.
    #[test]
    fn test_binary_encoding_equivalence() {
        let img = flat_image(100);
        let nail_255 = full_mask(100);
        let nail_1 = Array2::<u8>::from_elem((100, 100), 1);
        let affected = strip_mask(100, 0..30);

        let a = grade_nail(&img, nail_255.view(), Some(affected.view()), None).unwrap();
        let b = grade_nail(&img, nail_1.view(), Some(affected.view()), None).unwrap();
        assert_eq!(a.osi_score, b.osi_score);
        assert_eq!(a.grid_analysis, b.grid_analysis);
    }
}
