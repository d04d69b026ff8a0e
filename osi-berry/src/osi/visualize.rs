//! 叠加渲染: 网格叠加图, 甲板分割叠加图与仅患处视图.
//!
//! 混合权重均为固定标定值且不做归一化. 网格叠加图的权重之和大于 1,
//! 高亮区域会轻微过亮; 这是有意保留的视觉风格.

use crate::consts::{
    gray, rgb, AFFECTED_ONLY_BLEND_OVERLAY, AFFECTED_ONLY_BLEND_SRC, GRID_BLEND_OVERLAY,
    GRID_BLEND_SRC, GRID_THICKNESS, NAIL_BLEND_OVERLAY, NAIL_BLEND_SRC,
};
use crate::{MaskSlice, OsiGrid};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

/// 按 `alpha * a + beta * b` 逐通道混合两幅同分辨率图像,
/// 四舍五入后饱和截断到 `[0, 255]`.
///
/// 混合作用于整幅画面 (与高亮层的零像素混合会轻微压暗原图),
/// 与历史渲染逐位保持一致.
///
/// 两幅图像分辨率不同时程序 panic.
pub fn add_weighted(a: &RgbImage, alpha: f32, b: &RgbImage, beta: f32) -> RgbImage {
    assert_eq!(a.dimensions(), b.dimensions(), "混合图像分辨率不符");

    let mut out = RgbImage::new(a.width(), a.height());
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let pa = a.get_pixel(x, y);
        let pb = b.get_pixel(x, y);
        let mut blended = [0u8; 3];
        for c in 0..3 {
            let v = alpha * pa[c] as f32 + beta * pb[c] as f32;
            blended[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        *pixel = Rgb(blended);
    }
    out
}

/// 以 `color` 为高亮色, 构造与 `image` 同分辨率的高亮层:
/// 掩膜超过可视化阈值的像素取 `color`, 其余为全零.
fn highlight_layer(image: &RgbImage, mask: &MaskSlice, color: [u8; 3]) -> RgbImage {
    let mut layer = RgbImage::new(image.width(), image.height());
    for ((h, w), &pix) in mask.array_view().indexed_iter() {
        if gray::is_highlight(pix) {
            layer.put_pixel(w as u32, h as u32, Rgb(color));
        }
    }
    layer
}

/// 在 `image` 上用加粗线条绘制所有网格单元格边框.
///
/// 线宽 3 像素, 以理想边框为中心向内外各扩 1 像素, 越界部分自动裁剪.
pub fn draw_grid(image: &mut RgbImage, grid: &OsiGrid) {
    let accent = Rgb(rgb::GRID_ACCENT);
    let radius = (GRID_THICKNESS / 2) as i32;

    for &((x1, y1), (x2, y2)) in grid.cells() {
        for d in -radius..=radius {
            // 角点坐标为闭区间: (x2, y2) 本身也在边框上.
            let w = x2 as i32 - x1 as i32 + 1 + 2 * d;
            let h = y2 as i32 - y1 as i32 + 1 + 2 * d;
            if w <= 0 || h <= 0 {
                continue;
            }
            let rect = Rect::at(x1 as i32 - d, y1 as i32 - d).of_size(w as u32, h as u32);
            draw_hollow_rect_mut(image, rect, accent);
        }
    }
}

/// 渲染网格叠加图: 在原图上绘制 20 个单元格边框,
/// 并 (若有患处掩膜) 以红色高亮患处区域.
///
/// 患处掩膜缺失时只绘制网格, 不做任何混合.
pub fn render_grid_overlay(
    image: &RgbImage,
    grid: &OsiGrid,
    affected: Option<&MaskSlice>,
) -> RgbImage {
    let mut out = image.clone();
    draw_grid(&mut out, grid);

    match affected {
        Some(mask) => {
            let layer = highlight_layer(&out, mask, rgb::AFFECTED_HIGHLIGHT);
            add_weighted(&out, GRID_BLEND_SRC, &layer, GRID_BLEND_OVERLAY)
        }
        None => out,
    }
}

/// 渲染甲板分割叠加图: 以白色半透明高亮甲板掩膜区域.
pub fn render_nail_overlay(image: &RgbImage, nail: &MaskSlice) -> RgbImage {
    let layer = highlight_layer(image, nail, rgb::NAIL_HIGHLIGHT);
    add_weighted(image, NAIL_BLEND_SRC, &layer, NAIL_BLEND_OVERLAY)
}

/// 渲染仅患处视图: 只以黄色高亮患处, 不绘制任何甲板边界.
pub fn render_affected_only(image: &RgbImage, affected: &MaskSlice) -> RgbImage {
    let layer = highlight_layer(image, affected, rgb::AFFECTED_ONLY_HIGHLIGHT);
    add_weighted(image, AFFECTED_ONLY_BLEND_SRC, &layer, AFFECTED_ONLY_BLEND_OVERLAY)
}
