//! 二值掩膜的几何工具.
//!
//! 掩膜由外部分割模型产出, 约定为与指甲照片同分辨率的 `u8` 栅格.
//! 前景既可能标记为 `1` 也可能标记为 `255`; [`normalize_mask`]
//! 负责统一到 0/255 形式.

use crate::consts::gray::*;
use crate::grid::BoundingBox;
use crate::{Area2d, Areas2d, Idx2d};
use image::ImageResult;
use ndarray::{ArrayView2, CowArray, Ix2};
use std::collections::{HashSet, VecDeque};
use std::ops::Index;
use std::path::Path;

/// 获得 `(h, w)` 的 8-邻居索引. 不检查越界.
#[inline]
fn neighbour8((h, w): Idx2d) -> [Idx2d; 8] {
    [
        (h.wrapping_sub(1), w.wrapping_sub(1)),
        (h.wrapping_sub(1), w),
        (h.wrapping_sub(1), w.saturating_add(1)),
        (h, w.wrapping_sub(1)),
        (h, w.saturating_add(1)),
        (h.saturating_add(1), w.wrapping_sub(1)),
        (h.saturating_add(1), w),
        (h.saturating_add(1), w.saturating_add(1)),
    ]
}

/// 将掩膜归一化到 0/255 形式.
///
/// 若栅格的最大像素值不超过 1 (即 0/1 编码), 则整体放大 255 倍并
/// 返回拥有所有权的副本; 否则认为已经是 8-bit 编码, 按原样借用返回.
pub fn normalize_mask(mask: ArrayView2<u8>) -> CowArray<u8, Ix2> {
    let max = mask.iter().copied().max().unwrap_or(0);
    if max <= 1 {
        CowArray::from(mask.mapv(|p| p * MASK_FOREGROUND))
    } else {
        CowArray::from(mask)
    }
}

/// 不可变、借用的二值掩膜切片.
///
/// 与底层数据的关系类似一个轻量级视图: 创建和复制都是廉价的.
/// 所有统计方法都以 `> 0` 作为前景判定, 因此 0/1 与 0/255
/// 编码的掩膜在统计意义上等价.
pub struct MaskSlice<'a> {
    data: ArrayView2<'a, u8>,
}

impl Index<Idx2d> for MaskSlice<'_> {
    type Output = u8;

    #[inline]
    fn index(&self, index: Idx2d) -> &Self::Output {
        &self.data[index]
    }
}

impl<'a> MaskSlice<'a> {
    /// 直接初始化.
    #[inline]
    pub fn new(data: ArrayView2<'a, u8>) -> Self {
        Self { data }
    }

    /// 获得 **底层** 数据的一份不可变 shallow copy.
    #[inline]
    pub fn array_view(&self) -> ArrayView2<u8> {
        self.data.view()
    }

    /// 掩膜的分辨率 (高, 宽).
    #[inline]
    pub fn shape(&self) -> Idx2d {
        let &[h, w] = self.data.shape() else {
            unreachable!()
        };
        (h, w)
    }

    /// 获得掩膜的高.
    #[inline]
    pub fn height(&self) -> usize {
        self.shape().0
    }

    /// 获得掩膜的宽.
    #[inline]
    pub fn width(&self) -> usize {
        self.shape().1
    }

    /// 掩膜的像素个数.
    #[inline]
    pub fn size(&self) -> usize {
        let (h, w) = self.shape();
        h * w
    }

    /// 获取给定位置 (高, 宽) 的像素值. 越界时返回 `None`.
    #[inline]
    pub fn get(&self, pos: Idx2d) -> Option<&u8> {
        self.data.get(pos)
    }

    /// 判断一个索引是否合法 (未越界).
    #[inline]
    pub fn check(&self, (h, w): Idx2d) -> bool {
        let (h_len, w_len) = self.shape();
        h < h_len && w < w_len
    }

    /// 该掩膜是否为全背景图?
    #[inline]
    pub fn is_blank(&self) -> bool {
        !self.data.iter().copied().any(is_foreground)
    }

    /// 统计掩膜中的前景像素总个数.
    #[inline]
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&p| is_foreground(p)).count()
    }

    /// 自上而下扫描, 返回第一个含有前景像素的行索引.
    /// 全背景图返回 `None`.
    pub fn topmost_foreground_row(&self) -> Option<usize> {
        self.data
            .rows()
            .into_iter()
            .position(|row| row.iter().copied().any(is_foreground))
    }

    /// 获得 `pos` 的 8-邻域像素索引. 保证返回的索引都不越界.
    fn n8_positions(&self, pos: Idx2d) -> Vec<Idx2d> {
        neighbour8(pos)
            .into_iter()
            .filter(|p| self.check(*p))
            .collect()
    }

    /// 按照 8-相邻规则获取所有前景区域. 两个像素 `p1` 和 `p2`
    /// 属于同一个区域, 当且仅当存在一条从 `p1` 到 `p2` 的 8-相邻路径,
    /// 且路径上的所有像素 (包括 `p1` 和 `p2`) 都是前景.
    pub fn foreground_areas(&self) -> Areas2d {
        let mut ans = Areas2d::with_capacity(1);
        let mut bfs_q = VecDeque::with_capacity(4);
        let mut set = HashSet::with_capacity(16);

        for (pos, &pix) in self.data.indexed_iter() {
            if set.contains(&pos) || !is_foreground(pix) {
                continue;
            }
            bfs_q.push_back(pos);
            let mut this_area = Area2d::with_capacity(1);
            while let Some(cur_pos) = bfs_q.pop_front() {
                if set.contains(&cur_pos) {
                    continue;
                }
                set.insert(cur_pos);
                this_area.push(cur_pos);
                bfs_q.extend(
                    self.n8_positions(cur_pos)
                        .into_iter()
                        .filter(|p| is_foreground(self[*p]) && !set.contains(p)),
                );
            }
            ans.push(this_area);
        }
        ans
    }

    /// 解析甲板外接矩形: 取最大 (像素数最多) 的 8-连通前景区域,
    /// 返回其轴对齐外接矩形.
    ///
    /// 全背景图没有任何区域, 返回 `None`, 由调用方回退到整幅画面.
    pub fn nail_bbox(&self) -> Option<BoundingBox> {
        let areas = self.foreground_areas();
        let largest = areas.iter().max_by_key(|a| a.len())?;
        debug_assert!(!largest.is_empty());

        let (mut h_min, mut w_min) = (usize::MAX, usize::MAX);
        let (mut h_max, mut w_max) = (0usize, 0usize);
        for &(h, w) in largest.iter() {
            h_min = h_min.min(h);
            w_min = w_min.min(w);
            h_max = h_max.max(h);
            w_max = w_max.max(w);
        }
        Some(BoundingBox::new(
            w_min as u32,
            h_min as u32,
            (w_max - w_min + 1) as u32,
            (h_max - h_min + 1) as u32,
        ))
    }
}

/// 表明一个可以通过 **可视化友好** 模式持久化存储的图像对象.
///
/// 对于只含 0/1 或 0/255 像素的掩膜, 保存时前景会映射为白色,
/// 背景映射为黑色, 便于肉眼检查.
pub trait ImgWriteVis {
    /// 按照一定的可视化规则将图片保存到 `path` 路径.
    fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()>;
}

/// 表明一个可以通过 **按原样** 模式持久化存储的图像对象.
pub trait ImgWriteRaw {
    /// 按原样将图片保存到 `path` 路径.
    fn save_raw<P: AsRef<Path>>(&self, path: P) -> ImageResult<()>;
}

/// 前景 (任何非零像素) 映射为白色, 背景映射为黑色.
impl ImgWriteVis for MaskSlice<'_> {
    fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        let (height, width) = self.shape();
        let mut buf = image::GrayImage::new(width as u32, height as u32);
        for ((h, w), &pix) in self.data.indexed_iter() {
            let vis = if is_foreground(pix) {
                MASK_FOREGROUND
            } else {
                MASK_BACKGROUND
            };
            buf.put_pixel(w as u32, h as u32, image::Luma([vis]));
        }
        buf.save(path)
    }
}

/// 按原样存储.
impl ImgWriteRaw for MaskSlice<'_> {
    fn save_raw<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        let (height, width) = self.shape();
        let mut buf = image::GrayImage::new(width as u32, height as u32);
        for ((h, w), &pix) in self.data.indexed_iter() {
            buf.put_pixel(w as u32, h as u32, image::Luma([pix]));
        }
        buf.save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_mask, MaskSlice};
    use ndarray::{arr2, Array2};

    /// 测试 0/1 编码掩膜的归一化.
    #[test]
    fn test_normalize_binary_mask() {
        let raw = arr2(&[[0u8, 1, 0], [1, 1, 0]]);
        let norm = normalize_mask(raw.view());
        assert_eq!(norm[(0, 1)], 255);
        assert_eq!(norm[(1, 0)], 255);
        assert_eq!(norm[(0, 0)], 0);
    }

    /// 测试 8-bit 编码掩膜按原样借用.
    #[test]
    fn test_normalize_uint8_mask() {
        let raw = arr2(&[[0u8, 255], [200, 0]]);
        let norm = normalize_mask(raw.view());
        assert!(norm.is_view());
        assert_eq!(norm[(1, 0)], 200);
    }

    /// 全零掩膜归一化后仍为全零.
    #[test]
    fn test_normalize_blank_mask() {
        let raw = Array2::<u8>::zeros((4, 4));
        let norm = normalize_mask(raw.view());
        assert!(norm.iter().all(|&p| p == 0));
    }

    /// 测试前景统计与最顶行扫描.
    #[test]
    fn test_foreground_statistics() {
        let raw = arr2(&[
            [0u8, 0, 0, 0],
            [0, 0, 255, 0],
            [0, 255, 255, 0],
            [0, 0, 0, 0],
        ]);
        let mask = MaskSlice::new(raw.view());
        assert_eq!(mask.foreground_count(), 3);
        assert_eq!(mask.topmost_foreground_row(), Some(1));
        assert!(!mask.is_blank());

        let blank = Array2::<u8>::zeros((4, 4));
        let blank = MaskSlice::new(blank.view());
        assert!(blank.is_blank());
        assert_eq!(blank.foreground_count(), 0);
        assert_eq!(blank.topmost_foreground_row(), None);
    }

    /// 测试 8-连通区域分组: 两个独立区域, 外接矩形取较大者.
    #[test]
    fn test_largest_area_bbox() {
        let raw = arr2(&[
            [255u8, 0, 0, 0, 0, 0],
            [0, 0, 0, 255, 255, 0],
            [0, 0, 0, 255, 255, 0],
            [0, 0, 0, 0, 255, 255],
        ]);
        let mask = MaskSlice::new(raw.view());
        let areas = mask.foreground_areas();
        assert_eq!(areas.len(), 2);

        let bbox = mask.nail_bbox().unwrap();
        assert_eq!((bbox.x(), bbox.y()), (3, 1));
        assert_eq!((bbox.w(), bbox.h()), (3, 3));
    }

    /// 对角相邻的像素属于同一 8-连通区域.
    #[test]
    fn test_diagonal_connectivity() {
        let raw = arr2(&[[255u8, 0, 0], [0, 255, 0], [0, 0, 255]]);
        let mask = MaskSlice::new(raw.view());
        assert_eq!(mask.foreground_areas().len(), 1);
    }

    /// 全背景图没有外接矩形.
    #[test]
    fn test_blank_has_no_bbox() {
        let raw = Array2::<u8>::zeros((8, 8));
        let mask = MaskSlice::new(raw.view());
        assert!(mask.nail_bbox().is_none());
    }
}
