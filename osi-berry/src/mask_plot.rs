//! 掩膜窗口展示模块, 主要用于调试.
//!
//! # 注意
//!
//! 需要 `plot` feature.

use crate::consts::gray::*;
use crate::{Idx2d, MaskSlice};
use opencv::highgui::{imshow, wait_key};
use opencv::prelude::{Mat, MatTraitConst};
use std::time::Duration;

/// 表明一个可以在窗口中可视化的对象.
pub trait ImgDisplay {
    /// 展示对象.
    fn show(&self);

    /// 同 `show()`, 但在之后自动等待一次用户按键输入.
    fn show_and_wait(&self) {
        self.show();
        wait_key(0).unwrap(); // never fails
    }

    /// 同 `show()`, 但在之后自动等待给定时间.
    fn show_and_wait_for(&self, d: Duration) -> opencv::Result<i32> {
        self.show();
        let ms = d.as_millis();
        assert!(ms <= i32::MAX as u128);
        wait_key(ms as i32)
    }
}

/// 将掩膜按行优先格式, 以 `shape` 分辨率存储为矩阵.
/// 会额外进行可视化友好的像素转换 (前景映射为白色).
fn mask_to_opencv_mat(data: &[u8], (h, w): Idx2d) -> Mat {
    assert_eq!(data.len(), h * w);
    let pretty: Vec<u8> = data
        .iter()
        .map(|&p| {
            if is_foreground(p) {
                MASK_FOREGROUND
            } else {
                MASK_BACKGROUND
            }
        })
        .collect();
    let mat = Mat::from_slice_rows_cols(&pretty, h, w).unwrap();

    let size = mat.size().unwrap();
    debug_assert_eq!(size.height as usize, h);
    debug_assert_eq!(size.width as usize, w);
    mat
}

/// 为了获得更清晰的可视化对象, 展示前前景像素会映射为白色, 背景为黑色.
impl ImgDisplay for MaskSlice<'_> {
    fn show(&self) {
        let view = self.array_view();
        let mat = if let Some(sli) = view.as_slice() {
            mask_to_opencv_mat(sli, self.shape())
        } else {
            let owned = view.to_owned();
            mask_to_opencv_mat(owned.as_slice().unwrap(), self.shape())
        };
        imshow("Mask", &mat).unwrap();
    }
}
