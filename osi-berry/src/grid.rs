//! 甲板外接矩形与临床网格.
//!
//! 网格固定为 4 列 x 5 行共 20 个单元格, 覆盖甲板外接矩形.
//! 单元格角点坐标由浮点单元格尺寸截断取整得到, 因此末行/末列
//! 可能比其余单元格窄/矮 1 像素. 该截断行为必须保留,
//! 以保证网格渲染与历史记录逐位一致.

use crate::consts::{GRID_COLS, GRID_ROWS};
use crate::Point2d;
use itertools::Itertools;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 外部检测器提供的角点形式包围盒 `(x1, y1, x2, y2)`.
pub type CornerBox = (u32, u32, u32, u32);

/// 单个网格单元, 由左上角与右下角两个 `(x, y)` 点定义.
pub type GridCell = (Point2d, Point2d);

/// 甲板的轴对齐外接矩形, `(x, y)` 为左上角, 单位为像素.
///
/// 该结构是只读的. 每次评分调用重新解析一次, 不做持久化.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

impl BoundingBox {
    /// 直接以 `(x, y, 宽, 高)` 初始化.
    #[inline]
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// 从检测器的角点形式 `(x1, y1, x2, y2)` 转换.
    ///
    /// 约定 `x2 >= x1` 且 `y2 >= y1`, 否则程序 panic.
    pub fn from_corners((x1, y1, x2, y2): CornerBox) -> Self {
        assert!(x2 >= x1 && y2 >= y1, "角点顺序非法: ({x1}, {y1}, {x2}, {y2})");
        Self {
            x: x1,
            y: y1,
            w: x2 - x1,
            h: y2 - y1,
        }
    }

    /// 覆盖整幅画面的包围盒, 用于轮廓解析失败时的回退.
    #[inline]
    pub fn full_frame(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            w: width,
            h: height,
        }
    }

    /// 左上角横坐标.
    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    /// 左上角纵坐标.
    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    /// 宽度.
    #[inline]
    pub fn w(&self) -> u32 {
        self.w
    }

    /// 高度.
    #[inline]
    pub fn h(&self) -> u32 {
        self.h
    }
}

/// 覆盖甲板外接矩形的临床网格.
///
/// 单元格按行优先顺序排列 (自上而下, 每行自左向右).
/// 当前评分公式并不消费单元格本身; 网格只用于叠加可视化
/// 与结果记录中的 `grid_coordinates` 字段.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OsiGrid {
    cols: u32,
    rows: u32,
    cells: Vec<GridCell>,
}

impl OsiGrid {
    /// 以临床约定的 4 列 x 5 行在 `bbox` 上构建网格.
    #[inline]
    pub fn clinical(bbox: &BoundingBox) -> Self {
        Self::with_dims(bbox, GRID_COLS, GRID_ROWS)
    }

    /// 以给定列数与行数在 `bbox` 上构建网格.
    ///
    /// `cols` 和 `rows` 必须为正, 否则程序 panic.
    /// 对于非退化的 `bbox`, 该操作总是成功.
    pub fn with_dims(bbox: &BoundingBox, cols: u32, rows: u32) -> Self {
        assert!(cols > 0 && rows > 0, "网格规模非法: {cols} x {rows}");

        let (x, y) = (bbox.x() as f64, bbox.y() as f64);
        let cell_w = bbox.w() as f64 / cols as f64;
        let cell_h = bbox.h() as f64 / rows as f64;

        let cells = (0..rows)
            .cartesian_product(0..cols)
            .map(|(row, col)| {
                let x1 = (x + col as f64 * cell_w) as u32;
                let y1 = (y + row as f64 * cell_h) as u32;
                let x2 = (x + (col + 1) as f64 * cell_w) as u32;
                let y2 = (y + (row + 1) as f64 * cell_h) as u32;
                ((x1, y1), (x2, y2))
            })
            .collect();

        Self { cols, rows, cells }
    }

    /// 列数.
    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// 行数.
    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// 行优先顺序的所有单元格.
    #[inline]
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// 获取第 `row` 行第 `col` 列的单元格. 越界时 panic.
    #[inline]
    pub fn cell(&self, row: u32, col: u32) -> GridCell {
        assert!(row < self.rows && col < self.cols);
        self.cells[(row * self.cols + col) as usize]
    }
}
