//! 单甲评分命令行工具.
//!
//! 读取指甲照片与分割掩膜, 运行一次 OSI 评分, 打印 JSON
//! 记录并保存两张叠加可视化图像.
//!
//! 用法: `grader <指甲照片> <甲板掩膜> [患处掩膜|-] [输出目录]`
//!
//! 患处掩膜传 `-` (或省略) 表示未检测到病变, 按健康评分.

use image::RgbImage;
use ndarray::Array2;
use osi_berry::prelude::*;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// 读取单通道掩膜文件为 (高, 宽) 栅格.
fn load_mask(path: &Path) -> Result<Array2<u8>, Box<dyn Error>> {
    let luma = image::open(path)?.to_luma8();
    let (w, h) = luma.dimensions();
    let arr = Array2::from_shape_vec((h as usize, w as usize), luma.into_raw())?;
    Ok(arr)
}

fn run(
    image_path: &Path,
    nail_path: &Path,
    affected_path: Option<&Path>,
    out_dir: &Path,
) -> Result<(), Box<dyn Error>> {
    let photo: RgbImage = image::open(image_path)?.to_rgb8();
    println!(
        "Loaded nail photo {} ({} x {})",
        image_path.display(),
        photo.width(),
        photo.height()
    );

    let nail_mask = load_mask(nail_path)?;
    let affected_mask = match affected_path {
        Some(p) => Some(load_mask(p)?),
        None => {
            println!("No affected mask supplied, grading as healthy");
            None
        }
    };

    let result = grade_nail(
        &photo,
        nail_mask.view(),
        affected_mask.as_ref().map(|m| m.view()),
        None,
    )?;

    let record = serde_json::json!({
        "osi_score": result.osi_score,
        "grid_analysis": result.grid_analysis,
        "grid_coordinates": result.grid_coordinates,
        "nail_bbox": result.nail_bbox,
    });
    println!("{}", serde_json::to_string_pretty(&record)?);

    std::fs::create_dir_all(out_dir)?;
    let grid_out = out_dir.join("grid_visualization.png");
    let nail_out = out_dir.join("nail_segmentation_visualization.png");
    result.grid_visualization.save(&grid_out)?;
    result.nail_segmentation_visualization.save(&nail_out)?;
    println!("Saved {} and {}", grid_out.display(), nail_out.display());

    println!(
        "OSI {} -> {}",
        result.osi_score.total_osi_score, result.osi_score.severity
    );
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 || args.len() > 4 {
        eprintln!("用法: grader <指甲照片> <甲板掩膜> [患处掩膜|-] [输出目录]");
        return ExitCode::from(2);
    }

    let image_path = PathBuf::from(&args[0]);
    let nail_path = PathBuf::from(&args[1]);
    let affected_path = args
        .get(2)
        .filter(|s| s.as_str() != "-")
        .map(PathBuf::from);
    let out_dir = args
        .get(3)
        .map_or_else(|| PathBuf::from("."), PathBuf::from);

    match run(&image_path, &nail_path, affected_path.as_deref(), &out_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Grading failed: {e}");
            ExitCode::FAILURE
        }
    }
}
