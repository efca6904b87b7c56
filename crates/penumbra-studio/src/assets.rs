//! Procedural demo textures.
//!
//! The harness has no binary assets; it writes small PNGs into a temp
//! directory on startup so the software backend has real files to decode.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::{Rgba, RgbaImage};

pub struct DemoAssets {
    pub floor: PathBuf,
    pub lantern: PathBuf,
    pub lantern_normal: PathBuf,
    pub barrel: PathBuf,
}

pub fn write_demo_textures(dir: &Path) -> anyhow::Result<DemoAssets> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating asset dir {}", dir.display()))?;

    let assets = DemoAssets {
        floor: dir.join("floor.png"),
        lantern: dir.join("lantern.png"),
        lantern_normal: dir.join("lantern_n.png"),
        barrel: dir.join("barrel.png"),
    };

    checkerboard(64, 16, 8).save(&assets.floor).context("writing floor.png")?;
    checkerboard(16, 16, 4).save(&assets.lantern).context("writing lantern.png")?;
    dome_normal(16, 16).save(&assets.lantern_normal).context("writing lantern_n.png")?;
    checkerboard(24, 32, 6).save(&assets.barrel).context("writing barrel.png")?;

    Ok(assets)
}

fn checkerboard(width: u32, height: u32, cell: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            Rgba([200, 180, 150, 255])
        } else {
            Rgba([90, 70, 50, 255])
        }
    })
}

/// Hemisphere normal map: normals bulge toward the viewer at the center
/// and lean outward at the rim.
fn dome_normal(width: u32, height: u32) -> RgbaImage {
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    let radius = cx.min(cy);

    RgbaImage::from_fn(width, height, |x, y| {
        let dx = (x as f32 + 0.5 - cx) / radius;
        let dy = (y as f32 + 0.5 - cy) / radius;
        let d2 = dx * dx + dy * dy;
        let (nx, ny, nz) = if d2 < 1.0 {
            (dx, dy, (1.0 - d2).sqrt())
        } else {
            (0.0, 0.0, 1.0)
        };
        Rgba([
            ((nx * 0.5 + 0.5) * 255.0) as u8,
            ((ny * 0.5 + 0.5) * 255.0) as u8,
            ((nz * 0.5 + 0.5) * 255.0) as u8,
            255,
        ])
    })
}
