//! Raster overlay passes applied over the background layer, before text.
//!
//! `none`, `scanlines` and `noise` intentionally leave the buffer untouched;
//! the latter two exist only in the live preview's CSS definitions.

use crate::{
    foundation::error::{StudioError, StudioResult},
    foundation::geometry::Canvas,
    render::composite::over,
    scene::catalog::{OverlayEffect, RasterOverlay},
    scene::color::Rgba8,
};

/// Inner vignette radius as a fraction of canvas height: fully transparent
/// out to here.
const VIGNETTE_INNER: f64 = 0.30;
/// Outer vignette radius as a fraction of canvas height, where the ramp
/// reaches full strength.
const VIGNETTE_OUTER: f64 = 0.80;
/// Black alpha at the outer radius.
const VIGNETTE_ALPHA: f64 = 0.80;

pub fn apply(data: &mut [u8], canvas: Canvas, effect: &OverlayEffect) -> StudioResult<()> {
    let expected = (canvas.width as usize)
        .checked_mul(canvas.height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| StudioError::render("overlay buffer size overflow"))?;
    if data.len() != expected {
        return Err(StudioError::render(
            "overlay pass expects buffer matching width*height*4",
        ));
    }

    match effect.raster {
        RasterOverlay::None => Ok(()),
        RasterOverlay::Vignette => {
            vignette(data, canvas);
            Ok(())
        }
        RasterOverlay::Tint(color) => {
            tint(data, color);
            Ok(())
        }
    }
}

fn tint(data: &mut [u8], color: Rgba8) {
    let src = color.to_premul();
    for px in data.chunks_exact_mut(4) {
        let out = over([px[0], px[1], px[2], px[3]], src);
        px.copy_from_slice(&out);
    }
}

fn vignette(data: &mut [u8], canvas: Canvas) {
    let cx = f64::from(canvas.width) / 2.0;
    let cy = f64::from(canvas.height) / 2.0;
    let inner = f64::from(canvas.height) * VIGNETTE_INNER;
    let outer = f64::from(canvas.height) * VIGNETTE_OUTER;
    let span = outer - inner;

    let w = canvas.width as usize;
    for (y, row) in data.chunks_exact_mut(w * 4).enumerate() {
        let dy = y as f64 + 0.5 - cy;
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            let dx = x as f64 + 0.5 - cx;
            let dist = (dx * dx + dy * dy).sqrt();
            let t = ((dist - inner) / span).clamp(0.0, 1.0);
            if t <= 0.0 {
                continue;
            }
            let a = (t * VIGNETTE_ALPHA * 255.0).round() as u8;
            let out = over([px[0], px[1], px[2], px[3]], [0, 0, 0, a]);
            px.copy_from_slice(&out);
        }
    }
}
