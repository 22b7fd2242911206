//! Declarative style computation for the interactive preview surface.
//!
//! The preview renders the same scene the compositor rasterizes, via live
//! styling instead of pixels. Everything positional here is derived from
//! [`crate::foundation::geometry`], the same module the raster path uses, so
//! the two cannot drift on transform order, anchors or text metrics.
//!
//! Some flourishes exist only on this path: the `scanlines` and `noise`
//! overlays, the cinematic dimming gradient, and the placeholder title shown
//! while the real title is empty. None of them are baked into exports.

use crate::{
    foundation::error::StudioResult,
    foundation::geometry::{self, HorizontalAlign, VerticalAlign},
    scene::catalog,
    scene::model::Scene,
};

/// Title text shown by the preview when the scene's title is empty. Never
/// exported.
pub const PLACEHOLDER_TITLE: &str = "TÍTULO AQUI";

/// Preview-only dimming layer over the background image.
pub const DIMMING_CSS: &str =
    "linear-gradient(to top, rgba(0,0,0,0.6), transparent 50%, rgba(0,0,0,0.3))";

/// Computed styling for the preview surface, CSS-shaped.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewStyle {
    /// `translate(..) scale(..) rotate(..)` — same composition order as the
    /// raster transform.
    pub transform: String,
    pub text_align: &'static str,
    pub align_items: &'static str,
    pub justify_content: &'static str,
    pub font_family: &'static str,
    /// Title string to display; falls back to [`PLACEHOLDER_TITLE`].
    pub title_text: String,
    pub title_color: String,
    pub subtitle_color: String,
    /// Combined glow + soft drop shadow.
    pub text_shadow: String,
    /// Overlay background, absent for `none`.
    pub overlay_css: Option<&'static str>,
    pub dimming_css: &'static str,
}

pub fn preview_style(scene: &Scene) -> StudioResult<PreviewStyle> {
    scene.validate()?;
    let colors = scene.resolved_colors()?;
    let face = catalog::font(&scene.font).ok_or_else(|| {
        crate::foundation::error::StudioError::validation(format!(
            "unknown font id '{}'",
            scene.font
        ))
    })?;
    let effect = catalog::overlay_effect(&scene.overlay).ok_or_else(|| {
        crate::foundation::error::StudioError::validation(format!(
            "unknown overlay effect id '{}'",
            scene.overlay
        ))
    })?;

    let p = &scene.placement;
    let transform = format!(
        "translate({}px, {}px) scale({}) rotate({}deg)",
        p.x_offset, p.y_offset, p.scale, p.rotation_deg
    );

    let glow = match scene.palette() {
        Some(palette) => palette.text_shadow.to_string(),
        None => format!(
            "0 {}px {}px {}",
            geometry::GLOW_OFFSET_Y,
            geometry::GLOW_BLUR_PX,
            colors.shadow.to_hex()
        ),
    };
    let text_shadow = format!(
        "{glow}, 0 {}px {}px rgba(0,0,0,{})",
        geometry::DROP_OFFSET_Y,
        geometry::DROP_BLUR_PX,
        geometry::DROP_SHADOW_ALPHA
    );

    Ok(PreviewStyle {
        transform,
        text_align: match p.h_align {
            HorizontalAlign::Left => "left",
            HorizontalAlign::Center => "center",
            HorizontalAlign::Right => "right",
        },
        align_items: match p.h_align {
            HorizontalAlign::Left => "flex-start",
            HorizontalAlign::Center => "center",
            HorizontalAlign::Right => "flex-end",
        },
        justify_content: match p.v_align {
            VerticalAlign::Top => "flex-start",
            VerticalAlign::Center => "center",
            VerticalAlign::Bottom => "flex-end",
        },
        font_family: face.family,
        title_text: if scene.title.trim().is_empty() {
            PLACEHOLDER_TITLE.to_string()
        } else {
            scene.title.clone()
        },
        title_color: colors.title.to_hex(),
        subtitle_color: colors.subtitle.to_hex(),
        text_shadow,
        overlay_css: (!effect.css.is_empty()).then_some(effect.css),
        dimming_css: DIMMING_CSS,
    })
}
