//! Layout math shared by the raster compositor and the declarative preview
//! style. Both rendering paths consume these constants and helpers, so anchor
//! placement, transform order and text metrics cannot drift between them.

use kurbo::{Affine, Rect, Vec2};

/// Output raster dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn center(self) -> Vec2 {
        Vec2::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Horizontal safe-area bound as a fraction of canvas width from center.
pub const SAFE_AREA_X: f64 = 0.40;
/// Vertical safe-area bound as a fraction of canvas height from center.
pub const SAFE_AREA_Y: f64 = 0.35;

/// Title font size as a fraction of output height.
pub const TITLE_SIZE_RATIO: f64 = 0.15;
/// Subtitle font size as a fraction of the title font size.
pub const SUBTITLE_SIZE_RATIO: f64 = 0.30;
/// How far above the title anchor the subtitle sits, in title-size units.
pub const SUBTITLE_RISE_RATIO: f64 = 0.80;
/// Title outline stroke width as a fraction of output height.
pub const TITLE_STROKE_RATIO: f64 = 0.005;

/// Badge horizontal padding per side, as a fraction of measured text width.
pub const BADGE_PAD_RATIO: f64 = 0.20;
/// Badge height as a fraction of the title font size.
pub const BADGE_HEIGHT_RATIO: f64 = 0.50;
/// Horizontal shear of the subtitle badge parallelogram.
pub const BADGE_SHEAR: f64 = -0.2;

/// Colored glow shadow: blur radius and downward offset, device pixels.
pub const GLOW_BLUR_PX: u32 = 10;
pub const GLOW_OFFSET_Y: f64 = 10.0;
/// Large soft drop shadow: blur radius, downward offset, and black alpha.
pub const DROP_BLUR_PX: u32 = 40;
pub const DROP_OFFSET_Y: f64 = 10.0;
pub const DROP_SHADOW_ALPHA: f64 = 0.8;

pub fn title_size(canvas: Canvas) -> f64 {
    f64::from(canvas.height) * TITLE_SIZE_RATIO
}

pub fn subtitle_size(title_size: f64) -> f64 {
    title_size * SUBTITLE_SIZE_RATIO
}

pub fn title_stroke_width(canvas: Canvas) -> f64 {
    f64::from(canvas.height) * TITLE_STROKE_RATIO
}

/// Text anchor relative to the canvas center, clamped to the safe area.
///
/// Left/Top map to the negative bound, Right/Bottom to the positive bound,
/// Center to zero.
pub fn anchor_point(canvas: Canvas, h: HorizontalAlign, v: VerticalAlign) -> Vec2 {
    let x_bound = f64::from(canvas.width) * SAFE_AREA_X;
    let y_bound = f64::from(canvas.height) * SAFE_AREA_Y;

    let x = match h {
        HorizontalAlign::Left => -x_bound,
        HorizontalAlign::Center => 0.0,
        HorizontalAlign::Right => x_bound,
    };
    let y = match v {
        VerticalAlign::Top => -y_bound,
        VerticalAlign::Center => 0.0,
        VerticalAlign::Bottom => y_bound,
    };
    Vec2::new(x, y)
}

/// Device transform for the whole text block.
///
/// Canonical order: translate to canvas center plus the fine-tuning offset,
/// then rotate (clockwise degrees, y-down), then uniform scale. The offset is
/// applied before rotation, so rotating never swings the block around the
/// offset point.
pub fn text_transform(
    canvas: Canvas,
    scale: f64,
    rotation_deg: f64,
    x_offset: f64,
    y_offset: f64,
) -> Affine {
    let origin = canvas.center() + Vec2::new(x_offset, y_offset);
    Affine::translate(origin) * Affine::rotate(rotation_deg.to_radians()) * Affine::scale(scale)
}

/// Horizontal start of a measured text line, so the glyph run honors the
/// canvas `textAlign` convention at the anchor x.
pub fn line_start_x(anchor_x: f64, text_width: f64, h: HorizontalAlign) -> f64 {
    match h {
        HorizontalAlign::Left => anchor_x,
        HorizontalAlign::Center => anchor_x - text_width / 2.0,
        HorizontalAlign::Right => anchor_x - text_width,
    }
}

/// Offset from a middle-baseline anchor down to the alphabetic baseline.
pub fn middle_baseline_offset(ascent: f64, descent: f64) -> f64 {
    (ascent - descent) / 2.0
}

/// Vertical center of the subtitle row, above the title anchor.
pub fn subtitle_anchor_y(title_anchor_y: f64, title_size: f64) -> f64 {
    title_anchor_y - title_size * SUBTITLE_RISE_RATIO
}

/// Unsheared subtitle badge rectangle in text-local coordinates.
pub fn badge_rect(text_start_x: f64, text_width: f64, center_y: f64, title_size: f64) -> Rect {
    let pad = text_width * BADGE_PAD_RATIO;
    let height = title_size * BADGE_HEIGHT_RATIO;
    Rect::new(
        text_start_x - pad,
        center_y - height / 2.0,
        text_start_x + text_width + pad,
        center_y + height / 2.0,
    )
}

/// Shear applied to the badge rectangle, about the text-local origin.
pub fn badge_shear() -> Affine {
    Affine::skew(BADGE_SHEAR, 0.0)
}
