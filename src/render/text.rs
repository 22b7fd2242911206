use std::borrow::Cow;

use crate::foundation::error::{StudioError, StudioResult};

/// RGBA8 brush color attached to glyph runs by the layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphBrush {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<crate::scene::color::Rgba8> for GlyphBrush {
    fn from(c: crate::scene::color::Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Metrics of a shaped single-line layout, used to place the run against the
/// alignment anchor with a middle-baseline convention.
#[derive(Clone, Copy, Debug)]
pub struct LineSpan {
    pub width: f64,
    pub ascent: f64,
    pub descent: f64,
    /// Baseline y within the layout box (from its top edge).
    pub baseline: f64,
}

/// Stateful helper for shaping single display lines from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<GlyphBrush>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape `text` as one unwrapped line using the provided font bytes.
    pub fn layout_line(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
        weight: parley::FontWeight,
        brush: GlyphBrush,
    ) -> StudioResult<parley::Layout<GlyphBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(StudioError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            StudioError::validation("no font families registered from font bytes")
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| StudioError::validation("registered font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(weight));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<GlyphBrush> = builder.build(text);
        layout.break_all_lines(None);

        Ok(layout)
    }
}

/// Measure the first (only) line of a single-line layout.
pub fn line_span(layout: &parley::Layout<GlyphBrush>) -> StudioResult<LineSpan> {
    let line = layout
        .lines()
        .next()
        .ok_or_else(|| StudioError::render("text layout produced no lines"))?;
    let m = line.metrics();
    Ok(LineSpan {
        width: f64::from(layout.width()),
        ascent: f64::from(m.ascent),
        descent: f64::from(m.descent),
        baseline: f64::from(m.baseline),
    })
}

/// Wrap raw font bytes for the glyph rasterizer.
pub fn font_data(bytes: Vec<u8>) -> vello_cpu::peniko::FontData {
    vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0)
}

/// How a glyph pass is painted.
#[derive(Clone, Copy, Debug)]
pub enum GlyphPaint {
    Fill,
    /// Outline stroke with the given line width in device pixels.
    Stroke(f64),
}

/// Draw every glyph run of `layout` into `ctx` under `transform`, painted in
/// a single solid color. The layout's own brushes are ignored here so the
/// same shaped line can serve the shadow, stroke and fill passes.
pub fn draw_glyph_runs(
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<GlyphBrush>,
    font: &vello_cpu::peniko::FontData,
    transform: kurbo::Affine,
    color: crate::scene::color::Rgba8,
    paint: GlyphPaint,
) {
    ctx.set_transform(affine_to_cpu(transform));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    if let GlyphPaint::Stroke(width) = paint {
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
    }

    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            let builder = ctx.glyph_run(font).font_size(run.run().font_size());
            match paint {
                GlyphPaint::Fill => builder.fill_glyphs(glyphs),
                GlyphPaint::Stroke(_) => builder.stroke_glyphs(glyphs),
            }
        }
    }
}

pub(crate) fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_rejects_bad_size() {
        let mut engine = TextLayoutEngine::new();
        for size in [0.0f32, -4.0, f32::NAN] {
            assert!(
                engine
                    .layout_line("x", &[], size, parley::FontWeight::NORMAL, GlyphBrush::default())
                    .is_err()
            );
        }
    }

    #[test]
    fn layout_rejects_non_font_bytes() {
        let mut engine = TextLayoutEngine::new();
        let err = engine
            .layout_line(
                "x",
                b"these are not font bytes",
                32.0,
                parley::FontWeight::NORMAL,
                GlyphBrush::default(),
            )
            .err()
            .unwrap();
        assert!(err.to_string().contains("validation error"));
    }
}
