use kurbo::{Affine, Vec2};

use crate::{
    assets::decode::{self, PreparedImage},
    assets::fonts::FontStore,
    foundation::error::{StudioError, StudioResult},
    foundation::geometry::{self, Canvas},
    render::FrameRgba,
    render::blur::blur_rgba8_premul,
    render::composite,
    render::overlay,
    render::text::{self, GlyphBrush, GlyphPaint, TextLayoutEngine},
    scene::catalog::{self, Resolution},
    scene::color::Rgba8,
    scene::model::{ResolvedColors, Scene},
};

/// Turns a [`Scene`] into pixels.
///
/// Layer order: background (image stretch-fill or solid fallback), overlay
/// effect, then the transformed text block (title shadows, outline, fill and
/// the subtitle badge). Every call allocates its own surfaces; rendering the
/// same scene twice produces identical bytes.
pub struct Compositor {
    fonts: FontStore,
    text: TextLayoutEngine,
}

impl Compositor {
    pub fn new(fonts: FontStore) -> Self {
        Self {
            fonts,
            text: TextLayoutEngine::new(),
        }
    }

    /// Render `scene` at an explicit catalog resolution.
    ///
    /// A failing background decode aborts the whole render with
    /// [`StudioError::ImageDecode`]; no partial frame is ever returned. An
    /// empty title is not an error: the title layer is simply skipped (the
    /// preview's placeholder text is never baked into the export).
    #[tracing::instrument(skip_all, fields(resolution = resolution.id))]
    pub fn render(&mut self, scene: &Scene, resolution: &Resolution) -> StudioResult<FrameRgba> {
        scene.validate()?;

        let canvas = Canvas {
            width: resolution.width,
            height: resolution.height,
        };
        let (w16, h16) = surface_dims(canvas)?;

        let background = scene
            .background
            .as_ref()
            .map(decode::load_image)
            .transpose()?;

        let mut base = vello_cpu::Pixmap::new(w16, h16);
        match &background {
            Some(img) => {
                let mut ctx = vello_cpu::RenderContext::new(w16, h16);
                draw_background(&mut ctx, img, canvas)?;
                ctx.flush();
                ctx.render_to_pixmap(&mut base);
            }
            None => clear_pixmap(&mut base, catalog::FALLBACK_BACKGROUND.to_premul()),
        }

        let effect = catalog::overlay_effect(&scene.overlay).ok_or_else(|| {
            StudioError::validation(format!("unknown overlay effect id '{}'", scene.overlay))
        })?;
        overlay::apply(base.data_as_u8_slice_mut(), canvas, effect)?;

        self.draw_text_block(&mut base, scene, canvas)?;

        tracing::debug!(width = canvas.width, height = canvas.height, "rendered scene");

        Ok(FrameRgba {
            width: canvas.width,
            height: canvas.height,
            data: base.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_text_block(
        &mut self,
        base: &mut vello_cpu::Pixmap,
        scene: &Scene,
        canvas: Canvas,
    ) -> StudioResult<()> {
        let title = scene.title.trim();
        let subtitle = scene.subtitle.trim();
        if title.is_empty() && subtitle.is_empty() {
            return Ok(());
        }

        let colors = scene.resolved_colors()?;
        let face = catalog::font(&scene.font)
            .ok_or_else(|| StudioError::validation(format!("unknown font id '{}'", scene.font)))?;
        let font_bytes = self.fonts.bytes_for(face)?;
        let font = text::font_data(font_bytes.as_ref().clone());

        let p = &scene.placement;
        let transform =
            geometry::text_transform(canvas, p.scale, p.rotation_deg, p.x_offset, p.y_offset);
        let anchor = geometry::anchor_point(canvas, p.h_align, p.v_align);
        let title_size = geometry::title_size(canvas);
        let (w16, h16) = surface_dims(canvas)?;

        // Stroke, fill and the subtitle badge share one scene; the blurred
        // shadow passes need their own surfaces.
        let mut text_ctx = vello_cpu::RenderContext::new(w16, h16);

        if !title.is_empty() {
            let line = title.to_uppercase();
            let layout = self.text.layout_line(
                &line,
                font_bytes.as_ref(),
                title_size as f32,
                parley::FontWeight::BLACK,
                GlyphBrush::from(colors.title),
            )?;
            let span = text::line_span(&layout)?;
            let origin = Vec2::new(
                geometry::line_start_x(anchor.x, span.width, p.h_align),
                anchor.y + geometry::middle_baseline_offset(span.ascent, span.descent)
                    - span.baseline,
            );
            let local = transform * Affine::translate(origin);

            // Two shadows under the title: a wide soft black drop for depth,
            // then the palette glow. Offsets are device-space, matching the
            // preview's text-shadow.
            shadow_pass(
                base,
                canvas,
                &layout,
                &font,
                local,
                Rgba8::rgba(0, 0, 0, (geometry::DROP_SHADOW_ALPHA * 255.0) as u8),
                geometry::DROP_BLUR_PX,
                geometry::DROP_OFFSET_Y,
            )?;
            shadow_pass(
                base,
                canvas,
                &layout,
                &font,
                local,
                colors.shadow,
                geometry::GLOW_BLUR_PX,
                geometry::GLOW_OFFSET_Y,
            )?;

            text::draw_glyph_runs(
                &mut text_ctx,
                &layout,
                &font,
                local,
                catalog::TITLE_STROKE_COLOR,
                GlyphPaint::Stroke(geometry::title_stroke_width(canvas)),
            );
            text::draw_glyph_runs(
                &mut text_ctx,
                &layout,
                &font,
                local,
                colors.title,
                GlyphPaint::Fill,
            );
        }

        if !subtitle.is_empty() {
            self.draw_subtitle(
                &mut text_ctx,
                subtitle,
                font_bytes.as_ref(),
                &font,
                &colors,
                transform,
                anchor,
                title_size,
                p.h_align,
            )?;
        }

        let mut text_pix = vello_cpu::Pixmap::new(w16, h16);
        text_ctx.flush();
        text_ctx.render_to_pixmap(&mut text_pix);
        composite::over_in_place(base.data_as_u8_slice_mut(), text_pix.data_as_u8_slice())
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_subtitle(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        subtitle: &str,
        font_bytes: &[u8],
        font: &vello_cpu::peniko::FontData,
        colors: &ResolvedColors,
        transform: Affine,
        anchor: Vec2,
        title_size: f64,
        h_align: geometry::HorizontalAlign,
    ) -> StudioResult<()> {
        let line = subtitle.to_uppercase();
        let layout = self.text.layout_line(
            &line,
            font_bytes,
            geometry::subtitle_size(title_size) as f32,
            parley::FontWeight::BOLD,
            GlyphBrush::from(catalog::SUBTITLE_TEXT_COLOR),
        )?;
        let span = text::line_span(&layout)?;

        let center_y = geometry::subtitle_anchor_y(anchor.y, title_size);
        let start_x = geometry::line_start_x(anchor.x, span.width, h_align);

        // Badge first: a sheared rectangle behind the text, sheared about the
        // text-local origin like the rest of the block.
        let badge = geometry::badge_rect(start_x, span.width, center_y, title_size);
        ctx.set_transform(text::affine_to_cpu(transform * geometry::badge_shear()));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            colors.subtitle.r,
            colors.subtitle.g,
            colors.subtitle.b,
            colors.subtitle.a,
        ));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            badge.x0, badge.y0, badge.x1, badge.y1,
        ));

        let origin = Vec2::new(
            start_x,
            center_y + geometry::middle_baseline_offset(span.ascent, span.descent) - span.baseline,
        );
        text::draw_glyph_runs(
            ctx,
            &layout,
            font,
            transform * Affine::translate(origin),
            catalog::SUBTITLE_TEXT_COLOR,
            GlyphPaint::Fill,
        );
        Ok(())
    }
}

/// Render a blurred, offset silhouette of `layout` and composite it onto the
/// base. Blur radius and vertical offset are device-space.
#[allow(clippy::too_many_arguments)]
fn shadow_pass(
    base: &mut vello_cpu::Pixmap,
    canvas: Canvas,
    layout: &parley::Layout<GlyphBrush>,
    font: &vello_cpu::peniko::FontData,
    local: Affine,
    color: Rgba8,
    blur_radius: u32,
    offset_y: f64,
) -> StudioResult<()> {
    let (w16, h16) = surface_dims(canvas)?;
    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    let transform = Affine::translate(Vec2::new(0.0, offset_y)) * local;
    text::draw_glyph_runs(&mut ctx, layout, font, transform, color, GlyphPaint::Fill);

    let mut silhouette = vello_cpu::Pixmap::new(w16, h16);
    ctx.flush();
    ctx.render_to_pixmap(&mut silhouette);

    let blurred = blur_rgba8_premul(
        silhouette.data_as_u8_slice(),
        canvas.width,
        canvas.height,
        blur_radius,
    )?;
    composite::over_in_place(base.data_as_u8_slice_mut(), &blurred)
}

fn surface_dims(canvas: Canvas) -> StudioResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| StudioError::render("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| StudioError::render("surface height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(StudioError::render("surface dimensions must be non-zero"));
    }
    Ok((w, h))
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn draw_background(
    ctx: &mut vello_cpu::RenderContext,
    img: &PreparedImage,
    canvas: Canvas,
) -> StudioResult<()> {
    if img.width == 0 || img.height == 0 {
        return Err(StudioError::decode("background image has zero dimensions"));
    }

    let pixmap = image_premul_bytes_to_pixmap(img.rgba8_premul.as_slice(), img.width, img.height)?;
    let paint = vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    };

    // Direct fill: the source is produced at the target aspect ratio, so a
    // plain stretch covers the frame without crop math.
    let sx = f64::from(canvas.width) / f64::from(img.width);
    let sy = f64::from(canvas.height) / f64::from(img.height);
    ctx.set_transform(vello_cpu::kurbo::Affine::scale_non_uniform(sx, sy));
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(img.width),
        f64::from(img.height),
    ));
    Ok(())
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> StudioResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| StudioError::decode("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| StudioError::decode("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(StudioError::decode("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_dims_guard_range() {
        assert!(
            surface_dims(Canvas {
                width: 1280,
                height: 720
            })
            .is_ok()
        );
        assert!(
            surface_dims(Canvas {
                width: 70000,
                height: 720
            })
            .is_err()
        );
        assert!(
            surface_dims(Canvas {
                width: 0,
                height: 720
            })
            .is_err()
        );
    }

    #[test]
    fn premul_pixmap_rejects_length_mismatch() {
        assert!(image_premul_bytes_to_pixmap(&[0u8; 7], 1, 2).is_err());
    }
}
