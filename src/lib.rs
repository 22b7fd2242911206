//! SC Studio is a thumbnail composition and PNG export engine.
//!
//! A declarative [`Scene`] — title/subtitle text, a palette or direct color
//! choices, a display font, an overlay effect, a target resolution and an
//! optional background image source — is rendered deterministically to
//! premultiplied RGBA8 pixels and encoded as PNG.
//!
//! # Pipeline overview
//!
//! 1. **Background**: decode the image source and stretch-fill the canvas,
//!    or paint the solid fallback when no image is set
//! 2. **Overlay**: apply the selected raster overlay pass (vignette / tint)
//! 3. **Text**: shadows, outline, fill and the subtitle badge, all under one
//!    translate → rotate → scale transform
//! 4. **Export**: PNG encoding plus the download file-name convention
//!
//! The interactive preview is a second, declarative consumer of the same
//! scene; [`preview`] derives its styling from the same [`foundation`]
//! geometry the compositor uses, so the two rendering paths stay visually
//! consistent by construction.
#![forbid(unsafe_code)]

pub mod assets;
pub mod export;
pub mod foundation;
pub mod genai;
pub mod preview;
pub mod render;
pub mod scene;

pub use assets::decode::{PreparedImage, decode_data_url, decode_image, load_image};
pub use assets::fonts::FontStore;
pub use foundation::error::{StudioError, StudioResult};
pub use foundation::geometry::{Canvas, HorizontalAlign, VerticalAlign};
pub use preview::{PreviewStyle, preview_style};
pub use render::FrameRgba;
pub use render::compositor::Compositor;
pub use scene::catalog::{
    FALLBACK_BACKGROUND, FONTS, FontFace, OVERLAY_EFFECTS, OverlayEffect, PALETTES, Palette,
    RESOLUTIONS, RasterOverlay, Resolution, font, overlay_effect, palette, resolution,
    resolution_for_aspect,
};
pub use scene::color::Rgba8;
pub use scene::model::{ColorSource, ImageSource, ResolvedColors, Scene, TextPlacement};
