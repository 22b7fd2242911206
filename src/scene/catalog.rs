//! Fixed catalogs selectable from the editor: color palettes, display fonts,
//! overlay effects and output resolutions. Scenes reference entries by id;
//! unknown ids are validation errors.

use crate::scene::color::Rgba8;

#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub id: &'static str,
    pub name: &'static str,
    /// Main title color.
    pub primary: &'static str,
    /// Subtitle badge / accent color, also the title glow color.
    pub secondary: &'static str,
    /// Fallback page background behind the preview.
    pub background: &'static str,
    pub overlay: &'static str,
    /// CSS text-shadow spec, consumed by the preview path only.
    pub text_shadow: &'static str,
}

pub const PALETTES: [Palette; 8] = [
    Palette {
        id: "neon-burst",
        name: "Neon Burst",
        primary: "#FAFAFA",
        secondary: "#00FF41",
        background: "#111827",
        overlay: "#000000",
        text_shadow: "0 0 20px rgba(0, 255, 65, 0.6)",
    },
    Palette {
        id: "gold-luxury",
        name: "Ouro Luxo",
        primary: "#FFD700",
        secondary: "#FFFFFF",
        background: "#0F0F0F",
        overlay: "#1C1C1C",
        text_shadow: "2px 2px 0px #9A8600",
    },
    Palette {
        id: "hot-red",
        name: "Red Alert",
        primary: "#FFFFFF",
        secondary: "#FF0000",
        background: "#2B0000",
        overlay: "#000000",
        text_shadow: "4px 4px 0px #FF0000",
    },
    Palette {
        id: "ocean-blue",
        name: "Deep Sea",
        primary: "#00FFFF",
        secondary: "#007BFF",
        background: "#001E3C",
        overlay: "#000000",
        text_shadow: "0 0 15px #007BFF",
    },
    Palette {
        id: "candy-pop",
        name: "Candy Pop",
        primary: "#FF69B4",
        secondary: "#FFFF00",
        background: "#2D0F1F",
        overlay: "#4A0E2B",
        text_shadow: "3px 3px 0px #FFFF00",
    },
    Palette {
        id: "purple-rain",
        name: "Roxo Vivo",
        primary: "#E9D5FF",
        secondary: "#A855F7",
        background: "#3B0764",
        overlay: "#000000",
        text_shadow: "0 4px 0px #6B21A8",
    },
    Palette {
        id: "clean-white",
        name: "Clean Dark",
        primary: "#FFFFFF",
        secondary: "#CCCCCC",
        background: "#000000",
        overlay: "#000000",
        text_shadow: "0 4px 10px rgba(0,0,0,0.8)",
    },
    Palette {
        id: "sunrise",
        name: "Sunrise",
        primary: "#FFD700",
        secondary: "#FF8C00",
        background: "#4A0E0E",
        overlay: "#000000",
        text_shadow: "2px 2px 0px #FF4500",
    },
];

#[derive(Clone, Copy, Debug)]
pub struct FontFace {
    pub id: &'static str,
    pub name: &'static str,
    /// CSS-style family stack handed to the text shaper.
    pub family: &'static str,
    /// Nominal face weight of the shipped font file.
    pub weight: u16,
    /// Font file name, resolved against the font store root.
    pub file: &'static str,
}

pub const FONTS: [FontFace; 8] = [
    FontFace {
        id: "bebas",
        name: "Bebas Neue",
        family: "Bebas Neue",
        weight: 400,
        file: "BebasNeue-Regular.ttf",
    },
    FontFace {
        id: "anton",
        name: "Anton",
        family: "Anton",
        weight: 400,
        file: "Anton-Regular.ttf",
    },
    FontFace {
        id: "oswald",
        name: "Oswald",
        family: "Oswald",
        weight: 700,
        file: "Oswald-Bold.ttf",
    },
    FontFace {
        id: "roboto",
        name: "Roboto Heavy",
        family: "Roboto",
        weight: 900,
        file: "Roboto-Black.ttf",
    },
    FontFace {
        id: "montserrat",
        name: "Montserrat",
        family: "Montserrat",
        weight: 800,
        file: "Montserrat-ExtraBold.ttf",
    },
    FontFace {
        id: "lobster",
        name: "Lobster",
        family: "Lobster",
        weight: 400,
        file: "Lobster-Regular.ttf",
    },
    FontFace {
        id: "pacifico",
        name: "Pacifico",
        family: "Pacifico",
        weight: 400,
        file: "Pacifico-Regular.ttf",
    },
    FontFace {
        id: "inter",
        name: "Inter Bold",
        family: "Inter",
        weight: 700,
        file: "Inter-Bold.ttf",
    },
];

/// How an overlay effect is realized in the exported raster.
///
/// `scanlines` and `noise` are preview-only flourishes: they have a CSS
/// definition but no raster pass, and the export deliberately leaves the
/// pixels untouched for them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RasterOverlay {
    None,
    /// Radial darkening: transparent out to 30% of canvas height from
    /// center, 80%-alpha black at 80% of canvas height.
    Vignette,
    /// Flat tint composited source-over across the whole frame.
    Tint(Rgba8),
}

#[derive(Clone, Copy, Debug)]
pub struct OverlayEffect {
    pub id: &'static str,
    pub name: &'static str,
    /// CSS background consumed by the preview path; empty for `none`.
    pub css: &'static str,
    pub raster: RasterOverlay,
}

pub const OVERLAY_EFFECTS: [OverlayEffect; 6] = [
    OverlayEffect {
        id: "none",
        name: "Normal",
        css: "",
        raster: RasterOverlay::None,
    },
    OverlayEffect {
        id: "vignette",
        name: "Vinheta",
        css: "radial-gradient(circle, transparent 50%, rgba(0,0,0,0.8) 100%)",
        raster: RasterOverlay::Vignette,
    },
    OverlayEffect {
        id: "scanlines",
        name: "Scanlines",
        css: "repeating-linear-gradient(0deg, transparent, transparent 2px, rgba(0,0,0,0.1) 3px)",
        raster: RasterOverlay::None,
    },
    OverlayEffect {
        id: "noise",
        name: "Ruído",
        css: "url(\"data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHdpZHRoPSI1IiBoZWlnaHQ9IjUiPgo8cmVjdCB3aWR0aD0iNSIgaGVpZ2h0PSI1IiBmaWxsPSIjZmZmIiBmaWxsLW9wYWNpdHk9IjAuMSIvPgo8cGF0aCBkPSJNMCA1TDUgMFpNNSA1TDUgNVoiIHN0cm9rZT0iIzAwMCIgc3Ryb2tlLXdpZHRoPSIxIiBvcGFjaXR5PSIwLjEiLz4KPC9zdmc+\")",
        raster: RasterOverlay::None,
    },
    OverlayEffect {
        id: "warm",
        name: "Quente",
        css: "linear-gradient(45deg, rgba(255,100,0,0.2), transparent)",
        raster: RasterOverlay::Tint(Rgba8::rgba(255, 100, 0, 26)),
    },
    OverlayEffect {
        id: "cool",
        name: "Frio",
        css: "linear-gradient(45deg, rgba(0,100,255,0.2), transparent)",
        raster: RasterOverlay::Tint(Rgba8::rgba(0, 100, 255, 26)),
    },
];

#[derive(Clone, Copy, Debug)]
pub struct Resolution {
    pub id: &'static str,
    pub label: &'static str,
    pub aspect_ratio: &'static str,
    pub width: u32,
    pub height: u32,
}

pub const RESOLUTIONS: [Resolution; 4] = [
    Resolution {
        id: "youtube",
        label: "YouTube (16:9)",
        aspect_ratio: "16:9",
        width: 1280,
        height: 720,
    },
    Resolution {
        id: "shorts",
        label: "Shorts (9:16)",
        aspect_ratio: "9:16",
        width: 720,
        height: 1280,
    },
    Resolution {
        id: "insta",
        label: "Post (1:1)",
        aspect_ratio: "1:1",
        width: 1080,
        height: 1080,
    },
    Resolution {
        id: "tv",
        label: "TV (4:3)",
        aspect_ratio: "4:3",
        width: 1024,
        height: 768,
    },
];

/// Fill used when a scene has no background image. The export never produces
/// a transparent canvas.
pub const FALLBACK_BACKGROUND: Rgba8 = Rgba8::rgb(0x0F, 0x0F, 0x0F);

/// Subtitle glyph color; the badge provides the accent, the text stays light.
pub const SUBTITLE_TEXT_COLOR: Rgba8 = Rgba8::rgb(0xFF, 0xFF, 0xFF);

/// Title outline stroke color (subtle dark edge for definition).
pub const TITLE_STROKE_COLOR: Rgba8 = Rgba8::rgba(0, 0, 0, 77);

pub fn palette(id: &str) -> Option<&'static Palette> {
    PALETTES.iter().find(|p| p.id == id)
}

pub fn font(id: &str) -> Option<&'static FontFace> {
    FONTS.iter().find(|f| f.id == id)
}

pub fn overlay_effect(id: &str) -> Option<&'static OverlayEffect> {
    OVERLAY_EFFECTS.iter().find(|o| o.id == id)
}

pub fn resolution(id: &str) -> Option<&'static Resolution> {
    RESOLUTIONS.iter().find(|r| r.id == id)
}

pub fn resolution_for_aspect(aspect_ratio: &str) -> Option<&'static Resolution> {
    RESOLUTIONS.iter().find(|r| r.aspect_ratio == aspect_ratio)
}
