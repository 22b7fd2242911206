use std::path::PathBuf;

use crate::{
    foundation::error::{StudioError, StudioResult},
    foundation::geometry::{HorizontalAlign, VerticalAlign},
    scene::catalog,
    scene::color::Rgba8,
};

/// Declarative description of one thumbnail composition.
///
/// Pure data: the control layer replaces fields immutably on each edit, the
/// compositor reads the whole structure per render and never mutates it.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub title: String,
    pub subtitle: String,
    #[serde(default)]
    pub background: Option<ImageSource>,
    pub colors: ColorSource,
    /// Id into the font catalog.
    pub font: String,
    /// Id into the overlay-effect catalog.
    pub overlay: String,
    /// Id into the resolution catalog.
    pub resolution: String,
    #[serde(default)]
    pub placement: TextPlacement,
}

/// Where the background bitmap comes from. Uploaded files arrive as data
/// URLs, generated backgrounds as base64 data URLs, local workflows as paths.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    DataUrl(String),
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// Dispatch a user-supplied reference string: `data:` URIs stay inline,
    /// anything else is treated as a filesystem path.
    pub fn from_uri(uri: &str) -> Self {
        if uri.starts_with("data:") {
            Self::DataUrl(uri.to_string())
        } else {
            Self::Path(PathBuf::from(uri))
        }
    }
}

/// Single source of truth for text colors: either a named palette or direct
/// per-field choices. `Custom` always wins; there is no silent precedence
/// between two always-present fields.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSource {
    Palette { palette: String },
    Custom { title: Rgba8, subtitle: Rgba8, shadow: Rgba8 },
}

/// Geometric placement of the text block.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct TextPlacement {
    #[serde(default)]
    pub h_align: HorizontalAlign,
    #[serde(default)]
    pub v_align: VerticalAlign,
    /// Uniform scale; the editor exposes 0.5..=2.0, the compositor only
    /// requires finite and positive.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Clockwise rotation in degrees; the editor clamps, the compositor
    /// accepts arbitrary finite angles.
    #[serde(default)]
    pub rotation_deg: f64,
    #[serde(default)]
    pub x_offset: f64,
    #[serde(default)]
    pub y_offset: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl Default for TextPlacement {
    fn default() -> Self {
        Self {
            h_align: HorizontalAlign::Center,
            v_align: VerticalAlign::Center,
            scale: 1.0,
            rotation_deg: 0.0,
            x_offset: 0.0,
            y_offset: 0.0,
        }
    }
}

/// Colors after resolving the palette/custom choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedColors {
    pub title: Rgba8,
    pub subtitle: Rgba8,
    /// Glow color behind the title; palette mode derives it from the accent.
    pub shadow: Rgba8,
}

impl Scene {
    pub fn validate(&self) -> StudioResult<()> {
        if catalog::resolution(&self.resolution).is_none() {
            return Err(StudioError::validation(format!(
                "unknown resolution id '{}'",
                self.resolution
            )));
        }
        if catalog::font(&self.font).is_none() {
            return Err(StudioError::validation(format!(
                "unknown font id '{}'",
                self.font
            )));
        }
        if catalog::overlay_effect(&self.overlay).is_none() {
            return Err(StudioError::validation(format!(
                "unknown overlay effect id '{}'",
                self.overlay
            )));
        }
        if let ColorSource::Palette { palette } = &self.colors
            && catalog::palette(palette).is_none()
        {
            return Err(StudioError::validation(format!(
                "unknown palette id '{palette}'"
            )));
        }

        let p = &self.placement;
        if !p.scale.is_finite() || p.scale <= 0.0 {
            return Err(StudioError::validation(
                "placement scale must be finite and > 0",
            ));
        }
        for (name, v) in [
            ("rotation_deg", p.rotation_deg),
            ("x_offset", p.x_offset),
            ("y_offset", p.y_offset),
        ] {
            if !v.is_finite() {
                return Err(StudioError::validation(format!(
                    "placement {name} must be finite"
                )));
            }
        }

        Ok(())
    }

    /// The selected palette, when colors come from one.
    pub fn palette(&self) -> Option<&'static catalog::Palette> {
        match &self.colors {
            ColorSource::Palette { palette } => catalog::palette(palette),
            ColorSource::Custom { .. } => None,
        }
    }

    pub fn resolved_colors(&self) -> StudioResult<ResolvedColors> {
        match &self.colors {
            ColorSource::Palette { palette } => {
                let p = catalog::palette(palette).ok_or_else(|| {
                    StudioError::validation(format!("unknown palette id '{palette}'"))
                })?;
                Ok(ResolvedColors {
                    title: Rgba8::from_hex(p.primary)?,
                    subtitle: Rgba8::from_hex(p.secondary)?,
                    shadow: Rgba8::from_hex(p.secondary)?,
                })
            }
            ColorSource::Custom {
                title,
                subtitle,
                shadow,
            } => Ok(ResolvedColors {
                title: *title,
                subtitle: *subtitle,
                shadow: *shadow,
            }),
        }
    }
}

impl Default for Scene {
    /// The editor's starting composition.
    fn default() -> Self {
        Self {
            title: "A VOLTA DO REI".to_string(),
            subtitle: "JOGABILIDADE EPICA".to_string(),
            background: None,
            colors: ColorSource::Palette {
                palette: "candy-pop".to_string(),
            },
            font: "anton".to_string(),
            overlay: "vignette".to_string(),
            resolution: "youtube".to_string(),
            placement: TextPlacement {
                rotation_deg: -2.0,
                ..TextPlacement::default()
            },
        }
    }
}
