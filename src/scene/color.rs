use serde::{Deserialize, Serialize};

use crate::foundation::error::{StudioError, StudioResult};

/// Straight-alpha RGBA color. Serialized as `#RRGGBB` / `#RRGGBBAA` hex,
/// which is also how the palette catalog and per-field overrides express
/// colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(s: &str) -> StudioResult<Self> {
        let raw = s.trim();
        let raw = raw.strip_prefix('#').unwrap_or(raw);

        let byte = |pair: &str| -> StudioResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| StudioError::validation(format!("invalid hex byte \"{pair}\" in color \"{s}\"")))
        };

        match raw.len() {
            6 => Ok(Self::rgb(byte(&raw[0..2])?, byte(&raw[2..4])?, byte(&raw[4..6])?)),
            8 => Ok(Self::rgba(
                byte(&raw[0..2])?,
                byte(&raw[2..4])?,
                byte(&raw[4..6])?,
                byte(&raw[6..8])?,
            )),
            _ => Err(StudioError::validation(format!(
                "color \"{s}\" must be #RRGGBB or #RRGGBBAA"
            ))),
        }
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Scale the alpha channel by `alpha` in 0..=1.
    pub fn scale_alpha(self, alpha: f64) -> Self {
        let a = (f64::from(self.a) * alpha.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Premultiplied RGBA8 bytes, matching the raster pipeline's pixel format.
    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        let premul = |c: u8| -> u8 { ((u16::from(c) * a + 127) / 255) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }
}

impl Serialize for Rgba8 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_rgb_and_rgba() {
        assert_eq!(Rgba8::from_hex("#FF0000").unwrap(), Rgba8::rgb(255, 0, 0));
        assert_eq!(
            Rgba8::from_hex("0000ff80").unwrap(),
            Rgba8::rgba(0, 0, 255, 128)
        );
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Rgba8::from_hex("#12345").is_err());
        assert!(Rgba8::from_hex("#GG0000").is_err());
        assert!(Rgba8::from_hex("").is_err());
    }

    #[test]
    fn hex_round_trips_through_serde() {
        let c: Rgba8 = serde_json::from_value(serde_json::json!("#FFD700")).unwrap();
        assert_eq!(c, Rgba8::rgb(255, 215, 0));
        assert_eq!(serde_json::to_value(c).unwrap(), serde_json::json!("#FFD700"));
    }

    #[test]
    fn premultiply_scales_channels() {
        let c = Rgba8::rgba(100, 50, 200, 128);
        assert_eq!(
            c.to_premul(),
            [
                ((100u16 * 128 + 127) / 255) as u8,
                ((50u16 * 128 + 127) / 255) as u8,
                ((200u16 * 128 + 127) / 255) as u8,
                128
            ]
        );
    }

    #[test]
    fn scale_alpha_clamps() {
        assert_eq!(Rgba8::rgb(1, 2, 3).scale_alpha(2.0).a, 255);
        assert_eq!(Rgba8::rgb(1, 2, 3).scale_alpha(0.5).a, 128);
    }
}
