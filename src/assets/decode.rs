use std::sync::Arc;

use base64::Engine as _;

use crate::{
    foundation::error::{StudioError, StudioResult},
    scene::model::ImageSource,
};

/// Decoded background bitmap in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decode encoded image bytes (PNG/JPEG/...) and premultiply.
///
/// Any failure maps to [`StudioError::ImageDecode`], which aborts the whole
/// render upstream; no partial output is produced.
pub fn decode_image(bytes: &[u8]) -> StudioResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| StudioError::decode(format!("decode image bytes: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Extract the payload bytes of a `data:<mime>;base64,<payload>` URL.
pub fn decode_data_url(url: &str) -> StudioResult<Vec<u8>> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| StudioError::decode("image source is not a data URL"))?;
    let (_mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| StudioError::decode("data URL is not base64-encoded"))?;
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| StudioError::decode(format!("invalid base64 payload: {e}")))
}

/// Resolve any [`ImageSource`] to a decoded bitmap.
pub fn load_image(source: &ImageSource) -> StudioResult<PreparedImage> {
    match source {
        ImageSource::DataUrl(url) => decode_image(&decode_data_url(url)?),
        ImageSource::Path(path) => {
            let bytes = std::fs::read(path).map_err(|e| {
                StudioError::decode(format!("read image '{}': {e}", path.display()))
            })?;
            decode_image(&bytes)
        }
        ImageSource::Bytes(bytes) => decode_image(bytes),
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn png_1px(rgba: [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_raw(1, 1, rgba.to_vec()).unwrap();
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn decode_image_dimensions_and_premul() {
        let prepared = decode_image(&png_1px([100, 50, 200, 128])).unwrap();
        assert_eq!((prepared.width, prepared.height), (1, 1));
        assert_eq!(
            prepared.rgba8_premul.as_slice(),
            &[
                ((100u16 * 128 + 127) / 255) as u8,
                ((50u16 * 128 + 127) / 255) as u8,
                ((200u16 * 128 + 127) / 255) as u8,
                128u8
            ]
        );
    }

    #[test]
    fn decode_image_rejects_garbage() {
        let err = decode_image(b"not an image").unwrap_err();
        assert!(err.to_string().contains("image decode error"));
    }

    #[test]
    fn data_url_round_trip() {
        let png = png_1px([255, 0, 0, 255]);
        let url = format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&png)
        );
        let prepared = load_image(&ImageSource::DataUrl(url)).unwrap();
        assert_eq!(prepared.rgba8_premul.as_slice(), &[255, 0, 0, 255]);
    }

    #[test]
    fn data_url_rejects_other_schemes() {
        assert!(decode_data_url("https://example.com/a.png").is_err());
        assert!(decode_data_url("data:image/png;base64,!!!").is_err());
        assert!(decode_data_url("data:image/png,plain").is_err());
    }
}
