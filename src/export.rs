use std::io::Cursor;

use crate::{
    foundation::error::{StudioError, StudioResult},
    render::FrameRgba,
};

/// Encode a rendered frame as PNG bytes.
///
/// Frames leave the compositor fully opaque (the background layer always
/// covers the canvas), so premultiplied bytes can be written straight.
pub fn encode_png(frame: &FrameRgba) -> StudioResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.data.clone())
        .ok_or_else(|| StudioError::render("frame buffer does not match its dimensions"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| StudioError::render(format!("encode png: {e}")))?;
    Ok(buf)
}

/// Download file name for an export: `SC-Studio-<ratio>-<unixtime>.png`, with
/// the `:` of the aspect ratio swapped for `x`. The timestamp is supplied by
/// the caller; the core never reads clocks.
pub fn file_name(aspect_ratio: &str, unix_time: u64) -> String {
    format!(
        "SC-Studio-{}-{unix_time}.png",
        aspect_ratio.replace(':', "x")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_embeds_ratio_and_timestamp() {
        assert_eq!(file_name("16:9", 1700000000), "SC-Studio-16x9-1700000000.png");
        assert_eq!(file_name("1:1", 42), "SC-Studio-1x1-42.png");
    }

    #[test]
    fn png_round_trips_dimensions() {
        let frame = FrameRgba {
            width: 3,
            height: 2,
            data: [10u8, 20, 30, 255].repeat(6),
            premultiplied: true,
        };
        let png = encode_png(&frame).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 2));
    }

    #[test]
    fn mismatched_buffer_is_an_error() {
        let frame = FrameRgba {
            width: 4,
            height: 4,
            data: vec![0u8; 8],
            premultiplied: true,
        };
        assert!(encode_png(&frame).is_err());
    }
}
