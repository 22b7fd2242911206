use base64::Engine as _;

use scstudio::{
    ColorSource, Compositor, FontStore, ImageSource, Scene, TextPlacement, resolution,
};

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn digest_u64(bytes: &[u8]) -> u64 {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    for chunk in bytes.chunks(8) {
        let mut v = 0u64;
        for (i, &b) in chunk.iter().enumerate() {
            v |= (b as u64) << (i * 8);
        }
        state = mix64(state ^ v);
    }
    state
}

/// A text-free scene: pixel assertions stay independent of font files.
fn text_free_scene() -> Scene {
    Scene {
        title: String::new(),
        subtitle: String::new(),
        overlay: "none".to_string(),
        ..Scene::default()
    }
}

fn compositor() -> Compositor {
    Compositor::new(FontStore::new("fonts"))
}

fn png_1px(rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(1, 1, rgba.to_vec()).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn data_url(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}

#[test]
fn output_matches_catalog_dimensions_for_every_resolution() {
    let scene = text_free_scene();
    let mut comp = compositor();
    for res in &scstudio::RESOLUTIONS {
        let frame = comp.render(&scene, res).unwrap();
        assert_eq!((frame.width, frame.height), (res.width, res.height), "{}", res.id);
        assert_eq!(frame.data.len(), (res.width * res.height * 4) as usize);
        assert!(frame.premultiplied);
    }
}

#[test]
fn selecting_9x16_yields_720x1280() {
    let mut scene = text_free_scene();
    let res = scstudio::resolution_for_aspect("9:16").unwrap();
    scene.resolution = res.id.to_string();
    let frame = compositor().render(&scene, res).unwrap();
    assert_eq!((frame.width, frame.height), (720, 1280));
}

#[test]
fn rendering_twice_is_pixel_identical() {
    let mut scene = text_free_scene();
    scene.overlay = "vignette".to_string();
    scene.background = Some(ImageSource::DataUrl(data_url(&png_1px([90, 140, 60, 255]))));

    let mut comp = compositor();
    let res = resolution("youtube").unwrap();
    let a = comp.render(&scene, res).unwrap();
    let b = comp.render(&scene, res).unwrap();
    assert_eq!(digest_u64(&a.data), digest_u64(&b.data));
}

#[test]
fn missing_background_fills_with_the_fixed_fallback() {
    let frame = compositor()
        .render(&text_free_scene(), resolution("tv").unwrap())
        .unwrap();
    assert!(
        frame
            .data
            .chunks_exact(4)
            .all(|px| px == [0x0F, 0x0F, 0x0F, 0xFF])
    );
}

#[test]
fn background_image_is_stretched_to_fill() {
    let mut scene = text_free_scene();
    scene.background = Some(ImageSource::DataUrl(data_url(&png_1px([200, 30, 30, 255]))));

    let frame = compositor().render(&scene, resolution("insta").unwrap()).unwrap();
    assert!(
        frame
            .data
            .chunks_exact(4)
            .all(|px| px == [200, 30, 30, 255])
    );
}

#[test]
fn vignette_darkens_corners_but_not_the_center() {
    let mut scene = text_free_scene();
    scene.overlay = "vignette".to_string();

    let res = resolution("insta").unwrap();
    let frame = compositor().render(&scene, res).unwrap();

    let px = |x: u32, y: u32| {
        let i = ((y * res.width + x) * 4) as usize;
        [frame.data[i], frame.data[i + 1], frame.data[i + 2], frame.data[i + 3]]
    };

    let center = px(res.width / 2, res.height / 2);
    assert_eq!(center, [0x0F, 0x0F, 0x0F, 0xFF]);

    let corner = px(0, 0);
    assert!(corner[0] < 0x0F);
    assert_eq!(corner[3], 0xFF);
}

#[test]
fn undecodable_background_aborts_with_a_decode_error() {
    let mut scene = text_free_scene();
    scene.background = Some(ImageSource::Bytes(b"definitely not an image".to_vec()));

    let err = compositor()
        .render(&scene, resolution("youtube").unwrap())
        .unwrap_err();
    assert!(matches!(err, scstudio::StudioError::ImageDecode(_)));
}

#[test]
fn empty_text_never_touches_the_font_store() {
    // With no title and no subtitle the text layer is skipped entirely, so a
    // store pointing nowhere must not be consulted.
    let mut comp = Compositor::new(FontStore::new("no/such/dir"));
    comp.render(&text_free_scene(), resolution("youtube").unwrap())
        .unwrap();

    // A real title needs glyphs, which needs font bytes.
    let mut scene = text_free_scene();
    scene.title = "HELLO".to_string();
    assert!(comp.render(&scene, resolution("youtube").unwrap()).is_err());
}

#[test]
fn placeholder_title_exists_only_in_the_preview_path() {
    let mut scene = Scene::default();
    scene.title = String::new();

    let style = scstudio::preview_style(&scene).unwrap();
    assert_eq!(style.title_text, scstudio::preview::PLACEHOLDER_TITLE);

    // The raster path with an empty title renders no title at all: same
    // pixels as a scene with no text, rather than a baked-in placeholder.
    scene.subtitle = String::new();
    scene.overlay = "none".to_string();
    let res = resolution("youtube").unwrap();
    let mut comp = compositor();
    let with_empty_title = comp.render(&scene, res).unwrap();
    let no_text = comp.render(&text_free_scene(), res).unwrap();
    assert_eq!(digest_u64(&with_empty_title.data), digest_u64(&no_text.data));
}

#[test]
fn custom_scale_must_be_positive_and_finite() {
    let mut scene = text_free_scene();
    scene.placement = TextPlacement {
        scale: -1.0,
        ..TextPlacement::default()
    };
    assert!(
        compositor()
            .render(&scene, resolution("youtube").unwrap())
            .is_err()
    );
}

#[test]
fn custom_colors_do_not_require_a_palette() {
    let mut scene = text_free_scene();
    scene.colors = ColorSource::Custom {
        title: scstudio::Rgba8::rgb(255, 255, 255),
        subtitle: scstudio::Rgba8::rgb(255, 0, 0),
        shadow: scstudio::Rgba8::rgb(0, 0, 0),
    };
    compositor()
        .render(&scene, resolution("youtube").unwrap())
        .unwrap();
}

#[test]
fn exported_png_round_trips_the_frame() {
    let res = resolution("youtube").unwrap();
    let frame = compositor().render(&text_free_scene(), res).unwrap();
    let png = scstudio::export::encode_png(&frame).unwrap();

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (res.width, res.height));
    assert!(
        decoded
            .pixels()
            .all(|p| p.0 == [0x0F, 0x0F, 0x0F, 0xFF])
    );

    assert_eq!(
        scstudio::export::file_name(res.aspect_ratio, 1700000000),
        "SC-Studio-16x9-1700000000.png"
    );
}

/// Full text rendering needs real font files; run when the repo's fonts
/// directory is populated, skip otherwise.
#[test]
fn titled_scene_changes_pixels_when_fonts_are_available() {
    let face = scstudio::font("anton").unwrap();
    let font_path = std::path::Path::new("fonts").join(face.file);
    if !font_path.exists() {
        eprintln!("skipping: '{}' not present", font_path.display());
        return;
    }

    let res = resolution("youtube").unwrap();
    let mut comp = compositor();

    let mut scene = text_free_scene();
    scene.font = "anton".to_string();
    let blank = comp.render(&scene, res).unwrap();

    scene.title = "A VOLTA DO REI".to_string();
    scene.subtitle = "JOGABILIDADE EPICA".to_string();
    let titled = comp.render(&scene, res).unwrap();

    assert_ne!(digest_u64(&blank.data), digest_u64(&titled.data));
}
