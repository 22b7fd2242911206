//! Client for the external image-generation service that produces thumbnail
//! backgrounds.
//!
//! This is a collaborator of the compositor, not part of it: the result is a
//! base64 data URL that flows back into a scene as a plain
//! [`crate::scene::model::ImageSource::DataUrl`]. Credentials are an injected
//! configuration value; nothing in this module (or anywhere in the render
//! path) reads ambient environment state.

use serde::Deserialize;

use crate::foundation::error::{StudioError, StudioResult};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for the generation service.
#[derive(Clone, Debug)]
pub struct GenAiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
}

impl GenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

/// Visual style preset mixed into the generation prompt.
#[derive(Clone, Copy, Debug)]
pub struct StylePreset {
    pub id: &'static str,
    pub name: &'static str,
    pub prompt_modifier: &'static str,
}

pub const STYLE_PRESETS: [StylePreset; 10] = [
    StylePreset {
        id: "realistic",
        name: "Realista",
        prompt_modifier: "hyper-realistic photography, 8k resolution, cinematic lighting, shot on Sony A7R IV, highly detailed textures, photorealism, depth of field",
    },
    StylePreset {
        id: "3d-render",
        name: "3D Render",
        prompt_modifier: "3D render style, Pixar style, Disney animation style, octane render, soft lighting, cute, vibrant colors, high fidelity, ray tracing",
    },
    StylePreset {
        id: "cyberpunk",
        name: "Cyberpunk",
        prompt_modifier: "Cyberpunk 2077 style, neon lights, futuristic city, purple and blue hues, high contrast, tech atmosphere, blade runner vibe",
    },
    StylePreset {
        id: "anime",
        name: "Anime",
        prompt_modifier: "Anime style, Studio Ghibli inspired, vibrant colors, cel shaded, 2D animation style, dramatic composition, manga art",
    },
    StylePreset {
        id: "game-art",
        name: "Game Art",
        prompt_modifier: "Video game concept art, unreal engine 5, epic fantasy scenery, dynamic lighting, blizzard style, league of legends style",
    },
    StylePreset {
        id: "novela",
        name: "Novela / Drama",
        prompt_modifier: "dramatic telenovela style, emotional close-up, soft cinematic lighting, soap opera aesthetic, high quality TV production, intense drama, bokeh, brazilian tv style",
    },
    StylePreset {
        id: "war",
        name: "Guerra / Ação",
        prompt_modifier: "war photography, battlefield, gritty texture, explosions, military gear, Call of Duty style, cinematic war movie, dust and smoke, high contrast, action movie",
    },
    StylePreset {
        id: "youtube-face",
        name: "React Face",
        prompt_modifier: "YouTube thumbnail style, close up of expressive face, shocked expression, high contrast, vibrant background, bokeh",
    },
    StylePreset {
        id: "minimalist",
        name: "Minimalista",
        prompt_modifier: "minimalist vector art, flat design, clean lines, solid colors, simple composition, corporate memphis style, high quality",
    },
    StylePreset {
        id: "horror",
        name: "Terror",
        prompt_modifier: "horror movie poster style, dark atmosphere, scary, fog, red and black, high contrast, cinematic, creepy lighting",
    },
];

pub fn style_preset(id: &str) -> Option<&'static StylePreset> {
    STYLE_PRESETS.iter().find(|s| s.id == id)
}

/// What to generate: the scene description, a style modifier and the target
/// aspect ratio (one of the resolution catalog's ratio labels).
#[derive(Clone, Debug)]
pub struct BackgroundRequest<'a> {
    pub description: &'a str,
    pub style_modifier: &'a str,
    pub aspect_ratio: &'a str,
}

/// Shared HTTP client for generation calls.
pub fn http_client() -> StudioResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("scstudio/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| StudioError::generate(format!("HTTP client error: {e}")))
}

pub fn build_prompt(req: &BackgroundRequest<'_>) -> String {
    format!(
        "Create a stunning, high-quality YouTube thumbnail background image.\n\
         SCENE DESCRIPTION: {}\n\
         VISUAL STYLE: {}\n\
         CRITICAL INSTRUCTIONS:\n\
         1. NO TEXT. Do not write any words, letters, or logos.\n\
         2. Aspect Ratio {}.\n\
         3. Composition should have open space (negative space) for text overlay.\n\
         4. High contrast, vibrant lighting.",
        req.description, req.style_modifier, req.aspect_ratio
    )
}

/// Request a generated background and return it as a base64 data URL, ready
/// to be used as a scene background source.
pub async fn generate_background(
    client: &reqwest::Client,
    cfg: &GenAiConfig,
    req: &BackgroundRequest<'_>,
) -> StudioResult<String> {
    if cfg.api_key.trim().is_empty() {
        return Err(StudioError::generate("missing API key"));
    }

    let url = format!("{}/models/{}:generateContent", cfg.api_base, cfg.model);
    let body = serde_json::json!({
        "contents": [{ "parts": [{ "text": build_prompt(req) }] }],
        "generationConfig": { "imageConfig": { "aspectRatio": req.aspect_ratio } }
    });

    let resp = client
        .post(&url)
        .header("x-goog-api-key", &cfg.api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| StudioError::generate(format!("request failed: {e}")))?;

    let status = resp.status();
    if !status.is_success() {
        let detail = resp.text().await.unwrap_or_default();
        return Err(StudioError::generate(format!(
            "service returned {status}: {detail}"
        )));
    }

    let parsed: GenerateContentResponse = resp
        .json()
        .await
        .map_err(|e| StudioError::generate(format!("malformed response: {e}")))?;

    data_url_from_response(&parsed)
        .ok_or_else(|| StudioError::generate("service returned no image data"))
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: String,
}

fn data_url_from_response(resp: &GenerateContentResponse) -> Option<String> {
    for candidate in &resp.candidates {
        let Some(content) = &candidate.content else {
            continue;
        };
        for part in &content.parts {
            if let Some(inline) = &part.inline_data {
                let mime = inline.mime_type.as_deref().unwrap_or("image/png");
                return Some(format!("data:{mime};base64,{}", inline.data));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_description_style_and_ratio() {
        let prompt = build_prompt(&BackgroundRequest {
            description: "a castle at dusk",
            style_modifier: "epic fantasy scenery",
            aspect_ratio: "9:16",
        });
        assert!(prompt.contains("SCENE DESCRIPTION: a castle at dusk"));
        assert!(prompt.contains("VISUAL STYLE: epic fantasy scenery"));
        assert!(prompt.contains("Aspect Ratio 9:16"));
        assert!(prompt.contains("NO TEXT"));
    }

    #[test]
    fn response_with_inline_data_becomes_a_data_url() {
        let resp: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[
                {"text":"here you go"},
                {"inlineData":{"mimeType":"image/jpeg","data":"QUJD"}}
            ]}}]}"#,
        )
        .unwrap();
        assert_eq!(
            data_url_from_response(&resp).unwrap(),
            "data:image/jpeg;base64,QUJD"
        );
    }

    #[test]
    fn mime_type_defaults_to_png() {
        let resp: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{"data":"QUJD"}}]}}]}"#,
        )
        .unwrap();
        assert!(
            data_url_from_response(&resp)
                .unwrap()
                .starts_with("data:image/png;base64,")
        );
    }

    #[test]
    fn empty_response_yields_none() {
        let resp: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(data_url_from_response(&resp).is_none());

        let resp: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":"no"}]}}]}"#)
                .unwrap();
        assert!(data_url_from_response(&resp).is_none());
    }

    #[test]
    fn presets_cover_the_catalog() {
        assert_eq!(STYLE_PRESETS.len(), 10);
        assert!(style_preset("game-art").is_some());
        assert!(style_preset("vaporwave").is_none());
    }
}
