use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::language::SupportedLanguage;

/// Speech synthesis request
///
/// Ids are signed so that negative values reach validation and are rejected
/// with a descriptive message instead of a deserialization error.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SynthesisRequest {
    /// Text to synthesize
    #[schema(example = "नमस्ते दुनिया")]
    pub text: String,
    /// Language code, one of the supported languages
    #[serde(default = "default_language")]
    #[schema(default = "hi", example = "hi")]
    pub language: String,
    /// Accent index in `[0, 5)`
    #[serde(default)]
    pub accent_id: i64,
    /// Speaking style index in `[0, 3)`
    #[serde(default)]
    pub style_id: i64,
    /// Speaker index; accepted but not used by the model
    #[serde(default)]
    pub speaker_id: Option<i64>,
}

fn default_language() -> String {
    "hi".to_string()
}

/// Successful synthesis response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SynthesisResult {
    #[schema(value_type = String, example = "success")]
    pub status: &'static str,
    #[schema(value_type = String)]
    pub message: &'static str,
    /// Path of the artifact on this service, e.g. `/audio/<file>`
    pub audio_url: String,
    /// Audio length in seconds
    pub duration: f64,
    pub language: String,
    pub accent_id: usize,
    pub style_id: usize,
}

/// Service banner served at `/`
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceBanner {
    #[schema(value_type = String)]
    pub service: &'static str,
    #[schema(value_type = String)]
    pub status: &'static str,
    #[schema(value_type = String)]
    pub version: &'static str,
    /// Path of the interactive API documentation
    #[schema(value_type = String)]
    pub docs: &'static str,
}

/// Model information served at `/info`
#[derive(Debug, Serialize, ToSchema)]
pub struct ModelInfo {
    #[schema(value_type = String)]
    pub name: &'static str,
    #[schema(value_type = String)]
    pub version: &'static str,
    #[schema(value_type = Vec<SupportedLanguage>)]
    pub languages: &'static [SupportedLanguage],
    pub accents: usize,
    pub styles: usize,
    /// Parameter count of the loaded model, 0 when unavailable
    pub parameters: usize,
}

/// Language listing served at `/languages`
#[derive(Debug, Serialize, ToSchema)]
pub struct LanguageList {
    /// Code to display name, in table order
    #[schema(value_type = Object)]
    pub languages: IndexMap<&'static str, &'static str>,
    pub count: usize,
}

/// Which synthesis endpoint handled a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `POST /synthesize`
    Synthesize,
    /// `POST /Get_Inference`
    Inference,
}

impl Endpoint {
    /// File name prefix of artifacts produced through this endpoint
    pub const fn artifact_prefix(self) -> &'static str {
        match self {
            Self::Synthesize => "tts",
            Self::Inference => "inference",
        }
    }

    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Synthesize => "Speech synthesized successfully",
            Self::Inference => "Inference completed successfully",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Synthesize => "synthesize",
            Self::Inference => "inference",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults() {
        let request: SynthesisRequest = serde_json::from_str(r#"{ "text": "Hello" }"#).unwrap();

        assert_eq!(request.language, "hi");
        assert_eq!(request.accent_id, 0);
        assert_eq!(request.style_id, 0);
        assert_eq!(request.speaker_id, None);
    }

    #[test]
    fn request_requires_text() {
        assert!(serde_json::from_str::<SynthesisRequest>(r#"{ "language": "hi" }"#).is_err());
    }

    #[test]
    fn negative_ids_deserialize() {
        let request: SynthesisRequest =
            serde_json::from_str(r#"{ "text": "x", "accent_id": -1, "style_id": -3, "speaker_id": 2 }"#).unwrap();

        assert_eq!(request.accent_id, -1);
        assert_eq!(request.style_id, -3);
        assert_eq!(request.speaker_id, Some(2));
    }

    #[test]
    fn endpoint_labels() {
        assert_eq!(Endpoint::Synthesize.artifact_prefix(), "tts");
        assert_eq!(Endpoint::Inference.artifact_prefix(), "inference");
        assert_eq!(Endpoint::Inference.success_message(), "Inference completed successfully");
    }
}
