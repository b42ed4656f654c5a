use crate::{
    error::{Result, TtsError},
    language::{self, SupportedLanguage},
    normalizer,
    types::SynthesisRequest,
};

/// Number of accent embeddings
pub const ACCENT_COUNT: usize = 5;

/// Number of speaking style embeddings
pub const STYLE_COUNT: usize = 3;

/// A request that passed validation
///
/// Only obtainable through [`SynthesisRequest::validate`], so every index it
/// carries is in range for the model's embedding tables.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    text: String,
    normalized_text: String,
    language: &'static SupportedLanguage,
    language_index: usize,
    accent_id: usize,
    style_id: usize,
    speaker_id: Option<i64>,
}

impl ValidatedRequest {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Normalized form of the input text
    ///
    /// Not consumed by the placeholder model, which conditions only on
    /// language, accent and style.
    pub fn normalized_text(&self) -> &str {
        &self.normalized_text
    }

    pub const fn language(&self) -> &'static SupportedLanguage {
        self.language
    }

    /// Position of the language in the supported table
    pub const fn language_index(&self) -> usize {
        self.language_index
    }

    pub const fn accent_id(&self) -> usize {
        self.accent_id
    }

    pub const fn style_id(&self) -> usize {
        self.style_id
    }

    pub const fn speaker_id(&self) -> Option<i64> {
        self.speaker_id
    }
}

impl SynthesisRequest {
    /// Check language and id ranges, then normalize the text
    ///
    /// Checks run in order: language, accent, style. The first failure is
    /// reported.
    pub fn validate(self) -> Result<ValidatedRequest> {
        let (language_index, language) = language::find(&self.language)
            .ok_or_else(|| TtsError::InvalidRequest(format!("Language {} not supported", self.language)))?;

        let accent_id = index_below(self.accent_id, ACCENT_COUNT)
            .ok_or_else(|| TtsError::InvalidRequest(format!("accent_id must be 0-{}", ACCENT_COUNT - 1)))?;

        let style_id = index_below(self.style_id, STYLE_COUNT)
            .ok_or_else(|| TtsError::InvalidRequest(format!("style_id must be 0-{}", STYLE_COUNT - 1)))?;

        let normalized_text = normalizer::normalize(&self.text);

        Ok(ValidatedRequest {
            text: self.text,
            normalized_text,
            language,
            language_index,
            accent_id,
            style_id,
            speaker_id: self.speaker_id,
        })
    }
}

fn index_below(value: i64, bound: usize) -> Option<usize> {
    usize::try_from(value).ok().filter(|&index| index < bound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(language: &str, accent_id: i64, style_id: i64) -> SynthesisRequest {
        SynthesisRequest {
            text: "Hello, World".to_string(),
            language: language.to_string(),
            accent_id,
            style_id,
            speaker_id: None,
        }
    }

    fn rejection(request: SynthesisRequest) -> String {
        match request.validate() {
            Err(TtsError::InvalidRequest(message)) => message,
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }

    #[test]
    fn accepts_every_supported_language() {
        for (index, language) in crate::language::LANGUAGES.iter().enumerate() {
            let validated = request(language.code, 0, 0).validate().unwrap();
            assert_eq!(validated.language_index(), index);
            assert_eq!(validated.language().code, language.code);
        }
    }

    #[test]
    fn rejects_unsupported_languages() {
        for code in ["xx", "en", "", "HI", "hin", "hi "] {
            assert_eq!(rejection(request(code, 0, 0)), format!("Language {code} not supported"));
        }
    }

    #[test]
    fn accent_bounds() {
        for accent in 0..5 {
            assert_eq!(request("hi", accent, 0).validate().unwrap().accent_id(), accent as usize);
        }
        for accent in [-1, 5, 7, i64::MIN, i64::MAX] {
            assert_eq!(rejection(request("hi", accent, 0)), "accent_id must be 0-4");
        }
    }

    #[test]
    fn style_bounds() {
        for style in 0..3 {
            assert_eq!(request("ta", 0, style).validate().unwrap().style_id(), style as usize);
        }
        for style in [-1, 3, 100] {
            assert_eq!(rejection(request("ta", 0, style)), "style_id must be 0-2");
        }
    }

    #[test]
    fn language_is_checked_first() {
        assert_eq!(rejection(request("xx", 9, 9)), "Language xx not supported");
        assert_eq!(rejection(request("hi", 9, 9)), "accent_id must be 0-4");
    }

    #[test]
    fn keeps_original_and_normalized_text() {
        let validated = request("hi", 1, 2).validate().unwrap();
        assert_eq!(validated.text(), "Hello, World");
        assert_eq!(validated.normalized_text(), "hello, world");
        assert_eq!(validated.speaker_id(), None);
    }
}
