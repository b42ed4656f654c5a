use serde::Serialize;
use utoipa::ToSchema;

/// Writing system family reported for a language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum ScriptFamily {
    Devanagari,
    Other,
}

/// A language the service accepts
#[derive(Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct SupportedLanguage {
    #[schema(value_type = String, example = "hi")]
    pub code: &'static str,
    #[schema(value_type = String, example = "Hindi")]
    pub name: &'static str,
    pub script: ScriptFamily,
}

/// Supported languages
///
/// The position of each entry is the language index fed to the model.
pub static LANGUAGES: [SupportedLanguage; 11] = [
    SupportedLanguage::new("hi", "Hindi", ScriptFamily::Devanagari),
    SupportedLanguage::new("bn", "Bengali", ScriptFamily::Other),
    SupportedLanguage::new("mr", "Marathi", ScriptFamily::Devanagari),
    SupportedLanguage::new("kn", "Kannada", ScriptFamily::Other),
    SupportedLanguage::new("te", "Telugu", ScriptFamily::Other),
    SupportedLanguage::new("bh", "Bhojpuri", ScriptFamily::Devanagari),
    SupportedLanguage::new("cc", "Chhattisgarhi", ScriptFamily::Devanagari),
    SupportedLanguage::new("mg", "Magahi", ScriptFamily::Devanagari),
    SupportedLanguage::new("mt", "Maithili", ScriptFamily::Devanagari),
    SupportedLanguage::new("ta", "Tamil", ScriptFamily::Other),
    SupportedLanguage::new("ml", "Malayalam", ScriptFamily::Other),
];

impl SupportedLanguage {
    const fn new(code: &'static str, name: &'static str, script: ScriptFamily) -> Self {
        Self { code, name, script }
    }
}

/// Look up a language by its code, returning its index and entry
pub fn find(code: &str) -> Option<(usize, &'static SupportedLanguage)> {
    LANGUAGES.iter().enumerate().find(|(_, language)| language.code == code)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn eleven_unique_codes() {
        let codes: HashSet<_> = LANGUAGES.iter().map(|l| l.code).collect();
        assert_eq!(codes.len(), 11);
    }

    #[test]
    fn find_returns_table_index() {
        let (index, hindi) = find("hi").unwrap();
        assert_eq!(index, 0);
        assert_eq!(hindi.name, "Hindi");

        let (index, malayalam) = find("ml").unwrap();
        assert_eq!(index, 10);
        assert_eq!(malayalam.script, ScriptFamily::Other);
    }

    #[test]
    fn lookup_is_exact() {
        assert!(find("xx").is_none());
        assert!(find("HI").is_none());
        assert!(find("").is_none());
        assert!(find(" hi").is_none());
    }

    #[test]
    fn devanagari_languages() {
        let devanagari: Vec<_> = LANGUAGES
            .iter()
            .filter(|l| l.script == ScriptFamily::Devanagari)
            .map(|l| l.code)
            .collect();

        assert_eq!(devanagari, ["hi", "mr", "bh", "cc", "mg", "mt"]);
    }

    #[test]
    fn serializes_script_as_label() {
        let json = serde_json::to_value(&LANGUAGES[3]).unwrap();
        assert_eq!(json, serde_json::json!({ "code": "kn", "name": "Kannada", "script": "Other" }));
    }
}
