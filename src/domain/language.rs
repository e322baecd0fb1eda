use serde::Serialize;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

impl Language {
    pub const fn new(code: &'static str, name: &'static str) -> Self {
        Self { code, name }
    }
}

pub const DEFAULT_LANGUAGE: Language = Language::new("vi", "Vietnamese");

pub const SUPPORTED_LANGUAGES: &[Language] = &[
    DEFAULT_LANGUAGE,
    Language::new("en", "English"),
    Language::new("fr", "French"),
    Language::new("es", "Spanish"),
    Language::new("de", "German"),
    Language::new("it", "Italian"),
    Language::new("ja", "Japanese"),
    Language::new("ko", "Korean"),
    Language::new("pt", "Portuguese"),
    Language::new("ru", "Russian"),
    Language::new("zh", "Chinese"),
    Language::new("ar", "Arabic"),
    Language::new("nl", "Dutch"),
    Language::new("pl", "Polish"),
    Language::new("sv", "Swedish"),
    Language::new("tr", "Turkish"),
];

/// Case-insensitive lookup by ISO code.
pub fn find_language(code: &str) -> Option<Language> {
    let code = code.trim();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|lang| lang.code.eq_ignore_ascii_case(code))
        .copied()
}
