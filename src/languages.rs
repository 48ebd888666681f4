/// Selector entry meaning "let the service detect the language".
pub const AUTO: &str = "auto";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

const fn lang(code: &'static str, name: &'static str) -> Language {
    Language { code, name }
}

pub const LANGUAGES: &[Language] = &[
    lang(AUTO, "Detect language"),
    lang("ar", "Arabic"),
    lang("zh-CN", "Chinese (Simplified)"),
    lang("zh-TW", "Chinese (Traditional)"),
    lang("cs", "Czech"),
    lang("da", "Danish"),
    lang("nl", "Dutch"),
    lang("en", "English"),
    lang("eo", "Esperanto"),
    lang("fi", "Finnish"),
    lang("fr", "French"),
    lang("de", "German"),
    lang("el", "Greek"),
    lang("he", "Hebrew"),
    lang("hi", "Hindi"),
    lang("hu", "Hungarian"),
    lang("is", "Icelandic"),
    lang("it", "Italian"),
    lang("ja", "Japanese"),
    lang("ko", "Korean"),
    lang("la", "Latin"),
    lang("no", "Norwegian"),
    lang("pl", "Polish"),
    lang("pt", "Portuguese"),
    lang("ru", "Russian"),
    lang("es", "Spanish"),
    lang("sv", "Swedish"),
    lang("tr", "Turkish"),
    lang("uk", "Ukrainian"),
];

pub fn index_of(code: &str) -> Option<usize> {
    LANGUAGES.iter().position(|l| l.code == code)
}

pub fn names() -> Vec<&'static str> {
    LANGUAGES.iter().map(|l| l.name).collect()
}

/// The code to send for a selector value. `auto` and unknown codes are left
/// out of the request so the service applies its own default.
pub fn request_code(code: &str) -> Option<String> {
    if code == AUTO || index_of(code).is_none() {
        None
    } else {
        Some(code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        for (i, language) in LANGUAGES.iter().enumerate() {
            assert_eq!(index_of(language.code), Some(i), "duplicate {}", language.code);
        }
    }

    #[test]
    fn test_request_code() {
        assert_eq!(request_code("sv"), Some("sv".to_string()));
        assert_eq!(request_code(AUTO), None);
        assert_eq!(request_code("xx"), None);
    }
}
