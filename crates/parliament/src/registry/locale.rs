use serde::{Deserialize, Serialize};

use super::domain::PersonName;

/// Display languages with a dedicated name field on representatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "ka")]
    Georgian,
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Parses a language code or tag; only the first two letters are significant,
    /// so `en-us` and `EN` both resolve to English.
    pub fn from_code(value: &str) -> Option<Self> {
        let prefix: String = value.trim().chars().take(2).collect();
        match prefix.to_ascii_lowercase().as_str() {
            "ka" => Some(Self::Georgian),
            "en" => Some(Self::English),
            _ => None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Language::Georgian => "ka",
            Language::English => "en",
        }
    }

    /// The localized name field for this language, if the record has a usable one.
    pub fn localized_name(self, names: &PersonName) -> Option<&str> {
        let field = match self {
            Language::Georgian => names.name_ka.as_deref(),
            Language::English => names.name_en.as_deref(),
        };
        field.filter(|value| !value.trim().is_empty())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_code(value).ok_or_else(|| format!("unsupported language '{value}' (ka, en)"))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code_uses_two_letter_prefix() {
        assert_eq!(Language::from_code("ka"), Some(Language::Georgian));
        assert_eq!(Language::from_code("en-gb"), Some(Language::English));
        assert_eq!(Language::from_code(" EN "), Some(Language::English));
        assert_eq!(Language::from_code("ru"), None);
        assert_eq!(Language::from_code(""), None);
    }

    #[test]
    fn localized_name_skips_blank_fields() {
        let names = PersonName {
            name: Some("Nino Ninidze".to_string()),
            name_ka: Some("   ".to_string()),
            name_en: Some("Nino Ninidze".to_string()),
        };
        assert_eq!(Language::Georgian.localized_name(&names), None);
        assert_eq!(
            Language::English.localized_name(&names),
            Some("Nino Ninidze")
        );
    }
}
