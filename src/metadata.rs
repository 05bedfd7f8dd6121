use std::fmt;

use chrono::NaiveDate;

/// Unique publication identifier, rendered as a URN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Uuid(String),
    Isbn(String),
}

impl Identifier {
    /// Fresh random (v4) UUID identifier.
    pub fn random() -> Self {
        Self::Uuid(uuid::Uuid::new_v4().to_string())
    }

    pub fn urn(&self) -> String {
        match self {
            Self::Uuid(value) => format!("urn:uuid:{value}"),
            Self::Isbn(value) => format!("urn:isbn:{value}"),
        }
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Uuid(_) => "UUID",
            Self::Isbn(_) => "ISBN",
        }
    }
}

impl Default for Identifier {
    fn default() -> Self {
        Self::random()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.urn())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    Arabic,
    Bulgarian,
    Chinese,
    Croatian,
    Czech,
    Danish,
    Dutch,
    #[default]
    English,
    Estonian,
    Finnish,
    French,
    Greek,
    German,
    Hebrew,
    Hungarian,
    Icelandic,
    Indonesian,
    Irish,
    Italian,
    Japanese,
    Korean,
    Latvian,
    Lithuanian,
    Macedonian,
    Malay,
    Maltese,
    Norwegian,
    Persian,
    Polish,
    Portuguese,
    Romanian,
    Russian,
    Serbian,
    Slovak,
    Slovenian,
    Spanish,
    Swahili,
    Swedish,
    Tagalog,
    Thai,
    Turkish,
    Ukrainian,
    Urdu,
    Vietnamese,
    Welsh,
    Yiddish,
}

impl Language {
    const ALL: [Self; 46] = [
        Self::Arabic,
        Self::Bulgarian,
        Self::Chinese,
        Self::Croatian,
        Self::Czech,
        Self::Danish,
        Self::Dutch,
        Self::English,
        Self::Estonian,
        Self::Finnish,
        Self::French,
        Self::Greek,
        Self::German,
        Self::Hebrew,
        Self::Hungarian,
        Self::Icelandic,
        Self::Indonesian,
        Self::Irish,
        Self::Italian,
        Self::Japanese,
        Self::Korean,
        Self::Latvian,
        Self::Lithuanian,
        Self::Macedonian,
        Self::Malay,
        Self::Maltese,
        Self::Norwegian,
        Self::Persian,
        Self::Polish,
        Self::Portuguese,
        Self::Romanian,
        Self::Russian,
        Self::Serbian,
        Self::Slovak,
        Self::Slovenian,
        Self::Spanish,
        Self::Swahili,
        Self::Swedish,
        Self::Tagalog,
        Self::Thai,
        Self::Turkish,
        Self::Ukrainian,
        Self::Urdu,
        Self::Vietnamese,
        Self::Welsh,
        Self::Yiddish,
    ];

    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Arabic => "ar",
            Self::Bulgarian => "bg",
            Self::Chinese => "zh",
            Self::Croatian => "hr",
            Self::Czech => "cs",
            Self::Danish => "da",
            Self::Dutch => "nl",
            Self::English => "en",
            Self::Estonian => "et",
            Self::Finnish => "fi",
            Self::French => "fr",
            Self::Greek => "el",
            Self::German => "de",
            Self::Hebrew => "he",
            Self::Hungarian => "hu",
            Self::Icelandic => "is",
            Self::Indonesian => "id",
            Self::Irish => "ga",
            Self::Italian => "it",
            Self::Japanese => "ja",
            Self::Korean => "ko",
            Self::Latvian => "lv",
            Self::Lithuanian => "lt",
            Self::Macedonian => "mk",
            Self::Malay => "ms",
            Self::Maltese => "mt",
            Self::Norwegian => "no",
            Self::Persian => "fa",
            Self::Polish => "pl",
            Self::Portuguese => "pt",
            Self::Romanian => "ro",
            Self::Russian => "ru",
            Self::Serbian => "sr",
            Self::Slovak => "sk",
            Self::Slovenian => "sl",
            Self::Spanish => "es",
            Self::Swahili => "sw",
            Self::Swedish => "sv",
            Self::Tagalog => "tl",
            Self::Thai => "th",
            Self::Turkish => "tr",
            Self::Ukrainian => "uk",
            Self::Urdu => "ur",
            Self::Vietnamese => "vi",
            Self::Welsh => "cy",
            Self::Yiddish => "yi",
        }
    }

    /// Looks up a language by its ISO 639-1 code; unknown codes fall back to English.
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code() == code)
            .unwrap_or_default()
    }
}

/// Bibliographic data written to the package document and the NCX header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub language: Language,
    pub identifier: Identifier,
    pub creator: Option<String>,
    pub contributor: Option<String>,
    pub publisher: Option<String>,
    pub date: Option<NaiveDate>,
    pub subject: Option<String>,
    pub description: Option<String>,
}

impl Metadata {
    pub fn new(title: impl Into<String>, language: Language, identifier: Identifier) -> Self {
        Self {
            title: title.into(),
            language,
            identifier,
            creator: None,
            contributor: None,
            publisher: None,
            date: None,
            subject: None,
            description: None,
        }
    }

    pub fn creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn contributor(mut self, contributor: impl Into<String>) -> Self {
        self.contributor = Some(contributor.into());
        self
    }

    pub fn publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_urns_and_schemes() {
        let isbn = Identifier::Isbn("978-3-16-148410-0".to_string());
        assert_eq!(isbn.urn(), "urn:isbn:978-3-16-148410-0");
        assert_eq!(isbn.scheme(), "ISBN");

        let uuid = Identifier::Uuid("abc".to_string());
        assert_eq!(uuid.to_string(), "urn:uuid:abc");
        assert_eq!(uuid.scheme(), "UUID");
    }

    #[test]
    fn random_identifier_is_a_valid_uuid() {
        let Identifier::Uuid(value) = Identifier::random() else {
            panic!("random identifier must be a uuid");
        };
        assert!(uuid::Uuid::parse_str(&value).is_ok());
    }

    #[test]
    fn language_codes_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), lang);
        }
        assert_eq!(Language::from_code("JA"), Language::Japanese);
    }

    #[test]
    fn unknown_language_defaults_to_english() {
        assert_eq!(Language::from_code("xx"), Language::English);
        assert_eq!(Language::from_code(""), Language::English);
        assert_eq!(Language::default().code(), "en");
    }

    #[test]
    fn optional_fields_start_absent() {
        let metadata = Metadata::new("Title", Language::Spanish, Identifier::random())
            .creator("Author")
            .subject("Fiction");
        assert_eq!(metadata.creator.as_deref(), Some("Author"));
        assert_eq!(metadata.subject.as_deref(), Some("Fiction"));
        assert_eq!(metadata.publisher, None);
        assert_eq!(metadata.date, None);
    }
}
