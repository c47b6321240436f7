//! Supported content languages.

use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// A language tag accepted by the `lang` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    EnUs,
    FrFr,
    ArSa,
    EsEs,
    DeDe,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::EnUs,
        Language::FrFr,
        Language::ArSa,
        Language::EsEs,
        Language::DeDe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::EnUs => "en-US",
            Language::FrFr => "fr-FR",
            Language::ArSa => "ar-SA",
            Language::EsEs => "es-ES",
            Language::DeDe => "de-DE",
        }
    }

    /// All supported tags, in the order they are advertised to clients.
    pub fn supported_tags() -> Vec<&'static str> {
        Self::ALL.iter().map(Language::as_str).collect()
    }
}

impl FromStr for Language {
    type Err = ApiError;

    /// Tags match exactly; `en-us` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| ApiError::InvalidLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
