//! The two supported display languages

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Language variant used for labels and number formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// fr-FR, amounts in euros
    #[default]
    #[serde(rename = "fr")]
    French,
    /// en-US, amounts in dollars when a conversion rate is configured
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// The other variant
    pub fn toggled(self) -> Self {
        match self {
            Language::French => Language::English,
            Language::English => Language::French,
        }
    }

    /// Short code used on the command line and in config files
    pub fn code(self) -> &'static str {
        match self {
            Language::French => "fr",
            Language::English => "en",
        }
    }

    /// BCP 47 locale tag whose conventions the formatter follows
    pub fn locale(self) -> &'static str {
        match self {
            Language::French => "fr-FR",
            Language::English => "en-US",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fr" | "fr-fr" | "french" | "francais" | "français" => Ok(Language::French),
            "en" | "en-us" | "english" => Ok(Language::English),
            other => Err(ConfigError::UnknownLanguage(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_an_involution() {
        for lang in [Language::French, Language::English] {
            assert_ne!(lang.toggled(), lang);
            assert_eq!(lang.toggled().toggled(), lang);
        }
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!("fr".parse::<Language>().unwrap(), Language::French);
        assert_eq!(" EN ".parse::<Language>().unwrap(), Language::English);
        assert_eq!("en-US".parse::<Language>().unwrap(), Language::English);
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn test_serde_uses_short_codes() {
        assert_eq!(serde_json::to_string(&Language::English).unwrap(), "\"en\"");
        let lang: Language = serde_json::from_str("\"fr\"").unwrap();
        assert_eq!(lang, Language::French);
    }
}
