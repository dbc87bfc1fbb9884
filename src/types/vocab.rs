use std::fmt;

use serde::{Deserialize, Serialize};

/// Sitemap `<changefreq>` values from the sitemaps.org protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub const ALL: [ChangeFrequency; 7] = [
        Self::Always,
        Self::Hourly,
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Yearly,
        Self::Never,
    ];

    pub fn parse(s: &str) -> Option<ChangeFrequency> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP status a redirect rule answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectStatus {
    #[default]
    Permanent,
    Temporary,
}

impl RedirectStatus {
    pub fn from_code(code: u16) -> Option<RedirectStatus> {
        match code {
            301 => Some(Self::Permanent),
            302 => Some(Self::Temporary),
            _ => None,
        }
    }

    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Permanent => 301,
            Self::Temporary => 302,
        }
    }
}

/// Deployment environment. Selects the robots.txt row and cookie flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    #[default]
    Staging,
}

impl Environment {
    pub fn parse(s: &str) -> Option<Environment> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "staging" | "development" | "dev" => Some(Self::Staging),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Staging => "staging",
        }
    }

    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_frequency_parse() {
        assert_eq!(ChangeFrequency::parse("weekly"), Some(ChangeFrequency::Weekly));
        assert_eq!(ChangeFrequency::parse("Weekly"), None);
        assert_eq!(ChangeFrequency::parse("fortnightly"), None);
        for f in ChangeFrequency::ALL {
            assert_eq!(ChangeFrequency::parse(f.as_str()), Some(f));
        }
    }

    #[test]
    fn test_redirect_status_codes() {
        assert_eq!(RedirectStatus::from_code(301), Some(RedirectStatus::Permanent));
        assert_eq!(RedirectStatus::from_code(302), Some(RedirectStatus::Temporary));
        assert_eq!(RedirectStatus::from_code(307), None);
        assert_eq!(RedirectStatus::default().code(), 301);
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("production"), Some(Environment::Production));
        assert_eq!(Environment::parse(" PROD "), Some(Environment::Production));
        assert_eq!(Environment::parse("development"), Some(Environment::Staging));
        assert_eq!(Environment::parse("qa"), None);
        assert!(!Environment::default().is_production());
    }
}
