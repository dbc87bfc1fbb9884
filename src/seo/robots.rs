use crate::types::RobotsConfig;

/// Stored content is served byte for byte. Without a row, crawlers are
/// allowed everywhere and pointed at the sitemap.
#[must_use]
pub fn render_robots(config: Option<&RobotsConfig>, base_url: &str) -> String {
    match config {
        Some(config) => config.content.clone(),
        None => format!("User-agent: *\nAllow: /\nSitemap: {base_url}/sitemap.xml"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_fallback_without_row() {
        let body = render_robots(None, "https://example.com");
        assert_eq!(
            body,
            "User-agent: *\nAllow: /\nSitemap: https://example.com/sitemap.xml"
        );
    }

    #[test]
    fn test_stored_content_verbatim() {
        let content = "User-agent: *\r\nDisallow: /private \n\n# trailing\n";
        let config = RobotsConfig {
            id: 1,
            environment: "production".to_string(),
            content: content.to_string(),
            updated_at: Utc::now(),
        };

        assert_eq!(render_robots(Some(&config), "https://example.com"), content);
    }
}
