use serde_json::Value;

use crate::server::response::ApiError;
use crate::types::{
    ChangeFrequency, Environment, NewContactMessage, NewProject, NewSchemaMarkup, PageSeoInput,
    ProjectPatch, RedirectStatus, RobotsConfigInput, SchemaMarkupPatch, SitemapConfigInput,
};

const MAX_SLUG_LEN: usize = 64;
const MAX_NAME_LEN: usize = 200;
const MAX_EMAIL_LEN: usize = 320;
const MAX_MESSAGE_LEN: usize = 5000;
const MIN_PASSWORD_LEN: usize = 6;

pub const INVALID_SCHEMA_DATA: &str = "Invalid JSON-LD data";

/// Prefixes the redirect middleware never rewrites.
pub const EXEMPT_PREFIXES: [&str; 2] = ["/api", "/admin"];

fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("{field} is required")));
    }
    Ok(())
}

fn max_len(field: &str, value: &str, max: usize) -> Result<(), ApiError> {
    if value.chars().count() > max {
        return Err(ApiError::bad_request(format!(
            "{field} cannot exceed {max} characters"
        )));
    }
    Ok(())
}

fn url_or_path(field: &str, value: &str) -> Result<(), ApiError> {
    let value = value.trim();
    let is_http = ["http://", "https://"]
        .iter()
        .any(|scheme| value.len() > scheme.len() && value.starts_with(scheme));
    if is_http || value.starts_with('/') {
        Ok(())
    } else {
        Err(ApiError::bad_request(format!(
            "{field} must be an http(s) URL or a path starting with /"
        )))
    }
}

/// True when `path` begins with an exempt prefix. This is a plain string
/// prefix test, so `/apiary` and `/administrator` are exempt too.
#[must_use]
pub fn is_exempt_path(path: &str) -> bool {
    EXEMPT_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

pub fn validate_slug(field: &str, slug: &str) -> Result<(), ApiError> {
    require(field, slug)?;
    max_len(field, slug, MAX_SLUG_LEN)?;
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ApiError::bad_request(format!(
            "{field} can only contain lowercase letters, digits, and hyphens"
        )));
    }
    Ok(())
}

pub fn validate_new_project(project: &NewProject) -> Result<(), ApiError> {
    require("title", &project.title)?;
    require("description", &project.description)?;
    require("image", &project.image)?;
    require("link", &project.link)?;
    url_or_path("image", &project.image)?;
    url_or_path("link", &project.link)
}

pub fn validate_project_patch(patch: &ProjectPatch) -> Result<(), ApiError> {
    if let Some(title) = &patch.title {
        require("title", title)?;
    }
    if let Some(description) = &patch.description {
        require("description", description)?;
    }
    if let Some(image) = &patch.image {
        require("image", image)?;
        url_or_path("image", image)?;
    }
    if let Some(link) = &patch.link {
        require("link", link)?;
        url_or_path("link", link)?;
    }
    Ok(())
}

pub fn validate_contact_message(message: &NewContactMessage) -> Result<(), ApiError> {
    require("name", &message.name)?;
    max_len("name", &message.name, MAX_NAME_LEN)?;

    require("email", &message.email)?;
    max_len("email", &message.email, MAX_EMAIL_LEN)?;
    let valid_email = message
        .email
        .trim()
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        });
    if !valid_email {
        return Err(ApiError::bad_request("email must be a valid email address"));
    }

    require("message", &message.message)?;
    max_len("message", &message.message, MAX_MESSAGE_LEN)
}

pub fn validate_page_seo(input: &PageSeoInput) -> Result<(), ApiError> {
    validate_slug("pageSlug", &input.page_slug)?;
    require("pageName", &input.page_name)
}

/// Accepts a JSON object or array. A string is parsed as JSON first, so
/// clients may send the document pre-serialized.
pub fn normalize_schema_data(data: Value) -> Result<Value, ApiError> {
    let data = match data {
        Value::String(raw) => serde_json::from_str::<Value>(&raw)
            .map_err(|_| ApiError::bad_request(INVALID_SCHEMA_DATA))?,
        other => other,
    };

    match data {
        Value::Object(_) | Value::Array(_) => Ok(data),
        _ => Err(ApiError::bad_request(INVALID_SCHEMA_DATA)),
    }
}

pub fn validate_new_schema_markup(input: NewSchemaMarkup) -> Result<NewSchemaMarkup, ApiError> {
    validate_slug("pageSlug", &input.page_slug)?;
    require("schemaName", &input.schema_name)?;
    Ok(NewSchemaMarkup {
        schema_data: normalize_schema_data(input.schema_data)?,
        ..input
    })
}

pub fn validate_schema_markup_patch(
    patch: SchemaMarkupPatch,
) -> Result<SchemaMarkupPatch, ApiError> {
    if let Some(slug) = &patch.page_slug {
        validate_slug("pageSlug", slug)?;
    }
    if let Some(name) = &patch.schema_name {
        require("schemaName", name)?;
    }
    let schema_data = patch.schema_data.map(normalize_schema_data).transpose()?;
    Ok(SchemaMarkupPatch {
        schema_data,
        ..patch
    })
}

pub fn validate_sitemap_config(input: &SitemapConfigInput) -> Result<(), ApiError> {
    validate_slug("pageSlug", &input.page_slug)?;

    if let Some(priority) = &input.priority {
        let in_range = priority
            .trim()
            .parse::<f64>()
            .is_ok_and(|p| (0.0..=1.0).contains(&p));
        if !in_range {
            return Err(ApiError::bad_request(
                "priority must be a decimal between 0.0 and 1.0",
            ));
        }
    }

    if let Some(frequency) = &input.change_frequency {
        if ChangeFrequency::parse(frequency).is_none() {
            let allowed: Vec<&str> = ChangeFrequency::ALL.iter().map(|f| f.as_str()).collect();
            return Err(ApiError::bad_request(format!(
                "changeFrequency must be one of: {}",
                allowed.join(", ")
            )));
        }
    }
    Ok(())
}

pub fn validate_robots_config(input: &RobotsConfigInput) -> Result<(), ApiError> {
    if let Some(environment) = &input.environment {
        let known = [Environment::Production, Environment::Staging]
            .iter()
            .any(|e| e.as_str() == environment);
        if !known {
            return Err(ApiError::bad_request(
                "environment must be production or staging",
            ));
        }
    }
    require("content", &input.content)
}

pub fn validate_redirect(from_path: &str, to_path: &str, status_code: u16) -> Result<(), ApiError> {
    require("fromPath", from_path)?;
    require("toPath", to_path)?;

    if !from_path.starts_with('/') {
        return Err(ApiError::bad_request("fromPath must start with /"));
    }
    if is_exempt_path(from_path) {
        return Err(ApiError::bad_request(
            "fromPath cannot start with /api or /admin",
        ));
    }
    url_or_path("toPath", to_path)?;
    if from_path == to_path {
        return Err(ApiError::bad_request("fromPath and toPath must differ"));
    }
    if RedirectStatus::from_code(status_code).is_none() {
        return Err(ApiError::bad_request("statusCode must be 301 or 302"));
    }
    Ok(())
}

pub fn validate_login(username: &str, password: &str) -> Result<(), ApiError> {
    require("username", username)?;
    require("password", password)
}

pub fn validate_password_change(current: &str, new: &str) -> Result<(), ApiError> {
    require("currentPassword", current)?;
    if new.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(format!(
            "newPassword must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project() -> NewProject {
        NewProject {
            title: "Site".to_string(),
            description: "A site".to_string(),
            image: "https://img.example/a.png".to_string(),
            link: "/projects/site".to_string(),
        }
    }

    #[test]
    fn test_project_first_failing_field_named() {
        assert!(validate_new_project(&project()).is_ok());

        let err = validate_new_project(&NewProject {
            title: "  ".to_string(),
            description: String::new(),
            ..project()
        })
        .unwrap_err();
        assert_eq!(err.message, "title is required");

        let err = validate_new_project(&NewProject {
            link: "javascript:alert(1)".to_string(),
            ..project()
        })
        .unwrap_err();
        assert!(err.message.starts_with("link must be"));
    }

    #[test]
    fn test_project_patch_only_checks_supplied_fields() {
        assert!(validate_project_patch(&ProjectPatch::default()).is_ok());
        assert!(
            validate_project_patch(&ProjectPatch {
                title: Some(String::new()),
                ..Default::default()
            })
            .is_err()
        );
    }

    #[test]
    fn test_contact_email() {
        let message = |email: &str| NewContactMessage {
            name: "Ada".to_string(),
            email: email.to_string(),
            message: "Hello".to_string(),
        };

        assert!(validate_contact_message(&message("ada@example.com")).is_ok());
        assert!(validate_contact_message(&message("ada")).is_err());
        assert!(validate_contact_message(&message("@example.com")).is_err());
        assert!(validate_contact_message(&message("ada@")).is_err());
        assert!(validate_contact_message(&message("a@b@c")).is_err());
    }

    #[test]
    fn test_contact_length_caps() {
        let err = validate_contact_message(&NewContactMessage {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "x".repeat(5001),
        })
        .unwrap_err();
        assert_eq!(err.message, "message cannot exceed 5000 characters");
    }

    #[test]
    fn test_slug_rules() {
        assert!(validate_slug("pageSlug", "about-me-2").is_ok());
        assert!(validate_slug("pageSlug", "").is_err());
        assert!(validate_slug("pageSlug", "About").is_err());
        assert!(validate_slug("pageSlug", "a/b").is_err());
        assert!(validate_slug("pageSlug", &"a".repeat(65)).is_err());
    }

    #[test]
    fn test_schema_data_normalization() {
        assert_eq!(
            normalize_schema_data(json!({"@type": "Person"})).unwrap(),
            json!({"@type": "Person"})
        );
        assert_eq!(
            normalize_schema_data(json!("[{\"@type\": \"Person\"}]")).unwrap(),
            json!([{"@type": "Person"}])
        );

        for bad in [json!("{not json"), json!(42), json!(null), json!("\"text\"")] {
            let err = normalize_schema_data(bad).unwrap_err();
            assert_eq!(err.message, INVALID_SCHEMA_DATA);
        }
    }

    #[test]
    fn test_sitemap_rules() {
        let input = |priority: &str, frequency: &str| SitemapConfigInput {
            page_slug: "home".to_string(),
            include_in_sitemap: None,
            priority: Some(priority.to_string()),
            change_frequency: Some(frequency.to_string()),
        };

        assert!(validate_sitemap_config(&input("1.0", "weekly")).is_ok());
        assert!(validate_sitemap_config(&input("0", "never")).is_ok());
        assert!(validate_sitemap_config(&input("1.5", "weekly")).is_err());
        assert!(validate_sitemap_config(&input("high", "weekly")).is_err());
        assert!(validate_sitemap_config(&input("0.5", "fortnightly")).is_err());
    }

    #[test]
    fn test_robots_rules() {
        let input = |env: Option<&str>, content: &str| RobotsConfigInput {
            environment: env.map(str::to_string),
            content: content.to_string(),
        };

        assert!(validate_robots_config(&input(None, "User-agent: *")).is_ok());
        assert!(validate_robots_config(&input(Some("staging"), "User-agent: *")).is_ok());
        assert!(validate_robots_config(&input(Some("qa"), "User-agent: *")).is_err());
        assert!(validate_robots_config(&input(Some("production"), "")).is_err());
    }

    #[test]
    fn test_redirect_rules() {
        assert!(validate_redirect("/old", "/new", 301).is_ok());
        assert!(validate_redirect("/old", "https://example.com/new", 302).is_ok());
        assert!(validate_redirect("old", "/new", 301).is_err());
        assert!(validate_redirect("/api/old", "/new", 301).is_err());
        assert!(validate_redirect("/admin", "/new", 301).is_err());
        assert!(validate_redirect("/apiary", "/new", 301).is_err());
        assert!(validate_redirect("/same", "/same", 301).is_err());
        assert!(validate_redirect("/old", "/new", 307).is_err());
    }

    #[test]
    fn test_exempt_paths() {
        assert!(is_exempt_path("/api"));
        assert!(is_exempt_path("/api/old"));
        assert!(is_exempt_path("/admin/old"));
        assert!(is_exempt_path("/apiary"));
        assert!(is_exempt_path("/administrator"));
        assert!(!is_exempt_path("/old"));
        assert!(!is_exempt_path("/old/api"));
    }

    #[test]
    fn test_password_change_rules() {
        assert!(validate_password_change("old", "secret1").is_ok());
        assert!(validate_password_change("", "secret1").is_err());
        assert!(validate_password_change("old", "short").is_err());
    }
}
