use serde::{Deserialize, Serialize};

use crate::types::AnalyticsConfig;

// Request DTOs

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    #[serde(default)]
    pub page_slug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RobotsQuery {
    pub environment: Option<String>,
}

// Response DTOs

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Placeholder returned for a robots environment that has no stored row.
#[derive(Debug, Serialize)]
pub struct EmptyRobotsResponse {
    pub environment: String,
    pub content: String,
}

/// Tracking ids needed to render analytics tags on public pages.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAnalyticsResponse {
    pub ga4_measurement_id: Option<String>,
    pub search_console_verification: Option<String>,
    pub meta_pixel_id: Option<String>,
}

impl From<AnalyticsConfig> for PublicAnalyticsResponse {
    fn from(config: AnalyticsConfig) -> Self {
        Self {
            ga4_measurement_id: config.ga4_measurement_id,
            search_console_verification: config.search_console_verification,
            meta_pixel_id: config.meta_pixel_id,
        }
    }
}
