use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// Rows

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: String,
    pub link: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A login session. Only the SHA-256 digest of the cookie value is stored.
#[derive(Debug, Clone)]
pub struct Session {
    pub id_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSeo {
    pub id: i64,
    pub page_slug: String,
    pub page_name: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub canonical_url: Option<String>,
    pub robots_index: bool,
    pub robots_follow: bool,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub og_type: Option<String>,
    pub twitter_card: Option<String>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,
    pub twitter_image: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaMarkup {
    pub id: i64,
    pub page_slug: String,
    pub schema_name: String,
    pub schema_data: Value,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapConfig {
    pub id: i64,
    pub page_slug: String,
    pub include_in_sitemap: bool,
    pub priority: String,
    pub change_frequency: String,
    pub last_modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsConfig {
    pub id: i64,
    pub environment: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsConfig {
    pub id: i64,
    pub ga4_measurement_id: Option<String>,
    pub search_console_verification: Option<String>,
    pub meta_pixel_id: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSeo {
    pub id: i64,
    pub site_name: Option<String>,
    pub site_description: Option<String>,
    pub default_og_image: Option<String>,
    pub favicon: Option<String>,
    pub organization_schema: Option<Value>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    pub id: i64,
    pub from_path: String,
    pub to_path: String,
    pub status_code: u16,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub id: i64,
    pub page_slug: String,
    pub view_count: i64,
    pub last_viewed: DateTime<Utc>,
}

// Inputs. String fields default to empty so a missing field reaches
// validation and is reported by name.

/// For upsert fields that can be cleared: an absent field is `None`, an
/// explicit `null` is `Some(None)`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSeoInput {
    #[serde(default)]
    pub page_slug: String,
    #[serde(default)]
    pub page_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub meta_title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub meta_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub meta_keywords: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub canonical_url: Option<Option<String>>,
    #[serde(default)]
    pub robots_index: Option<bool>,
    #[serde(default)]
    pub robots_follow: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub og_title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub og_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub og_image: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub og_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub twitter_card: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub twitter_title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub twitter_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub twitter_image: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSchemaMarkup {
    #[serde(default)]
    pub page_slug: String,
    #[serde(default)]
    pub schema_name: String,
    #[serde(default)]
    pub schema_data: Value,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaMarkupPatch {
    #[serde(default)]
    pub page_slug: Option<String>,
    #[serde(default)]
    pub schema_name: Option<String>,
    #[serde(default)]
    pub schema_data: Option<Value>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapConfigInput {
    #[serde(default)]
    pub page_slug: String,
    #[serde(default)]
    pub include_in_sitemap: Option<bool>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub change_frequency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsConfigInput {
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsConfigInput {
    #[serde(default, deserialize_with = "nullable")]
    pub ga4_measurement_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub search_console_verification: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub meta_pixel_id: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSeoInput {
    #[serde(default, deserialize_with = "nullable")]
    pub site_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub site_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub default_og_image: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub favicon: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub organization_schema: Option<Option<Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRedirect {
    #[serde(default)]
    pub from_path: String,
    #[serde(default)]
    pub to_path: String,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectPatch {
    #[serde(default)]
    pub from_path: Option<String>,
    #[serde(default)]
    pub to_path: Option<String>,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub is_active: Option<bool>,
}
