mod schema;
pub mod seed;
mod sqlite;

pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::types::*;

/// Store defines the database interface.
///
/// Upserts are keyed by natural key (slug, environment, or the singleton row)
/// and return the row as persisted. Deletes report whether a row was removed
/// and never fail for a missing id.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Project operations
    fn create_project(&self, project: &NewProject) -> Result<Project>;
    fn get_project(&self, id: i64) -> Result<Option<Project>>;
    fn list_projects(&self) -> Result<Vec<Project>>;
    fn update_project(&self, id: i64, patch: &ProjectPatch) -> Result<Option<Project>>;
    fn delete_project(&self, id: i64) -> Result<bool>;

    // Contact message operations
    fn create_contact_message(&self, message: &NewContactMessage) -> Result<ContactMessage>;
    fn list_contact_messages(&self) -> Result<Vec<ContactMessage>>;
    fn delete_contact_message(&self, id: i64) -> Result<bool>;

    // Admin user operations
    fn create_admin_user(&self, username: &str, password_hash: &str) -> Result<AdminUser>;
    fn get_admin_user_by_username(&self, username: &str) -> Result<Option<AdminUser>>;
    fn get_first_admin_user(&self) -> Result<Option<AdminUser>>;
    fn update_admin_password(&self, id: i64, password_hash: &str) -> Result<()>;
    fn has_admin_user(&self) -> Result<bool>;

    // Session operations
    fn create_session(&self, session: &Session) -> Result<()>;
    fn get_session(&self, id_hash: &str) -> Result<Option<Session>>;
    fn delete_session(&self, id_hash: &str) -> Result<bool>;
    fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<usize>;

    // Page SEO operations (keyed by slug)
    fn list_page_seo(&self) -> Result<Vec<PageSeo>>;
    fn get_page_seo(&self, page_slug: &str) -> Result<Option<PageSeo>>;
    fn upsert_page_seo(&self, input: &PageSeoInput) -> Result<PageSeo>;
    fn delete_page_seo(&self, page_slug: &str) -> Result<bool>;

    // Schema markup operations
    fn list_schema_markup(&self) -> Result<Vec<SchemaMarkup>>;
    fn list_schema_markup_for_page(&self, page_slug: &str) -> Result<Vec<SchemaMarkup>>;
    fn get_schema_markup(&self, id: i64) -> Result<Option<SchemaMarkup>>;
    fn create_schema_markup(&self, input: &NewSchemaMarkup) -> Result<SchemaMarkup>;
    fn update_schema_markup(
        &self,
        id: i64,
        patch: &SchemaMarkupPatch,
    ) -> Result<Option<SchemaMarkup>>;
    fn delete_schema_markup(&self, id: i64) -> Result<bool>;

    // Sitemap config operations (keyed by slug, insertion order)
    fn list_sitemap_config(&self) -> Result<Vec<SitemapConfig>>;
    fn upsert_sitemap_config(&self, input: &SitemapConfigInput) -> Result<SitemapConfig>;
    fn delete_sitemap_config(&self, page_slug: &str) -> Result<bool>;

    // Robots config operations (keyed by environment)
    fn get_robots_config(&self, environment: &str) -> Result<Option<RobotsConfig>>;
    fn list_robots_config(&self) -> Result<Vec<RobotsConfig>>;
    fn upsert_robots_config(&self, input: &RobotsConfigInput) -> Result<RobotsConfig>;

    // Singleton config operations
    fn get_analytics_config(&self) -> Result<Option<AnalyticsConfig>>;
    fn upsert_analytics_config(&self, input: &AnalyticsConfigInput) -> Result<AnalyticsConfig>;
    fn get_global_seo(&self) -> Result<Option<GlobalSeo>>;
    fn upsert_global_seo(&self, input: &GlobalSeoInput) -> Result<GlobalSeo>;

    // Redirect operations
    fn list_redirects(&self) -> Result<Vec<Redirect>>;
    fn get_redirect(&self, id: i64) -> Result<Option<Redirect>>;
    fn get_redirect_by_path(&self, from_path: &str) -> Result<Option<Redirect>>;
    fn create_redirect(&self, input: &NewRedirect) -> Result<Redirect>;
    fn update_redirect(&self, id: i64, patch: &RedirectPatch) -> Result<Option<Redirect>>;
    fn delete_redirect(&self, id: i64) -> Result<bool>;

    // Page view operations
    fn track_page_view(&self, page_slug: &str) -> Result<PageView>;
    fn list_page_views(&self) -> Result<Vec<PageView>>;
    fn reset_page_views(&self) -> Result<usize>;

    fn close(&self) -> Result<()>;
}
