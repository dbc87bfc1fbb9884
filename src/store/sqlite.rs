use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde_json::Value;

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::*;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.busy_timeout(Duration::from_secs(5))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

// Fixed width, so ORDER BY on the text column is chronological.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn now() -> String {
    format_datetime(&Utc::now())
}

/// Value to bind for a clearable upsert field. Absent and null both bind
/// NULL; the caller binds `is_some()` alongside to tell them apart.
fn value<T>(field: &Option<Option<T>>) -> Option<&T> {
    field.as_ref().and_then(Option::as_ref)
}

fn json_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Value> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn optional_json_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Value>> {
    match row.get::<_, Option<String>>(idx)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))),
        None => Ok(None),
    }
}

const PROJECT_COLUMNS: &str = "id, title, description, image, link, created_at";

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        image: row.get(3)?,
        link: row.get(4)?,
        created_at: parse_datetime(&row.get::<_, String>(5)?),
    })
}

const CONTACT_COLUMNS: &str = "id, name, email, message, created_at";

fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<ContactMessage> {
    Ok(ContactMessage {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        message: row.get(3)?,
        created_at: parse_datetime(&row.get::<_, String>(4)?),
    })
}

const ADMIN_COLUMNS: &str = "id, username, password_hash, created_at";

fn admin_from_row(row: &Row<'_>) -> rusqlite::Result<AdminUser> {
    Ok(AdminUser {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        created_at: parse_datetime(&row.get::<_, String>(3)?),
    })
}

const PAGE_SEO_COLUMNS: &str = "id, page_slug, page_name, meta_title, meta_description, meta_keywords, \
     canonical_url, robots_index, robots_follow, og_title, og_description, og_image, og_type, \
     twitter_card, twitter_title, twitter_description, twitter_image, updated_at";

fn page_seo_from_row(row: &Row<'_>) -> rusqlite::Result<PageSeo> {
    Ok(PageSeo {
        id: row.get(0)?,
        page_slug: row.get(1)?,
        page_name: row.get(2)?,
        meta_title: row.get(3)?,
        meta_description: row.get(4)?,
        meta_keywords: row.get(5)?,
        canonical_url: row.get(6)?,
        robots_index: row.get(7)?,
        robots_follow: row.get(8)?,
        og_title: row.get(9)?,
        og_description: row.get(10)?,
        og_image: row.get(11)?,
        og_type: row.get(12)?,
        twitter_card: row.get(13)?,
        twitter_title: row.get(14)?,
        twitter_description: row.get(15)?,
        twitter_image: row.get(16)?,
        updated_at: parse_datetime(&row.get::<_, String>(17)?),
    })
}

const SCHEMA_MARKUP_COLUMNS: &str =
    "id, page_slug, schema_name, schema_data, is_active, updated_at";

fn schema_markup_from_row(row: &Row<'_>) -> rusqlite::Result<SchemaMarkup> {
    Ok(SchemaMarkup {
        id: row.get(0)?,
        page_slug: row.get(1)?,
        schema_name: row.get(2)?,
        schema_data: json_column(row, 3)?,
        is_active: row.get(4)?,
        updated_at: parse_datetime(&row.get::<_, String>(5)?),
    })
}

const SITEMAP_COLUMNS: &str =
    "id, page_slug, include_in_sitemap, priority, change_frequency, last_modified";

fn sitemap_from_row(row: &Row<'_>) -> rusqlite::Result<SitemapConfig> {
    Ok(SitemapConfig {
        id: row.get(0)?,
        page_slug: row.get(1)?,
        include_in_sitemap: row.get(2)?,
        priority: row.get(3)?,
        change_frequency: row.get(4)?,
        last_modified: row
            .get::<_, Option<String>>(5)?
            .map(|s| parse_datetime(&s)),
    })
}

const ROBOTS_COLUMNS: &str = "id, environment, content, updated_at";

fn robots_from_row(row: &Row<'_>) -> rusqlite::Result<RobotsConfig> {
    Ok(RobotsConfig {
        id: row.get(0)?,
        environment: row.get(1)?,
        content: row.get(2)?,
        updated_at: parse_datetime(&row.get::<_, String>(3)?),
    })
}

const ANALYTICS_COLUMNS: &str =
    "id, ga4_measurement_id, search_console_verification, meta_pixel_id, updated_at";

fn analytics_from_row(row: &Row<'_>) -> rusqlite::Result<AnalyticsConfig> {
    Ok(AnalyticsConfig {
        id: row.get(0)?,
        ga4_measurement_id: row.get(1)?,
        search_console_verification: row.get(2)?,
        meta_pixel_id: row.get(3)?,
        updated_at: parse_datetime(&row.get::<_, String>(4)?),
    })
}

const GLOBAL_SEO_COLUMNS: &str = "id, site_name, site_description, default_og_image, favicon, \
     organization_schema, updated_at";

fn global_seo_from_row(row: &Row<'_>) -> rusqlite::Result<GlobalSeo> {
    Ok(GlobalSeo {
        id: row.get(0)?,
        site_name: row.get(1)?,
        site_description: row.get(2)?,
        default_og_image: row.get(3)?,
        favicon: row.get(4)?,
        organization_schema: optional_json_column(row, 5)?,
        updated_at: parse_datetime(&row.get::<_, String>(6)?),
    })
}

const REDIRECT_COLUMNS: &str = "id, from_path, to_path, status_code, is_active, created_at";

fn redirect_from_row(row: &Row<'_>) -> rusqlite::Result<Redirect> {
    Ok(Redirect {
        id: row.get(0)?,
        from_path: row.get(1)?,
        to_path: row.get(2)?,
        status_code: row.get(3)?,
        is_active: row.get(4)?,
        created_at: parse_datetime(&row.get::<_, String>(5)?),
    })
}

const PAGE_VIEW_COLUMNS: &str = "id, page_slug, view_count, last_viewed";

fn page_view_from_row(row: &Row<'_>) -> rusqlite::Result<PageView> {
    Ok(PageView {
        id: row.get(0)?,
        page_slug: row.get(1)?,
        view_count: row.get(2)?,
        last_viewed: parse_datetime(&row.get::<_, String>(3)?),
    })
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // Project operations

    fn create_project(&self, project: &NewProject) -> Result<Project> {
        self.conn()
            .query_row(
                &format!(
                    "INSERT INTO projects (title, description, image, link, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     RETURNING {PROJECT_COLUMNS}"
                ),
                params![
                    project.title,
                    project.description,
                    project.image,
                    project.link,
                    now(),
                ],
                project_from_row,
            )
            .map_err(Error::from)
    }

    fn get_project(&self, id: i64) -> Result<Option<Project>> {
        self.conn()
            .query_row(
                &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
                params![id],
                project_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn list_projects(&self) -> Result<Vec<Project>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC, id DESC"
        ))?;

        let rows = stmt.query_map([], project_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn update_project(&self, id: i64, patch: &ProjectPatch) -> Result<Option<Project>> {
        self.conn()
            .query_row(
                &format!(
                    "UPDATE projects SET
                        title = COALESCE(?1, title),
                        description = COALESCE(?2, description),
                        image = COALESCE(?3, image),
                        link = COALESCE(?4, link)
                     WHERE id = ?5
                     RETURNING {PROJECT_COLUMNS}"
                ),
                params![
                    patch.title,
                    patch.description,
                    patch.image,
                    patch.link,
                    id
                ],
                project_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn delete_project(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM projects WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Contact message operations

    fn create_contact_message(&self, message: &NewContactMessage) -> Result<ContactMessage> {
        self.conn()
            .query_row(
                &format!(
                    "INSERT INTO contact_messages (name, email, message, created_at)
                     VALUES (?1, ?2, ?3, ?4)
                     RETURNING {CONTACT_COLUMNS}"
                ),
                params![message.name, message.email, message.message, now()],
                contact_from_row,
            )
            .map_err(Error::from)
    }

    fn list_contact_messages(&self) -> Result<Vec<ContactMessage>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contact_messages ORDER BY created_at DESC, id DESC"
        ))?;

        let rows = stmt.query_map([], contact_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn delete_contact_message(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM contact_messages WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Admin user operations

    fn create_admin_user(&self, username: &str, password_hash: &str) -> Result<AdminUser> {
        self.conn()
            .query_row(
                &format!(
                    "INSERT INTO admin_users (username, password_hash, created_at)
                     VALUES (?1, ?2, ?3)
                     RETURNING {ADMIN_COLUMNS}"
                ),
                params![username, password_hash, now()],
                admin_from_row,
            )
            .map_err(Error::from)
    }

    fn get_admin_user_by_username(&self, username: &str) -> Result<Option<AdminUser>> {
        self.conn()
            .query_row(
                &format!("SELECT {ADMIN_COLUMNS} FROM admin_users WHERE username = ?1"),
                params![username],
                admin_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn get_first_admin_user(&self) -> Result<Option<AdminUser>> {
        self.conn()
            .query_row(
                &format!("SELECT {ADMIN_COLUMNS} FROM admin_users ORDER BY id LIMIT 1"),
                [],
                admin_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn update_admin_password(&self, id: i64, password_hash: &str) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE admin_users SET password_hash = ?1 WHERE id = ?2",
            params![password_hash, id],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn has_admin_user(&self) -> Result<bool> {
        let conn = self.conn();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM admin_users", [], |row| row.get(0))?;
        Ok(count > 0)
    }

    // Session operations

    fn create_session(&self, session: &Session) -> Result<()> {
        self.conn().execute(
            "INSERT INTO sessions (id_hash, created_at, expires_at) VALUES (?1, ?2, ?3)",
            params![
                session.id_hash,
                format_datetime(&session.created_at),
                format_datetime(&session.expires_at),
            ],
        )?;
        Ok(())
    }

    fn get_session(&self, id_hash: &str) -> Result<Option<Session>> {
        self.conn()
            .query_row(
                "SELECT id_hash, created_at, expires_at FROM sessions WHERE id_hash = ?1",
                params![id_hash],
                |row| {
                    Ok(Session {
                        id_hash: row.get(0)?,
                        created_at: parse_datetime(&row.get::<_, String>(1)?),
                        expires_at: parse_datetime(&row.get::<_, String>(2)?),
                    })
                },
            )
            .optional()
            .map_err(Error::from)
    }

    fn delete_session(&self, id_hash: &str) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM sessions WHERE id_hash = ?1", params![id_hash])?;
        Ok(rows > 0)
    }

    fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<usize> {
        let rows = self.conn().execute(
            "DELETE FROM sessions WHERE expires_at <= ?1",
            params![format_datetime(&now)],
        )?;
        Ok(rows)
    }

    // Page SEO operations

    fn list_page_seo(&self) -> Result<Vec<PageSeo>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {PAGE_SEO_COLUMNS} FROM page_seo ORDER BY id"
        ))?;

        let rows = stmt.query_map([], page_seo_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn get_page_seo(&self, page_slug: &str) -> Result<Option<PageSeo>> {
        self.conn()
            .query_row(
                &format!("SELECT {PAGE_SEO_COLUMNS} FROM page_seo WHERE page_slug = ?1"),
                params![page_slug],
                page_seo_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn upsert_page_seo(&self, input: &PageSeoInput) -> Result<PageSeo> {
        // ?18..?29 flag which of the nullable columns ?3..?16 were supplied.
        // Unsupplied columns take the column default on insert and keep the
        // stored value on update; a supplied null clears them.
        self.conn()
            .query_row(
                &format!(
                    "INSERT INTO page_seo (page_slug, page_name, meta_title, meta_description,
                        meta_keywords, canonical_url, robots_index, robots_follow, og_title,
                        og_description, og_image, og_type, twitter_card, twitter_title,
                        twitter_description, twitter_image, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, COALESCE(?7, 1), COALESCE(?8, 1), ?9, ?10,
                        ?11, CASE WHEN ?25 THEN ?12 ELSE 'website' END,
                        CASE WHEN ?26 THEN ?13 ELSE 'summary_large_image' END,
                        ?14, ?15, ?16, ?17)
                     ON CONFLICT (page_slug) DO UPDATE SET
                        page_name = excluded.page_name,
                        meta_title = CASE WHEN ?18 THEN ?3 ELSE meta_title END,
                        meta_description = CASE WHEN ?19 THEN ?4 ELSE meta_description END,
                        meta_keywords = CASE WHEN ?20 THEN ?5 ELSE meta_keywords END,
                        canonical_url = CASE WHEN ?21 THEN ?6 ELSE canonical_url END,
                        robots_index = COALESCE(?7, robots_index),
                        robots_follow = COALESCE(?8, robots_follow),
                        og_title = CASE WHEN ?22 THEN ?9 ELSE og_title END,
                        og_description = CASE WHEN ?23 THEN ?10 ELSE og_description END,
                        og_image = CASE WHEN ?24 THEN ?11 ELSE og_image END,
                        og_type = CASE WHEN ?25 THEN ?12 ELSE og_type END,
                        twitter_card = CASE WHEN ?26 THEN ?13 ELSE twitter_card END,
                        twitter_title = CASE WHEN ?27 THEN ?14 ELSE twitter_title END,
                        twitter_description = CASE WHEN ?28 THEN ?15 ELSE twitter_description END,
                        twitter_image = CASE WHEN ?29 THEN ?16 ELSE twitter_image END,
                        updated_at = excluded.updated_at
                     RETURNING {PAGE_SEO_COLUMNS}"
                ),
                params![
                    input.page_slug,
                    input.page_name,
                    value(&input.meta_title),
                    value(&input.meta_description),
                    value(&input.meta_keywords),
                    value(&input.canonical_url),
                    input.robots_index,
                    input.robots_follow,
                    value(&input.og_title),
                    value(&input.og_description),
                    value(&input.og_image),
                    value(&input.og_type),
                    value(&input.twitter_card),
                    value(&input.twitter_title),
                    value(&input.twitter_description),
                    value(&input.twitter_image),
                    now(),
                    input.meta_title.is_some(),
                    input.meta_description.is_some(),
                    input.meta_keywords.is_some(),
                    input.canonical_url.is_some(),
                    input.og_title.is_some(),
                    input.og_description.is_some(),
                    input.og_image.is_some(),
                    input.og_type.is_some(),
                    input.twitter_card.is_some(),
                    input.twitter_title.is_some(),
                    input.twitter_description.is_some(),
                    input.twitter_image.is_some(),
                ],
                page_seo_from_row,
            )
            .map_err(Error::from)
    }

    fn delete_page_seo(&self, page_slug: &str) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM page_seo WHERE page_slug = ?1", params![page_slug])?;
        Ok(rows > 0)
    }

    // Schema markup operations

    fn list_schema_markup(&self) -> Result<Vec<SchemaMarkup>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {SCHEMA_MARKUP_COLUMNS} FROM schema_markup ORDER BY id"
        ))?;

        let rows = stmt.query_map([], schema_markup_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn list_schema_markup_for_page(&self, page_slug: &str) -> Result<Vec<SchemaMarkup>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {SCHEMA_MARKUP_COLUMNS} FROM schema_markup WHERE page_slug = ?1 ORDER BY id"
        ))?;

        let rows = stmt.query_map(params![page_slug], schema_markup_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn get_schema_markup(&self, id: i64) -> Result<Option<SchemaMarkup>> {
        self.conn()
            .query_row(
                &format!("SELECT {SCHEMA_MARKUP_COLUMNS} FROM schema_markup WHERE id = ?1"),
                params![id],
                schema_markup_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn create_schema_markup(&self, input: &NewSchemaMarkup) -> Result<SchemaMarkup> {
        let schema_data = serde_json::to_string(&input.schema_data)?;
        self.conn()
            .query_row(
                &format!(
                    "INSERT INTO schema_markup (page_slug, schema_name, schema_data, is_active, updated_at)
                     VALUES (?1, ?2, ?3, COALESCE(?4, 1), ?5)
                     RETURNING {SCHEMA_MARKUP_COLUMNS}"
                ),
                params![
                    input.page_slug,
                    input.schema_name,
                    schema_data,
                    input.is_active,
                    now(),
                ],
                schema_markup_from_row,
            )
            .map_err(Error::from)
    }

    fn update_schema_markup(
        &self,
        id: i64,
        patch: &SchemaMarkupPatch,
    ) -> Result<Option<SchemaMarkup>> {
        let schema_data = patch
            .schema_data
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        self.conn()
            .query_row(
                &format!(
                    "UPDATE schema_markup SET
                        page_slug = COALESCE(?1, page_slug),
                        schema_name = COALESCE(?2, schema_name),
                        schema_data = COALESCE(?3, schema_data),
                        is_active = COALESCE(?4, is_active),
                        updated_at = ?5
                     WHERE id = ?6
                     RETURNING {SCHEMA_MARKUP_COLUMNS}"
                ),
                params![
                    patch.page_slug,
                    patch.schema_name,
                    schema_data,
                    patch.is_active,
                    now(),
                    id
                ],
                schema_markup_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn delete_schema_markup(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM schema_markup WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Sitemap config operations

    fn list_sitemap_config(&self) -> Result<Vec<SitemapConfig>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {SITEMAP_COLUMNS} FROM sitemap_config ORDER BY id"
        ))?;

        let rows = stmt.query_map([], sitemap_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn upsert_sitemap_config(&self, input: &SitemapConfigInput) -> Result<SitemapConfig> {
        self.conn()
            .query_row(
                &format!(
                    "INSERT INTO sitemap_config (page_slug, include_in_sitemap, priority,
                        change_frequency, last_modified)
                     VALUES (?1, COALESCE(?2, 1), COALESCE(?3, '0.5'), COALESCE(?4, 'monthly'), ?5)
                     ON CONFLICT (page_slug) DO UPDATE SET
                        include_in_sitemap = COALESCE(?2, include_in_sitemap),
                        priority = COALESCE(?3, priority),
                        change_frequency = COALESCE(?4, change_frequency),
                        last_modified = excluded.last_modified
                     RETURNING {SITEMAP_COLUMNS}"
                ),
                params![
                    input.page_slug,
                    input.include_in_sitemap,
                    input.priority,
                    input.change_frequency,
                    now(),
                ],
                sitemap_from_row,
            )
            .map_err(Error::from)
    }

    fn delete_sitemap_config(&self, page_slug: &str) -> Result<bool> {
        let rows = self.conn().execute(
            "DELETE FROM sitemap_config WHERE page_slug = ?1",
            params![page_slug],
        )?;
        Ok(rows > 0)
    }

    // Robots config operations

    fn get_robots_config(&self, environment: &str) -> Result<Option<RobotsConfig>> {
        self.conn()
            .query_row(
                &format!("SELECT {ROBOTS_COLUMNS} FROM robots_config WHERE environment = ?1"),
                params![environment],
                robots_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn list_robots_config(&self) -> Result<Vec<RobotsConfig>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {ROBOTS_COLUMNS} FROM robots_config ORDER BY environment"
        ))?;

        let rows = stmt.query_map([], robots_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn upsert_robots_config(&self, input: &RobotsConfigInput) -> Result<RobotsConfig> {
        self.conn()
            .query_row(
                &format!(
                    "INSERT INTO robots_config (environment, content, updated_at)
                     VALUES (COALESCE(?1, 'production'), ?2, ?3)
                     ON CONFLICT (environment) DO UPDATE SET
                        content = excluded.content,
                        updated_at = excluded.updated_at
                     RETURNING {ROBOTS_COLUMNS}"
                ),
                params![input.environment, input.content, now()],
                robots_from_row,
            )
            .map_err(Error::from)
    }

    // Singleton config operations

    fn get_analytics_config(&self) -> Result<Option<AnalyticsConfig>> {
        self.conn()
            .query_row(
                &format!("SELECT {ANALYTICS_COLUMNS} FROM analytics_config WHERE id = 1"),
                [],
                analytics_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn upsert_analytics_config(&self, input: &AnalyticsConfigInput) -> Result<AnalyticsConfig> {
        self.conn()
            .query_row(
                &format!(
                    "INSERT INTO analytics_config (id, ga4_measurement_id,
                        search_console_verification, meta_pixel_id, updated_at)
                     VALUES (1, ?1, ?2, ?3, ?4)
                     ON CONFLICT (id) DO UPDATE SET
                        ga4_measurement_id = CASE WHEN ?5 THEN ?1 ELSE ga4_measurement_id END,
                        search_console_verification =
                            CASE WHEN ?6 THEN ?2 ELSE search_console_verification END,
                        meta_pixel_id = CASE WHEN ?7 THEN ?3 ELSE meta_pixel_id END,
                        updated_at = excluded.updated_at
                     RETURNING {ANALYTICS_COLUMNS}"
                ),
                params![
                    value(&input.ga4_measurement_id),
                    value(&input.search_console_verification),
                    value(&input.meta_pixel_id),
                    now(),
                    input.ga4_measurement_id.is_some(),
                    input.search_console_verification.is_some(),
                    input.meta_pixel_id.is_some(),
                ],
                analytics_from_row,
            )
            .map_err(Error::from)
    }

    fn get_global_seo(&self) -> Result<Option<GlobalSeo>> {
        self.conn()
            .query_row(
                &format!("SELECT {GLOBAL_SEO_COLUMNS} FROM global_seo WHERE id = 1"),
                [],
                global_seo_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn upsert_global_seo(&self, input: &GlobalSeoInput) -> Result<GlobalSeo> {
        let organization_schema = value(&input.organization_schema)
            .map(serde_json::to_string)
            .transpose()?;
        self.conn()
            .query_row(
                &format!(
                    "INSERT INTO global_seo (id, site_name, site_description, default_og_image,
                        favicon, organization_schema, updated_at)
                     VALUES (1, CASE WHEN ?7 THEN ?1 ELSE 'Portfolio' END, ?2, ?3, ?4, ?5, ?6)
                     ON CONFLICT (id) DO UPDATE SET
                        site_name = CASE WHEN ?7 THEN ?1 ELSE site_name END,
                        site_description = CASE WHEN ?8 THEN ?2 ELSE site_description END,
                        default_og_image = CASE WHEN ?9 THEN ?3 ELSE default_og_image END,
                        favicon = CASE WHEN ?10 THEN ?4 ELSE favicon END,
                        organization_schema = CASE WHEN ?11 THEN ?5 ELSE organization_schema END,
                        updated_at = excluded.updated_at
                     RETURNING {GLOBAL_SEO_COLUMNS}"
                ),
                params![
                    value(&input.site_name),
                    value(&input.site_description),
                    value(&input.default_og_image),
                    value(&input.favicon),
                    organization_schema,
                    now(),
                    input.site_name.is_some(),
                    input.site_description.is_some(),
                    input.default_og_image.is_some(),
                    input.favicon.is_some(),
                    input.organization_schema.is_some(),
                ],
                global_seo_from_row,
            )
            .map_err(Error::from)
    }

    // Redirect operations

    fn list_redirects(&self) -> Result<Vec<Redirect>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {REDIRECT_COLUMNS} FROM redirects ORDER BY created_at DESC, id DESC"
        ))?;

        let rows = stmt.query_map([], redirect_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn get_redirect(&self, id: i64) -> Result<Option<Redirect>> {
        self.conn()
            .query_row(
                &format!("SELECT {REDIRECT_COLUMNS} FROM redirects WHERE id = ?1"),
                params![id],
                redirect_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn get_redirect_by_path(&self, from_path: &str) -> Result<Option<Redirect>> {
        self.conn()
            .query_row(
                &format!("SELECT {REDIRECT_COLUMNS} FROM redirects WHERE from_path = ?1"),
                params![from_path],
                redirect_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn create_redirect(&self, input: &NewRedirect) -> Result<Redirect> {
        let status_code = input
            .status_code
            .unwrap_or(RedirectStatus::default().code());
        self.conn()
            .query_row(
                &format!(
                    "INSERT INTO redirects (from_path, to_path, status_code, is_active, created_at)
                     VALUES (?1, ?2, ?3, COALESCE(?4, 1), ?5)
                     RETURNING {REDIRECT_COLUMNS}"
                ),
                params![
                    input.from_path,
                    input.to_path,
                    status_code,
                    input.is_active,
                    now(),
                ],
                redirect_from_row,
            )
            .map_err(Error::from)
    }

    fn update_redirect(&self, id: i64, patch: &RedirectPatch) -> Result<Option<Redirect>> {
        self.conn()
            .query_row(
                &format!(
                    "UPDATE redirects SET
                        from_path = COALESCE(?1, from_path),
                        to_path = COALESCE(?2, to_path),
                        status_code = COALESCE(?3, status_code),
                        is_active = COALESCE(?4, is_active)
                     WHERE id = ?5
                     RETURNING {REDIRECT_COLUMNS}"
                ),
                params![
                    patch.from_path,
                    patch.to_path,
                    patch.status_code,
                    patch.is_active,
                    id
                ],
                redirect_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn delete_redirect(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM redirects WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Page view operations

    fn track_page_view(&self, page_slug: &str) -> Result<PageView> {
        self.conn()
            .query_row(
                &format!(
                    "INSERT INTO page_views (page_slug, view_count, last_viewed)
                     VALUES (?1, 1, ?2)
                     ON CONFLICT (page_slug) DO UPDATE SET
                        view_count = view_count + 1,
                        last_viewed = excluded.last_viewed
                     RETURNING {PAGE_VIEW_COLUMNS}"
                ),
                params![page_slug, now()],
                page_view_from_row,
            )
            .map_err(Error::from)
    }

    fn list_page_views(&self) -> Result<Vec<PageView>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {PAGE_VIEW_COLUMNS} FROM page_views ORDER BY view_count DESC, page_slug"
        ))?;

        let rows = stmt.query_map([], page_view_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn reset_page_views(&self) -> Result<usize> {
        let rows = self.conn().execute("DELETE FROM page_views", [])?;
        Ok(rows)
    }

    fn close(&self) -> Result<()> {
        Ok(())
    }
}
