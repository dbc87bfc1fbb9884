pub const SCHEMA: &str = r#"
-- Public content
CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    image TEXT NOT NULL,
    link TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS contact_messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    message TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Back office credentials
CREATE TABLE IF NOT EXISTS admin_users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,       -- argon2id hash with embedded salt
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS sessions (
    id_hash TEXT PRIMARY KEY,          -- sha256 of the cookie value
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    expires_at TEXT NOT NULL
);

-- Per-page SEO, keyed by slug
CREATE TABLE IF NOT EXISTS page_seo (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    page_slug TEXT NOT NULL UNIQUE,
    page_name TEXT NOT NULL,
    meta_title TEXT,
    meta_description TEXT,
    meta_keywords TEXT,
    canonical_url TEXT,
    robots_index INTEGER NOT NULL DEFAULT 1,
    robots_follow INTEGER NOT NULL DEFAULT 1,
    og_title TEXT,
    og_description TEXT,
    og_image TEXT,
    og_type TEXT DEFAULT 'website',
    twitter_card TEXT DEFAULT 'summary_large_image',
    twitter_title TEXT,
    twitter_description TEXT,
    twitter_image TEXT,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- JSON-LD documents; several per page allowed
CREATE TABLE IF NOT EXISTS schema_markup (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    page_slug TEXT NOT NULL,
    schema_name TEXT NOT NULL,
    schema_data TEXT NOT NULL CHECK (json_valid(schema_data)),
    is_active INTEGER NOT NULL DEFAULT 1,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS sitemap_config (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    page_slug TEXT NOT NULL UNIQUE,
    include_in_sitemap INTEGER NOT NULL DEFAULT 1,
    priority TEXT NOT NULL DEFAULT '0.5',
    change_frequency TEXT NOT NULL DEFAULT 'monthly',
    last_modified TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS robots_config (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    environment TEXT NOT NULL UNIQUE DEFAULT 'production',
    content TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Singletons: the row with id 1 is the only row
CREATE TABLE IF NOT EXISTS analytics_config (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    ga4_measurement_id TEXT,
    search_console_verification TEXT,
    meta_pixel_id TEXT,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS global_seo (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    site_name TEXT DEFAULT 'Portfolio',
    site_description TEXT,
    default_og_image TEXT,
    favicon TEXT,
    organization_schema TEXT CHECK (organization_schema IS NULL OR json_valid(organization_schema)),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS redirects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    from_path TEXT NOT NULL UNIQUE,
    to_path TEXT NOT NULL,
    status_code INTEGER NOT NULL DEFAULT 301 CHECK (status_code IN (301, 302)),
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS page_views (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    page_slug TEXT NOT NULL UNIQUE,
    view_count INTEGER NOT NULL DEFAULT 0 CHECK (view_count >= 0),
    last_viewed TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_projects_created ON projects(created_at);
CREATE INDEX IF NOT EXISTS idx_contact_messages_created ON contact_messages(created_at);
CREATE INDEX IF NOT EXISTS idx_schema_markup_page ON schema_markup(page_slug);
CREATE INDEX IF NOT EXISTS idx_sessions_expires ON sessions(expires_at);
"#;
