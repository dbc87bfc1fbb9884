//! Crawler-facing documents rendered from stored SEO configuration.

mod robots;
mod sitemap;

pub use robots::render_robots;
pub use sitemap::{SITEMAP_NAMESPACE, page_url, render_sitemap};
