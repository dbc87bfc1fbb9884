mod documents;
mod pages;
mod robots;
mod schema;
mod settings;
mod sitemap;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::server::AppState;

pub use documents::{robots_txt, sitemap_xml};

pub fn seo_router() -> Router<Arc<AppState>> {
    Router::new()
        // Page SEO routes
        .route(
            "/seo/pages",
            get(pages::list_page_seo).post(pages::upsert_page_seo),
        )
        .route(
            "/seo/pages/{slug}",
            get(pages::get_page_seo).delete(pages::delete_page_seo),
        )
        // Schema markup routes
        .route(
            "/seo/schema",
            get(schema::list_schema_markup).post(schema::create_schema_markup),
        )
        .route(
            "/seo/schema/page/{slug}",
            get(schema::list_page_schema_markup),
        )
        .route(
            "/seo/schema/{id}",
            get(schema::get_schema_markup)
                .patch(schema::update_schema_markup)
                .delete(schema::delete_schema_markup),
        )
        // Sitemap routes
        .route(
            "/seo/sitemap",
            get(sitemap::list_sitemap_config).post(sitemap::upsert_sitemap_config),
        )
        .route(
            "/seo/sitemap/{slug}",
            delete(sitemap::delete_sitemap_config),
        )
        // Robots routes
        .route(
            "/seo/robots",
            get(robots::get_robots_config).post(robots::upsert_robots_config),
        )
        .route("/seo/robots/all", get(robots::list_robots_config))
        // Analytics and site-wide routes
        .route(
            "/seo/analytics",
            get(settings::get_analytics_config).post(settings::upsert_analytics_config),
        )
        .route("/seo/analytics/public", get(settings::get_public_analytics))
        .route(
            "/seo/global",
            get(settings::get_global_seo).post(settings::upsert_global_seo),
        )
}
