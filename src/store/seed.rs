//! First-boot content. Each step only runs against an empty table, so seeding
//! on every start never overwrites operator edits.

use super::Store;
use crate::error::Result;
use crate::types::{ChangeFrequency, NewProject, PageSeoInput, SitemapConfigInput};

/// Slug, display name, meta title, meta description.
const DEFAULT_PAGES: [(&str, &str, &str, &str); 5] = [
    (
        "home",
        "Home",
        "Full Stack Developer Portfolio",
        "Portfolio of a full stack developer working on automation, bots and security.",
    ),
    (
        "projects",
        "Projects",
        "Projects",
        "Featured projects in web development, automation and security.",
    ),
    (
        "services",
        "Services",
        "Services",
        "Web development, bot development, automation tooling and security reviews.",
    ),
    (
        "skills",
        "Skills",
        "Skills",
        "Languages, frameworks and tools used across recent work.",
    ),
    (
        "contact",
        "Contact",
        "Contact",
        "Get in touch about projects and collaboration.",
    ),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub projects: usize,
    pub pages: usize,
}

pub fn seed_defaults(store: &dyn Store) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    if store.list_projects()?.is_empty() {
        store.create_project(&NewProject {
            title: "Portfolio Website".to_string(),
            description: "A professional portfolio website with a small admin back office."
                .to_string(),
            image: "https://images.unsplash.com/photo-1460925895917-afdab827c52f?auto=format&fit=crop&w=800&q=80"
                .to_string(),
            link: "https://github.com/".to_string(),
        })?;
        report.projects = 1;
    }

    if store.list_page_seo()?.is_empty() {
        for (slug, name, title, description) in DEFAULT_PAGES {
            store.upsert_page_seo(&PageSeoInput {
                page_slug: slug.to_string(),
                page_name: name.to_string(),
                meta_title: Some(Some(title.to_string())),
                meta_description: Some(Some(description.to_string())),
                ..Default::default()
            })?;
            store.upsert_sitemap_config(&SitemapConfigInput {
                page_slug: slug.to_string(),
                include_in_sitemap: Some(true),
                priority: Some(if slug == "home" { "1.0" } else { "0.8" }.to_string()),
                change_frequency: Some(ChangeFrequency::Weekly.as_str().to_string()),
            })?;
            report.pages += 1;
        }
    }

    if report != SeedReport::default() {
        tracing::info!(
            projects = report.projects,
            pages = report.pages,
            "Seeded default content"
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;
    use tempfile::TempDir;

    #[test]
    fn test_seed_populates_empty_store() {
        let temp = TempDir::new().unwrap();
        let store = SqliteStore::new(temp.path().join("test.db")).unwrap();
        store.initialize().unwrap();

        let report = seed_defaults(&store).unwrap();
        assert_eq!(report, SeedReport { projects: 1, pages: 5 });

        let sitemap = store.list_sitemap_config().unwrap();
        let slugs: Vec<&str> = sitemap.iter().map(|c| c.page_slug.as_str()).collect();
        assert_eq!(slugs, ["home", "projects", "services", "skills", "contact"]);
        assert_eq!(sitemap[0].priority, "1.0");
        assert!(sitemap[1..].iter().all(|c| c.priority == "0.8"));
        assert!(sitemap.iter().all(|c| c.change_frequency == "weekly"));
    }

    #[test]
    fn test_seed_leaves_existing_content() {
        let temp = TempDir::new().unwrap();
        let store = SqliteStore::new(temp.path().join("test.db")).unwrap();
        store.initialize().unwrap();

        store
            .upsert_page_seo(&PageSeoInput {
                page_slug: "about".to_string(),
                page_name: "About".to_string(),
                ..Default::default()
            })
            .unwrap();

        let report = seed_defaults(&store).unwrap();
        assert_eq!(report.pages, 0);
        assert_eq!(store.list_page_seo().unwrap().len(), 1);

        let again = seed_defaults(&store).unwrap();
        assert_eq!(again, SeedReport::default());
        assert_eq!(store.list_projects().unwrap().len(), 1);
    }
}
