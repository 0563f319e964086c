use crate::{
    error::AppResult,
    services::{article::ArticleService, category::CategoryService},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::fmt::{self, Write};

/// Public pages that are not backed by a database row.
pub const STATIC_PAGES: &[&str] = &["/", "/blog/", "/kategoriler/", "/hakkinda/", "/iletisim/"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapItem {
    pub loc: String,
    pub lastmod: Option<NaiveDate>,
    pub changefreq: Option<ChangeFrequency>,
    pub priority: Option<f32>,
}

impl SitemapItem {
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: None,
            changefreq: None,
            priority: None,
        }
    }

    pub fn with_lastmod(mut self, lastmod: NaiveDate) -> Self {
        self.lastmod = Some(lastmod);
        self
    }

    pub fn with_changefreq(mut self, changefreq: ChangeFrequency) -> Self {
        self.changefreq = Some(changefreq);
        self
    }

    /// Priority is clamped into `0.0..=1.0`.
    pub fn with_priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority.clamp(0.0, 1.0));
        self
    }
}

/// Serialize items as a sitemaps.org `urlset` document.
pub fn render_sitemap(items: &[SitemapItem]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for item in items {
        xml.push_str("  <url>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", html_escape::encode_text(&item.loc));
        if let Some(lastmod) = item.lastmod {
            let _ = writeln!(xml, "    <lastmod>{}</lastmod>", lastmod.format("%Y-%m-%d"));
        }
        if let Some(changefreq) = item.changefreq {
            let _ = writeln!(xml, "    <changefreq>{}</changefreq>", changefreq);
        }
        if let Some(priority) = item.priority {
            let _ = writeln!(xml, "    <priority>{:.1}</priority>", priority);
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// robots.txt body: everything but the admin area is crawlable.
pub fn robots_txt(base_url: &str) -> String {
    format!(
        "User-agent: *\nDisallow: /admin/\n\nSitemap: {}/sitemap.xml\n",
        base_url.trim_end_matches('/')
    )
}

pub fn article_path(slug: &str) -> String {
    format!("/makale/{}/", slug)
}

pub fn category_path(slug: &str) -> String {
    format!("/kategori/{}/", slug)
}

pub struct SitemapService {
    db: DatabaseConnection,
}

impl SitemapService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Every indexable URL: articles first, then categories, then static pages.
    pub async fn items(&self, base_url: &str) -> AppResult<Vec<SitemapItem>> {
        let base_url = base_url.trim_end_matches('/');
        let articles = ArticleService::new(self.db.clone()).indexable().await?;
        let categories = CategoryService::new(self.db.clone()).list().await?;

        let mut items = Vec::with_capacity(articles.len() + categories.len() + STATIC_PAGES.len());

        items.extend(articles.into_iter().map(|article| {
            SitemapItem::new(format!("{}{}", base_url, article_path(&article.slug)))
                .with_lastmod(article.updated_at.date())
                .with_changefreq(ChangeFrequency::Weekly)
                .with_priority(0.9)
        }));

        items.extend(categories.into_iter().map(|category| {
            SitemapItem::new(format!("{}{}", base_url, category_path(&category.slug)))
                .with_changefreq(ChangeFrequency::Weekly)
                .with_priority(0.7)
        }));

        items.extend(STATIC_PAGES.iter().map(|path| {
            SitemapItem::new(format!("{}{}", base_url, path))
                .with_changefreq(ChangeFrequency::Monthly)
                .with_priority(0.5)
        }));

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_builder_sets_fields() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let item = SitemapItem::new("https://edebai.com.tr/")
            .with_lastmod(date)
            .with_changefreq(ChangeFrequency::Weekly)
            .with_priority(0.9);

        assert_eq!(item.lastmod, Some(date));
        assert_eq!(item.changefreq, Some(ChangeFrequency::Weekly));
        assert_eq!(item.priority, Some(0.9));
    }

    #[test]
    fn priority_is_clamped() {
        assert_eq!(SitemapItem::new("x").with_priority(1.5).priority, Some(1.0));
        assert_eq!(SitemapItem::new("x").with_priority(-1.0).priority, Some(0.0));
    }

    #[test]
    fn renders_urlset() {
        let items = vec![
            SitemapItem::new("https://edebai.com.tr/makale/merhaba/")
                .with_lastmod(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap())
                .with_changefreq(ChangeFrequency::Weekly)
                .with_priority(0.9),
            SitemapItem::new("https://edebai.com.tr/hakkinda/"),
        ];
        let xml = render_sitemap(&items);

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(xml.contains("<loc>https://edebai.com.tr/makale/merhaba/</loc>"));
        assert!(xml.contains("<lastmod>2025-01-02</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.9</priority>"));
        assert_eq!(xml.matches("<url>").count(), 2);
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn loc_is_escaped() {
        let xml = render_sitemap(&[SitemapItem::new("https://x.org/?a=1&b=<2>")]);
        assert!(xml.contains("<loc>https://x.org/?a=1&amp;b=&lt;2&gt;</loc>"));
    }

    #[test]
    fn robots_points_at_sitemap() {
        let robots = robots_txt("https://edebai.com.tr/");
        assert_eq!(
            robots,
            "User-agent: *\nDisallow: /admin/\n\nSitemap: https://edebai.com.tr/sitemap.xml\n"
        );
    }

    #[test]
    fn public_paths() {
        assert_eq!(article_path("yapay-zeka"), "/makale/yapay-zeka/");
        assert_eq!(category_path("ai"), "/kategori/ai/");
    }
}
