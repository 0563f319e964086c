use sea_orm_migration::prelude::*;

mod m20250101_000001_create_categories_table;
mod m20250101_000002_create_articles_table;
mod m20250101_000003_create_article_paragraphs_table;
mod m20250101_000004_create_article_images_table;
mod m20250101_000005_create_homepage_seo_table;
mod m20250101_000006_create_cookie_tables;
mod m20250101_000007_create_newsletter_subscribers_table;
mod m20250101_000008_create_contact_messages_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_categories_table::Migration),
            Box::new(m20250101_000002_create_articles_table::Migration),
            Box::new(m20250101_000003_create_article_paragraphs_table::Migration),
            Box::new(m20250101_000004_create_article_images_table::Migration),
            Box::new(m20250101_000005_create_homepage_seo_table::Migration),
            Box::new(m20250101_000006_create_cookie_tables::Migration),
            Box::new(m20250101_000007_create_newsletter_subscribers_table::Migration),
            Box::new(m20250101_000008_create_contact_messages_table::Migration),
        ]
    }
}
