use super::m20250101_000001_create_categories_table::Categories;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
pub(crate) enum Articles {
    Table,
    Id,
    Title,
    TitleEn,
    Slug,
    CategoryId,
    Language,
    Excerpt,
    ExcerptEn,
    Thumbnail,
    ThumbnailAlt,
    AuthorName,
    AuthorBio,
    ReadingTime,
    PublishedDate,
    CreatedAt,
    UpdatedAt,
    IsPublished,
    IsFeatured,
    CanonicalUrl,
    Noindex,
    MetaTitle,
    MetaDescription,
    MetaKeywords,
    OgTitle,
    OgDescription,
    OgImage,
    TwitterCardType,
    MetaTitleEn,
    MetaDescriptionEn,
    MetaKeywordsEn,
    ViewCount,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Articles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Articles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Articles::Title).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Articles::TitleEn)
                            .string_len(200)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Articles::Slug)
                            .string_len(200)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Articles::CategoryId).integer().null())
                    .col(
                        ColumnDef::new(Articles::Language)
                            .string_len(10)
                            .not_null()
                            .default("both"),
                    )
                    .col(ColumnDef::new(Articles::Excerpt).text().not_null())
                    .col(
                        ColumnDef::new(Articles::ExcerptEn)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Articles::Thumbnail).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Articles::ThumbnailAlt)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Articles::AuthorName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Articles::AuthorBio)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Articles::ReadingTime)
                            .integer()
                            .not_null()
                            .default(5),
                    )
                    .col(ColumnDef::new(Articles::PublishedDate).timestamp().null())
                    .col(
                        ColumnDef::new(Articles::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Articles::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Articles::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Articles::IsFeatured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Articles::CanonicalUrl)
                            .string_len(200)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Articles::Noindex)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Articles::MetaTitle).string_len(60).not_null())
                    .col(
                        ColumnDef::new(Articles::MetaDescription)
                            .string_len(160)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Articles::MetaKeywords)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Articles::OgTitle)
                            .string_len(95)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Articles::OgDescription)
                            .string_len(200)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Articles::OgImage).string_len(255).null())
                    .col(
                        ColumnDef::new(Articles::TwitterCardType)
                            .string_len(50)
                            .not_null()
                            .default("summary_large_image"),
                    )
                    .col(
                        ColumnDef::new(Articles::MetaTitleEn)
                            .string_len(60)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Articles::MetaDescriptionEn)
                            .string_len(160)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Articles::MetaKeywordsEn)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Articles::ViewCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_articles_category_id")
                            .from(Articles::Table, Articles::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_articles_published")
                    .table(Articles::Table)
                    .col(Articles::PublishedDate)
                    .col(Articles::IsPublished)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_articles_category_id")
                    .table(Articles::Table)
                    .col(Articles::CategoryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Articles::Table).to_owned())
            .await
    }
}
