use super::m20250101_000002_create_articles_table::Articles;
use super::m20250101_000003_create_article_paragraphs_table::ArticleParagraphs;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum ArticleImages {
    Table,
    Id,
    ArticleId,
    Image,
    AltText,
    Caption,
    SortOrder,
    AfterParagraphId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ArticleImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ArticleImages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ArticleImages::ArticleId).integer().not_null())
                    .col(ColumnDef::new(ArticleImages::Image).string_len(255).not_null())
                    .col(ColumnDef::new(ArticleImages::AltText).string_len(200).not_null())
                    .col(
                        ColumnDef::new(ArticleImages::Caption)
                            .string_len(300)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ArticleImages::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ArticleImages::AfterParagraphId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_images_article_id")
                            .from(ArticleImages::Table, ArticleImages::ArticleId)
                            .to(Articles::Table, Articles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_images_after_paragraph_id")
                            .from(ArticleImages::Table, ArticleImages::AfterParagraphId)
                            .to(ArticleParagraphs::Table, ArticleParagraphs::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_article_images_article_id")
                    .table(ArticleImages::Table)
                    .col(ArticleImages::ArticleId)
                    .col(ArticleImages::SortOrder)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ArticleImages::Table).to_owned())
            .await
    }
}
