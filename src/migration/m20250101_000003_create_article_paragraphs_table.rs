use super::m20250101_000002_create_articles_table::Articles;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
pub(crate) enum ArticleParagraphs {
    Table,
    Id,
    ArticleId,
    SortOrder,
    ParagraphType,
    Content,
    ContentEn,
    HeadingText,
    HeadingTextEn,
    CodeLanguage,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ArticleParagraphs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ArticleParagraphs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ArticleParagraphs::ArticleId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ArticleParagraphs::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ArticleParagraphs::ParagraphType)
                            .string_len(20)
                            .not_null()
                            .default("text"),
                    )
                    .col(ColumnDef::new(ArticleParagraphs::Content).text().not_null())
                    .col(
                        ColumnDef::new(ArticleParagraphs::ContentEn)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ArticleParagraphs::HeadingText)
                            .string_len(200)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ArticleParagraphs::HeadingTextEn)
                            .string_len(200)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ArticleParagraphs::CodeLanguage)
                            .string_len(50)
                            .not_null()
                            .default(""),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_paragraphs_article_id")
                            .from(ArticleParagraphs::Table, ArticleParagraphs::ArticleId)
                            .to(Articles::Table, Articles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_article_paragraphs_article_id")
                    .table(ArticleParagraphs::Table)
                    .col(ArticleParagraphs::ArticleId)
                    .col(ArticleParagraphs::SortOrder)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ArticleParagraphs::Table).to_owned())
            .await
    }
}
