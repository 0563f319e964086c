use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum HomepageSeo {
    Table,
    Id,
    MetaTitle,
    MetaDescription,
    MetaKeywords,
    OgTitle,
    OgDescription,
    OgImage,
    TwitterCardType,
    IsActive,
    CanonicalUrl,
    StructuredData,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HomepageSeo::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HomepageSeo::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HomepageSeo::MetaTitle).string_len(60).not_null())
                    .col(
                        ColumnDef::new(HomepageSeo::MetaDescription)
                            .string_len(160)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HomepageSeo::MetaKeywords)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(HomepageSeo::OgTitle)
                            .string_len(95)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(HomepageSeo::OgDescription)
                            .string_len(200)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(HomepageSeo::OgImage).string_len(255).null())
                    .col(
                        ColumnDef::new(HomepageSeo::TwitterCardType)
                            .string_len(50)
                            .not_null()
                            .default("summary_large_image"),
                    )
                    .col(
                        ColumnDef::new(HomepageSeo::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(HomepageSeo::CanonicalUrl)
                            .string_len(200)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(HomepageSeo::StructuredData).json().null())
                    .col(
                        ColumnDef::new(HomepageSeo::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(HomepageSeo::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HomepageSeo::Table).to_owned())
            .await
    }
}
