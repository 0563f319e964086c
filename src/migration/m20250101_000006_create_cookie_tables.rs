use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum CookieConsents {
    Table,
    Id,
    IsActive,
    MessageTr,
    MessageEn,
    ButtonTextTr,
    ButtonTextEn,
    PolicyLinkTextTr,
    PolicyLinkTextEn,
}

#[derive(DeriveIden)]
enum CookiePolicies {
    Table,
    Id,
    TitleTr,
    TitleEn,
    ContentTr,
    ContentEn,
    LastUpdated,
    IsActive,
    MetaDescriptionTr,
    MetaDescriptionEn,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CookieConsents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CookieConsents::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CookieConsents::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(CookieConsents::MessageTr).text().not_null())
                    .col(ColumnDef::new(CookieConsents::MessageEn).text().not_null())
                    .col(
                        ColumnDef::new(CookieConsents::ButtonTextTr)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CookieConsents::ButtonTextEn)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CookieConsents::PolicyLinkTextTr)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CookieConsents::PolicyLinkTextEn)
                            .string_len(100)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CookiePolicies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CookiePolicies::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CookiePolicies::TitleTr).string_len(200).not_null())
                    .col(ColumnDef::new(CookiePolicies::TitleEn).string_len(200).not_null())
                    .col(ColumnDef::new(CookiePolicies::ContentTr).text().not_null())
                    .col(ColumnDef::new(CookiePolicies::ContentEn).text().not_null())
                    .col(ColumnDef::new(CookiePolicies::LastUpdated).date().not_null())
                    .col(
                        ColumnDef::new(CookiePolicies::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(CookiePolicies::MetaDescriptionTr)
                            .string_len(160)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CookiePolicies::MetaDescriptionEn)
                            .string_len(160)
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CookiePolicies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CookieConsents::Table).to_owned())
            .await
    }
}
