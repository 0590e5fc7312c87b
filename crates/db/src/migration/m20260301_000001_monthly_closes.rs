//! Monthly close lock table.
//!
//! The unique index on (year, month) is what guarantees a period can only
//! be closed once, even under concurrent close requests.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MonthlyCloses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MonthlyCloses::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MonthlyCloses::Year).integer().not_null())
                    .col(ColumnDef::new(MonthlyCloses::Month).integer().not_null())
                    .col(ColumnDef::new(MonthlyCloses::Note).text().null())
                    .col(
                        ColumnDef::new(MonthlyCloses::ClosedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(MonthlyCloses::Month).between(1, 12))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_monthly_closes_year_month")
                    .table(MonthlyCloses::Table)
                    .col(MonthlyCloses::Year)
                    .col(MonthlyCloses::Month)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MonthlyCloses::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MonthlyCloses {
    Table,
    Id,
    Year,
    Month,
    Note,
    ClosedAt,
}
