//! Creates the `user_profile` table.
//!
//! - `salary_minor`: monthly salary in piasters, never negative
//! - `payday`: day of month `1..=31`, or `0` for last day of month
//! - `created_at` / `updated_at`: epoch milliseconds

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum UserProfile {
    Table,
    Id,
    SalaryMinor,
    Payday,
    Currency,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProfile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserProfile::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserProfile::SalaryMinor)
                            .big_integer()
                            .not_null()
                            .check(Expr::col(UserProfile::SalaryMinor).gte(0)),
                    )
                    .col(
                        ColumnDef::new(UserProfile::Payday)
                            .integer()
                            .not_null()
                            .check(Expr::col(UserProfile::Payday).between(0, 31)),
                    )
                    .col(
                        ColumnDef::new(UserProfile::Currency)
                            .string()
                            .not_null()
                            .default("EGP"),
                    )
                    .col(ColumnDef::new(UserProfile::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(UserProfile::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserProfile::Table).to_owned())
            .await
    }
}
