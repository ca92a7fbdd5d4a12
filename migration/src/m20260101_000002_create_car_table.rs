use sea_orm_migration::{prelude::*, schema::*};

use super::m20260101_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Car::Table)
                    .if_not_exists()
                    .col(pk_auto(Car::Id))
                    .col(integer(Car::OwnerId))
                    .col(string_len(Car::Make, 100))
                    .col(string_len(Car::Model, 100))
                    .col(integer(Car::Year))
                    .col(decimal_len(Car::PricePerDay, 10, 2))
                    .col(text(Car::Description))
                    .col(string_len(Car::Location, 200))
                    .col(boolean(Car::Available).default(true))
                    .col(
                        timestamp(Car::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Car::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_car_owner_id")
                            .from(Car::Table, Car::OwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing filters
        manager
            .create_index(
                Index::create()
                    .name("idx_car_owner_id")
                    .table(Car::Table)
                    .col(Car::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_car_available")
                    .table(Car::Table)
                    .col(Car::Available)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_car_available")
                    .table(Car::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_car_owner_id")
                    .table(Car::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Car::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Car {
    Table,
    Id,
    OwnerId,
    Make,
    Model,
    Year,
    PricePerDay,
    Description,
    Location,
    Available,
    CreatedAt,
    UpdatedAt,
}
