use sea_orm_migration::{prelude::*, schema::*};

use super::m20260101_000002_create_car_table::Car;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CarImage::Table)
                    .if_not_exists()
                    .col(pk_auto(CarImage::Id))
                    .col(integer(CarImage::CarId))
                    .col(string(CarImage::Image))
                    .col(boolean(CarImage::IsPrimary).default(false))
                    .col(
                        timestamp(CarImage::UploadedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_car_image_car_id")
                            .from(CarImage::Table, CarImage::CarId)
                            .to(Car::Table, Car::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CarImage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CarImage {
    Table,
    Id,
    CarId,
    Image,
    IsPrimary,
    UploadedAt,
}
