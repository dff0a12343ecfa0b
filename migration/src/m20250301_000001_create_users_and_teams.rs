use sea_orm_migration::prelude::*;

use crate::enums::*;
use crate::extension::postgres::Type;
use crate::macros::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_type!(UserRole, manager);
        create_type!(DiverStatus, manager);

        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(User::Username).text().unique_key().not_null())
                    .col(ColumnDef::new(User::Password).text().not_null())
                    .col(ColumnDef::new(User::Name).text().not_null())
                    .col(ColumnDef::new(User::Email).text().not_null())
                    .col(
                        ColumnDef::new(User::Role)
                            .custom(UserRole::Table)
                            .not_null()
                            .default("diver"),
                    )
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserCookies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserCookies::Cookie)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserCookies::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserCookies::Table, UserCookies::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Team::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Team::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Team::Name).text().not_null())
                    .col(
                        ColumnDef::new(Team::Code)
                            .string_len(10)
                            .unique_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Team::CoachId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Team::Table, Team::CoachId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .col(ColumnDef::new(Team::Mascot).text())
                    .col(ColumnDef::new(Team::Division).text())
                    .col(ColumnDef::new(Team::Address).text())
                    .col(ColumnDef::new(Team::PrimaryColor).text().default("#E11D48"))
                    .col(ColumnDef::new(Team::SecondaryColor).text().default("#7C3AED"))
                    .col(ColumnDef::new(Team::BannerUrl).text())
                    .col(ColumnDef::new(Team::LogoUrl).text())
                    .col(
                        ColumnDef::new(Team::CreatedAt)
                            .timestamp()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Diver::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Diver::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Diver::UserId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Diver::Table, Diver::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .col(ColumnDef::new(Diver::TeamId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Diver::Table, Diver::TeamId)
                            .to(Team::Table, Team::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(Diver::FirstName).text())
                    .col(ColumnDef::new(Diver::LastName).text())
                    .col(ColumnDef::new(Diver::Age).integer())
                    .col(ColumnDef::new(Diver::Gender).text())
                    .col(ColumnDef::new(Diver::GradYear).integer())
                    .col(ColumnDef::new(Diver::AvgScore).text())
                    .col(ColumnDef::new(Diver::Email).text())
                    .col(ColumnDef::new(Diver::IsCaptain).boolean().default(false))
                    .col(
                        ColumnDef::new(Diver::Status)
                            .custom(DiverStatus::Table)
                            .default("active"),
                    )
                    .col(ColumnDef::new(Diver::ImageUrl).text())
                    .col(
                        ColumnDef::new(Diver::CreatedAt)
                            .timestamp()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_table!(Diver, manager);
        drop_table!(Team, manager);
        drop_table!(UserCookies, manager);
        drop_table!(User, manager);
        drop_type!(DiverStatus, manager);
        drop_type!(UserRole, manager);
        Ok(())
    }
}
