use sea_orm_migration::prelude::*;

use crate::enums::*;
use crate::extension::postgres::Type;
use crate::macros::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_type!(SeasonStatus, manager);
        create_type!(CycleType, manager);
        create_type!(PracticeType, manager);

        manager
            .create_table(
                Table::create()
                    .table(Season::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Season::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Season::TeamId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Season::Table, Season::TeamId)
                            .to(Team::Table, Team::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(Season::Name).text().not_null())
                    .col(ColumnDef::new(Season::StartYear).integer().not_null())
                    .col(ColumnDef::new(Season::EndYear).integer().not_null())
                    .col(
                        ColumnDef::new(Season::Status)
                            .custom(SeasonStatus::Table)
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Season::CreatedBy).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Season::Table, Season::CreatedBy)
                            .to(User::Table, User::Id),
                    )
                    .col(
                        ColumnDef::new(Season::CreatedAt)
                            .timestamp()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SeasonCycle::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SeasonCycle::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SeasonCycle::SeasonId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(SeasonCycle::Table, SeasonCycle::SeasonId)
                            .to(Season::Table, Season::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(
                        ColumnDef::new(SeasonCycle::CycleType)
                            .custom(CycleType::Table)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SeasonCycle::StartDate).date().not_null())
                    .col(ColumnDef::new(SeasonCycle::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(SeasonCycle::CreatedAt)
                            .timestamp()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SeasonMeet::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SeasonMeet::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SeasonMeet::SeasonId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(SeasonMeet::Table, SeasonMeet::SeasonId)
                            .to(Season::Table, Season::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(SeasonMeet::MeetId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(SeasonMeet::Table, SeasonMeet::MeetId)
                            .to(Meet::Table, Meet::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(SeasonMeet::Opponent).text())
                    .col(ColumnDef::new(SeasonMeet::IsHome).boolean().default(true))
                    .col(
                        ColumnDef::new(SeasonMeet::CycleType)
                            .custom(CycleType::Table)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SeasonMeet::StartTime).time())
                    .col(
                        ColumnDef::new(SeasonMeet::CreatedAt)
                            .timestamp()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PracticeSchedule::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PracticeSchedule::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PracticeSchedule::SeasonId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(PracticeSchedule::Table, PracticeSchedule::SeasonId)
                            .to(Season::Table, Season::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(PracticeSchedule::Name).text().not_null())
                    .col(
                        ColumnDef::new(PracticeSchedule::PracticeType)
                            .custom(PracticeType::Table)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PracticeSchedule::DayOfWeek)
                            .integer()
                            .not_null()
                            .check(
                                Expr::col(PracticeSchedule::DayOfWeek)
                                    .between(0, 6),
                            ),
                    )
                    .col(ColumnDef::new(PracticeSchedule::StartTime).time().not_null())
                    .col(ColumnDef::new(PracticeSchedule::EndTime).time().not_null())
                    .col(ColumnDef::new(PracticeSchedule::Location).text())
                    .col(ColumnDef::new(PracticeSchedule::Notes).text())
                    .col(
                        ColumnDef::new(PracticeSchedule::CreatedAt)
                            .timestamp()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MeetItinerary::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MeetItinerary::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MeetItinerary::SeasonId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from(MeetItinerary::Table, MeetItinerary::SeasonId)
                            .to(Season::Table, Season::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(MeetItinerary::Name).text().not_null())
                    .col(ColumnDef::new(MeetItinerary::IsDefault).boolean().default(false))
                    .col(ColumnDef::new(MeetItinerary::Details).json())
                    .col(
                        ColumnDef::new(MeetItinerary::CreatedAt)
                            .timestamp()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_table!(MeetItinerary, manager);
        drop_table!(PracticeSchedule, manager);
        drop_table!(SeasonMeet, manager);
        drop_table!(SeasonCycle, manager);
        drop_table!(Season, manager);
        drop_type!(PracticeType, manager);
        drop_type!(CycleType, manager);
        drop_type!(SeasonStatus, manager);
        Ok(())
    }
}
