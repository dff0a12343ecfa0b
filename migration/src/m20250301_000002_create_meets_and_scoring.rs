use sea_orm_migration::prelude::*;

use crate::enums::*;
use crate::extension::postgres::Type;
use crate::macros::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_type!(MeetStatus, manager);

        manager
            .create_table(
                Table::create()
                    .table(Meet::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Meet::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Meet::Name).text().not_null())
                    .col(ColumnDef::new(Meet::Location).text().not_null())
                    .col(ColumnDef::new(Meet::Date).timestamp().not_null())
                    .col(
                        ColumnDef::new(Meet::Status)
                            .custom(MeetStatus::Table)
                            .not_null()
                            .default("upcoming"),
                    )
                    .col(ColumnDef::new(Meet::CreatedBy).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Meet::Table, Meet::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .col(
                        ColumnDef::new(Meet::CreatedAt)
                            .timestamp()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Dive::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Dive::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Dive::MeetId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Dive::Table, Dive::MeetId)
                            .to(Meet::Table, Meet::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(Dive::DiverId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Dive::Table, Dive::DiverId)
                            .to(Diver::Table, Diver::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(Dive::Number).integer().not_null())
                    .col(ColumnDef::new(Dive::Name).text().not_null())
                    .col(ColumnDef::new(Dive::Difficulty).double().not_null())
                    .col(ColumnDef::new(Dive::Completed).boolean().default(false))
                    .col(
                        ColumnDef::new(Dive::CreatedAt)
                            .timestamp()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Score::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Score::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Score::DiveId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Score::Table, Score::DiveId)
                            .to(Dive::Table, Dive::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(Score::JudgeId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Score::Table, Score::JudgeId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .col(ColumnDef::new(Score::Score).double().not_null())
                    .col(
                        ColumnDef::new(Score::CreatedAt)
                            .timestamp()
                            .default(Expr::current_timestamp()),
                    )
                    .index(
                        Index::create()
                            .name("unique_judge_score_per_dive")
                            .col(Score::DiveId)
                            .col(Score::JudgeId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MeetParticipant::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MeetParticipant::MeetId).integer().not_null())
                    .col(ColumnDef::new(MeetParticipant::DiverId).integer().not_null())
                    .col(
                        ColumnDef::new(MeetParticipant::CreatedAt)
                            .timestamp()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(MeetParticipant::MeetId)
                            .col(MeetParticipant::DiverId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MeetParticipant::Table, MeetParticipant::MeetId)
                            .to(Meet::Table, Meet::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MeetParticipant::Table, MeetParticipant::DiverId)
                            .to(Diver::Table, Diver::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MeetJudge::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MeetJudge::MeetId).integer().not_null())
                    .col(ColumnDef::new(MeetJudge::JudgeId).integer().not_null())
                    .col(
                        ColumnDef::new(MeetJudge::CreatedAt)
                            .timestamp()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(Index::create().col(MeetJudge::MeetId).col(MeetJudge::JudgeId))
                    .foreign_key(
                        ForeignKey::create()
                            .from(MeetJudge::Table, MeetJudge::MeetId)
                            .to(Meet::Table, Meet::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MeetJudge::Table, MeetJudge::JudgeId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_table!(MeetJudge, manager);
        drop_table!(MeetParticipant, manager);
        drop_table!(Score, manager);
        drop_table!(Dive, manager);
        drop_table!(Meet, manager);
        drop_type!(MeetStatus, manager);
        Ok(())
    }
}
