use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One row per user per day, overwritten on every save
        manager
            .create_table(
                Table::create()
                    .table(GameProgress::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GameProgress::UserId).string().not_null())
                    .col(ColumnDef::new(GameProgress::Date).string().not_null())
                    .col(ColumnDef::new(GameProgress::Guesses).text().not_null())
                    .col(
                        ColumnDef::new(GameProgress::HardMode)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GameProgress::HardModeEverDisabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GameProgress::GameOver)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GameProgress::Won)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GameProgress::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(GameProgress::UserId)
                            .col(GameProgress::Date),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserStats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserStats::UserId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserStats::Played).integer().not_null().default(0))
                    .col(ColumnDef::new(UserStats::Won).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(UserStats::PlayedHard)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(UserStats::WonHard).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(UserStats::CurrentStreak)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(UserStats::MaxStreak)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(UserStats::Distribution).text().not_null())
                    .col(ColumnDef::new(UserStats::LastDate).string().null())
                    .col(
                        ColumnDef::new(UserStats::HardMode)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UserStats::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GameResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameResults::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameResults::UserId).string().not_null())
                    .col(ColumnDef::new(GameResults::Date).string().not_null())
                    .col(ColumnDef::new(GameResults::Won).boolean().not_null())
                    .col(ColumnDef::new(GameResults::Guesses).integer().null())
                    .col(
                        ColumnDef::new(GameResults::HardMode)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GameResults::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // A user gets at most one recorded result per day
        manager
            .create_index(
                Index::create()
                    .name("idx_game_results_user_date")
                    .table(GameResults::Table)
                    .col(GameResults::UserId)
                    .col(GameResults::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserStats::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GameProgress::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GameProgress {
    Table,
    UserId,
    Date,
    Guesses,
    HardMode,
    HardModeEverDisabled,
    GameOver,
    Won,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserStats {
    Table,
    UserId,
    Played,
    Won,
    PlayedHard,
    WonHard,
    CurrentStreak,
    MaxStreak,
    Distribution,
    LastDate,
    HardMode,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GameResults {
    Table,
    Id,
    UserId,
    Date,
    Won,
    Guesses,
    HardMode,
    CreatedAt,
}
