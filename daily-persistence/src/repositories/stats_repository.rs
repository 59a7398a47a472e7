use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};

use crate::entities::{prelude::*, user_stats};
use daily_types::Stats;

pub struct StatsRepository {
    db: DatabaseConnection,
}

fn to_count(value: i32) -> u32 {
    value.max(0) as u32
}

impl StatsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_stats(model: user_stats::Model) -> Result<Stats> {
        Ok(Stats {
            played: to_count(model.played),
            won: to_count(model.won),
            played_hard: to_count(model.played_hard),
            won_hard: to_count(model.won_hard),
            current_streak: to_count(model.current_streak),
            max_streak: to_count(model.max_streak),
            distribution: serde_json::from_str(&model.distribution)?,
            last_date_key: model.last_date,
            hard_mode: model.hard_mode,
        })
    }

    pub async fn find(&self, user_id: &str) -> Result<Option<Stats>> {
        let model = UserStats::find_by_id(user_id.to_string())
            .one(&self.db)
            .await?;

        model.map(Self::model_to_stats).transpose()
    }

    pub async fn save(&self, user_id: &str, stats: &Stats) -> Result<()> {
        let model = user_stats::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            played: ActiveValue::Set(stats.played as i32),
            won: ActiveValue::Set(stats.won as i32),
            played_hard: ActiveValue::Set(stats.played_hard as i32),
            won_hard: ActiveValue::Set(stats.won_hard as i32),
            current_streak: ActiveValue::Set(stats.current_streak as i32),
            max_streak: ActiveValue::Set(stats.max_streak as i32),
            distribution: ActiveValue::Set(serde_json::to_string(&stats.distribution)?),
            last_date: ActiveValue::Set(stats.last_date_key.clone()),
            hard_mode: ActiveValue::Set(stats.hard_mode),
            updated_at: ActiveValue::Set(chrono::Utc::now().into()),
        };

        UserStats::insert(model)
            .on_conflict(
                OnConflict::column(user_stats::Column::UserId)
                    .update_columns([
                        user_stats::Column::Played,
                        user_stats::Column::Won,
                        user_stats::Column::PlayedHard,
                        user_stats::Column::WonHard,
                        user_stats::Column::CurrentStreak,
                        user_stats::Column::MaxStreak,
                        user_stats::Column::Distribution,
                        user_stats::Column::LastDate,
                        user_stats::Column::HardMode,
                        user_stats::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_to_memory_database;
    use migration::{Migrator, MigratorTrait};

    async fn setup_test_db() -> StatsRepository {
        let db = connect_to_memory_database().await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        StatsRepository::new(db)
    }

    #[tokio::test]
    async fn test_save_and_find_stats() {
        let repo = setup_test_db().await;
        assert!(repo.find("user-1").await.unwrap().is_none());

        let stats = Stats {
            played: 12,
            won: 10,
            played_hard: 3,
            won_hard: 2,
            current_streak: 4,
            max_streak: 7,
            distribution: vec![0, 1, 4, 3, 2, 0],
            last_date_key: Some("2025-03-14".to_string()),
            hard_mode: true,
        };
        repo.save("user-1", &stats).await.unwrap();
        assert_eq!(repo.find("user-1").await.unwrap(), Some(stats.clone()));

        let mut updated = stats.clone();
        updated.played += 1;
        updated.current_streak = 0;
        updated.hard_mode = false;
        repo.save("user-1", &updated).await.unwrap();
        assert_eq!(repo.find("user-1").await.unwrap(), Some(updated));
    }
}
