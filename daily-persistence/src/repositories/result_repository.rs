use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};
use uuid::Uuid;

use crate::entities::{game_results, prelude::*};
use daily_types::GameOutcome;

pub struct ResultRepository {
    db: DatabaseConnection,
}

impl ResultRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_outcome(model: game_results::Model) -> GameOutcome {
        GameOutcome {
            date: model.date,
            won: model.won,
            guesses: model.guesses.map(|g| g.max(0) as u32),
            hard_mode: model.hard_mode,
        }
    }

    /// Record a finished game unless one is already stored for that day.
    /// Returns whether a row was written.
    pub async fn record(&self, user_id: &str, outcome: &GameOutcome) -> Result<bool> {
        let model = game_results::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            date: ActiveValue::Set(outcome.date.clone()),
            won: ActiveValue::Set(outcome.won),
            guesses: ActiveValue::Set(outcome.guesses.map(|g| g as i32)),
            hard_mode: ActiveValue::Set(outcome.hard_mode),
            created_at: ActiveValue::Set(chrono::Utc::now().into()),
        };

        let inserted = GameResults::insert(model)
            .on_conflict(
                OnConflict::columns([game_results::Column::UserId, game_results::Column::Date])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        if inserted == 0 {
            tracing::debug!("Result for user {} on {} already recorded", user_id, outcome.date);
        }
        Ok(inserted > 0)
    }

    pub async fn find(&self, user_id: &str, date: &str) -> Result<Option<GameOutcome>> {
        let model = GameResults::find()
            .filter(game_results::Column::UserId.eq(user_id))
            .filter(game_results::Column::Date.eq(date))
            .one(&self.db)
            .await?;

        Ok(model.map(Self::model_to_outcome))
    }

    pub async fn count_for_user(&self, user_id: &str) -> Result<u64> {
        let count = GameResults::find()
            .filter(game_results::Column::UserId.eq(user_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
