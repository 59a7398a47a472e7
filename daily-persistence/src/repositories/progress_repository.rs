use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};

use crate::entities::{game_progress, prelude::*};
use daily_types::GameState;

pub struct ProgressRepository {
    db: DatabaseConnection,
}

impl ProgressRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_state(model: game_progress::Model) -> Result<GameState> {
        Ok(GameState {
            date_key: model.date,
            guesses: serde_json::from_str(&model.guesses)?,
            is_over: model.game_over,
            won: model.won,
            hard_mode: model.hard_mode,
            hard_mode_ever_disabled: model.hard_mode_ever_disabled,
        })
    }

    pub async fn find(&self, user_id: &str, date: &str) -> Result<Option<GameState>> {
        let model = GameProgress::find_by_id((user_id.to_string(), date.to_string()))
            .one(&self.db)
            .await?;

        model.map(Self::model_to_state).transpose()
    }

    /// Insert or overwrite the user's progress for `state.date_key`.
    pub async fn save(&self, user_id: &str, state: &GameState) -> Result<()> {
        let model = game_progress::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            date: ActiveValue::Set(state.date_key.clone()),
            guesses: ActiveValue::Set(serde_json::to_string(&state.guesses)?),
            hard_mode: ActiveValue::Set(state.hard_mode),
            hard_mode_ever_disabled: ActiveValue::Set(state.hard_mode_ever_disabled),
            game_over: ActiveValue::Set(state.is_over),
            won: ActiveValue::Set(state.won),
            updated_at: ActiveValue::Set(chrono::Utc::now().into()),
        };

        GameProgress::insert(model)
            .on_conflict(
                OnConflict::columns([game_progress::Column::UserId, game_progress::Column::Date])
                    .update_columns([
                        game_progress::Column::Guesses,
                        game_progress::Column::HardMode,
                        game_progress::Column::HardModeEverDisabled,
                        game_progress::Column::GameOver,
                        game_progress::Column::Won,
                        game_progress::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        tracing::debug!(
            "Saved {} guesses for user {} on {}",
            state.guesses.len(),
            user_id,
            state.date_key
        );
        Ok(())
    }
}
