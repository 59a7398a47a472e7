pub mod connection;
pub mod entities;
pub mod local_store;
pub mod repositories;

pub use local_store::FileStore;
pub use repositories::{ProgressRepository, ResultRepository, StatsRepository};

use sea_orm::{Database, DatabaseConnection, DbErr};

pub struct DatabaseManager {
    connection: DatabaseConnection,
}

impl DatabaseManager {
    pub async fn connect(database_url: &str) -> Result<Self, DbErr> {
        let connection = Database::connect(database_url).await?;
        Ok(Self { connection })
    }

    pub fn get_connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    pub fn progress(&self) -> ProgressRepository {
        ProgressRepository::new(self.connection.clone())
    }

    pub fn stats(&self) -> StatsRepository {
        StatsRepository::new(self.connection.clone())
    }

    pub fn results(&self) -> ResultRepository {
        ResultRepository::new(self.connection.clone())
    }
}
