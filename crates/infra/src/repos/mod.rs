use std::sync::Arc;

use async_trait::async_trait;

use crate::{db::Db, error::RepoResult};

pub mod clubs;
pub mod matches;
pub mod participants;
pub mod tournaments;
pub mod users;

pub use clubs::{ClubData, ClubRepo, ClubStore};
pub use matches::{MatchData, MatchRepo, MatchStore};
pub use participants::{ParticipantData, ParticipantRepo, ParticipantStore};
pub use tournaments::{TournamentData, TournamentRepo, TournamentStore};
pub use users::{NewUser, UpdateUserData, UserRepo, UserStore};

/// Liveness probe for whatever backs the stores.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> RepoResult<()>;
}

pub struct PgHealth {
    pool: Db,
}

impl PgHealth {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreHealth for PgHealth {
    async fn ping(&self) -> RepoResult<()> {
        crate::db::ping(&self.pool).await?;
        Ok(())
    }
}

/// Shared handles to every entity store.
#[derive(Clone)]
pub struct Repos {
    pub clubs: Arc<dyn ClubStore>,
    pub participants: Arc<dyn ParticipantStore>,
    pub tournaments: Arc<dyn TournamentStore>,
    pub matches: Arc<dyn MatchStore>,
    pub users: Arc<dyn UserStore>,
    pub health: Arc<dyn StoreHealth>,
}

impl Repos {
    /// Postgres-backed stores sharing one connection pool.
    pub fn postgres(pool: Db) -> Self {
        Self {
            clubs: Arc::new(ClubRepo::new(pool.clone())),
            participants: Arc::new(ParticipantRepo::new(pool.clone())),
            tournaments: Arc::new(TournamentRepo::new(pool.clone())),
            matches: Arc::new(MatchRepo::new(pool.clone())),
            users: Arc::new(UserRepo::new(pool.clone())),
            health: Arc::new(PgHealth::new(pool)),
        }
    }
}
