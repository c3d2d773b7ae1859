use std::sync::Arc;

use infra::repos::StoreHealth;
use infra::Repos;

use crate::auth::{AuthConfig, JwtService};
use crate::services::{
    AuthService, ClubService, MatchService, ParticipantService, TournamentService, UserService,
};

#[derive(Clone)]
pub struct AppState {
    clubs: ClubService,
    participants: ParticipantService,
    tournaments: TournamentService,
    matches: MatchService,
    users: UserService,
    auth: AuthService,
    health: Arc<dyn StoreHealth>,
    jwt_service: JwtService,
}

impl AppState {
    pub fn new(repos: Repos, auth_config: AuthConfig) -> anyhow::Result<Self> {
        let jwt_service = JwtService::new(&auth_config);
        let auth = AuthService::new(repos.users.clone(), jwt_service.clone(), &auth_config)?;

        Ok(Self {
            clubs: ClubService::new(repos.clubs),
            participants: ParticipantService::new(repos.participants),
            tournaments: TournamentService::new(repos.tournaments),
            matches: MatchService::new(repos.matches),
            users: UserService::new(repos.users, auth_config.bcrypt_cost),
            auth,
            health: repos.health,
            jwt_service,
        })
    }

    pub fn clubs(&self) -> &ClubService {
        &self.clubs
    }

    pub fn participants(&self) -> &ParticipantService {
        &self.participants
    }

    pub fn tournaments(&self) -> &TournamentService {
        &self.tournaments
    }

    pub fn matches(&self) -> &MatchService {
        &self.matches
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn health(&self) -> &dyn StoreHealth {
        self.health.as_ref()
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}
