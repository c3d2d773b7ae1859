pub mod auth;
pub mod clubs;
pub mod matches;
pub mod participants;
pub mod tournaments;
pub mod users;

pub use auth::AuthService;
pub use clubs::ClubService;
pub use matches::MatchService;
pub use participants::ParticipantService;
pub use tournaments::TournamentService;
pub use users::UserService;
