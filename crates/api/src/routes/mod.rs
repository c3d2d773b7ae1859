pub mod auth;
pub mod clubs;
pub mod health;
pub mod matches;
pub mod participants;
pub mod tournaments;
pub mod users;
