use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize,
)]
#[sqlx(type_name = "gender", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Gender::Male, Gender::Female]
            .into_iter()
            .find(|gender| gender.as_str() == s || gender.display_name() == s)
            .ok_or_else(|| format!("Invalid gender: {}", s))
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Belt rank, ordered from white to black.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    sqlx::Type,
    Serialize,
    Deserialize,
)]
#[sqlx(type_name = "skill_level", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillLevel {
    WhiteBelt,
    YellowBelt,
    GreenBelt,
    BlueBelt,
    RedBelt,
    BlackBelt,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 6] = [
        SkillLevel::WhiteBelt,
        SkillLevel::YellowBelt,
        SkillLevel::GreenBelt,
        SkillLevel::BlueBelt,
        SkillLevel::RedBelt,
        SkillLevel::BlackBelt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::WhiteBelt => "WHITE_BELT",
            SkillLevel::YellowBelt => "YELLOW_BELT",
            SkillLevel::GreenBelt => "GREEN_BELT",
            SkillLevel::BlueBelt => "BLUE_BELT",
            SkillLevel::RedBelt => "RED_BELT",
            SkillLevel::BlackBelt => "BLACK_BELT",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SkillLevel::WhiteBelt => "White Belt",
            SkillLevel::YellowBelt => "Yellow Belt",
            SkillLevel::GreenBelt => "Green Belt",
            SkillLevel::BlueBelt => "Blue Belt",
            SkillLevel::RedBelt => "Red Belt",
            SkillLevel::BlackBelt => "Black Belt",
        }
    }
}

impl FromStr for SkillLevel {
    type Err = String;

    /// Accepts both the wire form (`BLACK_BELT`) and the display name (`Black Belt`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s || level.display_name() == s)
            .ok_or_else(|| format!("Invalid skill level: {}", s))
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize,
)]
#[sqlx(type_name = "match_round", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Round {
    QuarterFinal,
    SemiFinal,
    Final,
}

impl Round {
    pub fn as_str(&self) -> &'static str {
        match self {
            Round::QuarterFinal => "QUARTER_FINAL",
            Round::SemiFinal => "SEMI_FINAL",
            Round::Final => "FINAL",
        }
    }
}

impl FromStr for Round {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QUARTER_FINAL" => Ok(Round::QuarterFinal),
            "SEMI_FINAL" => Ok(Round::SemiFinal),
            "FINAL" => Ok(Round::Final),
            _ => Err(format!("Unknown round: {}", s)),
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize,
)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Club,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Club => "CLUB",
            Role::User => "USER",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "CLUB" => Ok(Role::Club),
            "USER" => Ok(Role::User),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubRow {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRow {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub skill_level: SkillLevel,
    pub club_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Bracket grouping embedded in a tournament (gender x age range x belt).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentCategory {
    pub gender: Gender,
    pub min_age: i32,
    pub max_age: i32,
    pub skill_level: SkillLevel,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentRow {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub date: NaiveDate,
    pub number_of_mats: i32,
    pub categories: Json<Vec<TournamentCategory>>, // JSONB field
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRow {
    pub id: i64,
    pub match_id: Option<String>,
    pub mat_number: i32,
    pub match_order: i32,
    pub participant1_id: Option<i64>,
    pub participant2_id: Option<i64>,
    pub winner_id: Option<i64>,
    pub round: Round,
    pub tournament_id: Option<i64>,
    pub scheduled_time: Option<NaiveDateTime>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MatchRow {
    /// True when the participant occupies either slot.
    pub fn involves(&self, participant_id: i64) -> bool {
        self.participant1_id == Some(participant_id) || self.participant2_id == Some(participant_id)
    }
}

/// Stored user, including the bcrypt hash. Not `Serialize`.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
