//! Request and response bodies of the REST surface, plus the validation that
//! turns a request body into store data.
//!
//! Every field of a request body is optional at the serde level so a missing
//! field yields a 400 with a specific message instead of a generic decoding
//! error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use infra::models::{Gender, Role, Round, SkillLevel, TournamentCategory, UserRow};
use infra::repos::{ClubData, MatchData, ParticipantData, TournamentData};
use serde::{Deserialize, Serialize};

use crate::auth::Claims;
use crate::error::AppError;

pub const PARTICIPANT_MIN_AGE: i32 = 4;
pub const PARTICIPANT_MAX_AGE: i32 = 100;
pub const PARTICIPANT_NAME_MIN_CHARS: usize = 2;
pub const PARTICIPANT_NAME_MAX_CHARS: usize = 100;

fn bad_request(msg: &str) -> AppError {
    AppError::BadRequest(msg.to_string())
}

/// Trimmed, non-empty text or `None`.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Clubs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubInput {
    pub name: Option<String>,
    pub location: Option<String>,
}

impl ClubInput {
    pub fn validate(self) -> Result<ClubData, AppError> {
        let name = non_blank(self.name).ok_or_else(|| bad_request("Club name is required"))?;
        Ok(ClubData {
            name,
            location: non_blank(self.location),
        })
    }
}

// ---------------------------------------------------------------------------
// Participants
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantInput {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub skill_level: Option<SkillLevel>,
    pub club_id: Option<i64>,
}

impl ParticipantInput {
    pub fn validate(self) -> Result<ParticipantData, AppError> {
        let name = non_blank(self.name).ok_or_else(|| bad_request("Name is required"))?;
        let chars = name.chars().count();
        if !(PARTICIPANT_NAME_MIN_CHARS..=PARTICIPANT_NAME_MAX_CHARS).contains(&chars) {
            return Err(bad_request("Name must be between 2 and 100 characters"));
        }

        let age = self.age.ok_or_else(|| bad_request("Age is required"))?;
        if age < PARTICIPANT_MIN_AGE {
            return Err(bad_request("Age must be at least 4 years"));
        }
        if age > PARTICIPANT_MAX_AGE {
            return Err(bad_request("Age must be at most 100 years"));
        }

        let gender = self.gender.ok_or_else(|| bad_request("Gender is required"))?;
        let skill_level = self
            .skill_level
            .ok_or_else(|| bad_request("Skill level is required"))?;

        Ok(ParticipantData {
            name,
            age,
            gender,
            skill_level,
            club_id: self.club_id,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSearch {
    pub gender: Gender,
    pub skill_level: SkillLevel,
}

// ---------------------------------------------------------------------------
// Tournaments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentInput {
    pub name: Option<String>,
    pub location: Option<String>,
    pub date: Option<NaiveDate>,
    pub number_of_mats: Option<i32>,
    #[serde(default)]
    pub categories: Vec<TournamentCategory>,
}

impl TournamentInput {
    pub fn validate(self) -> Result<TournamentData, AppError> {
        let name =
            non_blank(self.name).ok_or_else(|| bad_request("Tournament name is required"))?;
        let location = non_blank(self.location)
            .ok_or_else(|| bad_request("Tournament location is required"))?;
        let date = self
            .date
            .ok_or_else(|| bad_request("Tournament date is required"))?;
        let number_of_mats = self
            .number_of_mats
            .ok_or_else(|| bad_request("Number of mats is required"))?;
        if number_of_mats < 1 {
            return Err(bad_request("Number of mats must be at least 1"));
        }

        for category in &self.categories {
            if category.min_age < 0 || category.max_age < 0 {
                return Err(bad_request("Category ages must not be negative"));
            }
            if category.min_age > category.max_age {
                return Err(bad_request(
                    "Category minimum age must not exceed maximum age",
                ));
            }
        }

        Ok(TournamentData {
            name,
            location,
            date,
            number_of_mats,
            categories: self.categories,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInput {
    pub match_id: Option<String>,
    pub mat_number: Option<i32>,
    pub match_order: Option<i32>,
    pub participant1_id: Option<i64>,
    pub participant2_id: Option<i64>,
    pub winner_id: Option<i64>,
    pub round: Option<Round>,
    pub tournament_id: Option<i64>,
    pub scheduled_time: Option<NaiveDateTime>,
}

impl MatchInput {
    pub fn validate(self) -> Result<MatchData, AppError> {
        let mat_number = self
            .mat_number
            .ok_or_else(|| bad_request("Mat number is required"))?;
        if mat_number < 1 {
            return Err(bad_request("Mat number must be at least 1"));
        }
        let match_order = self
            .match_order
            .ok_or_else(|| bad_request("Match order is required"))?;
        if match_order < 1 {
            return Err(bad_request("Match order must be at least 1"));
        }
        let round = self.round.ok_or_else(|| bad_request("Round is required"))?;

        let match_id = non_blank(self.match_id);
        if let Some(id) = &match_id {
            if !is_valid_match_id(id) {
                return Err(bad_request("Match id must have the form mat{N}-match{M}"));
            }
        }

        if let (Some(p1), Some(p2)) = (self.participant1_id, self.participant2_id) {
            if p1 == p2 {
                return Err(bad_request("Participants of a match must be different"));
            }
        }
        if let Some(winner) = self.winner_id {
            if Some(winner) != self.participant1_id && Some(winner) != self.participant2_id {
                return Err(bad_request("Winner must be one of the match participants"));
            }
        }

        Ok(MatchData {
            match_id,
            mat_number,
            match_order,
            participant1_id: self.participant1_id,
            participant2_id: self.participant2_id,
            winner_id: self.winner_id,
            round,
            tournament_id: self.tournament_id,
            scheduled_time: self.scheduled_time,
        })
    }
}

/// `mat{N}-match{M}` with N and M positive integers.
pub fn is_valid_match_id(id: &str) -> bool {
    fn positive(digits: &str) -> bool {
        !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
            && digits.parse::<u32>().map(|n| n > 0).unwrap_or(false)
    }

    id.strip_prefix("mat")
        .and_then(|rest| rest.split_once("-match"))
        .map(|(mat, order)| positive(mat) && positive(order))
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Users & auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

/// Validated registration fields. The password is still plaintext here.
#[derive(Debug)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<Registration, AppError> {
        let missing = || bad_request("All fields are required");
        let password = self
            .password
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(missing)?;
        Ok(Registration {
            username: non_blank(self.username).ok_or_else(missing)?,
            email: non_blank(self.email).ok_or_else(missing)?,
            password,
            role: self.role.ok_or_else(missing)?,
        })
    }
}

/// Full replace of a user's profile. `password` is optional: when absent or
/// blank the stored hash is kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdateRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

/// Validated profile update. `password` is plaintext and only present when a
/// new one was supplied.
#[derive(Debug)]
pub struct UserUpdate {
    pub username: String,
    pub email: String,
    pub role: Role,
    pub password: Option<String>,
}

impl UserUpdateRequest {
    pub fn validate(self) -> Result<UserUpdate, AppError> {
        let missing = || bad_request("All fields are required");
        Ok(UserUpdate {
            username: non_blank(self.username).ok_or_else(missing)?,
            email: non_blank(self.email).ok_or_else(missing)?,
            role: self.role.ok_or_else(missing)?,
            password: self.password.filter(|p| !p.trim().is_empty()),
        })
    }
}

/// Public view of a user. Has no password field, so no response path can leak one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            role: row.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub message: String,
    pub user: UserResponse,
    pub expires_at: DateTime<Utc>,
}

impl ValidateResponse {
    pub fn from_claims(claims: Claims) -> Result<Self, AppError> {
        let id = claims.user_id()?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| AppError::Unauthorized("Invalid token expiry".to_string()))?;
        Ok(Self {
            message: "Token is valid".to_string(),
            user: UserResponse {
                id,
                username: claims.username,
                email: claims.email,
                role: claims.role,
            },
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant() -> ParticipantInput {
        ParticipantInput {
            name: Some("Lee Dae-hoon".into()),
            age: Some(24),
            gender: Some(Gender::Male),
            skill_level: Some(SkillLevel::BlackBelt),
            club_id: None,
        }
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::BadRequest(msg) => msg,
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn participant_name_bounds() {
        let blank = ParticipantInput {
            name: Some("   ".into()),
            ..participant()
        };
        assert_eq!(message(blank.validate().unwrap_err()), "Name is required");

        let short = ParticipantInput {
            name: Some("K".into()),
            ..participant()
        };
        assert_eq!(
            message(short.validate().unwrap_err()),
            "Name must be between 2 and 100 characters"
        );

        let long = ParticipantInput {
            name: Some("x".repeat(101)),
            ..participant()
        };
        assert!(long.validate().is_err());

        let exact = ParticipantInput {
            name: Some("x".repeat(100)),
            ..participant()
        };
        assert!(exact.validate().is_ok());
    }

    #[test]
    fn participant_age_bounds() {
        for (age, expected) in [
            (3, Some("Age must be at least 4 years")),
            (4, None),
            (100, None),
            (101, Some("Age must be at most 100 years")),
        ] {
            let input = ParticipantInput {
                age: Some(age),
                ..participant()
            };
            match expected {
                Some(msg) => assert_eq!(message(input.validate().unwrap_err()), msg),
                None => assert!(input.validate().is_ok(), "age {age} should be accepted"),
            }
        }
    }

    #[test]
    fn participant_requires_gender_and_skill_level() {
        let no_gender = ParticipantInput {
            gender: None,
            ..participant()
        };
        assert_eq!(message(no_gender.validate().unwrap_err()), "Gender is required");

        let no_level = ParticipantInput {
            skill_level: None,
            ..participant()
        };
        assert_eq!(
            message(no_level.validate().unwrap_err()),
            "Skill level is required"
        );
    }

    #[test]
    fn match_id_format() {
        assert!(is_valid_match_id("mat1-match1"));
        assert!(is_valid_match_id("mat12-match304"));
        assert!(!is_valid_match_id("mat0-match1"));
        assert!(!is_valid_match_id("mat1-match"));
        assert!(!is_valid_match_id("mat-match1"));
        assert!(!is_valid_match_id("mat1_match1"));
        assert!(!is_valid_match_id("mat+1-match1"));
        assert!(!is_valid_match_id("ring1-match1"));
    }

    #[test]
    fn winner_must_be_a_participant() {
        let input = MatchInput {
            mat_number: Some(1),
            match_order: Some(1),
            round: Some(Round::Final),
            participant1_id: Some(1),
            participant2_id: Some(2),
            winner_id: Some(3),
            ..Default::default()
        };
        assert_eq!(
            message(input.validate().unwrap_err()),
            "Winner must be one of the match participants"
        );

        let ok = MatchInput {
            mat_number: Some(1),
            match_order: Some(1),
            round: Some(Round::Final),
            participant1_id: Some(1),
            participant2_id: Some(2),
            winner_id: Some(2),
            ..Default::default()
        };
        assert_eq!(ok.validate().unwrap().winner_id, Some(2));
    }

    #[test]
    fn inverted_category_age_range_is_rejected() {
        let input = TournamentInput {
            name: Some("Nationals".into()),
            location: Some("Seoul".into()),
            date: NaiveDate::from_ymd_opt(2025, 9, 1),
            number_of_mats: Some(4),
            categories: vec![TournamentCategory {
                gender: Gender::Female,
                min_age: 12,
                max_age: 10,
                skill_level: SkillLevel::GreenBelt,
            }],
        };
        assert_eq!(
            message(input.validate().unwrap_err()),
            "Category minimum age must not exceed maximum age"
        );
    }

    #[test]
    fn registration_requires_every_field() {
        let req = RegisterRequest {
            username: Some("coach".into()),
            email: Some("coach@dojang.test".into()),
            password: Some("  ".into()),
            role: Some(Role::Club),
        };
        assert_eq!(message(req.validate().unwrap_err()), "All fields are required");
    }
}
