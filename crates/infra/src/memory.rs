//! In-process store with the same constraint and cascade behaviour as the
//! Postgres schema (unique keys, foreign keys, `ON DELETE CASCADE` /
//! `SET NULL`). Backs the API test-suite.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use parking_lot::Mutex;
use sqlx::types::Json;

use crate::error::{RepoError, RepoResult};
use crate::models::{
    ClubRow, Gender, MatchRow, ParticipantRow, Round, SkillLevel, TournamentRow, UserRow,
};
use crate::repos::{
    ClubData, ClubStore, MatchData, MatchStore, NewUser, ParticipantData, ParticipantStore,
    Repos, StoreHealth, TournamentData, TournamentStore, UpdateUserData, UserStore,
};

#[derive(Default)]
struct Tables {
    next_id: i64,
    clubs: BTreeMap<i64, ClubRow>,
    participants: BTreeMap<i64, ParticipantRow>,
    tournaments: BTreeMap<i64, TournamentRow>,
    matches: BTreeMap<i64, MatchRow>,
    users: BTreeMap<i64, UserRow>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check_club(&self, club_id: Option<i64>) -> RepoResult<()> {
        match club_id {
            Some(id) if !self.clubs.contains_key(&id) => Err(RepoError::InvalidReference(
                "participants_club_id_fkey".into(),
            )),
            _ => Ok(()),
        }
    }

    fn check_match_refs(&self, data: &MatchData) -> RepoResult<()> {
        let slots = [
            (data.participant1_id, "matches_participant1_id_fkey"),
            (data.participant2_id, "matches_participant2_id_fkey"),
            (data.winner_id, "matches_winner_id_fkey"),
        ];
        for (slot, constraint) in slots {
            if let Some(id) = slot {
                if !self.participants.contains_key(&id) {
                    return Err(RepoError::InvalidReference(constraint.into()));
                }
            }
        }
        if let Some(id) = data.tournament_id {
            if !self.tournaments.contains_key(&id) {
                return Err(RepoError::InvalidReference(
                    "matches_tournament_id_fkey".into(),
                ));
            }
        }
        Ok(())
    }

    fn check_match_id_unique(&self, match_id: Option<&str>, except: Option<i64>) -> RepoResult<()> {
        let Some(match_id) = match_id else {
            return Ok(());
        };
        let taken = self
            .matches
            .values()
            .any(|m| m.match_id.as_deref() == Some(match_id) && Some(m.id) != except);
        if taken {
            return Err(RepoError::Conflict("matches_match_id_key".into()));
        }
        Ok(())
    }

    fn check_username_unique(&self, username: &str, except: Option<i64>) -> RepoResult<()> {
        let taken = self
            .users
            .values()
            .any(|u| u.username == username && Some(u.id) != except);
        if taken {
            return Err(RepoError::Conflict("users_username_key".into()));
        }
        Ok(())
    }

    /// `ON DELETE SET NULL` on every match slot.
    fn detach_participant(&mut self, participant_id: i64) {
        for m in self.matches.values_mut() {
            for slot in [&mut m.participant1_id, &mut m.participant2_id, &mut m.winner_id] {
                if *slot == Some(participant_id) {
                    *slot = None;
                }
            }
        }
    }
}

/// Cheap to clone; clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repos(&self) -> Repos {
        Repos {
            clubs: Arc::new(self.clone()),
            participants: Arc::new(self.clone()),
            tournaments: Arc::new(self.clone()),
            matches: Arc::new(self.clone()),
            users: Arc::new(self.clone()),
            health: Arc::new(self.clone()),
        }
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

#[async_trait]
impl ClubStore for MemoryStore {
    async fn list(&self) -> RepoResult<Vec<ClubRow>> {
        Ok(self.tables.lock().clubs.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> RepoResult<Option<ClubRow>> {
        Ok(self.tables.lock().clubs.get(&id).cloned())
    }

    async fn create(&self, data: ClubData) -> RepoResult<ClubRow> {
        let mut tables = self.tables.lock();
        let now = Utc::now();
        let row = ClubRow {
            id: tables.next_id(),
            name: data.name,
            location: data.location,
            created_at: now,
            updated_at: now,
        };
        tables.clubs.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, data: ClubData) -> RepoResult<Option<ClubRow>> {
        let mut tables = self.tables.lock();
        Ok(tables.clubs.get_mut(&id).map(|row| {
            row.name = data.name;
            row.location = data.location;
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut tables = self.tables.lock();
        if tables.clubs.remove(&id).is_none() {
            return Ok(false);
        }
        let members: Vec<i64> = tables
            .participants
            .values()
            .filter(|p| p.club_id == Some(id))
            .map(|p| p.id)
            .collect();
        for participant_id in members {
            tables.participants.remove(&participant_id);
            tables.detach_participant(participant_id);
        }
        Ok(true)
    }
}

#[async_trait]
impl ParticipantStore for MemoryStore {
    async fn list(&self) -> RepoResult<Vec<ParticipantRow>> {
        Ok(self.tables.lock().participants.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> RepoResult<Option<ParticipantRow>> {
        Ok(self.tables.lock().participants.get(&id).cloned())
    }

    async fn list_by_club(&self, club_id: i64) -> RepoResult<Vec<ParticipantRow>> {
        Ok(self
            .tables
            .lock()
            .participants
            .values()
            .filter(|p| p.club_id == Some(club_id))
            .cloned()
            .collect())
    }

    async fn list_by_gender_and_skill_level(
        &self,
        gender: Gender,
        skill_level: SkillLevel,
    ) -> RepoResult<Vec<ParticipantRow>> {
        Ok(self
            .tables
            .lock()
            .participants
            .values()
            .filter(|p| p.gender == gender && p.skill_level == skill_level)
            .cloned()
            .collect())
    }

    async fn create(&self, data: ParticipantData) -> RepoResult<ParticipantRow> {
        let mut tables = self.tables.lock();
        tables.check_club(data.club_id)?;
        let now = Utc::now();
        let row = ParticipantRow {
            id: tables.next_id(),
            name: data.name,
            age: data.age,
            gender: data.gender,
            skill_level: data.skill_level,
            club_id: data.club_id,
            created_at: now,
            updated_at: now,
        };
        tables.participants.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: i64,
        data: ParticipantData,
    ) -> RepoResult<Option<ParticipantRow>> {
        let mut tables = self.tables.lock();
        if !tables.participants.contains_key(&id) {
            return Ok(None);
        }
        tables.check_club(data.club_id)?;
        Ok(tables.participants.get_mut(&id).map(|row| {
            row.name = data.name;
            row.age = data.age;
            row.gender = data.gender;
            row.skill_level = data.skill_level;
            row.club_id = data.club_id;
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut tables = self.tables.lock();
        if tables.participants.remove(&id).is_none() {
            return Ok(false);
        }
        tables.detach_participant(id);
        Ok(true)
    }
}

#[async_trait]
impl TournamentStore for MemoryStore {
    async fn list(&self) -> RepoResult<Vec<TournamentRow>> {
        Ok(self.tables.lock().tournaments.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> RepoResult<Option<TournamentRow>> {
        Ok(self.tables.lock().tournaments.get(&id).cloned())
    }

    async fn list_by_date(&self, date: NaiveDate) -> RepoResult<Vec<TournamentRow>> {
        Ok(self
            .tables
            .lock()
            .tournaments
            .values()
            .filter(|t| t.date == date)
            .cloned()
            .collect())
    }

    async fn list_by_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<TournamentRow>> {
        Ok(self
            .tables
            .lock()
            .tournaments
            .values()
            .filter(|t| start <= t.date && t.date <= end)
            .cloned()
            .collect())
    }

    async fn create(&self, data: TournamentData) -> RepoResult<TournamentRow> {
        let mut tables = self.tables.lock();
        let now = Utc::now();
        let row = TournamentRow {
            id: tables.next_id(),
            name: data.name,
            location: data.location,
            date: data.date,
            number_of_mats: data.number_of_mats,
            categories: Json(data.categories),
            created_at: now,
            updated_at: now,
        };
        tables.tournaments.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, data: TournamentData) -> RepoResult<Option<TournamentRow>> {
        let mut tables = self.tables.lock();
        Ok(tables.tournaments.get_mut(&id).map(|row| {
            row.name = data.name;
            row.location = data.location;
            row.date = data.date;
            row.number_of_mats = data.number_of_mats;
            row.categories = Json(data.categories);
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut tables = self.tables.lock();
        if tables.tournaments.remove(&id).is_none() {
            return Ok(false);
        }
        tables.matches.retain(|_, m| m.tournament_id != Some(id));
        Ok(true)
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn list(&self) -> RepoResult<Vec<MatchRow>> {
        Ok(self.tables.lock().matches.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> RepoResult<Option<MatchRow>> {
        Ok(self.tables.lock().matches.get(&id).cloned())
    }

    async fn list_by_tournament(&self, tournament_id: i64) -> RepoResult<Vec<MatchRow>> {
        Ok(self
            .tables
            .lock()
            .matches
            .values()
            .filter(|m| m.tournament_id == Some(tournament_id))
            .cloned()
            .collect())
    }

    async fn list_by_tournament_and_round(
        &self,
        tournament_id: i64,
        round: Round,
    ) -> RepoResult<Vec<MatchRow>> {
        Ok(self
            .tables
            .lock()
            .matches
            .values()
            .filter(|m| m.tournament_id == Some(tournament_id) && m.round == round)
            .cloned()
            .collect())
    }

    async fn list_by_tournament_and_mat(
        &self,
        tournament_id: i64,
        mat_number: i32,
    ) -> RepoResult<Vec<MatchRow>> {
        Ok(self
            .tables
            .lock()
            .matches
            .values()
            .filter(|m| m.tournament_id == Some(tournament_id) && m.mat_number == mat_number)
            .cloned()
            .collect())
    }

    async fn list_by_participant(&self, participant_id: i64) -> RepoResult<Vec<MatchRow>> {
        Ok(self
            .tables
            .lock()
            .matches
            .values()
            .filter(|m| m.involves(participant_id))
            .cloned()
            .collect())
    }

    async fn create(&self, data: MatchData) -> RepoResult<MatchRow> {
        let mut tables = self.tables.lock();
        tables.check_match_refs(&data)?;
        tables.check_match_id_unique(data.match_id.as_deref(), None)?;
        let now = Utc::now();
        let row = MatchRow {
            id: tables.next_id(),
            match_id: data.match_id,
            mat_number: data.mat_number,
            match_order: data.match_order,
            participant1_id: data.participant1_id,
            participant2_id: data.participant2_id,
            winner_id: data.winner_id,
            round: data.round,
            tournament_id: data.tournament_id,
            scheduled_time: data.scheduled_time,
            created_at: now,
            updated_at: now,
        };
        tables.matches.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, data: MatchData) -> RepoResult<Option<MatchRow>> {
        let mut tables = self.tables.lock();
        if !tables.matches.contains_key(&id) {
            return Ok(None);
        }
        tables.check_match_refs(&data)?;
        tables.check_match_id_unique(data.match_id.as_deref(), Some(id))?;
        Ok(tables.matches.get_mut(&id).map(|row| {
            row.match_id = data.match_id;
            row.mat_number = data.mat_number;
            row.match_order = data.match_order;
            row.participant1_id = data.participant1_id;
            row.participant2_id = data.participant2_id;
            row.winner_id = data.winner_id;
            row.round = data.round;
            row.tournament_id = data.tournament_id;
            row.scheduled_time = data.scheduled_time;
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        Ok(self.tables.lock().matches.remove(&id).is_some())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list(&self) -> RepoResult<Vec<UserRow>> {
        Ok(self.tables.lock().users.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> RepoResult<Option<UserRow>> {
        Ok(self.tables.lock().users.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> RepoResult<Option<UserRow>> {
        Ok(self
            .tables
            .lock()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, data: NewUser) -> RepoResult<UserRow> {
        let mut tables = self.tables.lock();
        tables.check_username_unique(&data.username, None)?;
        let now = Utc::now();
        let row = UserRow {
            id: tables.next_id(),
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            role: data.role,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, data: UpdateUserData) -> RepoResult<Option<UserRow>> {
        let mut tables = self.tables.lock();
        if !tables.users.contains_key(&id) {
            return Ok(None);
        }
        tables.check_username_unique(&data.username, Some(id))?;
        Ok(tables.users.get_mut(&id).map(|row| {
            row.username = data.username;
            row.email = data.email;
            row.role = data.role;
            if let Some(hash) = data.password_hash {
                row.password_hash = hash;
            }
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        Ok(self.tables.lock().users.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn participant(name: &str, club_id: Option<i64>) -> ParticipantData {
        ParticipantData {
            name: name.to_string(),
            age: 20,
            gender: Gender::Male,
            skill_level: SkillLevel::BlackBelt,
            club_id,
        }
    }

    fn bout(p1: Option<i64>, p2: Option<i64>, match_id: Option<&str>) -> MatchData {
        MatchData {
            match_id: match_id.map(str::to_string),
            mat_number: 1,
            match_order: 1,
            participant1_id: p1,
            participant2_id: p2,
            winner_id: None,
            round: Round::QuarterFinal,
            tournament_id: None,
            scheduled_time: None,
        }
    }

    #[tokio::test]
    async fn deleting_club_cascades_to_participants_and_match_slots() {
        let store = MemoryStore::new();
        let club = ClubStore::create(
            &store,
            ClubData {
                name: "Tigers".into(),
                location: None,
            },
        )
        .await
        .unwrap();
        let member = ParticipantStore::create(&store, participant("Kim", Some(club.id)))
            .await
            .unwrap();
        let outsider = ParticipantStore::create(&store, participant("Lee", None))
            .await
            .unwrap();
        let created = MatchStore::create(&store, bout(Some(member.id), Some(outsider.id), None))
            .await
            .unwrap();

        assert!(ClubStore::delete(&store, club.id).await.unwrap());

        assert!(ParticipantStore::get(&store, member.id).await.unwrap().is_none());
        assert!(ParticipantStore::get(&store, outsider.id).await.unwrap().is_some());
        let after = MatchStore::get(&store, created.id).await.unwrap().unwrap();
        assert_eq!(after.participant1_id, None);
        assert_eq!(after.participant2_id, Some(outsider.id));
    }

    #[tokio::test]
    async fn participant_lookup_returns_each_match_once() {
        let store = MemoryStore::new();
        let p = ParticipantStore::create(&store, participant("Park", None))
            .await
            .unwrap();
        MatchStore::create(&store, bout(Some(p.id), Some(p.id), None))
            .await
            .unwrap();
        MatchStore::create(&store, bout(None, Some(p.id), None))
            .await
            .unwrap();
        MatchStore::create(&store, bout(None, None, None)).await.unwrap();

        let found = store.list_by_participant(p.id).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn duplicate_match_id_is_a_conflict() {
        let store = MemoryStore::new();
        MatchStore::create(&store, bout(None, None, Some("mat1-match1")))
            .await
            .unwrap();
        let err = MatchStore::create(&store, bout(None, None, Some("mat1-match1")))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Conflict(_)));
    }

    #[tokio::test]
    async fn unknown_club_reference_is_rejected() {
        let store = MemoryStore::new();
        let err = ParticipantStore::create(&store, participant("Choi", Some(999)))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let store = MemoryStore::new();
        let new_user = || NewUser {
            username: "referee".into(),
            email: "ref@example.com".into(),
            password_hash: "$2b$04$hash".into(),
            role: Role::User,
        };
        UserStore::create(&store, new_user()).await.unwrap();
        let err = UserStore::create(&store, new_user()).await.unwrap_err();
        assert!(matches!(err, RepoError::Conflict(_)));
    }

    #[tokio::test]
    async fn date_range_is_inclusive() {
        let store = MemoryStore::new();
        let day = |d| NaiveDate::from_ymd_opt(2025, 5, d).unwrap();
        for d in [1, 10, 20] {
            TournamentStore::create(
                &store,
                TournamentData {
                    name: format!("Open {d}"),
                    location: "Seoul".into(),
                    date: day(d),
                    number_of_mats: 2,
                    categories: vec![],
                },
            )
            .await
            .unwrap();
        }

        let found = store.list_by_date_between(day(1), day(10)).await.unwrap();
        assert_eq!(found.len(), 2);
        let inverted = store.list_by_date_between(day(20), day(1)).await.unwrap();
        assert!(inverted.is_empty());
    }
}
