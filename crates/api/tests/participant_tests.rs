mod common;

use axum::http::StatusCode;
use common::{club, participant, TestApp};
use serde_json::json;

#[tokio::test]
async fn create_participant_echoes_fields() {
    let app = TestApp::new();
    let club_id = app.create("/api/clubs", club("Tiger Dojang")).await;

    let (status, body) = app
        .post("/api/participants", participant("Kim Soo-jin", Some(club_id)))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Kim Soo-jin");
    assert_eq!(body["age"], 16);
    assert_eq!(body["gender"], "FEMALE");
    assert_eq!(body["skillLevel"], "GREEN_BELT");
    assert_eq!(body["clubId"], club_id);
}

#[tokio::test]
async fn missing_or_blank_name_is_rejected_before_the_store() {
    let app = TestApp::new();

    for name in [json!(null), json!(""), json!("  ")] {
        let mut body = participant("placeholder", None);
        body["name"] = name;
        let (status, response) = app.post("/api/participants", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["message"], "Name is required");
    }

    let (_, all) = app.get("/api/participants").await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn age_outside_bounds_is_rejected() {
    let app = TestApp::new();

    let mut young = participant("Too Young", None);
    young["age"] = json!(3);
    let (status, body) = app.post("/api/participants", young).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Age must be at least 4 years");

    let mut old = participant("Too Old", None);
    old["age"] = json!(101);
    let (status, body) = app.post("/api/participants", old).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Age must be at most 100 years");

    let mut edge = participant("Just Four", None);
    edge["age"] = json!(4);
    let (status, _) = app.post("/api/participants", edge).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_enum_value_is_a_bad_request() {
    let app = TestApp::new();
    let mut body = participant("Kim Soo-jin", None);
    body["skillLevel"] = json!("PURPLE_BELT");

    let (status, _) = app.post("/api/participants", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reference_to_missing_club_is_a_bad_request() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/api/participants", participant("Kim Soo-jin", Some(404)))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Referenced entity does not exist"));
}

#[tokio::test]
async fn update_without_club_id_clears_the_association() {
    let app = TestApp::new();
    let club_id = app.create("/api/clubs", club("Tiger Dojang")).await;
    let id = app
        .create("/api/participants", participant("Kim Soo-jin", Some(club_id)))
        .await;

    let (status, body) = app
        .put(
            &format!("/api/participants/{id}"),
            json!({
                "name": "Kim Soo-jin",
                "age": 17,
                "gender": "FEMALE",
                "skillLevel": "BLUE_BELT",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["clubId"].is_null());
    assert_eq!(body["age"], 17);

    let (_, members) = app
        .get(&format!("/api/participants/club/{club_id}"))
        .await;
    assert_eq!(members, json!([]));
}

#[tokio::test]
async fn list_by_club_returns_only_members() {
    let app = TestApp::new();
    let tigers = app.create("/api/clubs", club("Tigers")).await;
    let dragons = app.create("/api/clubs", club("Dragons")).await;
    let a = app
        .create("/api/participants", participant("Tiger One", Some(tigers)))
        .await;
    app.create("/api/participants", participant("Dragon One", Some(dragons)))
        .await;
    let b = app
        .create("/api/participants", participant("Tiger Two", Some(tigers)))
        .await;

    let (status, body) = app.get(&format!("/api/participants/club/{tigers}")).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![a, b]);
}

#[tokio::test]
async fn search_matches_gender_and_skill_level() {
    let app = TestApp::new();
    let hit = app
        .create("/api/participants", participant("Green Girl", None))
        .await;
    let mut other_level = participant("Blue Girl", None);
    other_level["skillLevel"] = json!("BLUE_BELT");
    app.create("/api/participants", other_level).await;
    let mut other_gender = participant("Green Boy", None);
    other_gender["gender"] = json!("MALE");
    app.create("/api/participants", other_gender).await;

    let (status, body) = app
        .get("/api/participants/search?gender=FEMALE&skillLevel=GREEN_BELT")
        .await;

    assert_eq!(status, StatusCode::OK);
    let found = body.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], hit);
}

#[tokio::test]
async fn search_with_unknown_gender_is_a_bad_request() {
    let app = TestApp::new();

    let (status, body) = app
        .get("/api/participants/search?gender=OTHER&skillLevel=GREEN_BELT")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn delete_participant_then_404() {
    let app = TestApp::new();
    let id = app
        .create("/api/participants", participant("Kim Soo-jin", None))
        .await;

    let (status, _) = app.delete(&format!("/api/participants/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get(&format!("/api/participants/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        format!("Participant not found with id: {id}")
    );
}
