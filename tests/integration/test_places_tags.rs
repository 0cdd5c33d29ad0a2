use super::helpers::{
    KNOWN_PROVIDER_PREFIX, add_place, create_tag, expect_status, get_request, json_request,
    provider_place, read_json, send, sign_in, spawn_app, unique_suffix, vote,
};
use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

#[tokio::test]
async fn duplicate_tag_name_conflicts() {
    let app = spawn_app().await;
    let token = sign_in(&app).await;
    let keyword = format!("k{}", unique_suffix());

    let create = |keyword: String| {
        json_request(
            "POST",
            "/api/v1/tags",
            Some(&token),
            json!({ "phrase": "Hidden Gem", "keyword": keyword }),
        )
    };

    expect_status(send(&app.app, create(keyword.clone())).await, StatusCode::CREATED).await;
    let res = send(&app.app, create(keyword)).await;
    let body: Value = read_json(expect_status(res, StatusCode::CONFLICT).await).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn tag_creation_validates_phrase_and_user() {
    let app = spawn_app().await;
    let token = sign_in(&app).await;

    let res = send(
        &app.app,
        json_request(
            "POST",
            "/api/v1/tags",
            Some(&token),
            json!({ "phrase": "Okayest", "keyword": "Coffee" }),
        ),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::BAD_REQUEST).await).await;
    assert_eq!(body["message"], "Invalid phrase.");

    // A valid token for a user that never signed in.
    let stranger = super::helpers::token_for(&format!("stranger-{}", unique_suffix()));
    let res = send(
        &app.app,
        json_request(
            "POST",
            "/api/v1/tags",
            Some(&stranger),
            json!({ "phrase": "Best", "keyword": format!("k{}", unique_suffix()) }),
        ),
    )
    .await;
    expect_status(res, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn place_submission_rejects_unknown_and_duplicate_tags() {
    let app = spawn_app().await;
    let token = sign_in(&app).await;
    let tag = create_tag(&app, &token).await;

    let place_id = format!("ChIJ-test-{}", Uuid::now_v7().simple());
    let place = provider_place(&place_id, &format!("{} Lane", place_id), 18.5, 73.8);

    let res = send(
        &app.app,
        json_request(
            "POST",
            "/api/v1/places",
            Some(&token),
            json!({ "place": place, "tags": ["Best nothing-here"] }),
        ),
    )
    .await;
    expect_status(res, StatusCode::NOT_FOUND).await;

    let submit = || {
        json_request(
            "POST",
            "/api/v1/places",
            Some(&token),
            json!({ "place": place, "tags": [tag] }),
        )
    };
    expect_status(send(&app.app, submit()).await, StatusCode::CREATED).await;
    let res = send(&app.app, submit()).await;
    let body: Value = read_json(expect_status(res, StatusCode::CONFLICT).await).await;
    assert_eq!(body["message"], "One or more tags already exist for this place.");

    let res = send(
        &app.app,
        json_request(
            "POST",
            "/api/v1/places",
            Some(&token),
            json!({ "place": place, "tags": [" ", "<>"] }),
        ),
    )
    .await;
    expect_status(res, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn same_address_nearby_resolves_to_existing_place() {
    let app = spawn_app().await;
    let token = sign_in(&app).await;
    let first_tag = create_tag(&app, &token).await;
    let second_tag = create_tag(&app, &token).await;

    let address = format!("{} Resolution Road", unique_suffix());
    let first = provider_place(
        &format!("ChIJ-first-{}", Uuid::now_v7().simple()),
        &address,
        18.5,
        73.8,
    );
    let second = provider_place(
        &format!("ChIJ-second-{}", Uuid::now_v7().simple()),
        &address.to_uppercase(),
        18.50005,
        73.80005,
    );

    let res = send(
        &app.app,
        json_request(
            "POST",
            "/api/v1/places",
            Some(&token),
            json!({ "place": first, "tags": [first_tag] }),
        ),
    )
    .await;
    let first_body: Value = read_json(expect_status(res, StatusCode::CREATED).await).await;

    let res = send(
        &app.app,
        json_request(
            "POST",
            "/api/v1/places",
            Some(&token),
            json!({ "place": second, "tags": [second_tag] }),
        ),
    )
    .await;
    let second_body: Value = read_json(expect_status(res, StatusCode::CREATED).await).await;

    assert_eq!(first_body["data"]["id"], second_body["data"]["id"]);
    assert_eq!(second_body["data"]["tags"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn leaderboard_orders_by_score_and_sums_totals() {
    let app = spawn_app().await;
    let token = sign_in(&app).await;
    let tag = create_tag(&app, &token).await;
    let loved = add_place(&app, &token, &[&tag]).await;
    let disliked = add_place(&app, &token, &[&tag]).await;

    let voter = sign_in(&app).await;
    expect_status(vote(&app, &voter, &loved, &tag, "UP").await, StatusCode::OK).await;
    expect_status(vote(&app, &token, &loved, &tag, "UP").await, StatusCode::OK).await;
    expect_status(vote(&app, &voter, &disliked, &tag, "DOWN").await, StatusCode::OK).await;

    let uri = format!(
        "/api/v1/places?scope=country&country_code=in&page=1&tag={}",
        tag.replace(' ', "%20")
    );
    let res = send(&app.app, get_request(&uri, None)).await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    let items = body["data"]["items"].as_array().expect("items array");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["place_id"], loved.as_str());
    assert_eq!(items[0]["score"], 2);
    assert_eq!(items[0]["total_up_votes"], 2);
    assert_eq!(items[1]["place_id"], disliked.as_str());
    assert_eq!(items[1]["score"], -1);
    assert_eq!(items[1]["total_down_votes"], 1);
    assert_eq!(body["data"]["has_more"], false);
}

#[tokio::test]
async fn leaderboard_validates_query() {
    let app = spawn_app().await;

    for uri in [
        "/api/v1/places?scope=world&tag=Best%20Coffee&page=0",
        "/api/v1/places?scope=world&tag=B",
        "/api/v1/places?scope=city&country_code=IN&tag=Best%20Coffee",
        "/api/v1/places?scope=galaxy&tag=Best%20Coffee",
    ] {
        let res = send(&app.app, get_request(uri, None)).await;
        expect_status(res, StatusCode::BAD_REQUEST).await;
    }
}

#[tokio::test]
async fn city_scope_uses_radius() {
    let app = spawn_app().await;
    let token = sign_in(&app).await;
    let tag = create_tag(&app, &token).await;
    let place_id = add_place(&app, &token, &[&tag]).await;
    let encoded = tag.replace(' ', "%20");

    let near = format!(
        "/api/v1/places?scope=city&country_code=IN&lat=18.53&lng=73.86&tag={}",
        encoded
    );
    let res = send(&app.app, get_request(&near, None)).await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["data"]["items"][0]["place_id"], place_id.as_str());

    let far = format!(
        "/api/v1/places?scope=city&country_code=IN&lat=28.61&lng=77.21&tag={}",
        encoded
    );
    let res = send(&app.app, get_request(&far, None)).await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert!(body["data"]["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn tag_suggestions_match_case_insensitively() {
    let app = spawn_app().await;
    let token = sign_in(&app).await;
    let tag = create_tag(&app, &token).await;
    let fragment = tag[tag.len() - 8..].to_uppercase();

    let res = send(
        &app.app,
        get_request(&format!("/api/v1/tags/suggestions?q={}", fragment), Some(&token)),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(names, vec![tag.as_str()]);

    let res = send(&app.app, get_request("/api/v1/tags/suggestions?q=x", Some(&token))).await;
    expect_status(res, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn top_tags_count_places_in_scope() {
    let app = spawn_app().await;
    let token = sign_in(&app).await;
    let tag = create_tag(&app, &token).await;
    add_place(&app, &token, &[&tag]).await;

    let res = send(
        &app.app,
        get_request(
            "/api/v1/tags?scope=city&country_code=IN&lat=18.52&lng=73.85",
            None,
        ),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    let tags = body["data"].as_array().unwrap();
    assert!(tags.len() <= 25);
    assert!(tags.iter().all(|t| t["place_count"].as_i64().unwrap() >= 1));
}

#[tokio::test]
async fn place_details_pair_provider_and_stored_place() {
    let app = spawn_app().await;
    let token = sign_in(&app).await;
    let place_id = format!("{}{}", KNOWN_PROVIDER_PREFIX, Uuid::now_v7().simple());

    let res = send(
        &app.app,
        get_request(&format!("/api/v1/places/details?place_id={}", place_id), Some(&token)),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["data"]["provider"]["place_id"], place_id.as_str());
    assert!(body["data"]["stored"].is_null());

    let res = send(
        &app.app,
        get_request("/api/v1/places/details?place_id=ChIJ-unknown-place", Some(&token)),
    )
    .await;
    expect_status(res, StatusCode::NOT_FOUND).await;

    let res = send(
        &app.app,
        get_request("/api/v1/places/suggestions?q=blue&country_code=IN", Some(&token)),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}
