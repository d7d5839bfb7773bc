use async_graphql::{Request, Response, Variables};
use serde_json::{Value, json};
use tracks_api::config::JwtConfig;
use tracks_api::db;
use tracks_api::domain::{NewUser, Viewer};
use tracks_api::graphql::{TracksSchema, build_schema};
use tracks_api::infrastructure::AppState;
use tracks_api::models::User;

// Helper to create a schema over a fresh in-memory database
async fn setup_schema() -> (AppState, TracksSchema) {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let state = AppState::new(db, JwtConfig::new("test-secret"));
    let schema = build_schema(state.clone());
    (state, schema)
}

async fn create_test_user(state: &AppState, username: &str) -> User {
    state
        .user_repo
        .create(NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: "$argon2id$dummy_hash".to_string(),
        })
        .await
        .expect("Failed to create user")
}

async fn execute(schema: &TracksSchema, viewer: Viewer, query: &str, vars: Value) -> Response {
    let request = Request::new(query)
        .variables(Variables::from_json(vars))
        .data(viewer);
    schema.execute(request).await
}

fn data(response: Response) -> Value {
    assert!(
        response.errors.is_empty(),
        "unexpected errors: {:?}",
        response.errors
    );
    response.data.into_json().expect("data is JSON")
}

fn error_code(response: &Response) -> Option<String> {
    let ext = response.errors.first()?.extensions.as_ref()?;
    match ext.get("code")? {
        async_graphql::Value::String(code) => Some(code.clone()),
        _ => None,
    }
}

const CREATE_TRACK: &str = r#"
    mutation($title: String!, $desc: String!, $url: String!) {
        createTrack(title: $title, description: $desc, url: $url) {
            track { id title description postedBy { username } }
        }
    }
"#;

fn track_vars(title: &str) -> Value {
    json!({ "title": title, "desc": "what more to say?", "url": "https://example.com/a.mp3" })
}

#[tokio::test]
async fn test_create_track_requires_login() {
    let (_state, schema) = setup_schema().await;

    let response = execute(&schema, Viewer::Anonymous, CREATE_TRACK, track_vars("Song")).await;

    assert_eq!(error_code(&response).as_deref(), Some("PERMISSION_DENIED"));
}

#[tokio::test]
async fn test_create_track_returns_owner_and_is_get_or_create() {
    let (state, schema) = setup_schema().await;
    let user = create_test_user(&state, "sdq").await;

    let first = data(
        execute(&schema, Viewer::User(user.clone()), CREATE_TRACK, track_vars("Song")).await,
    );
    let track = &first["createTrack"]["track"];
    assert_eq!(track["title"], "Song");
    assert_eq!(track["postedBy"]["username"], "sdq");

    let second = data(execute(&schema, Viewer::User(user), CREATE_TRACK, track_vars("Song")).await);
    assert_eq!(second["createTrack"]["track"]["id"], track["id"]);
}

#[tokio::test]
async fn test_update_track_by_non_owner_is_denied() {
    let (state, schema) = setup_schema().await;
    let owner = create_test_user(&state, "owner").await;
    let other = create_test_user(&state, "other").await;

    let created = data(execute(&schema, Viewer::User(owner), CREATE_TRACK, track_vars("Mine")).await);
    let track_id = created["createTrack"]["track"]["id"].clone();

    let response = execute(
        &schema,
        Viewer::User(other),
        r#"
        mutation($trackId: Int!) {
            updateTrack(trackId: $trackId, title: "x", description: "y", url: "https://example.com") {
                track { id }
            }
        }
        "#,
        json!({ "trackId": track_id }),
    )
    .await;

    assert_eq!(error_code(&response).as_deref(), Some("PERMISSION_DENIED"));
}

#[tokio::test]
async fn test_delete_track_by_owner() {
    let (state, schema) = setup_schema().await;
    let owner = create_test_user(&state, "owner").await;

    let created = data(
        execute(&schema, Viewer::User(owner.clone()), CREATE_TRACK, track_vars("Gone")).await,
    );
    let track_id = created["createTrack"]["track"]["id"].clone();

    let deleted = data(
        execute(
            &schema,
            Viewer::User(owner),
            "mutation($id: Int!) { deleteTrack(trackId: $id) { trackId } }",
            json!({ "id": track_id }),
        )
        .await,
    );
    assert_eq!(deleted["deleteTrack"]["trackId"], track_id);

    let lookup = execute(
        &schema,
        Viewer::Anonymous,
        "query($id: Int!) { track(id: $id) { id } }",
        json!({ "id": track_id }),
    )
    .await;
    assert_eq!(error_code(&lookup).as_deref(), Some("NOT_FOUND"));
}

#[tokio::test]
async fn test_tracks_search_query() {
    let (state, schema) = setup_schema().await;
    let user = create_test_user(&state, "sdq").await;

    for title in ["Morning Drive", "Night Shift", "Drive Home"] {
        data(execute(&schema, Viewer::User(user.clone()), CREATE_TRACK, track_vars(title)).await);
    }

    let result = data(
        execute(
            &schema,
            Viewer::Anonymous,
            "query($q: String) { tracks(search: $q) { title } }",
            json!({ "q": "DRIVE" }),
        )
        .await,
    );
    let tracks = result["tracks"].as_array().expect("tracks array");
    assert_eq!(tracks.len(), 2);
    assert!(
        tracks
            .iter()
            .all(|t| t["title"].as_str().unwrap().contains("Drive"))
    );

    let all = data(execute(&schema, Viewer::Anonymous, "{ tracks { id } }", json!({})).await);
    assert_eq!(all["tracks"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_like_and_counts() {
    let (state, schema) = setup_schema().await;
    let owner = create_test_user(&state, "owner").await;
    let fan = create_test_user(&state, "fan").await;

    let created = data(execute(&schema, Viewer::User(owner), CREATE_TRACK, track_vars("Hit")).await);
    let track_id = created["createTrack"]["track"]["id"].clone();

    let like_mutation = r#"
        mutation($id: Int!) {
            createLike(trackId: $id) {
                like { id }
                user { username }
                track { id likeCount }
            }
        }
    "#;

    let anonymous = execute(
        &schema,
        Viewer::Anonymous,
        like_mutation,
        json!({ "id": track_id }),
    )
    .await;
    assert_eq!(error_code(&anonymous).as_deref(), Some("PERMISSION_DENIED"));

    let first = data(
        execute(
            &schema,
            Viewer::User(fan.clone()),
            like_mutation,
            json!({ "id": track_id }),
        )
        .await,
    );
    assert_eq!(first["createLike"]["user"]["username"], "fan");
    assert_eq!(first["createLike"]["track"]["likeCount"], 1);

    let second = data(
        execute(
            &schema,
            Viewer::User(fan),
            like_mutation,
            json!({ "id": track_id }),
        )
        .await,
    );
    assert_eq!(second["createLike"]["like"]["id"], first["createLike"]["like"]["id"]);

    let likes = data(
        execute(
            &schema,
            Viewer::Anonymous,
            "{ likes { user { username } track { title } } }",
            json!({}),
        )
        .await,
    );
    assert_eq!(
        likes["likes"],
        json!([{ "user": { "username": "fan" }, "track": { "title": "Hit" } }])
    );
}

#[tokio::test]
async fn test_me_and_user_lookups() {
    let (state, schema) = setup_schema().await;
    let user = create_test_user(&state, "sdq").await;

    let anonymous = execute(&schema, Viewer::Anonymous, "{ me { id } }", json!({})).await;
    assert_eq!(error_code(&anonymous).as_deref(), Some("PERMISSION_DENIED"));

    let me = data(
        execute(
            &schema,
            Viewer::User(user.clone()),
            "{ me { id username email } }",
            json!({}),
        )
        .await,
    );
    assert_eq!(me["me"]["username"], "sdq");
    assert_eq!(me["me"]["email"], "sdq@example.com");

    let missing = execute(&schema, Viewer::Anonymous, "{ user(id: 999) { id } }", json!({})).await;
    assert_eq!(error_code(&missing).as_deref(), Some("NOT_FOUND"));

    let users = data(execute(&schema, Viewer::Anonymous, "{ users { username } }", json!({})).await);
    assert_eq!(users["users"], json!([{ "username": "sdq" }]));
}

#[tokio::test]
async fn test_create_user_and_token_flow() {
    let (_state, schema) = setup_schema().await;

    let created = data(
        execute(
            &schema,
            Viewer::Anonymous,
            r#"mutation { createUser(username: "sdq", password: "123456", email: "sdq@example.com") { user { id username } } }"#,
            json!({}),
        )
        .await,
    );
    assert_eq!(created["createUser"]["user"]["username"], "sdq");

    let duplicate = execute(
        &schema,
        Viewer::Anonymous,
        r#"mutation { createUser(username: "sdq", password: "x", email: "other@example.com") { user { id } } }"#,
        json!({}),
    )
    .await;
    assert_eq!(error_code(&duplicate).as_deref(), Some("BAD_USER_INPUT"));

    let bad_login = execute(
        &schema,
        Viewer::Anonymous,
        r#"mutation { tokenAuth(username: "sdq", password: "wrong") { token } }"#,
        json!({}),
    )
    .await;
    assert_eq!(error_code(&bad_login).as_deref(), Some("UNAUTHENTICATED"));

    let login = data(
        execute(
            &schema,
            Viewer::Anonymous,
            r#"mutation { tokenAuth(username: "sdq", password: "123456") { token } }"#,
            json!({}),
        )
        .await,
    );
    let token = login["tokenAuth"]["token"].as_str().expect("token").to_string();

    let verified = data(
        execute(
            &schema,
            Viewer::Anonymous,
            "mutation($t: String!) { verifyToken(token: $t) { username exp } }",
            json!({ "t": token }),
        )
        .await,
    );
    assert_eq!(verified["verifyToken"]["username"], "sdq");

    let refreshed = data(
        execute(
            &schema,
            Viewer::Anonymous,
            "mutation($t: String!) { refreshToken(token: $t) { token } }",
            json!({ "t": token }),
        )
        .await,
    );
    assert!(refreshed["refreshToken"]["token"].as_str().is_some());

    let garbage = execute(
        &schema,
        Viewer::Anonymous,
        r#"mutation { verifyToken(token: "not-a-token") { username } }"#,
        json!({}),
    )
    .await;
    assert_eq!(error_code(&garbage).as_deref(), Some("UNAUTHENTICATED"));
}

#[tokio::test]
async fn test_concurrent_duplicate_create_user_is_rejected_as_input_error() {
    let (state, schema) = setup_schema().await;
    let create = r#"mutation { createUser(username: "twin", password: "123456", email: "twin@example.com") { user { id } } }"#;

    let (a, b) = tokio::join!(
        execute(&schema, Viewer::Anonymous, create, json!({})),
        execute(&schema, Viewer::Anonymous, create, json!({})),
    );

    let codes: Vec<Option<String>> = [&a, &b].into_iter().map(error_code).collect();
    assert_eq!(codes.iter().filter(|code| code.is_none()).count(), 1);
    assert!(codes.contains(&Some("BAD_USER_INPUT".to_string())));

    let users = state.user_repo.find_all().await.unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_schema_hides_password_hash() {
    let (_state, schema) = setup_schema().await;
    let sdl = schema.sdl();

    assert!(sdl.contains("type TrackType"));
    assert!(sdl.contains("createTrack"));
    assert!(!sdl.contains("passwordHash"));
}
