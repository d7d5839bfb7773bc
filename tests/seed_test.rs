use tracks_api::config::JwtConfig;
use tracks_api::db;
use tracks_api::infrastructure::AppState;
use tracks_api::seed;

async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db, JwtConfig::new("test-secret"))
}

#[tokio::test]
async fn test_seed_is_repeatable() {
    let state = setup_test_state().await;

    seed::seed_demo_data(&state).await.expect("first seed");
    seed::seed_demo_data(&state).await.expect("second seed");

    let users = state.user_repo.find_all().await.unwrap();
    assert_eq!(users.len(), 2);

    let tracks = state.track_repo.find_all(Default::default()).await.unwrap();
    assert_eq!(tracks.len(), 3);

    let likes = state.like_repo.find_all().await.unwrap();
    assert_eq!(likes.len(), 2);
}

#[tokio::test]
async fn test_seeded_users_can_log_in() {
    let state = setup_test_state().await;
    seed::seed_demo_data(&state).await.unwrap();

    let token = tracks_api::services::user_service::token_auth(
        state.user_repo.as_ref(),
        &state.jwt,
        "sdq",
        "sdq",
    )
    .await
    .expect("demo login");
    assert!(!token.is_empty());
}
