use crate::domain::{DomainError, TrackInput};
use crate::infrastructure::AppState;
use crate::services::user_service::{self, RegisterUser};

/// Demo accounts; password equals username
const DEMO_USERS: [(&str, &str); 2] = [("sdq", "sdq@example.com"), ("aline", "aline@example.com")];

const DEMO_TRACKS: [(&str, &str, &str); 3] = [
    (
        "yeah it is a really good song",
        "what more to say?",
        "https://example.com/tracks/good-song.mp3",
    ),
    (
        "Morning Drive",
        "Lo-fi beats for the commute",
        "https://example.com/tracks/morning-drive.mp3",
    ),
    (
        "Night Shift",
        "Ambient synth loop",
        "https://example.com/tracks/night-shift.ogg",
    ),
];

/// Insert demo users, tracks and likes. Safe to run more than once.
pub async fn seed_demo_data(state: &AppState) -> Result<(), DomainError> {
    // 1. Create Users
    let mut user_ids = Vec::with_capacity(DEMO_USERS.len());
    for (username, email) in DEMO_USERS {
        let user = match state.user_repo.find_by_username(username).await? {
            Some(existing) => existing,
            None => {
                user_service::create_user(
                    state.user_repo.as_ref(),
                    RegisterUser {
                        username: username.to_owned(),
                        password: username.to_owned(),
                        email: email.to_owned(),
                    },
                )
                .await?
            }
        };
        user_ids.push(user.id);
    }

    // 2. Create Tracks, alternating owners
    let mut track_ids = Vec::with_capacity(DEMO_TRACKS.len());
    for (i, (title, description, url)) in DEMO_TRACKS.into_iter().enumerate() {
        let owner = user_ids[i % user_ids.len()];
        let input = TrackInput {
            title: title.to_owned(),
            description: description.to_owned(),
            url: url.to_owned(),
        };
        let (track, _) = state.track_repo.get_or_create(input, Some(owner)).await?;
        track_ids.push(track.id);
    }

    // 3. Everyone likes the first track
    if let Some(&first) = track_ids.first() {
        for &user_id in &user_ids {
            state.like_repo.get_or_create(user_id, first).await?;
        }
    }

    tracing::info!(
        "Seeded {} users and {} tracks",
        user_ids.len(),
        track_ids.len()
    );
    Ok(())
}
