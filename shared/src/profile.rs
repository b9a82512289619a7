use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::BackendError,
    query::{SelectQuery, UpsertQuery, PROFILES_TABLE},
    remote::{select_one, TableClient},
};

/// Row of the `profiles` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Profile of `user_id`, or `None` when the row does not exist yet.
pub async fn fetch_profile<C: TableClient + ?Sized>(
    client: &C,
    user_id: &str,
) -> Result<Option<Profile>, BackendError> {
    let query = SelectQuery::table(PROFILES_TABLE)
        .columns("id, username, avatar_url")
        .eq("id", user_id)
        .single();
    match select_one::<Profile, _>(client, query).await {
        Ok(profile) => Ok(Some(profile)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Insert or replace the profile row. An empty avatar URL is stored as
/// null.
pub async fn save_profile<C: TableClient + ?Sized>(
    client: &C,
    user_id: &str,
    username: &str,
    avatar_url: &str,
    now: DateTime<Utc>,
) -> Result<Profile, BackendError> {
    let avatar_url = avatar_url.trim();
    let profile = Profile {
        id: user_id.to_string(),
        username: Some(username.trim().to_string()),
        avatar_url: (!avatar_url.is_empty()).then(|| avatar_url.to_string()),
        updated_at: Some(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
    };
    let row = serde_json::to_value(&profile)?;
    client.upsert(&UpsertQuery::table(PROFILES_TABLE, row)).await?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::memory::MemoryBackend;

    #[tokio::test]
    async fn missing_profile_is_none() {
        let backend = MemoryBackend::new();
        assert_eq!(fetch_profile(&backend, "user-1").await, Ok(None));
    }

    #[tokio::test]
    async fn save_then_fetch() {
        let backend = MemoryBackend::new();
        let now = Utc
            .with_ymd_and_hms(2025, 4, 14, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        let saved = save_profile(&backend, "user-1", " ada ", "", now)
            .await
            .expect("upsert succeeds");
        assert_eq!(saved.avatar_url, None);
        assert_eq!(
            backend.row(PROFILES_TABLE, "user-1"),
            Some(json!({
                "id": "user-1",
                "username": "ada",
                "avatar_url": null,
                "updated_at": "2025-04-14T09:30:00.000Z"
            }))
        );

        let fetched = fetch_profile(&backend, "user-1").await.expect("fetch succeeds");
        assert_eq!(
            fetched,
            Some(Profile {
                id: "user-1".into(),
                username: Some("ada".into()),
                avatar_url: None,
                updated_at: None,
            })
        );
    }
}
