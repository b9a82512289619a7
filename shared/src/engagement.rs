//! Like and bookmark actions on the article page.

use std::fmt;

use serde_json::json;
use thiserror::Error;

use crate::{
    error::BackendError,
    preferences::{KeyValueStorage, PreferenceKind, PreferenceStore},
    query::{UpdateQuery, ARTICLES_TABLE},
    remote::TableClient,
    session::AuthStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engagement {
    Like,
    Bookmark,
}

impl fmt::Display for Engagement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Engagement::Like => "like",
            Engagement::Bookmark => "bookmark",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngagementError {
    #[error("Please sign in to {0} articles")]
    SignInRequired(Engagement),

    #[error("Failed to update like status")]
    Remote(#[from] BackendError),
}

/// What the article page shows next to the heart icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeState {
    pub liked: bool,
    pub likes: u64,
}

impl LikeState {
    pub fn load<S: KeyValueStorage>(
        preferences: &PreferenceStore<S>,
        article_id: &str,
        likes: u64,
    ) -> Self {
        LikeState {
            liked: preferences.is_set(PreferenceKind::Liked, article_id),
            likes,
        }
    }

    /// Re-read the stored flag, keeping the count this view already shows.
    pub fn with_stored_flag<S: KeyValueStorage>(
        self,
        preferences: &PreferenceStore<S>,
        article_id: &str,
    ) -> Self {
        LikeState {
            liked: preferences.is_set(PreferenceKind::Liked, article_id),
            ..self
        }
    }

    fn flipped(self) -> Self {
        if self.liked {
            LikeState {
                liked: false,
                likes: self.likes.saturating_sub(1),
            }
        } else {
            LikeState {
                liked: true,
                likes: self.likes.saturating_add(1),
            }
        }
    }
}

/// An optimistic like flip: `next` is shown immediately, `previous` is
/// restored if the remote write fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeToggle {
    pub previous: LikeState,
    pub next: LikeState,
}

impl LikeToggle {
    pub fn success_message(&self) -> &'static str {
        if self.next.liked {
            "Thanks for your feedback!"
        } else {
            "Like removed"
        }
    }
}

fn require_user(status: &AuthStatus, action: Engagement) -> Result<(), EngagementError> {
    if status.is_authenticated() {
        Ok(())
    } else {
        Err(EngagementError::SignInRequired(action))
    }
}

/// Flip the stored like flag and the displayed count.
pub fn begin_like<S: KeyValueStorage>(
    status: &AuthStatus,
    preferences: &PreferenceStore<S>,
    article_id: &str,
    current: LikeState,
) -> Result<LikeToggle, EngagementError> {
    require_user(status, Engagement::Like)?;
    let next = current.flipped();
    preferences.set(PreferenceKind::Liked, article_id, next.liked);
    Ok(LikeToggle {
        previous: current,
        next,
    })
}

/// Persist `toggle.next.likes`. On failure the stored flag is put back and
/// the caller should display `toggle.previous`.
pub async fn commit_like<C, S>(
    client: &C,
    preferences: &PreferenceStore<S>,
    article_id: &str,
    toggle: LikeToggle,
) -> Result<LikeState, EngagementError>
where
    C: TableClient + ?Sized,
    S: KeyValueStorage,
{
    let update = UpdateQuery::table(ARTICLES_TABLE, json!({ "likes": toggle.next.likes }))
        .eq("id", article_id);
    match client.update(&update).await {
        Ok(()) => Ok(toggle.next),
        Err(err) => {
            tracing::error!(article = article_id, error = %err, "failed to update like count");
            preferences.set(PreferenceKind::Liked, article_id, toggle.previous.liked);
            Err(EngagementError::Remote(err))
        },
    }
}

/// Flip the bookmark flag; returns the new value.
pub fn toggle_bookmark<S: KeyValueStorage>(
    status: &AuthStatus,
    preferences: &PreferenceStore<S>,
    article_id: &str,
) -> Result<bool, EngagementError> {
    require_user(status, Engagement::Bookmark)?;
    Ok(preferences.toggle(PreferenceKind::Bookmarked, article_id))
}

pub fn bookmark_message(bookmarked: bool) -> &'static str {
    if bookmarked {
        "Article bookmarked!"
    } else {
        "Bookmark removed!"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{preferences::MemoryStorage, session::User};

    fn signed_in() -> AuthStatus {
        AuthStatus::Authenticated(User {
            id: "u-1".into(),
            email: Some("reader@example.com".into()),
        })
    }

    #[test]
    fn sign_in_required_messages() {
        assert_eq!(
            EngagementError::SignInRequired(Engagement::Like).to_string(),
            "Please sign in to like articles"
        );
        assert_eq!(
            EngagementError::SignInRequired(Engagement::Bookmark).to_string(),
            "Please sign in to bookmark articles"
        );
    }

    #[test]
    fn like_then_unlike_restores_count() {
        let store = PreferenceStore::new(MemoryStorage::new());
        let start = LikeState::load(&store, "pol-1", 7);
        let liked = begin_like(&signed_in(), &store, "pol-1", start).expect("signed in");
        assert_eq!(liked.next, LikeState { liked: true, likes: 8 });
        assert!(store.is_set(PreferenceKind::Liked, "pol-1"));

        let unliked = begin_like(&signed_in(), &store, "pol-1", liked.next).expect("signed in");
        assert_eq!(unliked.next, start);
        assert!(!store.is_set(PreferenceKind::Liked, "pol-1"));
    }

    #[test]
    fn flag_written_elsewhere_keeps_committed_count() {
        let store = PreferenceStore::new(MemoryStorage::new());
        let committed = LikeState { liked: true, likes: 8 };
        store.set(PreferenceKind::Liked, "pol-1", false);
        assert_eq!(
            committed.with_stored_flag(&store, "pol-1"),
            LikeState { liked: false, likes: 8 }
        );
    }

    #[test]
    fn unlike_at_zero_saturates() {
        let store = PreferenceStore::new(MemoryStorage::new());
        let toggle = begin_like(&signed_in(), &store, "a", LikeState { liked: true, likes: 0 })
            .expect("signed in");
        assert_eq!(toggle.next.likes, 0);
    }

    #[test]
    fn anonymous_bookmark_is_rejected_without_writes() {
        let storage = MemoryStorage::new();
        let store = PreferenceStore::new(&storage);
        let err = toggle_bookmark(&AuthStatus::Anonymous, &store, "pol-1");
        assert_eq!(err, Err(EngagementError::SignInRequired(Engagement::Bookmark)));
        assert_eq!(storage.get_item("bookmarkedArticles"), None);
    }
}
