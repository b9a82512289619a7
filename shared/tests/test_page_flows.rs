#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use serde_json::json;
    use times_roman_shared::{
        article::{first_paragraph_text, DESCRIPTION_MAX_CHARS},
        articles::{
            fetch_article, fetch_category_articles, fetch_home_feed, fetch_related,
            record_view, search_articles, sort_articles, ArticleLookup, CategorySort,
            SearchOutcome,
        },
        cache::{QueryClient, QueryPolicy},
        engagement::{
            begin_like, commit_like, toggle_bookmark, Engagement, EngagementError, LikeState,
        },
        memory::{CallKind, MemoryBackend, RecordedCall},
        preferences::{KeyValueStorage, MemoryStorage, PreferenceKind, PreferenceStore},
        query::ARTICLES_TABLE,
        Article, ArticleRow, AuthStatus, BackendError, Category, User,
    };

    fn newsroom() -> MemoryBackend {
        MemoryBackend::with_rows(
            ARTICLES_TABLE,
            vec![
                json!({
                    "id": "pol-1",
                    "title": "Global Summit Addresses Climate Policy Reforms",
                    "content": "<p>World leaders have convened in Geneva.</p>",
                    "category": "Politics",
                    "date": "April 14, 2025",
                    "views": 950,
                    "likes": 12,
                    "created_at": "2025-04-14T08:00:00Z"
                }),
                json!({
                    "id": "pol-2",
                    "title": "Senate Debates Infrastructure Bill",
                    "excerpt": "Lawmakers split over funding.",
                    "category": "Politics",
                    "date": "April 10, 2025",
                    "views": 40,
                    "created_at": "2025-04-10T08:00:00Z"
                }),
                json!({
                    "id": "tech-1",
                    "title": "Quantum Chips Reach New Milestone",
                    "content": "<p>Researchers report a stable qubit array.</p>",
                    "category": "Technology",
                    "date": "April 12, 2025",
                    "views": 300,
                    "created_at": "2025-04-12T08:00:00Z"
                }),
            ],
        )
    }

    fn reader() -> AuthStatus {
        AuthStatus::Authenticated(User {
            id: "user-1".into(),
            email: Some("reader@example.com".into()),
        })
    }

    fn loaded(backend: &MemoryBackend, id: &str) -> Article {
        let row: ArticleRow =
            serde_json::from_value(backend.row(ARTICLES_TABLE, id).expect("seeded row"))
                .expect("row decodes");
        Article::from(row)
    }

    #[test]
    fn derived_descriptions_stay_within_limit() {
        let paragraphs = [
            "Short lead.".to_string(),
            "A much longer lead paragraph ".repeat(12),
            format!("{} end", "é".repeat(200)),
        ];
        for paragraph in paragraphs {
            let article = Article::from(ArticleRow {
                id: "x".into(),
                title: Some("Title".into()),
                category: Some("Science".into()),
                content: Some(format!("<h1>Head</h1><p>{}</p><p>Other</p>", paragraph)),
                ..ArticleRow::default()
            });
            let description = article.description();
            let source = first_paragraph_text(&article.content).expect("has a paragraph");
            assert!(description.chars().count() <= DESCRIPTION_MAX_CHARS);
            assert!(source.starts_with(description.trim_end_matches("...")));
        }

        let bare = Article::from(ArticleRow {
            id: "y".into(),
            title: Some("Rover Finds Ice".into()),
            category: Some("Science".into()),
            content: Some("plain text only".into()),
            ..ArticleRow::default()
        });
        let description = bare.description();
        assert!(description.contains("Rover Finds Ice") && description.contains("Science"));
    }

    #[tokio::test]
    async fn first_view_in_session_writes_incremented_count_once() {
        let backend = newsroom();
        let storage = MemoryStorage::new();
        let preferences = PreferenceStore::new(&storage);

        let ArticleLookup::Found(article) = fetch_article(&backend, "pol-1").await else {
            panic!("pol-1 is seeded");
        };
        assert_eq!(article.views, 950);
        assert_eq!(record_view(&backend, &preferences, &article).await, Some(951));

        let updates = backend.calls_of(CallKind::Update);
        assert_eq!(
            updates,
            vec![RecordedCall::Update {
                table: ARTICLES_TABLE.into(),
                filters: "id=eq.pol-1".into(),
                patch: json!({ "views": 951 }),
            }]
        );

        let ArticleLookup::Found(reloaded) = fetch_article(&backend, "pol-1").await else {
            panic!("pol-1 is seeded");
        };
        assert_eq!(record_view(&backend, &preferences, &reloaded).await, None);
        assert_eq!(backend.calls_of(CallKind::Update).len(), 1);
        assert!(preferences.is_set(PreferenceKind::Viewed, "pol-1"));
    }

    #[tokio::test]
    async fn failed_view_write_keeps_viewed_flag() {
        let backend = newsroom();
        let preferences = PreferenceStore::new(MemoryStorage::new());
        backend.fail_next(CallKind::Update, BackendError::Network("offline".into()));
        let article = loaded(&backend, "tech-1");
        assert_eq!(record_view(&backend, &preferences, &article).await, None);
        assert!(preferences.is_set(PreferenceKind::Viewed, "tech-1"));
        assert_eq!(loaded(&backend, "tech-1").views, 300);
    }

    #[tokio::test]
    async fn like_and_unlike_round_trip_through_backend() {
        let backend = newsroom();
        let preferences = PreferenceStore::new(MemoryStorage::new());
        let article = loaded(&backend, "pol-1");
        let start = LikeState::load(&preferences, &article.id, article.likes);

        let toggle = begin_like(&reader(), &preferences, &article.id, start).expect("signed in");
        let liked = commit_like(&backend, &preferences, &article.id, toggle)
            .await
            .expect("write succeeds");
        assert_eq!(liked, LikeState { liked: true, likes: 13 });
        assert_eq!(loaded(&backend, "pol-1").likes, 13);

        let toggle = begin_like(&reader(), &preferences, &article.id, liked).expect("signed in");
        let unliked = commit_like(&backend, &preferences, &article.id, toggle)
            .await
            .expect("write succeeds");
        assert_eq!(unliked, start);
        assert_eq!(loaded(&backend, "pol-1").likes, 12);
    }

    #[tokio::test]
    async fn failed_like_reverts_flag_and_count() {
        let backend = newsroom();
        let preferences = PreferenceStore::new(MemoryStorage::new());
        let start = LikeState::load(&preferences, "pol-1", 12);
        backend.fail_next(
            CallKind::Update,
            BackendError::Http {
                status: 500,
                message: "boom".into(),
            },
        );

        let toggle = begin_like(&reader(), &preferences, "pol-1", start).expect("signed in");
        assert!(preferences.is_set(PreferenceKind::Liked, "pol-1"));
        let err = commit_like(&backend, &preferences, "pol-1", toggle)
            .await
            .expect_err("write fails");

        assert!(matches!(err, EngagementError::Remote(_)));
        assert_eq!(toggle.previous, start);
        assert_eq!(LikeState::load(&preferences, "pol-1", toggle.previous.likes), start);
        assert_eq!(loaded(&backend, "pol-1").likes, 12);
    }

    #[tokio::test]
    async fn anonymous_engagement_changes_nothing() {
        let backend = newsroom();
        let storage = MemoryStorage::new();
        let preferences = PreferenceStore::new(&storage);
        let start = LikeState::load(&preferences, "pol-1", 12);

        assert_eq!(
            begin_like(&AuthStatus::Anonymous, &preferences, "pol-1", start),
            Err(EngagementError::SignInRequired(Engagement::Like))
        );
        assert_eq!(
            toggle_bookmark(&AuthStatus::Unknown, &preferences, "pol-1"),
            Err(EngagementError::SignInRequired(Engagement::Bookmark))
        );
        for kind in PreferenceKind::ALL {
            assert_eq!(storage.get_item(kind.storage_key()), None);
        }
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn bookmark_twice_restores_preferences() {
        let storage = MemoryStorage::new();
        storage.set_item("bookmarkedArticles", r#"{"tech-1":true}"#);
        let preferences = PreferenceStore::new(&storage);
        let before = preferences.read_map(PreferenceKind::Bookmarked);

        assert_eq!(toggle_bookmark(&reader(), &preferences, "pol-1"), Ok(true));
        assert_eq!(toggle_bookmark(&reader(), &preferences, "pol-1"), Ok(false));
        assert_eq!(preferences.read_map(PreferenceKind::Bookmarked), before);
    }

    #[tokio::test]
    async fn category_listing_sorts_client_side() {
        let backend = MemoryBackend::with_rows(
            ARTICLES_TABLE,
            vec![
                json!({ "id": "A", "category": "Business", "views": 10, "date": "2025-03-01" }),
                json!({ "id": "B", "category": "Business", "views": 50, "date": "2025-01-01" }),
                json!({ "id": "C", "category": "Business", "date": "2025-04-01" }),
                json!({ "id": "D", "category": "Health", "views": 99, "date": "2025-05-01" }),
            ],
        );
        let mut articles = fetch_category_articles(&backend, &Category::parse("business")).await;
        assert_eq!(articles.len(), 3);

        sort_articles(&mut articles, CategorySort::Popular);
        let popular: Vec<&str> = articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(popular, vec!["B", "A", "C"]);

        sort_articles(&mut articles, CategorySort::Latest);
        let latest: Vec<&str> = articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(latest, vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn blank_search_never_reaches_backend() {
        let backend = newsroom();
        assert_eq!(search_articles(&backend, "   ").await, SearchOutcome::Idle);
        assert!(backend.calls().is_empty());

        assert_eq!(search_articles(&backend, "volcano").await, SearchOutcome::NoResults);
        assert_eq!(backend.calls_of(CallKind::Select).len(), 1);

        let hits = search_articles(&backend, "QUBIT").await;
        let ids: Vec<&str> = hits.articles().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["tech-1"]);
    }

    #[tokio::test]
    async fn search_failure_reads_as_no_results() {
        let backend = newsroom();
        backend.fail_next(CallKind::Select, BackendError::Network("offline".into()));
        assert_eq!(search_articles(&backend, "summit").await, SearchOutcome::NoResults);
    }

    #[tokio::test]
    async fn missing_article_and_related_fallbacks() {
        let backend = newsroom();
        assert_eq!(fetch_article(&backend, "nope").await, ArticleLookup::NotFound);

        let article = loaded(&backend, "pol-1");
        let related = fetch_related(&backend, &article).await;
        let ids: Vec<&str> = related.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["pol-2"]);

        backend.fail_next(CallKind::Select, BackendError::Network("offline".into()));
        assert!(fetch_related(&backend, &article).await.is_empty());
    }

    #[tokio::test]
    async fn home_feed_through_query_cache() {
        let backend = Rc::new(newsroom());
        let client = QueryClient::new(backend.clone(), QueryPolicy::default());

        let feed = fetch_home_feed(&client).await;
        assert!(!feed.is_fallback);
        assert_eq!(feed.featured.id, "pol-1");
        let latest: Vec<&str> = feed.latest.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(latest, vec!["tech-1", "pol-2"]);
        assert_eq!(feed.sections.len(), 2);
        assert_eq!(feed.sections[0].category, Category::Politics);

        fetch_home_feed(&client).await;
        assert_eq!(backend.calls_of(CallKind::Select).len(), 1);
    }

    #[tokio::test]
    async fn unreachable_backend_shows_fallback_hero() {
        let backend = newsroom();
        backend.fail_next(CallKind::Select, BackendError::Network("offline".into()));
        let feed = fetch_home_feed(&backend).await;
        assert!(feed.is_fallback);
        assert_eq!(feed.featured.id, "featured-1");
    }
}
