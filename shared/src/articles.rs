//! Data orchestration behind the home, category, search and article pages.
//!
//! Every function here takes the table client by reference and degrades to
//! an empty or fallback result instead of failing; the pages only decide
//! what to render.

use serde_json::json;

use crate::{
    article::{Article, ArticleRow},
    category::{Category, PREFERRED_HOME_ORDER},
    error::BackendError,
    preferences::{KeyValueStorage, PreferenceKind, PreferenceStore},
    query::{SelectQuery, UpdateQuery, ARTICLES_TABLE},
    remote::{select_one, select_rows, TableClient},
};

/// Articles shown in the "Latest News" strip after the featured one.
pub const HOME_LATEST_COUNT: usize = 4;
/// Articles per category block on the home page.
pub const HOME_SECTION_CAP: usize = 3;
pub const RELATED_LIMIT: usize = 3;

pub const FALLBACK_FEATURED_ID: &str = "featured-1";

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySection {
    pub category: Category,
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeFeed {
    pub featured: Article,
    pub latest: Vec<Article>,
    pub sections: Vec<CategorySection>,
    /// `true` when nothing could be loaded and `featured` is the stock
    /// article.
    pub is_fallback: bool,
}

/// Stand-in hero shown when the article table is empty or unreachable.
pub fn fallback_featured_article() -> Article {
    Article::from(ArticleRow {
        id: FALLBACK_FEATURED_ID.to_string(),
        title: Some(
            "AI Revolution in Journalism: How Machine Learning is Reshaping News Media".to_string(),
        ),
        excerpt: Some(
            "Machine learning algorithms are transforming how news is gathered, analyzed and \
             presented to audiences worldwide."
                .to_string(),
        ),
        category: Some(Category::Technology.title().to_string()),
        date: Some("April 14, 2025".to_string()),
        image_url: Some(
            "https://images.unsplash.com/photo-1488590528505-98d2b5aba04b?auto=format&fit=crop&q=80"
                .to_string(),
        ),
        ..ArticleRow::default()
    })
}

/// Group `articles` by category, keeping at most `cap` per group.
///
/// Groups appear in [`PREFERRED_HOME_ORDER`] first, then any other category
/// in the order it was first seen.
pub fn group_by_category(articles: &[Article], cap: usize) -> Vec<CategorySection> {
    let mut seen: Vec<CategorySection> = Vec::new();
    for article in articles {
        let category = article.category();
        let slug = category.slug();
        match seen.iter_mut().find(|section| section.category.slug() == slug) {
            Some(section) => {
                if section.articles.len() < cap {
                    section.articles.push(article.clone());
                }
            },
            None => seen.push(CategorySection {
                category,
                articles: vec![article.clone()],
            }),
        }
    }

    let mut ordered = Vec::with_capacity(seen.len());
    for preferred in PREFERRED_HOME_ORDER.iter() {
        if let Some(index) = seen.iter().position(|section| &section.category == preferred) {
            ordered.push(seen.remove(index));
        }
    }
    ordered.extend(seen);
    ordered
}

/// Split a newest-first article list into the home page blocks.
pub fn build_home_feed(articles: Vec<Article>) -> HomeFeed {
    let Some(featured) = articles.first().cloned() else {
        return HomeFeed {
            featured: fallback_featured_article(),
            latest: Vec::new(),
            sections: Vec::new(),
            is_fallback: true,
        };
    };
    let latest = articles
        .iter()
        .skip(1)
        .take(HOME_LATEST_COUNT)
        .cloned()
        .collect();
    let sections = group_by_category(&articles, HOME_SECTION_CAP);
    HomeFeed {
        featured,
        latest,
        sections,
        is_fallback: false,
    }
}

async fn fetch_articles<C>(client: &C, query: &SelectQuery) -> Result<Vec<Article>, BackendError>
where
    C: TableClient + ?Sized,
{
    let rows: Vec<ArticleRow> = select_rows(client, query).await?;
    Ok(rows.into_iter().map(Article::from).collect())
}

pub async fn fetch_home_feed<C: TableClient + ?Sized>(client: &C) -> HomeFeed {
    let query = SelectQuery::table(ARTICLES_TABLE).order_desc("created_at");
    match fetch_articles(client, &query).await {
        Ok(articles) => build_home_feed(articles),
        Err(err) => {
            tracing::warn!(error = %err, "home feed unavailable, showing fallback");
            build_home_feed(Vec::new())
        },
    }
}

/// Newest-first articles of one category. Errors yield an empty list.
pub async fn fetch_category_articles<C>(client: &C, category: &Category) -> Vec<Article>
where
    C: TableClient + ?Sized,
{
    let query = SelectQuery::table(ARTICLES_TABLE)
        .eq("category", category.title())
        .order_desc("created_at");
    fetch_articles(client, &query)
        .await
        .unwrap_or_else(|err| {
            tracing::warn!(category = %category, error = %err, "category listing failed");
            Vec::new()
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySort {
    #[default]
    Latest,
    Popular,
}

impl CategorySort {
    pub fn label(&self) -> &'static str {
        match self {
            CategorySort::Latest => "Latest",
            CategorySort::Popular => "Most Popular",
        }
    }
}

/// Stable in-place sort. `Latest` puts undated articles last.
pub fn sort_articles(articles: &mut [Article], sort: CategorySort) {
    match sort {
        CategorySort::Latest => {
            articles.sort_by_cached_key(|article| std::cmp::Reverse(article.published_at()));
        },
        CategorySort::Popular => {
            articles.sort_by(|a, b| b.views.cmp(&a.views));
        },
    }
}

/// Category listing as shown: the backend's `created_at desc` order until the
/// reader picks a sort.
pub fn arrange_articles(loaded: &[Article], chosen: Option<CategorySort>) -> Vec<Article> {
    let mut arranged = loaded.to_vec();
    if let Some(sort) = chosen {
        sort_articles(&mut arranged, sort);
    }
    arranged
}

/// Number of visible cards on the category page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disclosure {
    visible: usize,
}

impl Disclosure {
    pub const INITIAL: usize = 6;
    pub const STEP: usize = 3;

    pub fn new() -> Self {
        Disclosure {
            visible: Self::INITIAL,
        }
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn reveal_more(self) -> Self {
        Disclosure {
            visible: self.visible + Self::STEP,
        }
    }

    pub fn has_more(&self, total: usize) -> bool {
        total > self.visible
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..items.len().min(self.visible)]
    }
}

impl Default for Disclosure {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Blank query; nothing was requested.
    Idle,
    NoResults,
    Results(Vec<Article>),
}

impl SearchOutcome {
    pub fn articles(&self) -> &[Article] {
        match self {
            SearchOutcome::Results(articles) => articles,
            _ => &[],
        }
    }
}

/// Case-insensitive substring search over title, content and excerpt.
pub async fn search_articles<C>(client: &C, raw_query: &str) -> SearchOutcome
where
    C: TableClient + ?Sized,
{
    let term = raw_query.trim();
    if term.is_empty() {
        return SearchOutcome::Idle;
    }
    let query = SelectQuery::table(ARTICLES_TABLE).or_ilike(&["title", "content", "excerpt"], term);
    match fetch_articles(client, &query).await {
        Ok(articles) if articles.is_empty() => SearchOutcome::NoResults,
        Ok(articles) => SearchOutcome::Results(articles),
        Err(err) => {
            tracing::warn!(query = term, error = %err, "search failed");
            SearchOutcome::NoResults
        },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArticleLookup {
    Found(Article),
    NotFound,
}

pub async fn fetch_article<C: TableClient + ?Sized>(client: &C, id: &str) -> ArticleLookup {
    let query = SelectQuery::table(ARTICLES_TABLE).eq("id", id).single();
    match select_one::<ArticleRow, _>(client, query).await {
        Ok(row) => ArticleLookup::Found(Article::from(row)),
        Err(err) => {
            if !err.is_not_found() {
                tracing::warn!(article = id, error = %err, "article lookup failed");
            }
            ArticleLookup::NotFound
        },
    }
}

/// Up to [`RELATED_LIMIT`] other articles from the same category.
pub async fn fetch_related<C: TableClient + ?Sized>(client: &C, article: &Article) -> Vec<Article> {
    let query = SelectQuery::table(ARTICLES_TABLE)
        .eq("category", &article.category)
        .neq("id", &article.id)
        .limit(RELATED_LIMIT);
    fetch_articles(client, &query)
        .await
        .unwrap_or_else(|err| {
            tracing::warn!(article = %article.id, error = %err, "related articles unavailable");
            Vec::new()
        })
}

/// Count one view of `article` per browser. The article is flagged as
/// viewed before the remote write; returns the new count only when the
/// write succeeded.
///
/// The counter is written as an absolute value computed from the loaded
/// row, so concurrent readers can under-count.
pub async fn record_view<C, S>(
    client: &C,
    preferences: &PreferenceStore<S>,
    article: &Article,
) -> Option<u64>
where
    C: TableClient + ?Sized,
    S: KeyValueStorage,
{
    if !preferences.mark_once(PreferenceKind::Viewed, &article.id) {
        return None;
    }
    let views = article.views.saturating_add(1);
    let update = UpdateQuery::table(ARTICLES_TABLE, json!({ "views": views })).eq("id", &article.id);
    match client.update(&update).await {
        Ok(()) => Some(views),
        Err(err) => {
            tracing::error!(article = %article.id, error = %err, "failed to record view");
            None
        },
    }
}

/// Normalized category for a `/category/:categoryId` segment. Unknown
/// slugs keep their raw text.
pub fn category_from_slug(slug: &str) -> Category {
    Category::parse(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str, category: &str, date: &str, views: i64) -> Article {
        Article::from(ArticleRow {
            id: id.to_string(),
            title: Some(format!("Title {}", id)),
            category: Some(category.to_string()),
            date: Some(date.to_string()),
            views: Some(views),
            ..ArticleRow::default()
        })
    }

    fn ids(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn empty_feed_uses_fallback_hero() {
        let feed = build_home_feed(Vec::new());
        assert!(feed.is_fallback);
        assert_eq!(feed.featured.id, FALLBACK_FEATURED_ID);
        assert_eq!(feed.featured.category, "Technology");
        assert!(feed.latest.is_empty() && feed.sections.is_empty());
    }

    #[test]
    fn home_feed_splits_and_orders_sections() {
        let articles = vec![
            article("t1", "Technology", "April 14, 2025", 0),
            article("x1", "Travel", "April 13, 2025", 0),
            article("p1", "Politics", "April 12, 2025", 0),
            article("t2", "technology", "April 11, 2025", 0),
            article("t3", "Technology", "April 10, 2025", 0),
            article("t4", "Technology", "April 9, 2025", 0),
            article("h1", "Health", "April 8, 2025", 0),
        ];
        let feed = build_home_feed(articles);
        assert_eq!(feed.featured.id, "t1");
        assert_eq!(ids(&feed.latest), vec!["x1", "p1", "t2", "t3"]);

        let order: Vec<String> = feed
            .sections
            .iter()
            .map(|s| s.category.title().to_string())
            .collect();
        assert_eq!(order, vec!["Politics", "Technology", "Health", "Travel"]);
        assert_eq!(ids(&feed.sections[1].articles), vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn popular_and_latest_sorts() {
        let mut articles = vec![
            article("A", "Science", "April 1, 2025", 10),
            article("B", "Science", "March 3, 2025", 50),
            article("C", "Science", "April 20, 2025", 0),
        ];
        sort_articles(&mut articles, CategorySort::Popular);
        assert_eq!(ids(&articles), vec!["B", "A", "C"]);
        sort_articles(&mut articles, CategorySort::Latest);
        assert_eq!(ids(&articles), vec!["C", "A", "B"]);
    }

    #[test]
    fn latest_sort_puts_undated_last_and_is_stable() {
        let mut articles = vec![
            article("u1", "Science", "someday", 0),
            article("d1", "Science", "2025-01-01", 0),
            article("u2", "Science", "", 0),
            article("d2", "Science", "2025-01-01", 0),
        ];
        sort_articles(&mut articles, CategorySort::Latest);
        assert_eq!(ids(&articles), vec!["d1", "d2", "u1", "u2"]);
        assert_eq!(articles[2].published_at(), None);
    }

    #[test]
    fn listing_keeps_backend_order_until_a_sort_is_chosen() {
        let loaded = vec![
            article("newest-row", "Science", "someday", 3),
            article("older-row", "Science", "April 20, 2025", 9),
        ];
        assert_eq!(ids(&arrange_articles(&loaded, None)), vec!["newest-row", "older-row"]);
        assert_eq!(
            ids(&arrange_articles(&loaded, Some(CategorySort::Latest))),
            vec!["older-row", "newest-row"]
        );
        assert_eq!(
            ids(&arrange_articles(&loaded, Some(CategorySort::Popular))),
            vec!["older-row", "newest-row"]
        );
    }

    #[test]
    fn disclosure_reveals_in_steps() {
        let items: Vec<u32> = (0..10).collect();
        let disclosure = Disclosure::new();
        assert_eq!(disclosure.slice(&items).len(), 6);
        assert!(disclosure.has_more(items.len()));
        let disclosure = disclosure.reveal_more();
        assert_eq!(disclosure.slice(&items).len(), 9);
        let disclosure = disclosure.reveal_more();
        assert_eq!(disclosure.slice(&items).len(), 10);
        assert!(!disclosure.has_more(items.len()));
    }

    #[test]
    fn unknown_slug_keeps_raw_text() {
        assert_eq!(category_from_slug("politics"), Category::Politics);
        assert_eq!(category_from_slug("travel").title(), "travel");
    }
}
