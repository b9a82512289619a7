use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Excerpt length used when a row has no stored excerpt.
pub const LIST_EXCERPT_CHARS: usize = 120;
/// Upper bound of a derived description, ellipsis included.
pub const DESCRIPTION_MAX_CHARS: usize = 160;
pub const DEFAULT_READ_TIME: &str = "3 min";
pub const DEFAULT_AUTHOR: &str = "Times Roman Staff";
pub const FALLBACK_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1504711434969-e33886168f5c?auto=format&fit=crop&q=80";
pub const DEFAULT_AUTHOR_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?auto=format&fit=crop&q=80";

/// One row of the `articles` table as PostgREST returns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleRow {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub author_image: Option<String>,
    #[serde(default)]
    pub author_bio: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub read_time: Option<String>,
    #[serde(default)]
    pub views: Option<i64>,
    #[serde(default)]
    pub likes: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Normalized article used by every page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    /// Stored excerpt, or the first [`LIST_EXCERPT_CHARS`] characters of the
    /// plain-text content when none was stored.
    pub excerpt: String,
    /// HTML fragment.
    pub content: String,
    pub category: String,
    pub date: String,
    pub author: String,
    pub author_image: Option<String>,
    pub author_bio: Option<String>,
    pub image_url: String,
    pub read_time: String,
    pub views: u64,
    pub likes: u64,
    /// `true` when the row carried its own excerpt.
    pub has_stored_excerpt: bool,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        let content = row.content.unwrap_or_default();
        let stored_excerpt = row
            .excerpt
            .map(|excerpt| excerpt.trim().to_string())
            .filter(|excerpt| !excerpt.is_empty());
        let has_stored_excerpt = stored_excerpt.is_some();
        let excerpt = stored_excerpt
            .unwrap_or_else(|| take_chars(&html_to_text(&content), LIST_EXCERPT_CHARS));

        Article {
            id: row.id,
            title: row.title.unwrap_or_default(),
            excerpt,
            content,
            category: row.category.unwrap_or_default(),
            date: row.date.unwrap_or_default(),
            author: non_blank(row.author).unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            author_image: non_blank(row.author_image),
            author_bio: non_blank(row.author_bio),
            image_url: non_blank(row.image_url).unwrap_or_else(|| FALLBACK_IMAGE_URL.to_string()),
            read_time: non_blank(row.read_time).unwrap_or_else(|| DEFAULT_READ_TIME.to_string()),
            views: clamp_counter(row.views),
            likes: clamp_counter(row.likes),
            has_stored_excerpt,
        }
    }
}

impl Article {
    pub fn category(&self) -> Category {
        Category::parse(&self.category)
    }

    /// Description for social previews and the meta description tag.
    ///
    /// Stored excerpt when present, else the first paragraph of the content
    /// as plain text (at most [`DESCRIPTION_MAX_CHARS`]), else a sentence
    /// naming the title and category.
    pub fn description(&self) -> String {
        if self.has_stored_excerpt {
            return self.excerpt.clone();
        }
        match first_paragraph_text(&self.content) {
            Some(text) => truncate_with_ellipsis(&text, DESCRIPTION_MAX_CHARS),
            None => format!("Read about {} in our {} section.", self.title, self.category),
        }
    }

    /// `"3-5 min"` style label derived from the leading number of
    /// `read_time`. Returns the raw label when it has no usable number.
    pub fn read_time_range(&self) -> String {
        let digits: String = self
            .read_time
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        match digits.parse::<u32>().ok().and_then(|base| Some((base, base.checked_add(2)?))) {
            Some((low, high)) => format!("{}-{} min", low, high),
            None => self.read_time.clone(),
        }
    }

    pub fn author_bio_or_default(&self) -> String {
        self.author_bio
            .clone()
            .unwrap_or_else(|| format!("{} is a contributor at Times Roman.", self.author))
    }

    pub fn author_image_or_default(&self) -> String {
        self.author_image
            .clone()
            .unwrap_or_else(|| DEFAULT_AUTHOR_IMAGE_URL.to_string())
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_publication_date(&self.date)
    }

    /// RFC 3339 publication time for `article:published_time`; `now` when
    /// the date field cannot be parsed.
    pub fn published_time_iso(&self, now: DateTime<Utc>) -> String {
        self.published_at()
            .unwrap_or(now)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn clamp_counter(value: Option<i64>) -> u64 {
    value.map(|v| v.max(0) as u64).unwrap_or(0)
}

/// Parse the human-readable `date` column.
///
/// Accepts RFC 3339 timestamps, ISO dates and the `April 14, 2025` /
/// `14 April 2025` / `04/14/2025` styles editors use.
pub fn parse_publication_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed.and_utc());
    }
    const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%B %d, %Y", "%B %d %Y", "%d %B %Y", "%m/%d/%Y"];
    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(trimmed, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|datetime| datetime.and_utc())
    })
}

/// Plain text of the first `<p>` element, whitespace collapsed.
/// `None` when there is no paragraph or it holds no text.
pub fn first_paragraph_text(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let mut cursor = 0;
    while let Some(offset) = lower[cursor..].find("<p") {
        let start = cursor + offset;
        let next = lower.as_bytes().get(start + 2).copied();
        if matches!(next, Some(b'>')) || next.is_some_and(|b| b.is_ascii_whitespace()) {
            let open_end = start + lower[start..].find('>')? + 1;
            let close = lower[open_end..]
                .find("</p>")
                .map(|idx| open_end + idx)
                .unwrap_or(lower.len());
            let text = html_to_text(&html[open_end..close]);
            return if text.is_empty() { None } else { Some(text) };
        }
        cursor = start + 2;
    }
    None
}

/// Strip every tag from an HTML fragment and decode the entities the
/// sanitizer re-escapes.
pub fn html_to_text(html: &str) -> String {
    let cleaned = ammonia::Builder::empty().clean(html).to_string();
    let decoded = cleaned
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    normalize_whitespace(&decoded)
}

pub fn normalize_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn take_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

/// Cut `value` to at most `max_chars` characters, the last three being
/// `...` when anything was dropped.
pub fn truncate_with_ellipsis(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut out = take_chars(value, max_chars.saturating_sub(3));
    out.push_str("...");
    out
}

/// Initials for the avatar fallback, e.g. `"Sarah Chen"` → `"SC"`.
pub fn author_initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn row(id: &str) -> ArticleRow {
        ArticleRow {
            id: id.to_string(),
            title: Some("Global Summit Addresses Climate Policy Reforms".into()),
            category: Some("Politics".into()),
            ..ArticleRow::default()
        }
    }

    #[test]
    fn missing_columns_get_defaults() {
        let article = Article::from(ArticleRow {
            views: Some(-4),
            ..row("pol-1")
        });
        assert_eq!(article.author, DEFAULT_AUTHOR);
        assert_eq!(article.read_time, DEFAULT_READ_TIME);
        assert_eq!(article.image_url, FALLBACK_IMAGE_URL);
        assert_eq!(article.views, 0);
        assert_eq!(article.likes, 0);
        assert!(article.excerpt.is_empty());
    }

    #[test]
    fn list_excerpt_falls_back_to_content_text() {
        let body = "word ".repeat(60);
        let article = Article::from(ArticleRow {
            content: Some(format!("<p>{}</p>", body)),
            excerpt: Some("   ".into()),
            ..row("pol-1")
        });
        assert!(!article.has_stored_excerpt);
        assert_eq!(article.excerpt.chars().count(), LIST_EXCERPT_CHARS);
        assert!(!article.excerpt.contains('<'));
    }

    #[test]
    fn description_prefers_stored_excerpt() {
        let article = Article::from(ArticleRow {
            excerpt: Some("Leaders meet in Geneva.".into()),
            content: Some("<p>Something else entirely.</p>".into()),
            ..row("pol-1")
        });
        assert_eq!(article.description(), "Leaders meet in Geneva.");
    }

    #[test]
    fn description_uses_first_paragraph_within_limit() {
        let long = "World leaders have convened this week in Geneva for the annual Climate Action \
                    Summit, where ambitious new targets for carbon emissions reduction by 2030 \
                    were the central focus of discussions.";
        let article = Article::from(ArticleRow {
            content: Some(format!("<h2>Intro</h2>\n<p class=\"lead\">{}</p><p>Second.</p>", long)),
            ..row("pol-1")
        });
        let description = article.description();
        assert!(description.chars().count() <= DESCRIPTION_MAX_CHARS);
        assert!(description.ends_with("..."));
        assert!(long.starts_with(description.trim_end_matches("...")));
    }

    #[test]
    fn short_paragraph_is_kept_verbatim() {
        let article = Article::from(ArticleRow {
            content: Some("<P>Rates &amp; <b>markets</b>   calm.</P>".into()),
            ..row("biz-1")
        });
        assert_eq!(article.description(), "Rates & markets calm.");
    }

    #[test]
    fn description_template_without_paragraphs() {
        let article = Article::from(ArticleRow {
            content: Some("<div>No paragraphs here</div><pre>code</pre>".into()),
            ..row("pol-1")
        });
        assert_eq!(
            article.description(),
            "Read about Global Summit Addresses Climate Policy Reforms in our Politics section."
        );
    }

    #[test]
    fn publication_dates_in_editor_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 4, 14, 0, 0, 0).single();
        assert_eq!(parse_publication_date("April 14, 2025"), expected);
        assert_eq!(parse_publication_date("2025-04-14"), expected);
        assert_eq!(parse_publication_date("14 April 2025"), expected);
        assert_eq!(parse_publication_date("Apr 14, 2025"), expected);
        assert_eq!(parse_publication_date("yesterday"), None);
    }

    #[test]
    fn published_time_defaults_to_now() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).single().unwrap_or_default();
        let article = Article::from(ArticleRow {
            date: Some("sometime soon".into()),
            ..row("pol-1")
        });
        assert_eq!(article.published_time_iso(now), "2026-01-02T03:04:05.000Z");

        let dated = Article::from(ArticleRow {
            date: Some("April 14, 2025".into()),
            ..row("pol-1")
        });
        assert_eq!(dated.published_time_iso(now), "2025-04-14T00:00:00.000Z");
    }

    #[test]
    fn read_time_range_and_initials() {
        let mut article = Article::from(row("pol-1"));
        article.read_time = "5 min".into();
        assert_eq!(article.read_time_range(), "5-7 min");
        article.read_time = "quick".into();
        assert_eq!(article.read_time_range(), "quick");
        article.read_time = "4294967295 min".into();
        assert_eq!(article.read_time_range(), "4294967295 min");
        article.read_time = "99999999999 min".into();
        assert_eq!(article.read_time_range(), "99999999999 min");
        assert_eq!(author_initials("Sarah Chen"), "SC");
        assert_eq!(author_initials("  "), "");
    }
}
