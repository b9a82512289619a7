//! Head metadata for each page: title, description and social previews.

use chrono::{DateTime, Utc};

use crate::{article::Article, category::Category};

pub const SITE_NAME: &str = "Times Roman";
pub const TWITTER_HANDLE: &str = "@timesroman";
pub const DEFAULT_TITLE: &str = "Times Roman - AI-Powered News";
pub const DEFAULT_DESCRIPTION: &str = "Next-generation AI-powered news platform delivering fresh, \
                                       unbiased perspectives on global events.";
pub const DEFAULT_OG_IMAGE: &str = "https://i.ibb.co/Z6ffRH7K/Timesromancir-logo.png";
pub const HOME_TITLE: &str = "Times Roman | Latest News and Articles";
pub const OG_IMAGE_WIDTH: u32 = 1200;
pub const OG_IMAGE_HEIGHT: u32 = 630;

/// Descriptions shorter than this get [`DESCRIPTION_SUFFIX`] appended, then
/// the site tagline if still short.
pub const MIN_DESCRIPTION_CHARS: usize = 120;
pub const DESCRIPTION_SUFFIX: &str =
    " Read more on Times Roman, the next-generation AI-powered news platform.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OgType {
    Website,
    Article,
}

impl OgType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OgType::Website => "website",
            OgType::Article => "article",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleMeta {
    pub published_time: String,
    pub author: String,
    pub section: String,
}

/// Everything written into `<head>` for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub image: String,
    pub og_type: OgType,
    /// Absolute URL; the current location when `None`.
    pub canonical: Option<String>,
    pub article: Option<ArticleMeta>,
}

impl Default for PageMeta {
    fn default() -> Self {
        PageMeta {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            image: DEFAULT_OG_IMAGE.to_string(),
            og_type: OgType::Website,
            canonical: None,
            article: None,
        }
    }
}

impl PageMeta {
    pub fn home() -> Self {
        PageMeta {
            title: HOME_TITLE.to_string(),
            ..PageMeta::default()
        }
    }

    pub fn category(category: &Category) -> Self {
        let description = match category.description() {
            "" => format!("Latest {} news and articles on {}.", category.title(), SITE_NAME),
            text => text.to_string(),
        };
        PageMeta {
            title: format!("{} | {}", category.title(), SITE_NAME),
            description,
            ..PageMeta::default()
        }
    }

    pub fn search(query: &str) -> Self {
        let query = query.trim();
        let title = if query.is_empty() {
            format!("Search | {}", SITE_NAME)
        } else {
            format!("Search results for \"{}\" | {}", query, SITE_NAME)
        };
        PageMeta {
            title,
            ..PageMeta::default()
        }
    }

    pub fn simple(title: &str) -> Self {
        PageMeta {
            title: format!("{} | {}", title, SITE_NAME),
            ..PageMeta::default()
        }
    }

    pub fn article(article: &Article, canonical: Option<String>, now: DateTime<Utc>) -> Self {
        PageMeta {
            title: format!("{} | {}", article.title, SITE_NAME),
            description: article.description(),
            image: article.image_url.clone(),
            og_type: OgType::Article,
            canonical,
            article: Some(ArticleMeta {
                published_time: article.published_time_iso(now),
                author: article.author.clone(),
                section: article.category.clone(),
            }),
        }
    }

    /// Description as written to the meta tags.
    pub fn padded_description(&self) -> String {
        pad_description(&self.description)
    }
}

/// Blank input pads the site default instead.
pub fn pad_description(description: &str) -> String {
    let mut padded = match description.trim() {
        "" => DEFAULT_DESCRIPTION.to_string(),
        _ => description.to_string(),
    };
    for filler in [DESCRIPTION_SUFFIX, DESCRIPTION_TAGLINE] {
        if padded.chars().count() >= MIN_DESCRIPTION_CHARS {
            break;
        }
        padded.push_str(filler);
    }
    padded
}

const DESCRIPTION_TAGLINE: &str = " Fresh, unbiased perspectives on global events, every day.";

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::article::ArticleRow;

    #[test]
    fn short_descriptions_are_padded() {
        let padded = pad_description("Markets rally.");
        assert!(padded.starts_with("Markets rally. Read more on Times Roman"));
        assert!(padded.chars().count() >= MIN_DESCRIPTION_CHARS);

        let long = "x".repeat(MIN_DESCRIPTION_CHARS);
        assert_eq!(pad_description(&long), long);

        let just_short = "y".repeat(MIN_DESCRIPTION_CHARS - 1);
        assert_eq!(pad_description(&just_short), format!("{}{}", just_short, DESCRIPTION_SUFFIX));
    }

    #[test]
    fn blank_descriptions_fall_back_to_the_site_default() {
        let padded = pad_description("  ");
        assert!(padded.starts_with(DEFAULT_DESCRIPTION));
        assert!(padded.chars().count() >= MIN_DESCRIPTION_CHARS);
    }

    #[test]
    fn article_meta_carries_section_and_time() {
        let article = Article::from(ArticleRow {
            id: "pol-1".into(),
            title: Some("Budget vote".into()),
            category: Some("Politics".into()),
            author: Some("Sarah Chen".into()),
            date: Some("April 14, 2025".into()),
            ..ArticleRow::default()
        });
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().expect("valid");
        let meta = PageMeta::article(&article, None, now);
        assert_eq!(meta.title, "Budget vote | Times Roman");
        assert_eq!(meta.og_type.as_str(), "article");
        assert_eq!(
            meta.article,
            Some(ArticleMeta {
                published_time: "2025-04-14T00:00:00.000Z".into(),
                author: "Sarah Chen".into(),
                section: "Politics".into(),
            })
        );
        assert!(meta.padded_description().contains("Budget vote"));
    }

    #[test]
    fn category_meta_uses_section_copy() {
        let meta = PageMeta::category(&Category::Health);
        assert_eq!(meta.title, "Health | Times Roman");
        assert!(meta.description.starts_with("Find valuable information"));
        let unknown = PageMeta::category(&Category::parse("travel"));
        assert_eq!(unknown.description, "Latest travel news and articles on Times Roman.");
    }
}
