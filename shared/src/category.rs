use std::fmt;

/// Editorial section an article belongs to.
///
/// Labels coming from the backend are free text; [`Category::parse`] matches
/// them case-insensitively and keeps anything unrecognised as
/// [`Category::Other`], which renders with the default accent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Politics,
    Technology,
    Business,
    Science,
    Health,
    Entertainment,
    Sports,
    Other(String),
}

/// Section order on the home page. Categories not listed here are appended
/// in the order they first appear.
pub const PREFERRED_HOME_ORDER: [Category; 5] = [
    Category::Politics,
    Category::Technology,
    Category::Business,
    Category::Health,
    Category::Entertainment,
];

/// Sections linked from the navbar and footer.
pub const NAV_CATEGORIES: [Category; 6] = [
    Category::Politics,
    Category::Technology,
    Category::Business,
    Category::Science,
    Category::Health,
    Category::Entertainment,
];

impl Category {
    /// Parse a label or URL slug. Never fails.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "politics" => Category::Politics,
            "technology" | "tech" => Category::Technology,
            "business" => Category::Business,
            "science" => Category::Science,
            "health" => Category::Health,
            "entertainment" => Category::Entertainment,
            "sports" => Category::Sports,
            _ => Category::Other(trimmed.to_string()),
        }
    }

    /// Display title, also the value stored in the `category` column.
    pub fn title(&self) -> &str {
        match self {
            Category::Politics => "Politics",
            Category::Technology => "Technology",
            Category::Business => "Business",
            Category::Science => "Science",
            Category::Health => "Health",
            Category::Entertainment => "Entertainment",
            Category::Sports => "Sports",
            Category::Other(label) => label.as_str(),
        }
    }

    /// Lower-case path segment used by `/category/:categoryId`.
    pub fn slug(&self) -> String {
        self.title().to_ascii_lowercase()
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }

    /// Intro paragraph on the category page. Empty for unknown sections.
    pub fn description(&self) -> &'static str {
        match self {
            Category::Politics => {
                "Stay informed with the latest political developments, policy changes, and \
                 governance updates from around the world."
            },
            Category::Technology => {
                "Discover cutting-edge innovations, digital trends, and tech industry news that \
                 are shaping our future."
            },
            Category::Business => {
                "Track market movements, corporate strategies, and economic shifts that impact \
                 the global business landscape."
            },
            Category::Science => {
                "Explore the latest discoveries, research breakthroughs, and scientific \
                 advancements across various disciplines."
            },
            Category::Health => {
                "Find valuable information on medical research, wellness trends, and healthcare \
                 developments for a healthier lifestyle."
            },
            Category::Entertainment => {
                "Keep up with the latest in movies, music, television, celebrity news, and \
                 cultural phenomena."
            },
            Category::Sports => {
                "Scores, transfers, and the stories behind the games from every major league."
            },
            Category::Other(_) => "",
        }
    }

    /// Background class of the small category pill on cards and headers.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Category::Politics => "bg-red-600",
            Category::Technology => "bg-blue-600",
            Category::Business => "bg-green-600",
            Category::Science => "bg-cyan-600",
            Category::Health => "bg-purple-600",
            Category::Entertainment => "bg-pink-600",
            Category::Sports => "bg-orange-600",
            Category::Other(_) => "bg-gray-600",
        }
    }

    /// Gradient stops of the category page header.
    pub fn header_gradient(&self) -> &'static str {
        match self {
            Category::Technology => "from-purple-600 to-indigo-600",
            Category::Business => "from-emerald-600 to-teal-600",
            Category::Politics => "from-indigo-600 to-blue-600",
            Category::Health => "from-orange-600 to-amber-600",
            Category::Science => "from-cyan-600 to-sky-600",
            Category::Entertainment => "from-pink-600 to-rose-600",
            Category::Sports | Category::Other(_) => "from-gray-700 to-gray-900",
        }
    }

    /// Background of the category block on the home page.
    pub fn section_gradient(&self) -> &'static str {
        match self {
            Category::Technology => "gradient-bg-1",
            Category::Business => "gradient-bg-2",
            Category::Health => "gradient-bg-3",
            Category::Politics => "gradient-bg-4",
            Category::Entertainment => "gradient-bg-5",
            Category::Science => "gradient-bg-6",
            Category::Sports | Category::Other(_) => "",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::Category;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Category::parse("POLITICS"), Category::Politics);
        assert_eq!(Category::parse(" technology "), Category::Technology);
        assert_eq!(Category::parse("Health"), Category::Health);
    }

    #[test]
    fn unknown_label_keeps_text_and_default_accent() {
        let category = Category::parse("Travel");
        assert_eq!(category, Category::Other("Travel".to_string()));
        assert_eq!(category.title(), "Travel");
        assert_eq!(category.badge_class(), "bg-gray-600");
        assert_eq!(category.header_gradient(), "from-gray-700 to-gray-900");
        assert_eq!(category.description(), "");
        assert!(!category.is_known());
    }

    #[test]
    fn slug_round_trips_through_parse() {
        for category in super::NAV_CATEGORIES.iter() {
            assert_eq!(&Category::parse(&category.slug()), category);
        }
    }
}
