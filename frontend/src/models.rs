//! Seed data for `--features mock` builds.

use serde_json::{json, Value};
use times_roman_shared::{memory::MemoryBackend, query::ARTICLES_TABLE};

pub const DEMO_EMAIL: &str = "reader@timesroman.app";
pub const DEMO_PASSWORD: &str = "times-roman";

const UNSPLASH: &str = "https://images.unsplash.com";

fn unsplash(photo: &str) -> String {
    format!("{}/{}?auto=format&fit=crop&q=80", UNSPLASH, photo)
}

#[allow(clippy::too_many_arguments, reason = "one row per call keeps the seed table readable")]
fn row(
    id: &str,
    title: &str,
    category: &str,
    date: &str,
    author: &str,
    photo: &str,
    paragraphs: &[&str],
    views: u64,
    likes: u64,
) -> Value {
    let content = paragraphs
        .iter()
        .map(|text| format!("<p>{}</p>", text))
        .collect::<Vec<_>>()
        .join("\n");
    json!({
        "id": id,
        "title": title,
        "content": content,
        "category": category,
        "date": date,
        "author": author,
        "image_url": unsplash(photo),
        "read_time": "4 min",
        "views": views,
        "likes": likes,
        "created_at": format!("{}T08:00:00Z", iso_day(date)),
    })
}

fn iso_day(date: &str) -> &'static str {
    match date {
        "April 14, 2025" => "2025-04-14",
        "April 13, 2025" => "2025-04-13",
        "April 12, 2025" => "2025-04-12",
        "April 10, 2025" => "2025-04-10",
        _ => "2025-04-09",
    }
}

fn seed_articles() -> Vec<Value> {
    vec![
        row(
            "featured-1",
            "AI Revolution in Journalism: How Machine Learning is Reshaping News Media",
            "Technology",
            "April 14, 2025",
            "Sarah Chen",
            "photo-1488590528505-98d2b5aba04b",
            &[
                "Newsrooms are adopting machine learning at every stage of reporting, from \
                 sifting public records to drafting routine market summaries.",
                "Editors say the tools free reporters for interviews and field work, while \
                 critics warn about opaque ranking and automated errors.",
            ],
            1250,
            78,
        ),
        row(
            "pol-1",
            "Global Summit Addresses Climate Policy Reforms",
            "Politics",
            "April 14, 2025",
            "James Wilson",
            "photo-1542601906990-b4d3fb778b09",
            &[
                "Delegations from 195 countries met in Geneva to negotiate steeper emission \
                 cuts for the end of the decade.",
                "A new financing mechanism for adaptation projects drew support from most \
                 major economies.",
            ],
            950,
            41,
        ),
        row(
            "bus-1",
            "Tech Giants Face New Regulatory Challenges",
            "Business",
            "April 13, 2025",
            "Michael Chang",
            "photo-1444653614773-995cb1ef9efa",
            &[
                "Regulators on three continents opened parallel reviews of app store fees and \
                 data sharing between subsidiaries.",
                "Analysts expect compliance costs to weigh on quarterly guidance.",
            ],
            610,
            22,
        ),
        row(
            "related-1",
            "Media Ethics in the Age of AI-Generated Content",
            "Technology",
            "April 12, 2025",
            "David Nguyen",
            "photo-1487058792275-0ad4aaf24ca7",
            &[
                "Press councils are drafting disclosure rules for stories written or edited \
                 with generative models.",
            ],
            430,
            19,
        ),
        row(
            "related-2",
            "Public Trust in Algorithmic News Selection Declining",
            "Technology",
            "April 10, 2025",
            "Lisa Moreno",
            "photo-1551288049-bebda4e38f71",
            &[
                "A new survey finds most readers prefer editors over feeds when choosing \
                 which headlines matter.",
            ],
            380,
            12,
        ),
        row(
            "related-3",
            "Small Newsrooms Embrace AI Tools to Compete with Media Giants",
            "Business",
            "April 9, 2025",
            "Robert Kim",
            "photo-1504711434969-e33886168f5c",
            &[
                "Local outlets are using transcription and translation services to cover \
                 council meetings they previously skipped.",
            ],
            275,
            9,
        ),
    ]
}

/// In-memory backend with the seed articles and one demo account.
pub fn mock_backend() -> MemoryBackend {
    let backend = MemoryBackend::with_rows(ARTICLES_TABLE, seed_articles());
    backend.add_account(DEMO_EMAIL, DEMO_PASSWORD);
    backend
}
