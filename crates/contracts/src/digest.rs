//! Digest document model
//!
//! The input document comes in two mutually exclusive shapes, discriminated
//! by the presence of a top-level `categories` key. Classification happens
//! once, at deserialization; everything downstream sees an already-shaped
//! value and never mutates it.
//!
//! Parsing is deliberately lenient: apart from `title`/`url` on articles,
//! missing fields default to empty so a partially populated upstream digest
//! still produces a best-effort delivery.

use serde::{Deserialize, Deserializer};

/// Aggregated news digest, as produced by the upstream fetch stage.
#[derive(Debug, Clone)]
pub enum Digest {
    /// Upstream has already categorized the articles.
    Processed(ProcessedDigest),
    /// Raw fetch output, articles not yet categorized.
    Raw(RawDigest),
}

/// The `categories` key alone selects the shape. The selected shape is then
/// parsed as-is, so a malformed article inside either shape is a parse
/// error, never a silent fallthrough to the other shape.
impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Doc {
            categories: Option<Vec<Category>>,
            #[serde(default)]
            ghost_picks: Vec<Article>,
            #[serde(default = "default_hours")]
            hours: u32,
            #[serde(default)]
            count: usize,
            #[serde(default)]
            skipped_url: usize,
            #[serde(default)]
            skipped_topic: usize,
            #[serde(default)]
            articles: Vec<Article>,
        }

        let doc = Doc::deserialize(deserializer)?;
        Ok(match doc.categories {
            Some(categories) => Digest::Processed(ProcessedDigest {
                categories,
                ghost_picks: doc.ghost_picks,
            }),
            None => Digest::Raw(RawDigest {
                hours: doc.hours,
                count: doc.count,
                skipped_url: doc.skipped_url,
                skipped_topic: doc.skipped_topic,
                articles: doc.articles,
            }),
        })
    }
}

impl Digest {
    /// True if the digest carries upstream categorization.
    pub fn is_processed(&self) -> bool {
        matches!(self, Digest::Processed(_))
    }

    /// Article count: categorized total, or the fetch-stage count for raw
    /// digests (falling back to the article list when the count is absent).
    pub fn article_count(&self) -> usize {
        match self {
            Digest::Processed(processed) => processed.article_count(),
            Digest::Raw(raw) => raw.count.max(raw.articles.len()),
        }
    }
}

/// Categorized digest shape.
#[derive(Debug, Clone)]
pub struct ProcessedDigest {
    /// Presence of this field is what selects the processed shape.
    pub categories: Vec<Category>,

    /// Articles flagged as editorial candidates beyond normal categorization.
    pub ghost_picks: Vec<Article>,
}

impl ProcessedDigest {
    /// Total article count across categories (editorial candidates excluded).
    pub fn article_count(&self) -> usize {
        self.categories.iter().map(|c| c.articles.len()).sum()
    }
}

/// Raw fetch digest shape.
#[derive(Debug, Clone)]
pub struct RawDigest {
    /// Fetch window in hours.
    pub hours: u32,

    /// Article count reported by the fetch stage.
    pub count: usize,

    /// Articles dropped by URL filtering.
    pub skipped_url: usize,

    /// Articles dropped by topic filtering.
    pub skipped_topic: usize,

    pub articles: Vec<Article>,
}

impl RawDigest {
    /// Combined count of filtered-out articles.
    pub fn skipped(&self) -> usize {
        self.skipped_url + self.skipped_topic
    }
}

fn default_hours() -> u32 {
    24
}

/// One news item. `title` and `url` are required; their absence is a
/// malformed-input error at ingestion.
#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,

    /// Feed name the article came from.
    #[serde(default)]
    pub source: String,

    /// Publication date, free-form.
    #[serde(default)]
    pub published: String,

    /// Upstream annotation on why the article was selected.
    #[serde(default)]
    pub reason: String,
}

/// Named group of articles in a processed digest.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub articles: Vec<Article>,
}
