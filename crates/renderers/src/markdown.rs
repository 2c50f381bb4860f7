//! Full-digest renderer, structured text.

use chrono::Utc;
use contracts::{Article, Digest};

use crate::group;

/// Render the full digest as Markdown for durable storage or transports
/// that render structured markup natively.
pub fn markdown(digest: &Digest) -> String {
    let now = Utc::now().format("%Y-%m-%d %H:%M UTC");
    let mut lines = vec![format!("# Tech digest - {now}"), String::new()];

    match digest {
        Digest::Processed(processed) => {
            for category in &processed.categories {
                if category.articles.is_empty() {
                    continue;
                }
                lines.push(format!("## {}", category.name));
                lines.push(String::new());
                for article in &category.articles {
                    push_article(&mut lines, article);
                }
            }
            if !processed.ghost_picks.is_empty() {
                lines.push("## Editorial candidates".to_string());
                lines.push(String::new());
                for pick in &processed.ghost_picks {
                    lines.push(format!("- **[{}]({})**  ", pick.title, pick.url));
                    lines.push(format!("  *{}* - {}", pick.source, pick.reason));
                    lines.push(String::new());
                }
            }
        }
        Digest::Raw(raw) => {
            lines.push(format!(
                "*{} articles | {} filtered*",
                raw.articles.len(),
                raw.skipped()
            ));
            lines.push(String::new());
            for (source, articles) in group::by_source(&raw.articles) {
                lines.push(format!("## {source}"));
                lines.push(String::new());
                for article in articles {
                    lines.push(format!("- **[{}]({})**  ", article.title, article.url));
                    lines.push(format!("  *{}*", article.published));
                    lines.push(String::new());
                }
            }
        }
    }

    lines.join("\n")
}

fn push_article(lines: &mut Vec<String>, article: &Article) {
    lines.push(format!("- **[{}]({})**  ", article.title, article.url));
    lines.push(format!("  *{} - {}*  ", article.source, article.published));
    if !article.reason.is_empty() {
        lines.push(format!("  {}", article.reason));
    }
    lines.push(String::new());
}
