//! Short-form recap renderer.

use chrono::Utc;
use contracts::Digest;

/// Render a short plain-text summary sized for a chat notification.
///
/// Processed digests get the total count plus one line per non-empty
/// category; raw digests get the count/window line plus a filtered note.
pub fn recap(digest: &Digest) -> String {
    let now = Utc::now().format("%d/%m %H:%M");
    let mut lines = vec![format!("*Tech digest - {now}*")];

    match digest {
        Digest::Processed(processed) => {
            lines.push(format!("{} articles", processed.article_count()));
            for category in &processed.categories {
                let n = category.articles.len();
                if n > 0 {
                    lines.push(format!("- {}: {}", category.name, n));
                }
            }
            if !processed.ghost_picks.is_empty() {
                lines.push(format!(
                    "\n{} editorial candidate(s)",
                    processed.ghost_picks.len()
                ));
            }
        }
        Digest::Raw(raw) => {
            lines.push(format!("{} articles ({}h)", raw.count, raw.hours));
            if raw.skipped() > 0 {
                lines.push(format!("{} filtered", raw.skipped()));
            }
        }
    }

    lines.join("\n")
}
