//! Full-digest renderer, styled HTML for mail clients.
//!
//! Content and grouping are identical to the markdown renderer; only the
//! surrounding markup differs. Every user-supplied field is escaped before
//! embedding — article titles come from untrusted external feeds.

use chrono::Utc;
use contracts::{Article, Digest};

use crate::group;

/// Render the full digest as a self-contained HTML document with inline
/// styles, suitable for the rich body of a mail.
pub fn html(digest: &Digest) -> String {
    let now = Utc::now().format("%d/%m/%Y %H:%M UTC");

    let mut sections = Vec::new();
    let count;

    match digest {
        Digest::Processed(processed) => {
            count = processed.article_count();
            for category in &processed.categories {
                if category.articles.is_empty() {
                    continue;
                }
                let rows: String = category.articles.iter().map(article_row).collect();
                sections.push(format!(
                    "<h2 style=\"font-family:sans-serif;font-size:15px;color:#1e293b;\
                     border-left:3px solid #2563eb;padding-left:10px;margin:24px 0 8px;\">{}</h2>\
                     <table style=\"width:100%;border-collapse:collapse;\
                     font-family:sans-serif;font-size:14px;\">{}</table>",
                    esc(&category.name),
                    rows
                ));
            }
            if !processed.ghost_picks.is_empty() {
                let rows: String = processed.ghost_picks.iter().map(pick_row).collect();
                sections.push(format!(
                    "<h2 style=\"font-family:sans-serif;font-size:15px;color:#92400e;\
                     border-left:3px solid #f59e0b;padding-left:10px;margin:24px 0 8px;\">\
                     Editorial candidates</h2>\
                     <table style=\"width:100%;border-collapse:collapse;font-family:sans-serif;\
                     font-size:14px;background:#fffbeb;border:1px solid #f59e0b40;\">{}</table>",
                    rows
                ));
            }
        }
        Digest::Raw(raw) => {
            count = if raw.count > 0 {
                raw.count
            } else {
                raw.articles.len()
            };
            for (source, articles) in group::by_source(&raw.articles) {
                let rows: String = articles.into_iter().map(raw_row).collect();
                sections.push(format!(
                    "<h2 style=\"font-family:sans-serif;font-size:14px;color:#334155;\
                     margin:20px 0 4px;\">{}</h2>\
                     <table style=\"width:100%;border-collapse:collapse;\
                     font-family:sans-serif;\">{}</table>",
                    esc(source),
                    rows
                ));
            }
        }
    }

    let body = if sections.is_empty() {
        "<p style='color:#888;font-family:sans-serif;'>No articles.</p>".to_string()
    } else {
        sections.join("\n")
    };

    format!(
        "<!DOCTYPE html>\n\
         <html><head><meta charset=\"utf-8\"></head>\n\
         <body style=\"margin:0;padding:0;background:#f8fafc;\">\n\
         <div style=\"max-width:800px;margin:0 auto;background:#fff;padding:32px;\
         font-family:sans-serif;\">\n\
         <div style=\"border-bottom:2px solid #2563eb;padding-bottom:12px;margin-bottom:24px;\">\n\
         <h1 style=\"font-size:18px;color:#1e293b;margin:0;\">Tech digest</h1>\n\
         <p style=\"color:#64748b;font-size:13px;margin:4px 0 0;\">{now} - {count} articles</p>\n\
         </div>\n{body}\n\
         <div style=\"border-top:1px solid #e2e8f0;margin-top:32px;padding-top:12px;\
         font-size:11px;color:#94a3b8;font-family:sans-serif;\">digest-relay</div>\n\
         </div>\n</body></html>"
    )
}

fn esc(s: &str) -> String {
    htmlescape::encode_minimal(s)
}

fn article_row(article: &Article) -> String {
    let reason = if article.reason.is_empty() {
        String::new()
    } else {
        format!(
            "<br><span style=\"color:#666;font-size:12px;\">{}</span>",
            esc(&article.reason)
        )
    };
    format!(
        "<tr>\
         <td style=\"padding:8px 12px;border-bottom:1px solid #eee;vertical-align:top;\
         width:100px;color:#888;font-size:12px;white-space:nowrap;\">{} {}</td>\
         <td style=\"padding:8px 12px;border-bottom:1px solid #eee;vertical-align:top;\">\
         <a href=\"{}\" style=\"color:#2563eb;text-decoration:none;font-weight:500;\">{}</a>\
         {}</td></tr>",
        esc(&article.source),
        esc(&article.published),
        esc(&article.url),
        esc(&article.title),
        reason
    )
}

fn pick_row(pick: &Article) -> String {
    format!(
        "<tr><td style=\"padding:8px 12px;border-bottom:1px solid #f59e0b30;\">\
         <a href=\"{}\" style=\"color:#d97706;font-weight:500;text-decoration:none;\">{}</a>\
         <br><span style=\"color:#666;font-size:12px;\">{} - {}</span></td></tr>",
        esc(&pick.url),
        esc(&pick.title),
        esc(&pick.source),
        esc(&pick.reason)
    )
}

fn raw_row(article: &Article) -> String {
    format!(
        "<tr><td style=\"padding:6px 12px;border-bottom:1px solid #eee;font-size:13px;\">\
         <a href=\"{}\" style=\"color:#2563eb;text-decoration:none;\">{}</a> \
         <span style=\"color:#999;font-size:12px;\">{}</span></td></tr>",
        esc(&article.url),
        esc(&article.title),
        esc(&article.published)
    )
}
