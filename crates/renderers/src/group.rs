//! Shared grouping rules for the two full-digest renderers.

use contracts::Article;
use std::collections::BTreeMap;

/// Group raw articles by source name, sources sorted alphabetically.
/// Articles keep their input order within a group.
pub(crate) fn by_source(articles: &[Article]) -> Vec<(&str, Vec<&Article>)> {
    let mut groups: BTreeMap<&str, Vec<&Article>> = BTreeMap::new();
    for article in articles {
        let key = if article.source.is_empty() {
            "?"
        } else {
            article.source.as_str()
        };
        groups.entry(key).or_default().push(article);
    }
    groups.into_iter().collect()
}
