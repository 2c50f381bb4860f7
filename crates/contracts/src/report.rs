//! DispatchReport - aggregated outcome of one dispatch pass

use serde::{Deserialize, Serialize};

/// Tri-state result set of a dispatch pass.
///
/// Labels are config `type` strings in configuration order; duplicates are
/// preserved when the same type appears twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    /// Channels that confirmed delivery.
    pub ok: Vec<String>,
    /// Channels that were attempted and failed.
    pub fail: Vec<String>,
    /// Disabled or unrecognized channels, never attempted.
    pub skip: Vec<String>,
}

impl DispatchReport {
    /// True when no channel failed. An empty pass counts as success.
    pub fn all_succeeded(&self) -> bool {
        self.fail.is_empty()
    }

    /// True when nothing was attempted or skipped.
    pub fn is_empty(&self) -> bool {
        self.ok.is_empty() && self.fail.is_empty() && self.skip.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_success() {
        let report = DispatchReport::default();
        assert!(report.all_succeeded());
        assert!(report.is_empty());
    }

    #[test]
    fn any_failure_breaks_success() {
        let report = DispatchReport {
            ok: vec!["file".into()],
            fail: vec!["mail-client".into()],
            skip: vec![],
        };
        assert!(!report.all_succeeded());
        assert!(!report.is_empty());
    }

    #[test]
    fn serializes_with_ordered_keys() {
        let report = DispatchReport {
            ok: vec!["telegram_bot".into()],
            fail: vec![],
            skip: vec!["pager".into()],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"ok":["telegram_bot"],"fail":[],"skip":["pager"]}"#);
    }
}
