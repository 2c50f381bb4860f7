//! # Integration Tests
//!
//! End-to-end tests across crate boundaries.
//!
//! Responsibilities:
//! - digest ingestion through rendering to delivery
//! - config loading driving a real dispatch pass
//! - report aggregation across mixed-outcome channel lists

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ChannelKind::File;
    }
}

#[cfg(test)]
mod e2e_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{Credentials, Digest};
    use dispatcher::{dispatch, Channels, CommandDelegate};
    use tempfile::tempdir;

    const RAW_DIGEST: &str = r#"{
        "hours": 24,
        "count": 2,
        "skipped_url": 0,
        "skipped_topic": 0,
        "articles": [
            {"title": "A", "url": "http://a", "source": "X"},
            {"title": "B", "url": "http://b", "source": "Y"}
        ]
    }"#;

    /// End-to-end: JSON document -> config-driven dispatch -> file on disk.
    #[tokio::test]
    async fn test_e2e_file_delivery() {
        let digest: Digest = serde_json::from_str(RAW_DIGEST).unwrap();

        let dir = tempdir().unwrap();
        let target = dir.path().join("digest.txt");
        let config_json = format!(
            r#"{{ "outputs": [ {{ "type": "file", "path": "{}", "content": "recap" }} ] }}"#,
            target.display()
        );
        let config = ConfigLoader::load_from_str(&config_json, ConfigFormat::Json).unwrap();

        let delegate = CommandDelegate::new(dir.path().join("tools"));
        let channels = Channels::new(&Credentials::default(), delegate);

        let report = dispatch(&channels, &config, None, &digest).await;
        assert_eq!(report.ok, vec!["file"]);
        assert!(report.all_succeeded());

        let written = std::fs::read_to_string(&target).unwrap();
        assert!(written.starts_with("*Tech digest - "));
        assert!(written.contains("2 articles (24h)"));
    }

    /// One failing channel does not stop the others, and the report keeps
    /// outcomes separated.
    #[tokio::test]
    async fn test_e2e_mixed_outcomes() {
        let digest: Digest = serde_json::from_str(RAW_DIGEST).unwrap();

        let dir = tempdir().unwrap();
        let target = dir.path().join("digest.md");
        let config_json = format!(
            r#"{{ "outputs": [
                {{ "type": "nextcloud", "path": "Digests/today.md" }},
                {{ "type": "pager" }},
                {{ "type": "mail-client", "enabled": false }},
                {{ "type": "file", "path": "{}" }}
            ] }}"#,
            target.display()
        );
        let config = ConfigLoader::load_from_str(&config_json, ConfigFormat::Json).unwrap();

        // No tools installed: nextcloud delegation must fail.
        let delegate = CommandDelegate::new(dir.path().join("tools"));
        let channels = Channels::new(&Credentials::default(), delegate);

        let report = dispatch(&channels, &config, None, &digest).await;
        assert_eq!(report.ok, vec!["file"]);
        assert_eq!(report.fail, vec!["nextcloud"]);
        assert_eq!(report.skip, vec!["pager", "mail-client"]);
        assert!(!report.all_succeeded());

        let written = std::fs::read_to_string(&target).unwrap();
        assert!(written.starts_with("# Tech digest - "));
        assert!(written.contains("## X"));
        assert!(written.contains("[A](http://a)"));
    }

    /// Profile selection replaces the default outputs entirely.
    #[tokio::test]
    async fn test_e2e_profile_dispatch() {
        let digest: Digest = serde_json::from_str(RAW_DIGEST).unwrap();

        let dir = tempdir().unwrap();
        let default_target = dir.path().join("default.md");
        let profile_target = dir.path().join("profile.md");
        let config_json = format!(
            r#"{{
                "outputs": [ {{ "type": "file", "path": "{}" }} ],
                "profiles": {{
                    "archive": [ {{ "type": "file", "path": "{}" }} ]
                }}
            }}"#,
            default_target.display(),
            profile_target.display()
        );
        let config = ConfigLoader::load_from_str(&config_json, ConfigFormat::Json).unwrap();

        let delegate = CommandDelegate::new(dir.path().join("tools"));
        let channels = Channels::new(&Credentials::default(), delegate);

        let report = dispatch(&channels, &config, Some("archive"), &digest).await;
        assert_eq!(report.ok, vec!["file"]);
        assert!(profile_target.exists());
        assert!(!default_target.exists());
    }

    /// A processed document flows through the same pipeline with its
    /// categorized rendering.
    #[tokio::test]
    async fn test_e2e_processed_digest() {
        let digest: Digest = serde_json::from_str(
            r#"{
                "categories": [
                    {"name": "ai", "articles": [{"title": "A", "url": "http://a"}]}
                ],
                "ghost_picks": [{"title": "G", "url": "http://g"}]
            }"#,
        )
        .unwrap();
        assert!(digest.is_processed());

        let dir = tempdir().unwrap();
        let target = dir.path().join("digest.md");
        let config_json = format!(
            r#"{{ "outputs": [ {{ "type": "file", "path": "{}" }} ] }}"#,
            target.display()
        );
        let config = ConfigLoader::load_from_str(&config_json, ConfigFormat::Json).unwrap();

        let delegate = CommandDelegate::new(dir.path().join("tools"));
        let channels = Channels::new(&Credentials::default(), delegate);

        let report = dispatch(&channels, &config, None, &digest).await;
        assert!(report.all_succeeded());

        let written = std::fs::read_to_string(&target).unwrap();
        assert!(written.contains("## ai"));
        assert!(written.contains("## Editorial candidates"));
        assert!(written.contains("[G](http://g)"));
    }
}
