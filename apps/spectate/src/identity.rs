use std::fmt;
use std::path::Path;

use crate::error::ConnectorError;

/// A `GameName#Tag` player identity, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity(String);

impl PlayerIdentity {
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Reads the identity written by the UI. Missing, unreadable and blank
    /// files are all `IdentityUnavailable`.
    pub async fn load(path: &Path) -> Result<Self, ConnectorError> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|err| {
            ConnectorError::IdentityUnavailable {
                path: path.to_path_buf(),
                reason: err.to_string(),
            }
        })?;
        Self::new(&raw).ok_or_else(|| ConnectorError::IdentityUnavailable {
            path: path.to_path_buf(),
            reason: "file is empty".into(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn url_encoded(&self) -> String {
        encode_identity(&self.0)
    }
}

impl fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escapes `#` so the tag survives as part of a query value instead of
/// starting a URL fragment. Everything else is left for the URL parser.
pub fn encode_identity(identity: &str) -> String {
    identity.replace('#', "%23")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::SystemTime;

    fn temp_file(name: &str, contents: Option<&str>) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("{name}-{nanos}.txt"));
        if let Some(contents) = contents {
            std::fs::write(&path, contents).unwrap();
        }
        path
    }

    #[test]
    fn encodes_every_hash() {
        assert_eq!(encode_identity("Faker#KR1"), "Faker%23KR1");
        assert_eq!(encode_identity("a#b#c"), "a%23b%23c");
    }

    #[test]
    fn leaves_strings_without_hash_alone() {
        for s in ["Faker", "Hide on bush", "Ünïcødé", ""] {
            assert_eq!(encode_identity(s), s);
        }
    }

    #[tokio::test]
    async fn loads_trimmed_identity() {
        let path = temp_file("player", Some("  Faker#KR1 \r\n"));
        let identity = PlayerIdentity::load(&path).await.unwrap();
        assert_eq!(identity.as_str(), "Faker#KR1");
        assert_eq!(identity.url_encoded(), "Faker%23KR1");
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let path = temp_file("player-missing", None);
        let err = PlayerIdentity::load(&path).await.unwrap_err();
        assert!(matches!(err, ConnectorError::IdentityUnavailable { .. }));
    }

    #[tokio::test]
    async fn blank_file_is_unavailable() {
        let path = temp_file("player-blank", Some(" \n\t "));
        let err = PlayerIdentity::load(&path).await.unwrap_err();
        match err {
            ConnectorError::IdentityUnavailable { reason, .. } => {
                assert_eq!(reason, "file is empty")
            }
            other => panic!("unexpected error {other:?}"),
        }
        std::fs::remove_file(path).unwrap();
    }
}
