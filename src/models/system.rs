use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Liveness report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

/// Build information of the running server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn version_parses_rfc3339_build_date() {
        let v: Version = serde_json::from_str(
            r#"{"version":"1.4.0","buildDate":"2024-11-02T10:15:00Z","commitHash":"9f1c2e"}"#,
        )
        .unwrap();
        assert_eq!(v.version.as_deref(), Some("1.4.0"));
        assert_eq!(v.build_date.map(|d| d.year()), Some(2024));

        let bare: Version = serde_json::from_str("{}").unwrap();
        assert_eq!(bare, Version::default());
    }
}
