use serde::{Deserialize, Serialize};

use super::osm::{Member, OsmId, Tags};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Aggregate classification of a restriction. Ordered so that the worst status compares highest.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Ok,
    Warning,
    Error,
}

impl Status {
    /// Reduces a finished issue list to the status of its most severe issue.
    pub fn aggregate(issues: &[Issue]) -> Status {
        issues
            .iter()
            .map(|issue| Status::from(issue.severity))
            .max()
            .unwrap_or(Status::Ok)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Warning => "warning",
            Status::Error => "error",
        }
    }
}

impl From<Severity> for Status {
    fn from(value: Severity) -> Self {
        match value {
            Severity::Warning => Status::Warning,
            Severity::Error => Status::Error,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Issue {
    pub code: String,
    pub message: String,
    pub severity: Severity,
}

impl Issue {
    pub fn error(code: &str, message: impl Into<String>) -> Issue {
        Issue {
            code: code.to_string(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(code: &str, message: impl Into<String>) -> Issue {
        Issue {
            code: code.to_string(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One relation after validation. `status` always equals the most severe issue and is only
/// ever derived from `issues`, including when read back from a cached report.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "StoredRestriction")]
pub struct ValidatedRestriction {
    pub id: OsmId,
    pub restriction_type: Option<String>,
    pub members: Vec<Member>,
    pub tags: Tags,
    issues: Vec<Issue>,
    status: Status,
    pub location: Option<Coordinates>,
}

impl ValidatedRestriction {
    pub fn new(
        id: OsmId,
        restriction_type: Option<String>,
        members: Vec<Member>,
        tags: Tags,
        issues: Vec<Issue>,
        location: Option<Coordinates>,
    ) -> ValidatedRestriction {
        let status = Status::aggregate(&issues);
        ValidatedRestriction {
            id,
            restriction_type,
            members,
            tags,
            issues,
            status,
            location,
        }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn has_issue(&self, code: &str) -> bool {
        self.issues.iter().any(|issue| issue.code == code)
    }
}

#[derive(Deserialize)]
struct StoredRestriction {
    id: OsmId,
    #[serde(default)]
    restriction_type: Option<String>,
    #[serde(default)]
    members: Vec<Member>,
    #[serde(default)]
    tags: Tags,
    #[serde(default)]
    issues: Vec<Issue>,
    #[serde(default)]
    location: Option<Coordinates>,
}

impl From<StoredRestriction> for ValidatedRestriction {
    fn from(value: StoredRestriction) -> Self {
        ValidatedRestriction::new(
            value.id,
            value.restriction_type,
            value.members,
            value.tags,
            value.issues,
            value.location,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn restriction(issues: Vec<Issue>) -> ValidatedRestriction {
        ValidatedRestriction::new(1, None, vec![], Tags::new(), issues, None)
    }

    #[test]
    fn status_is_ok_without_issues() {
        assert_eq!(restriction(vec![]).status(), Status::Ok);
    }

    #[test]
    fn status_is_warning_with_only_warnings() {
        let issues = vec![Issue::warning("a", "a"), Issue::warning("b", "b")];
        assert_eq!(restriction(issues).status(), Status::Warning);
    }

    #[test]
    fn status_is_error_when_any_error() {
        let issues = vec![Issue::warning("a", "a"), Issue::error("b", "b"), Issue::warning("c", "c")];
        assert_eq!(restriction(issues).status(), Status::Error);
    }

    #[test]
    fn serializes_flat_record() {
        let mut tags = Tags::new();
        tags.insert("type".into(), "restriction".into());
        let validated = ValidatedRestriction::new(
            7,
            Some("no_u_turn".into()),
            vec![],
            tags,
            vec![Issue::warning("nonexistent_member", "member from (id=1) not found in data")],
            Some(Coordinates { lat: 1.0, lon: 2.0 }),
        );

        let value = serde_json::to_value(&validated).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 7,
                "restriction_type": "no_u_turn",
                "members": [],
                "tags": {"type": "restriction"},
                "issues": [{
                    "code": "nonexistent_member",
                    "message": "member from (id=1) not found in data",
                    "severity": "warning"
                }],
                "status": "warning",
                "location": {"lat": 1.0, "lon": 2.0}
            })
        );
    }

    #[test]
    fn stored_status_is_recomputed() {
        let raw = r#"{
            "id": 9,
            "issues": [{"code": "missing_via_member", "message": "m", "severity": "error"}],
            "status": "ok"
        }"#;
        let validated: ValidatedRestriction = serde_json::from_str(raw).unwrap();
        assert_eq!(validated.status(), Status::Error);
        assert!(validated.has_issue("missing_via_member"));
        assert_eq!(validated.location, None);
    }
}
