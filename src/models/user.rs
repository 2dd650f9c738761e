use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::RoleSummary;
use crate::entities::{roles, users};

/// ISO-8601 rendering used for every `inactive_since` on the wire.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub inactive_since: Option<String>,
}

impl From<users::Model> for UserSummary {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            is_active: model.is_active(),
            inactive_since: model.inactive_since.as_ref().map(format_timestamp),
            username: model.username,
            email: model.email,
        }
    }
}

/// Result of flipping a user's activity flag.
#[derive(Debug, Clone, Serialize)]
pub struct UserActiveStatus {
    pub user_id: i32,
    pub username: String,
    pub is_active: bool,
    pub inactive_since: Option<String>,
}

impl From<users::Model> for UserActiveStatus {
    fn from(model: users::Model) -> Self {
        Self {
            user_id: model.id,
            is_active: model.is_active(),
            inactive_since: model.inactive_since.as_ref().map(format_timestamp),
            username: model.username,
        }
    }
}

/// Which users a report includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportStatus {
    #[default]
    All,
    Active,
    Inactive,
}

impl ReportStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// Activity filter handed to the store; `None` means no filter.
    #[must_use]
    pub const fn active_filter(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Active => Some(true),
            Self::Inactive => Some(false),
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownReportStatus(pub String);

impl fmt::Display for UnknownReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown report status '{}'", self.0)
    }
}

impl std::error::Error for UnknownReportStatus {}

impl FromStr for ReportStatus {
    type Err = UnknownReportStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(UnknownReportStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserReportEntry {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub roles: Vec<RoleSummary>,
    pub is_active: bool,
    pub inactive_since: Option<String>,
}

impl UserReportEntry {
    #[must_use]
    pub fn new(user: users::Model, roles: Vec<roles::Model>) -> Self {
        Self {
            id: user.id,
            is_active: user.is_active(),
            inactive_since: user.inactive_since.as_ref().map(format_timestamp),
            username: user.username,
            email: user.email,
            roles: roles.into_iter().map(RoleSummary::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserReport {
    pub total_users: usize,
    pub status_filter: String,
    pub users: Vec<UserReportEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn model(inactive_since: Option<DateTime<Utc>>) -> users::Model {
        users::Model {
            id: 7,
            username: "gale".to_string(),
            email: "gale@example.com".to_string(),
            password: "hash".to_string(),
            inactive_since,
        }
    }

    #[test]
    fn test_report_status_parsing() {
        assert_eq!("all".parse::<ReportStatus>().unwrap(), ReportStatus::All);
        assert_eq!(
            "active".parse::<ReportStatus>().unwrap(),
            ReportStatus::Active
        );
        assert_eq!(
            "inactive".parse::<ReportStatus>().unwrap(),
            ReportStatus::Inactive
        );
        assert!("invalid_status".parse::<ReportStatus>().is_err());
        assert!("Active".parse::<ReportStatus>().is_err());
        assert!("".parse::<ReportStatus>().is_err());
    }

    #[test]
    fn test_report_status_filters() {
        assert_eq!(ReportStatus::All.active_filter(), None);
        assert_eq!(ReportStatus::Active.active_filter(), Some(true));
        assert_eq!(ReportStatus::Inactive.active_filter(), Some(false));
        assert_eq!(ReportStatus::default(), ReportStatus::All);
    }

    #[test]
    fn test_active_status_from_model() {
        let status = UserActiveStatus::from(model(None));
        assert!(status.is_active);
        assert!(status.inactive_since.is_none());

        let ts = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();
        let status = UserActiveStatus::from(model(Some(ts)));
        assert!(!status.is_active);
        assert_eq!(
            status.inactive_since.as_deref(),
            Some("2026-03-01T12:30:00.000000Z")
        );
    }

    #[test]
    fn test_summary_never_exposes_password() {
        let json = serde_json::to_value(UserSummary::from(model(None))).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "gale");
    }
}
