pub mod role;
pub mod user;

pub use role::{RoleSummary, UserWithRoles};
pub use user::{ReportStatus, UserActiveStatus, UserReport, UserReportEntry, UserSummary};
