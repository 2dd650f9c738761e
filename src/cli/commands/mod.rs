mod report;
mod roles;

pub use report::cmd_report;
pub use roles::cmd_list_roles;
