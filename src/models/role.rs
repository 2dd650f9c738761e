use serde::Serialize;

use crate::entities::{roles, users};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleSummary {
    pub role_id: i32,
    pub role_name: String,
    pub department_name: String,
}

impl From<roles::Model> for RoleSummary {
    fn from(model: roles::Model) -> Self {
        Self {
            role_id: model.role_id,
            role_name: model.role_name,
            department_name: model.department_name,
        }
    }
}

/// A user together with every role currently assigned to them.
#[derive(Debug, Clone, Serialize)]
pub struct UserWithRoles {
    pub user_id: i32,
    pub username: String,
    pub roles: Vec<RoleSummary>,
}

impl UserWithRoles {
    #[must_use]
    pub fn new(user: users::Model, roles: Vec<roles::Model>) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            roles: roles.into_iter().map(RoleSummary::from).collect(),
        }
    }
}
