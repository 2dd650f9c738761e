use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, sea_query::OnConflict,
};

use crate::db::is_unique_violation;
use crate::entities::{prelude::*, roles, user_roles};

pub struct RoleRepository {
    conn: DatabaseConnection,
}

impl RoleRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Returns `None` when the `(role_name, department_name)` pair exists.
    pub async fn insert(
        &self,
        role_name: &str,
        department_name: &str,
    ) -> Result<Option<roles::Model>> {
        let active = roles::ActiveModel {
            role_name: Set(role_name.to_string()),
            department_name: Set(department_name.to_string()),
            ..Default::default()
        };

        match active.insert(&self.conn).await {
            Ok(model) => Ok(Some(model)),
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(e).context("Failed to insert role"),
        }
    }

    pub async fn get(&self, role_id: i32) -> Result<Option<roles::Model>> {
        Roles::find_by_id(role_id)
            .one(&self.conn)
            .await
            .context("Failed to query role by ID")
    }

    pub async fn find_by_name_and_department(
        &self,
        role_name: &str,
        department_name: &str,
    ) -> Result<Option<roles::Model>> {
        Roles::find()
            .filter(roles::Column::RoleName.eq(role_name))
            .filter(roles::Column::DepartmentName.eq(department_name))
            .one(&self.conn)
            .await
            .context("Failed to query role by name and department")
    }

    pub async fn list_all(&self) -> Result<Vec<roles::Model>> {
        Roles::find()
            .order_by_asc(roles::Column::DepartmentName)
            .order_by_asc(roles::Column::RoleName)
            .all(&self.conn)
            .await
            .context("Failed to list roles")
    }

    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<roles::Model>> {
        Roles::find()
            .join(JoinType::InnerJoin, roles::Relation::UserRoles.def())
            .filter(user_roles::Column::UserId.eq(user_id))
            .order_by_asc(roles::Column::DepartmentName)
            .order_by_asc(roles::Column::RoleName)
            .all(&self.conn)
            .await
            .context("Failed to list roles for user")
    }

    #[cfg(test)]
    pub async fn is_assigned(&self, user_id: i32, role_id: i32) -> Result<bool> {
        let row = UserRoles::find_by_id((user_id, role_id))
            .one(&self.conn)
            .await
            .context("Failed to query user role")?;
        Ok(row.is_some())
    }

    /// Returns `true` if a new association row was written; an existing
    /// pair is left untouched.
    pub async fn assign(&self, user_id: i32, role_id: i32) -> Result<bool> {
        let inserted = UserRoles::insert(user_roles::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role_id),
        })
        .on_conflict(
            OnConflict::columns([user_roles::Column::UserId, user_roles::Column::RoleId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.conn)
        .await
        .context("Failed to assign role")?;

        Ok(inserted > 0)
    }

    /// Returns `false` if the pair was not assigned.
    pub async fn unassign(&self, user_id: i32, role_id: i32) -> Result<bool> {
        let result = UserRoles::delete_by_id((user_id, role_id))
            .exec(&self.conn)
            .await
            .context("Failed to remove role")?;

        Ok(result.rows_affected > 0)
    }
}
