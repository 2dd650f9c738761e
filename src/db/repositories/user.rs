use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, LoaderTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::db::is_unique_violation;
use crate::entities::{prelude::*, roles, users};

/// Insert payload; `password_hash` must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub inactive_since: Option<DateTime<Utc>>,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Returns `None` when the username or email is already taken.
    pub async fn insert(&self, user: NewUser) -> Result<Option<users::Model>> {
        let active = users::ActiveModel {
            username: Set(user.username),
            email: Set(user.email),
            password: Set(user.password_hash),
            inactive_since: Set(user.inactive_since),
            ..Default::default()
        };

        match active.insert(&self.conn).await {
            Ok(model) => Ok(Some(model)),
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(e).context("Failed to insert user"),
        }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<users::Model>> {
        Users::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<users::Model>> {
        Users::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<users::Model>> {
        Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")
    }

    pub async fn set_inactive_since(
        &self,
        user: users::Model,
        inactive_since: Option<DateTime<Utc>>,
    ) -> Result<users::Model> {
        let mut active: users::ActiveModel = user.into();
        active.inactive_since = Set(inactive_since);
        active
            .update(&self.conn)
            .await
            .context("Failed to update user activity")
    }

    /// Users ordered by id, each with roles ordered by department then name.
    /// `active` of `None` returns everyone.
    pub async fn list_with_roles(
        &self,
        active: Option<bool>,
    ) -> Result<Vec<(users::Model, Vec<roles::Model>)>> {
        let condition = match active {
            Some(true) => Condition::all().add(users::Column::InactiveSince.is_null()),
            Some(false) => Condition::all().add(users::Column::InactiveSince.is_not_null()),
            None => Condition::all(),
        };

        let users = Users::find()
            .filter(condition)
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list users")?;

        let roles = users
            .load_many_to_many(Roles, UserRoles, &self.conn)
            .await
            .context("Failed to load user roles")?;

        Ok(users
            .into_iter()
            .zip(roles)
            .map(|(user, mut roles)| {
                sort_roles(&mut roles);
                (user, roles)
            })
            .collect())
    }
}

fn sort_roles(roles: &mut [roles::Model]) {
    roles.sort_by(|a, b| {
        a.department_name
            .cmp(&b.department_name)
            .then_with(|| a.role_name.cmp(&b.role_name))
    });
}
