//! `SeaORM` implementation of the `RoleService` trait.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::db::Store;
use crate::entities::{roles, users};
use crate::models::{RoleSummary, UserWithRoles};
use crate::services::role_service::{RoleError, RoleService};

pub struct SeaOrmRoleService {
    store: Store,
}

impl SeaOrmRoleService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn user_and_role(
        &self,
        user_id: i32,
        role_id: i32,
    ) -> Result<(users::Model, roles::Model), RoleError> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or(RoleError::UserNotFound(user_id))?;

        let role = self
            .store
            .get_role(role_id)
            .await?
            .ok_or(RoleError::RoleNotFound(role_id))?;

        Ok((user, role))
    }

    async fn with_roles(&self, user: users::Model) -> Result<UserWithRoles, RoleError> {
        let roles = self.store.roles_for_user(user.id).await?;
        Ok(UserWithRoles::new(user, roles))
    }
}

#[async_trait]
impl RoleService for SeaOrmRoleService {
    async fn create_role(
        &self,
        role_name: &str,
        department_name: &str,
    ) -> Result<RoleSummary, RoleError> {
        if role_name.trim().is_empty() || department_name.trim().is_empty() {
            return Err(RoleError::Validation(
                "role_name and department_name are required".to_string(),
            ));
        }

        if self
            .store
            .find_role(role_name, department_name)
            .await?
            .is_some()
        {
            return Err(RoleError::Conflict);
        }

        // A concurrent insert of the same pair trips the unique index instead.
        let role = self
            .store
            .insert_role(role_name, department_name)
            .await?
            .ok_or(RoleError::Conflict)?;

        info!(
            role_id = role.role_id,
            role_name = %role.role_name,
            department_name = %role.department_name,
            "Role created"
        );

        Ok(RoleSummary::from(role))
    }

    async fn list_roles(&self) -> Result<Vec<RoleSummary>, RoleError> {
        let roles = self.store.list_roles().await?;
        Ok(roles.into_iter().map(RoleSummary::from).collect())
    }

    async fn assign_role_to_user(
        &self,
        user_id: i32,
        role_id: i32,
    ) -> Result<UserWithRoles, RoleError> {
        let (user, role) = self.user_and_role(user_id, role_id).await?;

        if self.store.assign_role(user.id, role.role_id).await? {
            info!(user_id, role_id, "Role assigned");
        } else {
            debug!(user_id, role_id, "Role already assigned");
        }

        self.with_roles(user).await
    }

    async fn remove_role_from_user(
        &self,
        user_id: i32,
        role_id: i32,
    ) -> Result<UserWithRoles, RoleError> {
        let (user, role) = self.user_and_role(user_id, role_id).await?;

        if !self.store.unassign_role(user.id, role.role_id).await? {
            return Err(RoleError::NotAssigned {
                username: user.username,
                role_name: role.role_name,
                department_name: role.department_name,
            });
        }

        info!(user_id, role_id, "Role removed");

        self.with_roles(user).await
    }

    async fn get_roles_for_user(&self, user_id: i32) -> Result<Vec<RoleSummary>, RoleError> {
        if self.store.get_user(user_id).await?.is_none() {
            return Err(RoleError::UserNotFound(user_id));
        }

        let roles = self.store.roles_for_user(user_id).await?;
        Ok(roles.into_iter().map(RoleSummary::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::NewUser;

    async fn setup() -> (SeaOrmRoleService, Store, i32) {
        let store = Store::with_pool_options("sqlite::memory:", 1, 1)
            .await
            .unwrap();
        let user = store
            .insert_user(NewUser {
                username: "astarion".to_string(),
                email: "astarion@example.com".to_string(),
                password_hash: "not-a-real-hash".to_string(),
                inactive_since: None,
            })
            .await
            .unwrap()
            .unwrap();
        (SeaOrmRoleService::new(store.clone()), store, user.id)
    }

    #[tokio::test]
    async fn test_duplicate_pair_conflicts_but_other_department_does_not() {
        let (service, _, _) = setup().await;

        let divine = service.create_role("Paladin", "Divine").await.unwrap();
        let err = service.create_role("Paladin", "Divine").await.unwrap_err();
        assert!(matches!(err, RoleError::Conflict));
        assert!(err.to_string().contains("already exists"));

        let martial = service.create_role("Paladin", "Martial").await.unwrap();
        assert_ne!(divine.role_id, martial.role_id);
    }

    #[tokio::test]
    async fn test_unique_index_backs_the_conflict_check() {
        let (_, store, _) = setup().await;
        assert!(store.insert_role("Wizard", "Arcane").await.unwrap().is_some());
        assert!(store.insert_role("Wizard", "Arcane").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_fields_rejected() {
        let (service, _, _) = setup().await;
        let err = service.create_role("", "Divine").await.unwrap_err();
        assert!(matches!(err, RoleError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_roles_ordered_by_department_then_name() {
        let (service, _, _) = setup().await;
        service.create_role("Rogue", "Stealth").await.unwrap();
        service.create_role("Bard", "Arcane").await.unwrap();
        service.create_role("Barbarian", "Martial").await.unwrap();
        service.create_role("Artificer", "Arcane").await.unwrap();

        let names: Vec<(String, String)> = service
            .list_roles()
            .await
            .unwrap()
            .into_iter()
            .map(|r| (r.department_name, r.role_name))
            .collect();

        assert_eq!(
            names,
            vec![
                ("Arcane".to_string(), "Artificer".to_string()),
                ("Arcane".to_string(), "Bard".to_string()),
                ("Martial".to_string(), "Barbarian".to_string()),
                ("Stealth".to_string(), "Rogue".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_assign_is_idempotent() {
        let (service, _, user_id) = setup().await;
        let role = service.create_role("Ranger", "Martial").await.unwrap();

        let first = service
            .assign_role_to_user(user_id, role.role_id)
            .await
            .unwrap();
        let second = service
            .assign_role_to_user(user_id, role.role_id)
            .await
            .unwrap();

        assert_eq!(first.roles.len(), 1);
        assert_eq!(second.roles.len(), 1);
        assert_eq!(second.username, "astarion");
    }

    #[tokio::test]
    async fn test_assign_unknown_ids() {
        let (service, _, user_id) = setup().await;
        let role = service.create_role("Ranger", "Martial").await.unwrap();

        let err = service
            .assign_role_to_user(99999, role.role_id)
            .await
            .unwrap_err();
        assert!(matches!(err, RoleError::UserNotFound(99999)));

        let err = service
            .assign_role_to_user(user_id, 99999)
            .await
            .unwrap_err();
        assert!(matches!(err, RoleError::RoleNotFound(99999)));
        assert!(err.to_string().to_lowercase().contains("not found"));
    }

    #[tokio::test]
    async fn test_remove_requires_existing_pair() {
        let (service, store, user_id) = setup().await;
        let divine = service.create_role("Paladin", "Divine").await.unwrap();
        let martial = service.create_role("Paladin", "Martial").await.unwrap();

        service
            .assign_role_to_user(user_id, divine.role_id)
            .await
            .unwrap();
        service
            .assign_role_to_user(user_id, martial.role_id)
            .await
            .unwrap();

        let after = service
            .remove_role_from_user(user_id, divine.role_id)
            .await
            .unwrap();
        assert_eq!(after.roles.len(), 1);
        assert_eq!(after.roles[0].department_name, "Martial");
        assert!(!store.is_role_assigned(user_id, divine.role_id).await.unwrap());
        assert!(store.is_role_assigned(user_id, martial.role_id).await.unwrap());

        let err = service
            .remove_role_from_user(user_id, divine.role_id)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "User astarion does not have role 'Paladin' in department 'Divine'"
        );
    }

    #[tokio::test]
    async fn test_roles_for_user() {
        let (service, _, user_id) = setup().await;
        assert!(service.get_roles_for_user(user_id).await.unwrap().is_empty());

        let err = service.get_roles_for_user(404).await.unwrap_err();
        assert!(matches!(err, RoleError::UserNotFound(404)));

        let cleric = service.create_role("Cleric", "Divine").await.unwrap();
        let warlock = service.create_role("Warlock", "Arcane").await.unwrap();
        service
            .assign_role_to_user(user_id, cleric.role_id)
            .await
            .unwrap();
        service
            .assign_role_to_user(user_id, warlock.role_id)
            .await
            .unwrap();

        let roles = service.get_roles_for_user(user_id).await.unwrap();
        assert_eq!(roles, vec![warlock, cleric]);
    }
}
