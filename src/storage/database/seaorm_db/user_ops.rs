use crate::auth::rbac::Permission;
use crate::core::models::User;
use crate::storage::UserRepository;
use crate::utils::error::{AccessError, Result};
use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::collections::BTreeSet;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, permissions_to_json, user};
use super::connection::{db_time, map_insert_error};
use super::types::SeaOrmStore;

impl SeaOrmStore {
    /// Create a user row
    pub async fn create_user(&self, user: &User) -> Result<()> {
        debug!("Creating user: {}", user.email);

        entities::User::insert(user::Model::from_domain(user))
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| map_insert_error(e, "User already exists"))?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for SeaOrmStore {
    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>> {
        debug!("Finding user by ID: {}", user_id);

        entities::User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(AccessError::Database)?
            .map(user::Model::into_domain)
            .transpose()
    }

    async fn set_additional_permissions(
        &self,
        user_id: Uuid,
        permissions: &BTreeSet<Permission>,
    ) -> Result<()> {
        debug!("Updating additional permissions for user: {}", user_id);

        let result = entities::User::update_many()
            .col_expr(
                user::Column::AdditionalPermissions,
                Expr::value(permissions_to_json(permissions)),
            )
            .col_expr(
                user::Column::UpdatedAt,
                Expr::value(db_time(chrono::Utc::now())),
            )
            .filter(user::Column::Id.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(AccessError::Database)?;

        if result.rows_affected == 0 {
            return Err(AccessError::not_found(format!("User {} not found", user_id)));
        }
        Ok(())
    }
}
