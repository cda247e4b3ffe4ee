use super::{permissions_from_json, permissions_to_json};
use crate::core::models::{User, UserRole};
use crate::utils::error::{AccessError, Result as CoreResult};
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
///
/// Users belong to the host platform; the access core reads the role and
/// the additional grants and writes only the grants.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub email: String,

    pub display_name: Option<String>,

    /// Role name, e.g. `CONTENT_CREATOR`
    pub role: String,

    /// JSON array of permission names
    pub additional_permissions: Json,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to domain user
    pub fn into_domain(self) -> CoreResult<User> {
        let role = self.role.parse::<UserRole>().map_err(|_| {
            AccessError::internal(format!("User {} has unknown role '{}'", self.id, self.role))
        })?;

        Ok(User {
            id: self.id,
            email: self.email,
            display_name: self.display_name,
            role,
            additional_permissions: permissions_from_json(self.additional_permissions)?,
        })
    }

    /// Convert domain user to an active model for insertion
    pub fn from_domain(user: &User) -> ActiveModel {
        let now = chrono::Utc::now();
        ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            display_name: Set(user.display_name.clone()),
            role: Set(user.role.as_str().to_string()),
            additional_permissions: Set(permissions_to_json(&user.additional_permissions)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}
