use super::{permissions_from_json, permissions_to_json};
use crate::core::models::{RoleTemplate, UserRole};
use crate::utils::error::{AccessError, Result as CoreResult};
use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role template database model; one row per role at most
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "role_templates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub role: String,

    /// JSON array of permission names
    pub permissions: Json,

    pub description: Option<String>,

    pub category: Option<String>,

    pub updated_by: Option<Uuid>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_domain(self) -> CoreResult<RoleTemplate> {
        let role = self.role.parse::<UserRole>().map_err(|_| {
            AccessError::internal(format!(
                "Role template {} has unknown role '{}'",
                self.id, self.role
            ))
        })?;

        Ok(RoleTemplate {
            id: self.id,
            role,
            permissions: permissions_from_json(self.permissions)?,
            description: self.description,
            category: self.category,
            updated_by: self.updated_by,
            created_at: self.created_at.with_timezone(&Utc),
            updated_at: self.updated_at.with_timezone(&Utc),
        })
    }

    pub fn from_domain(template: &RoleTemplate) -> ActiveModel {
        ActiveModel {
            id: Set(template.id),
            role: Set(template.role.as_str().to_string()),
            permissions: Set(permissions_to_json(&template.permissions)),
            description: Set(template.description.clone()),
            category: Set(template.category.clone()),
            updated_by: Set(template.updated_by),
            created_at: Set(template.created_at.into()),
            updated_at: Set(template.updated_at.into()),
        }
    }
}
