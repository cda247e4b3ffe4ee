use crate::core::models::{RoleTemplate, UserRole};
use crate::storage::RoleTemplateRepository;
use crate::utils::error::{AccessError, Result};
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, role_template};
use super::types::SeaOrmStore;

#[async_trait]
impl RoleTemplateRepository for SeaOrmStore {
    async fn find_role_template(&self, role: UserRole) -> Result<Option<RoleTemplate>> {
        debug!("Finding role template: {}", role);

        entities::RoleTemplate::find()
            .filter(role_template::Column::Role.eq(role.as_str()))
            .one(&self.db)
            .await
            .map_err(AccessError::Database)?
            .map(role_template::Model::into_domain)
            .transpose()
    }

    async fn list_role_templates(&self) -> Result<Vec<RoleTemplate>> {
        entities::RoleTemplate::find()
            .order_by_asc(role_template::Column::Role)
            .all(&self.db)
            .await
            .map_err(AccessError::Database)?
            .into_iter()
            .map(role_template::Model::into_domain)
            .collect()
    }

    async fn upsert_role_template(&self, template: &RoleTemplate) -> Result<RoleTemplate> {
        debug!("Upserting role template: {}", template.role);

        entities::RoleTemplate::insert(role_template::Model::from_domain(template))
            .on_conflict(
                OnConflict::column(role_template::Column::Role)
                    .update_columns([
                        role_template::Column::Permissions,
                        role_template::Column::Description,
                        role_template::Column::Category,
                        role_template::Column::UpdatedBy,
                        role_template::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(AccessError::Database)?;

        self.find_role_template(template.role).await?.ok_or_else(|| {
            AccessError::internal(format!(
                "Role template for {} missing after upsert",
                template.role
            ))
        })
    }

    async fn delete_role_template(&self, role: UserRole) -> Result<bool> {
        debug!("Deleting role template: {}", role);

        let result = entities::RoleTemplate::delete_many()
            .filter(role_template::Column::Role.eq(role.as_str()))
            .exec(&self.db)
            .await
            .map_err(AccessError::Database)?;
        Ok(result.rows_affected > 0)
    }
}
