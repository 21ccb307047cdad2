use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

use crate::entities::{prelude::*, roles, user_roles, users};
use crate::models::{NewRole, Role, RoleAssignment, User};

/// Repository for roles and the user/role association table.
pub struct RoleRepository {
    conn: DatabaseConnection,
}

impl RoleRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, role: NewRole) -> Result<Role> {
        let name = role.name.clone();
        Roles::insert(role.into_active_model())
            .exec(&self.conn)
            .await
            .context("Failed to insert role")?;

        let created = Roles::find_by_id(&name)
            .one(&self.conn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created role"))?;

        info!("Added role '{}'", created.name);
        Ok(Role::from(created))
    }

    pub async fn get(&self, name: &str) -> Result<Option<Role>> {
        let role = Roles::find_by_id(name)
            .one(&self.conn)
            .await
            .context("Failed to query role by name")?;

        Ok(role.map(Role::from))
    }

    pub async fn list_all(&self) -> Result<Vec<Role>> {
        let rows = Roles::find()
            .order_by_asc(roles::Column::Name)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Role::from).collect())
    }

    pub async fn remove(&self, name: &str) -> Result<bool> {
        let res = Roles::delete_by_id(name).exec(&self.conn).await?;
        if res.rows_affected > 0 {
            info!("Removed role '{}'", name);
        }
        Ok(res.rows_affected > 0)
    }

    pub async fn assign(&self, user_id: i32, role_name: &str) -> Result<()> {
        let assignment = user_roles::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role_name.to_string()),
        };
        UserRoles::insert(assignment)
            .exec(&self.conn)
            .await
            .context("Failed to insert role assignment")?;

        info!("Assigned role '{}' to user {}", role_name, user_id);
        Ok(())
    }

    pub async fn revoke(&self, user_id: i32, role_name: &str) -> Result<bool> {
        let res = UserRoles::delete_many()
            .filter(user_roles::Column::UserId.eq(user_id))
            .filter(user_roles::Column::RoleId.eq(role_name))
            .exec(&self.conn)
            .await?;

        Ok(res.rows_affected > 0)
    }

    /// Roles held by one user, through the association table.
    pub async fn for_user(&self, user_id: i32) -> Result<Vec<Role>> {
        let Some(user) = Users::find_by_id(user_id).one(&self.conn).await? else {
            return Ok(Vec::new());
        };

        let rows = user
            .find_related(Roles)
            .order_by_asc(roles::Column::Name)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Role::from).collect())
    }

    /// Users holding one role, through the association table.
    pub async fn members_of(&self, role_name: &str) -> Result<Vec<User>> {
        let Some(role) = Roles::find_by_id(role_name).one(&self.conn).await? else {
            return Ok(Vec::new());
        };

        let rows = role
            .find_related(Users)
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    /// Raw association rows, useful for inspecting the join table.
    pub async fn assignments(&self) -> Result<Vec<RoleAssignment>> {
        let rows = UserRoles::find()
            .order_by_asc(user_roles::Column::UserId)
            .order_by_asc(user_roles::Column::RoleId)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(RoleAssignment::from).collect())
    }
}
