use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, LoaderTrait, QueryFilter,
    QueryOrder,
};
use tracing::info;

use crate::entities::{prelude::*, users};
use crate::models::{Email, NewUser, User};

/// Repository for user records.
pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, user: NewUser) -> Result<User> {
        let res = Users::insert(user.into_active_model())
            .exec(&self.conn)
            .await
            .context("Failed to insert user")?;

        let created = Users::find_by_id(res.last_insert_id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created user"))?;

        info!("Added user '{}' (id {})", created.name, created.id);
        Ok(User::from(created))
    }

    pub async fn get(&self, id: i32) -> Result<Option<User>> {
        let user = Users::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by id")?;

        Ok(user.map(User::from))
    }

    pub async fn list_all(&self) -> Result<Vec<User>> {
        let rows = Users::find()
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<User>> {
        let rows = Users::find()
            .filter(users::Column::Name.eq(name))
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let res = Users::delete_by_id(id).exec(&self.conn).await?;
        if res.rows_affected > 0 {
            info!("Removed user {}", id);
        }
        Ok(res.rows_affected > 0)
    }

    /// Every user together with their email addresses, in id order.
    pub async fn list_with_emails(&self) -> Result<Vec<(User, Vec<Email>)>> {
        let user_rows = Users::find()
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await?;
        let email_rows = user_rows.load_many(Emails, &self.conn).await?;

        Ok(user_rows
            .into_iter()
            .zip(email_rows)
            .map(|(user, emails)| {
                (
                    User::from(user),
                    emails.into_iter().map(Email::from).collect(),
                )
            })
            .collect())
    }
}
