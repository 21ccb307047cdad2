use anyhow::{Context, Result};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::info;

use crate::entities::{emails, prelude::*};
use crate::models::{Email, NewEmail};

/// Repository for email address records.
pub struct EmailRepository {
    conn: DatabaseConnection,
}

impl EmailRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, user_id: i32, email: NewEmail) -> Result<Email> {
        let res = Emails::insert(email.into_active_model(user_id))
            .exec(&self.conn)
            .await
            .context("Failed to insert email")?;

        let created = Emails::find_by_id(res.last_insert_id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created email"))?;

        info!("Added email {} for user {}", created.id, user_id);
        Ok(Email::from(created))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Email>> {
        let email = Emails::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query email by id")?;

        Ok(email.map(Email::from))
    }

    pub async fn list_all(&self) -> Result<Vec<Email>> {
        let rows = Emails::find()
            .order_by_asc(emails::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Email::from).collect())
    }

    pub async fn for_user(&self, user_id: i32) -> Result<Vec<Email>> {
        let rows = Emails::find()
            .filter(emails::Column::UserId.eq(user_id))
            .order_by_asc(emails::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Email::from).collect())
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let res = Emails::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected > 0)
    }
}
