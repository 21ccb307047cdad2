//! Unit-of-work session over a single database transaction.
//!
//! Changes staged with [`Session::add`] and friends touch nothing until
//! they are flushed into the session's transaction; queries issued
//! through the session flush first, so they observe the last committed
//! state plus this session's staged changes. `commit` applies the whole
//! batch atomically; `rollback` (or dropping the session) discards it.

use sea_orm::sea_query::IntoCondition;
use sea_orm::{
    ColumnTrait, DatabaseTransaction, EntityTrait, IntoActiveModel, QueryFilter, Set,
};

use crate::entities::{prelude::*, user_roles};
use crate::models::{NewEmail, NewRole, NewUser};

use super::error::StoreError;

/// A staged mutation awaiting flush.
#[derive(Debug, Clone)]
pub enum Change {
    AddUser(NewUser),
    AddEmail { user_id: i32, email: NewEmail },
    AddRole(NewRole),
    AssignRole { user_id: i32, role: String },
    DeleteUser(i32),
    DeleteEmail(i32),
    DeleteRole(String),
    RevokeRole { user_id: i32, role: String },
}

pub struct Session {
    txn: DatabaseTransaction,
    pending: Vec<Change>,
}

impl Session {
    pub(crate) fn new(txn: DatabaseTransaction) -> Self {
        Self {
            txn,
            pending: Vec::new(),
        }
    }

    /// Stage a single change. Nothing is written until flush.
    pub fn add(&mut self, change: Change) {
        self.pending.push(change);
    }

    /// Stage a batch of changes in order.
    pub fn add_all(&mut self, changes: impl IntoIterator<Item = Change>) {
        self.pending.extend(changes);
    }

    pub fn add_user(&mut self, user: NewUser) {
        self.add(Change::AddUser(user));
    }

    pub fn add_email(&mut self, user_id: i32, email: NewEmail) {
        self.add(Change::AddEmail { user_id, email });
    }

    pub fn add_role(&mut self, role: NewRole) {
        self.add(Change::AddRole(role));
    }

    pub fn assign_role(&mut self, user_id: i32, role: impl Into<String>) {
        self.add(Change::AssignRole {
            user_id,
            role: role.into(),
        });
    }

    pub fn delete_user(&mut self, id: i32) {
        self.add(Change::DeleteUser(id));
    }

    pub fn delete_email(&mut self, id: i32) {
        self.add(Change::DeleteEmail(id));
    }

    pub fn delete_role(&mut self, name: impl Into<String>) {
        self.add(Change::DeleteRole(name.into()));
    }

    pub fn revoke_role(&mut self, user_id: i32, role: impl Into<String>) {
        self.add(Change::RevokeRole {
            user_id,
            role: role.into(),
        });
    }

    /// Apply all staged changes to the transaction, in staging order.
    ///
    /// A constraint violation aborts the flush; the transaction must
    /// then be rolled back (dropping the session does that too).
    pub async fn flush(&mut self) -> Result<(), StoreError> {
        for change in self.pending.drain(..) {
            apply(&self.txn, change).await?;
        }
        Ok(())
    }

    /// All rows of an entity, as seen by this session.
    pub async fn query<E>(&mut self) -> Result<Vec<E::Model>, StoreError>
    where
        E: EntityTrait,
    {
        self.flush().await?;
        E::find().all(&self.txn).await.map_err(StoreError::classify)
    }

    /// Rows of an entity matching a condition, as seen by this session.
    pub async fn query_where<E, F>(&mut self, filter: F) -> Result<Vec<E::Model>, StoreError>
    where
        E: EntityTrait,
        F: IntoCondition,
    {
        self.flush().await?;
        E::find()
            .filter(filter)
            .all(&self.txn)
            .await
            .map_err(StoreError::classify)
    }

    /// Flush remaining staged changes and commit the transaction.
    /// All-or-nothing: on error nothing becomes visible outside the
    /// session.
    pub async fn commit(mut self) -> Result<(), StoreError> {
        self.flush().await?;
        self.txn.commit().await.map_err(StoreError::classify)
    }

    /// Discard staged changes and roll the transaction back, reverting
    /// to the last committed state.
    pub async fn rollback(mut self) -> Result<(), StoreError> {
        self.pending.clear();
        self.txn.rollback().await.map_err(StoreError::classify)
    }
}

async fn apply(txn: &DatabaseTransaction, change: Change) -> Result<(), StoreError> {
    match change {
        Change::AddUser(user) => {
            Users::insert(user.into_active_model())
                .exec(txn)
                .await
                .map_err(StoreError::classify)?;
        }
        Change::AddEmail { user_id, email } => {
            Emails::insert(email.into_active_model(user_id))
                .exec(txn)
                .await
                .map_err(StoreError::classify)?;
        }
        Change::AddRole(role) => {
            Roles::insert(role.into_active_model())
                .exec(txn)
                .await
                .map_err(StoreError::classify)?;
        }
        Change::AssignRole { user_id, role } => {
            let assignment = user_roles::ActiveModel {
                user_id: Set(user_id),
                role_id: Set(role),
            };
            UserRoles::insert(assignment)
                .exec(txn)
                .await
                .map_err(StoreError::classify)?;
        }
        Change::DeleteUser(id) => {
            Users::delete_by_id(id)
                .exec(txn)
                .await
                .map_err(StoreError::classify)?;
        }
        Change::DeleteEmail(id) => {
            Emails::delete_by_id(id)
                .exec(txn)
                .await
                .map_err(StoreError::classify)?;
        }
        Change::DeleteRole(name) => {
            Roles::delete_by_id(name)
                .exec(txn)
                .await
                .map_err(StoreError::classify)?;
        }
        Change::RevokeRole { user_id, role } => {
            UserRoles::delete_many()
                .filter(user_roles::Column::UserId.eq(user_id))
                .filter(user_roles::Column::RoleId.eq(role))
                .exec(txn)
                .await
                .map_err(StoreError::classify)?;
        }
    }
    Ok(())
}
