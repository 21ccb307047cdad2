use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement, TransactionTrait,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod error;
pub mod migrator;
pub mod repositories;
pub mod session;

pub use error::StoreError;
pub use session::{Change, Session};

use crate::models::{Email, NewEmail, NewRole, NewUser, Role, RoleAssignment, User};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // A pool would hand every connection its own empty in-memory database.
        let max_connections = if in_memory { 1 } else { max_connections };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections.min(max_connections))
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Open a unit-of-work session bound to one transaction.
    pub async fn session(&self) -> Result<Session, StoreError> {
        let txn = self.conn.begin().await.map_err(StoreError::classify)?;
        Ok(Session::new(txn))
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn email_repo(&self) -> repositories::email::EmailRepository {
        repositories::email::EmailRepository::new(self.conn.clone())
    }

    fn role_repo(&self) -> repositories::role::RoleRepository {
        repositories::role::RoleRepository::new(self.conn.clone())
    }

    pub async fn create_user(&self, user: NewUser) -> Result<User> {
        self.user_repo().add(user).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get(id).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list_all().await
    }

    pub async fn find_users_by_name(&self, name: &str) -> Result<Vec<User>> {
        self.user_repo().find_by_name(name).await
    }

    pub async fn remove_user(&self, id: i32) -> Result<bool> {
        self.user_repo().remove(id).await
    }

    pub async fn users_with_emails(&self) -> Result<Vec<(User, Vec<Email>)>> {
        self.user_repo().list_with_emails().await
    }

    pub async fn add_email(&self, user_id: i32, email: NewEmail) -> Result<Email> {
        self.email_repo().add(user_id, email).await
    }

    pub async fn get_email(&self, id: i32) -> Result<Option<Email>> {
        self.email_repo().get(id).await
    }

    pub async fn list_emails(&self) -> Result<Vec<Email>> {
        self.email_repo().list_all().await
    }

    pub async fn emails_for_user(&self, user_id: i32) -> Result<Vec<Email>> {
        self.email_repo().for_user(user_id).await
    }

    pub async fn remove_email(&self, id: i32) -> Result<bool> {
        self.email_repo().remove(id).await
    }

    pub async fn create_role(&self, role: NewRole) -> Result<Role> {
        self.role_repo().add(role).await
    }

    pub async fn get_role(&self, name: &str) -> Result<Option<Role>> {
        self.role_repo().get(name).await
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>> {
        self.role_repo().list_all().await
    }

    pub async fn remove_role(&self, name: &str) -> Result<bool> {
        self.role_repo().remove(name).await
    }

    pub async fn assign_role(&self, user_id: i32, role_name: &str) -> Result<()> {
        self.role_repo().assign(user_id, role_name).await
    }

    pub async fn revoke_role(&self, user_id: i32, role_name: &str) -> Result<bool> {
        self.role_repo().revoke(user_id, role_name).await
    }

    pub async fn roles_for_user(&self, user_id: i32) -> Result<Vec<Role>> {
        self.role_repo().for_user(user_id).await
    }

    pub async fn members_of(&self, role_name: &str) -> Result<Vec<User>> {
        self.role_repo().members_of(role_name).await
    }

    pub async fn list_assignments(&self) -> Result<Vec<RoleAssignment>> {
        self.role_repo().assignments().await
    }
}
