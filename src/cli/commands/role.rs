//! Role command handlers

use crate::config::Config;
use crate::db::{Store, StoreError};
use crate::models::NewRole;

pub async fn cmd_role_add(
    config: &Config,
    name: &str,
    access_lvl: i32,
    desc: Option<String>,
) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    if store.get_role(name).await?.is_some() {
        println!("Role '{}' already exists.", name);
        return Ok(());
    }

    let role = store.create_role(NewRole::new(name, access_lvl, desc)).await?;

    println!("✓ Added role: {} (level {})", role.name, role.access_lvl);
    if let Some(desc) = &role.desc {
        println!("  {}", desc);
    }

    Ok(())
}

pub async fn cmd_role_list(config: &Config, json: bool) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let roles = store.list_roles().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&roles)?);
        return Ok(());
    }

    if roles.is_empty() {
        println!("No roles defined.");
        println!();
        println!("Add one with: rosterr role add <name> <access_lvl>");
        return Ok(());
    }

    println!("Roles ({} total)", roles.len());
    println!("{:-<70}", "");

    for role in roles {
        let members = store.members_of(&role.name).await.map_or(0, |m| m.len());
        let desc = role.desc.as_deref().unwrap_or("-");

        println!("• {} (level {})", role.name, role.access_lvl);
        println!("  Members: {} | {}", members, desc);
    }

    Ok(())
}

pub async fn cmd_role_assign(config: &Config, user_id: i32, role: &str) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let Some(user) = store.get_user(user_id).await? else {
        println!("User with ID {} not found.", user_id);
        return Ok(());
    };

    if store.get_role(role).await?.is_none() {
        println!("Role '{}' not defined.", role);
        println!("Define it with: rosterr role add {} <access_lvl>", role);
        return Ok(());
    }

    let mut session = store.session().await?;
    session.assign_role(user_id, role);
    match session.commit().await {
        Ok(()) => println!("✓ Assigned role '{}' to {}", role, user.name),
        Err(StoreError::UniqueViolation(_)) => {
            println!("{} already has role '{}'.", user.name, role);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

pub async fn cmd_role_revoke(config: &Config, user_id: i32, role: &str) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    if store.revoke_role(user_id, role).await? {
        println!("✓ Revoked role '{}' from user {}", role, user_id);
    } else {
        println!("User {} does not have role '{}'.", user_id, role);
    }

    Ok(())
}

pub async fn cmd_role_members(config: &Config, role: &str) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    if store.get_role(role).await?.is_none() {
        println!("Role '{}' not defined.", role);
        return Ok(());
    }

    let members = store.members_of(role).await?;

    if members.is_empty() {
        println!("No users hold role '{}'.", role);
        return Ok(());
    }

    println!("Members of '{}' ({} total)", role, members.len());
    println!("{:-<70}", "");

    for user in members {
        println!("• {} (ID: {})", user.name, user.id);
    }

    Ok(())
}

pub async fn cmd_role_remove(config: &Config, name: &str) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    if store.remove_role(name).await? {
        println!("✓ Removed role '{}'", name);
    } else {
        println!("Role '{}' not found.", name);
    }

    Ok(())
}
