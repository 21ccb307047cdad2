//! Show user details command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_user_info(config: &Config, id: i32) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let Some(user) = store.get_user(id).await? else {
        println!("User with ID {} not found.", id);
        println!("Use 'rosterr list' to see user IDs.");
        return Ok(());
    };

    println!("User Info");
    println!("{:-<70}", "");
    println!("Name:      {}", user.name);
    if let Some(fullname) = &user.fullname {
        println!("Full name: {}", fullname);
    }
    if let Some(nickname) = &user.nickname {
        println!("Nickname:  {}", nickname);
    }
    println!("ID:        {}", user.id);
    println!("Added:     {}", user.created_at);

    let emails = store.emails_for_user(id).await?;
    println!();
    if emails.is_empty() {
        println!("No email addresses.");
    } else {
        println!("Email Addresses ({}):", emails.len());
        for email in emails {
            println!("  • {} (ID: {})", email.address(), email.id);
        }
    }

    let roles = store.roles_for_user(id).await?;
    println!();
    if roles.is_empty() {
        println!("No roles assigned.");
    } else {
        println!("Roles ({}):", roles.len());
        for role in roles {
            let desc = role.desc.as_deref().unwrap_or("");
            println!("  • {} (level {}) {}", role.name, role.access_lvl, desc);
        }
    }

    Ok(())
}
