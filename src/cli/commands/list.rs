//! List users command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_list_users(config: &Config, json: bool) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let users = store.list_users().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    if users.is_empty() {
        println!("No users in the roster.");
        println!();
        println!("Add a user with: rosterr add <name>");
        return Ok(());
    }

    println!("Users ({} total)", users.len());
    println!("{:-<70}", "");

    for user in users {
        let fullname = user.fullname.as_deref().unwrap_or("-");
        let nickname = user.nickname.as_deref().unwrap_or("-");
        let email_count = store.emails_for_user(user.id).await.map_or(0, |e| e.len());

        println!("• {} (ID: {})", user.name, user.id);
        println!(
            "  Full name: {} | Nickname: {} | Emails: {}",
            fullname, nickname, email_count
        );
    }

    Ok(())
}
