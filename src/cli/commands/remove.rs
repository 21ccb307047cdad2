//! Remove user command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_remove_user(config: &Config, id: i32, yes: bool) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let Some(user) = store.get_user(id).await? else {
        println!("User with ID {} not found in the roster.", id);
        return Ok(());
    };

    if !yes {
        println!("Remove '{}' (ID: {}) from the roster?", user.name, user.id);
        println!("Their emails and role assignments go with them.");
        println!("Enter 'y' to confirm, anything else to cancel:");

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if store.remove_user(id).await? {
        println!("✓ Removed: {}", user.name);
    } else {
        println!("Failed to remove user.");
    }

    Ok(())
}
