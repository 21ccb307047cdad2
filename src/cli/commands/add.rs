//! Add user command handler

use crate::config::Config;
use crate::db::Store;
use crate::models::NewUser;

pub async fn cmd_add_user(
    config: &Config,
    name: &str,
    fullname: Option<String>,
    nickname: Option<String>,
) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let user = store
        .create_user(NewUser::new(name, fullname, nickname))
        .await?;

    println!("✓ Added: {} (ID: {})", user.name, user.id);
    if let Some(fullname) = &user.fullname {
        println!("  Full name: {}", fullname);
    }
    if let Some(nickname) = &user.nickname {
        println!("  Nickname:  {}", nickname);
    }

    Ok(())
}
