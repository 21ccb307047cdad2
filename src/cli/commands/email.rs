//! Email command handlers

use crate::config::Config;
use crate::db::{Store, StoreError};
use crate::models::NewEmail;

pub async fn cmd_email_add(config: &Config, user_id: i32, address: &str) -> anyhow::Result<()> {
    let Some(email) = NewEmail::parse(address) else {
        println!("Invalid email address: {}", address);
        println!("Expected local@domain, e.g. alice@yahoo.com");
        return Ok(());
    };

    let store = Store::new(&config.general.database_path).await?;

    let Some(user) = store.get_user(user_id).await? else {
        println!("User with ID {} not found in the roster.", user_id);
        println!("Add them first with: rosterr add <name>");
        return Ok(());
    };

    let mut session = store.session().await?;
    session.add_email(user_id, email);
    match session.commit().await {
        Ok(()) => println!("✓ Added {} for {}", address, user.name),
        Err(StoreError::ForeignKeyViolation(_)) => {
            println!("User with ID {} no longer exists.", user_id);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

pub async fn cmd_email_list(config: &Config, user_id: Option<i32>) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    if let Some(user_id) = user_id {
        let Some(user) = store.get_user(user_id).await? else {
            println!("User with ID {} not found.", user_id);
            return Ok(());
        };

        let emails = store.emails_for_user(user_id).await?;
        if emails.is_empty() {
            println!("No email addresses for {}.", user.name);
            return Ok(());
        }

        println!("Emails for {} ({} total)", user.name, emails.len());
        println!("{:-<70}", "");
        for email in emails {
            println!("• {} (ID: {})", email.address(), email.id);
        }
        return Ok(());
    }

    let listing = store.users_with_emails().await?;
    let total: usize = listing.iter().map(|(_, emails)| emails.len()).sum();

    if total == 0 {
        println!("No email addresses recorded.");
        println!();
        println!("Add one with: rosterr email add <user_id> <address>");
        return Ok(());
    }

    println!("Email Addresses ({} total)", total);
    println!("{:-<70}", "");

    for (user, emails) in listing {
        if emails.is_empty() {
            continue;
        }
        println!("• {} (ID: {})", user.name, user.id);
        for email in emails {
            println!("    {} (ID: {})", email.address(), email.id);
        }
    }

    Ok(())
}

pub async fn cmd_email_remove(config: &Config, id: i32) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    if store.remove_email(id).await? {
        println!("✓ Removed email #{}", id);
    } else {
        println!("Email #{} not found.", id);
    }

    Ok(())
}
