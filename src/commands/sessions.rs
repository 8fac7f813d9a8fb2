//! Session management command handlers

use crate::cli::SessionCommand;
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::session::{ChatMessage, ChatStore, Role, SessionData};
use colored::Colorize;
use prettytable::{format, Table};

/// Handle session commands
pub async fn handle_sessions(config: Config, command: SessionCommand) -> Result<()> {
    let store = ChatStore::from_config(&config);
    store.initialized().await;

    match command {
        SessionCommand::List => {
            let sessions = store.list_sessions().await;
            let active_id = store.active_session().await.map(|s| s.info.id);

            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

            table.add_row(prettytable::row![
                "".bold(),
                "ID".bold(),
                "Title".bold(),
                "Messages".bold(),
                "Last Updated".bold()
            ]);

            for session in sessions {
                let marker = if Some(&session.id) == active_id.as_ref() {
                    "*"
                } else {
                    ""
                };
                let title = if session.title.chars().count() > 40 {
                    format!("{}...", session.title.chars().take(37).collect::<String>())
                } else {
                    session.title
                };
                let updated = session.updated_at.format("%Y-%m-%d %H:%M").to_string();

                table.add_row(prettytable::row![
                    marker,
                    session.id.cyan(),
                    title,
                    session.message_count,
                    updated
                ]);
            }

            println!("\nStored Sessions:");
            table.printstd();
            println!();
            println!(
                "Use {} to make a session active.",
                "chatvault sessions switch <ID>".cyan()
            );
            println!();
        }
        SessionCommand::New { title } => {
            let id = store.create_session(title.as_deref()).await;
            println!("{}", format!("Created session {}", id).green());
        }
        SessionCommand::Switch { id } => match store.switch_to(&id).await {
            Some(session) => {
                println!("{}", format!("Switched to session {}", id).green());
                print_transcript(&session);
            }
            None => println!("{}", format!("No session with id {}", id).yellow()),
        },
        SessionCommand::Show => match store.active_session().await {
            Some(session) => print_transcript(&session),
            None => println!("{}", "No active session.".yellow()),
        },
        SessionCommand::Append { content, role } => {
            let role = parse_role(&role)?;

            let mut messages = store
                .active_session()
                .await
                .map(|session| session.messages)
                .unwrap_or_default();
            messages.push(ChatMessage {
                role,
                content: content.clone(),
            });
            store.update_messages(&messages).await;

            println!(
                "{}",
                format!("Appended {} message ({} chars)", role, content.chars().count()).green()
            );
        }
        SessionCommand::Rename { id, title } => {
            store.rename_session(&id, &title).await;
            println!("{}", format!("Renamed session {}", id).green());
        }
        SessionCommand::Delete { id } => {
            store.delete_session(&id).await;
            println!("{}", format!("Deleted session {}", id).green());
        }
        SessionCommand::Clear { force } => {
            if !force {
                println!(
                    "{}",
                    "This removes every stored session. Re-run with --force to proceed.".yellow()
                );
                return Ok(());
            }
            store.clear_all().await;
            println!("{}", "Cleared all sessions.".green());
        }
    }

    Ok(())
}

fn parse_role(role: &str) -> Result<Role> {
    match role {
        "user" => Ok(Role::User),
        "assistant" => Ok(Role::Assistant),
        "system" => Ok(Role::System),
        other => Err(StoreError::Validation(format!(
            "Unknown role: {}. Must be one of: user, assistant, system",
            other
        ))
        .into()),
    }
}

fn print_transcript(session: &SessionData) {
    println!();
    println!("{} ({})", session.info.title.bold(), session.info.id.cyan());
    println!();
    for message in &session.messages {
        println!("{}: {}", message.role.to_string().bold(), message.content);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_accepts_known_roles() {
        assert_eq!(parse_role("user").unwrap(), Role::User);
        assert_eq!(parse_role("assistant").unwrap(), Role::Assistant);
        assert_eq!(parse_role("system").unwrap(), Role::System);
    }

    #[test]
    fn test_parse_role_rejects_unknown_role() {
        let err = parse_role("moderator").expect_err("should reject");
        assert!(err.to_string().contains("Unknown role"));
    }
}
