use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod center;
mod cli;
mod config;
mod errors;
mod models;
mod watch;

use api::client::NotificationApi;
use models::notification::{AdminNotificationCreate, Notification, NotificationKind};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "healthbell=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = config::load()?;
    let args = cli::Cli::parse();

    match args.command {
        Some(cli::Commands::Watch { interval }) => {
            let mut cfg = cfg;
            if let Some(secs) = interval {
                cfg.poll_secs = secs.max(1);
            }
            watch::run(cfg).await
        }
        Some(cli::Commands::List {
            unread_only,
            skip,
            limit,
        }) => {
            let api = NotificationApi::from_config(&cfg);
            let list = api.list_page(unread_only, skip, limit).await?;
            print_notification_table(&list);
            Ok(())
        }
        Some(cli::Commands::Stats) => {
            let api = NotificationApi::from_config(&cfg);
            let stats = api.stats().await?;
            println!("Total:  {}", stats.total);
            println!("Unread: {}", stats.unread);
            Ok(())
        }
        Some(cli::Commands::Read { id }) => {
            let api = NotificationApi::from_config(&cfg);
            let n = api.mark_read(id).await?;
            println!("Marked #{} as read: {}", n.id, n.title);
            Ok(())
        }
        Some(cli::Commands::ReadAll) => {
            let api = NotificationApi::from_config(&cfg);
            let count = api.mark_all_read().await?;
            println!("Marked {count} notification(s) as read.");
            Ok(())
        }
        Some(cli::Commands::Delete { id, yes }) => {
            if !yes && !confirm(&format!("Delete notification #{id}?"))? {
                println!("(kept)");
                return Ok(());
            }
            let api = NotificationApi::from_config(&cfg);
            api.delete(id).await?;
            println!("Notification #{id} deleted.");
            Ok(())
        }
        Some(cli::Commands::Generate { language }) => {
            let api = NotificationApi::from_config(&cfg);
            let language = language.unwrap_or_else(|| cfg.language.clone());
            println!("Generating health tip… (this can take a few seconds)");
            let n = api.generate(&language).await?;
            print!("{}", center::entry::render(&n, chrono::Utc::now()));
            Ok(())
        }
        Some(cli::Commands::Admin { command }) => handle_admin_command(command, &cfg).await,
        None => watch::run(cfg).await,
    }
}

async fn handle_admin_command(cmd: cli::AdminCommands, cfg: &config::Config) -> anyhow::Result<()> {
    let api = NotificationApi::from_config(cfg);
    match cmd {
        cli::AdminCommands::Create {
            title,
            message,
            kind,
            user_id,
        } => {
            let kind: NotificationKind = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            let create = AdminNotificationCreate {
                title,
                message,
                kind,
                user_id,
            };
            let n = api.admin_create(&create).await?;
            match n.user_id {
                Some(uid) => println!("Created {} #{} for user {}.", n.kind, n.id, uid),
                None => println!("Created {} #{} for all users.", n.kind, n.id),
            }
        }
        cli::AdminCommands::Users { skip, limit } => {
            let users = api.admin_users(skip, limit).await?;
            if users.is_empty() {
                println!("No recipients found.");
                return Ok(());
            }
            println!("{:<8} {:<30} {:<24} JOINED", "ID", "EMAIL", "NAME");
            for u in users {
                println!(
                    "{:<8} {:<30} {:<24} {}",
                    u.id, u.email, u.full_name, u.created_at
                );
            }
        }
        cli::AdminCommands::BroadcastAi { language } => {
            let language = language.unwrap_or_else(|| cfg.language.clone());
            println!("Generating personalized notifications for every user…");
            let outcome = api.admin_broadcast_ai(&language).await?;
            println!("{} ({} user(s) total)", outcome.message, outcome.total_users);
        }
    }
    Ok(())
}

fn print_notification_table(list: &[Notification]) {
    if list.is_empty() {
        println!("No notifications.");
        return;
    }
    let now = chrono::Utc::now();
    println!("{:<8} {:<14} {:<6} {:<18} TITLE", "ID", "TYPE", "READ", "AGE");
    for n in list {
        println!(
            "{:<8} {:<14} {:<6} {:<18} {}",
            n.id,
            n.kind.to_string(),
            if n.is_read { "yes" } else { "no" },
            center::entry::format_age(n, now),
            n.title
        );
    }
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    use std::io::Write;
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
