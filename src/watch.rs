//! Interactive watch mode.
//!
//! One cooperative `select!` loop interleaves the indicator's poll
//! interval, stats-refresh signals from the panel, and stdin commands.
//! Every network call is awaited inline; nothing blocks the loop
//! synchronously, and no locking is needed since nothing runs in
//! parallel. Re-entry into generate is prevented by the panel's
//! `generating` guard alone.

use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;

use crate::api::client::NotificationApi;
use crate::center::entry;
use crate::center::indicator::NotificationIndicator;
use crate::center::panel::NotificationPanel;
use crate::config::Config;

pub async fn run(cfg: Config) -> Result<()> {
    let api = NotificationApi::from_config(&cfg);
    let (refresh_tx, mut refresh_rx) = mpsc::unbounded_channel();
    let mut indicator = NotificationIndicator::new(api.clone());
    let mut panel = NotificationPanel::new(api, refresh_tx);

    // Badge first, list lazily on open.
    indicator.refresh_stats().await;
    print_badge(&indicator);
    println!("commands: o(pen/close)  u(nread filter)  r <id>  ra  d <id>  g  s(tats)  q(uit)");

    let mut ticker = tokio::time::interval(Duration::from_secs(cfg.poll_secs));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick fires immediately and stats were just fetched.
    ticker.tick().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                indicator.refresh_stats().await;
                print_badge(&indicator);
            }
            Some(()) = refresh_rx.recv() => {
                indicator.refresh_stats().await;
                print_badge(&indicator);
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_command(line.trim(), &mut indicator, &mut panel, &mut lines, &cfg).await? {
                    break;
                }
                drain_alerts(&mut panel);
            }
        }
    }

    Ok(())
}

async fn handle_command(
    line: &str,
    indicator: &mut NotificationIndicator,
    panel: &mut NotificationPanel,
    lines: &mut Lines<BufReader<Stdin>>,
    cfg: &Config,
) -> Result<bool> {
    let mut parts = line.split_whitespace();
    match parts.next() {
        None => {}
        Some("q" | "quit") => return Ok(false),
        Some("o" | "open") => {
            if indicator.toggle() {
                panel.open().await;
                render_panel(panel);
            } else {
                println!("(panel closed)");
            }
        }
        Some("u" | "unread") => {
            if !indicator.is_open() {
                println!("(panel is closed — 'o' to open)");
            } else {
                let unread_only = !panel.show_unread_only();
                panel.set_filter(unread_only).await;
                render_panel(panel);
            }
        }
        Some("r" | "read") => match parts.next().and_then(|s| s.parse::<i64>().ok()) {
            Some(id) => {
                // Mirror the entry click: already-read entries are a no-op.
                let action = panel.notification(id).map(entry::click_action);
                match action {
                    None => println!("no notification #{id} in the panel"),
                    Some(None) => println!("(already read)"),
                    Some(Some(entry::EntryAction::MarkRead)) => {
                        panel.mark_read(id).await;
                        render_panel(panel);
                    }
                }
            }
            None => println!("usage: r <id>"),
        },
        Some("ra") => {
            panel.mark_all_read().await;
            render_panel(panel);
        }
        Some("d" | "delete") => match parts.next().and_then(|s| s.parse::<i64>().ok()) {
            Some(id) => delete_with_confirm(panel, lines, id).await?,
            None => println!("usage: d <id>"),
        },
        Some("g" | "generate") => {
            if panel.is_generating() {
                println!("(a health tip is already being generated)");
            } else {
                println!("Generating health tip…");
                if panel.generate(&cfg.language).await {
                    render_panel(panel);
                }
            }
        }
        Some("s" | "stats") => {
            indicator.refresh_stats().await;
            print_badge(indicator);
        }
        Some(other) => println!("unknown command: {other}"),
    }
    Ok(true)
}

async fn delete_with_confirm(
    panel: &mut NotificationPanel,
    lines: &mut Lines<BufReader<Stdin>>,
    id: i64,
) -> Result<()> {
    let (deletable, title) = match panel.notification(id) {
        Some(n) => (n.is_deletable(), n.title.clone()),
        None => {
            println!("no notification #{id} in the panel");
            return Ok(());
        }
    };
    if !deletable {
        println!("Announcements are addressed to everyone and can't be deleted.");
        return Ok(());
    }
    println!("Delete \"{title}\"? [y/N]");
    let answer = lines.next_line().await?.unwrap_or_default();
    if matches!(answer.trim(), "y" | "Y" | "yes") {
        panel.delete(id).await;
        render_panel(panel);
    } else {
        println!("(kept)");
    }
    Ok(())
}

fn render_panel(panel: &NotificationPanel) {
    let now = Utc::now();
    let filter = if panel.show_unread_only() { "unread" } else { "all" };
    println!(
        "── Notifications · {} unread · showing {filter} ──",
        panel.unread_count()
    );
    if panel.notifications().is_empty() {
        if panel.show_unread_only() {
            println!("   no unread notifications");
        } else {
            println!("   no notifications yet — 'g' asks for a personalized health tip");
        }
        return;
    }
    for n in panel.notifications() {
        print!("{}", entry::render(n, now));
    }
}

fn print_badge(indicator: &NotificationIndicator) {
    let stats = indicator.stats();
    match indicator.badge() {
        Some(badge) => println!("🔔 {badge} unread of {} total", stats.total),
        None => println!("🔔 no unread · {} total", stats.total),
    }
}

fn drain_alerts(panel: &mut NotificationPanel) {
    for alert in panel.take_alerts() {
        eprintln!("⚠ {alert}");
    }
}
