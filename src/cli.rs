use clap::{Parser, Subcommand};

/// HealthBell — notification center client for the health prediction service
#[derive(Parser)]
#[command(name = "healthbell", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Poll the unread badge and browse notifications interactively
    Watch {
        /// Poll cadence in seconds (overrides HEALTHBELL_POLL_SECS)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// List notifications
    List {
        /// Only notifications not yet read
        #[arg(long)]
        unread_only: bool,
        #[arg(long)]
        skip: Option<u64>,
        /// Page size, server caps at 100
        #[arg(long)]
        limit: Option<u64>,
    },

    /// Show total/unread counters
    Stats,

    /// Mark one notification as read
    Read { id: i64 },

    /// Mark every unread notification as read
    ReadAll,

    /// Delete one of your own notifications
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Request an AI-generated personalized health tip
    Generate {
        /// Language code (en or hi); defaults to HEALTHBELL_LANG
        #[arg(long)]
        language: Option<String>,
    },

    /// Administrative operations
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Create an announcement (broadcast) or a direct notification
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        message: String,
        /// "announcement" (broadcast, no user) or "direct" (needs --user-id)
        #[arg(long, default_value = "announcement")]
        kind: String,
        #[arg(long)]
        user_id: Option<i64>,
    },
    /// List recipients with their feedback summaries
    Users {
        #[arg(long)]
        skip: Option<u64>,
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Generate personalized notifications for every user
    BroadcastAi {
        /// Language code (en or hi); defaults to HEALTHBELL_LANG
        #[arg(long)]
        language: Option<String>,
    },
}
