use super::models::{AppEvent, EventBus};
use colored::Colorize;
use std::sync::Arc;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

impl EventBus {
    pub fn new(silent_mode: bool) -> Arc<Self> {
        Arc::new(Self { silent_mode })
    }

    pub fn is_silent(&self) -> bool {
        self.silent_mode
    }

    pub fn emit(&self, event: AppEvent) {
        // Errors always reach the log, even in silent mode
        if self.silent_mode {
            if let AppEvent::Error { context, error } = event {
                tracing::error!("{}: {}", context, error);
            }
            return;
        }

        match event {
            // Application lifecycle
            AppEvent::Starting => {
                println!("\n{}", RULE.bright_black());
                println!("  {}", "mountfs - Dual Backend Filesystem".white().bold());
                println!("  {} {}", "Version".dimmed(), env!("CARGO_PKG_VERSION").cyan());
                println!("{}\n", RULE.bright_black());
            }
            AppEvent::Ready { addr } => {
                println!("{}", RULE.green());
                println!("  {} {}", "Server".white(), addr.cyan());
                println!("{}\n", RULE.green());
            }
            AppEvent::Shutdown => {
                println!("\n{}", "Server shutting down".red());
            }

            // Configuration
            AppEvent::ConfigLoading { path } => {
                println!("  {} {}", "Loading config".dimmed(), path.cyan());
            }
            AppEvent::ConfigLoaded { uploads_root, remote_enabled } => {
                let mode = if remote_enabled { "remote".green() } else { "local only".yellow() };
                println!("  {} Uploads root {} ({})", "✓".green(), uploads_root.cyan(), mode);
            }
            AppEvent::ConfigCreated { path } => {
                tracing::warn!("Configuration file not found");
                tracing::info!("Created default configuration at: {}", path);
            }
            AppEvent::ConfigMigrated { added_fields } => {
                if !added_fields.is_empty() {
                    println!("  {} Config updated: added {}",
                        "↻".blue(),
                        added_fields.join(", ").dimmed()
                    );
                }
            }

            // Backends
            AppEvent::LocalRootCreated { path } => {
                println!("  {} Created {}", "+".green(), path.cyan());
            }
            AppEvent::BackendReady { routing, backend } => {
                println!("  {} {} {}", "✓".green(), format!("{:<6}", routing).white(), backend.cyan());
            }
            AppEvent::RemoteDisabled => {
                println!("  {} Remote storage disabled, uploads stay on disk", "⚠".yellow());
            }

            // Errors
            AppEvent::Error { context, error } => {
                tracing::error!("{}: {}", context, error);
            }
        }
    }
}
