mod cli;
mod config;
mod console;
mod model;
mod normalizer;
mod notifier;
mod parser;
mod session;
mod storage;
mod utils;

use clap::Parser as _;
use cli::Cli;
use config::load_config;
use notifier::ToastNotifier;
use parser::load_reference_table;
use session::Session;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout is the console UI
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let args = Cli::parse();

    let mut config = match load_config(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}", args.config.display(), e);
            return;
        }
    };
    if let Some(table) = args.table {
        config.reference_table_path = table;
    }

    let table = match load_reference_table(&config.reference_table_path) {
        Ok(t) => Arc::new(t),
        Err(e) => {
            error!(
                "Reference table load error ({}): {}",
                config.reference_table_path.display(),
                e
            );
            return;
        }
    };

    if table.is_empty() {
        warn!("Reference table is empty; no make or model will be recognised.");
    }

    let toasts = Arc::new(ToastNotifier::new(config.notification_ttl()));
    info!("Notifications expire after {:?}", toasts.ttl());

    let mut session = Session::new(table, toasts.clone());
    console::listen_for_commands(&mut session, &toasts).await;

    info!(
        "Session ended with {} saved car(s).",
        session.saved().len()
    );
}
