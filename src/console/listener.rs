// console/listener.rs

use crate::console::command_handler::{Reply, handle_command};
use crate::notifier::ToastNotifier;
use crate::session::Session;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, stdin};
use tracing::{info, warn};

/// Reads commands from stdin until EOF or `/quit`.
pub async fn listen_for_commands(session: &mut Session, toasts: &ToastNotifier) {
    let mut lines = BufReader::new(stdin()).lines();
    println!("🚗 Find My Car. Describe your car, or type /help.");

    loop {
        print!("> ");
        if let Err(e) = std::io::stdout().flush() {
            warn!("stdout flush failed: {:?}", e);
        }

        match lines.next_line().await {
            Ok(Some(line)) => match handle_command(&line, session, toasts) {
                Reply::Text(text) => {
                    if !text.is_empty() {
                        println!("{}", text);
                    }
                }
                Reply::Quit => {
                    info!("Quit requested.");
                    break;
                }
            },
            Ok(None) => {
                info!("Input closed.");
                break;
            }
            Err(e) => {
                warn!("stdin read error: {:?}", e);
                break;
            }
        }
    }
}
