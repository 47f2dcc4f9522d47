// console/command_handler.rs

use crate::model::{AttributeField, AttributeRecord, Severity};
use crate::notifier::{NotificationSink, ToastNotifier};
use crate::session::Session;
use tracing::{info, warn};

pub const HELP_TEXT: &str = "📋 How to use Find My Car:\n\
    • Type a description of your car (e.g. \"Blue Toyota Corolla 2015 1.6L petrol\") or /submit <text>\n\
    • /show — current car details\n\
    • /edit <field> — start editing a field (colour, make, model, bodyType, fuel, regYear, transmission, engineSize)\n\
    • /save <field> <value> — store a corrected value\n\
    • /cancel — stop editing\n\
    • /clear — discard the current details\n\
    • /add — save the car to your list\n\
    • /saved — list saved cars\n\
    • /delete <index> — remove a saved car\n\
    • /export — saved cars as JSON\n\
    • /toasts — active notifications\n\
    • /dismiss <id> — close a notification\n\
    • /about — about this tool\n\
    • /quit — exit";

pub const ABOUT_TEXT: &str = "ℹ️ Find My Car turns a free-text car description into make, model, \
    colour, body type, fuel, registration year, transmission and engine size.";

/// What the listener should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// Handles one line of input and returns what to print.
pub fn handle_command(input: &str, session: &mut Session, toasts: &ToastNotifier) -> Reply {
    let input = input.trim();
    if input.is_empty() {
        return Reply::Text(String::new());
    }
    if !input.starts_with('/') {
        return submit(input, session, toasts);
    }

    let (command, rest) = match input.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (input, ""),
    };
    info!("Handling command: {}", command);

    match command {
        "/submit" => submit(rest, session, toasts),
        "/show" => Reply::Text(render_draft(session)),
        "/clear" => {
            session.clear();
            Reply::Text(with_toasts(render_draft(session), toasts))
        }
        "/add" => {
            let _ = session.add();
            Reply::Text(with_toasts(render_saved(session), toasts))
        }
        "/edit" => match rest.parse::<AttributeField>() {
            Ok(field) => {
                session.begin_edit(field);
                let current = session.draft().map(|d| d.get(field)).unwrap_or("-");
                Reply::Text(format!(
                    "✏️ Editing {} (current: {}). Use /save {} <value> or /cancel.",
                    field.display_name(),
                    current,
                    field
                ))
            }
            Err(e) => Reply::Text(format!("⚠️ {}. Usage: /edit <field>", e)),
        },
        "/save" => {
            let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            match name.parse::<AttributeField>() {
                Ok(field) => {
                    let _ = session.save_edit(field, value.trim());
                    Reply::Text(with_toasts(render_draft(session), toasts))
                }
                Err(e) => Reply::Text(format!("⚠️ {}. Usage: /save <field> <value>", e)),
            }
        }
        "/cancel" => {
            session.cancel_edit();
            Reply::Text(render_draft(session))
        }
        "/saved" => Reply::Text(render_saved(session)),
        "/delete" => match rest.parse::<usize>() {
            Ok(index) => {
                let _ = session.delete_saved(index);
                Reply::Text(with_toasts(render_saved(session), toasts))
            }
            Err(_) => Reply::Text("⚠️ Usage: /delete <index>".to_string()),
        },
        "/export" => match serde_json::to_string_pretty(session.saved().all()) {
            Ok(json) => Reply::Text(json),
            Err(e) => {
                warn!("/export error: {:?}", e);
                Reply::Text(format!("❌ Export failed: {}", e))
            }
        },
        "/toasts" => Reply::Text(render_toasts(toasts)),
        "/dismiss" => match rest.parse::<u64>() {
            Ok(id) if toasts.is_active(id) => {
                toasts.dismiss(id);
                Reply::Text(render_toasts(toasts))
            }
            Ok(id) => Reply::Text(format!("⚠️ No notification with id {}.", id)),
            Err(_) => Reply::Text("⚠️ Usage: /dismiss <id>".to_string()),
        },
        "/help" => Reply::Text(HELP_TEXT.to_string()),
        "/about" => Reply::Text(ABOUT_TEXT.to_string()),
        "/quit" | "/exit" => Reply::Quit,
        _ => Reply::Text("🤖 Unknown command. Type /help for a list of commands.".to_string()),
    }
}

fn submit(text: &str, session: &mut Session, toasts: &ToastNotifier) -> Reply {
    if let Err(e) = session.submit(text) {
        if e.is_advisory() {
            info!("Draft kept for manual correction.");
        }
    }
    Reply::Text(with_toasts(render_draft(session), toasts))
}

fn with_toasts(mut body: String, toasts: &ToastNotifier) -> String {
    let rendered = render_toasts(toasts);
    if !rendered.is_empty() {
        body.push_str("\n\n");
        body.push_str(&rendered);
    }
    body
}

fn render_record(car: &AttributeRecord, editing: Option<AttributeField>) -> String {
    car.entries()
        .map(|(field, value)| {
            let marker = if editing == Some(field) { " ✏️" } else { "" };
            format!("{}: {}{}", field.display_name(), value, marker)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_draft(session: &Session) -> String {
    match session.draft() {
        Some(car) => format!("🚗 Car details:\n{}", render_record(car, session.editing())),
        None => "📭 No car details. Describe your car to get started.".to_string(),
    }
}

pub fn render_saved(session: &Session) -> String {
    let saved = session.saved();
    if saved.is_empty() {
        return "📭 No saved cars.".to_string();
    }

    let mut msg = String::from("🗂 Saved cars:\n");
    for (i, car) in saved.all().iter().enumerate() {
        msg.push_str(&format!("[{}]\n{}\n\n", i, render_record(car, None)));
    }
    msg.trim_end().to_string()
}

pub fn render_toasts(toasts: &ToastNotifier) -> String {
    let active = toasts.active();
    if active.is_empty() {
        return String::new();
    }

    let mut msg = String::from("🔔 Notifications:");
    for toast in active {
        let icon = match toast.severity {
            Severity::Error => "❌",
            Severity::Success => "✅",
        };
        msg.push_str(&format!(
            "\n[{}] {} {} ({})",
            toast.id,
            icon,
            toast.message,
            toast.created_at.format("%H:%M:%S")
        ));
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReferenceTable;
    use std::sync::Arc;
    use std::time::Duration;

    fn setup() -> (Session, Arc<ToastNotifier>) {
        let table = ReferenceTable::default()
            .with_models("Toyota", ["Corolla", "Yaris"])
            .with_models("Ford", ["Focus"]);
        let toasts = Arc::new(ToastNotifier::new(Duration::from_secs(10)));
        (Session::new(Arc::new(table), toasts.clone()), toasts)
    }

    fn text(reply: Reply) -> String {
        match reply {
            Reply::Text(t) => t,
            Reply::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn bare_text_is_submitted() {
        let (mut s, toasts) = setup();
        let out = text(handle_command("blue toyota corolla 2015", &mut s, &toasts));
        assert!(out.contains("Make: Toyota"));
        assert!(out.contains("Model: COROLLA"));
        assert!(out.contains("Body Type: Unknown"));
        assert!(out.contains("Car details deduced successfully!"));
    }

    #[test]
    fn full_flow_edit_add_delete() {
        let (mut s, toasts) = setup();
        handle_command("/submit ford mondeo", &mut s, &toasts);
        assert_eq!(s.draft().unwrap().model, "Unknown");

        let out = text(handle_command("/edit model", &mut s, &toasts));
        assert!(out.starts_with("✏️ Editing Model"));
        assert_eq!(s.editing(), Some(AttributeField::Model));

        handle_command("/save model MONDEO", &mut s, &toasts);
        assert_eq!(s.draft().unwrap().model, "MONDEO");

        let out = text(handle_command("/add", &mut s, &toasts));
        assert!(out.contains("[0]"));
        assert_eq!(s.saved().len(), 1);

        handle_command("/delete 0", &mut s, &toasts);
        assert!(s.saved().is_empty());
    }

    #[test]
    fn save_value_may_contain_spaces() {
        let (mut s, toasts) = setup();
        handle_command("toyota yaris", &mut s, &toasts);
        handle_command("/save bodyType Estate Car/Station Wagon", &mut s, &toasts);
        assert_eq!(s.draft().unwrap().body_type, "Estate Car/Station Wagon");
    }

    #[test]
    fn empty_submit_reports_error() {
        let (mut s, toasts) = setup();
        let out = text(handle_command("/submit", &mut s, &toasts));
        assert!(out.contains("Please enter a valid car description."));
        assert!(s.draft().is_none());
    }

    #[test]
    fn bad_arguments_get_usage() {
        let (mut s, toasts) = setup();
        assert!(text(handle_command("/delete x", &mut s, &toasts)).contains("Usage"));
        assert!(text(handle_command("/edit wheels", &mut s, &toasts)).contains("unknown field"));
        assert!(text(handle_command("/dismiss", &mut s, &toasts)).contains("Usage"));
        assert!(text(handle_command("/dismiss 42", &mut s, &toasts)).contains("No notification"));
        assert!(text(handle_command("/frobnicate", &mut s, &toasts)).contains("Unknown command"));
    }

    #[test]
    fn dismiss_closes_toast() {
        let (mut s, toasts) = setup();
        handle_command("/add", &mut s, &toasts);
        let id = toasts.active()[0].id;
        let out = text(handle_command(&format!("/dismiss {}", id), &mut s, &toasts));
        assert!(out.is_empty());
        assert!(toasts.active().is_empty());
    }

    #[test]
    fn export_is_json_array() {
        let (mut s, toasts) = setup();
        handle_command("toyota corolla", &mut s, &toasts);
        handle_command("/add", &mut s, &toasts);
        let out = text(handle_command("/export", &mut s, &toasts));
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json[0]["make"], "Toyota");
        assert_eq!(json[0]["regYear"], "Unknown");
    }

    #[test]
    fn quit_ends_session() {
        let (mut s, toasts) = setup();
        assert_eq!(handle_command("/quit", &mut s, &toasts), Reply::Quit);
    }
}
