pub mod command_handler;
pub mod listener;

pub use listener::listen_for_commands;
