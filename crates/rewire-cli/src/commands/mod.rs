pub mod checkin;
pub mod config;
pub mod context;
pub mod journal;
pub mod status;
pub mod streak;
pub mod variants;
pub mod watch;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub fn print_json<T: serde::Serialize>(value: &T) -> rewire_core::error::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
