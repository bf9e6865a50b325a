use rewire_core::config::variants;

use super::CmdResult;

pub fn run() -> CmdResult {
    for cfg in variants::all() {
        println!("{:<10} {:<12} {}", cfg.id, cfg.name, cfg.tagline);
    }
    Ok(())
}
