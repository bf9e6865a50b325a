use clap::Subcommand;

use super::context::Context;
use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum JournalAction {
    /// Write a new entry
    Add {
        /// Mood from 1 (rough) to 5 (great)
        mood: u8,
        /// What happened today
        text: String,
        /// Trigger tag (repeatable)
        #[arg(long)]
        trigger: Vec<String>,
    },
    /// List entries, newest first
    List {
        /// Show at most this many entries
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an entry (undo with `journal undo`)
    Delete {
        /// Entry ID
        id: String,
    },
    /// Restore a recently deleted entry
    Undo {
        /// Entry ID (default: the most recent deletion)
        id: Option<String>,
    },
}

pub fn run(action: JournalAction) -> CmdResult {
    let mut ctx = Context::open()?;
    let ttl_secs = ctx.settings.journal.undo_ttl_secs;

    match action {
        JournalAction::Add {
            mood,
            text,
            trigger,
        } => {
            let triggers = (!trigger.is_empty()).then_some(trigger);
            let event = ctx.tracker.add_journal_entry(mood, &text, triggers)?;
            print_json(&event)?;
        }
        JournalAction::List { limit, json } => {
            let entries: Vec<_> = ctx.tracker.journal().recent(limit).collect();
            if json {
                print_json(&entries)?;
            } else if entries.is_empty() {
                println!("No journal entries yet.");
                if let Some(prompt) = ctx.tracker.summary().journal_prompt {
                    println!("Prompt: {prompt}");
                }
            } else {
                for entry in entries {
                    let triggers = entry
                        .triggers
                        .as_ref()
                        .map(|t| format!(" [{}]", t.join(", ")))
                        .unwrap_or_default();
                    println!(
                        "{}  mood {}/5  {}{}  ({})",
                        entry.created_at.format("%Y-%m-%d %H:%M"),
                        entry.mood,
                        entry.text,
                        triggers,
                        entry.id
                    );
                }
            }
        }
        JournalAction::Delete { id } => {
            let now = ctx.tracker.now();
            let (event, removed) = ctx
                .tracker
                .delete_journal_entry(&id)
                .ok_or_else(|| format!("no journal entry with id {id}"))?;
            let mut trash = ctx.flags.load_trash(ttl_secs);
            trash.push(removed, now);
            ctx.flags.save_trash(&trash);
            print_json(&event)?;
        }
        JournalAction::Undo { id } => {
            let now = ctx.tracker.now();
            let mut trash = ctx.flags.load_trash(ttl_secs);
            let entry = match id.as_deref() {
                Some(id) => trash.take(id, now),
                None => trash.take_latest(now),
            };
            ctx.flags.save_trash(&trash);
            let entry = entry.ok_or("nothing to undo")?;
            let event = ctx.tracker.restore_journal_entry(entry)?;
            print_json(&event)?;
        }
    }
    Ok(())
}
