use bbscope_store::{ChangeType, Entry, EntrySource, ScopeChange, Stats};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Decides between a colored table and newline-delimited JSON the way the
/// teacher's `ConsoleRenderer` decides between plain and JSON rendering,
/// except the choice here is driven by the terminal itself rather than a
/// `--format` flag: a TTY gets a table, a pipe gets NDJSON.
pub struct Output {
    json_mode: bool,
}

impl Output {
    pub fn new() -> Self {
        Output {
            json_mode: !std::io::stdout().is_terminal(),
        }
    }

    fn print_ndjson<T: Serialize>(&self, rows: &[T]) {
        for row in rows {
            match serde_json::to_string(row) {
                Ok(line) => println!("{line}"),
                Err(e) => eprintln!("Error: failed to serialize row: {e}"),
            }
        }
    }

    pub fn entries(&self, entries: &[Entry]) {
        if self.json_mode {
            return self.print_ndjson(entries);
        }

        if entries.is_empty() {
            println!("no scope entries");
            return;
        }

        println!(
            "{:<10} {:<20} {:<10} {:<6} {}",
            "PLATFORM".bold(),
            "HANDLE".bold(),
            "CATEGORY".bold(),
            "SRC".bold(),
            "TARGET".bold()
        );
        for entry in entries {
            let scope_marker = if entry.in_scope {
                "in".green().to_string()
            } else {
                "out".red().to_string()
            };
            let source = match entry.source {
                EntrySource::Raw => "raw",
                EntrySource::Ai => "ai",
                EntrySource::Historical => "hist",
            };
            println!(
                "{:<10} {:<20} {:<10} {:<6} {} ({scope_marker})",
                entry.platform.to_string(),
                entry.handle,
                entry.category.to_string().yellow(),
                source,
                entry.target
            );
        }
    }

    pub fn changes(&self, changes: &[ScopeChange]) {
        if self.json_mode {
            return self.print_ndjson(changes);
        }

        if changes.is_empty() {
            println!("no changes recorded");
            return;
        }

        for change in changes {
            let marker = match change.change_type {
                ChangeType::Added => "+".green().to_string(),
                ChangeType::Updated => "~".yellow().to_string(),
                ChangeType::Removed => "-".red().to_string(),
            };
            println!(
                "{marker} [{}] {} {} ({}) @ {}",
                change.platform,
                change.handle,
                change.target_normalized,
                change.category,
                change.occurred_at
            );
        }
    }

    pub fn stats(&self, stats: &Stats) {
        if self.json_mode {
            match serde_json::to_string(stats) {
                Ok(line) => println!("{line}"),
                Err(e) => eprintln!("Error: failed to serialize stats: {e}"),
            }
            return;
        }

        println!("{}", "bbscope store stats".bold());
        println!("  active programs:  {}", stats.active_programs);
        println!("  total targets:    {}", stats.total_targets);
        println!("  in-scope targets: {}", stats.in_scope_targets);
        println!("  total changes:    {}", stats.total_changes);
    }
}

impl Default for Output {
    fn default() -> Self {
        Output::new()
    }
}
