use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use bbscope_store::{ListEntriesOptions, Platform, Store};
use bbscope_types::PollOptions;
use clap::CommandFactory;

use crate::args::{Cli, Commands};
use crate::config::Config;
use crate::output::Output;

pub fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let data_dir = match &cli.data_dir {
        Some(explicit) => bbscope_core::resolve_data_path(Some(explicit))?,
        None => bbscope_core::resolve_data_path(None)?,
    };
    let db_path = data_dir.join("bbscope.db");
    let config = Config::load_from(&data_dir.join("config.toml"))?;
    let output = Output::new();

    match command {
        Commands::Poll {
            platform,
            concurrency,
            no_ai,
        } => run_poll(&db_path, &config, platform.as_deref(), concurrency, no_ai, &output),

        Commands::List {
            platform,
            category,
            in_scope_only,
        } => {
            let store = Store::open(&db_path, 5_000).context("opening store")?;
            let options = ListEntriesOptions {
                platform,
                category,
                in_scope_only,
            };
            let entries = store.list_entries(&options)?;
            output.entries(&entries);
            Ok(())
        }

        Commands::Search { query } => {
            let store = Store::open(&db_path, 5_000).context("opening store")?;
            let entries = store.search_targets(&query)?;
            output.entries(&entries);
            Ok(())
        }

        Commands::Changes { n } => {
            let store = Store::open(&db_path, 5_000).context("opening store")?;
            let changes = store.list_recent_changes(n)?;
            output.changes(&changes);
            Ok(())
        }

        Commands::Stats => {
            let store = Store::open(&db_path, 5_000).context("opening store")?;
            let stats = store.get_stats()?;
            output.stats(&stats);
            Ok(())
        }

        Commands::Ignore { pattern, unignore } => {
            let store = Store::open(&db_path, 5_000).context("opening store")?;
            let changed = store.set_program_ignored_status(&pattern, !unignore)?;
            if unignore {
                println!("unignored {changed} program(s) matching {pattern:?}");
            } else {
                println!("ignored {changed} program(s) matching {pattern:?}");
            }
            Ok(())
        }
    }
}

fn run_poll(
    db_path: &std::path::Path,
    config: &Config,
    platform: Option<&str>,
    concurrency: usize,
    no_ai: bool,
    output: &Output,
) -> Result<()> {
    let store = Store::open(db_path, 5_000).context("opening store")?;
    let store = Arc::new(Mutex::new(store));

    let pollers: Vec<Box<dyn bbscope_providers::PlatformPoller>> = match platform {
        Some(name) => {
            let platform = Platform::from_str_opt(name)
                .with_context(|| format!("unknown platform: {name}"))?;
            vec![bbscope_providers::poller_for(platform)]
        }
        None => bbscope_providers::all_pollers(),
    };

    let mut settings = bbscope_coordinator::PlatformSettings::default();
    for platform in Platform::ALL {
        settings.auth.insert(platform, config.auth_for(platform));
        settings.options.insert(platform, PollOptions::default());
    }

    let coordinator_config = bbscope_coordinator::CoordinatorConfig {
        concurrency: concurrency.max(1),
        ai: if no_ai {
            None
        } else {
            config.ai.clone().map(bbscope_ai::AiConfig::from)
        },
    };

    let runtime = tokio::runtime::Runtime::new().context("building tokio runtime")?;
    let report = runtime.block_on(bbscope_coordinator::run_poll_cycle(
        store,
        &pollers,
        &settings,
        &coordinator_config,
    ));

    output.changes(&report.changes);
    for error in &report.errors {
        match &error.program_handle {
            Some(handle) => eprintln!("Error: [{}] {}: {}", error.platform, handle, error.message),
            None => eprintln!("Error: [{}] {}", error.platform, error.message),
        }
    }

    Ok(())
}
