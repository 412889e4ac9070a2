use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use bbscope_providers::PlatformPoller;
use bbscope_store::Store;
use bbscope_types::{Platform, ScopeChange};
use tokio::sync::Semaphore;

use crate::config::{CoordinatorConfig, PlatformSettings};

/// Conservative guard against a broken adapter reporting zero handles for a
/// platform that already has programs on file: skip the cycle instead of
/// disabling everything.
pub const PLATFORM_GUARD_THRESHOLD: usize = 10;

/// One non-fatal failure recorded during a cycle: a platform that couldn't
/// authenticate, a program whose scope fetch or upsert failed, or a
/// platform skipped by the safety guard.
#[derive(Debug, Clone)]
pub struct CycleError {
    pub platform: Platform,
    pub program_handle: Option<String>,
    pub message: String,
}

/// Outcome of a full polling cycle: every `ScopeChange` emitted, plus every
/// non-fatal error encountered along the way. Never returns `Err` itself —
/// per-platform and per-program failures are data, not control flow.
#[derive(Debug, Default)]
pub struct CycleReport {
    pub changes: Vec<ScopeChange>,
    pub errors: Vec<CycleError>,
}

/// Runs one polling cycle across every poller in `pollers`, writing results
/// into `store`. Mirrors the per-platform procedure: authenticate, list
/// handles, guard, dispatch a bounded worker pool, sync vanished programs,
/// print new changes (suppressed on a platform's first-ever run).
pub async fn run_poll_cycle(
    store: Arc<Mutex<Store>>,
    pollers: &[Box<dyn PlatformPoller>],
    settings: &PlatformSettings,
    config: &CoordinatorConfig,
) -> CycleReport {
    let mut report = CycleReport::default();

    for poller in pollers {
        let platform = match Platform::from_str_opt(poller.name()) {
            Some(p) => p,
            None => continue,
        };

        run_platform_cycle(&store, poller.as_ref(), platform, settings, config, &mut report).await;
    }

    report
}

async fn run_platform_cycle(
    store: &Arc<Mutex<Store>>,
    poller: &dyn PlatformPoller,
    platform: Platform,
    settings: &PlatformSettings,
    config: &CoordinatorConfig,
    report: &mut CycleReport,
) {
    let auth = settings.auth_for(platform);
    let opts = settings.options_for(platform);

    if let Err(e) = poller.authenticate(&auth).await {
        report.errors.push(CycleError {
            platform,
            program_handle: None,
            message: format!("authentication failed: {e}"),
        });
        return;
    }

    let (ignored_urls, active_count) = {
        let store = store.lock().expect("store mutex poisoned");
        let ignored = store.get_ignored_program_urls(platform).unwrap_or_default();
        let count = store.get_active_program_count(platform).unwrap_or(0);
        (ignored.into_iter().collect::<HashSet<_>>(), count)
    };
    let first_run = active_count == 0;

    let handles = match poller.list_program_handles(&opts).await {
        Ok(h) => h,
        Err(e) => {
            report.errors.push(CycleError {
                platform,
                program_handle: None,
                message: format!("failed to list program handles: {e}"),
            });
            return;
        }
    };

    if handles.is_empty() && active_count > PLATFORM_GUARD_THRESHOLD {
        report.errors.push(CycleError {
            platform,
            program_handle: None,
            message: format!(
                "poller returned zero handles while {active_count} programs are on file; skipping platform this cycle"
            ),
        });
        return;
    }

    let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1)));
    let mut tasks = Vec::new();

    for handle in handles {
        let semaphore = semaphore.clone();
        let store = store.clone();
        let ai_config = config.ai.clone();
        let ignored_urls = &ignored_urls;
        let opts = opts.clone();

        tasks.push(async move {
            let _permit = semaphore.acquire().await.expect("semaphore not closed");
            poll_one_program(poller, platform, &handle, &opts, store, ai_config, ignored_urls).await
        });
    }

    let results = futures::future::join_all(tasks).await;

    let mut polled_urls = Vec::new();
    for result in results {
        match result {
            Ok((url, mut changes)) => {
                polled_urls.push(url);
                report.changes.append(&mut changes);
            }
            Err(e) => report.errors.push(e),
        }
    }

    let sync_result = {
        let mut store = store.lock().expect("store mutex poisoned");
        store.sync_platform_programs(platform, &polled_urls)
    };
    match sync_result {
        Ok(mut changes) => report.changes.append(&mut changes),
        Err(e) => report.errors.push(CycleError {
            platform,
            program_handle: None,
            message: format!("failed to sync vanished programs: {e}"),
        }),
    }

    let log_result = {
        let store = store.lock().expect("store mutex poisoned");
        store.log_changes(&report.changes)
    };
    if let Err(e) = log_result {
        report.errors.push(CycleError {
            platform,
            program_handle: None,
            message: format!("failed to log changes: {e}"),
        });
    }

    if !first_run {
        for change in &report.changes {
            print_change(change);
        }
    }
}

async fn poll_one_program(
    poller: &dyn PlatformPoller,
    platform: Platform,
    handle: &str,
    opts: &bbscope_types::PollOptions,
    store: Arc<Mutex<Store>>,
    ai_config: Option<bbscope_ai::AiConfig>,
    ignored_urls: &HashSet<String>,
) -> Result<(String, Vec<ScopeChange>), CycleError> {
    let program_data = poller
        .fetch_program_scope(handle, opts)
        .await
        .map_err(|e| CycleError {
            platform,
            program_handle: Some(handle.to_string()),
            message: format!("failed to fetch scope: {e}"),
        })?;

    let url = bbscope_normalize::canonicalize_program_url(&program_data.url);

    if ignored_urls.contains(&url) {
        return Ok((url, Vec::new()));
    }

    let mut entries = crate::build_entries::build_entries(&url, platform, handle, program_data.all_items())
        .map_err(|e| CycleError {
            platform,
            program_handle: Some(handle.to_string()),
            message: format!("failed to build entries: {e}"),
        })?;

    if let Some(ai_config) = ai_config {
        let client = bbscope_ai::AiClient::new(ai_config);
        bbscope_ai::enhance_program(&client, &url, platform, handle, &mut entries).await;
    }

    let changes = {
        let mut store = store.lock().expect("store mutex poisoned");
        store
            .upsert_program_entries(&url, platform, handle, &entries)
            .map_err(|e| {
                let message = if e.is_scope_wipe() {
                    format!("{e}")
                } else {
                    format!("failed to upsert scope: {e}")
                };
                CycleError {
                    platform,
                    program_handle: Some(handle.to_string()),
                    message,
                }
            })?
    };

    Ok((url, changes))
}

fn print_change(change: &ScopeChange) {
    let marker = match change.change_type {
        bbscope_types::ChangeType::Added => "+",
        bbscope_types::ChangeType::Updated => "~",
        bbscope_types::ChangeType::Removed => "-",
    };
    println!(
        "{marker} [{}] {} {} ({})",
        change.platform, change.handle, change.target_normalized, change.category
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use bbscope_testing::{fixtures, MockPoller};

    fn acme_poller() -> Box<dyn PlatformPoller> {
        Box::new(
            MockPoller::new("hackerone")
                .with_handles(vec!["acme".to_string()])
                .with_program(fixtures::program_data(
                    "https://hackerone.com/acme",
                    vec![fixtures::raw_item("acme.example.com", "website")],
                )),
        )
    }

    #[tokio::test]
    async fn first_poll_populates_store_without_errors() {
        let store = Arc::new(Mutex::new(Store::open_in_memory().unwrap()));

        let report = run_poll_cycle(
            store.clone(),
            &[acme_poller()],
            &PlatformSettings::default(),
            &CoordinatorConfig::default(),
        )
        .await;

        assert!(report.errors.is_empty(), "{:?}", report.errors);
        assert_eq!(report.changes.len(), 1);

        let count = store
            .lock()
            .unwrap()
            .get_active_program_count(Platform::HackerOne)
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn ignored_program_is_fetched_but_not_persisted_on_later_cycles() {
        let store = Arc::new(Mutex::new(Store::open_in_memory().unwrap()));
        let settings = PlatformSettings::default();
        let config = CoordinatorConfig::default();

        // First cycle: populates the program so it exists to be ignored.
        let first = run_poll_cycle(store.clone(), &[acme_poller()], &settings, &config).await;
        assert!(first.errors.is_empty(), "{:?}", first.errors);
        assert_eq!(first.changes.len(), 1);

        {
            let store = store.lock().unwrap();
            let changed = store
                .set_program_ignored_status("hackerone.com/acme", true)
                .unwrap();
            assert_eq!(changed, 1);
        }

        // Second cycle: fetch still happens, but the ignored program is
        // neither diffed nor disabled.
        let second = run_poll_cycle(store.clone(), &[acme_poller()], &settings, &config).await;
        assert!(second.errors.is_empty(), "{:?}", second.errors);
        assert!(second.changes.is_empty());

        let count = store
            .lock()
            .unwrap()
            .get_active_program_count(Platform::HackerOne)
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn authentication_failure_is_logged_and_skips_platform() {
        let store = Arc::new(Mutex::new(Store::open_in_memory().unwrap()));
        let poller: Box<dyn PlatformPoller> =
            Box::new(MockPoller::new("hackerone").failing_auth("bad token"));

        let report = run_poll_cycle(
            store.clone(),
            &[poller],
            &PlatformSettings::default(),
            &CoordinatorConfig::default(),
        )
        .await;

        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].message.contains("bad token"));
        assert!(report.changes.is_empty());
    }
}
