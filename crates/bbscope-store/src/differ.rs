use std::collections::HashMap;

use bbscope_types::{ChangeType, Platform, ScopeChange, ScopeEntry};
use chrono::Utc;
use rusqlite::Connection;

use crate::queries::{change, program, target, variant};
use crate::records::{AiVariantRow, RawTargetRow};
use crate::{Error, Result};

/// `UpsertProgramEntries`. Runs the five-phase diff-and-apply described in
/// the component design: get-or-create the program, classify every
/// incoming entry against what's stored, then apply adds/updates/touches/
/// variant-ops/deletes as five separate short transactions.
pub fn upsert_program_entries(
    conn: &mut Connection,
    program_url: &str,
    platform: Platform,
    handle: &str,
    entries: &[ScopeEntry],
) -> Result<Vec<ScopeChange>> {
    let now = Utc::now();

    // Look up what's already stored *before* touching the program row, so
    // the scope-wipe guard below can abort without any committed mutation.
    let stored = match program::get_by_url(conn, program_url)? {
        Some(row) => target::list_for_program(conn, row.id)?,
        None => Vec::new(),
    };

    // Safety guard: a poller returning nothing for a program that already
    // has stored scope is far more likely a broken adapter than an actual
    // full removal. Must run before get_or_create_and_touch commits, or an
    // abort here would still leave last_seen_at/disabled mutated.
    if entries.is_empty() && !stored.is_empty() {
        return Err(Error::AbortingScopeWipe {
            program_url: program_url.to_string(),
        });
    }

    let program_row = {
        let tx = conn.transaction()?;
        let row = program::get_or_create_and_touch(&tx, platform.as_str(), handle, program_url, now)?;
        tx.commit()?;
        row
    };

    let mut stored_by_key: HashMap<String, RawTargetRow> = HashMap::new();
    for row in stored {
        stored_by_key.insert(row.identity_key(), row);
    }

    // De-duplicate incoming entries by identity key; first occurrence wins.
    // Drop entries with an empty category (rejected per the component spec).
    let mut incoming_by_key: HashMap<String, &ScopeEntry> = HashMap::new();
    let mut incoming_order: Vec<String> = Vec::new();
    for entry in entries {
        if entry.category.as_str().is_empty() {
            continue;
        }
        let key = bbscope_types::RawTarget::identity_key(&entry.target, entry.category);
        if !incoming_by_key.contains_key(&key) {
            incoming_order.push(key.clone());
            incoming_by_key.insert(key, entry);
        }
    }

    // (target_id, entry) pairs that survive into this cycle, whether newly
    // added, updated, or merely touched — all of them need their AI
    // variants reconciled in phase 4.
    let mut adds: Vec<&ScopeEntry> = Vec::new();
    let mut updates: Vec<(i64, &ScopeEntry)> = Vec::new();
    let mut touches: Vec<(i64, &ScopeEntry)> = Vec::new();
    let mut removed: Vec<RawTargetRow> = Vec::new();

    for key in &incoming_order {
        let entry = incoming_by_key[key];
        match stored_by_key.remove(key) {
            None => adds.push(entry),
            Some(row) => {
                let description_changed = row.description.as_deref() != entry.description.as_deref();
                let in_scope_changed = row.in_scope != entry.in_scope;
                let is_bbp_changed = row.is_bbp != entry.is_bbp;
                if description_changed || in_scope_changed || is_bbp_changed {
                    updates.push((row.id, entry));
                } else {
                    touches.push((row.id, entry));
                }
            }
        }
    }
    // Whatever's left in stored_by_key had no matching incoming entry.
    removed.extend(stored_by_key.into_values());

    let mut changes = Vec::new();

    // Phase 1: adds.
    let mut added: Vec<(i64, &ScopeEntry)> = Vec::new();
    {
        let tx = conn.transaction()?;
        for entry in adds.iter().copied() {
            let id = target::insert(
                &tx,
                program_row.id,
                &entry.target,
                entry.category.as_str(),
                entry.description.as_deref(),
                entry.in_scope,
                entry.is_bbp,
                now,
            )?;
            added.push((id, entry));
            changes.push(new_change(now, program_url, platform, handle, entry, None, ChangeType::Added));
        }
        tx.commit()?;
    }

    // Phase 2: updates.
    {
        let tx = conn.transaction()?;
        for (id, entry) in &updates {
            target::update(&tx, *id, entry.description.as_deref(), entry.in_scope, entry.is_bbp, now)?;
            changes.push(new_change(now, program_url, platform, handle, entry, None, ChangeType::Updated));
        }
        tx.commit()?;
    }

    // Phase 3: touches.
    {
        let tx = conn.transaction()?;
        for (id, _) in &touches {
            target::touch(&tx, *id, now)?;
        }
        tx.commit()?;
    }

    // Phase 4: reconcile AI variants for every surviving or added target.
    {
        let tx = conn.transaction()?;
        for (id, entry) in added.iter().chain(updates.iter()).chain(touches.iter()) {
            reconcile_variants(&tx, *id, entry, now, program_url, platform, handle, &mut changes)?;
        }
        tx.commit()?;
    }

    // Phase 5: raw deletes (cascades variants via FK ON DELETE CASCADE).
    {
        let tx = conn.transaction()?;
        for row in &removed {
            target::delete(&tx, row.id)?;
            changes.push(ScopeChange {
                occurred_at: now,
                program_url: program_url.to_string(),
                platform,
                handle: handle.to_string(),
                target_normalized: row.target.clone(),
                target_raw: row.target.clone(),
                target_ai_normalized: None,
                category: row.category.clone(),
                in_scope: row.in_scope,
                is_bbp: row.is_bbp,
                change_type: ChangeType::Removed,
            });
        }
        tx.commit()?;
    }

    Ok(changes)
}

#[allow(clippy::too_many_arguments)]
fn reconcile_variants(
    conn: &Connection,
    target_id: i64,
    entry: &ScopeEntry,
    now: chrono::DateTime<Utc>,
    program_url: &str,
    platform: Platform,
    handle: &str,
    changes: &mut Vec<ScopeChange>,
) -> Result<()> {
    let stored: Vec<AiVariantRow> = variant::list_for_target(conn, target_id)?;
    let mut stored_by_value: HashMap<String, AiVariantRow> =
        stored.into_iter().map(|v| (v.target_ai_normalized.clone(), v)).collect();

    for incoming in &entry.variants {
        let category = incoming
            .category
            .as_deref()
            .filter(|c| bbscope_types::Category::from_canonical_str(c).is_some());

        match stored_by_value.remove(&incoming.value) {
            None => {
                variant::insert(conn, target_id, &incoming.value, category, incoming.in_scope, now)?;
                changes.push(variant_change(now, program_url, platform, handle, entry, incoming, ChangeType::Added));
            }
            Some(existing) => {
                let category_changed = existing.category.as_deref() != category;
                let in_scope_changed = existing.in_scope != incoming.in_scope;
                if category_changed || in_scope_changed {
                    variant::update(conn, existing.id, category, incoming.in_scope, now)?;
                    changes.push(variant_change(now, program_url, platform, handle, entry, incoming, ChangeType::Updated));
                }
            }
        }
    }

    // Anything left in stored_by_value was not present in incoming.
    for (_, stale) in stored_by_value {
        variant::delete(conn, stale.id)?;
        changes.push(ScopeChange {
            occurred_at: now,
            program_url: program_url.to_string(),
            platform,
            handle: handle.to_string(),
            target_normalized: entry.target.clone(),
            target_raw: entry.target.clone(),
            target_ai_normalized: Some(stale.target_ai_normalized),
            category: entry.category.as_str().to_string(),
            in_scope: entry.in_scope,
            is_bbp: entry.is_bbp,
            change_type: ChangeType::Removed,
        });
    }

    Ok(())
}

fn new_change(
    occurred_at: chrono::DateTime<Utc>,
    program_url: &str,
    platform: Platform,
    handle: &str,
    entry: &ScopeEntry,
    variant_value: Option<&str>,
    change_type: ChangeType,
) -> ScopeChange {
    ScopeChange {
        occurred_at,
        program_url: program_url.to_string(),
        platform,
        handle: handle.to_string(),
        target_normalized: entry.target.clone(),
        target_raw: entry.target.clone(),
        target_ai_normalized: variant_value.map(|v| v.to_string()),
        category: entry.category.as_str().to_string(),
        in_scope: entry.in_scope,
        is_bbp: entry.is_bbp,
        change_type,
    }
}

fn variant_change(
    occurred_at: chrono::DateTime<Utc>,
    program_url: &str,
    platform: Platform,
    handle: &str,
    entry: &ScopeEntry,
    variant: &bbscope_types::TargetVariant,
    change_type: ChangeType,
) -> ScopeChange {
    new_change(occurred_at, program_url, platform, handle, entry, Some(&variant.value), change_type)
}

/// `SyncPlatformPrograms`: disable every active program on `platform` whose
/// url isn't in `polled_urls`, delete its raw targets, and emit one
/// synthetic `removed` row per program. One transaction per program.
pub fn sync_platform_programs(
    conn: &mut Connection,
    platform: Platform,
    polled_urls: &[String],
) -> Result<Vec<ScopeChange>> {
    let vanished = program::list_active_for_platform_not_in(conn, platform.as_str(), polled_urls)?;

    let mut changes = Vec::new();
    for row in vanished {
        let tx = conn.transaction()?;
        program::disable(&tx, row.id)?;
        program::delete_targets_for_program(&tx, row.id)?;
        tx.commit()?;

        changes.push(ScopeChange::program_removed(row.url.clone(), platform, row.handle.clone()));
    }

    Ok(changes)
}

pub fn log_changes(conn: &Connection, changes: &[ScopeChange]) -> Result<()> {
    for c in changes {
        change::insert(conn, c)?;
    }
    Ok(())
}
