//! Optional AI overlay pass: given a batch of already-normalized
//! [`ScopeEntry`] values for one program, asks a configured AI provider for
//! alternative readings of each target and attaches them as `variants`.
//!
//! This crate never touches `target`/`category`/`in_scope` on the entries
//! it's handed — it only appends to `variants`. Every failure mode (network
//! error, bad JSON, an unparseable category in the response) is swallowed
//! here: a program that can't be enhanced is upserted with empty variants,
//! it never blocks the poll.

mod client;
mod config;
mod error;

pub use client::AiClient;
pub use config::AiConfig;
pub use error::{Error, Result};

use bbscope_types::{Category, Platform, ScopeEntry, TargetVariant};

/// Runs the AI overlay over `entries` in place, batching requests per
/// [`AiConfig::max_batch`] and bounding concurrency per
/// [`AiConfig::max_concurrency`] (enforced inside [`AiClient`]). Batches run
/// concurrently; a failed batch leaves its entries' `variants` untouched
/// (empty) rather than aborting the remaining batches.
pub async fn enhance_program(
    client: &AiClient,
    program_url: &str,
    platform: Platform,
    handle: &str,
    entries: &mut [ScopeEntry],
) {
    let batch_size = client.max_batch();
    let mut futures = Vec::new();

    for (batch_index, chunk) in entries.chunks(batch_size).enumerate() {
        futures.push(async move {
            let result = client
                .normalize_batch(program_url, platform, handle, chunk)
                .await;
            (batch_index, result)
        });
    }

    let results = futures::future::join_all(futures).await;

    for (batch_index, result) in results {
        let variants_per_entry = match result {
            Ok(v) => v,
            Err(_) => continue,
        };

        let start = batch_index * batch_size;
        for (offset, variants) in variants_per_entry.into_iter().enumerate() {
            if let Some(entry) = entries.get_mut(start + offset) {
                entry.variants = filter_valid_variants(variants);
            }
        }
    }
}

/// Drops variants whose declared category string isn't one of the closed
/// vocabulary's canonical names. A `None` category (the AI pass agreeing
/// with the raw category) always passes through.
fn filter_valid_variants(variants: Vec<TargetVariant>) -> Vec<TargetVariant> {
    variants
        .into_iter()
        .filter(|v| match &v.category {
            None => true,
            Some(cat) => Category::from_canonical_str(cat).is_some(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bbscope_types::TargetVariant;

    #[test]
    fn filter_valid_variants_drops_unknown_categories() {
        let variants = vec![
            TargetVariant {
                value: "a.example.com".to_string(),
                category: Some("url".to_string()),
                in_scope: None,
            },
            TargetVariant {
                value: "b.example.com".to_string(),
                category: Some("not-a-real-category".to_string()),
                in_scope: None,
            },
            TargetVariant {
                value: "c.example.com".to_string(),
                category: None,
                in_scope: Some(false),
            },
        ];

        let kept = filter_valid_variants(variants);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].value, "a.example.com");
        assert_eq!(kept[1].value, "c.example.com");
    }
}
