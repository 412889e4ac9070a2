//! Target canonicalization, category unification, and root-domain grouping.
//!
//! This crate has no knowledge of platforms or storage. It only answers:
//! given a raw target string and a raw category string from some provider,
//! what's the canonical identity, and which closed-vocabulary bucket does it
//! belong to.

mod category;
mod root_domain;
mod target;

pub use category::unify_category;
pub use root_domain::root_domain;
pub use target::{canonicalize_program_url, canonicalize_target};
