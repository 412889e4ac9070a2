//! Domain types shared by every bbscope crate: the canonical vocabulary,
//! the persisted records (`Program`, `RawTarget`, `AiEnhancement`,
//! `ScopeChange`), and the poller input/output contract
//! (`AuthConfig`, `PollOptions`, `ProgramData`, `ScopeEntry`).

mod category;
mod change;
mod error;
mod platform;
mod poll;
mod program;
mod target;

pub use category::Category;
pub use change::{Change, ChangeType, ScopeChange};
pub use error::{Error, Result};
pub use platform::Platform;
pub use poll::{AuthConfig, PollOptions, ProgramData, RawScopeItem, ScopeEntry, TargetVariant};
pub use program::Program;
pub use target::{AiEnhancement, Entry, EntrySource, RawTarget};
