//! Platform poller adapters: one [`traits::PlatformPoller`] implementation
//! per bug-bounty platform, plus the registry that constructs them.

mod bugcrowd;
mod error;
mod hackerone;
mod immunefi;
mod intigriti;
mod registry;
mod traits;
mod yeswehack;

pub use bugcrowd::BugcrowdPoller;
pub use error::{Error, Result};
pub use hackerone::HackerOnePoller;
pub use immunefi::ImmunefiPoller;
pub use intigriti::IntigritiPoller;
pub use registry::{all_pollers, poller_for};
pub use traits::PlatformPoller;
pub use yeswehack::YesWeHackPoller;
