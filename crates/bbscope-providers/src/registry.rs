use bbscope_types::Platform;

use crate::bugcrowd::BugcrowdPoller;
use crate::hackerone::HackerOnePoller;
use crate::immunefi::ImmunefiPoller;
use crate::intigriti::IntigritiPoller;
use crate::traits::PlatformPoller;
use crate::yeswehack::YesWeHackPoller;

/// Construct the concrete adapter for a platform.
pub fn poller_for(platform: Platform) -> Box<dyn PlatformPoller> {
    match platform {
        Platform::HackerOne => Box::new(HackerOnePoller::new()),
        Platform::Bugcrowd => Box::new(BugcrowdPoller::new()),
        Platform::Intigriti => Box::new(IntigritiPoller::new()),
        Platform::YesWeHack => Box::new(YesWeHackPoller::new()),
        Platform::Immunefi => Box::new(ImmunefiPoller::new()),
    }
}

/// One adapter per platform `bbscope` knows how to poll, in a stable order.
pub fn all_pollers() -> Vec<Box<dyn PlatformPoller>> {
    Platform::ALL.into_iter().map(poller_for).collect()
}
