//! # Page Host Boundary
//!
//! The untrusted page this engine runs inside, specified only at its
//! interface boundary: script injection, script presence checks, and
//! navigation. Implementations live with the embedding runtime; tests
//! use in-memory fakes.

use crate::error::TokenizeResult;
use async_trait::async_trait;

/// The page host this engine runs inside
#[async_trait]
pub trait WebHost: Send + Sync {
    /// Whether the SDK global for a script id is already available
    fn script_present(&self, id: &str) -> bool;

    /// Inject a script resource and resolve once its load event fires.
    ///
    /// A script that never fires a load event never resolves; callers
    /// awaiting it hang. No timeout is imposed.
    async fn inject_script(&self, id: &str, src: &str) -> TokenizeResult<()>;

    /// Current page URL (used as the gateway return target)
    fn current_url(&self) -> String;

    /// Navigate away to a gateway-hosted page. Terminal: control leaves
    /// the process and nothing after it runs.
    fn navigate(&self, url: &str);
}
