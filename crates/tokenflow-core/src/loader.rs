//! # SDK Script Loader
//!
//! Idempotent, coalescing loader for third-party payment SDK scripts.
//! At most one concurrent load per script id; all callers that arrive
//! while a load is pending await the same completion signal. Owned by a
//! session context, never process-wide.

use crate::error::{TokenizeError, TokenizeResult};
use crate::host::WebHost;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::debug;

enum Role {
    /// First caller for this id; performs the injection
    Leader(watch::Sender<bool>),
    /// Arrived while a load was pending; awaits the leader's signal
    Follower(watch::Receiver<bool>),
}

/// Memoizing script loader over a [`WebHost`]
pub struct ScriptLoader {
    host: Arc<dyn WebHost>,
    pending: Mutex<HashMap<String, watch::Receiver<bool>>>,
}

impl ScriptLoader {
    pub fn new(host: Arc<dyn WebHost>) -> Self {
        Self {
            host,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Ensure the script for `id` has finished loading.
    ///
    /// Once a load completes the pending entry is cleared, so later calls
    /// re-check the host's global SDK presence instead of a cached future.
    pub async fn ensure(&self, id: &str, src: &str) -> TokenizeResult<()> {
        if self.host.script_present(id) {
            return Ok(());
        }

        let role = {
            let mut pending = self.pending.lock().expect("script loader lock poisoned");
            match pending.get(id) {
                Some(rx) => Role::Follower(rx.clone()),
                None => {
                    let (tx, rx) = watch::channel(false);
                    pending.insert(id.to_string(), rx);
                    Role::Leader(tx)
                }
            }
        };

        match role {
            Role::Leader(tx) => {
                debug!("injecting script: id={}, src={}", id, src);
                let result = self.host.inject_script(id, src).await;
                self.pending
                    .lock()
                    .expect("script loader lock poisoned")
                    .remove(id);
                if result.is_ok() {
                    // Wakes every follower; dropping the sender without
                    // sending signals failure instead.
                    let _ = tx.send(true);
                }
                result
            }
            Role::Follower(mut rx) => loop {
                if *rx.borrow_and_update() {
                    return Ok(());
                }
                if rx.changed().await.is_err() {
                    return if *rx.borrow() {
                        Ok(())
                    } else {
                        Err(TokenizeError::Script(format!(
                            "load failed for script '{}'",
                            id
                        )))
                    };
                }
            },
        }
    }
}
