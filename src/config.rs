//! # Session configuration.
//!
//! [`Config`] centralizes the knobs of a running session. The dispatch core
//! itself needs no configuration — await buffers are sized per call and
//! gather buffers per session — so the only global setting is how long a
//! shutdown may take.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use etude::Config;
//!
//! let mut cfg = Config::default();
//! cfg.grace = Duration::from_secs(2);
//!
//! assert_eq!(cfg.grace, Duration::from_secs(2));
//! ```

use std::time::Duration;

/// Global configuration for a [`Session`](crate::Session).
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Maximum time to wait for exercises to stop after
    /// [`Session::shutdown`](crate::Session::shutdown) before giving up with
    /// [`SessionError::GraceExceeded`](crate::SessionError::GraceExceeded).
    pub grace: Duration,
}

impl Default for Config {
    /// Provides a default configuration:
    /// - `grace = 5s`
    fn default() -> Self {
        Self {
            grace: Duration::from_secs(5),
        }
    }
}
