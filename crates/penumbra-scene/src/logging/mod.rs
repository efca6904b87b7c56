//! Logging utilities.
//!
//! The library itself only speaks through the `log` facade; this module
//! gives hosts a one-call `env_logger` setup so demos and tests don't each
//! reinvent it.

mod init;

pub use init::init_logging;
