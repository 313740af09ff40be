//! Exit codes for the CLI

use liftoff_core::error::{ConfigError, HostingError, InputError};
use liftoff_core::LiftoffError;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Missing or malformed workflow input
pub const INPUT_ERROR: i32 = 3;

/// The hosting API rejected or failed a request
pub const HOSTING_ERROR: i32 = 4;

/// Validation error
pub const VALIDATION_ERROR: i32 = 5;

/// Exit code for an error returned by a command
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<LiftoffError>() {
        Some(LiftoffError::Config(_)) => CONFIG_ERROR,
        Some(LiftoffError::Input(_)) => INPUT_ERROR,
        Some(LiftoffError::Hosting(_)) => HOSTING_ERROR,
        Some(_) => ERROR,
        None if err.is::<ConfigError>() => CONFIG_ERROR,
        None if err.is::<InputError>() => INPUT_ERROR,
        None if err.is::<HostingError>() => HOSTING_ERROR,
        None => ERROR,
    }
}
