//! Process exit codes.

use crate::error::CliError;

pub const SUCCESS: i32 = 0;

/// Any failure: bad input, bad config, broken run log.
pub const ERROR: i32 = 2;

/// Simulation stopped early by request.
pub const INTERRUPTED: i32 = 130;

pub fn for_result(result: &Result<(), CliError>) -> i32 {
    match result {
        Ok(()) => SUCCESS,
        Err(CliError::Interrupted(_)) => INTERRUPTED,
        Err(_) => ERROR,
    }
}
