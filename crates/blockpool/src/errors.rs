//! Error handling and exit codes.

use blockpool_core::constants::exit_codes;
use blockpool_core::PoolError;
use blockpool_harness::HarnessError;

/// Map a harness error to the process exit code.
pub fn handle_error(err: &HarnessError) -> i32 {
    match err {
        HarnessError::Config(_) | HarnessError::Pool(PoolError::InvalidConfig(_)) => {
            exit_codes::ERROR_CONFIG
        }
        HarnessError::Pool(_) | HarnessError::WorkerPanicked => exit_codes::ERROR_GENERIC,
    }
}

/// Exit code for any error that escaped `app::run`.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(harness) = err.downcast_ref::<HarnessError>() {
        handle_error(harness)
    } else if let Some(PoolError::InvalidConfig(_)) = err.downcast_ref::<PoolError>() {
        exit_codes::ERROR_CONFIG
    } else {
        exit_codes::ERROR_GENERIC
    }
}
