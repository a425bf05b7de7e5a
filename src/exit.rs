//! Process exit statuses for the `sbom-upload` binary.

use crate::upload::{UploadError, UploadOutcome};

/// The server answered with a 2xx status.
pub const EXIT_ACCEPTED: u8 = 0;
/// Configuration, missing artifact or transport failure.
pub const EXIT_FAILED: u8 = 1;
/// The server answered, but not with a 2xx status.
pub const EXIT_REJECTED: u8 = 2;

pub fn exit_code_for(result: &Result<UploadOutcome, UploadError>) -> u8 {
    match result {
        Ok(outcome) if outcome.success => EXIT_ACCEPTED,
        Ok(_) => EXIT_REJECTED,
        Err(_) => EXIT_FAILED,
    }
}
