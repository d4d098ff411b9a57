//! Consistent log lines for store and sink operations

use std::path::Path;
use std::time::Duration;

/// Log the start of an operation on a file or directory
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - File or directory being operated on
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log the completion of an operation
///
/// # Arguments
/// * `operation` - Past-tense verb, e.g. "wrote" or "loaded"
/// * `path` - File or directory that was operated on
/// * `records` - Number of records handled
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(operation: &str, path: &Path, records: usize, elapsed: Option<Duration>) {
    match elapsed {
        Some(duration) => log::info!(
            "Successfully {} {} records at {} in {:?}",
            operation,
            records,
            path.display(),
            duration
        ),
        None => log::info!("Successfully {} {} records at {}", operation, records, path.display()),
    }
}

/// Log a warning, optionally tied to a path
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}
