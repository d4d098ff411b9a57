//! Utility functions for error handling
//!
//! Path-aware wrappers around filesystem calls used by the record store and
//! the Parquet sink, so failures carry the path and the purpose of the access.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{RegistryError, Result};

/// Safely read a file to string with rich error information
///
/// # Arguments
/// * `path` - The path to the file to read
/// * `purpose` - Why the file is being read (for error context)
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    if !path.is_file() {
        return Err(RegistryError::path_error(
            path,
            format!("File not found, needed for: {purpose}"),
        ));
    }

    fs::read_to_string(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => "Permission denied - check file permissions".to_string(),
            io::ErrorKind::InvalidData => {
                "File contains invalid UTF-8 data - cannot read as text".to_string()
            }
            _ => format!("Failed to read file content for: {purpose}"),
        };
        RegistryError::path_error_with_source(path, context, e)
    })
}

/// Write a file, replacing any previous content
pub fn safe_write(path: &Path, contents: &[u8], purpose: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| {
        RegistryError::path_error_with_source(path, format!("Failed to write file for: {purpose}"), e)
    })
}

/// Create a file for writing, truncating an existing one
pub fn safe_create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    fs::File::create(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check directory permissions".to_string()
            }
            _ => format!("Failed to create file for: {purpose}"),
        };
        RegistryError::path_error_with_source(path, context, e)
    })
}

/// Ensure a directory exists, creating it (and parents) when missing
pub fn ensure_directory(path: &Path, purpose: &str) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(RegistryError::path_error(
            path,
            format!("Path is not a directory, expected one for: {purpose}"),
        ));
    }
    fs::create_dir_all(path).map_err(|e| {
        RegistryError::path_error_with_source(
            path,
            format!("Failed to create directory for: {purpose}"),
            e,
        )
    })
}

/// Check if a directory exists and is readable, with rich error information
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.exists() {
        return Err(RegistryError::path_error(
            path,
            format!("Directory not found, needed for: {purpose}"),
        ));
    }

    if !path.is_dir() {
        return Err(RegistryError::path_error(
            path,
            format!("Path is not a directory, expected one for: {purpose}"),
        ));
    }

    match fs::read_dir(path) {
        Ok(_) => Ok(()),
        Err(e) => {
            let context = match e.kind() {
                io::ErrorKind::PermissionDenied => {
                    "Permission denied - check directory permissions".to_string()
                }
                _ => format!("Failed to access directory for: {purpose}"),
            };
            Err(RegistryError::path_error_with_source(path, context, e))
        }
    }
}
