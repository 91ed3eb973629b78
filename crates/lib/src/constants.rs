//! Shared constants used across the library.

/// Minimum snippet value length in characters.
pub const VALUE_MIN_LEN: usize = 1;

/// Maximum snippet value length in characters.
pub const VALUE_MAX_LEN: usize = 42;

/// Default minimum password length for registration.
pub const DEFAULT_MIN_PASSWORD_LEN: usize = 10;

/// File name used by the in-memory backend for JSON persistence.
pub const MEMORY_STORE_FILE: &str = "snipboard.json";
