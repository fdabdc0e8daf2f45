//! Application-wide constants

/// Longest URL accepted from the submission form, in characters.
/// Matches the width of the `urls.name` column.
pub const MAX_URL_LENGTH: usize = 255;

/// Longest stored value for each extracted SEO field, in characters.
pub const MAX_SEO_FIELD_LENGTH: usize = 255;

/// Appended to SEO fields cut down to `MAX_SEO_FIELD_LENGTH`.
pub const TRUNCATION_MARKER: &str = "...";

/// Session key holding the pending flash message.
pub const FLASH_SESSION_KEY: &str = "_flash";
