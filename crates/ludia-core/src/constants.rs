//! Application-wide constants.

/// Default per-file size ceiling for uploaded bundle files (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Default allow-list of bundle file extensions (lower-case, leading dot).
/// Web-game sources plus the static assets the embedded player can serve.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[
    ".html", ".css", ".js", ".json", ".png", ".jpg", ".jpeg", ".gif", ".svg", ".mp3", ".wav",
    ".ogg",
];

/// Extension of the entry-point file every published bundle must contain.
/// The embedded player loads this file to run the game.
pub const DEFAULT_ENTRY_EXTENSION: &str = ".html";

/// How many games the featured strip shows.
pub const DEFAULT_FEATURED_COUNT: usize = 4;

/// Catalog page size.
pub const DEFAULT_GAMES_PER_PAGE: usize = 12;

/// Base URL the in-memory storage backend issues file URLs under.
pub const DEFAULT_STORAGE_BASE_URL: &str = "http://localhost:3000/files";

/// Current schema version stamped on game records at the storage boundary.
pub const GAME_SCHEMA_VERSION: u32 = 1;

/// Current schema version stamped on comment records.
pub const COMMENT_SCHEMA_VERSION: u32 = 1;
