//! Storage key layout and validation.

use uuid::Uuid;

use crate::traits::{StorageError, StorageResult};

/// Generate the storage key for one bundle file: `games/{game_id}/{filename}`.
pub fn bundle_key(game_id: Uuid, filename: &str) -> String {
    format!("games/{}/{}", game_id, filename)
}

/// Reject keys that could escape the storage namespace. Backends call this
/// before touching the key.
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() {
        return Err(StorageError::InvalidKey("empty key".to_string()));
    }
    if storage_key.contains("..") || storage_key.starts_with('/') || storage_key.contains('\\') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

/// Content type for a bundle filename, by extension. Covers the web-game
/// allow-list; anything else is served as an opaque blob.
pub fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "html" => "text/html",
        "css" => "text/css",
        "js" => "text/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        _ => "application/octet-stream",
    }
}
