// src/constants.rs
//
// Application-wide defaults. Each one can be overridden through the TOML config
// unless noted otherwise.

/// Base URL of the remote collection endpoint.
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Path of the note collection below the base URL. Not configurable.
///
/// Used in: `infrastructure/http_remote.rs`
pub const POSTS_PATH: &str = "posts";

/// Author id sent as `userId` with every create and update.
pub const DEFAULT_USER_ID: i64 = 1;

/// Number of remote items kept from the listing, in server order.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Key under which the note list is persisted. The file store maps it to `<key>.json`.
pub const DEFAULT_STORE_KEY: &str = "notes";

/// Directory name used below the platform data and config directories.
pub const APP_DIR_NAME: &str = "notesync";

/// Config file name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "notesync.toml";
