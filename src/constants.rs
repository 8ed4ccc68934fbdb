//! Names shared across the crate: endpoints, environment variables and file locations.

/// Production App Store Connect API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.appstoreconnect.apple.com";

/// Audience claim every App Store Connect token must carry.
pub const TOKEN_AUDIENCE: &str = "appstoreconnect-v1";

/// Tokens are rejected by the API when they live longer than 20 minutes.
pub const TOKEN_LIFETIME_SECS: i64 = 20 * 60;

pub const ASC_CONFIG_PATH_ENV: &str = "ASC_CONFIG_PATH";
pub const ISSUER_ID_ENV: &str = "APPSTORE_CONNECT_ISSUER_ID";
pub const KEY_ID_ENV: &str = "APPSTORE_CONNECT_API_KEY_ID";
pub const KEY_PATH_ENV: &str = "APPSTORE_CONNECT_API_KEY_PATH";

/// Relative to the user's config directory.
pub const CONFIG_FILE: &str = "asc/config.yaml";

/// Searched for `AuthKey_<keyId>.p8` relative to the working directory.
pub const LOCAL_PRIVATE_KEY_DIR: &str = "private_keys";

/// Searched for `AuthKey_<keyId>.p8` relative to the home directory.
pub const HOME_PRIVATE_KEY_DIRS: [&str; 3] = [
    "private_keys",
    ".private_keys",
    ".appstoreconnect/private_keys",
];
