pub const DEFAULT_CONFIG_FILE: &str = "/etc/kvnotes/kvnotes.toml";
pub const APP_CONFIG_ENV_PREFIX: &str = "KVNOTES_";
pub const APP_CONFIG_ENV_SPLIT: &str = "__";

pub const DEFAULT_TABLE_NAME: &str = "note";
pub const DEFAULT_USER_HEADER: &str = "X-Forwarded-User";
pub const DEFAULT_LOGIN_URL: &str = "/login";

// table layout
pub const PARTITION_KEY_ATTRIBUTE: &str = "pk";
pub const SORT_KEY_ATTRIBUTE: &str = "sk";
pub const TITLE_ATTRIBUTE: &str = "title";
pub const BODY_ATTRIBUTE: &str = "body";
pub const NOTE_SORT_KEY_PREFIX: &str = "note#";
