// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used by social auth

// Storage Configuration
pub const SOCIAL_AUTH_DATABASE_PATH: &str = "SOCIAL_AUTH_DATABASE_PATH";
pub const SOCIAL_AUTH_DB_MAX_CONNECTIONS: &str = "SOCIAL_AUTH_DB_MAX_CONNECTIONS";
pub const SOCIAL_AUTH_DB_WAL: &str = "SOCIAL_AUTH_DB_WAL";

// Request Context
pub const SOCIAL_AUTH_BASE_URL: &str = "SOCIAL_AUTH_BASE_URL";

// System Environment Variables
pub const HOME: &str = "HOME";

/// Directory name under the user's home that holds the database
pub const DATA_DIR_NAME: &str = ".social-auth";

/// Default database file name
pub const DATABASE_FILE_NAME: &str = "config.db";

pub const DEFAULT_BASE_URL: &str = "http://localhost";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
