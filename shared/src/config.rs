use std::env;

pub const TABLE_NAME_VAR: &str = "TABLE_NAME";
pub const ENDPOINT_URL_VAR: &str = "DYNAMODB_ENDPOINT_URL";

/// Where the user contact table lives. Read once at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub table_name: String,
    pub endpoint_url: Option<String>,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    ///
    /// A missing `TABLE_NAME` is not defaulted: the store ends up addressed by
    /// an empty name and every request fails there.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let table_name = lookup(TABLE_NAME_VAR).unwrap_or_default();
        if table_name.is_empty() {
            tracing::warn!("{} is not set, store requests will fail", TABLE_NAME_VAR);
        }

        let endpoint_url = lookup(ENDPOINT_URL_VAR).filter(|url| !url.is_empty());

        Self {
            table_name,
            endpoint_url,
        }
    }
}
