pub mod config;
pub mod error;
pub mod logging;
pub mod memory;
pub mod records;
pub mod responses;
pub mod store;
pub mod types;

use aws_sdk_dynamodb::Client as DynamoClient;
use config::StoreConfig;
use std::sync::Arc;
use store::{DynamoStore, RecordStore};

/// Shared application state, built once per process and reused by every invocation
pub struct AppState {
    pub store: Box<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: impl RecordStore + 'static) -> Arc<Self> {
        Arc::new(Self {
            store: Box::new(store),
        })
    }

    /// Build the DynamoDB-backed state from the process configuration
    pub async fn from_config(config: &StoreConfig) -> Arc<Self> {
        let sdk_config = aws_config::load_from_env().await;

        // Local DynamoDB override (optional endpoint)
        let client = match &config.endpoint_url {
            Some(endpoint) => {
                let dynamo_config = aws_sdk_dynamodb::config::Builder::from(&sdk_config)
                    .endpoint_url(endpoint)
                    .build();
                DynamoClient::from_conf(dynamo_config)
            }
            None => DynamoClient::new(&sdk_config),
        };

        Self::new(DynamoStore::new(client, config.table_name.clone()))
    }
}
