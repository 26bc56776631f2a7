use contacts_shared::{config::StoreConfig, logging, AppState};
use lambda_http::{run, service_fn, Error, Request};
use std::sync::Arc;

mod http_handler;
mod users;

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();

    // Store client is built once per process and reused across invocations
    let config = StoreConfig::from_env();
    let state = AppState::from_config(&config).await;

    tracing::info!("User lambda ready (table: {})", config.table_name);

    run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { http_handler::function_handler(event, state).await }
    }))
    .await
}
