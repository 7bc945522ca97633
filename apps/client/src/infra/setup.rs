use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use propnest_sdk::{PropnestClient, PropnestConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::{api::HttpMarketplaceApi, navigation::LoginRedirect, storage::FileCredentialStore},
    infra::{app::AppContext, config::AppConfig, error::InfraError, http_client::build_client},
};

/// Wire the real adapters into an [`AppContext`]. Nothing is read or sent yet.
pub fn init_app_context(config: AppConfig) -> Result<AppContext, InfraError> {
    let http_client = build_client(&config)?;
    let client = PropnestClient::with_http_client(
        PropnestConfig {
            base_url: config.api_url.to_string(),
            token_header: Some(config.token_header.clone()),
        },
        http_client,
    )?;
    let api = Arc::new(HttpMarketplaceApi::new(client));
    let store = Arc::new(FileCredentialStore::new(config.credentials_path.clone()));

    Ok(AppContext::assemble(
        config,
        store,
        api.clone(),
        api,
        Arc::new(LoginRedirect),
    ))
}

pub fn init_tracing(log_file: Option<&Path>) -> Result<(), InfraError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "propnest_client=info,propnest_sdk=info".into());

    // Console (stdout is reserved for command output)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact();

    // File (structured JSON logs)
    let json_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(InfraError::LogFile)?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_current_span(true)
                    .with_span_list(true),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    Ok(())
}
