use botforge_application::config::{Config, ProviderKind};
use botforge_domain::repositories::artifacts::ArtifactWriter;
use botforge_domain::repositories::market_data::MarketDataProvider;
use botforge_infrastructure::codegen::ChatCodegenClient;
use botforge_infrastructure::market_data::csv::CsvMarketDataProvider;
use botforge_infrastructure::market_data::http::HttpMarketDataProvider;
use botforge_infrastructure::reporting::FsArtifactWriter;
use std::path::PathBuf;

const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_CODEGEN_KEY_ENV: &str = "BOTFORGE_CODEGEN_API_KEY";

pub struct EngineDeps {
    pub provider: Box<dyn MarketDataProvider>,
    pub artifacts: Box<dyn ArtifactWriter>,
}

pub fn build_engine_deps(config: &Config) -> Result<EngineDeps, String> {
    let provider: Box<dyn MarketDataProvider> = match config.provider.kind {
        ProviderKind::Http => {
            let base_url = config
                .provider
                .base_url
                .clone()
                .ok_or_else(|| "provider.kind=http requires provider.base_url".to_string())?;
            let timeout_ms = config
                .provider
                .timeout_ms
                .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_MS);
            Box::new(
                HttpMarketDataProvider::new(base_url, timeout_ms).map_err(|err| err.to_string())?,
            )
        }
        ProviderKind::Csv => {
            let csv_path = config
                .provider
                .csv_path
                .clone()
                .ok_or_else(|| "provider.kind=csv requires provider.csv_path".to_string())?;
            Box::new(CsvMarketDataProvider::new(PathBuf::from(csv_path)))
        }
    };

    Ok(EngineDeps {
        provider,
        artifacts: Box::new(FsArtifactWriter),
    })
}

pub fn build_codegen_client(config: &Config) -> Result<ChatCodegenClient, String> {
    let codegen = config
        .codegen
        .as_ref()
        .ok_or_else(|| "missing [codegen] config section".to_string())?;

    let api_key = match &codegen.api_key {
        Some(key) => key.clone(),
        None => {
            let env_var = codegen
                .api_key_env
                .as_deref()
                .unwrap_or(DEFAULT_CODEGEN_KEY_ENV);
            std::env::var(env_var).map_err(|_| {
                format!("codegen api key not set; export {env_var} or set codegen.api_key")
            })?
        }
    };

    ChatCodegenClient::new(
        codegen.url.clone(),
        codegen.model.clone(),
        api_key,
        codegen.timeout_ms,
        codegen.retries,
    )
    .map_err(|err| err.to_string())
}
