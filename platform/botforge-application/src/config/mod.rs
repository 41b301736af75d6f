use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub run: RunConfig,
    pub signals: Option<SignalsConfig>,
    pub provider: ProviderConfig,
    pub codegen: Option<CodegenConfig>,
    pub paths: PathsConfig,
    pub observability: Option<ObservabilityConfig>,
}

#[derive(Debug, Deserialize)]
pub struct RunConfig {
    pub run_id: String,
    pub symbol: String,
    pub timeframe: String,
    pub period_years: u32,
    pub initial_capital: f64,
    pub commission: f64,
}

#[derive(Debug, Deserialize)]
pub struct SignalsConfig {
    pub demo_trades: Option<usize>,
    pub seed: Option<u64>,
    pub signals_path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Http,
    Csv,
}

#[derive(Debug, Deserialize)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub base_url: Option<String>,
    pub csv_path: Option<String>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct CodegenConfig {
    pub url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub api_key_env: Option<String>,
    pub timeout_ms: u64,
    pub retries: u32,
}

#[derive(Debug, Deserialize)]
pub struct PathsConfig {
    pub out_dir: String,
}

#[derive(Debug, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub metrics_addr: Option<String>,
}

pub fn load_config(path: &Path) -> Result<Config, String> {
    load_config_with_source(path).map(|(config, _)| config)
}

pub fn load_config_with_source(path: &Path) -> Result<(Config, String), String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {}", path.display(), err))?;
    let config: Config = toml::from_str(&contents)
        .map_err(|err| format!("failed to parse TOML {}: {}", path.display(), err))?;
    Ok((config, contents))
}
