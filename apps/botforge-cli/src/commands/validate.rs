use botforge_application::validation;
use std::path::PathBuf;

pub(super) fn run_validate(config_path: PathBuf) -> Result<(), String> {
    let (config, _config_toml) = super::common::init(&config_path)?;
    super::common::print_config_summary("validate", &config);

    let deps = crate::infra::build_engine_deps(&config)?;
    let request = super::common::request_from_config(&config);

    let summary = validation::preflight(deps.provider.as_ref(), &request)
        .map_err(|err| err.to_string())?;
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).map_err(|err| err.to_string())?
    );
    Ok(())
}
