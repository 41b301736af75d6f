use botforge_application::generation;
use botforge_domain::repositories::codegen::CodegenRequest;
use std::fs;
use std::path::PathBuf;

pub(super) fn run_generate(
    config_path: PathBuf,
    indicators: Vec<String>,
    symbol: Option<String>,
    timeframe: Option<String>,
    strategy_type: String,
    out: Option<PathBuf>,
) -> Result<(), String> {
    let (config, _config_toml) = super::common::init(&config_path)?;
    let client = crate::infra::build_codegen_client(&config)?;

    let request = CodegenRequest {
        indicators,
        symbol: symbol.unwrap_or_else(|| config.run.symbol.clone()),
        timeframe: timeframe.unwrap_or_else(|| config.run.timeframe.clone()),
        strategy_type,
    };

    let code = generation::generate_code(&client, &request).map_err(|err| err.to_string())?;
    write_or_print(out, code)
}

pub(super) fn run_refine(
    config_path: PathBuf,
    code_path: PathBuf,
    errors_path: PathBuf,
    out: Option<PathBuf>,
) -> Result<(), String> {
    let (config, _config_toml) = super::common::init(&config_path)?;
    let client = crate::infra::build_codegen_client(&config)?;

    let code = fs::read_to_string(&code_path)
        .map_err(|err| format!("failed to read code {}: {}", code_path.display(), err))?;
    let compiler_errors = fs::read_to_string(&errors_path)
        .map_err(|err| format!("failed to read errors {}: {}", errors_path.display(), err))?;

    let refined =
        generation::refine_code(&client, &code, &compiler_errors).map_err(|err| err.to_string())?;
    write_or_print(out, refined)
}

fn write_or_print(out: Option<PathBuf>, code: String) -> Result<(), String> {
    match out {
        Some(path) => {
            fs::write(&path, code)
                .map_err(|err| format!("failed to write {}: {}", path.display(), err))?;
            println!("code written: {}", path.display());
        }
        None => println!("{code}"),
    }
    Ok(())
}
