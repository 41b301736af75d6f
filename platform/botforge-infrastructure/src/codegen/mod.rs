use botforge_domain::errors::BotforgeError;
use botforge_domain::repositories::codegen::{CodegenClient, CodegenRequest};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

const GENERATE_SYSTEM_PROMPT: &str = "You are an expert MQL5 programmer for MetaTrader 5. \
Your only task is to produce the complete source of an Expert Advisor that implements the \
strategy described below, exactly as specified. The code must be self-contained and compile \
without errors in MetaEditor. Return only the code, with no explanations or extra text. \
Requirements: platform MetaTrader 5 (MQL5); risk management with a 200-point stop loss and \
a 400-point take profit; at most one open trade per symbol.";

const REFINE_SYSTEM_PROMPT: &str = "You are an expert in MQL5 and debugging. Your task is to \
rewrite the complete MQL5 source, line by line, fixing the compilation errors provided. \
Return only the corrected code, with no explanations.";

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

/// Chat-completions adapter for strategy code generation. Low temperature
/// keeps the output deterministic enough to compile; 5xx responses are
/// retried up to the configured count.
pub struct ChatCodegenClient {
    url: String,
    model: String,
    api_key: String,
    retries: u32,
    client: Client,
}

impl ChatCodegenClient {
    pub fn new(
        url: String,
        model: String,
        api_key: String,
        timeout_ms: u64,
        retries: u32,
    ) -> Result<Self, BotforgeError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|err| BotforgeError::Codegen(format!("failed to build http client: {err}")))?;
        Ok(Self {
            url,
            model,
            api_key,
            retries,
            client,
        })
    }

    fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, BotforgeError> {
        let endpoint = format!("{}/chat/completions", self.url.trim_end_matches('/'));
        let body = CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            temperature: 0.1,
            max_tokens: 4096,
        };

        let start = Instant::now();
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let response = self
                .client
                .post(&endpoint)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send();

            match response {
                Ok(resp) if resp.status() == StatusCode::OK => {
                    let parsed: CompletionResponse = resp.json().map_err(|err| {
                        BotforgeError::Codegen(format!(
                            "failed to parse completion response: {err}"
                        ))
                    })?;
                    metrics::histogram!("botforge.codegen.request_ms")
                        .record(start.elapsed().as_millis() as f64);

                    let content = parsed
                        .choices
                        .into_iter()
                        .next()
                        .map(|choice| choice.message.content)
                        .ok_or_else(|| {
                            BotforgeError::Codegen("completion response had no choices".to_string())
                        })?;
                    return Ok(strip_code_fences(&content));
                }
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_server_error() && attempts <= self.retries {
                        continue;
                    }
                    metrics::counter!("botforge.codegen.errors_total", "stage" => "status")
                        .increment(1);
                    return Err(BotforgeError::Codegen(format!(
                        "completion http error: status {}",
                        status.as_u16()
                    )));
                }
                Err(err) => {
                    if attempts <= self.retries {
                        continue;
                    }
                    metrics::counter!("botforge.codegen.errors_total", "stage" => "send")
                        .increment(1);
                    tracing::error!(error = %err, "completion request failed");
                    return Err(BotforgeError::Codegen(format!(
                        "completion request failed: {err}"
                    )));
                }
            }
        }
    }
}

impl CodegenClient for ChatCodegenClient {
    fn generate(&self, request: &CodegenRequest) -> Result<String, BotforgeError> {
        let user_prompt = format!(
            "Generate an Expert Advisor for the symbol '{}' on the '{}' timeframe. The strategy \
             is of type '{}' and must be based on the following technical indicators: {}. Write \
             the entry and exit logic as a standard, sensible combination of those indicators: \
             for example, BUY when the trend is up according to the first indicator and momentum \
             is positive according to the second, SELL otherwise.",
            request.symbol,
            request.timeframe,
            request.strategy_type,
            request.indicators.join(", ")
        );
        self.complete(GENERATE_SYSTEM_PROMPT, &user_prompt)
    }

    fn refine(&self, code: &str, compiler_errors: &str) -> Result<String, BotforgeError> {
        let user_prompt = format!(
            "The following MQL5 source fails to compile.\n\nERRORS:\n{compiler_errors}\n\n\
             SOURCE:\n{code}\n\nRewrite the source completely, fixing these errors. Return only \
             the code."
        );
        self.complete(REFINE_SYSTEM_PROMPT, &user_prompt)
    }
}

/// Strips a surrounding markdown code fence, with or without a language tag.
pub fn strip_code_fences(content: &str) -> String {
    let mut stripped = content.trim();
    if stripped.starts_with("```") {
        stripped = match stripped.find('\n') {
            Some(idx) => &stripped[idx + 1..],
            None => "",
        };
    }
    let stripped = stripped.trim_end();
    let stripped = stripped.strip_suffix("```").unwrap_or(stripped);
    stripped.trim().to_string()
}
