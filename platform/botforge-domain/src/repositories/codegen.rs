use crate::errors::BotforgeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenRequest {
    pub indicators: Vec<String>,
    pub symbol: String,
    pub timeframe: String,
    pub strategy_type: String,
}

/// Text-generation collaborator that writes and repairs strategy source.
/// The engine never calls this; only the generation use case does.
pub trait CodegenClient {
    fn generate(&self, request: &CodegenRequest) -> Result<String, BotforgeError>;
    fn refine(&self, code: &str, compiler_errors: &str) -> Result<String, BotforgeError>;
}
