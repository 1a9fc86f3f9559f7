use crate::errors::EquinetResult;

/// External answer synthesis from a query and its joined retrieval context.
pub trait IAnswerSynthesizer: Send + Sync {
    fn synthesize(&self, query: &str, context: &str) -> EquinetResult<String>;

    /// Human-readable synthesizer name.
    fn name(&self) -> &str;
}
