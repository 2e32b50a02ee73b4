use super::InferenceError;

/// Chat-style inference backend abstraction (allows mocking).
///
/// Every call is a fresh, stateless request: implementations must not carry
/// conversational memory between calls, so classifications cannot
/// cross-contaminate. Implementations may be used from several threads.
pub trait LlmClient: Send + Sync {
    /// One request/response round trip: system instruction + user message
    /// in, free-form text out.
    fn generate(
        &self,
        model: &str,
        prompt: &str,
        system: &str,
    ) -> Result<String, InferenceError>;

    fn is_model_available(&self, model: &str) -> Result<bool, InferenceError>;

    fn list_models(&self) -> Result<Vec<String>, InferenceError>;
}

// An `Arc`'d client is itself a client, so one backend connection can be
// shared between the requirement extractor and the classifier grid.
impl<T: LlmClient + ?Sized> LlmClient for std::sync::Arc<T> {
    fn generate(
        &self,
        model: &str,
        prompt: &str,
        system: &str,
    ) -> Result<String, InferenceError> {
        (**self).generate(model, prompt, system)
    }

    fn is_model_available(&self, model: &str) -> Result<bool, InferenceError> {
        (**self).is_model_available(model)
    }

    fn list_models(&self) -> Result<Vec<String>, InferenceError> {
        (**self).list_models()
    }
}
