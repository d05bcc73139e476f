//! Test doubles for exercising kernel flows without a live model.
//!
//! Enabled with the `test-utils` feature, the way downstream crates pull
//! these in as dev-dependencies.

use std::sync::Mutex;

use crate::error::GatewayError;
use crate::traits::ModelGateway;

/// Gateway that replays a fixed sequence of canned responses.
///
/// Records every prompt it receives. Once the script is exhausted the
/// final response repeats; an empty script fails every call, which is the
/// easiest way to exercise gateway-failure rendering.
pub struct ScriptedGateway {
    script: Vec<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    /// Build a gateway from an ordered response script.
    #[must_use]
    pub fn new<I, S>(script: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: script.into_iter().map(Into::into).collect(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, in call order.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Number of calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.prompts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }
}

impl ModelGateway for ScriptedGateway {
    fn generate(&self, _model: &str, prompt: &str) -> Result<String, GatewayError> {
        let mut prompts = self
            .prompts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        prompts.push(prompt.to_string());

        if self.script.is_empty() {
            return Err(GatewayError::Network(
                "scripted gateway has no responses".to_string(),
            ));
        }
        let index = (prompts.len() - 1).min(self.script.len() - 1);
        Ok(self.script[index].clone())
    }
}
