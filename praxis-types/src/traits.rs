//! Core traits: Capability and ModelGateway.

use crate::error::{CapabilityError, GatewayError};

/// Named arguments passed to a capability invocation.
pub type Args = serde_json::Map<String, serde_json::Value>;

/// A named invocable exposed to the decision phase.
///
/// Implementations may be local units or proxies forwarding to a remote
/// node; callers cannot tell the difference. The registry erases them to
/// `Arc<dyn Capability>`.
pub trait Capability: Send + Sync {
    /// The unique registry name of this capability.
    fn name(&self) -> &str;

    /// Documentation text shown to the model when it chooses an action.
    fn description(&self) -> &str;

    /// JSON Schema describing the accepted arguments.
    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({ "type": "object" })
    }

    /// Execute with named arguments, returning rendered text.
    fn invoke(&self, args: &Args) -> Result<String, CapabilityError>;
}

/// A prompt-in/text-out generative model endpoint.
///
/// The kernel issues blocking calls from its single-threaded loop;
/// implementations own whatever I/O machinery they need internally and
/// must never surface a pending value.
pub trait ModelGateway: Send + Sync {
    /// Generate text for `prompt` with the given model identifier.
    ///
    /// An empty `model` asks the gateway to use its configured default.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the endpoint is unreachable or its
    /// response cannot be decoded. Callers render the error to text; it is
    /// never propagated past a phase boundary.
    fn generate(&self, model: &str, prompt: &str) -> Result<String, GatewayError>;
}

/// Shared gateways delegate to the inner implementation, so a caller can
/// keep a handle to a gateway it has handed to the kernel.
impl<G: ModelGateway + ?Sized> ModelGateway for std::sync::Arc<G> {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, GatewayError> {
        (**self).generate(model, prompt)
    }
}
