//! Capability registry: register, look up, and enumerate capabilities.

use std::collections::BTreeMap;
use std::sync::Arc;

use praxis_types::{Args, Capability, CapabilityError};

/// Flat namespace of capabilities available to the decision phase.
///
/// Later registrations win: a remote proxy registered after a local
/// capability of the same name shadows it. Names iterate in sorted order
/// so the listing embedded in prompts is deterministic.
#[derive(Default)]
pub struct CapabilityRegistry {
    capabilities: BTreeMap<String, Arc<dyn Capability>>,
}

impl CapabilityRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability under its own name, replacing any previous
    /// holder of that name.
    pub fn register(&mut self, capability: Arc<dyn Capability>) {
        let name = capability.name().to_string();
        tracing::debug!(capability = %name, "registered");
        self.capabilities.insert(name, capability);
    }

    /// Look up a capability by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Capability>> {
        self.capabilities.get(name).cloned()
    }

    /// Number of registered capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// Registered names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.capabilities.keys().map(String::as_str).collect()
    }

    /// `- name: description` lines for every capability, in name order.
    #[must_use]
    pub fn listing(&self) -> String {
        self.capabilities
            .values()
            .map(|c| format!("- {}: {}", c.name(), c.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Execute a capability by name.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::NotFound`] for an unknown name — an
    /// error value, never a panic — or whatever the capability itself
    /// fails with.
    pub fn invoke(&self, name: &str, args: &Args) -> Result<String, CapabilityError> {
        let capability = self
            .get(name)
            .ok_or_else(|| CapabilityError::NotFound(name.to_string()))?;
        capability.invoke(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCapability {
        name: &'static str,
        output: &'static str,
    }

    impl Capability for FixedCapability {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "fixed output"
        }

        fn invoke(&self, _args: &Args) -> Result<String, CapabilityError> {
            Ok(self.output.to_string())
        }
    }

    #[test]
    fn lookup_of_absent_name_is_an_error_value() {
        let registry = CapabilityRegistry::new();
        assert!(registry.get("missing").is_none());
        let err = registry.invoke("missing", &Args::new()).unwrap_err();
        assert!(matches!(err, CapabilityError::NotFound(_)));
    }

    #[test]
    fn later_registration_shadows_earlier() {
        let mut registry = CapabilityRegistry::new();
        registry.register(Arc::new(FixedCapability {
            name: "search",
            output: "local",
        }));
        registry.register(Arc::new(FixedCapability {
            name: "search",
            output: "remote",
        }));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.invoke("search", &Args::new()).unwrap(), "remote");
    }

    #[test]
    fn listing_is_sorted_by_name() {
        let mut registry = CapabilityRegistry::new();
        registry.register(Arc::new(FixedCapability {
            name: "zeta",
            output: "",
        }));
        registry.register(Arc::new(FixedCapability {
            name: "alpha",
            output: "",
        }));

        let listing = registry.listing();
        let alpha = listing.find("- alpha").unwrap();
        let zeta = listing.find("- zeta").unwrap();
        assert!(alpha < zeta);
    }
}
