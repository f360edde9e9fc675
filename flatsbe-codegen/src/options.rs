//! Generator configuration.

/// Options controlling the shape of generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Path of the runtime crate in generated `use` declarations.
    pub runtime_crate: String,
    /// Type name of the generated message header flyweight.
    pub header_type_name: String,
    /// Whether generated items carry doc comments.
    pub emit_docs: bool,
}

impl GeneratorOptions {
    /// Default runtime crate path.
    pub const DEFAULT_RUNTIME_CRATE: &'static str = "flatsbe_core";
    /// Default message header type name.
    pub const DEFAULT_HEADER_TYPE_NAME: &'static str = "MessageHeader";

    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            runtime_crate: Self::DEFAULT_RUNTIME_CRATE.to_string(),
            header_type_name: Self::DEFAULT_HEADER_TYPE_NAME.to_string(),
            emit_docs: true,
        }
    }

    /// Sets the runtime crate path, e.g. `::flatsbe::core` when re-exported.
    #[must_use]
    pub fn runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.runtime_crate = path.into();
        self
    }

    /// Sets the message header type name.
    #[must_use]
    pub fn header_type_name(mut self, name: impl Into<String>) -> Self {
        self.header_type_name = name.into();
        self
    }

    /// Enables or disables doc comments in generated code.
    #[must_use]
    pub fn emit_docs(mut self, enabled: bool) -> Self {
        self.emit_docs = enabled;
        self
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = GeneratorOptions::default();
        assert_eq!(options.runtime_crate, "flatsbe_core");
        assert_eq!(options.header_type_name, "MessageHeader");
        assert!(options.emit_docs);
    }

    #[test]
    fn test_builder_setters() {
        let options = GeneratorOptions::new()
            .runtime_crate("::flatsbe::core")
            .header_type_name("Header")
            .emit_docs(false);
        assert_eq!(options.runtime_crate, "::flatsbe::core");
        assert_eq!(options.header_type_name, "Header");
        assert!(!options.emit_docs);
    }
}
