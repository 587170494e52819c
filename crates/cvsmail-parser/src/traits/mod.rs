//! Parser traits.

pub mod parser;

/// Base trait for all parsers.
pub trait Plugin: Send + Sync {
    /// Returns the parser name, as used in configuration.
    fn name(&self) -> &'static str;

    /// Returns the parser version.
    fn version(&self) -> &'static str;

    /// Returns a short description of the parser.
    fn description(&self) -> &'static str {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MinimalPlugin;

    impl Plugin for MinimalPlugin {
        fn name(&self) -> &'static str {
            "minimal"
        }
        fn version(&self) -> &'static str {
            "1.0.0"
        }
        // Using default description
    }

    struct CustomPlugin;

    impl Plugin for CustomPlugin {
        fn name(&self) -> &'static str {
            "custom"
        }
        fn version(&self) -> &'static str {
            "2.0.0"
        }
        fn description(&self) -> &'static str {
            "Custom description"
        }
    }

    #[test]
    fn test_default_description() {
        assert_eq!(MinimalPlugin.description(), "");
    }

    #[test]
    fn test_custom_description() {
        assert_eq!(CustomPlugin.description(), "Custom description");
    }

    #[test]
    fn test_plugin_identity() {
        assert_eq!(MinimalPlugin.name(), "minimal");
        assert_eq!(MinimalPlugin.version(), "1.0.0");
        assert_eq!(CustomPlugin.name(), "custom");
    }
}
