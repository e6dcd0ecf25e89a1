//! Hook handler configuration

use cicada_compiler::CompilerOptions;

/// Configuration for the hook handler
#[derive(Debug, Clone, PartialEq)]
pub struct HooksConfig {
    /// Path of the pipeline definition inside the repository
    pub definition_path: String,

    /// Prefix for generated run names
    pub run_name_prefix: String,

    /// Size of the workspace volume provisioned per run
    pub volume_size: String,

    /// Options handed to the specification compiler
    pub compiler: CompilerOptions,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            definition_path: ".cicada.yaml".to_string(),
            run_name_prefix: "cicada-run-".to_string(),
            volume_size: "1Gi".to_string(),
            compiler: CompilerOptions::default(),
        }
    }
}

impl HooksConfig {
    /// Override the definition path
    pub fn with_definition_path(mut self, path: impl Into<String>) -> Self {
        self.definition_path = path.into();
        self
    }

    /// Override the run name prefix
    pub fn with_run_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.run_name_prefix = prefix.into();
        self
    }

    /// Override the workspace volume size
    pub fn with_volume_size(mut self, size: impl Into<String>) -> Self {
        self.volume_size = size.into();
        self
    }
}
