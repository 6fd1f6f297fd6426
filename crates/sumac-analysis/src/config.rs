use sumac_ir::AccessKind;

/// Tunable policies of the access summary analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub(crate) opaque_call_kind: AccessKind,
    pub(crate) summarize_value_arguments: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            opaque_call_kind: AccessKind::Modify,
            summarize_value_arguments: false,
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the access assumed for an argument that escapes into a call
    /// without a visible body. Defaults to [`AccessKind::Modify`]; anything
    /// weaker is only sound if every opaque callee is known not to write.
    pub fn with_opaque_call_kind(mut self, kind: AccessKind) -> Self {
        self.opaque_call_kind = kind;
        self
    }

    /// Configure whether by-value arguments are summarized as well. Off by
    /// default, since only address arguments can be accessed through.
    pub fn with_value_arguments(mut self, enabled: bool) -> Self {
        self.summarize_value_arguments = enabled;
        self
    }

    pub fn opaque_call_kind(&self) -> AccessKind {
        self.opaque_call_kind
    }

    pub fn summarize_value_arguments(&self) -> bool {
        self.summarize_value_arguments
    }
}
