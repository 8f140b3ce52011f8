/// Behaviour switches for a join run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinConfig {
    /// Keep the current document across input boundaries, so an input that
    /// starts with feature lines continues the previous input's last document.
    pub carry_key_across_inputs: bool,
    /// Only emit documents that received features from every input
    pub common_only: bool,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            carry_key_across_inputs: true,
            common_only: false,
        }
    }
}

impl JoinConfig {
    pub fn isolate_inputs(mut self, isolate: bool) -> Self {
        self.carry_key_across_inputs = !isolate;
        self
    }

    pub fn common_only(mut self, common_only: bool) -> Self {
        self.common_only = common_only;
        self
    }
}
