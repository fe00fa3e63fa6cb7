/// Tunables for [`crate::service::ApprovalEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// How often a write that lost a version race is re-read, re-validated and re-applied
    /// before `ConcurrentModification` reaches the caller.
    pub concurrent_modification_retries: u32,
}

impl EngineConfig {
    pub fn with_concurrent_modification_retries(mut self, retries: u32) -> Self {
        self.concurrent_modification_retries = retries;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            concurrent_modification_retries: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_a_single_retry() {
        assert_eq!(EngineConfig::default().concurrent_modification_retries, 1);
        let config = EngineConfig::default().with_concurrent_modification_retries(0);
        assert_eq!(config.concurrent_modification_retries, 0);
    }
}
