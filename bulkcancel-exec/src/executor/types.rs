/// Worker count used by the original batch tool.
pub const DEFAULT_WORKERS: usize = 8;

#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub workers: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
        }
    }
}
