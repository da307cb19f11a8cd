use std::collections::HashMap;

use lazy_static::lazy_static;

/// Output length used when a model has no (or a zero) entry
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4096;

lazy_static! {
    static ref BUILTIN_LIMITS: HashMap<&'static str, u32> = HashMap::from([
        ("claude-2.1", 4096),
        ("claude-instant-1.2", 4096),
        ("claude-3-haiku-20240307", 4096),
        ("claude-3-sonnet-20240229", 4096),
        ("claude-3-opus-20240229", 4096),
        ("claude-3-5-sonnet-20240620", 4096),
        ("claude-3-5-sonnet-20241022", 8192),
        ("claude-3-5-haiku-20241022", 8192),
    ]);
}

/// Per-model maximum output token lookup
pub trait ModelLimits: Send + Sync {
    fn max_output_tokens(&self, model: &str) -> Option<u32>;
}

impl ModelLimits for HashMap<String, u32> {
    fn max_output_tokens(&self, model: &str) -> Option<u32> {
        self.get(model).copied()
    }
}

/// Resolve the output length for a model, never returning zero
pub fn resolve_max_tokens(limits: &dyn ModelLimits, model: &str) -> u32 {
    limits
        .max_output_tokens(model)
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS)
}

/// The built in Claude table with optional overrides layered on top
#[derive(Debug, Clone, Default)]
pub struct ChatSettingLimits {
    overrides: HashMap<String, u32>,
}

impl ChatSettingLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: HashMap<String, u32>) -> Self {
        Self { overrides }
    }
}

impl ModelLimits for ChatSettingLimits {
    fn max_output_tokens(&self, model: &str) -> Option<u32> {
        self.overrides
            .get(model)
            .or_else(|| BUILTIN_LIMITS.get(model))
            .copied()
    }
}
