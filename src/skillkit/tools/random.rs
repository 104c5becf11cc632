//! Uniform random integers.

use crate::tool_protocol::ToolError;
use rand::Rng;

/// Draws integers uniformly from an inclusive range.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPlugin;

impl RandomPlugin {
    pub fn new() -> Self {
        Self
    }

    /// Uniform sample from `[min_val, max_val]`.
    ///
    /// An inverted range is rejected with [`ToolError::InvalidParameters`].
    pub fn generate_random_number(&self, min_val: i64, max_val: i64) -> Result<i64, ToolError> {
        if min_val > max_val {
            return Err(ToolError::InvalidParameters(format!(
                "min_val ({}) must not exceed max_val ({})",
                min_val, max_val
            )));
        }

        let result = rand::thread_rng().gen_range(min_val..=max_val);
        log::info!(
            "Generated random number: {} (between {} and {})",
            result,
            min_val,
            max_val
        );
        Ok(result)
    }
}
