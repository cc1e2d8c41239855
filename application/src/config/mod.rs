//! Application-level configuration.
//!
//! Configuration types that control how use cases behave:
//!
//! - [`InvokerParams`]: retry, rate limiting and history window of model calls
//! - [`FallbackResponses`]: fixed redirect and apology answers
//! - [`PipelineConfig`]: everything the answer pipeline needs, in one place

pub mod fallback_responses;
pub mod invoker_params;

pub use fallback_responses::FallbackResponses;
pub use invoker_params::InvokerParams;

use serde::{Deserialize, Serialize};
use sma_domain::{CoercionPolicy, ContextLimits};

/// Configuration of the answer pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub invoker: InvokerParams,
    pub coercion: CoercionPolicy,
    pub responses: FallbackResponses,
    pub history: ContextLimits,
}
