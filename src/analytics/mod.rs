//! Cost attribution over message records.
//!
//! Consumes [`MessageRecord`](crate::store::MessageRecord) sequences pulled
//! from the document store and produces token/cost totals at message,
//! conversation, and user granularity. All aggregation is read-only and
//! stateless between calls; per-user aggregations fan out concurrently with
//! no shared mutable state.

pub mod aggregator;
pub mod window;

pub use aggregator::{
    effective_model, CostEngine, CostTotals, EffectiveModel, PricedMessage, INFERRED_MARKER,
};
pub use window::TimeWindow;
