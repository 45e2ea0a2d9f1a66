//! Middleware trait for wrapping collaborator implementations.

use std::sync::Arc;

/// Trait implemented by collaborator middleware layers.
///
/// A middleware consumes an inner collaborator `S` (a trait object such as
/// `dyn CountryCurrencyLookup`) and returns a wrapped collaborator of the same
/// kind that augments its behavior (e.g., memoization).
pub trait Middleware<S: ?Sized + Send + Sync>: Send + Sync {
    /// Apply this middleware to wrap an inner collaborator and return the wrapped one.
    fn apply(self: Box<Self>, inner: Arc<S>) -> Arc<S>;

    /// Human-readable middleware name for introspection/logging.
    fn name(&self) -> &'static str;

    /// Opaque configuration snapshot for serialization/inspection.
    fn config_json(&self) -> serde_json::Value;
}
