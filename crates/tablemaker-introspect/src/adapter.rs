use async_trait::async_trait;

use tablemaker_core::{IntrospectionResult, Result};

/// Trait implemented by sources that can resolve relation names to tables.
#[async_trait]
pub trait TableSource {
    /// Returns the engine identifier (e.g. `postgres`).
    fn engine(&self) -> &'static str;

    /// Resolve `names` to their array-typed columns.
    ///
    /// The result holds exactly one slot per requested name, in request order.
    /// A slot is `None` when the name matches no relation or a relation
    /// without array columns.
    async fn list(&self, names: &[String]) -> Result<IntrospectionResult>;
}
