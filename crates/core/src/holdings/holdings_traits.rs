use crate::errors::Result;
use crate::holdings::holdings_model::{Holding, RenewalCostRecord, Transaction};

/// Trait for holding retrieval operations.
///
/// Implemented by the storage layer; the analytics services only read.
pub trait HoldingRepositoryTrait: Send + Sync {
    fn get_holdings(&self) -> Result<Vec<Holding>>;
    fn get_holding(&self, holding_id: &str) -> Result<Holding>;
}

/// Trait for transaction retrieval operations.
pub trait TransactionRepositoryTrait: Send + Sync {
    fn get_transactions(&self) -> Result<Vec<Transaction>>;
    fn get_transactions_for_holding(&self, holding_id: &str) -> Result<Vec<Transaction>>;
}

/// Trait for renewal-history retrieval operations.
pub trait RenewalHistoryRepositoryTrait: Send + Sync {
    /// Renewal cost records for one holding, most recent first.
    fn get_renewal_history(&self, holding_id: &str) -> Result<Vec<RenewalCostRecord>>;
}
