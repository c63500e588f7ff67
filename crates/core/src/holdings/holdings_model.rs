//! Holding domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a tracked domain name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HoldingStatus {
    #[default]
    Active,
    ForSale,
    Sold,
    Expired,
}

/// A tracked domain-name asset with acquisition, renewal, and sale facts.
///
/// Holdings are produced by the intake flow and mutated by the sale and
/// renewal actions, both outside this crate. The analytics services only
/// derive read-only views from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    /// The domain name itself, e.g. "example.com". Used in alert messages.
    pub name: String,
    pub acquisition_date: NaiveDate,
    pub purchase_cost: Option<Decimal>,
    /// Current price of one renewal. Absent for holdings imported without
    /// registrar data.
    pub renewal_cost: Option<Decimal>,
    /// Number of years a single renewal extends the registration. Always >= 1.
    pub renewal_cycle_years: u32,
    /// Renewals already performed since acquisition.
    pub renewal_count: u32,
    /// Absence suppresses all renewal and expiry logic for this holding.
    pub expiry_date: Option<NaiveDate>,
    pub status: HoldingStatus,
    pub estimated_value: Option<Decimal>,
    pub sale_date: Option<NaiveDate>,
    pub sale_price: Option<Decimal>,
    pub sale_platform_fee: Option<Decimal>,
    pub notes: Option<String>,
}

impl Holding {
    /// Acquisition cost plus all renewal spend to date. Missing numerics
    /// count as zero.
    pub fn holding_cost(&self) -> Decimal {
        let purchase = self.purchase_cost.unwrap_or(Decimal::ZERO);
        let renewal = self.renewal_cost.unwrap_or(Decimal::ZERO);
        purchase + renewal * Decimal::from(self.renewal_count)
    }

    /// An active holding whose expiry date already passed. The registrar
    /// grace period means these are not necessarily lost yet, so the status
    /// is left untouched and callers decide how to surface it.
    pub fn is_lapsed(&self, today: NaiveDate) -> bool {
        self.status == HoldingStatus::Active
            && self.expiry_date.map(|d| d < today).unwrap_or(false)
    }
}

/// Transaction types recorded against a holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Buy,
    Renew,
    Sell,
    Transfer,
    Fee,
    Marketing,
    Advertising,
    InstallmentPayment,
}

impl TransactionType {
    /// Sale-type transactions bring revenue in.
    pub fn is_sale(&self) -> bool {
        matches!(self, TransactionType::Sell | TransactionType::InstallmentPayment)
    }

    /// Cost-type transactions count toward holding cost.
    pub fn is_cost(&self) -> bool {
        matches!(
            self,
            TransactionType::Buy | TransactionType::Renew | TransactionType::Fee
        )
    }
}

/// A money movement recorded against a holding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub holding_id: String,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub platform_fee: Option<Decimal>,
    pub platform_fee_percent: Option<Decimal>,
    /// Amount after platform fees. When absent it is derived, see
    /// [`Transaction::effective_net_amount`].
    pub net_amount: Option<Decimal>,
    pub transaction_date: NaiveDate,
    pub category: Option<String>,
    pub notes: Option<String>,
}

impl Transaction {
    /// Net amount with the fallback chain used by every financial
    /// computation: explicit `net_amount`, then `amount - platform_fee`,
    /// then `amount` alone.
    pub fn effective_net_amount(&self) -> Decimal {
        match self.net_amount {
            Some(net) => net,
            None => self.amount - self.platform_fee.unwrap_or(Decimal::ZERO),
        }
    }
}

/// Historical fact: one renewal payment for a holding.
///
/// Appended by the renewal action, never altered here. Sequences are stored
/// most-recent-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalCostRecord {
    pub holding_id: String,
    pub renewed_on: NaiveDate,
    pub cost: Decimal,
    pub currency: String,
    /// Cycle length in effect when this renewal was paid.
    pub cycle_years: u32,
}
