//! Output records produced by the regime solvers.

use serde::{Deserialize, Serialize};

use crate::parameters::ParameterSet;
use crate::regime::Regime;

/// Prices and quantities at an equilibrium.
///
/// Fields a regime does not determine stay at zero. `price_ceiling` is only set
/// by the two RPM regimes; [`price_ceiling`](EndogenousState::price_ceiling)
/// reads it as zero otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EndogenousState {
    /// Delivery to each retailer.
    pub delivery: f64,
    /// Delivery summed over all retailers.
    pub total_delivery: f64,
    /// Retail price in the high-demand state.
    pub price_high: f64,
    /// Retail price in the low-demand state.
    pub price_low: f64,
    /// Price charged by the wholesaler.
    pub wholesale_price: f64,
    /// Quantity sold in the high-demand state.
    pub quantity_high: f64,
    /// Quantity sold in the low-demand state.
    pub quantity_low: f64,
    /// Price restraint imposed by the wholesaler, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_ceiling: Option<f64>,
}

impl EndogenousState {
    /// Price restraint, or zero when the regime imposes none.
    pub fn price_ceiling(&self) -> f64 {
        self.price_ceiling.unwrap_or(0.0)
    }

    /// Reads a field by key. Unset keys read as zero.
    pub fn get(&self, key: EndogenousKey) -> f64 {
        match key {
            EndogenousKey::Delivery => self.delivery,
            EndogenousKey::TotalDelivery => self.total_delivery,
            EndogenousKey::PriceHigh => self.price_high,
            EndogenousKey::PriceLow => self.price_low,
            EndogenousKey::WholesalePrice => self.wholesale_price,
            EndogenousKey::QuantityHigh => self.quantity_high,
            EndogenousKey::QuantityLow => self.quantity_low,
            EndogenousKey::PriceCeiling => self.price_ceiling(),
        }
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = f64> + '_ {
        EndogenousKey::ALL.into_iter().map(move |key| self.get(key))
    }
}

/// Keys of [`EndogenousState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndogenousKey {
    Delivery,
    TotalDelivery,
    PriceHigh,
    PriceLow,
    WholesalePrice,
    QuantityHigh,
    QuantityLow,
    PriceCeiling,
}

impl EndogenousKey {
    /// Every key in serialization order.
    pub const ALL: [EndogenousKey; 8] = [
        EndogenousKey::Delivery,
        EndogenousKey::TotalDelivery,
        EndogenousKey::PriceHigh,
        EndogenousKey::PriceLow,
        EndogenousKey::WholesalePrice,
        EndogenousKey::QuantityHigh,
        EndogenousKey::QuantityLow,
        EndogenousKey::PriceCeiling,
    ];

    /// Stable snake_case name, matching the serialized field name.
    pub fn name(self) -> &'static str {
        match self {
            EndogenousKey::Delivery => "delivery",
            EndogenousKey::TotalDelivery => "total_delivery",
            EndogenousKey::PriceHigh => "price_high",
            EndogenousKey::PriceLow => "price_low",
            EndogenousKey::WholesalePrice => "wholesale_price",
            EndogenousKey::QuantityHigh => "quantity_high",
            EndogenousKey::QuantityLow => "quantity_low",
            EndogenousKey::PriceCeiling => "price_ceiling",
        }
    }
}

/// Expected surplus of each party.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SurplusState {
    pub consumer: f64,
    pub wholesaler: f64,
    /// Total over all retailers.
    pub retailer: f64,
}

impl SurplusState {
    /// Reads a field by key.
    pub fn get(&self, key: SurplusKey) -> f64 {
        match key {
            SurplusKey::Consumer => self.consumer,
            SurplusKey::Wholesaler => self.wholesaler,
            SurplusKey::Retailer => self.retailer,
        }
    }

    /// Producer side of the chain: wholesaler plus retailers.
    pub fn supply(&self) -> f64 {
        self.wholesaler + self.retailer
    }

    /// Consumer plus supply surplus.
    pub fn total(&self) -> f64 {
        self.consumer + self.supply()
    }
}

/// Keys of [`SurplusState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurplusKey {
    Consumer,
    Wholesaler,
    Retailer,
}

impl SurplusKey {
    /// Every key in serialization order.
    pub const ALL: [SurplusKey; 3] = [
        SurplusKey::Consumer,
        SurplusKey::Wholesaler,
        SurplusKey::Retailer,
    ];

    /// Stable snake_case name, matching the serialized field name.
    pub fn name(self) -> &'static str {
        match self {
            SurplusKey::Consumer => "consumer",
            SurplusKey::Wholesaler => "wholesaler",
            SurplusKey::Retailer => "retailer",
        }
    }
}

/// Algebraic branch that produced a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    /// The regime has a single closed form.
    Unbranched,
    /// Wholesale formulas for `theta >= 3`.
    HighTheta,
    /// Wholesale formulas for `theta < 3`.
    LowTheta,
    /// RPM formulas below `n_threshold_all(theta)`.
    FewRetailers,
    /// RPM formulas at or above `n_threshold_all(theta)`.
    ManyRetailers,
}

/// Snapshot of a single solve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Equilibrium {
    pub regime: Regime,
    pub branch: Branch,
    pub parameters: ParameterSet,
    pub endogenous: EndogenousState,
    pub surplus: SurplusState,
}

impl Equilibrium {
    /// Returns `true` when every reported number is finite.
    pub fn is_finite(&self) -> bool {
        self.endogenous.values().all(f64::is_finite)
            && SurplusKey::ALL
                .iter()
                .all(|key| self.surplus.get(*key).is_finite())
    }
}
