//! Purchase Order Model
//!
//! Line items and order-level expenses exchanged with the order-entry form.
//! Field aliases accept the names the form submits.

use serde::{Deserialize, Serialize};

use crate::types::NumericInput;

/// Purchase order line item
///
/// `line_total` is computed by the caller (unit price × quantity minus unit
/// discount). The `apportioned_cost`, `final_total_cost` and
/// `final_unit_cost` fields are outputs of expense apportionment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PurchaseOrderItem {
    /// Product reference
    #[serde(default, alias = "productId")]
    pub product_id: Option<i64>,
    #[serde(default, alias = "productName")]
    pub product_name: Option<String>,
    /// Unit price in currency unit
    #[serde(default, alias = "unitPrice")]
    pub unit_price: f64,
    /// Quantity as submitted (number or locale string)
    #[serde(default, alias = "quantidade")]
    pub quantity: Option<NumericInput>,
    /// Discount per unit in currency unit
    #[serde(default, alias = "unitDiscount")]
    pub unit_discount: f64,
    /// Line total before expenses
    #[serde(default, alias = "lineTotal", alias = "precoTotal")]
    pub line_total: f64,
    /// Share of order-level expenses allocated to this line
    #[serde(default, alias = "apportionedCost")]
    pub apportioned_cost: f64,
    /// `line_total + apportioned_cost`
    #[serde(default, alias = "finalTotalCost")]
    pub final_total_cost: f64,
    /// Per-unit cost after expenses (absent when nothing was apportioned)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "finalUnitCost"
    )]
    pub final_unit_cost: Option<f64>,
}

impl PurchaseOrderItem {
    /// Create a line item from a precomputed total and quantity
    pub fn new(line_total: f64, quantity: impl Into<NumericInput>) -> Self {
        Self {
            line_total,
            quantity: Some(quantity.into()),
            ..Default::default()
        }
    }

    /// Attach product information
    pub fn with_product(mut self, product_id: i64, product_name: impl Into<String>) -> Self {
        self.product_id = Some(product_id);
        self.product_name = Some(product_name.into());
        self
    }

    /// Attach unit pricing
    pub fn with_unit_pricing(mut self, unit_price: f64, unit_discount: f64) -> Self {
        self.unit_price = unit_price;
        self.unit_discount = unit_discount;
        self
    }
}

/// Order-level expenses to be apportioned across line items
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderExpenses {
    #[serde(default, alias = "frete")]
    pub freight: NumericInput,
    #[serde(default, alias = "seguro")]
    pub insurance: NumericInput,
    /// Other charges
    #[serde(default, alias = "outrasDespesas")]
    pub other: NumericInput,
}

impl OrderExpenses {
    pub fn new(
        freight: impl Into<NumericInput>,
        insurance: impl Into<NumericInput>,
        other: impl Into<NumericInput>,
    ) -> Self {
        Self {
            freight: freight.into(),
            insurance: insurance.into(),
            other: other.into(),
        }
    }
}
