//! Equitable distribution check for the asset division worksheet.
//!
//! Ohio presumes an equal division of marital property (ORC 3105.171).
//! Given the user's proposed assignments this computes what each spouse walks
//! away with and whether the split is within tolerance of equal.
//!
//! ## Rules
//!
//! - Debts count negatively
//! - Separate property goes entirely to its owner, whatever its assignment
//! - Marital property goes to the assigned spouse, half to each when split,
//!   and to nobody while unassigned
//! - Unassigned items still count toward total and marital net worth
//! - The percentage difference is measured against total marital asset value
//!   (debts excluded)

use shared::{AssetItem, Assignment, DistributionSummary, GuidelineConstants, PropertyType};

#[derive(Clone)]
pub struct DistributionValidator {
    tolerance_percent: f64,
}

impl DistributionValidator {
    pub fn new() -> Self {
        Self::with_constants(&GuidelineConstants::default())
    }

    pub fn with_constants(constants: &GuidelineConstants) -> Self {
        Self {
            tolerance_percent: constants.balance_tolerance_percent,
        }
    }

    pub fn summarize(&self, items: &[AssetItem]) -> DistributionSummary {
        let mut spouse1_net_worth = 0.0;
        let mut spouse2_net_worth = 0.0;
        let mut total_net_worth = 0.0;
        let mut marital_net_worth = 0.0;
        let mut marital_asset_value = 0.0;
        let mut spouse1_items = Vec::new();
        let mut spouse2_items = Vec::new();
        let mut unassigned_items = Vec::new();

        for item in items {
            let value = item.signed_value();
            total_net_worth += value;

            match item.property_type {
                PropertyType::Spouse1Separate => {
                    spouse1_net_worth += value;
                    spouse1_items.push(item.id.clone());
                }
                PropertyType::Spouse2Separate => {
                    spouse2_net_worth += value;
                    spouse2_items.push(item.id.clone());
                }
                PropertyType::Marital => {
                    marital_net_worth += value;
                    if !item.asset_type.is_debt() {
                        marital_asset_value += item.value;
                    }
                    match item.assignment {
                        Assignment::Spouse1 => {
                            spouse1_net_worth += value;
                            spouse1_items.push(item.id.clone());
                        }
                        Assignment::Spouse2 => {
                            spouse2_net_worth += value;
                            spouse2_items.push(item.id.clone());
                        }
                        Assignment::Split => {
                            spouse1_net_worth += value / 2.0;
                            spouse2_net_worth += value / 2.0;
                            spouse1_items.push(item.id.clone());
                            spouse2_items.push(item.id.clone());
                        }
                        Assignment::Unassigned => unassigned_items.push(item.id.clone()),
                    }
                }
            }
        }

        let mut summary = DistributionSummary {
            spouse1_net_worth,
            spouse2_net_worth,
            total_net_worth,
            marital_net_worth,
            marital_asset_value,
            difference: 0.0,
            percentage_diff: 0.0,
            is_balanced: true,
            unassigned_count: unassigned_items.len(),
            spouse1_items,
            spouse2_items,
            unassigned_items,
        };

        if total_net_worth == 0.0 {
            return summary;
        }

        summary.difference = (spouse1_net_worth - spouse2_net_worth).abs();
        // Nothing divisible means nothing to be unbalanced against
        summary.percentage_diff = if marital_asset_value > 0.0 {
            summary.difference * 100.0 / marital_asset_value
        } else {
            0.0
        };
        summary.is_balanced = summary.percentage_diff <= self.tolerance_percent;
        summary
    }
}

impl Default for DistributionValidator {
    fn default() -> Self {
        Self::new()
    }
}
