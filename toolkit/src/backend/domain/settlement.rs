//! Settlement overview figures over the asset division worksheet.

use shared::{AssetItem, Assignment, SettlementSummary};

pub fn settlement_summary(items: &[AssetItem]) -> SettlementSummary {
    let (debts, assets): (Vec<&AssetItem>, Vec<&AssetItem>) =
        items.iter().partition(|item| item.asset_type.is_debt());

    let total_assets: f64 = assets.iter().map(|i| i.value).sum();
    let total_debts: f64 = debts.iter().map(|i| i.value).sum();
    let unassigned_count = items
        .iter()
        .filter(|i| i.is_marital() && i.assignment == Assignment::Unassigned)
        .count();

    SettlementSummary {
        total_assets,
        total_debts,
        net_worth: total_assets - total_debts,
        debt_to_asset_ratio: if total_assets > 0.0 {
            Some(total_debts / total_assets)
        } else {
            None
        },
        assigned_count: items.len() - unassigned_count,
        unassigned_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{AssetType, PropertyType};

    #[test]
    fn test_assets_and_debts_are_separated() {
        let items = vec![
            AssetItem::new("House", 250_000.0, AssetType::Home).with_assignment(Assignment::Split),
            AssetItem::new("Mortgage", 150_000.0, AssetType::Debt)
                .with_assignment(Assignment::Split),
            AssetItem::new("Car loan", 10_000.0, AssetType::Debt),
            AssetItem::new("Heirloom", 5_000.0, AssetType::Personal)
                .with_property_type(PropertyType::Spouse1Separate),
        ];

        let summary = settlement_summary(&items);

        assert_eq!(summary.total_assets, 255_000.0);
        assert_eq!(summary.total_debts, 160_000.0);
        assert_eq!(summary.net_worth, 95_000.0);
        assert!((summary.debt_to_asset_ratio.unwrap() - 0.627).abs() < 0.001);
        // Separate property is never "unassigned"; it belongs to its owner
        assert_eq!(summary.unassigned_count, 1);
        assert_eq!(summary.assigned_count, 3);
    }

    #[test]
    fn test_debts_only() {
        let items = vec![AssetItem::new("Credit card", 3_000.0, AssetType::Debt)];
        let summary = settlement_summary(&items);
        assert_eq!(summary.net_worth, -3_000.0);
        assert_eq!(summary.debt_to_asset_ratio, None);
    }
}
