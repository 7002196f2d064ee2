//! Budget worksheet aggregation.
//!
//! Pure reductions over the persisted budget line items; nothing derived is
//! stored, the summary is rebuilt on every read.

use shared::{BudgetItem, BudgetItemKind, BudgetSummary, CategoryTotal, GuidelineConstants};
use std::collections::BTreeMap;

#[derive(Clone)]
pub struct BudgetAggregator {
    healthy_essential_ratio: f64,
}

impl BudgetAggregator {
    pub fn new() -> Self {
        Self::with_constants(&GuidelineConstants::default())
    }

    pub fn with_constants(constants: &GuidelineConstants) -> Self {
        Self {
            healthy_essential_ratio: constants.healthy_essential_ratio,
        }
    }

    pub fn total_income(items: &[BudgetItem]) -> f64 {
        items
            .iter()
            .filter(|i| i.kind == BudgetItemKind::Income)
            .map(|i| i.amount)
            .sum()
    }

    /// Sum of expenses, optionally limited to essential ones
    pub fn total_expenses(items: &[BudgetItem], essential_only: bool) -> f64 {
        items
            .iter()
            .filter(|i| i.kind == BudgetItemKind::Expense)
            .filter(|i| !essential_only || i.essential)
            .map(|i| i.amount)
            .sum()
    }

    pub fn summarize(&self, items: &[BudgetItem]) -> BudgetSummary {
        let total_income = Self::total_income(items);
        let total_expenses = Self::total_expenses(items, false);
        let essential_expenses = Self::total_expenses(items, true);

        let essential_ratio = if total_income > 0.0 {
            Some(essential_expenses / total_income)
        } else {
            None
        };
        let is_healthy = essential_ratio.is_some_and(|ratio| ratio <= self.healthy_essential_ratio);

        let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
        for item in items.iter().filter(|i| i.kind == BudgetItemKind::Expense) {
            let category = if item.category.trim().is_empty() {
                "Uncategorized".to_string()
            } else {
                item.category.trim().to_string()
            };
            *by_category.entry(category).or_insert(0.0) += item.amount;
        }

        BudgetSummary {
            total_income,
            total_expenses,
            essential_expenses,
            balance: total_income - total_expenses,
            essential_ratio,
            is_healthy,
            expenses_by_category: by_category
                .into_iter()
                .map(|(category, total)| CategoryTotal { category, total })
                .collect(),
        }
    }
}

impl Default for BudgetAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_budget() -> Vec<BudgetItem> {
        vec![
            BudgetItem::income("Salary", 4_000.0),
            BudgetItem::income("Child support received", 500.0),
            BudgetItem::expense("Rent", "Housing", 1_500.0, true),
            BudgetItem::expense("Groceries", "Food", 600.0, true),
            BudgetItem::expense("Streaming", "Entertainment", 50.0, false),
            BudgetItem::expense("Dining out", "Food", 200.0, false),
        ]
    }

    #[test]
    fn test_totals_and_balance() {
        let summary = BudgetAggregator::new().summarize(&sample_budget());

        assert_eq!(summary.total_income, 4_500.0);
        assert_eq!(summary.total_expenses, 2_350.0);
        assert_eq!(summary.essential_expenses, 2_100.0);
        assert_eq!(summary.balance, 2_150.0);
    }

    #[test]
    fn test_essential_ratio_threshold() {
        let aggregator = BudgetAggregator::new();
        let summary = aggregator.summarize(&sample_budget());
        // 2,100 / 4,500 = 0.467
        assert!(summary.is_healthy);

        let tight = vec![
            BudgetItem::income("Wages", 2_000.0),
            BudgetItem::expense("Rent", "Housing", 1_500.0, true),
        ];
        let summary = aggregator.summarize(&tight);
        assert_eq!(summary.essential_ratio, Some(0.75));
        assert!(!summary.is_healthy);
    }

    #[test]
    fn test_no_income_has_no_ratio() {
        let items = vec![BudgetItem::expense("Rent", "Housing", 1_000.0, true)];
        let summary = BudgetAggregator::new().summarize(&items);

        assert_eq!(summary.essential_ratio, None);
        assert!(!summary.is_healthy);
        assert_eq!(summary.balance, -1_000.0);
    }

    #[test]
    fn test_expenses_grouped_by_category() {
        let mut items = sample_budget();
        items.push(BudgetItem::expense("Gift", "  ", 25.0, false));

        let summary = BudgetAggregator::new().summarize(&items);
        let categories: Vec<(&str, f64)> = summary
            .expenses_by_category
            .iter()
            .map(|c| (c.category.as_str(), c.total))
            .collect();

        assert_eq!(
            categories,
            vec![
                ("Entertainment", 50.0),
                ("Food", 800.0),
                ("Housing", 1_500.0),
                ("Uncategorized", 25.0),
            ]
        );
    }

    #[test]
    fn test_empty_budget() {
        let summary = BudgetAggregator::new().summarize(&[]);
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.balance, 0.0);
        assert!(summary.expenses_by_category.is_empty());
    }
}
