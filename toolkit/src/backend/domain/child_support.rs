//! Ohio child support estimator.
//!
//! A simplified rendition of the Ohio income-shares worksheet:
//!
//! 1. Combined income = both parents' annual gross income
//! 2. Base percentage from the child count (capped at the last table entry)
//! 3. Annual obligation = combined income × base percentage
//! 4. The parent with fewer overnights pays their income share of the obligation
//! 5. Monthly basic support = annual share ÷ 12, rounded to whole dollars
//! 6. Shared parenting: at or above the overnight threshold, support is
//!    reduced by overnight fraction × multiplier × monthly support
//! 7. Health insurance, childcare and education costs are added pro rata
//! 8. A monthly floor applies when the paying parent earns above a threshold
//!
//! Results are estimates only. The constants are approximations and are
//! read from [`GuidelineConstants`] so they can be corrected by configuration.

use log::debug;
use shared::{ChildSupportInputs, ChildSupportResult, GuidelineConstants, Parent};

use super::errors::EstimateError;

pub const DAYS_PER_YEAR: u32 = 365;

#[derive(Clone)]
pub struct ChildSupportCalculator {
    constants: GuidelineConstants,
}

impl ChildSupportCalculator {
    pub fn new() -> Self {
        Self {
            constants: GuidelineConstants::default(),
        }
    }

    pub fn with_constants(constants: GuidelineConstants) -> Self {
        Self { constants }
    }

    /// Base percentage of combined income for `children` children
    pub fn base_rate(&self, children: u32) -> f64 {
        let rates = &self.constants.child_support_rates;
        let index = (children.max(1) as usize).min(rates.len()).saturating_sub(1);
        rates.get(index).copied().unwrap_or(0.0)
    }

    pub fn estimate(
        &self,
        inputs: &ChildSupportInputs,
    ) -> Result<ChildSupportResult, EstimateError> {
        self.validate(inputs)?;
        let c = &self.constants;
        let mut warnings = Vec::new();

        let total_overnights = inputs.parent1_overnights + inputs.parent2_overnights;
        if total_overnights != DAYS_PER_YEAR {
            warnings.push(format!(
                "Overnights add up to {} instead of {}; check the parenting schedule.",
                total_overnights, DAYS_PER_YEAR
            ));
        }

        let combined_income = inputs.parent1_income + inputs.parent2_income;
        if combined_income < c.min_combined_income {
            warnings.push(format!(
                "Combined income of ${:.0} is below the guideline schedule (${:.0}); \
                 the court applies low-income rules.",
                combined_income, c.min_combined_income
            ));
        } else if combined_income > c.max_combined_income {
            warnings.push(format!(
                "Combined income of ${:.0} is above the guideline schedule (${:.0}); \
                 support is set case by case.",
                combined_income, c.max_combined_income
            ));
        }

        let rate = self.base_rate(inputs.number_of_children);
        let annual_obligation = combined_income * rate;

        // Ties leave parent 1 as the residential parent
        let paying_parent = if inputs.parent1_overnights >= inputs.parent2_overnights {
            Parent::Parent2
        } else {
            Parent::Parent1
        };
        let (paying_income, paying_overnights) = match paying_parent {
            Parent::Parent1 => (inputs.parent1_income, inputs.parent1_overnights),
            Parent::Parent2 => (inputs.parent2_income, inputs.parent2_overnights),
        };
        let income_share = paying_income / combined_income;

        // obligation × share, written so it stays monotonic in the payer's income
        let annual_share = paying_income * rate;
        let mut basic_support = (annual_share / 12.0).round();

        let mut shared_parenting_adjustment = 0.0;
        if paying_overnights >= c.shared_parenting_threshold {
            let overnight_fraction = paying_overnights as f64 / DAYS_PER_YEAR as f64;
            let reduction = overnight_fraction * c.shared_parenting_multiplier * basic_support;
            shared_parenting_adjustment = reduction.round().min(basic_support);
            basic_support -= shared_parenting_adjustment;
            warnings.push(format!(
                "Shared parenting adjustment applied: {} overnights ({:.1}% of the year) \
                 reduces support by ${:.0} per month.",
                paying_overnights,
                overnight_fraction * 100.0,
                shared_parenting_adjustment
            ));
        }

        let annual_add_ons = inputs.health_insurance_cost.unwrap_or(0.0)
            + inputs.childcare_cost.unwrap_or(0.0)
            + inputs.education_cost.unwrap_or(0.0);
        let monthly_add_ons = annual_add_ons * income_share / 12.0;

        let mut total_support = round_cents(basic_support + monthly_add_ons);
        if total_support < c.minimum_support && paying_income > c.minimum_support_income {
            warnings.push(format!(
                "Support raised to the ${:.0} monthly minimum.",
                c.minimum_support
            ));
            total_support = c.minimum_support;
        }

        let formula = format!(
            "${:.0} combined income × {:.1}% ({} {}) = ${:.0}/year; \
             × {:.1}% income share ÷ 12 = ${:.0}/month{}{}",
            combined_income,
            rate * 100.0,
            inputs.number_of_children,
            if inputs.number_of_children == 1 { "child" } else { "children" },
            annual_obligation,
            income_share * 100.0,
            basic_support + shared_parenting_adjustment,
            if shared_parenting_adjustment > 0.0 {
                format!(" − ${:.0} shared parenting", shared_parenting_adjustment)
            } else {
                String::new()
            },
            if monthly_add_ons > 0.0 {
                format!(" + ${:.2} add-on costs", monthly_add_ons)
            } else {
                String::new()
            },
        );

        debug!(
            "Child support estimate: paying={} basic={} total={}",
            paying_parent, basic_support, total_support
        );

        Ok(ChildSupportResult {
            basic_support,
            shared_parenting_adjustment,
            total_support,
            paying_parent,
            paying_parent_income_share: income_share,
            formula,
            warnings,
            is_estimate: true,
        })
    }

    fn validate(&self, inputs: &ChildSupportInputs) -> Result<(), EstimateError> {
        for (label, income) in [
            ("Parent 1", inputs.parent1_income),
            ("Parent 2", inputs.parent2_income),
        ] {
            if !income.is_finite() || income <= 0.0 {
                return Err(EstimateError::invalid(format!(
                    "{} income must be greater than 0",
                    label
                )));
            }
        }

        let max_children = self.constants.max_children;
        if inputs.number_of_children < 1 || inputs.number_of_children > max_children {
            return Err(EstimateError::invalid(format!(
                "Number of children must be between 1 and {}",
                max_children
            )));
        }

        for (label, overnights) in [
            ("Parent 1", inputs.parent1_overnights),
            ("Parent 2", inputs.parent2_overnights),
        ] {
            if overnights > DAYS_PER_YEAR {
                return Err(EstimateError::invalid(format!(
                    "{} overnights cannot exceed {}",
                    label, DAYS_PER_YEAR
                )));
            }
        }

        for (label, cost) in [
            ("Health insurance cost", inputs.health_insurance_cost),
            ("Childcare cost", inputs.childcare_cost),
            ("Education cost", inputs.education_cost),
        ] {
            if let Some(cost) = cost {
                if !cost.is_finite() || cost < 0.0 {
                    return Err(EstimateError::invalid(format!("{} cannot be negative", label)));
                }
            }
        }

        Ok(())
    }
}

impl Default for ChildSupportCalculator {
    fn default() -> Self {
        Self::new()
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(parent1_overnights: u32, parent2_overnights: u32) -> ChildSupportInputs {
        ChildSupportInputs {
            parent1_income: 50_000.0,
            parent2_income: 30_000.0,
            number_of_children: 1,
            parent1_overnights,
            parent2_overnights,
            health_insurance_cost: None,
            childcare_cost: None,
            education_cost: None,
        }
    }

    #[test]
    fn test_standard_schedule() {
        let result = ChildSupportCalculator::new().estimate(&inputs(280, 85)).unwrap();

        assert_eq!(result.basic_support, 355.0);
        assert_eq!(result.total_support, 355.0);
        assert_eq!(result.paying_parent, Parent::Parent2);
        assert_eq!(result.shared_parenting_adjustment, 0.0);
        assert!((result.paying_parent_income_share - 0.375).abs() < 1e-9);
        assert!(result.warnings.is_empty());
        assert!(result.is_estimate);
    }

    #[test]
    fn test_equal_time_applies_shared_parenting() {
        let result = ChildSupportCalculator::new().estimate(&inputs(183, 182)).unwrap();

        // round(182 / 365 × 0.5 × 355) = 89
        assert_eq!(result.shared_parenting_adjustment, 89.0);
        assert_eq!(result.basic_support, 266.0);
        assert!(result.total_support < 355.0);
        assert!(result.warnings.iter().any(|w| w.contains("Shared parenting")));
    }

    #[test]
    fn test_parent1_pays_when_parent2_is_residential() {
        let result = ChildSupportCalculator::new().estimate(&inputs(85, 280)).unwrap();

        // 50,000 × 14.2% ÷ 12 = 591.67
        assert_eq!(result.paying_parent, Parent::Parent1);
        assert_eq!(result.basic_support, 592.0);
    }

    #[test]
    fn test_overnight_mismatch_warns() {
        let result = ChildSupportCalculator::new().estimate(&inputs(280, 80)).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("360")));
    }

    #[test]
    fn test_add_on_costs_are_prorated() {
        let mut with_costs = inputs(280, 85);
        with_costs.health_insurance_cost = Some(2_400.0);
        with_costs.childcare_cost = Some(6_000.0);
        with_costs.education_cost = Some(1_200.0);

        let result = ChildSupportCalculator::new().estimate(&with_costs).unwrap();

        // 9,600 × 37.5% ÷ 12 = 300
        assert_eq!(result.basic_support, 355.0);
        assert_eq!(result.total_support, 655.0);
        assert!(result.formula.contains("add-on"));
    }

    #[test]
    fn test_rate_table_caps_at_six_children() {
        let calculator = ChildSupportCalculator::new();
        assert_eq!(calculator.base_rate(1), 0.142);
        assert_eq!(calculator.base_rate(2), 0.206);
        assert_eq!(calculator.base_rate(6), 0.333);
        assert_eq!(calculator.base_rate(9), 0.333);
    }

    #[test]
    fn test_minimum_support_floor() {
        let low = ChildSupportInputs {
            parent1_income: 200_000.0,
            parent2_income: 7_000.0,
            number_of_children: 1,
            parent1_overnights: 200,
            parent2_overnights: 165,
            health_insurance_cost: None,
            childcare_cost: None,
            education_cost: None,
        };

        let result = ChildSupportCalculator::new().estimate(&low).unwrap();

        // 7,000 × 14.2% ÷ 12 = 83, less round(165/365 × 0.5 × 83) = 19 → 64
        assert_eq!(result.basic_support, 64.0);
        assert_eq!(result.total_support, 64.0);

        let mut lower = low.clone();
        lower.parent2_income = 6_500.0;
        lower.parent2_overnights = 164;
        lower.parent1_overnights = 201;
        let mut constants = GuidelineConstants::default();
        constants.shared_parenting_multiplier = 1.0;
        let result = ChildSupportCalculator::with_constants(constants).estimate(&lower).unwrap();

        // 6,500 × 14.2% ÷ 12 = 77, less round(164/365 × 77) = 35 → 42, floored to 50
        assert_eq!(result.basic_support, 42.0);
        assert_eq!(result.total_support, 50.0);
        assert!(result.warnings.iter().any(|w| w.contains("minimum")));
    }

    #[test]
    fn test_floor_not_applied_below_income_threshold() {
        let mut constants = GuidelineConstants::default();
        constants.shared_parenting_multiplier = 1.0;
        let very_low = ChildSupportInputs {
            parent1_income: 40_000.0,
            parent2_income: 4_000.0,
            number_of_children: 1,
            parent1_overnights: 183,
            parent2_overnights: 182,
            health_insurance_cost: None,
            childcare_cost: None,
            education_cost: None,
        };

        let result = ChildSupportCalculator::with_constants(constants).estimate(&very_low).unwrap();

        // 4,000 × 14.2% ÷ 12 = 47, less round(182/365 × 47) = 23 → 24
        assert_eq!(result.total_support, 24.0);
    }

    #[test]
    fn test_combined_income_bounds_warn() {
        let calculator = ChildSupportCalculator::new();

        let mut high = inputs(280, 85);
        high.parent1_income = 400_000.0;
        let result = calculator.estimate(&high).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("above the guideline")));

        let mut low = inputs(280, 85);
        low.parent1_income = 3_000.0;
        low.parent2_income = 2_000.0;
        let result = calculator.estimate(&low).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("below the guideline")));
    }

    #[test]
    fn test_invalid_inputs_fail() {
        let calculator = ChildSupportCalculator::new();

        let mut zero_income = inputs(280, 85);
        zero_income.parent1_income = 0.0;
        assert!(matches!(calculator.estimate(&zero_income), Err(EstimateError::InvalidInput(_))));

        let mut no_children = inputs(280, 85);
        no_children.number_of_children = 0;
        assert!(calculator.estimate(&no_children).is_err());

        let mut too_many = inputs(280, 85);
        too_many.number_of_children = 11;
        assert!(calculator.estimate(&too_many).is_err());

        let mut negative_cost = inputs(280, 85);
        negative_cost.childcare_cost = Some(-1.0);
        assert!(calculator.estimate(&negative_cost).is_err());

        let mut nan_income = inputs(280, 85);
        nan_income.parent2_income = f64::NAN;
        assert!(calculator.estimate(&nan_income).is_err());
    }

    #[test]
    fn test_overnights_beyond_a_year_are_rejected() {
        let calculator = ChildSupportCalculator::new();

        let err = calculator.estimate(&inputs(u32::MAX, 85)).unwrap_err();
        assert_eq!(
            err,
            EstimateError::InvalidInput("Parent 1 overnights cannot exceed 365".to_string())
        );
        assert!(calculator.estimate(&inputs(85, 366)).is_err());

        let result = calculator.estimate(&inputs(365, 365)).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("730")));
    }

    #[test]
    fn test_formula_mentions_figures() {
        let result = ChildSupportCalculator::new().estimate(&inputs(280, 85)).unwrap();
        assert!(result.formula.contains("$80000"));
        assert!(result.formula.contains("14.2%"));
        assert!(result.formula.contains("$355/month"));
    }
}
