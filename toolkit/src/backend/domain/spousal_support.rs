//! Spousal support estimator.
//!
//! Ohio has no spousal support formula; courts weigh the factors in
//! ORC 3105.18. This estimator uses a common rule of thumb so users have a
//! starting figure:
//!
//! - annual support = payor income × payor rate − payee income × payee rate,
//!   never below zero
//! - duration = marriage length × a multiplier range looked up by marriage
//!   length tier
//!
//! Support only flows from the higher earner, so a payor who does not earn
//! more than the payee gets an ineligible result rather than an error.

use log::debug;
use shared::{
    DurationRange, DurationTier, GuidelineConstants, SpousalSupportInputs, SpousalSupportResult,
};

use super::errors::EstimateError;

const DISCLAIMERS: [&str; 2] = [
    "Spousal support in Ohio is at the court's discretion; this figure is not a guideline amount.",
    "Statutory factors such as age, health, earning ability, and contributions to the marriage \
     are not modeled.",
];

#[derive(Clone)]
pub struct SpousalSupportCalculator {
    constants: GuidelineConstants,
}

impl SpousalSupportCalculator {
    pub fn new() -> Self {
        Self {
            constants: GuidelineConstants::default(),
        }
    }

    pub fn with_constants(constants: GuidelineConstants) -> Self {
        Self { constants }
    }

    pub fn estimate(
        &self,
        inputs: &SpousalSupportInputs,
    ) -> Result<SpousalSupportResult, EstimateError> {
        validate(inputs)?;
        let c = &self.constants;
        let mut warnings = Vec::new();

        if inputs.payor_income <= inputs.payee_income {
            warnings.extend(DISCLAIMERS.iter().map(|d| d.to_string()));
            return Ok(SpousalSupportResult {
                is_eligible: false,
                annual_support: 0.0,
                monthly_support: 0.0,
                duration: DurationRange::NONE,
                explanation: "Support is generally paid by the higher-earning spouse. \
                              The paying spouse's income must exceed the receiving spouse's income."
                    .to_string(),
                warnings,
                is_estimate: true,
            });
        }

        let payor_share = inputs.payor_income * c.spousal_payor_rate;
        let payee_share = inputs.payee_income * c.spousal_payee_rate;
        let annual_support = (payor_share - payee_share).max(0.0);
        let monthly_support = (annual_support / 12.0).round();

        let tier = self.duration_tier(inputs.marriage_years);
        let duration = DurationRange {
            min_years: round_tenth(inputs.marriage_years * tier.min_multiplier),
            max_years: round_tenth(inputs.marriage_years * tier.max_multiplier),
        };

        if annual_support == 0.0 {
            warnings.push(
                "The income gap is too small for the formula to produce support.".to_string(),
            );
        }
        if inputs.marriage_years > c.indefinite_support_years {
            warnings.push(format!(
                "Marriages longer than {:.0} years may support an indefinite award; \
                 indefinite support possible.",
                c.indefinite_support_years
            ));
        }
        warnings.extend(DISCLAIMERS.iter().map(|d| d.to_string()));

        let explanation = format!(
            "{:.0}% of payor income (${:.0}) minus {:.0}% of payee income (${:.0}) \
             = ${:.0}/year (${:.0}/month), \
             for roughly {:.1} to {:.1} years based on a {:.1}-year marriage.",
            c.spousal_payor_rate * 100.0,
            inputs.payor_income,
            c.spousal_payee_rate * 100.0,
            inputs.payee_income,
            annual_support,
            monthly_support,
            duration.min_years,
            duration.max_years,
            inputs.marriage_years,
        );

        debug!(
            "Spousal support estimate: annual={} monthly={} duration={:?}",
            annual_support, monthly_support, duration
        );

        Ok(SpousalSupportResult {
            is_eligible: true,
            annual_support,
            monthly_support,
            duration,
            explanation,
            warnings,
            is_estimate: true,
        })
    }

    /// First tier, in ascending order, whose bound covers the marriage length
    pub fn duration_tier(&self, marriage_years: f64) -> DurationTier {
        let tiers = &self.constants.spousal_duration_tiers;
        tiers
            .iter()
            .find(|tier| match tier.max_marriage_years {
                Some(max) => marriage_years <= max,
                None => true,
            })
            .or_else(|| tiers.last())
            .copied()
            .unwrap_or(DurationTier {
                max_marriage_years: None,
                min_multiplier: 0.0,
                max_multiplier: 0.0,
            })
    }
}

impl Default for SpousalSupportCalculator {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(inputs: &SpousalSupportInputs) -> Result<(), EstimateError> {
    if !inputs.marriage_years.is_finite() || inputs.marriage_years < 0.0 {
        return Err(EstimateError::invalid("Marriage length cannot be negative"));
    }
    for (label, income) in [("Payor", inputs.payor_income), ("Payee", inputs.payee_income)] {
        if !income.is_finite() || income < 0.0 {
            return Err(EstimateError::invalid(format!("{} income cannot be negative", label)));
        }
    }
    Ok(())
}

fn round_tenth(years: f64) -> f64 {
    (years * 10.0).round() / 10.0
}
