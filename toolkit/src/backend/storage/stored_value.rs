//! Parse-and-validate rules for payloads crossing the storage boundary.
//!
//! A stored payload is only accepted if it parses into the expected type and
//! the parsed value passes [`StoredValue::validate`]. Anything else is treated
//! as corrupt.

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{AssetItem, BudgetItem, ChildSupportInputs, SpousalSupportInputs};

use super::migration::migrate_asset_payload;

const DAYS_PER_YEAR: u32 = 365;

pub trait StoredValue: Serialize + DeserializeOwned + Clone {
    /// Parse a raw payload
    fn decode(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| e.to_string())
    }

    /// Check invariants serde cannot express
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

macro_rules! plain_stored_value {
    ($($ty:ty),* $(,)?) => {
        $(impl StoredValue for $ty {})*
    };
}

plain_stored_value!(
    bool,
    i64,
    u64,
    f64,
    String,
    Vec<String>,
    serde_json::Value,
);

impl<T: StoredValue> StoredValue for Option<T> {
    fn decode(raw: &str) -> Result<Self, String> {
        if raw.trim() == "null" {
            Ok(None)
        } else {
            T::decode(raw).map(Some)
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            Some(value) => value.validate(),
            None => Ok(()),
        }
    }
}

fn check_amount(field: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() {
        return Err(format!("{} is not a finite number", field));
    }
    if value < 0.0 {
        return Err(format!("{} is negative ({})", field, value));
    }
    Ok(())
}

impl StoredValue for Vec<AssetItem> {
    fn decode(raw: &str) -> Result<Self, String> {
        migrate_asset_payload(raw).map(|report| report.items)
    }

    fn validate(&self) -> Result<(), String> {
        for item in self {
            if item.id.trim().is_empty() {
                return Err(format!("asset '{}' has an empty id", item.name));
            }
            check_amount(&format!("value of asset {}", item.id), item.value)?;
        }
        Ok(())
    }
}

impl StoredValue for Vec<BudgetItem> {
    fn validate(&self) -> Result<(), String> {
        for item in self {
            if item.id.trim().is_empty() {
                return Err(format!("budget item '{}' has an empty id", item.name));
            }
            check_amount(&format!("amount of budget item {}", item.id), item.amount)?;
        }
        Ok(())
    }
}

impl StoredValue for ChildSupportInputs {
    fn validate(&self) -> Result<(), String> {
        check_amount("parent1_income", self.parent1_income)?;
        check_amount("parent2_income", self.parent2_income)?;
        for (field, overnights) in [
            ("parent1_overnights", self.parent1_overnights),
            ("parent2_overnights", self.parent2_overnights),
        ] {
            if overnights > DAYS_PER_YEAR {
                return Err(format!("{} exceeds {} ({})", field, DAYS_PER_YEAR, overnights));
            }
        }
        for (field, cost) in [
            ("health_insurance_cost", self.health_insurance_cost),
            ("childcare_cost", self.childcare_cost),
            ("education_cost", self.education_cost),
        ] {
            if let Some(cost) = cost {
                check_amount(field, cost)?;
            }
        }
        Ok(())
    }
}

impl StoredValue for SpousalSupportInputs {
    fn validate(&self) -> Result<(), String> {
        check_amount("marriage_years", self.marriage_years)?;
        check_amount("payor_income", self.payor_income)?;
        check_amount("payee_income", self.payee_income)
    }
}
