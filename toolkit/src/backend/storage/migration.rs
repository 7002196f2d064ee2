//! Upgrades for payloads written by earlier versions of the toolkit.
//!
//! Asset records saved before separate property was tracked have no
//! `property_type` field. They are upgraded to `marital` on read.

use log::info;
use serde_json::Value;
use shared::{AssetItem, PropertyType};

/// Parsed asset list plus how many records needed upgrading
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationReport {
    pub items: Vec<AssetItem>,
    pub upgraded: usize,
}

/// Parse a stored asset list, filling in missing property types
pub fn migrate_asset_payload(raw: &str) -> Result<MigrationReport, String> {
    let mut value: Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    let records = value
        .as_array_mut()
        .ok_or_else(|| "asset payload is not a list".to_string())?;

    let marital = serde_json::to_value(PropertyType::Marital).map_err(|e| e.to_string())?;
    let mut upgraded = 0;
    for record in records.iter_mut() {
        let Some(fields) = record.as_object_mut() else {
            return Err("asset record is not an object".to_string());
        };
        if !fields.contains_key("property_type") {
            fields.insert("property_type".to_string(), marital.clone());
            upgraded += 1;
        }
    }

    let items: Vec<AssetItem> = serde_json::from_value(value).map_err(|e| e.to_string())?;
    if upgraded > 0 {
        info!("Upgraded {} legacy asset records to marital property", upgraded);
    }

    Ok(MigrationReport { items, upgraded })
}
