//! Export service domain logic.
//!
//! Flattens the persisted worksheets into a downloadable document. Exports are
//! best effort: an estimate that cannot be computed from the saved inputs is
//! left out rather than failing the export.

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use serde_json::json;
use shared::{AssetItem, BudgetItem, BudgetItemKind, ExportDocument, ExportFormat};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::domain::toolkit_service::ToolkitService;
use crate::backend::storage::StorageKey;

const CSV_HEADER: [&str; 8] = [
    "record_type",
    "id",
    "name",
    "type",
    "amount",
    "property_type",
    "assignment",
    "essential",
];

#[derive(Clone, Default)]
pub struct ExportService {}

impl ExportService {
    pub fn new() -> Self {
        Self {}
    }

    pub fn export(&self, toolkit: &ToolkitService, format: ExportFormat) -> Result<ExportDocument> {
        info!("Exporting toolkit data as {:?}", format);

        let content = match format {
            ExportFormat::Text => self.render_text(toolkit)?,
            ExportFormat::Csv => self.render_csv(toolkit.assets(), toolkit.budget_items())?,
            ExportFormat::Json => self.render_json(toolkit)?,
        };

        let filename = format!(
            "ohio_divorce_toolkit_{}.{}",
            Utc::now().format("%Y%m%d"),
            format.extension()
        );

        Ok(ExportDocument {
            filename,
            format,
            content,
        })
    }

    /// Write an export into `directory`, returning the file path
    pub fn export_to_path(
        &self,
        toolkit: &ToolkitService,
        format: ExportFormat,
        directory: &Path,
    ) -> Result<PathBuf> {
        if !directory.is_dir() {
            return Err(anyhow::anyhow!("Export directory does not exist: {}", directory.display()));
        }

        let document = self.export(toolkit, format)?;
        let path = directory.join(&document.filename);
        fs::write(&path, document.content)?;
        info!("Exported toolkit data to {}", path.display());
        Ok(path)
    }

    fn render_csv(&self, assets: &[AssetItem], budget: &[BudgetItem]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADER)?;

        for item in assets {
            let value = format!("{:.2}", item.value);
            writer.write_record([
                "asset",
                item.id.as_str(),
                item.name.as_str(),
                item.asset_type.label(),
                value.as_str(),
                item.property_type.label(),
                item.assignment.label(),
                "",
            ])?;
        }

        for item in budget {
            let record_type = match item.kind {
                BudgetItemKind::Income => "income",
                BudgetItemKind::Expense => "expense",
            };
            let amount = format!("{:.2}", item.amount);
            writer.write_record([
                record_type,
                item.id.as_str(),
                item.name.as_str(),
                item.category.as_str(),
                amount.as_str(),
                "",
                "",
                if item.essential { "yes" } else { "no" },
            ])?;
        }

        let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))?;
        Ok(String::from_utf8(bytes)?)
    }

    fn render_json(&self, toolkit: &ToolkitService) -> Result<String> {
        let registry = toolkit.registry();
        let mut data = serde_json::Map::new();
        for (key, qualified) in registry.entries() {
            let value = match key {
                StorageKey::AssetDivision => serde_json::to_value(toolkit.assets())?,
                StorageKey::ChildSupportInputs => {
                    serde_json::to_value(toolkit.child_support_inputs())?
                }
                StorageKey::SpousalSupportInputs => {
                    serde_json::to_value(toolkit.spousal_support_inputs())?
                }
                StorageKey::Budget => serde_json::to_value(toolkit.budget_items())?,
            };
            data.insert(qualified, value);
        }

        let snapshot = json!({
            "exported_at": Utc::now().to_rfc3339(),
            "namespace": registry.namespace(),
            "data": data,
            "summaries": {
                "distribution": toolkit.distribution_summary(),
                "settlement": toolkit.settlement_summary(),
                "budget": toolkit.budget_summary(),
                "child_support": child_support_or_none(toolkit),
                "spousal_support": spousal_support_or_none(toolkit),
            },
        });

        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    fn render_text(&self, toolkit: &ToolkitService) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        writeln!(out, "Ohio Divorce Toolkit Report")?;
        writeln!(out, "Generated {}", Utc::now().format("%Y-%m-%d %H:%M UTC"))?;
        writeln!(out, "All figures are estimates for planning only and are not legal advice.")?;

        writeln!(out, "\nASSET DIVISION")?;
        if toolkit.assets().is_empty() {
            writeln!(out, "  No assets or debts entered.")?;
        }
        for item in toolkit.assets() {
            writeln!(
                out,
                "  {:<28} {:>14} {:<18} {:<18} {}",
                item.name,
                money(item.signed_value()),
                item.asset_type.label(),
                item.property_type.label(),
                item.assignment.label()
            )?;
        }
        let distribution = toolkit.distribution_summary();
        writeln!(out, "  Spouse 1 net worth: {}", money(distribution.spouse1_net_worth))?;
        writeln!(out, "  Spouse 2 net worth: {}", money(distribution.spouse2_net_worth))?;
        writeln!(out, "  Total net worth: {}", money(distribution.total_net_worth))?;
        writeln!(
            out,
            "  Difference: {} ({:.1}%), {}",
            money(distribution.difference),
            distribution.percentage_diff,
            if distribution.is_balanced { "balanced" } else { "not balanced" }
        )?;
        if distribution.unassigned_count > 0 {
            writeln!(out, "  {} marital item(s) still unassigned", distribution.unassigned_count)?;
        }

        writeln!(out, "\nCHILD SUPPORT")?;
        match child_support_or_none(toolkit) {
            Some(result) => {
                writeln!(out, "  Paying parent: {}", result.paying_parent)?;
                writeln!(out, "  Basic support: {}/month", money(result.basic_support))?;
                writeln!(out, "  Total support: {}/month", money(result.total_support))?;
                writeln!(out, "  {}", result.formula)?;
                for warning in &result.warnings {
                    writeln!(out, "  Note: {}", warning)?;
                }
            }
            None => {
                writeln!(
                    out,
                    "  Enter both incomes and the parenting schedule to see an estimate."
                )?;
            }
        }

        writeln!(out, "\nSPOUSAL SUPPORT")?;
        match spousal_support_or_none(toolkit) {
            Some(result) if result.is_eligible => {
                writeln!(out, "  Estimated support: {}/month", money(result.monthly_support))?;
                writeln!(
                    out,
                    "  Duration: {:.1} to {:.1} years",
                    result.duration.min_years, result.duration.max_years
                )?;
                writeln!(out, "  {}", result.explanation)?;
                for warning in &result.warnings {
                    writeln!(out, "  Note: {}", warning)?;
                }
            }
            Some(result) => {
                writeln!(out, "  Not eligible: {}", result.explanation)?;
            }
            None => {
                writeln!(out, "  Enter the marriage length and both incomes to see an estimate.")?;
            }
        }

        let budget = toolkit.budget_summary();
        writeln!(out, "\nMONTHLY BUDGET")?;
        writeln!(out, "  Income: {}", money(budget.total_income))?;
        writeln!(out, "  Expenses: {}", money(budget.total_expenses))?;
        writeln!(out, "  Balance: {}", money(budget.balance))?;
        for category in &budget.expenses_by_category {
            writeln!(out, "    {:<24} {:>12}", category.category, money(category.total))?;
        }
        if let Some(ratio) = budget.essential_ratio {
            writeln!(
                out,
                "  Essential expenses are {:.0}% of income ({})",
                ratio * 100.0,
                if budget.is_healthy { "healthy" } else { "high" }
            )?;
        }

        Ok(out)
    }
}

fn child_support_or_none(toolkit: &ToolkitService) -> Option<shared::ChildSupportResult> {
    toolkit.child_support_estimate().unwrap_or_else(|e| {
        warn!("Child support estimate left out of export: {}", e);
        None
    })
}

fn spousal_support_or_none(toolkit: &ToolkitService) -> Option<shared::SpousalSupportResult> {
    toolkit.spousal_support_estimate().unwrap_or_else(|e| {
        warn!("Spousal support estimate left out of export: {}", e);
        None
    })
}

fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${:.2}", amount)
    }
}
