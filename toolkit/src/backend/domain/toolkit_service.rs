//! Tool state service.
//!
//! Owns the persisted cells behind each worksheet and recomputes derived
//! figures from them on demand. This is the layer a UI talks to: it edits
//! worksheet state through here and reads back summaries and estimates.
//!
//! ## Business Rules
//!
//! - Asset and budget amounts must be finite and non-negative
//! - Asset and budget names cannot be empty
//! - Estimators are only called once inputs have been saved; before that the
//!   estimate getters return `None` so the UI can show an "enter values" state

use anyhow::Result;
use log::{info, warn};
use shared::{
    AssetItem, BudgetItem, BudgetSummary, ChildSupportInputs, ChildSupportResult,
    DistributionSummary, GuidelineConstants, SettlementSummary, SpousalSupportInputs,
    SpousalSupportResult,
};
use std::sync::Arc;

use crate::backend::domain::budget::BudgetAggregator;
use crate::backend::domain::child_support::ChildSupportCalculator;
use crate::backend::domain::equitable_distribution::DistributionValidator;
use crate::backend::domain::settlement::settlement_summary;
use crate::backend::domain::spousal_support::SpousalSupportCalculator;
use crate::backend::storage::{KeyRegistry, KeyValueStore, PersistedCell, StorageKey};

pub struct ToolkitService {
    registry: KeyRegistry,
    assets: PersistedCell<Vec<AssetItem>>,
    child_support_inputs: PersistedCell<Option<ChildSupportInputs>>,
    spousal_support_inputs: PersistedCell<Option<SpousalSupportInputs>>,
    budget: PersistedCell<Vec<BudgetItem>>,
    child_support: ChildSupportCalculator,
    spousal_support: SpousalSupportCalculator,
    distribution: DistributionValidator,
    budget_aggregator: BudgetAggregator,
}

impl ToolkitService {
    /// Open every worksheet's cell in `store` under the registry's keys
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        registry: KeyRegistry,
        guidelines: GuidelineConstants,
    ) -> Self {
        info!("Opening toolkit state under namespace {}", registry.namespace());

        Self {
            assets: PersistedCell::load(
                store.clone(),
                registry.key(StorageKey::AssetDivision),
                Vec::new(),
            ),
            child_support_inputs: PersistedCell::load(
                store.clone(),
                registry.key(StorageKey::ChildSupportInputs),
                None,
            ),
            spousal_support_inputs: PersistedCell::load(
                store.clone(),
                registry.key(StorageKey::SpousalSupportInputs),
                None,
            ),
            budget: PersistedCell::load(store, registry.key(StorageKey::Budget), Vec::new()),
            child_support: ChildSupportCalculator::with_constants(guidelines.clone()),
            spousal_support: SpousalSupportCalculator::with_constants(guidelines.clone()),
            distribution: DistributionValidator::with_constants(&guidelines),
            budget_aggregator: BudgetAggregator::with_constants(&guidelines),
            registry,
        }
    }

    pub fn registry(&self) -> &KeyRegistry {
        &self.registry
    }

    // Asset division

    pub fn assets(&self) -> &[AssetItem] {
        self.assets.get()
    }

    /// Add an asset and return its id
    pub fn add_asset(&mut self, item: AssetItem) -> Result<String> {
        validate_asset(&item)?;
        if self.assets.get().iter().any(|existing| existing.id == item.id) {
            return Err(anyhow::anyhow!("Asset {} already exists", item.id));
        }

        let id = item.id.clone();
        info!("Adding asset {} ({})", id, item.name);
        self.assets.update(|items| {
            let mut items = items.clone();
            items.push(item);
            items
        });
        Ok(id)
    }

    /// Replace an existing asset, matched by id
    pub fn update_asset(&mut self, item: AssetItem) -> Result<()> {
        validate_asset(&item)?;
        let position = self.assets.get().iter().position(|existing| existing.id == item.id);
        let Some(index) = position else {
            return Err(anyhow::anyhow!("Asset not found: {}", item.id));
        };

        self.assets.update(|items| {
            let mut items = items.clone();
            items[index] = item;
            items
        });
        Ok(())
    }

    /// Delete an asset. Returns true if it existed.
    pub fn remove_asset(&mut self, asset_id: &str) -> bool {
        if !self.assets.get().iter().any(|item| item.id == asset_id) {
            warn!("Asked to remove unknown asset {}", asset_id);
            return false;
        }

        info!("Removing asset {}", asset_id);
        self.assets.update(|items| items.iter().filter(|i| i.id != asset_id).cloned().collect());
        true
    }

    pub fn distribution_summary(&self) -> DistributionSummary {
        self.distribution.summarize(self.assets.get())
    }

    pub fn settlement_summary(&self) -> SettlementSummary {
        settlement_summary(self.assets.get())
    }

    // Child support

    pub fn child_support_inputs(&self) -> Option<&ChildSupportInputs> {
        self.child_support_inputs.get().as_ref()
    }

    pub fn save_child_support_inputs(&mut self, inputs: ChildSupportInputs) {
        self.child_support_inputs.set(Some(inputs));
    }

    /// Estimate from the saved inputs; `None` until inputs are saved
    pub fn child_support_estimate(&self) -> Result<Option<ChildSupportResult>> {
        match self.child_support_inputs.get() {
            Some(inputs) => Ok(Some(self.child_support.estimate(inputs)?)),
            None => Ok(None),
        }
    }

    // Spousal support

    pub fn spousal_support_inputs(&self) -> Option<&SpousalSupportInputs> {
        self.spousal_support_inputs.get().as_ref()
    }

    pub fn save_spousal_support_inputs(&mut self, inputs: SpousalSupportInputs) {
        self.spousal_support_inputs.set(Some(inputs));
    }

    /// Estimate from the saved inputs; `None` until inputs are saved
    pub fn spousal_support_estimate(&self) -> Result<Option<SpousalSupportResult>> {
        match self.spousal_support_inputs.get() {
            Some(inputs) => Ok(Some(self.spousal_support.estimate(inputs)?)),
            None => Ok(None),
        }
    }

    // Budget

    pub fn budget_items(&self) -> &[BudgetItem] {
        self.budget.get()
    }

    pub fn add_budget_item(&mut self, item: BudgetItem) -> Result<String> {
        if item.name.trim().is_empty() {
            return Err(anyhow::anyhow!("Budget item name cannot be empty"));
        }
        if !item.amount.is_finite() || item.amount < 0.0 {
            return Err(anyhow::anyhow!("Budget item amount must be zero or more"));
        }
        if self.budget.get().iter().any(|existing| existing.id == item.id) {
            return Err(anyhow::anyhow!("Budget item {} already exists", item.id));
        }

        let id = item.id.clone();
        self.budget.update(|items| {
            let mut items = items.clone();
            items.push(item);
            items
        });
        Ok(id)
    }

    pub fn remove_budget_item(&mut self, item_id: &str) -> bool {
        if !self.budget.get().iter().any(|item| item.id == item_id) {
            return false;
        }
        self.budget.update(|items| items.iter().filter(|i| i.id != item_id).cloned().collect());
        true
    }

    pub fn budget_summary(&self) -> BudgetSummary {
        self.budget_aggregator.summarize(self.budget.get())
    }

    /// Clear every worksheet back to its empty state
    pub fn reset_all(&mut self) {
        info!("Resetting all toolkit state in namespace {}", self.registry.namespace());
        self.assets.reset();
        self.child_support_inputs.reset();
        self.spousal_support_inputs.reset();
        self.budget.reset();
    }
}

fn validate_asset(item: &AssetItem) -> Result<()> {
    if item.id.trim().is_empty() {
        return Err(anyhow::anyhow!("Asset id cannot be empty"));
    }
    if item.name.trim().is_empty() {
        return Err(anyhow::anyhow!("Asset name cannot be empty"));
    }
    if !item.value.is_finite() || item.value < 0.0 {
        return Err(anyhow::anyhow!("Asset value must be zero or more"));
    }
    Ok(())
}
