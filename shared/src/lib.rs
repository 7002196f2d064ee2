use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of asset or debt tracked in the asset division worksheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    Home,
    Vehicle,
    Retirement,
    Bank,
    Investment,
    Business,
    Personal,
    /// Any liability; always contributes negatively to net worth
    Debt,
}

impl AssetType {
    pub const ALL: [AssetType; 8] = [
        AssetType::Home,
        AssetType::Vehicle,
        AssetType::Retirement,
        AssetType::Bank,
        AssetType::Investment,
        AssetType::Business,
        AssetType::Personal,
        AssetType::Debt,
    ];

    pub fn is_debt(&self) -> bool {
        matches!(self, AssetType::Debt)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetType::Home => "Home",
            AssetType::Vehicle => "Vehicle",
            AssetType::Retirement => "Retirement",
            AssetType::Bank => "Bank Account",
            AssetType::Investment => "Investment",
            AssetType::Business => "Business",
            AssetType::Personal => "Personal Property",
            AssetType::Debt => "Debt",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Ohio classification of property: only marital property is divisible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    /// Acquired during the marriage. Records saved before property types
    /// existed are read back as marital.
    #[default]
    Marital,
    Spouse1Separate,
    Spouse2Separate,
}

impl PropertyType {
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Marital => "Marital",
            PropertyType::Spouse1Separate => "Spouse 1 Separate",
            PropertyType::Spouse2Separate => "Spouse 2 Separate",
        }
    }
}

/// Which party receives an item in the proposed division
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assignment {
    Spouse1,
    Spouse2,
    /// Divided equally between both parties
    Split,
    #[default]
    Unassigned,
}

impl Assignment {
    pub fn label(&self) -> &'static str {
        match self {
            Assignment::Spouse1 => "Spouse 1",
            Assignment::Spouse2 => "Spouse 2",
            Assignment::Split => "Split 50/50",
            Assignment::Unassigned => "Unassigned",
        }
    }
}

/// A single asset or debt in the asset division worksheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetItem {
    /// Asset ID in format: "asset::<uuid>"
    pub id: String,
    pub name: String,
    /// Current value in dollars, never negative (debts carry their balance here)
    pub value: f64,
    pub asset_type: AssetType,
    #[serde(default)]
    pub property_type: PropertyType,
    #[serde(default)]
    pub assignment: Assignment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AssetItem {
    /// Generate a new asset ID
    pub fn generate_id() -> String {
        format!("asset::{}", uuid::Uuid::new_v4())
    }

    pub fn new(name: impl Into<String>, value: f64, asset_type: AssetType) -> Self {
        Self {
            id: Self::generate_id(),
            name: name.into(),
            value,
            asset_type,
            property_type: PropertyType::Marital,
            assignment: Assignment::Unassigned,
            notes: None,
        }
    }

    pub fn with_property_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = property_type;
        self
    }

    pub fn with_assignment(mut self, assignment: Assignment) -> Self {
        self.assignment = assignment;
        self
    }

    /// Value with debts negated
    pub fn signed_value(&self) -> f64 {
        if self.asset_type.is_debt() {
            -self.value
        } else {
            self.value
        }
    }

    pub fn is_marital(&self) -> bool {
        self.property_type == PropertyType::Marital
    }
}

/// Which parent a support figure is owed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parent {
    Parent1,
    Parent2,
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parent::Parent1 => write!(f, "parent1"),
            Parent::Parent2 => write!(f, "parent2"),
        }
    }
}

/// Inputs to the Ohio child support worksheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildSupportInputs {
    /// Parent 1 annual gross income
    pub parent1_income: f64,
    /// Parent 2 annual gross income
    pub parent2_income: f64,
    /// Number of children of the marriage (1-10)
    pub number_of_children: u32,
    /// Overnights per year with parent 1
    pub parent1_overnights: u32,
    /// Overnights per year with parent 2
    pub parent2_overnights: u32,
    /// Annual health insurance premium for the children
    #[serde(default)]
    pub health_insurance_cost: Option<f64>,
    /// Annual work-related childcare cost
    #[serde(default)]
    pub childcare_cost: Option<f64>,
    /// Annual extraordinary education cost
    #[serde(default)]
    pub education_cost: Option<f64>,
}

/// Output of the child support estimator. Always an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildSupportResult {
    /// Monthly basic support after any shared parenting adjustment
    pub basic_support: f64,
    /// Monthly amount deducted for shared parenting time (0 when not applied)
    pub shared_parenting_adjustment: f64,
    /// Basic support plus prorated add-on costs, in dollars and cents
    pub total_support: f64,
    pub paying_parent: Parent,
    /// Paying parent's share of combined income, 0.0-1.0
    pub paying_parent_income_share: f64,
    pub formula: String,
    pub warnings: Vec<String>,
    pub is_estimate: bool,
}

/// Inputs to the spousal support estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpousalSupportInputs {
    /// Length of the marriage in years
    pub marriage_years: f64,
    /// Annual gross income of the spouse expected to pay
    pub payor_income: f64,
    /// Annual gross income of the spouse expected to receive
    pub payee_income: f64,
}

/// Estimated length of spousal support, in years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationRange {
    pub min_years: f64,
    pub max_years: f64,
}

impl DurationRange {
    pub const NONE: DurationRange = DurationRange {
        min_years: 0.0,
        max_years: 0.0,
    };
}

/// Output of the spousal support estimator. Always an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpousalSupportResult {
    pub is_eligible: bool,
    pub annual_support: f64,
    pub monthly_support: f64,
    pub duration: DurationRange,
    pub explanation: String,
    pub warnings: Vec<String>,
    pub is_estimate: bool,
}

/// Result of checking a proposed division against the equal-division baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub spouse1_net_worth: f64,
    pub spouse2_net_worth: f64,
    /// Signed sum of every item, assigned or not
    pub total_net_worth: f64,
    /// Signed sum of marital items only
    pub marital_net_worth: f64,
    /// Sum of marital items that are not debts
    pub marital_asset_value: f64,
    pub difference: f64,
    /// Difference as a percentage of marital asset value
    pub percentage_diff: f64,
    pub is_balanced: bool,
    pub unassigned_count: usize,
    /// Ids of items that go to spouse 1, including split items and their separate property
    pub spouse1_items: Vec<String>,
    pub spouse2_items: Vec<String>,
    /// Ids of marital items not yet assigned
    pub unassigned_items: Vec<String>,
}

/// Whether a budget line brings money in or sends it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetItemKind {
    Income,
    Expense,
}

/// A monthly line item in the post-divorce budget worksheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    /// Budget item ID in format: "budget::<income|expense>::<uuid>"
    pub id: String,
    pub name: String,
    /// Free-form grouping such as "Housing" or "Transportation"
    #[serde(default)]
    pub category: String,
    /// Monthly amount in dollars
    pub amount: f64,
    pub kind: BudgetItemKind,
    /// Expenses the household cannot go without
    #[serde(default)]
    pub essential: bool,
}

impl BudgetItem {
    pub fn generate_id(kind: BudgetItemKind) -> String {
        let kind = match kind {
            BudgetItemKind::Income => "income",
            BudgetItemKind::Expense => "expense",
        };
        format!("budget::{}::{}", kind, uuid::Uuid::new_v4())
    }

    pub fn income(name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: Self::generate_id(BudgetItemKind::Income),
            name: name.into(),
            category: "Income".to_string(),
            amount,
            kind: BudgetItemKind::Income,
            essential: false,
        }
    }

    pub fn expense(
        name: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        essential: bool,
    ) -> Self {
        Self {
            id: Self::generate_id(BudgetItemKind::Expense),
            name: name.into(),
            category: category.into(),
            amount,
            kind: BudgetItemKind::Expense,
            essential,
        }
    }
}

/// Summary card figures for the budget worksheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub essential_expenses: f64,
    /// Income minus expenses
    pub balance: f64,
    /// Essential expenses divided by income; None when there is no income
    pub essential_ratio: Option<f64>,
    pub is_healthy: bool,
    /// Expense totals per category, sorted by category name
    pub expenses_by_category: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Summary card figures for the settlement overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementSummary {
    pub total_assets: f64,
    pub total_debts: f64,
    pub net_worth: f64,
    /// Debts divided by assets; None when there are no assets
    pub debt_to_asset_ratio: Option<f64>,
    pub assigned_count: usize,
    pub unassigned_count: usize,
}

/// Output format for exported tool data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Text,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Rendered export ready to be written or downloaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub filename: String,
    pub format: ExportFormat,
    pub content: String,
}

/// One row of the spousal support duration lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationTier {
    /// Inclusive upper bound on marriage length; None for the open-ended last tier
    pub max_marriage_years: Option<f64>,
    pub min_multiplier: f64,
    pub max_multiplier: f64,
}

/// Simplified approximations of Ohio guideline figures. None of these are
/// authoritative; they are kept configurable so they can be corrected without
/// touching the estimators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidelineConstants {
    /// Share of combined income owed for 1, 2, ... children; the last entry
    /// applies to any larger family
    pub child_support_rates: Vec<f64>,
    pub max_children: u32,
    /// Non-residential overnights per year that trigger the shared parenting adjustment
    pub shared_parenting_threshold: u32,
    pub shared_parenting_multiplier: f64,
    /// Monthly floor on child support
    pub minimum_support: f64,
    /// Annual income above which the monthly floor applies
    pub minimum_support_income: f64,
    pub min_combined_income: f64,
    pub max_combined_income: f64,
    pub spousal_payor_rate: f64,
    pub spousal_payee_rate: f64,
    pub spousal_duration_tiers: Vec<DurationTier>,
    /// Marriages longer than this may support an indefinite award
    pub indefinite_support_years: f64,
    /// Maximum percentage difference for a division to count as balanced
    pub balance_tolerance_percent: f64,
    /// Essential expenses at or below this share of income are healthy
    pub healthy_essential_ratio: f64,
}

impl Default for GuidelineConstants {
    fn default() -> Self {
        Self {
            child_support_rates: vec![0.142, 0.206, 0.257, 0.289, 0.315, 0.333],
            max_children: 10,
            shared_parenting_threshold: 90,
            shared_parenting_multiplier: 0.5,
            minimum_support: 50.0,
            minimum_support_income: 6_000.0,
            min_combined_income: 8_400.0,
            max_combined_income: 336_467.0,
            spousal_payor_rate: 0.30,
            spousal_payee_rate: 0.20,
            spousal_duration_tiers: vec![
                tier(Some(5.0), 0.2, 0.3),
                tier(Some(10.0), 0.3, 0.5),
                tier(Some(20.0), 0.4, 0.6),
                tier(None, 0.5, 1.0),
            ],
            indefinite_support_years: 25.0,
            balance_tolerance_percent: 10.0,
            healthy_essential_ratio: 0.7,
        }
    }
}

fn tier(max_marriage_years: Option<f64>, min_multiplier: f64, max_multiplier: f64) -> DurationTier {
    DurationTier {
        max_marriage_years,
        min_multiplier,
        max_multiplier,
    }
}
