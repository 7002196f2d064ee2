pub mod backend;

pub use backend::domain::{
    BudgetAggregator, ChildSupportCalculator, DistributionValidator, EstimateError, ExportService,
    SpousalSupportCalculator, ToolkitService,
};
pub use backend::storage::{
    FileStore, KeyRegistry, KeyValueStore, MemoryStore, PersistedCell, StorageError, StorageKey,
    StoredValue,
};
pub use backend::{initialize_backend, initialize_in_memory, AppState};
