pub mod aggregation_service;
pub mod budget_service;
pub mod summary_service;

pub use aggregation_service::{
    AggregationService, CategorySpend, PeriodSummary, SpendBucket, StatsPeriod,
};
pub use budget_service::{BudgetOverview, BudgetService, BudgetStatus, CategoryProgress};
pub use summary_service::{MonthTotals, SummaryService};
