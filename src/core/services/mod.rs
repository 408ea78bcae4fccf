pub mod expense_service;
pub mod summary_service;

pub use expense_service::ExpenseService;
pub use summary_service::{SummaryService, TotalsSummary};
