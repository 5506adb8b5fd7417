pub mod dashboard;

pub use dashboard::FinancialAnalyticsDashboard;
