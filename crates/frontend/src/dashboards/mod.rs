pub mod d001_financial_analytics;

pub use d001_financial_analytics::ui::FinancialAnalyticsDashboard;
