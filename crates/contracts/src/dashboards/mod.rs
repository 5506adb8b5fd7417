pub mod d001_financial_analytics;
