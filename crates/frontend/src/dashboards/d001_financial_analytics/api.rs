use contracts::dashboards::d001_financial_analytics::{
    FinancialAnalyticsRequest, FinancialAnalyticsResponse,
};
use contracts::shared::list_filter::ErrorCategory;

use crate::shared::api_client;
use crate::shared::api_utils::api_url_with_query;

/// Supplier spend and section costs for the period. A period without data
/// comes back as an empty response rather than an error.
pub async fn fetch_financial_analytics(
    request: FinancialAnalyticsRequest,
) -> Result<FinancialAnalyticsResponse, ErrorCategory> {
    let url = api_url_with_query("/analytics/financial", &request);
    match api_client::fetch_one(&url).await {
        Err(ErrorCategory::NotFoundOrEmpty) => Ok(FinancialAnalyticsResponse::default()),
        other => other,
    }
}
