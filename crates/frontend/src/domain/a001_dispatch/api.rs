use contracts::domain::a001_dispatch::{Dispatch, DispatchDecisionDto};
use contracts::shared::list_filter::{ErrorCategory, FilterCriteria};

use crate::shared::api_client;
use crate::shared::api_utils::{api_url, api_url_with_query, path_segment};

/// Dispatches of the signed-in supplier (or the buyer's own withdrawals)
pub async fn fetch_dispatches(criteria: FilterCriteria) -> Result<Vec<Dispatch>, ErrorCategory> {
    let url = api_url_with_query("/dispatches", &criteria.query_params());
    api_client::fetch_list(&url).await
}

/// Dispatch requests awaiting (or past) admin review
pub async fn fetch_dispatch_requests(
    criteria: FilterCriteria,
) -> Result<Vec<Dispatch>, ErrorCategory> {
    let url = api_url_with_query("/dispatches/requests", &criteria.query_params());
    api_client::fetch_list(&url).await
}

pub async fn fetch_dispatch(id: String) -> Result<Dispatch, ErrorCategory> {
    let url = api_url(&format!("/dispatches/{}", path_segment(&id)));
    api_client::fetch_one(&url).await
}

/// Accept or reject a pending dispatch
pub async fn decide_dispatch(dto: DispatchDecisionDto) -> Result<(), ErrorCategory> {
    let action = if dto.accept { "accept" } else { "reject" };
    let url = api_url(&format!(
        "/dispatches/{}/{}",
        path_segment(&dto.dispatch_id),
        action
    ));
    api_client::post_json(&url, &dto).await.map(|_| ())
}
