use contracts::domain::a002_inventory::{Lot, Section};
use contracts::shared::list_filter::{ErrorCategory, FilterCriteria};

use crate::shared::api_client;
use crate::shared::api_utils::{api_url, api_url_with_query};

/// Lots with their products
pub async fn fetch_lots(criteria: FilterCriteria) -> Result<Vec<Lot>, ErrorCategory> {
    let url = api_url_with_query("/inventory/lots", &criteria.query_params());
    api_client::fetch_list(&url).await
}

pub async fn fetch_sections() -> Result<Vec<Section>, ErrorCategory> {
    api_client::fetch_list(&api_url("/inventory/sections")).await
}
