use contracts::shared::list_filter::ErrorCategory;
use contracts::system::temporary_users::{CreateTemporaryUserDto, TemporaryUser};

use crate::shared::api_client;
use crate::shared::api_utils::api_url;

/// Temporary users issued by the current supplier
pub async fn fetch_temporary_users() -> Result<Vec<TemporaryUser>, ErrorCategory> {
    api_client::fetch_list(&api_url("/users/temporary")).await
}

pub async fn create_temporary_user(
    dto: &CreateTemporaryUserDto,
) -> Result<TemporaryUser, ErrorCategory> {
    api_client::create(&api_url("/users/temporary"), dto).await
}
