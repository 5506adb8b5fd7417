use crate::shared::list_filter::Filterable;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Limited-purpose credential a supplier issues for product withdrawal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporaryUser {
    pub id: String,
    pub username: String,
    pub created_by: String,
    pub created_at: String,
    #[serde(default)]
    pub expires_at: Option<NaiveDate>,
    pub is_active: bool,
}

impl TemporaryUser {
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expires_at.is_some_and(|d| d < today)
    }
}

impl Filterable for TemporaryUser {
    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "username" => Some(Cow::Borrowed(self.username.as_str())),
            "created_by" => Some(Cow::Borrowed(self.created_by.as_str())),
            "is_active" => Some(Cow::Borrowed(if self.is_active { "true" } else { "false" })),
            _ => None,
        }
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        self.expires_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTemporaryUserDto {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<NaiveDate>,
}

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 8;

impl CreateTemporaryUserDto {
    /// Checks done before the request is sent. The server may still reject
    /// the payload; its message is shown as is.
    pub fn validate(&self, today: NaiveDate) -> Result<(), String> {
        let username = self.username.trim();
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(format!(
                "Username must be at least {} characters.",
                MIN_USERNAME_LEN
            ));
        }
        if username.chars().any(char::is_whitespace) {
            return Err("Username must not contain spaces.".to_string());
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(format!(
                "Password must be at least {} characters.",
                MIN_PASSWORD_LEN
            ));
        }
        if self.expires_at.is_some_and(|d| d < today) {
            return Err("Expiration date is in the past.".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn dto(username: &str, password: &str) -> CreateTemporaryUserDto {
        CreateTemporaryUserDto {
            username: username.to_string(),
            password: password.to_string(),
            expires_at: None,
        }
    }

    #[test]
    fn test_validate() {
        assert!(dto("picker01", "longenough").validate(today()).is_ok());
        assert!(dto("ab", "longenough").validate(today()).is_err());
        assert!(dto("pick er", "longenough").validate(today()).is_err());
        assert!(dto("picker01", "short").validate(today()).is_err());

        let mut past = dto("picker01", "longenough");
        past.expires_at = NaiveDate::from_ymd_opt(2024, 5, 31);
        assert!(past.validate(today()).is_err());
    }

    #[test]
    fn test_expired() {
        let user = TemporaryUser {
            id: "t1".into(),
            username: "picker01".into(),
            created_by: "sup-1".into(),
            created_at: "2024-05-01T10:00:00Z".into(),
            expires_at: NaiveDate::from_ymd_opt(2024, 5, 31),
            is_active: true,
        };
        assert!(user.is_expired(today()));
        let open_ended = TemporaryUser {
            expires_at: None,
            ..user
        };
        assert!(!open_ended.is_expired(today()));
    }
}
