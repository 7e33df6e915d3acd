use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::password_reset::{
    NewPasswordReset as DomainNewPasswordReset, PasswordReset as DomainPasswordReset,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::password_resets)]
pub struct PasswordReset {
    pub id: i32,
    pub user_id: i32,
    pub token: String,
    pub expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::password_resets)]
pub struct NewPasswordReset<'a> {
    pub user_id: i32,
    pub token: &'a str,
    pub expires_at: NaiveDateTime,
}

impl From<PasswordReset> for DomainPasswordReset {
    fn from(value: PasswordReset) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            token: value.token,
            expires_at: value.expires_at,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewPasswordReset> for NewPasswordReset<'a> {
    fn from(value: &'a DomainNewPasswordReset) -> Self {
        Self {
            user_id: value.user_id,
            token: value.token.as_str(),
            expires_at: value.expires_at,
        }
    }
}
