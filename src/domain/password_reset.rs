use chrono::NaiveDateTime;

/// Lifetime of an issued reset token.
const RESET_TTL_HOURS: i64 = 1;

/// A single-use password-reset token. All rows for a user are replaced on
/// each request and deleted on redemption.
#[derive(Debug, Clone)]
pub struct PasswordReset {
    /// Unique identifier of the reset row.
    pub id: i32,
    /// Owning user identifier.
    pub user_id: i32,
    /// Random token included in the emailed reset link.
    pub token: String,
    /// Moment after which the token is no longer redeemable.
    pub expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

/// Payload required to insert a new reset token.
#[derive(Debug, Clone)]
pub struct NewPasswordReset {
    pub user_id: i32,
    pub token: String,
    pub expires_at: NaiveDateTime,
}

impl NewPasswordReset {
    /// Build a reset payload expiring one hour from now.
    pub fn new(user_id: i32, token: impl Into<String>) -> Self {
        let expires_at =
            chrono::Local::now().naive_utc() + chrono::Duration::hours(RESET_TTL_HOURS);
        Self {
            user_id,
            token: token.into(),
            expires_at,
        }
    }
}
