use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::DEFAULT_USER_ROLE;
use crate::pagination::Pagination;

/// Domain representation of a registered account.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    /// Unique identifier of the user.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Email address, stored lowercase.
    pub email: String,
    /// Argon2 PHC hash string. Never serialized into API responses.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Role tag, either `user` or `admin`.
    pub role: String,
    /// Optional avatar path served from the uploads directory.
    pub avatar: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub updated_at: NaiveDateTime,
}

impl NewUser {
    /// Build a new account payload. The email is lowercased so the unique
    /// index treats addresses case-insensitively.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            name: name.into(),
            email: email.into().to_lowercase(),
            password_hash: password_hash.into(),
            role: DEFAULT_USER_ROLE.to_string(),
            updated_at: now,
        }
    }

    /// Override the default role for the new account.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }
}

/// Patch data applied when updating an existing account.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    /// Optional display-name update.
    pub name: Option<String>,
    /// Optional avatar update, using `None` to clear an existing value.
    pub avatar: Option<Option<String>>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateUser {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateUser {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            name: None,
            avatar: None,
            updated_at: now,
        }
    }

    /// Update the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Update the avatar path, using `None` to clear an existing value.
    pub fn avatar(mut self, avatar: Option<impl Into<String>>) -> Self {
        self.avatar = Some(avatar.map(|value| value.into()));
        self
    }
}

/// Query definition used to list accounts in the back office.
#[derive(Debug, Clone)]
pub struct UserListQuery {
    /// Optional search term matched against the name or email.
    pub search: Option<String>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl Default for UserListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl UserListQuery {
    /// Construct a query that targets all accounts.
    pub fn new() -> Self {
        Self {
            search: None,
            pagination: None,
        }
    }

    /// Filter the results by a search term applied to the name or email.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
