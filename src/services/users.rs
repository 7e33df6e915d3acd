use crate::auth::AuthenticatedUser;
use crate::domain::user::{User, UserListQuery};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::UserReader;
use crate::services::{ServiceError, ServiceResult};

/// List registered accounts for the back office. Admin only.
pub fn list_users(
    auth: &AuthenticatedUser,
    repo: &impl UserReader,
    search: Option<String>,
    page: Option<usize>,
) -> ServiceResult<Paginated<User>> {
    if !auth.is_admin() {
        return Err(ServiceError::Forbidden);
    }

    let page = page.unwrap_or(1);
    let mut query = UserListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = search.filter(|term| !term.trim().is_empty()) {
        query = query.search(term.trim().to_string());
    }

    let (total, users) = repo.list_users(query)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE).max(1);
    Ok(Paginated::new(users, page, total_pages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockUserReader;
    use chrono::NaiveDate;

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: 1,
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            role: "admin".to_string(),
            exp: usize::MAX,
        }
    }

    fn customer() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: 3,
            email: "jane@example.com".to_string(),
            name: "Jane".to_string(),
            role: "user".to_string(),
            exp: usize::MAX,
        }
    }

    fn sample_user(id: i32) -> User {
        let datetime = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default();
        User {
            id,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: String::new(),
            role: "user".to_string(),
            avatar: None,
            created_at: datetime,
            updated_at: datetime,
        }
    }

    #[test]
    fn list_users_requires_admin() {
        let repo = MockUserReader::new();

        let err = list_users(&customer(), &repo, None, None).expect_err("expected failure");
        assert!(matches!(err, ServiceError::Forbidden));
    }

    #[test]
    fn list_users_applies_search_and_paging() {
        let mut repo = MockUserReader::new();
        repo.expect_list_users()
            .withf(|query| {
                query.search.as_deref() == Some("alice")
                    && query.pagination.map(|p| p.per_page) == Some(DEFAULT_ITEMS_PER_PAGE)
            })
            .returning(|_| Ok((1, vec![sample_user(1)])));

        let page = list_users(&admin(), &repo, Some(" alice ".to_string()), None)
            .expect("expected success");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 1);
    }
}
