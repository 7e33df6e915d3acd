use crate::auth::AuthenticatedUser;
use crate::domain::category::Category;
use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::{ServiceError, ServiceResult};

/// List every category, ordered by name.
pub fn list_categories(repo: &impl CategoryReader) -> ServiceResult<Vec<Category>> {
    Ok(repo.list_categories()?)
}

/// Fetch a single category.
pub fn get_category(repo: &impl CategoryReader, category_id: i32) -> ServiceResult<Category> {
    repo.get_category_by_id(category_id)?
        .ok_or(ServiceError::NotFound)
}

/// Create a category. Admin only.
pub fn create_category(
    auth: &AuthenticatedUser,
    repo: &impl CategoryWriter,
    form: AddCategoryForm,
) -> ServiceResult<Category> {
    if !auth.is_admin() {
        return Err(ServiceError::Forbidden);
    }

    let new_category = form
        .into_new_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    Ok(repo.create_category(&new_category)?)
}

/// Apply a partial update to a category. Admin only.
pub fn update_category(
    auth: &AuthenticatedUser,
    repo: &impl CategoryWriter,
    category_id: i32,
    form: EditCategoryForm,
) -> ServiceResult<Category> {
    if !auth.is_admin() {
        return Err(ServiceError::Forbidden);
    }

    let updates = form
        .into_update_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    Ok(repo.update_category(category_id, &updates)?)
}

/// Delete a category. Admin only. Products referencing it fall back to
/// uncategorized.
pub fn delete_category(
    auth: &AuthenticatedUser,
    repo: &impl CategoryWriter,
    category_id: i32,
) -> ServiceResult<()> {
    if !auth.is_admin() {
        return Err(ServiceError::Forbidden);
    }

    Ok(repo.delete_category(category_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::{MockCategoryReader, MockCategoryWriter};
    use chrono::NaiveDate;
    use mockall::predicate::eq;

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

    fn sample_category(id: i32, name: &str) -> Category {
        let datetime = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default();
        Category {
            id,
            name: name.to_string(),
            description: None,
            created_at: datetime,
            updated_at: datetime,
        }
    }

    #[test]
    fn create_category_requires_admin() {
        let repo = MockCategoryWriter::new();
        let form = AddCategoryForm {
            name: "Lighting".to_string(),
            description: None,
        };

        let err = create_category(&customer(), &repo, form).expect_err("expected failure");
        assert!(matches!(err, ServiceError::Forbidden));
    }

    #[test]
    fn create_category_persists_for_admin() {
        let mut repo = MockCategoryWriter::new();
        repo.expect_create_category()
            .withf(|new_category| new_category.name == "Lighting")
            .times(1)
            .returning(|_| Ok(sample_category(2, "Lighting")));

        let form = AddCategoryForm {
            name: " Lighting ".to_string(),
            description: None,
        };

        let category = create_category(&admin(), &repo, form).expect("expected success");
        assert_eq!(category.id, 2);
    }

    #[test]
    fn get_category_maps_missing_row_to_not_found() {
        let mut repo = MockCategoryReader::new();
        repo.expect_get_category_by_id()
            .with(eq(404))
            .returning(|_| Ok(None));

        let err = get_category(&repo, 404).expect_err("expected failure");
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[test]
    fn delete_category_requires_admin() {
        let repo = MockCategoryWriter::new();

        let err = delete_category(&customer(), &repo, 2).expect_err("expected failure");
        assert!(matches!(err, ServiceError::Forbidden));
    }
}
