use crate::auth::AuthenticatedUser;
use crate::domain::product::Product;
use crate::repository::{FavoriteReader, FavoriteWriter, ProductReader};
use crate::services::{ServiceError, ServiceResult};

/// List the caller's favorite products, newest first.
pub fn list_favorites(
    auth: &AuthenticatedUser,
    repo: &impl FavoriteReader,
) -> ServiceResult<Vec<Product>> {
    Ok(repo.list_favorites(auth.sub)?)
}

/// Mark a product as a favorite. Adding an existing favorite is a no-op.
pub fn add_favorite<R>(auth: &AuthenticatedUser, repo: &R, product_id: i32) -> ServiceResult<()>
where
    R: FavoriteWriter + ProductReader,
{
    if repo.get_product_by_id(product_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    Ok(repo.add_favorite(auth.sub, product_id)?)
}

/// Unmark a product as a favorite.
pub fn remove_favorite(
    auth: &AuthenticatedUser,
    repo: &impl FavoriteWriter,
    product_id: i32,
) -> ServiceResult<()> {
    Ok(repo.remove_favorite(auth.sub, product_id)?)
}
