use crate::auth::AuthenticatedUser;
use crate::domain::cart::{CartItem, CartLine};
use crate::repository::{CartReader, CartWriter, ProductReader};
use crate::services::{ServiceError, ServiceResult};

/// Load the caller's cart joined with live product data.
pub fn load_cart(
    auth: &AuthenticatedUser,
    repo: &impl CartReader,
) -> ServiceResult<Vec<CartLine>> {
    Ok(repo.list_cart(auth.sub)?)
}

/// Add one unit of a product to the caller's cart, or bump the quantity if
/// the product is already there. The quantity can never exceed the product's
/// current stock.
pub fn add_to_cart<R>(
    auth: &AuthenticatedUser,
    repo: &R,
    product_id: i32,
) -> ServiceResult<CartItem>
where
    R: CartReader + CartWriter + ProductReader,
{
    let product = repo
        .get_product_by_id(product_id)?
        .ok_or(ServiceError::NotFound)?;

    let current = repo
        .get_cart_item(auth.sub, product_id)?
        .map(|item| item.quantity)
        .unwrap_or(0);

    let requested = current + 1;
    if requested > product.stock {
        return Err(ServiceError::StockLimit { max: product.stock });
    }

    Ok(repo.set_cart_quantity(auth.sub, product_id, requested)?)
}

/// Set an absolute quantity for a product already in the caller's cart.
pub fn update_quantity<R>(
    auth: &AuthenticatedUser,
    repo: &R,
    product_id: i32,
    quantity: i32,
) -> ServiceResult<CartItem>
where
    R: CartReader + CartWriter + ProductReader,
{
    if quantity < 1 {
        return Err(ServiceError::Form("quantity must be at least 1".to_string()));
    }

    if repo.get_cart_item(auth.sub, product_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let product = repo
        .get_product_by_id(product_id)?
        .ok_or(ServiceError::NotFound)?;

    if quantity > product.stock {
        return Err(ServiceError::StockLimit { max: product.stock });
    }

    Ok(repo.set_cart_quantity(auth.sub, product_id, quantity)?)
}

/// Remove a product from the caller's cart.
pub fn remove_from_cart(
    auth: &AuthenticatedUser,
    repo: &impl CartWriter,
    product_id: i32,
) -> ServiceResult<()> {
    Ok(repo.remove_cart_item(auth.sub, product_id)?)
}

/// Empty the caller's cart, returning how many rows were removed.
pub fn clear_cart(auth: &AuthenticatedUser, repo: &impl CartWriter) -> ServiceResult<usize> {
    Ok(repo.clear_cart(auth.sub)?)
}
