use crate::auth::AuthenticatedUser;
use crate::domain::product::{Product, ProductListQuery, UpdateProduct};
use crate::forms::products::{AddProductForm, EditProductForm, UploadProductsForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// List the catalog with optional search, category filter and paging.
pub fn list_products(
    repo: &impl ProductReader,
    search: Option<String>,
    category_id: Option<i32>,
    page: Option<usize>,
) -> ServiceResult<Paginated<Product>> {
    let page = page.unwrap_or(1);
    let mut query = ProductListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(term) = search.filter(|term| !term.trim().is_empty()) {
        query = query.search(term.trim().to_string());
    }
    if let Some(category_id) = category_id {
        query = query.category_id(category_id);
    }

    let (total, products) = repo.list_products(query)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE).max(1);
    Ok(Paginated::new(products, page, total_pages))
}

/// Fetch a single catalog product.
pub fn get_product(repo: &impl ProductReader, product_id: i32) -> ServiceResult<Product> {
    repo.get_product_by_id(product_id)?
        .ok_or(ServiceError::NotFound)
}

/// Create a catalog product. Admin only.
pub fn create_product(
    auth: &AuthenticatedUser,
    repo: &impl ProductWriter,
    form: AddProductForm,
) -> ServiceResult<Product> {
    if !auth.is_admin() {
        return Err(ServiceError::Forbidden);
    }

    let new_product = form
        .into_new_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    Ok(repo.create_product(&new_product)?)
}

/// Apply a partial update to a product. Admin only.
pub fn update_product(
    auth: &AuthenticatedUser,
    repo: &impl ProductWriter,
    product_id: i32,
    form: EditProductForm,
) -> ServiceResult<Product> {
    if !auth.is_admin() {
        return Err(ServiceError::Forbidden);
    }

    let updates = form
        .into_update_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    Ok(repo.update_product(product_id, &updates)?)
}

/// Delete a product. Admin only. Historical order items keep their frozen
/// snapshot of the product.
pub fn delete_product(
    auth: &AuthenticatedUser,
    repo: &impl ProductWriter,
    product_id: i32,
) -> ServiceResult<()> {
    if !auth.is_admin() {
        return Err(ServiceError::Forbidden);
    }

    Ok(repo.delete_product(product_id)?)
}

/// Bulk-create products from an uploaded CSV. Admin only. Returns how many
/// products were created.
pub fn import_products(
    auth: &AuthenticatedUser,
    repo: &impl ProductWriter,
    form: UploadProductsForm,
) -> ServiceResult<usize> {
    if !auth.is_admin() {
        return Err(ServiceError::Forbidden);
    }

    let new_products = form
        .into_new_products()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    Ok(repo.create_products(&new_products)?)
}

/// Attach a stored image path to a product. Admin only.
pub fn set_product_image(
    auth: &AuthenticatedUser,
    repo: &impl ProductWriter,
    product_id: i32,
    image_path: String,
) -> ServiceResult<Product> {
    if !auth.is_admin() {
        return Err(ServiceError::Forbidden);
    }

    let updates = UpdateProduct::new().image(Some(image_path));
    Ok(repo.update_product(product_id, &updates)?)
}
