use crate::db::{DbConnection, DbPool};
use crate::domain::cart::{CartItem, CartLine};
use crate::domain::category::{Category, NewCategory, UpdateCategory};
use crate::domain::order::{NewOrder, Order, OrderListQuery, OrderStatus};
use crate::domain::password_reset::{NewPasswordReset, PasswordReset};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use crate::domain::user::{NewUser, UpdateUser, User, UserListQuery};

pub mod errors;

pub mod cart;
pub mod category;
pub mod favorite;
pub mod order;
pub mod product;
pub mod user;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over account records.
pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
}

/// Write operations over account records.
pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
    fn set_password_hash(&self, user_id: i32, password_hash: &str) -> RepositoryResult<()>;
}

/// Read operations over password-reset tokens.
pub trait PasswordResetReader {
    fn get_password_reset(&self, token: &str) -> RepositoryResult<Option<PasswordReset>>;
}

/// Write operations over password-reset tokens.
pub trait PasswordResetWriter {
    /// Replace any existing tokens for the user with the supplied one.
    fn replace_password_reset(
        &self,
        new_reset: &NewPasswordReset,
    ) -> RepositoryResult<PasswordReset>;
    fn delete_password_resets(&self, user_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over category records.
pub trait CategoryReader {
    fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
}

/// Write operations over category records.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        category_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
    fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn create_products(&self, new_products: &[NewProduct]) -> RepositoryResult<usize>;
    fn update_product(&self, product_id: i32, updates: &UpdateProduct)
    -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over a user's cart.
pub trait CartReader {
    fn get_cart_item(&self, user_id: i32, product_id: i32) -> RepositoryResult<Option<CartItem>>;
    /// Cart rows joined with live product data, in insertion order.
    fn list_cart(&self, user_id: i32) -> RepositoryResult<Vec<CartLine>>;
}

/// Write operations over a user's cart.
pub trait CartWriter {
    /// Insert or update the `(user_id, product_id)` row with an absolute quantity.
    fn set_cart_quantity(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> RepositoryResult<CartItem>;
    fn remove_cart_item(&self, user_id: i32, product_id: i32) -> RepositoryResult<()>;
    /// Delete every cart row for the user, returning how many were removed.
    fn clear_cart(&self, user_id: i32) -> RepositoryResult<usize>;
}

/// Read-only operations over order records.
pub trait OrderReader {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
}

/// Write operations over order records.
pub trait OrderWriter {
    /// Insert the order row and all its line items in one transaction.
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    fn update_order_status(&self, order_id: i32, status: OrderStatus) -> RepositoryResult<Order>;
}

/// Read-only operations over a user's favorites.
pub trait FavoriteReader {
    /// Favorite rows joined with live product data, newest first.
    fn list_favorites(&self, user_id: i32) -> RepositoryResult<Vec<Product>>;
}

/// Write operations over a user's favorites.
pub trait FavoriteWriter {
    /// Idempotent: adding an existing favorite is a no-op.
    fn add_favorite(&self, user_id: i32, product_id: i32) -> RepositoryResult<()>;
    fn remove_favorite(&self, user_id: i32, product_id: i32) -> RepositoryResult<()>;
}
