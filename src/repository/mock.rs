use mockall::mock;

use super::{
    CartReader, CartWriter, CategoryReader, CategoryWriter, FavoriteReader, FavoriteWriter,
    OrderReader, OrderWriter, PasswordResetReader, PasswordResetWriter, ProductReader,
    ProductWriter, RepositoryResult, UserReader, UserWriter,
};
use crate::domain::{
    cart::{CartItem, CartLine},
    category::{Category, NewCategory, UpdateCategory},
    order::{NewOrder, Order, OrderListQuery, OrderStatus},
    password_reset::{NewPasswordReset, PasswordReset},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    user::{NewUser, UpdateUser, User, UserListQuery},
};

mock! {
    pub UserReader {}

    impl UserReader for UserReader {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
        fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
    }
}

mock! {
    pub UserWriter {}

    impl UserWriter for UserWriter {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
        fn set_password_hash(&self, user_id: i32, password_hash: &str) -> RepositoryResult<()>;
    }
}

mock! {
    pub PasswordResetReader {}

    impl PasswordResetReader for PasswordResetReader {
        fn get_password_reset(&self, token: &str) -> RepositoryResult<Option<PasswordReset>>;
    }
}

mock! {
    pub PasswordResetWriter {}

    impl PasswordResetWriter for PasswordResetWriter {
        fn replace_password_reset(&self, new_reset: &NewPasswordReset) -> RepositoryResult<PasswordReset>;
        fn delete_password_resets(&self, user_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
        fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    }
}

mock! {
    pub CategoryWriter {}

    impl CategoryWriter for CategoryWriter {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, category_id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn create_products(&self, new_products: &[NewProduct]) -> RepositoryResult<usize>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub CartReader {}

    impl CartReader for CartReader {
        fn get_cart_item(&self, user_id: i32, product_id: i32) -> RepositoryResult<Option<CartItem>>;
        fn list_cart(&self, user_id: i32) -> RepositoryResult<Vec<CartLine>>;
    }
}

mock! {
    pub CartWriter {}

    impl CartWriter for CartWriter {
        fn set_cart_quantity(&self, user_id: i32, product_id: i32, quantity: i32) -> RepositoryResult<CartItem>;
        fn remove_cart_item(&self, user_id: i32, product_id: i32) -> RepositoryResult<()>;
        fn clear_cart(&self, user_id: i32) -> RepositoryResult<usize>;
    }
}

mock! {
    pub OrderReader {}

    impl OrderReader for OrderReader {
        fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
    }
}

mock! {
    pub OrderWriter {}

    impl OrderWriter for OrderWriter {
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn update_order_status(&self, order_id: i32, status: OrderStatus) -> RepositoryResult<Order>;
    }
}

mock! {
    pub FavoriteReader {}

    impl FavoriteReader for FavoriteReader {
        fn list_favorites(&self, user_id: i32) -> RepositoryResult<Vec<Product>>;
    }
}

mock! {
    pub FavoriteWriter {}

    impl FavoriteWriter for FavoriteWriter {
        fn add_favorite(&self, user_id: i32, product_id: i32) -> RepositoryResult<()>;
        fn remove_favorite(&self, user_id: i32, product_id: i32) -> RepositoryResult<()>;
    }
}
