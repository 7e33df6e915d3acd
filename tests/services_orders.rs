use async_trait::async_trait;

use storefront::auth::AuthenticatedUser;
use storefront::domain::order::{Order, OrderStatus};
use storefront::domain::product::NewProduct;
use storefront::domain::user::NewUser;
use storefront::forms::orders::{BasketLineForm, CheckoutContactForm, CheckoutForm};
use storefront::notifier::OrderNotifier;
use storefront::repository::{CartReader, CartWriter, DieselRepository, ProductWriter, UserWriter};
use storefront::services::{self, ServiceError};

mod common;

struct StubNotifier {
    delivered: bool,
}

#[async_trait]
impl OrderNotifier for StubNotifier {
    async fn order_created(&self, _order: &Order) -> bool {
        self.delivered
    }
}

fn principal(repo: &DieselRepository, email: &str, role: &str) -> AuthenticatedUser {
    let user = repo
        .create_user(&NewUser::new("Jane", email, "hash").with_role(role))
        .unwrap();
    AuthenticatedUser {
        sub: user.id,
        email: user.email,
        name: user.name,
        role: user.role,
        exp: usize::MAX,
    }
}

fn checkout_form(product_id: i32) -> CheckoutForm {
    CheckoutForm {
        form_data: CheckoutContactForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            address: "1 Main St".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+100200300".to_string(),
            payment_method: Some("card".to_string()),
        },
        basket: vec![BasketLineForm {
            product_id,
            name: "Desk Lamp".to_string(),
            price: 500.0,
            quantity: 2,
            image: None,
        }],
        total_amount: 1000.0,
    }
}

#[actix_web::test]
async fn test_checkout_persists_order_and_clears_cart() {
    let test_db = common::TestDb::new("test_checkout_persists_order_and_clears_cart.db");
    let repo = DieselRepository::new(test_db.pool());
    let user = principal(&repo, "jane@example.com", "user");

    let product = repo
        .create_product(&NewProduct::new("Desk Lamp", 50_000).with_stock(5))
        .unwrap();
    repo.set_cart_quantity(user.sub, product.id, 2).unwrap();

    let notifier = StubNotifier { delivered: true };
    let outcome = services::orders::place_order(&user, &repo, &notifier, checkout_form(product.id))
        .await
        .unwrap();

    assert!(outcome.notification_sent);

    let order = services::orders::get_order(&user, &repo, outcome.order_id).unwrap();
    assert_eq!(order.user_id, user.sub);
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.total_cents, 100_000);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].product_id, Some(product.id));
    assert_eq!(order.items[0].price_cents, 50_000);
    assert_eq!(order.items[0].quantity, 2);

    // Cart is emptied, stock stays untouched by checkout.
    assert!(repo.list_cart(user.sub).unwrap().is_empty());
    let reloaded = services::products::get_product(&repo, product.id).unwrap();
    assert_eq!(reloaded.stock, 5);
}

#[actix_web::test]
async fn test_checkout_reports_notification_failure_without_failing() {
    let test_db = common::TestDb::new("test_checkout_reports_notification_failure.db");
    let repo = DieselRepository::new(test_db.pool());
    let user = principal(&repo, "jane@example.com", "user");

    let product = repo
        .create_product(&NewProduct::new("Desk Lamp", 50_000).with_stock(5))
        .unwrap();
    repo.set_cart_quantity(user.sub, product.id, 2).unwrap();

    let notifier = StubNotifier { delivered: false };
    let outcome = services::orders::place_order(&user, &repo, &notifier, checkout_form(product.id))
        .await
        .unwrap();

    // The order is durable and the cart cleared even though the
    // notification never went out.
    assert!(!outcome.notification_sent);
    assert!(services::orders::get_order(&user, &repo, outcome.order_id).is_ok());
    assert!(repo.list_cart(user.sub).unwrap().is_empty());
}

#[actix_web::test]
async fn test_checkout_rejects_empty_basket_without_writes() {
    let test_db = common::TestDb::new("test_checkout_rejects_empty_basket.db");
    let repo = DieselRepository::new(test_db.pool());
    let user = principal(&repo, "jane@example.com", "user");

    let mut form = checkout_form(1);
    form.basket.clear();

    let notifier = StubNotifier { delivered: true };
    let err = services::orders::place_order(&user, &repo, &notifier, form)
        .await
        .expect_err("empty basket must fail");
    assert!(matches!(err, ServiceError::Form(_)));

    let page = services::orders::list_my_orders(&user, &repo, None).unwrap();
    assert!(page.items.is_empty());
}

#[actix_web::test]
async fn test_checkout_rejects_missing_contact_fields() {
    let test_db = common::TestDb::new("test_checkout_rejects_missing_contact_fields.db");
    let repo = DieselRepository::new(test_db.pool());
    let user = principal(&repo, "jane@example.com", "user");
    let notifier = StubNotifier { delivered: true };

    let mut form = checkout_form(1);
    form.form_data.phone = "   ".to_string();
    let err = services::orders::place_order(&user, &repo, &notifier, form)
        .await
        .expect_err("blank phone must fail");
    assert!(matches!(err, ServiceError::Form(ref message) if message.contains("phone")));

    let mut form = checkout_form(1);
    form.form_data.first_name = String::new();
    let err = services::orders::place_order(&user, &repo, &notifier, form)
        .await
        .expect_err("blank first name must fail");
    assert!(matches!(err, ServiceError::Form(ref message) if message.contains("firstName")));
}

#[actix_web::test]
async fn test_order_visibility_and_status_transitions() {
    let test_db = common::TestDb::new("test_order_visibility_and_status_transitions.db");
    let repo = DieselRepository::new(test_db.pool());
    let jane = principal(&repo, "jane@example.com", "user");
    let other = principal(&repo, "other@example.com", "user");
    let admin = principal(&repo, "admin@example.com", "admin");

    let product = repo
        .create_product(&NewProduct::new("Desk Lamp", 50_000).with_stock(5))
        .unwrap();

    let notifier = StubNotifier { delivered: true };
    let outcome = services::orders::place_order(&jane, &repo, &notifier, checkout_form(product.id))
        .await
        .unwrap();

    // Another customer cannot see the order; the admin can.
    let err =
        services::orders::get_order(&other, &repo, outcome.order_id).expect_err("foreign order");
    assert!(matches!(err, ServiceError::NotFound));
    assert!(services::orders::get_order(&admin, &repo, outcome.order_id).is_ok());

    let err = services::orders::update_order_status(
        &jane,
        &repo,
        outcome.order_id,
        OrderStatus::Shipped,
    )
    .expect_err("customers cannot change status");
    assert!(matches!(err, ServiceError::Forbidden));

    let shipped =
        services::orders::update_order_status(&admin, &repo, outcome.order_id, OrderStatus::Shipped)
            .unwrap();
    assert_eq!(shipped.status, OrderStatus::Shipped);

    let page =
        services::orders::list_all_orders(&admin, &repo, Some(OrderStatus::Shipped), None).unwrap();
    assert_eq!(page.items.len(), 1);

    let err = services::orders::list_all_orders(&jane, &repo, None, None)
        .expect_err("listing all orders is admin only");
    assert!(matches!(err, ServiceError::Forbidden));
}
