use std::sync::Arc;

use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use storefront::config::ServerConfig;
use storefront::db::establish_connection_pool;
use storefront::mailer::{HttpMailer, LogMailer, ResetMailer};
use storefront::notifier::{DisabledNotifier, OrderNotifier, TelegramNotifier};
use storefront::repository::DieselRepository;
use storefront::routes::auth::{
    forgot_password, login, me, register, reset_password, update_profile, upload_avatar,
};
use storefront::routes::cart::{add_to_cart, clear_cart, load_cart, remove_from_cart, update_cart};
use storefront::routes::categories::{
    create_category, delete_category, get_category, list_categories, update_category,
};
use storefront::routes::favorites::{add_favorite, list_favorites, remove_favorite};
use storefront::routes::orders::{
    checkout, get_order, list_all_orders, list_my_orders, update_order_status,
};
use storefront::routes::products::{
    create_product, delete_product, get_product, list_products, update_product,
    upload_product_image, upload_products,
};
use storefront::routes::users::list_users;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let notifier: Arc<dyn OrderNotifier> = match &config.telegram {
        Some(telegram) => match TelegramNotifier::new(&telegram.bot_token, &telegram.chat_id) {
            Ok(notifier) => Arc::new(notifier),
            Err(e) => {
                log::error!("Failed to build the Telegram client: {e}");
                std::process::exit(1);
            }
        },
        None => {
            log::warn!("Telegram credentials not set; order notifications are disabled");
            Arc::new(DisabledNotifier)
        }
    };

    let mailer: Arc<dyn ResetMailer> = match config.mailer.clone() {
        Some(mailer_config) => match HttpMailer::new(mailer_config) {
            Ok(mailer) => Arc::new(mailer),
            Err(e) => {
                log::error!("Failed to build the mail client: {e}");
                std::process::exit(1);
            }
        },
        None => {
            log::warn!("MAILER_URL not set; reset links will only be logged");
            Arc::new(LogMailer)
        }
    };

    let uploads_dir = config.uploads_dir.clone();
    let bind_address = (config.address.clone(), config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/uploads", &uploads_dir))
            .service(register)
            .service(login)
            .service(me)
            .service(update_profile)
            .service(upload_avatar)
            .service(forgot_password)
            .service(reset_password)
            .service(list_products)
            .service(upload_products)
            .service(create_product)
            .service(upload_product_image)
            .service(get_product)
            .service(update_product)
            .service(delete_product)
            .service(list_categories)
            .service(get_category)
            .service(create_category)
            .service(update_category)
            .service(delete_category)
            .service(load_cart)
            .service(add_to_cart)
            .service(update_cart)
            .service(remove_from_cart)
            .service(clear_cart)
            .service(list_favorites)
            .service(add_favorite)
            .service(remove_favorite)
            .service(checkout)
            .service(list_my_orders)
            .service(get_order)
            .service(list_all_orders)
            .service(update_order_status)
            .service(list_users)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::from(notifier.clone()))
            .app_data(web::Data::from(mailer.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
