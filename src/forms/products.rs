use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use csv::{StringRecord, Trim};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: u64 = 128;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
    /// The provided price is not a valid decimal amount.
    #[error("invalid price `{value}`")]
    InvalidPrice { value: String },
    /// The provided stock quantity is negative.
    #[error("stock cannot be negative")]
    NegativeStock,
    /// The uploaded CSV is missing required columns.
    #[error("upload is missing the required `name` or `price` headers")]
    MissingRequiredHeaders,
    /// A CSV row did not include a product name.
    #[error("row {row} is missing a product name")]
    UploadMissingName { row: usize },
    /// A CSV row contained an invalid price.
    #[error("row {row} has invalid price `{value}`")]
    UploadInvalidPrice { row: usize, value: String },
    /// The uploaded CSV did not contain any usable products.
    #[error("upload contains no products")]
    EmptyUpload,
    /// CSV parsing failures.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    /// Failures re-reading the uploaded temp file.
    #[error("failed to read upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Payload emitted when creating a product in the back office.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    pub description: Option<String>,
    /// Decimal price, e.g. `"12.34"`.
    pub price: String,
    pub stock: Option<i32>,
    pub category_id: Option<i32>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let price_cents = parse_price(&self.price)?;

        let stock = self.stock.unwrap_or(0);
        if stock < 0 {
            return Err(ProductFormError::NegativeStock);
        }

        let sanitized_description = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty());

        let mut new_product = NewProduct::new(sanitized_name, price_cents).with_stock(stock);

        if let Some(description) = sanitized_description {
            new_product = new_product.with_description(description);
        }

        if let Some(category_id) = self.category_id {
            new_product = new_product.with_category(category_id);
        }

        Ok(new_product)
    }
}

/// Payload emitted when editing an existing product. An empty description
/// clears the stored one.
#[derive(Debug, Deserialize, Validate)]
pub struct EditProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub stock: Option<i32>,
    pub category_id: Option<i32>,
}

impl EditProductForm {
    /// Validates and sanitizes the payload into a domain `UpdateProduct`.
    pub fn into_update_product(self) -> ProductFormResult<UpdateProduct> {
        self.validate()?;

        let mut updates = UpdateProduct::new();

        if let Some(name) = self.name {
            let sanitized = sanitize_inline_text(&name);
            if sanitized.is_empty() {
                return Err(ProductFormError::EmptyName);
            }
            updates = updates.name(sanitized);
        }

        if let Some(description) = self.description {
            let sanitized = sanitize_multiline_text(&description);
            if sanitized.is_empty() {
                updates = updates.description(None::<String>);
            } else {
                updates = updates.description(Some(sanitized));
            }
        }

        if let Some(price) = self.price {
            updates = updates.price_cents(parse_price(&price)?);
        }

        if let Some(stock) = self.stock {
            if stock < 0 {
                return Err(ProductFormError::NegativeStock);
            }
            updates = updates.stock(stock);
        }

        if let Some(category_id) = self.category_id {
            updates = updates.category_id(Some(category_id));
        }

        Ok(updates)
    }
}

/// Multipart payload attaching an image to a product.
#[derive(Debug, MultipartForm)]
pub struct ProductImageForm {
    #[multipart(limit = "5MB")]
    pub image: TempFile,
}

/// Multipart payload for bulk product creation from CSV.
#[derive(Debug, MultipartForm)]
pub struct UploadProductsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

impl UploadProductsForm {
    /// Parse the uploaded CSV and convert it into domain `NewProduct` values.
    ///
    /// Recognised headers (case-insensitive): `name`, `price`, `stock`,
    /// `description`. `name` and `price` are required per row.
    pub fn into_new_products(self) -> ProductFormResult<Vec<NewProduct>> {
        let file = self.csv.file.reopen()?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(file);

        let headers = reader.headers()?.clone();
        let header_indexes = locate_product_headers(&headers);

        if header_indexes.name_index.is_none() || header_indexes.price_index.is_none() {
            return Err(ProductFormError::MissingRequiredHeaders);
        }

        let mut products = Vec::new();

        for (index, row) in reader.records().enumerate() {
            let row_number = index + 2; // account for header row
            let record = row?;

            let name_raw = header_indexes
                .name_index
                .and_then(|idx| record.get(idx))
                .unwrap_or("");
            let sanitized_name = sanitize_inline_text(name_raw);
            if sanitized_name.is_empty() {
                return Err(ProductFormError::UploadMissingName { row: row_number });
            }

            let price_raw = header_indexes
                .price_index
                .and_then(|idx| record.get(idx))
                .unwrap_or("")
                .trim();
            let price_cents = parse_price(price_raw).map_err(|_| {
                ProductFormError::UploadInvalidPrice {
                    row: row_number,
                    value: price_raw.to_string(),
                }
            })?;

            let stock = header_indexes
                .stock_index
                .and_then(|idx| record.get(idx))
                .and_then(|value| value.trim().parse::<i32>().ok())
                .filter(|value| *value >= 0)
                .unwrap_or(0);

            let description = header_indexes
                .description_index
                .and_then(|idx| record.get(idx))
                .map(sanitize_multiline_text)
                .filter(|value| !value.is_empty());

            let mut product = NewProduct::new(sanitized_name, price_cents).with_stock(stock);

            if let Some(description) = description {
                product = product.with_description(description);
            }

            products.push(product);
        }

        if products.is_empty() {
            return Err(ProductFormError::EmptyUpload);
        }

        Ok(products)
    }
}

/// Parse a decimal amount like `"12.34"` into minor currency units.
pub(crate) fn parse_price(value: &str) -> ProductFormResult<i64> {
    let trimmed = value.trim();
    let parsed = trimmed.parse::<f64>().ok().filter(|amount| {
        amount.is_finite() && *amount >= 0.0 && *amount <= i64::MAX as f64 / 100.0
    });

    match parsed {
        Some(amount) => Ok((amount * 100.0).round() as i64),
        None => Err(ProductFormError::InvalidPrice {
            value: trimmed.to_string(),
        }),
    }
}

struct ProductHeaderIndexes {
    name_index: Option<usize>,
    price_index: Option<usize>,
    stock_index: Option<usize>,
    description_index: Option<usize>,
}

fn locate_product_headers(headers: &StringRecord) -> ProductHeaderIndexes {
    ProductHeaderIndexes {
        name_index: locate_header(headers, "name"),
        price_index: locate_header(headers, "price"),
        stock_index: locate_header(headers, "stock"),
        description_index: locate_header(headers, "description"),
    }
}

fn locate_header(headers: &StringRecord, expected: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(expected))
}
