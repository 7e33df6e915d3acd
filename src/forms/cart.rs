use serde::Deserialize;

/// Payload referencing a product in the caller's cart, used by
/// `POST /cart/add` and `DELETE /cart/remove`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProductForm {
    pub product_id: i32,
}

/// Payload for `PUT /cart/update`: sets an absolute quantity.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartForm {
    pub product_id: i32,
    pub quantity: i32,
}

/// Payload for `POST /favorites/add` and `DELETE /favorites/remove`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteProductForm {
    pub product_id: i32,
}
