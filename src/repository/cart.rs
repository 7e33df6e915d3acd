use diesel::prelude::*;

use crate::{
    domain::cart::{CartItem as DomainCartItem, CartLine},
    models::cart::{CartItem as DbCartItem, NewCartItem as DbNewCartItem},
    repository::{CartReader, CartWriter, DieselRepository, RepositoryError, RepositoryResult},
};

impl CartReader for DieselRepository {
    fn get_cart_item(
        &self,
        user_id: i32,
        product_id: i32,
    ) -> RepositoryResult<Option<DomainCartItem>> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;
        let item = cart_items::table
            .filter(cart_items::user_id.eq(user_id))
            .filter(cart_items::product_id.eq(product_id))
            .first::<DbCartItem>(&mut conn)
            .optional()?;

        Ok(item.map(Into::into))
    }

    fn list_cart(&self, user_id: i32) -> RepositoryResult<Vec<CartLine>> {
        use crate::schema::{cart_items, products};

        let mut conn = self.conn()?;
        let rows = cart_items::table
            .inner_join(products::table)
            .filter(cart_items::user_id.eq(user_id))
            .order(cart_items::created_at.asc())
            .select((
                cart_items::product_id,
                products::name,
                products::price_cents,
                products::image,
                products::stock,
                cart_items::quantity,
            ))
            .load::<(i32, String, i64, Option<String>, i32, i32)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(
                |(product_id, name, price_cents, image, stock, quantity)| CartLine {
                    product_id,
                    name,
                    price_cents,
                    image,
                    stock,
                    quantity,
                },
            )
            .collect())
    }
}

impl CartWriter for DieselRepository {
    fn set_cart_quantity(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> RepositoryResult<DomainCartItem> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;
        let now = chrono::Local::now().naive_utc();

        let new_row = DbNewCartItem {
            user_id,
            product_id,
            quantity,
            updated_at: now,
        };

        let saved = diesel::insert_into(cart_items::table)
            .values(&new_row)
            .on_conflict((cart_items::user_id, cart_items::product_id))
            .do_update()
            .set((
                cart_items::quantity.eq(quantity),
                cart_items::updated_at.eq(now),
            ))
            .get_result::<DbCartItem>(&mut conn)?;

        Ok(saved.into())
    }

    fn remove_cart_item(&self, user_id: i32, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        let target = cart_items::table
            .filter(cart_items::user_id.eq(user_id))
            .filter(cart_items::product_id.eq(product_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn clear_cart(&self, user_id: i32) -> RepositoryResult<usize> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(cart_items::table.filter(cart_items::user_id.eq(user_id)))
            .execute(&mut conn)?;

        Ok(deleted)
    }
}
