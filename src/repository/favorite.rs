use diesel::prelude::*;

use crate::{
    domain::product::Product as DomainProduct,
    models::favorite::NewFavorite as DbNewFavorite,
    models::product::Product as DbProduct,
    repository::{
        DieselRepository, FavoriteReader, FavoriteWriter, RepositoryError, RepositoryResult,
    },
};

impl FavoriteReader for DieselRepository {
    fn list_favorites(&self, user_id: i32) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::{favorites, products};

        let mut conn = self.conn()?;
        let db_products = favorites::table
            .inner_join(products::table)
            .filter(favorites::user_id.eq(user_id))
            .order(favorites::created_at.desc())
            .select(DbProduct::as_select())
            .load::<DbProduct>(&mut conn)?;

        Ok(db_products.into_iter().map(Into::into).collect())
    }
}

impl FavoriteWriter for DieselRepository {
    fn add_favorite(&self, user_id: i32, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::favorites;

        let mut conn = self.conn()?;

        let new_row = DbNewFavorite {
            user_id,
            product_id,
        };

        diesel::insert_into(favorites::table)
            .values(&new_row)
            .on_conflict_do_nothing()
            .execute(&mut conn)?;

        Ok(())
    }

    fn remove_favorite(&self, user_id: i32, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::favorites;

        let mut conn = self.conn()?;

        let target = favorites::table
            .filter(favorites::user_id.eq(user_id))
            .filter(favorites::product_id.eq(product_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
