use diesel::prelude::*;

use crate::{
    domain::password_reset::{
        NewPasswordReset as DomainNewPasswordReset, PasswordReset as DomainPasswordReset,
    },
    domain::user::{
        NewUser as DomainNewUser, UpdateUser as DomainUpdateUser, User as DomainUser,
        UserListQuery,
    },
    models::password_reset::{
        NewPasswordReset as DbNewPasswordReset, PasswordReset as DbPasswordReset,
    },
    models::user::{NewUser as DbNewUser, UpdateUser as DbUpdateUser, User as DbUser},
    repository::{
        DieselRepository, PasswordResetReader, PasswordResetWriter, RepositoryError,
        RepositoryResult, UserReader, UserWriter,
    },
};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<DomainUser>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::id.eq(id))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<DomainUser>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::email.eq(email))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<DomainUser>)> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let UserListQuery { search, pagination } = query;
        let search_pattern = search.as_ref().map(|term| format!("%{}%", term));

        let mut count_query = users::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(ref pattern) = search_pattern {
            count_query = count_query.filter(
                users::name
                    .like(pattern.clone())
                    .or(users::email.like(pattern.clone())),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = users::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(ref pattern) = search_pattern {
            items = items.filter(
                users::name
                    .like(pattern.clone())
                    .or(users::email.like(pattern.clone())),
            );
        }

        items = items.order(users::created_at.desc());

        if let Some(pagination) = pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_users = items.load::<DbUser>(&mut conn)?;

        Ok((total, db_users.into_iter().map(Into::into).collect()))
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &DomainNewUser) -> RepositoryResult<DomainUser> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_new = DbNewUser::from(new_user);

        let created = diesel::insert_into(users::table)
            .values(&db_new)
            .get_result::<DbUser>(&mut conn)?;

        Ok(created.into())
    }

    fn update_user(&self, user_id: i32, updates: &DomainUpdateUser) -> RepositoryResult<DomainUser> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateUser::from(updates);

        let updated = diesel::update(users::table.filter(users::id.eq(user_id)))
            .set(&db_updates)
            .get_result::<DbUser>(&mut conn)?;

        Ok(updated.into())
    }

    fn set_password_hash(&self, user_id: i32, password_hash: &str) -> RepositoryResult<()> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let now = chrono::Local::now().naive_utc();

        let updated = diesel::update(users::table.filter(users::id.eq(user_id)))
            .set((
                users::password_hash.eq(password_hash),
                users::updated_at.eq(now),
            ))
            .execute(&mut conn)?;

        if updated == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

impl PasswordResetReader for DieselRepository {
    fn get_password_reset(&self, token: &str) -> RepositoryResult<Option<DomainPasswordReset>> {
        use crate::schema::password_resets;

        let mut conn = self.conn()?;
        let reset = password_resets::table
            .filter(password_resets::token.eq(token))
            .first::<DbPasswordReset>(&mut conn)
            .optional()?;

        Ok(reset.map(Into::into))
    }
}

impl PasswordResetWriter for DieselRepository {
    fn replace_password_reset(
        &self,
        new_reset: &DomainNewPasswordReset,
    ) -> RepositoryResult<DomainPasswordReset> {
        use crate::schema::password_resets;

        let mut conn = self.conn()?;

        conn.transaction::<DomainPasswordReset, RepositoryError, _>(|conn| {
            diesel::delete(
                password_resets::table.filter(password_resets::user_id.eq(new_reset.user_id)),
            )
            .execute(conn)?;

            let db_new = DbNewPasswordReset::from(new_reset);
            let created = diesel::insert_into(password_resets::table)
                .values(&db_new)
                .get_result::<DbPasswordReset>(conn)?;

            Ok(created.into())
        })
    }

    fn delete_password_resets(&self, user_id: i32) -> RepositoryResult<()> {
        use crate::schema::password_resets;

        let mut conn = self.conn()?;
        diesel::delete(password_resets::table.filter(password_resets::user_id.eq(user_id)))
            .execute(&mut conn)?;

        Ok(())
    }
}
