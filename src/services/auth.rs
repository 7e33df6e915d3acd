use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use uuid::Uuid;
use validator::Validate;

use crate::auth::{AuthenticatedUser, issue_token};
use crate::domain::password_reset::NewPasswordReset;
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::forms::auth::{
    ForgotPasswordForm, LoginForm, RegisterForm, ResetPasswordForm, UpdateProfileForm,
};
use crate::forms::sanitize_inline_text;
use crate::mailer::ResetMailer;
use crate::repository::{
    PasswordResetReader, PasswordResetWriter, UserReader, UserWriter,
};
use crate::services::{ServiceError, ServiceResult};

/// Hash a password into an Argon2 PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServiceError::Internal(err.to_string()))
}

/// Check a password against a stored PHC string. A malformed stored hash
/// counts as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Create an account and sign the caller in.
pub fn register<R>(repo: &R, jwt_secret: &str, form: RegisterForm) -> ServiceResult<(String, User)>
where
    R: UserReader + UserWriter,
{
    form.validate()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let name = sanitize_inline_text(&form.name);
    if name.is_empty() {
        return Err(ServiceError::Form("name cannot be empty".to_string()));
    }

    let email = form.email.trim().to_lowercase();
    if repo.get_user_by_email(&email)?.is_some() {
        return Err(ServiceError::Conflict(
            "an account with this email already exists".to_string(),
        ));
    }

    let password_hash = hash_password(&form.password)?;
    // A concurrent registration still trips the unique index, which the
    // repository reports as a conflict.
    let user = repo.create_user(&NewUser::new(name, email, password_hash))?;

    let token = issue_token(&AuthenticatedUser::from(&user), jwt_secret)
        .map_err(|err| ServiceError::Internal(err.to_string()))?;

    Ok((token, user))
}

/// Exchange credentials for a bearer token. Unknown emails and wrong
/// passwords produce the same error.
pub fn login(
    repo: &impl UserReader,
    jwt_secret: &str,
    form: LoginForm,
) -> ServiceResult<(String, User)> {
    let email = form.email.trim().to_lowercase();
    let user = repo
        .get_user_by_email(&email)?
        .ok_or(ServiceError::Unauthorized)?;

    if !verify_password(&form.password, &user.password_hash) {
        return Err(ServiceError::Unauthorized);
    }

    let token = issue_token(&AuthenticatedUser::from(&user), jwt_secret)
        .map_err(|err| ServiceError::Internal(err.to_string()))?;

    Ok((token, user))
}

/// Load the caller's own account. A valid token whose account has since been
/// deleted is treated as unauthenticated.
pub fn current_user(auth: &AuthenticatedUser, repo: &impl UserReader) -> ServiceResult<User> {
    repo.get_user_by_id(auth.sub)?
        .ok_or(ServiceError::Unauthorized)
}

/// Update the caller's display name.
pub fn update_profile(
    auth: &AuthenticatedUser,
    repo: &impl UserWriter,
    form: UpdateProfileForm,
) -> ServiceResult<User> {
    form.validate()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let name = sanitize_inline_text(&form.name);
    if name.is_empty() {
        return Err(ServiceError::Form("name cannot be empty".to_string()));
    }

    Ok(repo.update_user(auth.sub, &UpdateUser::new().name(name))?)
}

/// Attach a stored avatar path to the caller's account.
pub fn set_avatar(
    auth: &AuthenticatedUser,
    repo: &impl UserWriter,
    avatar_path: String,
) -> ServiceResult<User> {
    Ok(repo.update_user(auth.sub, &UpdateUser::new().avatar(Some(avatar_path)))?)
}

/// Issue a password-reset token and email the reset link. Unknown emails are
/// silently accepted so the endpoint cannot be used to probe for accounts.
pub async fn forgot_password<R>(
    repo: &R,
    mailer: &dyn ResetMailer,
    public_url: &str,
    form: ForgotPasswordForm,
) -> ServiceResult<()>
where
    R: UserReader + PasswordResetWriter,
{
    let email = form.email.trim().to_lowercase();
    let Some(user) = repo.get_user_by_email(&email)? else {
        return Ok(());
    };

    let token = Uuid::new_v4().to_string();
    let reset = repo.replace_password_reset(&NewPasswordReset::new(user.id, &token))?;

    let reset_link = format!("{public_url}/reset-password?token={}", reset.token);
    mailer
        .send_reset(&user.email, &reset_link)
        .await
        .map_err(|err| ServiceError::Mailer(err.to_string()))?;

    Ok(())
}

/// Redeem a reset token and set a new password. Tokens are single use and
/// expire after an hour.
pub fn reset_password<R>(repo: &R, form: ResetPasswordForm) -> ServiceResult<()>
where
    R: PasswordResetReader + PasswordResetWriter + UserWriter,
{
    form.validate()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let reset = repo
        .get_password_reset(form.token.trim())?
        .filter(|reset| reset.expires_at > chrono::Local::now().naive_utc())
        .ok_or_else(|| ServiceError::Form("invalid or expired reset token".to_string()))?;

    let password_hash = hash_password(&form.password)?;
    repo.set_password_hash(reset.user_id, &password_hash)?;
    repo.delete_password_resets(reset.user_id)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::password_reset::PasswordReset;
    use crate::repository::RepositoryResult;
    use crate::repository::mock::MockUserReader;
    use chrono::NaiveDate;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        AccountRepository {}

        impl UserReader for AccountRepository {
            fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
            fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
            fn list_users(&self, query: crate::domain::user::UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
        }

        impl UserWriter for AccountRepository {
            fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
            fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
            fn set_password_hash(&self, user_id: i32, password_hash: &str) -> RepositoryResult<()>;
        }

        impl PasswordResetReader for AccountRepository {
            fn get_password_reset(&self, token: &str) -> RepositoryResult<Option<PasswordReset>>;
        }

        impl PasswordResetWriter for AccountRepository {
            fn replace_password_reset(&self, new_reset: &NewPasswordReset) -> RepositoryResult<PasswordReset>;
            fn delete_password_resets(&self, user_id: i32) -> RepositoryResult<()>;
        }
    }

    fn sample_user(id: i32, email: &str, password_hash: &str) -> User {
        let datetime = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default();
        User {
            id,
            name: "Alice".to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role: "user".to_string(),
            avatar: None,
            created_at: datetime,
            updated_at: datetime,
        }
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("hunter42").expect("hash created");
        assert!(verify_password("hunter42", &hash));
        assert!(!verify_password("hunter43", &hash));
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        assert!(!verify_password("hunter42", "not-a-phc-string"));
    }

    #[test]
    fn register_rejects_duplicate_email() {
        let mut repo = MockAccountRepository::new();
        repo.expect_get_user_by_email()
            .with(eq("alice@example.com"))
            .returning(|email| Ok(Some(sample_user(1, email, "hash"))));

        let form = RegisterForm {
            name: "Alice".to_string(),
            email: "Alice@Example.com".to_string(),
            password: "hunter42".to_string(),
        };

        let err = register(&repo, "secret", form).expect_err("expected failure");
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[test]
    fn register_creates_account_and_issues_token() {
        let mut repo = MockAccountRepository::new();
        repo.expect_get_user_by_email().returning(|_| Ok(None));
        repo.expect_create_user()
            .withf(|new_user| new_user.email == "alice@example.com" && new_user.role == "user")
            .times(1)
            .returning(|new_user| {
                Ok(sample_user(1, &new_user.email, &new_user.password_hash))
            });

        let form = RegisterForm {
            name: "Alice".to_string(),
            email: "Alice@Example.com".to_string(),
            password: "hunter42".to_string(),
        };

        let (token, user) = register(&repo, "secret", form).expect("expected success");
        assert!(!token.is_empty());
        assert_eq!(user.email, "alice@example.com");
    }

    #[test]
    fn register_rejects_short_password() {
        let repo = MockAccountRepository::new();

        let form = RegisterForm {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "abc".to_string(),
        };

        let err = register(&repo, "secret", form).expect_err("expected failure");
        assert!(matches!(err, ServiceError::Form(_)));
    }

    #[test]
    fn login_rejects_wrong_password() {
        let hash = hash_password("hunter42").expect("hash created");
        let mut repo = MockUserReader::new();
        repo.expect_get_user_by_email()
            .with(eq("alice@example.com"))
            .returning(move |email| Ok(Some(sample_user(1, email, &hash))));

        let form = LoginForm {
            email: "alice@example.com".to_string(),
            password: "wrong".to_string(),
        };

        let err = login(&repo, "secret", form).expect_err("expected failure");
        assert!(matches!(err, ServiceError::Unauthorized));
    }

    #[test]
    fn login_accepts_valid_credentials() {
        let hash = hash_password("hunter42").expect("hash created");
        let mut repo = MockUserReader::new();
        repo.expect_get_user_by_email()
            .with(eq("alice@example.com"))
            .returning(move |email| Ok(Some(sample_user(1, email, &hash))));

        let form = LoginForm {
            email: "Alice@Example.com".to_string(),
            password: "hunter42".to_string(),
        };

        let (token, user) = login(&repo, "secret", form).expect("expected success");
        assert!(!token.is_empty());
        assert_eq!(user.id, 1);
    }

    #[test]
    fn reset_password_rejects_expired_token() {
        let mut repo = MockAccountRepository::new();
        repo.expect_get_password_reset().returning(|token| {
            Ok(Some(PasswordReset {
                id: 1,
                user_id: 3,
                token: token.to_string(),
                expires_at: chrono::Local::now().naive_utc() - chrono::Duration::minutes(5),
                created_at: chrono::Local::now().naive_utc(),
            }))
        });

        let form = ResetPasswordForm {
            token: "stale".to_string(),
            password: "hunter42".to_string(),
        };

        let err = reset_password(&repo, form).expect_err("expected failure");
        assert!(matches!(err, ServiceError::Form(_)));
    }

    #[test]
    fn reset_password_updates_hash_and_burns_tokens() {
        let mut repo = MockAccountRepository::new();
        repo.expect_get_password_reset().returning(|token| {
            Ok(Some(PasswordReset {
                id: 1,
                user_id: 3,
                token: token.to_string(),
                expires_at: chrono::Local::now().naive_utc() + chrono::Duration::minutes(30),
                created_at: chrono::Local::now().naive_utc(),
            }))
        });
        repo.expect_set_password_hash()
            .withf(|user_id, hash| *user_id == 3 && hash.starts_with("$argon2"))
            .times(1)
            .returning(|_, _| Ok(()));
        repo.expect_delete_password_resets()
            .with(eq(3))
            .times(1)
            .returning(|_| Ok(()));

        let form = ResetPasswordForm {
            token: "fresh".to_string(),
            password: "hunter42".to_string(),
        };

        reset_password(&repo, form).expect("expected success");
    }
}
