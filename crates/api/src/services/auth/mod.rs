//! Authentication service.
//!
//! Provides password registration and login, and issues the bearer tokens
//! that protect `/api/me` and `/api/orders`.

mod error;
mod token;

pub use error::AuthError;
pub use token::{Claims, TokenService};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use meezy_core::{Email, Role};
use meezy_core::api::{LoginRequest, RegisterRequest};

use crate::models::{NewUser, User};
use crate::store::{RepositoryError, Store};

/// A user together with a freshly issued token.
#[derive(Debug)]
pub struct Authenticated {
    pub user: User,
    pub token: String,
}

/// Authentication service.
///
/// Handles user registration, login, and resolving token claims back to
/// stored users.
pub struct AuthService<'a> {
    store: &'a Store,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a Store, tokens: &'a TokenService) -> Self {
        Self { store, tokens }
    }

    /// Register a new user and sign them in.
    ///
    /// `role` defaults to buyer when absent.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if name, email or password is absent.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::InvalidRole` if the role is not buyer or seller.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Authenticated, AuthError> {
        let (Some(name), Some(email), Some(password)) = (
            present(request.name.as_deref()),
            present(request.email.as_deref()),
            present(request.password.as_deref()),
        ) else {
            return Err(AuthError::MissingFields("Name, email, password required"));
        };

        let email = Email::parse(email)?;
        let role = match present(request.role.as_deref()) {
            Some(role) => role.parse::<Role>()?,
            None => Role::default(),
        };

        let password_hash = hash_password(password)?;

        let user = self
            .store
            .users()
            .insert(NewUser {
                name: name.trim().to_owned(),
                email,
                password_hash,
                role,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, role = %user.role, "user registered");
        let token = self.tokens.issue(&user)?;
        Ok(Authenticated { user, token })
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if email or password is absent.
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, request: &LoginRequest) -> Result<Authenticated, AuthError> {
        let (Some(email), Some(password)) = (
            present(request.email.as_deref()),
            present(request.password.as_deref()),
        ) else {
            return Err(AuthError::MissingFields("Email and password required"));
        };

        // A malformed email cannot belong to anyone.
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .store
            .users()
            .find(&|u: &User| u.email == email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        tracing::info!(user_id = %user.id, "user logged in");
        let token = self.tokens.issue(&user)?;
        Ok(Authenticated { user, token })
    }

    /// Resolve verified claims to the stored user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the user no longer exists.
    pub async fn current_user(&self, claims: &Claims) -> Result<User, AuthError> {
        self.store
            .users()
            .get(claims.id)
            .await?
            .ok_or(AuthError::InvalidToken)
    }
}

/// Treat absent and blank fields the same way.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeDelta;
    use secrecy::SecretString;

    use super::*;

    async fn fixture() -> (Store, TokenService) {
        let store = Store::in_memory(Vec::new()).await.unwrap();
        let tokens = TokenService::new(
            &SecretString::from("k7#Vq9!zR2@mW4$xT8^bN1&cL6*pH3+d"),
            TimeDelta::hours(1),
        );
        (store, tokens)
    }

    fn registration(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: Some("Priya".to_owned()),
            email: Some(email.to_owned()),
            password: Some("hunter22".to_owned()),
            role: None,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("hunter22").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter22", &hash).is_ok());
        assert!(matches!(
            verify_password("hunter23", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_register_defaults_role_and_hashes_password() {
        let (store, tokens) = fixture().await;
        let auth = AuthService::new(&store, &tokens);

        let Authenticated { user, token } =
            auth.register(&registration("p@meezy.in")).await.unwrap();

        assert_eq!(user.role, Role::Buyer);
        assert_ne!(user.password_hash, "hunter22");
        assert_eq!(tokens.verify(&token).unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_register_rejects_blank_fields() {
        let (store, tokens) = fixture().await;
        let auth = AuthService::new(&store, &tokens);

        let mut request = registration("p@meezy.in");
        request.name = Some("   ".to_owned());

        assert!(matches!(
            auth.register(&request).await,
            Err(AuthError::MissingFields(_))
        ));
        assert_eq!(store.users().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_register_rejects_unknown_role() {
        let (store, tokens) = fixture().await;
        let auth = AuthService::new(&store, &tokens);

        let mut request = registration("p@meezy.in");
        request.role = Some("admin".to_owned());

        assert!(matches!(
            auth.register(&request).await,
            Err(AuthError::InvalidRole(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let (store, tokens) = fixture().await;
        let auth = AuthService::new(&store, &tokens);

        auth.register(&registration("p@meezy.in")).await.unwrap();
        assert!(matches!(
            auth.register(&registration("p@meezy.in")).await,
            Err(AuthError::UserAlreadyExists)
        ));
        assert_eq!(store.users().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_login() {
        let (store, tokens) = fixture().await;
        let auth = AuthService::new(&store, &tokens);
        let registered = auth.register(&registration("p@meezy.in")).await.unwrap();

        let login = |email: &str, password: &str| LoginRequest {
            email: Some(email.to_owned()),
            password: Some(password.to_owned()),
        };

        let ok = auth.login(&login("p@meezy.in", "hunter22")).await.unwrap();
        assert_eq!(ok.user.id, registered.user.id);

        for (email, password) in [
            ("p@meezy.in", "wrong"),
            ("nobody@meezy.in", "hunter22"),
            ("not-an-email", "hunter22"),
        ] {
            assert!(matches!(
                auth.login(&login(email, password)).await,
                Err(AuthError::InvalidCredentials)
            ));
        }

        assert!(matches!(
            auth.login(&LoginRequest::default()).await,
            Err(AuthError::MissingFields(_))
        ));
    }

    #[tokio::test]
    async fn test_current_user_for_unknown_id() {
        let (store, tokens) = fixture().await;
        let other_store = Store::in_memory(Vec::new()).await.unwrap();

        // Token minted against a store that has the user...
        let minted = AuthService::new(&other_store, &tokens)
            .register(&registration("p@meezy.in"))
            .await
            .unwrap();
        let claims = tokens.verify(&minted.token).unwrap();

        // ...presented to one that does not.
        assert!(matches!(
            AuthService::new(&store, &tokens).current_user(&claims).await,
            Err(AuthError::InvalidToken)
        ));
    }
}
