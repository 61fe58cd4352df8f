use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("an account with this email already exists")]
    EmailTaken,
    #[error("email or password is incorrect")]
    InvalidCredentials,
    #[error("no user is logged in")]
    NotLoggedIn,
}

/// A locally registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
}

/// Persisted-credential boundary. The search stack only needs these four
/// operations; storage stays behind the trait.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<UserAccount, AuthError>;

    async fn login(&self, email: &str, password: &str) -> Result<UserAccount, AuthError>;

    async fn logout(&self) -> Result<(), AuthError>;

    async fn current_user(&self) -> Option<UserAccount>;
}

struct StoredAccount {
    account: UserAccount,
    password: String,
}

/// In-memory mock store. Passwords are compared in plain text; this is a
/// development stand-in behind the trait, not an auth system.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    inner: Mutex<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    accounts: HashMap<String, StoredAccount>,
    active: Option<UserAccount>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        self.inner.lock().expect("credential store lock poisoned")
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<UserAccount, AuthError> {
        let mut inner = self.lock();
        let key = email.trim().to_ascii_lowercase();
        if inner.accounts.contains_key(&key) {
            return Err(AuthError::EmailTaken);
        }

        let account = UserAccount {
            id: Uuid::new_v4(),
            email: key.clone(),
            display_name: display_name.to_string(),
        };
        inner.accounts.insert(
            key,
            StoredAccount {
                account: account.clone(),
                password: password.to_string(),
            },
        );
        inner.active = Some(account.clone());
        Ok(account)
    }

    async fn login(&self, email: &str, password: &str) -> Result<UserAccount, AuthError> {
        let mut inner = self.lock();
        let key = email.trim().to_ascii_lowercase();
        match inner.accounts.get(&key) {
            Some(stored) if stored.password == password => {
                let account = stored.account.clone();
                inner.active = Some(account.clone());
                Ok(account)
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn logout(&self) -> Result<(), AuthError> {
        let mut inner = self.lock();
        if inner.active.take().is_none() {
            return Err(AuthError::NotLoggedIn);
        }
        Ok(())
    }

    async fn current_user(&self) -> Option<UserAccount> {
        self.lock().active.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_login_logout_round_trip() {
        let store = InMemoryCredentialStore::new();

        let registered = store
            .register("Traveller@Example.com", "hunter2", "Traveller")
            .await
            .expect("register should succeed");
        assert_eq!(registered.email, "traveller@example.com");
        assert_eq!(store.current_user().await, Some(registered.clone()));

        store.logout().await.expect("logout should succeed");
        assert_eq!(store.current_user().await, None);

        let logged_in = store
            .login("traveller@example.com", "hunter2")
            .await
            .expect("login should succeed");
        assert_eq!(logged_in.id, registered.id);
        assert_eq!(store.current_user().await, Some(logged_in));
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let store = InMemoryCredentialStore::new();
        store
            .register("traveller@example.com", "hunter2", "Traveller")
            .await
            .expect("register should succeed");
        store.logout().await.expect("logout should succeed");

        let err = store
            .login("traveller@example.com", "wrong")
            .await
            .expect_err("login should fail");
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(store.current_user().await, None);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryCredentialStore::new();
        store
            .register("traveller@example.com", "hunter2", "Traveller")
            .await
            .expect("register should succeed");

        let err = store
            .register("TRAVELLER@example.com", "other", "Other")
            .await
            .expect_err("duplicate should fail");
        assert_eq!(err, AuthError::EmailTaken);
    }

    #[tokio::test]
    async fn test_logout_without_login_errors() {
        let store = InMemoryCredentialStore::new();
        assert_eq!(store.logout().await, Err(AuthError::NotLoggedIn));
    }
}
