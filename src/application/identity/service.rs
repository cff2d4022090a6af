//! Hotelier accounts: signup, login and self-service updates
//!
//! HTTP handlers are thin wrappers that delegate to this service; the
//! repository underneath only forwards to the store.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    CreateHotelierDto, DomainError, DomainResult, Hotelier, RepositoryProvider, UpdateHotelierDto,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password_with_cost, verify_password};

pub const HOTELIERS_CREATED: &str = "hoteliers_created_total";

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub hotelier: Hotelier,
}

#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub phone: Option<String>,
}

pub struct HotelierService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
    password_cost: u32,
}

impl HotelierService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self {
            repos,
            jwt_config,
            password_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Override the bcrypt cost (tests use the minimum).
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    fn hash(&self, password: &str) -> DomainResult<String> {
        hash_password_with_cost(password, self.password_cost)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))
    }

    // ── Registration ────────────────────────────────────────────

    /// Login accepts either column, so a value must be unique across both:
    /// usernames never contain `@`, and a new email or username may not
    /// equal any other hotelier's email or username.
    async fn ensure_login_free(
        &self,
        email: Option<&str>,
        username: Option<&str>,
        except: Option<i32>,
    ) -> DomainResult<()> {
        if username.is_some_and(|u| u.contains('@')) {
            return Err(DomainError::Validation(
                "Username cannot contain '@'".into(),
            ));
        }

        for (value, label) in [(email, "Email"), (username, "Username")] {
            let Some(value) = value else { continue };
            let holder = self
                .repos
                .hoteliers()
                .find_by_email_or_username(value, value)
                .await?;
            if holder.is_some_and(|h| Some(h.id) != except) {
                return Err(DomainError::Conflict(format!("{} already in use", label)));
            }
        }
        Ok(())
    }

    pub async fn signup(&self, req: SignupRequest) -> DomainResult<Hotelier> {
        self.ensure_login_free(Some(&req.email), Some(&req.username), None)
            .await?;

        let dto = CreateHotelierDto {
            name: req.name,
            email: req.email,
            username: req.username,
            password_hash: self.hash(&req.password)?,
            phone: req.phone,
        };

        let hotelier = self.repos.hoteliers().create(dto).await?;

        metrics::counter!(HOTELIERS_CREATED).increment(1);
        info!(hotelier_id = hotelier.id, username = %hotelier.username, "New hotelier registered");
        Ok(hotelier)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email or username + password and return a JWT.
    pub async fn login(&self, login: &str, password: &str) -> DomainResult<AuthResult> {
        let hotelier = self
            .repos
            .hoteliers()
            .find_by_email_or_username(login, login)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("Invalid credentials".into()))?;

        let valid = verify_password(password, &hotelier.password_hash).unwrap_or(false);
        if !valid {
            debug!(hotelier_id = hotelier.id, "Rejected login with wrong password");
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let token = create_token(hotelier.id, &hotelier.username, &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;

        info!(hotelier_id = hotelier.id, "Hotelier logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expires_in_secs(),
            hotelier,
        })
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get(&self, id: i32) -> DomainResult<Hotelier> {
        self.repos
            .hoteliers()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Hotelier", id))
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Hotelier>> {
        self.repos.hoteliers().list_all().await
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Partial profile update. A new plain-text password is hashed first.
    pub async fn update(
        &self,
        id: i32,
        mut dto: UpdateHotelierDto,
        new_password: Option<String>,
    ) -> DomainResult<Hotelier> {
        self.ensure_login_free(dto.email.as_deref(), dto.username.as_deref(), Some(id))
            .await?;
        if let Some(password) = new_password {
            dto.password_hash = Some(self.hash(&password)?);
        }
        let updated = self.repos.hoteliers().update(id, dto).await?;
        info!(hotelier_id = id, "Hotelier updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repos.hoteliers().delete(id).await?;
        info!(hotelier_id = id, "Hotelier deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::jwt::verify_token;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::infrastructure::database::test_connection;

    async fn service() -> HotelierService {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(test_connection().await));
        HotelierService::new(repos, JwtConfig::default()).with_password_cost(4)
    }

    fn signup(email: &str, username: &str) -> SignupRequest {
        SignupRequest {
            name: "Pousada Mar Azul".into(),
            email: email.into(),
            username: username.into(),
            password: "senha-segura".into(),
            phone: None,
        }
    }

    #[tokio::test]
    async fn signup_hashes_password() {
        let svc = service().await;
        let h = svc.signup(signup("mar@azul.com", "marazul")).await.unwrap();
        assert_ne!(h.password_hash, "senha-segura");
        assert!(h.password_hash.starts_with("$2"));
    }

    #[tokio::test]
    async fn signup_rejects_taken_email_and_username() {
        let svc = service().await;
        svc.signup(signup("mar@azul.com", "marazul")).await.unwrap();

        let err = svc.signup(signup("mar@azul.com", "outro")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(ref m) if m == "Email already in use"));

        let err = svc.signup(signup("outro@azul.com", "marazul")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(ref m) if m == "Username already in use"));
    }

    #[tokio::test]
    async fn login_by_email_or_username() {
        let svc = service().await;
        let h = svc.signup(signup("mar@azul.com", "marazul")).await.unwrap();

        let by_email = svc.login("mar@azul.com", "senha-segura").await.unwrap();
        assert_eq!(by_email.hotelier.id, h.id);
        assert_eq!(by_email.token_type, "Bearer");

        let by_username = svc.login("marazul", "senha-segura").await.unwrap();
        let claims = verify_token(&by_username.token, svc.jwt_config()).unwrap();
        assert_eq!(claims.hotelier_id(), Some(h.id));
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let svc = service().await;
        svc.signup(signup("mar@azul.com", "marazul")).await.unwrap();

        let err = svc.login("marazul", "errada").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));

        let err = svc.login("ninguem", "senha-segura").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn update_password_allows_new_login() {
        let svc = service().await;
        let h = svc.signup(signup("mar@azul.com", "marazul")).await.unwrap();

        svc.update(h.id, UpdateHotelierDto::default(), Some("nova-senha-1".into()))
            .await
            .unwrap();

        assert!(svc.login("marazul", "senha-segura").await.is_err());
        assert!(svc.login("marazul", "nova-senha-1").await.is_ok());
    }

    #[tokio::test]
    async fn username_shaped_like_an_email_is_rejected() {
        let svc = service().await;
        svc.signup(signup("a@x.com", "alice")).await.unwrap();

        let err = svc.signup(signup("b@x.com", "a@x.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(svc.login("a@x.com", "senha-segura").await.is_ok());
    }

    #[tokio::test]
    async fn email_equal_to_another_username_is_conflict() {
        let svc = service().await;
        svc.signup(signup("a@x.com", "alice")).await.unwrap();

        let err = svc.signup(signup("alice", "bob")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(ref m) if m == "Email already in use"));
    }

    #[tokio::test]
    async fn update_keeps_logins_unambiguous() {
        let svc = service().await;
        svc.signup(signup("a@x.com", "alice")).await.unwrap();
        let bob = svc.signup(signup("b@x.com", "bob")).await.unwrap();

        let rename = |username: &str| UpdateHotelierDto {
            username: Some(username.into()),
            ..Default::default()
        };
        let err = svc.update(bob.id, rename("a@x.com"), None).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = svc.update(bob.id, rename("alice"), None).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(ref m) if m == "Username already in use"));

        // Re-submitting one's own values is not a conflict.
        let same = UpdateHotelierDto {
            email: Some("b@x.com".into()),
            username: Some("bob".into()),
            ..Default::default()
        };
        assert!(svc.update(bob.id, same, None).await.is_ok());
        assert!(svc.login("bob", "senha-segura").await.is_ok());
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let svc = service().await;
        assert!(matches!(
            svc.get(3).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }
}
