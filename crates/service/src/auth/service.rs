use std::sync::Arc;

use chrono::Duration;
use tracing::{error, info, instrument, warn};

use super::domain::{LoggedUser, LoginInput, RegisterInput, RegisteredUser};
use super::password::{self, HashCost};
use super::repository::CredentialStore;
use super::token::{Claims, TokenIssuer};
use crate::errors::ServiceError;

/// Auth service configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub hash_cost: HashCost,
}

impl From<&configs::AuthConfig> for AuthConfig {
    fn from(c: &configs::AuthConfig) -> Self {
        Self {
            jwt_secret: c.jwt_secret.clone(),
            token_ttl: Duration::hours(c.token_ttl_hours),
            hash_cost: HashCost {
                memory_kib: c.hash_memory_kib,
                iterations: c.hash_iterations,
                parallelism: c.hash_parallelism,
            },
        }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<C: CredentialStore> {
    store: Arc<C>,
    cfg: AuthConfig,
    tokens: TokenIssuer,
}

impl<C: CredentialStore> AuthService<C> {
    pub fn new(store: Arc<C>, cfg: AuthConfig) -> Self {
        let tokens = TokenIssuer::new(&cfg.jwt_secret, cfg.token_ttl);
        Self { store, cfg, tokens }
    }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockCredentialStore};
    /// use service::auth::domain::{RegisterInput, Role};
    /// use service::auth::password::HashCost;
    /// use std::sync::Arc;
    /// let store = Arc::new(MockCredentialStore::default());
    /// let cfg = AuthConfig { jwt_secret: "secret".into(), token_ttl: chrono::Duration::hours(24), hash_cost: HashCost::minimal() };
    /// let svc = AuthService::new(store, cfg);
    /// let input = RegisterInput { email: "user@example.com".into(), password: "Secret123".into(), role: Role::User };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "user@example.com");
    /// ```
    #[instrument(skip(self, input), fields(op = "service.auth.register", email = %input.email, role = %input.role))]
    pub async fn register(&self, input: RegisterInput) -> Result<RegisteredUser, ServiceError> {
        const OP: &str = "service.auth.register";
        input.validate()?;

        let cost = self.cfg.hash_cost;
        let plain = input.password.clone();
        let hash = tokio::task::spawn_blocking(move || password::hash_password(&plain, cost))
            .await
            .map_err(|e| ServiceError::internal(OP, e))?
            .map_err(|e| {
                error!(error = %e, "failed to generate password hash");
                e.context(OP)
            })?;

        let id = match self.store.save_user(&input.email, &hash, input.role).await {
            Ok(id) => id,
            Err(ServiceError::AlreadyExists) => {
                warn!("user already exists");
                return Err(ServiceError::AlreadyExists);
            }
            Err(e) => {
                error!(error = %e, "failed to save user");
                return Err(e.context(OP));
            }
        };

        info!(user_id = %id, "user_registered");
        Ok(RegisteredUser { id, email: input.email, role: input.role })
    }

    /// Authenticate a user and issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockCredentialStore};
    /// use service::auth::domain::{RegisterInput, LoginInput, Role};
    /// use service::auth::password::HashCost;
    /// use std::sync::Arc;
    /// let store = Arc::new(MockCredentialStore::default());
    /// let cfg = AuthConfig { jwt_secret: "secret".into(), token_ttl: chrono::Duration::hours(24), hash_cost: HashCost::minimal() };
    /// let svc = AuthService::new(store, cfg);
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { email: "u@e.com".into(), password: "Passw0rd".into(), role: Role::Admin }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.role, Role::Admin);
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(op = "service.auth.login", email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<LoggedUser, ServiceError> {
        const OP: &str = "service.auth.login";

        let user = match self.store.get_user(&input.email).await {
            Ok(user) => user,
            Err(ServiceError::NotFound(what)) => {
                warn!("user not found");
                return Err(ServiceError::NotFound(what));
            }
            Err(e) => {
                error!(error = %e, "failed to load user");
                return Err(e.context(OP));
            }
        };

        let phc = user.password_hash.clone();
        let plain = input.password;
        let matches = tokio::task::spawn_blocking(move || password::verify_password(&plain, &phc))
            .await
            .map_err(|e| ServiceError::internal(OP, e))?
            .map_err(|e| e.context(OP))?;
        if !matches {
            info!(user_id = %user.id, "invalid credentials");
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user).map_err(|e| {
            error!(error = %e, "failed to generate token");
            e.context(OP)
        })?;

        info!(user_id = %user.id, "user_logged_in");
        Ok(LoggedUser { id: user.id, email: user.email, role: user.role, token })
    }

    /// Validate a token issued by [`login`](Self::login).
    pub fn verify_token(&self, token: &str) -> Result<Claims, ServiceError> {
        self.tokens.verify(token)
    }
}
