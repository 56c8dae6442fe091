//! Identity service: validated forms in, session transitions out.
//!
//! HTTP handlers and the CLI are thin wrappers around this service. Every
//! method that changes the session returns a [`SessionUpdate`] carrying the
//! new mirror-cookie value.

use std::sync::Arc;

use tracing::{info, warn};

use super::forms::{FormSchema, LoginForm, PasswordForm, ProfileForm, RegisterForm};
use crate::application::ports::IdentityBackend;
use crate::application::session::AuthStore;
use crate::domain::{AuthResponse, AuthSession, User};
use crate::shared::{ApiError, AppError};

/// Session state after a transition, ready to be written to cookies.
#[derive(Debug, Clone)]
pub struct SessionUpdate {
    pub session: AuthSession,
    /// Value for the readable auth cookie.
    pub mirror: String,
    /// Refresh token captured from the backend, if any.
    pub refresh_token: Option<String>,
}

pub struct IdentityService<B: IdentityBackend> {
    backend: Arc<B>,
    store: Arc<AuthStore>,
}

impl<B: IdentityBackend> IdentityService<B> {
    pub fn new(backend: Arc<B>, store: Arc<AuthStore>) -> Self {
        Self { backend, store }
    }

    pub fn store(&self) -> &Arc<AuthStore> {
        &self.store
    }

    // ── Authentication ──────────────────────────────────────────

    pub async fn login(&self, form: LoginForm) -> Result<SessionUpdate, AppError> {
        let form = form.check()?;
        let response = self.backend.login(&form.into()).await?;
        info!(user_id = response.user.id, "user signed in");
        self.establish(response).await
    }

    /// Field rules and the password confirmation are checked before the
    /// backend is contacted.
    pub async fn register(&self, form: RegisterForm) -> Result<SessionUpdate, AppError> {
        let form = form.check()?;
        let response = self.backend.register(&form.into()).await?;
        info!(user_id = response.user.id, "user registered");
        self.establish(response).await
    }

    pub async fn refresh(&self) -> Result<SessionUpdate, AppError> {
        let response = match self.backend.refresh().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "token refresh failed, clearing session");
                self.store.logout().await?;
                return Err(match e {
                    ApiError::Status { status: 401, .. } => ApiError::Unauthorized.into(),
                    other => other.into(),
                });
            }
        };
        if let Some(user) = response.user {
            self.store.update_user(user).await?;
        }
        self.store.set_access_token(&response.access_token).await?;
        self.update().await
    }

    /// The local session is cleared even when the backend call fails.
    pub async fn logout(&self) -> Result<SessionUpdate, AppError> {
        if self.store.refresh_token().await?.is_some() || self.store.is_authenticated().await {
            if let Err(e) = self.backend.logout().await {
                warn!(error = %e, "backend logout failed");
            }
        }
        self.store.logout().await?;
        info!("user signed out");
        self.update().await
    }

    // ── Profile ─────────────────────────────────────────────────

    pub async fn current_user(&self) -> Result<User, AppError> {
        let user = self.backend.me().await?;
        self.store.update_user(user.clone()).await?;
        Ok(user)
    }

    pub async fn update_profile(&self, form: ProfileForm) -> Result<SessionUpdate, AppError> {
        let form = form.check()?;
        let user = self.backend.update_profile(&form.into()).await?;
        self.store.update_user(user).await?;
        self.update().await
    }

    pub async fn change_password(&self, form: PasswordForm) -> Result<(), AppError> {
        let form = form.check()?;
        self.backend.change_password(&form.into()).await?;
        info!("password changed");
        Ok(())
    }

    async fn establish(&self, response: AuthResponse) -> Result<SessionUpdate, AppError> {
        self.store
            .set_auth(response.user, &response.access_token)
            .await?;
        self.update().await
    }

    async fn update(&self) -> Result<SessionUpdate, AppError> {
        Ok(SessionUpdate {
            session: self.store.snapshot().await,
            mirror: self.store.mirror_value().await?,
            refresh_token: self.store.refresh_token().await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::application::dto::{
        ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest,
    };
    use crate::application::ports::ApiResult;
    use crate::domain::{session_from_cookie, RefreshResponse};
    use crate::infrastructure::storage::InMemoryStorage;

    #[derive(Default)]
    struct FakeBackend {
        calls: AtomicUsize,
        fail_refresh: bool,
        fail_logout: bool,
    }

    fn user(first_name: &str) -> User {
        User {
            id: 5,
            email: "user@example.kz".into(),
            first_name: first_name.into(),
            last_name: "Test".into(),
            role: "student".into(),
            university_id: None,
        }
    }

    #[async_trait]
    impl IdentityBackend for FakeBackend {
        async fn login(&self, _request: &LoginRequest) -> ApiResult<AuthResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(AuthResponse {
                access_token: "access-1".into(),
                user: user("Asel"),
            })
        }

        async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(AuthResponse {
                access_token: "access-reg".into(),
                user: user(&request.first_name),
            })
        }

        async fn refresh(&self) -> ApiResult<RefreshResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_refresh {
                return Err(ApiError::Status {
                    status: 401,
                    message: "expired".into(),
                });
            }
            Ok(RefreshResponse {
                access_token: "access-2".into(),
                user: None,
            })
        }

        async fn logout(&self) -> ApiResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_logout {
                return Err(ApiError::Transport("connection refused".into()));
            }
            Ok(())
        }

        async fn me(&self) -> ApiResult<User> {
            Ok(user("Me"))
        }

        async fn update_profile(&self, request: &UpdateProfileRequest) -> ApiResult<User> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(user(&request.first_name))
        }

        async fn change_password(&self, _request: &ChangePasswordRequest) -> ApiResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn service(backend: FakeBackend) -> IdentityService<FakeBackend> {
        let store = Arc::new(AuthStore::new(
            Arc::new(InMemoryStorage::new()),
            "client-auth-storage",
        ));
        IdentityService::new(Arc::new(backend), store)
    }

    #[tokio::test]
    async fn register_mismatch_never_reaches_backend() {
        let svc = service(FakeBackend::default());
        let err = svc
            .register(RegisterForm {
                first_name: "Aigul".into(),
                last_name: "Sadyk".into(),
                email: "aigul@example.kz".into(),
                password: "password1".into(),
                confirm_password: "password2".into(),
            })
            .await
            .unwrap_err();

        assert!(err.field_errors().unwrap().contains("confirmPassword"));
        assert_eq!(svc.backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn login_produces_authenticated_mirror() {
        let svc = service(FakeBackend::default());
        let update = svc
            .login(LoginForm {
                email: "user@example.kz".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();

        assert!(update.session.is_valid());
        let from_cookie = session_from_cookie(Some(&update.mirror));
        assert_eq!(from_cookie.access_token(), Some("access-1"));
    }

    #[tokio::test]
    async fn refresh_updates_token_and_failed_refresh_logs_out() {
        let svc = service(FakeBackend::default());
        svc.store.set_auth(user("Asel"), "access-1").await.unwrap();
        let update = svc.refresh().await.unwrap();
        assert_eq!(update.session.access_token(), Some("access-2"));
        assert_eq!(update.session.user.map(|u| u.first_name), Some("Asel".into()));

        let svc = service(FakeBackend {
            fail_refresh: true,
            ..Default::default()
        });
        svc.store.set_auth(user("Asel"), "access-1").await.unwrap();
        let err = svc.refresh().await.unwrap_err();
        assert!(matches!(err, AppError::Api(ApiError::Unauthorized)));
        assert!(!svc.store.is_authenticated().await);
    }

    #[tokio::test]
    async fn logout_clears_locally_when_backend_fails() {
        let svc = service(FakeBackend {
            fail_logout: true,
            ..Default::default()
        });
        svc.store.set_auth(user("Asel"), "access-1").await.unwrap();
        let update = svc.logout().await.unwrap();
        assert!(!update.session.is_valid());
        assert!(!session_from_cookie(Some(&update.mirror)).is_valid());
    }

    #[tokio::test]
    async fn profile_update_refreshes_stored_user() {
        let svc = service(FakeBackend::default());
        svc.store.set_auth(user("Old"), "access-1").await.unwrap();
        let update = svc
            .update_profile(ProfileForm {
                first_name: " Nurlan ".into(),
                last_name: "Abay".into(),
            })
            .await
            .unwrap();
        assert_eq!(update.session.user.as_ref().unwrap().first_name, "Nurlan");
        assert_eq!(update.session.access_token(), Some("access-1"));
    }
}
