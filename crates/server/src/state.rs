//! Application state shared across handlers.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::db::{RepositoryError, SubscriptionRepository};
use crate::models::PushSubscription;
use crate::services::auth::TokenService;
use crate::services::push::{Dispatcher, SubscriptionStore, WebPushSender};

/// Error constructing application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to initialize web push client: {0}")]
    WebPush(#[from] web_push::WebPushError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the database pool,
/// token service, and the optional push dispatcher.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    tokens: TokenService,
    push: Option<Dispatcher<WebPushSender, PgSubscriptionStore>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The push dispatcher is only constructed when VAPID keys are
    /// configured; without them announcements publish normally but no
    /// notifications go out.
    ///
    /// # Errors
    ///
    /// Returns an error if the web push client cannot be initialized.
    pub fn new(config: ServerConfig, pool: PgPool) -> Result<Self, StateError> {
        let tokens = TokenService::new(&config.token_secret);

        let push = match &config.push {
            Some(push_config) => {
                let sender = WebPushSender::new(push_config)?;
                let store = PgSubscriptionStore::new(pool.clone());
                Some(Dispatcher::new(
                    sender,
                    store,
                    config.notification_icon.clone(),
                ))
            }
            None => {
                tracing::warn!("VAPID keys not configured, push delivery disabled");
                None
            }
        };

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                tokens,
                push,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the token service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }

    /// Get the push dispatcher, if push delivery is configured.
    #[must_use]
    pub fn push(&self) -> Option<&Dispatcher<WebPushSender, PgSubscriptionStore>> {
        self.inner.push.as_ref()
    }
}

/// [`SubscriptionStore`] backed by the `push_subscription` table.
pub struct PgSubscriptionStore {
    pool: PgPool,
}

impl PgSubscriptionStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SubscriptionStore for PgSubscriptionStore {
    fn list(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<PushSubscription>, RepositoryError>> + Send + '_>>
    {
        Box::pin(async move { SubscriptionRepository::new(&self.pool).list().await })
    }

    fn remove(
        &self,
        subscription: &PushSubscription,
    ) -> Pin<Box<dyn Future<Output = Result<(), RepositoryError>> + Send + '_>> {
        let id = subscription.id;
        Box::pin(async move { SubscriptionRepository::new(&self.pool).remove(id).await })
    }
}
