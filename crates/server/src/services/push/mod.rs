//! Announcement push-notification delivery.
//!
//! Publishing an announcement hands it to the [`Dispatcher`], which fans the
//! notification out to every registered subscription in the background. The
//! publish request never waits on delivery.

mod sender;

pub use sender::WebPushSender;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;

use crate::db::RepositoryError;
use crate::models::{Announcement, PushSubscription};

/// The JSON payload delivered to push endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub icon: String,
}

impl NotificationPayload {
    /// Build the payload for a freshly published announcement.
    #[must_use]
    pub fn for_announcement(announcement: &Announcement, icon: &str) -> Self {
        Self {
            title: announcement.title.clone(),
            body: announcement.message.clone(),
            icon: icon.to_owned(),
        }
    }
}

/// How a single delivery attempt failed.
#[derive(Debug)]
pub enum DeliveryError {
    /// The endpoint no longer exists. The subscription should be removed.
    Gone,
    /// A failure that says nothing about the endpoint's long-term validity.
    Transient(String),
}

/// Delivers a payload to one subscription endpoint.
pub trait PushSender: Send + Sync + 'static {
    fn deliver<'a>(
        &'a self,
        subscription: &'a PushSubscription,
        payload: &'a NotificationPayload,
    ) -> Pin<Box<dyn Future<Output = Result<(), DeliveryError>> + Send + 'a>>;
}

/// The subscription registry as the dispatcher sees it.
pub trait SubscriptionStore: Send + Sync + 'static {
    fn list(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<PushSubscription>, RepositoryError>> + Send + '_>>;

    fn remove(
        &self,
        subscription: &PushSubscription,
    ) -> Pin<Box<dyn Future<Output = Result<(), RepositoryError>> + Send + '_>>;
}

/// Background fan-out of announcement notifications.
///
/// Each dispatch snapshots the registry, then attempts every endpoint
/// concurrently. Endpoints that report themselves permanently gone are
/// removed from the registry; transient failures are logged and dropped
/// without retry.
pub struct Dispatcher<S, R> {
    sender: Arc<S>,
    store: Arc<R>,
    icon: String,
}

impl<S, R> Clone for Dispatcher<S, R> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
            store: Arc::clone(&self.store),
            icon: self.icon.clone(),
        }
    }
}

impl<S: PushSender, R: SubscriptionStore> Dispatcher<S, R> {
    /// Create a dispatcher over a sender and a subscription registry.
    #[must_use]
    pub fn new(sender: S, store: R, icon: String) -> Self {
        Self {
            sender: Arc::new(sender),
            store: Arc::new(store),
            icon,
        }
    }

    /// Queue delivery of an announcement to all subscribers.
    ///
    /// Returns immediately; delivery happens on a background task. Failures
    /// are logged, never surfaced to the publisher.
    pub fn dispatch(&self, announcement: &Announcement) {
        let payload = NotificationPayload::for_announcement(announcement, &self.icon);
        let this = self.clone();

        tokio::spawn(async move {
            this.fan_out(payload).await;
        });
    }

    async fn fan_out(&self, payload: NotificationPayload) {
        let subscriptions = match self.store.list().await {
            Ok(subscriptions) => subscriptions,
            Err(error) => {
                tracing::error!(%error, "failed to load push subscriptions");
                return;
            }
        };

        if subscriptions.is_empty() {
            return;
        }

        tracing::info!(
            recipients = subscriptions.len(),
            title = %payload.title,
            "dispatching push notification"
        );

        let payload = Arc::new(payload);
        let mut attempts = JoinSet::new();

        for subscription in subscriptions {
            let sender = Arc::clone(&self.sender);
            let store = Arc::clone(&self.store);
            let payload = Arc::clone(&payload);

            attempts.spawn(async move {
                match sender.deliver(&subscription, &payload).await {
                    Ok(()) => {}
                    Err(DeliveryError::Gone) => {
                        tracing::info!(
                            endpoint = %subscription.endpoint,
                            "removing dead push subscription"
                        );
                        if let Err(error) = store.remove(&subscription).await {
                            tracing::warn!(%error, "failed to remove dead push subscription");
                        }
                    }
                    Err(DeliveryError::Transient(reason)) => {
                        tracing::warn!(
                            endpoint = %subscription.endpoint,
                            %reason,
                            "push delivery failed"
                        );
                    }
                }
            });
        }

        while attempts.join_next().await.is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::Utc;

    use angadi_core::SubscriptionId;

    fn subscription(id: i32, endpoint: &str) -> PushSubscription {
        PushSubscription {
            id: SubscriptionId::new(id),
            endpoint: endpoint.to_owned(),
            p256dh: "key".to_owned(),
            auth: "auth".to_owned(),
            created_at: Utc::now(),
        }
    }

    struct MemoryStore {
        subscriptions: Mutex<Vec<PushSubscription>>,
    }

    impl MemoryStore {
        fn new(subscriptions: Vec<PushSubscription>) -> Self {
            Self {
                subscriptions: Mutex::new(subscriptions),
            }
        }

        fn endpoints(&self) -> Vec<String> {
            self.subscriptions
                .lock()
                .unwrap()
                .iter()
                .map(|s| s.endpoint.clone())
                .collect()
        }
    }

    impl SubscriptionStore for MemoryStore {
        fn list(
            &self,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<PushSubscription>, RepositoryError>> + Send + '_>>
        {
            Box::pin(async move { Ok(self.subscriptions.lock().unwrap().clone()) })
        }

        fn remove(
            &self,
            subscription: &PushSubscription,
        ) -> Pin<Box<dyn Future<Output = Result<(), RepositoryError>> + Send + '_>> {
            let id = subscription.id;
            Box::pin(async move {
                self.subscriptions.lock().unwrap().retain(|s| s.id != id);
                Ok(())
            })
        }
    }

    /// Sender whose outcome per endpoint is scripted up front.
    struct ScriptedSender {
        outcomes: HashMap<String, Option<String>>,
        gone: Vec<String>,
        attempted: Mutex<Vec<String>>,
    }

    impl ScriptedSender {
        fn new() -> Self {
            Self {
                outcomes: HashMap::new(),
                gone: Vec::new(),
                attempted: Mutex::new(Vec::new()),
            }
        }

        fn succeed(mut self, endpoint: &str) -> Self {
            self.outcomes.insert(endpoint.to_owned(), None);
            self
        }

        fn fail_transient(mut self, endpoint: &str, reason: &str) -> Self {
            self.outcomes
                .insert(endpoint.to_owned(), Some(reason.to_owned()));
            self
        }

        fn fail_gone(mut self, endpoint: &str) -> Self {
            self.gone.push(endpoint.to_owned());
            self
        }
    }

    impl PushSender for ScriptedSender {
        fn deliver<'a>(
            &'a self,
            subscription: &'a PushSubscription,
            _payload: &'a NotificationPayload,
        ) -> Pin<Box<dyn Future<Output = Result<(), DeliveryError>> + Send + 'a>> {
            Box::pin(async move {
                self.attempted
                    .lock()
                    .unwrap()
                    .push(subscription.endpoint.clone());

                if self.gone.contains(&subscription.endpoint) {
                    return Err(DeliveryError::Gone);
                }

                match self.outcomes.get(&subscription.endpoint) {
                    Some(None) | None => Ok(()),
                    Some(Some(reason)) => Err(DeliveryError::Transient(reason.clone())),
                }
            })
        }
    }

    fn announcement() -> Announcement {
        Announcement {
            id: angadi_core::AnnouncementId::new(1),
            title: "Aadi sale".to_owned(),
            message: "Everything half off".to_owned(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_fan_out_attempts_every_subscription() {
        let store = MemoryStore::new(vec![
            subscription(1, "https://push.example/a"),
            subscription(2, "https://push.example/b"),
            subscription(3, "https://push.example/c"),
        ]);
        let sender = ScriptedSender::new()
            .succeed("https://push.example/a")
            .succeed("https://push.example/b")
            .succeed("https://push.example/c");

        let dispatcher = Dispatcher::new(sender, store, "/icon.png".to_owned());
        let payload = NotificationPayload::for_announcement(&announcement(), "/icon.png");
        dispatcher.fan_out(payload).await;

        let mut attempted = dispatcher.sender.attempted.lock().unwrap().clone();
        attempted.sort();
        assert_eq!(
            attempted,
            vec![
                "https://push.example/a",
                "https://push.example/b",
                "https://push.example/c",
            ]
        );
    }

    #[tokio::test]
    async fn test_gone_endpoints_are_removed() {
        let store = MemoryStore::new(vec![
            subscription(1, "https://push.example/alive"),
            subscription(2, "https://push.example/dead"),
        ]);
        let sender = ScriptedSender::new()
            .succeed("https://push.example/alive")
            .fail_gone("https://push.example/dead");

        let dispatcher = Dispatcher::new(sender, store, "/icon.png".to_owned());
        let payload = NotificationPayload::for_announcement(&announcement(), "/icon.png");
        dispatcher.fan_out(payload).await;

        assert_eq!(
            dispatcher.store.endpoints(),
            vec!["https://push.example/alive"]
        );
    }

    #[tokio::test]
    async fn test_transient_failures_keep_the_subscription() {
        let store = MemoryStore::new(vec![subscription(1, "https://push.example/flaky")]);
        let sender =
            ScriptedSender::new().fail_transient("https://push.example/flaky", "503 from push service");

        let dispatcher = Dispatcher::new(sender, store, "/icon.png".to_owned());
        let payload = NotificationPayload::for_announcement(&announcement(), "/icon.png");
        dispatcher.fan_out(payload).await;

        assert_eq!(
            dispatcher.store.endpoints(),
            vec!["https://push.example/flaky"]
        );
    }

    #[tokio::test]
    async fn test_empty_registry_is_a_no_op() {
        let store = MemoryStore::new(Vec::new());
        let sender = ScriptedSender::new();

        let dispatcher = Dispatcher::new(sender, store, "/icon.png".to_owned());
        let payload = NotificationPayload::for_announcement(&announcement(), "/icon.png");
        dispatcher.fan_out(payload).await;

        assert!(dispatcher.sender.attempted.lock().unwrap().is_empty());
    }

    #[test]
    fn test_payload_uses_announcement_fields() {
        let payload = NotificationPayload::for_announcement(&announcement(), "/badge.png");
        assert_eq!(payload.title, "Aadi sale");
        assert_eq!(payload.body, "Everything half off");
        assert_eq!(payload.icon, "/badge.png");
    }
}
