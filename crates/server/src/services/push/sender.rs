//! Web Push delivery over the `web-push` crate.

use std::future::Future;
use std::pin::Pin;

use secrecy::ExposeSecret;
use web_push::{
    ContentEncoding, SubscriptionInfo, VapidSignatureBuilder, WebPushClient, WebPushError,
    WebPushMessageBuilder,
};

use crate::config::PushConfig;
use crate::models::PushSubscription;

use super::{DeliveryError, NotificationPayload, PushSender};

/// [`PushSender`] backed by a real Web Push client with VAPID signing.
pub struct WebPushSender {
    client: WebPushClient,
    vapid_private_key: String,
    subject: String,
}

impl WebPushSender {
    /// Create a sender from the VAPID configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &PushConfig) -> Result<Self, WebPushError> {
        let client = WebPushClient::new()?;

        Ok(Self {
            client,
            vapid_private_key: config.private_key.expose_secret().to_owned(),
            subject: config.subject.clone(),
        })
    }

    async fn send(
        &self,
        subscription: &PushSubscription,
        payload: &NotificationPayload,
    ) -> Result<(), DeliveryError> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| DeliveryError::Transient(format!("payload serialization: {e}")))?;

        let info = SubscriptionInfo::new(
            subscription.endpoint.clone(),
            subscription.p256dh.clone(),
            subscription.auth.clone(),
        );

        let mut signature = VapidSignatureBuilder::from_base64(
            &self.vapid_private_key,
            web_push::URL_SAFE_NO_PAD,
            &info,
        )
        .map_err(classify)?;
        signature.add_claim("sub", self.subject.as_str());

        let mut message = WebPushMessageBuilder::new(&info).map_err(classify)?;
        message.set_payload(ContentEncoding::Aes128Gcm, &body);
        message.set_vapid_signature(signature.build().map_err(classify)?);

        self.client
            .send(message.build().map_err(classify)?)
            .await
            .map_err(classify)
    }
}

impl PushSender for WebPushSender {
    fn deliver<'a>(
        &'a self,
        subscription: &'a PushSubscription,
        payload: &'a NotificationPayload,
    ) -> Pin<Box<dyn Future<Output = Result<(), DeliveryError>> + Send + 'a>> {
        Box::pin(self.send(subscription, payload))
    }
}

/// Map a Web Push failure onto the dispatcher's gone/transient split.
///
/// Only a 404 or 410 from the push service means the endpoint itself is
/// dead; everything else could succeed on a later announcement.
fn classify(error: WebPushError) -> DeliveryError {
    match error {
        WebPushError::EndpointNotFound | WebPushError::EndpointNotValid => DeliveryError::Gone,
        other => DeliveryError::Transient(other.to_string()),
    }
}
