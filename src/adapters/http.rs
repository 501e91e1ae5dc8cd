use std::pin::Pin;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::ports::BackendApi;
use crate::types::subscription::{SubscriptionJson, SubscriptionRecord};

const CSRF_HEADER: &str = "X-CSRFToken";

/// The backend REST API over HTTP. Mutating endpoints carry the CSRF
/// header when a token is configured.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    vapid_url: Url,
    subscribe_url: Url,
    unsubscribe_url: Url,
    subscriptions_url: Url,
    csrf_token: Option<String>,
}

#[derive(Deserialize)]
struct VapidKeyResponse {
    #[serde(rename = "vapidPublicKey")]
    vapid_public_key: String,
}

#[derive(Deserialize)]
struct SubscriptionsResponse {
    subscriptions: Vec<SubscriptionRecord>,
}

#[derive(Serialize)]
struct SubscriptionBody<'a> {
    subscription: &'a SubscriptionJson,
}

impl HttpBackend {
    pub fn new(base: &Url, csrf_token: Option<String>) -> Result<Self, url::ParseError> {
        Ok(Self {
            client: reqwest::Client::new(),
            vapid_url: base.join("/push/vapid_public_key/")?,
            subscribe_url: base.join("/push/subscribe/")?,
            unsubscribe_url: base.join("/push/unsubscribe/")?,
            subscriptions_url: base.join("/push/subscriptions/")?,
            csrf_token,
        })
    }

    fn post_subscription<'a>(
        &'a self,
        url: &'a Url,
        subscription: &'a SubscriptionJson,
    ) -> Pin<Box<dyn Future<Output = Result<(), reqwest::Error>> + Send + 'a>> {
        Box::pin(async move {
            let mut request = self
                .client
                .post(url.clone())
                .json(&SubscriptionBody { subscription });
            if let Some(token) = self.csrf_token.as_deref() {
                request = request.header(CSRF_HEADER, token);
            }
            request.send().await?.error_for_status()?;
            Ok(())
        })
    }
}

impl BackendApi for HttpBackend {
    type Error = reqwest::Error;
    type KeyFut<'a>
        = Pin<Box<dyn Future<Output = Result<String, Self::Error>> + Send + 'a>>
    where
        Self: 'a;
    type AckFut<'a>
        = Pin<Box<dyn Future<Output = Result<(), Self::Error>> + Send + 'a>>
    where
        Self: 'a;
    type ListFut<'a>
        = Pin<Box<dyn Future<Output = Result<Vec<SubscriptionRecord>, Self::Error>> + Send + 'a>>
    where
        Self: 'a;

    fn vapid_public_key<'a>(&'a self) -> Self::KeyFut<'a> {
        Box::pin(async move {
            let response = self
                .client
                .get(self.vapid_url.clone())
                .send()
                .await?
                .error_for_status()?;
            let body: VapidKeyResponse = response.json().await?;
            Ok(body.vapid_public_key)
        })
    }

    fn register<'a>(&'a self, subscription: &'a SubscriptionJson) -> Self::AckFut<'a> {
        self.post_subscription(&self.subscribe_url, subscription)
    }

    fn deregister<'a>(&'a self, subscription: &'a SubscriptionJson) -> Self::AckFut<'a> {
        self.post_subscription(&self.unsubscribe_url, subscription)
    }

    fn subscriptions<'a>(&'a self) -> Self::ListFut<'a> {
        Box::pin(async move {
            let response = self
                .client
                .get(self.subscriptions_url.clone())
                .send()
                .await?
                .error_for_status()?;
            let body: SubscriptionsResponse = response.json().await?;
            Ok(body.subscriptions)
        })
    }
}
