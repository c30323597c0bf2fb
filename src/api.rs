use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{
    normalize_reminders, NewSubscription, Reminder, ReminderRecord, Subscription,
    SubscriptionPatch, SubscriptionRecord, Summary, SummaryRecord,
};

/// The subscription backend, one method per endpoint.
#[async_trait(?Send)]
pub trait Backend {
    async fn summary(&self) -> Result<Summary, ApiError>;

    async fn reminders(&self) -> Result<Vec<Reminder>, ApiError>;

    async fn subscriptions(&self) -> Result<Vec<Subscription>, ApiError>;

    async fn create_subscription(&self, payload: &NewSubscription)
        -> Result<Subscription, ApiError>;

    async fn update_subscription(
        &self,
        id: i64,
        payload: &SubscriptionPatch,
    ) -> Result<Subscription, ApiError>;

    /// The response body is ignored.
    async fn cancel_subscription(&self, id: i64) -> Result<(), ApiError>;

    /// The response body is ignored.
    async fn pay_instance(&self, id: i64, instance_id: i64) -> Result<(), ApiError>;
}

/// `Backend` over `fetch`. No retries and no timeouts.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpBackend {
    config: AppConfig,
}

impl HttpBackend {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    async fn send(&self, label: &str, request: Request) -> Result<Response, ApiError> {
        debug!("{} {}", label, request.url());
        let response = request.send().await.map_err(|err| {
            warn!("{} failed before a response arrived: {}", label, err);
            ApiError::from(err)
        })?;

        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status, &body);
        warn!("{} answered {}: {:?}", label, status, err.server_message());
        Err(err)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = Request::get(&self.url(path)).build()?;
        let response = self.send("GET", request).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_json<B, T>(
        &self,
        builder: RequestBuilder,
        label: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = builder.json(body)?;
        let response = self.send(label, request).await?;
        Ok(response.json::<T>().await?)
    }

    async fn patch_empty(&self, path: &str) -> Result<(), ApiError> {
        let request = Request::patch(&self.url(path))
            .header("Content-Type", "application/json")
            .build()?;
        self.send("PATCH", request).await.map(|_| ())
    }
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn summary(&self) -> Result<Summary, ApiError> {
        let record: SummaryRecord = self.get_json("/summary").await?;
        Ok(record.into())
    }

    async fn reminders(&self) -> Result<Vec<Reminder>, ApiError> {
        let records: Vec<ReminderRecord> = self.get_json("/reminders").await?;
        Ok(normalize_reminders(records))
    }

    async fn subscriptions(&self) -> Result<Vec<Subscription>, ApiError> {
        let records: Vec<SubscriptionRecord> = self.get_json("/subscriptions").await?;
        Ok(records.into_iter().map(Subscription::from).collect())
    }

    async fn create_subscription(
        &self,
        payload: &NewSubscription,
    ) -> Result<Subscription, ApiError> {
        let builder = Request::post(&self.url("/subscriptions"));
        let record: SubscriptionRecord = self.send_json(builder, "POST", payload).await?;
        Ok(record.into())
    }

    async fn update_subscription(
        &self,
        id: i64,
        payload: &SubscriptionPatch,
    ) -> Result<Subscription, ApiError> {
        let builder = Request::patch(&self.url(&format!("/subscriptions/{id}")));
        let record: SubscriptionRecord = self.send_json(builder, "PATCH", payload).await?;
        Ok(record.into())
    }

    async fn cancel_subscription(&self, id: i64) -> Result<(), ApiError> {
        self.patch_empty(&format!("/subscriptions/{id}/cancel")).await
    }

    async fn pay_instance(&self, id: i64, instance_id: i64) -> Result<(), ApiError> {
        self.patch_empty(&format!("/subscriptions/{id}/instances/{instance_id}/pay"))
            .await
    }
}
