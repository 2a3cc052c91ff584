use std::sync::Arc;
use std::time::Duration;

use super::{Connection, Message, Method, ReqwestTransport, Sms, SmsError};
use crate::domain::{
    AccountName, AddSender, Endpoint, IncomingFilter, OutgoingFilter, SenderName, SmsId, SmsType,
    ValidationError,
};

#[derive(Debug, Clone)]
/// Builder for [`SmsApi`].
///
/// Use this when you need to customize the HTTP client, timeout, or user-agent.
pub struct SmsApiBuilder {
    application_key: String,
    application_secret: String,
    consumer_key: String,
    endpoint: Option<String>,
    http_client: Option<reqwest::Client>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SmsApiBuilder {
    pub fn new(
        application_key: impl Into<String>,
        application_secret: impl Into<String>,
        consumer_key: impl Into<String>,
    ) -> Self {
        Self {
            application_key: application_key.into(),
            application_secret: application_secret.into(),
            consumer_key: consumer_key.into(),
            endpoint: None,
            http_client: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Endpoint name (`ovh-eu`, `ovh-ca`, ...) or absolute base URL. Required.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Reuse an existing HTTP client. `timeout` and `user_agent` are then ignored.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`SmsApi`]. The endpoint is checked before anything else.
    pub fn build(self) -> Result<SmsApi, SmsError> {
        let endpoint = Endpoint::new(self.endpoint.unwrap_or_default())?;

        let client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                builder
                    .build()
                    .map_err(|err| SmsError::Transport(Box::new(err)))?
            }
        };

        Ok(SmsApi::from_connection(Connection::new(
            self.application_key,
            self.application_secret,
            self.consumer_key,
            endpoint,
            Arc::new(ReqwestTransport { client }),
        )))
    }
}

#[derive(Debug, Clone)]
/// Entry point of the SMS API.
///
/// Holds a shared [`Connection`] and the currently selected SMS account. Clones
/// share the connection but carry their own account selection.
///
/// ```rust,no_run
/// use ovh_sms::SmsApi;
///
/// # async fn run() -> Result<(), ovh_sms::SmsError> {
/// let mut api = SmsApi::new("app_key", "app_secret", "ovh-eu", "consumer_key", None)?;
/// api.set_account("sms-ab12345-1")?;
///
/// let mut message = api.create_message(false);
/// message.set_sender("ACME")?;
/// message.add_receiver("+33612345678")?;
/// message.set_text("Your parcel has shipped")?;
/// let response = message.send().await?;
/// println!("sent: {:?}", response.ids);
/// # Ok(())
/// # }
/// ```
pub struct SmsApi {
    connection: Arc<Connection>,
    account: Option<AccountName>,
}

impl SmsApi {
    /// Create an API handle.
    ///
    /// Fails when `endpoint` is empty; credentials are only checked by the API itself.
    /// When `http_client` is `None` a default client is created.
    pub fn new(
        application_key: impl Into<String>,
        application_secret: impl Into<String>,
        endpoint: impl Into<String>,
        consumer_key: impl Into<String>,
        http_client: Option<reqwest::Client>,
    ) -> Result<Self, ValidationError> {
        let endpoint = Endpoint::new(endpoint)?;
        let client = http_client.unwrap_or_default();

        Ok(Self::from_connection(Connection::new(
            application_key.into(),
            application_secret.into(),
            consumer_key.into(),
            endpoint,
            Arc::new(ReqwestTransport { client }),
        )))
    }

    /// Start building an API handle with custom settings.
    pub fn builder(
        application_key: impl Into<String>,
        application_secret: impl Into<String>,
        consumer_key: impl Into<String>,
    ) -> SmsApiBuilder {
        SmsApiBuilder::new(application_key, application_secret, consumer_key)
    }

    pub(super) fn from_connection(connection: Connection) -> Self {
        Self {
            connection: Arc::new(connection),
            account: None,
        }
    }

    /// The shared signed connection (not a copy).
    pub fn connection(&self) -> &Arc<Connection> {
        &self.connection
    }

    /// Select the SMS account used by every account-scoped call.
    pub fn set_account(&mut self, account: impl Into<String>) -> Result<(), ValidationError> {
        self.account = Some(AccountName::new(account)?);
        Ok(())
    }

    pub fn account(&self) -> Option<&AccountName> {
        self.account.as_ref()
    }

    pub(super) fn require_account(&self) -> Result<&AccountName, ValidationError> {
        self.account.as_ref().ok_or(ValidationError::AccountNotSet)
    }

    /// Start a new outgoing message.
    ///
    /// With `for_response`, the message is sent from a number receivers can answer
    /// and an explicit sender is refused.
    pub fn create_message(&self, for_response: bool) -> Message<'_> {
        Message::new(self, for_response)
    }

    /// List the SMS accounts visible to these credentials.
    pub async fn get_accounts(&self) -> Result<Vec<String>, SmsError> {
        let body = self.connection.call_raw(Method::Get, "/sms", &[], None).await?;
        crate::transport::decode_name_list_json_response(&body)
            .map_err(|err| SmsError::Parse(Box::new(err)))
    }

    /// List the senders registered on the selected account.
    pub async fn get_senders(&self) -> Result<Vec<String>, SmsError> {
        let account = self.require_account()?;
        let path = format!("/sms/{account}/senders");
        let body = self.connection.call_raw(Method::Get, &path, &[], None).await?;
        crate::transport::decode_name_list_json_response(&body)
            .map_err(|err| SmsError::Parse(Box::new(err)))
    }

    /// Ask for a new sender on the selected account.
    ///
    /// The sender has to be validated by the vendor before it can be used.
    pub async fn add_sender(
        &self,
        sender: impl Into<String>,
        reason: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), SmsError> {
        let account = self.require_account()?;
        let request = AddSender::new(SenderName::new(sender)?, reason, description);
        let body = crate::transport::encode_add_sender_body(&request)
            .map_err(|err| SmsError::Parse(Box::new(err)))?;

        let path = format!("/sms/{account}/senders");
        let response = self
            .connection
            .call_raw(Method::Post, &path, &[], Some(body))
            .await?;
        tracing::debug!(%account, sender = request.sender().as_str(), "sender registration requested");
        crate::transport::decode_ignored_json_response(&response)
            .map_err(|err| SmsError::Parse(Box::new(err)))
    }

    /// List received messages matching `filter`.
    pub async fn get_incoming_messages(
        &self,
        filter: &IncomingFilter,
    ) -> Result<Vec<Sms<'_>>, SmsError> {
        let query = crate::transport::encode_incoming_query(filter);
        let ids = self.list_ids("incoming", &query).await?;
        Ok(ids
            .into_iter()
            .map(|id| Sms::from_parts(self, SmsType::Incoming, id))
            .collect())
    }

    /// List sent messages matching `filter`.
    pub async fn get_outgoing_messages(
        &self,
        filter: &OutgoingFilter,
    ) -> Result<Vec<Sms<'_>>, SmsError> {
        let query = crate::transport::encode_outgoing_query(filter);
        let ids = self.list_ids("outgoing", &query).await?;
        Ok(ids
            .into_iter()
            .map(|id| Sms::from_parts(self, SmsType::Outgoing, id))
            .collect())
    }

    /// Ids of jobs scheduled for later delivery.
    pub async fn get_planned_messages(&self) -> Result<Vec<SmsId>, SmsError> {
        self.list_ids("jobs", &[]).await
    }

    async fn list_ids(
        &self,
        collection: &str,
        query: &[(String, String)],
    ) -> Result<Vec<SmsId>, SmsError> {
        let account = self.require_account()?;
        let path = format!("/sms/{account}/{collection}");
        let body = self
            .connection
            .call_raw(Method::Get, &path, query, None)
            .await?;
        crate::transport::decode_id_list_json_response(&body)
            .map_err(|err| SmsError::Parse(Box::new(err)))
    }
}
