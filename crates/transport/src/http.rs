use futures::future::BoxFuture;
use reqwest::{Client, Url};
use snafu::{ResultExt, ensure};

use crate::client::ChatTransport;
use crate::error::{
    BuildClientSnafu, InvalidEndpointSnafu, NetworkSnafu, ServerStatusSnafu, TransportError,
    TransportResult,
};
use crate::wire::{ChatReply, ChatRequest, ErrorDetail};

pub const HTTP_TRANSPORT_ID: &str = "http";

/// Posts each message as JSON to a fixed chat endpoint.
///
/// No timeout is configured: a request runs until the service answers or the
/// connection fails.
pub struct HttpChatTransport {
    client: Client,
    endpoint: Url,
}

impl HttpChatTransport {
    pub fn new(endpoint: &str) -> TransportResult<Self> {
        let endpoint = parse_endpoint(endpoint)?;
        let client = Client::builder().build().context(BuildClientSnafu {
            stage: "build-http-client",
        })?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn post(&self, text: &str, conversation_id: &str) -> TransportResult<String> {
        let request = ChatRequest::user(text, conversation_id);

        tracing::debug!(
            endpoint = %self.endpoint,
            conversation_id,
            message_len = text.len(),
            "posting chat message"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .context(NetworkSnafu {
                stage: "send-chat-request",
            })?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable error body is treated like one without a detail.
            let detail = match response.text().await {
                Ok(body) => ErrorDetail::from_body(&body),
                Err(error) => {
                    tracing::debug!(%error, "could not read error body");
                    None
                }
            };
            tracing::warn!(
                endpoint = %self.endpoint,
                status = status.as_u16(),
                detail = ?detail,
                "chat endpoint rejected message"
            );
            return ServerStatusSnafu {
                stage: "chat-http-status",
                status: status.as_u16(),
                detail,
            }
            .fail();
        }

        let body = response.text().await.context(NetworkSnafu {
            stage: "read-chat-response",
        })?;
        let reply = serde_json::from_str::<ChatReply>(&body).map_err(|source| {
            TransportError::MalformedResponse {
                stage: "decode-chat-reply",
                details: source.to_string(),
            }
        })?;

        tracing::debug!(
            conversation_id,
            reply_len = reply.response.len(),
            "chat reply received"
        );
        Ok(reply.response)
    }
}

impl ChatTransport for HttpChatTransport {
    fn id(&self) -> &str {
        HTTP_TRANSPORT_ID
    }

    fn send<'a>(
        &'a self,
        text: &'a str,
        conversation_id: &'a str,
    ) -> BoxFuture<'a, TransportResult<String>> {
        Box::pin(self.post(text, conversation_id))
    }
}

fn parse_endpoint(raw: &str) -> TransportResult<Url> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|source| TransportError::InvalidEndpoint {
        stage: "parse-endpoint",
        endpoint: trimmed.to_string(),
        details: source.to_string(),
    })?;

    ensure!(
        matches!(url.scheme(), "http" | "https"),
        InvalidEndpointSnafu {
            stage: "check-endpoint-scheme",
            endpoint: trimmed.to_string(),
            details: format!("unsupported scheme `{}`", url.scheme()),
        }
    );

    Ok(url)
}
