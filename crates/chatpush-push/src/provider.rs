//! HTTPS push-delivery provider client
//!
//! POSTs a JSON message envelope to the provider's send endpoint and turns the
//! returned push ticket into a [`PushResult`].

use async_trait::async_trait;
use flate2::read::{GzDecoder, ZlibDecoder};
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::{ACCEPT, ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_TYPE};
use hyper::StatusCode;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde::Deserialize;
use std::io::Read;

use crate::prelude::*;
use chatpush_types::push_provider::{PushMessage, PushProvider, PushResult};

type HttpsClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;
type HttpClient = Client<HttpConnector, Full<Bytes>>;

/// Connector chosen by the endpoint scheme
enum Transport {
	Https(HttpsClient),
	Http(HttpClient),
}

/// Push provider reached over HTTP(S)
pub struct HttpPushProvider {
	endpoint: Box<str>,
	transport: Transport,
}

impl std::fmt::Debug for HttpPushProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HttpPushProvider").field("endpoint", &self.endpoint).finish_non_exhaustive()
	}
}

impl HttpPushProvider {
	/// Create a client for `endpoint`. HTTPS endpoints use the native root store.
	pub fn new(endpoint: impl Into<Box<str>>) -> ClResult<Self> {
		let endpoint = endpoint.into();

		let transport = if endpoint.starts_with("https://") {
			let connector = HttpsConnectorBuilder::new()
				.with_native_roots()
				.map_err(|e| Error::ConfigError(format!("TLS root store error: {}", e)))?
				.https_only()
				.enable_http1()
				.enable_http2()
				.build();
			Transport::Https(Client::builder(TokioExecutor::new()).build(connector))
		} else if endpoint.starts_with("http://") {
			Transport::Http(Client::builder(TokioExecutor::new()).build(HttpConnector::new()))
		} else {
			return Err(Error::ConfigError(format!("unsupported push endpoint '{}'", endpoint)));
		};

		Ok(Self { endpoint, transport })
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}
}

#[async_trait]
impl PushProvider for HttpPushProvider {
	async fn send(&self, message: &PushMessage) -> PushResult {
		let payload = match serde_json::to_vec(message) {
			Ok(payload) => payload,
			Err(e) => return PushResult::PermanentError(format!("Payload serialization error: {}", e)),
		};

		let request = match hyper::Request::builder()
			.method(hyper::Method::POST)
			.uri(&*self.endpoint)
			.header(ACCEPT, "application/json")
			.header(ACCEPT_ENCODING, "gzip, deflate")
			.header(CONTENT_TYPE, "application/json")
			.body(Full::new(Bytes::from(payload)))
		{
			Ok(req) => req,
			Err(e) => return PushResult::PermanentError(format!("Request build error: {}", e)),
		};

		let response = match &self.transport {
			Transport::Https(client) => client.request(request).await,
			Transport::Http(client) => client.request(request).await,
		};
		let response = match response {
			Ok(response) => response,
			Err(e) => return PushResult::TemporaryError(format!("Network error: {}", e)),
		};

		let status = response.status();
		let encoding = response
			.headers()
			.get(CONTENT_ENCODING)
			.and_then(|v| v.to_str().ok())
			.map(str::to_ascii_lowercase);

		let raw = match response.into_body().collect().await {
			Ok(body) => body.to_bytes(),
			Err(e) => return PushResult::TemporaryError(format!("Response read error: {}", e)),
		};
		let body = match decode_body(&raw, encoding.as_deref()) {
			Ok(body) => body,
			Err(e) => return PushResult::TemporaryError(format!("Response decode error: {}", e)),
		};

		debug!(status = %status, body = %String::from_utf8_lossy(&body), "Push provider response");
		parse_response(status, &body)
	}
}

/// Undo the response `Content-Encoding`
pub fn decode_body(raw: &[u8], encoding: Option<&str>) -> std::io::Result<Vec<u8>> {
	let mut out = Vec::new();
	match encoding {
		None | Some("identity") => out.extend_from_slice(raw),
		Some("gzip" | "x-gzip") => {
			GzDecoder::new(raw).read_to_end(&mut out)?;
		}
		Some("deflate") => {
			ZlibDecoder::new(raw).read_to_end(&mut out)?;
		}
		Some(other) => {
			return Err(std::io::Error::other(format!("unsupported content encoding '{}'", other)));
		}
	}
	Ok(out)
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
	#[serde(default)]
	data: Option<Tickets>,
	#[serde(default)]
	errors: Option<Vec<ProviderError>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Tickets {
	One(PushTicket),
	Many(Vec<PushTicket>),
}

#[derive(Debug, Deserialize)]
struct PushTicket {
	status: String,
	#[serde(default)]
	id: Option<Box<str>>,
	#[serde(default)]
	message: Option<String>,
	#[serde(default)]
	details: Option<TicketDetails>,
}

#[derive(Debug, Deserialize)]
struct TicketDetails {
	#[serde(default)]
	error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
	#[serde(default)]
	code: Option<String>,
	#[serde(default)]
	message: Option<String>,
}

/// Classify the provider's answer to a single-message send
pub fn parse_response(status: StatusCode, body: &[u8]) -> PushResult {
	if status.is_server_error() {
		return PushResult::TemporaryError(format!("HTTP {}", status));
	}

	let parsed: ProviderResponse = match serde_json::from_slice(body) {
		Ok(parsed) => parsed,
		Err(_) if !status.is_success() => {
			return PushResult::PermanentError(format!(
				"HTTP {}: {}",
				status,
				String::from_utf8_lossy(body)
			));
		}
		Err(e) => return PushResult::PermanentError(format!("Unexpected provider response: {}", e)),
	};

	if let Some(errors) = parsed.errors.filter(|errors| !errors.is_empty()) {
		let msg = errors
			.iter()
			.map(|e| {
				format!(
					"{}: {}",
					e.code.as_deref().unwrap_or("ERROR"),
					e.message.as_deref().unwrap_or("")
				)
			})
			.collect::<Vec<_>>()
			.join("; ");
		return if status == StatusCode::TOO_MANY_REQUESTS {
			PushResult::TemporaryError(msg)
		} else {
			PushResult::PermanentError(msg)
		};
	}

	let ticket = match parsed.data {
		Some(Tickets::One(ticket)) => ticket,
		Some(Tickets::Many(tickets)) => match tickets.into_iter().next() {
			Some(ticket) => ticket,
			None => return PushResult::PermanentError("Provider returned no ticket".into()),
		},
		None => return PushResult::PermanentError(format!("HTTP {}: no ticket", status)),
	};

	if ticket.status == "ok" {
		return PushResult::Success(ticket.id);
	}

	let message = ticket.message.unwrap_or_else(|| ticket.status.clone());
	match ticket.details.and_then(|d| d.error).as_deref() {
		Some("DeviceNotRegistered") => PushResult::DeviceNotRegistered,
		Some("MessageRateExceeded") => PushResult::TemporaryError(message),
		_ => PushResult::PermanentError(message),
	}
}


// vim: ts=4
