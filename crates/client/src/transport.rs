use roborally_core::{RequestFailure, ResponseEnvelope};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// A non-200 answer is still `Ok`.
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<ResponseEnvelope, RequestFailure>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &ApiRequest) -> Result<ResponseEnvelope, RequestFailure> {
        (**self).send(request)
    }
}

pub struct HttpTransport {
    agent: ureq::Agent,
    api_base: String,
}

impl HttpTransport {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            api_base: api_base.into(),
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ResponseEnvelope, RequestFailure> {
        let url = format!("{}{}", self.api_base, request.path);
        tracing::debug!(method = %request.method, %url, "sending request");
        let call = self.agent.request(request.method.as_str(), &url);
        let result = match &request.body {
            Some(body) => call
                .set("content-type", "application/json")
                .send_string(&body.to_string()),
            None => call.call(),
        };
        match result {
            Ok(response) => read_envelope(response),
            Err(ureq::Error::Status(status, response)) => {
                let status_text = response.status_text().to_string();
                let body = response.into_string().unwrap_or_default();
                let message = if body.trim().is_empty() {
                    status_text
                } else {
                    body
                };
                Ok(ResponseEnvelope::failed(status, message))
            }
            Err(ureq::Error::Transport(err)) => Err(RequestFailure::Transport(err.to_string())),
        }
    }
}

fn read_envelope(response: ureq::Response) -> Result<ResponseEnvelope, RequestFailure> {
    let status = response.status();
    let status_text = response.status_text().to_string();
    let body = response
        .into_string()
        .map_err(|err| RequestFailure::Transport(err.to_string()))?;
    // The server answers some failures with an empty 200 body.
    let data = if body.trim().is_empty() {
        None
    } else {
        serde_json::from_str::<Value>(&body).ok()
    };
    Ok(ResponseEnvelope {
        status,
        message: Some(status_text),
        data,
    })
}
