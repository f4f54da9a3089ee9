use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const STATUS_SUCCESS: &str = "success";

/// Envelope every peer service answers with.
///
/// A failed remote operation is still a well-formed `RemoteCallResult`: callers
/// look at [`is_success`](Self::is_success) instead of expecting an `Err`.
/// `T` defaults to raw JSON so the payload can be decoded later with
/// [`decode_result`](RemoteCallResult::decode_result).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteCallResult<T = serde_json::Value> {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub result: Option<T>,
    /// HTTP status of the response this was decoded from. `None` when the
    /// result was produced locally without a round-trip.
    #[serde(skip)]
    pub http_status: Option<u16>,
}

impl<T> RemoteCallResult<T> {
    /// Result for a call that was answered locally, e.g. a bulk lookup with no ids.
    pub fn local_success(message: impl Into<String>, result: T) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: message.into(),
            code: 0,
            error: String::new(),
            result: Some(result),
            http_status: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_SUCCESS)
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// What the peer said went wrong, if the operation failed.
    pub fn failure_reason(&self) -> Option<&str> {
        if self.is_success() {
            return None;
        }
        if !self.error.is_empty() {
            Some(&self.error)
        } else if !self.message.is_empty() {
            Some(&self.message)
        } else {
            Some(&self.status)
        }
    }

    pub fn map_result<U, F: FnOnce(T) -> U>(self, f: F) -> RemoteCallResult<U> {
        RemoteCallResult {
            status: self.status,
            message: self.message,
            code: self.code,
            error: self.error,
            result: self.result.map(f),
            http_status: self.http_status,
        }
    }
}

impl RemoteCallResult<serde_json::Value> {
    /// Decodes the opaque payload into the shape a call site expects.
    pub fn decode_result<U: DeserializeOwned>(&self) -> serde_json::Result<Option<U>> {
        match &self.result {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => U::deserialize(value).map(Some),
        }
    }

    /// Converts to a typed envelope.
    ///
    /// A success payload that does not fit `U` is an error. On failure the
    /// payload is best effort: peers often send `{}` or partial data there, so
    /// a mismatch drops it instead of failing the call.
    pub fn into_typed<U: DeserializeOwned>(self) -> serde_json::Result<RemoteCallResult<U>> {
        let result = match self.decode_result::<U>() {
            Ok(result) => result,
            Err(e) if self.is_success() => return Err(e),
            Err(_) => None,
        };

        Ok(RemoteCallResult {
            status: self.status,
            message: self.message,
            code: self.code,
            error: self.error,
            result,
            http_status: self.http_status,
        })
    }
}

/// Most peers wrap their payload as `"result": {"data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Data<T> {
    pub data: T,
}
