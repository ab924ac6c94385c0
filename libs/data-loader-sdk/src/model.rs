//! Request/response data model shared between the data-loader module and its
//! consumers.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::bundle::ModuleBundle;

/// Target engine family a data package is loaded for.
///
/// Affects which predictor the downstream engine selects once the module
/// bundle is swapped in, but is otherwise opaque to the loader — it only
/// participates in request identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineType {
    Desktop,
    Mobile,
}

/// A request to (re)load a data package.
///
/// `priority` and every other field participate in the request's
/// [`Fingerprint`]: two requests that differ only in `priority` are distinct
/// registry entries, since re-registering the same logical package at a new
/// priority is how callers promote or demote a pending reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub engine_type: EngineType,
    pub file_path: PathBuf,
    #[serde(default)]
    pub install_location: Option<PathBuf>,
    #[serde(with = "serde_bytes_as_vec")]
    pub magic_number: Vec<u8>,
    /// Non-negative; numerically lower means higher priority (0 is highest).
    pub priority: i32,
    /// Opaque extra fields that still participate in fingerprinting.
    #[serde(default)]
    pub extra: serde_json::Value,
}

impl Request {
    /// Convenience constructor for the common case of an ASCII magic number.
    #[must_use]
    pub fn new(engine_type: EngineType, file_path: impl Into<PathBuf>, magic: &str, priority: i32) -> Self {
        Self {
            engine_type,
            file_path: file_path.into(),
            install_location: None,
            magic_number: magic.as_bytes().to_vec(),
            priority,
            extra: serde_json::Value::Null,
        }
    }

    #[must_use]
    pub fn with_install_location(mut self, install_location: impl Into<PathBuf>) -> Self {
        self.install_location = Some(install_location.into());
        self
    }
}

mod serde_bytes_as_vec {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        bytes.to_vec().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        Vec::<u8>::deserialize(deserializer)
    }
}

/// Deterministic 64-bit identity derived from a request's canonical byte
/// image. `0` is reserved to mean "no request".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Fingerprint(pub u64);

impl Fingerprint {
    pub const NONE: Fingerprint = Fingerprint(0);

    #[must_use]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Wire-stable terminal outcome of a load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    ReloadReady,
    DataBroken,
    DataMissing,
    MmapFailure,
    InstallFailure,
}

/// Terminal outcome of a build, cached by fingerprint.
///
/// `request` is `None` only for [`ResponseStatus::DataMissing`], since that
/// status means the queried id never resolved to a registry entry — there is
/// no originating request to copy.
#[derive(Clone)]
pub struct Response {
    pub id: Fingerprint,
    pub status: ResponseStatus,
    pub request: Option<Request>,
    pub modules: Option<Arc<dyn ModuleBundle>>,
}

impl Response {
    #[must_use]
    pub fn data_missing(id: Fingerprint) -> Self {
        Self {
            id,
            status: ResponseStatus::DataMissing,
            request: None,
            modules: None,
        }
    }

    #[must_use]
    pub fn terminal(status: ResponseStatus, request: Request) -> Self {
        debug_assert!(status != ResponseStatus::ReloadReady, "use `ready` for success");
        Self {
            id: Fingerprint::NONE,
            status,
            request: Some(request),
            modules: None,
        }
    }

    #[must_use]
    pub fn ready(request: Request, modules: Arc<dyn ModuleBundle>) -> Self {
        Self {
            id: Fingerprint::NONE,
            status: ResponseStatus::ReloadReady,
            request: Some(request),
            modules: Some(modules),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: Fingerprint) -> Self {
        self.id = id;
        self
    }
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("id", &self.id)
            .field("status", &self.status)
            .field("has_modules", &self.modules.is_some())
            .finish()
    }
}
