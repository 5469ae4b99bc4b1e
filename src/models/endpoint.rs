use crate::extractor::EXCLUDED_PATH_MARKER;
use std::fmt;

/// HTTP methods recognized under an OpenAPI path item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// Parse a path item key; any other key (e.g. `parameters`) yields `None`
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "patch" => Some(Self::Patch),
            "delete" => Some(Self::Delete),
            "head" => Some(Self::Head),
            "options" => Some(Self::Options),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Methods whose request is sent with a synthesized JSON body
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Methods whose response may carry the identifier of a created resource
    pub fn creates_resource(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }

    /// Name of the k6 `http` module function issuing this method
    pub fn k6_function(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "del",
            Self::Head => "head",
            Self::Options => "options",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One HTTP operation extracted from an OpenAPI document
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Raw path template, may contain `{name}` placeholders
    pub path: String,

    pub method: HttpMethod,

    /// The raw operation object (responses, requestBody, ...)
    pub operation: serde_json::Value,

    /// Declared operationId, or one derived from method and path
    pub operation_id: String,

    /// URL of the first declared server
    pub base_url: String,
}

impl Endpoint {
    /// Whether requests to this endpoint carry the bearer Authorization header
    pub fn requires_auth(&self) -> bool {
        !self.path.contains(EXCLUDED_PATH_MARKER)
    }
}
