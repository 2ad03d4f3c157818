// models.rs
use crate::error::AppError;
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use url::Url;

/// Snapshot of a device's observable state.
///
/// The shape is owned by the concrete device type; everything outside the
/// device passes it through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusRecord(Map<String, Value>);

impl StatusRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn device_id(&self) -> Option<&str> {
        self.get("device_id").and_then(Value::as_str)
    }

}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionParam {
    /// Only known on the calling side; the wire carries values alone.
    pub name: Option<String>,
    pub value: String,
}

/// A named action with its parameters in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    action: String,
    params: Vec<ActionParam>,
}

impl ActionRequest {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push(ActionParam {
            name: Some(name.into()),
            value: value.to_string(),
        });
        self
    }

    /// Parse the raw, still percent-encoded path of
    /// `POST /<action>/<v1>/<v2>/...`. Each segment is decoded on its own and
    /// empty segments stay as empty values, so positions match the sender's.
    pub fn from_raw_path(path: &str) -> Result<Self, AppError> {
        let mut segments = path.strip_prefix('/').unwrap_or(path).split('/');
        let action = decode_segment(segments.next().unwrap_or_default())?;
        let params = segments
            .map(|segment| {
                decode_segment(segment).map(|value| ActionParam { name: None, value })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { action, params })
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// The value of an action that takes exactly one parameter.
    pub fn single_value(&self, name: &'static str) -> Result<&str, AppError> {
        match self.params.as_slice() {
            [] => Err(AppError::MissingParameter(name)),
            [param] => Ok(&param.value),
            _ => Err(AppError::Validation(format!(
                "{} takes a single {name} parameter, got {}",
                self.action,
                self.params.len()
            ))),
        }
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.value.as_str())
    }
}

fn decode_segment(segment: &str) -> Result<String, AppError> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|value| value.into_owned())
        .map_err(|_| AppError::Validation(format!("path segment {segment:?} is not UTF-8")))
}

impl fmt::Display for ActionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.action)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match &param.name {
                Some(name) => write!(f, "{}={}", name, param.value)?,
                None => f.write_str(&param.value)?,
            }
        }
        f.write_str(")")
    }
}

/// Where a device's HTTP surface listens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceAddress {
    pub host: String,
    pub port: u16,
}

impl DeviceAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse("http://localhost/")?;
        match self.host.parse::<IpAddr>() {
            Ok(ip) => url
                .set_ip_host(ip)
                .map_err(|()| url::ParseError::InvalidIpv6Address)?,
            Err(_) => url.set_host(Some(self.host.as_str()))?,
        }
        url.set_port(Some(self.port))
            .map_err(|()| url::ParseError::InvalidPort)?;
        Ok(url)
    }

    /// Base URL with `segments` appended, each percent-encoded on its own.
    pub fn url<I, S>(&self, segments: I) -> Result<Url, url::ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.base_url()?;
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid device address {0:?}, expected host:port")]
pub struct AddressParseError(String);

impl FromStr for DeviceAddress {
    type Err = AddressParseError;

    /// `host:port`, or `[v6]:port` for IPv6 hosts (brackets are dropped).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = match s.strip_prefix('[') {
            Some(rest) => rest.split_once("]:"),
            None => s.rsplit_once(':'),
        }
        .ok_or_else(|| AddressParseError(s.to_string()))?;
        if host.is_empty() {
            return Err(AddressParseError(s.to_string()));
        }
        let port = port.parse().map_err(|_| AddressParseError(s.to_string()))?;
        Ok(Self::new(host, port))
    }
}

/// Body returned when a device accepted an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub status: String,
}

impl Ack {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}
