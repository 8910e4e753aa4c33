//! Registry payload: `{"application": {"instance": <record or [record]>}}`.
//! The object-or-array shape is decoded into `InstancePayload` and flattened to a `Vec` of raw
//! records right away. Records are only decoded into `Instance` after the status filter, so an
//! incomplete record in another state never fails a lookup.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

use crate::EurekaError;

/// Lifecycle state reported by an instance. Unknown values are kept verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum InstanceStatus {
    #[default]
    Up,
    Down,
    Starting,
    OutOfService,
    Unknown,
    Other(String),
}

impl InstanceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            InstanceStatus::Up => "UP",
            InstanceStatus::Down => "DOWN",
            InstanceStatus::Starting => "STARTING",
            InstanceStatus::OutOfService => "OUT_OF_SERVICE",
            InstanceStatus::Unknown => "UNKNOWN",
            InstanceStatus::Other(s) => s,
        }
    }
}

impl From<&str> for InstanceStatus {
    fn from(s: &str) -> Self {
        match s {
            "UP" => InstanceStatus::Up,
            "DOWN" => InstanceStatus::Down,
            "STARTING" => InstanceStatus::Starting,
            "OUT_OF_SERVICE" => InstanceStatus::OutOfService,
            "UNKNOWN" => InstanceStatus::Unknown,
            other => InstanceStatus::Other(other.to_owned()),
        }
    }
}

impl From<String> for InstanceStatus {
    fn from(s: String) -> Self {
        InstanceStatus::from(s.as_str())
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for InstanceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InstanceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(InstanceStatus::from)
    }
}

/// `{"$": "8080"}` or `{"$": 8080}`. The digits are kept exactly as the registry sent them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    #[serde(rename = "$", deserialize_with = "port_digits")]
    pub value: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortValue {
    Number(u64),
    Text(String),
}

fn port_digits<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = match PortValue::deserialize(deserializer)? {
        PortValue::Number(n) => n.to_string(),
        PortValue::Text(s) => s,
    };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(de::Error::custom(format!("invalid port {:?}", raw)));
    }
    Ok(raw)
}

/// One registered instance. Registry fields without a typed slot are kept in `extra`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub host_name: String,
    pub status: InstanceStatus,
    pub port: Port,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_addr: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Instance {
    /// `http://<hostName>:<port>`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host_name, self.port.value)
    }
}

/// `application.instance`: a single record or a list of them, still undecoded.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum InstancePayload {
    Many(Vec<Value>),
    One(Value),
}

impl InstancePayload {
    pub fn into_vec(self) -> Vec<Value> {
        match self {
            InstancePayload::One(record) => vec![record],
            InstancePayload::Many(records) => records,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Application {
    #[serde(default)]
    pub name: Option<String>,
    pub instance: InstancePayload,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RegistryResponse {
    pub application: Application,
}

impl RegistryResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, EurekaError> {
        Ok(serde_json::from_slice(body)?)
    }

    pub fn into_records(self) -> Vec<Value> {
        self.application.instance.into_vec()
    }
}

fn status_of(record: &Value) -> Option<&str> {
    record.get("status").and_then(Value::as_str)
}

/// Records in `status`, in their original order, decoded into `Instance`.
/// Only `status` is read from the others; a record without one never matches.
pub fn filter_by_status(
    records: Vec<Value>,
    status: &InstanceStatus,
) -> Result<Vec<Instance>, EurekaError> {
    records
        .into_iter()
        .filter(|record| status_of(record) == Some(status.as_str()))
        .map(|record| serde_json::from_value(record).map_err(EurekaError::from))
        .collect()
}
