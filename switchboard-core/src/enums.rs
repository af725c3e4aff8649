//! Enum types for Switchboard entities.
//!
//! Wire representations are SCREAMING_SNAKE_CASE to match the control
//! plane's GraphQL enum values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a gateway API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiKeyStatus {
    Enabled,
    Disabled,
    Expired,
    Exhausted,
}

impl ApiKeyStatus {
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            ApiKeyStatus::Enabled => "ENABLED",
            ApiKeyStatus::Disabled => "DISABLED",
            ApiKeyStatus::Expired => "EXPIRED",
            ApiKeyStatus::Exhausted => "EXHAUSTED",
        }
    }

    pub fn all() -> &'static [ApiKeyStatus] {
        &[
            ApiKeyStatus::Enabled,
            ApiKeyStatus::Disabled,
            ApiKeyStatus::Expired,
            ApiKeyStatus::Exhausted,
        ]
    }
}

impl fmt::Display for ApiKeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire_str())
    }
}

impl FromStr for ApiKeyStatus {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ENABLED" => Ok(ApiKeyStatus::Enabled),
            "DISABLED" => Ok(ApiKeyStatus::Disabled),
            "EXPIRED" => Ok(ApiKeyStatus::Expired),
            "EXHAUSTED" => Ok(ApiKeyStatus::Exhausted),
            _ => Err(EnumParseError::new("api key status", s)),
        }
    }
}

/// Status of an upstream provider channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChannelStatus {
    Enabled,
    Disabled,
    /// Disabled automatically after repeated upstream failures.
    AutoDisabled,
}

impl ChannelStatus {
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            ChannelStatus::Enabled => "ENABLED",
            ChannelStatus::Disabled => "DISABLED",
            ChannelStatus::AutoDisabled => "AUTO_DISABLED",
        }
    }

    pub fn all() -> &'static [ChannelStatus] {
        &[
            ChannelStatus::Enabled,
            ChannelStatus::Disabled,
            ChannelStatus::AutoDisabled,
        ]
    }
}

impl fmt::Display for ChannelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire_str())
    }
}

impl FromStr for ChannelStatus {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ENABLED" => Ok(ChannelStatus::Enabled),
            "DISABLED" => Ok(ChannelStatus::Disabled),
            "AUTO_DISABLED" => Ok(ChannelStatus::AutoDisabled),
            _ => Err(EnumParseError::new("channel status", s)),
        }
    }
}

/// Upstream provider family a channel speaks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChannelKind {
    Openai,
    Anthropic,
    AzureOpenai,
    Gemini,
    Bedrock,
    Custom,
}

impl ChannelKind {
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            ChannelKind::Openai => "OPENAI",
            ChannelKind::Anthropic => "ANTHROPIC",
            ChannelKind::AzureOpenai => "AZURE_OPENAI",
            ChannelKind::Gemini => "GEMINI",
            ChannelKind::Bedrock => "BEDROCK",
            ChannelKind::Custom => "CUSTOM",
        }
    }

    pub fn all() -> &'static [ChannelKind] {
        &[
            ChannelKind::Openai,
            ChannelKind::Anthropic,
            ChannelKind::AzureOpenai,
            ChannelKind::Gemini,
            ChannelKind::Bedrock,
            ChannelKind::Custom,
        ]
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire_str())
    }
}

impl FromStr for ChannelKind {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OPENAI" => Ok(ChannelKind::Openai),
            "ANTHROPIC" => Ok(ChannelKind::Anthropic),
            "AZURE_OPENAI" => Ok(ChannelKind::AzureOpenai),
            "GEMINI" => Ok(ChannelKind::Gemini),
            "BEDROCK" => Ok(ChannelKind::Bedrock),
            "CUSTOM" => Ok(ChannelKind::Custom),
            _ => Err(EnumParseError::new("channel kind", s)),
        }
    }
}

/// Status of a console user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Active,
    Suspended,
}

impl UserStatus {
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Suspended => "SUSPENDED",
        }
    }

    pub fn all() -> &'static [UserStatus] {
        &[UserStatus::Active, UserStatus::Suspended]
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire_str())
    }
}

impl FromStr for UserStatus {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(UserStatus::Active),
            "SUSPENDED" => Ok(UserStatus::Suspended),
            _ => Err(EnumParseError::new("user status", s)),
        }
    }
}

/// Role of a console user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Viewer,
    Operator,
    Admin,
}

impl UserRole {
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            UserRole::Viewer => "VIEWER",
            UserRole::Operator => "OPERATOR",
            UserRole::Admin => "ADMIN",
        }
    }

    pub fn all() -> &'static [UserRole] {
        &[UserRole::Viewer, UserRole::Operator, UserRole::Admin]
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire_str())
    }
}

impl FromStr for UserRole {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "VIEWER" => Ok(UserRole::Viewer),
            "OPERATOR" => Ok(UserRole::Operator),
            "ADMIN" => Ok(UserRole::Admin),
            _ => Err(EnumParseError::new("user role", s)),
        }
    }
}

/// Outcome of a proxied gateway request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TraceStatus {
    Succeeded,
    UpstreamError,
    RateLimited,
    Rejected,
    Canceled,
}

impl TraceStatus {
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            TraceStatus::Succeeded => "SUCCEEDED",
            TraceStatus::UpstreamError => "UPSTREAM_ERROR",
            TraceStatus::RateLimited => "RATE_LIMITED",
            TraceStatus::Rejected => "REJECTED",
            TraceStatus::Canceled => "CANCELED",
        }
    }

    pub fn all() -> &'static [TraceStatus] {
        &[
            TraceStatus::Succeeded,
            TraceStatus::UpstreamError,
            TraceStatus::RateLimited,
            TraceStatus::Rejected,
            TraceStatus::Canceled,
        ]
    }
}

impl fmt::Display for TraceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire_str())
    }
}

impl FromStr for TraceStatus {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SUCCEEDED" => Ok(TraceStatus::Succeeded),
            "UPSTREAM_ERROR" => Ok(TraceStatus::UpstreamError),
            "RATE_LIMITED" => Ok(TraceStatus::RateLimited),
            "REJECTED" => Ok(TraceStatus::Rejected),
            "CANCELED" => Ok(TraceStatus::Canceled),
            _ => Err(EnumParseError::new("trace status", s)),
        }
    }
}

/// Error when parsing an invalid enum wire string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumParseError {
    kind: &'static str,
    value: String,
}

impl EnumParseError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for EnumParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}: {}", self.kind, self.value)
    }
}

impl std::error::Error for EnumParseError {}
