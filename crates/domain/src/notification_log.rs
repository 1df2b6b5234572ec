use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// One record per (user, channel, batch) delivery attempt. Append-only, the
/// audit trail end users fall back to when a notification went missing or
/// arrived twice.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationLogEntry {
    pub id: ID,
    pub user_id: ID,
    pub channel: Channel,
    /// Every reminder covered by the batch this entry accounts for
    pub reminder_ids: Vec<ID>,
    pub status: DeliveryStatus,
    /// Provider message id, error text or skip reason
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

impl NotificationLogEntry {
    pub fn new(
        user_id: ID,
        channel: Channel,
        reminder_ids: Vec<ID>,
        status: DeliveryStatus,
        message: String,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Default::default(),
            user_id,
            channel,
            reminder_ids,
            status,
            message,
            sent_at,
        }
    }
}

impl Entity for NotificationLogEntry {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Whatsapp,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Whatsapp => "whatsapp",
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidChannelError {
    #[error("Channel: {0} is not recognized")]
    Unrecognized(String),
}

impl FromStr for Channel {
    type Err = InvalidChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "whatsapp" => Ok(Self::Whatsapp),
            _ => Err(InvalidChannelError::Unrecognized(s.to_string())),
        }
    }
}

/// Outcome of one channel delivery attempt. `Skipped` means the transport
/// itself could not take the message (unconfigured, missing address), which
/// is not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Failed,
    Skipped,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }
}

#[derive(Error, Debug)]
pub enum InvalidDeliveryStatusError {
    #[error("Delivery status: {0} is not recognized")]
    Unrecognized(String),
}

impl FromStr for DeliveryStatus {
    type Err = InvalidDeliveryStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            "skipped" => Ok(Self::Skipped),
            _ => Err(InvalidDeliveryStatusError::Unrecognized(s.to_string())),
        }
    }
}
