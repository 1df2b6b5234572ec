use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Upper bound for how many days before its event a `Reminder` may trigger
pub const MAX_REMIND_BEFORE_DAYS: u32 = 365;

/// A `Reminder` represents a calendar event owned by a `User` who should be
/// notified on the event day and optionally some days ahead of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `User` owning this `Reminder` and receiving its notifications
    pub user_id: ID,
    pub title: String,
    /// The calendar date of the event. For yearly repeating reminders the
    /// stored year is ignored when determining the next occurrence.
    pub date: NaiveDate,
    pub reminder_type: ReminderType,
    /// How many days ahead of the event the first notification should fire.
    /// Invariant: `0 <= remind_before_days <= MAX_REMIND_BEFORE_DAYS`
    pub remind_before_days: u32,
    pub repeat_every_year: bool,
    pub notes: Option<String>,
    /// Soft-delete flag, inactive reminders are never selected for dispatch
    pub is_active: bool,
    /// When this `Reminder` last entered a dispatched batch. Guards against
    /// notifying more than once per calendar day.
    pub last_notified_at: Option<DateTime<Utc>>,
}

impl Reminder {
    pub fn new(user_id: ID, title: String, date: NaiveDate) -> Self {
        Self {
            id: Default::default(),
            user_id,
            title,
            date,
            reminder_type: ReminderType::Custom,
            remind_before_days: 1,
            repeat_every_year: true,
            notes: None,
            is_active: true,
            last_notified_at: None,
        }
    }
}

impl Entity for Reminder {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    Birthday,
    Anniversary,
    Bill,
    Custom,
}

impl ReminderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Birthday => "birthday",
            Self::Anniversary => "anniversary",
            Self::Bill => "bill",
            Self::Custom => "custom",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Birthday => "🎂",
            Self::Anniversary => "💍",
            Self::Bill => "💰",
            Self::Custom => "📌",
        }
    }
}

#[derive(Error, Debug)]
pub enum InvalidReminderTypeError {
    #[error("Reminder type: {0} is not recognized")]
    Unrecognized(String),
}

impl FromStr for ReminderType {
    type Err = InvalidReminderTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "birthday" => Ok(Self::Birthday),
            "anniversary" => Ok(Self::Anniversary),
            "bill" => Ok(Self::Bill),
            "custom" => Ok(Self::Custom),
            _ => Err(InvalidReminderTypeError::Unrecognized(s.to_string())),
        }
    }
}

/// How soon a due reminder's event falls, in user-facing wording. The
/// variants are ordered by how the selector assigns them: an event today
/// always wins over its own notify window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Today,
    Tomorrow,
    /// The notify window opened today for an event `n` days out
    InDays(i64),
}

impl Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Today => write!(f, "Today"),
            Self::Tomorrow => write!(f, "Tomorrow"),
            Self::InDays(1) => write!(f, "In 1 day"),
            Self::InDays(days) => write!(f, "In {} days", days),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn urgency_wording() {
        assert_eq!(Urgency::Today.to_string(), "Today");
        assert_eq!(Urgency::Tomorrow.to_string(), "Tomorrow");
        assert_eq!(Urgency::InDays(1).to_string(), "In 1 day");
        assert_eq!(Urgency::InDays(5).to_string(), "In 5 days");
    }

    #[test]
    fn reminder_type_roundtrips_as_str() {
        for reminder_type in [
            ReminderType::Birthday,
            ReminderType::Anniversary,
            ReminderType::Bill,
            ReminderType::Custom,
        ] {
            assert_eq!(
                reminder_type.as_str().parse::<ReminderType>().unwrap(),
                reminder_type
            );
        }
        assert!("meeting".parse::<ReminderType>().is_err());
    }
}
