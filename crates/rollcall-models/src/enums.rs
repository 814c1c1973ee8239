//! Closed vocabularies used by classes and attendance records.
//!
//! Each enum serializes to the exact strings clients send and is stored as a
//! Postgres enum type of the same vocabulary. Unknown values fail to
//! deserialize, so they never reach the store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// School level a class is taught at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "class_level")]
pub enum Level {
    #[serde(rename = "Common Core")]
    #[sqlx(rename = "Common Core")]
    CommonCore,
    #[serde(rename = "1st Baccalaureate")]
    #[sqlx(rename = "1st Baccalaureate")]
    FirstBaccalaureate,
    #[serde(rename = "2nd Baccalaureate")]
    #[sqlx(rename = "2nd Baccalaureate")]
    SecondBaccalaureate,
}

impl Level {
    pub const ALL: [Level; 3] = [
        Level::CommonCore,
        Level::FirstBaccalaureate,
        Level::SecondBaccalaureate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::CommonCore => "Common Core",
            Level::FirstBaccalaureate => "1st Baccalaureate",
            Level::SecondBaccalaureate => "2nd Baccalaureate",
        }
    }
}

/// Study track of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "class_stream")]
pub enum Stream {
    General,
    Science,
    Arts,
}

impl Stream {
    pub const ALL: [Stream; 3] = [Stream::General, Stream::Science, Stream::Arts];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stream::General => "General",
            Stream::Science => "Science",
            Stream::Arts => "Arts",
        }
    }
}

/// One of the two daily attendance slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "attendance_session", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Session {
    Morning,
    Afternoon,
}

impl Session {
    pub const ALL: [Session; 2] = [Session::Morning, Session::Afternoon];

    pub fn as_str(&self) -> &'static str {
        match self {
            Session::Morning => "morning",
            Session::Afternoon => "afternoon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "attendance_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 2] = [AttendanceStatus::Present, AttendanceStatus::Absent];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        }
    }
}

macro_rules! impl_str_conversions {
    ($($name:ident => $label:literal),* $(,)?) => {
        $(
            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $name {
                type Err = String;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Self::ALL
                        .into_iter()
                        .find(|variant| variant.as_str() == s)
                        .ok_or_else(|| format!("unknown {}: {}", $label, s))
                }
            }
        )*
    };
}

impl_str_conversions!(
    Level => "level",
    Stream => "stream",
    Session => "session",
    AttendanceStatus => "attendance status",
);
