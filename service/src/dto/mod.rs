mod active_models;
pub mod forms;
pub mod views;

pub use forms::*;
pub use views::*;

use entity::sea_orm_active_enums;
use rocket_okapi::okapi::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Mirrors an enum of `entity::sea_orm_active_enums` on the API side, with conversions both ways.
macro_rules! mirror_active_enum {
    ($name:ident, [$($variant:ident),+ $(,)?]) => {
        impl From<$name> for sea_orm_active_enums::$name {
            fn from(value: $name) -> Self {
                match value {
                    $($name::$variant => Self::$variant,)+
                }
            }
        }

        impl From<sea_orm_active_enums::$name> for $name {
            fn from(value: sea_orm_active_enums::$name) -> Self {
                match value {
                    $(sea_orm_active_enums::$name::$variant => Self::$variant,)+
                }
            }
        }
    };
}

#[derive(
    Serialize,
    Deserialize,
    JsonSchema,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserRole {
    Coach,
    #[default]
    Diver,
    Judge,
}
mirror_active_enum!(UserRole, [Coach, Diver, Judge]);

#[derive(
    Serialize,
    Deserialize,
    JsonSchema,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MeetStatus {
    #[default]
    Upcoming,
    Scheduled,
    Active,
    Completed,
}
mirror_active_enum!(MeetStatus, [Upcoming, Scheduled, Active, Completed]);

#[derive(
    Serialize,
    Deserialize,
    JsonSchema,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DiverStatus {
    #[default]
    Active,
    Archived,
    Deleted,
}
mirror_active_enum!(DiverStatus, [Active, Archived, Deleted]);

#[derive(
    Serialize,
    Deserialize,
    JsonSchema,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SeasonStatus {
    #[default]
    Active,
    Archived,
}
mirror_active_enum!(SeasonStatus, [Active, Archived]);

#[derive(
    Serialize,
    Deserialize,
    JsonSchema,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CycleType {
    Preseason,
    Regular,
    Postseason,
    Offseason,
}
mirror_active_enum!(CycleType, [Preseason, Regular, Postseason, Offseason]);

#[derive(
    Serialize,
    Deserialize,
    JsonSchema,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PracticeType {
    Weightroom,
    Dryland,
    Diving,
    Mental,
    Other,
}
mirror_active_enum!(PracticeType, [Weightroom, Dryland, Diving, Mental, Other]);
