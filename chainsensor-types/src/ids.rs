//! Identifier types used throughout the ChainSensor core.
//!
//! Permanent identities are opaque strings assigned by the remote store
//! at insert time. A row that has not been persisted yet may carry a
//! provisional id (a locally minted UUID v4); the store-assigned value
//! returned by the insert replaces it before the row is treated as
//! permanent.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a store-assigned identifier.
            #[must_use]
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Mints a provisional local id for a row not yet persisted.
            #[must_use]
            pub fn provisional() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id! {
    /// Unique identifier for an uploaded dataset.
    DatasetId
}

string_id! {
    /// Unique identifier for a sensor.
    SensorId
}

string_id! {
    /// Unique identifier for an activity-log entry.
    ActivityId
}

string_id! {
    /// Unique identifier for a deployment.
    DeploymentId
}

string_id! {
    /// Unique identifier for a logic block within a sensor.
    LogicBlockId
}

string_id! {
    /// Identity of the owning user. Every row in the remote store is
    /// scoped by this column.
    UserId
}
