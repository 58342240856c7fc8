//! Identifiers and row types for batch-status

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::status::DownloadStatus;

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Get the inner i64 value
            pub fn get(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl sqlx::Type<sqlx::Sqlite> for $name {
            fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
                <i64 as sqlx::Type<sqlx::Sqlite>>::type_info()
            }

            fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
                <i64 as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
            }
        }

        impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
            ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
                sqlx::Encode::<sqlx::Sqlite>::encode_by_ref(&self.0, buf)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for $name {
            fn decode(
                value: sqlx::sqlite::SqliteValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let id = <i64 as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
                Ok(Self(id))
            }
        }
    };
}

integer_id!(
    /// Unique identifier for a batch
    BatchId
);

integer_id!(
    /// Unique identifier for a single download item
    DownloadId
);

/// Batch record from database
#[derive(Debug, Clone, FromRow)]
pub struct Batch {
    /// Unique database ID
    pub id: BatchId,
    /// Display title
    pub title: String,
    /// Last computed or cascaded status; may lag behind the items
    pub status: DownloadStatus,
    /// Unix milliseconds of the most recent status write
    pub last_modified: i64,
    /// Unix milliseconds when the batch was created
    pub created_at: i64,
}

impl Batch {
    /// `last_modified` as a UTC instant
    pub fn last_modified_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.last_modified).single()
    }
}

/// Download item record from database
#[derive(Debug, Clone, FromRow)]
pub struct DownloadItem {
    /// Unique database ID
    pub id: DownloadId,
    /// Owning batch
    pub batch_id: BatchId,
    /// Source URI
    pub uri: String,
    /// Current status
    pub status: DownloadStatus,
    /// Unix milliseconds when the item was created
    pub created_at: i64,
}

/// New batch to be inserted into the database
#[derive(Debug, Clone)]
pub struct NewBatch {
    /// Display title
    pub title: String,
    /// Initial status
    pub status: DownloadStatus,
}

/// New download to be inserted into the database
#[derive(Debug, Clone)]
pub struct NewDownload {
    /// Owning batch (must exist)
    pub batch_id: BatchId,
    /// Source URI
    pub uri: String,
    /// Initial status
    pub status: DownloadStatus,
}
