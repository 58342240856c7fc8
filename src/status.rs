//! Download status codes and their classification.
//!
//! Every status is persisted as an integer. The integer encoding is fixed by
//! [`DownloadStatus::to_i32`]; the partition into [`StatusClass`]es is fixed by
//! [`DownloadStatus::class`], an explicit table rather than numeric ranges
//! (insufficient-space and device-not-found sit below 200 but are errors).

use serde::{Deserialize, Serialize};

/// Coarse partition of all status codes, used for batch aggregation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    /// Queued, blocked, or in progress
    Active,
    /// Terminal failure
    Error,
    /// Terminal success
    Success,
}

/// Status of a download item or a batch
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadStatus {
    /// Accepted but not yet scheduled
    Submitted,
    /// Scheduled, waiting to start
    Pending,
    /// Transferring
    Running,
    /// Paused by the application
    PausedByApp,
    /// Failed transiently, will retry
    WaitingToRetry,
    /// Waiting for connectivity
    WaitingForNetwork,
    /// Waiting for an unmetered network
    QueuedForWifi,
    /// Being removed
    Deleting,
    /// Pause requested, not yet honoured
    Pausing,
    /// Held back by a client-side restriction
    QueuedDueClientRestrictions,
    /// Completed
    Success,
    /// Not enough storage
    InsufficientSpaceError,
    /// Storage device missing
    DeviceNotFoundError,
    /// HTTP 400
    BadRequest,
    /// HTTP 406
    NotAcceptable,
    /// HTTP 411
    LengthRequired,
    /// HTTP 412
    PreconditionFailed,
    /// Destination file already exists
    FileAlreadyExistsError,
    /// Partial transfer cannot be resumed
    CannotResume,
    /// Cancelled by the user or application
    Canceled,
    /// Unclassified failure; also the decoding of unrecognized codes
    UnknownError,
    /// Local file could not be written
    FileError,
    /// Redirect the client cannot follow
    UnhandledRedirect,
    /// HTTP status the client does not handle
    UnhandledHttpCode,
    /// Transfer-level HTTP failure
    HttpDataError,
    /// HTTP stack raised an exception
    HttpException,
    /// Redirect limit exceeded
    TooManyRedirects,
    /// Failed because a sibling in the same batch failed
    BatchFailed,
}

impl DownloadStatus {
    /// Lowest code reserved for failures raised by the client itself
    pub const MIN_ARTIFICIAL_ERROR: DownloadStatus = DownloadStatus::FileAlreadyExistsError;

    /// Every named status, in encoding order
    pub const ALL: [DownloadStatus; 28] = [
        DownloadStatus::Submitted,
        DownloadStatus::Pending,
        DownloadStatus::Running,
        DownloadStatus::PausedByApp,
        DownloadStatus::WaitingToRetry,
        DownloadStatus::WaitingForNetwork,
        DownloadStatus::QueuedForWifi,
        DownloadStatus::InsufficientSpaceError,
        DownloadStatus::DeviceNotFoundError,
        DownloadStatus::Success,
        DownloadStatus::BadRequest,
        DownloadStatus::NotAcceptable,
        DownloadStatus::LengthRequired,
        DownloadStatus::PreconditionFailed,
        DownloadStatus::FileAlreadyExistsError,
        DownloadStatus::CannotResume,
        DownloadStatus::Canceled,
        DownloadStatus::UnknownError,
        DownloadStatus::FileError,
        DownloadStatus::UnhandledRedirect,
        DownloadStatus::UnhandledHttpCode,
        DownloadStatus::HttpDataError,
        DownloadStatus::HttpException,
        DownloadStatus::TooManyRedirects,
        DownloadStatus::BatchFailed,
        DownloadStatus::Deleting,
        DownloadStatus::Pausing,
        DownloadStatus::QueuedDueClientRestrictions,
    ];

    /// Classification table
    pub fn class(self) -> StatusClass {
        use DownloadStatus::*;
        match self {
            Submitted | Pending | Running | PausedByApp | WaitingToRetry | WaitingForNetwork
            | QueuedForWifi | Deleting | Pausing | QueuedDueClientRestrictions => {
                StatusClass::Active
            }
            Success => StatusClass::Success,
            InsufficientSpaceError | DeviceNotFoundError | BadRequest | NotAcceptable
            | LengthRequired | PreconditionFailed | FileAlreadyExistsError | CannotResume
            | Canceled | UnknownError | FileError | UnhandledRedirect | UnhandledHttpCode
            | HttpDataError | HttpException | TooManyRedirects | BatchFailed => StatusClass::Error,
        }
    }

    /// Whether this is a terminal failure
    pub fn is_error(self) -> bool {
        self.class() == StatusClass::Error
    }

    /// Whether this is terminal success
    pub fn is_success(self) -> bool {
        self.class() == StatusClass::Success
    }

    /// Whether work is still queued or in flight
    pub fn is_active(self) -> bool {
        self.class() == StatusClass::Active
    }

    /// Convert integer status code to DownloadStatus
    pub fn from_i32(status: i32) -> Self {
        use DownloadStatus::*;
        match status {
            189 => Submitted,
            190 => Pending,
            192 => Running,
            193 => PausedByApp,
            194 => WaitingToRetry,
            195 => WaitingForNetwork,
            196 => QueuedForWifi,
            198 => InsufficientSpaceError,
            199 => DeviceNotFoundError,
            200 => Success,
            400 => BadRequest,
            406 => NotAcceptable,
            411 => LengthRequired,
            412 => PreconditionFailed,
            488 => FileAlreadyExistsError,
            489 => CannotResume,
            490 => Canceled,
            491 => UnknownError,
            492 => FileError,
            493 => UnhandledRedirect,
            494 => UnhandledHttpCode,
            495 => HttpDataError,
            496 => HttpException,
            497 => TooManyRedirects,
            498 => BatchFailed,
            1000 => Deleting,
            1001 => Pausing,
            1002 => QueuedDueClientRestrictions,
            _ => UnknownError, // Unrecognized rows surface as failures
        }
    }

    /// Convert DownloadStatus to integer status code
    pub fn to_i32(self) -> i32 {
        use DownloadStatus::*;
        match self {
            Submitted => 189,
            Pending => 190,
            Running => 192,
            PausedByApp => 193,
            WaitingToRetry => 194,
            WaitingForNetwork => 195,
            QueuedForWifi => 196,
            InsufficientSpaceError => 198,
            DeviceNotFoundError => 199,
            Success => 200,
            BadRequest => 400,
            NotAcceptable => 406,
            LengthRequired => 411,
            PreconditionFailed => 412,
            FileAlreadyExistsError => 488,
            CannotResume => 489,
            Canceled => 490,
            UnknownError => 491,
            FileError => 492,
            UnhandledRedirect => 493,
            UnhandledHttpCode => 494,
            HttpDataError => 495,
            HttpException => 496,
            TooManyRedirects => 497,
            BatchFailed => 498,
            Deleting => 1000,
            Pausing => 1001,
            QueuedDueClientRestrictions => 1002,
        }
    }

    /// Stable lowercase name, matching the serde representation
    pub fn as_str(self) -> &'static str {
        use DownloadStatus::*;
        match self {
            Submitted => "submitted",
            Pending => "pending",
            Running => "running",
            PausedByApp => "paused_by_app",
            WaitingToRetry => "waiting_to_retry",
            WaitingForNetwork => "waiting_for_network",
            QueuedForWifi => "queued_for_wifi",
            Deleting => "deleting",
            Pausing => "pausing",
            QueuedDueClientRestrictions => "queued_due_client_restrictions",
            Success => "success",
            InsufficientSpaceError => "insufficient_space_error",
            DeviceNotFoundError => "device_not_found_error",
            BadRequest => "bad_request",
            NotAcceptable => "not_acceptable",
            LengthRequired => "length_required",
            PreconditionFailed => "precondition_failed",
            FileAlreadyExistsError => "file_already_exists_error",
            CannotResume => "cannot_resume",
            Canceled => "canceled",
            UnknownError => "unknown_error",
            FileError => "file_error",
            UnhandledRedirect => "unhandled_redirect",
            UnhandledHttpCode => "unhandled_http_code",
            HttpDataError => "http_data_error",
            HttpException => "http_exception",
            TooManyRedirects => "too_many_redirects",
            BatchFailed => "batch_failed",
        }
    }
}

impl std::fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<i32> for DownloadStatus {
    fn from(status: i32) -> Self {
        Self::from_i32(status)
    }
}

impl From<DownloadStatus> for i32 {
    fn from(status: DownloadStatus) -> Self {
        status.to_i32()
    }
}

// Stored as INTEGER so external readers see the raw code
impl sqlx::Type<sqlx::Sqlite> for DownloadStatus {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <i32 as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <i32 as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for DownloadStatus {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        sqlx::Encode::<sqlx::Sqlite>::encode_by_ref(&self.to_i32(), buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for DownloadStatus {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let code = <i32 as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        Ok(Self::from_i32(code))
    }
}
