//! The TideSync error-code catalog.
//!
//! Codes occupy the 1000+ range; 0–999 is reserved. Construction treats a
//! code as opaque: the catalog is consulted only to seed the default
//! `description` entry. Downstream tooling matches on the numeric value,
//! so discriminants are part of the wire contract and never renumbered.

use serde::{Serialize, Serializer};

/// Failure kinds raised by the TideSync framework.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Unknown = 1000,
    FileManagerError = 1001,
    UnexpectedStoreStructure = 1002,
    HelperFileDirectoryMissing = 1003,
    SyncChangesSaveFailed = 1004,
    OperationCreationFailed = 1005,
    FileAlreadyExists = 1006,
    NoPreviouslyUploadedStore = 1007,
    StoreFetchFailed = 1008,
    StoreSaveFailed = 1009,
    UnsynchronizedChangesPending = 1010,
    TaskCancelled = 1011,
    RemoteTransportError = 1012,
    EncryptionFailed = 1013,
    UnknownSyncTransaction = 1014,
}

impl ErrorCode {
    /// The numeric value carried in rendered and serialized errors.
    #[inline]
    pub const fn value(self) -> u32 {
        self as u32
    }

    /// Human-readable catalog text, used to seed the `description` entry.
    pub const fn description(self) -> &'static str {
        match self {
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::FileManagerError => "File Manager error",
            ErrorCode::UnexpectedStoreStructure => {
                "Unexpected or incomplete remote store structure"
            }
            ErrorCode::HelperFileDirectoryMissing => "Helper file directory does not exist",
            ErrorCode::SyncChangesSaveFailed => "Failed to save sync changes",
            ErrorCode::OperationCreationFailed => "Failed to create operation object",
            ErrorCode::FileAlreadyExists => "A file already exists at the specified location",
            ErrorCode::NoPreviouslyUploadedStore => "No previously uploaded store exists",
            ErrorCode::StoreFetchFailed => "Failed to fetch from the document store",
            ErrorCode::StoreSaveFailed => "Failed to save the document store",
            ErrorCode::UnsynchronizedChangesPending => {
                "The whole store cannot be uploaded while there are unsynchronized sync changes"
            }
            ErrorCode::TaskCancelled => "The task was cancelled",
            ErrorCode::RemoteTransportError => "Remote transport error",
            ErrorCode::EncryptionFailed => "Encryption error",
            ErrorCode::UnknownSyncTransaction => "Unknown sync transaction identifier",
        }
    }

    /// Decode a numeric value back into a catalog code.
    pub fn from_u32(value: u32) -> Option<Self> {
        Some(match value {
            1000 => ErrorCode::Unknown,
            1001 => ErrorCode::FileManagerError,
            1002 => ErrorCode::UnexpectedStoreStructure,
            1003 => ErrorCode::HelperFileDirectoryMissing,
            1004 => ErrorCode::SyncChangesSaveFailed,
            1005 => ErrorCode::OperationCreationFailed,
            1006 => ErrorCode::FileAlreadyExists,
            1007 => ErrorCode::NoPreviouslyUploadedStore,
            1008 => ErrorCode::StoreFetchFailed,
            1009 => ErrorCode::StoreSaveFailed,
            1010 => ErrorCode::UnsynchronizedChangesPending,
            1011 => ErrorCode::TaskCancelled,
            1012 => ErrorCode::RemoteTransportError,
            1013 => ErrorCode::EncryptionFailed,
            1014 => ErrorCode::UnknownSyncTransaction,
            _ => return None,
        })
    }
}

impl core::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_description() {
        assert_eq!(ErrorCode::FileManagerError.description(), "File Manager error");
        assert_eq!(
            ErrorCode::HelperFileDirectoryMissing.description(),
            "Helper file directory does not exist"
        );
    }

    #[test]
    fn value_round_trip() {
        for code in [
            ErrorCode::Unknown,
            ErrorCode::FileManagerError,
            ErrorCode::TaskCancelled,
            ErrorCode::UnknownSyncTransaction,
        ] {
            assert_eq!(ErrorCode::from_u32(code.value()), Some(code));
        }
    }

    #[test]
    fn unknown_value_is_none() {
        assert_eq!(ErrorCode::from_u32(0), None);
        assert_eq!(ErrorCode::from_u32(999), None);
        assert_eq!(ErrorCode::from_u32(4242), None);
    }

    #[test]
    fn display_is_numeric() {
        assert_eq!(format!("{}", ErrorCode::FileManagerError), "1001");
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&ErrorCode::StoreFetchFailed).unwrap();
        assert_eq!(json, "1008");
    }
}
