//! Command name resolution
//!
//! Operations can be requested by name. Legacy names from the REST API docs
//! and older SDK generations are mapped to their canonical operation before
//! the default lookup runs.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

macro_rules! operations {
    ($($name:ident),+ $(,)?) => {
        /// Canonical S3 operation names
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Operation {
            $($name,)+
        }

        impl Operation {
            /// Every canonical operation, in declaration order
            pub const ALL: &'static [Operation] = &[$(Operation::$name,)+];

            /// Canonical operation name
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Operation::$name => stringify!($name),)+
                }
            }
        }
    };
}

operations! {
    AbortMultipartUpload,
    CompleteMultipartUpload,
    CopyObject,
    CreateBucket,
    CreateMultipartUpload,
    DeleteBucket,
    DeleteBucketLifecycle,
    DeleteBucketPolicy,
    DeleteBucketWebsite,
    DeleteObject,
    DeleteObjects,
    GetBucketAcl,
    GetBucketLifecycleConfiguration,
    GetBucketLocation,
    GetBucketLogging,
    GetBucketNotificationConfiguration,
    GetBucketPolicy,
    GetBucketVersioning,
    GetBucketWebsite,
    GetObject,
    GetObjectAcl,
    HeadBucket,
    HeadObject,
    ListBuckets,
    ListObjectVersions,
    ListObjects,
    ListObjectsV2,
    ListParts,
    PutBucketAcl,
    PutBucketLifecycleConfiguration,
    PutBucketLogging,
    PutBucketNotificationConfiguration,
    PutBucketPolicy,
    PutBucketVersioning,
    PutBucketWebsite,
    PutObject,
    PutObjectAcl,
    UploadPart,
    UploadPartCopy,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = Error;

    /// Exact canonical name lookup
    fn from_str(name: &str) -> Result<Self> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == name)
            .ok_or_else(|| Error::UnknownCommand(name.to_string()))
    }
}

/// Legacy operation names and the canonical operation each stands for
pub const COMMAND_ALIASES: &[(&str, Operation)] = &[
    // REST API docs names
    ("GetService", Operation::ListBuckets),
    ("GetBucket", Operation::ListObjects),
    ("PutBucket", Operation::CreateBucket),
    // Older SDK names
    ("GetBucketHeaders", Operation::HeadBucket),
    ("GetObjectHeaders", Operation::HeadObject),
    ("SetBucketAcl", Operation::PutBucketAcl),
    ("CreateObject", Operation::PutObject),
    ("DeleteMultipleObjects", Operation::DeleteObjects),
    ("PutObjectCopy", Operation::CopyObject),
    ("SetObjectAcl", Operation::PutObjectAcl),
    ("GetLogs", Operation::GetBucketLogging),
    ("GetVersioningStatus", Operation::GetBucketVersioning),
    ("SetBucketPolicy", Operation::PutBucketPolicy),
    (
        "CreateBucketNotification",
        Operation::PutBucketNotificationConfiguration,
    ),
    (
        "GetBucketNotifications",
        Operation::GetBucketNotificationConfiguration,
    ),
    ("CopyPart", Operation::UploadPartCopy),
    ("CreateWebsiteConfig", Operation::PutBucketWebsite),
    ("GetWebsiteConfig", Operation::GetBucketWebsite),
    ("DeleteWebsiteConfig", Operation::DeleteBucketWebsite),
    (
        "CreateObjectExpirationConfig",
        Operation::PutBucketLifecycleConfiguration,
    ),
    (
        "GetObjectExpirationConfig",
        Operation::GetBucketLifecycleConfiguration,
    ),
    ("DeleteObjectExpirationConfig", Operation::DeleteBucketLifecycle),
];

/// How a requested name was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Canonical operation
    pub operation: Operation,

    /// Whether the alias table supplied the operation
    pub aliased: bool,
}

/// Resolves requested command names to canonical operations
#[derive(Debug, Clone, Copy)]
pub struct CommandResolver {
    aliases: &'static [(&'static str, Operation)],
}

impl CommandResolver {
    /// Resolver backed by the built-in alias table
    pub const fn new() -> Self {
        Self {
            aliases: COMMAND_ALIASES,
        }
    }

    /// The alias table this resolver consults
    pub fn aliases(&self) -> &'static [(&'static str, Operation)] {
        self.aliases
    }

    /// Look a name up in the alias table only
    pub fn alias(&self, name: &str) -> Option<Operation> {
        self.aliases
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(_, op)| *op)
    }

    /// Resolve a requested name to its canonical operation
    pub fn resolve(&self, name: &str) -> Result<Operation> {
        self.resolve_detailed(name).map(|r| r.operation)
    }

    /// Resolve a name, reporting whether an alias was used
    ///
    /// The first letter is upper-cased so method-style names (`getService`,
    /// `headObject`) match. Names outside the alias table fall through to
    /// the canonical operation names.
    pub fn resolve_detailed(&self, name: &str) -> Result<Resolution> {
        let normalized = capitalize(name);

        if let Some(operation) = self.alias(&normalized) {
            tracing::debug!(requested = name, canonical = %operation, "Resolved command alias");
            return Ok(Resolution {
                operation,
                aliased: true,
            });
        }

        let operation = normalized
            .parse::<Operation>()
            .map_err(|_| Error::UnknownCommand(name.to_string()))?;
        Ok(Resolution {
            operation,
            aliased: false,
        })
    }
}

impl Default for CommandResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
