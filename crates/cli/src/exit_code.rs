//! Exit code definitions for the bw CLI
//!
//! Scripts rely on these values; changing one is a breaking change.

/// Exit codes for the bw CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed successfully
    Success = 0,

    /// General/unspecified error
    GeneralError = 1,

    /// User input error: invalid arguments, bad settings, unknown command name
    UsageError = 2,

    /// Error reported by the storage service or the network
    NetworkError = 3,

    /// Bucket missing or not accessible with the configured credentials
    AuthError = 4,

    /// Operation resolves but is not dispatched by name
    UnsupportedFeature = 7,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Create exit code from i32 value
    ///
    /// Returns None if the value doesn't correspond to a known exit code.
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::GeneralError),
            2 => Some(Self::UsageError),
            3 => Some(Self::NetworkError),
            4 => Some(Self::AuthError),
            7 => Some(Self::UnsupportedFeature),
            _ => None,
        }
    }

    /// Exit code matching a library error
    pub fn from_error(err: &bw_core::Error) -> Self {
        Self::from_i32(err.exit_code()).unwrap_or(Self::GeneralError)
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Operation completed successfully",
            Self::GeneralError => "General error",
            Self::UsageError => "Invalid arguments or settings",
            Self::NetworkError => "Storage service or network error",
            Self::AuthError => "Bucket not reachable with current credentials",
            Self::UnsupportedFeature => "Operation not dispatched by bw",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}
