//! bw-core: Core library for bucketwire
//!
//! This crate provides the SDK-independent parts of bucketwire:
//! - Site settings management
//! - Client option assembly
//! - Command name aliasing
//! - Bucket existence cache and validation
//! - BucketStore trait for the remote queries
//!
//! This crate does not depend on any storage SDK, so everything here can be
//! tested against mocks.

pub mod cache;
pub mod command;
pub mod config;
pub mod error;
pub mod options;
pub mod traits;
pub mod validate;

pub use cache::{CacheProvider, ExistenceCache, FileCache, LayeredCache, MemoryCache, NullCache};
pub use command::{CommandResolver, Operation, Resolution, COMMAND_ALIASES};
pub use config::{CacheBackend, CacheSettings, Settings, SettingsManager};
pub use error::{Error, Result, CONNECTION_VALIDATION_MESSAGE};
pub use options::{ClientOptions, Credentials, DEFAULT_CONNECT_TIMEOUT};
pub use traits::BucketStore;
pub use validate::validate_bucket;
