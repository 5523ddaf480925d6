//! bw-s3: S3 SDK adapter for bucketwire
//!
//! This crate builds aws-sdk-s3 clients from bucketwire options and
//! implements the BucketStore trait on top of them. It is the only crate
//! that directly depends on the AWS SDK.

pub mod client;
pub mod dispatch;

pub use client::{region_from_constraint, S3Client, DEFAULT_REGION};
pub use dispatch::{is_dispatched, CommandInput};
