//! # regasset-core — Regulated-Asset Approval Protocol Types
//!
//! Pure, runtime-free building blocks for transferring regulated assets:
//!
//! - [`AccountId`]: validated issuer account keys.
//! - [`RegulatedAsset`] and [`AssetRegistry`]: filtering an issuer's published
//!   currencies down to the assets that require approval.
//! - [`AccountFlags`]: the issuer authorization flags that decide whether the
//!   approval protocol must be engaged for a transfer.
//! - [`ApprovalOutcome`] and [`ActionOutcome`]: closed decoders for the two
//!   server replies. Unknown discriminants never decode to a known outcome.
//! - [`ActionRequest`]: the user-supplied values for a follow-up action.
//!
//! Network access lives in `regasset-client`.
//!
//! ## Crate Policy
//!
//! - No network, no async runtime.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod account;
pub mod action;
pub mod asset;
pub mod flags;
pub mod outcome;
pub mod registry;

pub use account::{AccountId, AccountIdError};
pub use action::{ActionFieldError, ActionRequest};
pub use asset::{AssetError, AssetKind, RegulatedAsset, MAX_CODE_LEN};
pub use flags::AccountFlags;
pub use outcome::{ActionOutcome, ApprovalOutcome, ProtocolViolation, DEFAULT_ACTION_METHOD};
pub use registry::{AssetRegistry, CurrencyDescriptor, Directory, DirectoryError};
