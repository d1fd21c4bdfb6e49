//! # Asset Registry
//!
//! Turns the currency entries an issuer publishes in its directory document
//! into validated [`RegulatedAsset`] records.
//!
//! Resolution is a filter, not a validator: entries that are not regulated,
//! have no approval server, carry a code outside 1..=12 characters, or name an
//! issuer that is not a valid account key are skipped. Skipping is the normal
//! outcome for most currencies in a directory and is never reported as an
//! error; each skip is logged at `debug` with its reason.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::account::AccountId;
use crate::asset::RegulatedAsset;

/// One currency entry as published in a directory document.
///
/// Every field is optional on the wire; resolution decides what is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyDescriptor {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub regulated: bool,
    #[serde(default)]
    pub approval_server: Option<String>,
    #[serde(default)]
    pub approval_criteria: Option<String>,
}

/// Errors reading a directory document.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// The document is not valid TOML or `CURRENCIES` is not an array of tables.
    #[error("invalid directory document: {0}")]
    Toml(#[from] toml::de::Error),
}

/// The parts of an issuer's directory document this crate reads.
///
/// Only the `[[CURRENCIES]]` array of tables is consumed; everything else in
/// the document is ignored. An entry whose fields have the wrong TOML type is
/// dropped on its own and does not fail the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    pub currencies: Vec<CurrencyDescriptor>,
}

#[derive(Deserialize)]
struct RawDirectory {
    #[serde(rename = "CURRENCIES", default)]
    currencies: Vec<toml::Value>,
}

impl Directory {
    /// Parse a directory document from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, DirectoryError> {
        let raw: RawDirectory = toml::from_str(text)?;
        let currencies = raw
            .currencies
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match entry.try_into::<CurrencyDescriptor>() {
                Ok(descriptor) => Some(descriptor),
                Err(e) => {
                    tracing::debug!(index, error = %e, "skipping malformed currency entry");
                    None
                }
            })
            .collect();
        Ok(Self { currencies })
    }
}

/// Why a descriptor was left out of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    NotRegulated,
    NoApprovalServer,
    BadCode,
    BadIssuer,
}

/// The set of regulated assets resolved from a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetRegistry {
    assets: Vec<RegulatedAsset>,
}

impl AssetRegistry {
    /// Filter descriptors down to valid regulated assets, preserving order.
    pub fn resolve(descriptors: &[CurrencyDescriptor]) -> Vec<RegulatedAsset> {
        descriptors
            .iter()
            .filter_map(|d| match resolve_one(d) {
                Ok(asset) => Some(asset),
                Err(reason) => {
                    tracing::debug!(
                        code = d.code.as_deref().unwrap_or(""),
                        issuer = d.issuer.as_deref().unwrap_or(""),
                        ?reason,
                        "skipping currency descriptor"
                    );
                    None
                }
            })
            .collect()
    }

    /// Resolve every currency listed in a directory document.
    pub fn resolve_directory(directory: &Directory) -> Vec<RegulatedAsset> {
        Self::resolve(&directory.currencies)
    }

    /// Build a registry value holding the resolved assets.
    pub fn from_descriptors(descriptors: &[CurrencyDescriptor]) -> Self {
        Self {
            assets: Self::resolve(descriptors),
        }
    }

    pub fn assets(&self) -> &[RegulatedAsset] {
        &self.assets
    }

    /// Look up an asset by code and issuer.
    pub fn find(&self, code: &str, issuer: &AccountId) -> Option<&RegulatedAsset> {
        self.assets
            .iter()
            .find(|a| a.code() == code && a.issuer() == issuer)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

fn resolve_one(d: &CurrencyDescriptor) -> Result<RegulatedAsset, Skip> {
    if !d.regulated {
        return Err(Skip::NotRegulated);
    }
    let server = d
        .approval_server
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or(Skip::NoApprovalServer)?;
    let code = d.code.as_deref().ok_or(Skip::BadCode)?;
    let issuer = d
        .issuer
        .as_deref()
        .ok_or(Skip::BadIssuer)
        .and_then(|i| AccountId::parse(i).map_err(|_| Skip::BadIssuer))?;
    RegulatedAsset::new(code, issuer, server, d.approval_criteria.clone()).map_err(|_| Skip::BadCode)
}
