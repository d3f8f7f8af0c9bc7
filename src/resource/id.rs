//! Composite import identifiers
//!
//! Nested Statuspage objects are only addressable together with the page that
//! owns them, so imports take a single `page_id/resource_id` string.

use crate::error::ProviderError;
use std::fmt;
use std::str::FromStr;

const SEPARATOR: char = '/';

/// A `page_id/resource_id` pair
///
/// Only the first `/` splits: everything after it belongs to `resource_id`,
/// further separators included. Neither part is trimmed or validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageResourceId {
    pub page_id: String,
    pub resource_id: String,
}

impl PageResourceId {
    pub fn new(page_id: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
            resource_id: resource_id.into(),
        }
    }

    /// Parse an operator supplied import id
    pub fn parse(id: &str) -> Result<Self, ProviderError> {
        match id.split_once(SEPARATOR) {
            Some((page_id, resource_id)) => Ok(Self::new(page_id, resource_id)),
            None => Err(ProviderError::MalformedIdentifier(id.to_string())),
        }
    }
}

impl FromStr for PageResourceId {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PageResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.page_id, SEPARATOR, self.resource_id)
    }
}
