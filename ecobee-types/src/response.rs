//! Envelope of a thermostat query response.

use crate::Thermostat;

/// Body of a `GET /1/thermostat` response.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ThermostatResponse {
    /// Paging information; absent when everything fits on one page.
    pub page: Option<Page>,

    /// Thermostats on this page.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub thermostat_list: Vec<Thermostat>,

    /// API-level status.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub status: Status,
}

/// Paging information for list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Page {
    /// Page number, starting at 1.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub page: u32,

    /// Total number of pages.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub total_pages: u32,

    /// Page size.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub page_size: u32,

    /// Total number of records across pages.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub total: u32,
}

impl Page {
    /// Whether another page follows this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// API-level status returned with every response.
///
/// A `code` of 0 means success.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Status {
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub code: i64,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::wire::null_as_default"))]
    pub message: String,
}

impl Status {
    pub fn is_ok(&self) -> bool {
        self.code == 0
    }
}
