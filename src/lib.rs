//! A small blocking Rust client for the Open States v3 API.
//!
//! Covers jurisdictions, bills, legislators and districts. Results are
//! returned as loosely-typed [`Data`] trees, as the API sends them, with the
//! known timestamp fields (`created_at`, `updated_at`, `latest_bill_update`,
//! `latest_people_update`) parsed into [`Timestamp`]s at any depth.
//!
//! ## Quick start
//! - Set `OPENSTATES_API_KEY` (or put `key:` in a `.openstatesrc` file in the
//!   current or home directory). Without a key a warning is logged and the
//!   API will most likely refuse requests.
//! - Create a [`Client`] and call a resource operation.
//!
//! ```no_run
//! use openstates::{BillSearch, Client};
//!
//! fn main() -> openstates::Result<()> {
//!     let client = Client::from_env()?;
//!
//!     let nc = client.get_metadata("NC", &[], None)?;
//!     println!("{}", nc["name"].as_str().unwrap_or_default());
//!
//!     let bills = client.search_bills(
//!         &BillSearch::new().jurisdiction("nc").session("2021").subject("Education"),
//!     )?;
//!     println!("{} bills", bills.len());
//!     Ok(())
//! }
//! ```
//!
//! All operations are synchronous and issue requests one at a time. Bulk
//! bill search sleeps between pages (see [`Client::with_page_delay`]).

#![forbid(unsafe_code)]

mod bills;
mod client;
mod config;
mod data;
mod error;
mod jurisdictions;
mod params;
mod people;
mod util;

pub use bills::{ALL_PAGES_PER_PAGE, BillLookup, BillSearch, Pagination};
pub use client::Client;
pub use config::{API_KEY_ENV_VAR, API_ROOT, ClientConfig, default_user_agent};
pub use data::{Data, Record, TIMESTAMP_FIELDS, Timestamp, convert_timestamps};
pub use error::{Error, Result};
pub use jurisdictions::{Chamber, JURISDICTION_PAGE_SIZE};
pub use params::{ParamValue, Params};
pub use people::LegislatorSearch;
pub use util::{fix_id_string, jurisdiction_id};
