// Copyright (c) 2023 Lithic (lithic.com)
// This file is part of the Lithic Rust client.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! # Typed client for the Lithic card-issuing API.
//!
//! Request bodies and responses correspond directly to Rust data structures via the serde
//! serialization and deserialization interfaces. Optional request parameters use [fields::Field],
//! which tells apart a parameter that was never set from one explicitly set to `null`.
//!
//! Parameters sent in the query string are encoded by the [query] module, which flattens nested
//! structures, sequences and maps into key/value pairs according to configurable nesting and array
//! conventions. Query parameter structs derive [QueryValue] to get a fixed, ordered field table at
//! compile time.
//!
//! The [client] module holds the `surf` client and middleware which attach credentials, log
//! requests, and turn error responses into [Error] values. Each API resource is exposed as a
//! service object obtained from [Client], for instance [Client::cards]. List endpoints return a
//! [pagination::Page], which can fetch the pages after it.
//!
//! ```ignore
//! let client = lithic::Client::from_env()?;
//! let page = client
//!     .cards()
//!     .list(&CardListParams {
//!         account_token: Field::new(account.into()),
//!         ..Default::default()
//!     })
//!     .await?;
//! ```

// Lets code generated by `lithic-macros` refer to `::lithic` from inside this crate.
extern crate self as lithic;

pub mod client;
pub mod config;
pub mod error;
pub mod fields;
pub mod pagination;
pub mod query;
pub mod requests;
pub mod responses;
pub mod services;
pub mod types;

pub use client::{Client, RequestOptions};
pub use config::{ClientConfig, Environment};
pub use error::*;
pub use lithic_macros::QueryValue;
pub use query::QueryValue;
