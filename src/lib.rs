/*
 * Copyright 2024 The Cmiokhwa Contributors
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # cmiokhwa
//! Reads the state of camera hardware controls (toggles, selectors and continuous features
//! such as exposure or focus) and turns it into typed snapshots.
//!
//! ```no_run
//! use cmiokhwa::{decode, native_property_source, types::ObjectId};
//!
//! let source = native_property_source().unwrap();
//! if let Some(model) = decode(&source, ObjectId::new(42)) {
//!     println!("{model}");
//! }
//! ```

mod query;
mod snapshot;

pub use cmiokhwa_core::{
    class, decode::decode, decode::try_decode, error, models, store, traits, types,
};
pub use four_cc::FourCC;
pub use query::*;
pub use snapshot::*;
