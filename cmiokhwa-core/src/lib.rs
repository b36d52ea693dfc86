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
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

//! Core types for `cmiokhwa`: object and class ids, property addressing, the
//! [`PropertySource`](crate::traits::PropertySource) seam and the control decoder.

pub mod class;
pub mod decode;
pub mod error;
pub mod models;
pub mod store;
pub mod traits;
pub mod types;
