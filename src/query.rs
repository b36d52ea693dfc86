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

use cmiokhwa_core::traits::PropertySource;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// A boxed property source that can be shared between threads.
pub type BoxedPropertySource = Box<dyn PropertySource + Send + Sync>;

/// The platform API a [`PropertySource`] reads from.
#[derive(Copy, Clone, Debug, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub enum PropertyBackend {
    CoreMediaIO,
}

impl Display for PropertyBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Errors when picking a platform property source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("This platform has no supported control API: {0}")]
    UnsupportedPlatform(&'static str),
    #[error("Backend {0} is not enabled. Perhaps you meant to enable the `input-cmio` feature?")]
    BackendDisabled(PropertyBackend),
}

/// Gets the native [`PropertyBackend`]
#[must_use]
pub fn native_property_backend() -> Option<PropertyBackend> {
    match std::env::consts::OS {
        "macos" => Some(PropertyBackend::CoreMediaIO),
        _ => None,
    }
}

/// Opens the property source of the current platform.
/// # Errors
/// If the platform has no control API this crate knows, or its backend feature is disabled.
pub fn native_property_source() -> Result<BoxedPropertySource, BackendError> {
    match native_property_backend() {
        Some(PropertyBackend::CoreMediaIO) => cmio_source(),
        None => Err(BackendError::UnsupportedPlatform(std::env::consts::OS)),
    }
}

#[cfg(all(feature = "input-cmio", target_os = "macos"))]
fn cmio_source() -> Result<BoxedPropertySource, BackendError> {
    use cmiokhwa_bindings_macos::CoreMediaIOSource;

    log::debug!("Using the CoreMediaIO property source");
    Ok(Box::new(CoreMediaIOSource::new()))
}

#[cfg(not(all(feature = "input-cmio", target_os = "macos")))]
fn cmio_source() -> Result<BoxedPropertySource, BackendError> {
    Err(BackendError::BackendDisabled(PropertyBackend::CoreMediaIO))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_os = "macos"))]
    fn other_platforms_have_no_native_source() {
        assert_eq!(native_property_backend(), None);
        assert!(matches!(
            native_property_source(),
            Err(BackendError::UnsupportedPlatform(_))
        ));
    }

    #[test]
    #[cfg(target_os = "macos")]
    fn macos_uses_coremediaio() {
        assert_eq!(native_property_backend(), Some(PropertyBackend::CoreMediaIO));
    }

    #[test]
    fn disabled_backend_message_names_the_feature() {
        let err = BackendError::BackendDisabled(PropertyBackend::CoreMediaIO);
        assert!(err.to_string().contains("input-cmio"));
    }
}
