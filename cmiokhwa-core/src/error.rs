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

use crate::{
    class::ClassId,
    types::{ObjectId, PropertyAddress, ValueKind},
};
use thiserror::Error;

/// Errors raised by a [`PropertySource`](crate::traits::PropertySource) while reading a property.
#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    #[error("Object {object} has no property {address}")]
    NotFound {
        object: ObjectId,
        address: PropertyAddress,
    },
    #[error("Reading {address} of object {object} failed with status {status}")]
    Backend {
        object: ObjectId,
        address: PropertyAddress,
        status: i32,
    },
    #[error("Property {address} of object {object} is not a valid {expected}: {reason}")]
    Malformed {
        object: ObjectId,
        address: PropertyAddress,
        expected: ValueKind,
        reason: String,
    },
}

impl PropertyError {
    /// The address of the read that failed.
    #[must_use]
    pub fn address(&self) -> PropertyAddress {
        match self {
            PropertyError::NotFound { address, .. }
            | PropertyError::Backend { address, .. }
            | PropertyError::Malformed { address, .. } => *address,
        }
    }
}

/// Why a control could not be turned into a [`ControlModel`](crate::models::ControlModel).
#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    #[error("Object {object} has class {class}, which is not a supported control class")]
    UnsupportedClass { object: ObjectId, class: ClassId },
    #[error("Missing required property {0}")]
    MissingProperty(PropertyAddress),
    #[error("Malformed property {address}: expected {expected}")]
    MalformedValue {
        address: PropertyAddress,
        expected: ValueKind,
    },
}

impl From<PropertyError> for ControlError {
    fn from(why: PropertyError) -> Self {
        match why {
            PropertyError::NotFound { address, .. } | PropertyError::Backend { address, .. } => {
                ControlError::MissingProperty(address)
            }
            PropertyError::Malformed {
                address, expected, ..
            } => ControlError::MalformedValue { address, expected },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PropertySelector;

    #[test]
    fn backend_failures_become_missing_properties() {
        let address = PropertyAddress::new(PropertySelector::FEATURE_TUNE);
        let err = PropertyError::Backend {
            object: ObjectId::new(4),
            address,
            status: -50,
        };
        assert_eq!(err.address(), address);
        assert_eq!(ControlError::from(err), ControlError::MissingProperty(address));
    }

    #[test]
    fn malformed_keeps_expected_kind() {
        let address = PropertyAddress::new(PropertySelector::FEATURE_NATIVE_RANGE);
        let err = PropertyError::Malformed {
            object: ObjectId::new(4),
            address,
            expected: ValueKind::Range,
            reason: "got UInt32".to_string(),
        };
        assert_eq!(
            ControlError::from(err),
            ControlError::MalformedValue {
                address,
                expected: ValueKind::Range
            }
        );
    }
}
