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
    error::PropertyError,
    types::{ObjectId, PropertyAddress, PropertySelector, PropertyValue, ValueKind},
};

/// Read access to the properties of media I/O objects.
///
/// This is the only thing the decoder needs from a platform. Implementations must be
/// read-only: reading a property never changes the object.
///
/// A source that is also `Sync` can be shared by several threads decoding different controls.
pub trait PropertySource {
    /// Reads the property at `address` of `object`, interpreting the data as `kind`.
    ///
    /// Implementations may return a [`PropertyValue`] of a different kind than requested;
    /// callers are expected to check.
    /// # Errors
    /// If the object has no such property, the platform call fails, or the data cannot be interpreted as `kind`.
    fn read(
        &self,
        object: ObjectId,
        address: PropertyAddress,
        kind: ValueKind,
    ) -> Result<PropertyValue, PropertyError>;

    /// Whether `class` is `ancestor` or descends from it.
    ///
    /// The default implementation uses the built-in class hierarchy.
    fn is_subclass(&self, class: ClassId, ancestor: ClassId) -> bool {
        class.is_subclass_of(ancestor)
    }

    /// Reads the runtime class of `object`.
    /// # Errors
    /// See [`read()`](PropertySource::read).
    fn class_of(&self, object: ObjectId) -> Result<ClassId, PropertyError> {
        let address = PropertyAddress::new(PropertySelector::CLASS);
        match self.read(object, address, ValueKind::ClassId)? {
            PropertyValue::ClassId(class) => Ok(class),
            PropertyValue::UInt32(raw) => Ok(ClassId::from_u32(raw)),
            other => Err(PropertyError::Malformed {
                object,
                address,
                expected: ValueKind::ClassId,
                reason: format!("got {}", other.kind()),
            }),
        }
    }
}

impl<T: PropertySource + ?Sized> PropertySource for &T {
    fn read(
        &self,
        object: ObjectId,
        address: PropertyAddress,
        kind: ValueKind,
    ) -> Result<PropertyValue, PropertyError> {
        (**self).read(object, address, kind)
    }

    fn is_subclass(&self, class: ClassId, ancestor: ClassId) -> bool {
        (**self).is_subclass(class, ancestor)
    }

    fn class_of(&self, object: ObjectId) -> Result<ClassId, PropertyError> {
        (**self).class_of(object)
    }
}

impl<T: PropertySource + ?Sized> PropertySource for Box<T> {
    fn read(
        &self,
        object: ObjectId,
        address: PropertyAddress,
        kind: ValueKind,
    ) -> Result<PropertyValue, PropertyError> {
        (**self).read(object, address, kind)
    }

    fn is_subclass(&self, class: ClassId, ancestor: ClassId) -> bool {
        (**self).is_subclass(class, ancestor)
    }

    fn class_of(&self, object: ObjectId) -> Result<ClassId, PropertyError> {
        (**self).class_of(object)
    }
}
