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

use four_cc::FourCC;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    hash::{Hash, Hasher},
};

/// An opaque handle to a media I/O object (a device, stream or control).
///
/// The handle is owned by the system. Holding one does not keep the object alive.
#[derive(Copy, Clone, Debug, Default, Hash, Ord, PartialOrd, Eq, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ObjectId(u32);

impl ObjectId {
    /// The "no object" handle.
    pub const UNKNOWN: ObjectId = ObjectId(0);

    /// Creates a new [`ObjectId`] from its raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        ObjectId(raw)
    }

    /// Gets the raw value of this [`ObjectId`]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_unknown(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for ObjectId {
    fn from(raw: u32) -> Self {
        ObjectId(raw)
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Four character code naming a property, e.g. `bcvl` for a boolean control's value.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct PropertySelector(pub FourCC);

impl Hash for PropertySelector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_u32().hash(state);
    }
}

impl PropertySelector {
    #[must_use]
    pub const fn from_bytes(code: [u8; 4]) -> Self {
        PropertySelector(FourCC(code))
    }

    /// The selector as the big-endian `u32` the system APIs expect.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        u32::from_be_bytes(self.0 .0)
    }

    // Object
    pub const CLASS: PropertySelector = PropertySelector::from_bytes(*b"clas");
    pub const NAME: PropertySelector = PropertySelector::from_bytes(*b"lnam");

    // Boolean control
    pub const BOOLEAN_VALUE: PropertySelector = PropertySelector::from_bytes(*b"bcvl");

    // Selector control
    pub const SELECTOR_CURRENT_ITEM: PropertySelector = PropertySelector::from_bytes(*b"scci");
    pub const SELECTOR_AVAILABLE_ITEMS: PropertySelector = PropertySelector::from_bytes(*b"scai");
    pub const SELECTOR_ITEM_NAME: PropertySelector = PropertySelector::from_bytes(*b"scin");

    // Feature control
    pub const FEATURE_ON_OFF: PropertySelector = PropertySelector::from_bytes(*b"fcoo");
    pub const FEATURE_AUTOMATIC_MANUAL: PropertySelector = PropertySelector::from_bytes(*b"fcam");
    pub const FEATURE_ABSOLUTE_NATIVE: PropertySelector = PropertySelector::from_bytes(*b"fcna");
    pub const FEATURE_TUNE: PropertySelector = PropertySelector::from_bytes(*b"fctn");
    pub const FEATURE_NATIVE_VALUE: PropertySelector = PropertySelector::from_bytes(*b"fcfv");
    pub const FEATURE_ABSOLUTE_VALUE: PropertySelector = PropertySelector::from_bytes(*b"fcav");
    pub const FEATURE_NATIVE_RANGE: PropertySelector = PropertySelector::from_bytes(*b"fcfr");
    pub const FEATURE_ABSOLUTE_RANGE: PropertySelector = PropertySelector::from_bytes(*b"fcar");
    pub const FEATURE_ABSOLUTE_UNIT_NAME: PropertySelector =
        PropertySelector::from_bytes(*b"fcun");
}

impl Display for PropertySelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}'", String::from_utf8_lossy(&self.0 .0))
    }
}

/// A fully specified property read: which property, and an optional qualifier.
///
/// Scope and element are always global/main for controls, so they are not modelled.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct PropertyAddress {
    selector: PropertySelector,
    qualifier: Option<u32>,
}

impl PropertyAddress {
    /// An unqualified read of `selector`.
    #[must_use]
    pub const fn new(selector: PropertySelector) -> Self {
        PropertyAddress {
            selector,
            qualifier: None,
        }
    }

    /// A read of `selector` parameterised by `qualifier`, e.g. the name of selector item `qualifier`.
    #[must_use]
    pub const fn qualified(selector: PropertySelector, qualifier: u32) -> Self {
        PropertyAddress {
            selector,
            qualifier: Some(qualifier),
        }
    }

    #[must_use]
    pub const fn selector(&self) -> PropertySelector {
        self.selector
    }

    #[must_use]
    pub const fn qualifier(&self) -> Option<u32> {
        self.qualifier
    }
}

impl From<PropertySelector> for PropertyAddress {
    fn from(selector: PropertySelector) -> Self {
        PropertyAddress::new(selector)
    }
}

impl Display for PropertyAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.qualifier {
            Some(q) => write!(f, "{}[{q}]", self.selector),
            None => write!(f, "{}", self.selector),
        }
    }
}

/// A closed numeric range, as reported by the system in double precision.
#[derive(Copy, Clone, Debug, Default, PartialOrd, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ValueRange {
    pub minimum: f64,
    pub maximum: f64,
}

impl ValueRange {
    #[must_use]
    pub const fn new(minimum: f64, maximum: f64) -> Self {
        ValueRange { minimum, maximum }
    }
}

impl Display for ValueRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.minimum, self.maximum)
    }
}

/// The shape of data a reader expects at a [`PropertyAddress`].
///
/// Byte-oriented backends use this to interpret the raw property data.
#[derive(Copy, Clone, Debug, Hash, Ord, PartialOrd, Eq, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ValueKind {
    UInt32,
    UInt32Array,
    Float32,
    Range,
    String,
    ClassId,
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A typed property value returned by a [`PropertySource`](crate::traits::PropertySource).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum PropertyValue {
    UInt32(u32),
    UInt32Array(Vec<u32>),
    Float32(f32),
    Range(ValueRange),
    String(String),
    ClassId(crate::class::ClassId),
}

impl PropertyValue {
    /// The [`ValueKind`] this value satisfies.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            PropertyValue::UInt32(_) => ValueKind::UInt32,
            PropertyValue::UInt32Array(_) => ValueKind::UInt32Array,
            PropertyValue::Float32(_) => ValueKind::Float32,
            PropertyValue::Range(_) => ValueKind::Range,
            PropertyValue::String(_) => ValueKind::String,
            PropertyValue::ClassId(_) => ValueKind::ClassId,
        }
    }

    #[must_use]
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            PropertyValue::UInt32(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_u32_array(&self) -> Option<&[u32]> {
        match self {
            PropertyValue::UInt32Array(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            PropertyValue::Float32(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_range(&self) -> Option<ValueRange> {
        match self {
            PropertyValue::Range(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_class_id(&self) -> Option<crate::class::ClassId> {
        match self {
            PropertyValue::ClassId(v) => Some(*v),
            _ => None,
        }
    }
}

impl Display for PropertyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::UInt32(v) => write!(f, "{v}"),
            PropertyValue::UInt32Array(v) => write!(f, "{v:?}"),
            PropertyValue::Float32(v) => write!(f, "{v}"),
            PropertyValue::Range(v) => write!(f, "{v}"),
            PropertyValue::String(v) => write!(f, "\"{v}\""),
            PropertyValue::ClassId(v) => write!(f, "{v}"),
        }
    }
}
