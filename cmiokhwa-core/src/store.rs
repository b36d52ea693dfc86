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
    class::{walk_ancestry, ClassId},
    error::PropertyError,
    traits::PropertySource,
    types::{ObjectId, PropertyAddress, PropertySelector, PropertyValue, ValueKind, ValueRange},
};
use std::collections::HashMap;

/// An in-memory [`PropertySource`].
///
/// Useful for tests and for hosts that replay captured control state. Values are returned
/// as stored, whatever kind the reader asks for.
#[derive(Clone, Debug, Default)]
pub struct PropertyStore {
    properties: HashMap<(ObjectId, PropertyAddress), PropertyValue>,
    subclasses: HashMap<ClassId, ClassId>,
}

impl PropertyStore {
    #[must_use]
    pub fn new() -> Self {
        PropertyStore::default()
    }

    /// Sets the value at `address` of `object`, returning the previous one.
    pub fn set(
        &mut self,
        object: ObjectId,
        address: PropertyAddress,
        value: PropertyValue,
    ) -> Option<PropertyValue> {
        self.properties.insert((object, address), value)
    }

    /// Removes the value at `address` of `object`, returning it.
    pub fn remove(&mut self, object: ObjectId, address: PropertyAddress) -> Option<PropertyValue> {
        self.properties.remove(&(object, address))
    }

    /// Registers `class` as a direct subclass of `parent`, on top of the built-in hierarchy.
    pub fn register_subclass(&mut self, class: ClassId, parent: ClassId) {
        self.subclasses.insert(class, parent);
    }

    #[must_use]
    pub fn with_value(
        mut self,
        object: ObjectId,
        address: PropertyAddress,
        value: PropertyValue,
    ) -> Self {
        self.set(object, address, value);
        self
    }

    /// Adds an object with its class and display name.
    #[must_use]
    pub fn with_object(self, object: ObjectId, class: ClassId, name: &str) -> Self {
        self.with_value(
            object,
            PropertySelector::CLASS.into(),
            PropertyValue::ClassId(class),
        )
        .with_string(object, PropertySelector::NAME, name)
    }

    #[must_use]
    pub fn with_u32(self, object: ObjectId, selector: PropertySelector, value: u32) -> Self {
        self.with_value(object, selector.into(), PropertyValue::UInt32(value))
    }

    #[must_use]
    pub fn with_u32_array(
        self,
        object: ObjectId,
        selector: PropertySelector,
        values: Vec<u32>,
    ) -> Self {
        self.with_value(object, selector.into(), PropertyValue::UInt32Array(values))
    }

    #[must_use]
    pub fn with_f32(self, object: ObjectId, selector: PropertySelector, value: f32) -> Self {
        self.with_value(object, selector.into(), PropertyValue::Float32(value))
    }

    #[must_use]
    pub fn with_range(
        self,
        object: ObjectId,
        selector: PropertySelector,
        minimum: f64,
        maximum: f64,
    ) -> Self {
        self.with_value(
            object,
            selector.into(),
            PropertyValue::Range(ValueRange::new(minimum, maximum)),
        )
    }

    #[must_use]
    pub fn with_string(self, object: ObjectId, selector: PropertySelector, value: &str) -> Self {
        self.with_value(
            object,
            selector.into(),
            PropertyValue::String(value.to_string()),
        )
    }

    /// Adds the name of selector item `item` of `object`.
    #[must_use]
    pub fn with_item_name(self, object: ObjectId, item: u32, name: &str) -> Self {
        self.with_value(
            object,
            PropertyAddress::qualified(PropertySelector::SELECTOR_ITEM_NAME, item),
            PropertyValue::String(name.to_string()),
        )
    }

    #[must_use]
    pub fn with_subclass(mut self, class: ClassId, parent: ClassId) -> Self {
        self.register_subclass(class, parent);
        self
    }

    #[must_use]
    pub fn without(mut self, object: ObjectId, address: PropertyAddress) -> Self {
        self.remove(object, address);
        self
    }

    fn parent_of(&self, class: ClassId) -> Option<ClassId> {
        self.subclasses
            .get(&class)
            .copied()
            .or_else(|| class.parent())
    }
}

impl PropertySource for PropertyStore {
    fn read(
        &self,
        object: ObjectId,
        address: PropertyAddress,
        _kind: ValueKind,
    ) -> Result<PropertyValue, PropertyError> {
        self.properties
            .get(&(object, address))
            .cloned()
            .ok_or(PropertyError::NotFound { object, address })
    }

    fn is_subclass(&self, class: ClassId, ancestor: ClassId) -> bool {
        walk_ancestry(class, ancestor, |class| self.parent_of(class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        class::{classify, ControlFamily},
        decode::decode,
    };

    #[test]
    fn missing_property_is_not_found() {
        let store = PropertyStore::new();
        let address = PropertyAddress::new(PropertySelector::NAME);
        assert_eq!(
            store.read(ObjectId::new(1), address, ValueKind::String),
            Err(PropertyError::NotFound {
                object: ObjectId::new(1),
                address
            })
        );
    }

    #[test]
    fn qualified_and_unqualified_reads_are_distinct() {
        let store = PropertyStore::new()
            .with_string(ObjectId::new(1), PropertySelector::SELECTOR_ITEM_NAME, "plain")
            .with_item_name(ObjectId::new(1), 4, "four");
        let plain = store
            .read(
                ObjectId::new(1),
                PropertySelector::SELECTOR_ITEM_NAME.into(),
                ValueKind::String,
            )
            .unwrap();
        let four = store
            .read(
                ObjectId::new(1),
                PropertyAddress::qualified(PropertySelector::SELECTOR_ITEM_NAME, 4),
                ValueKind::String,
            )
            .unwrap();
        assert_eq!(plain.as_str(), Some("plain"));
        assert_eq!(four.as_str(), Some("four"));
    }

    #[test]
    fn class_of_reads_class_property() {
        let store =
            PropertyStore::new().with_object(ObjectId::new(2), ClassId::ZOOM_CONTROL, "Zoom");
        assert_eq!(store.class_of(ObjectId::new(2)), Ok(ClassId::ZOOM_CONTROL));
    }

    #[test]
    fn class_of_accepts_raw_u32() {
        let store = PropertyStore::new().with_u32(
            ObjectId::new(2),
            PropertySelector::CLASS,
            ClassId::TILT_CONTROL.as_u32(),
        );
        assert_eq!(store.class_of(ObjectId::new(2)), Ok(ClassId::TILT_CONTROL));
    }

    #[test]
    fn registered_subclasses_take_part_in_classification() {
        let vendor = ClassId::from_bytes(*b"vndr");
        let store = PropertyStore::new().with_subclass(vendor, ClassId::HUE_CONTROL);
        assert!(store.is_subclass(vendor, ClassId::FEATURE_CONTROL));
        assert_eq!(classify(&store, vendor), Some(ControlFamily::Feature));
        assert_eq!(classify(&PropertyStore::new(), vendor), None);
    }

    #[test]
    fn cyclic_registrations_classify_as_unknown() {
        let a = ClassId::from_bytes(*b"loop");
        let b = ClassId::from_bytes(*b"pool");
        let control = ObjectId::new(11);

        let store = PropertyStore::new()
            .with_subclass(a, a)
            .with_object(control, a, "Loop");
        assert!(!store.is_subclass(a, ClassId::BOOLEAN_CONTROL));
        assert_eq!(decode(&store, control), None);

        let store = PropertyStore::new()
            .with_subclass(a, b)
            .with_subclass(b, a)
            .with_object(control, a, "Loop");
        assert!(store.is_subclass(a, b));
        assert_eq!(classify(&store, a), None);
        assert_eq!(decode(&store, control), None);
    }

    #[test]
    fn vendor_boolean_control_decodes() {
        let vendor = ClassId::from_bytes(*b"vbol");
        let control = ObjectId::new(9);
        let store = PropertyStore::new()
            .with_subclass(vendor, ClassId::BOOLEAN_CONTROL)
            .with_object(control, vendor, "Privacy Shutter")
            .with_u32(control, PropertySelector::BOOLEAN_VALUE, 1);
        let model = decode(&store, control).unwrap();
        assert_eq!(model.as_boolean().map(|m| m.value()), Some(true));
    }
}
