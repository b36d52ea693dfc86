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

//! Turns a control handle into a [`ControlModel`].

use crate::{
    class::{classify, ControlFamily},
    error::ControlError,
    models::{BooleanControlModel, ControlModel, FeatureControlModel, SelectorControlModel},
    traits::PropertySource,
    types::{ObjectId, PropertyAddress, PropertySelector, PropertyValue, ValueKind, ValueRange},
};
use log::{debug, trace};

/// Decodes `control` into a [`ControlModel`].
///
/// Returns `None` if the object is not a boolean, selector or feature control, or if any
/// property the model needs cannot be read. Use [`try_decode`] to find out which.
pub fn decode<S: PropertySource + ?Sized>(source: &S, control: ObjectId) -> Option<ControlModel> {
    match try_decode(source, control) {
        Ok(model) => Some(model),
        Err(why) => {
            debug!("No model for control {control}: {why}");
            None
        }
    }
}

/// Decodes `control` into a [`ControlModel`], reporting why decoding stopped.
/// # Errors
/// [`ControlError::UnsupportedClass`] for objects outside the three control families,
/// otherwise the first required property that was missing or malformed.
pub fn try_decode<S: PropertySource + ?Sized>(
    source: &S,
    control: ObjectId,
) -> Result<ControlModel, ControlError> {
    let class = source.class_of(control)?;
    let name = read_string(source, control, PropertySelector::NAME.into())?;

    let family = classify(source, class).ok_or(ControlError::UnsupportedClass {
        object: control,
        class,
    })?;
    trace!("Decoding {family} control {control} ({name}) of class {class}");

    match family {
        ControlFamily::Boolean => decode_boolean(source, control, name).map(ControlModel::Boolean),
        ControlFamily::Selector => {
            decode_selector(source, control, name).map(ControlModel::Selector)
        }
        ControlFamily::Feature => decode_feature(source, control, name).map(ControlModel::Feature),
    }
}

fn decode_boolean<S: PropertySource + ?Sized>(
    source: &S,
    control: ObjectId,
    name: String,
) -> Result<BooleanControlModel, ControlError> {
    let value = read_flag(source, control, PropertySelector::BOOLEAN_VALUE)?;
    Ok(BooleanControlModel::new(control, name, value))
}

fn decode_selector<S: PropertySource + ?Sized>(
    source: &S,
    control: ObjectId,
    name: String,
) -> Result<SelectorControlModel, ControlError> {
    let item_ids = read_u32_array(source, control, PropertySelector::SELECTOR_AVAILABLE_ITEMS)?;

    // all or nothing: the first unreadable name abandons the whole list
    let items = item_ids
        .into_iter()
        .map(|id| {
            let address = PropertyAddress::qualified(PropertySelector::SELECTOR_ITEM_NAME, id);
            read_string(source, control, address).map(|item_name| (id, item_name))
        })
        .collect::<Result<Vec<(u32, String)>, ControlError>>()?;

    let current_item_id = read_u32(source, control, PropertySelector::SELECTOR_CURRENT_ITEM)?;

    Ok(SelectorControlModel::new(
        control,
        name,
        items,
        current_item_id,
    ))
}

#[allow(clippy::cast_possible_truncation)]
fn decode_feature<S: PropertySource + ?Sized>(
    source: &S,
    control: ObjectId,
    name: String,
) -> Result<FeatureControlModel, ControlError> {
    let is_enabled = read_flag(source, control, PropertySelector::FEATURE_ON_OFF)?;
    let is_automatic = read_flag(source, control, PropertySelector::FEATURE_AUTOMATIC_MANUAL)?;
    let is_in_absolute_units =
        read_flag(source, control, PropertySelector::FEATURE_ABSOLUTE_NATIVE)?;
    let is_tuning = read_flag(source, control, PropertySelector::FEATURE_TUNE)?;

    // the unit name is only read, and only present, in absolute units
    let (unit_name, range, current_value) = if is_in_absolute_units {
        let unit_name = read_string(
            source,
            control,
            PropertySelector::FEATURE_ABSOLUTE_UNIT_NAME.into(),
        )?;
        let range = read_range(source, control, PropertySelector::FEATURE_ABSOLUTE_RANGE)?;
        let value = read_f32(source, control, PropertySelector::FEATURE_ABSOLUTE_VALUE)?;
        (Some(unit_name), range, value)
    } else {
        let range = read_range(source, control, PropertySelector::FEATURE_NATIVE_RANGE)?;
        let value = read_f32(source, control, PropertySelector::FEATURE_NATIVE_VALUE)?;
        (None, range, value)
    };

    let model = FeatureControlModel::new(control, name, is_enabled, is_automatic, is_tuning);
    let (min_value, max_value) = (range.minimum as f32, range.maximum as f32);
    Ok(match unit_name {
        Some(unit_name) => model.in_absolute_units(min_value, max_value, current_value, unit_name),
        None => model.in_native_units(min_value, max_value, current_value),
    })
}

fn read_typed<S, T>(
    source: &S,
    control: ObjectId,
    address: PropertyAddress,
    kind: ValueKind,
    extract: impl FnOnce(PropertyValue) -> Option<T>,
) -> Result<T, ControlError>
where
    S: PropertySource + ?Sized,
{
    let value = source.read(control, address, kind)?;
    extract(value).ok_or(ControlError::MalformedValue {
        address,
        expected: kind,
    })
}

fn read_u32<S: PropertySource + ?Sized>(
    source: &S,
    control: ObjectId,
    selector: PropertySelector,
) -> Result<u32, ControlError> {
    read_typed(source, control, selector.into(), ValueKind::UInt32, |v| {
        v.as_u32()
    })
}

/// Flags are stored as `u32`, non-zero meaning set.
fn read_flag<S: PropertySource + ?Sized>(
    source: &S,
    control: ObjectId,
    selector: PropertySelector,
) -> Result<bool, ControlError> {
    read_u32(source, control, selector).map(|raw| raw != 0)
}

fn read_u32_array<S: PropertySource + ?Sized>(
    source: &S,
    control: ObjectId,
    selector: PropertySelector,
) -> Result<Vec<u32>, ControlError> {
    read_typed(
        source,
        control,
        selector.into(),
        ValueKind::UInt32Array,
        |v| match v {
            PropertyValue::UInt32Array(ids) => Some(ids),
            _ => None,
        },
    )
}

fn read_f32<S: PropertySource + ?Sized>(
    source: &S,
    control: ObjectId,
    selector: PropertySelector,
) -> Result<f32, ControlError> {
    read_typed(source, control, selector.into(), ValueKind::Float32, |v| {
        v.as_f32()
    })
}

fn read_range<S: PropertySource + ?Sized>(
    source: &S,
    control: ObjectId,
    selector: PropertySelector,
) -> Result<ValueRange, ControlError> {
    read_typed(source, control, selector.into(), ValueKind::Range, |v| {
        v.as_range()
    })
}

fn read_string<S: PropertySource + ?Sized>(
    source: &S,
    control: ObjectId,
    address: PropertyAddress,
) -> Result<String, ControlError> {
    read_typed(source, control, address, ValueKind::String, |v| match v {
        PropertyValue::String(s) => Some(s),
        _ => None,
    })
}
