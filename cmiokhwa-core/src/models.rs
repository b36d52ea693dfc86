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

use crate::{class::ControlFamily, types::ObjectId};
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A snapshot of an on/off control, e.g. a mute switch.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct BooleanControlModel {
    control_id: ObjectId,
    name: String,
    value: bool,
}

impl BooleanControlModel {
    #[must_use]
    pub fn new(control_id: ObjectId, name: String, value: bool) -> Self {
        BooleanControlModel {
            control_id,
            name,
            value,
        }
    }

    #[must_use]
    pub fn control_id(&self) -> ObjectId {
        self.control_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> bool {
        self.value
    }
}

impl Display for BooleanControlModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.control_id, self.value)
    }
}

/// A snapshot of a control whose value is one of a fixed set of named items.
///
/// Item ids are expected to be unique but this is not checked.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SelectorControlModel {
    control_id: ObjectId,
    name: String,
    items: Vec<(u32, String)>,
    current_item_id: u32,
}

impl SelectorControlModel {
    #[must_use]
    pub fn new(
        control_id: ObjectId,
        name: String,
        items: Vec<(u32, String)>,
        current_item_id: u32,
    ) -> Self {
        SelectorControlModel {
            control_id,
            name,
            items,
            current_item_id,
        }
    }

    #[must_use]
    pub fn control_id(&self) -> ObjectId {
        self.control_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `(item id, item name)` pairs, in the order the device reported them.
    #[must_use]
    pub fn items(&self) -> &[(u32, String)] {
        &self.items
    }

    #[must_use]
    pub fn current_item_id(&self) -> u32 {
        self.current_item_id
    }

    /// Position of the current item in [`items()`](SelectorControlModel::items).
    ///
    /// `None` if the device reports a current id that is not among its available items.
    #[must_use]
    pub fn current_item_index(&self) -> Option<usize> {
        self.items
            .iter()
            .position(|(id, _)| *id == self.current_item_id)
    }

    /// The current `(id, name)` pair, if the current id is listed.
    #[must_use]
    pub fn current_item(&self) -> Option<(u32, &str)> {
        self.current_item_index()
            .map(|idx| (self.items[idx].0, self.items[idx].1.as_str()))
    }
}

impl Display for SelectorControlModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.current_item() {
            Some((id, name)) => write!(
                f,
                "{} ({}): {name} [{id}] of {} items",
                self.name,
                self.control_id,
                self.items.len()
            ),
            None => write!(
                f,
                "{} ({}): unlisted item {} of {} items",
                self.name,
                self.control_id,
                self.current_item_id,
                self.items.len()
            ),
        }
    }
}

/// A snapshot of a continuous control such as exposure or focus.
///
/// `unit_name` is `Some` exactly when [`is_in_absolute_units()`](FeatureControlModel::is_in_absolute_units)
/// is `true`. The range and current value are then in those units, otherwise in the device's native scale.
#[derive(Clone, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct FeatureControlModel {
    control_id: ObjectId,
    name: String,
    is_enabled: bool,
    is_automatic: bool,
    is_tuning: bool,
    is_in_absolute_units: bool,
    min_value: f32,
    max_value: f32,
    current_value: f32,
    unit_name: Option<String>,
}

impl FeatureControlModel {
    /// Creates a feature with its mode flags set and a zero native range.
    /// Finish it with [`in_absolute_units`](Self::in_absolute_units) or
    /// [`in_native_units`](Self::in_native_units).
    #[must_use]
    pub fn new(
        control_id: ObjectId,
        name: String,
        is_enabled: bool,
        is_automatic: bool,
        is_tuning: bool,
    ) -> Self {
        FeatureControlModel {
            control_id,
            name,
            is_enabled,
            is_automatic,
            is_tuning,
            ..FeatureControlModel::default()
        }
    }

    /// Sets the range and value in the absolute unit `unit_name`.
    #[must_use]
    pub fn in_absolute_units(
        self,
        min_value: f32,
        max_value: f32,
        current_value: f32,
        unit_name: String,
    ) -> Self {
        FeatureControlModel {
            is_in_absolute_units: true,
            min_value,
            max_value,
            current_value,
            unit_name: Some(unit_name),
            ..self
        }
    }

    /// Sets the range and value in the device's native scale, dropping any unit.
    #[must_use]
    pub fn in_native_units(self, min_value: f32, max_value: f32, current_value: f32) -> Self {
        FeatureControlModel {
            is_in_absolute_units: false,
            min_value,
            max_value,
            current_value,
            unit_name: None,
            ..self
        }
    }

    #[must_use]
    pub fn control_id(&self) -> ObjectId {
        self.control_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    #[must_use]
    pub fn is_automatic(&self) -> bool {
        self.is_automatic
    }

    #[must_use]
    pub fn is_tuning(&self) -> bool {
        self.is_tuning
    }

    #[must_use]
    pub fn is_in_absolute_units(&self) -> bool {
        self.is_in_absolute_units
    }

    #[must_use]
    pub fn min_value(&self) -> f32 {
        self.min_value
    }

    #[must_use]
    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    /// `(min, max)`
    #[must_use]
    pub fn range(&self) -> (f32, f32) {
        (self.min_value, self.max_value)
    }

    #[must_use]
    pub fn current_value(&self) -> f32 {
        self.current_value
    }

    #[must_use]
    pub fn unit_name(&self) -> Option<&str> {
        self.unit_name.as_deref()
    }
}

impl Display for FeatureControlModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}): {} in ({}, {}){}, Enabled: {}, Automatic: {}, Tuning: {}",
            self.name,
            self.control_id,
            self.current_value,
            self.min_value,
            self.max_value,
            self.unit_name
                .as_ref()
                .map(|unit| format!(" {unit}"))
                .unwrap_or_default(),
            self.is_enabled,
            self.is_automatic,
            self.is_tuning
        )
    }
}

/// A decoded control. Exactly one variant is produced per successful decode.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ControlModel {
    Boolean(BooleanControlModel),
    Selector(SelectorControlModel),
    Feature(FeatureControlModel),
}

impl ControlModel {
    #[must_use]
    pub fn control_id(&self) -> ObjectId {
        match self {
            ControlModel::Boolean(m) => m.control_id(),
            ControlModel::Selector(m) => m.control_id(),
            ControlModel::Feature(m) => m.control_id(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            ControlModel::Boolean(m) => m.name(),
            ControlModel::Selector(m) => m.name(),
            ControlModel::Feature(m) => m.name(),
        }
    }

    #[must_use]
    pub fn family(&self) -> ControlFamily {
        match self {
            ControlModel::Boolean(_) => ControlFamily::Boolean,
            ControlModel::Selector(_) => ControlFamily::Selector,
            ControlModel::Feature(_) => ControlFamily::Feature,
        }
    }

    #[must_use]
    pub fn as_boolean(&self) -> Option<&BooleanControlModel> {
        match self {
            ControlModel::Boolean(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_selector(&self) -> Option<&SelectorControlModel> {
        match self {
            ControlModel::Selector(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_feature(&self) -> Option<&FeatureControlModel> {
        match self {
            ControlModel::Feature(m) => Some(m),
            _ => None,
        }
    }
}

impl Display for ControlModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlModel::Boolean(m) => write!(f, "Boolean {m}"),
            ControlModel::Selector(m) => write!(f, "Selector {m}"),
            ControlModel::Feature(m) => write!(f, "Feature {m}"),
        }
    }
}
