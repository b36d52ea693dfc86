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

use crate::traits::PropertySource;
use four_cc::FourCC;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    hash::{Hash, Hasher},
};

/// The runtime class of a media I/O object.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ClassId(pub FourCC);

impl Hash for ClassId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_u32().hash(state);
    }
}

impl ClassId {
    #[must_use]
    pub const fn from_bytes(code: [u8; 4]) -> Self {
        ClassId(FourCC(code))
    }

    #[must_use]
    pub const fn as_u32(self) -> u32 {
        u32::from_be_bytes(self.0 .0)
    }

    #[must_use]
    pub const fn from_u32(raw: u32) -> Self {
        ClassId(FourCC(raw.to_be_bytes()))
    }

    pub const OBJECT: ClassId = ClassId::from_bytes(*b"aobj");
    pub const CONTROL: ClassId = ClassId::from_bytes(*b"actl");

    pub const BOOLEAN_CONTROL: ClassId = ClassId::from_bytes(*b"togl");
    pub const SELECTOR_CONTROL: ClassId = ClassId::from_bytes(*b"slct");
    pub const FEATURE_CONTROL: ClassId = ClassId::from_bytes(*b"ftct");

    pub const JACK_CONTROL: ClassId = ClassId::from_bytes(*b"jack");
    pub const DIRECTION_CONTROL: ClassId = ClassId::from_bytes(*b"dirc");

    pub const DATA_SOURCE_CONTROL: ClassId = ClassId::from_bytes(*b"dsrc");
    pub const DATA_DESTINATION_CONTROL: ClassId = ClassId::from_bytes(*b"dest");

    pub const BLACK_LEVEL_CONTROL: ClassId = ClassId::from_bytes(*b"bklv");
    pub const WHITE_LEVEL_CONTROL: ClassId = ClassId::from_bytes(*b"whlv");
    pub const HUE_CONTROL: ClassId = ClassId::from_bytes(*b"hue ");
    pub const SATURATION_CONTROL: ClassId = ClassId::from_bytes(*b"satu");
    pub const CONTRAST_CONTROL: ClassId = ClassId::from_bytes(*b"ctst");
    pub const SHARPNESS_CONTROL: ClassId = ClassId::from_bytes(*b"shrp");
    pub const BRIGHTNESS_CONTROL: ClassId = ClassId::from_bytes(*b"brit");
    pub const GAIN_CONTROL: ClassId = ClassId::from_bytes(*b"gain");
    pub const IRIS_CONTROL: ClassId = ClassId::from_bytes(*b"iris");
    pub const SHUTTER_CONTROL: ClassId = ClassId::from_bytes(*b"shtr");
    pub const EXPOSURE_CONTROL: ClassId = ClassId::from_bytes(*b"xpsr");
    pub const WHITE_BALANCE_U_CONTROL: ClassId = ClassId::from_bytes(*b"whbu");
    pub const WHITE_BALANCE_V_CONTROL: ClassId = ClassId::from_bytes(*b"whbv");
    pub const WHITE_BALANCE_CONTROL: ClassId = ClassId::from_bytes(*b"whbl");
    pub const GAMMA_CONTROL: ClassId = ClassId::from_bytes(*b"gmma");
    pub const TEMPERATURE_CONTROL: ClassId = ClassId::from_bytes(*b"temp");
    pub const ZOOM_CONTROL: ClassId = ClassId::from_bytes(*b"zoom");
    pub const FOCUS_CONTROL: ClassId = ClassId::from_bytes(*b"fcus");
    pub const PAN_CONTROL: ClassId = ClassId::from_bytes(*b"pan ");
    pub const TILT_CONTROL: ClassId = ClassId::from_bytes(*b"tilt");
    pub const OPTICAL_FILTER_CONTROL: ClassId = ClassId::from_bytes(*b"opft");
    pub const BACKLIGHT_COMPENSATION_CONTROL: ClassId = ClassId::from_bytes(*b"bklt");
    pub const POWER_LINE_FREQUENCY_CONTROL: ClassId = ClassId::from_bytes(*b"pwfq");
    pub const NOISE_REDUCTION_CONTROL: ClassId = ClassId::from_bytes(*b"s2nr");
    pub const PAN_TILT_ABSOLUTE_CONTROL: ClassId = ClassId::from_bytes(*b"ptab");
    pub const PAN_TILT_RELATIVE_CONTROL: ClassId = ClassId::from_bytes(*b"ptrl");
    pub const ZOOM_RELATIVE_CONTROL: ClassId = ClassId::from_bytes(*b"zomr");

    /// The built-in parent of this class, if it is a known subclass.
    #[must_use]
    pub fn parent(self) -> Option<ClassId> {
        CLASS_HIERARCHY
            .iter()
            .find(|(class, _)| *class == self)
            .map(|(_, parent)| *parent)
    }

    /// Ancestry-based membership: true if `ancestor` is this class or any of its built-in parents.
    #[must_use]
    pub fn is_subclass_of(self, ancestor: ClassId) -> bool {
        walk_ancestry(self, ancestor, ClassId::parent)
    }
}

/// Walks from `class` up through `parent_of` looking for `ancestor`.
///
/// Stops at the first class seen twice, so a cyclic hierarchy answers `false` instead of looping.
#[must_use]
pub fn walk_ancestry(
    class: ClassId,
    ancestor: ClassId,
    parent_of: impl Fn(ClassId) -> Option<ClassId>,
) -> bool {
    let mut seen = Vec::new();
    let mut current = Some(class);
    while let Some(class) = current {
        if class == ancestor {
            return true;
        }
        if seen.contains(&class) {
            return false;
        }
        seen.push(class);
        current = parent_of(class);
    }
    false
}

impl From<u32> for ClassId {
    fn from(raw: u32) -> Self {
        ClassId::from_u32(raw)
    }
}

impl Display for ClassId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}'", String::from_utf8_lossy(&self.0 .0))
    }
}

const CLASS_HIERARCHY: &[(ClassId, ClassId)] = &[
    (ClassId::CONTROL, ClassId::OBJECT),
    (ClassId::BOOLEAN_CONTROL, ClassId::CONTROL),
    (ClassId::SELECTOR_CONTROL, ClassId::CONTROL),
    (ClassId::FEATURE_CONTROL, ClassId::CONTROL),
    (ClassId::JACK_CONTROL, ClassId::BOOLEAN_CONTROL),
    (ClassId::DIRECTION_CONTROL, ClassId::BOOLEAN_CONTROL),
    (ClassId::DATA_SOURCE_CONTROL, ClassId::SELECTOR_CONTROL),
    (ClassId::DATA_DESTINATION_CONTROL, ClassId::SELECTOR_CONTROL),
    (ClassId::BLACK_LEVEL_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::WHITE_LEVEL_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::HUE_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::SATURATION_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::CONTRAST_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::SHARPNESS_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::BRIGHTNESS_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::GAIN_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::IRIS_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::SHUTTER_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::EXPOSURE_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::WHITE_BALANCE_U_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::WHITE_BALANCE_V_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::WHITE_BALANCE_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::GAMMA_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::TEMPERATURE_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::ZOOM_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::FOCUS_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::PAN_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::TILT_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::OPTICAL_FILTER_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::BACKLIGHT_COMPENSATION_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::POWER_LINE_FREQUENCY_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::NOISE_REDUCTION_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::PAN_TILT_ABSOLUTE_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::PAN_TILT_RELATIVE_CONTROL, ClassId::FEATURE_CONTROL),
    (ClassId::ZOOM_RELATIVE_CONTROL, ClassId::FEATURE_CONTROL),
];

/// The three control families the decoder understands.
#[derive(Copy, Clone, Debug, Hash, Ord, PartialOrd, Eq, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ControlFamily {
    Boolean,
    Selector,
    Feature,
}

impl ControlFamily {
    /// The base class every member of this family descends from.
    #[must_use]
    pub const fn base_class(self) -> ClassId {
        match self {
            ControlFamily::Boolean => ClassId::BOOLEAN_CONTROL,
            ControlFamily::Selector => ClassId::SELECTOR_CONTROL,
            ControlFamily::Feature => ClassId::FEATURE_CONTROL,
        }
    }
}

impl Display for ControlFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// All control families, in classification order.
#[must_use]
pub const fn all_control_families() -> [ControlFamily; 3] {
    [
        ControlFamily::Boolean,
        ControlFamily::Selector,
        ControlFamily::Feature,
    ]
}

/// Classifies `class` into a [`ControlFamily`] using the source's subclass check.
///
/// Returns `None` for classes outside all three families.
pub fn classify<S: PropertySource + ?Sized>(source: &S, class: ClassId) -> Option<ControlFamily> {
    all_control_families()
        .into_iter()
        .find(|family| source.is_subclass(class, family.base_class()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PropertyStore;

    #[test]
    fn ancestry_walks_multiple_levels() {
        assert!(ClassId::ZOOM_CONTROL.is_subclass_of(ClassId::FEATURE_CONTROL));
        assert!(ClassId::ZOOM_CONTROL.is_subclass_of(ClassId::CONTROL));
        assert!(ClassId::ZOOM_CONTROL.is_subclass_of(ClassId::OBJECT));
        assert!(ClassId::JACK_CONTROL.is_subclass_of(ClassId::JACK_CONTROL));
        assert!(!ClassId::JACK_CONTROL.is_subclass_of(ClassId::SELECTOR_CONTROL));
        assert!(!ClassId::CONTROL.is_subclass_of(ClassId::BOOLEAN_CONTROL));
    }

    #[test]
    fn classify_uses_ancestry() {
        let store = PropertyStore::new();
        assert_eq!(
            classify(&store, ClassId::DATA_SOURCE_CONTROL),
            Some(ControlFamily::Selector)
        );
        assert_eq!(
            classify(&store, ClassId::BOOLEAN_CONTROL),
            Some(ControlFamily::Boolean)
        );
        assert_eq!(
            classify(&store, ClassId::FOCUS_CONTROL),
            Some(ControlFamily::Feature)
        );
        assert_eq!(classify(&store, ClassId::CONTROL), None);
        assert_eq!(classify(&store, ClassId::from_bytes(*b"zzzz")), None);
    }

    #[test]
    fn every_hardware_feature_class_is_a_feature() {
        let store = PropertyStore::new();
        for code in [
            *b"bklv", *b"whlv", *b"hue ", *b"satu", *b"ctst", *b"shrp", *b"brit", *b"gain",
            *b"iris", *b"shtr", *b"xpsr", *b"whbu", *b"whbv", *b"whbl", *b"gmma", *b"temp",
            *b"zoom", *b"fcus", *b"pan ", *b"tilt", *b"opft", *b"bklt", *b"pwfq", *b"s2nr",
            *b"ptab", *b"ptrl", *b"zomr",
        ] {
            let class = ClassId::from_bytes(code);
            assert_eq!(
                classify(&store, class),
                Some(ControlFamily::Feature),
                "{class}"
            );
        }
    }

    #[test]
    fn boolean_and_selector_subclasses() {
        let store = PropertyStore::new();
        for code in [*b"jack", *b"dirc"] {
            assert_eq!(
                classify(&store, ClassId::from_bytes(code)),
                Some(ControlFamily::Boolean)
            );
        }
        for code in [*b"dsrc", *b"dest"] {
            assert_eq!(
                classify(&store, ClassId::from_bytes(code)),
                Some(ControlFamily::Selector)
            );
        }
    }

    #[test]
    fn ancestry_walk_stops_on_cycles() {
        let a = ClassId::from_bytes(*b"aaaa");
        let b = ClassId::from_bytes(*b"bbbb");
        assert!(!walk_ancestry(a, ClassId::CONTROL, |_| Some(a)));
        let flip = |class: ClassId| Some(if class == a { b } else { a });
        assert!(!walk_ancestry(a, ClassId::CONTROL, flip));
        assert!(walk_ancestry(a, b, flip));
    }

    #[test]
    fn raw_round_trip() {
        let raw = ClassId::FEATURE_CONTROL.as_u32();
        assert_eq!(ClassId::from(raw), ClassId::FEATURE_CONTROL);
        assert_eq!(ClassId::PAN_CONTROL.to_string(), "'pan '");
    }
}
