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

use cmiokhwa::{
    class::{ClassId, ControlFamily},
    decode,
    models::ControlModel,
    snapshot_controls, snapshot_report,
    store::PropertyStore,
    try_decode,
    types::{ObjectId, PropertySelector},
};
use std::{sync::Arc, thread};

const MUTE: ObjectId = ObjectId::new(100);
const INPUT: ObjectId = ObjectId::new(101);
const FOCUS: ObjectId = ObjectId::new(102);
const PAN: ObjectId = ObjectId::new(103);

fn webcam() -> PropertyStore {
    PropertyStore::new()
        .with_object(MUTE, ClassId::BOOLEAN_CONTROL, "Mute")
        .with_u32(MUTE, PropertySelector::BOOLEAN_VALUE, 1)
        .with_object(INPUT, ClassId::DATA_SOURCE_CONTROL, "Input")
        .with_u32_array(INPUT, PropertySelector::SELECTOR_AVAILABLE_ITEMS, vec![1, 2])
        .with_item_name(INPUT, 1, "Wide")
        .with_item_name(INPUT, 2, "Tele")
        .with_u32(INPUT, PropertySelector::SELECTOR_CURRENT_ITEM, 2)
        .with_object(FOCUS, ClassId::FOCUS_CONTROL, "Focus")
        .with_u32(FOCUS, PropertySelector::FEATURE_ON_OFF, 1)
        .with_u32(FOCUS, PropertySelector::FEATURE_AUTOMATIC_MANUAL, 1)
        .with_u32(FOCUS, PropertySelector::FEATURE_ABSOLUTE_NATIVE, 1)
        .with_u32(FOCUS, PropertySelector::FEATURE_TUNE, 0)
        .with_string(FOCUS, PropertySelector::FEATURE_ABSOLUTE_UNIT_NAME, "m")
        .with_range(FOCUS, PropertySelector::FEATURE_ABSOLUTE_RANGE, 0.1, 10.0)
        .with_f32(FOCUS, PropertySelector::FEATURE_ABSOLUTE_VALUE, 1.5)
        // absolute units without a unit name: never decodes
        .with_object(PAN, ClassId::PAN_CONTROL, "Pan")
        .with_u32(PAN, PropertySelector::FEATURE_ON_OFF, 1)
        .with_u32(PAN, PropertySelector::FEATURE_AUTOMATIC_MANUAL, 0)
        .with_u32(PAN, PropertySelector::FEATURE_ABSOLUTE_NATIVE, 1)
        .with_u32(PAN, PropertySelector::FEATURE_TUNE, 0)
        .with_range(PAN, PropertySelector::FEATURE_ABSOLUTE_RANGE, -180.0, 180.0)
        .with_f32(PAN, PropertySelector::FEATURE_ABSOLUTE_VALUE, 0.0)
}

#[test]
fn whole_device_snapshot() {
    let _ = env_logger::builder().is_test(true).try_init();
    let store = webcam();

    let models = snapshot_controls(&store, [MUTE, INPUT, FOCUS, PAN]);
    let families: Vec<ControlFamily> = models.iter().map(ControlModel::family).collect();
    assert_eq!(
        families,
        vec![
            ControlFamily::Boolean,
            ControlFamily::Selector,
            ControlFamily::Feature
        ]
    );

    let input = models[1].as_selector().unwrap();
    assert_eq!(input.current_item(), Some((2, "Tele")));

    let focus = models[2].as_feature().unwrap();
    assert_eq!(focus.unit_name(), Some("m"));
    assert!(focus.is_automatic());
    assert_eq!(focus.range(), (0.1, 10.0));
}

#[test]
fn skipped_controls_carry_their_reason() {
    let report = snapshot_report(&webcam(), [PAN]);
    assert!(report.models.is_empty());
    assert_eq!(
        report.skipped,
        vec![(
            PAN,
            cmiokhwa::error::ControlError::MissingProperty(
                PropertySelector::FEATURE_ABSOLUTE_UNIT_NAME.into()
            )
        )]
    );
    assert_eq!(decode(&webcam(), PAN), None);
    assert!(try_decode(&webcam(), PAN).is_err());
}

#[test]
fn concurrent_decodes_agree() {
    let store = Arc::new(webcam());
    let handles: Vec<_> = [MUTE, INPUT, FOCUS]
        .into_iter()
        .map(|control| {
            let store = Arc::clone(&store);
            thread::spawn(move || decode(store.as_ref(), control))
        })
        .collect();

    for (handle, control) in handles.into_iter().zip([MUTE, INPUT, FOCUS]) {
        let threaded = handle.join().unwrap();
        assert_eq!(threaded, decode(store.as_ref(), control));
        assert!(threaded.is_some());
    }
}

#[cfg(feature = "serialize")]
#[test]
fn models_serialize() {
    let model = decode(&webcam(), INPUT).unwrap();
    let json = serde_json::to_string(&model).unwrap();
    let back: ControlModel = serde_json::from_str(&json).unwrap();
    assert_eq!(back, model);
}
