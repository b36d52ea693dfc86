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

use cmiokhwa_core::{
    decode::try_decode, error::ControlError, models::ControlModel, traits::PropertySource,
    types::ObjectId,
};
use log::debug;

/// The outcome of decoding a batch of controls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SnapshotReport {
    /// Decoded models, in the order their handles were given.
    pub models: Vec<ControlModel>,
    /// Handles that produced no model, with the reason.
    pub skipped: Vec<(ObjectId, ControlError)>,
}

/// Decodes every handle in `controls`, keeping the models that decode and the reasons for those that do not.
pub fn snapshot_report<S, I>(source: &S, controls: I) -> SnapshotReport
where
    S: PropertySource + ?Sized,
    I: IntoIterator<Item = ObjectId>,
{
    let mut report = SnapshotReport::default();
    for control in controls {
        match try_decode(source, control) {
            Ok(model) => report.models.push(model),
            Err(why) => report.skipped.push((control, why)),
        }
    }
    debug!(
        "Decoded {} controls, skipped {}",
        report.models.len(),
        report.skipped.len()
    );
    report
}

/// Decodes every handle in `controls`, silently dropping the ones that yield no model.
///
/// Order is preserved.
pub fn snapshot_controls<S, I>(source: &S, controls: I) -> Vec<ControlModel>
where
    S: PropertySource + ?Sized,
    I: IntoIterator<Item = ObjectId>,
{
    snapshot_report(source, controls).models
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmiokhwa_core::{class::ClassId, store::PropertyStore, types::PropertySelector};

    #[test]
    fn report_keeps_order_and_reasons() {
        let store = PropertyStore::new()
            .with_object(ObjectId::new(1), ClassId::BOOLEAN_CONTROL, "One")
            .with_u32(ObjectId::new(1), PropertySelector::BOOLEAN_VALUE, 1)
            .with_object(ObjectId::new(2), ClassId::from_bytes(*b"????"), "Two")
            .with_object(ObjectId::new(3), ClassId::BOOLEAN_CONTROL, "Three")
            .with_u32(ObjectId::new(3), PropertySelector::BOOLEAN_VALUE, 0);

        let report = snapshot_report(&store, [3, 2, 1].map(ObjectId::new));
        let names: Vec<&str> = report.models.iter().map(ControlModel::name).collect();
        assert_eq!(names, vec!["Three", "One"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, ObjectId::new(2));
        assert!(matches!(
            report.skipped[0].1,
            ControlError::UnsupportedClass { .. }
        ));
    }

    #[test]
    fn empty_batch() {
        let models = snapshot_controls(&PropertyStore::new(), Vec::new());
        assert!(models.is_empty());
    }
}
