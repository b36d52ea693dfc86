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

#![allow(clippy::not_unsafe_ptr_arg_deref)]
#[cfg(target_os = "macos")]
mod internal {
    use cmiokhwa_core::{
        class::ClassId,
        error::PropertyError,
        traits::PropertySource,
        types::{ObjectId, PropertyAddress, PropertyValue, ValueKind, ValueRange},
    };
    use core_foundation::{
        base::TCFType,
        string::{CFString, CFStringRef},
    };
    use log::trace;
    use std::{ffi::c_void, mem::size_of};

    type OSStatus = i32;

    const NO_ERR: OSStatus = 0;
    const SCOPE_GLOBAL: u32 = u32::from_be_bytes(*b"glob");
    const ELEMENT_MAIN: u32 = 0;

    #[repr(C)]
    #[derive(Copy, Clone, Debug)]
    struct CMIOObjectPropertyAddress {
        selector: u32,
        scope: u32,
        element: u32,
    }

    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default)]
    struct AudioValueRange {
        minimum: f64,
        maximum: f64,
    }

    #[link(name = "CoreMediaIO", kind = "framework")]
    extern "C" {
        fn CMIOObjectHasProperty(object_id: u32, address: *const CMIOObjectPropertyAddress) -> u8;

        fn CMIOObjectGetPropertyDataSize(
            object_id: u32,
            address: *const CMIOObjectPropertyAddress,
            qualifier_data_size: u32,
            qualifier_data: *const c_void,
            data_size: *mut u32,
        ) -> OSStatus;

        fn CMIOObjectGetPropertyData(
            object_id: u32,
            address: *const CMIOObjectPropertyAddress,
            qualifier_data_size: u32,
            qualifier_data: *const c_void,
            data_size: u32,
            data_used: *mut u32,
            data: *mut c_void,
        ) -> OSStatus;
    }

    /// A [`PropertySource`] backed by the system's CoreMediaIO object model.
    ///
    /// Reads are plain `CMIOObjectGetPropertyData` calls, which the system allows from any thread.
    #[derive(Copy, Clone, Debug, Default)]
    pub struct CoreMediaIOSource;

    impl CoreMediaIOSource {
        #[must_use]
        pub fn new() -> Self {
            CoreMediaIOSource
        }

        fn raw_address(address: PropertyAddress) -> CMIOObjectPropertyAddress {
            CMIOObjectPropertyAddress {
                selector: address.selector().as_u32(),
                scope: SCOPE_GLOBAL,
                element: ELEMENT_MAIN,
            }
        }

        /// Reads the raw bytes of a property into a buffer of `T`s.
        fn read_raw<T: Copy + Default>(
            object: ObjectId,
            address: PropertyAddress,
        ) -> Result<Vec<T>, PropertyError> {
            let raw_address = Self::raw_address(address);
            let qualifier = address.qualifier();
            let (qualifier_size, qualifier_ptr) = match &qualifier {
                Some(q) => (size_of::<u32>() as u32, (q as *const u32).cast::<c_void>()),
                None => (0, std::ptr::null()),
            };

            if unsafe { CMIOObjectHasProperty(object.raw(), &raw_address) } == 0 {
                return Err(PropertyError::NotFound { object, address });
            }

            let mut data_size: u32 = 0;
            let status = unsafe {
                CMIOObjectGetPropertyDataSize(
                    object.raw(),
                    &raw_address,
                    qualifier_size,
                    qualifier_ptr,
                    &mut data_size,
                )
            };
            if status != NO_ERR {
                return Err(PropertyError::Backend {
                    object,
                    address,
                    status,
                });
            }

            let count = data_size as usize / size_of::<T>();
            let mut buffer = vec![T::default(); count];
            let mut data_used: u32 = 0;
            let status = unsafe {
                CMIOObjectGetPropertyData(
                    object.raw(),
                    &raw_address,
                    qualifier_size,
                    qualifier_ptr,
                    (count * size_of::<T>()) as u32,
                    &mut data_used,
                    buffer.as_mut_ptr().cast::<c_void>(),
                )
            };
            if status != NO_ERR {
                return Err(PropertyError::Backend {
                    object,
                    address,
                    status,
                });
            }
            buffer.truncate(data_used as usize / size_of::<T>());
            trace!("Read {data_used} bytes from {address} of {object}");
            Ok(buffer)
        }

        fn read_one<T: Copy + Default>(
            object: ObjectId,
            address: PropertyAddress,
            expected: ValueKind,
        ) -> Result<T, PropertyError> {
            Self::read_raw::<T>(object, address)?
                .first()
                .copied()
                .ok_or(PropertyError::Malformed {
                    object,
                    address,
                    expected,
                    reason: "property data is too short".to_string(),
                })
        }
    }

    impl PropertySource for CoreMediaIOSource {
        fn read(
            &self,
            object: ObjectId,
            address: PropertyAddress,
            kind: ValueKind,
        ) -> Result<PropertyValue, PropertyError> {
            match kind {
                ValueKind::UInt32 => Self::read_one::<u32>(object, address, kind).map(PropertyValue::UInt32),
                ValueKind::ClassId => Self::read_one::<u32>(object, address, kind)
                    .map(|raw| PropertyValue::ClassId(ClassId::from_u32(raw))),
                ValueKind::UInt32Array => {
                    Self::read_raw::<u32>(object, address).map(PropertyValue::UInt32Array)
                }
                ValueKind::Float32 => Self::read_one::<f32>(object, address, kind).map(PropertyValue::Float32),
                ValueKind::Range => Self::read_one::<AudioValueRange>(object, address, kind).map(|range| {
                    PropertyValue::Range(ValueRange::new(range.minimum, range.maximum))
                }),
                ValueKind::String => {
                    let raw = Self::read_one::<usize>(object, address, kind)?;
                    let string_ref = raw as CFStringRef;
                    if string_ref.is_null() {
                        return Err(PropertyError::Malformed {
                            object,
                            address,
                            expected: kind,
                            reason: "null CFString".to_string(),
                        });
                    }
                    // the system hands out a retained CFString which we now own
                    let string = unsafe { CFString::wrap_under_create_rule(string_ref) };
                    Ok(PropertyValue::String(string.to_string()))
                }
            }
        }
    }

}

#[cfg(target_os = "macos")]
pub use crate::internal::*;
