/* Licensed to the Apache Software Foundation (ASF) under one
 * or more contributor license agreements.  See the NOTICE file
 * distributed with this work for additional information
 * regarding copyright ownership.  The ASF licenses this file
 * to you under the Apache License, Version 2.0 (the
 * "License"); you may not use this file except in compliance
 * with the License.  You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing,
 * software distributed under the License is distributed on an
 * "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
 * KIND, either express or implied.  See the License for the
 * specific language governing permissions and limitations
 * under the License.
 */

use crate::error::OperationIdError;
use crate::types::operation_variant::OperationVariant;
use std::fmt::Display;

/// Mask selecting the sequence field of an identifier.
pub const SEQUENCE_MASK: u32 = 0x00FF_FFFF;
/// Bit offset of the variant field.
pub const VARIANT_SHIFT: u32 = 24;
/// Number of distinct sequence values available per variant before reuse.
pub const SEQUENCE_SPACE: u32 = SEQUENCE_MASK + 1;

/// A 32-bit operation identifier.
///
/// Layout, most significant bit first:
///
/// ```text
/// | 31 .. 24 | 23 ................ 0 |
/// | variant  |       sequence        |
/// ```
///
/// Sequences are unique only up to 2^24 allocations per variant; after that
/// the counter feeding them wraps and values repeat.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationId(u32);

impl OperationId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Packs a sequence and a variant, discarding any sequence bits above 24.
    pub const fn from_parts(sequence: u32, variant: OperationVariant) -> Self {
        Self((sequence & SEQUENCE_MASK) | ((variant.get() as u32) << VARIANT_SHIFT))
    }

    /// Packs a sequence and a variant, rejecting a sequence wider than 24 bits.
    pub fn try_from_parts(
        sequence: u32,
        variant: OperationVariant,
    ) -> Result<Self, OperationIdError> {
        if sequence > SEQUENCE_MASK {
            return Err(OperationIdError::InvalidSequence(sequence));
        }
        Ok(Self::from_parts(sequence, variant))
    }

    pub const fn raw(&self) -> u32 {
        self.0
    }

    pub const fn sequence(&self) -> u32 {
        self.0 & SEQUENCE_MASK
    }

    pub const fn variant(&self) -> OperationVariant {
        OperationVariant::new(((self.0 >> VARIANT_SHIFT) & 0xFF) as u8)
    }
}

/// Recovers the variant tag stamped into `id`.
///
/// No check is made that `id` came from an allocator.
pub const fn variant_from_id(id: OperationId) -> OperationVariant {
    id.variant()
}

impl From<OperationId> for u32 {
    fn from(id: OperationId) -> Self {
        id.0
    }
}

impl From<u32> for OperationId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl Display for OperationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02x}:{:06x}", self.variant().get(), self.sequence())
    }
}
