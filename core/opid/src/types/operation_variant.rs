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
use std::fmt::Display;

/// Tag identifying which subsystem or category an operation belongs to.
///
/// Stamped into the top byte of an [`OperationId`](crate::OperationId) at
/// allocation time and recoverable from the identifier alone.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationVariant(u8);

impl OperationVariant {
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    pub const fn get(&self) -> u8 {
        self.0
    }
}

impl From<u8> for OperationVariant {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<OperationVariant> for u8 {
    fn from(variant: OperationVariant) -> Self {
        variant.0
    }
}

impl TryFrom<u32> for OperationVariant {
    type Error = OperationIdError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map(Self)
            .map_err(|_| OperationIdError::InvalidVariant(value))
    }
}

impl Display for OperationVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
