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

use thiserror::Error;

/// Errors raised while building identifiers or an allocator.
///
/// Allocation itself never fails; these only surface from constructors and
/// configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationIdError {
    /// Variant tag does not fit in the top byte of an identifier.
    #[error("Invalid operation variant: {0}, expected a value in 0..=255")]
    InvalidVariant(u32),
    /// Sequence does not fit in the low 24 bits of an identifier.
    #[error("Invalid operation sequence: {0:#x}, expected a value in 0..=0xFFFFFF")]
    InvalidSequence(u32),
    #[error("Invalid batch size for {name}: {value}, must be greater than zero")]
    InvalidBatchSize { name: &'static str, value: usize },
}
