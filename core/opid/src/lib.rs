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

//! Batched, lock-free allocation of variant-tagged 32-bit operation IDs.

mod allocator;
mod configs;
mod error;
mod traits;
mod types;

// Allocator
pub use allocator::operation_id_allocator::OperationIdAllocator;
pub use allocator::stats::AllocatorStatsSnapshot;
// Configuration
pub use configs::{AllocatorConfig, DEFAULT_INITIAL_BATCH, DEFAULT_REFILL_BATCH, WrapPolicy};
// Errors
pub use error::OperationIdError;
// Traits
pub use traits::Validatable;
// Types
pub use types::operation_id::{
    OperationId, SEQUENCE_MASK, SEQUENCE_SPACE, VARIANT_SHIFT, variant_from_id,
};
pub use types::operation_variant::OperationVariant;
