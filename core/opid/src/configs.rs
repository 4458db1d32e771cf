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
use crate::traits::Validatable;
use serde::{Deserialize, Serialize};
use strum::Display;

pub const DEFAULT_INITIAL_BATCH: usize = 1024;
pub const DEFAULT_REFILL_BATCH: usize = 256;

/// What the allocator does when the raw counter crosses into a new 2^24
/// epoch, i.e. when sequences start repeating.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize, Display,
)]
#[serde(rename_all = "lowercase")]
pub enum WrapPolicy {
    /// Count the wrap and log a warning.
    #[default]
    #[strum(to_string = "warn")]
    Warn,
    /// Count the wrap silently.
    #[strum(to_string = "accept")]
    Accept,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Values minted into the pool at construction.
    pub initial_batch: usize,
    /// Values minted each time a caller finds the pool empty.
    pub refill_batch: usize,
    /// First raw counter value to mint.
    pub starting_counter: u32,
    pub wrap_policy: WrapPolicy,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            initial_batch: DEFAULT_INITIAL_BATCH,
            refill_batch: DEFAULT_REFILL_BATCH,
            starting_counter: u32::default(),
            wrap_policy: WrapPolicy::default(),
        }
    }
}

impl Validatable<OperationIdError> for AllocatorConfig {
    fn validate(&self) -> Result<(), OperationIdError> {
        if self.initial_batch == 0 {
            return Err(OperationIdError::InvalidBatchSize {
                name: "initial_batch",
                value: self.initial_batch,
            });
        }

        // A zero refill would leave `new_id` spinning on an empty pool.
        if self.refill_batch == 0 {
            return Err(OperationIdError::InvalidBatchSize {
                name: "refill_batch",
                value: self.refill_batch,
            });
        }

        Ok(())
    }
}
