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

use human_repr::HumanCount;
use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing allocator activity. Every counter can only grow.
///
/// Only the fill and terminate paths write here; handing out an ID touches
/// nothing but the pool.
#[derive(Debug, Default)]
pub(crate) struct AllocatorStats {
    fills: AtomicU64,
    refills: AtomicU64,
    minted: AtomicU64,
    released: AtomicU64,
    sequence_wraps: AtomicU64,
}

/// Point-in-time copy of the allocator counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AllocatorStatsSnapshot {
    /// Batches minted into the pool, including the initial one.
    pub fills: u64,
    /// Batches minted because a caller found the pool empty.
    pub refills: u64,
    /// Raw values pushed into the pool.
    pub minted: u64,
    /// Pooled values dropped by `terminate`.
    pub released: u64,
    /// Values waiting in the pool when the snapshot was taken.
    pub pooled: u64,
    /// Times the raw counter crossed into a new 2^24 epoch.
    pub sequence_wraps: u64,
}

impl AllocatorStats {
    pub(crate) fn inc_fills(&self) {
        self.fills.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_refills(&self) {
        self.refills.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_minted(&self, count: u64) {
        self.minted.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn add_released(&self, count: u64) {
        self.released.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn inc_sequence_wraps(&self) {
        self.sequence_wraps.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, pooled: u64) -> AllocatorStatsSnapshot {
        AllocatorStatsSnapshot {
            fills: self.fills.load(Ordering::Relaxed),
            refills: self.refills.load(Ordering::Relaxed),
            minted: self.minted.load(Ordering::Relaxed),
            released: self.released.load(Ordering::Relaxed),
            pooled,
            sequence_wraps: self.sequence_wraps.load(Ordering::Relaxed),
        }
    }
}

impl AllocatorStatsSnapshot {
    /// Identifiers handed out so far. Exact once no caller is allocating.
    pub fn issued(&self) -> u64 {
        self.minted
            .saturating_sub(self.pooled)
            .saturating_sub(self.released)
    }
}

impl Display for AllocatorStatsSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Fills:{fills}/Refills:{refills}/Minted:{minted}/Issued:{issued}/Pooled:{pooled}/Released:{released}/Wraps:{wraps}",
            fills = self.fills,
            refills = self.refills,
            minted = self.minted.human_count_bare(),
            issued = self.issued().human_count_bare(),
            pooled = self.pooled.human_count_bare(),
            released = self.released.human_count_bare(),
            wraps = self.sequence_wraps,
        )
    }
}
