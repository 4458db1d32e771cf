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

use ahash::{AHashMap, AHashSet};
use anyhow::{Result, bail};
use human_repr::HumanCount;
use opid::{
    AllocatorStatsSnapshot, OperationId, OperationIdAllocator, OperationVariant, variant_from_id,
};
use std::fmt::Display;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Shape of a single benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchPlan {
    pub threads: usize,
    pub ids_per_thread: usize,
    pub variants: u16,
}

impl BenchPlan {
    pub fn variant_for(&self, thread_idx: usize) -> OperationVariant {
        // `variants` is at most 256, so the remainder always fits in a byte.
        OperationVariant::new((thread_idx % usize::from(self.variants)) as u8)
    }

    pub fn total_ids(&self) -> u64 {
        (self.threads * self.ids_per_thread) as u64
    }
}

#[derive(Debug, Clone)]
pub struct BenchReport {
    pub plan: BenchPlan,
    pub elapsed: Duration,
    pub stats: AllocatorStatsSnapshot,
    /// IDs whose sequence was already issued for the same variant.
    pub duplicates: u64,
    /// IDs whose decoded variant differs from the one requested.
    pub variant_mismatches: u64,
    /// Allocating threads that panicked; their IDs are missing from the run.
    pub panicked_threads: usize,
    /// IDs actually collected from the allocating threads.
    pub collected_ids: u64,
}

impl BenchReport {
    pub fn ids_per_sec(&self) -> u64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return self.plan.total_ids();
        }
        (self.plan.total_ids() as f64 / secs) as u64
    }

    /// Duplicates are tolerated only once the counter has wrapped, which is
    /// the documented uniqueness bound.
    pub fn ensure_valid(&self) -> Result<()> {
        if self.panicked_threads > 0 {
            bail!(
                "{} of {} allocating threads panicked",
                self.panicked_threads,
                self.plan.threads
            );
        }
        if self.collected_ids != self.plan.total_ids() {
            bail!(
                "collected {} operation IDs, expected {}",
                self.collected_ids,
                self.plan.total_ids()
            );
        }
        if self.variant_mismatches > 0 {
            bail!(
                "{} operation IDs decoded to the wrong variant",
                self.variant_mismatches
            );
        }
        if self.duplicates > 0 && self.stats.sequence_wraps == 0 {
            bail!(
                "{} duplicate operation IDs issued without a sequence wrap",
                self.duplicates
            );
        }
        Ok(())
    }
}

impl Display for BenchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Threads:{threads}/IdsPerThread:{per_thread}/Variants:{variants}/Total:{total}/Elapsed:{elapsed:.3}s/Rate:{rate} ids/s/Refills:{refills}/Duplicates:{duplicates}/Mismatches:{mismatches}/Panicked:{panicked}",
            threads = self.plan.threads,
            per_thread = self.plan.ids_per_thread.human_count_bare(),
            variants = self.plan.variants,
            total = self.plan.total_ids().human_count_bare(),
            elapsed = self.elapsed.as_secs_f64(),
            rate = self.ids_per_sec().human_count_bare(),
            refills = self.stats.refills,
            duplicates = self.duplicates,
            mismatches = self.variant_mismatches,
            panicked = self.panicked_threads,
        )
    }
}

/// Allocates `plan.total_ids()` IDs across `plan.threads` threads and checks
/// them for per-variant uniqueness and variant round-trip.
pub fn run(allocator: &OperationIdAllocator, plan: BenchPlan) -> BenchReport {
    let start = Instant::now();
    let (per_thread, panicked_threads) = thread::scope(|scope| {
        let handles = (0..plan.threads)
            .map(|thread_idx| {
                let allocator = allocator.clone();
                let variant = plan.variant_for(thread_idx);
                scope.spawn(move || {
                    let ids = (0..plan.ids_per_thread)
                        .map(|_| allocator.new_id(variant))
                        .collect::<Vec<_>>();
                    debug!("Thread {thread_idx} allocated {} IDs.", ids.len());
                    (variant, ids)
                })
            })
            .collect::<Vec<_>>();

        let mut collected = Vec::with_capacity(handles.len());
        let mut panicked = 0usize;
        for (thread_idx, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(result) => collected.push(result),
                Err(_) => {
                    warn!("Allocating thread {thread_idx} panicked, its IDs are excluded.");
                    panicked += 1;
                }
            }
        }
        (collected, panicked)
    });
    let elapsed = start.elapsed();

    let (duplicates, variant_mismatches) = verify(&per_thread);
    let collected_ids = per_thread.iter().map(|(_, ids)| ids.len() as u64).sum::<u64>();
    BenchReport {
        plan,
        elapsed,
        stats: allocator.stats(),
        duplicates,
        variant_mismatches,
        panicked_threads,
        collected_ids,
    }
}

/// Returns `(duplicates, variant_mismatches)` over all collected IDs.
fn verify(per_thread: &[(OperationVariant, Vec<OperationId>)]) -> (u64, u64) {
    let mut seen: AHashMap<OperationVariant, AHashSet<u32>> = AHashMap::new();
    let mut duplicates = 0u64;
    let mut variant_mismatches = 0u64;

    for (variant, ids) in per_thread {
        let sequences = seen.entry(*variant).or_default();
        for id in ids {
            if variant_from_id(*id) != *variant {
                variant_mismatches += 1;
            }
            if !sequences.insert(id.sequence()) {
                duplicates += 1;
            }
        }
    }

    (duplicates, variant_mismatches)
}
