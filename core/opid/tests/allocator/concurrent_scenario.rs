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

use opid::{AllocatorConfig, OperationId, OperationIdAllocator, OperationVariant, variant_from_id};
use std::collections::{HashMap, HashSet};
use std::thread;

const THREADS: usize = 8;
const IDS_PER_THREAD: usize = 20_000;

fn allocate_concurrently(
    allocator: &OperationIdAllocator,
    threads: usize,
    ids_per_thread: usize,
    variant_of: impl Fn(usize) -> OperationVariant + Sync,
) -> Vec<Vec<OperationId>> {
    thread::scope(|scope| {
        let handles = (0..threads)
            .map(|thread_idx| {
                let allocator = allocator.clone();
                let variant = variant_of(thread_idx);
                scope.spawn(move || {
                    (0..ids_per_thread)
                        .map(|_| allocator.new_id(variant))
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("allocating thread panicked"))
            .collect()
    })
}

#[test]
fn concurrent_allocation_should_yield_unique_sequences_for_shared_variant() {
    let allocator = OperationIdAllocator::new(AllocatorConfig {
        initial_batch: 64,
        refill_batch: 32,
        ..Default::default()
    })
    .expect("valid config");

    let per_thread = allocate_concurrently(&allocator, THREADS, IDS_PER_THREAD, |_| {
        OperationVariant::new(5)
    });

    let sequences = per_thread
        .iter()
        .flatten()
        .map(|id| id.sequence())
        .collect::<HashSet<_>>();
    assert_eq!(sequences.len(), THREADS * IDS_PER_THREAD);
    assert!(per_thread.iter().flatten().all(|id| id.variant().get() == 5));
}

#[test]
fn concurrent_allocation_should_keep_variants_apart() {
    let allocator = OperationIdAllocator::new(AllocatorConfig {
        initial_batch: 16,
        refill_batch: 8,
        ..Default::default()
    })
    .expect("valid config");

    let per_thread = allocate_concurrently(&allocator, THREADS, IDS_PER_THREAD, |idx| {
        OperationVariant::new((idx % 3) as u8)
    });

    let mut by_variant: HashMap<OperationVariant, HashSet<u32>> = HashMap::new();
    let mut all_ids = HashSet::new();
    for (thread_idx, ids) in per_thread.iter().enumerate() {
        let expected = OperationVariant::new((thread_idx % 3) as u8);
        for id in ids {
            assert_eq!(variant_from_id(*id), expected);
            assert!(
                by_variant.entry(expected).or_default().insert(id.sequence()),
                "duplicate sequence {} for variant {expected}",
                id.sequence()
            );
            assert!(all_ids.insert(*id));
        }
    }
    assert_eq!(all_ids.len(), THREADS * IDS_PER_THREAD);
}

#[test]
fn concurrent_allocation_should_not_lose_counter_updates() {
    let initial_batch = 128;
    let refill_batch = 64;
    let allocator = OperationIdAllocator::new(AllocatorConfig {
        initial_batch,
        refill_batch,
        ..Default::default()
    })
    .expect("valid config");

    let per_thread = allocate_concurrently(&allocator, THREADS, IDS_PER_THREAD, |_| {
        OperationVariant::new(1)
    });

    let stats = allocator.stats();
    let issued = (THREADS * IDS_PER_THREAD) as u64;
    assert_eq!(stats.issued(), issued);
    assert_eq!(stats.fills, stats.refills + 1);
    assert_eq!(
        stats.minted,
        initial_batch as u64 + stats.refills * refill_batch as u64
    );
    assert_eq!(stats.pooled, allocator.pooled() as u64);

    // Issued sequences are distinct and all come from the minted range, so
    // together with the pooled remainder they account for every minted value.
    let sequences = per_thread
        .iter()
        .flatten()
        .map(|id| id.sequence())
        .collect::<HashSet<_>>();
    assert_eq!(sequences.len() as u64, issued);
    assert!(sequences.iter().all(|seq| u64::from(*seq) < stats.minted));
    assert_eq!(issued + allocator.pooled() as u64, stats.minted);
}
