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

use opid::{AllocatorConfig, OperationIdAllocator, OperationVariant};
use std::collections::HashSet;
use std::sync::Barrier;
use std::thread;

#[test]
fn requests_beyond_prefill_should_trigger_refill() {
    let allocator = OperationIdAllocator::new(AllocatorConfig {
        initial_batch: 4,
        refill_batch: 256,
        ..Default::default()
    })
    .expect("valid config");
    let barrier = Barrier::new(5);

    let ids = thread::scope(|scope| {
        let handles = (0..5u8)
            .map(|variant| {
                let allocator = allocator.clone();
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    allocator.new_id(OperationVariant::new(variant))
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("allocating thread panicked"))
            .collect::<Vec<_>>()
    });

    assert_eq!(ids.len(), 5);
    let sequences = ids.iter().map(|id| id.sequence()).collect::<HashSet<_>>();
    assert_eq!(sequences.len(), 5);
    let stats = allocator.stats();
    assert!(stats.refills >= 1);
    assert_eq!(stats.minted, 4 + stats.refills * 256);
}

#[test]
fn burst_within_prefill_should_stay_on_lock_free_path() {
    let allocator = OperationIdAllocator::default();

    for i in 0..1024u32 {
        let id = allocator.new_id(OperationVariant::new(3));
        assert_eq!(id.sequence(), i);
    }

    let stats = allocator.stats();
    assert_eq!(stats.fills, 1);
    assert_eq!(stats.refills, 0);

    allocator.new_id(OperationVariant::new(3));
    assert_eq!(allocator.stats().refills, 1);
}

#[test]
fn terminated_allocator_should_report_released_pool() {
    let allocator = OperationIdAllocator::default();
    allocator.new_id(OperationVariant::new(1));

    allocator.terminate();

    assert!(allocator.is_terminated());
    assert_eq!(allocator.pooled(), 0);
    let stats = allocator.stats();
    assert_eq!(stats.released, 1023);
    assert_eq!(stats.issued(), 1);
}
