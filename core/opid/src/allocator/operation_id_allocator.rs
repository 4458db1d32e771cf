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

use crate::allocator::stats::{AllocatorStats, AllocatorStatsSnapshot};
use crate::configs::{AllocatorConfig, WrapPolicy};
use crate::error::OperationIdError;
use crate::traits::Validatable;
use crate::types::operation_id::{OperationId, SEQUENCE_MASK};
use crate::types::operation_variant::OperationVariant;
use crossbeam::queue::SegQueue;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, trace, warn};

const STATE_INITIALIZED: u8 = 1;
const STATE_TERMINATED: u8 = 2;

/// The raw counter, only ever touched while the fill lock is held.
#[derive(Debug)]
struct FillCounter {
    next: u32,
    minted_any: bool,
}

/// Hands out unique, variant-tagged [`OperationId`]s.
///
/// Raw counter values are minted in batches into a lock-free queue. Callers
/// pop from the queue without taking any lock; only an empty queue sends a
/// caller through the fill lock to mint another batch. Several callers may
/// refill at once, which costs throughput but never uniqueness because every
/// value comes from the same counter.
///
/// The handle is cheap to clone and meant to be passed to every consumer. The
/// allocator is live from construction until [`terminate`](Self::terminate);
/// using it afterwards is a programming error and panics.
#[derive(Debug, Clone)]
pub struct OperationIdAllocator {
    refill_batch: usize,
    wrap_policy: WrapPolicy,
    pool: Arc<SegQueue<u32>>,
    counter: Arc<Mutex<FillCounter>>,
    state: Arc<AtomicU8>,
    stats: Arc<AllocatorStats>,
}

impl OperationIdAllocator {
    /// Creates the allocator and pre-fills the pool with
    /// `config.initial_batch` values so the first callers never contend on
    /// the fill lock.
    pub fn new(config: AllocatorConfig) -> Result<Self, OperationIdError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: AllocatorConfig) -> Self {
        let allocator = Self {
            refill_batch: config.refill_batch,
            wrap_policy: config.wrap_policy,
            pool: Arc::new(SegQueue::new()),
            counter: Arc::new(Mutex::new(FillCounter {
                next: config.starting_counter,
                minted_any: false,
            })),
            state: Arc::new(AtomicU8::new(STATE_INITIALIZED)),
            stats: Arc::new(AllocatorStats::default()),
        };
        allocator.fill(config.initial_batch);
        info!(
            "Initialized operation ID allocator, initial batch: {}, refill batch: {}, starting counter: {}, wrap policy: {}.",
            config.initial_batch, config.refill_batch, config.starting_counter, config.wrap_policy
        );
        allocator
    }

    /// Returns a fresh identifier tagged with `variant`.
    ///
    /// Lock-free unless the pool is empty, in which case this refills it and
    /// retries until a value is obtained.
    pub fn new_id(&self, variant: OperationVariant) -> OperationId {
        self.assert_initialized();
        let raw = loop {
            if let Some(raw) = self.pool.pop() {
                break raw;
            }

            self.stats.inc_refills();
            debug!(
                "Operation ID pool is empty, refilling {} values.",
                self.refill_batch
            );
            self.fill(self.refill_batch);
        };

        OperationId::from_parts(raw, variant)
    }

    /// Mints `count` new raw values into the pool, in counter order.
    pub fn fill(&self, count: usize) {
        self.assert_initialized();
        // The counter is advanced one value at a time, so a panic elsewhere
        // while the lock was held cannot leave it inconsistent.
        let mut counter = self.counter.lock().unwrap_or_else(PoisonError::into_inner);
        let first = counter.next;
        for _ in 0..count {
            let raw = counter.next;
            if raw & SEQUENCE_MASK == 0 && counter.minted_any {
                self.on_sequence_wrap(raw);
            }
            self.pool.push(raw);
            counter.minted_any = true;
            counter.next = raw.wrapping_add(1);
        }

        self.stats.inc_fills();
        self.stats.add_minted(count as u64);
        trace!(
            "Minted {count} operation ID values starting at {first}, next: {}.",
            counter.next
        );
    }

    /// Called when the counter starts a new 2^24 epoch and the sequence field
    /// restarts at zero. With a starting counter that is not itself at an
    /// epoch start, the restarted sequences below the starting one are still
    /// fresh; reuse begins once they reach it.
    fn on_sequence_wrap(&self, raw: u32) {
        self.stats.inc_sequence_wraps();
        if self.wrap_policy == WrapPolicy::Warn {
            warn!(
                "Operation ID counter crossed an epoch boundary at {raw:#010x}, the sequence field restarted at zero. Identifiers of the same variant may collide from here on."
            );
        }
    }

    /// Ends the allocator's lifetime and releases the pool.
    ///
    /// # Panics
    /// If the allocator was already terminated.
    pub fn terminate(&self) {
        let terminated = self
            .state
            .compare_exchange(
                STATE_INITIALIZED,
                STATE_TERMINATED,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok();
        assert!(terminated, "Operation ID allocator was already terminated.");

        let mut released = 0u64;
        while self.pool.pop().is_some() {
            released += 1;
        }
        self.stats.add_released(released);
        info!(
            "Terminated operation ID allocator, released {released} pooled values. {}",
            self.stats()
        );
    }

    pub fn is_terminated(&self) -> bool {
        self.state.load(Ordering::Acquire) == STATE_TERMINATED
    }

    /// Number of values currently waiting in the pool. Only a hint under
    /// concurrent use.
    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    pub fn stats(&self) -> AllocatorStatsSnapshot {
        self.stats.snapshot(self.pooled() as u64)
    }

    pub fn log_stats(&self) {
        info!("Operation ID allocator: {}", self.stats());
    }

    #[inline]
    fn assert_initialized(&self) {
        assert!(
            self.state.load(Ordering::Acquire) == STATE_INITIALIZED,
            "Operation ID allocator used after termination."
        );
    }
}

impl Default for OperationIdAllocator {
    fn default() -> Self {
        Self::build(AllocatorConfig::default())
    }
}
