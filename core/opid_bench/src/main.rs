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

mod args;
mod configs;
mod logging;
mod runner;

use crate::args::BenchArgs;
use crate::configs::load_allocator_config;
use crate::logging::init_logging;
use crate::runner::BenchPlan;
use anyhow::Result;
use clap::Parser;
use human_repr::HumanCount;
use opid::{OperationIdAllocator, SEQUENCE_SPACE};
use tracing::{info, warn};

fn main() -> Result<()> {
    let args = BenchArgs::parse();
    init_logging(&args.log_level)?;

    let config = load_allocator_config(args.config.as_deref())?;
    if args.total_ids() > u64::from(SEQUENCE_SPACE) {
        warn!(
            "Requested {} IDs exceeds the {} sequence values available before reuse, duplicates are expected.",
            args.total_ids().human_count_bare(),
            SEQUENCE_SPACE.human_count_bare()
        );
    }

    let allocator = OperationIdAllocator::new(config)?;
    let plan = BenchPlan {
        threads: args.threads(),
        ids_per_thread: args.ids_per_thread(),
        variants: args.variants,
    };
    info!(
        "Starting run with {} threads, {} IDs per thread, {} variants.",
        plan.threads, plan.ids_per_thread, plan.variants
    );

    let report = runner::run(&allocator, plan);
    info!("{report}");
    allocator.log_stats();
    allocator.terminate();

    report.ensure_valid()
}
