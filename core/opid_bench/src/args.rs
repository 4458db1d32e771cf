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

use clap::Parser;
use std::num::NonZeroU32;
use std::path::PathBuf;

const DEFAULT_THREADS: NonZeroU32 = nonzero_lit::u32!(8);
const DEFAULT_IDS_PER_THREAD: NonZeroU32 = nonzero_lit::u32!(100_000);
const DEFAULT_VARIANTS: u16 = 4;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "opid-bench",
    version,
    about = "Drives the operation ID allocator from many threads and verifies the issued IDs"
)]
pub struct BenchArgs {
    /// Path to a TOML file with allocator settings, `OPID_*` environment
    /// variables override it
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of allocating threads
    #[arg(long, short = 't', default_value_t = DEFAULT_THREADS)]
    pub threads: NonZeroU32,

    /// Number of IDs each thread allocates
    #[arg(long, short = 'n', default_value_t = DEFAULT_IDS_PER_THREAD)]
    pub ids_per_thread: NonZeroU32,

    /// Number of distinct variants, thread `i` allocates with variant `i % variants`
    #[arg(
        long,
        default_value_t = DEFAULT_VARIANTS,
        value_parser = clap::value_parser!(u16).range(1..=256)
    )]
    pub variants: u16,

    /// Log level used when `RUST_LOG` is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl BenchArgs {
    pub fn threads(&self) -> usize {
        self.threads.get() as usize
    }

    pub fn ids_per_thread(&self) -> usize {
        self.ids_per_thread.get() as usize
    }

    pub fn total_ids(&self) -> u64 {
        u64::from(self.threads.get()) * u64::from(self.ids_per_thread.get())
    }
}
