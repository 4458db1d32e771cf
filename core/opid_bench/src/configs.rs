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

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use opid::{AllocatorConfig, Validatable};
use std::path::Path;
use tracing::info;

const ENV_PREFIX: &str = "OPID_";

/// Loads allocator settings from defaults, then the optional TOML file, then
/// `OPID_*` environment variables.
pub fn load_allocator_config(path: Option<&Path>) -> Result<AllocatorConfig> {
    let mut figment = Figment::from(Serialized::defaults(AllocatorConfig::default()));
    if let Some(path) = path {
        if !path.is_file() {
            bail!("Allocator config file {} does not exist", path.display());
        }
        info!("Loading allocator config from: {}", path.display());
        figment = figment.merge(Toml::file(path));
    }

    let config: AllocatorConfig = figment
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .context("parsing allocator config")?;
    config.validate().context("validating allocator config")?;
    Ok(config)
}
