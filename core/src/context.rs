// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Context provides the environment that configuration is loaded from.
///
/// ## Important
///
/// s3presign provides NO default environment. An unconfigured context uses
/// [`NoopEnv`], which sees no variables at all, so configuration loading
/// fails loudly instead of silently reading the process environment.
///
/// ## Example
///
/// ```
/// use s3presign_core::{Context, OsEnv};
///
/// let ctx = Context::new().with_env(OsEnv);
/// ```
#[derive(Clone)]
pub struct Context {
    env: Arc<dyn Env>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context").field("env", &self.env).finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context with a no-op environment.
    pub fn new() -> Self {
        Self {
            env: Arc::new(NoopEnv),
        }
    }

    /// Replace the environment implementation.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Read a variable through the configured [`Env`].
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }
}

/// Env abstracts environment variable access so configuration can be tested
/// without touching the process environment.
pub trait Env: Debug + Send + Sync + 'static {
    /// Look up a variable. Unset and non utf-8 values both read as `None`.
    fn var(&self, key: &str) -> Option<String>;
}

/// Implements Env for the OS process environment.
#[derive(Debug, Copy, Clone)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key)?.into_string().ok()
    }
}

/// StaticEnv serves variables from a fixed map.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// The environment variables to use.
    pub envs: HashMap<String, String>,
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }
}

/// NoopEnv sees no variables. It backs [`Context::new`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnv;

impl Env for NoopEnv {
    fn var(&self, _key: &str) -> Option<String> {
        None
    }
}
