//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use org_domain_resolver::{HostProbe, ResolveError, ResolveResult};
use tokio::sync::Mutex;

use crate::config::MapEnv;
use crate::services::ServiceContext;
use crate::traits::InMemoryInsecureOriginRegistry;

// ===== MockHostProbe =====

/// Probe answering from queued results; an empty queue means "not resolvable yet".
#[derive(Default)]
pub struct MockHostProbe {
    results: Mutex<VecDeque<ResolveResult<String>>>,
    probe_calls: Mutex<Vec<String>>,
    cnames: Mutex<Vec<String>>,
    delay: Mutex<Option<Duration>>,
}

impl MockHostProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_result(&self, result: ResolveResult<String>) {
        self.results.lock().await.push_back(result);
    }

    pub async fn set_cnames(&self, cnames: Vec<String>) {
        *self.cnames.lock().await = cnames;
    }

    pub async fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().await = delay;
    }

    pub async fn probe_calls(&self) -> Vec<String> {
        self.probe_calls.lock().await.clone()
    }
}

#[async_trait]
impl HostProbe for MockHostProbe {
    async fn probe(&self, host: &str) -> ResolveResult<String> {
        self.probe_calls.lock().await.push(host.to_string());

        let delay = *self.delay.lock().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.results.lock().await.pop_front().unwrap_or_else(|| {
            Err(ResolveError::ProbeFailed {
                host: host.to_string(),
                message: "NXDOMAIN".to_string(),
            })
        })
    }

    async fn cnames(&self, _host: &str) -> ResolveResult<Vec<String>> {
        Ok(self.cnames.lock().await.clone())
    }
}

// ===== Context factories =====

pub struct TestContext {
    pub ctx: Arc<ServiceContext>,
    pub probe: Arc<MockHostProbe>,
    pub registry: InMemoryInsecureOriginRegistry,
}

pub fn create_test_context() -> TestContext {
    create_test_context_with_env(MapEnv::new())
}

pub fn create_test_context_with_env(env: MapEnv) -> TestContext {
    let probe = Arc::new(MockHostProbe::new());
    let registry = InMemoryInsecureOriginRegistry::new();
    let ctx = Arc::new(ServiceContext::new(
        probe.clone(),
        Arc::new(registry.clone()),
        Arc::new(env),
    ));
    TestContext {
        ctx,
        probe,
        registry,
    }
}
