//! Engine Host - 推理引擎宿主
//!
//! 持有进程内唯一的引擎实例:
//! - 一次性加载（并发首个请求只会触发一次加载）
//! - 单许可信号量串行化所有推理调用
//! - 每次推理有超时上限

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{OnceCell, Semaphore};

use crate::application::error::ApplicationError;
use crate::application::ports::{
    EngineError, EngineInfo, EngineLoaderPort, SynthesisEnginePort, SynthesisRequest,
};

pub struct EngineHost {
    loader: Arc<dyn EngineLoaderPort>,
    engine: OnceCell<Arc<dyn SynthesisEnginePort>>,
    gate: Semaphore,
    timeout: Duration,
}

impl EngineHost {
    pub fn new(loader: Arc<dyn EngineLoaderPort>, timeout: Duration) -> Self {
        Self {
            loader,
            engine: OnceCell::new(),
            gate: Semaphore::new(1),
            timeout,
        }
    }

    /// 加载引擎（已加载则直接返回）
    pub async fn initialize(&self) -> Result<Arc<dyn SynthesisEnginePort>, ApplicationError> {
        let engine = self
            .engine
            .get_or_try_init(|| async {
                let started = Instant::now();
                tracing::info!("Loading synthesis engine...");
                let engine = self.loader.load().await?;
                let info = engine.info();
                tracing::info!(
                    model = %info.model,
                    device = %info.device,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Synthesis engine loaded"
                );
                Ok::<_, EngineError>(engine)
            })
            .await?;

        Ok(engine.clone())
    }

    /// 加载引擎，失败后指数退避重试直到成功
    ///
    /// 等待时间从 `initial_delay` 起每次翻倍，上限 `max_delay`
    pub async fn initialize_with_retry(
        &self,
        initial_delay: Duration,
        max_delay: Duration,
    ) -> Arc<dyn SynthesisEnginePort> {
        let mut delay = initial_delay;
        let mut attempt = 1u32;

        loop {
            match self.initialize().await {
                Ok(engine) => return engine,
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        error = %e,
                        retry_in_ms = delay.as_millis() as u64,
                        "Model load failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay = delay.saturating_mul(2).min(max_delay);
                    attempt += 1;
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.engine.initialized()
    }

    /// 引擎信息，未加载时为 None
    pub fn info(&self) -> Option<EngineInfo> {
        self.engine.get().map(|engine| engine.info())
    }

    /// 执行一次推理
    ///
    /// 引擎未加载时返回 `AdapterUnavailable`，不会触发加载
    pub async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<f32>, ApplicationError> {
        let engine = self
            .engine
            .get()
            .cloned()
            .ok_or(ApplicationError::AdapterUnavailable)?;

        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| ApplicationError::internal(format!("Engine gate closed: {}", e)))?;

        match tokio::time::timeout(self.timeout, engine.synthesize(request)).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                tracing::error!(timeout_secs = self.timeout.as_secs(), "Synthesis timed out");
                Err(ApplicationError::Timeout(self.timeout.as_secs()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct SlowEngine {
        delay: Duration,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    #[async_trait]
    impl SynthesisEnginePort for SlowEngine {
        async fn synthesize(&self, _request: SynthesisRequest) -> Result<Vec<f32>, EngineError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(vec![0.5, -0.5])
        }

        fn info(&self) -> EngineInfo {
            EngineInfo {
                device: "cpu".into(),
                model: "slow".into(),
                cuda_available: false,
            }
        }
    }

    struct CountingLoader {
        loads: AtomicUsize,
        engine: Arc<SlowEngine>,
    }

    #[async_trait]
    impl EngineLoaderPort for CountingLoader {
        async fn load(&self) -> Result<Arc<dyn SynthesisEnginePort>, EngineError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(self.engine.clone())
        }
    }

    fn loader(delay: Duration) -> Arc<CountingLoader> {
        Arc::new(CountingLoader {
            loads: AtomicUsize::new(0),
            engine: Arc::new(SlowEngine {
                delay,
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }),
        })
    }

    fn request() -> SynthesisRequest {
        SynthesisRequest::Preset {
            text: "hello".into(),
            speaker: "Claribel Dervla".into(),
            language: "en".into(),
        }
    }

    #[tokio::test]
    async fn test_synthesize_before_load_is_unavailable() {
        let host = EngineHost::new(loader(Duration::ZERO), Duration::from_secs(5));
        assert!(!host.is_ready());
        assert!(host.info().is_none());
        let err = host.synthesize(request()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::AdapterUnavailable));
    }

    #[tokio::test]
    async fn test_concurrent_initialize_loads_once() {
        let loader = loader(Duration::ZERO);
        let host = Arc::new(EngineHost::new(loader.clone(), Duration::from_secs(5)));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let host = host.clone();
            handles.push(tokio::spawn(async move { host.initialize().await.is_ok() }));
        }
        for handle in handles {
            assert!(handle.await.unwrap());
        }

        assert_eq!(loader.loads.load(Ordering::SeqCst), 1);
        assert!(host.is_ready());
        assert_eq!(host.info().unwrap().model, "slow");
    }

    #[tokio::test]
    async fn test_calls_are_serialized() {
        let loader = loader(Duration::from_millis(20));
        let host = Arc::new(EngineHost::new(loader.clone(), Duration::from_secs(5)));
        host.initialize().await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..4 {
            let host = host.clone();
            handles.push(tokio::spawn(async move { host.synthesize(request()).await }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), vec![0.5, -0.5]);
        }

        assert_eq!(loader.engine.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_slow_call_times_out() {
        let host = EngineHost::new(loader(Duration::from_secs(5)), Duration::from_millis(50));
        host.initialize().await.unwrap();

        let err = host.synthesize(request()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Timeout(_)));
    }

    struct FlakyLoader {
        failures: usize,
        loads: AtomicUsize,
        engine: Arc<SlowEngine>,
    }

    #[async_trait]
    impl EngineLoaderPort for FlakyLoader {
        async fn load(&self) -> Result<Arc<dyn SynthesisEnginePort>, EngineError> {
            let attempt = self.loads.fetch_add(1, Ordering::SeqCst);
            if attempt < self.failures {
                return Err(EngineError::LoadFailed("weights not mounted yet".into()));
            }
            Ok(self.engine.clone())
        }
    }

    #[tokio::test]
    async fn test_failed_load_is_retried() {
        let loader = Arc::new(FlakyLoader {
            failures: 2,
            loads: AtomicUsize::new(0),
            engine: Arc::new(SlowEngine {
                delay: Duration::ZERO,
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }),
        });
        let host = EngineHost::new(loader.clone(), Duration::from_secs(5));

        // 单次加载失败不会留下半初始化状态
        assert!(matches!(
            host.initialize().await,
            Err(ApplicationError::AdapterLoadFailed(_))
        ));
        assert!(!host.is_ready());

        let engine = host
            .initialize_with_retry(Duration::from_millis(5), Duration::from_millis(20))
            .await;
        assert_eq!(engine.info().model, "slow");
        assert_eq!(loader.loads.load(Ordering::SeqCst), 3);
        assert!(host.is_ready());
        assert_eq!(
            host.synthesize(request()).await.unwrap(),
            vec![0.5, -0.5]
        );
    }
}
