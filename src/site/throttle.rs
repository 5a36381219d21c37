use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration, Instant};

pub struct Throttle {
    state: Arc<Mutex<ThrottleState>>,
    min_interval: Duration,
}

struct ThrottleState {
    last_request: Option<Instant>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(ThrottleState {
                last_request: None,
            })),
            min_interval,
        }
    }

    pub async fn wait(&self) {
        let mut state = self.state.lock().await;

        if let Some(last) = state.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Throttling, waiting {:?}", wait_time);
                sleep(wait_time).await;
            }
        }

        state.last_request = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn spaces_consecutive_requests() {
        let throttle = Throttle::new(Duration::from_millis(30));
        let start = Instant::now();
        throttle.wait().await;
        throttle.wait().await;
        throttle.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(60));
    }
}
