//! In-memory provider doubles for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::services::food::{FoodLookup, FoodLookupOutcome};
use crate::services::weather::TemperatureProvider;

#[derive(Debug)]
pub struct FakeWeather {
    temperature: Mutex<Option<f64>>,
    delay: Mutex<Duration>,
    calls: AtomicUsize,
}

impl FakeWeather {
    pub fn new(temperature: Option<f64>) -> Arc<Self> {
        Arc::new(Self {
            temperature: Mutex::new(temperature),
            delay: Mutex::new(Duration::ZERO),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn set(&self, temperature: Option<f64>) {
        *self.temperature.lock().unwrap() = temperature;
    }

    /// Slows every later lookup down, as a sluggish provider would.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TemperatureProvider for FakeWeather {
    async fn current_temperature(&self, _city: &str) -> Option<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let temperature = *self.temperature.lock().unwrap();
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        temperature
    }
}

#[derive(Debug)]
pub struct FakeFood {
    outcome: FoodLookupOutcome,
}

impl FakeFood {
    pub fn new(outcome: FoodLookupOutcome) -> Arc<Self> {
        Arc::new(Self { outcome })
    }
}

#[async_trait]
impl FoodLookup for FakeFood {
    async fn lookup(&self, _query: &str) -> FoodLookupOutcome {
        self.outcome.clone()
    }
}
