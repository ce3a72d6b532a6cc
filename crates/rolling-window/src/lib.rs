//! Fixed-Capacity Rolling Windows
//!
//! Bounded FIFO windows over recent samples. Pushing beyond capacity evicts
//! the oldest entry, so a window holds at most the last N observations and
//! ratios/means computed over it smooth out per-frame noise.

use std::collections::VecDeque;

use serde::Serialize;

/// A bounded FIFO of recent samples
#[derive(Debug, Clone, Serialize)]
pub struct RollingWindow<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    /// Create a window holding at most `capacity` samples
    pub fn new(capacity: usize) -> Self {
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a sample, evicting the oldest when full
    pub fn push(&mut self, sample: T) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl RollingWindow<f32> {
    /// Mean of the samples, 0 when empty
    pub fn mean(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f32>() / self.data.len() as f32
    }
}

impl RollingWindow<bool> {
    /// Fraction of `true` samples, 0 when empty
    pub fn ratio(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        let hits = self.data.iter().filter(|&&v| v).count();
        hits as f32 / self.data.len() as f32
    }
}
