use crate::Real;
use getset::CopyGetters;
use serde::{Deserialize, Serialize};

/// Streaming count, mean, variance and range of a sample.
#[derive(Debug, Copy, Clone, PartialEq, CopyGetters, Serialize, Deserialize)]
pub struct RunningStats {
    #[getset(get_copy = "pub")]
    size: usize,
    m1: Real,
    m2: Real,
    #[getset(get_copy = "pub")]
    min: Real,
    #[getset(get_copy = "pub")]
    max: Real,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, x: Real) {
        self.size += 1;
        self.m1 += x;
        self.m2 += x * x;
        self.min = self.min.min(x);
        self.max = self.max.max(x);
    }

    pub fn add_many<I>(&mut self, xs: I)
    where
        I: IntoIterator<Item = Real>,
    {
        for x in xs {
            self.add(x);
        }
    }

    pub fn mean(&self) -> Real {
        self.m1 / self.size as Real
    }

    pub fn var(&self) -> Real {
        let m = self.mean();
        return self.m2 / self.size as Real - m * m;
    }

    pub fn std(&self) -> Real {
        self.var().max(0.0).sqrt()
    }
}

impl Default for RunningStats {
    fn default() -> Self {
        RunningStats {
            size: 0,
            m1: 0.,
            m2: 0.,
            min: Real::INFINITY,
            max: Real::NEG_INFINITY,
        }
    }
}
