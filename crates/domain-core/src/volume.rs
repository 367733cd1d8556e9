//! 体积值对象
//!
//! 单位统一为千桶（KB）

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

use crate::precision::round3;

/// 体积（千桶）
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volume(f64);

impl Volume {
    pub const ZERO: Volume = Volume(0.0);

    pub fn new(kilo_barrels: f64) -> Self {
        Self(kilo_barrels)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// 扣减体积，结果不低于零
    pub fn saturating_sub(self, other: Volume) -> Volume {
        Volume((self.0 - other.0).max(0.0))
    }

    /// 保留 3 位小数
    pub fn rounded(self) -> Volume {
        Volume(round3(self.0))
    }
}

impl Add for Volume {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Volume(self.0 + other.0)
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*} KB", p, self.0),
            None => write!(f, "{} KB", self.0),
        }
    }
}
