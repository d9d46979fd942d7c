use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSimulation {
    /// Open model: start `rate` invocations every `interval`, for `during`.
    Inject {
        rate: u64,
        interval: Duration,
        during: Duration,
    },

    /// Closed model: keep `copies` concurrent loops running for `during`.
    KeepConstant { copies: u64, during: Duration },
}

impl LoadSimulation {
    #[must_use]
    pub fn inject(rate: u64, interval: Duration, during: Duration) -> Self {
        Self::Inject {
            rate,
            interval,
            during,
        }
    }

    #[must_use]
    pub fn keep_constant(copies: u64, during: Duration) -> Self {
        Self::KeepConstant { copies, during }
    }

    #[must_use]
    pub fn during(&self) -> Duration {
        match self {
            Self::Inject { during, .. } | Self::KeepConstant { during, .. } => *during,
        }
    }

    /// Same load shape, different length.
    #[must_use]
    pub fn with_during(self, during: Duration) -> Self {
        match self {
            Self::Inject { rate, interval, .. } => Self::Inject {
                rate,
                interval,
                during,
            },
            Self::KeepConstant { copies, .. } => Self::KeepConstant { copies, during },
        }
    }
}

impl Default for LoadSimulation {
    fn default() -> Self {
        Self::KeepConstant {
            copies: 1,
            during: Duration::from_secs(60),
        }
    }
}
