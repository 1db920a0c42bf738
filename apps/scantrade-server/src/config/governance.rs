//! Risk governance limits.

use serde::{Deserialize, Serialize};

use crate::domain::governance::RiskLimits;

/// Governance configuration. Percentages are of total capital.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Largest single position.
    #[serde(default = "default_max_position_size_pct")]
    pub max_position_size_pct: f64,
    /// Largest combined exposure.
    #[serde(default = "default_max_portfolio_exposure_pct")]
    pub max_portfolio_exposure_pct: f64,
    /// Drawdown ceiling.
    #[serde(default = "default_max_drawdown_pct")]
    pub max_drawdown_pct: f64,
    /// Simulated order flow.
    #[serde(default = "default_paper_trading")]
    pub paper_trading: bool,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            max_position_size_pct: default_max_position_size_pct(),
            max_portfolio_exposure_pct: default_max_portfolio_exposure_pct(),
            max_drawdown_pct: default_max_drawdown_pct(),
            paper_trading: default_paper_trading(),
        }
    }
}

impl GovernanceConfig {
    /// The limits exposed to the dashboard.
    #[must_use]
    pub const fn limits(&self) -> RiskLimits {
        RiskLimits {
            max_position_size_pct: self.max_position_size_pct,
            max_portfolio_exposure_pct: self.max_portfolio_exposure_pct,
            max_drawdown_pct: self.max_drawdown_pct,
            paper_trading: self.paper_trading,
        }
    }

    pub(crate) const fn percentages(&self) -> [(&'static str, f64); 3] {
        [
            ("governance.max_position_size_pct", self.max_position_size_pct),
            ("governance.max_portfolio_exposure_pct", self.max_portfolio_exposure_pct),
            ("governance.max_drawdown_pct", self.max_drawdown_pct),
        ]
    }
}

const fn default_max_position_size_pct() -> f64 {
    5.0
}

const fn default_max_portfolio_exposure_pct() -> f64 {
    20.0
}

const fn default_max_drawdown_pct() -> f64 {
    10.0
}

const fn default_paper_trading() -> bool {
    true
}
