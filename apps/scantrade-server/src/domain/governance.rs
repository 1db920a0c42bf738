//! Governance limits and the rules derived from them.

use serde::{Deserialize, Serialize};

/// Configured risk ceilings, in percent of capital.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskLimits {
    /// Largest single position.
    pub max_position_size_pct: f64,
    /// Largest combined exposure.
    pub max_portfolio_exposure_pct: f64,
    /// Drawdown at which trading should stop.
    pub max_drawdown_pct: f64,
    /// Orders are simulated.
    pub paper_trading: bool,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            max_position_size_pct: 5.0,
            max_portfolio_exposure_pct: 20.0,
            max_drawdown_pct: 10.0,
            paper_trading: true,
        }
    }
}

/// Whether a rule caps a quantity or selects a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Numeric ceiling.
    Limit,
    /// On/off switch.
    Mode,
}

/// One displayable governance rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceRule {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Rule kind.
    #[serde(rename = "type")]
    pub kind: RuleKind,
    /// Display value, e.g. `5.0%` or `Enabled`.
    pub value: String,
    /// Whether the rule is enforced.
    pub active: bool,
}

impl GovernanceRule {
    fn limit(id: &str, name: &str, pct: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: RuleKind::Limit,
            value: percent_label(pct),
            active: true,
        }
    }
}

impl RiskLimits {
    /// The active rule set, in display order.
    #[must_use]
    pub fn rules(&self) -> Vec<GovernanceRule> {
        vec![
            GovernanceRule::limit(
                "max_position_size",
                "Maximum Position Size",
                self.max_position_size_pct,
            ),
            GovernanceRule::limit(
                "max_portfolio_exposure",
                "Maximum Portfolio Exposure",
                self.max_portfolio_exposure_pct,
            ),
            GovernanceRule::limit("max_drawdown", "Maximum Drawdown", self.max_drawdown_pct),
            GovernanceRule {
                id: "paper_trading".to_string(),
                name: "Paper Trading Mode".to_string(),
                kind: RuleKind::Mode,
                value: if self.paper_trading { "Enabled" } else { "Disabled" }.to_string(),
                active: self.paper_trading,
            },
        ]
    }
}

/// `5` → `5.0%`, `12.5` → `12.5%`.
fn percent_label(pct: f64) -> String {
    format!("{pct:?}%")
}
