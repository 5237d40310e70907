//! Per-request advice.
//!
//! Unlike the market summary, these answers are not cached: each request
//! prompts the generator and any failure goes back to that caller only.

use price_feed::PriceRow;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::AdvisorError;
use crate::generator::TextGenerator;
use crate::prompts;
use crate::Result;

/// Holder's gold position
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSnapshot {
    /// Total grams held
    pub total_emas: f64,
    /// Average purchase price per gram
    pub avg_beli: f64,
    /// Current profit (negative for a loss)
    pub total_profit: f64,
}

/// Largest magnitude accepted for any rupiah amount or gram count
pub const MAX_AMOUNT: f64 = 1e15;

impl PortfolioSnapshot {
    pub fn validate(&self) -> Result<()> {
        require_in_range("totalEmas", self.total_emas)?;
        require_in_range("avgBeli", self.avg_beli)?;
        require_in_range("totalProfit", self.total_profit)?;
        require_non_negative("totalEmas", self.total_emas)?;
        require_non_negative("avgBeli", self.avg_beli)?;
        Ok(())
    }
}

/// Savings goal to plan towards
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsGoal {
    pub name: String,
    /// Target amount in rupiah
    pub target: f64,
    /// Horizon in years
    pub years: f64,
    /// Current value of gold savings in rupiah
    pub current_value: f64,
}

impl SavingsGoal {
    /// Longest horizon accepted
    pub const MAX_YEARS: f64 = 100.0;

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AdvisorError::InvalidInput("goalName must not be empty".into()));
        }
        require_in_range("goalTarget", self.target)?;
        require_in_range("goalYears", self.years)?;
        require_in_range("currentValue", self.current_value)?;

        if self.target <= 0.0 {
            return Err(AdvisorError::InvalidInput("goalTarget must be positive".into()));
        }
        if self.years <= 0.0 || self.years > Self::MAX_YEARS {
            return Err(AdvisorError::InvalidInput(format!(
                "goalYears must be between 0 and {}",
                Self::MAX_YEARS
            )));
        }
        require_non_negative("currentValue", self.current_value)
    }
}

fn require_in_range(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        Err(AdvisorError::InvalidInput(format!("{} must be a number", field)))
    } else if value.abs() > MAX_AMOUNT {
        Err(AdvisorError::InvalidInput(format!("{} is out of range", field)))
    } else {
        Ok(())
    }
}

fn require_non_negative(field: &str, value: f64) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(AdvisorError::InvalidInput(format!("{} must not be negative", field)))
    }
}

/// Prompts the generator for portfolio insight and goal plans
#[derive(Clone)]
pub struct Advisor {
    generator: Arc<dyn TextGenerator>,
}

impl Advisor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Insight on a portfolio, using the current price when known
    pub async fn portfolio_insight(
        &self,
        snapshot: &PortfolioSnapshot,
        price: Option<&PriceRow>,
    ) -> Result<String> {
        snapshot.validate()?;
        let prompt = prompts::portfolio_insight_prompt(snapshot, price);
        self.generate("portfolio_insight", &prompt).await
    }

    /// Savings plan for a goal, using the current price when known
    pub async fn goal_plan(&self, goal: &SavingsGoal, price: Option<&PriceRow>) -> Result<String> {
        goal.validate()?;
        let prompt = prompts::goal_plan_prompt(goal, price);
        self.generate("goal_plan", &prompt).await
    }

    async fn generate(&self, kind: &'static str, prompt: &str) -> Result<String> {
        match self.generator.generate_text(prompt).await {
            Ok(text) => {
                info!(kind, chars = text.len(), "Advice generated");
                Ok(text)
            }
            Err(e) => {
                error!(kind, error = %e, "Advice generation failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Records prompts and answers with a fixed reply
    #[derive(Default)]
    struct RecordingGenerator {
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate_text(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().push(prompt.to_string());
            if self.fail {
                Err(AdvisorError::Upstream("quota exceeded".into()))
            } else {
                Ok("saran".to_string())
            }
        }
    }

    fn snapshot() -> PortfolioSnapshot {
        PortfolioSnapshot {
            total_emas: 10.0,
            avg_beli: 900_000.0,
            total_profit: 500_000.0,
        }
    }

    fn goal() -> SavingsGoal {
        SavingsGoal {
            name: "Rumah".into(),
            target: 100_000_000.0,
            years: 10.0,
            current_value: 0.0,
        }
    }

    #[tokio::test]
    async fn test_portfolio_insight_uses_price() {
        let generator = Arc::new(RecordingGenerator::default());
        let advisor = Advisor::new(generator.clone());
        let price = PriceRow::new("1gram", "1000000", "950000");

        let text = advisor.portfolio_insight(&snapshot(), Some(&price)).await.unwrap();

        assert_eq!(text, "saran");
        let prompts = generator.prompts.lock();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Rp 950.000"));
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_generator() {
        let generator = Arc::new(RecordingGenerator::default());
        let advisor = Advisor::new(generator.clone());

        let mut bad = snapshot();
        bad.total_emas = -1.0;
        let result = advisor.portfolio_insight(&bad, None).await;
        assert_matches!(result, Err(AdvisorError::InvalidInput(_)));

        let mut bad_goal = goal();
        bad_goal.years = 0.0;
        let result = advisor.goal_plan(&bad_goal, None).await;
        assert_matches!(result, Err(ref e) if e.is_client_error());

        assert!(generator.prompts.lock().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_returned() {
        let generator = Arc::new(RecordingGenerator {
            fail: true,
            ..Default::default()
        });
        let advisor = Advisor::new(generator);

        let result = advisor.goal_plan(&goal(), None).await;
        assert_matches!(result, Err(AdvisorError::Upstream(_)));
    }

    #[test]
    fn test_goal_validation() {
        assert!(goal().validate().is_ok());

        let mut g = goal();
        g.name = "   ".into();
        assert!(g.validate().is_err());

        let mut g = goal();
        g.target = f64::NAN;
        assert!(g.validate().is_err());

        let mut g = goal();
        g.years = 101.0;
        assert!(g.validate().is_err());

        let mut g = goal();
        g.current_value = -5.0;
        assert!(g.validate().is_err());
    }

    #[test]
    fn test_huge_amounts_are_rejected() {
        let mut s = snapshot();
        s.avg_beli = 1e30;
        assert_matches!(s.validate(), Err(AdvisorError::InvalidInput(ref m)) if m.contains("avgBeli"));

        let mut s = snapshot();
        s.total_profit = -MAX_AMOUNT;
        assert!(s.validate().is_ok());

        let mut g = goal();
        g.target = MAX_AMOUNT * 10.0;
        assert!(g.validate().is_err());
    }

    #[test]
    fn test_negative_profit_is_allowed() {
        let mut s = snapshot();
        s.total_profit = -1_000_000.0;
        assert!(s.validate().is_ok());
    }
}
