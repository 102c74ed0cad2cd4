use crate::errors::ShopError;
use crate::models::{Mission, Product};
use super::state::{Session, Step};
use tracing::{debug, info, warn};

/// Largest quantity accepted in a single add.
pub const MAX_QUANTITY_PER_ADD: i64 = 99;

/// Whether the submit control is enabled, and why not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Ready,
    EmptyCart,
    OverBudget { over_by: u64 },
}

impl SubmitStatus {
    pub fn is_enabled(&self) -> bool {
        matches!(self, SubmitStatus::Ready)
    }

    pub fn describe(&self) -> String {
        match self {
            SubmitStatus::Ready => "ready to submit".to_string(),
            SubmitStatus::EmptyCart => "the cart is empty".to_string(),
            SubmitStatus::OverBudget { over_by } => format!(
                "over budget by {}; remove items or lower quantities",
                crate::utils::formatting::format_won(*over_by)
            ),
        }
    }
}

/// Redirects applied by the flow guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowNotice {
    /// Shopping with no active mission; back to mission selection.
    NoMission,
    /// Result reached without a submission.
    NotSubmitted,
    /// Result reached with an empty cart.
    EmptyCart,
}

impl FlowNotice {
    pub fn message(&self) -> &'static str {
        match self {
            FlowNotice::NoMission => "No mission is active. Pick a mission to start shopping.",
            FlowNotice::NotSubmitted => {
                "The result screen is only available after submitting. Returned to shopping."
            }
            FlowNotice::EmptyCart => {
                "The cart is empty, so there is nothing to report. Start again from mission selection."
            }
        }
    }
}

impl Session {
    fn require_step(&self, expected: Step, action: &str) -> Result<(), ShopError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(ShopError::InvalidTransition(format!(
                "cannot {} during {} (only during {})",
                action, self.step, expected
            )))
        }
    }

    /// Selection -> shopping. Sets the budget and starts from an empty cart.
    pub fn pick_mission(&mut self, mission: &Mission) -> Result<(), ShopError> {
        self.require_step(Step::Selection, "pick a mission")?;
        self.mission = Some(mission.clone());
        self.budget = mission.budget;
        self.cart.clear();
        self.submitted = false;
        self.reasons.clear();
        self.started_at = chrono::Utc::now();
        self.step = Step::Shopping;
        info!(session = %self.id, mission = %mission.title, budget = mission.budget, "Mission selected");
        Ok(())
    }

    /// Add a catalog product to the cart. Returns `Ok(false)` for a non-positive quantity.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> Result<bool, ShopError> {
        self.require_step(Step::Shopping, "add items")?;
        if quantity > MAX_QUANTITY_PER_ADD {
            return Err(ShopError::InvalidTransition(format!(
                "at most {} units can be added at once",
                MAX_QUANTITY_PER_ADD
            )));
        }
        let changed = self.cart.add(&product.name, product.price, &product.image, quantity);
        if changed {
            debug!(session = %self.id, item = %product.name, quantity, total = self.spent(), "Added to cart");
        }
        Ok(changed)
    }

    pub fn clear_cart(&mut self) -> Result<(), ShopError> {
        self.require_step(Step::Shopping, "clear the cart")?;
        self.cart.clear();
        Ok(())
    }

    pub fn submit_status(&self) -> SubmitStatus {
        let spent = self.spent();
        if spent == 0 {
            SubmitStatus::EmptyCart
        } else if spent > self.budget {
            SubmitStatus::OverBudget { over_by: spent - self.budget }
        } else {
            SubmitStatus::Ready
        }
    }

    /// Shopping -> result, only when 0 < spent <= budget.
    pub fn submit(&mut self) -> Result<(), ShopError> {
        self.require_step(Step::Shopping, "submit")?;
        let status = self.submit_status();
        if !status.is_enabled() {
            return Err(ShopError::SubmitBlocked(status.describe()));
        }
        self.submitted = true;
        self.step = Step::Result;
        info!(session = %self.id, spent = self.spent(), budget = self.budget, "Cart submitted");
        Ok(())
    }

    pub fn set_reasons(&mut self, text: &str) -> Result<(), ShopError> {
        self.require_step(Step::Result, "edit the reasoning")?;
        self.reasons = text.to_string();
        Ok(())
    }

    /// Append one line of reasoning.
    pub fn append_reason(&mut self, line: &str) -> Result<(), ShopError> {
        self.require_step(Step::Result, "edit the reasoning")?;
        if !self.reasons.is_empty() && !self.reasons.ends_with('\n') {
            self.reasons.push('\n');
        }
        self.reasons.push_str(line);
        Ok(())
    }

    /// The report can be downloaded once the reasoning is filled in.
    pub fn can_export(&self) -> bool {
        self.step == Step::Result
            && self.submitted
            && !self.cart.is_empty()
            && !self.reasons.trim().is_empty()
    }

    /// Result -> shopping, allowed only while nothing has been submitted.
    pub fn back(&mut self) -> Result<Step, ShopError> {
        self.require_step(Step::Result, "go back")?;
        if self.submitted {
            return Err(ShopError::InvalidTransition(
                "the cart was already submitted; use restart to begin a new mission".into(),
            ));
        }
        self.step = if self.mission.is_some() { Step::Shopping } else { Step::Selection };
        Ok(self.step)
    }

    /// Result -> selection with every field reset.
    pub fn restart(&mut self) -> Result<(), ShopError> {
        self.require_step(Step::Result, "restart")?;
        self.reset();
        info!(session = %self.id, "Session restarted");
        Ok(())
    }

    /// Enforce the step invariants before anything is shown.
    ///
    /// Shopping needs an active mission; the result step needs a submission and
    /// a non-empty cart. Returns the redirect applied, if any.
    pub fn resolve(&mut self) -> Option<FlowNotice> {
        let notice = match self.step {
            Step::Selection => None,
            Step::Shopping if self.mission.is_none() => {
                self.reset();
                Some(FlowNotice::NoMission)
            }
            Step::Shopping => None,
            Step::Result if !self.submitted => {
                self.step = if self.mission.is_some() { Step::Shopping } else { Step::Selection };
                Some(FlowNotice::NotSubmitted)
            }
            Step::Result if self.cart.is_empty() => {
                self.reset();
                Some(FlowNotice::EmptyCart)
            }
            Step::Result if self.mission.is_none() => {
                self.reset();
                Some(FlowNotice::NoMission)
            }
            Step::Result => None,
        };
        if let Some(n) = notice {
            warn!(session = %self.id, redirect = ?n, step = %self.step, "Flow guard redirected");
        }
        notice
    }
}
