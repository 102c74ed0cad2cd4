use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::models::Mission;
use super::cart::Cart;

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    #[default]
    Selection,
    Shopping,
    Result,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Selection => "selection",
            Step::Shopping => "shopping",
            Step::Result => "result",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything one user's mission run needs. Transitions live in `flow`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub(crate) id: Uuid,
    #[serde(default)]
    pub(crate) step: Step,
    #[serde(default)]
    pub(crate) mission: Option<Mission>,
    #[serde(default)]
    pub(crate) budget: u64,
    #[serde(default)]
    pub(crate) cart: Cart,
    #[serde(default)]
    pub(crate) submitted: bool,
    #[serde(default)]
    pub(crate) reasons: String,
    /// When the current mission (or, before one is picked, the session) began.
    #[serde(default = "Utc::now")]
    pub(crate) started_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            step: Step::Selection,
            mission: None,
            budget: 0,
            cart: Cart::new(),
            submitted: false,
            reasons: String::new(),
            started_at: Utc::now(),
        }
    }

    /// Return every field except the id to its initial value.
    pub fn reset(&mut self) {
        self.step = Step::Selection;
        self.mission = None;
        self.budget = 0;
        self.cart.clear();
        self.submitted = false;
        self.reasons.clear();
        self.started_at = Utc::now();
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn mission(&self) -> Option<&Mission> {
        self.mission.as_ref()
    }

    pub fn budget(&self) -> u64 {
        self.budget
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    pub fn reasons(&self) -> &str {
        &self.reasons
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn spent(&self) -> u64 {
        self.cart.total()
    }

    /// Budget minus spent; negative when over budget.
    pub fn remaining(&self) -> i64 {
        crate::utils::balance(self.budget, self.spent())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
