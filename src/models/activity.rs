use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub user_id: Option<String>,
    pub action: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdjustmentType {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdjustmentReason {
    Sale,
    Adjustment,
    Restock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub product_id: String,
    pub user_id: String,
    pub r#type: AdjustmentType,
    pub quantity: i64,
    pub reason: AdjustmentReason,
    pub stock_after: i64,
    pub created_at: DateTime<Utc>,
}

/// Bounded in-memory log; the oldest entries drop out first.
#[derive(Debug, Clone)]
pub struct ActivityStore {
    logs: VecDeque<ActivityLog>,
    adjustments: VecDeque<StockAdjustment>,
    capacity: usize,
}

impl ActivityStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            logs: VecDeque::new(),
            adjustments: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push_log(&mut self, log: ActivityLog) {
        if self.logs.len() == self.capacity {
            self.logs.pop_front();
        }
        self.logs.push_back(log);
    }

    pub fn push_adjustment(&mut self, adjustment: StockAdjustment) {
        if self.adjustments.len() == self.capacity {
            self.adjustments.pop_front();
        }
        self.adjustments.push_back(adjustment);
    }

    /// Newest first.
    pub fn recent_logs(&self, limit: usize) -> Vec<ActivityLog> {
        self.logs.iter().rev().take(limit).cloned().collect()
    }

    /// Newest first, optionally for one product.
    pub fn recent_adjustments(&self, product_id: Option<&str>, limit: usize) -> Vec<StockAdjustment> {
        self.adjustments
            .iter()
            .rev()
            .filter(|a| product_id.map_or(true, |id| a.product_id == id))
            .take(limit)
            .cloned()
            .collect()
    }
}
