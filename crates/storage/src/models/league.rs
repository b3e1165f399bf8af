use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct League {
    pub league_id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rest_days_per_week: i32,
    pub weeks: i32,
    pub created_at: chrono::NaiveDateTime,
}

impl League {
    /// Total rest days a member may use over the whole league.
    pub fn rest_day_budget(&self) -> i64 {
        i64::from(self.rest_days_per_week) * i64::from(self.weeks)
    }
}
