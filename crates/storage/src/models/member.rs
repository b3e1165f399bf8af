use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub member_id: Uuid,
    pub user_id: Uuid,
    pub league_id: Uuid,
    pub team_id: Option<Uuid>,
    pub sub_team_id: Option<Uuid>,
    pub display_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
}

impl Member {
    /// Age in whole years on the given date: calendar-year difference,
    /// corrected down by one if the birthday has not yet occurred.
    pub fn age_on(&self, date: NaiveDate) -> Option<i32> {
        let dob = self.date_of_birth?;
        let mut age = date.year() - dob.year();
        if (date.month(), date.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }
        Some(age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member_born(dob: &str) -> Member {
        Member {
            member_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            league_id: Uuid::new_v4(),
            team_id: None,
            sub_team_id: None,
            display_name: "Test".to_string(),
            date_of_birth: Some(dob.parse().unwrap()),
            is_active: true,
            created_at: chrono::NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_age_before_birthday() {
        let m = member_born("1950-06-15");
        assert_eq!(m.age_on("2025-06-14".parse().unwrap()), Some(74));
    }

    #[test]
    fn test_age_on_birthday() {
        let m = member_born("1950-06-15");
        assert_eq!(m.age_on("2025-06-15".parse().unwrap()), Some(75));
    }

    #[test]
    fn test_age_unknown_without_dob() {
        let mut m = member_born("1950-06-15");
        m.date_of_birth = None;
        assert_eq!(m.age_on("2025-06-15".parse().unwrap()), None);
    }
}
