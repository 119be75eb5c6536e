use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Listed;
use crate::{collection::Collection, session::UserId};

define_numeric_id! {
    /// 予約 ID
    pub struct ReservationId;
}

/// 予約
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id:         ReservationId,
    pub start_date: NaiveDateTime,
    #[serde(default)]
    pub end_date:   Option<NaiveDateTime>,
    pub people:     u32,
    pub status:     String,
    #[serde(default)]
    pub customer:   Option<UserId>,
}

impl Listed for Reservation {
    const COLLECTION: Collection = Collection::Reservations;
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {}名 {}",
            self.id,
            self.start_date.format("%Y-%m-%d %H:%M"),
            self.people,
            self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_camelcaseのjsonをデシリアライズする() {
        let reservation: Reservation = serde_json::from_value(serde_json::json!({
            "id": 10,
            "startDate": "2024-05-01T19:30:00",
            "people": 4,
            "status": "CONFIRMED",
            "customer": 2
        }))
        .unwrap();

        assert_eq!(reservation.customer, Some(UserId::new(2)));
        assert_eq!(reservation.end_date, None);
        assert_eq!(reservation.to_string(), "#10 2024-05-01 19:30 4名 CONFIRMED");
    }
}
