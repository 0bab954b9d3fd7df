use chrono::{DateTime, TimeZone, Utc};
use kawaraban::application::ports::time::Clock;

/// 固定時刻を返すテスト用クロック
#[derive(Clone)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn at_noon() -> Self {
        Self::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
