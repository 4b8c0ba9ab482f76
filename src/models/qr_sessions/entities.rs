use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 扫码签到会话
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/qr_session.ts")]
pub struct QrCodeSession {
    pub id: i64,
    pub course_id: i64,
    pub created_by: i64,
    pub code: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub closed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl QrCodeSession {
    /// 距离过期的剩余秒数，已过期为 0
    pub fn remaining_seconds(&self, now: chrono::DateTime<chrono::Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }

    /// 已过期或已被手动关闭
    pub fn is_expired(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.closed_at.is_some() || now >= self.expires_at
    }

    /// 只有未过期且未关闭的会话可以签到
    pub fn accepts_checkin(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        !self.is_expired(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn session(ttl: i64) -> QrCodeSession {
        let now = Utc::now();
        QrCodeSession {
            id: 1,
            course_id: 1,
            created_by: 1,
            code: "abc".into(),
            expires_at: now + Duration::seconds(ttl),
            closed_at: None,
            created_at: now,
        }
    }

    #[test]
    fn test_remaining_seconds_never_negative() {
        let s = session(-30);
        assert_eq!(s.remaining_seconds(Utc::now()), 0);
        assert!(s.is_expired(Utc::now()));
    }

    #[test]
    fn test_expiry_boundary() {
        let s = session(60);
        assert!(s.accepts_checkin(s.expires_at - Duration::seconds(1)));
        assert!(!s.accepts_checkin(s.expires_at));
    }

    #[test]
    fn test_closed_session_rejects_checkin() {
        let mut s = session(300);
        let now = Utc::now();
        assert!(s.accepts_checkin(now));
        s.closed_at = Some(now);
        assert!(!s.accepts_checkin(now));
        assert!(s.remaining_seconds(now) > 0);
    }
}
