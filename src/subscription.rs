use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Free,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Monthly,
    Yearly,
    // time-boxed promotional grant
    Referral,
}

/// Account subscription fields as read from the user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSnapshot {
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub plan: Option<SubscriptionPlan>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

/// Whether the snapshot grants premium access at `now`.
///
/// Paid plans are active as long as the status is premium. Referral grants
/// additionally need an expiry strictly in the future.
pub fn is_active(snapshot: &SubscriptionSnapshot, now: DateTime<Utc>) -> bool {
    if snapshot.status != SubscriptionStatus::Premium {
        return false;
    }
    if snapshot.plan != Some(SubscriptionPlan::Referral) {
        return true;
    }
    snapshot.ends_at.is_some_and(|ends_at| ends_at > now)
}

pub fn effective_status(snapshot: &SubscriptionSnapshot, now: DateTime<Utc>) -> SubscriptionStatus {
    if is_active(snapshot, now) {
        SubscriptionStatus::Premium
    } else {
        SubscriptionStatus::Free
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn snapshot(
        status: SubscriptionStatus,
        plan: Option<SubscriptionPlan>,
        ends_at: Option<DateTime<Utc>>,
    ) -> SubscriptionSnapshot {
        SubscriptionSnapshot {
            status,
            plan,
            ends_at,
        }
    }

    #[test]
    fn test_free_is_never_active() {
        let now = Utc::now();
        let plans = [
            None,
            Some(SubscriptionPlan::Monthly),
            Some(SubscriptionPlan::Yearly),
            Some(SubscriptionPlan::Referral),
        ];
        for plan in plans {
            for ends_at in [None, Some(now + TimeDelta::days(30)), Some(now - TimeDelta::days(1))] {
                assert!(!is_active(&snapshot(SubscriptionStatus::Free, plan, ends_at), now));
            }
        }
    }

    #[test]
    fn test_paid_premium_ignores_expiry() {
        let now = Utc::now();
        let past = Some(now - TimeDelta::days(3));
        assert!(is_active(&snapshot(SubscriptionStatus::Premium, Some(SubscriptionPlan::Monthly), past), now));
        assert!(is_active(&snapshot(SubscriptionStatus::Premium, Some(SubscriptionPlan::Yearly), None), now));
        assert!(is_active(&snapshot(SubscriptionStatus::Premium, None, None), now));
    }

    #[test]
    fn test_referral_needs_future_expiry() {
        let now = Utc::now();
        let referral = Some(SubscriptionPlan::Referral);

        assert!(is_active(&snapshot(SubscriptionStatus::Premium, referral, Some(now + TimeDelta::minutes(1))), now));
        assert!(!is_active(&snapshot(SubscriptionStatus::Premium, referral, Some(now - TimeDelta::minutes(1))), now));
        assert!(!is_active(&snapshot(SubscriptionStatus::Premium, referral, Some(now)), now));
        assert!(!is_active(&snapshot(SubscriptionStatus::Premium, referral, None), now));
    }

    #[test]
    fn test_effective_status() {
        let now = Utc::now();
        let expired = snapshot(
            SubscriptionStatus::Premium,
            Some(SubscriptionPlan::Referral),
            Some(now - TimeDelta::days(1)),
        );
        assert_eq!(effective_status(&expired, now), SubscriptionStatus::Free);

        let paid = snapshot(SubscriptionStatus::Premium, Some(SubscriptionPlan::Yearly), None);
        assert_eq!(effective_status(&paid, now), SubscriptionStatus::Premium);
    }

    #[test]
    fn test_snapshot_wire_format() {
        let parsed: SubscriptionSnapshot = serde_json::from_str(
            r#"{"status":"premium","plan":"referral","endsAt":"2030-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(parsed.plan, Some(SubscriptionPlan::Referral));
        assert!(parsed.ends_at.is_some());

        let bare: SubscriptionSnapshot = serde_json::from_str(r#"{"status":"free"}"#).unwrap();
        assert_eq!(bare.plan, None);
        assert_eq!(bare.ends_at, None);
    }
}
