use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::DateRange;

/// Lifecycle state of a campaign.
///
/// `Pending` and `Rejected` only change through moderator action; the
/// remaining states are derived from the campaign's booked dates by
/// [`next_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    /// Submitted by an advertiser, awaiting moderation.
    Pending,
    /// Approved by a moderator, not yet started.
    Approved,
    /// Declined by a moderator. Terminal unless a moderator re-approves.
    Rejected,
    /// Currently running on the screen.
    Live,
    /// Past its end date.
    Ended,
}

impl CampaignStatus {
    /// All statuses, in moderation-panel display order.
    pub const ALL: [CampaignStatus; 5] = [
        CampaignStatus::Pending,
        CampaignStatus::Approved,
        CampaignStatus::Rejected,
        CampaignStatus::Live,
        CampaignStatus::Ended,
    ];

    /// Database/wire form of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Pending => "PENDING",
            CampaignStatus::Approved => "APPROVED",
            CampaignStatus::Rejected => "REJECTED",
            CampaignStatus::Live => "LIVE",
            CampaignStatus::Ended => "ENDED",
        }
    }

    /// Whether the campaign occupies a slot: approved bookings count
    /// against capacity as soon as they are approved, not when they go
    /// live.
    pub fn is_active(&self) -> bool {
        matches!(self, CampaignStatus::Approved | CampaignStatus::Live)
    }

    /// Statuses that occupy slots, for store queries.
    pub const ACTIVE: [CampaignStatus; 2] = [CampaignStatus::Approved, CampaignStatus::Live];

    /// Statuses the reconciler scans. `Pending` and `Rejected` require a
    /// human decision and are never auto-transitioned.
    pub const RECONCILABLE: [CampaignStatus; 3] = [
        CampaignStatus::Approved,
        CampaignStatus::Live,
        CampaignStatus::Ended,
    ];
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status string is not one of the known values.
#[derive(Debug, thiserror::Error)]
#[error("Unknown campaign status: {0}")]
pub struct ParseStatusError(String);

impl FromStr for CampaignStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(CampaignStatus::Pending),
            "APPROVED" => Ok(CampaignStatus::Approved),
            "REJECTED" => Ok(CampaignStatus::Rejected),
            "LIVE" => Ok(CampaignStatus::Live),
            "ENDED" => Ok(CampaignStatus::Ended),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Derives the status a campaign should hold on `today`.
///
/// `Pending` and `Rejected` pass through unchanged. For the rest the
/// booked range decides: past the end date the campaign has ended, on or
/// after the start date it is live (the end date itself is still a live
/// day), before the start date it stays approved.
pub fn next_status(
    current: CampaignStatus,
    period: &DateRange,
    today: NaiveDate,
) -> CampaignStatus {
    match current {
        CampaignStatus::Pending | CampaignStatus::Rejected => current,
        _ => {
            if today > period.end {
                CampaignStatus::Ended
            } else if today >= period.start {
                CampaignStatus::Live
            } else {
                CampaignStatus::Approved
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::add_days;

    fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
        DateRange::new(start, end).unwrap()
    }

    #[test]
    fn status_strings_round_trip() {
        for status in CampaignStatus::ALL {
            assert_eq!(status.as_str().parse::<CampaignStatus>().unwrap(), status);
        }
        assert!("live".parse::<CampaignStatus>().is_err());
        assert!("".parse::<CampaignStatus>().is_err());
    }

    #[test]
    fn only_approved_and_live_hold_slots() {
        assert!(CampaignStatus::Approved.is_active());
        assert!(CampaignStatus::Live.is_active());
        assert!(!CampaignStatus::Pending.is_active());
        assert!(!CampaignStatus::Rejected.is_active());
        assert!(!CampaignStatus::Ended.is_active());
    }

    #[test]
    fn approved_campaign_follows_the_calendar() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let period = range(start, end);

        let current = CampaignStatus::Approved;
        assert_eq!(
            next_status(current, &period, add_days(start, -1)),
            CampaignStatus::Approved
        );
        assert_eq!(next_status(current, &period, start), CampaignStatus::Live);
        assert_eq!(next_status(current, &period, end), CampaignStatus::Live);
        assert_eq!(
            next_status(current, &period, add_days(end, 1)),
            CampaignStatus::Ended
        );
    }

    #[test]
    fn pending_and_rejected_never_move() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let period = range(start, end);
        let long_past = add_days(end, 365);

        assert_eq!(
            next_status(CampaignStatus::Pending, &period, long_past),
            CampaignStatus::Pending
        );
        assert_eq!(
            next_status(CampaignStatus::Rejected, &period, long_past),
            CampaignStatus::Rejected
        );
    }

    #[test]
    fn ended_campaign_can_revive_if_dates_move_forward() {
        // A moderator extending the end date past today brings the
        // campaign back to LIVE on the next reconciliation.
        let start = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let period = range(start, end);

        assert_eq!(
            next_status(CampaignStatus::Ended, &period, start),
            CampaignStatus::Live
        );
    }
}
