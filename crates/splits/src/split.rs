use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use splitledger_core::{Decimal, DomainError, DomainResult, Money, UserId, ValueObject};

/// How an expense's total is divided among its participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitPolicy {
    Equal,
    Exact,
    Percent,
}

impl SplitPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitPolicy::Equal => "equal",
            SplitPolicy::Exact => "exact",
            SplitPolicy::Percent => "percent",
        }
    }
}

impl fmt::Display for SplitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equal" => Ok(SplitPolicy::Equal),
            "exact" => Ok(SplitPolicy::Exact),
            "percent" | "percentage" => Ok(SplitPolicy::Percent),
            _ => Err(DomainError::unknown_policy(s)),
        }
    }
}

/// Caller-supplied input for one participant's share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum SplitKind {
    /// Share computed from the total and participant count.
    Equal,
    /// Share given explicitly by the caller.
    Exact { amount: Money },
    /// Share given as a percentage of the total.
    Percent { percent: Decimal },
}

impl SplitKind {
    pub fn policy(&self) -> SplitPolicy {
        match self {
            SplitKind::Equal => SplitPolicy::Equal,
            SplitKind::Exact { .. } => SplitPolicy::Exact,
            SplitKind::Percent { .. } => SplitPolicy::Percent,
        }
    }
}

/// One participant's part of an expense.
///
/// `resolved` stays `None` until the owning expense passes resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    participant: UserId,
    kind: SplitKind,
    resolved: Option<Money>,
}

impl ValueObject for Split {}

impl Split {
    pub fn new(participant: UserId, kind: SplitKind) -> Self {
        Self {
            participant,
            kind,
            resolved: None,
        }
    }

    pub fn equal(participant: UserId) -> Self {
        Self::new(participant, SplitKind::Equal)
    }

    pub fn exact(participant: UserId, amount: Money) -> Self {
        Self::new(participant, SplitKind::Exact { amount })
    }

    pub fn percent(participant: UserId, percent: Decimal) -> Self {
        Self::new(participant, SplitKind::Percent { percent })
    }

    pub fn participant_id(&self) -> UserId {
        self.participant
    }

    pub fn kind(&self) -> &SplitKind {
        &self.kind
    }

    pub fn policy(&self) -> SplitPolicy {
        self.kind.policy()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// The concrete amount this participant owes for the expense.
    pub fn resolved_amount(&self) -> DomainResult<Money> {
        self.resolved.ok_or(DomainError::Unresolved(self.participant))
    }

    pub(crate) fn set_resolved(&mut self, amount: Money) {
        self.resolved = Some(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_policy_tags() {
        assert_eq!("EQUAL".parse::<SplitPolicy>().unwrap(), SplitPolicy::Equal);
        assert_eq!(" exact ".parse::<SplitPolicy>().unwrap(), SplitPolicy::Exact);
        assert_eq!("percentage".parse::<SplitPolicy>().unwrap(), SplitPolicy::Percent);
    }

    #[test]
    fn unknown_policy_tag_is_rejected() {
        let err = "shares".parse::<SplitPolicy>().unwrap_err();
        assert_eq!(err, DomainError::UnknownSplitPolicy("shares".to_string()));
    }

    #[test]
    fn split_is_unresolved_until_resolution() {
        let user = UserId::new();
        let mut split = Split::exact(user, Money::new(dec!(12.50)));

        assert_eq!(split.resolved_amount(), Err(DomainError::Unresolved(user)));

        split.set_resolved(Money::new(dec!(12.50)));
        assert_eq!(split.resolved_amount(), Ok(Money::new(dec!(12.50))));
    }

    #[test]
    fn kind_serializes_with_policy_tag() {
        let kind = SplitKind::Percent { percent: dec!(40) };
        let json = serde_json::to_value(kind).unwrap();
        assert_eq!(json["policy"], "percent");
        assert_eq!(json["percent"], "40");
    }
}
