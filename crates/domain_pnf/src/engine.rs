//! Claim decision engine
//!
//! Evaluates a last-filing date against a claim period's notification window
//! and the legal cutover date. The rules overlap at their boundaries, so they
//! are checked in a fixed order and the first match wins:
//!
//! 1. Filing before the window opens: PNF required
//! 2. Filing after the window closes, before the cutover: no PNF required
//! 3. Filing after the window and the cutover, claim period starting before
//!    the cutover: follow-up question needed
//! 4. Filing after the window and the cutover, claim period starting on or
//!    after the cutover: no PNF required
//! 5. Filing inside the window (edges included): PNF required if the filing is
//!    older than the relevance floor, otherwise decided by the claim period's
//!    start relative to the cutover

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use core_kernel::CalendarDate;
use crate::config::{
    EngineConfig, DEFAULT_NOTIFICATION_EXTENSION_MONTHS, DEFAULT_RELEVANCE_LOOKBACK_YEARS,
};
use crate::error::PnfError;
use crate::period::{ClaimNotificationPeriod, ClaimPeriod};

/// Result of evaluating the decision rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A prenotification form must be filed
    PnfRequired,
    /// No prenotification form is needed
    NoPnfRequired,
    /// The submission-type question must be asked before deciding
    NeedsFollowUp,
}

/// The rule that produced an [`Outcome`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionRule {
    BeforeWindow,
    AfterWindowPreCutover,
    AfterWindowTransitional,
    AfterWindowPostCutover,
    StaleFiling,
    WithinWindowTransitional,
    WithinWindowPostCutover,
}

impl DecisionRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionRule::BeforeWindow => "before_window",
            DecisionRule::AfterWindowPreCutover => "after_window_pre_cutover",
            DecisionRule::AfterWindowTransitional => "after_window_transitional",
            DecisionRule::AfterWindowPostCutover => "after_window_post_cutover",
            DecisionRule::StaleFiling => "stale_filing",
            DecisionRule::WithinWindowTransitional => "within_window_transitional",
            DecisionRule::WithinWindowPostCutover => "within_window_post_cutover",
        }
    }
}

impl fmt::Display for DecisionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A full decision: the outcome, the rule that fired, and the window used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub outcome: Outcome,
    pub rule: DecisionRule,
    pub notification_period: ClaimNotificationPeriod,
}

/// Pure rule evaluator parameterised by the cutover date
///
/// The engine holds no mutable state; one instance can serve any number of
/// walkthroughs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimDecisionEngine {
    cutover: CalendarDate,
    extension_months: u32,
    lookback_years: u32,
}

impl ClaimDecisionEngine {
    /// Creates an engine from configuration
    ///
    /// # Errors
    ///
    /// Returns `PnfError::Configuration` if the configuration is incomplete.
    pub fn new(config: &EngineConfig) -> Result<Self, PnfError> {
        let cutover = config.validate()?;
        Ok(Self {
            cutover,
            extension_months: config.notification_extension_months,
            lookback_years: config.relevance_lookback_years,
        })
    }

    /// Creates an engine with default window lengths and the given cutover
    pub fn with_cutover(cutover: CalendarDate) -> Self {
        Self {
            cutover,
            extension_months: DEFAULT_NOTIFICATION_EXTENSION_MONTHS,
            lookback_years: DEFAULT_RELEVANCE_LOOKBACK_YEARS,
        }
    }

    pub fn cutover(&self) -> CalendarDate {
        self.cutover
    }

    /// Derives the Claim Notification Period for a claim period
    ///
    /// # Errors
    ///
    /// Returns `PnfError::Configuration` if the window end falls outside the
    /// representable calendar.
    pub fn compute_cnp(&self, period: &ClaimPeriod) -> Result<ClaimNotificationPeriod, PnfError> {
        ClaimNotificationPeriod::derive(period, self.extension_months)
    }

    /// Returns true if a filing made on `filing` still matters on `today`
    ///
    /// A filing is relevant when the notification window it would open has
    /// not yet closed and it lies within the lookback period. Returns false if
    /// either bound cannot be computed.
    pub fn is_filing_relevant(&self, filing: CalendarDate, today: CalendarDate) -> bool {
        let Ok(months) = i32::try_from(self.extension_months) else {
            return false;
        };
        match (filing.add_months(months), today.subtract_years(self.lookback_years)) {
            (Ok(assumed_window_end), Ok(floor)) => assumed_window_end >= today && filing >= floor,
            _ => false,
        }
    }

    /// Decides whether a PNF is needed for `period` given the last filing date
    ///
    /// # Errors
    ///
    /// Returns `PnfError::Configuration` if the notification window cannot be
    /// derived; callers must not proceed in that case.
    pub fn decide(&self, last_filing: CalendarDate, period: &ClaimPeriod) -> Result<Outcome, PnfError> {
        self.evaluate(last_filing, period).map(|decision| decision.outcome)
    }

    /// Same as [`decide`](Self::decide) but also reports the rule that fired
    pub fn evaluate(&self, last_filing: CalendarDate, period: &ClaimPeriod) -> Result<Decision, PnfError> {
        let cnp = self.compute_cnp(period)?;

        let (outcome, rule) = if last_filing < cnp.start() {
            (Outcome::PnfRequired, DecisionRule::BeforeWindow)
        } else if last_filing > cnp.end() {
            if last_filing < self.cutover {
                (Outcome::NoPnfRequired, DecisionRule::AfterWindowPreCutover)
            } else if period.starts_before(self.cutover) {
                (Outcome::NeedsFollowUp, DecisionRule::AfterWindowTransitional)
            } else {
                (Outcome::NoPnfRequired, DecisionRule::AfterWindowPostCutover)
            }
        } else {
            self.within_window(last_filing, period, &cnp)?
        };

        debug!(
            last_filing = %last_filing,
            claim_start = %period.start(),
            cnp_start = %cnp.start(),
            cnp_end = %cnp.end(),
            cutover = %self.cutover,
            rule = %rule,
            outcome = ?outcome,
            "Evaluated prenotification rules"
        );

        Ok(Decision {
            outcome,
            rule,
            notification_period: cnp,
        })
    }

    /// Evaluation used by the legacy follow-up path
    ///
    /// Re-derives the notification window from raw claim bounds and applies
    /// only the stale-filing and cutover checks. Shares its logic with the
    /// within-window branch of [`evaluate`](Self::evaluate).
    ///
    /// # Errors
    ///
    /// Returns `PnfError::InvalidPeriod` unless `claim_start < claim_end`.
    pub fn secondary_outcome(
        &self,
        last_filing: CalendarDate,
        claim_start: CalendarDate,
        claim_end: CalendarDate,
    ) -> Result<Outcome, PnfError> {
        let period = ClaimPeriod::new(claim_start, claim_end)?;
        let cnp = self.compute_cnp(&period)?;
        let (outcome, rule) = self.within_window(last_filing, &period, &cnp)?;

        debug!(last_filing = %last_filing, cnp_end = %cnp.end(), rule = %rule, "Evaluated follow-up rules");
        Ok(outcome)
    }

    fn within_window(
        &self,
        last_filing: CalendarDate,
        period: &ClaimPeriod,
        cnp: &ClaimNotificationPeriod,
    ) -> Result<(Outcome, DecisionRule), PnfError> {
        let window_floor = cnp
            .end()
            .subtract_years(self.lookback_years)
            .and_then(|d| d.next_day())
            .map_err(|e| PnfError::configuration(format!("cannot derive relevance floor: {}", e)))?;

        if last_filing < window_floor {
            Ok((Outcome::PnfRequired, DecisionRule::StaleFiling))
        } else if period.starts_before(self.cutover) {
            Ok((Outcome::NeedsFollowUp, DecisionRule::WithinWindowTransitional))
        } else {
            Ok((Outcome::NoPnfRequired, DecisionRule::WithinWindowPostCutover))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    fn engine() -> ClaimDecisionEngine {
        ClaimDecisionEngine::with_cutover(date(2023, 4, 1))
    }

    #[test]
    fn test_new_requires_cutover() {
        let config = EngineConfig { cutover_date: None, ..EngineConfig::default() };
        assert!(matches!(ClaimDecisionEngine::new(&config), Err(PnfError::Configuration(_))));
    }

    #[test]
    fn test_before_window() {
        let period = ClaimPeriod::new(date(2023, 1, 1), date(2023, 12, 31)).unwrap();
        let decision = engine().evaluate(date(2022, 12, 31), &period).unwrap();
        assert_eq!(decision.outcome, Outcome::PnfRequired);
        assert_eq!(decision.rule, DecisionRule::BeforeWindow);
    }

    #[test]
    fn test_after_window_pre_cutover() {
        let period = ClaimPeriod::new(date(2021, 1, 1), date(2021, 12, 31)).unwrap();
        // CNP ends 2022-07-01 (no June 31)
        let decision = engine().evaluate(date(2022, 8, 1), &period).unwrap();
        assert_eq!(decision.notification_period.end(), date(2022, 7, 1));
        assert_eq!(decision.rule, DecisionRule::AfterWindowPreCutover);
        assert_eq!(decision.outcome, Outcome::NoPnfRequired);
    }

    #[test]
    fn test_relevance() {
        let e = engine();
        let today = date(2024, 6, 1);
        assert!(e.is_filing_relevant(date(2024, 1, 1), today));
        assert!(e.is_filing_relevant(date(2023, 12, 1), today));
        assert!(!e.is_filing_relevant(date(2023, 11, 30), today));
    }

    #[test]
    fn test_secondary_outcome_rejects_reversed_period() {
        let result = engine().secondary_outcome(date(2023, 1, 1), date(2023, 6, 1), date(2023, 1, 1));
        assert!(matches!(result, Err(PnfError::InvalidPeriod { .. })));
    }
}
