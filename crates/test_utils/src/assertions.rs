//! Custom Test Assertions
//!
//! Assertion helpers for outcomes and flow steps that give more meaningful
//! failure messages than bare `assert_eq!`.

use core_kernel::CalendarDate;
use domain_pnf::{
    ClaimDecisionEngine, ClaimPeriod, DecisionFlow, FlowStep, Outcome, Question, VerdictKind,
};

/// Asserts the engine's outcome for a filing date and claim period
///
/// # Panics
///
/// Panics if evaluation fails or the outcome differs from `expected`.
pub fn assert_outcome(
    engine: &ClaimDecisionEngine,
    last_filing: CalendarDate,
    period: &ClaimPeriod,
    expected: Outcome,
) {
    let decision = engine
        .evaluate(last_filing, period)
        .unwrap_or_else(|e| panic!("evaluation failed for filing {}: {}", last_filing, e));
    assert_eq!(
        decision.outcome, expected,
        "filing {} against claim period {} to {} (window {} to {}) matched rule {}",
        last_filing,
        period.start(),
        period.end(),
        decision.notification_period.start(),
        decision.notification_period.end(),
        decision.rule
    );
}

/// Asserts that a walkthrough is waiting on `question`
pub fn assert_asking(flow: &DecisionFlow, question: Question) {
    assert_eq!(
        flow.step(),
        FlowStep::Asking(question),
        "expected walkthrough to be asking {}, state: {:?}",
        question,
        flow.state()
    );
}

/// Asserts that a walkthrough ended with the given verdict
pub fn assert_terminal(flow: &DecisionFlow, kind: VerdictKind) {
    match flow.verdict() {
        Some(verdict) => assert_eq!(verdict.kind, kind, "unexpected verdict, state: {:?}", flow.state()),
        None => panic!("expected verdict {:?}, walkthrough is at {:?}", kind, flow.step()),
    }
}

/// Asserts that no answers are carried by the walkthrough
pub fn assert_answers_cleared(flow: &DecisionFlow) {
    let state = flow.state();
    assert!(state.last_filing_date.is_none(), "last filing date not cleared: {:?}", state);
    assert!(state.claim_period.is_none(), "claim period not cleared: {:?}", state);
    assert!(state.notification_period.is_none(), "notification period not cleared: {:?}", state);
}
