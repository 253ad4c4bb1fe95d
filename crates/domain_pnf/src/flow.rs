//! Question flow
//!
//! A [`DecisionFlow`] walks one user through up to five questions, asking the
//! [`ClaimDecisionEngine`] after the claim period is known whether a verdict can
//! be reached or a follow-up question is needed.
//!
//! # States
//!
//! ```text
//! EverClaimed --no--> Terminal(PNF required)
//!     |yes
//!     v
//! LastFilingDate --date--> ClaimPeriod --verdict--> Terminal(..)
//!     ^                        |follow-up
//!     |                        v
//!     |                  SubmissionType --original--> Terminal(no PNF required)
//!     |                        |amended
//!     |                        v
//!     +-------yes------- PriorClaimCheck --no--> Terminal(PNF required)
//! ```
//!
//! Rejected answers leave the state untouched. A terminal state is final; only
//! [`DecisionFlow::restart`] leaves it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument, warn};

use core_kernel::{CalendarDate, FlowEventId, WalkthroughId};
use crate::engine::{ClaimDecisionEngine, Outcome};
use crate::error::PnfError;
use crate::period::{ClaimNotificationPeriod, ClaimPeriod};

/// A user-facing question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Question {
    /// Has a claim been made before?
    EverClaimed,
    /// When was the last claim filed?
    LastFilingDate,
    /// What period does this claim cover?
    ClaimPeriod,
    /// Is this an original or an amended submission?
    SubmissionType,
    /// Was there an earlier claim before the one entered?
    PriorClaimCheck,
}

impl Question {
    /// Questions in the order they are first asked
    pub const ALL: [Question; 5] = [
        Question::EverClaimed,
        Question::LastFilingDate,
        Question::ClaimPeriod,
        Question::SubmissionType,
        Question::PriorClaimCheck,
    ];

    /// Zero-based position of the question (0-4)
    pub fn index(&self) -> u8 {
        match self {
            Question::EverClaimed => 0,
            Question::LastFilingDate => 1,
            Question::ClaimPeriod => 2,
            Question::SubmissionType => 3,
            Question::PriorClaimCheck => 4,
        }
    }

    /// Stable key the rendering layer maps to its own templates
    pub fn key(&self) -> &'static str {
        match self {
            Question::EverClaimed => "ever_claimed",
            Question::LastFilingDate => "last_filing_date",
            Question::ClaimPeriod => "claim_period",
            Question::SubmissionType => "submission_type",
            Question::PriorClaimCheck => "prior_claim_check",
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Kind of submission being made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionType {
    Original,
    Amended,
}

/// An answer supplied by the input collaborator
///
/// Dates arrive already parsed; `None` means the user left the field empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "question", content = "value", rename_all = "snake_case")]
pub enum Answer {
    EverClaimed(bool),
    LastFilingDate(Option<CalendarDate>),
    ClaimPeriod {
        start: Option<CalendarDate>,
        end: Option<CalendarDate>,
    },
    SubmissionType(SubmissionType),
    EarlierClaimExists(bool),
}

impl Answer {
    /// Convenience constructor for a fully entered claim period
    pub fn claim_period(start: CalendarDate, end: CalendarDate) -> Self {
        Answer::ClaimPeriod { start: Some(start), end: Some(end) }
    }

    /// The question this answer responds to
    pub fn question(&self) -> Question {
        match self {
            Answer::EverClaimed(_) => Question::EverClaimed,
            Answer::LastFilingDate(_) => Question::LastFilingDate,
            Answer::ClaimPeriod { .. } => Question::ClaimPeriod,
            Answer::SubmissionType(_) => Question::SubmissionType,
            Answer::EarlierClaimExists(_) => Question::PriorClaimCheck,
        }
    }
}

/// Final decision tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerdictKind {
    PnfRequired,
    NoPnfRequired,
}

impl VerdictKind {
    /// Maps an engine outcome to a verdict; `None` for a follow-up
    pub fn from_outcome(outcome: Outcome) -> Option<Self> {
        match outcome {
            Outcome::PnfRequired => Some(VerdictKind::PnfRequired),
            Outcome::NoPnfRequired => Some(VerdictKind::NoPnfRequired),
            Outcome::NeedsFollowUp => None,
        }
    }
}

/// Terminal result of a walkthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub kind: VerdictKind,
    /// Notification window, when one was derived, for display
    pub notification_period: Option<ClaimNotificationPeriod>,
}

impl Verdict {
    pub fn new(kind: VerdictKind, notification_period: Option<ClaimNotificationPeriod>) -> Self {
        Self { kind, notification_period }
    }

    pub fn requires_pnf(&self) -> bool {
        self.kind == VerdictKind::PnfRequired
    }
}

/// Where a walkthrough currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FlowStep {
    Asking(Question),
    Terminal(Verdict),
}

/// Snapshot of a walkthrough for the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowState {
    pub step: FlowStep,
    pub last_filing_date: Option<CalendarDate>,
    pub claim_period: Option<ClaimPeriod>,
    pub notification_period: Option<ClaimNotificationPeriod>,
}

impl FlowState {
    pub fn initial() -> Self {
        Self {
            step: FlowStep::Asking(Question::EverClaimed),
            last_filing_date: None,
            claim_period: None,
            notification_period: None,
        }
    }

    /// Index of the question being asked, `None` once terminal
    pub fn question_index(&self) -> Option<u8> {
        match self.step {
            FlowStep::Asking(question) => Some(question.index()),
            FlowStep::Terminal(_) => None,
        }
    }

    fn clear_answers(&mut self) {
        self.last_filing_date = None;
        self.claim_period = None;
        self.notification_period = None;
    }
}

impl Default for FlowState {
    fn default() -> Self {
        Self::initial()
    }
}

/// One accepted answer in a walkthrough's history
#[derive(Debug, Clone, Serialize)]
pub struct FlowEvent {
    pub id: FlowEventId,
    pub from: Question,
    pub to: FlowStep,
    pub recorded_at: DateTime<Utc>,
}

impl FlowEvent {
    fn new(from: Question, to: FlowStep) -> Self {
        Self {
            id: FlowEventId::generate(),
            from,
            to,
            recorded_at: Utc::now(),
        }
    }
}

/// State machine for one user's walkthrough
#[derive(Debug, Clone)]
pub struct DecisionFlow {
    id: WalkthroughId,
    engine: ClaimDecisionEngine,
    state: FlowState,
    history: Vec<FlowEvent>,
}

impl DecisionFlow {
    /// Starts a walkthrough at the first question
    pub fn new(engine: ClaimDecisionEngine) -> Self {
        Self {
            id: WalkthroughId::generate(),
            engine,
            state: FlowState::initial(),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> WalkthroughId {
        self.id
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn step(&self) -> FlowStep {
        self.state.step
    }

    /// The question awaiting an answer, if any
    pub fn current_question(&self) -> Option<Question> {
        match self.state.step {
            FlowStep::Asking(question) => Some(question),
            FlowStep::Terminal(_) => None,
        }
    }

    pub fn verdict(&self) -> Option<Verdict> {
        match self.state.step {
            FlowStep::Terminal(verdict) => Some(verdict),
            FlowStep::Asking(_) => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.verdict().is_some()
    }

    pub fn history(&self) -> &[FlowEvent] {
        &self.history
    }

    /// Discards everything and starts a new walkthrough
    pub fn restart(&mut self) {
        self.id = WalkthroughId::generate();
        self.state = FlowState::initial();
        self.history.clear();
    }

    /// Applies an answer to the current question
    ///
    /// # Errors
    ///
    /// Validation errors (`MissingAnswer`, `InvalidPeriod`, `InvalidDate`) leave
    /// the walkthrough on the same question. `UnexpectedAnswer` and
    /// `FlowComplete` signal a caller bug; `Configuration` means the engine
    /// could not evaluate the rules.
    #[instrument(skip(self), fields(walkthrough_id = %self.id))]
    pub fn answer(&mut self, answer: Answer) -> Result<FlowStep, PnfError> {
        let question = match self.state.step {
            FlowStep::Asking(question) => question,
            FlowStep::Terminal(_) => {
                warn!("Answer received after the walkthrough concluded");
                return Err(PnfError::FlowComplete);
            }
        };

        let next = match self.transition(question, answer) {
            Ok(next) => next,
            Err(e) => {
                warn!(question = %question, error = %e, "Answer rejected");
                return Err(e);
            }
        };

        self.state.step = next;
        self.history.push(FlowEvent::new(question, next));

        match next {
            FlowStep::Terminal(verdict) => {
                info!(verdict = ?verdict.kind, answers = self.history.len(), "Walkthrough reached a verdict");
            }
            FlowStep::Asking(next_question) => {
                debug!(from = %question, to = %next_question, "Advanced to next question");
            }
        }
        Ok(next)
    }

    fn transition(&mut self, question: Question, answer: Answer) -> Result<FlowStep, PnfError> {
        match (question, answer) {
            (Question::EverClaimed, Answer::EverClaimed(false)) => {
                Ok(FlowStep::Terminal(Verdict::new(VerdictKind::PnfRequired, None)))
            }
            (Question::EverClaimed, Answer::EverClaimed(true)) => {
                self.state.clear_answers();
                Ok(FlowStep::Asking(Question::LastFilingDate))
            }
            (Question::LastFilingDate, Answer::LastFilingDate(date)) => {
                let date = date.ok_or(PnfError::MissingAnswer(Question::LastFilingDate))?;
                self.state.last_filing_date = Some(date);
                Ok(FlowStep::Asking(Question::ClaimPeriod))
            }
            (Question::ClaimPeriod, Answer::ClaimPeriod { start, end }) => {
                let (Some(start), Some(end)) = (start, end) else {
                    return Err(PnfError::MissingAnswer(Question::ClaimPeriod));
                };
                let period = ClaimPeriod::new(start, end)?;
                let last_filing = self
                    .state
                    .last_filing_date
                    .ok_or_else(|| PnfError::configuration("claim period reached without a last filing date"))?;

                let decision = self.engine.evaluate(last_filing, &period)?;
                self.state.claim_period = Some(period);
                self.state.notification_period = Some(decision.notification_period);

                Ok(match VerdictKind::from_outcome(decision.outcome) {
                    Some(kind) => FlowStep::Terminal(Verdict::new(kind, Some(decision.notification_period))),
                    None => FlowStep::Asking(Question::SubmissionType),
                })
            }
            (Question::SubmissionType, Answer::SubmissionType(SubmissionType::Original)) => Ok(
                FlowStep::Terminal(Verdict::new(VerdictKind::NoPnfRequired, self.state.notification_period)),
            ),
            (Question::SubmissionType, Answer::SubmissionType(SubmissionType::Amended)) => {
                Ok(FlowStep::Asking(Question::PriorClaimCheck))
            }
            (Question::PriorClaimCheck, Answer::EarlierClaimExists(false)) => Ok(FlowStep::Terminal(
                Verdict::new(VerdictKind::PnfRequired, self.state.notification_period),
            )),
            (Question::PriorClaimCheck, Answer::EarlierClaimExists(true)) => {
                self.state.clear_answers();
                Ok(FlowStep::Asking(Question::LastFilingDate))
            }
            (question, answer) => Err(PnfError::UnexpectedAnswer {
                question,
                answer: answer.question().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    fn flow() -> DecisionFlow {
        DecisionFlow::new(ClaimDecisionEngine::with_cutover(date(2023, 4, 1)))
    }

    #[test]
    fn test_starts_at_first_question() {
        let flow = flow();
        assert_eq!(flow.current_question(), Some(Question::EverClaimed));
        assert_eq!(flow.state().question_index(), Some(0));
        assert!(flow.history().is_empty());
    }

    #[test]
    fn test_never_claimed_requires_pnf() {
        let mut flow = flow();
        let step = flow.answer(Answer::EverClaimed(false)).unwrap();
        assert_eq!(step, FlowStep::Terminal(Verdict::new(VerdictKind::PnfRequired, None)));
        assert!(flow.is_complete());
    }

    #[test]
    fn test_wrong_answer_kind_is_rejected() {
        let mut flow = flow();
        let result = flow.answer(Answer::SubmissionType(SubmissionType::Original));
        assert!(matches!(result, Err(PnfError::UnexpectedAnswer { question: Question::EverClaimed, .. })));
        assert_eq!(flow.current_question(), Some(Question::EverClaimed));
    }

    #[test]
    fn test_answer_serialization_shape() {
        let json = serde_json::to_string(&Answer::EverClaimed(true)).unwrap();
        assert_eq!(json, r#"{"question":"ever_claimed","value":true}"#);
    }

    #[test]
    fn test_question_indices_follow_order() {
        for (i, question) in Question::ALL.iter().enumerate() {
            assert_eq!(usize::from(question.index()), i);
        }
    }
}
