//! Prenotification Decision Domain
//!
//! This crate decides, from a last-filing date and a claim period, whether a
//! prenotification form (PNF) must be filed before a claim can be submitted.
//!
//! # Decision Flow
//!
//! ```text
//! EverClaimed -> LastFilingDate -> ClaimPeriod -> SubmissionType -> PriorClaimCheck
//!      |                               |                |                 |
//!      +--> PNF required               +--> verdict     +--> no PNF       +--> PNF required
//!                                                                         +--> back to LastFilingDate
//! ```
//!
//! The temporal rules live in [`engine::ClaimDecisionEngine`]; the question
//! sequencing lives in [`flow::DecisionFlow`].

pub mod period;
pub mod config;
pub mod engine;
pub mod flow;
pub mod error;

pub use period::{ClaimPeriod, ClaimNotificationPeriod};
pub use config::EngineConfig;
pub use engine::{ClaimDecisionEngine, Decision, DecisionRule, Outcome};
pub use flow::{
    Answer, DecisionFlow, FlowEvent, FlowState, FlowStep, Question, SubmissionType, Verdict,
    VerdictKind,
};
pub use error::{ErrorSeverity, PnfError};
