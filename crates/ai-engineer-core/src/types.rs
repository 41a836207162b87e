use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    GatherNeedsContext,
    GatherEditingContext,
    GatherEditing,
    AchieveTaskDrafting,
    AchieveTaskExecuted,
    AchieveComplete,
    PrGatheringCommentsG,
    PrGatheringCommentsA,
    PrReviewTaskDraftG,
    PrReviewTaskDraftA,
    PrAppliedPendingArchiveG,
    PrAppliedPendingArchiveA,
    PrConfirmRestartCommentsG,
    PrConfirmRestartCommentsA,
    PrConfirmRestartTaskG,
    PrConfirmRestartTaskA,
    ErrorPlanMissing,
    ErrorTaskMissing,
    ErrorTaskResultsMissing,
    ErrorContextMissing,
    ErrorCommentsMissingG,
    ErrorCommentsMissingA,
    ErrorReviewTaskMissingG,
    ErrorReviewTaskMissingA,
    ErrorReviewTaskResultsMissingG,
    ErrorReviewTaskResultsMissingA,
}

impl State {
    /// Where a workspace without a state file begins.
    pub const START: State = State::GatherNeedsContext;

    pub fn all() -> &'static [State] {
        &[
            State::GatherNeedsContext,
            State::GatherEditingContext,
            State::GatherEditing,
            State::AchieveTaskDrafting,
            State::AchieveTaskExecuted,
            State::AchieveComplete,
            State::PrGatheringCommentsG,
            State::PrGatheringCommentsA,
            State::PrReviewTaskDraftG,
            State::PrReviewTaskDraftA,
            State::PrAppliedPendingArchiveG,
            State::PrAppliedPendingArchiveA,
            State::PrConfirmRestartCommentsG,
            State::PrConfirmRestartCommentsA,
            State::PrConfirmRestartTaskG,
            State::PrConfirmRestartTaskA,
            State::ErrorPlanMissing,
            State::ErrorTaskMissing,
            State::ErrorTaskResultsMissing,
            State::ErrorContextMissing,
            State::ErrorCommentsMissingG,
            State::ErrorCommentsMissingA,
            State::ErrorReviewTaskMissingG,
            State::ErrorReviewTaskMissingA,
            State::ErrorReviewTaskResultsMissingG,
            State::ErrorReviewTaskResultsMissingA,
        ]
    }

    /// Every state except the listed ones, in declaration order.
    pub fn as_str(self) -> &'static str {
        match self {
            State::GatherNeedsContext => "GATHER_NEEDS_CONTEXT",
            State::GatherEditingContext => "GATHER_EDITING_CONTEXT",
            State::GatherEditing => "GATHER_EDITING",
            State::AchieveTaskDrafting => "ACHIEVE_TASK_DRAFTING",
            State::AchieveTaskExecuted => "ACHIEVE_TASK_EXECUTED",
            State::AchieveComplete => "ACHIEVE_COMPLETE",
            State::PrGatheringCommentsG => "PR_GATHERING_COMMENTS_G",
            State::PrGatheringCommentsA => "PR_GATHERING_COMMENTS_A",
            State::PrReviewTaskDraftG => "PR_REVIEW_TASK_DRAFT_G",
            State::PrReviewTaskDraftA => "PR_REVIEW_TASK_DRAFT_A",
            State::PrAppliedPendingArchiveG => "PR_APPLIED_PENDING_ARCHIVE_G",
            State::PrAppliedPendingArchiveA => "PR_APPLIED_PENDING_ARCHIVE_A",
            State::PrConfirmRestartCommentsG => "PR_CONFIRM_RESTART_COMMENTS_G",
            State::PrConfirmRestartCommentsA => "PR_CONFIRM_RESTART_COMMENTS_A",
            State::PrConfirmRestartTaskG => "PR_CONFIRM_RESTART_TASK_G",
            State::PrConfirmRestartTaskA => "PR_CONFIRM_RESTART_TASK_A",
            State::ErrorPlanMissing => "ERROR_PLAN_MISSING",
            State::ErrorTaskMissing => "ERROR_TASK_MISSING",
            State::ErrorTaskResultsMissing => "ERROR_TASK_RESULTS_MISSING",
            State::ErrorContextMissing => "ERROR_CONTEXT_MISSING",
            State::ErrorCommentsMissingG => "ERROR_COMMENTS_MISSING_G",
            State::ErrorCommentsMissingA => "ERROR_COMMENTS_MISSING_A",
            State::ErrorReviewTaskMissingG => "ERROR_REVIEW_TASK_MISSING_G",
            State::ErrorReviewTaskMissingA => "ERROR_REVIEW_TASK_MISSING_A",
            State::ErrorReviewTaskResultsMissingG => "ERROR_REVIEW_TASK_RESULTS_MISSING_G",
            State::ErrorReviewTaskResultsMissingA => "ERROR_REVIEW_TASK_RESULTS_MISSING_A",
        }
    }

    /// The G/A suffix carried by PR-review and review-error states.
    pub fn variant(self) -> Option<Variant> {
        self.family().map(|(_, v)| v)
    }

    /// Split a suffixed state into its family and suffix.
    pub fn family(self) -> Option<(Family, Variant)> {
        use Family::*;
        use Variant::{A, G};
        let pair = match self {
            State::PrGatheringCommentsG => (GatheringComments, G),
            State::PrGatheringCommentsA => (GatheringComments, A),
            State::PrReviewTaskDraftG => (ReviewTaskDraft, G),
            State::PrReviewTaskDraftA => (ReviewTaskDraft, A),
            State::PrAppliedPendingArchiveG => (AppliedPendingArchive, G),
            State::PrAppliedPendingArchiveA => (AppliedPendingArchive, A),
            State::PrConfirmRestartCommentsG => (ConfirmRestartComments, G),
            State::PrConfirmRestartCommentsA => (ConfirmRestartComments, A),
            State::PrConfirmRestartTaskG => (ConfirmRestartTask, G),
            State::PrConfirmRestartTaskA => (ConfirmRestartTask, A),
            State::ErrorCommentsMissingG => (CommentsMissing, G),
            State::ErrorCommentsMissingA => (CommentsMissing, A),
            State::ErrorReviewTaskMissingG => (ReviewTaskMissing, G),
            State::ErrorReviewTaskMissingA => (ReviewTaskMissing, A),
            State::ErrorReviewTaskResultsMissingG => (ReviewTaskResultsMissing, G),
            State::ErrorReviewTaskResultsMissingA => (ReviewTaskResultsMissing, A),
            _ => return None,
        };
        Some(pair)
    }

    pub fn is_error(self) -> bool {
        self.as_str().starts_with("ERROR_")
    }

    pub fn description(self) -> &'static str {
        match self {
            State::GatherNeedsContext => "No work started; context has not been gathered",
            State::GatherEditingContext => "Editing context.md with background for the work",
            State::GatherEditing => "Editing plan.md and its acceptance criteria",
            State::AchieveTaskDrafting => "Drafting the next task in task.md",
            State::AchieveTaskExecuted => "Task executed; waiting for task-results.md",
            State::AchieveComplete => "Every acceptance criterion in the plan is complete",
            State::PrGatheringCommentsG | State::PrGatheringCommentsA => {
                "Collecting PR review comments in comments.md"
            }
            State::PrReviewTaskDraftG | State::PrReviewTaskDraftA => {
                "Drafting review-task.md from the gathered comments"
            }
            State::PrAppliedPendingArchiveG | State::PrAppliedPendingArchiveA => {
                "Review changes applied; waiting for review-task-results.md"
            }
            State::PrConfirmRestartCommentsG | State::PrConfirmRestartCommentsA => {
                "comments.md already exists; confirm restarting the review"
            }
            State::PrConfirmRestartTaskG | State::PrConfirmRestartTaskA => {
                "review-task.md already exists; confirm restarting the review"
            }
            State::ErrorPlanMissing => "plan.md is missing",
            State::ErrorTaskMissing => "task.md is missing",
            State::ErrorTaskResultsMissing => "task-results.md is missing",
            State::ErrorContextMissing => "context.md is missing",
            State::ErrorCommentsMissingG | State::ErrorCommentsMissingA => "comments.md is missing",
            State::ErrorReviewTaskMissingG | State::ErrorReviewTaskMissingA => {
                "review-task.md is missing"
            }
            State::ErrorReviewTaskResultsMissingG | State::ErrorReviewTaskResultsMissingA => {
                "review-task-results.md is missing"
            }
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for State {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        State::all()
            .iter()
            .copied()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| EngineError::UnknownState(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Variant / Family
// ---------------------------------------------------------------------------

/// Which flow a PR review was started from: plan editing (G) or task work (A).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    G,
    A,
}

impl Variant {
    pub fn suffix(self) -> &'static str {
        match self {
            Variant::G => "G",
            Variant::A => "A",
        }
    }
}

/// A pair of states that differ only by their G/A suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    GatheringComments,
    ReviewTaskDraft,
    AppliedPendingArchive,
    ConfirmRestartComments,
    ConfirmRestartTask,
    CommentsMissing,
    ReviewTaskMissing,
    ReviewTaskResultsMissing,
}

impl Family {
    pub fn with(self, variant: Variant) -> State {
        use Variant::{A, G};
        match (self, variant) {
            (Family::GatheringComments, G) => State::PrGatheringCommentsG,
            (Family::GatheringComments, A) => State::PrGatheringCommentsA,
            (Family::ReviewTaskDraft, G) => State::PrReviewTaskDraftG,
            (Family::ReviewTaskDraft, A) => State::PrReviewTaskDraftA,
            (Family::AppliedPendingArchive, G) => State::PrAppliedPendingArchiveG,
            (Family::AppliedPendingArchive, A) => State::PrAppliedPendingArchiveA,
            (Family::ConfirmRestartComments, G) => State::PrConfirmRestartCommentsG,
            (Family::ConfirmRestartComments, A) => State::PrConfirmRestartCommentsA,
            (Family::ConfirmRestartTask, G) => State::PrConfirmRestartTaskG,
            (Family::ConfirmRestartTask, A) => State::PrConfirmRestartTaskA,
            (Family::CommentsMissing, G) => State::ErrorCommentsMissingG,
            (Family::CommentsMissing, A) => State::ErrorCommentsMissingA,
            (Family::ReviewTaskMissing, G) => State::ErrorReviewTaskMissingG,
            (Family::ReviewTaskMissing, A) => State::ErrorReviewTaskMissingA,
            (Family::ReviewTaskResultsMissing, G) => State::ErrorReviewTaskResultsMissingG,
            (Family::ReviewTaskResultsMissing, A) => State::ErrorReviewTaskResultsMissingA,
        }
    }

    /// The template spelling, without the `_[G/A]` marker.
    pub fn base_name(self) -> &'static str {
        match self {
            Family::GatheringComments => "PR_GATHERING_COMMENTS",
            Family::ReviewTaskDraft => "PR_REVIEW_TASK_DRAFT",
            Family::AppliedPendingArchive => "PR_APPLIED_PENDING_ARCHIVE",
            Family::ConfirmRestartComments => "PR_CONFIRM_RESTART_COMMENTS",
            Family::ConfirmRestartTask => "PR_CONFIRM_RESTART_TASK",
            Family::CommentsMissing => "ERROR_COMMENTS_MISSING",
            Family::ReviewTaskMissing => "ERROR_REVIEW_TASK_MISSING",
            Family::ReviewTaskResultsMissing => "ERROR_REVIEW_TASK_RESULTS_MISSING",
        }
    }
}

// ---------------------------------------------------------------------------
// Spell
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Spell {
    /// Advance to the next step.
    Accio,
    /// Enrich from Atlassian references.
    Expecto,
    /// Start or confirm a PR review.
    Reparo,
    /// Exit a PR review.
    Reverto,
    /// Return to plan editing.
    Finite,
    /// Show status.
    Lumos,
}

impl Spell {
    pub fn all() -> &'static [Spell] {
        &[
            Spell::Accio,
            Spell::Expecto,
            Spell::Reparo,
            Spell::Reverto,
            Spell::Finite,
            Spell::Lumos,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Spell::Accio => "Accio",
            Spell::Expecto => "Expecto",
            Spell::Reparo => "Reparo",
            Spell::Reverto => "Reverto",
            Spell::Finite => "Finite",
            Spell::Lumos => "Lumos",
        }
    }
}

impl fmt::Display for Spell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Spell {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Spell::all()
            .iter()
            .copied()
            .find(|spell| spell.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::UnknownSpell(s.to_string()))
    }
}
