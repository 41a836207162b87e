use super::{
    archive_review, comments_exist, comments_missing, create, create_comments, create_review_task,
    exists, review_task_exists, review_task_missing,
};
use crate::error::Result;
use crate::fs::FileSystem;
use crate::paths;
use crate::render::Replacements;
use crate::responses as r;
use crate::rule::{rule, Rule, STAY};
use crate::state::StateContext;
use crate::templates;
use crate::types::{Family, Spell, State};

/// Task-side states a review can be started from.
const TASK_SIDE: [State; 5] = [
    State::AchieveTaskDrafting,
    State::AchieveTaskExecuted,
    State::AchieveComplete,
    State::ErrorTaskMissing,
    State::ErrorTaskResultsMissing,
];

const GATHERING: [State; 2] = [State::PrGatheringCommentsG, State::PrGatheringCommentsA];
const DRAFTING: [State; 2] = [State::PrReviewTaskDraftG, State::PrReviewTaskDraftA];
const APPLIED: [State; 2] = [
    State::PrAppliedPendingArchiveG,
    State::PrAppliedPendingArchiveA,
];
const CONFIRM_COMMENTS: [State; 2] = [
    State::PrConfirmRestartCommentsG,
    State::PrConfirmRestartCommentsA,
];
const CONFIRM_TASK: [State; 2] = [State::PrConfirmRestartTaskG, State::PrConfirmRestartTaskA];
const CONFIRMING: [State; 4] = [
    State::PrConfirmRestartCommentsG,
    State::PrConfirmRestartCommentsA,
    State::PrConfirmRestartTaskG,
    State::PrConfirmRestartTaskA,
];

// ---------------------------------------------------------------------------
// Conditions
// ---------------------------------------------------------------------------

fn no_review_files(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(!exists(fs, paths::COMMENTS)? && !exists(fs, paths::REVIEW_TASK)?)
}

fn only_comments_exist(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(exists(fs, paths::COMMENTS)? && !exists(fs, paths::REVIEW_TASK)?)
}

fn review_results_exist(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    exists(fs, paths::REVIEW_TASK_RESULTS)
}

fn review_results_and_task_exist(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(exists(fs, paths::REVIEW_TASK_RESULTS)? && exists(fs, paths::TASK)?)
}

fn review_results_without_task(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(exists(fs, paths::REVIEW_TASK_RESULTS)? && !exists(fs, paths::TASK)?)
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Read the review results, then archive every review file.
fn archive_applied_review(_: &StateContext, fs: &dyn FileSystem) -> Result<Replacements> {
    let results = fs.read(paths::rel(paths::REVIEW_TASK_RESULTS))?;
    let report = archive_review(fs)?;
    Ok(Replacements::from([
        ("REVIEW_RESULTS", results),
        ("ARCHIVE_DIR", report.dir_display()),
    ]))
}

fn archive_applied_review_and_create_task(
    ctx: &StateContext,
    fs: &dyn FileSystem,
) -> Result<Replacements> {
    let replacements = archive_applied_review(ctx, fs)?;
    create(fs, paths::TASK, templates::TASK)?;
    Ok(replacements)
}

/// Archive whatever the earlier review left behind and start with fresh comments.
fn restart_review(_: &StateContext, fs: &dyn FileSystem) -> Result<Replacements> {
    let report = archive_review(fs)?;
    create(fs, paths::COMMENTS, templates::COMMENTS)?;
    Ok(Replacements::from([("ARCHIVE_DIR", report.dir_display())]))
}

// ---------------------------------------------------------------------------
// PR review
// ---------------------------------------------------------------------------

pub fn rules() -> Vec<Rule> {
    let mut rules = starting();
    rules.extend(flow());
    rules.extend(confirmation());
    rules.extend(blocked());
    rules
}

fn starting() -> Vec<Rule> {
    vec![
        rule! {
            id: "review_start_from_plan",
            from: [State::GatherEditing],
            spell: Spell::Reparo,
            to: State::PrGatheringCommentsG,
            response: r::REVIEW_STARTED,
            when: no_review_files,
            execute: create_comments,
        },
        rule! {
            id: "review_start_from_task",
            from: TASK_SIDE,
            spell: Spell::Reparo,
            to: State::PrGatheringCommentsA,
            response: r::REVIEW_STARTED,
            when: no_review_files,
            execute: create_comments,
        },
        rule! {
            id: "review_start_from_error",
            from: [
                State::ErrorCommentsMissingG,
                State::ErrorCommentsMissingA,
                State::ErrorReviewTaskMissingG,
                State::ErrorReviewTaskMissingA,
            ],
            spell: Spell::Reparo,
            to: Family::GatheringComments,
            response: r::REVIEW_STARTED,
            when: no_review_files,
            execute: create_comments,
        },
        rule! {
            id: "review_confirm_comments_from_plan",
            from: [State::GatherEditing],
            spell: Spell::Reparo,
            to: State::PrConfirmRestartCommentsG,
            response: r::CONFIRM_RESTART_COMMENTS,
            when: only_comments_exist,
        },
        rule! {
            id: "review_confirm_comments_from_task",
            from: TASK_SIDE,
            spell: Spell::Reparo,
            to: State::PrConfirmRestartCommentsA,
            response: r::CONFIRM_RESTART_COMMENTS,
            when: only_comments_exist,
        },
        rule! {
            id: "review_confirm_task_from_plan",
            from: [State::GatherEditing],
            spell: Spell::Reparo,
            to: State::PrConfirmRestartTaskG,
            response: r::CONFIRM_RESTART_TASK,
            when: review_task_exists,
        },
        rule! {
            id: "review_confirm_task_from_task",
            from: TASK_SIDE,
            spell: Spell::Reparo,
            to: State::PrConfirmRestartTaskA,
            response: r::CONFIRM_RESTART_TASK,
            when: review_task_exists,
        },
    ]
}

fn flow() -> Vec<Rule> {
    vec![
        rule! {
            id: "review_draft_task",
            from: GATHERING,
            spell: Spell::Accio,
            to: Family::ReviewTaskDraft,
            response: r::REVIEW_TASK_CREATED,
            when: comments_exist,
            execute: create_review_task,
        },
        rule! {
            id: "review_comments_missing",
            from: GATHERING,
            spell: Spell::Accio,
            to: Family::CommentsMissing,
            response: r::COMMENTS_MISSING,
            when: comments_missing,
        },
        rule! {
            id: "review_applied",
            from: DRAFTING,
            spell: Spell::Accio,
            to: Family::AppliedPendingArchive,
            response: r::REVIEW_APPLIED,
            when: review_task_exists,
        },
        rule! {
            id: "review_task_missing",
            from: DRAFTING,
            spell: Spell::Accio,
            to: Family::ReviewTaskMissing,
            response: r::REVIEW_TASK_MISSING,
            when: review_task_missing,
        },
        rule! {
            id: "review_archive_to_plan",
            from: [State::PrAppliedPendingArchiveG],
            spell: Spell::Accio,
            to: State::GatherEditing,
            response: r::REVIEW_ARCHIVED_TO_PLAN,
            when: review_results_exist,
            execute: archive_applied_review,
            supplies: &["REVIEW_RESULTS", "ARCHIVE_DIR"],
        },
        rule! {
            id: "review_results_missing",
            from: APPLIED,
            spell: Spell::Accio,
            to: Family::ReviewTaskResultsMissing,
            response: r::REVIEW_RESULTS_MISSING,
            when: |_, fs| Ok(!exists(fs, paths::REVIEW_TASK_RESULTS)?),
        },
        rule! {
            id: "review_archive_to_task",
            from: [State::PrAppliedPendingArchiveA],
            spell: Spell::Accio,
            to: State::AchieveTaskDrafting,
            response: r::REVIEW_ARCHIVED_TO_TASK,
            when: review_results_and_task_exist,
            execute: archive_applied_review,
            supplies: &["REVIEW_RESULTS", "ARCHIVE_DIR"],
        },
        rule! {
            id: "review_archive_to_new_task",
            from: [State::PrAppliedPendingArchiveA],
            spell: Spell::Accio,
            to: State::AchieveTaskDrafting,
            response: r::REVIEW_ARCHIVED_NEW_TASK,
            when: review_results_without_task,
            execute: archive_applied_review_and_create_task,
            supplies: &["REVIEW_RESULTS", "ARCHIVE_DIR"],
        },
    ]
}

fn confirmation() -> Vec<Rule> {
    vec![
        rule! {
            id: "confirm_restart_comments",
            from: CONFIRM_COMMENTS,
            spell: Spell::Reparo,
            to: Family::GatheringComments,
            response: r::REVIEW_RESTARTED,
            execute: restart_review,
            supplies: &["ARCHIVE_DIR"],
        },
        rule! {
            id: "confirm_restart_task",
            from: CONFIRM_TASK,
            spell: Spell::Reparo,
            to: Family::GatheringComments,
            response: r::REVIEW_RESTARTED,
            execute: restart_review,
            supplies: &["ARCHIVE_DIR"],
        },
        rule! {
            id: "confirm_continue_comments",
            from: CONFIRM_COMMENTS,
            spell: Spell::Accio,
            to: Family::GatheringComments,
            response: r::CONTINUE_COMMENTS,
            when: comments_exist,
        },
        rule! {
            id: "confirm_comments_missing",
            from: CONFIRM_COMMENTS,
            spell: Spell::Accio,
            to: Family::CommentsMissing,
            response: r::COMMENTS_MISSING,
            when: comments_missing,
        },
        rule! {
            id: "confirm_continue_task",
            from: CONFIRM_TASK,
            spell: Spell::Accio,
            to: Family::ReviewTaskDraft,
            response: r::CONTINUE_REVIEW_TASK,
            when: review_task_exists,
        },
        rule! {
            id: "confirm_review_task_missing",
            from: CONFIRM_TASK,
            spell: Spell::Accio,
            to: Family::ReviewTaskMissing,
            response: r::REVIEW_TASK_MISSING,
            when: review_task_missing,
        },
    ]
}

fn blocked() -> Vec<Rule> {
    vec![
        rule! {
            id: "review_applied_blocked",
            from: APPLIED,
            spell: Spell::Reverto,
            to: STAY,
            response: r::REVIEW_PENDING_ARCHIVE,
        },
        rule! {
            id: "review_applied_finite_blocked",
            from: APPLIED,
            spell: Spell::Finite,
            to: STAY,
            response: r::REVIEW_PENDING_ARCHIVE,
        },
        rule! {
            id: "review_applied_reparo_blocked",
            from: APPLIED,
            spell: Spell::Reparo,
            to: STAY,
            response: r::REVIEW_PENDING_ARCHIVE,
        },
        rule! {
            id: "review_expecto_blocked",
            from: [
                State::PrGatheringCommentsG,
                State::PrGatheringCommentsA,
                State::PrReviewTaskDraftG,
                State::PrReviewTaskDraftA,
                State::PrAppliedPendingArchiveG,
                State::PrAppliedPendingArchiveA,
            ],
            spell: Spell::Expecto,
            to: STAY,
            response: r::EXPECTO_ONLY_WHILE_EDITING,
        },
        rule! {
            id: "review_finite_blocked",
            from: [
                State::PrGatheringCommentsG,
                State::PrGatheringCommentsA,
                State::PrReviewTaskDraftG,
                State::PrReviewTaskDraftA,
            ],
            spell: Spell::Finite,
            to: STAY,
            response: r::REVIEW_IN_PROGRESS,
        },
        rule! {
            id: "review_reparo_blocked",
            from: [
                State::PrGatheringCommentsG,
                State::PrGatheringCommentsA,
                State::PrReviewTaskDraftG,
                State::PrReviewTaskDraftA,
            ],
            spell: Spell::Reparo,
            to: STAY,
            response: r::REVIEW_IN_PROGRESS,
        },
        rule! {
            id: "confirm_finite_blocked",
            from: CONFIRMING,
            spell: Spell::Finite,
            to: STAY,
            response: r::CONFIRMATION_PENDING,
        },
        rule! {
            id: "confirm_expecto_blocked",
            from: CONFIRMING,
            spell: Spell::Expecto,
            to: STAY,
            response: r::EXPECTO_ONLY_WHILE_EDITING,
        },
    ]
}
