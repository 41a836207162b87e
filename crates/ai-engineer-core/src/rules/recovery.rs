use super::{
    archive_task, archive_task_and_start_next, comments_exist, comments_missing, create,
    create_comments, create_review_task, create_task, review_task_exists, task_results_exist,
    task_results_missing,
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

const REVIEW_TASK_ERRORS: [State; 4] = [
    State::ErrorReviewTaskMissingG,
    State::ErrorReviewTaskMissingA,
    State::ErrorReviewTaskResultsMissingG,
    State::ErrorReviewTaskResultsMissingA,
];

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

fn archive_incomplete_task(_: &StateContext, fs: &dyn FileSystem) -> Result<Replacements> {
    let report = archive_task(fs)?;
    create(fs, paths::TASK, templates::TASK)?;
    Ok(Replacements::from([("ARCHIVE_DIR", report.dir_display())]))
}

fn recreate_context(_: &StateContext, fs: &dyn FileSystem) -> Result<Replacements> {
    create(fs, paths::CONTEXT, templates::CONTEXT)?;
    Ok(Replacements::new())
}

// ---------------------------------------------------------------------------
// Error recovery
// ---------------------------------------------------------------------------

pub fn rules() -> Vec<Rule> {
    let mut rules = recovery();
    rules.extend(blocked());
    rules
}

fn recovery() -> Vec<Rule> {
    vec![
        rule! {
            id: "recover_task",
            from: [State::ErrorTaskMissing],
            spell: Spell::Accio,
            to: State::AchieveTaskDrafting,
            response: r::TASK_RECREATED,
            execute: create_task,
        },
        rule! {
            id: "recover_task_results",
            from: [State::ErrorTaskResultsMissing],
            spell: Spell::Accio,
            to: State::AchieveTaskDrafting,
            response: r::TASK_RESULTS_RECOVERED,
            when: task_results_exist,
            execute: archive_task_and_start_next,
            supplies: &["TASK_RESULTS", "ARCHIVE_DIR"],
        },
        rule! {
            id: "recover_abandon_task",
            from: [State::ErrorTaskResultsMissing],
            spell: Spell::Accio,
            to: State::AchieveTaskDrafting,
            response: r::INCOMPLETE_TASK_ARCHIVED,
            when: task_results_missing,
            execute: archive_incomplete_task,
            supplies: &["ARCHIVE_DIR"],
        },
        rule! {
            id: "recover_plan",
            from: [State::ErrorPlanMissing],
            spell: Spell::Accio,
            to: State::GatherNeedsContext,
            response: r::PLAN_RESTART,
        },
        rule! {
            id: "recover_comments",
            from: [State::ErrorCommentsMissingG, State::ErrorCommentsMissingA],
            spell: Spell::Accio,
            to: Family::GatheringComments,
            response: r::REVIEW_STARTED,
            execute: create_comments,
        },
        rule! {
            id: "recover_review_task",
            from: [State::ErrorReviewTaskMissingG, State::ErrorReviewTaskMissingA],
            spell: Spell::Accio,
            to: Family::ReviewTaskDraft,
            response: r::REVIEW_TASK_CREATED,
            when: comments_exist,
            execute: create_review_task,
        },
        rule! {
            id: "recover_review_task_without_comments",
            from: [State::ErrorReviewTaskMissingG, State::ErrorReviewTaskMissingA],
            spell: Spell::Accio,
            to: Family::CommentsMissing,
            response: r::COMMENTS_MISSING,
            when: comments_missing,
        },
        rule! {
            id: "recover_review_results",
            from: [
                State::ErrorReviewTaskResultsMissingG,
                State::ErrorReviewTaskResultsMissingA,
            ],
            spell: Spell::Accio,
            to: Family::ReviewTaskDraft,
            response: r::CONTINUE_REVIEW_TASK,
            when: review_task_exists,
        },
        rule! {
            id: "recover_context",
            from: [State::ErrorContextMissing],
            spell: Spell::Accio,
            to: State::GatherEditingContext,
            response: r::CONTEXT_RECREATED,
            execute: recreate_context,
        },
    ]
}

fn blocked() -> Vec<Rule> {
    vec![
        rule! {
            id: "error_finite_blocked",
            from: [
                State::ErrorPlanMissing,
                State::ErrorTaskMissing,
                State::ErrorTaskResultsMissing,
                State::ErrorContextMissing,
            ]
            .into_iter()
            .chain(REVIEW_TASK_ERRORS)
            .collect::<Vec<_>>(),
            spell: Spell::Finite,
            to: STAY,
            response: r::RESOLVE_ERROR_FIRST,
        },
        rule! {
            id: "error_reparo_blocked",
            from: [
                State::ErrorPlanMissing,
                State::ErrorContextMissing,
                State::ErrorReviewTaskResultsMissingG,
                State::ErrorReviewTaskResultsMissingA,
            ],
            spell: Spell::Reparo,
            to: STAY,
            response: r::RESOLVE_ERROR_FIRST,
        },
        rule! {
            id: "error_reverto_blocked",
            from: [
                State::ErrorTaskMissing,
                State::ErrorTaskResultsMissing,
                State::ErrorPlanMissing,
                State::ErrorContextMissing,
                State::ErrorReviewTaskMissingG,
                State::ErrorReviewTaskMissingA,
                State::ErrorReviewTaskResultsMissingG,
                State::ErrorReviewTaskResultsMissingA,
            ],
            spell: Spell::Reverto,
            to: STAY,
            response: r::RESOLVE_ERROR_FIRST,
        },
        rule! {
            id: "error_expecto_blocked",
            from: State::all()
                .iter()
                .copied()
                .filter(|s| s.is_error())
                .collect::<Vec<_>>(),
            spell: Spell::Expecto,
            to: STAY,
            response: r::EXPECTO_ONLY_WHILE_EDITING,
        },
    ]
}
