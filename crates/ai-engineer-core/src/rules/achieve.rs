use super::{archive_task_and_start_next, create_task, exists, task_results_missing};
use crate::error::Result;
use crate::fs::FileSystem;
use crate::paths;
use crate::plan;
use crate::render::Replacements;
use crate::responses as r;
use crate::rule::{rule, Rule, STAY};
use crate::state::StateContext;
use crate::types::{Spell, State};

const ACHIEVE_STATES: [State; 3] = [
    State::AchieveTaskDrafting,
    State::AchieveTaskExecuted,
    State::AchieveComplete,
];

// ---------------------------------------------------------------------------
// Conditions
// ---------------------------------------------------------------------------

fn plan_ready_for_task(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(exists(fs, paths::PLAN)?
        && plan::plan_criteria(fs)?.has_pending()
        && !exists(fs, paths::TASK)?)
}

fn plan_without_pending(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(exists(fs, paths::PLAN)? && !plan::plan_criteria(fs)?.has_pending())
}

fn plan_and_task_exist(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(exists(fs, paths::PLAN)? && exists(fs, paths::TASK)?)
}

fn plan_complete(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(plan::plan_criteria(fs)?.all_complete())
}

fn results_and_plan_exist(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(exists(fs, paths::TASK)? && exists(fs, paths::TASK_RESULTS)? && exists(fs, paths::PLAN)?)
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

fn show_existing_task(_: &StateContext, fs: &dyn FileSystem) -> Result<Replacements> {
    let content = fs.read_safe(paths::rel(paths::TASK), "");
    Ok(Replacements::from([("TASK_CONTENT", content)]))
}

// ---------------------------------------------------------------------------
// Task execution
// ---------------------------------------------------------------------------

pub fn rules() -> Vec<Rule> {
    vec![
        // Plan editing
        rule! {
            id: "plan_start_task",
            from: [State::GatherEditing],
            spell: Spell::Accio,
            to: State::AchieveTaskDrafting,
            response: r::TASK_CREATED,
            when: plan_ready_for_task,
            execute: create_task,
        },
        rule! {
            id: "plan_missing",
            from: [State::GatherEditing],
            spell: Spell::Accio,
            to: State::ErrorPlanMissing,
            response: r::PLAN_MISSING,
            when: |_, fs| Ok(!exists(fs, paths::PLAN)?),
        },
        rule! {
            id: "plan_no_pending_criteria",
            from: [State::GatherEditing],
            spell: Spell::Accio,
            to: STAY,
            response: r::PLAN_NO_PENDING,
            when: plan_without_pending,
        },
        rule! {
            id: "plan_resume_task",
            from: [State::GatherEditing],
            spell: Spell::Accio,
            to: State::AchieveTaskDrafting,
            response: r::TASK_EXISTS,
            when: plan_and_task_exist,
            execute: show_existing_task,
            supplies: &["TASK_CONTENT"],
        },
        rule! {
            id: "plan_reverto_blocked",
            from: [State::GatherEditing],
            spell: Spell::Reverto,
            to: STAY,
            response: r::REVERTO_NOT_IN_REVIEW,
        },
        // Task drafting and execution
        rule! {
            id: "task_all_complete",
            from: [State::AchieveTaskDrafting],
            spell: Spell::Accio,
            to: State::AchieveComplete,
            response: r::ALL_CRITERIA_COMPLETE,
            when: plan_complete,
        },
        rule! {
            id: "task_executed",
            from: [State::AchieveTaskDrafting],
            spell: Spell::Accio,
            to: State::AchieveTaskExecuted,
            response: r::TASK_EXECUTED,
            when: plan_and_task_exist,
        },
        rule! {
            id: "task_missing",
            from: [State::AchieveTaskDrafting],
            spell: Spell::Accio,
            to: State::ErrorTaskMissing,
            response: r::TASK_MISSING,
            when: |_, fs| Ok(!exists(fs, paths::TASK)?),
        },
        rule! {
            id: "task_archive_results",
            from: [State::AchieveTaskExecuted],
            spell: Spell::Accio,
            to: State::AchieveTaskDrafting,
            response: r::TASK_ARCHIVED,
            when: results_and_plan_exist,
            execute: archive_task_and_start_next,
            supplies: &["TASK_RESULTS", "ARCHIVE_DIR"],
        },
        rule! {
            id: "task_results_missing",
            from: [State::AchieveTaskExecuted],
            spell: Spell::Accio,
            to: State::ErrorTaskResultsMissing,
            response: r::TASK_RESULTS_MISSING,
            when: task_results_missing,
        },
        rule! {
            id: "task_already_complete",
            from: [State::AchieveComplete],
            spell: Spell::Accio,
            to: STAY,
            response: r::ALREADY_COMPLETE,
        },
        // Blocked
        rule! {
            id: "task_finite_blocked",
            from: [State::AchieveTaskExecuted],
            spell: Spell::Finite,
            to: STAY,
            response: r::FINITE_DURING_EXECUTION,
        },
        rule! {
            id: "task_reverto_blocked",
            from: ACHIEVE_STATES,
            spell: Spell::Reverto,
            to: STAY,
            response: r::REVERTO_NOT_IN_REVIEW,
        },
        rule! {
            id: "task_expecto_blocked",
            from: ACHIEVE_STATES,
            spell: Spell::Expecto,
            to: STAY,
            response: r::EXPECTO_ONLY_WHILE_EDITING,
        },
    ]
}
