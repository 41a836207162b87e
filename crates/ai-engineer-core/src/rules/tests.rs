use super::*;
use crate::engine::{Engine, SpellResult};
use crate::memory::MemoryFileSystem;
use crate::render;
use crate::state::{JsonStateRepository, StateRepository};
use crate::types::{Spell, State};

struct Harness {
    fs: MemoryFileSystem,
    table: RuleTable,
}

impl Harness {
    fn new() -> Self {
        Self {
            fs: MemoryFileSystem::new(),
            table: default_table().unwrap(),
        }
    }

    fn at(state: State) -> Self {
        let h = Self::new();
        JsonStateRepository::new(&h.fs)
            .save(&StateContext::new(state))
            .unwrap();
        h
    }

    fn with(self, path: &str, content: &str) -> Self {
        self.fs.insert(path, content);
        self
    }

    fn cast(&self, spell: Spell) -> SpellResult {
        let repo = JsonStateRepository::new(&self.fs);
        Engine::new(&repo, &self.fs, &self.table)
            .resolve(spell)
            .unwrap()
    }

    fn state(&self) -> State {
        JsonStateRepository::new(&self.fs)
            .load()
            .unwrap()
            .map(|c| c.current_state)
            .unwrap_or(State::START)
    }

    fn archived(&self, dir: &str) -> Vec<String> {
        self.fs
            .paths()
            .into_iter()
            .filter(|p| p.starts_with(dir))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Table-wide properties
// ---------------------------------------------------------------------------

#[test]
fn default_table_passes_lint() {
    let table = default_table().unwrap();
    assert_eq!(table.len(), default_rules().len());
}

#[test]
fn every_pair_on_empty_workspace_resolves_cleanly() {
    for state in State::all() {
        for spell in Spell::all() {
            let h = Harness::at(*state);
            let result = h.cast(*spell);
            if !result.success {
                assert!(
                    result.message == format!("{spell} not available in state {state}"),
                    "{state} + {spell}: {}",
                    result.message
                );
                assert_eq!(h.state(), *state);
            }
            assert!(State::all().contains(&h.state()));
            assert!(
                !render::has_placeholders(&result.message),
                "{state} + {spell} left placeholders: {}",
                result.message
            );
        }
    }
}

#[test]
fn lumos_is_available_everywhere() {
    let table = default_table().unwrap();
    for state in State::all() {
        assert!(table.available_spells(*state).contains(&Spell::Lumos), "{state}");
    }
}

#[test]
fn lumos_reports_state_and_files() {
    let h = Harness::at(State::AchieveTaskExecuted).with(paths::TASK, "t");
    let result = h.cast(Spell::Lumos);
    assert!(result.success);
    assert!(result.message.contains("ACHIEVE_TASK_EXECUTED"));
    assert!(result.message.contains("- [x] task.md"));
    assert!(result.message.contains("- [ ] task-results.md"));
    assert_eq!(h.state(), State::AchieveTaskExecuted);
}

// ---------------------------------------------------------------------------
// Planning and task execution
// ---------------------------------------------------------------------------

#[test]
fn full_task_cycle() {
    let h = Harness::new();

    assert!(h.cast(Spell::Accio).success);
    assert_eq!(h.state(), State::GatherEditingContext);
    assert!(h.fs.file(paths::CONTEXT).is_some());
    assert!(h.fs.file(paths::PLAN_GUIDE).is_some());
    assert!(h.fs.file(paths::TASK_GUIDE).is_some());

    assert!(h.cast(Spell::Accio).success);
    assert_eq!(h.state(), State::GatherEditing);
    assert!(h.fs.file(paths::PLAN).is_some());

    h.fs.insert(paths::PLAN, "# Plan\n- [ ] login works\n");
    assert!(h.cast(Spell::Accio).success);
    assert_eq!(h.state(), State::AchieveTaskDrafting);
    assert!(h.fs.file(paths::TASK).is_some());

    h.fs.insert(paths::TASK, "---\ntask_name: 'login'\n---\n# Task\n");
    assert!(h.cast(Spell::Accio).success);
    assert_eq!(h.state(), State::AchieveTaskExecuted);

    h.fs.insert(paths::TASK_RESULTS, "login implemented");
    let result = h.cast(Spell::Accio);
    assert!(result.success);
    assert!(result.message.contains("login implemented"));
    assert_eq!(h.state(), State::AchieveTaskDrafting);
    assert!(h.fs.file(paths::TASK_RESULTS).is_none());
    let archived = h.archived(".ai/task/tasks/task-login-");
    assert_eq!(archived.len(), 2, "{archived:?}");

    h.fs.insert(paths::PLAN, "# Plan\n- [x] login works\n");
    assert!(h.cast(Spell::Accio).success);
    assert_eq!(h.state(), State::AchieveComplete);

    assert!(h.cast(Spell::Finite).success);
    assert_eq!(h.state(), State::GatherEditing);
}

#[test]
fn context_links_are_listed_when_planning() {
    let h = Harness::at(State::GatherEditingContext).with(
        paths::CONTEXT,
        "see https://acme.atlassian.net/browse/ENG-7",
    );
    let result = h.cast(Spell::Accio);
    assert!(result.success);
    assert!(result.message.contains("- https://acme.atlassian.net/browse/ENG-7"));
    assert_eq!(h.state(), State::GatherEditing);
}

#[test]
fn missing_context_is_an_error_state() {
    let h = Harness::at(State::GatherEditingContext);
    assert!(h.cast(Spell::Accio).success);
    assert_eq!(h.state(), State::ErrorContextMissing);

    assert!(h.cast(Spell::Accio).success);
    assert_eq!(h.state(), State::GatherEditingContext);
    assert!(h.fs.file(paths::CONTEXT).is_some());
}

#[test]
fn plan_without_pending_criteria_stays() {
    let h = Harness::at(State::GatherEditing).with(paths::PLAN, "# Plan\nnothing yet");
    let result = h.cast(Spell::Accio);
    assert!(result.success);
    assert!(result.message.contains("no pending acceptance criteria"));
    assert_eq!(h.state(), State::GatherEditing);
}

#[test]
fn mixed_plan_does_not_complete() {
    let h = Harness::at(State::AchieveTaskDrafting)
        .with(paths::PLAN, "- [ ] one\n- [x] two\n")
        .with(paths::TASK, "task");
    h.cast(Spell::Accio);
    assert_eq!(h.state(), State::AchieveTaskExecuted);
}

#[test]
fn existing_task_is_resumed() {
    let h = Harness::at(State::GatherEditing)
        .with(paths::PLAN, "- [ ] one\n")
        .with(paths::TASK, "ongoing work");
    let result = h.cast(Spell::Accio);
    assert!(result.message.contains("ongoing work"));
    assert_eq!(h.state(), State::AchieveTaskDrafting);
}

#[test]
fn missing_results_then_abandon_task() {
    let h = Harness::at(State::AchieveTaskExecuted)
        .with(paths::PLAN, "- [ ] one\n")
        .with(paths::TASK, "half done");
    h.cast(Spell::Accio);
    assert_eq!(h.state(), State::ErrorTaskResultsMissing);

    let result = h.cast(Spell::Accio);
    assert!(result.success);
    assert_eq!(h.state(), State::AchieveTaskDrafting);
    let archived = h.archived(".ai/task/tasks/task-unknown-task-");
    assert_eq!(archived.len(), 1, "{archived:?}");
    assert!(archived[0].ends_with("/task.md"));
    assert_eq!(
        h.fs.file(paths::TASK).as_deref(),
        Some(crate::templates::TASK)
    );
}

#[test]
fn missing_plan_restarts_gathering() {
    let h = Harness::at(State::GatherEditing);
    h.cast(Spell::Accio);
    assert_eq!(h.state(), State::ErrorPlanMissing);
    h.cast(Spell::Accio);
    assert_eq!(h.state(), State::GatherNeedsContext);
}

// ---------------------------------------------------------------------------
// PR review
// ---------------------------------------------------------------------------

#[test]
fn review_from_plan_round_trip() {
    let h = Harness::at(State::GatherEditing).with(paths::PLAN, "- [ ] one\n");

    h.cast(Spell::Reparo);
    assert_eq!(h.state(), State::PrGatheringCommentsG);
    assert!(h.fs.file(paths::COMMENTS).is_some());

    h.cast(Spell::Accio);
    assert_eq!(h.state(), State::PrReviewTaskDraftG);
    assert!(h.fs.file(paths::REVIEW_TASK).is_some());

    h.cast(Spell::Accio);
    assert_eq!(h.state(), State::PrAppliedPendingArchiveG);

    h.cast(Spell::Accio);
    assert_eq!(h.state(), State::ErrorReviewTaskResultsMissingG);

    h.cast(Spell::Accio);
    assert_eq!(h.state(), State::PrReviewTaskDraftG);
    h.cast(Spell::Accio);
    assert_eq!(h.state(), State::PrAppliedPendingArchiveG);

    h.fs.insert(paths::REVIEW_TASK_RESULTS, "renamed the helper");
    let result = h.cast(Spell::Accio);
    assert!(result.success);
    assert_eq!(h.state(), State::GatherEditing);
    assert!(result.message.contains("renamed the helper"));
    assert!(result.message.contains("MANDATORY ACTION FOR AI"));
    assert!(result.message.contains("review-task-results.md"));
    assert!(result.message.contains("understand what changes were made"));
    assert_eq!(h.archived(".ai/task/pr-reviews/pr-review-").len(), 3);
    assert!(h.fs.file(paths::COMMENTS).is_none());
}

#[test]
fn review_from_task_side_creates_task_when_missing() {
    let h = Harness::at(State::PrAppliedPendingArchiveA)
        .with(paths::COMMENTS, "c")
        .with(paths::REVIEW_TASK, "r")
        .with(paths::REVIEW_TASK_RESULTS, "done");
    h.cast(Spell::Accio);
    assert_eq!(h.state(), State::AchieveTaskDrafting);
    assert!(h.fs.file(paths::TASK).is_some());
}

#[test]
fn review_from_task_side_keeps_existing_task() {
    let h = Harness::at(State::PrAppliedPendingArchiveA)
        .with(paths::TASK, "current")
        .with(paths::REVIEW_TASK_RESULTS, "done");
    let result = h.cast(Spell::Accio);
    assert!(result.message.contains("Back to the current task"));
    assert_eq!(h.fs.file(paths::TASK).as_deref(), Some("current"));
}

#[test]
fn existing_comments_ask_for_confirmation() {
    let h = Harness::at(State::AchieveTaskDrafting).with(paths::COMMENTS, "old comments");
    h.cast(Spell::Reparo);
    assert_eq!(h.state(), State::PrConfirmRestartCommentsA);

    let result = h.cast(Spell::Reparo);
    assert!(result.success);
    assert_eq!(h.state(), State::PrGatheringCommentsA);
    assert_eq!(
        h.fs.file(paths::COMMENTS).as_deref(),
        Some(crate::templates::COMMENTS)
    );
    let archived = h.archived(".ai/task/pr-reviews/");
    assert_eq!(archived.len(), 1);
    assert!(archived[0].ends_with("/comments.md"));
}

#[test]
fn confirmation_can_continue_instead() {
    let h = Harness::at(State::GatherEditing).with(paths::REVIEW_TASK, "r");
    h.cast(Spell::Reparo);
    assert_eq!(h.state(), State::PrConfirmRestartTaskG);
    h.cast(Spell::Accio);
    assert_eq!(h.state(), State::PrReviewTaskDraftG);
}

#[test]
fn reverto_returns_to_the_right_task_step() {
    let h = Harness::at(State::PrReviewTaskDraftA)
        .with(paths::TASK, "t")
        .with(paths::TASK_RESULTS, "r");
    h.cast(Spell::Reverto);
    assert_eq!(h.state(), State::AchieveTaskExecuted);

    let h = Harness::at(State::PrGatheringCommentsA).with(paths::TASK, "t");
    h.cast(Spell::Reverto);
    assert_eq!(h.state(), State::AchieveTaskDrafting);

    let h = Harness::at(State::PrConfirmRestartCommentsG);
    h.cast(Spell::Reverto);
    assert_eq!(h.state(), State::GatherEditing);
}

#[test]
fn unmatched_pair_reports_unavailable() {
    let h = Harness::at(State::ErrorReviewTaskResultsMissingG);
    let result = h.cast(Spell::Accio);
    assert!(!result.success);
    assert_eq!(
        result.message,
        "Accio not available in state ERROR_REVIEW_TASK_RESULTS_MISSING_G"
    );
}

#[test]
fn blocked_rules_stay_put() {
    let h = Harness::at(State::PrAppliedPendingArchiveG);
    let result = h.cast(Spell::Reverto);
    assert!(result.success);
    assert_eq!(h.state(), State::PrAppliedPendingArchiveG);
}

// ---------------------------------------------------------------------------
// Expecto
// ---------------------------------------------------------------------------

#[test]
fn expecto_records_new_links_once() {
    let h = Harness::at(State::GatherEditing).with(
        paths::PLAN,
        "https://acme.atlassian.net/browse/A-1\nhttps://acme.atlassian.net/wiki/B",
    );

    let first = h.cast(Spell::Expecto);
    assert!(first.success);
    assert!(first.message.contains("- https://acme.atlassian.net/browse/A-1"));
    assert!(first.message.contains(".ai/task/plan.md"));
    assert!(h.fs.file(paths::ATLASSIAN_REFS).is_some());

    let second = h.cast(Spell::Expecto);
    assert!(second.message.contains("already been processed"));

    h.fs.insert(
        paths::PLAN,
        "https://acme.atlassian.net/browse/A-1\nhttps://acme.atlassian.net/browse/C-3",
    );
    let third = h.cast(Spell::Expecto);
    assert!(third.message.contains("C-3"));
    assert!(!third.message.contains("A-1"));
    assert_eq!(h.state(), State::GatherEditing);
}

#[test]
fn expecto_without_links() {
    let h = Harness::at(State::GatherEditingContext).with(paths::CONTEXT, "no links");
    let result = h.cast(Spell::Expecto);
    assert!(result.success);
    assert!(result.message.contains("contains no Atlassian links"));
}

#[test]
fn expecto_outside_editing_is_blocked() {
    let h = Harness::at(State::AchieveTaskDrafting);
    let result = h.cast(Spell::Expecto);
    assert!(result.message.contains("only works while editing"));
}
