use crate::error::{EngineError, Result};
use crate::fs::FileSystem;
use crate::render;
use crate::rule::{Rule, RuleTable};
use crate::state::{StateContext, StateRepository};
use crate::types::{Spell, State};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpellResult {
    pub success: bool,
    pub message: String,
}

impl SpellResult {
    fn ok(message: String) -> Self {
        Self {
            success: true,
            message,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            success: false,
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub state: State,
    pub description: &'static str,
    pub available_spells: Vec<Spell>,
    /// False until a transition has been persisted.
    pub initialized: bool,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Applies spells to the workspace: picks the first matching rule whose
/// guard passes, runs it, and persists the new state.
pub struct Engine<'a> {
    repo: &'a dyn StateRepository,
    fs: &'a dyn FileSystem,
    table: &'a RuleTable,
}

impl<'a> Engine<'a> {
    pub fn new(repo: &'a dyn StateRepository, fs: &'a dyn FileSystem, table: &'a RuleTable) -> Self {
        Self { repo, fs, table }
    }

    /// Cast `spell` against the current state.
    ///
    /// Guard failures and state-file problems are returned as errors. A spell
    /// with no applicable rule, or a rule whose action fails, is reported in
    /// the result with the state left as it was.
    pub fn resolve(&self, spell: Spell) -> Result<SpellResult> {
        let ctx = self.context()?;
        let current = ctx.current_state;

        let Some(rule) = self.select(&ctx, spell)? else {
            tracing::debug!(%spell, state = %current, "no applicable rule");
            return Ok(SpellResult::failed(format!(
                "{spell} not available in state {current}"
            )));
        };

        let next = rule
            .to
            .resolve(current)
            .ok_or_else(|| EngineError::UnresolvedDestination {
                rule: rule.id,
                to: rule.to.to_string(),
                from: current.to_string(),
            })?;

        let replacements = match (rule.execute)(&ctx, self.fs) {
            Ok(replacements) => replacements,
            Err(e) => {
                tracing::warn!(rule = rule.id, %spell, error = %e, "spell failed");
                return Ok(SpellResult::failed(format!(
                    "Failed to execute spell {spell}: {e}"
                )));
            }
        };

        let keys: Vec<&str> = replacements.keys().copied().collect();
        let missing = render::missing_placeholders(rule.response, &keys);
        if !missing.is_empty() {
            tracing::warn!(rule = rule.id, ?missing, "response left placeholders unfilled");
        }
        let message = render::render(rule.response, &replacements);

        if next != current {
            self.repo.update_state(&ctx, next)?;
        }
        tracing::info!(rule = rule.id, %spell, from = %current, to = %next, "transition applied");
        Ok(SpellResult::ok(message))
    }

    /// Current state and the spells that have rules from it.
    pub fn status(&self) -> Result<Status> {
        let loaded = self.repo.load()?;
        let state = loaded.map(|c| c.current_state).unwrap_or(State::START);
        Ok(Status {
            state,
            description: state.description(),
            available_spells: self.table.available_spells(state),
            initialized: loaded.is_some(),
        })
    }

    /// Persisted context, or the start state when nothing is saved yet.
    /// The start context is not written until a transition leaves it.
    pub fn context(&self) -> Result<StateContext> {
        Ok(self
            .repo
            .load()?
            .unwrap_or_else(|| StateContext::new(State::START)))
    }

    fn select(&self, ctx: &StateContext, spell: Spell) -> Result<Option<&'a Rule>> {
        for rule in self.table.candidates(ctx.current_state, spell) {
            let applies = match rule.condition {
                Some(condition) => condition(ctx, self.fs)?,
                None => true,
            };
            tracing::debug!(rule = rule.id, applies, "evaluated candidate");
            if applies {
                return Ok(Some(rule));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryFileSystem;
    use crate::paths;
    use crate::plan::AcceptanceCriteria;
    use crate::render::Replacements;
    use crate::rule::{rule, STAY};
    use crate::state::JsonStateRepository;
    use crate::types::Family;
    use std::path::Path;

    fn no_pending_criteria(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
        let plan = fs.read(Path::new(paths::PLAN))?;
        Ok(!AcceptanceCriteria::parse(&plan).has_pending())
    }

    fn plan_exists(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
        fs.exists(Path::new(paths::PLAN))
    }

    fn always(_: &StateContext, _: &dyn FileSystem) -> Result<bool> {
        Ok(true)
    }

    fn write_marker(_: &StateContext, fs: &dyn FileSystem) -> Result<Replacements> {
        fs.write(Path::new("marker.md"), "x")?;
        Ok(Replacements::from([("WHO", "world".to_string())]))
    }

    fn boom(_: &StateContext, fs: &dyn FileSystem) -> Result<Replacements> {
        fs.read(Path::new("missing.md"))?;
        Ok(Replacements::new())
    }

    fn single_rule_table() -> RuleTable {
        RuleTable::new(vec![rule! {
            id: "start-next",
            from: [State::GatherNeedsContext],
            spell: Spell::Accio,
            to: State::GatherEditingContext,
            response: "ok",
        }])
        .unwrap()
    }

    #[test]
    fn first_call_without_state_file() {
        let fs = MemoryFileSystem::new();
        let repo = JsonStateRepository::new(&fs);
        let table = single_rule_table();
        let engine = Engine::new(&repo, &fs, &table);

        let result = engine.resolve(Spell::Accio).unwrap();
        assert_eq!(result, SpellResult::ok("ok".to_string()));
        assert_eq!(
            repo.load().unwrap(),
            Some(StateContext::new(State::GatherEditingContext))
        );
    }

    #[test]
    fn unmatched_spell_is_blocked_and_persists_nothing() {
        let fs = MemoryFileSystem::new();
        let repo = JsonStateRepository::new(&fs);
        let table = single_rule_table();
        let engine = Engine::new(&repo, &fs, &table);

        let result = engine.resolve(Spell::Reparo).unwrap();
        assert!(!result.success);
        assert_eq!(result.message, "Reparo not available in state GATHER_NEEDS_CONTEXT");
        assert!(repo.load().unwrap().is_none());
    }

    #[test]
    fn stay_rule_succeeds_without_writing_state() {
        let fs = MemoryFileSystem::new();
        let repo = JsonStateRepository::new(&fs);
        let table = RuleTable::new(vec![rule! {
            id: "stay",
            from: State::all(),
            spell: Spell::Lumos,
            to: STAY,
            response: "hello [WHO]",
            execute: write_marker,
            supplies: &["WHO"],
        }])
        .unwrap();
        let engine = Engine::new(&repo, &fs, &table);

        let result = engine.resolve(Spell::Lumos).unwrap();
        assert!(result.success);
        assert_eq!(result.message, "hello world");
        assert!(fs.file(paths::STATE_FILE).is_none());
        assert!(fs.file("marker.md").is_some());
    }

    #[test]
    fn false_guard_falls_through_to_next_candidate() {
        let fs = MemoryFileSystem::with_files(&[(paths::PLAN, "- [ ] open\n- [x] done\n")]);
        let repo = JsonStateRepository::new(&fs);
        repo.save(&StateContext::new(State::AchieveTaskDrafting)).unwrap();
        let table = RuleTable::new(vec![
            rule! {
                id: "complete",
                from: [State::AchieveTaskDrafting],
                spell: Spell::Accio,
                to: State::AchieveComplete,
                response: "complete",
                when: no_pending_criteria,
            },
            rule! {
                id: "executed",
                from: [State::AchieveTaskDrafting],
                spell: Spell::Accio,
                to: State::AchieveTaskExecuted,
                response: "executed",
                when: plan_exists,
            },
        ])
        .unwrap();
        let engine = Engine::new(&repo, &fs, &table);

        let result = engine.resolve(Spell::Accio).unwrap();
        assert_eq!(result.message, "executed");
        assert_eq!(
            repo.load().unwrap().unwrap().current_state,
            State::AchieveTaskExecuted
        );
    }

    #[test]
    fn false_guard_with_no_other_candidate_is_blocked() {
        let fs = MemoryFileSystem::with_files(&[(paths::PLAN, "- [ ] open\n- [x] done\n")]);
        let repo = JsonStateRepository::new(&fs);
        repo.save(&StateContext::new(State::AchieveTaskDrafting)).unwrap();
        let table = RuleTable::new(vec![rule! {
            id: "complete",
            from: [State::AchieveTaskDrafting],
            spell: Spell::Accio,
            to: State::AchieveComplete,
            response: "complete",
            when: no_pending_criteria,
        }])
        .unwrap();
        let result = Engine::new(&repo, &fs, &table).resolve(Spell::Accio).unwrap();
        assert!(!result.success);
        assert!(result.message.contains("not available"));
    }

    #[test]
    fn first_true_guard_wins() {
        let fs = MemoryFileSystem::new();
        let repo = JsonStateRepository::new(&fs);
        let table = RuleTable::new(vec![
            rule! { id: "one", from: [State::START], spell: Spell::Accio, to: State::GatherEditing, response: "one", when: always },
            rule! { id: "two", from: [State::START], spell: Spell::Accio, to: State::AchieveComplete, response: "two" },
        ])
        .unwrap();
        let result = Engine::new(&repo, &fs, &table).resolve(Spell::Accio).unwrap();
        assert_eq!(result.message, "one");
    }

    #[test]
    fn guard_error_propagates() {
        let fs = MemoryFileSystem::with_files(&[(paths::PLAN, "- [x] a")]);
        fs.fail_reads(paths::PLAN);
        let repo = JsonStateRepository::new(&fs);
        let table = RuleTable::new(vec![rule! {
            id: "complete",
            from: [State::START],
            spell: Spell::Accio,
            to: State::AchieveComplete,
            response: "",
            when: no_pending_criteria,
        }])
        .unwrap();
        let err = Engine::new(&repo, &fs, &table).resolve(Spell::Accio).unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
        assert!(repo.load().unwrap().is_none());
    }

    #[test]
    fn execute_error_reports_failure_and_keeps_state() {
        let fs = MemoryFileSystem::new();
        let repo = JsonStateRepository::new(&fs);
        repo.save(&StateContext::new(State::GatherEditing)).unwrap();
        let table = RuleTable::new(vec![rule! {
            id: "boom",
            from: [State::GatherEditing],
            spell: Spell::Accio,
            to: State::AchieveTaskDrafting,
            response: "",
            execute: boom,
        }])
        .unwrap();
        let result = Engine::new(&repo, &fs, &table).resolve(Spell::Accio).unwrap();
        assert!(!result.success);
        assert!(result.message.starts_with("Failed to execute spell Accio: "));
        assert!(result.message.contains("missing.md"));
        assert_eq!(repo.load().unwrap().unwrap().current_state, State::GatherEditing);
    }

    #[test]
    fn corrupt_state_file_is_an_error() {
        let fs = MemoryFileSystem::with_files(&[(paths::STATE_FILE, r#"{"currentState":"NOPE"}"#)]);
        let repo = JsonStateRepository::new(&fs);
        let table = single_rule_table();
        let err = Engine::new(&repo, &fs, &table).resolve(Spell::Accio).unwrap_err();
        assert!(err.to_string().contains("NOPE"));
        assert_eq!(fs.file(paths::STATE_FILE).as_deref(), Some(r#"{"currentState":"NOPE"}"#));
    }

    #[test]
    fn variant_destination_follows_source_suffix() {
        let fs = MemoryFileSystem::new();
        let repo = JsonStateRepository::new(&fs);
        repo.save(&StateContext::new(State::PrGatheringCommentsA)).unwrap();
        let table = RuleTable::new(vec![rule! {
            id: "draft",
            from: [State::PrGatheringCommentsG, State::PrGatheringCommentsA],
            spell: Spell::Accio,
            to: Family::ReviewTaskDraft,
            response: "drafting",
        }])
        .unwrap();
        Engine::new(&repo, &fs, &table).resolve(Spell::Accio).unwrap();
        assert_eq!(
            repo.load().unwrap().unwrap().current_state,
            State::PrReviewTaskDraftA
        );
    }

    #[test]
    fn status_reports_available_spells() {
        let fs = MemoryFileSystem::new();
        let repo = JsonStateRepository::new(&fs);
        let table = single_rule_table();
        let status = Engine::new(&repo, &fs, &table).status().unwrap();
        assert_eq!(status.state, State::GatherNeedsContext);
        assert_eq!(status.available_spells, vec![Spell::Accio]);
        assert!(!status.initialized);
    }
}
