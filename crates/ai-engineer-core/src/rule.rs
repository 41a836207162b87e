use crate::error::{EngineError, Result};
use crate::fs::FileSystem;
use crate::render::{self, Replacements};
use crate::state::StateContext;
use crate::types::{Family, Spell, State};
use std::collections::HashSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Destination
// ---------------------------------------------------------------------------

/// Where a rule sends the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Literal(State),
    /// Stay in the source state.
    SameAsSource,
    /// The member of `Family` carrying the source state's G/A suffix.
    Variant(Family),
}

pub const STAY: Destination = Destination::SameAsSource;

impl Destination {
    /// Concrete destination from `from`. `None` only for a `Variant` reached
    /// from a state without a G/A suffix, which table linting rejects.
    pub fn resolve(self, from: State) -> Option<State> {
        match self {
            Destination::Literal(state) => Some(state),
            Destination::SameAsSource => Some(from),
            Destination::Variant(family) => from.variant().map(|v| family.with(v)),
        }
    }
}

impl From<State> for Destination {
    fn from(state: State) -> Self {
        Destination::Literal(state)
    }
}

impl From<Family> for Destination {
    fn from(family: Family) -> Self {
        Destination::Variant(family)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Literal(state) => f.write_str(state.as_str()),
            Destination::SameAsSource => f.write_str("(unchanged)"),
            Destination::Variant(family) => write!(f, "{}_[G/A]", family.base_name()),
        }
    }
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

pub type Condition = fn(&StateContext, &dyn FileSystem) -> Result<bool>;
pub type Action = fn(&StateContext, &dyn FileSystem) -> Result<Replacements>;

/// One guarded transition. The message shown to the caller is `response`
/// rendered with the replacements `execute` returns; `supplies` names every
/// placeholder `execute` fills in.
pub struct Rule {
    pub id: &'static str,
    pub from: Vec<State>,
    pub spell: Spell,
    pub to: Destination,
    pub condition: Option<Condition>,
    pub execute: Action,
    pub response: &'static str,
    pub supplies: &'static [&'static str],
}

impl Rule {
    pub fn is_candidate(&self, state: State, spell: Spell) -> bool {
        self.spell == spell && self.from.contains(&state)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("from", &self.from)
            .field("spell", &self.spell)
            .field("to", &self.to)
            .field("guarded", &self.condition.is_some())
            .finish()
    }
}

/// Action for rules whose response needs no values.
pub fn no_effects(_ctx: &StateContext, _fs: &dyn FileSystem) -> Result<Replacements> {
    Ok(Replacements::new())
}

macro_rules! rule {
    (
        id: $id:expr,
        from: $from:expr,
        spell: $spell:expr,
        to: $to:expr,
        response: $resp:expr
        $(, when: $cond:expr)?
        $(, execute: $exec:expr)?
        $(, supplies: $sup:expr)?
        $(,)?
    ) => {
        $crate::rule::Rule {
            id: $id,
            from: ::std::vec::Vec::from($from),
            spell: $spell,
            to: $crate::rule::Destination::from($to),
            condition: {
                #[allow(unused_assignments, unused_mut)]
                let mut v: Option<$crate::rule::Condition> = None;
                $(
                    let cond: $crate::rule::Condition = $cond;
                    v = Some(cond);
                )?
                v
            },
            execute: {
                #[allow(unused_assignments, unused_mut)]
                let mut v: $crate::rule::Action = $crate::rule::no_effects;
                $(
                    let exec: $crate::rule::Action = $exec;
                    v = exec;
                )?
                v
            },
            response: $resp,
            supplies: {
                #[allow(unused_assignments, unused_mut)]
                let mut v: &'static [&'static str] = &[];
                $(v = $sup;)?
                v
            },
        }
    };
}

pub(crate) use rule;

// ---------------------------------------------------------------------------
// RuleTable
// ---------------------------------------------------------------------------

/// Ordered rules. Earlier rules win over later ones for the same state and spell.
#[derive(Debug)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Lint and wrap `rules`.
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        lint(&rules)?;
        Ok(Self { rules })
    }

    /// Concatenate phase tables in order.
    pub fn compose(phases: Vec<Vec<Rule>>) -> Result<Self> {
        Self::new(phases.into_iter().flatten().collect())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn candidates(&self, state: State, spell: Spell) -> impl Iterator<Item = &Rule> + '_ {
        self.rules
            .iter()
            .filter(move |rule| rule.is_candidate(state, spell))
    }

    /// Spells with at least one rule from `state`, whatever their guards say.
    pub fn available_spells(&self, state: State) -> Vec<Spell> {
        Spell::all()
            .iter()
            .copied()
            .filter(|spell| self.candidates(state, *spell).next().is_some())
            .collect()
    }
}

/// Reject rules the engine could not apply safely.
pub fn lint(rules: &[Rule]) -> Result<()> {
    let mut ids = HashSet::new();
    for rule in rules {
        let invalid = |reason: String| EngineError::InvalidRule {
            id: rule.id,
            reason,
        };

        if !ids.insert(rule.id) {
            return Err(invalid("duplicate rule id".to_string()));
        }
        if rule.from.is_empty() {
            return Err(invalid("no source states".to_string()));
        }
        if let Destination::Variant(_) = rule.to {
            if let Some(state) = rule.from.iter().find(|s| s.variant().is_none()) {
                return Err(invalid(format!(
                    "destination {} is unresolvable from {state}",
                    rule.to
                )));
            }
        }
        let missing = render::missing_placeholders(rule.response, rule.supplies);
        if !missing.is_empty() {
            return Err(invalid(format!(
                "response placeholders not supplied: {}",
                missing.join(", ")
            )));
        }
    }
    Ok(())
}
