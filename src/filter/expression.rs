//! Declarative inbox filter expressions.
//!
//! An expression is the UI-facing shape of the inbox filter: multi-select
//! token groups and tri-state switches, combined by a root operator. It
//! round-trips through serde so callers can persist it opaquely (URL
//! parameter, user preference).
//!
//! Disabled or empty groups and `ANY` tri-states never constrain anything.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How predicates are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterOperator {
    And,
    Or,
}

impl FilterOperator {
    /// Lower-case connective used in summaries.
    pub fn connective(self) -> &'static str {
        match self {
            FilterOperator::And => "and",
            FilterOperator::Or => "or",
        }
    }
}

/// Three-valued switch for binary predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TriState {
    Yes,
    No,
    #[default]
    Any,
}

impl TriState {
    /// Whether this value constrains anything.
    pub fn is_active(self) -> bool {
        self != TriState::Any
    }

    /// Compare a predicate outcome against the stored value.
    pub fn accepts(self, outcome: bool) -> bool {
        match self {
            TriState::Yes => outcome,
            TriState::No => !outcome,
            TriState::Any => true,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TriState::Yes => "Yes",
            TriState::No => "No",
            TriState::Any => "Any",
        }
    }
}

/// Due-date tokens. These overlap: `DueIn7Days` includes overdue items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeToken {
    #[serde(rename = "OVERDUE")]
    Overdue,
    #[serde(rename = "DUE_IN_7_DAYS")]
    DueIn7Days,
    #[serde(rename = "DUE_IN_30_DAYS")]
    DueIn30Days,
}

impl TimeToken {
    /// Candidates without a due date match no time token.
    pub fn matches(self, days_until_due: Option<i64>) -> bool {
        let Some(days) = days_until_due else {
            return false;
        };
        match self {
            TimeToken::Overdue => days < 0,
            TimeToken::DueIn7Days => days <= 7,
            TimeToken::DueIn30Days => days <= 30,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeToken::Overdue => "Overdue",
            TimeToken::DueIn7Days => "Due in 7 days",
            TimeToken::DueIn30Days => "Due in 30 days",
        }
    }
}

/// Data-quality problem tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProblemToken {
    MissingPhone,
    GeocodeFailed,
}

impl ProblemToken {
    pub fn label(self) -> &'static str {
        match self {
            ProblemToken::MissingPhone => "Missing phone",
            ProblemToken::GeocodeFailed => "Geocode failed",
        }
    }
}

/// A multi-select predicate group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGroup<T> {
    pub enabled: bool,
    pub operator: FilterOperator,
    pub selected: Vec<T>,
}

impl<T> TokenGroup<T> {
    /// Disabled group with no selection.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            operator: FilterOperator::Or,
            selected: Vec::new(),
        }
    }

    /// Enabled group selecting `tokens`.
    pub fn with(operator: FilterOperator, tokens: Vec<T>) -> Self {
        Self {
            enabled: true,
            operator,
            selected: tokens,
        }
    }

    /// Whether the group contributes a predicate.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.selected.is_empty()
    }

    /// Number of selected tokens that count towards the filter badge.
    pub fn active_count(&self) -> usize {
        if self.enabled { self.selected.len() } else { 0 }
    }
}

/// The full, normalized inbox filter expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxFilterExpression {
    pub root_operator: FilterOperator,
    pub time: TokenGroup<TimeToken>,
    pub problems: TokenGroup<ProblemToken>,
    pub has_term: TriState,
    pub in_route: TriState,
}

impl InboxFilterExpression {
    /// Parse a possibly partial expression and fill in the defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let partial: PartialInboxFilterExpression = serde_json::from_str(json)?;
        Ok(normalize_expression(partial))
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for InboxFilterExpression {
    fn default() -> Self {
        create_default_expression()
    }
}

/// A token group where any field may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialTokenGroup<T> {
    pub enabled: Option<bool>,
    pub operator: Option<FilterOperator>,
    pub selected: Option<Vec<T>>,
}

/// An expression as it may arrive from storage or an external caller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialInboxFilterExpression {
    pub root_operator: Option<FilterOperator>,
    pub time: Option<PartialTokenGroup<TimeToken>>,
    pub problems: Option<PartialTokenGroup<ProblemToken>>,
    pub has_term: Option<TriState>,
    pub in_route: Option<TriState>,
}

impl<T> From<TokenGroup<T>> for PartialTokenGroup<T> {
    fn from(group: TokenGroup<T>) -> Self {
        Self {
            enabled: Some(group.enabled),
            operator: Some(group.operator),
            selected: Some(group.selected),
        }
    }
}

impl From<InboxFilterExpression> for PartialInboxFilterExpression {
    fn from(expression: InboxFilterExpression) -> Self {
        Self {
            root_operator: Some(expression.root_operator),
            time: Some(expression.time.into()),
            problems: Some(expression.problems.into()),
            has_term: Some(expression.has_term),
            in_route: Some(expression.in_route),
        }
    }
}

/// Expression that filters nothing.
pub fn create_empty_expression() -> InboxFilterExpression {
    InboxFilterExpression {
        root_operator: FilterOperator::And,
        time: TokenGroup::disabled(),
        problems: TokenGroup::disabled(),
        has_term: TriState::Any,
        in_route: TriState::Any,
    }
}

/// Expression shown on first open of the inbox: due within a week.
pub fn create_default_expression() -> InboxFilterExpression {
    InboxFilterExpression {
        time: TokenGroup::with(FilterOperator::Or, vec![TimeToken::DueIn7Days]),
        ..create_empty_expression()
    }
}

/// Complete a partial expression from the defaults.
///
/// Duplicate tokens are dropped, keeping the first occurrence.
pub fn normalize_expression(partial: PartialInboxFilterExpression) -> InboxFilterExpression {
    let defaults = create_default_expression();

    InboxFilterExpression {
        root_operator: partial.root_operator.unwrap_or(defaults.root_operator),
        time: merge_group(partial.time, defaults.time),
        problems: merge_group(partial.problems, defaults.problems),
        has_term: partial.has_term.unwrap_or(defaults.has_term),
        in_route: partial.in_route.unwrap_or(defaults.in_route),
    }
}

fn merge_group<T: PartialEq>(
    partial: Option<PartialTokenGroup<T>>,
    fallback: TokenGroup<T>,
) -> TokenGroup<T> {
    let Some(partial) = partial else {
        return fallback;
    };

    let selected = partial.selected.unwrap_or(fallback.selected);
    let mut unique = Vec::with_capacity(selected.len());
    for token in selected {
        if !unique.contains(&token) {
            unique.push(token);
        }
    }

    TokenGroup {
        enabled: partial.enabled.unwrap_or(fallback.enabled),
        operator: partial.operator.unwrap_or(fallback.operator),
        selected: unique,
    }
}

/// Number of active predicates, for the filter badge.
///
/// Counted per selected token, not per AST node: an enabled group with two
/// tokens adds two. Matches [`FilterAst::predicate_count`].
///
/// [`FilterAst::predicate_count`]: crate::filter::ast::FilterAst::predicate_count
pub fn get_active_filter_count(expression: &InboxFilterExpression) -> usize {
    expression.time.active_count()
        + expression.problems.active_count()
        + usize::from(expression.has_term.is_active())
        + usize::from(expression.in_route.is_active())
}

/// Remove `value` if present, append it otherwise. Order of the remaining
/// elements is preserved.
pub fn toggle_token<T: PartialEq + Clone>(list: &[T], value: T) -> Vec<T> {
    if list.contains(&value) {
        list.iter().filter(|token| **token != value).cloned().collect()
    } else {
        let mut toggled = list.to_vec();
        toggled.push(value);
        toggled
    }
}
