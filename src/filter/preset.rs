//! Quick-filter presets.
//!
//! A preset overwrites the groups it names on the current expression and
//! resets the root operator to AND. `All` clears everything.

use serde::{Deserialize, Serialize};

use crate::filter::ast::{to_filter_ast, FilterNode};
use crate::filter::expression::{
    create_empty_expression, FilterOperator, InboxFilterExpression, ProblemToken, TimeToken, TokenGroup, TriState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterPreset {
    All,
    Urgent,
    ThisWeek,
    ThisMonth,
    HasTerm,
    Problems,
}

impl FilterPreset {
    pub const PRESETS: [FilterPreset; 6] = [
        FilterPreset::All,
        FilterPreset::Urgent,
        FilterPreset::ThisWeek,
        FilterPreset::ThisMonth,
        FilterPreset::HasTerm,
        FilterPreset::Problems,
    ];
}

/// Apply `preset` on top of `current`.
pub fn apply_filter_preset(preset: FilterPreset, current: &InboxFilterExpression) -> InboxFilterExpression {
    let base = InboxFilterExpression {
        root_operator: FilterOperator::And,
        ..current.clone()
    };

    match preset {
        FilterPreset::All => create_empty_expression(),
        FilterPreset::Urgent => InboxFilterExpression {
            time: TokenGroup::with(FilterOperator::Or, vec![TimeToken::Overdue, TimeToken::DueIn7Days]),
            ..base
        },
        FilterPreset::ThisWeek => InboxFilterExpression {
            time: TokenGroup::with(FilterOperator::Or, vec![TimeToken::DueIn7Days]),
            ..base
        },
        FilterPreset::ThisMonth => InboxFilterExpression {
            time: TokenGroup::with(FilterOperator::Or, vec![TimeToken::DueIn30Days]),
            ..base
        },
        FilterPreset::HasTerm => InboxFilterExpression {
            has_term: TriState::Yes,
            ..base
        },
        FilterPreset::Problems => InboxFilterExpression {
            problems: TokenGroup::with(
                FilterOperator::Or,
                vec![ProblemToken::MissingPhone, ProblemToken::GeocodeFailed],
            ),
            ..base
        },
    }
}

/// Preset matching the expression exactly, if any.
pub fn matching_preset(expression: &InboxFilterExpression) -> Option<FilterPreset> {
    if expression.root_operator == FilterOperator::Or {
        return None;
    }

    let target = canonical_nodes(expression);
    let empty = create_empty_expression();
    FilterPreset::PRESETS
        .into_iter()
        .find(|preset| canonical_nodes(&apply_filter_preset(*preset, &empty)) == target)
}

/// True when the quick-filter chips cannot show this expression and the
/// advanced builder is needed: an OR root, or several groups and
/// tri-states active at once in a combination no preset produces.
pub fn has_advanced_criteria(expression: &InboxFilterExpression) -> bool {
    if expression.root_operator == FilterOperator::Or {
        return true;
    }
    active_group_count(expression) > 1 && matching_preset(expression).is_none()
}

/// Number of groups and tri-states that currently constrain anything.
fn active_group_count(expression: &InboxFilterExpression) -> usize {
    [
        expression.time.is_active(),
        expression.problems.is_active(),
        expression.has_term.is_active(),
        expression.in_route.is_active(),
    ]
    .into_iter()
    .filter(|active| *active)
    .count()
}

/// Active nodes with token order and single-token operators normalized.
fn canonical_nodes(expression: &InboxFilterExpression) -> Vec<FilterNode> {
    let mut nodes = to_filter_ast(expression).nodes;
    for node in &mut nodes {
        if let FilterNode::TokenSet { operator, tokens, .. } = node {
            tokens.sort();
            tokens.dedup();
            if tokens.len() == 1 {
                *operator = FilterOperator::Or;
            }
        }
    }
    nodes
}
