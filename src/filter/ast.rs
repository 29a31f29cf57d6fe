//! Flattened filter AST and candidate evaluation.
//!
//! The AST keeps only the predicates that actually constrain something, so
//! a single candidate can be checked cheaply (hover highlighting) without
//! walking the full expression shape.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::filter::expression::{FilterOperator, InboxFilterExpression, ProblemToken, TimeToken, TriState};
use crate::traits::{Candidate, GeocodeStatus};

/// Multi-select group a token set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenSetField {
    Time,
    Problems,
}

/// Binary predicate behind a tri-state switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriStateField {
    HasTerm,
    InRoute,
}

/// A selected token of any group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterToken {
    Time(TimeToken),
    Problem(ProblemToken),
}

impl FilterToken {
    pub fn matches<C: Candidate>(self, candidate: &C) -> bool {
        match self {
            FilterToken::Time(token) => token.matches(candidate.days_until_due()),
            FilterToken::Problem(ProblemToken::MissingPhone) => {
                candidate.phone().is_none_or(|phone| phone.trim().is_empty())
            }
            FilterToken::Problem(ProblemToken::GeocodeFailed) => {
                candidate.geocode_status() != GeocodeStatus::Success || candidate.location().is_none()
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterToken::Time(token) => token.label(),
            FilterToken::Problem(token) => token.label(),
        }
    }
}

/// One active predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FilterNode {
    #[serde(rename = "TOKENSET")]
    TokenSet {
        field: TokenSetField,
        operator: FilterOperator,
        tokens: Vec<FilterToken>,
    },
    #[serde(rename = "TRISTATE")]
    TriState { field: TriStateField, value: TriState },
}

impl FilterNode {
    /// Number of badge-counted predicates in this node.
    pub fn predicate_count(&self) -> usize {
        match self {
            FilterNode::TokenSet { tokens, .. } => tokens.len(),
            FilterNode::TriState { .. } => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterAst {
    pub root_operator: FilterOperator,
    pub nodes: Vec<FilterNode>,
}

impl FilterAst {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Tokens across all token sets plus one per tri-state.
    pub fn predicate_count(&self) -> usize {
        self.nodes.iter().map(FilterNode::predicate_count).sum()
    }
}

/// Flatten an expression, dropping disabled, empty and `ANY` entries.
///
/// Nodes are always emitted in the order time, problems, hasTerm, inRoute.
pub fn to_filter_ast(expression: &InboxFilterExpression) -> FilterAst {
    let mut nodes = Vec::new();

    if expression.time.is_active() {
        nodes.push(FilterNode::TokenSet {
            field: TokenSetField::Time,
            operator: expression.time.operator,
            tokens: expression.time.selected.iter().copied().map(FilterToken::Time).collect(),
        });
    }
    if expression.problems.is_active() {
        nodes.push(FilterNode::TokenSet {
            field: TokenSetField::Problems,
            operator: expression.problems.operator,
            tokens: expression.problems.selected.iter().copied().map(FilterToken::Problem).collect(),
        });
    }
    for (field, value) in [
        (TriStateField::HasTerm, expression.has_term),
        (TriStateField::InRoute, expression.in_route),
    ] {
        if value.is_active() {
            nodes.push(FilterNode::TriState { field, value });
        }
    }

    FilterAst {
        root_operator: expression.root_operator,
        nodes,
    }
}

/// Whether `candidate` passes the filter. An AST without nodes passes
/// everything.
pub fn evaluate_candidate<C: Candidate>(
    candidate: &C,
    ast: &FilterAst,
    in_route_ids: &HashSet<C::CustomerId>,
) -> bool {
    if ast.nodes.is_empty() {
        return true;
    }

    let mut results = ast
        .nodes
        .iter()
        .map(|node| evaluate_node(candidate, node, in_route_ids));

    match ast.root_operator {
        FilterOperator::And => results.all(|passed| passed),
        FilterOperator::Or => results.any(|passed| passed),
    }
}

fn evaluate_node<C: Candidate>(
    candidate: &C,
    node: &FilterNode,
    in_route_ids: &HashSet<C::CustomerId>,
) -> bool {
    match node {
        FilterNode::TokenSet { operator, tokens, .. } => {
            if tokens.is_empty() {
                return true;
            }
            match operator {
                FilterOperator::And => tokens.iter().all(|token| token.matches(candidate)),
                FilterOperator::Or => tokens.iter().any(|token| token.matches(candidate)),
            }
        }
        FilterNode::TriState { field, value } => {
            let outcome = match field {
                TriStateField::HasTerm => candidate.status().has_term(),
                TriStateField::InRoute => in_route_ids.contains(candidate.customer_id()),
            };
            value.accepts(outcome)
        }
    }
}

/// Candidates passing `expression`, in input order.
pub fn apply_inbox_filters<'a, C: Candidate>(
    candidates: &'a [C],
    expression: &InboxFilterExpression,
    in_route_ids: &HashSet<C::CustomerId>,
) -> Vec<&'a C> {
    let ast = to_filter_ast(expression);
    let matched: Vec<&C> = candidates
        .iter()
        .filter(|candidate| evaluate_candidate(*candidate, &ast, in_route_ids))
        .collect();

    debug!(
        candidates = candidates.len(),
        matched = matched.len(),
        nodes = ast.nodes.len(),
        "applied inbox filters"
    );
    matched
}

/// Parallel variant of [`apply_inbox_filters`] for large candidate lists.
pub fn par_apply_inbox_filters<'a, C>(
    candidates: &'a [C],
    expression: &InboxFilterExpression,
    in_route_ids: &HashSet<C::CustomerId>,
) -> Vec<&'a C>
where
    C: Candidate + Sync,
    C::CustomerId: Sync,
{
    let ast = to_filter_ast(expression);
    let matched: Vec<&C> = candidates
        .par_iter()
        .filter(|candidate| evaluate_candidate(*candidate, &ast, in_route_ids))
        .collect();

    debug!(
        candidates = candidates.len(),
        matched = matched.len(),
        nodes = ast.nodes.len(),
        "applied inbox filters in parallel"
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::expression::{create_default_expression, create_empty_expression, TokenGroup};
    use crate::traits::CandidateStatus;

    #[derive(Debug, Clone)]
    struct Item {
        id: u32,
        days: Option<i64>,
        status: CandidateStatus,
        phone: Option<&'static str>,
        geocode: GeocodeStatus,
        location: Option<(f64, f64)>,
    }

    impl Item {
        fn new(id: u32, days: i64, status: CandidateStatus) -> Self {
            Self {
                id,
                days: Some(days),
                status,
                phone: Some("+420 777 000 000"),
                geocode: GeocodeStatus::Success,
                location: Some((50.08, 14.43)),
            }
        }
    }

    impl Candidate for Item {
        type CustomerId = u32;

        fn customer_id(&self) -> &u32 {
            &self.id
        }

        fn days_until_due(&self) -> Option<i64> {
            self.days
        }

        fn status(&self) -> CandidateStatus {
            self.status
        }

        fn phone(&self) -> Option<&str> {
            self.phone
        }

        fn geocode_status(&self) -> GeocodeStatus {
            self.geocode
        }

        fn location(&self) -> Option<(f64, f64)> {
            self.location
        }
    }

    fn overdue_with_term() -> InboxFilterExpression {
        InboxFilterExpression {
            time: TokenGroup::with(FilterOperator::Or, vec![TimeToken::Overdue]),
            has_term: TriState::Yes,
            ..create_empty_expression()
        }
    }

    #[test]
    fn test_ast_drops_inactive_entries() {
        let mut expression = create_empty_expression();
        expression.problems.enabled = true;
        expression.time.selected = vec![TimeToken::Overdue];
        assert!(to_filter_ast(&expression).is_empty());
    }

    #[test]
    fn test_ast_node_order_is_stable() {
        let mut expression = overdue_with_term();
        expression.in_route = TriState::No;
        expression.problems = TokenGroup::with(FilterOperator::And, vec![ProblemToken::MissingPhone]);

        let ast = to_filter_ast(&expression);
        assert_eq!(
            ast.nodes,
            vec![
                FilterNode::TokenSet {
                    field: TokenSetField::Time,
                    operator: FilterOperator::Or,
                    tokens: vec![FilterToken::Time(TimeToken::Overdue)],
                },
                FilterNode::TokenSet {
                    field: TokenSetField::Problems,
                    operator: FilterOperator::And,
                    tokens: vec![FilterToken::Problem(ProblemToken::MissingPhone)],
                },
                FilterNode::TriState {
                    field: TriStateField::HasTerm,
                    value: TriState::Yes,
                },
                FilterNode::TriState {
                    field: TriStateField::InRoute,
                    value: TriState::No,
                },
            ]
        );
    }

    #[test]
    fn test_ast_serialized_shape() {
        let json = serde_json::to_value(to_filter_ast(&overdue_with_term())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "rootOperator": "AND",
                "nodes": [
                    {"type": "TOKENSET", "field": "time", "operator": "OR", "tokens": ["OVERDUE"]},
                    {"type": "TRISTATE", "field": "hasTerm", "value": "YES"}
                ]
            })
        );
    }

    #[test]
    fn test_overdue_and_term_fixture() {
        let ast = to_filter_ast(&overdue_with_term());
        let ids = HashSet::new();

        assert!(evaluate_candidate(&Item::new(1, -1, CandidateStatus::Scheduled), &ast, &ids));
        assert!(!evaluate_candidate(&Item::new(2, -1, CandidateStatus::Upcoming), &ast, &ids));
        assert!(!evaluate_candidate(&Item::new(3, 5, CandidateStatus::Scheduled), &ast, &ids));
    }

    #[test]
    fn test_or_root_needs_one_node() {
        let mut expression = overdue_with_term();
        expression.root_operator = FilterOperator::Or;
        let ast = to_filter_ast(&expression);
        let ids = HashSet::new();

        assert!(evaluate_candidate(&Item::new(1, -1, CandidateStatus::Upcoming), &ast, &ids));
        assert!(evaluate_candidate(&Item::new(2, 5, CandidateStatus::Confirmed), &ast, &ids));
        assert!(!evaluate_candidate(&Item::new(3, 5, CandidateStatus::Upcoming), &ast, &ids));
    }

    #[test]
    fn test_empty_ast_passes_everything() {
        let ids = HashSet::new();
        for root_operator in [FilterOperator::And, FilterOperator::Or] {
            let ast = FilterAst { root_operator, nodes: Vec::new() };
            assert!(evaluate_candidate(&Item::new(1, 90, CandidateStatus::Completed), &ast, &ids));
        }
    }

    #[test]
    fn test_token_set_operator() {
        let ids = HashSet::new();
        let mut expression = create_empty_expression();
        expression.time = TokenGroup::with(FilterOperator::And, vec![TimeToken::Overdue, TimeToken::DueIn30Days]);
        let and_ast = to_filter_ast(&expression);
        expression.time.operator = FilterOperator::Or;
        let or_ast = to_filter_ast(&expression);

        let soon = Item::new(1, 20, CandidateStatus::Upcoming);
        assert!(!evaluate_candidate(&soon, &and_ast, &ids));
        assert!(evaluate_candidate(&soon, &or_ast, &ids));

        let late = Item::new(2, -4, CandidateStatus::Upcoming);
        assert!(evaluate_candidate(&late, &and_ast, &ids));
    }

    #[test]
    fn test_in_route_uses_supplied_ids() {
        let mut expression = create_empty_expression();
        expression.in_route = TriState::No;
        let ast = to_filter_ast(&expression);
        let ids: HashSet<u32> = [7].into_iter().collect();

        assert!(!evaluate_candidate(&Item::new(7, 0, CandidateStatus::Upcoming), &ast, &ids));
        assert!(evaluate_candidate(&Item::new(8, 0, CandidateStatus::Upcoming), &ast, &ids));
    }

    #[test]
    fn test_problem_predicates() {
        let mut blank_phone = Item::new(1, 0, CandidateStatus::Upcoming);
        blank_phone.phone = Some("  ");
        assert!(FilterToken::Problem(ProblemToken::MissingPhone).matches(&blank_phone));

        let mut no_phone = Item::new(2, 0, CandidateStatus::Upcoming);
        no_phone.phone = None;
        assert!(FilterToken::Problem(ProblemToken::MissingPhone).matches(&no_phone));
        assert!(!FilterToken::Problem(ProblemToken::MissingPhone).matches(&Item::new(3, 0, CandidateStatus::Upcoming)));

        let mut failed = Item::new(4, 0, CandidateStatus::Upcoming);
        failed.geocode = GeocodeStatus::Failed;
        assert!(FilterToken::Problem(ProblemToken::GeocodeFailed).matches(&failed));

        let mut unlocated = Item::new(5, 0, CandidateStatus::Upcoming);
        unlocated.location = None;
        assert!(FilterToken::Problem(ProblemToken::GeocodeFailed).matches(&unlocated));
        assert!(!FilterToken::Problem(ProblemToken::GeocodeFailed).matches(&Item::new(6, 0, CandidateStatus::Upcoming)));
    }

    #[test]
    fn test_apply_matches_per_item_evaluation() {
        let items: Vec<Item> = (0..40)
            .map(|i| {
                let status = if i % 3 == 0 { CandidateStatus::Scheduled } else { CandidateStatus::Upcoming };
                Item::new(i, i as i64 - 10, status)
            })
            .collect();
        let ids: HashSet<u32> = (0..40).filter(|i| i % 4 == 0).collect();
        let mut expression = create_default_expression();
        expression.in_route = TriState::Yes;

        let ast = to_filter_ast(&expression);
        let expected: Vec<u32> = items
            .iter()
            .filter(|item| evaluate_candidate(*item, &ast, &ids))
            .map(|item| item.id)
            .collect();

        let applied: Vec<u32> = apply_inbox_filters(&items, &expression, &ids).iter().map(|item| item.id).collect();
        let parallel: Vec<u32> = par_apply_inbox_filters(&items, &expression, &ids).iter().map(|item| item.id).collect();

        assert_eq!(applied, expected);
        assert_eq!(parallel, expected);
        assert_eq!(applied, vec![0, 4, 8, 12, 16]);
    }
}
