//! Human-readable filter summaries.

use std::fmt;

use crate::filter::ast::{to_filter_ast, FilterNode, TokenSetField, TriStateField};
use crate::filter::expression::{FilterOperator, InboxFilterExpression};

/// Separator between clauses.
pub const SUMMARY_SEPARATOR: &str = " · ";

/// Summary shown when nothing is filtered.
pub const NO_FILTER_SUMMARY: &str = "All";

impl TokenSetField {
    pub fn label(self) -> &'static str {
        match self {
            TokenSetField::Time => "Due date",
            TokenSetField::Problems => "Problems",
        }
    }
}

impl TriStateField {
    pub fn label(self) -> &'static str {
        match self {
            TriStateField::HasTerm => "Has term",
            TriStateField::InRoute => "In route",
        }
    }
}

/// One `Group = values` clause per active node.
///
/// Identical expressions always produce identical text.
pub fn build_filter_summary(expression: &InboxFilterExpression) -> String {
    let ast = to_filter_ast(expression);
    if ast.is_empty() {
        return NO_FILTER_SUMMARY.to_string();
    }

    let clauses: Vec<String> = ast.nodes.iter().map(clause).collect();
    let joined = clauses.join(SUMMARY_SEPARATOR);

    match ast.root_operator {
        FilterOperator::Or if clauses.len() > 1 => format!("Any of: {joined}"),
        _ => joined,
    }
}

fn clause(node: &FilterNode) -> String {
    match node {
        FilterNode::TokenSet { field, operator, tokens } => {
            let connective = format!(" {} ", operator.connective());
            let values: Vec<&str> = tokens.iter().map(|token| token.label()).collect();
            format!("{} = {}", field.label(), values.join(connective.as_str()))
        }
        FilterNode::TriState { field, value } => format!("{} = {}", field.label(), value.label()),
    }
}

impl fmt::Display for InboxFilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&build_filter_summary(self))
    }
}
