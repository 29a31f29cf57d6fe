//! Inbox filter engine.
//!
//! - **`expression`**: the serializable, UI-facing filter shape and its
//!   factories, normalization and badge count
//! - **`ast`**: flattened predicates and candidate evaluation
//! - **`preset`**: quick-filter presets and the advanced-criteria check
//! - **`summary`**: one-line text rendering

pub mod ast;
pub mod expression;
pub mod preset;
pub mod summary;

pub use ast::{
    apply_inbox_filters, evaluate_candidate, par_apply_inbox_filters, to_filter_ast, FilterAst, FilterNode,
    FilterToken, TokenSetField, TriStateField,
};
pub use expression::{
    create_default_expression, create_empty_expression, get_active_filter_count, normalize_expression, toggle_token,
    FilterOperator, InboxFilterExpression, PartialInboxFilterExpression, PartialTokenGroup, ProblemToken, TimeToken,
    TokenGroup, TriState,
};
pub use preset::{apply_filter_preset, has_advanced_criteria, matching_preset, FilterPreset};
pub use summary::build_filter_summary;
