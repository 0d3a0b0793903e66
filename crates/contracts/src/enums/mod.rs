pub mod criterion;
pub mod priority_tier;
pub mod rule_action;
pub mod rule_kind;
pub mod tie_break;
