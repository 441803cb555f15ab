pub mod node;
pub mod stmt;
pub mod stx;
pub mod type_expr;
