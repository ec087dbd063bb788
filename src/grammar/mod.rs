pub mod eliminate_left_recursion;
pub mod grammar;
pub mod left_factoring;
pub mod nullable_first_follow;
pub mod parse;
pub mod pretty_print;
pub use grammar::Grammar;
pub use left_factoring::FreshNames;
pub use pretty_print::SetKind;

pub const EPSILON: &str = "ε";
pub const EPSILON_WORD: &str = "epsilon";
pub const END_MARK: &str = "$";
