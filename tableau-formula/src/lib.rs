//! Propositional expression trees used by the tableau prover.

/// Shortcut for tests
#[cfg(any(test, feature = "internal-testing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! atom {
    ($x:ident) => {
        $crate::expr::Expr::atom(stringify!($x))
    };
}

/// Shortcut for tests
#[cfg(any(test, feature = "internal-testing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! atoms {
    ( $( $x:ident ),* ) => { [ $( $crate::atom!( $x ) ),* ] };
    ( $( $x:ident ),* , ) => { $crate::atoms! [ $( $x ),* ] };
}

pub mod expr;
pub mod validate;


pub use expr::{Atom, Expr, Op};
pub use validate::{Arity, FormulaError};
