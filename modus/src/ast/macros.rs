/// Implements `FromStr` and `Display` for a fieldless enum, given the string form of each
/// variant.
///
/// The error type of the `FromStr` implementation is `()`.
///
// The macro is not exported, so the example below can't run as a doctest.
/// ```text
/// enum Keyword {
///     Module,
///     Axiom,
/// }
///
/// impl_str_conversion_traits!(Keyword {
///     Module: "module",
///     Axiom: "axiom",
/// });
///
/// assert_eq!(Keyword::from_str("axiom"), Ok(Keyword::Axiom));
/// assert_eq!(Keyword::Module.to_string(), "module");
/// ```
macro_rules! impl_str_conversion_traits {
    ($enum_name:ident { $($variant:ident: $str:literal),* $(,)? }) => {
        impl std::str::FromStr for $enum_name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($str => Ok($enum_name::$variant),)*
                    _ => Err(()),
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                let s = match self {
                    $($enum_name::$variant => $str,)*
                };
                write!(f, "{}", s)
            }
        }
    };
}

/// Builds an `Element` from an S-expression-like description. Atoms are written as string
/// literals and lists as `(OP child*)`, where `OP` is any expression convertible to `Arc<str>`.
///
/// ```text
/// let x = elem!((VAR "x"));
/// let formula = elem!((IMPL (PREDVAR "A") (PREDVAR "B")));
/// ```
#[cfg(test)]
macro_rules! elem {
    ($atom:literal) => {
        $crate::ast::Element::atom($atom)
    };
    (($op:ident $($child:tt)*)) => {
        $crate::ast::Element::list(stringify!($op), vec![$(elem!($child)),*])
    };
}
