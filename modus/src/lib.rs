#![deny(clippy::disallowed_methods)]
#![deny(clippy::self_named_module_files)]
#![deny(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::branches_sharing_code)]
#![warn(clippy::cloned_instead_of_copied)]
#![warn(clippy::copy_iterator)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::equatable_if_let)]
#![warn(clippy::explicit_into_iter_loop)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::from_iter_instead_of_collect)]
#![warn(clippy::get_unwrap)]
#![warn(clippy::implicit_clone)]
#![warn(clippy::inconsistent_struct_constructor)]
#![warn(clippy::index_refutable_slice)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::items_after_statements)]
#![warn(clippy::large_types_passed_by_value)]
#![warn(clippy::manual_assert)]
#![warn(clippy::manual_ok_or)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::match_wildcard_for_single_variants)]
#![warn(clippy::mixed_read_write_in_expression)]
#![warn(clippy::multiple_crate_versions)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::redundant_pub_crate)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::str_to_string)]
#![warn(clippy::string_to_string)]
#![warn(clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::unnecessary_wraps)]
#![warn(clippy::unnested_or_patterns)]
#![warn(clippy::unused_self)]

#[macro_use]
pub mod ast;
pub mod checker;
pub mod parser;
mod utils;

use checker::{Config, ModuleChecker, ModuleReport};
use parser::{ParserError, Position};
use std::io::{self, BufRead};
use std::sync::atomic::AtomicBool;
use thiserror::Error;

pub type ModusResult<T> = Result<T, Error>;

fn wrap_parser_error_message(e: &ParserError, pos: &Position) -> String {
    format!("parser error: {} (on line {}, column {})", e, pos.0, pos.1)
}

/// The errors that prevent a module from being checked at all. Errors found in the proofs are not
/// returned as `Err`, but collected in the `ModuleReport`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{}", wrap_parser_error_message(.0, .1))]
    Parser(ParserError, Position),

    #[error("checking was interrupted")]
    Interrupted,
}

/// Parses a module from `input` and checks every node in it.
///
/// `address` is used in every reported location, unless the module declares its own address.
pub fn check<T: BufRead>(input: T, address: &str, config: &Config) -> ModusResult<ModuleReport> {
    let module = parser::parse_module(input, address)?;
    ModuleChecker::new(config.clone()).check(&module)
}

/// Like `check`, but stops with `Error::Interrupted` before the next proposition once `interrupt`
/// is set.
pub fn check_with_interrupt<T: BufRead>(
    input: T,
    address: &str,
    config: &Config,
    interrupt: &AtomicBool,
) -> ModusResult<ModuleReport> {
    let module = parser::parse_module(input, address)?;
    ModuleChecker::new(config.clone())
        .interruptible(interrupt)
        .check(&module)
}
