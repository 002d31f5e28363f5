// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Help text.

use crate::output;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_usage() {
    println!(
        "{} {} - PVS to SVRF rule deck converter",
        output::title("pvconv"),
        output::version(VERSION)
    );
    println!();
    println!(
        "{}: {} {} {}",
        output::section_header("Usage"),
        output::command("pvconv"),
        output::arg("<command>"),
        output::arg("[args]")
    );
    println!();
    println!("{}", output::section_header("Commands:"));
    println!(
        "  {} {}  Convert a deck to SVRF",
        output::command("convert"),
        output::arg("<file.pvs>")
    );
    println!("  {} {}      Tokenize a deck and print tokens", output::command("lex"), output::arg("<file.pvs>"));
    println!("  {} {}    Parse a deck and print declarations", output::command("parse"), output::arg("<file.pvs>"));
    println!("  {}                 Show this help", output::command("help"));
    println!("  {}              Show version", output::command("version"));
    println!();
    println!("{}", output::section_header("Convert options:"));
    println!("  {} {}       Output file (default: input with .svrf extension)", output::arg("-o"), output::arg("<file>"));
    println!("  {} {}     Spaces before statements inside a CHECK block (default 2)", output::arg("--indent"), output::arg("<n>"));
    println!("  {}             Use the text rewrite passes instead of the parser", output::arg("--legacy"));
    println!("  {} {}  Skip a rewrite pass (with --legacy; repeatable)", output::arg("--skip-pass"), output::arg("<id>"));
    println!();
    println!("{}", output::section_header("Parse options:"));
    println!("  {}               Print the syntax tree as JSON", output::arg("--json"));
    println!();
    println!("A bare {} argument is shorthand for {}.", output::arg("<file.pvs>"), output::command("convert"));
    println!("Set RUST_LOG (e.g. RUST_LOG=pvconv=debug) for stage logging on stderr.");
}
