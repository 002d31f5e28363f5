// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! pvconv - PVS to SVRF rule deck converter.

mod help;
mod output;

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

use pvconv_ast::LineMap;
use pvconv_driver::{default_output_path, Job, Strategy};
use pvconv_gen::GenConfig;
use pvconv_rewrite::RewriteOpts;

/// Log filter used when RUST_LOG is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "pvconv=warn";

const CONVERT_USAGE: &str =
    "Usage: pvconv convert <file.pvs> [-o <file.svrf>] [--indent <n>] [--legacy] [--skip-pass <id>]";

fn main() {
    output::init();
    init_tracing();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        help::print_usage();
        return;
    }

    match args[1].as_str() {
        "convert" => cmd_convert(parse_convert_args(&args[2..])),
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: pvconv lex <file.pvs>");
                process::exit(1);
            }
            cmd_lex(&args[2]);
        }
        "parse" => {
            let json = args[2..].iter().any(|a| a == "--json");
            match args[2..].iter().find(|a| !a.starts_with('-')) {
                Some(path) => cmd_parse(path, json),
                None => {
                    eprintln!("Usage: pvconv parse <file.pvs> [--json]");
                    process::exit(1);
                }
            }
        }
        "help" | "--help" | "-h" => help::print_usage(),
        "version" | "--version" | "-V" => println!("pvconv {}", help::VERSION),
        other => {
            // Treat as filename
            if other.ends_with(".pvs") {
                cmd_convert(parse_convert_args(&args[1..]));
            } else {
                eprintln!("{}: unknown command '{}'", output::error_label(), other);
                help::print_usage();
                process::exit(1);
            }
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

struct ConvertArgs {
    input: PathBuf,
    output: Option<PathBuf>,
    legacy: bool,
    skip_passes: Vec<String>,
    indent: Option<usize>,
}

fn parse_convert_args(args: &[String]) -> ConvertArgs {
    match try_parse_convert_args(args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("{}: {}", output::error_label(), msg);
            eprintln!("{}", CONVERT_USAGE);
            process::exit(1);
        }
    }
}

fn try_parse_convert_args(args: &[String]) -> Result<ConvertArgs, String> {
    let mut input = None;
    let mut output = None;
    let mut legacy = false;
    let mut skip_passes = Vec::new();
    let mut indent = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-o" | "--output" => {
                let path = iter.next().ok_or("-o needs a file name")?;
                output = Some(PathBuf::from(path));
            }
            "--legacy" => legacy = true,
            "--indent" => {
                let value = iter.next().ok_or("--indent needs a number")?;
                let width = value
                    .parse::<usize>()
                    .map_err(|_| format!("--indent expects a number, got '{}'", value))?;
                indent = Some(width);
            }
            "--skip-pass" => {
                let id = iter.next().ok_or("--skip-pass needs a pass id")?;
                if !pvconv_rewrite::passes().iter().any(|p| p.id == id.as_str()) {
                    let known: Vec<&str> = pvconv_rewrite::passes().iter().map(|p| p.id).collect();
                    return Err(format!("unknown pass '{}' (passes: {})", id, known.join(", ")));
                }
                skip_passes.push(id.clone());
            }
            flag if flag.starts_with('-') => return Err(format!("unknown option '{}'", flag)),
            path => {
                if input.is_some() {
                    return Err(format!("unexpected argument '{}'", path));
                }
                input = Some(PathBuf::from(path));
            }
        }
    }

    let input = input.ok_or("missing input file")?;
    Ok(ConvertArgs { input, output, legacy, skip_passes, indent })
}

fn cmd_convert(args: ConvertArgs) {
    let output = args.output.unwrap_or_else(|| default_output_path(&args.input));
    let strategy = if args.legacy { Strategy::Pattern } else { Strategy::Ast };
    let opts = RewriteOpts { passes: Vec::new(), excludes: args.skip_passes };
    tracing::debug!(?strategy, skipped = ?opts.excludes, "starting conversion");

    let mut gen_config = GenConfig::default();
    if let Some(width) = args.indent {
        gen_config.indent_width = width;
    }

    let mut job = Job::new(args.input, output, strategy)
        .with_gen_config(gen_config)
        .with_rewrite_opts(opts);
    let ok = {
        let mut status = io::stdout().lock();
        job.execute(&mut status)
    };
    if !ok {
        process::exit(1);
    }
}

fn read_source(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}: reading {}: {}", output::error_label(), output::file_path(path), e);
            process::exit(1);
        }
    }
}

fn cmd_lex(path: &str) {
    let source = read_source(path);
    let result = pvconv_lexer::Lexer::new(&source).tokenize();

    let line_map = LineMap::new(&source);
    for error in &result.errors {
        show_error(&source, &line_map, path, error.span.start, &error.message, error.hint.as_deref());
    }

    if !result.is_ok() {
        eprintln!("\n{}", output::banner_fail("Lex", result.errors.len()));
        process::exit(1);
    }

    println!("=== Tokens ({}) ===\n", result.tokens.len());
    for tok in &result.tokens {
        println!("{:4}  {:<14} {}", tok.line, format!("{:?}", tok.kind), tok.lexeme);
    }
    println!("\n{}", output::banner_ok("Lex"));
}

fn cmd_parse(path: &str, json: bool) {
    let source = read_source(path);
    let line_map = LineMap::new(&source);

    let lex_result = pvconv_lexer::Lexer::new(&source).tokenize();
    if !lex_result.is_ok() {
        for error in &lex_result.errors {
            show_error(&source, &line_map, path, error.span.start, &error.message, error.hint.as_deref());
        }
        eprintln!("\n{}", output::banner_fail("Lex", lex_result.errors.len()));
        process::exit(1);
    }

    let result = pvconv_parser::Parser::new(lex_result.tokens).parse();
    if !result.is_ok() {
        for error in &result.errors {
            show_error(&source, &line_map, path, error.span.start, &error.message, error.hint.as_deref());
        }
        eprintln!("\n{}", output::banner_fail("Parse", result.errors.len()));
        process::exit(1);
    }

    if json {
        match serde_json::to_string_pretty(&result.root) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("{}: serializing syntax tree: {}", output::error_label(), e);
                process::exit(1);
            }
        }
        return;
    }

    println!("=== Declarations ({}) ===\n", result.root.children.len());
    for node in &result.root.children {
        println!("{:4}  {}", node.line(), node.kind_name());
        println!("{:#?}", node);
    }
    println!("\n{}", output::banner_ok("Parse"));
}

fn show_error(source: &str, line_map: &LineMap, path: &str, pos: usize, message: &str, hint: Option<&str>) {
    let (line, col) = line_map.offset_to_line_col(pos);
    let text = line_map.line_text(source, line).unwrap_or("").trim_end_matches('\r');

    eprintln!();
    eprintln!("{}: {}", output::error_label(), message);
    eprintln!("  {} {}:{}:{}", output::error_arrow(), path, line, col);
    eprintln!("    {}", output::pipe());
    eprintln!("{} {} {}", output::line_number(line), output::pipe(), text);
    eprintln!(
        "    {} {}{}",
        output::pipe(),
        " ".repeat(col.saturating_sub(1) as usize),
        output::caret()
    );
    if let Some(hint) = hint {
        eprintln!("    = {}: {}", output::hint_label(), hint);
    }
}
