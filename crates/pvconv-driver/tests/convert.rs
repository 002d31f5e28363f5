// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! End-to-end conversion jobs against files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use pvconv_driver::{ConvertError, Job, Strategy, MAX_INCLUDE_DEPTH};
use pvconv_gen::GenConfig;

const HEADER: &str = "// SVRF file generated from PVS\n\n";

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn execute(job: &mut Job) -> (bool, String) {
    let mut status = Vec::new();
    let ok = job.execute(&mut status);
    (ok, String::from_utf8(status).unwrap())
}

#[test]
fn single_layer_deck() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "top.pvs", "LAYER M1 ;\n");
    let output = dir.path().join("top.svrf");

    let (ok, status) = execute(&mut Job::new(&input, &output, Strategy::Ast));

    assert!(ok, "{}", status);
    assert_eq!(fs::read_to_string(&output).unwrap(), format!("{}LAYER M1 ;\n", HEADER));
    let lines: Vec<&str> = status.lines().collect();
    assert_eq!(
        lines,
        vec![
            format!(
                "Converting {} to {} (parser-based approach)",
                input.display(),
                output.display()
            )
            .as_str(),
            "Conversion complete.",
        ]
    );
}

#[test]
fn full_deck_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "deck.pvs",
        "LAYER M1 ;\nlayer ( M2 ; )\nOPERATION AND R1 M1 M2 ;\n\
         geom_and ( OPERATION R2 M1 \"M2;\" )\nRULE SP1 { LAYOUT M1; SPACING > 0.5; }\n",
    );
    let output = dir.path().join("deck.svrf");

    let report = Job::new(&input, &output, Strategy::Ast).run().unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(
        text,
        format!(
            "{}LAYER M1 ;\nLAYER M2 ;\nR1 = AND ( M1 M2 ) ;\nR2 = AND ( M1 M2 ) ;\n\
             CHECK SP1\n  INTERNAL1 = M1 ;\n  SPACE ( INTERNAL1 ) > 0.5 ;\nEND_CHECK\n\n",
            HEADER
        )
    );
    assert_eq!(report.declarations, 5);
    assert!(report.unhandled.is_empty());
    assert_eq!(report.output_bytes, text.len());
}

#[test]
fn unhandled_constructs_are_warnings() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "deck.pvs", "LAYER M1 ;\nVERILOG \"top.v\" ;\nRULE R { WIDTH < 1 ; }\n");
    let output = dir.path().join("deck.svrf");

    let (ok, status) = execute(&mut Job::new(&input, &output, Strategy::Ast));

    assert!(ok, "{}", status);
    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("// Unhandled node type: VERILOG\n"), "{}", text);
    assert!(text.contains("  // Unhandled statement type: WIDTH\n"), "{}", text);
    assert_eq!(status.matches("Warning: ").count(), 2, "{}", status);
    assert!(status.ends_with("Conversion complete.\n"));
}

#[test]
fn output_open_failure_is_its_own_stage() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "top.pvs", "LAYER M1 ;\n");
    let output = dir.path().join("no_such_dir").join("top.svrf");

    let mut job = Job::new(&input, &output, Strategy::Ast);
    let err = job.run().unwrap_err();
    assert!(matches!(err, ConvertError::OutputOpen { .. }), "{:?}", err);

    let (ok, status) = execute(&mut job);
    assert!(!ok);
    assert!(status.contains("Error: Cannot create SVRF file"), "{}", status);
    assert!(!status.contains("Conversion complete."));
}

#[test]
fn tokenize_failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "bad.pvs", "LAYER M1 ;\nLAYER \"M2 ;\n");
    let output = dir.path().join("bad.svrf");

    let (ok, status) = execute(&mut Job::new(&input, &output, Strategy::Ast));

    assert!(!ok);
    assert!(status.contains("Error: Failed to tokenize PVS file"), "{}", status);
    assert!(status.contains("  line 2: Unterminated string"), "{}", status);
    assert!(!output.exists());
}

#[test]
fn parse_failure_lists_errors() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "bad.pvs", "LAYER M1 ;\nLAYER M2\nLAYER M3 ;\n");
    let output = dir.path().join("bad.svrf");

    let mut job = Job::new(&input, &output, Strategy::Ast);
    match job.run() {
        Err(ConvertError::Parse { errors, .. }) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].line, 3);
        }
        other => panic!("expected parse failure, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn includes_are_numbered_globally() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    write(dir.path(), "sub/metal.pvs", "LAYER M2 ;\nLAYER M3 ;\n");
    write(dir.path(), "sub/bad.pvs", "LAYER M4 ;\nLAYER M5\n");
    let input = write(
        dir.path(),
        "top.pvs",
        "LAYER M1 ;\nINCLUDE \"sub/metal.pvs\" ;\nINCLUDE \"sub/bad.pvs\" ;\n",
    );
    let output = dir.path().join("top.svrf");

    let mut job = Job::new(&input, &output, Strategy::Ast);
    match job.run() {
        // top.pvs is lines 1-3, metal.pvs 4-5, bad.pvs 6-7; the missing `;`
        // is reported at the next token, the end of input on line 7.
        Err(ConvertError::Parse { errors, .. }) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].line, 7, "{}", errors[0]);
        }
        other => panic!("expected parse failure, got {:?}", other),
    }
    assert_eq!(job.last_global_line(), 7);
}

#[test]
fn included_declarations_are_spliced_in_place() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "metal.pvs", "LAYER M2 ;\n");
    let input = write(dir.path(), "top.pvs", "LAYER M1 ;\nINCLUDE \"metal.pvs\"\nLAYER M3 ;\n");
    let output = dir.path().join("top.svrf");

    let report = Job::new(&input, &output, Strategy::Ast).run().unwrap();

    assert_eq!(report.declarations, 3);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        format!("{}LAYER M1 ;\nLAYER M2 ;\nLAYER M3 ;\n", HEADER)
    );
}

#[test]
fn line_counter_resets_per_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "top.pvs", "LAYER M1 ;\nLAYER M2 ;\n");
    let output = dir.path().join("top.svrf");

    let mut job = Job::new(&input, &output, Strategy::Ast);
    job.run().unwrap();
    assert_eq!(job.last_global_line(), 2);
    job.run().unwrap();
    assert_eq!(job.last_global_line(), 2);
}

#[test]
fn self_include_hits_depth_limit() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "loop.pvs", "INCLUDE \"loop.pvs\" ;\n");
    let output = dir.path().join("loop.svrf");

    match Job::new(&input, &output, Strategy::Ast).run() {
        Err(ConvertError::IncludeDepth { limit, .. }) => assert_eq!(limit, MAX_INCLUDE_DEPTH),
        other => panic!("expected include depth failure, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn missing_include_is_a_read_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "top.pvs", "INCLUDE \"gone.pvs\" ;\n");
    let output = dir.path().join("top.svrf");

    match Job::new(&input, &output, Strategy::Ast).run() {
        Err(ConvertError::ReadInput { path, .. }) => assert!(path.ends_with("gone.pvs")),
        other => panic!("expected read failure, got {:?}", other),
    }
}

#[test]
fn pattern_strategy() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "legacy.pvs",
        "VERILOG top.v\nlayer ( M1 ; )\nRULE SP1 { LAYOUT M1; SPACING > 0.5; }\n",
    );
    let output = dir.path().join("legacy.svrf");

    let (ok, status) = execute(&mut Job::new(&input, &output, Strategy::Pattern));

    assert!(ok, "{}", status);
    assert!(status.starts_with(&format!(
        "Converting {} to {} (pattern-based approach)\n",
        input.display(),
        output.display()
    )));
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        format!(
            "{}// VERILOG top.v\nLAYER M1 ;\nCHECK SP1\nINTERNAL1 = M1 ; SPACE ( INTERNAL1 ) > 0.5 ;\nEND_CHECK\n",
            HEADER
        )
    );
}

#[test]
fn pattern_strategy_honours_header_setting() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "legacy.pvs", "LAYER M1 ;\n");
    let output = dir.path().join("legacy.svrf");

    let report = Job::new(&input, &output, Strategy::Pattern).run().unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), format!("{}LAYER M1 ;\n", HEADER));
    assert_eq!(report.output_bytes, HEADER.len() + "LAYER M1 ;\n".len());

    let config = GenConfig { emit_header: false, ..GenConfig::default() };
    Job::new(&input, &output, Strategy::Pattern).with_gen_config(config).run().unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), "LAYER M1 ;\n");
}

#[test]
fn directive_with_punctuation_is_left_as_comment() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "top.pvs", "VERILOG top.v\nLAYER M1 ;\n");
    let output = dir.path().join("top.svrf");

    let (ok, status) = execute(&mut Job::new(&input, &output, Strategy::Ast));

    assert!(ok, "{}", status);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        format!("{}// Unhandled node type: VERILOG\nLAYER M1 ;\n", HEADER)
    );
    assert!(status.contains("Warning: line 1: unhandled declaration 'VERILOG'"), "{}", status);
}

#[test]
fn gen_config_controls_indent() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "rules.pvs", "RULE R { SPACING < 2 ; }\n");
    let output = dir.path().join("rules.svrf");

    let config = GenConfig { indent_width: 0, emit_header: false };
    Job::new(&input, &output, Strategy::Ast).with_gen_config(config).run().unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "CHECK R\nSPACE ( INTERNAL1 ) < 2 ;\nEND_CHECK\n\n"
    );
}
