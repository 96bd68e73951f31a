use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use env_directive::environments::Environment;
use env_directive::{
    load_options, Diagnostic, EnvironmentRegistry, LineIndex, Processor, ProcessorOptions,
    RulePolicies, Writability,
};
use expect_test::expect;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const FILE: &str = "test.js";

/// Processor configured from `tests/fixtures/options.toml`.
fn fixture_processor() -> Processor {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/options.toml");
    Processor::new(load_options(&path).unwrap())
}

fn preprocess(processor: &Processor, source: &str) -> String {
    let mut files = processor.preprocess(source, FILE);
    assert_eq!(files.len(), 1);
    files.remove(0).text
}

/// Report the last occurrence of `needle` in processed text, the way an
/// analysis engine would.
fn report(processed: &str, rule: &str, message: &str, needle: &str) -> Diagnostic {
    let start = processed.rfind(needle).expect("needle in processed text");
    span(processed, rule, message, start..start + needle.len())
}

fn span(processed: &str, rule: &str, message: &str, range: std::ops::Range<usize>) -> Diagnostic {
    let index = LineIndex::new(processed.to_string());
    let from = index.offset_to_location(range.start);
    let to = index.offset_to_location(range.end);
    Diagnostic::new(Some(rule), message, from.line, from.column + 1)
        .with_end(to.line, to.column + 1)
}

/// Format diagnostics into a deterministic, human-readable string.
///
/// Each diagnostic becomes one line:
///   <line>:<col>-<end_line>:<end_col> [<rule>]: <message>[ fix <start>..<end> <text>]
fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return "OK (no diagnostics)".to_string();
    }

    diagnostics
        .iter()
        .map(|d| {
            let fix = match &d.fix {
                Some(fix) => format!(" fix {}..{} {:?}", fix.range.start, fix.range.end, fix.text),
                None => String::new(),
            };
            format!(
                "{}:{}-{}:{} [{}]: {}{}",
                d.line,
                d.column,
                d.end_line.unwrap_or(0),
                d.end_column.unwrap_or(0),
                d.rule_id.as_deref().unwrap_or("-"),
                d.message,
                fix,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn apply_fixes(source: &str, diagnostics: &[Diagnostic]) -> String {
    let mut fixes: Vec<_> = diagnostics.iter().filter_map(|d| d.fix.as_ref()).collect();
    fixes.sort_by_key(|fix| std::cmp::Reverse(fix.range.start));

    let mut output = source.to_string();
    for fix in fixes {
        output.replace_range(fix.range.clone(), &fix.text);
    }
    output
}

// ---------------------------------------------------------------------------
// Tests — comment rewriting
// ---------------------------------------------------------------------------

#[test]
fn inserts_global_comment() {
    let processor = Processor::default();
    let processed = preprocess(&processor, "/* eslint-env jquery */ $");
    expect!["/* global $:readonly jQuery:readonly */ $"].assert_eq(&processed);
}

#[test]
fn renders_plugin_bindings() {
    let processor = fixture_processor();
    let processed = preprocess(&processor, "/* eslint-env test/test */");
    expect!["/* global FALSE:readonly NULL TRUE:writable WRITABLE:writable */"]
        .assert_eq(&processed);
}

#[test]
fn handles_plugins_with_or_without_environments() {
    let processor = fixture_processor();
    let processed = preprocess(&processor, "/* eslint-env cypress/globals, foobar/x */ cy");
    expect!["/* global Cypress:readonly cy:readonly expect:readonly */ cy"].assert_eq(&processed);
}

#[test]
fn replaces_empty_comment_without_surrounding_spaces() {
    let processor = Processor::default();
    assert_eq!(preprocess(&processor, "/*eslint-env*/"), "/*global*/");
}

#[test]
fn replaces_empty_comment_with_multiple_terminating_spaces() {
    let processor = Processor::default();
    assert_eq!(preprocess(&processor, "/*eslint-env\t\t*/"), "/*global */");
}

#[test]
fn preserves_line_break_style() {
    let processor = Processor::default();
    assert_eq!(preprocess(&processor, "/*eslint-env\r\n*/"), "/*\r\nglobal\r\n*/");
}

#[test]
fn disabled_environments_contribute_no_globals() {
    let processor = Processor::default();
    let processed = preprocess(&processor, "/* eslint-env jquery, amd:false -- legacy */ $(x)");
    expect!["/* global $:readonly jQuery:readonly -- legacy */ $(x)"].assert_eq(&processed);
}

#[test]
fn unknown_environment_yields_bare_keyword() {
    let processor = Processor::default();
    let processed = preprocess(&processor, "/* eslint-env unknown */\n1;");
    expect![[r#"
        /* global */
        1;"#]]
    .assert_eq(&processed);
}

#[test]
fn document_without_directives_round_trips() {
    let processor = Processor::default();
    let source = "const a = 1;\nconsole.log(a)";
    let processed = preprocess(&processor, source);
    assert_eq!(processed, source);

    let diag = report(&processed, "no-console", "Unexpected console statement.", "console");
    let result = processor.postprocess(vec![vec![diag.clone()]], FILE);
    assert_eq!(result, vec![diag]);
}

// ---------------------------------------------------------------------------
// Tests — problem filtering
// ---------------------------------------------------------------------------

#[test]
fn does_not_report_problems_in_a_replaced_comment() {
    let processor = Processor::default();
    let processed = preprocess(&processor, "/* eslint-env node */");
    let diag = report(
        &processed,
        "no-unused-vars",
        "'process' is defined but never used.",
        "process",
    );

    let result = processor.postprocess(vec![vec![diag]], FILE);
    expect!["OK (no diagnostics)"].assert_eq(&format_diagnostics(&result));
}

#[test]
fn does_not_report_problems_from_disabled_rules_that_overlap_with_replaced_comments() {
    let processor = fixture_processor();
    let source = "function test()\n{\n    /*\n    eslint-env\n    node\n    */\n}\nfoo /* eslint-env node */ ()";
    let processed = preprocess(&processor, source);

    let function_end = processed.find("}\n").unwrap() + 1;
    let last_line = processed.rfind('\n').unwrap() + 1;
    let diagnostics = vec![
        span(
            &processed,
            "max-lines-per-function",
            "Function 'test' has too many lines.",
            0..function_end,
        ),
        span(
            &processed,
            "max-len",
            "This line has a length of 130. Maximum allowed is 80.",
            last_line..processed.len(),
        ),
    ];

    let result = processor.postprocess(vec![diagnostics], FILE);
    expect!["OK (no diagnostics)"].assert_eq(&format_diagnostics(&result));
}

#[test]
fn reports_problems_from_disabled_rules_that_do_not_overlap_with_replaced_comments() {
    let processor = fixture_processor();
    let source = format!("foo /* eslint-env node */ ()\n{}", "/".repeat(100));
    let processed = preprocess(&processor, &source);
    let diag = report(
        &processed,
        "max-len",
        "This line has a length of 100. Maximum allowed is 80.",
        &"/".repeat(100),
    );

    let result = processor.postprocess(vec![vec![diag]], FILE);
    expect!["2:1-2:101 [max-len]: This line has a length of 100. Maximum allowed is 80."]
        .assert_eq(&format_diagnostics(&result));
}

#[test]
fn anywhere_policy_drops_all_problems_of_the_rule() {
    let processor = fixture_processor();
    let processed = preprocess(&processor, "/* eslint-env node */\nlet a = 1;\nlet b = a;");
    let diagnostics = vec![
        report(&processed, "prefer-const", "'a' is never reassigned.", "a = 1"),
        report(&processed, "prefer-const", "'b' is never reassigned.", "b = a"),
        report(&processed, "semi", "Missing semicolon.", "b = a;"),
    ];

    let result = processor.postprocess(vec![diagnostics], FILE);
    expect!["3:5-3:11 [semi]: Missing semicolon."].assert_eq(&format_diagnostics(&result));
}

#[test]
fn anywhere_policy_keeps_problems_in_documents_without_directives() {
    let processor = fixture_processor();
    let processed = preprocess(&processor, "let a = 1;\nconsole.log(a);");
    let diag = report(&processed, "prefer-const", "'a' is never reassigned.", "a = 1");

    let result = processor.postprocess(vec![vec![diag]], FILE);
    expect!["1:5-1:10 [prefer-const]: 'a' is never reassigned."]
        .assert_eq(&format_diagnostics(&result));
}

#[test]
fn batches_are_concatenated_in_order() {
    let processor = Processor::default();
    let processed = preprocess(&processor, "/* eslint-env mocha */ a; b;");
    let batches = vec![
        vec![report(&processed, "no-undef", "'a' is not defined.", "a;")],
        vec![report(&processed, "no-undef", "'b' is not defined.", "b;")],
    ];

    let result = processor.postprocess(batches, FILE);
    expect![[r#"
        1:24-1:26 [no-undef]: 'a' is not defined.
        1:27-1:29 [no-undef]: 'b' is not defined."#]]
    .assert_eq(&format_diagnostics(&result));
}

// ---------------------------------------------------------------------------
// Tests — justification preservation
// ---------------------------------------------------------------------------

#[test]
fn preserves_justifications_in_single_line_comments() {
    let processor = fixture_processor();
    let source = "/* eslint-env node -- TODO: replace eslint-env with global */";
    let processed = preprocess(&processor, source);
    assert!(processed.ends_with(" -- TODO: replace eslint-env with global */"));

    let diag = span(
        &processed,
        "no-warning-comments",
        "Unexpected 'todo' comment.",
        0..processed.len(),
    );
    let result = processor.postprocess(vec![vec![diag]], FILE);
    expect!["1:1-1:62 [no-warning-comments]: Unexpected 'todo' comment."]
        .assert_eq(&format_diagnostics(&result));
}

#[test]
fn preserves_justifications_in_multiline_comments() {
    let processor = fixture_processor();
    let source = "/* eslint-env node\n-- TODO: replace eslint-env with global */";
    let processed = preprocess(&processor, source);
    assert!(processed.starts_with("/*\nglobal\n"));
    assert!(processed.ends_with("\n-- TODO: replace eslint-env with global\n*/"));

    let diag = span(
        &processed,
        "no-warning-comments",
        "Unexpected 'todo' comment.",
        0..processed.len(),
    );
    let result = processor.postprocess(vec![vec![diag]], FILE);
    expect!["1:1-2:43 [no-warning-comments]: Unexpected 'todo' comment."]
        .assert_eq(&format_diagnostics(&result));
}

// ---------------------------------------------------------------------------
// Tests — message locations
// ---------------------------------------------------------------------------

#[test]
fn adjusts_locations_when_there_is_no_directive_in_the_line() {
    let processor = Processor::default();
    let processed = preprocess(&processor, "/* eslint-env\nmocha */ it\n foo");
    let diag = report(&processed, "no-undef", "'foo' is not defined.", "foo");

    let result = processor.postprocess(vec![vec![diag]], FILE);
    expect!["3:2-3:5 [no-undef]: 'foo' is not defined."].assert_eq(&format_diagnostics(&result));
}

#[test]
fn adjusts_locations_when_a_directive_starts_in_the_middle_of_a_line() {
    let processor = Processor::default();
    let processed = preprocess(&processor, "foo; /* eslint-env mocha */");
    let start = processed.find("foo").unwrap();
    let diag = span(&processed, "no-undef", "'foo' is not defined.", start..start + 3);

    let result = processor.postprocess(vec![vec![diag]], FILE);
    expect!["1:1-1:4 [no-undef]: 'foo' is not defined."].assert_eq(&format_diagnostics(&result));
}

#[test]
fn adjusts_locations_when_a_directive_ends_in_the_middle_of_a_line() {
    let processor = Processor::default();
    let processed = preprocess(&processor, "/* eslint-env mocha */ foo;");
    let diag = report(&processed, "no-undef", "'foo' is not defined.", "foo");

    let result = processor.postprocess(vec![vec![diag]], FILE);
    expect!["1:24-1:27 [no-undef]: 'foo' is not defined."]
        .assert_eq(&format_diagnostics(&result));
}

#[test]
fn adjusts_locations_with_multiple_directives() {
    let processor = Processor::default();
    let source = "/* eslint-env unknown */\n1;\n/*\neslint-env node -- Node.js environment\n*/\nfoo; /* eslint-env mocha */ bar;";
    let processed = preprocess(&processor, source);
    let diagnostics = vec![
        report(&processed, "no-undef", "'foo' is not defined.", "foo"),
        report(&processed, "no-undef", "'bar' is not defined.", "bar"),
    ];

    let result = processor.postprocess(vec![diagnostics], FILE);
    expect![[r#"
        6:1-6:4 [no-undef]: 'foo' is not defined.
        6:29-6:32 [no-undef]: 'bar' is not defined."#]]
    .assert_eq(&format_diagnostics(&result));
}

// ---------------------------------------------------------------------------
// Tests — autofix
// ---------------------------------------------------------------------------

#[test]
fn adjusts_autofix_locations() {
    let processor = Processor::default();
    let source = "/* eslint-env jquery */ _ => _";
    let processed = preprocess(&processor, source);
    let param = processed.find("_ =>").unwrap();
    let diag = span(
        &processed,
        "arrow-parens",
        "Expected parentheses around arrow function argument.",
        param..param + 1,
    )
    .with_fix(param..param + 1, "(_)");

    assert!(processor.supports_autofix());
    let result = processor.postprocess(vec![vec![diag]], FILE);
    assert_eq!(
        apply_fixes(source, &result),
        "/* eslint-env jquery */ (_) => _"
    );
}

#[test]
fn keeps_autofixes_that_enclose_whole_directives() {
    let processor = Processor::default();
    let source = "let foo = () => {return void /* eslint-env jquery */ 0};";
    let processed = preprocess(&processor, source);
    let body_start = processed.find('{').unwrap();
    let body_end = processed.rfind('}').unwrap() + 1;
    let diag = span(
        &processed,
        "arrow-body-style",
        "Unexpected block statement surrounding arrow body.",
        body_start..body_end,
    )
    .with_fix(body_start..body_end, "void 0");

    let result = processor.postprocess(vec![vec![diag]], FILE);
    expect![[r#"1:17-1:56 [arrow-body-style]: Unexpected block statement surrounding arrow body. fix 16..55 "void 0""#]]
        .assert_eq(&format_diagnostics(&result));
}

#[test]
fn suppresses_autofixes_that_overlap_with_part_of_a_directive() {
    let processor = Processor::new(ProcessorOptions::default().with_policy("spaced-comment", None));
    let processed = preprocess(&processor, "/*eslint-env amd*/");
    let diag = span(
        &processed,
        "spaced-comment",
        "Unexpected space or tab after marker (global) in comment.",
        0..processed.len(),
    )
    .with_fix(8..9, "");

    let result = processor.postprocess(vec![vec![diag]], FILE);
    expect!["1:1-1:19 [spaced-comment]: Unexpected space or tab after marker (global) in comment."]
        .assert_eq(&format_diagnostics(&result));
}

#[test]
fn does_not_suppress_autofixes_that_do_not_overlap_with_directives() {
    let processor = Processor::default();
    let source = "let foo = () => {return void 0}; /* eslint-env jquery */";
    let processed = preprocess(&processor, source);
    let diag = span(
        &processed,
        "arrow-body-style",
        "Unexpected block statement surrounding arrow body.",
        16..31,
    )
    .with_fix(16..31, "void 0");

    let result = processor.postprocess(vec![vec![diag]], FILE);
    assert_eq!(
        apply_fixes(source, &result),
        "let foo = () => void 0; /* eslint-env jquery */"
    );
}

// ---------------------------------------------------------------------------
// Tests — configuration and concurrency
// ---------------------------------------------------------------------------

#[test]
fn invalid_options_fail_construction() {
    let value: toml::Value = toml::from_str("[disabledRules]\nmax-len = \"sometimes\"\n").unwrap();
    let err = Processor::from_value(&value).unwrap_err();
    expect![[r#"disabledRules.max-len: unrecognized policy "sometimes""#]]
        .assert_eq(&err.to_string());

    let value: toml::Value = toml::from_str("[plugins]\ncypress = \"x\"\n").unwrap();
    let err = Processor::from_value(&value).unwrap_err();
    expect!["plugins.cypress: expected a table, found string"].assert_eq(&err.to_string());
}

#[test]
fn custom_environment_lookup() {
    let mut base = HashMap::new();
    base.insert(
        "host".to_string(),
        Environment::uniform(&["hostApi"], Writability::Declared),
    );
    let registry = EnvironmentRegistry::with_lookup(Arc::new(base), HashMap::new());
    let processor = Processor::with_registry(RulePolicies::new(), registry);

    let processed = preprocess(&processor, "/* eslint-env host, node */");
    expect!["/* global hostApi */"].assert_eq(&processed);
}

#[test]
fn default_processor_suppresses_recommended_rules() {
    let processor = Processor::default();
    let processed = preprocess(&processor, "foo /* eslint-env node */ ()");
    let diag = span(&processed, "max-len", "Line too long.", 0..processed.len());

    let result = processor.postprocess(vec![vec![diag]], FILE);
    expect!["OK (no diagnostics)"].assert_eq(&format_diagnostics(&result));
}

#[test]
fn recommended_options_can_be_turned_off() {
    let value: toml::Value = toml::from_str("recommended = false
").unwrap();
    let processor = Processor::from_value(&value).unwrap();
    let processed = preprocess(&processor, "foo /* eslint-env node */ ()");
    let diag = span(&processed, "max-len", "Line too long.", 0..processed.len());

    let result = processor.postprocess(vec![vec![diag]], FILE);
    expect!["1:1-1:29 [max-len]: Line too long."].assert_eq(&format_diagnostics(&result));
}

#[test]
fn concurrent_documents_do_not_interfere() {
    let processor = Arc::new(Processor::default());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let processor = Arc::clone(&processor);
            std::thread::spawn(move || {
                let id = format!("file{}.js", i);
                let source = format!("{}/* eslint-env mocha */ foo{};", " ".repeat(i), i);
                let processed = processor.preprocess(&source, &id).remove(0).text;
                let diag = report(&processed, "no-undef", "undefined", &format!("foo{}", i));

                let result = processor.postprocess(vec![vec![diag]], &id);
                assert_eq!(result.len(), 1);
                assert_eq!(result[0].column, source.find("foo").unwrap() + 1);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert!(processor.pending("file0.js").is_none());
}
