//! Translate the harness module ASTs through the driver pipeline
use pygo::driver::error::PygoError;
use pygo::driver::options::PygoOptions;
use pygo::driver::statistics::Statistics;
use pygo::driver::translate::translate_input;
use pygo::translate::TranslateError;
use structopt::StructOpt;

/// Options for translating one harness file with extra flags
pub fn opts(filename: &str, flags: &[&str]) -> PygoOptions {
    let path = format!("harness/{filename}");
    let mut args = vec!["pygo"];
    args.extend_from_slice(flags);
    args.push(&path);
    PygoOptions::from_iter(args)
}

/// Translate and return the generated source, asserting success
fn run_test(opt: &PygoOptions) -> String {
    let mut stats = Statistics::default();
    let translated = translate_input(&opt.files[0], opt, &mut stats).unwrap();
    assert_eq!(stats.modules(), 1);
    translated.source
}

fn assert_contains(source: &str, snippets: &[&str]) {
    for snippet in snippets {
        assert!(source.contains(snippet), "missing `{}` in:\n{}", snippet, source);
    }
}

#[test]
pub fn test_harness_001() {
    let source = run_test(&opts("001_basics.ast.json", &[]));
    assert!(source.starts_with("// generated by pygo from harness/001_basics.ast.json"));
    assert_contains(
        &source,
        &[
            "package p001_basics",
            "\"fmt\"",
            "// Basic statements.",
            "var total = 0",
            "for i := 2; i < 10; i += 3 {",
            "total += i",
            "0 < total && total <= 100",
            "total = 1",
            "for {",
            "break",
            "fmt.Println(fmt.Sprintf(\"total=%d\", total))",
        ],
    );
}

#[test]
pub fn test_harness_001_main() {
    let source = run_test(&opts("001_basics.ast.json", &["--main"]));
    assert_contains(&source, &["package main", "func main() {"]);
}

#[test]
pub fn test_harness_002() {
    let source = run_test(&opts("002_functions.ast.json", &["--package", "funcs"]));
    assert_contains(
        &source,
        &[
            "package funcs",
            "// @cached",
            "func scale(x runtime.Any, factor runtime.Any /*=2*/) runtime.Any {",
            "return x * factor",
            "func count(n int) runtime.Any {",
            "return n // yield",
            "func(v runtime.Any) runtime.Any {",
        ],
    );
}

#[test]
pub fn test_harness_002_reject_generators() {
    let opt = opts("002_functions.ast.json", &["--generator-policy", "reject"]);
    let mut stats = Statistics::default();
    match translate_input(&opt.files[0], &opt, &mut stats) {
        Err(PygoError::InModule(module, inner)) => {
            assert_eq!(module, "002_functions");
            assert!(matches!(
                *inner,
                PygoError::Translate(TranslateError::GeneratorRejected(_))
            ));
        }
        Err(e) => panic!("unexpected error {}", e),
        Ok(_) => panic!("generator was not rejected"),
    }
}

#[test]
pub fn test_harness_003() {
    let source = run_test(&opts("003_classes.ast.json", &[]));
    assert_contains(
        &source,
        &[
            "type Point struct {",
            "// bases: object",
            "x runtime.Any // = 0",
            "func (self *Point) move(dx runtime.Any) {",
            "self.x += dx",
            "func (self *Point) String() string {",
            "return fmt.Sprint(self.x)",
        ],
    );
    let struct_at = source.find("type Point struct").unwrap();
    let method_at = source.find("func (self *Point) move").unwrap();
    assert!(struct_at < method_at);
}

#[test]
pub fn test_harness_004() {
    let source = run_test(&opts("004_exceptions.ast.json", &[]));
    assert_contains(
        &source,
        &[
            "\"os\"",
            "// import \"sys\"",
            "f := os.Open(path)",
            "defer runtime.Release(f)",
            "return f.Read()",
            "if err := func() error {",
            "case IOError, OSError:",
            "e := err",
            "os.Exit(2)",
            "// finally",
            "fmt.Println(\"done\")",
        ],
    );
}

#[test]
pub fn test_harness_005() {
    let source = run_test(&opts("005_comprehensions.ast.json", &[]));
    assert_contains(
        &source,
        &[
            "var lcΠ0 runtime.List",
            "if !runtime.Contains(seen, x) {",
            "lcΠ0 = append(lcΠ0, math.Pow(x, 2))",
            "make(chan runtime.Any)",
            "close(cΠ1)",
        ],
    );
}

#[test]
pub fn test_harness_006_lenient() {
    let source = run_test(&opts("006_unknown.ast.json", &[]));
    assert_contains(&source, &["UNKNOWN-EXPR: ast.Set", "at line 1, col 4"]);
}

#[test]
pub fn test_harness_006_strict() {
    let opt = opts("006_unknown.ast.json", &["--strict"]);
    let mut stats = Statistics::default();
    let err = translate_input(&opt.files[0], &opt, &mut stats).err().unwrap();
    assert!(err.to_string().contains("ast.Set"));
}

#[test]
pub fn test_harness_007() {
    let opt = opts("007_stepped_slice.ast.json", &[]);
    let mut stats = Statistics::default();
    match translate_input(&opt.files[0], &opt, &mut stats) {
        Err(PygoError::InModule(_, inner)) => match *inner {
            PygoError::Translate(TranslateError::SteppedSlice(pos)) => {
                assert_eq!((pos.line, pos.col), (1, 8))
            }
            other => panic!("unexpected error {}", other),
        },
        _ => panic!("stepped slice was not rejected"),
    }
}

#[test]
pub fn test_determinism() {
    let opt = opts("004_exceptions.ast.json", &[]);
    assert_eq!(run_test(&opt), run_test(&opt));
}
