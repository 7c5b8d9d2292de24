//! Integration tests for the expression tree pipeline (read → build → reduce → print)

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use calctree::application::services::CalcService;
use calctree::application::ApplicationError;
use calctree::domain::{DomainError, ExponentPolicy, Operator};
use calctree::infrastructure::{FileSystem, RealFileSystem};
use calctree::util::testing::init_test_setup;

/// In-memory filesystem keyed by path.
#[derive(Default)]
struct MemoryFileSystem {
    files: HashMap<PathBuf, String>,
}

impl MemoryFileSystem {
    fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(PathBuf::from(path), content.to_string());
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }
}

#[fixture]
fn service() -> CalcService {
    init_test_setup();
    CalcService::new(Arc::new(RealFileSystem), ExponentPolicy::Reject)
}

fn write_expr(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("expr.txt");
    fs::write(&path, content).unwrap();
    path
}

// ============================================================
// Scenarios
// ============================================================

#[rstest]
#[case::reducible_root("+ 2 3", "+ 2 3", "5")]
#[case::too_large("* 5 5", "* 5 5", "* 5 5")]
#[case::inner_collapse("+ * 2 3 1", "+ * 2 3 1", "+ 6 1")]
#[case::zero_exponent("^ 2 0", "^ 2 0", "1")]
#[case::single_digit("7", "7", "7")]
#[case::multiline_input("-\n  * 9 9\n  / 8 2\n", "- * 9 9 / 8 2", "- * 9 9 4")]
fn given_expression_file_when_run_then_prints_original_and_reduced(
    service: CalcService,
    #[case] input: &str,
    #[case] original: &str,
    #[case] reduced: &str,
) {
    let dir = TempDir::new().unwrap();
    let path = write_expr(&dir, input);

    let output = service.run(&path).unwrap();

    assert_eq!(output.original.to_string(), original);
    assert_eq!(output.reduced.to_string(), reduced);
}

#[rstest]
fn given_lone_operator_when_run_then_malformed_expression(service: CalcService) {
    let dir = TempDir::new().unwrap();
    let path = write_expr(&dir, "+");

    let err = service.run(&path).unwrap_err();

    assert!(
        matches!(
            err,
            ApplicationError::Domain(DomainError::MalformedExpression {
                operator: Operator::Add,
                position: 0
            })
        ),
        "unexpected error: {err:?}"
    );
    assert!(err.to_string().contains("malformed expression"));
}

#[rstest]
fn given_file_without_tokens_when_run_then_empty_expression(service: CalcService) {
    let dir = TempDir::new().unwrap();
    let path = write_expr(&dir, "hello world\n");

    let err = service.run(&path).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::EmptyExpression)
    ));
}

#[rstest]
fn given_missing_file_when_run_then_io_error_names_path(service: CalcService) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.txt");

    let err = service.run(&path).unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("does-not-exist.txt"));
}

#[rstest]
fn given_division_by_zero_when_run_then_arithmetic_error(service: CalcService) {
    let dir = TempDir::new().unwrap();
    let path = write_expr(&dir, "* 9 % 5 0");

    let err = service.run(&path).unwrap_err();

    assert_eq!(err.to_string(), "division by zero in '%'");
}

// ============================================================
// Reduction result
// ============================================================

#[rstest]
fn given_reduction_when_run_then_original_tree_is_untouched(service: CalcService) {
    let tree = service.parse("* + 1 2 + 3 4").unwrap();

    let output = service.reduce(&tree).unwrap();

    assert_eq!(output.collapsed, 2);
    assert_eq!(output.original, tree);
    assert_eq!(output.original.len(), 7);
    assert_eq!(output.reduced.len(), 3);
}

#[rstest]
#[case::reject(ExponentPolicy::Reject, None)]
#[case::one(ExponentPolicy::One, Some("1"))]
fn given_negative_exponent_when_run_then_policy_decides(
    #[case] policy: ExponentPolicy,
    #[case] expected: Option<&str>,
) {
    let service = CalcService::new(Arc::new(RealFileSystem), policy);
    let tree = service.parse("^ 3 - 2 5").unwrap();

    let result = service.reduce(&tree);

    match expected {
        Some(reduced) => assert_eq!(result.unwrap().reduced.to_string(), reduced),
        None => assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::NegativeExponent {
                exponent: -3
            }))
        )),
    }
}

// ============================================================
// FileSystem boundary
// ============================================================

#[test]
fn given_memory_filesystem_when_run_then_reads_through_trait() {
    let fs = MemoryFileSystem::default().with_file("/virtual/expr", "- 9 * 2 2");
    let service = CalcService::new(Arc::new(fs), ExponentPolicy::Reject);

    let output = service.run(Path::new("/virtual/expr")).unwrap();

    assert_eq!(output.original.to_string(), "- 9 * 2 2");
    assert_eq!(output.reduced.to_string(), "5");
}

#[test]
fn given_memory_filesystem_without_file_when_load_then_error() {
    let service = CalcService::new(Arc::new(MemoryFileSystem::default()), ExponentPolicy::Reject);

    let err = service.load(Path::new("/virtual/missing")).unwrap_err();

    assert!(err.to_string().starts_with("read expression /virtual/missing"));
}
