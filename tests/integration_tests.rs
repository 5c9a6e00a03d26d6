// Table-driven pipeline tests
//
// Each case runs source text through lexer, parser and evaluator and checks
// either the produced integer or a fragment of the error message. Cases in
// one suite share an evaluator, so declarations carry over like a REPL
// session.

use icalc::{evaluate_source, CalcError, Evaluator, ParseMode};

/// Test result for a single test case
#[derive(Debug)]
pub enum TestResult {
    Pass,
    Fail(String),
    Crash(String),
}

#[derive(Debug, Clone)]
pub enum Expectation {
    Value(i64),
    ErrorContaining(String),
}

/// Individual test case
#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub input: String,
    pub mode: ParseMode,
    pub expected: Expectation,
}

impl TestCase {
    pub fn evaluates_to(name: &str, input: &str, value: i64) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            mode: ParseMode::Statement,
            expected: Expectation::Value(value),
        }
    }

    pub fn fails_with(name: &str, input: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            mode: ParseMode::Statement,
            expected: Expectation::ErrorContaining(message.to_string()),
        }
    }

    pub fn as_program(mut self) -> Self {
        self.mode = ParseMode::Program;
        self
    }
}

/// Test suite containing multiple test cases
#[derive(Debug)]
pub struct TestSuite {
    pub name: String,
    pub tests: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tests: Vec::new(),
        }
    }

    pub fn add_test(&mut self, test: TestCase) {
        self.tests.push(test);
    }

    /// Run all tests in this suite against one shared evaluator
    pub fn run(&self) -> TestSuiteResults {
        let mut results = TestSuiteResults::new(&self.name);
        let mut evaluator = Evaluator::new();

        println!("Running test suite: {}", self.name);
        println!("{}", "=".repeat(50));

        for test in &self.tests {
            let result = run_single_test(test, &mut evaluator);
            results.add_result(&test.name, result);
        }

        results.print_summary();
        results
    }
}

/// Results for a test suite run
#[derive(Debug)]
pub struct TestSuiteResults {
    pub suite_name: String,
    pub results: Vec<(String, TestResult)>,
    pub passed: usize,
    pub failed: usize,
    pub crashed: usize,
}

impl TestSuiteResults {
    pub fn new(suite_name: &str) -> Self {
        Self {
            suite_name: suite_name.to_string(),
            results: Vec::new(),
            passed: 0,
            failed: 0,
            crashed: 0,
        }
    }

    pub fn add_result(&mut self, test_name: &str, result: TestResult) {
        match &result {
            TestResult::Pass => {
                self.passed += 1;
                println!("  ✓ {}", test_name);
            }
            TestResult::Fail(msg) => {
                self.failed += 1;
                println!("  ✗ {}: {}", test_name, msg);
            }
            TestResult::Crash(msg) => {
                self.crashed += 1;
                println!("  💥 {}: CRASHED - {}", test_name, msg);
            }
        }
        self.results.push((test_name.to_string(), result));
    }

    pub fn print_summary(&self) {
        println!();
        println!("Test Suite: {} - Summary", self.suite_name);
        println!("{}", "-".repeat(30));
        println!("Passed:  {}", self.passed);
        println!("Failed:  {}", self.failed);
        println!("Crashed: {}", self.crashed);
        println!("Total:   {}", self.results.len());
    }
}

fn run_single_test(test: &TestCase, evaluator: &mut Evaluator) -> TestResult {
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        evaluate_source(&test.input, test.mode, evaluator)
    }));

    match outcome {
        Ok(result) => check_outcome(result, &test.expected),
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else {
                "Unknown panic".to_string()
            };
            TestResult::Crash(panic_msg)
        }
    }
}

fn check_outcome(result: Result<i64, CalcError>, expected: &Expectation) -> TestResult {
    match (result, expected) {
        (Ok(actual), Expectation::Value(wanted)) if actual == *wanted => TestResult::Pass,
        (Ok(actual), Expectation::Value(wanted)) => {
            TestResult::Fail(format!("expected {}, got {}", wanted, actual))
        }
        (Ok(actual), Expectation::ErrorContaining(fragment)) => TestResult::Fail(format!(
            "expected an error containing '{}', got value {}",
            fragment, actual
        )),
        (Err(error), Expectation::ErrorContaining(fragment)) => {
            if error.to_string().contains(fragment.as_str()) {
                TestResult::Pass
            } else {
                TestResult::Fail(format!(
                    "error '{}' does not contain '{}'",
                    error, fragment
                ))
            }
        }
        (Err(error), Expectation::Value(wanted)) => {
            TestResult::Fail(format!("expected {}, got error '{}'", wanted, error))
        }
    }
}

// ============================================================================
// Test Suite Creation Functions
// ============================================================================

fn create_arithmetic_tests() -> TestSuite {
    let mut suite = TestSuite::new("Arithmetic");

    suite.add_test(TestCase::evaluates_to("single_literal", "42", 42));
    suite.add_test(TestCase::evaluates_to("addition", "2+3", 5));
    suite.add_test(TestCase::evaluates_to("subtraction", "2 - 7", -5));
    suite.add_test(TestCase::evaluates_to("product_then_sum", "2*3+4", 10));
    suite.add_test(TestCase::evaluates_to("sum_then_product", "2+3*4", 14));
    suite.add_test(TestCase::evaluates_to("grouping", "(1+2)*3", 9));
    suite.add_test(TestCase::evaluates_to("nested_grouping", "((1+2)+3)+4", 10));
    suite.add_test(TestCase::evaluates_to("truncating_division", "10/3", 3));
    suite.add_test(TestCase::evaluates_to("negative_division", "-7/2", -3));
    suite.add_test(TestCase::evaluates_to("unary_minus", "-5", -5));
    suite.add_test(TestCase::evaluates_to("unary_plus", "+5", 5));
    suite.add_test(TestCase::evaluates_to("double_negation", "--5", 5));
    suite.add_test(TestCase::evaluates_to("negated_group", "-(2+3)*2", -10));
    suite.add_test(TestCase::evaluates_to("whitespace", " \t 6 \n * \n 7 ", 42));
    suite.add_test(TestCase::evaluates_to(
        "max_literal",
        "9223372036854775807",
        i64::MAX,
    ));
    suite.add_test(TestCase::evaluates_to(
        "overflow_wraps",
        "9223372036854775807 + 1",
        i64::MIN,
    ));
    suite.add_test(TestCase::evaluates_to(
        "multiplication_wraps",
        "9223372036854775807 * 2",
        -2,
    ));
    suite.add_test(TestCase::evaluates_to(
        "min_divided_by_minus_one_wraps",
        "(-9223372036854775807 - 1) / -1",
        i64::MIN,
    ));
    suite.add_test(TestCase::evaluates_to(
        "negating_min_wraps",
        "-(-9223372036854775807 - 1)",
        i64::MIN,
    ));

    suite
}

fn create_associativity_tests() -> TestSuite {
    let mut suite = TestSuite::new("Single-step associativity");

    // Each precedence level folds in one operator. A single statement stops
    // there and leaves the rest of the line unread.
    suite.add_test(TestCase::evaluates_to("chained_addition", "1+2+3", 3));
    suite.add_test(TestCase::evaluates_to("chained_multiplication", "2*3*4", 6));
    suite.add_test(TestCase::evaluates_to("chained_subtraction", "10-2-3", 8));
    suite.add_test(TestCase::evaluates_to("trailing_operand", "7 8", 7));
    suite.add_test(TestCase::fails_with(
        "chained_addition_in_program",
        "1+2+3",
        "unexpected token `PLUS`, expected `SEMI`",
    )
    .as_program());
    suite.add_test(TestCase::evaluates_to("grouped_left", "(1+2)+3", 6));
    suite.add_test(TestCase::evaluates_to("grouped_right", "1-(2-3)", 2));
    suite.add_test(TestCase::evaluates_to("mixed_levels", "2*3-4/2", 4));

    suite
}

fn create_variable_tests() -> TestSuite {
    let mut suite = TestSuite::new("Variables");

    suite.add_test(TestCase::evaluates_to("declare", "var x = 5", 5));
    suite.add_test(TestCase::evaluates_to("read", "x", 5));
    suite.add_test(TestCase::evaluates_to("assign", "x = x * 2", 10));
    suite.add_test(TestCase::evaluates_to("read_after_assign", "x + 1", 11));
    suite.add_test(TestCase::evaluates_to("declare_from_other", "var y_1 = -x", -10));
    suite.add_test(TestCase::evaluates_to("assign_without_spaces", "y_1=3", 3));
    suite.add_test(TestCase::fails_with(
        "redeclare",
        "var x = 1",
        "variable `x` is already declared",
    ));
    suite.add_test(TestCase::evaluates_to("redeclare_kept_value", "x", 10));
    suite.add_test(TestCase::fails_with(
        "assign_undeclared",
        "z = 3",
        "undefined variable `z`",
    ));
    suite.add_test(TestCase::fails_with("read_undeclared", "z", "undefined variable `z`"));
    suite.add_test(TestCase::fails_with(
        "declare_from_undeclared",
        "var w = q",
        "undefined variable `q`",
    ));
    suite.add_test(TestCase::fails_with("declaration_never_bound", "w", "undefined variable `w`"));

    suite
}

fn create_program_tests() -> TestSuite {
    let mut suite = TestSuite::new("Programs");

    suite.add_test(
        TestCase::evaluates_to("last_value", "var a = 2; var b = a * 3; b + 1", 7).as_program(),
    );
    suite.add_test(TestCase::evaluates_to("trailing_separator", "a = 4;\n", 4).as_program());
    suite.add_test(TestCase::fails_with(
        "empty_program",
        "  \n ",
        "program contains no statements",
    )
    .as_program());
    suite.add_test(TestCase::fails_with(
        "double_separator",
        "1;;2",
        "unexpected token `SEMI`, expected `INTEGER`",
    )
    .as_program());
    suite.add_test(TestCase::fails_with(
        "missing_separator",
        "1 2",
        "unexpected token `INTEGER`, expected `SEMI`",
    )
    .as_program());

    suite
}

fn create_error_tests() -> TestSuite {
    let mut suite = TestSuite::new("Errors");

    suite.add_test(TestCase::fails_with("division_by_zero", "10/0", "division by zero"));
    suite.add_test(TestCase::fails_with(
        "computed_zero_divisor",
        "1/(2-2)",
        "division by zero",
    ));
    suite.add_test(TestCase::fails_with(
        "unrecognized_character",
        "1 + @",
        "unrecognized character `@`",
    ));
    suite.add_test(TestCase::fails_with(
        "integer_overflow",
        "99999999999999999999",
        "malformed integer literal `99999999999999999999`",
    ));
    suite.add_test(TestCase::fails_with(
        "min_literal_overflows",
        "-9223372036854775808",
        "malformed integer literal",
    ));
    suite.add_test(TestCase::fails_with(
        "unclosed_paren",
        "(1 + 2",
        "unexpected token `EOF`, expected `RPAREN`",
    ));
    suite.add_test(TestCase::fails_with(
        "empty_statement",
        "",
        "unexpected token `EOF`, expected `INTEGER`",
    ));
    suite.add_test(TestCase::fails_with(
        "reserved_func",
        "func",
        "unexpected token `KEYWORD`, expected `INTEGER`",
    ));
    suite.add_test(TestCase::fails_with(
        "declare_literal",
        "var 5 = 3",
        "unexpected token `INTEGER`, expected `IDENTIFIER`",
    ));
    suite.add_test(TestCase::fails_with(
        "declare_without_value",
        "var v",
        "unexpected token `EOF`, expected `EQUALS`",
    ));
    suite.add_test(TestCase::fails_with(
        "brace",
        "{",
        "unexpected token `LCURLY`, expected `INTEGER`",
    ));
    suite.add_test(TestCase::fails_with(
        "dangling_operator",
        "3 *",
        "unexpected token `EOF`, expected `INTEGER`",
    ));

    suite
}

#[test]
fn pipeline_suites() {
    let suites = vec![
        create_arithmetic_tests(),
        create_associativity_tests(),
        create_variable_tests(),
        create_program_tests(),
        create_error_tests(),
    ];

    let mut failed = 0;
    let mut crashed = 0;
    for suite in &suites {
        let results = suite.run();
        failed += results.failed;
        crashed += results.crashed;
    }

    assert_eq!(crashed, 0, "{} test cases panicked", crashed);
    assert_eq!(failed, 0, "{} test cases failed", failed);
}
