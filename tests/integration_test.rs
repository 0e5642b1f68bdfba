// ABOUTME: Integration tests driving the full tokenize/parse/eval pipeline

use schemer::builtins::register_builtins;
use schemer::env::Frame;
use schemer::error::EvalError;
use schemer::eval::eval;
use schemer::parser::parse;
use schemer::tokenizer::tokenize;
use schemer::value::Value;
use std::rc::Rc;

/// Root frame with the primitives seeded.
fn setup() -> Rc<Frame> {
    let root = Frame::root();
    register_builtins(&root);
    root
}

/// Evaluates a whole program against one fresh root frame, returning the
/// lines the driver would print (one per non-void result).
fn run(source: &str) -> Result<Vec<String>, EvalError> {
    let env = setup();
    let forms = parse(&tokenize(source)?)?;
    let mut printed = Vec::new();
    for form in &forms {
        let result = eval(form, &env)?;
        if !matches!(result, Value::Void) {
            printed.push(format!("{}", result));
        }
    }
    Ok(printed)
}

fn lines(source: &str) -> Vec<String> {
    run(source).unwrap()
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_sum_prints_double() {
    assert_eq!(lines("(+ 1 2 3)"), vec!["6.000000"]);
}

#[test]
fn test_define_prints_nothing_and_binds() {
    assert_eq!(lines("(define x 10) (+ x 5)"), vec!["15.000000"]);
}

#[test]
fn test_let_scenario() {
    assert_eq!(lines("(let ((x 2) (y 3)) (* x y))"), vec!["6.000000"]);
}

#[test]
fn test_let_star_scenario() {
    assert_eq!(lines("(let* ((x 2) (y (+ x 1))) (* x y))"), vec!["6.000000"]);
}

#[test]
fn test_immediate_lambda_application() {
    assert_eq!(lines("((lambda (x y) (+ x y)) 4 5)"), vec!["9.000000"]);
}

#[test]
fn test_factorial_through_recursive_define() {
    let source = "(define fact (lambda (n) (if (zero? n) 1 (* n (fact (- n 1))))))
                  (fact 5)";
    assert_eq!(lines(source), vec!["120.000000"]);
}

#[test]
fn test_cons_chain_prints_as_list() {
    assert_eq!(lines("(cons 1 (cons 2 (cons 3 '())))"), vec!["(1 2 3)"]);
}

#[test]
fn test_quote_returns_datum() {
    assert_eq!(lines("(quote (a b c))"), vec!["(a b c)"]);
}

#[test]
fn test_if_truthiness() {
    assert_eq!(lines("(if #f 1 2)"), vec!["2"]);
    assert_eq!(lines("(if '() 1 2)"), vec!["1"]);
}

#[test]
fn test_car_of_empty_list_fails() {
    let result = run("(car '())");
    match result {
        Err(EvalError::WrongType { .. }) => {
            let message = format!("{}", result.unwrap_err());
            assert!(message.contains("car requires a list"));
        }
        other => panic!("Expected a WrongType error, got {:?}", other.map(|_| ())),
    }
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_lexical_closure_ignores_caller_environment() {
    let source = "(define x 10)
                  (define f (lambda (y) (+ x y)))
                  (let ((x 1000)) (f 5))";
    assert_eq!(lines(source), vec!["15.000000"]);
}

#[test]
fn test_arguments_evaluate_left_to_right() {
    let source = "(define trace '())
                  (define note (lambda (tag) (begin (set! trace (cons tag trace)) tag)))
                  ((lambda (a b c) c) (note 1) (note 2) (note 3))
                  trace";
    // trace is built by prepending, so textual order leaves 3 on top.
    assert_eq!(lines(source), vec!["3", "(3 2 1)"]);
}

#[test]
fn test_shadowing_restores_outer_binding() {
    assert_eq!(lines("(let ((x 1)) (let ((x 2)) x))"), vec!["2"]);
    assert_eq!(
        lines("(define x 1) (let ((x 2)) x) x"),
        vec!["2", "1"]
    );
}

#[test]
fn test_letrec_mutual_recursion_terminates() {
    let source = "(letrec ((even? (lambda (n) (if (zero? n) #t (odd? (- n 1)))))
                          (odd? (lambda (n) (if (zero? n) #f (even? (- n 1))))))
                    (odd? 9))";
    assert_eq!(lines(source), vec!["#t"]);
}

#[test]
fn test_parser_round_trip() {
    let source = "(define f (lambda (x) (if (zero? x) '() (cons x (f (- x 1))))))";
    let once = lines(&format!("'{}", source))[0].clone();
    // Printing the parsed tree and reparsing it yields the same tree.
    let twice = lines(&format!("'{}", once))[0].clone();
    assert_eq!(once, twice);
}

#[test]
fn test_set_walks_the_frame_chain() {
    let source = "(define counter 0)
                  (define bump (lambda () (set! counter (+ counter 1))))
                  (bump)
                  (bump)
                  counter";
    assert_eq!(lines(source), vec!["2.000000"]);
}

#[test]
fn test_successive_calls_are_independent() {
    let source = "(define f (lambda (n) (begin (define local n) local)))
                  (f 1)
                  (f 2)";
    assert_eq!(lines(source), vec!["1", "2"]);
}

#[test]
fn test_higher_order_functions() {
    let source = "(define make-adder (lambda (n) (lambda (x) (+ x n))))
                  (define add5 (make-adder 5))
                  (add5 10)";
    assert_eq!(lines(source), vec!["15.000000"]);
}

// ============================================================================
// Printing conventions
// ============================================================================

#[test]
fn test_string_prints_with_quotes() {
    assert_eq!(lines("\"hello world\""), vec!["\"hello world\""]);
}

#[test]
fn test_closure_prints_as_literal() {
    assert_eq!(lines("(lambda (x) x)"), vec!["closure"]);
}

#[test]
fn test_improper_pair_prints_inline() {
    assert_eq!(lines("(cons 1 2)"), vec!["(1 2)"]);
}

#[test]
fn test_nested_quoted_structure() {
    assert_eq!(lines("'(1 (2 3) (4 (5)))"), vec!["(1 (2 3) (4 (5)))"]);
}

#[test]
fn test_booleans_and_null_print() {
    assert_eq!(lines("#t #f '()"), vec!["#t", "#f", "()"]);
}

// ============================================================================
// Primitive semantics through the evaluator
// ============================================================================

#[test]
fn test_arithmetic_results_widen_to_double() {
    assert_eq!(lines("(- 10 3 2)"), vec!["5.000000"]);
    assert_eq!(lines("(- 4)"), vec!["-4.000000"]);
    assert_eq!(lines("(* 2 3 4)"), vec!["24.000000"]);
    assert_eq!(lines("(/ 7 2)"), vec!["3.500000"]);
    assert_eq!(lines("(+)"), vec!["0.000000"]);
    assert_eq!(lines("(*)"), vec!["1.000000"]);
}

#[test]
fn test_modulo_stays_integer() {
    assert_eq!(lines("(modulo 17 5)"), vec!["2"]);
}

#[test]
fn test_comparisons() {
    assert_eq!(lines("(< 1 2) (> 1 2) (= 2 2) (<= 2 2) (>= 1 2)"),
               vec!["#t", "#f", "#t", "#t", "#f"]);
}

#[test]
fn test_null_predicate() {
    assert_eq!(lines("(null? '()) (null? '(1)) (null? 0)"), vec!["#t", "#f", "#f"]);
}

#[test]
fn test_car_cdr_through_eval() {
    assert_eq!(lines("(car '(1 2 3)) (cdr '(1 2 3)) (cdr '(1))"),
               vec!["1", "(2 3)", "()"]);
}

// ============================================================================
// Error kinds surface with their own codes
// ============================================================================

#[test]
fn test_error_kinds() {
    assert!(matches!(run("(+ 1"), Err(EvalError::Syntax(_))));
    assert!(matches!(run("#q"), Err(EvalError::Lexical(_))));
    assert!(matches!(run("(if #t 1)"), Err(EvalError::BadFormShape { .. })));
    assert!(matches!(run("(define 1 2)"), Err(EvalError::BadFormBinding { .. })));
    assert!(matches!(run("(lambda 1 2)"), Err(EvalError::BadLambdaParams)));
    assert!(matches!(run("ghost"), Err(EvalError::UnboundSymbol(_))));
    assert!(matches!(run("(1 2)"), Err(EvalError::NotApplicable)));
    assert!(matches!(run("((lambda (x) x))"), Err(EvalError::TooFewArgs)));
    assert!(matches!(run("(car 5)"), Err(EvalError::WrongType { .. })));
    assert!(matches!(run("(/ 1 0)"), Err(EvalError::DivideByZero)));
    assert!(matches!(run("(car '(1) '(2))"), Err(EvalError::Arity { .. })));
}

#[test]
fn test_error_short_circuits_remaining_forms() {
    // The program fails on the second form; the third never runs, which is
    // observable because it would rebind x.
    let env = setup();
    let forms = parse(&tokenize("(define x 1) (car x) (define x 2)").unwrap()).unwrap();
    let mut failed = None;
    for form in &forms {
        if let Err(error) = eval(form, &env) {
            failed = Some(error);
            break;
        }
    }
    assert!(matches!(failed, Some(EvalError::WrongType { .. })));
    assert!(matches!(env.lookup("x"), Some(Value::Integer(1))));
}
