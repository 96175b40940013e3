use keycalc::{Engine, ErrorKind, Token};

fn error_kind(engine: &Engine) -> Option<ErrorKind> {
    engine.state().pending_error.map(|e| e.kind)
}

#[test]
fn test_divide_by_zero() {
    let mut engine = Engine::new();
    engine.append_str("5/0");
    let state = engine.evaluate();
    let error = state.pending_error.unwrap();
    assert_eq!(error.kind, ErrorKind::DivisionByZero);
    assert_eq!(error.message, "Cannot divide by zero");
    assert_eq!(state.display_text, "0");
}

#[test]
fn test_second_decimal_point_rejected() {
    let mut engine = Engine::new();
    engine.append_str("3.5");
    assert_eq!(engine.display(), "3.5");
    let state = engine.append_token(Token::Decimal);
    assert_eq!(
        state.pending_error.map(|e| e.kind),
        Some(ErrorKind::MultipleDecimalPoints)
    );
    assert_eq!(state.display_text, "0");
}

#[test]
fn test_addition() {
    let mut engine = Engine::new();
    engine.append_str("5+3");
    let state = engine.evaluate();
    assert_eq!(state.display_text, "8");
    assert_eq!(state.previous_expression.as_deref(), Some("5+3"));
    assert_eq!(state.pending_error, None);
}

#[test]
fn test_clear_always_resets() {
    let mut engine = Engine::new();
    let state = engine.clear();
    assert_eq!(state.display_text, "0");
    assert_eq!(state.previous_expression, None);

    engine.append_str("12*3=45");
    let state = engine.clear();
    assert_eq!(state.display_text, "0");
    assert_eq!(state.previous_expression, None);

    engine.append_str("5/0=");
    let state = engine.clear();
    assert_eq!(state.display_text, "0");
    assert_eq!(state.previous_expression, None);
    assert_eq!(state.pending_error, None);
}

#[test]
fn test_square_root() {
    let mut engine = Engine::new();
    engine.append_str("4");
    assert_eq!(engine.square_root().display_text, "2");

    engine.clear();
    engine.append_str("-4");
    assert_eq!(engine.display(), "-4");
    let state = engine.square_root();
    assert_eq!(
        state.pending_error.map(|e| e.kind),
        Some(ErrorKind::NegativeSqrt)
    );
    assert_eq!(state.display_text, "0");
}

#[test]
fn test_bare_percent() {
    let mut engine = Engine::new();
    for c in ['5', '0', '%', '='] {
        engine.append_char(c);
    }
    assert_eq!(engine.display(), "0.5");
    assert_eq!(engine.previous(), Some("50%"));
}

#[test]
fn test_percent_of_value() {
    let mut engine = Engine::new();
    engine.append_str("200*15%=");
    assert_eq!(engine.display(), "30");
}

#[test]
fn test_negative_operand_after_operator() {
    let mut engine = Engine::new();
    engine.append_str("5+-3=");
    assert_eq!(engine.display(), "2");
    assert_eq!(error_kind(&engine), None);
}

#[test]
fn test_consecutive_operators() {
    let mut engine = Engine::new();
    engine.append_str("5*/");
    assert_eq!(error_kind(&engine), Some(ErrorKind::ConsecutiveOperators));
    assert_eq!(engine.display(), "0");
}

#[test]
fn test_invalid_and_overflow() {
    let mut engine = Engine::new();
    engine.append_str("(1+2=");
    assert_eq!(error_kind(&engine), Some(ErrorKind::InvalidCalculation));

    engine.append_str(&"9".repeat(200));
    engine.append_str("*");
    engine.append_str(&"9".repeat(200));
    engine.evaluate();
    assert_eq!(error_kind(&engine), Some(ErrorKind::Overflow));
    assert_eq!(engine.display(), "0");
}

#[test]
fn test_engine_usable_after_errors() {
    let mut engine = Engine::new();
    engine.append_str("5/0=");
    engine.append_str("2*(3+4)=");
    assert_eq!(engine.display(), "14");
    assert_eq!(engine.previous(), Some("2*(3+4)"));
    assert_eq!(error_kind(&engine), None);
}

#[test]
fn test_buffer_never_empty() {
    let mut engine = Engine::new();
    let script = "12.3+%(-)*/..==√45/0=x\u{8}9";
    for c in script.chars() {
        let state = engine.append_char(c);
        assert!(!state.display_text.is_empty());
        for _ in 0..3 {
            assert!(!engine.delete().display_text.is_empty());
        }
        engine.append_char(c);
    }
    for _ in 0..50 {
        assert!(!engine.delete().display_text.is_empty());
    }
    assert_eq!(engine.display(), "0");
}

#[test]
fn test_results_are_formatted() {
    let mut engine = Engine::new();
    for (input, expected) in [
        ("10/4=", "2.5"),
        ("1/3=", "0.33333333"),
        ("0.1+0.2=", "0.3"),
        ("6/0.5=", "12"),
        ("2.5*4=", "10"),
    ] {
        engine.clear();
        engine.append_str(input);
        assert_eq!(engine.display(), expected, "{input}");
    }
}

#[test]
fn test_deeply_nested_input_does_not_crash() {
    let text = format!("5{}3", "-".repeat(200_000));
    assert_eq!(keycalc::calculator::evaluate_expression(&text).unwrap().display, "8");

    let text = format!("1+{}3", "(".repeat(50_000));
    assert_eq!(
        keycalc::calculator::evaluate_expression(&text),
        Err(ErrorKind::InvalidCalculation)
    );

    let mut engine = Engine::new();
    engine.append_str("1+");
    engine.append_str(&"(".repeat(5_000));
    engine.append_str("3");
    let state = engine.evaluate();
    assert_eq!(
        state.pending_error.map(|e| e.kind),
        Some(ErrorKind::InvalidCalculation)
    );
    assert_eq!(state.display_text, "0");
}
