mod common;

use common::Rig;

#[test]
fn test_numeric_builtins() {
    let mut r = Rig::new();
    r.enter("PRINT INT(-2.5);ABS(-3);SGN(-9)");
    assert_eq!(r.exec(), "-3  3 -1 \n");
    r.enter("PRINT RND(0)");
    assert_eq!(r.exec(), " 0 \n");
}

#[test]
fn test_string_builtins() {
    let mut r = Rig::new();
    r.enter(r#"PRINT LEN("HELLO");LEFT$("HELLO",2);MID$("HELLO",2,3)"#);
    assert_eq!(r.exec(), " 5 HEELL\n");
    r.enter(r#"PRINT RIGHT$("HELLO",3)"#);
    assert_eq!(r.exec(), "LLO\n");
}

#[test]
fn test_str_val_chr_asc() {
    let mut r = Rig::new();
    r.enter(r#"PRINT STR$(12);VAL("3.5X");CHR$(66);ASC("A")"#);
    assert_eq!(r.exec(), " 12 3.5 B 65 \n");
    r.enter(r#"PRINT LEN(STR$(100))"#);
    assert_eq!(r.exec(), " 4 \n");
}

#[test]
fn test_domain_errors() {
    let mut r = Rig::new();
    r.enter("PRINT SQR(-1)");
    assert_eq!(r.exec(), "?ILLEGAL VALUE\n");
    r.enter("PRINT LOG(0)");
    assert_eq!(r.exec(), "?ILLEGAL VALUE\n");
}

#[test]
fn test_def_fn_shadows_and_restores() {
    let mut r = Rig::new();
    r.enter("10 DEF FNS(X)=X*X");
    r.enter("20 X=3");
    r.enter("30 PRINT FNS(4);X");
    r.enter("RUN");
    assert_eq!(r.exec(), " 16  3 \n");
}

#[test]
fn test_fn_without_parameters() {
    let mut r = Rig::new();
    r.enter("10 DEF FNP=3.14");
    r.enter("20 PRINT FNP");
    r.enter("RUN");
    assert_eq!(r.exec(), " 3.14 \n");
}

#[test]
fn test_string_fn() {
    let mut r = Rig::new();
    r.enter(r#"10 DEF FNA$(S$)=S$+"!""#);
    r.enter(r#"20 PRINT FNA$("HI")"#);
    r.enter("RUN");
    assert_eq!(r.exec(), "HI!\n");
}

#[test]
fn test_integer_fn_truncates_its_result() {
    let mut r = Rig::new();
    r.enter("10 DEF FNI%(X)=X/2");
    r.enter("20 PRINT FNI%(5)");
    r.enter("RUN");
    assert_eq!(r.exec(), " 2 \n");
}

#[test]
fn test_wrong_number_of_arguments() {
    let mut r = Rig::new();
    r.enter("10 DEF FNS(X)=X*X");
    r.enter("20 PRINT FNS(1,2)");
    r.enter("RUN");
    let out = r.exec();
    assert!(out.starts_with("?ILLEGAL VALUE IN 20"));
    assert!(out.contains("WRONG NUMBER OF ARGUMENTS"));
}

#[test]
fn test_undefined_fn() {
    let mut r = Rig::new();
    r.enter("PRINT FNQ(1)");
    assert_eq!(r.exec(), "?UNDEFINED FUNCTION\n");
}

#[test]
fn test_redefining_fn_is_an_error() {
    let mut r = Rig::new();
    r.enter("10 DEF FNA(X)=X");
    r.enter("20 DEF FNA(X)=X+1");
    r.enter("RUN");
    assert!(r.exec().starts_with("?ILLEGAL REASSIGN IN 20"));
}

#[test]
fn test_rerun_allows_the_same_definition() {
    let mut r = Rig::new();
    r.enter("10 DEF FNA(X)=X+1");
    r.enter("20 PRINT FNA(1)");
    r.enter("RUN");
    assert_eq!(r.exec(), " 2 \n");
    r.enter("RUN");
    assert_eq!(r.exec(), " 2 \n");
}

#[test]
fn test_shadow_restores_after_a_body_error() {
    let mut r = Rig::new();
    r.enter("10 DEF FNE(X)=X+Y(12)");
    r.enter("20 X=5");
    r.enter("30 PRINT FNE(1)");
    r.enter("RUN");
    assert!(r.exec().starts_with("?INDEX OUT OF BOUNDS IN 30"));
    r.enter("PRINT X");
    assert_eq!(r.exec(), " 5 \n");
}
