mod common;

use common::Rig;

#[test]
fn test_first_use_dimensions_eleven_elements() {
    let mut r = Rig::new();
    r.enter("X(3)=7");
    r.exec();
    r.enter("PRINT X(3);X(10)");
    assert_eq!(r.exec(), " 7  0 \n");
    r.enter("PRINT X(12)");
    assert_eq!(r.exec(), "?INDEX OUT OF BOUNDS\n");
}

#[test]
fn test_redimensioning_is_an_error() {
    let mut r = Rig::new();
    r.enter("X(3)=7");
    r.exec();
    r.enter("DIM X(20)");
    assert_eq!(r.exec(), "?REDIMENSIONED ARRAY\n");
}

#[test]
fn test_explicit_dim_sets_the_highest_index() {
    let mut r = Rig::new();
    r.enter("DIM Y(20)");
    r.exec();
    r.enter("Y(20)=1:PRINT Y(20)");
    assert_eq!(r.exec(), " 1 \n");
    r.enter("Y(21)=1");
    assert_eq!(r.exec(), "?INDEX OUT OF BOUNDS\n");
}

#[test]
fn test_multiple_subscripts_require_dim() {
    let mut r = Rig::new();
    r.enter("M(1,2)=3");
    assert_eq!(r.exec(), "?UNDIMENSIONED ARRAY\n");
    r.enter("DIM M(2,3)");
    r.exec();
    r.enter("M(2,3)=5:PRINT M(2,3);M(0,0)");
    assert_eq!(r.exec(), " 5  0 \n");
    r.enter("PRINT M(1)");
    assert_eq!(r.exec(), "?ILLEGAL INDEX\n");
}

#[test]
fn test_negative_subscript() {
    let mut r = Rig::new();
    r.enter("DIM Z(-1)");
    assert_eq!(r.exec(), "?INDEX OUT OF BOUNDS\n");
}

#[test]
fn test_dim_too_large_to_address() {
    let mut r = Rig::new();
    r.enter("DIM A(70000,70000,70000,70000)");
    assert_eq!(r.exec(), "?INDEX OUT OF BOUNDS\n");
}

#[test]
fn test_string_array() {
    let mut r = Rig::new();
    r.enter(r#"A$(1)="hi":PRINT A$(1);A$(0)"#);
    assert_eq!(r.exec(), "hi\n");
}

#[test]
fn test_scalar_and_array_namespaces_are_separate() {
    let mut r = Rig::new();
    r.enter("X=1:X(0)=2:PRINT X;X(0)");
    assert_eq!(r.exec(), " 1  2 \n");
}

#[test]
fn test_clear_frees_dimensions() {
    let mut r = Rig::new();
    r.enter("DIM X(3)");
    r.exec();
    r.enter("CLEAR");
    r.exec();
    r.enter("DIM X(3)");
    assert_eq!(r.exec(), "");
}

#[test]
fn test_subscripts_truncate() {
    let mut r = Rig::new();
    r.enter("X(2.9)=5:PRINT X(2)");
    assert_eq!(r.exec(), " 5 \n");
}
