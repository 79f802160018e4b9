mod common;

use common::Rig;

#[test]
fn test_read_mixed_constants() {
    let mut r = Rig::new();
    r.enter(r#"10 DATA 5,"hello",foo+bar"#);
    r.enter("20 READ A,B$,C$");
    r.enter("30 PRINT A;B$;C$");
    r.enter("RUN");
    assert_eq!(r.exec(), " 5 hellofoo+bar\n");
}

#[test]
fn test_number_coerces_into_a_string_target() {
    let mut r = Rig::new();
    r.enter("10 DATA 7");
    r.enter("20 READ A$");
    r.enter("30 PRINT A$");
    r.enter("RUN");
    assert_eq!(r.exec(), "7\n");
}

#[test]
fn test_text_into_a_numeric_target_is_a_mismatch() {
    let mut r = Rig::new();
    r.enter("10 DATA X");
    r.enter("20 READ A");
    r.enter("RUN");
    assert_eq!(r.exec(), "?TYPE MISMATCH IN 20:5\n");
}

#[test]
fn test_out_of_data() {
    let mut r = Rig::new();
    r.enter("10 DATA 1");
    r.enter("20 READ A,B");
    r.enter("RUN");
    assert_eq!(r.exec(), "?OUT OF DATA IN 20:7\n");
}

#[test]
fn test_data_spans_lines_in_order() {
    let mut r = Rig::new();
    r.enter("10 DATA 1,2");
    r.enter("30 DATA 3");
    r.enter("20 READ A,B,C");
    r.enter("40 PRINT A;B;C");
    r.enter("RUN");
    assert_eq!(r.exec(), " 1  2  3 \n");
}

#[test]
fn test_restore_rewinds() {
    let mut r = Rig::new();
    r.enter("10 DATA 1,2");
    r.enter("20 READ A,B");
    r.enter("30 RESTORE");
    r.enter("40 READ C");
    r.enter("50 PRINT A;B;C");
    r.enter("RUN");
    assert_eq!(r.exec(), " 1  2  1 \n");
}

#[test]
fn test_restore_to_a_line() {
    let mut r = Rig::new();
    r.enter("10 DATA 1");
    r.enter("20 DATA 2");
    r.enter("30 RESTORE 20");
    r.enter("40 READ A");
    r.enter("50 PRINT A");
    r.enter("RUN");
    assert_eq!(r.exec(), " 2 \n");
}

#[test]
fn test_restore_to_an_unknown_line() {
    let mut r = Rig::new();
    r.enter("10 DATA 1");
    r.enter("20 RESTORE 99");
    r.enter("RUN");
    assert!(r.exec().starts_with("?UNKNOWN LINE IN 20"));
}

#[test]
fn test_restore_without_data_is_a_no_op() {
    let mut r = Rig::new();
    r.enter("10 RESTORE");
    r.enter("20 PRINT 1");
    r.enter("RUN");
    assert_eq!(r.exec(), " 1 \n");
}

#[test]
fn test_quoted_items_keep_colons_and_commas() {
    let mut r = Rig::new();
    r.enter(r#"10 DATA "a:b",c:PRINT "after""#);
    r.enter("20 READ A$,B$");
    r.enter("30 PRINT A$;B$");
    r.enter("RUN");
    assert_eq!(r.exec(), "after\na:bc\n");
}

#[test]
fn test_rerun_rewinds_the_data_cursor() {
    let mut r = Rig::new();
    r.enter("10 DATA 9");
    r.enter("20 READ A");
    r.enter("30 PRINT A");
    r.enter("RUN");
    assert_eq!(r.exec(), " 9 \n");
    r.enter("RUN");
    assert_eq!(r.exec(), " 9 \n");
}
