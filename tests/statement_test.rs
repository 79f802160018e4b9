mod common;

use common::Rig;

#[test]
fn test_print_formatting() {
    let mut r = Rig::new();
    r.enter(r#"PRINT "A";1;-2"#);
    assert_eq!(r.exec(), "A 1 -2 \n");
    r.enter("PRINT 1,2");
    assert_eq!(r.exec(), " 1 \t 2 \n");
    r.enter("PRINT");
    assert_eq!(r.exec(), "\n");
    r.enter("PRINT 1;:PRINT 2");
    assert_eq!(r.exec(), " 1  2 \n");
}

#[test]
fn test_assignment_with_and_without_let() {
    let mut r = Rig::new();
    r.enter("LET A=5");
    r.exec();
    r.enter("B=A*2");
    r.exec();
    r.enter("PRINT A;B");
    assert_eq!(r.exec(), " 5  10 \n");
    r.enter(r#"A$="HI""#);
    r.exec();
    r.enter("PRINT A$");
    assert_eq!(r.exec(), "HI\n");
}

#[test]
fn test_integer_suffix_truncates() {
    let mut r = Rig::new();
    r.enter("I%=2.7:PRINT I%");
    assert_eq!(r.exec(), " 2 \n");
}

#[test]
fn test_assignment_type_mismatch() {
    let mut r = Rig::new();
    r.enter(r#"A="X""#);
    assert_eq!(r.exec(), "?TYPE MISMATCH\n");
}

#[test]
fn test_run_clears_variables() {
    let mut r = Rig::new();
    r.enter("A=5");
    r.exec();
    r.enter("10 PRINT A");
    r.enter("RUN");
    assert_eq!(r.exec(), " 0 \n");
}

#[test]
fn test_gosub_return_nesting() {
    let mut r = Rig::new();
    r.enter("10 GOSUB 100");
    r.enter(r#"20 PRINT "BACK""#);
    r.enter("30 END");
    r.enter("100 GOSUB 200");
    r.enter("110 RETURN");
    r.enter(r#"200 PRINT "DEEP""#);
    r.enter("210 RETURN");
    r.enter("RUN");
    assert_eq!(r.exec(), "DEEP\nBACK\n");
}

#[test]
fn test_return_without_gosub() {
    let mut r = Rig::new();
    r.enter("RETURN");
    assert_eq!(r.exec(), "?UNEXPECTED RETURN\n");
}

#[test]
fn test_on_goto_selects_one_based() {
    let mut r = Rig::new();
    r.enter("10 ON 2 GOTO 100,200");
    r.enter(r#"20 PRINT "FELL""#);
    r.enter("30 END");
    r.enter("100 PRINT 1");
    r.enter("110 END");
    r.enter("200 PRINT 2");
    r.enter("RUN");
    assert_eq!(r.exec(), " 2 \n");
}

#[test]
fn test_on_goto_zero_falls_through() {
    let mut r = Rig::new();
    r.enter("10 ON 0 GOTO 100,200");
    r.enter(r#"20 PRINT "FELL""#);
    r.enter("30 END");
    r.enter("100 PRINT 1");
    r.enter("RUN");
    assert_eq!(r.exec(), "FELL\n");
    r.enter("10 ON 3 GOTO 100,200");
    r.enter("RUN");
    assert_eq!(r.exec(), "FELL\n");
}

#[test]
fn test_on_negative_selector() {
    let mut r = Rig::new();
    r.enter("10 ON -1 GOTO 10");
    r.enter("RUN");
    assert!(r.exec().starts_with("?ILLEGAL VALUE IN 10"));
}

#[test]
fn test_on_gosub_returns_past_the_on() {
    let mut r = Rig::new();
    r.enter("10 ON 1 GOSUB 100");
    r.enter(r#"20 PRINT "AFTER""#);
    r.enter("30 END");
    r.enter(r#"100 PRINT "SUB""#);
    r.enter("110 RETURN");
    r.enter("RUN");
    assert_eq!(r.exec(), "SUB\nAFTER\n");
}

#[test]
fn test_goto_unknown_line() {
    let mut r = Rig::new();
    r.enter("GOTO 99");
    assert_eq!(r.exec(), "?UNKNOWN LINE\n");
    r.enter("10 GOTO 99");
    r.enter("RUN");
    assert_eq!(r.exec(), "?UNKNOWN LINE IN 10:0\n");
}

#[test]
fn test_stop_breaks_and_cont_resumes() {
    let mut r = Rig::new();
    r.enter("10 PRINT 1");
    r.enter("20 STOP");
    r.enter("30 PRINT 2");
    r.enter("RUN");
    assert_eq!(r.exec(), " 1 \n?BREAK IN 20\n");
    r.enter("CONT");
    assert_eq!(r.exec(), " 2 \n");
}

#[test]
fn test_end_is_silent_and_continuable() {
    let mut r = Rig::new();
    r.enter("10 PRINT 1");
    r.enter("20 END");
    r.enter("30 PRINT 2");
    r.enter("RUN");
    assert_eq!(r.exec(), " 1 \n");
    r.enter("CONT");
    assert_eq!(r.exec(), " 2 \n");
}

#[test]
fn test_cont_without_continuation() {
    let mut r = Rig::new();
    r.enter("CONT");
    assert_eq!(r.exec(), "?UNSUPPORTED OPERATION; CAN'T CONTINUE\n");
}

#[test]
fn test_editing_invalidates_cont() {
    let mut r = Rig::new();
    r.enter("10 STOP");
    r.enter("RUN");
    assert_eq!(r.exec(), "?BREAK IN 10\n");
    r.enter("15 PRINT 9");
    r.enter("CONT");
    assert_eq!(r.exec(), "?UNSUPPORTED OPERATION; CAN'T CONTINUE\n");
}

#[test]
fn test_new_erases_everything() {
    let mut r = Rig::new();
    r.enter("10 PRINT 1");
    r.enter("A=5");
    r.exec();
    r.enter("NEW");
    r.exec();
    r.enter("LIST");
    assert_eq!(r.exec(), "");
    r.enter("PRINT A");
    assert_eq!(r.exec(), " 0 \n");
    r.enter("RUN");
    assert_eq!(r.exec(), "");
}

#[test]
fn test_clear_keeps_the_program() {
    let mut r = Rig::new();
    r.enter("10 PRINT 7");
    r.enter("A=5");
    r.exec();
    r.enter("CLEAR");
    r.exec();
    r.enter("PRINT A");
    assert_eq!(r.exec(), " 0 \n");
    r.enter("RUN");
    assert_eq!(r.exec(), " 7 \n");
}

#[test]
fn test_list_ranges() {
    let mut r = Rig::new();
    r.enter(r#"10 print "hi""#);
    r.enter("20 goto 10");
    r.enter("30 end");
    r.enter("LIST");
    assert_eq!(r.exec(), "10 PRINT \"hi\"\n20 GOTO 10\n30 END\n");
    r.enter("LIST 20");
    assert_eq!(r.exec(), "20 GOTO 10\n");
    r.enter("LIST 20-");
    assert_eq!(r.exec(), "20 GOTO 10\n30 END\n");
    r.enter("LIST -20");
    assert_eq!(r.exec(), "10 PRINT \"hi\"\n20 GOTO 10\n");
    r.enter("LIST 10-20");
    assert_eq!(r.exec(), "10 PRINT \"hi\"\n20 GOTO 10\n");
}

#[test]
fn test_run_at_line() {
    let mut r = Rig::new();
    r.enter("10 PRINT 1");
    r.enter("20 PRINT 2");
    r.enter("RUN 20");
    assert_eq!(r.exec(), " 2 \n");
    r.enter("RUN 15");
    assert_eq!(r.exec(), "?UNKNOWN LINE\n");
}

#[test]
fn test_entering_a_bare_number_deletes_the_line() {
    let mut r = Rig::new();
    r.enter("10 PRINT 1");
    r.enter("20 PRINT 2");
    r.enter("20");
    r.enter("LIST");
    assert_eq!(r.exec(), "10 PRINT 1\n");
    r.enter("RUN");
    assert_eq!(r.exec(), " 1 \n");
}

#[test]
fn test_rem_swallows_the_rest_of_the_line() {
    let mut r = Rig::new();
    r.enter("10 PRINT 1:REM ignored:PRINT 2");
    r.enter("20 PRINT 3");
    r.enter("RUN");
    assert_eq!(r.exec(), " 1 \n 3 \n");
}

#[test]
fn test_stored_parse_error_reports_when_reached() {
    let mut r = Rig::new();
    r.enter("10 PRINT )");
    r.enter("RUN");
    assert_eq!(r.exec(), "?SYNTAX ERROR IN 10:6; EXPECTED EXPRESSION\n");
}

#[test]
fn test_direct_mode_loop() {
    let mut r = Rig::new();
    r.enter("FOR I=1 TO 3:PRINT I;:NEXT:PRINT");
    assert_eq!(r.exec(), " 1  2  3 \n");
}
