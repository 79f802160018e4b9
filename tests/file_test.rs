mod common;

use common::Rig;

#[test]
fn test_save_and_load_round_trip() {
    let mut r = Rig::new();
    r.enter(r#"10 print "hi""#);
    r.enter(r#"SAVE "P""#);
    r.exec();
    assert_eq!(
        r.files.borrow().get("P").map(String::as_str),
        Some("10 PRINT \"hi\"\n")
    );
    r.enter("NEW");
    r.exec();
    r.enter(r#"LOAD "P""#);
    assert_eq!(r.exec(), "");
    r.enter("LIST");
    assert_eq!(r.exec(), "10 PRINT \"hi\"\n");
    r.enter("RUN");
    assert_eq!(r.exec(), "hi\n");
}

#[test]
fn test_load_then_run_on_one_line() {
    let mut r = Rig::new();
    r.files
        .borrow_mut()
        .insert("P".to_string(), "10 PRINT 1\n".to_string());
    r.enter(r#"LOAD "P":RUN"#);
    assert_eq!(r.exec(), " 1 \n");
}

#[test]
fn test_load_missing_file() {
    let mut r = Rig::new();
    r.enter(r#"LOAD "NOPE""#);
    assert_eq!(r.exec(), "?UNSUPPORTED OPERATION; FILE NOT FOUND\n");
}

#[test]
fn test_load_rejects_unnumbered_lines() {
    let mut r = Rig::new();
    r.files
        .borrow_mut()
        .insert("BAD".to_string(), "PRINT 1\n".to_string());
    r.enter(r#"LOAD "BAD""#);
    assert_eq!(r.exec(), "?SYNTAX ERROR; MISSING LINE NUMBER\n");
}

#[test]
fn test_load_inside_a_program_halts_the_run() {
    let mut r = Rig::new();
    r.files
        .borrow_mut()
        .insert("SUB".to_string(), "10 PRINT 5\n".to_string());
    r.enter(r#"10 LOAD "SUB""#);
    r.enter("20 PRINT 9");
    r.enter("RUN");
    assert_eq!(r.exec(), "");
    r.enter("RUN");
    assert_eq!(r.exec(), " 5 \n");
}

#[test]
fn test_catalog_lists_sorted_names() {
    let mut r = Rig::new();
    r.files.borrow_mut().insert("B".to_string(), String::new());
    r.files.borrow_mut().insert("A".to_string(), String::new());
    r.enter("CATALOG");
    assert_eq!(r.exec(), "A\nB\n");
}

#[test]
fn test_scratch_removes_a_file() {
    let mut r = Rig::new();
    r.files
        .borrow_mut()
        .insert("P".to_string(), "10 END\n".to_string());
    r.enter(r#"SCRATCH "P""#);
    assert_eq!(r.exec(), "");
    r.enter(r#"LOAD "P""#);
    assert_eq!(r.exec(), "?UNSUPPORTED OPERATION; FILE NOT FOUND\n");
}

#[test]
fn test_rename_and_copy() {
    let mut r = Rig::new();
    r.files
        .borrow_mut()
        .insert("P".to_string(), "10 END\n".to_string());
    r.enter(r#"RENAME "P","Q""#);
    assert_eq!(r.exec(), "");
    assert!(r.files.borrow().get("P").is_none());
    assert!(r.files.borrow().get("Q").is_some());
    r.enter(r#"COPY "Q","R""#);
    assert_eq!(r.exec(), "");
    assert!(r.files.borrow().get("Q").is_some());
    assert!(r.files.borrow().get("R").is_some());
}

#[test]
fn test_chdir_is_accepted() {
    let mut r = Rig::new();
    r.enter(r#"CHDIR "ANYWHERE""#);
    assert_eq!(r.exec(), "");
}
