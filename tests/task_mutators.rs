// File: tests/task_mutators.rs
use chrono::NaiveDate;
use todotxt::model::{Priority, Task, TaskError};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_set_priority_respects_completion_prefix() {
    let mut t = Task::new("x 2012-01-01 Test");
    t.set_priority(Priority::A);
    assert_eq!(t.text(), "x 2012-01-01 (A) Test");

    let mut t = Task::new("(A) Test");
    t.set_priority(Priority::B);
    assert_eq!(t.text(), "(B) Test");
    t.set_priority(Priority::None);
    assert_eq!(t.text(), "Test");
    assert_eq!(t.priority(), Priority::None);
}

#[test]
fn test_priority_precedence_through_completion() {
    let mut t = Task::new("(A) Test");
    assert!(t.mark_complete(date("2010-01-01")).is_none());
    t.set_priority(Priority::B);
    t.mark_incomplete();
    assert_eq!(t.priority(), Priority::B);
    assert_eq!(t.text(), "(B) Test");
}

#[test]
fn test_completion_round_trip() {
    for line in [
        "(A) Test due:2013-01-01",
        "2012-05-05 Call mom @phone",
        "Plain",
        "(C) 2012-05-05 Both",
    ] {
        let mut t = Task::new(line);
        t.mark_complete(date("2013-02-02"));
        assert!(t.is_completed());
        assert_eq!(t.completion_date(), Some("2013-02-02"));
        t.mark_incomplete();
        assert_eq!(t.text(), line);
    }
}

#[test]
fn test_completion_keeps_fields() {
    let mut t = Task::new("(A) 2012-05-05 Test @home");
    t.mark_complete(date("2013-02-02"));
    assert_eq!(t.text(), "x 2013-02-02 (A) 2012-05-05 Test @home");
    assert_eq!(t.priority(), Priority::A);
    assert_eq!(t.create_date(), Some("2012-05-05"));
    assert_eq!(t.completion_date_value(), Some(date("2013-02-02")));
}

#[test]
fn test_completing_twice_is_a_noop() {
    let mut t = Task::new("x 2000-01-01 Done rec:1d");
    let before = t.clone();
    assert!(t.mark_complete(date("2013-02-02")).is_none());
    assert_eq!(t, before);
}

#[test]
fn test_mark_incomplete_on_open_task_is_identity() {
    let mut t = Task::new("(A) 2000-01-01 Test +x");
    let before = t.clone();
    t.mark_incomplete();
    assert_eq!(t.tokens(), before.tokens());
}

#[test]
fn test_mark_incomplete_without_completion_date() {
    let mut t = Task::new("x Test");
    t.mark_incomplete();
    assert_eq!(t.text(), "Test");
}

#[test]
fn test_mark_incomplete_reclassifies_the_rest() {
    let line = "2000-01-01 (A) Test";
    let mut t = Task::new(line);
    assert_eq!(t.priority(), Priority::None);

    t.mark_complete(date("2010-01-01"));
    assert_eq!(t.priority(), Priority::A);
    t.mark_incomplete();

    assert_eq!(t.text(), line);
    assert_eq!(t.priority(), Priority::None);
    assert_eq!(t, Task::new(line));
}

#[test]
fn test_create_date_refused_after_bare_completion_marker() {
    let mut t = Task::new("x Test");
    assert_eq!(
        t.set_create_date(Some(date("2013-01-01"))),
        Err(TaskError::CreateDateAfterBareCompletion("x Test".into()))
    );
    assert_eq!(t.text(), "x Test");
    assert_eq!(t.create_date(), None);
    assert_eq!(t.completion_date(), None);

    // A priority marker in between keeps the date unambiguous.
    let mut t = Task::new("x (A) Test");
    t.set_create_date(Some(date("2013-01-01"))).unwrap();
    assert_eq!(t.text(), "x (A) 2013-01-01 Test");
    let reloaded = Task::new(&t.text());
    assert_eq!(reloaded.create_date(), Some("2013-01-01"));
    assert_eq!(reloaded.completion_date(), None);

    assert_eq!(Task::with_create_date("x Test", Some(date("2013-01-01"))).text(), "x Test");
}

#[test]
fn test_set_create_date() {
    let mut t = Task::new("(A) Test");
    t.set_create_date(Some(date("2013-01-01"))).unwrap();
    assert_eq!(t.text(), "(A) 2013-01-01 Test");
    t.set_create_date(Some(date("2014-02-02"))).unwrap();
    assert_eq!(t.text(), "(A) 2014-02-02 Test");
    t.set_create_date(None).unwrap();
    assert_eq!(t.text(), "(A) Test");

    let mut t = Task::new("x 2012-01-01 Done");
    t.set_create_date(Some(date("2011-01-01"))).unwrap();
    assert_eq!(t.text(), "x 2012-01-01 2011-01-01 Done");
    assert_eq!(t.create_date(), Some("2011-01-01"));
}

#[test]
fn test_due_date_setter_is_idempotent() {
    let mut t = Task::new("Test");
    t.set_due_date("2013-01-01").unwrap();
    assert_eq!(t.text(), "Test due:2013-01-01");
    t.set_due_date("2013-01-01").unwrap();
    assert_eq!(t.text(), "Test due:2013-01-01");
    t.set_due_date("").unwrap();
    assert_eq!(t.text(), "Test");
    t.set_due_date("").unwrap();
    assert_eq!(t.text(), "Test");
}

#[test]
fn test_due_date_replaced_in_place() {
    let mut t = Task::new("Test due:2013-01-01 @home");
    t.set_due_date("2014-04-04").unwrap();
    assert_eq!(t.text(), "Test due:2014-04-04 @home");
    t.set_due_date("").unwrap();
    assert_eq!(t.text(), "Test @home");

    let mut t = Task::new("due:2013-01-01 Test");
    t.set_due_date("").unwrap();
    assert_eq!(t.text(), "Test");
}

#[test]
fn test_threshold_removal_after_prefix() {
    let mut t = Task::new("(A) t:2013-01-01 Test");
    t.set_threshold_date("").unwrap();
    assert_eq!(t.text(), "(A) Test");

    let mut t = Task::new("Test");
    t.set_threshold_date("2013-01-01").unwrap();
    assert_eq!(t.text(), "Test t:2013-01-01");
    assert_eq!(t.threshold_date_value(), Some(date("2013-01-01")));
}

#[test]
fn test_bad_dates_are_rejected_at_the_boundary() {
    let mut t = Task::new("Test due:2013-01-01");
    assert_eq!(
        t.set_due_date("tomorrow"),
        Err(TaskError::InvalidDate("tomorrow".into()))
    );
    assert_eq!(t.text(), "Test due:2013-01-01");
    assert!(t.set_threshold_date("2013-1-1").is_err());
}

#[test]
fn test_in_future() {
    let today = date("2020-01-01");
    assert!(Task::new("Test t:2020-01-02").in_future(today));
    assert!(!Task::new("Test t:2020-01-01").in_future(today));
    assert!(!Task::new("Test t:2013-11-31").in_future(today));
    assert!(!Task::new("Test").in_future(today));
}

#[test]
fn test_remove_list() {
    let mut t = Task::new("Milk @@errands");
    t.remove_list("errands");
    assert_eq!(t.text(), "Milk @@errands");
    t.remove_list("@errands");
    assert_eq!(t.text(), "Milk");

    let mut t = Task::new("@errands Buy @home milk @errands");
    t.remove_list("errands");
    assert_eq!(t.text(), "Buy @home milk");
    assert!(!t.lists().contains("errands"));
}

#[test]
fn test_remove_tag() {
    let mut t = Task::new("+supermarket Milk +supermarket");
    t.remove_tag("supermarket");
    assert_eq!(t.text(), "Milk");

    let mut t = Task::new("Milk +supermarketing");
    t.remove_tag("supermarket");
    assert_eq!(t.text(), "Milk +supermarketing");
}

#[test]
fn test_add_list_and_tag() {
    let mut t = Task::new("Test");
    t.add_list("home").unwrap();
    t.add_list("home").unwrap();
    t.add_tag("proj").unwrap();
    assert_eq!(t.text(), "Test @home +proj");
    assert_eq!(
        t.add_list("two words"),
        Err(TaskError::InvalidName("two words".into()))
    );
    assert!(t.add_tag("").is_err());
    assert_eq!(t.text(), "Test @home +proj");
}

#[test]
fn test_append_and_delete() {
    let mut t = Task::new("");
    t.append("first");
    assert_eq!(t.text(), "first");
    t.append("due:2013-01-01");
    assert_eq!(t.due_date(), Some("2013-01-01"));
    t.delete();
    assert_eq!(t.text(), "");
    assert!(t.tokens().is_empty());
}

#[test]
fn test_defer_by_spec() {
    let mut t = Task::new("Test due:2014-01-31");
    t.defer_due_date("1m", None);
    assert_eq!(t.due_date(), Some("2014-02-28"));
    t.defer_due_date("3d", Some(date("2000-01-01")));
    assert_eq!(t.due_date(), Some("2000-01-04"));
    t.defer_due_date("2020-02-02", None);
    assert_eq!(t.due_date(), Some("2020-02-02"));
    t.defer_due_date("garbage", None);
    assert_eq!(t.due_date(), Some("2020-02-02"));
    t.defer_due_date("", None);
    assert_eq!(t.text(), "Test");

    let mut t = Task::new("Test");
    t.defer_threshold_date("1w", None);
    assert_eq!(t.text(), "Test");
    t.defer_threshold_date("1w", Some(date("2000-01-01")));
    assert_eq!(t.text(), "Test t:2000-01-08");
}
