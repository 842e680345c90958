// File: tests/filter_sort_tests.rs
use chrono::NaiveDate;
use todotxt::filter::ActiveFilter;
use todotxt::model::{Priority, Task};
use todotxt::sort::{SortKey, SortSpec};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

fn tasks(lines: &[&str]) -> Vec<Task> {
    lines.iter().map(|l| Task::new(l)).collect()
}

fn sorted(order: &[&str], lines: &[&str]) -> Vec<usize> {
    let tasks = tasks(lines);
    let mut idx: Vec<usize> = (0..tasks.len()).collect();
    SortSpec::parse(order).sort(&tasks, &mut idx, today());
    idx
}

#[test]
fn test_default_filter_hides_only_hidden_and_blank() {
    let list = tasks(&["open", "x done", "", "   ", "secret h:1", "later t:2030-01-01"]);
    let shown = ActiveFilter::default().apply(&list, today());
    assert_eq!(shown, vec![0, 1, 5]);
}

#[test]
fn test_hide_completed_and_future() {
    let list = tasks(&["open", "x done", "later t:2030-01-01", "now t:2019-12-31"]);
    let filter = ActiveFilter {
        hide_completed: true,
        hide_future: true,
        ..Default::default()
    };
    assert_eq!(filter.apply(&list, today()), vec![0, 3]);

    let filter = ActiveFilter {
        hide_hidden: false,
        ..Default::default()
    };
    assert_eq!(filter.apply(&tasks(&["h:1"]), today()), vec![0]);
}

#[test]
fn test_priority_filter_and_inversion() {
    let list = tasks(&["(A) a", "(B) b", "c"]);
    let filter = ActiveFilter {
        priorities: vec![Priority::A, Priority::None],
        ..Default::default()
    };
    assert_eq!(filter.apply(&list, today()), vec![0, 2]);

    let filter = ActiveFilter {
        priorities: vec![Priority::A],
        priorities_not: true,
        ..Default::default()
    };
    assert_eq!(filter.apply(&list, today()), vec![1, 2]);
}

#[test]
fn test_list_and_tag_filters() {
    let list = tasks(&["a @work +proj", "b @home", "c", "d +proj"]);

    let filter = ActiveFilter {
        lists: vec!["work".into(), "-".into()],
        ..Default::default()
    };
    assert_eq!(filter.apply(&list, today()), vec![0, 2, 3]);

    let filter = ActiveFilter {
        tags: vec!["proj".into()],
        tags_not: true,
        ..Default::default()
    };
    assert_eq!(filter.apply(&list, today()), vec![1, 2]);

    let filter = ActiveFilter {
        lists: vec!["home".into()],
        tags: vec!["-".into()],
        ..Default::default()
    };
    assert_eq!(filter.apply(&list, today()), vec![1]);
}

#[test]
fn test_text_search_is_case_insensitive() {
    let list = tasks(&["Buy MILK", "call bob", "milkshake"]);
    let filter = ActiveFilter {
        search: "milk".into(),
        ..Default::default()
    };
    assert_eq!(filter.apply(&list, today()), vec![0, 2]);
}

#[test]
fn test_filter_survives_toml() {
    let filter = ActiveFilter {
        priorities: vec![Priority::B],
        lists: vec!["home".into()],
        search: "x".into(),
        ..Default::default()
    };
    let text = toml::to_string(&filter).unwrap();
    let back: ActiveFilter = toml::from_str(&text).unwrap();
    assert_eq!(back, filter);

    let partial: ActiveFilter = toml::from_str("hide_completed = true").unwrap();
    assert!(partial.hide_completed);
    assert!(partial.hide_hidden);
}

#[test]
fn test_sort_completed_then_priority() {
    let order = sorted(
        &["+!completed", "+!by_prio"],
        &["(B) b", "(A) a", "c", "x (A) done"],
    );
    assert_eq!(order, vec![1, 0, 2, 3]);
}

#[test]
fn test_sort_dates_put_missing_last() {
    let lines = ["a due:2020-01-02", "b", "c due:2020-01-01"];
    assert_eq!(sorted(&["+!by_due_date"], &lines), vec![2, 0, 1]);
    assert_eq!(sorted(&["-!by_due_date"], &lines), vec![1, 0, 2]);

    let lines = ["2020-01-02 a", "b", "2019-01-01 c"];
    assert_eq!(sorted(&["+!by_creation_date"], &lines), vec![2, 0, 1]);

    let lines = ["a t:2020-03-01", "b t:2020-02-01", "c"];
    assert_eq!(sorted(&["+!by_threshold_date"], &lines), vec![1, 0, 2]);
}

#[test]
fn test_sort_by_context_project_and_text() {
    let lines = ["a @work", "b", "c @home"];
    assert_eq!(sorted(&["+!by_context"], &lines), vec![2, 0, 1]);

    let lines = ["a +zeta", "b +alpha", "c"];
    assert_eq!(sorted(&["+!by_project"], &lines), vec![1, 0, 2]);

    let lines = ["x 2000-01-01 banana", "Apple", "cherry"];
    assert_eq!(sorted(&["+!alphabetical"], &lines), vec![1, 0, 2]);
}

#[test]
fn test_sort_future_last() {
    let lines = ["a t:2030-01-01", "b", "c t:2019-01-01"];
    assert_eq!(sorted(&["+!in_future"], &lines), vec![1, 2, 0]);
}

#[test]
fn test_file_order_breaks_ties() {
    assert_eq!(sorted(&["+!by_prio"], &["z", "y", "x"]), vec![0, 1, 2]);
    assert_eq!(sorted(&["-!file_order"], &["z", "y", "x"]), vec![2, 1, 0]);
    assert_eq!(sorted(&["+!bogus"], &["z", "y"]), vec![0, 1]);
    assert_eq!(sorted(&[], &["z", "y"]), vec![0, 1]);
}

#[test]
fn test_headers_follow_the_sort_key() {
    let t = Task::new("(B) a @work @home +proj due:2020-01-02 t:2019-12-01");
    assert_eq!(SortKey::ByContext.header(&t, "none"), "home");
    assert_eq!(SortKey::ByProject.header(&t, "none"), "proj");
    assert_eq!(SortKey::ByDueDate.header(&t, "none"), "2020-01-02");
    assert_eq!(SortKey::ByThresholdDate.header(&t, "none"), "2019-12-01");
    assert_eq!(SortKey::ByPrio.header(&t, "none"), "B");
    assert_eq!(SortKey::Alphabetical.header(&t, "none"), "");

    let bare = Task::new("bare");
    assert_eq!(SortKey::ByContext.header(&bare, "none"), "none");
    assert_eq!(SortKey::ByDueDate.header(&bare, "none"), "none");
    assert_eq!(SortKey::ByPrio.header(&bare, "none"), "-");
}

#[test]
fn test_grouping_sorted_tasks() {
    let list = tasks(&["c @work", "a @home", "b", "d @work"]);
    let spec = SortSpec::parse(&["+!by_context"]);
    let mut idx: Vec<usize> = (0..list.len()).collect();
    spec.sort(&list, &mut idx, today());
    assert_eq!(idx, vec![1, 0, 3, 2]);

    let groups = spec.group(&list, &idx, "none");
    let summary: Vec<(&str, Vec<usize>)> = groups
        .iter()
        .map(|g| (g.title.as_str(), g.members.clone()))
        .collect();
    assert_eq!(
        summary,
        vec![("home", vec![1]), ("work", vec![0, 3]), ("none", vec![2])]
    );

    let flat = SortSpec::parse(&["+!alphabetical"]).group(&list, &idx, "none");
    assert_eq!(flat.len(), 1);
    assert_eq!(flat[0].title, "");
    assert_eq!(flat[0].members, idx);
    assert!(SortSpec::default().group(&list, &[], "none").is_empty());
}
