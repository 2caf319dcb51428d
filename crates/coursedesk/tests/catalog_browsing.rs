use coursedesk::api::CourseDeskApi;
use coursedesk::commands::ListRequest;
use coursedesk::list_view::{FetchStatus, ListView};
use coursedesk::model::{Chapter, EntityKind, Exercise, Level, NewChapter, Subject};
use coursedesk::navigation::Navigator;
use coursedesk::store::memory::InMemoryStore;
use coursedesk::store::seed::{demo_catalog, demo_id};
use coursedesk::store::Catalog;
use coursedesk::table::{ActiveFilter, ExportFormat};
use std::fs;
use tempfile::TempDir;

fn api_from_file() -> (TempDir, CourseDeskApi<InMemoryStore>) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(&path, demo_catalog().to_json().unwrap()).unwrap();

    let catalog = Catalog::from_json_file(&path).unwrap();
    (dir, CourseDeskApi::new(InMemoryStore::from_catalog(catalog)))
}

#[test]
fn drill_down_from_levels_to_exercises() {
    let (_dir, api) = api_from_file();
    let mut nav = Navigator::new();

    let mut levels: ListView<Level> = ListView::new(nav.parent());
    api.refresh(&mut levels);
    let grade_10 = levels.rows()[0].clone();
    assert!(nav.open(EntityKind::Level, grade_10.id, &grade_10.name).unwrap().resets_list());

    let mut subjects: ListView<Subject> = ListView::new(nav.parent());
    subjects.on_sort_change(Some("coefficient".into()), coursedesk::table::SortDirection::Desc);
    api.refresh(&mut subjects);
    let maths = subjects.rows()[0].clone();
    assert_eq!(maths.name, "Mathematics");
    nav.open(EntityKind::Subject, maths.id, &maths.name).unwrap();

    let mut chapters: ListView<Chapter> = ListView::new(nav.parent());
    api.refresh(&mut chapters);
    let algebra = chapters.rows()[0].clone();
    assert_eq!(algebra.title, "Algebra");
    nav.open(EntityKind::Chapter, algebra.id, &algebra.title).unwrap();

    assert_eq!(nav.list_kind(), EntityKind::Exercise);
    assert_eq!(nav.to_string(), "Levels › Grade 10 › Mathematics › Algebra");

    let mut exercises: ListView<Exercise> = ListView::new(nav.parent());
    exercises.on_filter_change(vec![ActiveFilter::equals("difficulty", "hard")]);
    api.refresh(&mut exercises);
    assert_eq!(exercises.status(), &FetchStatus::Ready);
    assert!(exercises
        .rows()
        .iter()
        .all(|e| e.difficulty == coursedesk::model::Difficulty::Hard));

    assert!(nav.jump_to(1).resets_list());
    assert_eq!(nav.list_kind(), EntityKind::Subject);
}

#[test]
fn edits_show_up_in_the_next_fetch() {
    let (_dir, mut api) = api_from_file();
    let maths = demo_id(EntityKind::Subject, 1);

    let mut view: ListView<Chapter> = ListView::new(Some(maths));
    api.refresh(&mut view);
    assert_eq!(view.pagination().total, 4);

    api.create(NewChapter {
        subject_id: maths,
        title: "Trigonometry".into(),
        description: "Angles and the unit circle".into(),
        order: 5,
    })
    .unwrap();

    view.on_search_change("trigo");
    api.refresh(&mut view);
    assert_eq!(view.pagination().total, 1);
    assert_eq!(view.rows()[0].title, "Trigonometry");

    let removed = api.delete::<Subject>(maths).unwrap();
    assert_eq!(removed.messages.len(), 2);
    api.refresh(&mut view);
    assert!(matches!(view.status(), FetchStatus::Error(_)));
}

#[test]
fn export_covers_every_page() {
    let (_dir, api) = api_from_file();
    let request = ListRequest::under(demo_id(EntityKind::Chapter, 1));
    let result = api
        .export::<Exercise, _>(&request, &["title", "difficulty"], ExportFormat::Json)
        .unwrap();

    let rows: serde_json::Value = serde_json::from_str(result.exported.as_deref().unwrap()).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 25);
}
