use super::ListSchema;
use crate::model::Exercise;
use crate::table::{
    ColumnOption, FieldId, FieldValue, FilterOption, SortDirection, Tabular, ACTIONS_COLUMN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseField {
    Id,
    ChapterId,
    Title,
    Description,
    Difficulty,
    Kind,
    Points,
    Status,
    PublishDate,
    CreatedAt,
}

impl FieldId for ExerciseField {
    fn all() -> &'static [Self] {
        &[
            ExerciseField::Id,
            ExerciseField::ChapterId,
            ExerciseField::Title,
            ExerciseField::Description,
            ExerciseField::Difficulty,
            ExerciseField::Kind,
            ExerciseField::Points,
            ExerciseField::Status,
            ExerciseField::PublishDate,
            ExerciseField::CreatedAt,
        ]
    }

    fn id(self) -> &'static str {
        match self {
            ExerciseField::Id => "id",
            ExerciseField::ChapterId => "chapterId",
            ExerciseField::Title => "title",
            ExerciseField::Description => "description",
            ExerciseField::Difficulty => "difficulty",
            ExerciseField::Kind => "kind",
            ExerciseField::Points => "points",
            ExerciseField::Status => "status",
            ExerciseField::PublishDate => "publishDate",
            ExerciseField::CreatedAt => "createdAt",
        }
    }
}

impl Tabular for Exercise {
    type Field = ExerciseField;

    fn field(&self, field: ExerciseField) -> FieldValue {
        match field {
            ExerciseField::Id => FieldValue::Text(self.id.to_string()),
            ExerciseField::ChapterId => FieldValue::Text(self.chapter_id.to_string()),
            ExerciseField::Title => FieldValue::text(&self.title),
            ExerciseField::Description => FieldValue::text(&self.description),
            ExerciseField::Difficulty => FieldValue::text(self.difficulty.as_str()),
            ExerciseField::Kind => FieldValue::text(self.kind.as_str()),
            ExerciseField::Points => self.points.into(),
            ExerciseField::Status => FieldValue::text(self.status.as_str()),
            ExerciseField::PublishDate => FieldValue::opt_date(self.publish_date),
            ExerciseField::CreatedAt => self.created_at.into(),
        }
    }

    fn search_fields() -> &'static [ExerciseField] {
        &[ExerciseField::Title, ExerciseField::Description]
    }
}

pub(super) const FILTERS: &[FilterOption] = &[
    FilterOption::text("title", "Title"),
    FilterOption::text("description", "Description"),
    FilterOption::select("difficulty", "Difficulty", &["easy", "medium", "hard"]),
    FilterOption::select("kind", "Type", &["quiz", "problem", "essay", "practical"]),
    FilterOption::select("status", "Status", &["draft", "published", "archived"]),
    FilterOption::number("points", "Points"),
    FilterOption::date("publishDate", "Publish date"),
];

pub(super) const COLUMNS: &[ColumnOption] = &[
    ColumnOption::new("title", "Title").required(),
    ColumnOption::new("description", "Description"),
    ColumnOption::new("difficulty", "Difficulty"),
    ColumnOption::new("kind", "Type"),
    ColumnOption::new("points", "Points"),
    ColumnOption::new("status", "Status"),
    ColumnOption::new("publishDate", "Published"),
    ACTIONS_COLUMN,
];

impl ListSchema for Exercise {
    fn filter_options() -> &'static [FilterOption] {
        FILTERS
    }

    fn column_options() -> &'static [ColumnOption] {
        COLUMNS
    }

    /// Latest first, unpublished drafts at the end.
    fn default_sort() -> (&'static str, SortDirection) {
        ("publishDate", SortDirection::Desc)
    }
}
