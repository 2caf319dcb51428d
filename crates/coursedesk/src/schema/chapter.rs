use super::ListSchema;
use crate::model::Chapter;
use crate::table::{
    ColumnOption, FieldId, FieldValue, FilterOption, SortDirection, Tabular, ACTIONS_COLUMN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterField {
    Id,
    SubjectId,
    Title,
    Description,
    Order,
    CreatedAt,
}

impl FieldId for ChapterField {
    fn all() -> &'static [Self] {
        &[
            ChapterField::Id,
            ChapterField::SubjectId,
            ChapterField::Title,
            ChapterField::Description,
            ChapterField::Order,
            ChapterField::CreatedAt,
        ]
    }

    fn id(self) -> &'static str {
        match self {
            ChapterField::Id => "id",
            ChapterField::SubjectId => "subjectId",
            ChapterField::Title => "title",
            ChapterField::Description => "description",
            ChapterField::Order => "order",
            ChapterField::CreatedAt => "createdAt",
        }
    }
}

impl Tabular for Chapter {
    type Field = ChapterField;

    fn field(&self, field: ChapterField) -> FieldValue {
        match field {
            ChapterField::Id => FieldValue::Text(self.id.to_string()),
            ChapterField::SubjectId => FieldValue::Text(self.subject_id.to_string()),
            ChapterField::Title => FieldValue::text(&self.title),
            ChapterField::Description => FieldValue::text(&self.description),
            ChapterField::Order => self.order.into(),
            ChapterField::CreatedAt => self.created_at.into(),
        }
    }

    fn search_fields() -> &'static [ChapterField] {
        &[ChapterField::Title, ChapterField::Description]
    }
}

pub(super) const FILTERS: &[FilterOption] = &[
    FilterOption::text("title", "Title"),
    FilterOption::text("description", "Description"),
    FilterOption::number("order", "Order"),
    FilterOption::date("createdAt", "Created"),
];

pub(super) const COLUMNS: &[ColumnOption] = &[
    ColumnOption::new("order", "#"),
    ColumnOption::new("title", "Title").required(),
    ColumnOption::new("description", "Description"),
    ColumnOption::new("createdAt", "Created"),
    ACTIONS_COLUMN,
];

impl ListSchema for Chapter {
    fn filter_options() -> &'static [FilterOption] {
        FILTERS
    }

    fn column_options() -> &'static [ColumnOption] {
        COLUMNS
    }

    fn default_sort() -> (&'static str, SortDirection) {
        ("order", SortDirection::Asc)
    }
}
