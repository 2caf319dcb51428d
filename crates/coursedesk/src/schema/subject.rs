use super::ListSchema;
use crate::model::Subject;
use crate::table::{
    ColumnOption, FieldId, FieldValue, FilterOption, SortDirection, Tabular, ACTIONS_COLUMN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectField {
    Id,
    LevelId,
    Name,
    Description,
    Coefficient,
    Color,
    CreatedAt,
}

impl FieldId for SubjectField {
    fn all() -> &'static [Self] {
        &[
            SubjectField::Id,
            SubjectField::LevelId,
            SubjectField::Name,
            SubjectField::Description,
            SubjectField::Coefficient,
            SubjectField::Color,
            SubjectField::CreatedAt,
        ]
    }

    fn id(self) -> &'static str {
        match self {
            SubjectField::Id => "id",
            SubjectField::LevelId => "levelId",
            SubjectField::Name => "name",
            SubjectField::Description => "description",
            SubjectField::Coefficient => "coefficient",
            SubjectField::Color => "color",
            SubjectField::CreatedAt => "createdAt",
        }
    }
}

impl Tabular for Subject {
    type Field = SubjectField;

    fn field(&self, field: SubjectField) -> FieldValue {
        match field {
            SubjectField::Id => FieldValue::Text(self.id.to_string()),
            SubjectField::LevelId => FieldValue::Text(self.level_id.to_string()),
            SubjectField::Name => FieldValue::text(&self.name),
            SubjectField::Description => FieldValue::text(&self.description),
            SubjectField::Coefficient => self.coefficient.into(),
            SubjectField::Color => FieldValue::opt_text(self.color.as_deref()),
            SubjectField::CreatedAt => self.created_at.into(),
        }
    }

    fn search_fields() -> &'static [SubjectField] {
        &[SubjectField::Name, SubjectField::Description]
    }
}

pub(super) const FILTERS: &[FilterOption] = &[
    FilterOption::text("name", "Name"),
    FilterOption::text("description", "Description"),
    FilterOption::number("coefficient", "Coefficient"),
    FilterOption::date("createdAt", "Created"),
];

pub(super) const COLUMNS: &[ColumnOption] = &[
    ColumnOption::new("name", "Name").required(),
    ColumnOption::new("description", "Description"),
    ColumnOption::new("coefficient", "Coefficient"),
    ColumnOption::new("color", "Color"),
    ColumnOption::new("createdAt", "Created"),
    ACTIONS_COLUMN,
];

impl ListSchema for Subject {
    fn filter_options() -> &'static [FilterOption] {
        FILTERS
    }

    fn column_options() -> &'static [ColumnOption] {
        COLUMNS
    }

    fn default_sort() -> (&'static str, SortDirection) {
        ("name", SortDirection::Asc)
    }
}
