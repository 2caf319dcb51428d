use super::ListSchema;
use crate::model::Level;
use crate::table::{
    ColumnOption, FieldId, FieldValue, FilterOption, SortDirection, Tabular, ACTIONS_COLUMN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelField {
    Id,
    Name,
    Code,
    Description,
    Order,
    CreatedAt,
}

impl FieldId for LevelField {
    fn all() -> &'static [Self] {
        &[
            LevelField::Id,
            LevelField::Name,
            LevelField::Code,
            LevelField::Description,
            LevelField::Order,
            LevelField::CreatedAt,
        ]
    }

    fn id(self) -> &'static str {
        match self {
            LevelField::Id => "id",
            LevelField::Name => "name",
            LevelField::Code => "code",
            LevelField::Description => "description",
            LevelField::Order => "order",
            LevelField::CreatedAt => "createdAt",
        }
    }
}

impl Tabular for Level {
    type Field = LevelField;

    fn field(&self, field: LevelField) -> FieldValue {
        match field {
            LevelField::Id => FieldValue::Text(self.id.to_string()),
            LevelField::Name => FieldValue::text(&self.name),
            LevelField::Code => FieldValue::text(&self.code),
            LevelField::Description => FieldValue::text(&self.description),
            LevelField::Order => self.order.into(),
            LevelField::CreatedAt => self.created_at.into(),
        }
    }

    fn search_fields() -> &'static [LevelField] {
        &[LevelField::Name, LevelField::Description]
    }
}

pub(super) const FILTERS: &[FilterOption] = &[
    FilterOption::text("name", "Name"),
    FilterOption::text("code", "Code"),
    FilterOption::text("description", "Description"),
    FilterOption::number("order", "Order"),
    FilterOption::date("createdAt", "Created"),
];

pub(super) const COLUMNS: &[ColumnOption] = &[
    ColumnOption::new("name", "Name").required(),
    ColumnOption::new("code", "Code"),
    ColumnOption::new("description", "Description"),
    ColumnOption::new("order", "Order"),
    ColumnOption::new("createdAt", "Created"),
    ACTIONS_COLUMN,
];

impl ListSchema for Level {
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
