/// Arrow schema definitions for hazard report listings.
pub mod reports {
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    /// Schema for the paginated report list.
    pub fn report_list_schema() -> Schema {
        Schema::new(vec![
            Field::new("id", DataType::Utf8, false),
            Field::new("date", DataType::Utf8, false),
            Field::new("age", DataType::Utf8, true),
            Field::new("reporter", DataType::Utf8, false),
            Field::new("site", DataType::Utf8, false),
            Field::new("hazard_type", DataType::Utf8, true),
            Field::new(
                "labels",
                DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))),
                true,
            ),
            Field::new("confidence", DataType::UInt8, true),
            Field::new("cluster", DataType::Utf8, true),
            Field::new("ai_status", DataType::Utf8, false),
        ])
    }

    /// Schema for cluster summaries.
    pub fn cluster_summary_schema() -> Schema {
        Schema::new(vec![
            Field::new("id", DataType::Utf8, false),
            Field::new("name", DataType::Utf8, false),
            Field::new("reports", DataType::UInt32, false),
            Field::new("similarity", DataType::Float64, false),
            Field::new("tier", DataType::Utf8, false),
            Field::new("status", DataType::Utf8, false),
        ])
    }
}
