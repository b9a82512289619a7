//! Table-scoped query descriptions and their PostgREST encoding.

use serde_json::Value;
use url::form_urlencoded;

pub const ARTICLES_TABLE: &str = "articles";
pub const PROFILES_TABLE: &str = "profiles";

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq { column: String, value: String },
    Neq { column: String, value: String },
    /// Case-insensitive substring match on any of `columns`.
    AnyILike { columns: Vec<String>, term: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub descending: bool,
}

/// Read request against one table.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    table: String,
    columns: String,
    filters: Vec<Filter>,
    order: Option<Order>,
    limit: Option<usize>,
    single: bool,
}

impl SelectQuery {
    pub fn table(table: &str) -> Self {
        SelectQuery {
            table: table.to_string(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
            single: false,
        }
    }

    pub fn columns(mut self, columns: &str) -> Self {
        self.columns = columns.split(',').map(str::trim).collect::<Vec<_>>().join(",");
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push(Filter::Eq {
            column: column.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn neq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push(Filter::Neq {
            column: column.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// OR-combined `ilike '%term%'` over `columns`.
    pub fn or_ilike(mut self, columns: &[&str], term: &str) -> Self {
        self.filters.push(Filter::AnyILike {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            term: term.to_string(),
        });
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            descending: true,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Expect exactly one row; anything else is
    /// [`crate::BackendError::NotSingle`].
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn selected_columns(&self) -> &str {
        &self.columns
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn ordering(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn row_limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn is_single(&self) -> bool {
        self.single
    }

    /// PostgREST query string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("select", &self.columns);
        append_filters(&mut serializer, &self.filters);
        if let Some(order) = &self.order {
            let direction = if order.descending { "desc" } else { "asc" };
            serializer.append_pair("order", &format!("{}.{}", order.column, direction));
        }
        if let Some(limit) = self.limit {
            serializer.append_pair("limit", &limit.to_string());
        }
        serializer.finish()
    }

    /// Key under which the query cache stores this read.
    pub fn cache_key(&self) -> String {
        let single = if self.single { "#single" } else { "" };
        format!("{}?{}{}", self.table, self.to_query_string(), single)
    }
}

/// Patch of the rows matching every equality filter.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateQuery {
    table: String,
    filters: Vec<Filter>,
    patch: Value,
}

impl UpdateQuery {
    pub fn table(table: &str, patch: Value) -> Self {
        UpdateQuery {
            table: table.to_string(),
            filters: Vec::new(),
            patch,
        }
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push(Filter::Eq {
            column: column.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn patch(&self) -> &Value {
        &self.patch
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        append_filters(&mut serializer, &self.filters);
        serializer.finish()
    }
}

/// Insert-or-replace keyed by the table's primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertQuery {
    table: String,
    row: Value,
    key: String,
}

impl UpsertQuery {
    pub fn table(table: &str, row: Value) -> Self {
        UpsertQuery {
            table: table.to_string(),
            row,
            key: "id".to_string(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn row(&self) -> &Value {
        &self.row
    }

    pub fn key_column(&self) -> &str {
        &self.key
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("on_conflict", &self.key);
        serializer.finish()
    }
}

fn append_filters(serializer: &mut form_urlencoded::Serializer<'_, String>, filters: &[Filter]) {
    for filter in filters {
        match filter {
            Filter::Eq {
                column,
                value,
            } => {
                serializer.append_pair(column, &format!("eq.{}", value));
            },
            Filter::Neq {
                column,
                value,
            } => {
                serializer.append_pair(column, &format!("neq.{}", value));
            },
            Filter::AnyILike {
                columns,
                term,
            } => {
                let pattern = quote_logic_value(&format!("*{}*", term));
                let branches = columns
                    .iter()
                    .map(|column| format!("{}.ilike.{}", column, pattern))
                    .collect::<Vec<_>>()
                    .join(",");
                serializer.append_pair("or", &format!("({})", branches));
            },
        }
    }
}

/// Values inside an `or=(...)` tree are double-quoted so commas and
/// parentheses in user input stay literal.
fn quote_logic_value(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn decode(query: &str) -> Vec<(String, String)> {
        form_urlencoded::parse(query.as_bytes()).into_owned().collect()
    }

    #[test]
    fn category_listing_encodes_filter_and_order() {
        let query = SelectQuery::table(ARTICLES_TABLE)
            .eq("category", "Politics")
            .order_desc("created_at");
        assert_eq!(
            decode(&query.to_query_string()),
            vec![
                ("select".to_string(), "*".to_string()),
                ("category".to_string(), "eq.Politics".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
            ]
        );
    }

    #[test]
    fn related_query_excludes_current_id() {
        let query = SelectQuery::table(ARTICLES_TABLE)
            .eq("category", "Business")
            .neq("id", "biz-1")
            .limit(3);
        let pairs = decode(&query.to_query_string());
        assert!(pairs.contains(&("id".to_string(), "neq.biz-1".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "3".to_string())));
    }

    #[test]
    fn search_builds_or_tree_with_quoted_pattern() {
        let query = SelectQuery::table(ARTICLES_TABLE)
            .or_ilike(&["title", "content", "excerpt"], "climate, \"policy\"");
        let pairs = decode(&query.to_query_string());
        assert_eq!(
            pairs[1],
            (
                "or".to_string(),
                "(title.ilike.\"*climate, \\\"policy\\\"*\",content.ilike.\"*climate, \
                 \\\"policy\\\"*\",excerpt.ilike.\"*climate, \\\"policy\\\"*\")"
                    .to_string()
            )
        );
    }

    #[test]
    fn columns_are_compacted_and_single_changes_cache_key() {
        let query = SelectQuery::table(PROFILES_TABLE)
            .columns("id, username, avatar_url")
            .eq("id", "u-1");
        let single = query.clone().single();
        assert_eq!(query.selected_columns(), "id,username,avatar_url");
        assert_ne!(query.cache_key(), single.cache_key());
        assert!(single.cache_key().starts_with("profiles?"));
    }

    #[test]
    fn update_and_upsert_encode_targets() {
        let update = UpdateQuery::table(ARTICLES_TABLE, json!({ "views": 951 })).eq("id", "pol-1");
        assert_eq!(update.to_query_string(), "id=eq.pol-1");
        assert_eq!(update.patch(), &json!({ "views": 951 }));

        let upsert = UpsertQuery::table(PROFILES_TABLE, json!({ "id": "u-1" }));
        assert_eq!(upsert.to_query_string(), "on_conflict=id");
        assert_eq!(upsert.key_column(), "id");
    }
}
