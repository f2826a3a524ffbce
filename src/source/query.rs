//! SELECT statement construction for a reflected table.

use std::num::NonZeroU64;

/// Quote an identifier (table/column name) with double quotes
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Builder for the single statement the fetcher runs.
///
/// Filter and ordering expressions are passed through verbatim; they are
/// trusted input from the command line.
#[derive(Debug, Clone)]
pub struct SelectQuery<'a> {
    table: &'a str,
    columns: &'a [String],
    where_clause: Option<&'a str>,
    order_by: Option<&'a str>,
    limit: Option<NonZeroU64>,
}

impl<'a> SelectQuery<'a> {
    pub fn new(table: &'a str, columns: &'a [String]) -> Self {
        Self {
            table,
            columns,
            where_clause: None,
            order_by: None,
            limit: None,
        }
    }

    pub fn filter(mut self, expr: Option<&'a str>) -> Self {
        self.where_clause = expr.map(str::trim).filter(|e| !e.is_empty());
        self
    }

    pub fn order_by(mut self, expr: Option<&'a str>) -> Self {
        self.order_by = expr.map(str::trim).filter(|e| !e.is_empty());
        self
    }

    pub fn limit(mut self, limit: Option<NonZeroU64>) -> Self {
        self.limit = limit;
        self
    }

    pub fn to_sql(&self) -> String {
        let column_list = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns
                .iter()
                .map(|c| quote_identifier(c))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut sql = format!(
            "SELECT {} FROM {}",
            column_list,
            quote_identifier(self.table)
        );

        if let Some(expr) = self.where_clause {
            sql.push_str(&format!(" WHERE {}", expr));
        }
        if let Some(expr) = self.order_by {
            sql.push_str(&format!(" ORDER BY {}", expr));
        }
        if let Some(n) = self.limit {
            sql.push_str(&format!(" LIMIT {}", n));
        }

        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols() -> Vec<String> {
        vec!["id".to_string(), "name".to_string()]
    }

    #[test]
    fn test_plain_select() {
        let columns = cols();
        let sql = SelectQuery::new("user", &columns).to_sql();
        assert_eq!(sql, r#"SELECT "id", "name" FROM "user""#);
    }

    #[test]
    fn test_clause_order() {
        let columns = cols();
        let sql = SelectQuery::new("user", &columns)
            .limit(NonZeroU64::new(2))
            .order_by(Some("id DESC"))
            .filter(Some("id > 1"))
            .to_sql();
        assert_eq!(
            sql,
            r#"SELECT "id", "name" FROM "user" WHERE id > 1 ORDER BY id DESC LIMIT 2"#
        );
    }

    #[test]
    fn test_blank_clauses_are_dropped() {
        let columns = cols();
        let sql = SelectQuery::new("user", &columns)
            .filter(Some("  "))
            .order_by(Some(""))
            .to_sql();
        assert_eq!(sql, r#"SELECT "id", "name" FROM "user""#);
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("users"), "\"users\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }
}
