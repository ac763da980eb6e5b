//! ORDER BY, GROUP BY, HAVING

use super::sql_builder::SqlBuilder;
use crate::clause::ClauseKind;
use crate::params::Parameters;

impl SqlBuilder {
    /// Add an ORDER BY term (ascending unless the text says otherwise)
    pub fn order_by(&mut self, sql: &str, parameters: impl Into<Parameters>) -> &mut Self {
        self.add_kind(ClauseKind::OrderBy, sql, parameters.into(), false)
    }

    /// Add a descending ORDER BY term
    pub fn order_desc_by(&mut self, sql: &str, parameters: impl Into<Parameters>) -> &mut Self {
        self.add_kind(
            ClauseKind::OrderBy,
            format!("{} DESC", sql),
            parameters.into(),
            false,
        )
    }

    pub fn insight_order_by(&mut self, sql: &str, parameters: impl Into<Parameters>) -> &mut Self {
        self.add_kind(ClauseKind::InsightOrderBy, sql, parameters.into(), false)
    }

    pub fn group_by(&mut self, sql: &str, parameters: impl Into<Parameters>) -> &mut Self {
        self.add_kind(ClauseKind::GroupBy, sql, parameters.into(), false)
    }

    /// Set the inner query's GROUP BY, replacing any previous one
    pub fn insight_group_by(&mut self, sql: &str, parameters: impl Into<Parameters>) -> &mut Self {
        self.replace_kind(ClauseKind::InsightGroupBy, sql, parameters.into())
    }

    pub fn having(&mut self, sql: &str, parameters: impl Into<Parameters>) -> &mut Self {
        self.add_kind(ClauseKind::Having, sql, parameters.into(), false)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Dialect, SqlBuilder};
    use serde_json::json;

    #[test]
    fn test_order_by_terms() {
        let mut builder = SqlBuilder::new("Products", Dialect::MySql);
        builder.order_by("p.Name", ()).order_desc_by("p.CreatedAt", ());

        let template = builder.add_template("SELECT * FROM Products p /**orderby**/", ());
        assert_eq!(
            template.raw_sql().unwrap(),
            "SELECT * FROM Products p \nORDER BY p.Name , p.CreatedAt DESC\n"
        );
    }

    #[test]
    fn test_group_by_and_having() {
        let mut builder = SqlBuilder::new("Orders", Dialect::MySql);
        builder
            .select("o.CustomerId", ())
            .select("SUM(o.Total) AS Spent", ())
            .group_by("o.CustomerId", ())
            .having("SUM(o.Total) > @floor", json!({"floor": 500}))
            .having("COUNT(*) > 1", ());

        let template = builder.add_template(
            "SELECT /**select**/ FROM Orders o /**groupby**/ /**having**/",
            (),
        );
        assert_eq!(
            template.raw_sql().unwrap(),
            "SELECT o.CustomerId , SUM(o.Total) AS Spent\n FROM Orders o \nGROUP BY o.CustomerId\n \nHAVING SUM(o.Total) > @floor AND COUNT(*) > 1\n"
        );
    }

    #[test]
    fn test_insight_group_by_replaces() {
        let mut builder = SqlBuilder::new("Orders", Dialect::MySql);
        builder
            .insight_group_by("o.CustomerId", ())
            .insight_group_by("o.StoreId", ());

        let group = builder.group("insightgroupby").unwrap();
        assert_eq!(group.len(), 1);
        assert_eq!(group.clauses()[0].sql, "o.StoreId");
    }

    #[test]
    fn test_group_by_accumulates() {
        let mut builder = SqlBuilder::new("Orders", Dialect::MySql);
        builder.group_by("a", ()).group_by("b", ());
        assert_eq!(builder.group("groupby").unwrap().len(), 2);
    }
}
