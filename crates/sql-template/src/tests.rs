//! Scenario tests for sql-template
//!
//! Cover the documented resolution examples, generated skeletons for both
//! dialects, and nested (insight) queries.

use crate::{Dialect, SqlBuilder};
use serde_json::json;

/// Collapse whitespace runs so generated skeletons compare readably
fn squash(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

mod resolution_tests {
    use super::*;

    #[test]
    fn test_where_and_order_by_exact_whitespace() {
        let mut builder = SqlBuilder::new("T", Dialect::MySql);
        builder
            .where_clause("t1.Id = @id", json!({"id": 5}))
            .order_by("t1.Name", ());

        let template = builder.add_template("SELECT * FROM T t1 /**where**/ /**orderby**/", ());
        assert_eq!(
            template.raw_sql().unwrap(),
            "SELECT * FROM T t1 \nWHERE t1.Id = @id\n \nORDER BY t1.Name\n"
        );
        assert_eq!(template.parameters().unwrap().to_json(), json!({"id": 5}));
    }

    #[test]
    fn test_two_wheres_and_one_or_where() {
        let mut builder = SqlBuilder::new("T", Dialect::MySql);
        builder
            .where_clause("cond1", ())
            .where_clause("cond2", ())
            .or_where("cond3", ());

        let template = builder.add_template("/**where**/", ());
        assert_eq!(
            template.raw_sql().unwrap(),
            "\nWHERE cond1 AND cond2 AND (cond3)\n"
        );
    }

    #[test]
    fn test_parameters_are_union_of_all_groups() {
        let mut builder = SqlBuilder::new("Orders", Dialect::MySql);
        builder
            .select("o.Id", ())
            .inner_join("Stores s ON s.Id = o.StoreId AND s.TenantId = @tenant", json!({"tenant": 7}))
            .where_clause("o.Status = @status", json!({"status": "paid"}))
            .having("COUNT(*) > @min", json!({"min": 2}))
            .take(5);

        let params = builder.add_template("/**where**/", ()).parameters().unwrap();
        let mut names: Vec<&str> = params.names().collect();
        names.sort();
        assert_eq!(names, vec!["min", "status", "take", "tenant"]);
    }

    #[test]
    fn test_unpopulated_markers_leave_no_residue() {
        let builder = SqlBuilder::new("T", Dialect::MySql);
        let template = builder.add_template(
            "SELECT /**select**/ * FROM T /**innerjoin**/ /**where**/ /**made-up name**/",
            (),
        );
        let sql = template.raw_sql().unwrap();
        assert!(!sql.contains("/**"));
        assert!(!sql.contains("**/"));
    }

    #[test]
    fn test_first_writer_wins_across_fluent_and_custom_calls() {
        use crate::ClauseFormat;

        let mut builder = SqlBuilder::new("T", Dialect::MySql);
        builder
            .add_clause("where", "a = 1", (), ClauseFormat::new(" OR ", "\nWHERE ", "\n"), false)
            .where_clause("b = 2", ());

        let template = builder.add_template("/**where**/", ());
        assert_eq!(template.raw_sql().unwrap(), "\nWHERE a = 1 OR b = 2\n");
    }
}

mod default_template_tests {
    use super::*;

    fn paged_product_query(dialect: Dialect) -> SqlBuilder {
        let prefix = dialect.parameter_prefix();
        let mut builder = SqlBuilder::new("Products", dialect);
        builder
            .alias("p")
            .where_clause(&format!("p.BrandId = {}brand", prefix), json!({"brand": 3}))
            .order_by("p.Name", ())
            .take(10)
            .skip(20);
        builder
    }

    #[test]
    fn test_mysql_default_template() {
        let builder = paged_product_query(Dialect::MySql);
        let template = builder.use_default_template(());

        assert_eq!(
            squash(&template.raw_sql().unwrap()),
            "SELECT * FROM Products p WHERE p.BrandId = @brand ORDER BY p.Name LIMIT @take OFFSET @skip"
        );
        let params = template.parameters().unwrap();
        assert_eq!(params.get("take"), Some(&json!(10)));
        assert_eq!(params.get("skip"), Some(&json!(20)));
    }

    #[test]
    fn test_oracle_default_template_wraps_row_numbers() {
        let builder = paged_product_query(Dialect::Oracle);
        let template = builder.use_default_template(());

        assert_eq!(
            squash(&template.raw_sql().unwrap()),
            "SELECT * FROM (SELECT ROWNUM AS ROW_NUM, paged.* FROM (SELECT * FROM Products p WHERE p.BrandId = :brand ORDER BY p.Name ) paged WHERE ROWNUM <= :skip + :take ) WHERE ROW_NUM > :skip"
        );
        let sql = template.raw_sql().unwrap();
        assert!(!sql.contains("LIMIT"));
        assert!(!sql.contains("OFFSET"));
    }

    #[test]
    fn test_oracle_default_template_without_paging_is_flat() {
        let mut builder = SqlBuilder::new("Brands", Dialect::Oracle);
        builder.where_clause("IsActive = 1", ());
        let template = builder.use_default_template(());
        assert_eq!(
            squash(&template.raw_sql().unwrap()),
            "SELECT * FROM Brands WHERE IsActive = 1"
        );
    }

    #[test]
    fn test_default_template_follows_later_mutation() {
        let mut builder = SqlBuilder::new("Brands", Dialect::MySql);
        let template = builder.use_default_template(());
        assert_eq!(squash(&template.raw_sql().unwrap()), "SELECT * FROM Brands");

        builder.select("Id", ()).select("Name", ());
        assert_eq!(
            squash(&template.raw_sql().unwrap()),
            "SELECT Id , Name FROM Brands"
        );
    }

    #[test]
    fn test_count_template_ignores_order_and_paging() {
        let builder = paged_product_query(Dialect::MySql);
        let template = builder.use_count_template(());

        assert_eq!(
            squash(&template.raw_sql().unwrap()),
            "SELECT COUNT(*) FROM (SELECT * FROM Products p WHERE p.BrandId = @brand ) counted"
        );
    }

    #[test]
    fn test_initial_parameters_flow_into_default_template() {
        let builder = SqlBuilder::new("Banners", Dialect::MySql);
        let template = builder.use_default_template(json!({"tenant": 4}));
        assert_eq!(template.parameters().unwrap().get("tenant"), Some(&json!(4)));
    }
}

mod insight_tests {
    use super::*;

    #[test]
    fn test_nested_template_with_promoted_join_columns() {
        let mut builder = SqlBuilder::new("Products", Dialect::MySql);
        builder
            .alias("p")
            .select("p.*", ())
            .insight_select("p.Id", ())
            .insight_select("p.Price", ())
            .insight_select("b.Name AS BrandName", ())
            .insight_where("p.IsActive = 1", ())
            .inner_join_as("b", "Brands b ON b.Id = p.BrandId", ())
            .resolve_inner_join_clauses();

        let template = builder.use_default_template(());
        assert_eq!(
            squash(&template.raw_sql().unwrap()),
            "SELECT p.* , b.Name AS BrandName FROM (SELECT p.Id , p.Price FROM Products p WHERE p.IsActive = 1 ) p INNER JOIN Brands b ON b.Id = p.BrandId"
        );
    }

    #[test]
    fn test_nested_template_defaults_outer_select_to_table() {
        let mut builder = SqlBuilder::new("Orders", Dialect::MySql);
        builder
            .insight_where("Status = 1", ())
            .insight_order_by("CreatedAt", ())
            .where_clause("Orders.Total > 0", ());

        let template = builder.use_default_template(());
        assert_eq!(
            squash(&template.raw_sql().unwrap()),
            "SELECT Orders.* FROM (SELECT * FROM Orders WHERE Status = 1 ORDER BY CreatedAt ) Orders WHERE Orders.Total > 0"
        );
    }
}
