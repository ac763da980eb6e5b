//! Generated skeletons for the default and count templates
//!
//! Skeletons are generated from the builder state at resolution time, so a
//! builder mutated after `use_default_template` still gets a matching shape
//! (for example `*` turning into `/**select**/` once a select is added).

use crate::builder::sql_builder::BuilderState;
use crate::builder::ROW_NUMBER_COLUMN;
use crate::clause::ClauseKind;
use crate::dialect::Dialect;

const OUTER_CLAUSES: [ClauseKind; 7] = [
    ClauseKind::InnerJoin,
    ClauseKind::LeftJoin,
    ClauseKind::RightJoin,
    ClauseKind::Join,
    ClauseKind::Where,
    ClauseKind::GroupBy,
    ClauseKind::Having,
];

const INSIGHT_CLAUSES: [ClauseKind; 5] = [
    ClauseKind::InsightInnerJoin,
    ClauseKind::InsightLeftJoin,
    ClauseKind::InsightWhere,
    ClauseKind::InsightGroupBy,
    ClauseKind::InsightOrderBy,
];

/// Full `SELECT` skeleton with the dialect's paging placement
pub(crate) fn default_skeleton(state: &BuilderState) -> String {
    let body = select_body(state, true);

    match state.dialect() {
        Dialect::MySql => format!("{} {}", body, ClauseKind::Paging.marker()),
        Dialect::Oracle if state.is_paged() => format!(
            "SELECT * FROM (SELECT ROWNUM AS {row_num}, paged.* FROM ({body}) paged {take}) {skip}",
            row_num = ROW_NUMBER_COLUMN,
            body = body,
            take = ClauseKind::RowNumTake.marker(),
            skip = ClauseKind::RowNumSkip.marker(),
        ),
        Dialect::Oracle => body,
    }
}

/// `SELECT COUNT(*)` over the default body without ordering or paging
pub(crate) fn count_skeleton(state: &BuilderState) -> String {
    format!("SELECT COUNT(*) FROM ({}) counted", select_body(state, false))
}

fn select_body(state: &BuilderState, ordered: bool) -> String {
    let from = match &state.alias {
        Some(alias) => format!("{} {}", state.table, alias),
        None => state.table.clone(),
    };

    let source = if state.has_insight_clauses() {
        let inner_select = marker_or(state, ClauseKind::InsightSelect, "*");
        format!(
            "(SELECT {} FROM {} {}) {}",
            inner_select,
            from,
            markers(&INSIGHT_CLAUSES),
            state.table_reference()
        )
    } else {
        from
    };

    let outer_select = if state.has_insight_clauses() {
        marker_or(state, ClauseKind::Select, &format!("{}.*", state.table_reference()))
    } else {
        marker_or(state, ClauseKind::Select, "*")
    };

    let mut tail = vec![markers(&OUTER_CLAUSES), ClauseKind::Intersect.marker()];
    if ordered {
        tail.push(ClauseKind::OrderBy.marker());
    }

    format!("SELECT {} FROM {} {}", outer_select, source, tail.join(" "))
}

fn marker_or(state: &BuilderState, kind: ClauseKind, fallback: &str) -> String {
    if state.store.has_group(kind.name()) {
        kind.marker()
    } else {
        fallback.to_string()
    }
}

fn markers(kinds: &[ClauseKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.marker())
        .collect::<Vec<_>>()
        .join(" ")
}
