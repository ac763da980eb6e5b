//! Clause types - kinds, formatting and single fragments

use std::fmt;

use crate::params::Parameters;

/// How a group of clauses is glued together and wrapped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseFormat {
    pub joiner: String,
    pub prefix: String,
    pub postfix: String,
}

impl ClauseFormat {
    pub fn new(joiner: &str, prefix: &str, postfix: &str) -> Self {
        Self {
            joiner: joiner.to_string(),
            prefix: prefix.to_string(),
            postfix: postfix.to_string(),
        }
    }
}

/// One SQL fragment with its bound values
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub sql: String,
    pub parameters: Option<Parameters>,
    /// Member of the parenthesized OR block rather than the joiner chain
    pub inclusive: bool,
}

impl Clause {
    pub fn new(sql: impl Into<String>, parameters: Option<Parameters>, inclusive: bool) -> Self {
        Self {
            sql: sql.into(),
            parameters,
            inclusive,
        }
    }
}

/// Every clause kind the builder knows how to place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    Select,
    InsightSelect,
    Where,
    InsightWhere,
    InnerJoin,
    LeftJoin,
    RightJoin,
    Join,
    InsightInnerJoin,
    InsightLeftJoin,
    OrderBy,
    InsightOrderBy,
    GroupBy,
    InsightGroupBy,
    Having,
    Intersect,
    Set,
    Paging,
    RowNumTake,
    RowNumSkip,
    Parameters,
}

impl ClauseKind {
    pub const ALL: [ClauseKind; 21] = [
        ClauseKind::Select,
        ClauseKind::InsightSelect,
        ClauseKind::Where,
        ClauseKind::InsightWhere,
        ClauseKind::InnerJoin,
        ClauseKind::LeftJoin,
        ClauseKind::RightJoin,
        ClauseKind::Join,
        ClauseKind::InsightInnerJoin,
        ClauseKind::InsightLeftJoin,
        ClauseKind::OrderBy,
        ClauseKind::InsightOrderBy,
        ClauseKind::GroupBy,
        ClauseKind::InsightGroupBy,
        ClauseKind::Having,
        ClauseKind::Intersect,
        ClauseKind::Set,
        ClauseKind::Paging,
        ClauseKind::RowNumTake,
        ClauseKind::RowNumSkip,
        ClauseKind::Parameters,
    ];

    /// Group name, which is also the marker name inside skeletons
    pub fn name(&self) -> &'static str {
        match self {
            ClauseKind::Select => "select",
            ClauseKind::InsightSelect => "insightselect",
            ClauseKind::Where => "where",
            ClauseKind::InsightWhere => "insightwhere",
            ClauseKind::InnerJoin => "innerjoin",
            ClauseKind::LeftJoin => "leftjoin",
            ClauseKind::RightJoin => "rightjoin",
            ClauseKind::Join => "join",
            ClauseKind::InsightInnerJoin => "insightinnerjoin",
            ClauseKind::InsightLeftJoin => "insightleftjoin",
            ClauseKind::OrderBy => "orderby",
            ClauseKind::InsightOrderBy => "insightorderby",
            ClauseKind::GroupBy => "groupby",
            ClauseKind::InsightGroupBy => "insightgroupby",
            ClauseKind::Having => "having",
            ClauseKind::Intersect => "intersect",
            ClauseKind::Set => "set",
            ClauseKind::Paging => "paging",
            ClauseKind::RowNumTake => "rownumtake",
            ClauseKind::RowNumSkip => "rownumskip",
            ClauseKind::Parameters => "--parameters",
        }
    }

    pub fn from_name(name: &str) -> Option<ClauseKind> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    pub fn format(&self) -> ClauseFormat {
        match self {
            ClauseKind::Select | ClauseKind::InsightSelect => ClauseFormat::new(" , ", "", "\n"),
            ClauseKind::Where | ClauseKind::InsightWhere => {
                ClauseFormat::new(" AND ", "\nWHERE ", "\n")
            }
            ClauseKind::InnerJoin | ClauseKind::InsightInnerJoin => {
                ClauseFormat::new("\nINNER JOIN ", "\nINNER JOIN ", "\n")
            }
            ClauseKind::LeftJoin | ClauseKind::InsightLeftJoin => {
                ClauseFormat::new("\nLEFT JOIN ", "\nLEFT JOIN ", "\n")
            }
            ClauseKind::RightJoin => ClauseFormat::new("\nRIGHT JOIN ", "\nRIGHT JOIN ", "\n"),
            ClauseKind::Join => ClauseFormat::new("\nJOIN ", "\nJOIN ", "\n"),
            ClauseKind::OrderBy | ClauseKind::InsightOrderBy => {
                ClauseFormat::new(" , ", "\nORDER BY ", "\n")
            }
            ClauseKind::GroupBy | ClauseKind::InsightGroupBy => {
                ClauseFormat::new(" , ", "\nGROUP BY ", "\n")
            }
            ClauseKind::Having => ClauseFormat::new(" AND ", "\nHAVING ", "\n"),
            ClauseKind::Intersect => ClauseFormat::new("\nINTERSECT\n", "\nINTERSECT\n", "\n"),
            ClauseKind::Set => ClauseFormat::new(" , ", "\nSET ", "\n"),
            ClauseKind::Paging => ClauseFormat::new(" ", "\n", "\n"),
            ClauseKind::RowNumTake | ClauseKind::RowNumSkip => {
                ClauseFormat::new(" AND ", "\nWHERE ", "\n")
            }
            ClauseKind::Parameters => ClauseFormat::new("", "", ""),
        }
    }

    /// Kinds that belong to the inner subquery of a nested template
    pub fn is_insight(&self) -> bool {
        matches!(
            self,
            ClauseKind::InsightSelect
                | ClauseKind::InsightWhere
                | ClauseKind::InsightInnerJoin
                | ClauseKind::InsightLeftJoin
                | ClauseKind::InsightOrderBy
                | ClauseKind::InsightGroupBy
        )
    }

    /// Marker text for this kind, e.g. `/**where**/`
    pub fn marker(&self) -> String {
        marker(self.name())
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Marker text for a group name
pub fn marker(name: &str) -> String {
    format!("/**{}**/", name)
}
