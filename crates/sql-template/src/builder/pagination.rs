//! Dialect-aware paging

use super::sql_builder::{BuilderState, SqlBuilder};
use crate::clause::ClauseKind;
use crate::dialect::Dialect;
use crate::params::Parameters;

/// Parameter bound to the page size
pub const TAKE_PARAMETER: &str = "take";

/// Parameter bound to the number of skipped rows
pub const SKIP_PARAMETER: &str = "skip";

/// Column the ROWNUM-wrapped skeleton exposes the row number as
pub const ROW_NUMBER_COLUMN: &str = "ROW_NUM";

/// MySQL has no OFFSET without LIMIT; this is the documented "all rows" bound
const MYSQL_UNBOUNDED_LIMIT: &str = "18446744073709551615";

impl SqlBuilder {
    /// Return at most `count` rows
    pub fn take(&mut self, count: u64) -> &mut Self {
        let mut state = self.state.borrow_mut();
        state.take = Some(count);
        rebuild_paging(&mut state);
        drop(state);
        self
    }

    /// Skip the first `count` rows
    pub fn skip(&mut self, count: u64) -> &mut Self {
        let mut state = self.state.borrow_mut();
        state.skip = Some(count);
        rebuild_paging(&mut state);
        drop(state);
        self
    }

    /// Take `per_page` rows of the 1-based `page`
    pub fn paginate(&mut self, page: u64, per_page: u64) -> &mut Self {
        self.take(per_page)
            .skip(page.saturating_sub(1).saturating_mul(per_page))
    }

    pub fn take_count(&self) -> Option<u64> {
        self.state.borrow().take
    }

    pub fn skip_count(&self) -> Option<u64> {
        self.state.borrow().skip
    }
}

/// Regenerate the paging groups from the recorded counts, so the order of
/// `take`/`skip` calls never matters
fn rebuild_paging(state: &mut BuilderState) {
    let dialect = state.dialect();
    let (take, skip) = (state.take, state.skip);
    let store = &mut state.store;

    for kind in [ClauseKind::Paging, ClauseKind::RowNumTake, ClauseKind::RowNumSkip] {
        store.clear_group(kind.name());
    }

    let take_param = dialect.named_parameter(TAKE_PARAMETER);
    let skip_param = dialect.named_parameter(SKIP_PARAMETER);

    match dialect {
        Dialect::MySql => {
            let paging = ClauseKind::Paging;
            match take {
                Some(count) => store.add_clause(
                    paging.name(),
                    format!("LIMIT {}", take_param),
                    Some(Parameters::new().bind(TAKE_PARAMETER, count)),
                    paging.format(),
                    false,
                ),
                None => store.add_clause(
                    paging.name(),
                    format!("LIMIT {}", MYSQL_UNBOUNDED_LIMIT),
                    None,
                    paging.format(),
                    false,
                ),
            }
            if let Some(count) = skip {
                store.add_clause(
                    paging.name(),
                    format!("OFFSET {}", skip_param),
                    Some(Parameters::new().bind(SKIP_PARAMETER, count)),
                    paging.format(),
                    false,
                );
            }
        }
        Dialect::Oracle => {
            if let Some(count) = take {
                let kind = ClauseKind::RowNumTake;
                let (sql, parameters) = match skip {
                    Some(skipped) => (
                        format!("ROWNUM <= {} + {}", skip_param, take_param),
                        Parameters::new()
                            .bind(SKIP_PARAMETER, skipped)
                            .bind(TAKE_PARAMETER, count),
                    ),
                    None => (
                        format!("ROWNUM <= {}", take_param),
                        Parameters::new().bind(TAKE_PARAMETER, count),
                    ),
                };
                store.add_clause(kind.name(), sql, Some(parameters), kind.format(), false);
            }
            if let Some(count) = skip {
                let kind = ClauseKind::RowNumSkip;
                store.add_clause(
                    kind.name(),
                    format!("{} > {}", ROW_NUMBER_COLUMN, skip_param),
                    Some(Parameters::new().bind(SKIP_PARAMETER, count)),
                    kind.format(),
                    false,
                );
            }
        }
    }
}
