//! Marker substitution
//!
//! Every populated group replaces its `/**name**/` marker; whatever markers
//! remain afterwards are stripped according to the configured policy.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::clause::{marker, ClauseKind, ClauseStore};
use crate::config::MarkerPolicy;
use crate::error::{TemplateError, TemplateResult};
use crate::params::Parameters;

static MARKER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\*\*(.+?)\*\*/").expect("marker pattern is a valid regex"));

/// Substitute every group of `store` into `skeleton`
///
/// Parameters start from `initial`, then every group merges its clause
/// parameters in creation order, whether or not its marker is present.
pub(crate) fn render(
    skeleton: &str,
    store: &ClauseStore,
    initial: &Parameters,
    policy: MarkerPolicy,
) -> TemplateResult<(String, Parameters)> {
    let mut parameters = initial.clone();
    let mut sql = skeleton.to_string();

    for group in store.groups() {
        let resolved = group.resolve(&mut parameters);
        if group.is_empty() {
            continue;
        }
        let marker = marker(group.name());
        if sql.contains(&marker) {
            sql = sql.replace(&marker, &resolved);
        }
    }

    check_leftovers(&sql, store, policy)?;
    let sql = MARKER_PATTERN.replace_all(&sql, "").into_owned();
    Ok((sql, parameters))
}

/// Names of every marker in `sql`, in order of appearance
pub fn marker_names(sql: &str) -> Vec<String> {
    MARKER_PATTERN
        .captures_iter(sql)
        .map(|caps| caps[1].to_string())
        .collect()
}

fn check_leftovers(sql: &str, store: &ClauseStore, policy: MarkerPolicy) -> TemplateResult<()> {
    if policy == MarkerPolicy::Strip {
        return Ok(());
    }

    for name in marker_names(sql) {
        if ClauseKind::from_name(&name).is_some() || store.group(&name).is_some() {
            continue;
        }
        match policy {
            MarkerPolicy::Deny => return Err(TemplateError::UnresolvedMarker { marker: name }),
            _ => tracing::warn!("Stripping unknown template marker /**{}**/", name),
        }
    }
    Ok(())
}
