use std::collections::BTreeSet;

use crate::{directive::model::ParsedDirective, params::host::ParameterHost};

/// What one reconciliation pass did to the host.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReconcileOutcome {
    /// Newly registered parameters, in parsed order.
    pub added: Vec<String>,
    /// Kept parameters whose display metadata was refreshed, in parsed order.
    pub updated: Vec<String>,
    /// Deregistered parameters, in previous order.
    pub removed: Vec<String>,
    /// Parameters re-registered because their declared type changed.
    pub retyped: Vec<String>,
    /// Registered names after the pass, in parsed order. Baseline for the next pass.
    pub names: Vec<String>,
}

impl ReconcileOutcome {
    /// Return `true` when parameters were created or destroyed.
    pub fn changed_structure(&self) -> bool {
        !(self.added.is_empty() && self.removed.is_empty() && self.retyped.is_empty())
    }
}

/// Bring the host's parameter set in line with a fresh parse.
///
/// `previous` is the baseline returned by the last pass. Parameters that survive keep their
/// host-side state (value, keys, connection); only display name, range and combo options are
/// pushed to them. A surviving name whose type changed is re-registered, since a value of the
/// old type cannot carry over. Later duplicates of a uniform name are ignored.
#[tracing::instrument(skip_all, fields(previous = previous.len(), parsed = parsed.len()))]
pub fn reconcile<H: ParameterHost + ?Sized>(
    host: &mut H,
    previous: &[String],
    parsed: &[ParsedDirective],
) -> ReconcileOutcome {
    let mut out = ReconcileOutcome::default();
    let declared: BTreeSet<&str> = parsed.iter().map(|d| d.uniform_name.as_str()).collect();

    for name in previous {
        if !declared.contains(name.as_str()) && host.has_parameter(name) {
            host.remove_parameter(name);
            out.removed.push(name.clone());
        }
    }

    let mut seen = BTreeSet::new();
    for d in parsed {
        let name = d.uniform_name.as_str();
        if !seen.insert(name) {
            continue;
        }

        let ty = d.param_type.data_type();
        match host.parameter_type(name) {
            None => {
                host.add_parameter(name, ty, d.param_type.default_value(), d.flags);
                out.added.push(name.to_owned());
            }
            Some(existing) if existing != ty => {
                tracing::debug!(name, from = %existing, to = %ty, "parameter type changed");
                host.remove_parameter(name);
                host.add_parameter(name, ty, d.param_type.default_value(), d.flags);
                out.retyped.push(name.to_owned());
            }
            Some(_) => out.updated.push(name.to_owned()),
        }

        host.set_parameter_display_name(name, &d.human_name);
        if ty.is_numeric() {
            host.set_parameter_range(name, d.param_type.range().unwrap_or_default());
        }
        if let Some(options) = d.param_type.options() {
            host.set_combo_options(name, options);
        }
        out.names.push(name.to_owned());
    }

    host.notify_parameter_list_changed();
    tracing::debug!(
        added = out.added.len(),
        updated = out.updated.len(),
        removed = out.removed.len(),
        retyped = out.retyped.len(),
        "reconciled parameters"
    );
    out
}

#[cfg(test)]
#[path = "../../tests/unit/params/reconcile.rs"]
mod tests;
