//! Variable names across parser versions.

use ruby_cst::VarName;

/// Logical name of a global, class or instance variable.
///
/// Newer parsers expose a `lexical_name` and a ready-made `name`; older ones
/// only expose the token with its sigil, whose first `prefix_len` characters
/// are dropped.
///
/// # Examples
/// ```
/// use ruby_cst::build::{legacy_var_name, var_name};
/// use rubymm::resolve_name;
///
/// assert_eq!(resolve_name(&var_name("count"), 2), "count");
/// assert_eq!(resolve_name(&legacy_var_name("@@count"), 2), "count");
/// ```
pub fn resolve_name(var: &VarName, prefix_len: usize) -> String {
    match var.lexical_name {
        Some(_) => var.name.clone(),
        None => var.name.chars().skip(prefix_len).collect(),
    }
}
