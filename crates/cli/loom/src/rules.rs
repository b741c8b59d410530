//! Rules command implementation

use anyhow::Result;
use colored::Colorize;
use lm_eval::Rule;
use lm_manifest::LoadedManifest;

pub fn rules(loaded: &LoadedManifest, scope_name: &str) -> Result<()> {
    let scope = crate::find_scope(loaded, scope_name)?;
    let tree = loaded.tree();
    let table = tree.env(scope).rules();

    if table.is_empty() {
        println!("{} no rules in scope `{}`", "Note:".yellow().bold(), scope_name);
        return Ok(());
    }

    for (name, &rule) in table {
        println!("{} {}", "rule".bold(), name.as_str().cyan());

        let mut bindings: Vec<_> = tree.rule(rule).bindings().collect();
        bindings.sort_by_key(|&(key, _)| key);
        for (key, value) in bindings {
            // Keys outside the reserved vocabulary are kept but mean nothing to the executor.
            let key = if Rule::is_reserved_binding(key) {
                key.green()
            } else {
                key.yellow()
            };
            println!("  {key} = {}", value.serialize());
        }
    }
    Ok(())
}
