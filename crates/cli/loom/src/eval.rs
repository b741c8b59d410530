//! Eval command implementation

use anyhow::Result;
use colored::Colorize;
use lm_eval::RESERVED_BINDINGS;
use lm_manifest::LoadedManifest;

pub fn eval(loaded: &LoadedManifest, scope_name: &str, keys: &[String]) -> Result<()> {
    let scope = crate::find_scope(loaded, scope_name)?;

    match loaded.edge_rule(scope) {
        Some(rule) => println!("{} {}", "rule".bold(), rule.name().cyan()),
        None => println!(
            "{} scope `{}` has no rule; showing inherited values",
            "Note:".yellow().bold(),
            scope_name
        ),
    }

    // Without explicit keys, only show the reserved keys that expand to something.
    let explicit = !keys.is_empty();
    let keys: Vec<&str> = if explicit {
        keys.iter().map(String::as_str).collect()
    } else {
        RESERVED_BINDINGS.to_vec()
    };

    for key in keys {
        let value = loaded.evaluate_binding(scope, key)?;
        if value.is_empty() && !explicit {
            continue;
        }
        println!("  {} = {}", key.green(), value);
    }
    Ok(())
}
