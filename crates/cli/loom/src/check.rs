//! Check command implementation

use anyhow::Result;
use colored::Colorize;
use lm_manifest::LoadedManifest;
use std::path::Path;

pub fn check(path: &Path, loaded: &LoadedManifest) -> Result<()> {
    println!("{} manifest {:?}", "Checked".green().bold(), path);

    let tree = loaded.tree();
    let mut rule_count = 0;
    let mut edge_count = 0;
    for name in loaded.scope_names() {
        let Some(scope) = loaded.scope(name) else {
            continue;
        };
        rule_count += tree.env(scope).rules().len();
        if loaded.edge_rule(scope).is_some() {
            edge_count += 1;
        }
    }

    println!("  {} {} scopes", "✓".green(), tree.scope_count());
    println!("  {} {} rules", "✓".green(), rule_count);
    println!("  {} {} scopes bound to a rule", "✓".green(), edge_count);
    Ok(())
}
