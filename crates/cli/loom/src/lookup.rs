//! Lookup command implementation

use anyhow::Result;
use lm_eval::Env;
use lm_manifest::LoadedManifest;

pub fn lookup(loaded: &LoadedManifest, scope_name: &str, var: &str) -> Result<()> {
    let scope = crate::find_scope(loaded, scope_name)?;
    println!("{}", loaded.tree().env(scope).lookup_variable(var));
    Ok(())
}
