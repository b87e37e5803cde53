use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::Result;
use crate::formula::{ClosedForm, Style};
use crate::network::Network;
use crate::registry::Registry;

/// Source of a Rust function that computes the network without the network:
///
/// ```text
/// pub fn path_fit_2(x: f64) -> f64 {
///     // 1-2-1
///     (0.3*(2.0*x+0.5).tanh()+0.1).tanh()
/// }
/// ```
pub fn rust_function(network: &Network) -> Result<String> {
    let body = ClosedForm::new(Style::Rust).expression(network)?;
    Ok(format!(
        "pub fn path_fit_{}(x: f64) -> f64 {{\n    // {}\n    {}\n}}\n",
        network.id(),
        network.architecture(),
        body
    ))
}

/// Writes `formula-<id>.txt` (the `y = tanh(...)` equation) and
/// `formula-<id>.rs` (see [`rust_function`]) into `dir`, creating it if
/// needed. Returns the written paths.
pub fn write_exports(network: &Network, dir: &Path) -> Result<Vec<PathBuf>> {
    let equation = network.to_closed_form()?;
    let function = rust_function(network)?;

    fs::create_dir_all(dir)?;
    let text_path = dir.join(format!("formula-{}.txt", network.id()));
    let rust_path = dir.join(format!("formula-{}.rs", network.id()));
    fs::write(&text_path, format!("{equation}\n"))?;
    fs::write(&rust_path, function)?;

    info!(
        "network {} ({}): formula exported to {}",
        network.id(),
        network.architecture(),
        dir.display()
    );
    Ok(vec![text_path, rust_path])
}

/// Runs [`write_exports`] for every network in `registry`. Networks without
/// a closed form are logged and skipped. Returns how many were exported.
pub fn export_all(registry: &Registry, dir: &Path) -> usize {
    let mut exported = 0;
    for (id, network) in registry.iter() {
        match write_exports(network, dir) {
            Ok(_) => exported += 1,
            Err(e) => warn!("network {id}: no formula exported: {e}"),
        }
    }
    exported
}
