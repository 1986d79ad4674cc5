//! Bundled parameter presets, compiled in from `data/params`.

use nimbus_core::CloudParams;

use crate::loader::{load_params_from_str, LoadError};

pub const PRESET_NAMES: [&str; 4] = ["default", "cumulus", "overcast", "wisps"];

fn preset_source(name: &str) -> Option<&'static str> {
    match name {
        "default" => Some(include_str!("../../../data/params/default.ron")),
        "cumulus" => Some(include_str!("../../../data/params/cumulus.ron")),
        "overcast" => Some(include_str!("../../../data/params/overcast.ron")),
        "wisps" => Some(include_str!("../../../data/params/wisps.ron")),
        _ => None,
    }
}

/// Load a bundled preset by name. Returns `None` for unknown names.
pub fn preset(name: &str) -> Option<Result<CloudParams, LoadError>> {
    let source = preset_source(name)?;
    log::info!("Loading cloud preset '{name}'");
    Some(load_params_from_str(source))
}
