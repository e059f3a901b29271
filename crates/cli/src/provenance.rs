use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};

/// Run parameters and input files behind an output.
pub struct Payload {
    pub params: Value,
    pub inputs: Vec<String>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            inputs: Vec::new(),
        }
    }

    pub fn with_inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs.extend(inputs.into_iter().map(Into::into));
        self
    }
}

#[track_caller]
pub fn document(payload: &Payload, outputs: &[&Path]) -> Value {
    let at = Location::caller();
    json!({
        "siting_version": siting::VERSION,
        "commit": option_env!("GIT_COMMIT").unwrap_or("unknown"),
        "written_by": format!("{}:{}", at.file(), at.line()),
        "inputs": payload.inputs,
        "params": payload.params,
        "outputs": outputs.iter().map(|p| p.to_string_lossy()).collect::<Vec<_>>()
    })
}

/// Write the record for `artifact` to `<stem>.provenance.json` beside it.
///
/// The artifact's directory must already exist.
#[track_caller]
pub fn write_sidecar(artifact: &Path, payload: Payload) -> Result<PathBuf> {
    let sidecar = artifact.with_extension("provenance.json");
    let doc = document(&payload, &[artifact]);
    fs::write(&sidecar, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", sidecar.display()))?;
    Ok(sidecar)
}
