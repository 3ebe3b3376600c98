//! Persisted plugin state.
//!
//! State format: JSON object mapping stable [`ParamId`](sala_core::ParamId)
//! to value.
//!
//! ```json
//! {"1500": 0.5, "1501": 0.5, "1502": 0.5, "1503": 0.5, "1504": 0.0}
//! ```
//!
//! Keying by id rather than index keeps old sessions loadable when the
//! parameter order changes. Unknown ids and non-numeric entries are skipped;
//! known values are clamped on the way in.

use std::io::{Read, Write};

use thiserror::Error;
use tracing::{debug, warn};

use crate::params::ReverbParams;

/// Errors from saving or restoring state.
#[derive(Debug, Error)]
pub enum StateError {
    /// The payload is not valid JSON, or could not be serialized.
    #[error("invalid state JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is valid JSON but not an object.
    #[error("state is not a JSON object")]
    NotAnObject,

    /// The host stream failed.
    #[error("state stream error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize every parameter to the JSON state format.
pub fn save_state(params: &ReverbParams) -> Result<Vec<u8>, StateError> {
    let mut state = serde_json::Map::new();
    for (i, desc) in params.descriptors().iter().enumerate() {
        if let Some(val) = params.get_value(i) {
            state.insert(
                desc.id.0.to_string(),
                serde_json::Value::from(f64::from(val)),
            );
        }
    }
    Ok(serde_json::to_vec(&serde_json::Value::Object(state))?)
}

/// Restore parameters from the JSON state format.
///
/// Returns how many parameters were applied. Parameters absent from the
/// payload keep their current values.
pub fn load_state(params: &ReverbParams, bytes: &[u8]) -> Result<usize, StateError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    let Some(obj) = value.as_object() else {
        return Err(StateError::NotAnObject);
    };

    let mut applied = 0;
    for (key, val) in obj {
        let Some(index) = key.parse::<u32>().ok().and_then(|id| params.index_by_id(id)) else {
            warn!(key = %key, "ignoring unknown parameter in state");
            continue;
        };
        let Some(v) = val.as_f64() else {
            warn!(key = %key, "ignoring non-numeric parameter value in state");
            continue;
        };
        params.set_value(index, v as f32);
        applied += 1;
    }

    debug!(applied, "state restored");
    Ok(applied)
}

/// [`save_state`] into a host-provided stream.
pub fn write_state<W: Write>(params: &ReverbParams, mut output: W) -> Result<(), StateError> {
    let json = save_state(params)?;
    output.write_all(&json)?;
    Ok(())
}

/// [`load_state`] from a host-provided stream.
pub fn read_state<R: Read>(params: &ReverbParams, mut input: R) -> Result<usize, StateError> {
    let mut buf = Vec::new();
    input.read_to_end(&mut buf)?;
    load_state(params, &buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ReverbSettings;

    #[test]
    fn roundtrip_restores_values() {
        let params = ReverbParams::default();
        params.size.set(0.8);
        params.damp.set(0.1);
        params.width.set(1.0);
        params.mix.set(0.3);
        params.freeze.set(true);

        let json = save_state(&params).unwrap();

        let restored = ReverbParams::default();
        assert_eq!(load_state(&restored, &json).unwrap(), 5);
        assert_eq!(restored.snapshot(), params.snapshot());
    }

    #[test]
    fn default_state_shape() {
        let params = ReverbParams::default();
        let json = save_state(&params).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 5);
        assert_eq!(obj["1500"], 0.5);
        assert_eq!(obj["1504"], 0.0);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let params = ReverbParams::default();
        let applied = load_state(&params, br#"{"9999": 1.0, "size": 0.2, "1503": 0.75}"#).unwrap();
        assert_eq!(applied, 1);
        assert_eq!(params.mix.get(), 0.75);
        assert_eq!(params.size.get(), 0.5);
    }

    #[test]
    fn values_are_clamped() {
        let params = ReverbParams::default();
        load_state(&params, br#"{"1500": 4.0, "1501": -1.0, "1504": 7.0}"#).unwrap();
        assert_eq!(params.size.get(), 1.0);
        assert_eq!(params.damp.get(), 0.0);
        assert!(params.freeze.get());
    }

    #[test]
    fn non_numeric_entries_are_skipped() {
        let params = ReverbParams::default();
        let applied = load_state(&params, br#"{"1500": "big", "1502": 0.9}"#).unwrap();
        assert_eq!(applied, 1);
        assert_eq!(params.width.get(), 0.9);
        assert_eq!(params.size.get(), 0.5);
    }

    #[test]
    fn partial_state_keeps_other_values() {
        let params = ReverbParams::default();
        params.damp.set(0.9);
        load_state(&params, br#"{"1500": 0.1}"#).unwrap();
        assert_eq!(params.damp.get(), 0.9);
        assert_eq!(params.size.get(), 0.1);
    }

    #[test]
    fn rejects_bad_payloads() {
        let params = ReverbParams::default();
        assert!(matches!(
            load_state(&params, b"not json"),
            Err(StateError::Json(_))
        ));
        assert!(matches!(
            load_state(&params, b"[1, 2, 3]"),
            Err(StateError::NotAnObject)
        ));
        assert_eq!(params.snapshot(), ReverbSettings::default());
    }

    #[test]
    fn stream_roundtrip() {
        let params = ReverbParams::default();
        params.mix.set(0.2);
        let mut buf = Vec::new();
        write_state(&params, &mut buf).unwrap();

        let restored = ReverbParams::default();
        read_state(&restored, buf.as_slice()).unwrap();
        assert_eq!(restored.mix.get(), 0.2);
    }
}
