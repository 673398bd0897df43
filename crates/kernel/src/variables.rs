use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Key under which the frame loop stores the last frame duration, in seconds.
pub const TICK: &str = "tick";

/// A value stored in [`WorldVariables`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VarValue {
    Float(f64),
    Int(i64),
    Bool(bool),
    Text(String),
}

impl VarValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }
}

/// String-keyed variable table shared by the subsystems of one session.
///
/// Uses BTreeMap so overlays and log dumps list keys in a stable order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldVariables {
    values: BTreeMap<String, VarValue>,
}

impl WorldVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`.
    pub fn set(&mut self, key: impl Into<String>, value: VarValue) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&VarValue> {
        self.values.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<VarValue> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VarValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overwrite `"tick"` with the duration of the frame that just ended.
    pub fn set_tick(&mut self, frame: Duration) {
        self.set(TICK, VarValue::Float(frame.as_secs_f64()));
    }

    /// Last frame duration in seconds, zero before the first frame.
    pub fn tick(&self) -> f64 {
        self.get(TICK).and_then(VarValue::as_f64).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_defaults_to_zero() {
        let vars = WorldVariables::new();
        assert_eq!(vars.tick(), 0.0);
        assert!(vars.is_empty());
    }

    #[test]
    fn tick_is_overwritten_not_accumulated() {
        let mut vars = WorldVariables::new();
        vars.set_tick(Duration::from_millis(16));
        vars.set_tick(Duration::from_millis(20));
        assert!((vars.tick() - 0.020).abs() < 1e-9);
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn arbitrary_keys() {
        let mut vars = WorldVariables::new();
        vars.set("frames", VarValue::Int(3));
        vars.set("paused", VarValue::Bool(false));
        assert_eq!(vars.get("frames"), Some(&VarValue::Int(3)));
        assert_eq!(vars.get("paused").and_then(VarValue::as_f64), None);
        assert_eq!(vars.remove("frames"), Some(VarValue::Int(3)));
        let keys: Vec<&str> = vars.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["paused"]);
    }
}
