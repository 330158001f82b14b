//! # Example Tools
//!
//! Two small reference tools used by the demo, the CLI and the test suite.
//! They exist to exercise the contract shape (name, parameter schema, result
//! mapping); the loop itself never depends on them.

use crate::error::{Error, Result};
use crate::registry::ToolRegistry;
use crate::tool::{ParamKind, ParamSchema, ParamSpec, Tool};
use serde_json::{json, Map, Value};
use std::sync::Arc;

const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11;

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Escape velocity for a celestial body from its mass and radius
pub struct EscapeVelocity;

impl Tool for EscapeVelocity {
    fn name(&self) -> &str {
        "calculate_escape_velocity"
    }

    fn description(&self) -> &str {
        "Calculate escape velocity for a celestial body"
    }

    fn schema(&self) -> ParamSchema {
        ParamSchema::new()
            .with(ParamSpec::required("mass", ParamKind::Number, "body mass in kg"))
            .with(ParamSpec::required("radius", ParamKind::Number, "body radius in m"))
    }

    fn invoke(&self, params: &Map<String, Value>) -> Result<Value> {
        let mass = number_param(params, "mass")?;
        let radius = number_param(params, "radius")?;

        if radius <= 0.0 {
            return Err(Error::tool_failed(self.name(), "radius must be positive"));
        }
        if mass < 0.0 {
            return Err(Error::tool_failed(self.name(), "mass must be non-negative"));
        }

        let v_escape = (2.0 * GRAVITATIONAL_CONSTANT * mass / radius).sqrt();

        Ok(json!({
            "escape_velocity_m_s": round2(v_escape),
            "escape_velocity_km_s": round2(v_escape / 1000.0),
            "mass": mass,
            "radius": radius,
            "status": "success",
        }))
    }
}

/// Hazard lookup over a fixed 3x3 navigation grid
pub struct SectorScan;

impl SectorScan {
    /// Hazard description and safety flag for a sector.
    ///
    /// Coordinates outside the grid are a normal "unknown sector" reading,
    /// not an invocation error.
    fn hazard(x: i64, y: i64) -> (&'static str, bool) {
        match (x, y) {
            (0, 0) => ("Clear - Starting position", true),
            (0, 1) => ("High Radiation - DANGER", false),
            (0, 2) => ("Clear", true),
            (1, 0) => ("Clear", true),
            (1, 1) => ("Asteroid Field - DANGER", false),
            (1, 2) => ("Clear", true),
            (2, 0) => ("Clear", true),
            (2, 1) => ("Ion Storm - DANGER", false),
            (2, 2) => ("Clear - Exit point", true),
            _ => ("Unknown sector - Out of bounds", false),
        }
    }
}

impl Tool for SectorScan {
    fn name(&self) -> &str {
        "scan_sector_hazards"
    }

    fn description(&self) -> &str {
        "Scan a grid sector for navigational hazards"
    }

    fn schema(&self) -> ParamSchema {
        ParamSchema::new()
            .with(ParamSpec::required("x", ParamKind::Integer, "grid column"))
            .with(ParamSpec::required("y", ParamKind::Integer, "grid row"))
    }

    fn invoke(&self, params: &Map<String, Value>) -> Result<Value> {
        let x = integer_param(params, "x")?;
        let y = integer_param(params, "y")?;

        let (hazard, safe) = Self::hazard(x, y);

        Ok(json!({
            "coordinates": format!("({}, {})", x, y),
            "hazard_description": hazard,
            "safe": safe,
            "status": "success",
        }))
    }
}

/// Registry holding both example tools
pub fn builtin_registry() -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(SectorScan))?;
    registry.register(Arc::new(EscapeVelocity))?;
    Ok(registry)
}

fn number_param(params: &Map<String, Value>, name: &'static str) -> Result<f64> {
    params
        .get(name)
        .and_then(Value::as_f64)
        .ok_or_else(|| Error::invalid_params(format!("parameter '{}' must be a number", name)))
}

fn integer_param(params: &Map<String, Value>, name: &'static str) -> Result<i64> {
    params
        .get(name)
        .and_then(Value::as_i64)
        .ok_or_else(|| Error::invalid_params(format!("parameter '{}' must be an integer", name)))
}
