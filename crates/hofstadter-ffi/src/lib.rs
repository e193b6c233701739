// ─────────────────────────────────────────────────────────────────────
// Hofstadter Heart Kernel — PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied: PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the sequence engine and the
//! point-cloud generator, for renderers living on the Python side.
//!
//! # FFI Safety
//!
//! - Config validated before storage (`CloudConfig::validate()`).
//! - `HeartError::Config` → `ValueError`, `HeartError::Capacity` →
//!   `MemoryError`; every other kernel error → `RuntimeError`. Memo
//!   growth is fallible, so oversized ranges surface as exceptions
//!   rather than panics.
//! - The shared sequence engine sits behind a `parking_lot::Mutex`, so
//!   a `SequenceEngine` object may be used from several Python threads.
//!
//! Install: `pip install -e crates/hofstadter-ffi` (requires maturin).
//!
//! Usage from Python:
//! ```python
//! from hofstadter_heart import generate
//!
//! cloud = generate(n_max=10750, step=1)
//! positions, colors = cloud.positions(), cloud.colors()
//! camera = cloud.view.position
//! ```

use parking_lot::Mutex;
use pyo3::exceptions::{PyMemoryError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use hofstadter_cloud::{CloudGenerator, PointCloud, ViewPreset};
use hofstadter_seq::SequenceEngine;
use hofstadter_types::config::DEFAULT_N_MAX;
use hofstadter_types::{CloudConfig, HeartError, Sequence, Vec3, ViewSuggestion};

fn to_py_err(e: HeartError) -> PyErr {
    match e {
        HeartError::Config(_) => PyValueError::new_err(e.to_string()),
        HeartError::Capacity { .. } => PyMemoryError::new_err(e.to_string()),
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

fn tuple(v: Vec3) -> (f64, f64, f64) {
    (v.x, v.y, v.z)
}

// ─── PyCloudConfig ──────────────────────────────────────────────────

/// Python-visible generation configuration.
#[pyclass(name = "CloudConfig")]
#[derive(Clone)]
struct PyCloudConfig {
    inner: CloudConfig,
}

#[pymethods]
impl PyCloudConfig {
    #[new]
    #[pyo3(signature = (
        n_max = DEFAULT_N_MAX,
        step = 1,
        x_scale = 0.03,
        y_scale = 0.125,
        z_scale = 0.1,
        z_lookback = 5,
        flat_prefix = 10,
        x_limit = 200.0,
        y_limit = 100.0,
        z_limit = 50.0,
        correlation_threshold = 0.3,
        camera_distance_factor = 3.0,
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        n_max: i64,
        step: i64,
        x_scale: f64,
        y_scale: f64,
        z_scale: f64,
        z_lookback: i64,
        flat_prefix: i64,
        x_limit: f64,
        y_limit: f64,
        z_limit: f64,
        correlation_threshold: f64,
        camera_distance_factor: f64,
    ) -> PyResult<Self> {
        let config = CloudConfig {
            n_max,
            step,
            x_scale,
            y_scale,
            z_scale,
            z_lookback,
            flat_prefix,
            x_limit,
            y_limit,
            z_limit,
            correlation_threshold,
            camera_distance_factor,
        };
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    /// Construct from JSON string; omitted fields take their defaults.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config = CloudConfig::from_json(json).map_err(to_py_err)?;
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    fn to_json(&self) -> PyResult<String> {
        self.inner.to_json().map_err(to_py_err)
    }

    #[getter]
    fn n_max(&self) -> i64 {
        self.inner.n_max
    }

    #[getter]
    fn step(&self) -> i64 {
        self.inner.step
    }

    fn __repr__(&self) -> String {
        format!(
            "CloudConfig(n_max={}, step={}, scales=({}, {}, {}), limits=({}, {}, {}))",
            self.inner.n_max,
            self.inner.step,
            self.inner.x_scale,
            self.inner.y_scale,
            self.inner.z_scale,
            self.inner.x_limit,
            self.inner.y_limit,
            self.inner.z_limit
        )
    }
}

// ─── PyViewSuggestion ───────────────────────────────────────────────

/// Camera position and look-at target.
#[pyclass(name = "ViewSuggestion")]
#[derive(Clone)]
struct PyViewSuggestion {
    inner: ViewSuggestion,
}

#[pymethods]
impl PyViewSuggestion {
    #[getter]
    fn position(&self) -> (f64, f64, f64) {
        tuple(self.inner.position)
    }

    #[getter]
    fn target(&self) -> (f64, f64, f64) {
        tuple(self.inner.target)
    }

    fn __repr__(&self) -> String {
        format!(
            "ViewSuggestion(position={:?}, target={:?})",
            self.inner.position.to_array(),
            self.inner.target.to_array()
        )
    }
}

// ─── PyPointCloud ───────────────────────────────────────────────────

/// Generated cloud: index-aligned positions and colors plus framing.
#[pyclass(name = "PointCloud")]
struct PyPointCloud {
    inner: PointCloud,
}

#[pymethods]
impl PyPointCloud {
    /// Flat [x0, y0, z0, x1, ...] buffer.
    fn positions(&self) -> Vec<f32> {
        self.inner.positions_f32()
    }

    /// Flat [r0, g0, b0, r1, ...] buffer, linear RGB.
    fn colors(&self) -> Vec<f32> {
        self.inner.colors_f32()
    }

    /// Source index of each point.
    fn indices(&self) -> Vec<i64> {
        self.inner.points.iter().map(|p| p.n).collect()
    }

    #[getter]
    fn bounds(&self) -> ((f64, f64, f64), (f64, f64, f64)) {
        (tuple(self.inner.bounds.min), tuple(self.inner.bounds.max))
    }

    #[getter]
    fn view(&self) -> PyViewSuggestion {
        PyViewSuggestion {
            inner: self.inner.view,
        }
    }

    fn stats<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let s = self.inner.stats;
        let dict = PyDict::new(py);
        dict.set_item("scanned", s.scanned)?;
        dict.set_item("emitted", s.emitted)?;
        dict.set_item("rejected", s.rejected)?;
        dict.set_item("concordant", s.concordant)?;
        dict.set_item("discordant", s.discordant)?;
        Ok(dict)
    }

    fn to_json(&self) -> PyResult<String> {
        self.inner.to_json().map_err(to_py_err)
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "PointCloud(points={}, rejected={}, bounds_min={:?}, bounds_max={:?})",
            self.inner.len(),
            self.inner.stats.rejected,
            self.inner.bounds.min.to_array(),
            self.inner.bounds.max.to_array()
        )
    }
}

// ─── PySequenceEngine ───────────────────────────────────────────────

/// Memoized a(n) / Q(n) evaluator shared across calls.
#[pyclass(name = "SequenceEngine")]
struct PySequenceEngine {
    inner: Mutex<SequenceEngine>,
}

#[pymethods]
impl PySequenceEngine {
    #[new]
    #[pyo3(signature = (capacity = 0))]
    fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(SequenceEngine::with_capacity(capacity)),
        }
    }

    fn a(&self, n: i64) -> PyResult<i64> {
        self.inner.lock().evaluate_a(n).map_err(to_py_err)
    }

    #[allow(non_snake_case)]
    fn Q(&self, n: i64) -> PyResult<i64> {
        self.inner.lock().evaluate_q(n).map_err(to_py_err)
    }

    fn difference(&self, n: i64) -> PyResult<i64> {
        self.inner.lock().difference(n).map_err(to_py_err)
    }

    /// (a values, Q values) over 0..=n_max.
    fn tables(&self, n_max: i64) -> PyResult<(Vec<i64>, Vec<i64>)> {
        let tables = self.inner.lock().build_tables(n_max).map_err(to_py_err)?;
        Ok((tables.a.values().to_vec(), tables.q.values().to_vec()))
    }

    fn computed_len(&self) -> (usize, usize) {
        let engine = self.inner.lock();
        (
            engine.computed_len(Sequence::A),
            engine.computed_len(Sequence::Q),
        )
    }

    fn stats<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let s = self.inner.lock().stats();
        let dict = PyDict::new(py);
        dict.set_item("derivations_a", s.derivations_a)?;
        dict.set_item("derivations_q", s.derivations_q)?;
        dict.set_item("memo_hits", s.memo_hits)?;
        Ok(dict)
    }
}

// ─── Module Functions ───────────────────────────────────────────────

/// Generate with default constants over the given range.
#[pyfunction]
#[pyo3(signature = (n_max = DEFAULT_N_MAX, step = 1))]
fn generate(py: Python<'_>, n_max: i64, step: i64) -> PyResult<PyPointCloud> {
    generate_with(py, PyCloudConfig {
        inner: CloudConfig::with_range(n_max, step),
    })
}

/// Generate with a full configuration. Releases the GIL while computing.
#[pyfunction]
fn generate_with(py: Python<'_>, config: PyCloudConfig) -> PyResult<PyPointCloud> {
    let cfg = config.inner;
    let cloud = py
        .allow_threads(move || CloudGenerator::new(cfg)?.generate())
        .map_err(to_py_err)?;
    Ok(PyPointCloud { inner: cloud })
}

/// Fixed framing by name ("heart", "side", "front", "reset") or key.
#[pyfunction]
fn view_preset(name: &str) -> PyResult<PyViewSuggestion> {
    let preset: ViewPreset = name.parse().map_err(to_py_err)?;
    Ok(PyViewSuggestion {
        inner: preset.view(),
    })
}

// ─── Module Registration ────────────────────────────────────────────

/// Hofstadter Heart Kernel: Rust point-cloud pipeline for Python renderers.
///
/// - `CloudConfig`: configuration
/// - `SequenceEngine`: memoized a(n) / Q(n)
/// - `PointCloud`: generated positions, colors, bounds, view
/// - `ViewSuggestion`: camera framing
/// - `generate`, `generate_with`, `view_preset`
#[pymodule]
fn hofstadter_heart(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCloudConfig>()?;
    m.add_class::<PySequenceEngine>()?;
    m.add_class::<PyPointCloud>()?;
    m.add_class::<PyViewSuggestion>()?;
    m.add_function(wrap_pyfunction!(generate, m)?)?;
    m.add_function(wrap_pyfunction!(generate_with, m)?)?;
    m.add_function(wrap_pyfunction!(view_preset, m)?)?;
    Ok(())
}
