use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::api;

// ──────────────────────────────────────────────────────────────────────────────
// JSON-str inn, JSON-str ut. Python-siden gjør json.dumps / json.loads selv.
// ──────────────────────────────────────────────────────────────────────────────

fn to_py_err(e: crate::Error) -> PyErr {
    PyValueError::new_err(e.to_string())
}

#[pyfunction]
#[pyo3(signature = (store_json, reference_date, cfg_json = None))]
fn analyze_json(store_json: &str, reference_date: &str, cfg_json: Option<&str>) -> PyResult<String> {
    api::analyze_json(store_json, reference_date, cfg_json).map_err(to_py_err)
}

#[pyfunction]
fn compute_ces_json(totals_json: &str) -> PyResult<String> {
    api::ces_json(totals_json).map_err(to_py_err)
}

#[pyfunction]
fn compute_se_json(json_in: &str) -> PyResult<String> {
    api::se_json(json_in).map_err(to_py_err)
}

#[pyfunction]
fn compute_tse_json(competition_json: &str) -> PyResult<String> {
    api::tse_json(competition_json).map_err(to_py_err)
}

#[pyfunction]
fn compute_distribution_json(training_json: &str, competition_json: &str) -> PyResult<String> {
    api::distribution_json(training_json, competition_json).map_err(to_py_err)
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-MODUL
// ──────────────────────────────────────────────────────────────────────────────

#[pymodule]
fn fencemetrics_core(_py: Python, m: &PyModule) -> PyResult<()> {
    // Hele dashbordet i ett kall
    m.add_function(wrap_pyfunction!(analyze_json, m)?)?;

    // Enkeltkalkulatorer
    m.add_function(wrap_pyfunction!(compute_ces_json, m)?)?;
    m.add_function(wrap_pyfunction!(compute_se_json, m)?)?;
    m.add_function(wrap_pyfunction!(compute_tse_json, m)?)?;
    m.add_function(wrap_pyfunction!(compute_distribution_json, m)?)?;
    Ok(())
}
