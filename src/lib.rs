//! StagCut: selection cutout export
//!
//! Turns a finished selection gesture on a raster into a grayscale,
//! tightly-cropped PNG, with Python bindings via PyO3 and WASM bindings for
//! JavaScript.
//!
//! ## Image Format
//! Rasters are RGBA u8 arrays of shape (height, width, 4).
//!
//! ## Pipeline
//! 1. Pick the mask builder for the active tool (lasso, brush, rectangle)
//! 2. Evaluate membership over the raster
//! 3. Grayscale selected pixels (channel average)
//! 4. Clear unselected pixels to transparent (lasso and brush)
//! 5. Crop to the tight bounds of the selection
//! 6. Encode as PNG
//!
//! Insufficient input (no points, degenerate rectangle, empty mask) produces
//! no image rather than an error.

pub mod config;
pub mod error;
pub mod export;
pub mod filters;
pub mod raster;
pub mod selection;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{BrushSettings, ExportOptions, FillRule, LassoSettings};
pub use error::{Result, StagError};
pub use export::{
    export_selection, render_selection, ExportOutcome, ExportedImage, ExportedRaster, SkipReason,
};
pub use raster::{MediaType, Raster};
pub use selection::{BoundingBox, Point, SelectionMask, SelectionTool};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use ndarray::Array2;
    use numpy::{IntoPyArray, PyArray2, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use pyo3::types::PyBytes;

    use crate::config::{BrushSettings, ExportOptions, FillRule, LassoSettings};
    use crate::error::StagError;
    use crate::export::{self, ExportOutcome};
    use crate::raster::Raster;
    use crate::selection::{self, Point, SelectionMask, SelectionTool};

    fn to_py_err(err: StagError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    fn to_points(points: Vec<(f32, f32)>) -> Vec<Point> {
        points.into_iter().map(Point::from).collect()
    }

    fn fill_rule(even_odd: bool) -> FillRule {
        if even_odd {
            FillRule::EvenOdd
        } else {
            FillRule::NonZero
        }
    }

    fn options(brush_size: f32, brush_opacity: f32, even_odd: bool) -> ExportOptions {
        ExportOptions::default()
            .with_brush(BrushSettings::new(brush_size, brush_opacity))
            .with_lasso(LassoSettings::default().with_fill_rule(fill_rule(even_odd)))
    }

    fn mask_to_py<'py>(py: Python<'py>, mask: SelectionMask) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let shape = (mask.height(), mask.width());
        let array = Array2::from_shape_vec(shape, mask.into_vec())
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(array.into_pyarray(py))
    }

    fn parse_tool(tool: &str) -> PyResult<SelectionTool> {
        tool.parse::<SelectionTool>().map_err(to_py_err)
    }

    // ========================================================================
    // Mask Builders
    // ========================================================================

    /// Lasso selection mask of shape (height, width), 255 = selected.
    ///
    /// # Arguments
    /// * `points` - Polygon vertices as (x, y) tuples, implicitly closed
    /// * `width` - Raster width
    /// * `height` - Raster height
    /// * `even_odd` - Use even-odd instead of nonzero fill
    #[pyfunction]
    #[pyo3(signature = (points, width, height, even_odd=false))]
    pub fn lasso_mask<'py>(
        py: Python<'py>,
        points: Vec<(f32, f32)>,
        width: usize,
        height: usize,
        even_odd: bool,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let mask = selection::lasso_mask(&to_points(points), width, height, fill_rule(even_odd));
        mask_to_py(py, mask)
    }

    /// Brush selection mask of shape (height, width), 255 = selected.
    #[pyfunction]
    #[pyo3(signature = (points, width, height, brush_size=30.0))]
    pub fn brush_mask<'py>(
        py: Python<'py>,
        points: Vec<(f32, f32)>,
        width: usize,
        height: usize,
        brush_size: f32,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        BrushSettings::default()
            .with_diameter(brush_size)
            .validate()
            .map_err(to_py_err)?;
        let mask = selection::brush_mask(&to_points(points), brush_size, width, height);
        mask_to_py(py, mask)
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Cropped, grayscaled selection as an RGBA array, or None when there is
    /// nothing to export.
    #[pyfunction]
    #[pyo3(signature = (image, tool, points, brush_size=30.0, brush_opacity=0.5, even_odd=false))]
    pub fn render_selection<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        tool: &str,
        points: Vec<(f32, f32)>,
        brush_size: f32,
        brush_opacity: f32,
        even_odd: bool,
    ) -> PyResult<Option<Bound<'py, PyArray3<u8>>>> {
        let raster = Raster::from_array(image.as_array().to_owned()).map_err(to_py_err)?;
        let outcome = export::render_selection(
            &raster,
            parse_tool(tool)?,
            &to_points(points),
            &options(brush_size, brush_opacity, even_odd),
        )
        .map_err(to_py_err)?;

        Ok(outcome.exported().map(|out| out.pixels.into_pyarray(py)))
    }

    /// Export the selection as PNG.
    ///
    /// # Returns
    /// `(filename, png_bytes)`, or None when there is nothing to export
    #[pyfunction]
    #[pyo3(signature = (image, tool, points, brush_size=30.0, brush_opacity=0.5, even_odd=false))]
    pub fn export_selection<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        tool: &str,
        points: Vec<(f32, f32)>,
        brush_size: f32,
        brush_opacity: f32,
        even_odd: bool,
    ) -> PyResult<Option<(String, Bound<'py, PyBytes>)>> {
        let raster = Raster::from_array(image.as_array().to_owned()).map_err(to_py_err)?;
        let outcome = export::export_selection(
            &raster,
            parse_tool(tool)?,
            &to_points(points),
            &options(brush_size, brush_opacity, even_odd),
        )
        .map_err(to_py_err)?;

        Ok(match outcome {
            ExportOutcome::Exported(img) => {
                Some((img.filename.to_string(), PyBytes::new(py, &img.png)))
            }
            ExportOutcome::Skipped(_) => None,
        })
    }

    /// Suggested download filename for a tool.
    #[pyfunction]
    pub fn export_filename(tool: &str) -> PyResult<&'static str> {
        Ok(parse_tool(tool)?.export_filename())
    }

    /// Decode an uploaded PNG/JPEG into an RGBA array after checking its
    /// declared media type.
    #[pyfunction]
    pub fn decode_upload<'py>(
        py: Python<'py>,
        data: &[u8],
        media_type: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let raster = Raster::decode(data, media_type).map_err(to_py_err)?;
        Ok(raster.into_array().into_pyarray(py))
    }

    /// StagCut Rust extension module
    #[pymodule]
    pub fn stagcut(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Mask builders
        m.add_function(wrap_pyfunction!(lasso_mask, m)?)?;
        m.add_function(wrap_pyfunction!(brush_mask, m)?)?;

        // Export
        m.add_function(wrap_pyfunction!(render_selection, m)?)?;
        m.add_function(wrap_pyfunction!(export_selection, m)?)?;
        m.add_function(wrap_pyfunction!(export_filename, m)?)?;

        // Upload
        m.add_function(wrap_pyfunction!(decode_upload, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::stagcut;
