//! WebAssembly exports for StagCut.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.
//!
//! Images are flat RGBA byte arrays (length = width * height * 4) and
//! gestures are flat coordinate arrays `[x0, y0, x1, y1, ...]`.

use wasm_bindgen::prelude::*;

use crate::config::{BrushSettings, ExportOptions};
use crate::error::StagError;
use crate::export::{export_selection, render_selection, ExportOutcome};
use crate::raster::{MediaType, Raster};
use crate::selection::{points_from_flat, SelectionTool};

fn to_js_err(err: StagError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn brush_options(brush_size: f32, brush_opacity: f32) -> ExportOptions {
    ExportOptions::default().with_brush(BrushSettings::new(brush_size, brush_opacity))
}

// ============================================================================
// Export
// ============================================================================

/// Export the selection as PNG bytes.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `tool` - "lasso", "brush" or "rectangle"
/// * `points` - Flat gesture coordinates in image pixels
/// * `brush_size` - Brush diameter in pixels (brush tool only)
/// * `brush_opacity` - Preview opacity, does not affect the export
///
/// # Returns
/// PNG bytes, or `undefined` when there is nothing to export
#[wasm_bindgen]
pub fn export_selection_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    tool: &str,
    points: &[f32],
    brush_size: f32,
    brush_opacity: f32,
) -> Result<Option<Vec<u8>>, JsValue> {
    let raster = Raster::from_rgba(data.to_vec(), width, height).map_err(to_js_err)?;
    let tool: SelectionTool = tool.parse().map_err(to_js_err)?;

    let outcome = export_selection(
        &raster,
        tool,
        &points_from_flat(points),
        &brush_options(brush_size, brush_opacity),
    )
    .map_err(to_js_err)?;

    Ok(outcome.exported().map(|img| img.png))
}

/// Source-raster region the export would cover.
///
/// # Returns
/// `[x, y, width, height]`, or `undefined` when there is nothing to export
#[wasm_bindgen]
pub fn selection_bounds_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    tool: &str,
    points: &[f32],
    brush_size: f32,
) -> Result<Option<Vec<u32>>, JsValue> {
    let raster = Raster::from_rgba(data.to_vec(), width, height).map_err(to_js_err)?;
    let tool: SelectionTool = tool.parse().map_err(to_js_err)?;

    let outcome = render_selection(
        &raster,
        tool,
        &points_from_flat(points),
        &brush_options(brush_size, BrushSettings::default().opacity),
    )
    .map_err(to_js_err)?;

    Ok(match outcome {
        ExportOutcome::Exported(out) => Some(vec![
            out.bounds.min_x as u32,
            out.bounds.min_y as u32,
            out.width() as u32,
            out.height() as u32,
        ]),
        ExportOutcome::Skipped(_) => None,
    })
}

/// Suggested download filename for a tool.
#[wasm_bindgen]
pub fn export_filename_wasm(tool: &str) -> Result<String, JsValue> {
    let tool: SelectionTool = tool.parse().map_err(to_js_err)?;
    Ok(tool.export_filename().to_string())
}

/// Check an upload's declared media type (PNG and JPEG only).
#[wasm_bindgen]
pub fn is_supported_media_type_wasm(media_type: &str) -> bool {
    MediaType::from_mime(media_type).is_ok()
}
