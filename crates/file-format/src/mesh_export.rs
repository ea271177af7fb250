use wing_engine::WingDocument;
use wing_tessellation::{mesh_to_obj, mesh_to_stl, TriangleMesh};

use crate::errors::ExportError;

/// Loft the wing called `name` into a fresh mesh.
///
/// Fails if there is no such wing or it produced no triangles.
pub fn export_wing_mesh(doc: &mut WingDocument, name: &str) -> Result<TriangleMesh, ExportError> {
    let key = doc
        .find_by_name(name)
        .ok_or_else(|| ExportError::WingNotFound(name.to_string()))?;
    let mut mesh = TriangleMesh::new();
    doc.render_wing(key, &mut mesh)
        .map_err(|_| ExportError::WingNotFound(name.to_string()))?;
    if mesh.is_empty() {
        return Err(ExportError::NoTriangles(name.to_string()));
    }
    Ok(mesh)
}

/// Export the wing called `name` as ASCII STL.
pub fn export_wing_stl(doc: &mut WingDocument, name: &str) -> Result<String, ExportError> {
    let mesh = export_wing_mesh(doc, name)?;
    Ok(mesh_to_stl(&mesh, name))
}

/// Export the wing called `name` as Wavefront OBJ.
pub fn export_wing_obj(doc: &mut WingDocument, name: &str) -> Result<String, ExportError> {
    let mesh = export_wing_mesh(doc, name)?;
    Ok(mesh_to_obj(&mesh))
}
