//! Presentation sinks: where finished plates go once the pipeline is done.

use std::path::{Path, PathBuf};

use plate_kernel::{BoxKernel, RenderMesh, SolidGeometryProvider};
use plate_ops::{PlateKind, PlatePair};
use tracing::info;

use crate::errors::ExportError;
use crate::step_export::export_step_plates;
use crate::stl::{export_ascii_stl, export_binary_stl};

/// Box-set tessellation is exact; the tolerance only matters to B-rep kernels.
const TESSELLATION_TOLERANCE: f64 = 0.01;

/// File naming for a plate pair: `<stem>_base.<ext>` and `<stem>_cut.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateNames {
    pub stem: String,
}

impl PlateNames {
    pub fn new(stem: impl Into<String>) -> Self {
        Self { stem: stem.into() }
    }

    /// Use the image file's stem, or `marker` when it has none.
    pub fn from_path(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "marker".to_string());
        Self { stem }
    }

    pub fn plate_name(&self, kind: PlateKind) -> String {
        format!("{}_{kind}", self.stem)
    }

    pub fn file_name(&self, kind: PlateKind, extension: &str) -> String {
        format!("{}.{extension}", self.plate_name(kind))
    }
}

/// Receives the two finished solids for display or export.
///
/// `K` is the provider that owns the plate handles. Mesh sinks accept any
/// provider; STEP export needs the box decomposition.
pub trait PresentationSink<K: ?Sized> {
    fn present(
        &mut self,
        kernel: &mut K,
        plates: &PlatePair,
        names: &PlateNames,
    ) -> Result<(), ExportError>;
}

fn tessellate_plate<K: SolidGeometryProvider + ?Sized>(
    kernel: &mut K,
    plates: &PlatePair,
    kind: PlateKind,
) -> Result<RenderMesh, ExportError> {
    let mesh = kernel.tessellate(plates.get(kind), TESSELLATION_TOLERANCE)?;
    if mesh.triangle_count() == 0 {
        return Err(ExportError::EmptyMesh { plate: kind });
    }
    Ok(mesh)
}

fn write_file(dir: &Path, name: &str, contents: &[u8]) -> Result<PathBuf, ExportError> {
    let io_err = |path: &Path, e: std::io::Error| ExportError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    };
    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    let path = dir.join(name);
    std::fs::write(&path, contents).map_err(|e| io_err(&path, e))?;
    info!(path = %path.display(), bytes = contents.len(), "wrote plate");
    Ok(path)
}

/// STL flavor written by [`StlSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StlEncoding {
    #[default]
    Binary,
    Ascii,
}

/// Writes one STL file per plate into a directory.
#[derive(Debug, Clone)]
pub struct StlSink {
    pub out_dir: PathBuf,
    pub encoding: StlEncoding,
    /// Paths written so far, base before cut.
    pub written: Vec<PathBuf>,
}

impl StlSink {
    pub fn new(out_dir: impl Into<PathBuf>, encoding: StlEncoding) -> Self {
        Self {
            out_dir: out_dir.into(),
            encoding,
            written: Vec::new(),
        }
    }
}

impl<K: SolidGeometryProvider + ?Sized> PresentationSink<K> for StlSink {
    fn present(
        &mut self,
        kernel: &mut K,
        plates: &PlatePair,
        names: &PlateNames,
    ) -> Result<(), ExportError> {
        // Encode both plates before touching the disk, so a failure leaves no partial pair.
        let mut files = Vec::with_capacity(2);
        for kind in [PlateKind::Base, PlateKind::Cut] {
            let mesh = tessellate_plate(kernel, plates, kind)?;
            let solid_name = names.plate_name(kind);
            let bytes = match self.encoding {
                StlEncoding::Binary => export_binary_stl(&mesh, &solid_name)?,
                StlEncoding::Ascii => export_ascii_stl(&mesh, &solid_name)?.into_bytes(),
            };
            files.push((names.file_name(kind, "stl"), bytes));
        }
        for (name, bytes) in files {
            let path = write_file(&self.out_dir, &name, &bytes)?;
            self.written.push(path);
        }
        Ok(())
    }
}

/// Writes one AP203 STEP file per plate into a directory.
#[derive(Debug, Clone)]
pub struct StepSink {
    pub out_dir: PathBuf,
    pub written: Vec<PathBuf>,
}

impl StepSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            written: Vec::new(),
        }
    }
}

impl PresentationSink<BoxKernel> for StepSink {
    fn present(
        &mut self,
        kernel: &mut BoxKernel,
        plates: &PlatePair,
        names: &PlateNames,
    ) -> Result<(), ExportError> {
        let step = export_step_plates(kernel, plates, names)?;
        for (kind, text) in [(PlateKind::Base, step.base), (PlateKind::Cut, step.cut)] {
            let path = write_file(&self.out_dir, &names.file_name(kind, "step"), text.as_bytes())?;
            self.written.push(path);
        }
        Ok(())
    }
}

/// Keeps tessellated plates in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub presented: Vec<(String, RenderMesh, RenderMesh)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base and cut mesh of the most recent pair.
    pub fn last(&self) -> Option<(&RenderMesh, &RenderMesh)> {
        self.presented.last().map(|(_, base, cut)| (base, cut))
    }
}

impl<K: SolidGeometryProvider + ?Sized> PresentationSink<K> for MemorySink {
    fn present(
        &mut self,
        kernel: &mut K,
        plates: &PlatePair,
        names: &PlateNames,
    ) -> Result<(), ExportError> {
        let base = tessellate_plate(kernel, plates, PlateKind::Base)?;
        let cut = tessellate_plate(kernel, plates, PlateKind::Cut)?;
        self.presented.push((names.stem.clone(), base, cut));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plate_kernel::TruckKernel;

    #[test]
    fn names_from_path() {
        let names = PlateNames::from_path(Path::new("/tmp/markers/aruco_7.svg"));
        assert_eq!(names.stem, "aruco_7");
        assert_eq!(names.file_name(PlateKind::Base, "stl"), "aruco_7_base.stl");
        assert_eq!(names.file_name(PlateKind::Cut, "step"), "aruco_7_cut.step");
    }

    #[test]
    fn names_fallback_stem() {
        assert_eq!(PlateNames::from_path(Path::new("/")).stem, "marker");
    }

    #[test]
    fn memory_sink_collects_both_meshes() {
        let mut kernel = BoxKernel::new();
        let base = kernel.make_box([2.0, 2.0, 1.0], [0.0, 0.0, 1.0]).unwrap();
        let cut = kernel.make_box([1.0, 1.0, 1.0], [0.0; 3]).unwrap();
        let mut sink = MemorySink::new();
        sink.present(&mut kernel, &PlatePair { base, cut }, &PlateNames::new("m"))
            .unwrap();

        let (base_mesh, cut_mesh) = sink.last().unwrap();
        assert!((base_mesh.signed_volume() - 4.0).abs() < 1e-5);
        assert!((cut_mesh.signed_volume() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn memory_sink_accepts_truck_plates() {
        let mut kernel = TruckKernel::new();
        let base = kernel.make_box([2.0, 2.0, 1.0], [0.0, 0.0, 1.0]).unwrap();
        let cut = kernel.make_box([1.0, 1.0, 1.0], [0.0; 3]).unwrap();
        let mut sink = MemorySink::new();
        sink.present(&mut kernel, &PlatePair { base, cut }, &PlateNames::new("t"))
            .unwrap();

        let (base_mesh, cut_mesh) = sink.last().unwrap();
        assert!((base_mesh.signed_volume() - 4.0).abs() < 1e-3);
        assert!((cut_mesh.signed_volume() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn empty_plate_is_not_presented() {
        let mut kernel = BoxKernel::new();
        let base = kernel.make_box([2.0, 2.0, 1.0], [0.0; 3]).unwrap();
        let cut = kernel.make_box([0.0, 1.0, 1.0], [0.0; 3]).unwrap();
        let err = MemorySink::new()
            .present(&mut kernel, &PlatePair { base, cut }, &PlateNames::new("m"))
            .unwrap_err();
        assert!(matches!(err, ExportError::EmptyMesh { plate: PlateKind::Cut }));
    }
}
