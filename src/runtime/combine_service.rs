use std::path::Path;

use serde::Serialize;

use crate::assign::{Collision, assign_planes};
use crate::store::{DirSource, SourceStore, TiffSink};
use crate::workflow::{
    CombineSpec, GroupReport, WorkflowError, load_spec, run_combine, run_groups,
};

use super::Result;

/// Layout summary computed without fetching or writing any pixels.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutInfo {
    pub source_count: usize,
    pub size_x: usize,
    pub size_y: usize,
    pub size_z: usize,
    pub size_c: usize,
    pub size_t: usize,
    pub channels: Vec<String>,
    pub mapped_planes: usize,
    pub missing_planes: usize,
    pub collisions: Vec<Collision>,
}

/// Wires the combine workflow to the filesystem store for the CLI. The
/// directory of plane files is the input dataset; assembled volumes land in
/// the output directory as multi-page TIFFs with JSON sidecars.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombineService;

impl CombineService {
    pub fn load_spec(&self, path: impl AsRef<Path>) -> Result<CombineSpec> {
        Ok(load_spec(path)?)
    }

    /// Dry run: lists the directory, assigns coordinates, and reports the
    /// resulting shape and any collisions.
    pub fn inspect_dir(&self, input: impl AsRef<Path>, spec: &CombineSpec) -> Result<LayoutInfo> {
        let source = DirSource::open(input)?;
        let patterns = spec.patterns().map_err(WorkflowError::from)?;
        let mut images = source.list_source_images(0)?;
        if let Some(filter) = spec.filter_names.as_deref()
            && !filter.is_empty()
        {
            images.retain(|image| image.name.contains(filter));
        }
        if images.is_empty() {
            return Ok(LayoutInfo {
                source_count: 0,
                size_x: 0,
                size_y: 0,
                size_z: 0,
                size_c: 0,
                size_t: 0,
                channels: Vec::new(),
                mapped_planes: 0,
                missing_planes: 0,
                collisions: Vec::new(),
            });
        }
        let layout = assign_planes(&images, &patterns).map_err(WorkflowError::from)?;
        Ok(LayoutInfo {
            source_count: images.len(),
            size_x: layout.size_x,
            size_y: layout.size_y,
            size_z: layout.size_z,
            size_c: layout.size_c,
            size_t: layout.size_t,
            channels: layout.channels.clone(),
            mapped_planes: layout.planes.len(),
            missing_planes: layout.missing_coords().len(),
            collisions: layout.collisions,
        })
    }

    /// Runs the recipe against a directory of plane files. With a group
    /// pattern, one volume per derived group; otherwise a single volume.
    pub fn run_dir(
        &self,
        input: impl AsRef<Path>,
        spec: &CombineSpec,
        output_dir: impl AsRef<Path>,
    ) -> Result<Vec<GroupReport>> {
        let source = DirSource::open(input)?;
        let output_dir = output_dir.as_ref();

        if spec.group_pattern.is_some() {
            let runs = run_groups(spec, &source, |_| Ok(TiffSink::new(output_dir)), 0, None)?;
            let mut reports = Vec::with_capacity(runs.len());
            for (report, mut sink) in runs {
                if let Some(combine) = &report.report {
                    sink.finish(combine.output_image)?;
                }
                reports.push(report);
            }
            Ok(reports)
        } else {
            let mut sink = TiffSink::new(output_dir);
            let report = run_combine(spec, &source, &mut sink, 0, None)?;
            if let Some(combine) = &report {
                sink.finish(combine.output_image)?;
            }
            Ok(vec![GroupReport {
                group: spec.image_name(),
                report,
            }])
        }
    }
}
