use std::collections::BTreeSet;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::assemble::{assemble_volume, resolve_channel_colours, resolve_channel_names};
use crate::assign::assign_planes;
use crate::model::DatasetId;
use crate::store::{OutputImageSpec, OutputSink, SourceStore};

use super::{ChannelReport, CombineReport, CombineSpec, GroupReport, Result};

/// Runs one assembly: list, filter, assign, assemble, name. Returns `None`
/// without creating an output image when the selection is empty.
pub fn run_combine<S, K>(
    spec: &CombineSpec,
    source: &S,
    sink: &mut K,
    input_dataset: DatasetId,
    output_dataset: Option<DatasetId>,
) -> Result<Option<CombineReport>>
where
    S: SourceStore + ?Sized,
    K: OutputSink + ?Sized,
{
    let patterns = spec.patterns()?;
    let mut images = source.list_source_images(input_dataset)?;
    if let Some(filter) = spec.filter_names.as_deref()
        && !filter.is_empty()
    {
        images.retain(|image| image.name.contains(filter));
    }
    if images.is_empty() {
        info!(input_dataset, "no source images selected, skipping assembly");
        return Ok(None);
    }

    let layout = assign_planes(&images, &patterns)?;
    for collision in &layout.collisions {
        warn!(
            coord = %collision.coord,
            kept = collision.kept,
            replaced = collision.replaced,
            "two source images resolved to the same destination coordinate"
        );
    }
    info!(
        size_z = layout.size_z,
        size_c = layout.size_c,
        size_t = layout.size_t,
        sources = images.len(),
        "assembling volume"
    );

    let labels = resolve_channel_names(&layout.channels, spec.channel_names.as_deref());
    let colours = resolve_channel_colours(spec.channel_colours.as_deref(), layout.size_c);

    let name = spec.image_name();
    let source_ids: Vec<_> = images.iter().map(|image| image.id).collect();
    let output = sink.create_output_image(&OutputImageSpec {
        size_x: layout.size_x,
        size_y: layout.size_y,
        size_z: layout.size_z,
        size_c: layout.size_c,
        size_t: layout.size_t,
        pixel_type: layout.pixel_type,
        name: name.clone(),
        description: format!("created from source images: {source_ids:?}"),
    })?;

    let stats = assemble_volume(&layout, source, sink, output, &colours)?;

    // The override list is authoritative for naming; extra entries beyond
    // the channel count are ignored, as are unnamed trailing channels.
    for (index, label) in labels.iter().take(layout.size_c).enumerate() {
        sink.rename_channel(output, index, label)?;
    }
    if stats.pixel_size_x.is_some() || stats.pixel_size_y.is_some() {
        sink.set_pixel_physical_size(
            output,
            stats.pixel_size_x.as_ref(),
            stats.pixel_size_y.as_ref(),
        )?;
    }
    if let Some(dataset) = output_dataset {
        sink.link_to_dataset(output, dataset)?;
    }

    let channels = stats
        .channel_ranges
        .iter()
        .enumerate()
        .map(|(index, range)| ChannelReport {
            label: labels
                .get(index)
                .cloned()
                .unwrap_or_else(|| layout.channels[index].clone()),
            min: range.min,
            max: range.max,
            colour: colours[index],
        })
        .collect();

    Ok(Some(CombineReport {
        output_image: output,
        name,
        size_x: layout.size_x,
        size_y: layout.size_y,
        size_z: layout.size_z,
        size_c: layout.size_c,
        size_t: layout.size_t,
        source_count: images.len(),
        fetched_planes: stats.fetched_planes,
        synthesized_planes: stats.synthesized_planes,
        channels,
        pixel_size_x: stats.pixel_size_x,
        pixel_size_y: stats.pixel_size_y,
        collisions: layout.collisions.clone(),
    }))
}

/// Distinct substrings of the source names matched by the group pattern,
/// sorted; each defines one independent assembly.
pub fn derive_groups<S>(spec: &CombineSpec, source: &S, input_dataset: DatasetId) -> Result<Vec<String>>
where
    S: SourceStore + ?Sized,
{
    let Some(regex) = spec.group_regex()? else {
        return Ok(Vec::new());
    };
    let images = source.list_source_images(input_dataset)?;
    let groups: BTreeSet<String> = images
        .iter()
        .filter_map(|image| regex.find(&image.name))
        .map(|found| found.as_str().to_string())
        .collect();
    Ok(groups.into_iter().collect())
}

/// Runs one assembly per derived group. Groups are mutually independent and
/// run in parallel over a shared read-only source store; each gets its own
/// sink so the per-assembly write session stays strictly sequential. The
/// sinks come back with their reports so callers can finalize them (e.g.
/// flush a file-backed sink to disk).
pub fn run_groups<S, K, F>(
    spec: &CombineSpec,
    source: &S,
    make_sink: F,
    input_dataset: DatasetId,
    output_dataset: Option<DatasetId>,
) -> Result<Vec<(GroupReport, K)>>
where
    S: SourceStore + Sync + ?Sized,
    K: OutputSink + Send,
    F: Fn(&str) -> Result<K> + Sync,
{
    let groups = derive_groups(spec, source, input_dataset)?;
    groups
        .par_iter()
        .map(|group| {
            let mut group_spec = spec.clone();
            group_spec.filter_names = Some(group.clone());
            let mut sink = make_sink(group)?;
            let report = run_combine(&group_spec, source, &mut sink, input_dataset, output_dataset)?;
            Ok((
                GroupReport {
                    group: group.clone(),
                    report,
                },
                sink,
            ))
        })
        .collect()
}
