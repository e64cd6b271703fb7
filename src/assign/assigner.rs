use std::collections::BTreeMap;

use crate::model::{Dimension, PlaneCoord, SourceImage, SourceLocator};
use crate::pattern::{PatternSet, extract};

use super::{AssignError, Collision, Result, VolumeLayout};

/// Sort key for the documented source ordering contract. Channel first-seen
/// order is reproducible because assignment always walks sources in
/// case-insensitive name order.
pub fn name_sort_key(name: &str) -> String {
    name.to_lowercase()
}

/// Turns a flat source list into an output shape and a destination→source
/// coordinate map.
///
/// Native extents are read from the first source image (after sorting): a
/// dimension with native size >1 is multiplexed and its per-name token is
/// ignored, every local index mapping through directly. Non-multiplexed
/// dimensions resolve from the extracted token, defaulting to index 0 (Z, T)
/// or channel name "0" when absent. Z and T indices are offset-normalized so
/// 1-based filename conventions still produce a zero-based volume; channel
/// indices are already zero-based by construction of the first-seen table
/// and are deliberately left alone.
pub fn assign_planes(sources: &[SourceImage], patterns: &PatternSet) -> Result<VolumeLayout> {
    if sources.is_empty() {
        return Err(AssignError::EmptySelection);
    }

    let mut ordered: Vec<&SourceImage> = sources.iter().collect();
    ordered.sort_by_key(|image| name_sort_key(&image.name));

    let first = ordered[0];
    let source_z = first.size_z;
    let source_c = first.size_c;
    let source_t = first.size_t;

    let mut size_z = source_z;
    let mut size_t = source_t;
    let mut z_start: Option<usize> = None;
    let mut t_start: Option<usize> = None;

    let mut channels: Vec<String> = if source_c > 1 {
        multiplexed_channel_labels(first)
    } else {
        Vec::new()
    };

    let mut planes: BTreeMap<PlaneCoord, SourceLocator> = BTreeMap::new();
    let mut collisions: Vec<Collision> = Vec::new();

    for image in &ordered {
        let tokens = extract(&image.name, patterns);

        let the_t = if source_t == 1 {
            let index = parse_index(Dimension::Time, tokens.time.as_deref(), image)?;
            size_t = size_t.max(index + 1);
            t_start = Some(t_start.map_or(index, |start| start.min(index)));
            index
        } else {
            t_start = Some(0);
            0
        };

        let the_c = if source_c == 1 {
            let token = tokens.channel.as_deref().unwrap_or("0");
            match channels.iter().position(|label| label == token) {
                Some(index) => index,
                None => {
                    channels.push(token.to_string());
                    channels.len() - 1
                }
            }
        } else {
            0
        };

        let the_z = if source_z == 1 {
            let index = parse_index(Dimension::Z, tokens.z.as_deref(), image)?;
            size_z = size_z.max(index + 1);
            z_start = Some(z_start.map_or(index, |start| start.min(index)));
            index
        } else {
            z_start = Some(0);
            0
        };

        for src_z in 0..source_z {
            let to_z = if source_z > 1 { src_z } else { the_z };
            for src_c in 0..source_c {
                let to_c = if source_c > 1 { src_c } else { the_c };
                for src_t in 0..source_t {
                    let to_t = if source_t > 1 { src_t } else { the_t };
                    let coord = PlaneCoord::new(to_z, to_c, to_t);
                    let locator = SourceLocator::new(image.id, src_z, src_c, src_t);
                    if let Some(previous) = planes.insert(coord, locator)
                        && previous.image != image.id
                    {
                        collisions.push(Collision {
                            coord,
                            replaced: previous.image,
                            kept: image.id,
                        });
                    }
                }
            }
        }
    }

    // Shift Z and T down when the filename convention was 1-based (or worse).
    let z_start = z_start.unwrap_or(0);
    let t_start = t_start.unwrap_or(0);
    if z_start > 0 || t_start > 0 {
        size_z -= z_start;
        size_t -= t_start;
        planes = planes
            .into_iter()
            .map(|(coord, locator)| {
                (
                    PlaneCoord::new(coord.z - z_start, coord.c, coord.t - t_start),
                    locator,
                )
            })
            .collect();
        for collision in &mut collisions {
            collision.coord.z -= z_start;
            collision.coord.t -= t_start;
        }
    }

    Ok(VolumeLayout {
        size_x: first.size_x,
        size_y: first.size_y,
        size_z,
        size_c: channels.len(),
        size_t,
        pixel_type: first.pixel_type,
        channels,
        planes,
        collisions,
    })
}

fn multiplexed_channel_labels(first: &SourceImage) -> Vec<String> {
    if first.channel_labels.len() == first.size_c {
        first.channel_labels.clone()
    } else {
        (0..first.size_c).map(|index| index.to_string()).collect()
    }
}

fn parse_index(
    dimension: Dimension,
    token: Option<&str>,
    image: &SourceImage,
) -> Result<usize> {
    match token {
        None => Ok(0),
        Some(token) => token
            .parse::<usize>()
            .map_err(|_| AssignError::MalformedToken {
                dimension,
                image: image.name.clone(),
                token: token.to_string(),
            }),
    }
}
