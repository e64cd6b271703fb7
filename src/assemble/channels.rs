use crate::model::Rgba;

/// Final channel display names. An explicit override list replaces the
/// first-seen table wholesale: its length becomes the authoritative channel
/// count for naming.
pub fn resolve_channel_names(
    first_seen: &[String],
    override_names: Option<&[String]>,
) -> Vec<String> {
    match override_names {
        Some(names) => names.to_vec(),
        None => first_seen.to_vec(),
    }
}

/// Positional palette lookup. Channels without an entry, and entries naming
/// an unknown colour, fall back to the no-bias default.
pub fn resolve_channel_colours(
    colour_names: Option<&[String]>,
    channel_count: usize,
) -> Vec<Rgba> {
    let mut colours = vec![Rgba::WHITE; channel_count];
    if let Some(names) = colour_names {
        for (index, name) in names.iter().enumerate().take(channel_count) {
            if let Some(colour) = Rgba::from_name(name) {
                colours[index] = colour;
            }
        }
    }
    colours
}
