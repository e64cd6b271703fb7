use tempfile::tempdir;

use crate::model::Rgba;
use crate::store::{MemoryStore, SourceStore};

use super::{CombineSpec, derive_groups, load_spec, run_combine, run_groups, save_report};

const INPUT: i64 = 1;
const OUTPUT: i64 = 2;

fn seeded_source(planes: &[(&str, f32)]) -> MemoryStore {
    let mut store = MemoryStore::new();
    for (index, (name, value)) in planes.iter().enumerate() {
        store.add_uniform_plane(INPUT, index as i64 + 1, name, 4, 3, *value);
    }
    store
}

fn grid_spec() -> CombineSpec {
    CombineSpec {
        channel_pattern: "_C".to_string(),
        time_pattern: "_T".to_string(),
        ..CombineSpec::default()
    }
}

#[test]
fn combine_assembles_filtered_grid_end_to_end() {
    let source = seeded_source(&[
        ("A_C0_T00", 0.25),
        ("A_C1_T00", 0.5),
        ("A_C0_T01", 0.75),
    ]);
    let mut sink = MemoryStore::new();
    let report = run_combine(&grid_spec(), &source, &mut sink, INPUT, Some(OUTPUT))
        .expect("combine")
        .expect("report");

    assert_eq!((report.size_z, report.size_c, report.size_t), (1, 2, 2));
    assert_eq!(report.source_count, 3);
    assert_eq!(report.fetched_planes, 3);
    assert_eq!(report.synthesized_planes, 1);
    assert_eq!(report.name, "combinedImage");

    let record = sink.output(report.output_image).expect("output record");
    assert_eq!(record.planes.len(), 4);
    assert_eq!(record.channel_labels[0].as_deref(), Some("0"));
    assert_eq!(record.channel_labels[1].as_deref(), Some("1"));
    assert_eq!(record.linked_datasets, vec![OUTPUT]);
}

#[test]
fn channel_overrides_rename_and_colour_channels() {
    let source = seeded_source(&[("w_C0_T0", 0.2), ("w_C1_T0", 0.4)]);
    let mut sink = MemoryStore::new();
    let spec = CombineSpec {
        channel_names: Some(vec!["DAPI".to_string(), "GFP".to_string()]),
        channel_colours: Some(vec!["Blue".to_string(), "Green".to_string()]),
        ..grid_spec()
    };
    let report = run_combine(&spec, &source, &mut sink, INPUT, None)
        .expect("combine")
        .expect("report");

    assert_eq!(report.channels[0].label, "DAPI");
    assert_eq!(report.channels[1].label, "GFP");
    assert_eq!(report.channels[1].colour, Rgba::GREEN);

    let record = sink.output(report.output_image).expect("record");
    assert_eq!(record.channel_labels[0].as_deref(), Some("DAPI"));
    let settings = record.channel_settings[0].as_ref().expect("settings");
    assert_eq!(settings.colour, Rgba::BLUE);
}

#[test]
fn empty_selection_creates_no_output() {
    let source = seeded_source(&[("w_C0_T0", 0.2)]);
    let mut sink = MemoryStore::new();
    let spec = CombineSpec {
        filter_names: Some("nomatch".to_string()),
        ..grid_spec()
    };
    let report = run_combine(&spec, &source, &mut sink, INPUT, None).expect("combine");
    assert!(report.is_none());
    assert!(sink.output_ids().is_empty());
}

#[test]
fn groups_derive_from_distinct_pattern_matches() {
    let source = seeded_source(&[
        ("WellA1_F1_T0", 0.1),
        ("WellA1_F1_T1", 0.2),
        ("WellB2_F1_T0", 0.3),
    ]);
    let spec = CombineSpec {
        group_pattern: Some(r"Well\w\d".to_string()),
        ..grid_spec()
    };
    let groups = derive_groups(&spec, &source, INPUT).expect("groups");
    assert_eq!(groups, vec!["WellA1".to_string(), "WellB2".to_string()]);
}

#[test]
fn grouped_run_produces_one_report_per_group() {
    let source = seeded_source(&[
        ("WellA1_T0", 0.1),
        ("WellA1_T1", 0.2),
        ("WellB2_T0", 0.3),
    ]);
    let spec = CombineSpec {
        time_pattern: "_T".to_string(),
        group_pattern: Some(r"Well\w\d".to_string()),
        ..CombineSpec::default()
    };
    let runs = run_groups(&spec, &source, |_| Ok(MemoryStore::new()), INPUT, None)
        .expect("groups");

    assert_eq!(runs.len(), 2);
    let (well_a, sink_a) = runs
        .iter()
        .find(|(entry, _)| entry.group == "WellA1")
        .expect("WellA1 run");
    let well_a = well_a.report.as_ref().expect("WellA1 report");
    assert_eq!(well_a.source_count, 2);
    assert_eq!(well_a.size_t, 2);
    assert_eq!(well_a.name, "WellA1");
    assert_eq!(sink_a.output(well_a.output_image).expect("record").planes.len(), 2);
    let (well_b, _) = runs
        .iter()
        .find(|(entry, _)| entry.group == "WellB2")
        .expect("WellB2 run");
    assert_eq!(well_b.report.as_ref().expect("report").source_count, 1);
}

#[test]
fn recipe_roundtrips_through_json_and_yaml() {
    let dir = tempdir().expect("tempdir");
    let spec = CombineSpec {
        channel_colours: Some(vec!["Green".to_string()]),
        group_pattern: Some(r"Well\w\d".to_string()),
        ..grid_spec()
    };

    let json_path = dir.path().join("recipe.json");
    save_report(&json_path, &spec).expect("save json");
    assert_eq!(load_spec(&json_path).expect("load json"), spec);

    let yaml_path = dir.path().join("recipe.yaml");
    save_report(&yaml_path, &spec).expect("save yaml");
    assert_eq!(load_spec(&yaml_path).expect("load yaml"), spec);
}

#[test]
fn recipe_with_bad_pattern_is_rejected_on_load() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("recipe.json");
    std::fs::write(&path, r#"{"channel_pattern": "_C(?P<Z>x"}"#).expect("write");
    assert!(load_spec(&path).is_err());
}

#[test]
fn source_listing_contract_feeds_stable_channel_order() {
    let source = seeded_source(&[("b_Cred_T0", 0.1), ("A_Cgreen_T0", 0.2)]);
    let listed = source.list_source_images(INPUT).expect("list");
    assert_eq!(listed[0].name, "A_Cgreen_T0");
    let mut sink = MemoryStore::new();
    let report = run_combine(&grid_spec(), &source, &mut sink, INPUT, None)
        .expect("combine")
        .expect("report");
    assert_eq!(report.channels[0].label, "green");
    assert_eq!(report.channels[1].label, "red");
}
