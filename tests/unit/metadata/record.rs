use super::*;
use crate::generate::combination::SelectedLayer;

fn catalog() -> LayerCatalog {
    let tsv = "name\tgroup\torder\tweight\tkey\tvalue\n\
               solid\tbase\t0\t1\n\
               red\tvisor\t1\t1\tcolor\tred\n\
               blue\tvisor\t1\t1\tcolor\tblue\n\
               star\tdecal\t2\t1\tdecal\tstar\n";
    LayerCatalog::from_reader(tsv.as_bytes(), true).unwrap()
}

fn combo(names: &[(&str, i64)]) -> Combination {
    Combination::from_selection(
        names
            .iter()
            .map(|(n, o)| SelectedLayer {
                layer_name: n.to_string(),
                order: *o,
            })
            .collect(),
    )
}

#[test]
fn structural_layers_are_filtered_out() {
    let record = build_metadata(
        &combo(&[("solid", 0), ("red", 1)]),
        &catalog(),
        ImageNumber(1),
        &MetadataTemplate::default(),
    )
    .unwrap();
    assert_eq!(
        record.attributes,
        vec![Attribute {
            trait_type: "color".to_string(),
            value: "red".to_string()
        }]
    );
}

#[test]
fn attributes_follow_compositing_order() {
    let record = build_metadata(
        &combo(&[("star", 2), ("solid", 0), ("blue", 1)]),
        &catalog(),
        ImageNumber(4),
        &MetadataTemplate::default(),
    )
    .unwrap();
    let types = record
        .attributes
        .iter()
        .map(|a| a.trait_type.as_str())
        .collect::<Vec<_>>();
    assert_eq!(types, vec!["color", "decal"]);
}

#[test]
fn image_and_name_come_from_the_template() {
    let record = build_metadata(
        &combo(&[("solid", 0), ("blue", 1)]),
        &catalog(),
        ImageNumber(12),
        &MetadataTemplate::default(),
    )
    .unwrap();
    assert_eq!(record.image, "https://storage.googleapis.com/12.png");
    assert_eq!(record.name, "Moon Helmet #12");
    assert_eq!(record.token_id, 12);
    assert_eq!(record.description, "Helmet designed to explore moons!");
}

#[test]
fn unknown_layer_is_an_error() {
    let err = build_metadata(
        &combo(&[("missing", 0)]),
        &catalog(),
        ImageNumber(1),
        &MetadataTemplate::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("missing"));
}

#[test]
fn build_is_deterministic() {
    let c = combo(&[("solid", 0), ("red", 1), ("star", 2)]);
    let t = MetadataTemplate {
        name_prefix: "Probe ".to_string(),
        ..MetadataTemplate::default()
    };
    let a = build_metadata(&c, &catalog(), ImageNumber(3), &t).unwrap();
    let b = build_metadata(&c, &catalog(), ImageNumber(3), &t).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.name, "Probe 3");
}
