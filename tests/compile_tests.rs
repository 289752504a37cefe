//! Integration tests for compiling workprints and reading playprints back.

use std::io::Write;

use playprint::playprint::FieldReader;
use playprint::prelude::*;
use playprint::util::{Mat43, Vec2, Vec3};

use tempfile::NamedTempFile;

const SCENE: &str = r#"{
    "type": "Scene", "name": "stage",
    "attributes": [
        { "name": "mode",   "type": "enum",        "value": 3 },
        { "name": "origin", "type": "MlVector2",   "value": [1.5, -0.25] },
        { "name": "xform",  "type": "MlTransform", "value": [1,0,0, 0,1,0, 0,0,1, 4,5,6] }
    ],
    "children": [
        { "type": "Actor", "name": "hero",
          "attributes": [
              { "name": "skin",    "type": "MediaRef",   "value": "hero.tex" },
              { "name": "weights", "type": "FloatArray", "value": [0.5, 0.25] }
          ],
          "children": [
              { "type": "Actor", "name": "sword",
                "attributes": [ { "name": "tint", "type": "Float3", "value": [1, 0.5, 0] } ] }
          ] },
        { "type": "Actor", "name": "crowd",
          "attributes": [
              { "name": "ids",  "type": "IntArray", "value": [7, 8, 9] },
              { "name": "skin", "type": "MediaRef", "value": "crowd.tex" }
          ] }
    ]
}"#;

const REFS: &str = r#"[
    { "name": "hero.tex",  "handle": 200 },
    { "name": "crowd.tex", "handle": 100 },
    { "name": "sky.tex",   "handle": 300 }
]"#;

fn temp_with(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes()).expect("Failed to write temp file");
    file
}

#[test]
fn test_compile_json_scene_and_read_back() {
    let wp_file = temp_with(SCENE);
    let refs_file = temp_with(REFS);
    let wp = Workprint::from_json_file(wp_file.path()).expect("Failed to load workprint");
    let refs = ReferenceTable::from_json_file(refs_file.path()).expect("Failed to load refs");

    // Sorted: crowd.tex, hero.tex, sky.tex
    assert_eq!(refs.resolve("hero.tex").unwrap(), 1);

    for endian in [Endian::Little, Endian::Big] {
        for format in [ScalarFormat::Floating, ScalarFormat::Fixed16_16, ScalarFormat::Fixed20_12] {
            let options = CompileOptions::new().with_scalar_format(format).with_byte_order(endian);
            let out = compile(&wp, &refs, &options).expect("compile failed");
            assert!(out.is_clean(), "{:?}", out.diagnostics());

            let mut r = FieldReader::new(out.bytes(), &options);
            let mut next = |kind| r.read_value(kind, &refs).expect("read failed");

            assert_eq!(next(DataKind::Enum), TaggedValue::Enum(3));
            // 1.5 and -0.25 are exact in every format
            assert_eq!(next(DataKind::Vector2), TaggedValue::Vector2(Vec2::new(1.5, -0.25)));
            let TaggedValue::Matrix43(Some(m)) = next(DataKind::Matrix43) else {
                panic!("expected matrix");
            };
            assert_eq!(m.translation(), Vec3::new(4.0, 5.0, 6.0));
            assert_eq!(next(DataKind::MediaRef), TaggedValue::MediaRef(Some(MediaRef::new("hero.tex"))));
            assert_eq!(next(DataKind::FloatArray), TaggedValue::from(vec![0.5f32, 0.25]));
            assert_eq!(next(DataKind::Float3), TaggedValue::from(Vec3::new(1.0, 0.5, 0.0)));
            assert_eq!(next(DataKind::IntArray), TaggedValue::from(vec![7, 8, 9]));
            assert_eq!(next(DataKind::MediaRef), TaggedValue::MediaRef(Some(MediaRef::new("crowd.tex"))));
            assert!(r.is_at_end());
        }
    }
}

#[test]
fn test_playprint_file_round_trip() {
    let wp = Workprint::from_json_str(SCENE).expect("Failed to parse workprint");
    let refs = ReferenceTable::from_unsorted(vec![
        AssetRef::new("hero.tex", 1),
        AssetRef::new("crowd.tex", 2),
    ])
    .expect("Failed to build refs");
    let options = CompileOptions::new();

    let out = compile(&wp, &refs, &options).expect("compile failed");
    let temp = NamedTempFile::new().expect("Failed to create temp file");
    out.write_to(temp.path()).expect("Failed to write playprint");

    let bytes = std::fs::read(temp.path()).expect("Failed to read playprint");
    assert_eq!(bytes, out.bytes());

    // Skipping by length prefix alone lands on the reference of the first child.
    let mut r = FieldReader::new(&bytes, &options);
    assert_eq!(r.skip_field().unwrap(), 4);
    assert_eq!(r.skip_field().unwrap(), 8);
    assert_eq!(r.skip_field().unwrap(), 48);
    assert_eq!(r.read_length().unwrap(), 0);
    assert_eq!(r.read_index().unwrap(), 1);
}

#[test]
fn test_missing_reference_is_reported_not_fatal() {
    let wp = Workprint::from_json_str(SCENE).expect("Failed to parse workprint");
    let refs = ReferenceTable::new(vec![AssetRef::new("hero.tex", 1)]).expect("sorted");

    let out = compile(&wp, &refs, &CompileOptions::new()).expect("compile failed");
    assert_eq!(out.diagnostics().len(), 1);
    assert_eq!(out.diagnostics()[0].path, "/stage/crowd");
    assert_eq!(out.diagnostics()[0].field, "skin");

    // Everything else, including the failing node's other field, was written.
    let mut r = FieldReader::new(out.bytes(), &CompileOptions::new());
    for _ in 0..3 {
        r.skip_field().unwrap();
    }
    r.read_length().unwrap();
    r.read_index().unwrap();
    for _ in 0..3 {
        r.skip_field().unwrap();
    }
    assert!(r.is_at_end());

    assert!(compile(&wp, &refs, &CompileOptions::new()).unwrap().into_strict().is_err());
}

#[test]
fn test_registry_aliases() {
    let mut registry = TypeRegistry::with_builtins();
    registry.register("MlReal", DataKind::Float).expect("alias");
    assert!(matches!(
        registry.register("MlReal", DataKind::Enum),
        Err(Error::DuplicateTypeRegistration(_))
    ));

    let mut wp = Workprint::new();
    let root = wp.add_root("Scene", "root").unwrap();
    wp.set_attribute(root, "speed", "MlReal", AttrValue::Float(2.0)).unwrap();

    let refs = ReferenceTable::empty();
    let out = compile_with_registry(&wp, &refs, &CompileOptions::new(), &registry).expect("compile failed");
    let mut expected = 4i32.to_le_bytes().to_vec();
    expected.extend_from_slice(&2.0f32.to_le_bytes());
    assert_eq!(out.into_strict().unwrap(), expected);

    assert!(compile(&wp, &refs, &CompileOptions::new()).is_err());
}

#[test]
fn test_absent_transform_is_reported() {
    let mut wp = Workprint::new();
    let root = wp.add_root("Scene", "root").unwrap();
    wp.set_attribute(root, "xform", "MlTransform", AttrValue::None).unwrap();
    wp.set_attribute(root, "mode", "enum", AttrValue::Int(1)).unwrap();

    let out = compile(&wp, &ReferenceTable::empty(), &CompileOptions::new()).unwrap();
    assert!(matches!(
        out.diagnostics()[0].error,
        Error::MissingData { kind: DataKind::Matrix43 }
    ));
    assert_eq!(out.bytes().len(), 8);
    assert_eq!(Mat43::default(), Mat43::IDENTITY);
}
