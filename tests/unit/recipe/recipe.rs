use super::*;

fn sample() -> Recipe {
    Recipe::new(
        vec![Material::Steel1084, Material::Steel15N20, Material::Steel1084],
        vec![
            Operation::AddSheets {
                material: Material::Steel1084,
                count: 2,
            },
            Operation::Twist { turns: 2.5 },
            Operation::Fold { times: 3 },
            Operation::Stretch { factor: 0.1 + 0.2 },
        ],
    )
}

#[test]
fn json_round_trip_is_lossless() {
    let r = sample();
    let json = r.to_json_string().unwrap();
    assert_eq!(Recipe::from_json_str(&json).unwrap(), r);
    let pretty = r.to_json_pretty().unwrap();
    assert_eq!(Recipe::from_json_str(&pretty).unwrap(), r);
}

#[test]
fn json_shape_uses_layers_and_tagged_ops() {
    let v: serde_json::Value = serde_json::from_str(&sample().to_json_string().unwrap()).unwrap();
    assert_eq!(v["layers"][1], "15N20");
    assert_eq!(v["ops"][2]["type"], "fold");
    assert_eq!(v["ops"][2]["times"], 3);
}

#[test]
fn missing_fields_default_to_empty() {
    assert_eq!(Recipe::from_json_str("{}").unwrap(), Recipe::default());
}

#[test]
fn unknown_material_is_a_serde_error() {
    let err = Recipe::from_json_str(r#"{"layers":["mithril"],"ops":[]}"#).unwrap_err();
    assert!(matches!(err, DamascusError::Serde(_)));
}

#[test]
fn out_of_range_op_is_a_validation_error_with_index() {
    let err = Recipe::from_json_str(
        r#"{"layers":[],"ops":[{"type":"fold","times":1},{"type":"stretch","factor":-2}]}"#,
    )
    .unwrap_err();
    match err {
        DamascusError::Validation(msg) => assert!(msg.starts_with("ops[1]:"), "{msg}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn save_then_load_from_disk() {
    let dir = std::env::temp_dir().join(format!("damascus-recipe-{}", std::process::id()));
    let path = dir.join("nested").join("recipe.json");
    let r = sample();
    r.save(&path).unwrap();
    assert_eq!(Recipe::from_path(&path).unwrap(), r);
    let _ = std::fs::remove_dir_all(&dir);
}
