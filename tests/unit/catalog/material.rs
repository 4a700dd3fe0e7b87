use super::*;

#[test]
fn catalog_order_matches_all() {
    for (i, m) in Material::ALL.into_iter().enumerate() {
        assert_eq!(m.catalog_index(), i);
        assert_eq!(material_info(m).id, CATALOG[i].id);
    }
}

#[test]
fn etch_values_are_in_unit_range() {
    for m in Material::ALL {
        let e = material_info(m).etch;
        assert!((0.0..=1.0).contains(&e), "{m}: {e}");
    }
}

#[test]
fn nickel_steel_etches_brighter_than_carbon_steel() {
    assert!(Material::Steel15N20.etch_byte() > Material::Steel1084.etch_byte());
}

#[test]
fn etch_byte_clamps_out_of_range() {
    assert_eq!(etch_to_byte(-0.5), 0);
    assert_eq!(etch_to_byte(1.7), 255);
    assert_eq!(etch_to_byte(f64::NAN), 0);
    assert_eq!(etch_to_byte(0.5), 128);
}

#[test]
fn from_str_accepts_ids_case_insensitively() {
    assert_eq!("15n20".parse::<Material>().unwrap(), Material::Steel15N20);
    assert_eq!(" 1084 ".parse::<Material>().unwrap(), Material::Steel1084);
    let err = "unobtainium".parse::<Material>().unwrap_err();
    assert!(err.to_string().contains("unknown material"));
}

#[test]
fn serde_uses_catalog_ids() {
    for m in Material::ALL {
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, format!("\"{}\"", m.id()));
        let back: Material = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
    assert!(serde_json::from_str::<Material>("\"1085\"").is_err());
}
