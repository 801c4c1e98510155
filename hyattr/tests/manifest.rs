use hyattr::{
    AttrCategory, AttrDatabase, AttrEmitter, AttrProperty, EmitOptions, manifest::registry_from_str,
};

const SAMPLE: &str = r#"
[[attr]]
name = "NoReturn"
kind = "EnumAttr"
display_string = "noreturn"
properties = ["FnAttr", "IntersectAnd"]

[[attr]]
name = "Alignment"
kind = "IntAttr"
display_string = "align"
properties = ["ParamAttr", "RetAttr", "IntersectMin"]

[[attr]]
name = "NoInfsFPMath"
kind = "StrBoolAttr"
display_string = "no-infs-fp-math"

[[attr]]
name = "Cold"
kind = "EnumAttr"
display_string = "cold"

[[compat_rule]]
func = "isEqual<SanitizeAddressAttr>"

[[compat_rule]]
func = "isEqual"
attr = "sign-return-address"

[[compat_rule]]
func = "isEqual<SafeStackAttr>"
attr = ""

[[merge_rule]]
func = "setAND<NoInfsFPMathAttr>"
"#;

#[test]
fn manifest_populates_registry_in_declaration_order() {
    let registry = registry_from_str("sample.toml", SAMPLE).expect("sample should load");

    assert_eq!(registry.len(), 4);
    let enums: Vec<&str> = registry
        .definitions(AttrCategory::EnumAttr)
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(enums, vec!["NoReturn", "Cold"]);

    let alignment = registry.get("Alignment").expect("Alignment should be registered");
    assert_eq!(alignment.category, AttrCategory::IntAttr);
    assert_eq!(alignment.display_string, "align");
    assert_eq!(
        alignment.property_mask(),
        AttrProperty::PARAM_ATTR | AttrProperty::RET_ATTR | AttrProperty::INTERSECT_MIN
    );

    let rules = registry.compat_rules();
    assert_eq!(rules.len(), 3);
    assert_eq!(rules[1].attr.as_deref(), Some("sign-return-address"));
    assert_eq!(rules[2].attr, None, "an empty attribute name means no extra argument");
    assert_eq!(registry.merge_rules()[0].func, "setAND<NoInfsFPMathAttr>");
}

#[test]
fn schema_style_field_names_are_accepted() {
    let source = r#"
[[attr]]
name = "NoUnwind"
kind = "EnumAttr"
AttrString = "nounwind"
Properties = ["FnAttr"]

[[compat_rule]]
CompatFunc = "isEqual"
AttrName = "probe-stack"

[[merge_rule]]
MergeFunc = "adjustCallerStackProbes"
"#;
    let registry = registry_from_str("schema.toml", source).expect("aliases should load");
    assert_eq!(
        registry.get("NoUnwind").map(|d| d.display_string.as_str()),
        Some("nounwind")
    );
    assert_eq!(registry.compat_rules()[0].attr.as_deref(), Some("probe-stack"));
    assert_eq!(registry.merge_rules()[0].func, "adjustCallerStackProbes");
}

#[test]
fn manifest_output_is_generated_end_to_end() {
    let registry = registry_from_str("sample.toml", SAMPLE).unwrap();
    let text = AttrEmitter::new(&registry, EmitOptions::default()).run().unwrap();

    assert!(text.contains("NoReturn = 1,\nCold = 2,\nLastEnumAttr = 2,\n"));
    assert!(text.contains("FirstIntAttr = 3,\nAlignment = 3,\nLastIntAttr = 3,\n"));
    assert!(text.contains("ATTRIBUTE_STRBOOL(NoInfsFPMath,no-infs-fp-math)\n"));
    // NoReturn: FnAttr | IntersectAnd, Cold: none, Alignment: ParamAttr | RetAttr | IntersectMin.
    assert!(text.contains("AttrPropTable[] = {\n17,\n0,\n38,\n};\n"));
}

#[test]
fn unknown_property_is_rejected() {
    let source = r#"
[[attr]]
name = "NoReturn"
kind = "EnumAttr"
display_string = "noreturn"
properties = ["FnAttr", "IntersectMax"]
"#;
    let error = registry_from_str("bad.toml", source).unwrap_err();
    assert!(error.is_unknown_property(), "unexpected error: {error}");
    assert!(error.to_string().contains("IntersectMax"));
}

#[test]
fn duplicate_names_are_rejected_across_categories() {
    let source = r#"
[[attr]]
name = "Alignment"
kind = "IntAttr"
display_string = "align"

[[attr]]
name = "Alignment"
kind = "EnumAttr"
display_string = "alignment"
"#;
    let error = registry_from_str("dup.toml", source).unwrap_err();
    assert!(error.is_duplicate_attribute(), "unexpected error: {error}");
}

#[test]
fn names_must_be_identifiers() {
    let source = r#"
[[attr]]
name = "no-return"
kind = "EnumAttr"
display_string = "noreturn"
"#;
    let error = registry_from_str("name.toml", source).unwrap_err();
    assert!(error.is_invalid_attribute_name(), "unexpected error: {error}");
}

#[test]
fn display_strings_must_fit_a_macro_argument() {
    for display in ["", "no return", "a,b", "f(x)"] {
        let source = format!(
            "[[attr]]\nname = \"Probe\"\nkind = \"EnumAttr\"\ndisplay_string = {display:?}\n"
        );
        let error = registry_from_str("display.toml", &source).unwrap_err();
        assert!(error.is_invalid_display_string(), "{display:?}: {error}");
    }
}

#[test]
fn empty_rule_function_is_rejected() {
    let error = registry_from_str("rule.toml", "[[merge_rule]]\nfunc = \"\"\n").unwrap_err();
    assert!(error.is_empty_rule_function(), "unexpected error: {error}");
}

#[test]
fn malformed_manifest_reports_the_file() {
    let missing_field = r#"
[[attr]]
name = "NoReturn"
kind = "EnumAttr"
"#;
    let error = registry_from_str("missing.toml", missing_field).unwrap_err();
    assert!(error.is_manifest_parse(), "unexpected error: {error}");
    let message = error.to_string();
    assert!(message.contains("missing.toml"), "{message}");
    assert!(message.contains("display_string"), "{message}");

    let unknown_kind = r#"
[[attr]]
name = "NoReturn"
kind = "FloatAttr"
display_string = "noreturn"
"#;
    let error = registry_from_str("kind.toml", unknown_kind).unwrap_err();
    assert!(error.is_manifest_parse(), "unexpected error: {error}");
}

#[test]
fn empty_manifest_is_an_empty_catalogue() {
    let registry = registry_from_str("empty.toml", "").unwrap();
    assert!(registry.is_empty());
    assert!(registry.compat_rules().is_empty());
    assert!(registry.merge_rules().is_empty());
}

#[test]
fn bundled_catalogue_loads_from_disk() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/attributes.toml");
    let registry = hyattr::manifest::registry_from_path(&path).expect("catalogue should load");
    let layout = hyattr::layout::CodeLayout::assign(&registry);

    assert_eq!(layout.len(), 12);
    assert_eq!(layout.code_of("NoUnwind"), Some(5));
    assert_eq!(layout.code_of("Dereferenceable"), Some(9));
    assert_eq!(layout.code_of("Initializes"), Some(12));
    assert_eq!(layout.code_of("NoInfsFPMath"), None, "string attributes carry no code");

    let table = hyattr::emit::props::PropertyTable::build(&registry).unwrap();
    assert_eq!(table.len(), 12);
    assert_eq!(table.get(3).map(|p| p.bits()), Some(22));
    assert_eq!(table.get(9).map(|p| p.bits()), Some(38));

    let text = AttrEmitter::new(&registry, EmitOptions::default()).run().unwrap();
    assert!(text.contains("  Ret &= isEqual(Caller, Callee, \"sign-return-address\");\n"));
    assert!(text.contains("  adjustCallerSSPLevel(Caller, Callee);\n"));
}
