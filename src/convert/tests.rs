use super::*;

#[derive(Debug, PartialEq)]
struct VenueId(i64);

impl RouteParameter for VenueId {
    fn from_parameter(raw: &str) -> Option<Self> {
        raw.parse().ok().map(VenueId)
    }
}

#[test]
fn test_string_always_converts() {
    assert_eq!(String::from_parameter("gold"), Some("gold".to_string()));
    assert_eq!(String::from_parameter("😀"), Some("😀".to_string()));
}

#[test]
fn test_integers_require_whole_string() {
    assert_eq!(i64::from_parameter("42"), Some(42));
    assert_eq!(i64::from_parameter("-7"), Some(-7));
    assert_eq!(i64::from_parameter("42abc"), None);
    assert_eq!(i64::from_parameter(" 42"), None);
    assert_eq!(u8::from_parameter("256"), None);
    assert_eq!(u32::from_parameter("-1"), None);
}

#[test]
fn test_floats() {
    assert_eq!(f64::from_parameter("2.5"), Some(2.5));
    assert_eq!(f32::from_parameter("1e3"), Some(1000.0));
    assert_eq!(f64::from_parameter("2.5kg"), None);
}

#[test]
fn test_option_never_fails() {
    assert_eq!(<Option<u32>>::from_parameter("7"), Some(Some(7)));
    assert_eq!(<Option<u32>>::from_parameter("seven"), Some(None));
}

#[test]
fn test_parameter_kind_optional_unwraps_type() {
    let kind = <Option<u32>>::parameter_kind();
    assert!(kind.is_optional);
    assert_eq!(kind.declared_type, TypeTag::of::<u32>());

    let kind = u32::parameter_kind();
    assert!(!kind.is_optional);
    assert_eq!(kind.declared_type, TypeTag::of::<u32>());
}

#[test]
fn test_erased_conversion_round_trips_through_from_argument() {
    let kind = VenueId::parameter_kind();
    let value = kind.convert("2");
    assert_eq!(VenueId::from_argument(value), Some(VenueId(2)));
    assert!(kind.convert("monkey").is_none());
}

#[test]
fn test_optional_from_missing_argument_is_none() {
    assert_eq!(<Option<VenueId>>::from_argument(None), Some(None));
    assert_eq!(VenueId::from_argument(None), None);
}

#[test]
fn test_from_argument_rejects_wrong_type() {
    let value: Value = Box::new("not a venue".to_string());
    assert_eq!(VenueId::from_argument(Some(value)), None);
}

#[test]
fn test_optional_from_argument_rejects_wrong_type() {
    let value: Value = Box::new(5_i64);
    assert_eq!(<Option<u32>>::from_argument(Some(value)), None);
    let value: Value = Box::new(5_u32);
    assert_eq!(<Option<u32>>::from_argument(Some(value)), Some(Some(5)));
}

#[test]
fn test_type_tag_unit_is_distinct() {
    assert!(TypeTag::unit().is_unit());
    assert_ne!(TypeTag::unit(), TypeTag::of::<i64>());
    assert_ne!(TypeTag::unit(), TypeTag::of::<Option<()>>());
    assert_eq!(TypeTag::of::<i64>(), TypeTag::of::<i64>());
}

#[test]
fn test_registry_builtins() {
    let registry = ConverterRegistry::with_builtins();
    let int = registry.get("Int").expect("Int registered");
    assert_eq!(int.declared_type, TypeTag::of::<i64>());
    assert!(!int.is_optional);
    assert!(int.convert("12").is_some());
    assert!(int.convert("twelve").is_none());

    assert_eq!(
        registry.get("Double").map(|k| k.declared_type),
        Some(TypeTag::of::<f64>())
    );
    assert!(registry.get("Decimal").is_none());
}

#[test]
fn test_registry_custom_type() {
    let mut registry = ConverterRegistry::new();
    registry.register::<VenueId>("VenueID");
    assert!(registry.contains("VenueID"));
    assert_eq!(registry.names(), vec!["VenueID"]);
    let kind = registry.get("VenueID").expect("registered");
    assert_eq!(VenueId::from_argument(kind.convert("9")), Some(VenueId(9)));
}
