use test_case::test_case;

use crate::{Error, OpDef, OpPattern, OpRegistry, Value};

#[test_case("zeros", OpPattern::Injective)]
#[test_case("ones", OpPattern::Injective)]
#[test_case("full", OpPattern::Injective)]
#[test_case("arange", OpPattern::Injective)]
#[test_case("one_hot", OpPattern::Injective)]
#[test_case("threefry_generate", OpPattern::Opaque)]
#[test_case("threefry_split", OpPattern::Opaque)]
fn test_builtin_declared(name: &str, pattern: OpPattern) {
    let registry = OpRegistry::with_builtins().unwrap();
    let op = registry.get(name).unwrap();
    assert_eq!(op.name(), name);
    assert_eq!(op.pattern(), pattern);
    assert!(op.has_inference());
}

#[test]
fn test_builtin_count() {
    assert_eq!(OpRegistry::with_builtins().unwrap().len(), 7);
    assert!(OpRegistry::new().is_empty());
}

#[test]
fn test_duplicate_declaration() {
    let mut registry = OpRegistry::with_builtins().unwrap();
    let err = registry.declare(OpDef::builder().name("zeros").build()).unwrap_err();
    assert!(matches!(err, Error::DuplicateOp { ref name } if name == "zeros"));
}

#[test]
fn test_unknown_op() {
    let registry = OpRegistry::with_builtins().unwrap();
    assert!(matches!(registry.get("conv2d"), Err(Error::UnknownOp { .. })));
    assert!(!registry.contains("conv2d"));
}

#[test]
fn test_declared_without_inference() {
    let mut registry = OpRegistry::new();
    let op = registry.declare(OpDef::builder().name("add").pattern(OpPattern::Broadcast).build()).unwrap();

    assert!(!op.has_inference());
    assert!(matches!(op.infer(&[Value::ints([1])]), Err(Error::NoInference { .. })));
    assert_eq!(registry.get("add").unwrap(), op);
}

#[test]
fn test_default_pattern_is_opaque() {
    let op = OpRegistry::new().declare(OpDef::builder().name("custom").build()).unwrap();
    assert_eq!(op.pattern(), OpPattern::Opaque);
    assert_eq!(op.pattern().to_string(), "opaque");
}
