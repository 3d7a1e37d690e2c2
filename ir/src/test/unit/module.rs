use crate::{Error, Expr, IrModule, Var};

#[test]
fn test_add_and_order() {
    let mut module = IrModule::new();
    module.add("main", Expr::function([], Expr::scalar(1i64))).unwrap();
    module.add("helper", Expr::function([Var::new("x")], Expr::var("x"))).unwrap();

    let names: Vec<_> = module.functions().map(|(name, _)| name).collect();
    assert_eq!(names, ["helper", "main"]);
    assert_eq!(module.len(), 2);
    assert!(module.get("main").unwrap().is_function());
}

#[test]
fn test_rejects_non_function() {
    let mut module = IrModule::new();
    let err = module.add("main", Expr::scalar(1i64)).unwrap_err();
    assert!(matches!(err, Error::NotAFunction { ref name } if name == "main"));
    assert!(module.is_empty());
}

#[test]
fn test_from_iter_skips_non_functions() {
    let module: IrModule = [
        ("f".to_string(), Expr::function([], Expr::var("x"))),
        ("g".to_string(), Expr::var("x")),
    ]
    .into_iter()
    .collect();
    assert_eq!(module.len(), 1);
}
