use crate::{Expr, OpRegistry, Value};

#[test]
fn test_tree_simple() {
    let registry = OpRegistry::with_builtins().unwrap();
    let zeros = registry.get("zeros").unwrap();
    let call = Expr::call(&zeros, [Expr::constant(Value::ints([2])), Expr::string("cpu")]);

    let tree = call.tree();
    assert!(tree.contains("CALL zeros [2 args, injective]"));
    assert!(tree.contains("CONST \"cpu\""));
}

#[test]
fn test_tree_shared_nodes() {
    let shared = Expr::scalar(1i64);
    let root = Expr::tuple([shared.clone(), shared]);

    let compact = root.tree();
    assert!(compact.contains("see above"));

    let full = root.tree_full();
    assert!(!full.contains("see above"));
    assert_eq!(full.matches("CONST 1").count(), 2);
}
