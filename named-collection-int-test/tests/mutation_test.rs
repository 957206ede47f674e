use named_collection::collection;
use named_collection::common::Value;
use named_collection::errors::ErrorKind;
use named_collection_int_test::test_util::{
    assert_untouched, create_sequence_context, create_test_context, no_check, run_test,
};

#[ctor::ctor]
fn init() {
    colog::init();
}

#[test]
fn test_set_existing_key() {
    run_test(
        create_test_context,
        |ctx| {
            let c = ctx.collection_mut();
            c.set("version", 4)?;
            assert_eq!(c.len(), 6);
            assert_eq!(c.get(1)?, Value::from(4));
            Ok(())
        },
        no_check,
    )
}

#[test]
fn test_set_new_key_appends() {
    run_test(
        create_test_context,
        |ctx| {
            let c = ctx.collection_mut();
            c.set("owner", "ops")?;
            assert_eq!(c.len(), 7);
            assert_eq!(c.position_of("owner"), Some(6));
            Ok(())
        },
        no_check,
    )
}

#[test]
fn test_set_by_position() {
    run_test(
        create_sequence_context,
        |ctx| {
            let c = ctx.collection_mut();
            c.set(0, "first")?;
            c.set(-1, "last")?;
            assert_eq!(c.len(), 10);
            assert_eq!(c.get(0)?, Value::from("first"));
            assert_eq!(c.get(9)?, Value::from("last"));
            Ok(())
        },
        no_check,
    )
}

#[test]
fn test_set_position_keeps_key() {
    run_test(
        create_test_context,
        |ctx| {
            let c = ctx.collection_mut();
            c.set(0, "billing")?;
            assert_eq!(c.get("name")?, Value::from("billing"));
            Ok(())
        },
        no_check,
    )
}

#[test]
fn test_failed_assignments_leave_collection_untouched() {
    run_test(
        create_test_context,
        |ctx| {
            let c = ctx.collection_mut();
            assert_eq!(c.set(6, 1).unwrap_err().kind(), &ErrorKind::OutOfBounds);
            assert_eq!(c.set(-7, 1).unwrap_err().kind(), &ErrorKind::OutOfBounds);
            assert_eq!(
                c.set(("server", "port"), 9090).unwrap_err().kind(),
                &ErrorKind::UnsupportedOperation
            );
            assert_eq!(
                c.set(["name", "version"], 1).unwrap_err().kind(),
                &ErrorKind::UnsupportedIndexType
            );
            assert_eq!(c.set(1..3, 1).unwrap_err().kind(), &ErrorKind::UnsupportedIndexType);
            Ok(())
        },
        assert_untouched,
    )
}

#[test]
fn test_set_attr_and_append() {
    run_test(
        create_test_context,
        |ctx| {
            let c = ctx.collection_mut();
            c.set_attr("name", "billing");
            c.set_attr("region", "eu");
            c.append("standby");
            assert_eq!(c.attr("name")?, &Value::from("billing"));
            assert_eq!(c.attr("region")?, &Value::from("eu"));
            assert_eq!(c.len(), 8);
            assert_eq!(c.keys().last(), Some(None));
            Ok(())
        },
        |ctx| {
            assert_eq!(ctx.pristine().attr("name")?, &Value::from("inventory"));
            Ok(())
        },
    )
}

#[test]
fn test_copy_is_deep_for_collections() {
    run_test(
        create_test_context,
        |ctx| {
            let mut copy = ctx.collection().copy();
            copy.set("server", collection!["host" => "remote"])?;
            assert_eq!(copy.get("server")?.to_string(), "{host: \"remote\"}");
            assert_eq!(
                ctx.collection().get("server")?.to_string(),
                "{host: \"localhost\", port: 8080, tls: {enabled: false}}"
            );
            Ok(())
        },
        assert_untouched,
    )
}

#[test]
fn test_nested_mutation_through_value() {
    let mut tree = collection!["a" => collection!["b" => 1]];
    if let Some(mut nested) = tree.get_ref("a").cloned().and_then(Value::into_collection) {
        nested.set("b", 2).unwrap();
        tree.set("a", nested).unwrap();
    }
    assert_eq!(tree.to_string(), "{a: {b: 2}}");
}
