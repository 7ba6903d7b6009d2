mod common;

use downlevel::core::{Gc, PropertyKey};
use downlevel::js_object::{create_object, get_prototype_raw};
use downlevel::js_prototype::{lookup_strategy, writer_strategy};
use downlevel::{HostProfile, JSError, PrototypeStrategy, Runtime, Value, get_prototype_of, set_prototype_of};

#[ctor::ctor]
fn __init_test_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default()).is_test(true).try_init();
}

fn strategies(profile: HostProfile) -> (PrototypeStrategy, PrototypeStrategy) {
    let rt = Runtime::new(profile).unwrap();
    rt.run(|_, realm| Ok((lookup_strategy(realm), writer_strategy(realm)))).unwrap()
}

#[test]
fn strategy_follows_host_facilities() {
    assert_eq!(strategies(HostProfile::modern()), (PrototypeStrategy::Standard, PrototypeStrategy::Standard));
    assert_eq!(strategies(HostProfile::es5()), (PrototypeStrategy::Legacy, PrototypeStrategy::Legacy));
    assert_eq!(strategies(HostProfile::proto_accessor_only()), (PrototypeStrategy::Legacy, PrototypeStrategy::Legacy));
    assert_eq!(strategies(HostProfile::reflect_sham()), (PrototypeStrategy::Standard, PrototypeStrategy::Standard));
}

/// Write a link with the portable writer, then read it back with the portable reader.
fn write_then_read(profile: HostProfile) -> Result<bool, JSError> {
    let rt = Runtime::new(profile)?;
    rt.run(|mc, realm| {
        let proto = create_object(mc, Some(realm.intrinsics.object_prototype));
        let obj = create_object(mc, Some(realm.intrinsics.object_prototype));
        let returned = set_prototype_of(mc, realm, &Value::Object(obj), &Value::Object(proto))?;
        let raw = get_prototype_raw(&obj).is_some_and(|p| Gc::ptr_eq(p, proto));
        let read = matches!(get_prototype_of(mc, realm, &Value::Object(obj))?, Value::Object(p) if Gc::ptr_eq(p, proto));
        let same_obj = matches!(returned, Value::Object(r) if Gc::ptr_eq(r, obj));
        Ok(raw && read && same_obj)
    })
}

#[test]
fn round_trip_on_every_host() {
    for profile in [
        HostProfile::modern(),
        HostProfile::es5(),
        HostProfile::proto_accessor_only(),
        HostProfile::reflect_polyfill(),
        HostProfile::reflect_sham(),
    ] {
        assert_eq!(write_then_read(profile.clone()), Ok(true), "{:?}", profile);
    }
}

#[test]
fn end_of_chain_reads_as_null() {
    for profile in [HostProfile::modern(), HostProfile::es5(), HostProfile::proto_accessor_only()] {
        let rt = Runtime::new(profile).unwrap();
        let is_null = rt
            .run(|mc, realm| {
                let orphan = create_object(mc, None);
                Ok(matches!(get_prototype_of(mc, realm, &Value::Object(orphan))?, Value::Null))
            })
            .unwrap();
        assert!(is_null);
    }
}

#[test]
fn primitives_read_through_wrapper_prototype() {
    let rt = Runtime::new(HostProfile::es5()).unwrap();
    let ok = rt
        .run(|mc, realm| {
            let proto = get_prototype_of(mc, realm, &Value::Boolean(true))?;
            Ok(matches!(proto, Value::Object(p) if Gc::ptr_eq(p, realm.intrinsics.boolean_prototype)))
        })
        .unwrap();
    assert!(ok);
}

#[test]
fn reading_prototype_of_undefined_throws() {
    for profile in [HostProfile::modern(), HostProfile::es5()] {
        let rt = Runtime::new(profile).unwrap();
        let err = rt.run(|mc, realm| get_prototype_of(mc, realm, &Value::Undefined).map(|_| ())).unwrap_err();
        assert!(matches!(err, JSError::TypeError { .. }), "{:?}", err);
    }
}

#[test]
fn legacy_writer_ignores_primitive_targets() {
    let rt = Runtime::new(HostProfile::es5()).unwrap();
    let returned = rt
        .run(|mc, realm| {
            let proto = create_object(mc, None);
            Ok(common::number(&set_prototype_of(mc, realm, &Value::Number(3.0), &Value::Object(proto))?))
        })
        .unwrap();
    assert_eq!(returned, Some(3.0));
}

#[test]
fn strategy_is_fixed_after_first_use() {
    let rt = Runtime::new(HostProfile::modern()).unwrap();
    let (before, after, write_err) = rt
        .run(|mc, realm| {
            let before = lookup_strategy(realm);
            writer_strategy(realm);
            // remove Object.setPrototypeOf after the decision was made
            let Some(Value::Object(object_ctor)) = downlevel::core::object_get_key_value(&realm.global, "Object") else {
                panic!("Object must be installed");
            };
            object_ctor.borrow_mut(mc).properties.shift_remove(&PropertyKey::from("setPrototypeOf"));

            let after = lookup_strategy(realm);
            let obj = Value::Object(create_object(mc, None));
            let write_err = set_prototype_of(mc, realm, &obj, &Value::Null).is_err();
            Ok((before, after, write_err))
        })
        .unwrap();
    assert_eq!(before, PrototypeStrategy::Standard);
    assert_eq!(after, PrototypeStrategy::Standard);
    // the cached standard writer keeps calling the (now missing) standard API
    assert!(write_err);
}

#[test]
fn realms_decide_independently() {
    let legacy = Runtime::new(HostProfile::es5()).unwrap();
    let standard = Runtime::new(HostProfile::modern()).unwrap();
    assert_eq!(legacy.run(|_, realm| Ok(lookup_strategy(realm))).unwrap(), PrototypeStrategy::Legacy);
    assert_eq!(standard.run(|_, realm| Ok(lookup_strategy(realm))).unwrap(), PrototypeStrategy::Standard);
}

#[test]
fn legacy_writer_failures_name_both_causes() {
    let rt = Runtime::new(HostProfile::proto_accessor_only()).unwrap();
    let expected = "Object.prototype.__proto__: cyclic prototype chain or non-extensible object";

    let frozen = rt
        .run(|mc, realm| {
            let proto = create_object(mc, Some(realm.intrinsics.object_prototype));
            let obj = create_object(mc, Some(realm.intrinsics.object_prototype));
            obj.borrow_mut(mc).prevent_extensions();
            set_prototype_of(mc, realm, &Value::Object(obj), &Value::Object(proto)).map(|_| ())
        })
        .unwrap_err();
    assert_eq!(frozen, JSError::TypeError { message: expected.to_string() });

    let cyclic = rt
        .run(|mc, realm| {
            let parent = create_object(mc, Some(realm.intrinsics.object_prototype));
            let child = create_object(mc, Some(parent));
            set_prototype_of(mc, realm, &Value::Object(parent), &Value::Object(child)).map(|_| ())
        })
        .unwrap_err();
    assert_eq!(cyclic, JSError::TypeError { message: expected.to_string() });
}
