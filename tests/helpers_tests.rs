mod common;

use common::{global, number, string};
use downlevel::core::FunctionKind;
use downlevel::js_array::create_array;
use downlevel::js_object::{create_object, define_property_internal, get, has_own_property};
use downlevel::{CallFrame, EvalError, Helper, Helpers, HostProfile, JSError, MutationContext, Runtime, Value, call_function, construct, create_function, inject_helpers};

#[ctor::ctor]
fn __init_test_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default()).is_test(true).try_init();
}

fn runtime_with_all_helpers(profile: HostProfile) -> Runtime {
    let rt = Runtime::new(profile).unwrap();
    rt.run(|mc, realm| Ok(inject_helpers(mc, realm, &Helpers::all())?)).unwrap();
    rt
}

/// Invoke a global helper the way generated code would.
fn call_helper<'gc>(mc: &MutationContext<'gc>, realm: downlevel::RealmPtr<'gc>, name: &str, args: &[Value<'gc>]) -> Result<Value<'gc>, EvalError<'gc>> {
    let helper = global(mc, realm, name)?;
    call_function(mc, realm, &helper, Value::Undefined, args)
}

#[test]
fn only_marked_helpers_are_installed() {
    let rt = Runtime::new(HostProfile::modern()).unwrap();
    let helpers = Helpers::new();
    helpers.mark(Helper::Inherits);
    helpers.mark(Helper::CreateSuper);
    let (inherits, create_super, class_call_check, enumerable) = rt
        .run(|mc, realm| {
            inject_helpers(mc, realm, &helpers)?;
            Ok((
                has_own_property(&realm.global, "_inherits"),
                has_own_property(&realm.global, "_createSuper"),
                has_own_property(&realm.global, "_classCallCheck"),
                downlevel::js_object::own_enumerable_keys(&realm.global),
            ))
        })
        .unwrap();
    assert!(inherits);
    assert!(create_super);
    assert!(!class_call_check);
    assert!(enumerable.is_empty());
}

fn point_ctor<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    call_helper(mc, frame.realm, "_classCallCheck", &[frame.this.clone(), Value::Object(frame.callee)])?;
    Ok(Value::Undefined)
}

fn point3_ctor<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let realm = frame.realm;
    call_helper(mc, realm, "_classCallCheck", &[frame.this.clone(), Value::Object(frame.callee)])?;
    let super_caller = get(mc, realm, &frame.callee, "_super")?;
    let this_val = call_function(mc, realm, &super_caller, frame.this.clone(), frame.args)?;
    call_helper(mc, realm, "_defineProperty", &[this_val.clone(), Value::from("z"), frame.arg(0)])?;
    call_helper(mc, realm, "_possibleConstructorReturn", &[frame.this.clone(), this_val])
}

fn describe<'gc>(_mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    Ok(Value::from(if frame.this.is_null_or_undefined() { "detached" } else { "point" }))
}

/// The whole helper protocol driven through the injected globals, as a lowered program does.
fn lowered_program(profile: HostProfile) -> (Option<f64>, Option<String>, Option<String>, bool) {
    let rt = runtime_with_all_helpers(profile);
    rt.run(|mc, realm| {
        let point = create_function(mc, realm, "Point", 0, FunctionKind::Normal, point_ctor, Vec::new());
        let describe_fn = create_function(mc, realm, "describe", 0, FunctionKind::Method, describe, Vec::new());
        let member = create_object(mc, Some(realm.intrinsics.object_prototype));
        define_property_internal(mc, &member, "key", Value::from("describe"), true, true, true);
        define_property_internal(mc, &member, "value", Value::Object(describe_fn), true, true, true);
        let proto_props = create_array(mc, realm, &[Value::Object(member)]);
        call_helper(mc, realm, "_createClass", &[Value::Object(point), Value::Object(proto_props)])?;

        let point3 = create_function(mc, realm, "Point3", 1, FunctionKind::Normal, point3_ctor, Vec::new());
        call_helper(mc, realm, "_inherits", &[Value::Object(point3), Value::Object(point)])?;
        let super_caller = call_helper(mc, realm, "_createSuper", &[Value::Object(point3)])?;
        define_property_internal(mc, &point3, "_super", super_caller, false, false, false);

        let instance = construct(mc, realm, &Value::Object(point3), &[Value::Number(7.0)], None)?;
        let Value::Object(obj) = &instance else {
            panic!("expected object");
        };
        let z = number(&get(mc, realm, obj, "z")?);
        let via_super = call_helper(mc, realm, "_get", &[get(mc, realm, &point3, "prototype")?, Value::from("describe"), instance.clone()])?;
        let described = call_function(mc, realm, &via_super, instance.clone(), &[])?;
        let kind = string(&call_helper(mc, realm, "_typeof", &[Value::Object(point3)])?);
        let proto_is_point3 = matches!(
            (call_helper(mc, realm, "_getPrototypeOf", &[instance.clone()])?, get(mc, realm, &point3, "prototype")?),
            (Value::Object(a), Value::Object(b)) if downlevel::core::Gc::ptr_eq(a, b)
        );
        Ok((z, string(&described), kind, proto_is_point3))
    })
    .unwrap()
}

#[test]
fn lowered_program_on_each_host() {
    for profile in [HostProfile::modern(), HostProfile::es5(), HostProfile::reflect_sham()] {
        let (z, described, kind, proto_is_point3) = lowered_program(profile);
        assert_eq!(z, Some(7.0));
        assert_eq!(described.as_deref(), Some("point"));
        assert_eq!(kind.as_deref(), Some("function"));
        assert!(proto_is_point3);
    }
}

#[test]
fn helpers_are_lenient_about_arguments() {
    let rt = runtime_with_all_helpers(HostProfile::modern());
    let (missing_base, extra_args, native) = rt
        .run(|mc, realm| {
            let derived = create_function(mc, realm, "Derived", 0, FunctionKind::Normal, point_ctor, Vec::new());
            // _inherits(Derived) with the base omitted reads it as undefined
            let missing_base = call_helper(mc, realm, "_inherits", &[Value::Object(derived)]).map_err(JSError::from).err();
            let extra_args = call_helper(mc, realm, "_typeof", &[Value::Null, Value::Number(1.0), Value::Number(2.0)])?;
            let native = call_helper(mc, realm, "_isNativeReflectConstruct", &[Value::Boolean(false)])?;
            Ok((missing_base, string(&extra_args), native.to_truthy()))
        })
        .unwrap();
    assert!(matches!(missing_base, Some(JSError::InvalidBaseType { .. })));
    assert_eq!(extra_args.as_deref(), Some("object"));
    assert!(native);
}

#[test]
fn assert_this_initialized_helper() {
    let rt = runtime_with_all_helpers(HostProfile::es5());
    let err = rt
        .run(|mc, realm| call_helper(mc, realm, "_assertThisInitialized", &[]).map(|_| ()))
        .unwrap_err();
    assert!(matches!(err, JSError::UninitializedThis { .. }));

    let kept = rt
        .run(|mc, realm| {
            let this = Value::Object(create_object(mc, None));
            let result = call_helper(mc, realm, "_possibleConstructorReturn", &[this, Value::from("primitive")])?;
            Ok(matches!(result, Value::Object(_)))
        })
        .unwrap();
    assert!(kept);
}

#[test]
fn set_prototype_of_helper_returns_target() {
    let rt = runtime_with_all_helpers(HostProfile::proto_accessor_only());
    let ok = rt
        .run(|mc, realm| {
            let proto = create_object(mc, Some(realm.intrinsics.object_prototype));
            let obj = create_object(mc, Some(realm.intrinsics.object_prototype));
            let returned = call_helper(mc, realm, "_setPrototypeOf", &[Value::Object(obj), Value::Object(proto)])?;
            let linked = downlevel::js_object::get_prototype_raw(&obj).is_some_and(|p| downlevel::core::Gc::ptr_eq(p, proto));
            Ok(linked && matches!(returned, Value::Object(r) if downlevel::core::Gc::ptr_eq(r, obj)))
        })
        .unwrap();
    assert!(ok);
}

#[test]
fn create_class_helper_rejects_mixed_member_record() {
    let rt = runtime_with_all_helpers(HostProfile::es5());
    let (err, installed) = rt
        .run(|mc, realm| {
            let widget = create_function(mc, realm, "Widget", 0, FunctionKind::Normal, point_ctor, Vec::new());
            let getter = create_function(mc, realm, "get size", 0, FunctionKind::Method, describe, Vec::new());
            let member = create_object(mc, Some(realm.intrinsics.object_prototype));
            define_property_internal(mc, &member, "key", Value::from("size"), true, true, true);
            define_property_internal(mc, &member, "value", Value::Number(1.0), true, true, true);
            define_property_internal(mc, &member, "get", Value::Object(getter), true, true, true);
            let proto_props = create_array(mc, realm, &[Value::Object(member)]);

            let err = call_helper(mc, realm, "_createClass", &[Value::Object(widget), Value::Object(proto_props)])
                .map_err(JSError::from)
                .err();
            let Value::Object(proto) = get(mc, realm, &widget, "prototype")? else {
                panic!("expected prototype object");
            };
            Ok((err, has_own_property(&proto, "size")))
        })
        .unwrap();
    assert!(matches!(err, Some(JSError::TypeError { .. })), "{:?}", err);
    assert!(!installed);
}
