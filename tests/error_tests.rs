use downlevel::js_object::{get, instance_of};
use downlevel::{EvalError, HostProfile, JSError, Runtime, Value, is_error, value_to_string};

#[ctor::ctor]
fn __init_test_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default()).is_test(true).try_init();
}

#[test]
fn helper_errors_surface_as_script_error_kinds() {
    let cases = [
        (JSError::InvalidInvocation { message: "m".into() }, "TypeError"),
        (JSError::InvalidBaseType { message: "m".into() }, "TypeError"),
        (JSError::UninitializedThis { message: "m".into() }, "ReferenceError"),
        (JSError::TypeError { message: "m".into() }, "TypeError"),
        (JSError::RangeError { message: "m".into() }, "RangeError"),
        (JSError::Config { message: "m".into() }, "Error"),
    ];
    for (err, name) in cases {
        assert_eq!(err.name(), name, "{:?}", err);
    }
    assert_eq!(
        JSError::InvalidInvocation {
            message: "Cannot call a class as a function".into()
        }
        .to_string(),
        "TypeError: Cannot call a class as a function"
    );
}

#[test]
fn engine_errors_become_catchable_error_objects() {
    let rt = Runtime::new(HostProfile::es5()).unwrap();
    let (is_type_error, is_base_error, message) = rt
        .run(|mc, realm| {
            let err: EvalError = JSError::InvalidBaseType {
                message: "Super expression must either be null or a function".into(),
            }
            .into();
            let thrown = err.into_value(mc, realm);
            assert!(is_error(&thrown));
            let type_error = get(mc, realm, &realm.global, "TypeError")?;
            let error = get(mc, realm, &realm.global, "Error")?;
            let Value::Object(obj) = &thrown else {
                panic!("expected error object");
            };
            Ok((
                instance_of(mc, realm, &thrown, &type_error)?,
                instance_of(mc, realm, &thrown, &error)?,
                value_to_string(&get(mc, realm, obj, "message")?),
            ))
        })
        .unwrap();
    assert!(is_type_error);
    assert!(is_base_error);
    assert_eq!(message, "Super expression must either be null or a function");
}

#[test]
fn thrown_script_values_are_described() {
    let rt = Runtime::new(HostProfile::modern()).unwrap();
    let err = rt
        .run(|mc, realm| {
            let e = downlevel::create_error(mc, realm, "ReferenceError", "boom");
            Err::<(), _>(EvalError::Throw(e))
        })
        .unwrap_err();
    assert_eq!(
        err,
        JSError::Throw {
            message: "ReferenceError: boom".to_string()
        }
    );
}

#[test]
fn profile_errors_are_config_errors() {
    let err = HostProfile::from_json(r#"{ "reflect": 1 }"#).unwrap_err();
    assert!(matches!(err, JSError::Config { .. }));
    assert_eq!(err.name(), "Error");
    let io: std::io::Error = err.into();
    assert!(io.to_string().starts_with("Invalid host profile"));
    assert!(HostProfile::from_file("/nonexistent/profile.json").is_err());
}

#[test]
fn range_errors_become_range_error_instances() {
    let rt = Runtime::new(HostProfile::modern()).unwrap();
    let (is_range_error, is_base_error, name) = rt
        .run(|mc, realm| {
            let err: EvalError = JSError::RangeError {
                message: "Too many arguments in function call (only 65535 allowed)".into(),
            }
            .into();
            let thrown = err.into_value(mc, realm);
            let range_error = get(mc, realm, &realm.global, "RangeError")?;
            let error = get(mc, realm, &realm.global, "Error")?;
            let Value::Object(obj) = &thrown else {
                panic!("expected error object");
            };
            Ok((
                instance_of(mc, realm, &thrown, &range_error)?,
                instance_of(mc, realm, &thrown, &error)?,
                value_to_string(&get(mc, realm, obj, "name")?),
            ))
        })
        .unwrap();
    assert!(is_range_error);
    assert!(is_base_error);
    assert_eq!(name, "RangeError");
}
