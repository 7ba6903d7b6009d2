use downlevel::core::{FunctionKind, JSObjectDataPtr, MutationContext, RealmPtr};
use downlevel::js_object::{define_property_internal, get, instance_of, own_enumerable_keys};
use downlevel::js_prototype::lookup_strategy;
use downlevel::{
    CallFrame, EvalError, HostProfile, JSError, MemberDescriptor, Runtime, Value, call_function, check_constructed_as_instance, construct,
    create_class, create_function, is_native_reflect_construct, link_prototype_chain, make_super_caller, possible_constructor_return,
    raise_type_error, value_to_string,
};

#[derive(clap::Parser)]
#[command(name = "class_chain", version, about = "Build a downleveled class chain on an emulated host")]
struct Cli {
    /// Host preset: modern, es5, proto-accessor-only, reflect-polyfill, reflect-sham
    #[arg(short, long, default_value = "modern")]
    preset: String,

    /// JSON host profile; overrides --preset
    #[arg(long)]
    profile: Option<std::path::PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    // Initialize logger (controlled by RUST_LOG)
    env_logger::init();

    let cli = <Cli as clap::Parser>::parse();
    let profile = match &cli.profile {
        Some(path) => HostProfile::from_file(path)?,
        None => HostProfile::preset(&cli.preset)?,
    };
    println!("host: {:?}", profile);

    let rt = Runtime::new(profile)?;
    let report = rt.run(|mc, realm| {
        let base = declare(mc, realm, "Base", base_body, None)?;
        let derived = declare(mc, realm, "Derived", derived_body, Some(base))?;
        let derived2 = declare(mc, realm, "Derived2", derived_body, Some(derived))?;

        let c = declare(mc, realm, "C", base_body, None)?;
        let methods: Vec<MemberDescriptor> = ["a", "b", "c", "d", "e", "f", "g", "h"]
            .into_iter()
            .map(|name| MemberDescriptor::method(name, Value::Object(create_function(mc, realm, name, 0, FunctionKind::Method, method_body, Vec::new()))))
            .collect();
        create_class(mc, realm, &Value::Object(c), &methods, &[])?;

        let mut lines = vec![
            format!("prototype strategy: {:?}", lookup_strategy(realm)),
            format!("native Reflect.construct: {}", is_native_reflect_construct(mc, realm)),
        ];

        let instance = construct(mc, realm, &Value::Object(derived2), &[], None)?;
        for (name, ctor) in [("Base", base), ("Derived", derived), ("Derived2", derived2)] {
            lines.push(format!("new Derived2() instanceof {name}: {}", instance_of(mc, realm, &instance, &Value::Object(ctor))?));
        }

        let Value::Object(c_instance) = construct(mc, realm, &Value::Object(c), &[], None)? else {
            return Err(raise_type_error!("C did not produce an object").into());
        };
        lines.push(format!("enumerable keys of new C(): {:?}", own_enumerable_keys(&c_instance)));
        let h = get(mc, realm, &c_instance, "h")?;
        lines.push(format!("new C().h(1, 2, 3): {}", value_to_string(&call_function(
            mc,
            realm,
            &h,
            Value::Object(c_instance),
            &[Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]
        )?)));

        match call_function(mc, realm, &Value::Object(derived2), Value::Undefined, &[]) {
            Ok(_) => lines.push("Derived2() without new: no error".to_string()),
            Err(e) => lines.push(format!("Derived2() without new: {}", JSError::from(e))),
        }
        Ok(lines)
    })?;

    for line in report {
        println!("{line}");
    }
    Ok(())
}

fn declare<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    name: &str,
    body: downlevel::core::NativeFn,
    base: Option<JSObjectDataPtr<'gc>>,
) -> Result<JSObjectDataPtr<'gc>, EvalError<'gc>> {
    let ctor = create_function(mc, realm, name, 0, FunctionKind::Normal, body, Vec::new());
    if let Some(base) = base {
        link_prototype_chain(mc, realm, &Value::Object(ctor), &Value::Object(base))?;
        let caller = make_super_caller(mc, realm, &Value::Object(ctor));
        define_property_internal(mc, &ctor, "_super", Value::Object(caller), false, false, false);
    }
    Ok(ctor)
}

fn base_body<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    check_constructed_as_instance(mc, frame.realm, &frame.this, &Value::Object(frame.callee))?;
    Ok(Value::Undefined)
}

fn derived_body<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    check_constructed_as_instance(mc, frame.realm, &frame.this, &Value::Object(frame.callee))?;
    let super_caller = get(mc, frame.realm, &frame.callee, "_super")?;
    let this_val = call_function(mc, frame.realm, &super_caller, frame.this.clone(), frame.args)?;
    possible_constructor_return(frame.this.clone(), this_val)
}

fn method_body<'gc>(_mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    Ok(Value::Number(frame.args.len() as f64))
}
