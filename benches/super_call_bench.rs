use criterion::{Criterion, criterion_group, criterion_main};
use downlevel::core::{FunctionKind, JSObjectDataPtr, MutationContext, PropertySlot, RealmPtr, get_own_property};
use downlevel::js_object::define_property_internal;
use downlevel::{
    CallFrame, EvalError, HostProfile, Runtime, Value, call_function, check_constructed_as_instance, construct, create_function,
    link_prototype_chain, make_super_caller, possible_constructor_return,
};
use std::hint::black_box;

// Initialize logger for benchmark so `RUST_LOG` is honored.
#[ctor::ctor]
fn __init_bench_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default()).try_init();
}

fn base_body<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    check_constructed_as_instance(mc, frame.realm, &frame.this, &Value::Object(frame.callee))?;
    Ok(Value::Undefined)
}

fn derived_body<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    check_constructed_as_instance(mc, frame.realm, &frame.this, &Value::Object(frame.callee))?;
    let super_caller = match get_own_property(&frame.callee, "_super") {
        Some(PropertySlot::Data(v)) => v,
        _ => Value::Undefined,
    };
    let this_val = call_function(mc, frame.realm, &super_caller, frame.this.clone(), frame.args)?;
    possible_constructor_return(frame.this.clone(), this_val)
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

/// Keep a three-level chain reachable from the global object so it survives between mutations.
fn install_chain(rt: &Runtime) {
    rt.run(|mc, realm| {
        let base = declare(mc, realm, "Base", base_body, None)?;
        let derived = declare(mc, realm, "Derived", derived_body, Some(base))?;
        let derived2 = declare(mc, realm, "Derived2", derived_body, Some(derived))?;
        define_property_internal(mc, &realm.global, "Derived2", Value::Object(derived2), true, false, true);
        Ok(())
    })
    .unwrap();
}

fn benchmark_super_calls(c: &mut Criterion) {
    for (label, profile) in [
        ("construct_3_level_native", HostProfile::modern()),
        ("construct_3_level_fallback", HostProfile::es5()),
        ("construct_3_level_proto_accessor", HostProfile::proto_accessor_only()),
    ] {
        let mut rt = Runtime::new(profile).unwrap();
        install_chain(&rt);
        c.bench_function(label, |b| {
            b.iter(|| {
                let _ = black_box(rt.run(|mc, realm| {
                    let leaf = downlevel::js_object::get(mc, realm, &realm.global, "Derived2")?;
                    construct(mc, realm, &leaf, &[], None).map(|_| ())
                }));
                // instances are unreachable once the mutation ends
                rt.collect_garbage();
            })
        });
    }

    c.bench_function("declare_3_level_chain", |b| {
        let mut rt = Runtime::new(HostProfile::modern()).unwrap();
        b.iter(|| {
            let _ = black_box(rt.run(|mc, realm| {
                let base = declare(mc, realm, "Base", base_body, None)?;
                let derived = declare(mc, realm, "Derived", derived_body, Some(base))?;
                declare(mc, realm, "Derived2", derived_body, Some(derived)).map(|_| ())
            }));
            rt.collect_garbage();
        })
    });
}

criterion_group!(benches, benchmark_super_calls);
criterion_main!(benches);
