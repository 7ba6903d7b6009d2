//! Portable read and write of an object's prototype link.
//!
//! Hosts differ in how the link is reachable: `Object.getPrototypeOf`/`Object.setPrototypeOf`
//! on modern engines, the `__proto__` accessor on older ones. The strategy is chosen by the
//! first call in a realm and reused for every later call, so feature probing happens once.

use crate::core::{EvalError, MutationContext, RealmPtr, Value, object_get_key_value};
use crate::js_function::call_function;
use crate::js_object::{get_value, set};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrototypeStrategy {
    /// `Object.getPrototypeOf` / `Object.setPrototypeOf`.
    Standard,
    /// The `__proto__` accessor, reads falling back to `Object.getPrototypeOf`.
    Legacy,
}

/// A static method of the realm's global `Object`, as currently installed.
fn object_static<'gc>(realm: RealmPtr<'gc>, name: &str) -> Option<Value<'gc>> {
    let Value::Object(object_ctor) = object_get_key_value(&realm.global, "Object")? else {
        return None;
    };
    object_get_key_value(&object_ctor, name).filter(|f| f.is_callable())
}

fn object_ctor_value<'gc>(realm: RealmPtr<'gc>) -> Value<'gc> {
    object_get_key_value(&realm.global, "Object").unwrap_or(Value::Undefined)
}

// Both directions key off `Object.setPrototypeOf`: an engine that can write the link through
// the standard API can also read it through the standard API.
fn detect(realm: RealmPtr<'_>) -> PrototypeStrategy {
    if object_static(realm, "setPrototypeOf").is_some() {
        PrototypeStrategy::Standard
    } else {
        PrototypeStrategy::Legacy
    }
}

pub fn lookup_strategy(realm: RealmPtr<'_>) -> PrototypeStrategy {
    *realm.caches.prototype_lookup.get_or_init(|| {
        let strategy = detect(realm);
        log::debug!("prototype lookup strategy: {:?}", strategy);
        strategy
    })
}

pub fn writer_strategy(realm: RealmPtr<'_>) -> PrototypeStrategy {
    *realm.caches.prototype_writer.get_or_init(|| {
        let strategy = detect(realm);
        log::debug!("prototype writer strategy: {:?}", strategy);
        strategy
    })
}

/// Read the prototype link of `value`. `Null` when the chain ends.
pub fn get_prototype_of<'gc>(mc: &MutationContext<'gc>, realm: RealmPtr<'gc>, value: &Value<'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let this = object_ctor_value(realm);
    match lookup_strategy(realm) {
        PrototypeStrategy::Standard => {
            let f = object_static(realm, "getPrototypeOf").unwrap_or(Value::Undefined);
            call_function(mc, realm, &f, this, std::slice::from_ref(value))
        }
        PrototypeStrategy::Legacy => {
            let proto = get_value(mc, realm, value, "__proto__")?;
            if proto.to_truthy() {
                return Ok(proto);
            }
            match object_static(realm, "getPrototypeOf") {
                Some(f) => call_function(mc, realm, &f, this, std::slice::from_ref(value)),
                // nothing left to ask; a missing link reads as the end of the chain
                None => Ok(Value::Null),
            }
        }
    }
}

/// Point the prototype link of `obj` at `proto` (an object or `Null`); returns `obj`.
pub fn set_prototype_of<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    obj: &Value<'gc>,
    proto: &Value<'gc>,
) -> Result<Value<'gc>, EvalError<'gc>> {
    match writer_strategy(realm) {
        PrototypeStrategy::Standard => {
            let f = object_static(realm, "setPrototypeOf").unwrap_or(Value::Undefined);
            call_function(mc, realm, &f, object_ctor_value(realm), &[obj.clone(), proto.clone()])
        }
        PrototypeStrategy::Legacy => {
            if let Value::Object(o) = obj {
                // without a __proto__ accessor this lands as a plain own property, as it would
                // on such a host
                set(mc, realm, o, "__proto__", proto.clone())?;
            }
            Ok(obj.clone())
        }
    }
}
