use crate::core::{EvalError, JSObjectDataPtr, JSProxy, MutationContext, PropertyKey, RealmPtr, Value};
use crate::error::JSError;
use crate::js_function::{CallFrame, call_function, create_builtin_constructor};
use crate::js_object::{create_object, define_global, get, get_with_receiver};
use crate::{eval_error_here, raise_type_error};

/// Install the `Proxy` constructor when the host profile provides one. Only the `get` trap is
/// honoured; every other operation forwards to the target.
pub fn initialize_proxy<'gc>(mc: &MutationContext<'gc>, realm: RealmPtr<'gc>) -> Result<(), JSError> {
    if !realm.profile.proxy {
        return Ok(());
    }
    // Proxy has no usable prototype; instances forward [[GetPrototypeOf]] to their target
    let placeholder = create_object(mc, Some(realm.intrinsics.object_prototype));
    let ctor = create_builtin_constructor(mc, realm, "Proxy", 2, proxy_constructor, placeholder);
    define_global(mc, realm, "Proxy", Value::Object(ctor));
    Ok(())
}

fn proxy_constructor<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    if frame.new_target.is_none() {
        return Err(raise_type_error!("Constructor Proxy requires 'new'").into());
    }
    let (Value::Object(target), Value::Object(handler)) = (frame.arg(0), frame.arg(1)) else {
        return Err(raise_type_error!("Cannot create proxy with a non-object as target or handler").into());
    };
    let proxy = create_object(mc, None);
    proxy.borrow_mut(mc).proxy = Some(JSProxy { target, handler });
    log::trace!("proxy_constructor: created proxy");
    Ok(Value::Object(proxy))
}

/// [[Get]] on a proxy: the handler's `get` trap if present, otherwise the target's [[Get]].
pub fn proxy_get<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    proxy: &JSObjectDataPtr<'gc>,
    key: &PropertyKey<'gc>,
    receiver: &Value<'gc>,
) -> Result<Value<'gc>, EvalError<'gc>> {
    let Some(JSProxy { target, handler }) = proxy.borrow().proxy.clone() else {
        return Err(eval_error_here!("proxy_get called on an ordinary object").into());
    };
    let trap = get(mc, realm, &handler, "get")?;
    if trap.is_null_or_undefined() {
        return get_with_receiver(mc, realm, &target, key, receiver);
    }
    call_function(
        mc,
        realm,
        &trap,
        Value::Object(handler),
        &[Value::Object(target), key.to_value(), receiver.clone()],
    )
}
