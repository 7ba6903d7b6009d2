use crate::error::JSError;
use crate::host_profile::HostProfile;
pub use gc_arena::Mutation as MutationContext;
pub use gc_arena::collect::Trace as GcTrace;
pub use gc_arena::lock::RefLock as GcCell;
pub use gc_arena::{Collect, Gc};
pub type GcPtr<'gc, T> = Gc<'gc, GcCell<T>>;

#[inline]
pub fn new_gc_cell_ptr<'gc, T: 'gc + Collect<'gc>>(mc: &MutationContext<'gc>, value: T) -> GcPtr<'gc, T> {
    Gc::new(mc, GcCell::new(value))
}

mod value;
pub use value::*;

mod descriptor;
pub use descriptor::*;

mod property_key;
pub use property_key::*;

mod realm;
pub use realm::*;

pub mod js_error;
pub use js_error::*;

#[derive(Collect)]
#[collect(no_drop)]
pub struct JsRoot<'gc> {
    pub realm: RealmPtr<'gc>,
}

pub type JsArena = gc_arena::Arena<gc_arena::Rootable!['gc => JsRoot<'gc>]>;

/// Install every global the host profile asks for, in dependency order.
pub fn initialize_global_constructors<'gc>(mc: &MutationContext<'gc>, realm: RealmPtr<'gc>) -> Result<(), JSError> {
    crate::js_function::initialize_function(mc, realm)?;
    crate::js_object::initialize_object_module(mc, realm)?;
    initialize_error_constructors(mc, realm)?;
    crate::js_boolean::initialize_boolean(mc, realm)?;
    crate::js_reflect::initialize_reflect(mc, realm)?;
    crate::js_proxy::initialize_proxy(mc, realm)?;

    object_set_key_value(mc, &realm.global, "globalThis", Value::Object(realm.global));
    realm.global.borrow_mut(mc).set_non_enumerable("globalThis".into());
    Ok(())
}

/// An emulated host engine: one arena holding one realm built from a `HostProfile`.
pub struct Runtime {
    arena: JsArena,
}

impl Runtime {
    pub fn new(profile: HostProfile) -> Result<Self, JSError> {
        let arena = JsArena::new(|mc| JsRoot {
            realm: Gc::new(mc, Realm::new(mc, profile)),
        });
        arena.mutate(|mc, root| initialize_global_constructors(mc, root.realm))?;
        log::debug!("runtime initialized");
        Ok(Runtime { arena })
    }

    /// Run `f` inside a mutation of the arena. Values created here survive the call only if they
    /// are reachable from the realm's global object.
    pub fn run<F, T>(&self, f: F) -> Result<T, JSError>
    where
        F: for<'gc> FnOnce(&MutationContext<'gc>, RealmPtr<'gc>) -> Result<T, EvalError<'gc>>,
    {
        self.arena.mutate(|mc, root| f(mc, root.realm).map_err(JSError::from))
    }

    pub fn profile(&self) -> HostProfile {
        self.arena.mutate(|_, root| root.realm.profile.clone())
    }

    pub fn collect_garbage(&mut self) {
        self.arena.finish_cycle();
    }
}
