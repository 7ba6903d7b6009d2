use crate::core::{Collect, Gc, GcTrace, JSObjectData, JSObjectDataPtr, MutationContext, new_gc_cell_ptr};
use crate::host_profile::HostProfile;
use crate::js_prototype::PrototypeStrategy;
use std::cell::OnceCell;

pub type RealmPtr<'gc> = Gc<'gc, Realm<'gc>>;

/// Objects the engine refers to directly, independent of what the global object holds.
#[derive(Clone, Copy, Collect)]
#[collect(no_drop)]
pub struct Intrinsics<'gc> {
    pub object_prototype: JSObjectDataPtr<'gc>,
    pub function_prototype: JSObjectDataPtr<'gc>,
    pub array_prototype: JSObjectDataPtr<'gc>,
    pub boolean_prototype: JSObjectDataPtr<'gc>,
    pub error_prototype: JSObjectDataPtr<'gc>,
    pub type_error_prototype: JSObjectDataPtr<'gc>,
    pub reference_error_prototype: JSObjectDataPtr<'gc>,
    pub range_error_prototype: JSObjectDataPtr<'gc>,
}

/// Compute-once answers about the host. Each cell is written by the first caller and never
/// recomputed for the lifetime of the realm.
#[derive(Default)]
pub struct RealmCaches {
    pub prototype_lookup: OnceCell<PrototypeStrategy>,
    pub prototype_writer: OnceCell<PrototypeStrategy>,
    pub native_reflect_construct: OnceCell<bool>,
}

pub struct Realm<'gc> {
    pub global: JSObjectDataPtr<'gc>,
    pub intrinsics: Intrinsics<'gc>,
    pub profile: HostProfile,
    pub caches: RealmCaches,
}

unsafe impl<'gc> Collect<'gc> for Realm<'gc> {
    fn trace<T: GcTrace<'gc>>(&self, cc: &mut T) {
        self.global.trace(cc);
        self.intrinsics.trace(cc);
    }
}

impl<'gc> Realm<'gc> {
    /// Allocate the realm skeleton. Constructors and methods are installed afterwards by
    /// `initialize_global_constructors`.
    pub fn new(mc: &MutationContext<'gc>, profile: HostProfile) -> Self {
        let object_prototype = new_gc_cell_ptr(mc, JSObjectData::new());
        let derived = |proto: JSObjectDataPtr<'gc>| new_gc_cell_ptr(mc, JSObjectData::with_prototype(Some(proto)));

        let function_prototype = derived(object_prototype);
        let array_prototype = derived(object_prototype);
        let boolean_prototype = derived(object_prototype);
        let error_prototype = derived(object_prototype);
        let type_error_prototype = derived(error_prototype);
        let reference_error_prototype = derived(error_prototype);
        let range_error_prototype = derived(error_prototype);
        let global = derived(object_prototype);

        Realm {
            global,
            intrinsics: Intrinsics {
                object_prototype,
                function_prototype,
                array_prototype,
                boolean_prototype,
                error_prototype,
                type_error_prototype,
                reference_error_prototype,
                range_error_prototype,
            },
            profile,
            caches: RealmCaches::default(),
        }
    }
}
