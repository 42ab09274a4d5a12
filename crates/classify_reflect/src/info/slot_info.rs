use core::any::TypeId;

use crate::info::{Type, TypeInfo, Typed};
use crate::registry::PolyBase;

// -----------------------------------------------------------------------------
// DeferredInfo

/// Type info of [`DeferredRef<T>`](crate::DeferredRef).
#[derive(Debug)]
pub struct DeferredInfo {
    ty: Type,
    inner: fn() -> &'static TypeInfo,
}

impl DeferredInfo {
    pub fn new<TRef: Typed, TInner: Typed>() -> Self {
        Self {
            ty: Type::of::<TRef>(),
            inner: TInner::type_info,
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// The referenced type, whose short name keys the object store.
    #[inline]
    pub fn inner(&self) -> &'static TypeInfo {
        (self.inner)()
    }
}

// -----------------------------------------------------------------------------
// PolymorphicInfo

/// Names of a polymorphic base trait object such as `dyn Shape`.
#[derive(Debug, Clone, Copy)]
pub struct BaseType {
    id: TypeId,
    path: &'static str,
    module_path: Option<&'static str>,
}

impl BaseType {
    pub fn of<B: ?Sized + PolyBase>() -> Self {
        Self {
            id: TypeId::of::<B>(),
            path: B::base_path(),
            module_path: B::base_module(),
        }
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn path(&self) -> &'static str {
        self.path
    }

    #[inline]
    pub fn module_path(&self) -> Option<&'static str> {
        self.module_path
    }
}

/// Type info of `Box<dyn Base>`.
///
/// The fallback is the statically declared type: values of that type are
/// written without a discriminator, and unresolvable discriminators decode
/// to it.
#[derive(Debug)]
pub struct PolymorphicInfo {
    ty: Type,
    base: BaseType,
    fallback: Option<fn() -> &'static TypeInfo>,
}

impl PolymorphicInfo {
    pub fn new<TBox: Typed, B: ?Sized + PolyBase>() -> Self {
        Self {
            ty: Type::of::<TBox>(),
            base: BaseType::of::<B>(),
            fallback: B::fallback_info(),
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn base(&self) -> &BaseType {
        &self.base
    }

    /// The declared default subtype, `None` for abstract bases.
    #[inline]
    pub fn fallback(&self) -> Option<&'static TypeInfo> {
        self.fallback.map(|info| info())
    }

    /// Module in which short `type` discriminators are resolved.
    ///
    /// This is the module of the fallback type, or of the base trait when
    /// there is none.
    pub fn context_module(&self) -> Option<&'static str> {
        match self.fallback() {
            Some(info) => info.module_path(),
            None => self.base.module_path(),
        }
    }
}

// -----------------------------------------------------------------------------
// SharedInfo

/// Type info of `Arc<T>`.
#[derive(Debug)]
pub struct SharedInfo {
    ty: Type,
    inner: fn() -> &'static TypeInfo,
}

impl SharedInfo {
    pub fn new<TArc: Typed, TInner: Typed>() -> Self {
        Self {
            ty: Type::of::<TArc>(),
            inner: TInner::type_info,
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn inner(&self) -> &'static TypeInfo {
        (self.inner)()
    }
}

// -----------------------------------------------------------------------------
// ParentInfo

/// Type info of [`Parent<P>`](crate::Parent).
#[derive(Debug)]
pub struct ParentInfo {
    ty: Type,
    target: TypeId,
}

impl ParentInfo {
    pub fn new<TParent: Typed, P: 'static>() -> Self {
        Self {
            ty: Type::of::<TParent>(),
            target: TypeId::of::<P>(),
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Type the back reference points to.
    #[inline]
    pub fn target(&self) -> TypeId {
        self.target
    }
}
