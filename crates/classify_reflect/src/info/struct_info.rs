use alloc::boxed::Box;
use alloc::vec::Vec;

use classify_utils::hash::HashMap;

use crate::info::{ClassPolicy, MemberPolicy, PolicyFlags, Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// MemberInfo

/// Descriptor of one persisted member.
///
/// The field name is the Rust identifier. The storage name is the tag of
/// the child node and defaults to the field name.
#[derive(Debug, Clone)]
pub struct MemberInfo {
    field_name: &'static str,
    storage_name: &'static str,
    type_info: fn() -> &'static TypeInfo,
    policy: MemberPolicy,
}

impl MemberInfo {
    pub fn new<T: Typed>(field_name: &'static str) -> Self {
        Self {
            field_name,
            storage_name: field_name,
            type_info: T::type_info,
            policy: MemberPolicy::default(),
        }
    }

    pub fn with_storage_name(mut self, storage_name: &'static str) -> Self {
        self.storage_name = storage_name;
        self
    }

    pub fn with_policy(mut self, policy: MemberPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[inline]
    pub fn field_name(&self) -> &'static str {
        self.field_name
    }

    #[inline]
    pub fn storage_name(&self) -> &'static str {
        self.storage_name
    }

    /// Declared type of the member.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub fn policy(&self) -> &MemberPolicy {
        &self.policy
    }

    #[inline]
    pub fn has(&self, flags: PolicyFlags) -> bool {
        self.policy.contains(flags)
    }
}

// -----------------------------------------------------------------------------
// StructInfo

/// Member table of a struct, in declaration order.
///
/// # Examples
///
/// ```
/// use classify_reflect::info::{MemberInfo, MemberPolicy, PolicyFlags, StructInfo, Typed};
/// use classify_reflect::Classify;
///
/// #[derive(Classify, Default)]
/// struct Settings {
///     #[classify(rename = "Width")]
///     width: u32,
///     #[classify(ignore)]
///     cache: u64,
/// }
///
/// let info = Settings::type_info().as_struct().unwrap();
/// assert_eq!(info.len(), 2);
/// assert_eq!(info.member("width").unwrap().storage_name(), "Width");
/// assert!(info.member_at(1).unwrap().has(PolicyFlags::IGNORE));
/// ```
#[derive(Debug)]
pub struct StructInfo {
    ty: Type,
    members: Box<[MemberInfo]>,
    indices: HashMap<&'static str, usize>,
    policy: ClassPolicy,
}

impl StructInfo {
    pub fn new<T: Typed>(members: Vec<MemberInfo>) -> Self {
        let indices = members
            .iter()
            .enumerate()
            .map(|(index, member)| (member.field_name, index))
            .collect();

        Self {
            ty: Type::of::<T>(),
            members: members.into_boxed_slice(),
            indices,
            policy: ClassPolicy::empty(),
        }
    }

    pub fn with_class_policy(mut self, policy: ClassPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn class_policy(&self) -> ClassPolicy {
        self.policy
    }

    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn member_at(&self, index: usize) -> Option<&MemberInfo> {
        self.members.get(index)
    }

    /// Looks up a member by field name.
    pub fn member(&self, field_name: &str) -> Option<&MemberInfo> {
        self.index_of(field_name).map(|index| &self.members[index])
    }

    #[inline]
    pub fn index_of(&self, field_name: &str) -> Option<usize> {
        self.indices.get(field_name).copied()
    }
}
