use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

use bitflags::bitflags;

use crate::Classify;

// -----------------------------------------------------------------------------
// Flags

bitflags! {
    /// Member level switches of a [`MemberPolicy`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PolicyFlags: u16 {
        /// Never written, never read.
        const IGNORE            = 1 << 0;
        /// Never written; set to the enclosing object on read.
        const PARENT            = 1 << 1;
        /// Written as an id, the value goes to the object store.
        const FOLLOW_ID         = 1 << 2;
        /// Not written while equal to its zero value.
        const IGNORE_IF_DEFAULT = 1 << 3;
        /// Not written while it encodes to an empty collection.
        const IGNORE_IF_EMPTY   = 1 << 4;
        /// Filled with the id of the deferred reference that loaded the object.
        const ID                = 1 << 5;
        /// Opts out of a class level `IGNORE_IF_DEFAULT`.
        const KEEP_DEFAULT      = 1 << 6;
        /// Opts out of a class level `IGNORE_IF_EMPTY`.
        const KEEP_EMPTY        = 1 << 7;
    }
}

bitflags! {
    /// Policies applied to every member of a type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClassPolicy: u8 {
        const IGNORE_IF_DEFAULT = 1 << 0;
        const IGNORE_IF_EMPTY   = 1 << 1;
    }
}

// -----------------------------------------------------------------------------
// MemberPolicy

type EqualityProbe = Arc<dyn Fn(&dyn Classify) -> bool + Send + Sync>;

/// How the object walker treats one member.
///
/// # Examples
///
/// ```
/// use classify_reflect::info::{ClassPolicy, MemberPolicy, PolicyFlags};
///
/// let policy = MemberPolicy::new(PolicyFlags::KEEP_DEFAULT).ignore_if_equal(-1_i32);
///
/// assert!(!policy.skips_default(ClassPolicy::IGNORE_IF_DEFAULT));
/// assert!(policy.matches_ignored_value(&-1_i32));
/// assert!(!policy.matches_ignored_value(&7_i32));
/// ```
#[derive(Clone)]
pub struct MemberPolicy {
    flags: PolicyFlags,
    equal_to: Option<EqualityProbe>,
}

impl MemberPolicy {
    pub const fn new(flags: PolicyFlags) -> Self {
        Self {
            flags,
            equal_to: None,
        }
    }

    /// Skips the member while its value equals `value`.
    pub fn ignore_if_equal<T: PartialEq + Any + Send + Sync>(mut self, value: T) -> Self {
        self.equal_to = Some(Arc::new(move |current: &dyn Classify| {
            current.downcast_ref::<T>().is_some_and(|current| *current == value)
        }));
        self
    }

    #[inline]
    pub fn flags(&self) -> PolicyFlags {
        self.flags
    }

    #[inline]
    pub fn contains(&self, flags: PolicyFlags) -> bool {
        self.flags.contains(flags)
    }

    /// Returns `true` if a zero value of this member is left out.
    pub fn skips_default(&self, class: ClassPolicy) -> bool {
        self.contains(PolicyFlags::IGNORE_IF_DEFAULT)
            || (class.contains(ClassPolicy::IGNORE_IF_DEFAULT)
                && !self.contains(PolicyFlags::KEEP_DEFAULT))
    }

    /// Returns `true` if an empty collection in this member is left out.
    pub fn skips_empty(&self, class: ClassPolicy) -> bool {
        self.contains(PolicyFlags::IGNORE_IF_EMPTY)
            || (class.contains(ClassPolicy::IGNORE_IF_EMPTY)
                && !self.contains(PolicyFlags::KEEP_EMPTY))
    }

    /// Returns `true` if `value` equals the `ignore_if_equal` value.
    pub fn matches_ignored_value(&self, value: &dyn Classify) -> bool {
        self.equal_to.as_ref().is_some_and(|probe| probe(value))
    }
}

impl Default for MemberPolicy {
    #[inline]
    fn default() -> Self {
        Self::new(PolicyFlags::empty())
    }
}

impl fmt::Debug for MemberPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberPolicy")
            .field("flags", &self.flags)
            .field("ignore_if_equal", &self.equal_to.is_some())
            .finish()
    }
}
