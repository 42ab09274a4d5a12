// -----------------------------------------------------------------------------
// TypePath

/// Static names of a type.
///
/// - [`type_path`](TypePath::type_path): the unique, fully qualified path,
///   written as the `fulltype` discriminator.
/// - [`type_name`](TypePath::type_name): the path without its module,
///   written as the short `type` discriminator and used as the store key.
/// - [`module_path`](TypePath::module_path): the module the type lives in,
///   `None` for primitives.
///
/// Names never start with `::`.
///
/// # Examples
///
/// ```
/// use classify_reflect::info::TypePath;
///
/// assert_eq!(<Vec<u8>>::type_path(), "alloc::vec::Vec<u8>");
/// assert_eq!(<Vec<u8>>::type_name(), "Vec<u8>");
/// assert_eq!(<Vec<u8>>::module_path(), Some("alloc::vec"));
/// assert_eq!(u8::module_path(), None);
/// ```
pub trait TypePath: 'static {
    fn type_path() -> &'static str;

    fn type_name() -> &'static str;

    fn module_path() -> Option<&'static str> {
        None
    }
}
