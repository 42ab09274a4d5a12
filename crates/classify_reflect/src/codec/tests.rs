use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::time::Duration;
use std::collections::{HashMap, HashSet};

use classify_tree::Node;

use crate::error::{ClassifyError, ConfigurationError, ConstructionCause, FormatErrorKind};
use crate::registry::TypeRegistry;
use crate::store::{MemoryStore, ObjectStore};
use crate::{Classifier, Classify, DeferredRef, Parent, ParentHandle, impl_polymorphic};

// -----------------------------------------------------------------------------
// Leaves

#[derive(Classify, Default, Debug, PartialEq)]
struct Leaves {
    zero: i32,
    min: i64,
    max: u64,
    flag: bool,
    space: char,
    letter: char,
    empty: String,
    quote: String,
    control: String,
    ratio: f64,
}

#[test]
fn leaves_round_trip() {
    let classifier = Classifier::default();
    let value = Leaves {
        zero: 0,
        min: i64::MIN,
        max: u64::MAX,
        flag: true,
        space: ' ',
        letter: 'é',
        empty: String::new(),
        quote: String::from("\"quoted\" <tag> & 'x'"),
        control: String::from("tab\there\nnewline"),
        ratio: -0.125,
    };

    let node = classifier.serialize(&value).unwrap();
    assert_eq!(node.child("min").and_then(Node::text), Some("-9223372036854775808"));
    assert_eq!(node.child("max").and_then(Node::text), Some("18446744073709551615"));
    assert_eq!(node.child("empty").and_then(Node::text), Some(""));
    assert_eq!(node.child("space").and_then(|n| n.attribute("encoding")), Some("codepoint"));
    assert_eq!(node.child("control").and_then(|n| n.attribute("encoding")), Some("base64"));
    assert!(node.child("quote").and_then(|n| n.attribute("encoding")).is_none());

    let back: Leaves = classifier.deserialize(&node).unwrap();
    assert_eq!(back, value);
}

#[test]
fn bad_number_names_the_node() {
    let classifier = Classifier::default();
    let node = Node::new("item").with_child(Node::leaf("zero", "twelve"));

    let error = classifier.deserialize::<Leaves>(&node).unwrap_err();
    let ClassifyError::Format(error) = error else {
        panic!("expected a format error, got {error:?}");
    };
    assert_eq!(error.path, "item/zero");
    assert!(matches!(error.kind, FormatErrorKind::InvalidText(_)));
}

// -----------------------------------------------------------------------------
// Partial trees

#[derive(Classify, Debug, PartialEq)]
struct Partial {
    a_ulong: u64,
    an_int: i32,
    label: String,
}

impl Default for Partial {
    fn default() -> Self {
        Self {
            a_ulong: 0,
            an_int: -123,
            label: String::from("unset"),
        }
    }
}

#[test]
fn absent_members_keep_defaults() {
    let classifier = Classifier::default();
    let node = Node::new("item")
        .with_child(Node::leaf("a_ulong", "987654"))
        .with_child(Node::leaf("unknown", "ignored"));

    let value: Partial = classifier.deserialize(&node).unwrap();
    assert_eq!(value.a_ulong, 987654);
    assert_eq!(value.an_int, -123);
    assert_eq!(value.label, "unset");
}

#[test]
fn decode_into_existing_value() {
    let classifier = Classifier::default();
    let mut value = Partial {
        a_ulong: 1,
        an_int: 2,
        label: String::from("kept"),
    };

    let node = Node::new("item").with_child(Node::leaf("an_int", "7"));
    classifier.deserialize_into(&mut value, &node).unwrap();
    assert_eq!(value.a_ulong, 1);
    assert_eq!(value.an_int, 7);
    assert_eq!(value.label, "kept");
}

// -----------------------------------------------------------------------------
// Nulls and enums

#[derive(Classify, Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Color {
    #[default]
    Red,
    #[classify(rename = "dark-green")]
    Green,
    Blue,
}

#[derive(Classify, Default, Debug, PartialEq)]
struct Nulls {
    name: Option<String>,
    list: Option<Vec<u8>>,
    nested: Option<Option<u8>>,
    count: u32,
    color: Color,
}

#[test]
fn nulls_round_trip() {
    let classifier = Classifier::default();
    let value = Nulls {
        name: None,
        list: Some(Vec::new()),
        nested: Some(Some(4)),
        count: 3,
        color: Color::Green,
    };

    let node = classifier.serialize(&value).unwrap();
    assert!(node.child("name").is_some_and(Node::is_null));
    assert!(node.child("list").is_some_and(|n| !n.is_null() && n.is_bare()));
    assert_eq!(node.child("color").and_then(Node::text), Some("dark-green"));

    let back: Nulls = classifier.deserialize(&node).unwrap();
    assert_eq!(back, value);
}

#[test]
fn null_resets_plain_members() {
    let classifier = Classifier::default();
    let mut value = Nulls {
        count: 5,
        color: Color::Blue,
        ..Default::default()
    };

    let node = Node::new("item")
        .with_child(Node::null("count"))
        .with_child(Node::null("color"));
    classifier.deserialize_into(&mut value, &node).unwrap();
    assert_eq!(value.count, 0);
    assert_eq!(value.color, Color::Red);
}

#[test]
fn unknown_variant_is_a_format_error() {
    let classifier = Classifier::default();
    let node = Node::new("item").with_child(Node::leaf("color", "Green"));

    let error = classifier.deserialize::<Nulls>(&node).unwrap_err();
    assert!(matches!(
        error,
        ClassifyError::Format(ref error)
            if error.path == "item/color"
                && matches!(error.kind, FormatErrorKind::UnknownEnumValue { .. })
    ));
}

// -----------------------------------------------------------------------------
// Containers

#[derive(Classify, Default, Debug, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Classify, Default, Debug, PartialEq)]
struct Containers {
    points: Vec<Point>,
    slots: [u8; 3],
    names: BTreeMap<String, String>,
    by_color: BTreeMap<Color, u8>,
    tags: HashSet<String>,
    counts: HashMap<u16, Vec<u8>>,
}

#[test]
fn string_map_items_carry_keys() {
    let classifier = Classifier::default();
    let names = BTreeMap::from([
        (String::from("abc"), String::from("def")),
        (String::from("key"), String::from("value")),
    ]);

    let node = classifier.serialize(&names).unwrap();
    let items: Vec<_> = node
        .children_named("item")
        .map(|item| (item.attribute("key").unwrap(), item.text().unwrap()))
        .collect();
    assert_eq!(items, [("abc", "def"), ("key", "value")]);

    let back: BTreeMap<String, String> = classifier.deserialize(&node).unwrap();
    assert_eq!(back, names);
}

#[test]
fn containers_round_trip() {
    let classifier = Classifier::default();
    let value = Containers {
        points: vec![Point { x: 1, y: 2 }, Point { x: -3, y: 4 }],
        slots: [7, 8, 9],
        names: BTreeMap::from([(String::from("a"), String::from("b"))]),
        by_color: BTreeMap::from([(Color::Green, 1), (Color::Blue, 2)]),
        tags: HashSet::from([String::from("b"), String::from("a"), String::from("c")]),
        counts: HashMap::from([(3, vec![1, 2]), (1, Vec::new())]),
    };

    let node = classifier.serialize(&value).unwrap();
    let tags: Vec<_> = node
        .child("tags")
        .unwrap()
        .children_named("item")
        .filter_map(Node::text)
        .collect();
    assert_eq!(tags, ["a", "b", "c"]);

    let back: Containers = classifier.deserialize(&node).unwrap();
    assert_eq!(back, value);
}

#[test]
fn arrays_fill_then_reset() {
    let classifier = Classifier::default();
    let short = Node::new("item")
        .with_child(Node::leaf("item", "5"))
        .with_child(Node::leaf("item", "6"));
    let value: [u8; 3] = classifier.deserialize(&short).unwrap();
    assert_eq!(value, [5, 6, 0]);

    let long = short
        .with_child(Node::leaf("item", "7"))
        .with_child(Node::leaf("item", "8"));
    let value: [u8; 3] = classifier.deserialize(&long).unwrap();
    assert_eq!(value, [5, 6, 7]);
}

#[test]
fn map_items_without_key_are_skipped() {
    let classifier = Classifier::default();
    let node = Node::new("item")
        .with_child(Node::leaf("item", "1").with_attribute("key", "7"))
        .with_child(Node::leaf("item", "2"))
        .with_child(Node::leaf("item", "3").with_attribute("key", "not a number"));

    let value: BTreeMap<u16, u8> = classifier.deserialize(&node).unwrap();
    assert_eq!(value, BTreeMap::from([(7, 1)]));
}

#[test]
fn nested_error_path() {
    let classifier = Classifier::default();
    let node = Node::new("item").with_child(
        Node::new("points")
            .with_child(Node::new("item").with_child(Node::leaf("x", "1")))
            .with_child(Node::new("item").with_child(Node::leaf("x", "1.5"))),
    );

    let error = classifier.deserialize::<Containers>(&node).unwrap_err();
    let ClassifyError::Format(error) = error else {
        panic!("expected a format error, got {error:?}");
    };
    assert_eq!(error.path, "item/points/item[1]/x");
}

#[test]
fn null_items_keep_their_slot() {
    let classifier = Classifier::default();

    let list: Vec<Option<u8>> = vec![Some(1), None, Some(3)];
    let node = classifier.serialize(&list).unwrap();
    let items: Vec<_> = node.children_named("item").collect();
    assert_eq!(items.len(), 3);
    assert!(items[1].is_null());

    let back: Vec<Option<u8>> = classifier.deserialize(&node).unwrap();
    assert_eq!(back, list);

    let map = BTreeMap::from([
        (String::from("a"), None),
        (String::from("b"), Some(String::from("x"))),
    ]);
    let node = classifier.serialize(&map).unwrap();
    let first = node.children_named("item").next().unwrap();
    assert_eq!(first.attribute("key"), Some("a"));
    assert!(first.is_null());

    let back: BTreeMap<String, Option<String>> = classifier.deserialize(&node).unwrap();
    assert_eq!(back, map);
}

#[test]
fn unsupported_map_key() {
    let classifier = Classifier::default();
    let map = BTreeMap::from([(vec![1_u8], 1_u8)]);

    let error = classifier.serialize(&map).unwrap_err();
    assert!(matches!(
        error,
        ClassifyError::Configuration(ConfigurationError::UnsupportedKey { .. })
    ));

    let error = classifier
        .deserialize::<BTreeMap<Vec<u8>, u8>>(&Node::new("item"))
        .unwrap_err();
    assert!(matches!(
        error,
        ClassifyError::Configuration(ConfigurationError::UnsupportedKey { .. })
    ));
}

// -----------------------------------------------------------------------------
// Member policies

#[derive(Classify, Debug, PartialEq)]
struct Policies {
    #[classify(ignore_if_default)]
    zero: i32,
    #[classify(ignore_if_empty)]
    empty: Vec<u8>,
    #[classify(ignore_if_empty)]
    maybe_empty: Option<Vec<u8>>,
    #[classify(ignore_if_equal = -1)]
    sentinel: i32,
    #[classify(ignore)]
    cache: u64,
    #[classify(skip)]
    elapsed: Duration,
    #[classify(rename = "Label")]
    label: String,
}

impl Default for Policies {
    fn default() -> Self {
        Self {
            zero: 0,
            empty: Vec::new(),
            maybe_empty: Some(Vec::new()),
            sentinel: -1,
            cache: 0,
            elapsed: Duration::ZERO,
            label: String::new(),
        }
    }
}

#[test]
fn member_policies_skip_values() {
    let classifier = Classifier::default();
    let value = Policies {
        cache: 99,
        elapsed: Duration::from_secs(1),
        label: String::from("x"),
        ..Default::default()
    };

    let node = classifier.serialize(&value).unwrap();
    let names: Vec<_> = node.children().iter().map(Node::name).collect();
    assert_eq!(names, ["Label"]);

    let value = Policies {
        zero: 1,
        empty: vec![2],
        maybe_empty: Some(vec![3]),
        sentinel: 4,
        ..Default::default()
    };
    let node = classifier.serialize(&value).unwrap();
    let names: Vec<_> = node.children().iter().map(Node::name).collect();
    assert_eq!(names, ["zero", "empty", "maybe_empty", "sentinel", "Label"]);
}

#[test]
fn ignored_members_are_not_read() {
    let classifier = Classifier::default();
    let node = Node::new("item")
        .with_child(Node::leaf("cache", "5"))
        .with_child(Node::leaf("Label", "read"))
        .with_child(Node::leaf("label", "not read"));

    let value: Policies = classifier.deserialize(&node).unwrap();
    assert_eq!(value.cache, 0);
    assert_eq!(value.label, "read");
}

#[derive(Classify, Default)]
#[classify(ignore_if_default, ignore_if_empty)]
struct Sparse {
    count: u32,
    #[classify(keep_default)]
    version: u32,
    tags: Vec<String>,
    #[classify(keep_empty)]
    notes: Vec<String>,
}

#[test]
fn class_policies_and_opt_outs() {
    let classifier = Classifier::default();
    let node = classifier.serialize(&Sparse::default()).unwrap();
    let names: Vec<_> = node.children().iter().map(Node::name).collect();
    assert_eq!(names, ["version", "notes"]);
}

// -----------------------------------------------------------------------------
// Polymorphism

pub trait Shape: Classify {
    fn area(&self) -> f64;
}

impl_polymorphic!(dyn Shape => Square);

#[derive(Classify, Default)]
#[classify(subtype_of = dyn Shape)]
struct Square {
    side: f64,
}

#[derive(Classify, Default)]
#[classify(subtype_of = dyn Shape)]
struct Circle {
    radius: f64,
}

impl Shape for Square {
    fn area(&self) -> f64 {
        self.side * self.side
    }
}

impl Shape for Circle {
    fn area(&self) -> f64 {
        3.0 * self.radius * self.radius
    }
}

mod extra {
    use super::Shape;
    use crate::Classify;

    #[derive(Classify, Default)]
    #[classify(subtype_of = dyn Shape)]
    pub struct Triangle {
        pub base: f64,
        pub height: f64,
    }

    impl Shape for Triangle {
        fn area(&self) -> f64 {
            self.base * self.height / 2.0
        }
    }
}

pub trait Plugin: Classify {}

impl_polymorphic!(dyn Plugin);

#[derive(Classify, Default)]
struct Echo {
    times: u8,
}

impl Plugin for Echo {}

fn shape_classifier() -> Classifier {
    let mut registry = TypeRegistry::empty();
    registry.register_subtype::<dyn Shape, Square>(|| Box::new(Square::default()));
    registry.register_subtype::<dyn Shape, Circle>(|| Box::new(Circle::default()));
    registry.register_subtype::<dyn Shape, extra::Triangle>(|| Box::new(extra::Triangle::default()));
    registry.register_subtype::<dyn Plugin, Echo>(|| Box::new(Echo::default()));
    Classifier::new(registry)
}

#[test]
fn discriminators() {
    let classifier = shape_classifier();
    let shapes: Vec<Box<dyn Shape>> = vec![
        Box::new(Square { side: 2.0 }),
        Box::new(Circle { radius: 1.0 }),
        Box::new(extra::Triangle {
            base: 4.0,
            height: 3.0,
        }),
    ];

    let node = classifier.serialize(&shapes).unwrap();
    let items: Vec<_> = node.children_named("item").collect();
    assert!(items[0].attribute("type").is_none());
    assert!(items[0].attribute("fulltype").is_none());
    assert_eq!(items[1].attribute("type"), Some("Circle"));
    assert_eq!(
        items[2].attribute("fulltype"),
        Some("classify_reflect::codec::tests::extra::Triangle")
    );

    let back: Vec<Box<dyn Shape>> = classifier.deserialize(&node).unwrap();
    let areas: Vec<f64> = back.iter().map(|shape| shape.area()).collect();
    assert_eq!(areas, [4.0, 3.0, 6.0]);
    assert!((*back[2]).as_classify().is::<extra::Triangle>());
}

#[test]
fn unknown_discriminator_falls_back() {
    let classifier = shape_classifier();
    let node = Node::new("item")
        .with_attribute("type", "Hexagon")
        .with_child(Node::leaf("side", "3"));

    let shape: Box<dyn Shape> = classifier.deserialize(&node).unwrap();
    assert!((*shape).as_classify().is::<Square>());
    assert_eq!(shape.area(), 9.0);
}

#[test]
fn abstract_base_needs_a_discriminator() {
    let classifier = shape_classifier();
    let node = Node::new("item").with_child(Node::new("item").with_child(Node::leaf("times", "2")));

    let Err(error) = classifier.deserialize::<Vec<Box<dyn Plugin>>>(&node) else {
        panic!("an abstract base without a discriminator cannot be built");
    };
    assert!(matches!(
        error,
        ClassifyError::Construction {
            cause: ConstructionCause::NoDefault,
            ..
        }
    ));

    let node = Node::new("item").with_child(
        Node::new("item")
            .with_attribute("type", "Echo")
            .with_child(Node::leaf("times", "2")),
    );
    let plugins: Vec<Box<dyn Plugin>> = classifier.deserialize(&node).unwrap();
    let echo = (*plugins[0]).as_classify().downcast_ref::<Echo>().unwrap();
    assert_eq!(echo.times, 2);
}

#[cfg(feature = "auto_register")]
#[test]
fn subtypes_register_themselves() {
    let registry = TypeRegistry::new();
    let base = core::any::TypeId::of::<dyn Shape>();
    assert!(registry.contains_subtype(base, core::any::TypeId::of::<Circle>()));
    assert!(registry.contains_subtype(base, core::any::TypeId::of::<extra::Triangle>()));
}

// -----------------------------------------------------------------------------
// Deferred references

#[derive(Classify, Default, Debug, PartialEq)]
struct Book {
    #[classify(id)]
    id: String,
    title: String,
}

#[derive(Classify, Default)]
struct Library {
    name: String,
    #[classify(follow_id)]
    book: DeferredRef<Book>,
    inline: DeferredRef<u32>,
}

fn library_classifier() -> (Classifier, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let classifier = shape_classifier().with_shared_store(store.clone() as Arc<dyn ObjectStore>);
    (classifier, store)
}

#[test]
fn followed_members_go_to_the_store() {
    let (classifier, store) = library_classifier();
    let library = Library {
        name: String::from("city"),
        book: DeferredRef::new(
            "b1",
            Book {
                id: String::new(),
                title: String::from("Dune"),
            },
        ),
        inline: DeferredRef::new("n", 12),
    };

    let node = classifier.serialize(&library).unwrap();
    let book = node.child("book").unwrap();
    assert_eq!(book.attribute("id"), Some("b1"));
    assert!(book.children().is_empty());
    assert!(store.contains("Book", "b1"));

    let inline = node.child("inline").unwrap();
    assert_eq!(inline.attribute("id"), Some("n"));
    assert_eq!(inline.text(), Some("12"));

    let back: Library = classifier.deserialize(&node).unwrap();
    assert!(back.inline.is_resolved());
    assert_eq!(back.inline.get().unwrap(), &12);

    assert!(!back.book.is_resolved());
    assert_eq!(store.load_count(), 0);

    let book = back.book.get().unwrap();
    assert_eq!(book.title, "Dune");
    assert_eq!(book.id, "b1");
    assert_eq!(back.book.get().unwrap().title, "Dune");
    assert_eq!(store.load_count(), 1);
}

#[test]
fn unread_references_are_not_saved_again() {
    let (classifier, store) = library_classifier();
    store.insert(
        "Book",
        "b2",
        Node::new("item").with_child(Node::leaf("title", "Emma")),
    );
    let node = Node::new("item").with_child(Node::new("book").with_attribute("id", "b2"));

    let library: Library = classifier.deserialize(&node).unwrap();
    let again = classifier.serialize(&library).unwrap();
    assert_eq!(again.child("book").and_then(|n| n.attribute("id")), Some("b2"));
    assert_eq!(store.load_count(), 0);
    assert_eq!(store.len(), 1);
}

#[test]
fn missing_stored_object() {
    let (classifier, _) = library_classifier();
    let node = Node::new("item").with_child(Node::new("book").with_attribute("id", "nope"));

    let library: Library = classifier.deserialize(&node).unwrap();
    assert!(matches!(
        library.book.get(),
        Err(ClassifyError::Store(crate::StoreError::NotFound { .. }))
    ));
}

#[test]
fn follow_id_needs_a_store() {
    let classifier = Classifier::default();
    let error = classifier.serialize(&Library::default()).unwrap_err();
    assert!(matches!(
        error,
        ClassifyError::Configuration(ConfigurationError::MissingStore { member: "book", .. })
    ));
}

#[derive(Classify, Default)]
struct Misplaced {
    #[classify(follow_id)]
    count: u32,
}

#[derive(Classify, Default)]
struct BadId {
    #[classify(id)]
    id: u32,
}

#[test]
fn misused_policies_are_configuration_errors() {
    let (classifier, _) = library_classifier();

    let error = classifier.serialize(&Misplaced::default()).unwrap_err();
    assert!(matches!(
        error,
        ClassifyError::Configuration(ConfigurationError::FollowIdNotDeferred { .. })
    ));

    let info = <BadId as crate::info::Typed>::type_info().as_struct().unwrap();
    assert!(matches!(
        classifier.validate(info),
        Err(ConfigurationError::IdNotString { .. })
    ));
}

#[test]
fn missing_id_attribute() {
    let (classifier, _) = library_classifier();
    let node = Node::new("item").with_child(Node::new("book"));

    let Err(error) = classifier.deserialize::<Library>(&node) else {
        panic!("a followed member without an id must fail");
    };
    assert!(matches!(
        error,
        ClassifyError::Format(ref error) if error.kind == FormatErrorKind::MissingId
    ));
}

// -----------------------------------------------------------------------------
// Parents

#[derive(Classify, Default)]
struct Folder {
    name: String,
    files: Vec<File>,
    meta: Option<Arc<Meta>>,
}

#[derive(Classify, Default)]
struct File {
    name: String,
    #[classify(parent)]
    folder: Parent<Folder>,
}

#[derive(Classify, Default)]
struct Meta {
    #[classify(parent)]
    owner: Parent<Folder>,
    #[classify(parent)]
    wrong: Parent<File>,
}

#[test]
fn parents_point_at_the_shared_owner() {
    let classifier = Classifier::default();
    let folder = Folder {
        name: String::from("docs"),
        files: vec![File {
            name: String::from("a.txt"),
            ..Default::default()
        }],
        meta: Some(Arc::new(Meta::default())),
    };

    let node = classifier.serialize(&Arc::new(folder)).unwrap();
    assert!(node.child("files").unwrap().children()[0].child("folder").is_none());

    let folder: Arc<Folder> = classifier.deserialize(&node).unwrap();
    let parent = folder.files[0].folder.get().unwrap();
    assert_eq!(parent.name, "docs");
    assert!(Arc::ptr_eq(&parent, &folder));

    let meta = folder.meta.as_ref().unwrap();
    assert_eq!(meta.owner.get().unwrap().name, "docs");
    assert!(!meta.wrong.is_set());
}

#[test]
fn parents_outside_an_arc_stay_empty() {
    let classifier = Classifier::default();
    let node = Node::new("item").with_child(
        Node::new("files").with_child(Node::new("item").with_child(Node::leaf("name", "a"))),
    );

    let folder: Folder = classifier.deserialize(&node).unwrap();
    assert!(!folder.files[0].folder.is_set());
}

#[test]
fn explicit_parent_handle() {
    let classifier = Classifier::default();
    let owner = Arc::new(Folder {
        name: String::from("root"),
        ..Default::default()
    });
    let node = Node::new("item").with_child(Node::leaf("name", "b.txt"));

    let file: File = classifier
        .deserialize_with_parent(&node, &ParentHandle::from_arc(&owner))
        .unwrap();
    assert_eq!(file.folder.get().unwrap().name, "root");
}

#[derive(Classify, Default)]
struct Shelf {
    name: String,
    #[classify(follow_id)]
    book: DeferredRef<ShelvedBook>,
}

#[derive(Classify, Default)]
struct ShelvedBook {
    title: String,
    #[classify(parent)]
    shelf: Parent<Shelf>,
}

#[test]
fn followed_values_see_the_owner_as_parent() {
    let (classifier, store) = library_classifier();
    store.insert(
        "ShelvedBook",
        "s1",
        Node::new("item").with_child(Node::leaf("title", "Ulysses")),
    );
    let node = Node::new("item")
        .with_child(Node::leaf("name", "top"))
        .with_child(Node::new("book").with_attribute("id", "s1"));

    let shelf: Arc<Shelf> = classifier.deserialize(&node).unwrap();
    let book = shelf.book.get().unwrap();
    assert_eq!(book.title, "Ulysses");

    let owner = book.shelf.get().unwrap();
    assert_eq!(owner.name, "top");
    assert!(Arc::ptr_eq(&owner, &shelf));
}

#[test]
fn parent_outside_a_parent_member() {
    let classifier = Classifier::default();
    let error = classifier.serialize(&Parent::<Folder>::none()).unwrap_err();
    assert!(matches!(
        error,
        ClassifyError::Configuration(ConfigurationError::DetachedParent(_))
    ));
}

// -----------------------------------------------------------------------------
// Idempotence

#[derive(Classify, Default)]
struct Everything {
    leaves: Leaves,
    nulls: Nulls,
    containers: Containers,
    shapes: Vec<Box<dyn Shape>>,
    shared: Arc<Point>,
}

#[test]
fn serialize_deserialize_serialize_is_stable() {
    let classifier = shape_classifier();
    let value = Everything {
        leaves: Leaves {
            control: String::from("\u{1}"),
            space: '\n',
            ..Default::default()
        },
        nulls: Nulls {
            nested: Some(None),
            ..Default::default()
        },
        containers: Containers {
            points: vec![Point::default(), Point { x: 9, y: 9 }],
            tags: HashSet::from([String::from("z"), String::from("y")]),
            counts: HashMap::from([(2, vec![1]), (1, vec![2])]),
            ..Default::default()
        },
        shapes: vec![Box::new(Circle { radius: 0.5 }), Box::new(Square { side: 1.0 })],
        shared: Arc::new(Point { x: 1, y: 1 }),
    };

    let first = classifier.serialize(&value).unwrap();
    let back: Everything = classifier.deserialize(&first).unwrap();
    let second = classifier.serialize(&back).unwrap();
    assert_eq!(first, second);
    assert_eq!(*back.shared, Point { x: 1, y: 1 });
}

#[test]
fn custom_root_name() {
    let classifier = Classifier::default().with_options(crate::ClassifierOptions {
        root_name: String::from("point"),
    });
    let node = classifier.serialize(&Point { x: 1, y: 2 }).unwrap();
    assert_eq!(node.name(), "point");

    let node = classifier.serialize_named("p", &Point::default()).unwrap();
    assert_eq!(node.name(), "p");
}
