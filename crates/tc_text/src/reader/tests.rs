use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet, BinaryHeap, VecDeque};
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::any::TypeId;
use core::error::Error;
use core::fmt;
use core::net::Ipv4Addr;
use core::num::NonZeroU8;
use core::str::FromStr;
use core::time::Duration;
use std::collections::HashMap;
use std::thread;

use serde::Serialize;
use tc_reflect::impls::{GenericTypeInfoCell, NonGenericTypeInfoCell};
use tc_reflect::info::{
    EnumInfo, Facet, MapInfo, NamedField, SeqInfo, StructInfo, TypeFlags, TypeInfo,
    TypeParamInfo, Typed, VariantInfo,
};
use tc_reflect::registry::{
    ParseWith, TypeRegistry, TypeTraitFromStr, TypeTraitFromString, TypeTraitParseWith, Unescape,
};

use super::{ParseFn, Strategy, TextReader, parse_fn};
use crate::config::ReaderConfig;
use crate::format::{Json, Jsv, TextFormat};
use crate::platform::PlatformParsers;
use crate::{DynamicValue, ParseError, Position};

// -----------------------------------------------------------------------------
// Fixtures

#[derive(Debug)]
struct Invalid(&'static str);

impl fmt::Display for Invalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Error for Invalid {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
enum Color {
    Red = 1,
    Green = 2,
    Blue = 4,
}

impl Typed for Color {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            TypeInfo::enumeration::<Self>(EnumInfo::new([
                VariantInfo::new("Red", Color::Red as i64, Color::Red),
                VariantInfo::new("Green", Color::Green as i64, Color::Green),
                VariantInfo::new("Blue", Color::Blue as i64, Color::Blue),
            ]))
        })
    }
}

#[derive(Debug, Default, PartialEq, Serialize)]
struct Point {
    x: i32,
    y: i32,
}

impl Typed for Point {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            TypeInfo::structure::<Self>(StructInfo::new::<Self>([
                NamedField::new::<Self, i32>("x", |p, v| p.x = v),
                NamedField::new::<Self, i32>("y", |p, v| p.y = v),
            ]))
        })
    }
}

#[derive(Debug, Default, PartialEq)]
struct Node {
    name: String,
    children: Vec<Node>,
}

impl Typed for Node {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            TypeInfo::structure::<Self>(StructInfo::new::<Self>([
                NamedField::new::<Self, String>("name", |n, v| n.name = v),
                NamedField::new::<Self, Vec<Node>>("children", |n, v| n.children = v),
            ]))
        })
    }
}

/// A value type with both a struct shape and a `FromStr` factory.
#[derive(Debug, Default, PartialEq)]
struct Version {
    major: u32,
    minor: u32,
}

impl FromStr for Version {
    type Err = Invalid;

    fn from_str(s: &str) -> Result<Self, Invalid> {
        let (major, minor) = s.split_once('.').ok_or(Invalid("missing `.`"))?;
        Ok(Version {
            major: major.parse().map_err(|_| Invalid("bad major"))?,
            minor: minor.parse().map_err(|_| Invalid("bad minor"))?,
        })
    }
}

impl Typed for Version {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            TypeInfo::structure::<Self>(StructInfo::new::<Self>([
                NamedField::new::<Self, u32>("major", |v, x| v.major = x),
                NamedField::new::<Self, u32>("minor", |v, x| v.minor = x),
            ]))
            .with_flags(TypeFlags::VALUE_TYPE)
        })
    }
}

#[derive(Debug, PartialEq)]
struct Celsius(f64);

impl FromStr for Celsius {
    type Err = Invalid;

    fn from_str(s: &str) -> Result<Self, Invalid> {
        let degrees = s.strip_suffix('C').ok_or(Invalid("missing unit"))?;
        degrees.parse().map(Celsius).map_err(|_| Invalid("bad degrees"))
    }
}

impl Typed for Celsius {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::opaque::<Self>().with_flags(TypeFlags::VALUE_TYPE))
    }
}

#[derive(Debug, PartialEq)]
struct Email(String);

impl ParseWith for Email {
    type Err = Invalid;

    fn parse_with(text: &str, unescape: Unescape) -> Result<Self, Invalid> {
        let text = unescape(text);
        if text.contains('@') {
            Ok(Email(text.into_owned()))
        } else {
            Err(Invalid("missing `@`"))
        }
    }
}

impl Typed for Email {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(TypeInfo::opaque::<Self>)
    }
}

#[derive(Debug, Default, PartialEq)]
struct Title {
    text: String,
}

impl From<String> for Title {
    fn from(text: String) -> Self {
        Title { text }
    }
}

impl Typed for Title {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            TypeInfo::structure::<Self>(StructInfo::new::<Self>([NamedField::new::<Self, String>(
                "text",
                |t, v| t.text = v,
            )]))
        })
    }
}

#[derive(Debug, PartialEq)]
struct Label(String);

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label(value)
    }
}

impl Typed for Label {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(TypeInfo::opaque::<Self>)
    }
}

/// Pushes in iteration order; the last item is the top.
#[derive(Debug, PartialEq)]
struct Stack<T>(Vec<T>);

impl<T> Stack<T> {
    fn pop(&mut self) -> Option<T> {
        self.0.pop()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Stack(Vec::new());
        for item in iter {
            stack.0.push(item);
        }
        stack
    }
}

impl<T: Typed + Send> Typed for Stack<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::opaque::<Self>()
                .with_generics([TypeParamInfo::new::<T>("T")])
                .with_facet(Facet::Stack(SeqInfo::new::<Self, T>()))
        })
    }
}

#[derive(Debug, PartialEq)]
struct Tags(Vec<String>);

impl FromIterator<String> for Tags {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Tags(iter.into_iter().collect())
    }
}

impl Typed for Tags {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            TypeInfo::opaque::<Self>().with_facet(Facet::Sequence(SeqInfo::new::<Self, String>()))
        })
    }
}

#[derive(Debug, PartialEq)]
struct Headers(Vec<(String, String)>);

impl FromIterator<(String, String)> for Headers {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Headers(iter.into_iter().collect())
    }
}

impl Typed for Headers {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            TypeInfo::opaque::<Self>()
                .with_facet(Facet::Sequence(SeqInfo::new::<Self, (String, String)>()))
                .with_facet(Facet::Map(MapInfo::new::<Self, String, String>()))
        })
    }
}

#[derive(Debug, Default, PartialEq)]
struct Circle {
    r: u32,
}

impl Typed for Circle {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            TypeInfo::structure::<Self>(StructInfo::new::<Self>([NamedField::new::<Self, u32>(
                "r",
                |c, v| c.r = v,
            )]))
        })
    }
}

#[derive(Debug, Default, PartialEq)]
struct Square {
    side: u32,
}

impl Typed for Square {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            TypeInfo::structure::<Self>(StructInfo::new::<Self>([NamedField::new::<Self, u32>(
                "side",
                |s, v| s.side = v,
            )]))
        })
    }
}

/// Abstract: no shape of its own.
#[derive(Debug, PartialEq)]
enum Shape {
    Circle(Circle),
    Square(Square),
}

impl Typed for Shape {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(TypeInfo::opaque::<Self>)
    }
}

#[derive(Debug)]
struct Shapeless;

impl Typed for Shapeless {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(TypeInfo::opaque::<Self>)
    }
}

fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register_type_trait::<Version, TypeTraitFromStr>();
    registry.register_type_trait::<Celsius, TypeTraitFromStr>();
    registry.register_type_trait::<Email, TypeTraitParseWith>();
    registry.register_type_trait::<Label, TypeTraitFromString>();
    registry.register_type_trait::<Title, TypeTraitFromString>();
    registry.register_subtype::<Shape, Circle>(Shape::Circle);
    registry.register_subtype::<Shape, Square>(Shape::Square);
    registry
}

fn json() -> TextReader<Json> {
    TextReader::new(ReaderConfig::new().registry(registry()))
}

fn jsv() -> TextReader<Jsv> {
    TextReader::new(ReaderConfig::new().registry(registry()))
}

fn strategy<T: Typed, F: TextFormat>(reader: &TextReader<F>) -> Strategy {
    reader.strategy_of(T::type_info())
}

// -----------------------------------------------------------------------------
// Scenarios

#[test]
fn scenarios() {
    let reader = Json::reader();

    assert_eq!(reader.parse::<i32>("42").unwrap(), 42);
    assert_eq!(reader.parse::<Color>("\"RED\"").unwrap(), Color::Red);
    assert_eq!(reader.parse::<Vec<i32>>("[1,2,3]").unwrap(), [1, 2, 3]);

    let map = reader.parse::<HashMap<String, i32>>(r#"{"a":1}"#).unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map["a"], 1);

    let err = reader.parse::<i32>("\"BAD\"").unwrap_err();
    assert!(matches!(err, ParseError::Primitive { ref token, .. } if token == "BAD"));
}

#[test]
fn round_trips() {
    let reader = json();

    let text = serde_json::to_string(&-17_i64).unwrap();
    assert_eq!(reader.parse::<i64>(&text).unwrap(), -17);

    let text = serde_json::to_string(&Color::Blue).unwrap();
    assert_eq!(reader.parse::<Color>(&text).unwrap(), Color::Blue);

    let text = serde_json::to_string("tab\there \"quoted\" \u{e9}").unwrap();
    assert_eq!(reader.parse::<String>(&text).unwrap(), "tab\there \"quoted\" \u{e9}");

    let text = serde_json::to_string(&[3_u16, 1, 2]).unwrap();
    assert_eq!(reader.parse::<[u16; 3]>(&text).unwrap(), [3, 1, 2]);

    let names = vec![String::from("a,b"), String::from("[c]")];
    let text = serde_json::to_string(&names).unwrap();
    assert_eq!(reader.parse::<Vec<String>>(&text).unwrap(), names);

    let counts: BTreeMap<String, i32> = [("x".to_owned(), 1), ("y".to_owned(), -2)].into();
    let text = serde_json::to_string(&counts).unwrap();
    assert_eq!(reader.parse::<BTreeMap<String, i32>>(&text).unwrap(), counts);

    let rows = vec![counts.clone(), BTreeMap::new(), counts];
    let text = serde_json::to_string(&rows).unwrap();
    assert_eq!(reader.parse::<Vec<BTreeMap<String, i32>>>(&text).unwrap(), rows);

    let point = Point { x: 3, y: -4 };
    let text = serde_json::to_string(&point).unwrap();
    assert_eq!(reader.parse::<Point>(&text).unwrap(), point);
}

// -----------------------------------------------------------------------------
// Precedence

#[test]
fn custom_before_enum() {
    let config = ReaderConfig::<Json>::new().custom_parser::<Color>(|_| Ok(Color::Green));
    let reader = TextReader::new(config);

    assert_eq!(strategy::<Color, _>(&reader), Strategy::Custom);
    assert_eq!(reader.parse::<Color>("\"Red\"").unwrap(), Color::Green);
}

#[test]
fn custom_receives_raw_token() {
    let config = ReaderConfig::<Json>::new()
        .custom_parser::<String>(|token| Ok(token.to_owned()));
    let reader = TextReader::new(config);

    assert_eq!(reader.parse::<String>(r#" "a\nb""#).unwrap(), r#" "a\nb""#);
}

#[test]
fn special_before_primitive() {
    let config = ReaderConfig::<Json>::new().special_parser::<u8>(|text| match text {
        "max" => Ok(u8::MAX),
        _ => Err(ParseError::primitive("u8", text, None)),
    });
    let reader = TextReader::new(config);

    assert_eq!(strategy::<u8, _>(&reader), Strategy::Special);
    assert_eq!(reader.parse::<u8>("\"max\"").unwrap(), 255);
    assert_eq!(strategy::<i8, _>(&reader), Strategy::Primitive);
}

#[test]
fn special_defaults() {
    let reader = Json::reader();
    assert_eq!(strategy::<Duration, _>(reader), Strategy::Special);
    assert_eq!(reader.parse::<Duration>("\"PT2M\"").unwrap(), Duration::from_secs(120));
    assert_eq!(reader.parse::<Ipv4Addr>("\"127.0.0.1\"").unwrap(), Ipv4Addr::LOCALHOST);
    assert!(reader.parse::<NonZeroU8>("0").is_err());
}

#[test]
fn array_before_list() {
    let reader = json();
    assert!(<[i32; 2] as Typed>::type_info().list().is_some());
    assert_eq!(strategy::<[i32; 2], _>(&reader), Strategy::Array);
    assert_eq!(strategy::<Box<[i32]>, _>(&reader), Strategy::Array);

    assert_eq!(*reader.parse::<Box<[i32]>>("[1,2,3]").unwrap(), [1, 2, 3]);
    let err = reader.parse::<[i32; 2]>("[1,2,3]").unwrap_err();
    assert!(matches!(err, ParseError::StructuralMismatch { .. }));
}

#[test]
fn primitive_before_static_factory() {
    let reader = json();
    let registry = reader.config().type_registry().read();
    assert!(registry.get_type_trait::<TypeTraitFromStr>(TypeId::of::<i32>()).is_some());
    drop(registry);

    assert_eq!(strategy::<i32, _>(&reader), Strategy::Primitive);
}

#[test]
fn generic_containers_in_order() {
    let reader = json();
    assert_eq!(strategy::<Vec<u8>, _>(&reader), Strategy::List);
    assert_eq!(strategy::<HashMap<String, u8>, _>(&reader), Strategy::Map);
    assert_eq!(strategy::<BTreeSet<u8>, _>(&reader), Strategy::Collection);
    assert_eq!(strategy::<VecDeque<u8>, _>(&reader), Strategy::Queue);
    assert_eq!(strategy::<Stack<u8>, _>(&reader), Strategy::Stack);
    assert_eq!(strategy::<(String, u8), _>(&reader), Strategy::Pair);
    assert_eq!(strategy::<BinaryHeap<u8>, _>(&reader), Strategy::Sequence);
    assert_eq!(strategy::<(u8, u8, u8), _>(&reader), Strategy::Constructor);
}

#[test]
fn untyped_containers() {
    let reader = json();
    assert_eq!(strategy::<Headers, _>(&reader), Strategy::UntypedMap);
    assert_eq!(strategy::<Tags, _>(&reader), Strategy::UntypedSequence);

    let headers = reader.parse::<Headers>(r#"{"accept":"*/*","host":"a"}"#).unwrap();
    assert_eq!(
        headers,
        Headers(vec![("accept".into(), "*/*".into()), ("host".into(), "a".into())])
    );
    let tags = reader.parse::<Tags>(r#"["x","y"]"#).unwrap();
    assert_eq!(tags, Tags(vec!["x".into(), "y".into()]));
}

struct CelsiusPlatform;

impl PlatformParsers<Json> for CelsiusPlatform {
    fn parser_for(&self, info: &'static TypeInfo) -> Option<ParseFn<Json>> {
        info.is::<Celsius>()
            .then(|| parse_fn(|_, _| Ok(Box::new(Celsius(-273.15)))))
    }
}

#[test]
fn platform_before_static_factory() {
    let reader = json();
    assert_eq!(strategy::<Celsius, _>(&reader), Strategy::StaticFactory);
    assert_eq!(reader.parse::<Celsius>("\"21.5C\"").unwrap(), Celsius(21.5));

    let config = ReaderConfig::<Json>::new()
        .registry(registry())
        .platform(CelsiusPlatform);
    let reader = TextReader::new(config);
    assert_eq!(strategy::<Celsius, _>(&reader), Strategy::Platform);
    assert_eq!(reader.parse::<Celsius>("\"21.5C\"").unwrap(), Celsius(-273.15));
}

#[test]
fn static_factory_before_structural() {
    let reader = json();
    assert_eq!(strategy::<Version, _>(&reader), Strategy::StaticFactory);
    assert_eq!(reader.parse::<Version>("\"1.2\"").unwrap(), Version { major: 1, minor: 2 });

    let err = reader.parse::<Version>("\"1\"").unwrap_err();
    assert_eq!(err.to_string(), "`1` is not a valid `Version`");
    assert_eq!(err.source().unwrap().to_string(), "missing `.`");

    let unregistered = TextReader::<Json>::new(ReaderConfig::new());
    assert_eq!(strategy::<Version, _>(&unregistered), Strategy::Structural);
}

#[test]
fn reference_factory_receives_unescape() {
    let reader = json();
    assert_eq!(strategy::<Email, _>(&reader), Strategy::StaticFactory);
    assert_eq!(reader.parse::<Email>(r#""a@b""#).unwrap(), Email("a@b".into()));
    assert!(reader.parse::<Email>("\"ab\"").is_err());
}

#[test]
fn structural_before_string_constructor() {
    let reader = json();
    assert_eq!(strategy::<Title, _>(&reader), Strategy::Structural);
    assert_eq!(reader.parse::<Title>(r#"{"text":"a"}"#).unwrap(), Title { text: "a".into() });

    assert_eq!(strategy::<Label, _>(&reader), Strategy::StringConstructor);
    assert_eq!(reader.parse::<Label>(r#""a\"b""#).unwrap(), Label("a\"b".into()));
}

#[test]
fn string_constructor_before_fallback() {
    let reader = TextReader::<Json>::new(ReaderConfig::new());
    assert_eq!(strategy::<Label, _>(&reader), Strategy::Abstract);
    assert!(matches!(
        reader.parse::<Label>("\"x\"").unwrap_err(),
        ParseError::StructuralMismatch { .. }
    ));
}

#[test]
fn optional_unwraps() {
    let reader = json();
    assert_eq!(strategy::<Option<Color>, _>(&reader), Strategy::Optional);
    assert_eq!(reader.parse::<Option<Color>>("null").unwrap(), None);
    assert_eq!(reader.parse::<Option<Color>>("4").unwrap(), Some(Color::Blue));
    assert_eq!(
        reader.parse::<Vec<Option<i32>>>("[1,null,3]").unwrap(),
        [Some(1), None, Some(3)]
    );
}

#[test]
fn dynamic_and_string() {
    let reader = json();
    assert_eq!(strategy::<DynamicValue, _>(&reader), Strategy::Dynamic);
    assert_eq!(strategy::<String, _>(&reader), Strategy::String);

    let value = reader.parse::<DynamicValue>(r#"[{"a":true}]"#).unwrap();
    assert_eq!(
        value,
        DynamicValue::Array(vec![DynamicValue::Object(vec![(
            "a".into(),
            DynamicValue::Bool(true)
        )])])
    );
}

// -----------------------------------------------------------------------------
// Strategies

#[test]
fn enum_names_and_values() {
    let reader = json();
    assert_eq!(reader.parse::<Color>("\"green\"").unwrap(), Color::Green);
    assert_eq!(reader.parse::<Color>("4").unwrap(), Color::Blue);

    let err = reader.parse::<Color>("\"Purple\"").unwrap_err();
    assert!(matches!(err, ParseError::Enum { ref token, .. } if token == "Purple"));
    assert!(reader.parse::<Color>("3").is_err());
}

#[test]
fn element_failure_names_position() {
    let reader = json();

    let err = reader.parse::<Vec<i32>>("[1,x,3]").unwrap_err();
    assert_eq!(err.path(), [&Position::Index(1)]);
    assert!(matches!(err.innermost(), ParseError::Primitive { .. }));

    let err = reader
        .parse::<HashMap<String, i32>>(r#"{"a":1,"b":"two"}"#)
        .unwrap_err();
    assert_eq!(err.path(), [&Position::Value("b".into())]);

    let err = reader.parse::<HashMap<u8, i32>>(r#"{"300":1}"#).unwrap_err();
    assert_eq!(err.path(), [&Position::Key("300".into())]);

    let err = reader
        .parse::<Vec<Point>>(r#"[{"x":1},{"x":1,"y":[]}]"#)
        .unwrap_err();
    assert_eq!(err.path(), [&Position::Index(1), &Position::Member("y".into())]);
}

#[test]
fn null_containers_fail() {
    let reader = json();
    assert!(matches!(
        reader.parse::<Vec<i32>>("null").unwrap_err(),
        ParseError::StructuralMismatch { .. }
    ));
    assert_eq!(reader.parse::<Option<Vec<i32>>>("null").unwrap(), None);
    assert!(reader.parse::<Vec<i32>>("[]").unwrap().is_empty());
}

#[test]
fn null_is_not_text() {
    let reader = json();

    let err = reader.parse::<Vec<String>>("[null]").unwrap_err();
    assert_eq!(err.path(), [&Position::Index(0)]);
    assert!(matches!(err.innermost(), ParseError::StructuralMismatch { .. }));

    let err = reader.parse::<Title>(r#"{"text":null}"#).unwrap_err();
    assert_eq!(err.path(), [&Position::Member("text".into())]);
    assert!(reader.parse::<Label>("null").is_err());
    assert!(reader.parse::<std::path::PathBuf>("null").is_err());

    assert_eq!(reader.parse::<Option<String>>("null").unwrap(), None);
    assert_eq!(
        reader.parse::<Vec<Option<String>>>(r#"[null,"null"]"#).unwrap(),
        [None, Some("null".to_owned())]
    );
}

#[test]
fn queue_and_stack_discipline() {
    let reader = json();

    let mut queue = reader.parse::<VecDeque<u8>>("[1,2,3]").unwrap();
    assert_eq!(queue.pop_front(), Some(1));

    let mut stack = reader.parse::<Stack<u8>>("[3,2,1]").unwrap();
    assert_eq!(stack.pop(), Some(3));
    assert_eq!(stack.pop(), Some(2));
}

#[test]
fn pairs() {
    let reader = json();
    let expected = (String::from("a"), 1_u8);

    assert_eq!(reader.parse::<(String, u8)>(r#"{"Key":"a","Value":1}"#).unwrap(), expected);
    assert_eq!(reader.parse::<(String, u8)>(r#"{"value":1,"key":"a"}"#).unwrap(), expected);
    assert_eq!(reader.parse::<(String, u8)>(r#"{"a":1}"#).unwrap(), expected);
    assert_eq!(reader.parse::<(String, u8)>(r#"["a",1]"#).unwrap(), expected);
    assert!(reader.parse::<(String, u8)>(r#"{"a":1,"b":2}"#).is_err());

    let err = reader.parse::<(String, u8)>(r#"{"Key":"a"}"#).unwrap_err();
    assert!(err.path().is_empty());
    assert!(err.to_string().contains("missing member `Value`"));
    let err = reader.parse::<(String, u8)>(r#"{"value":1}"#).unwrap_err();
    assert!(err.to_string().contains("missing member `Key`"));
}

#[test]
fn generic_constructor() {
    let reader = json();
    let expected = (1_u8, String::from("a"), true);

    assert_eq!(reader.parse::<(u8, String, bool)>(r#"[1,"a",true]"#).unwrap(), expected);
    assert_eq!(
        reader.parse::<(u8, String, bool)>(r#"{"2":true,"0":1,"1":"a"}"#).unwrap(),
        expected
    );
    assert_eq!(
        reader.parse::<(u8, Option<u8>, bool)>(r#"{"0":1,"2":false}"#).unwrap(),
        (1, None, false)
    );

    let err = reader.parse::<(u8, String, bool)>("[1,\"a\"]").unwrap_err();
    assert!(matches!(err, ParseError::StructuralMismatch { .. }));
    let err = reader.parse::<(u8, String, bool)>(r#"{"0":1,"1":"a"}"#).unwrap_err();
    assert!(err.to_string().contains("missing member `2`"));
}

#[test]
fn structural_members() {
    let reader = json();

    let point = reader.parse::<Point>(r#"{"X":1,"y":2,"z":3,"__type":"Point"}"#).unwrap();
    assert_eq!(point, Point { x: 1, y: 2 });
    assert_eq!(reader.parse::<Point>(r#"{"y":5}"#).unwrap(), Point { x: 0, y: 5 });
    assert!(reader.parse::<Point>("[1,2]").is_err());

    let strict = TextReader::<Json>::new(ReaderConfig::new().strict_members(true));
    let err = strict.parse::<Point>(r#"{"x":1,"z":3}"#).unwrap_err();
    assert!(err.to_string().contains("unknown member `z`"));
}

#[test]
fn recursive_types() {
    let reader = json();
    let tree = reader
        .parse::<Node>(r#"{"name":"root","children":[{"name":"leaf","children":[]}]}"#)
        .unwrap();

    assert_eq!(tree.children.len(), 1);
    assert_eq!(tree.children[0].name, "leaf");
    assert!(reader.is_cached(Node::type_info()));
    assert!(reader.is_cached(<Vec<Node> as Typed>::type_info()));
}

#[test]
fn abstract_dispatch() {
    let reader = json();
    assert_eq!(strategy::<Shape, _>(&reader), Strategy::Abstract);

    let shape = reader.parse::<Shape>(r#"{"__type":"Circle","r":2}"#).unwrap();
    assert_eq!(shape, Shape::Circle(Circle { r: 2 }));

    let shapes = reader
        .parse::<Vec<Shape>>(r#"[{"side":3,"__type":"Square"},{"__type":"Circle"}]"#)
        .unwrap();
    assert_eq!(
        shapes,
        [Shape::Square(Square { side: 3 }), Shape::Circle(Circle { r: 0 })]
    );

    let err = reader.parse::<Shape>(r#"{"__type":"Hexagon"}"#).unwrap_err();
    assert!(err.to_string().contains("`Hexagon` is not a known subtype"));
    assert!(reader.parse::<Shape>(r#"{"r":2}"#).is_err());
}

#[test]
fn total_resolution() {
    let reader = json();
    assert_eq!(strategy::<Shapeless, _>(&reader), Strategy::Abstract);

    for token in ["", "1", "\"x\"", "[1]", "{\"a\":1}", "{\"__type\":\"Circle\"}"] {
        let err = reader.parse::<Shapeless>(token).unwrap_err();
        assert!(matches!(err, ParseError::StructuralMismatch { .. }), "{token}");
    }
}

// -----------------------------------------------------------------------------
// Depth

#[test]
fn depth_limit_applies_to_nested_values() {
    let shallow = TextReader::new(ReaderConfig::<Json>::new().max_depth(1));
    let err = shallow.parse::<Vec<Vec<u8>>>("[[1]]").unwrap_err();
    assert_eq!(err.path(), [&Position::Index(0), &Position::Index(0)]);
    assert!(matches!(err.innermost(), ParseError::Syntax { .. }));

    let enough = TextReader::new(ReaderConfig::<Json>::new().max_depth(2));
    assert_eq!(enough.parse::<Vec<Vec<u8>>>("[[1]]").unwrap(), [[1]]);
    assert_eq!(enough.parser_of(<Vec<u8> as Typed>::type_info()).depth(), 0);
}

#[test]
fn deep_documents_fail_without_overflow() {
    let reader = json();

    let deep = "[".repeat(5_000) + &"]".repeat(5_000);
    let err = reader.parse::<DynamicValue>(&deep).unwrap_err();
    assert!(matches!(err.innermost(), ParseError::Syntax { .. }));

    let deep = r#"{"children":["#.repeat(5_000) + &"]}".repeat(5_000);
    let err = reader.parse::<Node>(&deep).unwrap_err();
    assert!(matches!(err.innermost(), ParseError::Syntax { .. }));
}

// -----------------------------------------------------------------------------
// Cache and hooks

#[test]
fn idempotent_resolution() {
    let reader = json();
    let info = <Vec<Point> as Typed>::type_info();

    let first = reader.get_or_resolve(info);
    let second = reader.get_or_resolve(info);
    assert!(first.same_fn(&second));

    let fresh = reader.resolve(info);
    assert!(!fresh.same_fn(&first));
    assert_eq!(fresh.strategy(), first.strategy());

    let token = r#"[{"x":1,"y":2}]"#;
    let a = first.parse(&reader, token).unwrap().downcast::<Vec<Point>>().unwrap();
    let b = fresh.parse(&reader, token).unwrap().downcast::<Vec<Point>>().unwrap();
    assert_eq!(a, b);
}

#[test]
fn resolution_is_lazy() {
    let reader = json();
    let info = <Vec<Vec<u8>> as Typed>::type_info();

    reader.get_or_resolve(info);
    assert!(reader.is_cached(info));
    assert!(!reader.is_cached(<Vec<u8> as Typed>::type_info()));

    reader.parse::<Vec<Vec<u8>>>("[[1]]").unwrap();
    assert!(reader.is_cached(<Vec<u8> as Typed>::type_info()));
    assert!(reader.is_cached(<u8 as Typed>::type_info()));
}

#[test]
fn concurrent_first_use_publishes_once() {
    let reader = json();
    let info = <BTreeMap<String, Vec<Point>> as Typed>::type_info();

    let resolved: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| reader.get_or_resolve(info)))
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert!(resolved.iter().all(|r| r.same_fn(&resolved[0])));
    assert_eq!(reader.cached_len(), 1);
}

#[test]
fn hooks_wrap_but_are_not_cached() {
    let config = ReaderConfig::<Json>::new().on_deserialized::<Point>(|mut point| {
        point.x *= 10;
        point
    });
    let reader = TextReader::new(config);
    let info = Point::type_info();

    let parser = reader.parser_of(info);
    assert!(parser.has_hook());
    assert_eq!(parser.strategy(), Strategy::Structural);

    let token = r#"{"x":1,"y":2}"#;
    assert_eq!(reader.parse::<Point>(token).unwrap(), Point { x: 10, y: 2 });

    let core = reader.get_or_resolve(info);
    let raw = core.parse(&reader, token).unwrap().downcast::<Point>().unwrap();
    assert_eq!(*raw, Point { x: 1, y: 2 });

    let nested = reader.parse::<Vec<Point>>("[{\"x\":2}]").unwrap();
    assert_eq!(nested, [Point { x: 20, y: 0 }]);
}

// -----------------------------------------------------------------------------
// JSV

#[test]
fn jsv_documents() {
    let reader = jsv();

    assert_eq!(reader.parse::<Point>("{x:1,y:-2}").unwrap(), Point { x: 1, y: -2 });
    assert_eq!(reader.parse::<Vec<String>>("a,b,\"c,d\"").unwrap(), ["a", "b", "c,d"]);
    assert_eq!(reader.parse::<Option<i32>>("").unwrap(), None);
    assert_eq!(reader.parse::<String>("null").unwrap(), "null");
    assert_eq!(reader.parse::<Vec<Option<u8>>>("[1,,3]").unwrap(), [Some(1), None, Some(3)]);

    let map = reader
        .parse::<HashMap<String, Vec<Color>>>("{warm:[Red],cold:[Blue,green]}")
        .unwrap();
    assert_eq!(map["cold"], [Color::Blue, Color::Green]);

    let shape = reader.parse::<Shape>("{__type:Square,side:4}").unwrap();
    assert_eq!(shape, Shape::Square(Square { side: 4 }));

    let err = reader.parse::<Vec<u8>>("[1,,3]").unwrap_err();
    assert_eq!(err.path(), [&Position::Index(1)]);
}
