// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test readability over pedantic
#![allow(clippy::missing_panics_doc)] // Tests panic on failure
#![allow(clippy::items_after_statements)] // Test helpers
#![allow(clippy::cast_possible_truncation)] // Test data conversions

//! Value transfer through generated profiles and custom transforms.

use dtomap::{Mappable, Mapper, MapperConfig};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Mappable, Default, Debug, Clone, PartialEq)]
#[mapper(namespace = "db")]
pub struct Address {
    pub street: String,
    pub city: String,
}

#[derive(Mappable, Default, Debug, Clone, PartialEq)]
#[mapper(namespace = "api")]
pub struct AddressDto {
    pub city: String,
}

#[derive(Mappable, Default, Debug, Clone, PartialEq)]
#[mapper(namespace = "db", methods(full_name))]
pub struct Person {
    pub first: String,
    pub last: String,
    #[mapper(alias = "identifier")]
    pub id: u64,
    pub home: Option<Address>,
    pub previous: Vec<Address>,
    pub scores: HashMap<String, u16>,
    pub tags: Vec<String>,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first, self.last)
    }
}

#[derive(Mappable, Default, Debug, Clone, PartialEq)]
#[mapper(namespace = "api")]
pub struct PersonDto {
    pub first: String,
    pub identifier: u64,
    pub full_name: String,
    pub home: Option<AddressDto>,
    pub previous: Vec<AddressDto>,
    pub scores: BTreeMap<String, u32>,
    pub tags: Vec<String>,
}

fn person() -> Person {
    Person {
        first: "Ada".into(),
        last: "Lovelace".into(),
        id: 1815,
        home: Some(Address {
            street: "St James's Square".into(),
            city: "London".into(),
        }),
        previous: vec![
            Address {
                street: "a".into(),
                city: "Marylebone".into(),
            },
            Address {
                street: "b".into(),
                city: "Ockham".into(),
            },
        ],
        scores: HashMap::from([("math".to_string(), 100), ("poetry".to_string(), 7)]),
        tags: vec!["analyst".into(), "engine".into()],
    }
}

fn mapper() -> Mapper {
    let mapper = Mapper::new();
    mapper.create_map::<Person, PersonDto>().expect("person");
    mapper.create_map::<Address, AddressDto>().expect("address");
    mapper
}

#[test]
fn test_matching_fields_copied() {
    #[derive(Mappable, Default)]
    #[mapper(namespace = "simple")]
    pub struct Src {
        pub name: String,
        pub age: i32,
    }

    #[derive(Mappable, Default, Debug, PartialEq)]
    #[mapper(namespace = "simple")]
    pub struct Dst {
        pub name: String,
        pub age: i32,
    }

    let mapper = Mapper::new();
    mapper.create_map::<Src, Dst>().expect("register");
    let dst: Dst = mapper
        .map(&Src {
            name: "Bob".into(),
            age: 41,
        })
        .expect("map");
    assert_eq!(
        dst,
        Dst {
            name: "Bob".into(),
            age: 41
        }
    );
}

#[test]
fn test_nested_profile_transfer() {
    let dto: PersonDto = mapper().map(&person()).expect("map");

    assert_eq!(dto.first, "Ada");
    assert_eq!(dto.identifier, 1815, "alias tag on the source names the destination");
    assert_eq!(dto.full_name, "Ada Lovelace", "getter feeds the same-named field");
    assert_eq!(
        dto.home,
        Some(AddressDto {
            city: "London".into()
        })
    );
    assert_eq!(
        dto.previous.iter().map(|a| a.city.as_str()).collect::<Vec<_>>(),
        vec!["Marylebone", "Ockham"]
    );
    assert_eq!(dto.scores.get("math"), Some(&100));
    assert_eq!(dto.scores.get("poetry"), Some(&7));
    assert_eq!(dto.tags, vec!["analyst".to_string(), "engine".to_string()]);
}

#[test]
fn test_null_reference_stays_null() {
    let mut src = person();
    src.home = None;
    let dto: PersonDto = mapper().map(&src).expect("map");
    assert_eq!(dto.home, None);
}

#[test]
fn test_reference_top_level() {
    let mapper = mapper();

    let none: Option<PersonDto> = mapper.map(&None::<Person>).expect("map none");
    assert_eq!(none, None);

    let some: Option<PersonDto> = mapper.map(&Some(person())).expect("map some");
    assert_eq!(some.map(|p| p.identifier), Some(1815));
}

#[test]
fn test_sequence_preserves_length_and_order() {
    let mapper = mapper();
    let count = fastrand::usize(1..64);
    let people: Vec<Person> = (0..count)
        .map(|i| Person {
            id: i as u64,
            first: format!("p{}", i),
            ..Person::default()
        })
        .collect();

    let dtos: Vec<PersonDto> = mapper.map(&people).expect("map");
    assert_eq!(dtos.len(), count);
    for (i, dto) in dtos.iter().enumerate() {
        assert_eq!(dto.identifier, i as u64);
        assert_eq!(dto.first, format!("p{}", i));
    }

    let empty: Vec<PersonDto> = mapper.map(&Vec::<Person>::new()).expect("map empty");
    assert!(empty.is_empty());
}

#[test]
fn test_getter_overrides_same_named_field() {
    #[derive(Mappable, Default)]
    #[mapper(namespace = "override", methods(name))]
    pub struct Src {
        pub name: String,
    }

    impl Src {
        pub fn name(&self) -> String {
            format!("method:{}", self.name)
        }
    }

    #[derive(Mappable, Default, Debug, PartialEq)]
    #[mapper(namespace = "override")]
    pub struct Dst {
        pub name: String,
    }

    let mapper = Mapper::new();
    mapper.create_map::<Src, Dst>().expect("register");
    let dst: Dst = mapper.map(&Src { name: "ada".into() }).expect("map");
    assert_eq!(dst.name, "method:ada");
}

#[test]
fn test_unregistered_nested_pair_left_zero() {
    let mapper = Mapper::new();
    mapper.create_map::<Person, PersonDto>().expect("person");

    let dto: PersonDto = mapper.map(&person()).expect("map");
    assert_eq!(dto.first, "Ada");
    assert_eq!(dto.home, Some(AddressDto::default()));
    assert_eq!(dto.previous, vec![AddressDto::default(), AddressDto::default()]);
}

#[test]
fn test_lossy_scalar_conversion_skipped() {
    #[derive(Mappable, Default)]
    #[mapper(namespace = "lossy")]
    pub struct Wide {
        pub small: u64,
        pub big: u64,
        pub ratio: f64,
        pub label: String,
    }

    #[derive(Mappable, Default, Debug, PartialEq)]
    #[mapper(namespace = "lossy")]
    pub struct Narrow {
        pub small: u8,
        pub big: u8,
        pub ratio: f32,
        pub label: u32,
    }

    let mapper = Mapper::new();
    mapper.create_map::<Wide, Narrow>().expect("register");
    let out: Narrow = mapper
        .map(&Wide {
            small: 200,
            big: 1_000,
            ratio: 0.5,
            label: "12".into(),
        })
        .expect("map");

    assert_eq!(
        out,
        Narrow {
            small: 200,
            big: 0,
            ratio: 0.5,
            label: 0
        }
    );
}

#[test]
fn test_custom_transform_returns_exact_result() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let mapper = Mapper::new();
    mapper
        .create_custom_map::<Address, AddressDto, _>(move |a| {
            counter.fetch_add(1, Ordering::SeqCst);
            AddressDto {
                city: a.city.to_uppercase(),
            }
        })
        .expect("register");

    let src = Address {
        street: "x".into(),
        city: "Paris".into(),
    };
    let dto: AddressDto = mapper.map(&src).expect("map");
    assert_eq!(dto.city, "PARIS");
    assert_eq!(calls.load(Ordering::SeqCst), 1, "transform runs once, no profile pass");
}

#[test]
fn test_custom_transform_elementwise() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let mapper = Mapper::new();
    mapper
        .create_custom_map::<Address, AddressDto, _>(move |a| {
            counter.fetch_add(1, Ordering::SeqCst);
            AddressDto {
                city: format!("<{}>", a.city),
            }
        })
        .expect("register");

    let src = vec![
        Address {
            street: String::new(),
            city: "a".into(),
        },
        Address {
            street: String::new(),
            city: "b".into(),
        },
        Address {
            street: String::new(),
            city: "c".into(),
        },
    ];
    let out: Vec<AddressDto> = mapper.map(&src).expect("map");
    assert_eq!(
        out.iter().map(|a| a.city.as_str()).collect::<Vec<_>>(),
        vec!["<a>", "<b>", "<c>"]
    );
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_custom_transform_for_nested_field() {
    let mapper = Mapper::new();
    mapper.create_map::<Person, PersonDto>().expect("person");
    mapper
        .create_custom_map::<Address, AddressDto, _>(|a| AddressDto {
            city: format!("{} ({})", a.city, a.street),
        })
        .expect("address");

    let dto: PersonDto = mapper.map(&person()).expect("map");
    assert_eq!(
        dto.home.map(|h| h.city),
        Some("London (St James's Square)".to_string())
    );
}

#[test]
fn test_private_fields_follow_config() {
    #[derive(Mappable, Default)]
    #[mapper(namespace = "private", methods(Token))]
    pub struct Session {
        pub user: String,
        token: String,
        nonce: u32,
    }

    impl Session {
        #[allow(non_snake_case)]
        pub fn Token(&self) -> String {
            format!("getter:{}", self.token)
        }
    }

    #[derive(Mappable, Default, Debug, PartialEq)]
    #[mapper(namespace = "private")]
    pub struct SessionDto {
        pub user: String,
        pub token: String,
        pub nonce: u32,
    }

    let session = Session {
        user: "ada".into(),
        token: "t0k".into(),
        nonce: 42,
    };

    let mapper = Mapper::new();
    mapper.create_map::<Session, SessionDto>().expect("register");

    let dto: SessionDto = mapper.map(&session).expect("map");
    assert_eq!(dto.user, "ada");
    assert_eq!(dto.token, "getter:t0k", "private field read through its getter");
    assert_eq!(dto.nonce, 0, "private field without getter is skipped");

    mapper.configure(MapperConfig::new().map_unexported_fields(true));
    let dto: SessionDto = mapper.map(&session).expect("map");
    assert_eq!(dto.token, "t0k");
    assert_eq!(dto.nonce, 42);
}

#[test]
fn test_private_destination_needs_config() {
    #[derive(Mappable, Default)]
    #[mapper(namespace = "private_dst")]
    pub struct Input {
        pub code: String,
    }

    #[derive(Mappable, Default, Debug)]
    #[mapper(namespace = "private_dst")]
    pub struct Output {
        code: String,
    }

    let mapper = Mapper::new();
    mapper.create_map::<Input, Output>().expect("register");
    let input = Input { code: "x1".into() };

    let out: Output = mapper.map(&input).expect("map");
    assert_eq!(out.code, "");

    mapper.configure(MapperConfig::new().map_unexported_fields(true));
    let out: Output = mapper.map(&input).expect("map");
    assert_eq!(out.code, "x1");
}

#[test]
fn test_recursive_type_depth_limit() {
    #[derive(Mappable, Default, Debug)]
    #[mapper(namespace = "chain")]
    pub struct Node {
        pub value: u32,
        pub next: Option<Box<Node>>,
    }

    #[derive(Mappable, Default, Debug)]
    #[mapper(namespace = "chain")]
    pub struct NodeDto {
        pub value: u32,
        pub next: Option<Box<NodeDto>>,
    }

    fn chain(len: u32) -> Node {
        (0..len).rev().fold(Node::default(), |next, value| Node {
            value,
            next: Some(Box::new(next)),
        })
    }

    fn depth(node: &NodeDto) -> usize {
        1 + node.next.as_deref().map_or(0, depth)
    }

    let mapper = Mapper::new();
    mapper.create_map::<Node, NodeDto>().expect("register");

    let dto: NodeDto = mapper.map(&chain(5)).expect("map");
    assert_eq!(depth(&dto), 6);
    assert_eq!(dto.next.as_ref().map(|n| n.value), Some(1));

    mapper.configure(MapperConfig::new().max_depth(6));
    let dto: NodeDto = mapper.map(&chain(50)).expect("map");
    assert!(depth(&dto) < 50, "descent stops at the limit");
}
