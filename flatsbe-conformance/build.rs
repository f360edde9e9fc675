use anyhow::Context;
use flatsbe_codegen::{DirectoryOutputManager, Generator, GeneratorOptions};
use flatsbe_ir::{IntermediateRepresentation, PrimitiveType, Signal, Token};
use std::{env, path::PathBuf};

fn main() -> anyhow::Result<()> {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = PathBuf::from(env::var("OUT_DIR").context("OUT_DIR is not set")?);
    let ir = car_schema();
    let output = DirectoryOutputManager::new(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    Generator::new(&ir, output)
        .with_options(GeneratorOptions::default())
        .generate()
        .context("generating the car schema")?;
    Ok(())
}

fn car_schema() -> IntermediateRepresentation {
    let mut ir = IntermediateRepresentation::new(
        "car",
        vec![
            Token::new(Signal::BeginComposite, "messageHeader"),
            Token::encoding("blockLength", PrimitiveType::Uint16, 0),
            Token::encoding("templateId", PrimitiveType::Uint16, 2),
            Token::encoding("schemaId", PrimitiveType::Uint16, 4),
            Token::encoding("version", PrimitiveType::Uint16, 6),
            Token::new(Signal::EndComposite, "messageHeader"),
        ],
    );

    ir.add_type(enumeration(
        "Color",
        PrimitiveType::Uint8,
        vec![Token::valid_value("A", 0u8), Token::valid_value("B", 1u8)],
    ));
    ir.add_type(enumeration(
        "Model",
        PrimitiveType::Char,
        vec![
            Token::char_value("A", b'A'),
            Token::char_value("B", b'B'),
            Token::char_value("C", b'C'),
        ],
    ));
    ir.add_type(enumeration(
        "Direction",
        PrimitiveType::Int8,
        vec![Token::valid_value("Down", -1i64), Token::valid_value("Up", 1i64)],
    ));
    ir.add_type(boost_type(Token::new(Signal::BeginEnum, "BoostType")));
    ir.add_type(optional_extras(Token::new(Signal::BeginSet, "OptionalExtras")));
    ir.add_type(booster(Token::new(Signal::BeginComposite, "Booster")));

    let mut engine = vec![
        Token::new(Signal::BeginComposite, "Engine"),
        Token::encoding("capacity", PrimitiveType::Uint16, 0),
        Token::encoding("numCylinders", PrimitiveType::Uint8, 2),
    ];
    engine.extend(booster(
        Token::new(Signal::BeginComposite, "booster")
            .with_type_name("Booster")
            .with_offset(3),
    ));
    engine.extend(optional_extras(
        Token::new(Signal::BeginSet, "extras")
            .with_type_name("OptionalExtras")
            .with_offset(5),
    ));
    engine.push(Token::new(Signal::EndComposite, "Engine"));
    ir.add_type(engine);

    // The header also appears among the declared types; the generator skips it.
    let header = ir.header().to_vec();
    ir.add_type(header);
    ir
}

fn enumeration(name: &str, storage: PrimitiveType, values: Vec<Token>) -> Vec<Token> {
    let mut tokens = vec![Token::new(Signal::BeginEnum, name).with_primitive_type(storage)];
    tokens.extend(values);
    tokens.push(Token::new(Signal::EndEnum, name));
    tokens
}

fn boost_type(begin: Token) -> Vec<Token> {
    let name = begin.name().to_string();
    vec![
        begin.with_primitive_type(PrimitiveType::Char),
        Token::char_value("TURBO", b'T'),
        Token::char_value("SUPERCHARGER", b'S'),
        Token::char_value("NITROUS", b'N'),
        Token::char_value("KERS", b'K'),
        Token::new(Signal::EndEnum, name),
    ]
}

fn optional_extras(begin: Token) -> Vec<Token> {
    let name = begin.name().to_string();
    vec![
        begin.with_primitive_type(PrimitiveType::Uint8),
        Token::choice("sunRoof", 0),
        Token::choice("sportsPack", 1),
        Token::choice("cruiseControl", 2),
        Token::new(Signal::EndSet, name),
    ]
}

fn booster(begin: Token) -> Vec<Token> {
    let name = begin.name().to_string();
    let mut tokens = vec![begin];
    tokens.extend(boost_type(
        Token::new(Signal::BeginEnum, "boostType").with_type_name("BoostType"),
    ));
    tokens.push(Token::encoding("horsePower", PrimitiveType::Uint8, 1));
    tokens.push(Token::new(Signal::EndComposite, name));
    tokens
}
